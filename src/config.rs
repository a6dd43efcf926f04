//! Binder configuration.

use tracing::Level;

pub const DEFAULT_BUTTON_ID: &str = "btnCount";
pub const DEFAULT_DISPLAY_ID: &str = "ctr";

/// Which elements the counter binds to, and how chatty it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterConfig {
    /// Id of the clickable control.
    pub button_id: String,
    /// Id of the element whose text shows the count.
    pub display_id: String,
    /// Most verbose level the console subscriber lets through.
    pub log_level: Level,
}

impl Default for CounterConfig {
    fn default() -> Self {
        CounterConfig {
            button_id: DEFAULT_BUTTON_ID.to_string(),
            display_id: DEFAULT_DISPLAY_ID.to_string(),
            log_level: Level::INFO,
        }
    }
}

impl CounterConfig {
    pub fn with_button_id(mut self, id: impl Into<String>) -> Self {
        self.button_id = id.into();
        self
    }

    pub fn with_display_id(mut self, id: impl Into<String>) -> Self {
        self.display_id = id.into();
        self
    }

    pub fn with_log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_page() {
        let config = CounterConfig::default();
        assert_eq!(config.button_id, "btnCount");
        assert_eq!(config.display_id, "ctr");
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn builders_override_one_field_each() {
        let config = CounterConfig::default()
            .with_button_id("go")
            .with_log_level(Level::DEBUG);
        assert_eq!(config.button_id, "go");
        assert_eq!(config.display_id, "ctr");
        assert_eq!(config.log_level, Level::DEBUG);

        let config = config.with_display_id("out");
        assert_eq!(config.display_id, "out");
    }
}
