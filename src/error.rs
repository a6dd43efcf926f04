//! Errors raised while talking to the page.

/// Failures of the JavaScript bridge.
///
/// A missing element is never one of these: lookups that find nothing come back as `None`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("`{name}` is not an object")]
    NotAnObject { name: String },

    #[error("`{name}` is not a string")]
    NotAString { name: String },
}

impl Error {
    pub fn not_an_object(name: &str) -> Self {
        Error::NotAnObject {
            name: name.to_string(),
        }
    }

    pub fn not_a_string(name: &str) -> Self {
        Error::NotAString {
            name: name.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
