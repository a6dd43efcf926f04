//! `tracing` subscriber setup.
//!
//! In the browser every formatted event goes to `console.log`; elsewhere it goes to stderr.
//! Timestamps are off since `wasm32-unknown-unknown` has no clock to read.

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Install the global subscriber, capped at `level`. Returns `false` if one was already set.
pub fn init(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .with_writer(ConsoleMakeWriter)
        .try_init()
        .is_ok()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::default()
    }
}

/// Collects one formatted event and emits it as a single line when dropped.
#[derive(Debug, Default)]
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl std::io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if !line.is_empty() {
            emit(line);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &str) {
    use crate::bridge::{self, JsType};

    // no tracing in here: a failure to log must not log
    let console = bridge::global().and_then(|g| bridge::get(&g, "console").into_ref("console").ok());
    if let Some(console) = console {
        let _ = bridge::method_call(&console, "log", &[JsType::from(line)]);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &str) {
    eprintln!("{}", line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn events_are_plain_lines_capped_at_level() {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .without_time()
            .with_ansi(false)
            .with_target(false)
            .with_writer(capture.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(count = 3, "click");
            tracing::debug!("hidden");
        });

        let out = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert_eq!(out.trim(), "INFO click count=3");
    }

    #[test]
    fn second_init_is_refused() {
        init(Level::WARN);
        assert!(!init(Level::WARN));
    }

    #[test]
    fn console_writer_buffers_until_dropped() {
        let mut writer = ConsoleMakeWriter.make_writer();
        writer.write_all(b"INFO counter ").unwrap();
        writer.write_all(b"bound\n").unwrap();
        assert_eq!(writer.buf, b"INFO counter bound\n");
    }
}
