//! A click counter for a web page, written exclusively in Rust.
//!
//! The page-independent part is [`counter::CounterBinder`], which reacts to a page's ready
//! and click events through the [`dom::Document`] trait. On `wasm32` the `bridge` and `web`
//! modules connect it to a browser page loaded by `wap.js`:
//!
//! ```ignore
//! #[macro_use]
//! extern crate wap_counter;
//!
//! wap_begin!(|window| {
//!     if let Err(e) = wap_counter::web::start(window, Default::default()) {
//!         tracing::error!("counter failed to start: {}", e);
//!     }
//! });
//! ```

pub mod config;
pub mod counter;
pub mod dom;
pub mod error;
pub mod logging;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod slot;

#[cfg(target_arch = "wasm32")]
pub mod bridge;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::CounterConfig;
pub use counter::{BindState, Binding, Counter, CounterBinder};
pub use dom::{Document, MemoryDocument};
pub use error::{Error, Result};
