// file copyright release to public domain
//! Build with `cargo build --example counter --target wasm32-unknown-unknown` and serve
//! `counter.html`, `wap.js` and `counter.wasm` from one directory.

#[cfg(target_arch = "wasm32")]
#[macro_use]
extern crate wap_counter;

#[cfg(target_arch = "wasm32")]
wap_begin!(|window| {
    if let Err(e) = wap_counter::web::start(window, wap_counter::CounterConfig::default()) {
        tracing::error!("counter failed to start: {}", e);
    }
});

fn main() {}
