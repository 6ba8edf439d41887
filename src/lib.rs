// Library half of the game: everything the binary and the integration tests
// drive. `main.rs` only parses arguments and owns the terminal.

rust_i18n::i18n!("locales", fallback = "es");

pub mod app;
pub mod config;
pub mod event;
pub mod generator;
pub mod logging;
pub mod session;
pub mod speech;
pub mod ui;
pub mod words;

/// Interface languages bundled under `locales/`.
pub fn available_locales() -> Vec<&'static str> {
    rust_i18n::available_locales!()
}
