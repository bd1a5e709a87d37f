//! Process-wide logging setup.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! binary's job. Tests install none, so handler error logs stay silent there.

pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize tracing/logging using `LOG_FORMAT` (`json` or `pretty`, default `json`).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    let format = std::env::var("LOG_FORMAT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_default();
    self::tracing::init(format);
}
