//! HTTP handlers for the relay service.

pub mod chat;
pub mod diagnostics;
pub mod fallback;
pub mod health;
pub mod metrics;

pub use chat::chat;
pub use diagnostics::test_ai;
pub use fallback::{handle_panic, not_found};
pub use health::health_check;
pub use metrics::metrics_endpoint;
