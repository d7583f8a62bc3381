pub mod chat;
pub mod diagnostics;
pub mod health;

pub use chat::{ChatRequest, ChatResponse};
pub use diagnostics::DiagnosticResponse;
pub use health::HealthResponse;
