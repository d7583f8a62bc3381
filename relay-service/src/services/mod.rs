pub mod formatter;
pub mod metrics;
pub mod prompt;
pub mod providers;

pub use formatter::format_response;
pub use metrics::{get_metrics, init_metrics};
pub use prompt::compose_prompt;
