pub mod database;
pub mod gemini;
pub mod metrics;

pub use database::{Database, UserStore};
pub use gemini::{GeminiClient, GeminiError, GeminiErrorKind};
pub use metrics::{get_metrics, init_metrics};
