pub mod metrics;
pub mod prompt;
pub mod providers;
pub mod question;

pub use question::{AskError, QuestionService};
