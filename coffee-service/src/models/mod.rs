//! Request and response bodies for the coffee service.

pub mod answer;

pub use answer::{AnswerEnvelope, ApiInfo, AskCoffeeRequest};
