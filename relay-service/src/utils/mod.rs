pub mod validation;

pub use validation::{validate_question, QuestionJson, ValidationError};
