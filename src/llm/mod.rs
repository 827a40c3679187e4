pub mod provider;
pub mod chat;
pub mod prompts;
pub mod parser;

pub use provider::{LLMProvider, RawModelResponse};
pub use chat::ChatCompletionProvider;
pub use parser::{normalize, Normalized};
