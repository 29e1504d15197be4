pub mod openai;
pub mod retry;
pub mod traits;

pub use openai::OpenAiCompletionClient;
pub use retry::RetryingCompletionService;
pub use traits::{
    ChatMessage, Choice, ChoiceMessage, CompletionError, CompletionRequest, CompletionResponse,
    CompletionService, Role,
};
