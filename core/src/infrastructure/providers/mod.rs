// LLM Provider Infrastructure - Anti-Corruption Layer Implementations
//
// Each adapter translates between the domain completion interface and one
// vendor API. The analyst path runs on OpenAI, the ghostwriter path on
// Anthropic, but nothing in the application layer knows which is which.

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicChat;
pub use openai::OpenAiChat;
