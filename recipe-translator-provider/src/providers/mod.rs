//! LLM provider implementations

/// Shared utilities used by provider implementations.
pub mod common;
/// Prompt construction shared by every provider.
pub mod prompt;

#[cfg(feature = "anthropic")]
mod anthropic;
#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "anthropic")]
pub use anthropic::AnthropicProvider;
#[cfg(feature = "openai")]
pub use openai::OpenaiProvider;
