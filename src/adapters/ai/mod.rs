//! LLM adapter module. Implements LlmPort.
//!
//! Provides the OpenAI-compatible adapter, a mock adapter for offline runs, and a
//! disabled adapter used when no API key is configured.

pub mod disabled_adapter;
pub mod mock_adapter;
pub mod openai_adapter;
pub mod prompts;

pub use disabled_adapter::DisabledLlmAdapter;
pub use mock_adapter::MockLlmAdapter;
pub use openai_adapter::OpenAiAdapter;
