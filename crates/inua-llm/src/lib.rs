//! # inua-llm
//!
//! The model collaborator: a provider trait over "instructions + user
//! text in, raw text out", an OpenAI-compatible chat-completions client,
//! and tolerant extraction of the first JSON object from a raw reply.

#![deny(unsafe_code)]

pub mod extract;
pub mod openai;
pub mod provider;

pub use extract::{extract_first_json_object, parse_object};
pub use openai::{OpenAiCompatConfig, OpenAiCompatProvider};
pub use provider::{CompletionProvider, CompletionRequest, ProviderError, ProviderResult};
