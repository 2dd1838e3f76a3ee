//! OpenAI-compatible chat completions provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::http_client::RetryPolicy;
use crate::providers::common::create_http_client;
use crate::types::ProviderOptions;

pub(crate) use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, OpenaiErrorEnvelope};

pub(crate) const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub(crate) const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI-compatible provider (OpenAI, Azure-style gateways, local servers
/// speaking `/chat/completions`)
pub struct OpenaiProvider {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) model: String,
    pub(crate) base_url: String,
    pub(crate) retry: RetryPolicy,
}

impl OpenaiProvider {
    pub fn new(api_key: String, options: ProviderOptions) -> Self {
        Self {
            client: create_http_client(),
            api_key,
            model: options
                .model
                .unwrap_or_else(|| OPENAI_DEFAULT_MODEL.to_string()),
            base_url: options
                .base_url
                .unwrap_or_else(|| OPENAI_API_BASE.to_string()),
            retry: RetryPolicy::with_retries(options.max_retries),
        }
    }
}
