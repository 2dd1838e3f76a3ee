//! Anthropic Messages API provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::http_client::RetryPolicy;
use crate::providers::common::create_http_client;
use crate::types::ProviderOptions;

pub(crate) use types::{AnthropicErrorEnvelope, Message, MessagesRequest, MessagesResponse};

pub(crate) const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";
pub(crate) const ANTHROPIC_API_VERSION: &str = "2023-06-01";
pub(crate) const ANTHROPIC_DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
/// 单次回答的 token 上限；最长的步骤列表也远低于此值
pub(crate) const MAX_OUTPUT_TOKENS: u32 = 4096;

/// Anthropic Messages API provider
pub struct AnthropicProvider {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) model: String,
    pub(crate) base_url: String,
    pub(crate) retry: RetryPolicy,
}

impl AnthropicProvider {
    pub fn new(api_key: String, options: ProviderOptions) -> Self {
        Self {
            client: create_http_client(),
            api_key,
            model: options
                .model
                .unwrap_or_else(|| ANTHROPIC_DEFAULT_MODEL.to_string()),
            base_url: options
                .base_url
                .unwrap_or_else(|| ANTHROPIC_API_BASE.to_string()),
            retry: RetryPolicy::with_retries(options.max_retries),
        }
    }
}
