//! Shared HTTP plumbing for LLM providers
//!
//! Each provider builds its own `RequestBuilder` (auth headers differ per API);
//! this module sends it, logs it, classifies transport-level failures and
//! retries the transient ones.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Identifies a request in logs and errors.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    /// Provider identifier (`"openai"`, `"anthropic"`).
    pub provider: &'a str,
    /// Operation label, e.g. `"POST /chat/completions"`.
    pub operation: &'a str,
}

/// Backoff settings for transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one (0 disables retrying).
    pub max_retries: u32,
    /// Delay before the first retry; doubled on each subsequent attempt.
    pub base_delay: Duration,
    /// Upper bound for a single backoff delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Policy with the given retry count and the default 250ms → 10s backoff.
    pub fn with_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Exponential backoff delay for a zero-based attempt number.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1_u32 << attempt.min(16);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(10),
        }
    }
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Send a request once and return `(status, body)`.
    ///
    /// Transport failures become `NetworkError`/`Timeout`. HTTP 429 becomes
    /// `RateLimited` (with `Retry-After` when present) and gateway/overload
    /// statuses (500, 502–504, 529) become `NetworkError` so that they are
    /// retried. Every other status is handed back to the provider, which maps
    /// its own error envelope.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        ctx: RequestContext<'_>,
    ) -> Result<(u16, String), ProviderError> {
        let provider = ctx.provider;
        log::debug!("[{provider}] {}", ctx.operation);

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider}] Response Status: {status_code}");

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                provider: provider.to_string(),
                retry_after,
                raw_message: Some(truncate_for_log(&body)),
            });
        }

        if matches!(status_code, 500 | 502..=504 | 529) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider}] Upstream unavailable (HTTP {status_code})");
            return Err(ProviderError::NetworkError {
                provider: provider.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!("[{provider}] Response Body: {}", truncate_for_log(&body));

        Ok((status_code, body))
    }

    /// Deserialize a JSON response envelope.
    ///
    /// # Errors
    /// `ProviderError::ParseError` when the body is not the expected JSON.
    pub fn parse_json<T>(body: &str, provider: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(body).map_err(|e| {
            log::error!("[{provider}] JSON parse failed: {e}");
            log::error!("[{provider}] Raw response: {}", truncate_for_log(body));
            ProviderError::ParseError {
                provider: provider.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// [`execute_request`](Self::execute_request) with retries for transient errors.
    ///
    /// Only `NetworkError`, `Timeout` and `RateLimited` are retried. A
    /// `Retry-After` hint (capped at 30s) takes precedence over the backoff.
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        ctx: RequestContext<'_>,
        policy: RetryPolicy,
    ) -> Result<(u16, String), ProviderError> {
        if policy.max_retries == 0 {
            return Self::execute_request(request_builder, ctx).await;
        }

        let mut attempt = 0;
        loop {
            // RequestBuilder is single-use
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{}] Cannot clone request, disabling retry", ctx.provider);
                return Self::execute_request(request_builder, ctx).await;
            };

            match Self::execute_request(req, ctx).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < policy.max_retries && is_retryable(&e) => {
                    let delay = retry_delay(&e, attempt, &policy);
                    log::warn!(
                        "[{}] {} failed (attempt {}/{}), retrying in {:.1}s: {}",
                        ctx.provider,
                        ctx.operation,
                        attempt + 1,
                        policy.max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Transport and throttling errors are worth another attempt; anything the
/// provider rejected on its merits is not.
fn is_retryable(error: &ProviderError) -> bool {
    matches!(
        error,
        ProviderError::NetworkError { .. }
            | ProviderError::Timeout { .. }
            | ProviderError::RateLimited { .. }
    )
}

fn retry_delay(error: &ProviderError, attempt: u32, policy: &RetryPolicy) -> Duration {
    if let ProviderError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        policy.backoff(attempt)
    }
}
