//! Provider 公共工具函数

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::types::{Ingredient, TranslatableContent};

// ============ HTTP Client ============

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）；LLM 生成较慢，比普通 API 宽松
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// 创建带超时配置的 HTTP Client
pub fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|e| {
            log::error!("Failed to build configured HTTP client, using defaults: {e}");
            Client::new()
        })
}

/// Join a base URL and a path without doubling or dropping the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

// ============ 响应解析 ============

/// Remove a surrounding markdown code fence (```` ```json ... ``` ````), if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string (e.g. "json") on the opening line
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Slice from the first `[` to the last `]`, tolerating chatter around the array.
fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

fn strip_wrapping_quotes(text: &str) -> &str {
    for (open, close) in [('"', '"'), ('\'', '\''), ('«', '»'), ('“', '”')] {
        if let Some(inner) = text
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            return inner.trim();
        }
    }
    text
}

/// Turn a model answer into translated content shaped like `source`.
///
/// - names: first non-empty line, fences and wrapping quotes removed
/// - ingredients: JSON array of objects (or bare strings); only `name` is
///   taken from the answer, `amount`/`unit` come from `source`
/// - instructions: JSON array of strings
///
/// List answers must have exactly as many items as the source.
pub fn parse_translation(
    provider: &str,
    source: &TranslatableContent,
    raw: &str,
) -> Result<TranslatableContent> {
    let parse_error = |detail: String| ProviderError::ParseError {
        provider: provider.to_string(),
        detail,
    };

    let text = strip_code_fence(raw);
    if text.is_empty() {
        return Err(parse_error("Empty translation response".to_string()));
    }

    match source {
        TranslatableContent::Text(_) => {
            let line = text
                .lines()
                .map(str::trim)
                .find(|l| !l.is_empty())
                .unwrap_or_default();
            let name = strip_wrapping_quotes(line);
            if name.is_empty() {
                return Err(parse_error("Empty translation response".to_string()));
            }
            Ok(TranslatableContent::Text(name.to_string()))
        }
        TranslatableContent::Ingredients(originals) => {
            let items = parse_array(text).map_err(parse_error)?;
            check_len(originals.len(), items.len()).map_err(parse_error)?;

            originals
                .iter()
                .zip(items)
                .enumerate()
                .map(|(i, (original, item))| {
                    let name = match item {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Object(mut obj) => match obj.remove("name") {
                            Some(serde_json::Value::String(s)) => s,
                            _ => return Err(parse_error(format!("Ingredient {i} has no name"))),
                        },
                        _ => return Err(parse_error(format!("Ingredient {i} is not an object"))),
                    };
                    Ok(Ingredient {
                        name: name.trim().to_string(),
                        amount: original.amount.clone(),
                        unit: original.unit.clone(),
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(TranslatableContent::Ingredients)
        }
        TranslatableContent::Instructions(originals) => {
            let items = parse_array(text).map_err(parse_error)?;
            check_len(originals.len(), items.len()).map_err(parse_error)?;

            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    serde_json::Value::String(s) => Ok(s.trim().to_string()),
                    _ => Err(parse_error(format!("Step {i} is not a string"))),
                })
                .collect::<Result<Vec<_>>>()
                .map(TranslatableContent::Instructions)
        }
    }
}

fn parse_array(text: &str) -> std::result::Result<Vec<serde_json::Value>, String> {
    let json = extract_json_array(text).ok_or_else(|| "Response is not a JSON array".to_string())?;
    serde_json::from_str(json).map_err(|e| format!("Invalid JSON array: {e}"))
}

fn check_len(expected: usize, actual: usize) -> std::result::Result<(), String> {
    if expected == actual {
        Ok(())
    } else {
        Err(format!("Expected {expected} items, got {actual}"))
    }
}
