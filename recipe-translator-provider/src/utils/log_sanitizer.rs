//! Log sanitization utilities
//!
//! Model answers can be several kilobytes of JSON and request headers carry
//! API keys; neither should reach the logs in full.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Characters of a secret left visible at the end.
const VISIBLE_SUFFIX: usize = 4;

/// Largest char boundary `<= index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

/// Truncate a response body for logging, noting the original size.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask an API key as `****abcd`. Keys too short to hide anything are fully masked.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= VISIBLE_SUFFIX * 2 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - VISIBLE_SUFFIX..].iter().collect();
    format!("****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_unchanged() {
        assert_eq!(truncate_for_log("[\"huevo\"]"), "[\"huevo\"]");
    }

    #[test]
    fn long_body_truncated_with_size() {
        let s = "a".repeat(TRUNCATE_LIMIT + 10);
        let result = truncate_for_log(&s);
        assert!(result.ends_with(&format!("total {} bytes]", TRUNCATE_LIMIT + 10)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn truncation_respects_multibyte_chars() {
        // 'ñ' is 2 bytes, so the limit falls inside a char at odd offsets
        let s = format!("a{}", "ñ".repeat(200));
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
    }

    #[test]
    fn secret_keeps_only_suffix() {
        assert_eq!(mask_secret("sk-abcdefghijkl1234"), "****1234");
        assert_eq!(mask_secret("short"), "****");
        assert_eq!(mask_secret(""), "****");
    }
}
