//! Source-content fingerprints for cached translations.
//!
//! A cached field stores the hash of the content it was translated from; the
//! field is fresh only while the recipe's current content hashes the same.

use sha2::{Digest, Sha256};

use recipe_translator_provider::TranslatableContent;

/// SHA-256 (lowercase hex) of the content's canonical JSON.
///
/// Field order inside ingredients is fixed by the type (`name`, `amount`,
/// `unit`), so equal content always yields the same hash.
pub fn content_hash(content: &TranslatableContent) -> String {
    let canonical = content.to_json().to_string();
    hex::encode(Sha256::digest(canonical.as_bytes()))
}
