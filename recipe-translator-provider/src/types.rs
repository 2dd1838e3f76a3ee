use serde::{Deserialize, Serialize};

// ============ Language & Content Types ============

/// A language a recipe can be authored in or translated to.
///
/// The supported set is closed: every recipe is written in one of these
/// and translated into the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (US conventions).
    En,
    /// Spanish (Castilian, as spoken in Spain).
    Es,
}

impl Language {
    /// All supported languages, in declaration order.
    pub const ALL: [Self; 2] = [Self::En, Self::Es];

    /// The ISO 639-1 code (`"en"` / `"es"`).
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Parse an ISO 639-1 code. Matching is case-insensitive and ignores
    /// a region suffix (`"es-ES"` parses as [`Language::Es`]).
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.trim().split(['-', '_']).next().unwrap_or_default();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(primary))
    }

    /// The other language of the supported pair.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::En => Self::Es,
            Self::Es => Self::En,
        }
    }

    /// Human-readable name used in prompts.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Spanish",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Which recipe field group a translation request carries.
///
/// Determines the request/response shape: `Name` is a plain string,
/// `Ingredients` and `Instructions` are JSON arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Recipe title.
    Name,
    /// Ingredient list.
    Ingredients,
    /// Step-by-step instructions.
    Instructions,
}

impl ContentType {
    /// All content types, in the order a full recipe translation issues them.
    pub const ALL: [Self; 3] = [Self::Name, Self::Ingredients, Self::Instructions];

    /// Wire name (`"name"`, `"ingredients"`, `"instructions"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Ingredients => "ingredients",
            Self::Instructions => "instructions",
        }
    }

    /// Parse a wire name. Case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "ingredients" => Some(Self::Ingredients),
            "instructions" => Some(Self::Instructions),
            _ => None,
        }
    }

    /// Whether the provider is expected to answer with a JSON array.
    pub fn expects_array(self) -> bool {
        !matches!(self, Self::Name)
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Recipe Content ============

/// Ingredient quantity, kept exactly as authored.
///
/// Recipes mix numeric amounts (`2`, `0.5`) with free-form ones (`"1/2"`,
/// `"a pinch"`), so both are accepted and round-tripped unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// Numeric amount, preserving the original JSON number representation.
    Number(serde_json::Number),
    /// Free-form amount.
    Text(String),
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One line of a recipe's ingredient list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name (the only translatable part).
    pub name: String,
    /// Quantity.
    pub amount: Amount,
    /// Unit of measure (may be empty).
    #[serde(default)]
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: impl Into<Amount>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            unit: unit.into(),
        }
    }
}

/// Content to translate, or a translation result.
///
/// The variant always corresponds to a [`ContentType`]; see
/// [`TranslatableContent::content_type`].
///
/// Serialize-only: an untagged array is ambiguous (`[]` fits both list
/// variants), so incoming JSON goes through [`TranslatableContent::from_json`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TranslatableContent {
    /// A recipe name.
    Text(String),
    /// An ingredient list.
    Ingredients(Vec<Ingredient>),
    /// An instruction list.
    Instructions(Vec<String>),
}

impl TranslatableContent {
    /// The content type this value carries.
    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Text(_) => ContentType::Name,
            Self::Ingredients(_) => ContentType::Ingredients,
            Self::Instructions(_) => ContentType::Instructions,
        }
    }

    /// Decode a raw JSON value as content of the given type.
    ///
    /// Returns `None` when the value does not have the shape the content
    /// type requires (string for names, array of ingredients/strings for
    /// the list types).
    pub fn from_json(content_type: ContentType, value: serde_json::Value) -> Option<Self> {
        match content_type {
            ContentType::Name => match value {
                serde_json::Value::String(s) => Some(Self::Text(s)),
                _ => None,
            },
            ContentType::Ingredients => serde_json::from_value(value).ok().map(Self::Ingredients),
            ContentType::Instructions => {
                serde_json::from_value(value).ok().map(Self::Instructions)
            }
        }
    }

    /// Whether there is nothing to translate.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Ingredients(items) => items.is_empty(),
            Self::Instructions(steps) => steps.is_empty(),
        }
    }

    /// Number of items for list content; `1` for text.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(_) => 1,
            Self::Ingredients(items) => items.len(),
            Self::Instructions(steps) => steps.len(),
        }
    }

    /// Convert to a JSON value for the wire.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Ingredients(items) => serde_json::to_value(items).unwrap_or_default(),
            Self::Instructions(steps) => serde_json::to_value(steps).unwrap_or_default(),
        }
    }
}

/// A single-field translation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    /// Content to translate; its variant must match `content_type`.
    pub content: TranslatableContent,
    /// Language the content is written in.
    pub source_language: Language,
    /// Language to translate into.
    pub target_language: Language,
    /// Field group being translated.
    pub content_type: ContentType,
}

impl TranslationRequest {
    /// Build a request whose content type is derived from `content`.
    pub fn new(content: TranslatableContent, source: Language, target: Language) -> Self {
        let content_type = content.content_type();
        Self {
            content,
            source_language: source,
            target_language: target,
            content_type,
        }
    }
}

// ============ Provider Types ============

/// Identifies which LLM provider implementation to use.
///
/// Each variant is gated behind its corresponding feature flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// OpenAI-compatible chat completions. Requires feature `openai`.
    #[cfg(feature = "openai")]
    Openai,
    /// Anthropic Messages API. Requires feature `anthropic`.
    #[cfg(feature = "anthropic")]
    Anthropic,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "openai")]
            Self::Openai => write!(f, "openai"),
            #[cfg(feature = "anthropic")]
            Self::Anthropic => write!(f, "anthropic"),
        }
    }
}

// ============ Provider Metadata Types ============

/// The input type of a credential field (affects UI rendering).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
    /// Masked/password input.
    Password,
}

/// Definition of a single credential field required by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentialField {
    /// Machine-readable field key (e.g., `"apiKey"`).
    pub key: String,
    /// Human-readable label (e.g., `"API Key"`).
    pub label: String,
    /// Input type for UI rendering.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Optional placeholder text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Optional help/description text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

/// Static metadata describing a translation provider.
///
/// Obtain via [`TranslationProvider::metadata()`](crate::TranslationProvider::metadata) or
/// [`get_all_provider_metadata()`](crate::get_all_provider_metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Provider type identifier.
    pub id: ProviderType,
    /// Human-readable provider name.
    pub name: String,
    /// Short description of the provider.
    pub description: String,
    /// Model used when none is configured.
    pub default_model: String,
    /// Credential fields required to authenticate with this provider.
    pub required_fields: Vec<ProviderCredentialField>,
}

// ============ Credential Types ============

/// Validation error for provider credentials.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Connection settings shared by every provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOptions {
    /// Model name; the provider's default is used when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// API base URL override (proxies, self-hosted gateways).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Retries for transient failures (network, timeout, 429).
    #[serde(default)]
    pub max_retries: u32,
}

/// Type-safe credential container for all supported providers.
///
/// Pass this to [`create_provider()`](crate::create_provider) to instantiate a provider.
///
/// ```json
/// { "provider": "openai", "credentials": { "api_key": "...", "options": { "model": "gpt-4o-mini" } } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// OpenAI-compatible credentials. Requires feature `openai`.
    #[cfg(feature = "openai")]
    #[serde(rename = "openai")]
    Openai {
        /// Bearer API key.
        api_key: String,
        /// Model / endpoint options.
        #[serde(default)]
        options: ProviderOptions,
    },

    /// Anthropic credentials. Requires feature `anthropic`.
    #[cfg(feature = "anthropic")]
    #[serde(rename = "anthropic")]
    Anthropic {
        /// `x-api-key` value.
        api_key: String,
        /// Model / endpoint options.
        #[serde(default)]
        options: ProviderOptions,
    },
}

impl ProviderCredentials {
    /// Construct credentials from a flat key-value map, validating required fields.
    ///
    /// Recognized keys: `apiKey` (required), `model`, `baseUrl`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialValidationError`] if a required field is missing or empty.
    pub fn from_map(
        provider: &ProviderType,
        map: &std::collections::HashMap<String, String>,
    ) -> Result<Self, CredentialValidationError> {
        let api_key = Self::get_required_field(map, "apiKey", "API Key")?;
        let options = ProviderOptions {
            model: map.get("model").filter(|v| !v.trim().is_empty()).cloned(),
            base_url: map.get("baseUrl").filter(|v| !v.trim().is_empty()).cloned(),
            max_retries: 0,
        };
        match provider {
            #[cfg(feature = "openai")]
            ProviderType::Openai => Ok(Self::Openai { api_key, options }),
            #[cfg(feature = "anthropic")]
            ProviderType::Anthropic => Ok(Self::Anthropic { api_key, options }),
        }
    }

    fn get_required_field(
        map: &std::collections::HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.trim().to_string()),
        }
    }

    /// The provider type of these credentials.
    pub fn provider_type(&self) -> ProviderType {
        match self {
            #[cfg(feature = "openai")]
            Self::Openai { .. } => ProviderType::Openai,
            #[cfg(feature = "anthropic")]
            Self::Anthropic { .. } => ProviderType::Anthropic,
        }
    }
}
