//! Provider metadata service
//!
//! Static metadata of the compiled-in translation providers plus the one in use.

use std::sync::Arc;

use recipe_translator_provider::get_all_provider_metadata;
use serde::Serialize;

use crate::services::ServiceContext;
use crate::types::ProviderMetadata;

/// The provider serving translations right now.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveProvider {
    pub id: String,
    pub model: String,
}

/// Provider metadata service
pub struct ProviderMetadataService {
    ctx: Arc<ServiceContext>,
}

impl ProviderMetadataService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Get a list of all supported providers
    pub fn list_providers(&self) -> Vec<ProviderMetadata> {
        get_all_provider_metadata()
    }

    /// Identifier and model of the configured provider
    pub fn active_provider(&self) -> ActiveProvider {
        let provider = self.ctx.provider();
        ActiveProvider {
            id: provider.id().to_string(),
            model: provider.model().to_string(),
        }
    }
}
