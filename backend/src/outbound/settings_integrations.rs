//! `UserIntegrationConfig` answered from process-wide settings.
//!
//! Every user shares the deployment's configured providers, so the answer
//! depends only on whether the endpoint settings are complete.

use async_trait::async_trait;

use crate::domain::ports::{UserIntegrationConfig, UserIntegrationConfigError};
use crate::domain::{AssetSource, UserId};
use crate::settings::PhotoSearchSettings;

/// Integration lookup backed by [`PhotoSearchSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsIntegrationConfig {
    immich: bool,
    photoprism: bool,
}

impl SettingsIntegrationConfig {
    /// Capture which providers `settings` configures.
    #[must_use]
    pub fn from_settings(settings: &PhotoSearchSettings) -> Self {
        Self {
            immich: settings.is_configured(AssetSource::Immich),
            photoprism: settings.is_configured(AssetSource::Photoprism),
        }
    }
}

#[async_trait]
impl UserIntegrationConfig for SettingsIntegrationConfig {
    async fn immich_configured(&self, _user: &UserId) -> Result<bool, UserIntegrationConfigError> {
        Ok(self.immich)
    }

    async fn photoprism_configured(
        &self,
        _user: &UserId,
    ) -> Result<bool, UserIntegrationConfigError> {
        Ok(self.photoprism)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::integration_configured;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn reports_only_complete_endpoints() {
        let settings = PhotoSearchSettings {
            immich_url: Some("http://immich.lan:2283".to_owned()),
            immich_api_key: Some("key".to_owned()),
            photoprism_url: Some("http://photoprism.lan".to_owned()),
            ..PhotoSearchSettings::default()
        };
        let config = SettingsIntegrationConfig::from_settings(&settings);
        let user = UserId::random();

        assert!(
            integration_configured(&config, &user, AssetSource::Immich)
                .await
                .expect("lookup")
        );
        assert!(
            !integration_configured(&config, &user, AssetSource::Photoprism)
                .await
                .expect("lookup")
        );
    }
}
