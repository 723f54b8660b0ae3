//! Driven port answering which providers a user has connected.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{AssetSource, UserId};

define_port_error! {
    /// Errors raised while reading a user's integration settings.
    pub enum UserIntegrationConfigError {
        /// The settings store could not be queried.
        Lookup { message: String } =>
            "integration settings lookup failed: {message}",
    }
}

/// Port exposing per-user provider configuration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserIntegrationConfig: Send + Sync {
    /// Whether the user has a usable Immich integration.
    async fn immich_configured(&self, user: &UserId) -> Result<bool, UserIntegrationConfigError>;

    /// Whether the user has a usable Photoprism integration.
    async fn photoprism_configured(
        &self,
        user: &UserId,
    ) -> Result<bool, UserIntegrationConfigError>;
}

/// Dispatch to the per-provider check for `source`.
///
/// # Errors
///
/// Propagates [`UserIntegrationConfigError`] from the underlying lookup.
pub async fn integration_configured(
    config: &dyn UserIntegrationConfig,
    user: &UserId,
    source: AssetSource,
) -> Result<bool, UserIntegrationConfigError> {
    match source {
        AssetSource::Immich => config.immich_configured(user).await,
        AssetSource::Photoprism => config.photoprism_configured(user).await,
    }
}

/// Fixture configuration with fixed answers for every user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureUserIntegrationConfig {
    /// Answer for Immich.
    pub immich: bool,
    /// Answer for Photoprism.
    pub photoprism: bool,
}

#[async_trait]
impl UserIntegrationConfig for FixtureUserIntegrationConfig {
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
    use rstest::rstest;

    #[rstest]
    #[case(AssetSource::Immich, true)]
    #[case(AssetSource::Photoprism, false)]
    #[tokio::test]
    async fn dispatches_by_source(#[case] source: AssetSource, #[case] expected: bool) {
        let mut config = MockUserIntegrationConfig::new();
        config.expect_immich_configured().returning(|_| Ok(true));
        config.expect_photoprism_configured().returning(|_| Ok(false));

        let configured = integration_configured(&config, &UserId::random(), source)
            .await
            .expect("lookup succeeds");
        assert_eq!(configured, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn propagates_lookup_errors() {
        let mut config = MockUserIntegrationConfig::new();
        config
            .expect_photoprism_configured()
            .times(1)
            .returning(|_| Err(UserIntegrationConfigError::lookup("settings table offline")));

        let err = integration_configured(&config, &UserId::random(), AssetSource::Photoprism)
            .await
            .expect_err("lookup fails");
        assert_eq!(
            err.to_string(),
            "integration settings lookup failed: settings table offline"
        );
    }
}
