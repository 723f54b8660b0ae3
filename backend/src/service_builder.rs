//! Wire configured adapters into a [`PhotoSearchService`].

use std::sync::Arc;

use tracing::info;

use crate::domain::{AssetSource, PhotoSearchConfig, PhotoSearchService, ProviderRegistration};
use crate::outbound::{ImmichHttpProvider, PhotoprismHttpProvider, SettingsIntegrationConfig};
use crate::settings::{PhotoSearchSettings, SettingsError};

/// Build the search service for `settings`.
///
/// Immich is registered before Photoprism, so Immich results come first.
/// Providers with incomplete endpoint settings are left out of the registry.
///
/// # Errors
///
/// Returns [`SettingsError`] for an invalid URL, policy, or timeout, or when
/// an HTTP client cannot be built.
pub fn build_photo_search_service(
    settings: &PhotoSearchSettings,
) -> Result<PhotoSearchService, SettingsError> {
    let timeout = settings.request_timeout()?;
    let page_size = settings.page_size();
    let integrations = Arc::new(SettingsIntegrationConfig::from_settings(settings));
    let mut service = PhotoSearchService::new(
        integrations,
        PhotoSearchConfig {
            fetch_timeout: Some(timeout),
        },
    );

    if let Some(endpoint) = settings.endpoint(AssetSource::Immich)? {
        let provider = ImmichHttpProvider::new(endpoint.base_url, endpoint.api_key, timeout)
            .map_err(|error| client_error(AssetSource::Immich, &error))?
            .with_page_size(page_size);
        let policy = settings.boundary_policy(AssetSource::Immich)?;
        service = service.with_provider(ProviderRegistration::new(Arc::new(provider), policy));
    }

    if let Some(endpoint) = settings.endpoint(AssetSource::Photoprism)? {
        let provider = PhotoprismHttpProvider::new(endpoint.base_url, endpoint.api_key, timeout)
            .map_err(|error| client_error(AssetSource::Photoprism, &error))?
            .with_page_size(page_size);
        let policy = settings.boundary_policy(AssetSource::Photoprism)?;
        service = service.with_provider(ProviderRegistration::new(Arc::new(provider), policy));
    }

    info!(
        providers = ?service.registered_sources(),
        timeout_ms = timeout.as_millis(),
        page_size,
        "photo search service configured"
    );
    Ok(service)
}

fn client_error(provider: AssetSource, error: &reqwest::Error) -> SettingsError {
    SettingsError::Client {
        provider,
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoundaryPolicy, PhotoSearchRequest, UserId};
    use rstest::rstest;

    fn settings_with_both() -> PhotoSearchSettings {
        PhotoSearchSettings {
            immich_url: Some("http://immich.lan:2283".to_owned()),
            immich_api_key: Some("immich-key".to_owned()),
            photoprism_url: Some("http://photoprism.lan:2342".to_owned()),
            photoprism_api_key: Some("pp-token".to_owned()),
            ..PhotoSearchSettings::default()
        }
    }

    #[rstest]
    fn registers_immich_before_photoprism() {
        let service = build_photo_search_service(&settings_with_both()).expect("builds");
        assert_eq!(
            service.registered_sources(),
            vec![AssetSource::Immich, AssetSource::Photoprism]
        );
    }

    #[rstest]
    fn skips_incomplete_providers() {
        let settings = PhotoSearchSettings {
            photoprism_api_key: None,
            ..settings_with_both()
        };
        let service = build_photo_search_service(&settings).expect("builds");
        assert_eq!(service.registered_sources(), vec![AssetSource::Immich]);
    }

    #[rstest]
    fn surfaces_invalid_policy() {
        let settings = PhotoSearchSettings {
            immich_boundary_policy: Some("exclusive-ish".to_owned()),
            ..settings_with_both()
        };
        let Err(error) = build_photo_search_service(&settings) else {
            panic!("invalid policy should fail");
        };
        assert!(matches!(
            error,
            SettingsError::InvalidPolicy {
                provider: AssetSource::Immich,
                ..
            }
        ));
    }

    #[rstest]
    fn accepts_explicit_policy_override() {
        let settings = PhotoSearchSettings {
            photoprism_boundary_policy: Some("widen_and_refilter".to_owned()),
            ..settings_with_both()
        };
        assert_eq!(
            settings.boundary_policy(AssetSource::Photoprism),
            Ok(BoundaryPolicy::WidenAndRefilter)
        );
        assert!(build_photo_search_service(&settings).is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn unconfigured_service_returns_empty_outcome() {
        let service =
            build_photo_search_service(&PhotoSearchSettings::default()).expect("builds");
        let outcome = service
            .search(PhotoSearchRequest::new(UserId::random(), None, None))
            .await
            .expect("default request is valid");
        assert!(outcome.assets.is_empty());
        assert!(!outcome.is_partial());
    }
}
