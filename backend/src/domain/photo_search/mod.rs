//! Search orchestration across every registered photo provider.
//!
//! The service fans out to each provider the user has configured, normalises
//! the requested range per provider, filters and tags the returned records,
//! and concatenates the survivors in registration order. Provider failures
//! are isolated: they become [`ProviderWarning`]s next to whatever the other
//! providers returned.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    AssetSerializer, PhotoProvider, PhotoProviderError, UserIntegrationConfig,
    integration_configured,
};
use crate::domain::{
    Asset, AssetSource, BoundaryPolicy, DateRange, InvalidQuery, PhotoSearchRequest, RawAsset,
    RecordOutcome, SearchQuery, UserId, classify_record, normalize_range,
};

mod warning;

pub use warning::{ProviderWarning, ProviderWarningKind};

/// Default upper bound on a single provider fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Boundary policy a provider gets when none is configured.
///
/// Immich date queries are treated as exclusive at the edges; Photoprism's
/// are inclusive.
#[must_use]
pub const fn default_boundary_policy(source: AssetSource) -> BoundaryPolicy {
    match source {
        AssetSource::Immich => BoundaryPolicy::WidenAndRefilter,
        AssetSource::Photoprism => BoundaryPolicy::Inclusive,
    }
}

/// One provider in the search registry.
#[derive(Clone)]
pub struct ProviderRegistration {
    provider: Arc<dyn PhotoProvider>,
    policy: BoundaryPolicy,
}

impl ProviderRegistration {
    /// Register `provider` with an explicit boundary policy.
    #[must_use]
    pub fn new(provider: Arc<dyn PhotoProvider>, policy: BoundaryPolicy) -> Self {
        Self { provider, policy }
    }

    /// Register `provider` with [`default_boundary_policy`] for its source.
    #[must_use]
    pub fn with_default_policy(provider: Arc<dyn PhotoProvider>) -> Self {
        let policy = default_boundary_policy(provider.source());
        Self { provider, policy }
    }

    /// Source tag of the registered provider.
    #[must_use]
    pub fn source(&self) -> AssetSource {
        self.provider.source()
    }

    /// Boundary policy applied to this provider's queries.
    #[must_use]
    pub const fn policy(&self) -> BoundaryPolicy {
        self.policy
    }
}

/// Tuning knobs for [`PhotoSearchService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoSearchConfig {
    /// Upper bound on each provider fetch; `None` waits indefinitely.
    pub fetch_timeout: Option<Duration>,
}

impl Default for PhotoSearchConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Some(DEFAULT_FETCH_TIMEOUT),
        }
    }
}

/// Merged result of one search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhotoSearchOutcome {
    /// Surviving assets, grouped by provider in registration order.
    pub assets: Vec<Asset>,
    /// Provider-level problems encountered along the way.
    pub warnings: Vec<ProviderWarning>,
}

impl PhotoSearchOutcome {
    /// Whether any provider contributed a warning.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Render every asset through `serializer`, preserving order.
    #[must_use]
    pub fn serialize_with(&self, serializer: &dyn AssetSerializer) -> Vec<Value> {
        self.assets
            .iter()
            .map(|asset| serializer.serialize(asset, asset.source()))
            .collect()
    }
}

#[derive(Default)]
struct ProviderRun {
    assets: Vec<Asset>,
    warnings: Vec<ProviderWarning>,
}

impl ProviderRun {
    fn warning(warning: ProviderWarning) -> Self {
        Self {
            assets: Vec::new(),
            warnings: vec![warning],
        }
    }
}

/// Aggregates photos from every provider a user has configured.
pub struct PhotoSearchService {
    registrations: Vec<ProviderRegistration>,
    integrations: Arc<dyn UserIntegrationConfig>,
    config: PhotoSearchConfig,
}

impl PhotoSearchService {
    /// Create a service with an empty provider registry.
    #[must_use]
    pub fn new(integrations: Arc<dyn UserIntegrationConfig>, config: PhotoSearchConfig) -> Self {
        Self {
            registrations: Vec::new(),
            integrations,
            config,
        }
    }

    /// Append a provider to the registry. Registration order is result order.
    #[must_use]
    pub fn with_provider(mut self, registration: ProviderRegistration) -> Self {
        self.registrations.push(registration);
        self
    }

    /// Sources in registration order.
    #[must_use]
    pub fn registered_sources(&self) -> Vec<AssetSource> {
        self.registrations
            .iter()
            .map(ProviderRegistration::source)
            .collect()
    }

    /// Validate `request`, then run the search.
    ///
    /// ```rust,ignore
    /// let outcome = service
    ///     .search(PhotoSearchRequest::new(user, Some("2024-01-02"), Some("2024-01-02")))
    ///     .await?;
    /// assert!(outcome.assets.iter().all(|asset| asset.media_type() != Some("video")));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`InvalidQuery`] when the dates are unparseable or inverted.
    /// No provider is contacted in that case.
    pub async fn search(
        &self,
        request: PhotoSearchRequest,
    ) -> Result<PhotoSearchOutcome, InvalidQuery> {
        let query = SearchQuery::try_from(request)?;
        Ok(self.search_query(&query).await)
    }

    /// Run a validated search. Never fails; problems surface as warnings.
    pub async fn search_query(&self, query: &SearchQuery) -> PhotoSearchOutcome {
        debug!(
            user_id = %query.user(),
            range = %query.range(),
            providers = self.registrations.len(),
            "photo search started"
        );

        let runs = join_all(
            self.registrations
                .iter()
                .map(|registration| self.run_provider(registration, query)),
        )
        .await;

        let mut outcome = PhotoSearchOutcome::default();
        for run in runs {
            outcome.assets.extend(run.assets);
            outcome.warnings.extend(run.warnings);
        }

        info!(
            user_id = %query.user(),
            range = %query.range(),
            assets = outcome.assets.len(),
            warnings = outcome.warnings.len(),
            "photo search finished"
        );
        outcome
    }

    async fn run_provider(
        &self,
        registration: &ProviderRegistration,
        query: &SearchQuery,
    ) -> ProviderRun {
        let source = registration.source();
        let user = query.user();

        match integration_configured(self.integrations.as_ref(), user, source).await {
            Ok(true) => {}
            Ok(false) => {
                debug!(%source, user_id = %user, "integration not configured; skipping");
                return ProviderRun::default();
            }
            Err(error) => {
                warn!(%source, user_id = %user, %error, "integration lookup failed; skipping");
                return ProviderRun::warning(ProviderWarning::new(
                    source,
                    ProviderWarningKind::IntegrationLookupFailed,
                    error.to_string(),
                ));
            }
        }

        let normalized = normalize_range(query.range(), registration.policy());
        debug!(
            %source,
            policy = %registration.policy(),
            query_range = %normalized.query,
            "fetching provider records"
        );

        let records = match self
            .fetch_bounded(registration.provider.as_ref(), user, &normalized.query)
            .await
        {
            Ok(records) => records,
            Err(warning) => {
                warn!(
                    %source,
                    user_id = %user,
                    kind = ?warning.kind,
                    message = %warning.message,
                    "provider fetch failed; continuing without it"
                );
                return ProviderRun::warning(warning);
            }
        };

        let fetched = records.len();
        let mut run = ProviderRun::default();
        let mut dropped = 0_usize;
        let mut malformed = 0_usize;
        for record in records {
            match classify_record(record, source, &normalized.post_filter) {
                RecordOutcome::Kept(asset) => run.assets.push(asset),
                RecordOutcome::Dropped(_) => dropped += 1,
                RecordOutcome::Malformed { reason } => {
                    debug!(%source, %reason, "excluding malformed record");
                    malformed += 1;
                }
            }
        }

        if malformed > 0 {
            warn!(%source, malformed, "provider returned records without a usable local date");
            run.warnings.push(ProviderWarning::new(
                source,
                ProviderWarningKind::MalformedRecords { count: malformed },
                format!("{malformed} record(s) had no usable local date"),
            ));
        }

        debug!(
            %source,
            fetched,
            kept = run.assets.len(),
            dropped,
            malformed,
            "provider records classified"
        );
        run
    }

    async fn fetch_bounded(
        &self,
        provider: &dyn PhotoProvider,
        user: &UserId,
        range: &DateRange,
    ) -> Result<Vec<RawAsset>, ProviderWarning> {
        let source = provider.source();
        let fetch = provider.fetch(user, range);
        let result = match self.config.fetch_timeout {
            Some(limit) => match tokio::time::timeout(limit, fetch).await {
                Ok(result) => result,
                Err(_elapsed) => {
                    return Err(ProviderWarning::new(
                        source,
                        ProviderWarningKind::TimedOut,
                        format!("no response within {}ms", limit.as_millis()),
                    ));
                }
            },
            None => fetch.await,
        };
        result.map_err(|error| ProviderWarning::from_provider_error(source, &error))
    }
}

impl From<&PhotoProviderError> for ProviderWarningKind {
    fn from(error: &PhotoProviderError) -> Self {
        match error {
            PhotoProviderError::Unavailable { .. } => Self::Unavailable,
            PhotoProviderError::MalformedResponse { .. } => Self::MalformedResponse,
        }
    }
}
