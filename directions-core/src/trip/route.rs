//! Per-provider route results.

use std::collections::BTreeMap;

use crate::domain::LatLng;
use crate::routing::{ProviderId, RouteResponse, RouteSummary};

/// The route currently shown for one provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub provider: ProviderId,
    /// Encoded leg shapes, empty when there is no route.
    pub geometry: Vec<String>,
    /// Decoded path, empty until a successful response.
    pub decoded_geometry: Vec<LatLng>,
    pub summary: Option<RouteSummary>,
    pub raw: Option<serde_json::Value>,
    /// Whether the UI should draw this provider's route.
    pub visible: bool,
}

impl RouteResult {
    /// A visible result with no route.
    pub fn empty(provider: ProviderId) -> Self {
        Self {
            provider,
            geometry: Vec::new(),
            decoded_geometry: Vec::new(),
            summary: None,
            raw: None,
            visible: true,
        }
    }

    /// Returns true if no route is held.
    pub fn is_empty(&self) -> bool {
        self.decoded_geometry.is_empty() && self.geometry.is_empty()
    }
}

/// Route results keyed by provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteResults(BTreeMap<ProviderId, RouteResult>);

impl RouteResults {
    /// Results with an empty entry for each provider.
    pub fn with_providers(providers: impl IntoIterator<Item = ProviderId>) -> Self {
        Self(
            providers
                .into_iter()
                .map(|p| (p.clone(), RouteResult::empty(p)))
                .collect(),
        )
    }

    /// Look up a provider's result.
    pub fn get(&self, provider: &ProviderId) -> Option<&RouteResult> {
        self.0.get(provider)
    }

    /// Iterate over all providers' results.
    pub fn iter(&self) -> impl Iterator<Item = &RouteResult> {
        self.0.values()
    }

    /// Replace a provider's route wholesale. Visibility is preserved.
    pub fn store(&mut self, provider: &ProviderId, response: RouteResponse, path: Vec<LatLng>) {
        let entry = self.entry(provider);
        *entry = RouteResult {
            provider: provider.clone(),
            geometry: response.geometry,
            decoded_geometry: path,
            summary: response.summary,
            raw: Some(response.raw),
            visible: entry.visible,
        };
    }

    /// Drop a provider's route. Visibility is preserved.
    pub fn clear(&mut self, provider: &ProviderId) {
        let entry = self.entry(provider);
        *entry = RouteResult {
            visible: entry.visible,
            ..RouteResult::empty(provider.clone())
        };
    }

    /// Show or hide a provider's route without touching its data.
    pub fn set_visible(&mut self, provider: &ProviderId, visible: bool) {
        self.entry(provider).visible = visible;
    }

    fn entry(&mut self, provider: &ProviderId) -> &mut RouteResult {
        self.0
            .entry(provider.clone())
            .or_insert_with(|| RouteResult::empty(provider.clone()))
    }
}
