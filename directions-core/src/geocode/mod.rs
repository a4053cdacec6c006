//! Place-search (geocoding) client.
//!
//! This module provides the contract to a Pelias-compatible geocoder:
//! forward search turns text into candidate places, reverse search turns a
//! coordinate into candidate places. [`GeocodeService`] abstracts the
//! transport so orchestration can be tested without a server.

mod cache;
mod client;
mod convert;
mod error;
mod types;

use std::future::Future;

use crate::domain::{LatLng, Place};

pub use cache::{CacheConfig, CachedGeocoder};
pub use client::{PeliasClient, PeliasConfig};
pub use convert::{ConversionError, convert_feature, convert_feature_collection};
pub use error::GeocodeError;
pub use types::FeatureCollection;

/// A place-search backend.
pub trait GeocodeService: Send + Sync + 'static {
    /// Forward search. Blank text must not reach the network.
    fn search(&self, text: &str) -> impl Future<Output = Result<Vec<Place>, GeocodeError>> + Send;

    /// Reverse search. The `0,0` placeholder must not reach the network.
    fn reverse(&self, at: LatLng)
    -> impl Future<Output = Result<Vec<Place>, GeocodeError>> + Send;
}
