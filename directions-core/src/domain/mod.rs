//! Domain types for the directions core.
//!
//! Plain data shared by the geocoding, routing and trip modules. None of
//! these types perform I/O.

mod coordinate;
mod highlight;
mod place;
mod profile;
mod waypoint;

pub use coordinate::{LatLng, UNSET, is_set};
pub use highlight::HighlightSegment;
pub use place::Place;
pub use profile::{CostingSettings, InvalidProfile, Profile};
pub use waypoint::{MAX_CANDIDATES, Waypoint};
