//! Travel profiles and their costing options.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Error returned when parsing an unknown profile name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown travel profile: {0}")]
pub struct InvalidProfile(pub String);

/// Travel mode used to cost a route.
///
/// The permalink uses the short profile name (`car`, `bicycle`, ...), the
/// routing engine uses the costing model name (`auto`, `bicycle`, ...).
///
/// ```
/// use directions_core::domain::Profile;
///
/// let p = Profile::parse("car").unwrap();
/// assert_eq!(p.costing(), "auto");
/// assert!(Profile::parse("rocket").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Profile {
    #[default]
    Car,
    Truck,
    Bus,
    Bicycle,
    Pedestrian,
    MotorScooter,
    Motorcycle,
}

/// Options shared by every motorised costing model.
const MOTORISED_OPTIONS: &[&str] = &[
    "maneuver_penalty",
    "country_crossing_penalty",
    "country_crossing_cost",
    "use_ferry",
    "use_highways",
    "use_tolls",
    "use_living_streets",
    "use_tracks",
    "private_access_penalty",
    "ignore_closures",
    "closure_factor",
    "service_penalty",
    "service_factor",
    "exclude_unpaved",
    "shortest",
    "top_speed",
    "toll_booth_penalty",
    "ferry_cost",
];

const TRUCK_OPTIONS: &[&str] = &["height", "width", "length", "weight", "axle_load", "hazmat"];

const BICYCLE_OPTIONS: &[&str] = &[
    "maneuver_penalty",
    "use_ferry",
    "use_living_streets",
    "bicycle_type",
    "cycling_speed",
    "use_roads",
    "use_hills",
    "avoid_bad_surfaces",
    "shortest",
];

const PEDESTRIAN_OPTIONS: &[&str] = &[
    "maneuver_penalty",
    "use_ferry",
    "use_living_streets",
    "use_tracks",
    "walking_speed",
    "walkway_factor",
    "sidewalk_factor",
    "alley_factor",
    "driveway_factor",
    "step_penalty",
    "shortest",
];

const SCOOTER_OPTIONS: &[&str] = &["use_primary", "use_hills"];

const MOTORCYCLE_OPTIONS: &[&str] = &["use_trails"];

impl Profile {
    /// All profiles, in the order they are offered to users.
    pub const ALL: [Profile; 7] = [
        Profile::Car,
        Profile::Truck,
        Profile::Bus,
        Profile::Bicycle,
        Profile::Pedestrian,
        Profile::MotorScooter,
        Profile::Motorcycle,
    ];

    /// Parse a profile from its permalink name.
    pub fn parse(s: &str) -> Result<Self, InvalidProfile> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| InvalidProfile(s.to_string()))
    }

    /// The name used in permalinks.
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Car => "car",
            Profile::Truck => "truck",
            Profile::Bus => "bus",
            Profile::Bicycle => "bicycle",
            Profile::Pedestrian => "pedestrian",
            Profile::MotorScooter => "motor_scooter",
            Profile::Motorcycle => "motorcycle",
        }
    }

    /// The costing model name understood by the routing engine.
    pub fn costing(&self) -> &'static str {
        match self {
            Profile::Car => "auto",
            other => other.as_str(),
        }
    }

    /// Returns true if `option` may be sent with this profile's costing.
    pub fn supports_option(&self, option: &str) -> bool {
        let extra: &[&str] = match self {
            Profile::Car | Profile::Bus => &[],
            Profile::Truck => TRUCK_OPTIONS,
            Profile::Bicycle => return BICYCLE_OPTIONS.contains(&option),
            Profile::Pedestrian => return PEDESTRIAN_OPTIONS.contains(&option),
            Profile::MotorScooter => SCOOTER_OPTIONS,
            Profile::Motorcycle => MOTORCYCLE_OPTIONS,
        };
        MOTORISED_OPTIONS.contains(&option) || extra.contains(&option)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-chosen costing options, keyed by option name.
///
/// Settings are kept for every profile the user has touched; before a
/// request is built they are narrowed with [`CostingSettings::filtered_for`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CostingSettings(BTreeMap<String, serde_json::Value>);

impl CostingSettings {
    /// Create an empty set of options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any previous value.
    pub fn with(mut self, option: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.set(option, value);
        self
    }

    /// Set an option, replacing any previous value.
    pub fn set(&mut self, option: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(option.into(), value.into());
    }

    /// Look up an option.
    pub fn get(&self, option: &str) -> Option<&serde_json::Value> {
        self.0.get(option)
    }

    /// Number of options set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no options are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keep only the options the profile's costing model accepts.
    pub fn filtered_for(&self, profile: Profile) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(option, _)| profile.supports_option(option))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrips_every_profile() {
        for profile in Profile::ALL {
            assert_eq!(Profile::parse(profile.as_str()), Ok(profile));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(
            Profile::parse("Car"),
            Err(InvalidProfile("Car".to_string()))
        );
        assert!(Profile::parse("").is_err());
    }

    #[test]
    fn costing_names() {
        assert_eq!(Profile::Car.costing(), "auto");
        assert_eq!(Profile::Bicycle.costing(), "bicycle");
        assert_eq!(Profile::MotorScooter.costing(), "motor_scooter");
    }

    #[test]
    fn bicycle_drops_motorised_options() {
        let settings = CostingSettings::new()
            .with("use_highways", 0.5)
            .with("use_tolls", 1.0)
            .with("cycling_speed", 20)
            .with("use_hills", 0.2);

        let filtered = settings.filtered_for(Profile::Bicycle);

        assert_eq!(filtered.len(), 2);
        assert!(filtered.get("cycling_speed").is_some());
        assert!(filtered.get("use_hills").is_some());
        assert!(filtered.get("use_highways").is_none());
    }

    #[test]
    fn truck_keeps_dimensions_car_does_not() {
        let settings = CostingSettings::new()
            .with("height", 4.1)
            .with("use_tolls", 0.0);

        assert_eq!(settings.filtered_for(Profile::Truck).len(), 2);

        let car = settings.filtered_for(Profile::Car);
        assert_eq!(car.len(), 1);
        assert!(car.get("height").is_none());
    }

    #[test]
    fn unknown_options_are_always_dropped() {
        let settings = CostingSettings::new().with("warp_drive", true);
        for profile in Profile::ALL {
            assert!(settings.filtered_for(profile).is_empty());
        }
    }

    #[test]
    fn settings_serialize_as_flat_object() {
        let settings = CostingSettings::new().with("use_ferry", 0.0);
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json, serde_json::json!({ "use_ferry": 0.0 }));
    }
}
