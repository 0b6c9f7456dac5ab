use std::fmt;
use std::str::FromStr;

use super::waypoint::Waypoint;

/// Mode of transportation the service should route for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Driving,
    DrivingTraffic,
    Walking,
    Cycling,
}

impl Profile {
    pub fn identifier(&self) -> &'static str {
        match self {
            Profile::Driving => "driving",
            Profile::DrivingTraffic => "driving-traffic",
            Profile::Walking => "walking",
            Profile::Cycling => "cycling",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driving" => Ok(Profile::Driving),
            "driving-traffic" => Ok(Profile::DrivingTraffic),
            "walking" => Ok(Profile::Walking),
            "cycling" => Ok(Profile::Cycling),
            other => Err(format!("unknown routing profile: {}", other)),
        }
    }
}

/// Criteria for one directions or map-matching request.
///
/// The options object is read-only for the duration of a call: the decoder
/// borrows it to reconcile response waypoints against the requested ones.
#[derive(Debug, Clone)]
pub struct DirectionsOptions {
    pub waypoints: Vec<Waypoint>,
    pub profile: Profile,
    pub include_alternatives: bool,
    pub include_steps: bool,
}

impl DirectionsOptions {
    pub fn new(waypoints: Vec<Waypoint>, profile: Profile) -> Self {
        Self {
            waypoints,
            profile,
            include_alternatives: false,
            include_steps: false,
        }
    }

    /// URL path relative to the API endpoint, e.g.
    /// `route/v1/driving/2.35,48.85;2.36,48.86`.
    pub fn path(&self, from_match_service: bool) -> String {
        let service = if from_match_service { "match" } else { "route" };
        format!(
            "{}/v1/{}/{}",
            service,
            self.profile.identifier(),
            self.coordinate_path()
        )
    }

    fn coordinate_path(&self) -> String {
        self.waypoints
            .iter()
            .map(|waypoint| format!("{},{}", waypoint.coordinate.0, waypoint.coordinate.1))
            .collect::<Vec<_>>()
            .join(";")
    }

    pub fn query_items(&self) -> Vec<(&'static str, String)> {
        vec![
            ("alternatives", self.include_alternatives.to_string()),
            ("steps", self.include_steps.to_string()),
        ]
    }
}
