use serde::{Deserialize, Serialize};

use super::options::DirectionsOptions;

/// A (longitude, latitude) pair.
pub type Coord = (f64, f64);

/// A location that a route passes through.
///
/// The same type describes waypoints in the request (where the caller sets
/// the accuracy, an optional name override and the leg-separation flag) and
/// the reconciled waypoints in the response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    #[serde(rename = "location")]
    pub coordinate: Coord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip)]
    pub coordinate_accuracy: Option<f64>,
    #[serde(skip)]
    pub separates_legs: bool,
}

impl Waypoint {
    pub fn new(coordinate: Coord) -> Self {
        Self {
            coordinate,
            name: None,
            coordinate_accuracy: None,
            separates_legs: true,
        }
    }

    pub fn named(coordinate: Coord, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(coordinate)
        }
    }

    fn from_raw(raw: &RawWaypoint) -> Self {
        Self {
            coordinate: (raw.location[0], raw.location[1]),
            name: raw.name.clone(),
            coordinate_accuracy: None,
            separates_legs: true,
        }
    }
}

/// Waypoint or tracepoint entry as it appears on the wire. The matching
/// service reports one slot per requested waypoint and leaves a slot null
/// when nothing matched.
#[derive(Debug, Deserialize)]
pub(crate) struct RawWaypoint {
    pub(crate) location: [f64; 2],
    #[serde(default)]
    pub(crate) name: Option<String>,
}

/// Merges the decoded waypoint slots with the request's waypoint list.
///
/// Slots are paired with request waypoints by position; null slots are
/// dropped. Each surviving waypoint takes its coordinate from the response,
/// its accuracy and leg-separation flag from the request, and its name from
/// the request when a non-empty override is present, otherwise from the
/// response. The first and last waypoints always separate legs so that at
/// least one leg exists whenever two waypoints survive.
///
/// Without the request options there is nothing to reconcile against, so the
/// decoded waypoints are returned unmodified (no name overrides, no forced
/// boundary flags) rather than failing the decode.
pub(crate) fn reconcile_waypoints(
    decoded: &[Option<RawWaypoint>],
    options: Option<&DirectionsOptions>,
) -> Vec<Waypoint> {
    let Some(options) = options else {
        return decoded.iter().flatten().map(Waypoint::from_raw).collect();
    };

    let mut waypoints: Vec<Waypoint> = decoded
        .iter()
        .zip(options.waypoints.iter())
        .filter_map(|(slot, requested)| {
            let raw = slot.as_ref()?;
            let name = requested
                .name
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .or_else(|| raw.name.clone());
            Some(Waypoint {
                coordinate: (raw.location[0], raw.location[1]),
                name,
                coordinate_accuracy: requested.coordinate_accuracy,
                separates_legs: requested.separates_legs,
            })
        })
        .collect();

    if let Some(first) = waypoints.first_mut() {
        first.separates_legs = true;
    }
    if let Some(last) = waypoints.last_mut() {
        last.separates_legs = true;
    }
    waypoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::routing::options::Profile;

    fn raw(lon: f64, lat: f64, name: Option<&str>) -> Option<RawWaypoint> {
        Some(RawWaypoint {
            location: [lon, lat],
            name: name.map(str::to_string),
        })
    }

    fn options_with(waypoints: Vec<Waypoint>) -> DirectionsOptions {
        DirectionsOptions::new(waypoints, Profile::Driving)
    }

    #[test]
    fn fully_matched_slots_reconcile_one_to_one() {
        let decoded = vec![
            raw(2.35, 48.85, Some("Rue A")),
            raw(2.36, 48.86, Some("Rue B")),
            raw(2.37, 48.87, Some("Rue C")),
        ];
        let mut middle = Waypoint::new((2.0, 48.0));
        middle.separates_legs = false;
        let options = options_with(vec![
            Waypoint::new((2.3, 48.8)),
            middle,
            Waypoint::new((2.4, 48.9)),
        ]);

        let waypoints = reconcile_waypoints(&decoded, Some(&options));
        assert_eq!(waypoints.len(), 3);
        // Coordinates come from the response, not the request.
        assert_eq!(waypoints[0].coordinate, (2.35, 48.85));
        assert!(!waypoints[1].separates_legs);
    }

    #[test]
    fn endpoints_separate_legs_regardless_of_request_flags() {
        let decoded = vec![raw(1.0, 1.0, None), raw(2.0, 2.0, None)];
        let mut first = Waypoint::new((1.0, 1.0));
        first.separates_legs = false;
        let mut last = Waypoint::new((2.0, 2.0));
        last.separates_legs = false;
        let options = options_with(vec![first, last]);

        let waypoints = reconcile_waypoints(&decoded, Some(&options));
        assert!(waypoints[0].separates_legs);
        assert!(waypoints[1].separates_legs);
    }

    #[test]
    fn null_slots_are_dropped_without_shifting_pairs() {
        let decoded = vec![raw(1.0, 1.0, None), None, raw(3.0, 3.0, None)];
        let options = options_with(vec![
            Waypoint::named((1.0, 1.0), "Start"),
            Waypoint::named((2.0, 2.0), "Skipped"),
            Waypoint::named((3.0, 3.0), "End"),
        ]);

        let waypoints = reconcile_waypoints(&decoded, Some(&options));
        assert_eq!(waypoints.len(), 2);
        assert_eq!(waypoints[0].name.as_deref(), Some("Start"));
        // The surviving third slot pairs with the third request waypoint.
        assert_eq!(waypoints[1].name.as_deref(), Some("End"));
    }

    #[test]
    fn request_name_overrides_decoded_name_only_when_non_empty() {
        let decoded = vec![raw(1.0, 1.0, Some("Main St")), raw(2.0, 2.0, Some("Elm St"))];
        let options = options_with(vec![
            Waypoint::named((1.0, 1.0), "Home"),
            Waypoint::named((2.0, 2.0), ""),
        ]);

        let waypoints = reconcile_waypoints(&decoded, Some(&options));
        assert_eq!(waypoints[0].name.as_deref(), Some("Home"));
        assert_eq!(waypoints[1].name.as_deref(), Some("Elm St"));
    }

    #[test]
    fn longer_decoded_list_truncates_to_request_length() {
        let decoded = vec![raw(1.0, 1.0, None), raw(2.0, 2.0, None), raw(3.0, 3.0, None)];
        let options = options_with(vec![Waypoint::new((1.0, 1.0)), Waypoint::new((2.0, 2.0))]);

        let waypoints = reconcile_waypoints(&decoded, Some(&options));
        assert_eq!(waypoints.len(), 2);
    }

    #[test]
    fn missing_options_return_decoded_waypoints_unmodified() {
        let decoded = vec![raw(1.0, 1.0, Some("Main St")), None];
        let waypoints = reconcile_waypoints(&decoded, None);
        assert_eq!(waypoints.len(), 1);
        assert_eq!(waypoints[0].name.as_deref(), Some("Main St"));
        assert_eq!(waypoints[0].coordinate_accuracy, None);
    }
}
