use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::waypoint::Waypoint;

/// One route (or map match) returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// Route length in meters.
    pub distance: f64,
    /// Expected travel time in seconds.
    pub duration: f64,
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
    /// Matching confidence in 0..=1; only the matching service reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Identifier the service assigned to the run that produced this route.
    #[serde(skip)]
    pub route_identifier: Option<String>,
    /// The canonical waypoints that bound this route's legs. All routes in
    /// one response share the identical sequence.
    #[serde(skip)]
    pub leg_separators: Vec<Waypoint>,
    #[serde(skip)]
    pub metadata: Option<RouteMetadata>,
}

/// The portion of a route between two consecutive leg-separating waypoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteLeg {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub distance: f64,
    pub duration: f64,
    #[serde(skip)]
    pub source: Option<Waypoint>,
    #[serde(skip)]
    pub destination: Option<Waypoint>,
}

/// Request-scoped context attached to every route after a response decodes.
///
/// Grouping the five fields keeps the attachment atomic: a route either has
/// all of its metadata or none of it.
#[derive(Debug, Clone)]
pub struct RouteMetadata {
    pub route_identifier: Option<String>,
    pub fetch_start: DateTime<Utc>,
    pub response_end: DateTime<Utc>,
    pub access_token: String,
    pub api_endpoint: Url,
}

/// Everything the postprocessing pass needs from the caller.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub fetch_start: DateTime<Utc>,
    pub response_end: DateTime<Utc>,
    pub access_token: String,
    pub api_endpoint: Url,
}

impl Route {
    /// Attaches request-scoped metadata. Runs once per route; a second
    /// attempt is ignored because routes are immutable after postprocessing.
    pub(crate) fn attach_metadata(&mut self, metadata: RouteMetadata) {
        if self.metadata.is_some() {
            log::warn!("route metadata is already set; ignoring a second postprocess pass");
            return;
        }
        self.metadata = Some(metadata);
    }
}

/// Hands each leg the pair of waypoints that bounds it and records the full
/// separator sequence on the route.
pub(crate) fn assign_leg_separators(route: &mut Route, separators: &[Waypoint]) {
    if separators.len() >= 2 && route.legs.len() != separators.len() - 1 {
        log::warn!(
            "route has {} legs but {} leg-separating waypoints",
            route.legs.len(),
            separators.len()
        );
    }
    route.leg_separators = separators.to_vec();
    for (leg, pair) in route.legs.iter_mut().zip(separators.windows(2)) {
        leg.source = Some(pair[0].clone());
        leg.destination = Some(pair[1].clone());
    }
}
