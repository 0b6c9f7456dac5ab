use serde::{Deserialize, Serialize};

use super::error::DirectionsError;
use super::options::DirectionsOptions;
use super::route::{assign_leg_separators, RequestContext, Route, RouteMetadata};
use super::waypoint::{reconcile_waypoints, RawWaypoint, Waypoint};

/// The service reports this code when a request succeeds.
pub const SUCCESS_CODE: &str = "Ok";

/// What the decoder needs to know about the request that produced a payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeContext<'a> {
    /// The request's options; without them waypoint reconciliation degrades
    /// to passing the decoded waypoints through unmodified.
    pub options: Option<&'a DirectionsOptions>,
    /// Map-matching responses use `matchings`/`tracepoints` keys instead of
    /// `routes`/`waypoints`.
    pub from_match_service: bool,
}

/// The decoded top-level response to a directions or map-matching request.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Absent when the request failed; present but empty when the service
    /// found no results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<Route>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waypoints: Option<Vec<Waypoint>>,
    /// Failure signaled inside the payload itself. Never serialized; the
    /// classifier refines it once the HTTP status is available.
    #[serde(skip)]
    pub error: Option<DirectionsError>,
}

// Wire mirror carrying both the directions and the map-matching key sets.
// The context decides which pair is read; a payload in the other shape
// simply leaves the selected keys absent.
#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    uuid: Option<String>,
    #[serde(default)]
    routes: Option<Vec<Route>>,
    #[serde(default)]
    matchings: Option<Vec<Route>>,
    #[serde(default)]
    waypoints: Option<Vec<Option<RawWaypoint>>>,
    #[serde(default)]
    tracepoints: Option<Vec<Option<RawWaypoint>>>,
}

/// Decodes a raw response payload into a `RouteResponse`.
///
/// Malformed JSON or a schema mismatch fails the whole decode. A decodable
/// envelope always comes back, even when it carries a service-level error;
/// the caller turns that into a classified failure. Absent routes after a
/// nominally successful code are not an error at this layer either.
pub fn decode_response(
    bytes: &[u8],
    ctx: &DecodeContext<'_>,
) -> Result<RouteResponse, serde_json::Error> {
    let raw: RawResponse = serde_json::from_slice(bytes)?;

    let error = raw.error.map(|message| DirectionsError::Unknown {
        underlying: None,
        code: raw.code.clone(),
        message: Some(message),
    });

    let decoded_waypoints = if ctx.from_match_service {
        raw.tracepoints
    } else {
        raw.waypoints
    };
    let waypoints = decoded_waypoints.map(|slots| reconcile_waypoints(&slots, ctx.options));

    let mut routes = if ctx.from_match_service {
        raw.matchings
    } else {
        raw.routes
    };
    if let Some(routes) = routes.as_mut() {
        let separators: Vec<Waypoint> = waypoints
            .iter()
            .flatten()
            .filter(|waypoint| waypoint.separates_legs)
            .cloned()
            .collect();
        for route in routes.iter_mut() {
            route.route_identifier = raw.uuid.clone();
            if !separators.is_empty() {
                assign_leg_separators(route, &separators);
            }
        }
    }

    Ok(RouteResponse {
        code: raw.code,
        message: raw.message,
        uuid: raw.uuid,
        routes,
        waypoints,
        error,
    })
}

impl RouteResponse {
    /// A response is successful when the payload carried no error and its
    /// code is absent or the success sentinel.
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.code.as_deref().map_or(true, |code| code == SUCCESS_CODE)
    }

    /// Attaches the request-scoped metadata to every route. Runs once per
    /// decoded response, after reconciliation, so all routes share the same
    /// canonical waypoint sequence and context.
    pub fn postprocess(&mut self, ctx: &RequestContext) {
        let Some(routes) = self.routes.as_mut() else {
            return;
        };
        for route in routes.iter_mut() {
            route.attach_metadata(RouteMetadata {
                route_identifier: self.uuid.clone(),
                fetch_start: ctx.fetch_start,
                response_end: ctx.response_end,
                access_token: ctx.access_token.clone(),
                api_endpoint: ctx.api_endpoint.clone(),
            });
        }
    }
}
