use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use thiserror::Error;

/// An underlying transport or decode error attached to an `Unknown` failure.
pub type UnderlyingError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can go wrong when requesting and decoding directions.
#[derive(Error, Debug)]
pub enum DirectionsError {
    #[error("the server returned a response with an unexpected MIME type")]
    InvalidResponse,

    #[error("the server returned an empty response body")]
    NoData,

    #[error("no route could be found between the requested waypoints")]
    UnableToRoute,

    #[error("a waypoint could not be associated with a roadway or pathway")]
    UnableToLocate,

    #[error("no routes could be matched to the supplied trace")]
    NoMatches,

    #[error("the request specifies too many coordinates")]
    TooManyCoordinates,

    #[error("the requested routing profile was not recognized")]
    ProfileNotFound,

    #[error("the request is too large")]
    RequestTooLarge,

    #[error("the request contains invalid input: {message:?}")]
    InvalidInput { message: Option<String> },

    #[error("too many requests (limit {limit:?} per {interval:?} s, resets at {reset_time:?})")]
    RateLimited {
        interval: Option<u64>,
        limit: Option<u64>,
        reset_time: Option<u64>,
    },

    #[error("unknown error (code {code:?}, message {message:?})")]
    Unknown {
        #[source]
        underlying: Option<UnderlyingError>,
        code: Option<String>,
        message: Option<String>,
    },
}

impl DirectionsError {
    /// Shorthand for an `Unknown` failure that only carries a source error.
    pub fn unknown(underlying: impl Into<UnderlyingError>) -> Self {
        DirectionsError::Unknown {
            underlying: Some(underlying.into()),
            code: None,
            message: None,
        }
    }
}

/// Maps an HTTP status and the service's error code to a specific error.
///
/// First match in the table wins; codes are matched exactly and
/// case-sensitively. Rate-limit details are read from the `X-Rate-Limit-*`
/// response headers. Without any HTTP status (a pure transport failure) the
/// classification degrades to `Unknown` carrying the underlying error.
pub fn classify(
    status: Option<StatusCode>,
    code: Option<&str>,
    message: Option<&str>,
    underlying: Option<UnderlyingError>,
    headers: Option<&HeaderMap>,
) -> DirectionsError {
    let unknown = |underlying| DirectionsError::Unknown {
        underlying,
        code: code.map(str::to_string),
        message: message.map(str::to_string),
    };

    let Some(status) = status else {
        return unknown(underlying);
    };

    match (status.as_u16(), code.unwrap_or("")) {
        (200, "NoRoute") => DirectionsError::UnableToRoute,
        (200, "NoSegment") => DirectionsError::UnableToLocate,
        (200, "NoMatch") => DirectionsError::NoMatches,
        (422, "TooManyCoordinates") => DirectionsError::TooManyCoordinates,
        (404, "ProfileNotFound") => DirectionsError::ProfileNotFound,
        (413, _) => DirectionsError::RequestTooLarge,
        (422, "InvalidInput") => DirectionsError::InvalidInput {
            message: message.map(str::to_string),
        },
        (429, _) => DirectionsError::RateLimited {
            interval: header_u64(headers, "X-Rate-Limit-Interval"),
            limit: header_u64(headers, "X-Rate-Limit-Limit"),
            reset_time: header_u64(headers, "X-Rate-Limit-Reset"),
        },
        _ => unknown(underlying),
    }
}

fn header_u64(headers: Option<&HeaderMap>, name: &str) -> Option<u64> {
    headers?.get(name)?.to_str().ok()?.parse().ok()
}
