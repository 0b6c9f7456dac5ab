pub mod client;
pub mod error;
pub mod options;
pub mod response;
pub mod route;
pub mod speed_limit;
pub mod waypoint;

pub use client::{Directions, TokenProvider};
pub use error::{classify, DirectionsError};
pub use options::{DirectionsOptions, Profile};
pub use response::{decode_response, DecodeContext, RouteResponse};
pub use route::{RequestContext, Route, RouteLeg, RouteMetadata};
pub use speed_limit::{SpeedLimitDescriptor, SpeedUnit};
pub use waypoint::{Coord, Waypoint};
