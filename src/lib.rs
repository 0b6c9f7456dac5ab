pub mod sdk;

pub use sdk::config::Credentials;
pub use sdk::routing::client::{Directions, TokenProvider};
pub use sdk::routing::error::{classify, DirectionsError};
pub use sdk::routing::options::{DirectionsOptions, Profile};
pub use sdk::routing::response::{decode_response, DecodeContext, RouteResponse};
pub use sdk::routing::route::{RequestContext, Route, RouteLeg, RouteMetadata};
pub use sdk::routing::speed_limit::{SpeedLimitDescriptor, SpeedUnit};
pub use sdk::routing::waypoint::{Coord, Waypoint};
