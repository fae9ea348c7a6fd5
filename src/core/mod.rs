mod http;
pub mod spotter;

pub use crate::domain::model::{Coordinates, FlyOver};
pub use crate::domain::ports::{CoordsLookup, EndpointProvider, FlyOverLookup, IpLookup};
pub use crate::utils::error::Result;
pub use spotter::{next_iss_times_for_my_location, HttpSpotter, IssSpotter};
