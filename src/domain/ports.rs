use crate::domain::model::{Coordinates, FlyOver};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait IpLookup: Send + Sync {
    async fn fetch_my_ip(&self) -> Result<String>;
}

#[async_trait]
pub trait CoordsLookup: Send + Sync {
    async fn fetch_coords_by_ip(&self, ip: &str) -> Result<Coordinates>;
}

#[async_trait]
pub trait FlyOverLookup: Send + Sync {
    async fn fetch_flyover_times(&self, coords: &Coordinates) -> Result<Vec<FlyOver>>;
}

pub trait EndpointProvider: Send + Sync {
    fn ip_endpoint(&self) -> &str;
    fn geo_endpoint(&self) -> &str;
    fn flyover_endpoint(&self) -> &str;
}
