use super::http::{HttpCoordsLookup, HttpFlyOverLookup, HttpIpLookup};
use crate::config::EndpointConfig;
use crate::domain::model::FlyOver;
use crate::domain::ports::{CoordsLookup, EndpointProvider, FlyOverLookup, IpLookup};
use crate::utils::error::Result;
use reqwest::Client;

/// Chains IP lookup, geo-IP lookup and ISS pass prediction.
///
/// Each stage only starts after the previous one has produced a value; the
/// first error is returned as-is and later stages never run.
pub struct IssSpotter<I, C, F> {
    ip_lookup: I,
    coords_lookup: C,
    flyover_lookup: F,
}

impl<I: IpLookup, C: CoordsLookup, F: FlyOverLookup> IssSpotter<I, C, F> {
    pub fn new(ip_lookup: I, coords_lookup: C, flyover_lookup: F) -> Self {
        Self {
            ip_lookup,
            coords_lookup,
            flyover_lookup,
        }
    }

    pub async fn next_iss_times(&self) -> Result<Vec<FlyOver>> {
        tracing::info!("🌐 Fetching public IP...");
        let ip = self.ip_lookup.fetch_my_ip().await?;
        tracing::debug!("Resolved IP: {}", ip);

        tracing::info!("📍 Fetching coordinates...");
        let coords = self.coords_lookup.fetch_coords_by_ip(&ip).await?;
        tracing::debug!(
            "Resolved coordinates: lat={}, lon={}",
            coords.latitude,
            coords.longitude
        );

        tracing::info!("🛰️ Fetching ISS flyover times...");
        let passes = self.flyover_lookup.fetch_flyover_times(&coords).await?;
        tracing::info!("✅ Got {} upcoming passes", passes.len());

        Ok(passes)
    }
}

/// The spotter wired to real HTTP endpoints.
pub type HttpSpotter = IssSpotter<HttpIpLookup, HttpCoordsLookup, HttpFlyOverLookup>;

impl HttpSpotter {
    pub fn from_endpoints<E: EndpointProvider>(endpoints: &E) -> Self {
        Self::with_client(Client::new(), endpoints)
    }

    pub fn with_client<E: EndpointProvider>(client: Client, endpoints: &E) -> Self {
        Self::new(
            HttpIpLookup::new(client.clone(), endpoints.ip_endpoint()),
            HttpCoordsLookup::new(client.clone(), endpoints.geo_endpoint()),
            HttpFlyOverLookup::new(client, endpoints.flyover_endpoint()),
        )
    }
}

impl Default for HttpSpotter {
    fn default() -> Self {
        Self::from_endpoints(&EndpointConfig::default())
    }
}

/// Upcoming ISS passes for wherever this machine's public IP geolocates to.
pub async fn next_iss_times_for_my_location() -> Result<Vec<FlyOver>> {
    HttpSpotter::default().next_iss_times().await
}
