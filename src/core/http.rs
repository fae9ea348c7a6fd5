use crate::domain::model::{Coordinates, FlyOver};
use crate::domain::ports::{CoordsLookup, FlyOverLookup, IpLookup};
use crate::utils::error::{Result, SpotterError, Stage};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct IpResponse {
    ip: String,
}

#[derive(Debug, Deserialize)]
struct FlyOverResponse {
    response: Vec<FlyOver>,
}

/// GET `url`, require a 200, then parse the body as `T`.
async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str, stage: Stage) -> Result<T> {
    tracing::debug!("Making API request for {} to: {}", stage, url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| SpotterError::NetworkError { stage, source })?;

    let status = response.status();
    tracing::debug!("API response status: {}", status);

    if status != StatusCode::OK {
        // 狀態碼已經收到，body 讀不完整也不影響錯誤種類
        let body = response.text().await.unwrap_or_default();
        return Err(SpotterError::RemoteServiceError {
            stage,
            status: status.as_u16(),
            body,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| SpotterError::NetworkError { stage, source })?;

    serde_json::from_str(&body).map_err(|e| SpotterError::MalformedResponseError {
        stage,
        message: e.to_string(),
    })
}

pub struct HttpIpLookup {
    client: Client,
    endpoint: String,
}

impl HttpIpLookup {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait::async_trait]
impl IpLookup for HttpIpLookup {
    async fn fetch_my_ip(&self) -> Result<String> {
        let payload: IpResponse = fetch_json(&self.client, &self.endpoint, Stage::Ip).await?;
        Ok(payload.ip)
    }
}

pub struct HttpCoordsLookup {
    client: Client,
    template: String,
}

impl HttpCoordsLookup {
    pub fn new(client: Client, template: impl Into<String>) -> Self {
        Self {
            client,
            template: template.into(),
        }
    }

    fn url_for(&self, ip: &str) -> String {
        self.template.replace("{ip}", ip)
    }
}

#[async_trait::async_trait]
impl CoordsLookup for HttpCoordsLookup {
    async fn fetch_coords_by_ip(&self, ip: &str) -> Result<Coordinates> {
        fetch_json(&self.client, &self.url_for(ip), Stage::Coordinates).await
    }
}

pub struct HttpFlyOverLookup {
    client: Client,
    template: String,
}

impl HttpFlyOverLookup {
    pub fn new(client: Client, template: impl Into<String>) -> Self {
        Self {
            client,
            template: template.into(),
        }
    }

    fn url_for(&self, coords: &Coordinates) -> String {
        self.template
            .replace("{latitude}", &coords.latitude.to_string())
            .replace("{longitude}", &coords.longitude.to_string())
    }
}

#[async_trait::async_trait]
impl FlyOverLookup for HttpFlyOverLookup {
    async fn fetch_flyover_times(&self, coords: &Coordinates) -> Result<Vec<FlyOver>> {
        let url = self.url_for(coords);
        let payload: FlyOverResponse = fetch_json(&self.client, &url, Stage::FlyOverTimes).await?;
        Ok(payload.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // 沒有服務在聽的 port，用來觸發連線失敗
    const UNREACHABLE: &str = "http://127.0.0.1:1";

    fn vancouver() -> Coordinates {
        Coordinates::new(49.2765, -123.1247)
    }

    /// 回一次固定的原始 HTTP 回應後關閉連線，可用來模擬 body 被截斷
    async fn serve_raw_once(raw: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket.write_all(raw.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn test_ip_lookup_extracts_ip() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/").query_param("format", "json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"ip": "64.46.1.237"}));
        });

        let lookup = HttpIpLookup::new(Client::new(), server.url("/?format=json"));
        let ip = lookup.fetch_my_ip().await.unwrap();

        api_mock.assert();
        assert_eq!(ip, "64.46.1.237");
    }

    #[tokio::test]
    async fn test_ip_lookup_does_not_validate_format() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).json_body(serde_json::json!({"ip": "not-an-ip"}));
        });

        let lookup = HttpIpLookup::new(Client::new(), server.url("/"));
        assert_eq!(lookup.fetch_my_ip().await.unwrap(), "not-an-ip");
    }

    #[tokio::test]
    async fn test_ip_lookup_remote_error_keeps_status_and_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(500).body("internal meltdown");
        });

        let lookup = HttpIpLookup::new(Client::new(), server.url("/"));
        let err = lookup.fetch_my_ip().await.unwrap_err();

        api_mock.assert();
        match err {
            SpotterError::RemoteServiceError {
                stage,
                status,
                body,
            } => {
                assert_eq!(stage, Stage::Ip);
                assert_eq!(status, 500);
                assert_eq!(body, "internal meltdown");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ip_lookup_network_error() {
        let lookup = HttpIpLookup::new(Client::new(), format!("{UNREACHABLE}/?format=json"));
        let err = lookup.fetch_my_ip().await.unwrap_err();
        assert!(matches!(
            err,
            SpotterError::NetworkError {
                stage: Stage::Ip,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_ip_lookup_ignores_extra_fields() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).json_body(serde_json::json!({
                "ip": "64.46.1.237",
                "type": "ipv4",
                "extra": {"asn": 812, "isp": "Rogers"}
            }));
        });

        let lookup = HttpIpLookup::new(Client::new(), server.url("/"));
        assert_eq!(lookup.fetch_my_ip().await.unwrap(), "64.46.1.237");
    }

    #[tokio::test]
    async fn test_truncated_error_body_keeps_status() {
        let url = serve_raw_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 100\r\nConnection: close\r\n\r\nshort",
        )
        .await;

        let lookup = HttpIpLookup::new(Client::new(), url);
        let err = lookup.fetch_my_ip().await.unwrap_err();

        assert!(matches!(err, SpotterError::RemoteServiceError { .. }));
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.stage(), Some(Stage::Ip));
    }

    #[tokio::test]
    async fn test_truncated_success_body_is_network_error() {
        let url = serve_raw_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\n{\"ip\": \"1.2",
        )
        .await;

        let lookup = HttpIpLookup::new(Client::new(), url);
        let err = lookup.fetch_my_ip().await.unwrap_err();

        assert!(matches!(
            err,
            SpotterError::NetworkError {
                stage: Stage::Ip,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_ip_lookup_missing_field_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).json_body(serde_json::json!({"address": "1.2.3.4"}));
        });

        let lookup = HttpIpLookup::new(Client::new(), server.url("/"));
        let err = lookup.fetch_my_ip().await.unwrap_err();
        assert!(matches!(
            err,
            SpotterError::MalformedResponseError {
                stage: Stage::Ip,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_coords_lookup_keeps_only_lat_lon() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/json/64.46.1.237");
            then.status(200).json_body(serde_json::json!({
                "ip": "64.46.1.237",
                "country_code": "CA",
                "city": "Vancouver",
                "latitude": 49.2765,
                "longitude": -123.1247,
                "time_zone": "America/Vancouver"
            }));
        });

        let lookup = HttpCoordsLookup::new(Client::new(), server.url("/json/{ip}"));
        let coords = lookup.fetch_coords_by_ip("64.46.1.237").await.unwrap();

        api_mock.assert();
        assert_eq!(coords, vancouver());
    }

    #[tokio::test]
    async fn test_coords_lookup_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/json/garbage");
            then.status(404)
                .json_body(serde_json::json!({"latitude": 1.0, "longitude": 2.0}));
        });

        let lookup = HttpCoordsLookup::new(Client::new(), server.url("/json/{ip}"));
        let err = lookup.fetch_coords_by_ip("garbage").await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.stage(), Some(Stage::Coordinates));
    }

    #[tokio::test]
    async fn test_coords_lookup_network_error() {
        let lookup = HttpCoordsLookup::new(Client::new(), format!("{UNREACHABLE}/json/{{ip}}"));
        let err = lookup.fetch_coords_by_ip("1.2.3.4").await.unwrap_err();
        assert!(matches!(
            err,
            SpotterError::NetworkError {
                stage: Stage::Coordinates,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_coords_lookup_invalid_json_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/json/1.2.3.4");
            then.status(200).body("<html>not json</html>");
        });

        let lookup = HttpCoordsLookup::new(Client::new(), server.url("/json/{ip}"));
        let err = lookup.fetch_coords_by_ip("1.2.3.4").await.unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Coordinates));
        assert!(matches!(err, SpotterError::MalformedResponseError { .. }));
    }

    #[test]
    fn test_flyover_url_formats_coordinates() {
        let lookup = HttpFlyOverLookup::new(
            Client::new(),
            "http://api.open-notify.org/iss-pass.json?lat={latitude}&lon={longitude}",
        );
        assert_eq!(
            lookup.url_for(&vancouver()),
            "http://api.open-notify.org/iss-pass.json?lat=49.2765&lon=-123.1247"
        );
        assert_eq!(
            lookup.url_for(&Coordinates::new(49.0, 0.5)),
            "http://api.open-notify.org/iss-pass.json?lat=49&lon=0.5"
        );
    }

    #[tokio::test]
    async fn test_flyover_lookup_returns_response_verbatim() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/iss-pass.json")
                .query_param("lat", "49.2765")
                .query_param("lon", "-123.1247");
            then.status(200).json_body(serde_json::json!({
                "message": "success",
                "request": {"altitude": 100, "passes": 3},
                "response": [
                    {"risetime": 134564234, "duration": 600},
                    {"risetime": 134570000},
                    "garbage"
                ]
            }));
        });

        let lookup = HttpFlyOverLookup::new(
            Client::new(),
            server.url("/iss-pass.json?lat={latitude}&lon={longitude}"),
        );
        let passes = lookup.fetch_flyover_times(&vancouver()).await.unwrap();

        api_mock.assert();
        assert_eq!(passes.len(), 3);
        assert_eq!(passes[0], FlyOver::new(134564234, 600));
        assert_eq!(passes[1].duration(), None);
        assert_eq!(passes[2].as_value(), &serde_json::json!("garbage"));
    }

    #[tokio::test]
    async fn test_flyover_lookup_remote_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/iss-pass.json");
            then.status(400)
                .json_body(serde_json::json!({"message": "failure", "reason": "Latitude must be number between -90.0 and 90.0"}));
        });

        let lookup = HttpFlyOverLookup::new(
            Client::new(),
            server.url("/iss-pass.json?lat={latitude}&lon={longitude}"),
        );
        let err = lookup
            .fetch_flyover_times(&Coordinates::new(123.0, 0.0))
            .await
            .unwrap_err();

        match err {
            SpotterError::RemoteServiceError { stage, status, body } => {
                assert_eq!(stage, Stage::FlyOverTimes);
                assert_eq!(status, 400);
                assert!(body.contains("Latitude must be number"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_flyover_lookup_network_error() {
        let lookup = HttpFlyOverLookup::new(
            Client::new(),
            format!("{UNREACHABLE}/iss-pass.json?lat={{latitude}}&lon={{longitude}}"),
        );
        let err = lookup.fetch_flyover_times(&vancouver()).await.unwrap_err();
        assert!(matches!(
            err,
            SpotterError::NetworkError {
                stage: Stage::FlyOverTimes,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_flyover_lookup_missing_response_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/iss-pass.json");
            then.status(200).json_body(serde_json::json!({"message": "success"}));
        });

        let lookup = HttpFlyOverLookup::new(
            Client::new(),
            server.url("/iss-pass.json?lat={latitude}&lon={longitude}"),
        );
        let err = lookup.fetch_flyover_times(&vancouver()).await.unwrap_err();
        assert!(matches!(err, SpotterError::MalformedResponseError { .. }));
    }
}
