use crate::error::{Failure, Stage};
use crate::http;
use crate::types::{Coordinates, IpAddress};
use serde::Deserialize;
use tracing::debug;

/// Undecoded body of the geolocation service.
///
/// The service nests its location document as JSON text, so the body is
/// handed back untouched and turned into [`Coordinates`] by
/// [`decode_coordinates`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGeoPayload(pub String);

impl RawGeoPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Looks up the approximate location of an IP address.
#[derive(Debug, Clone)]
pub struct GeoResolver {
    client: reqwest::Client,
    base: String,
}

impl GeoResolver {
    pub fn new(client: reqwest::Client, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }

    /// `<base>/<ip>`. The address is used as-is.
    pub fn url_for(&self, ip: &IpAddress) -> String {
        format!("{}/{}", self.base.trim_end_matches('/'), ip)
    }

    pub async fn resolve(&self, ip: &IpAddress) -> Result<RawGeoPayload, Failure> {
        let url = self.url_for(ip);
        debug!(%url, "fetching coordinates");
        let resp = http::send(Stage::GeoLookup, self.client.get(&url)).await?;

        if !resp.is_ok() {
            let code = resp.status.as_u16();
            return Err(Failure::status(
                Stage::GeoLookup,
                code,
                format!(
                    "Error when fetching coordinates, Status code: {code}, response: {}",
                    resp.body
                ),
            ));
        }

        Ok(RawGeoPayload(resp.body))
    }
}

// ---------------------------------------------------------------------------
// Coordinate decoding
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct GeoEnvelope {
    data: GeoData,
}

#[derive(Deserialize)]
struct GeoData {
    latitude: Degrees,
    longitude: Degrees,
}

/// Some providers send coordinates as strings (`"51.50"`).
#[derive(Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn value(&self) -> Option<f64> {
        match self {
            Degrees::Number(v) => Some(*v),
            Degrees::Text(s) => s.trim().parse().ok(),
        }
    }
}

fn malformed(detail: impl std::fmt::Display) -> Failure {
    Failure::decode(
        Stage::GeoLookup,
        format!("malformed coordinate payload: {detail}"),
    )
}

fn degrees(field: &str, raw: &Degrees, limit: f64) -> Result<f64, Failure> {
    let v = raw
        .value()
        .ok_or_else(|| malformed(format!("{field} is not a number")))?;
    if !v.is_finite() || v.abs() > limit {
        return Err(malformed(format!("{field} {v} out of range")));
    }
    Ok(v)
}

/// Decode `data.latitude` / `data.longitude` out of a geo payload.
///
/// Failures here belong to the geo stage even though the HTTP call itself
/// succeeded.
pub fn decode_coordinates(raw: &RawGeoPayload) -> Result<Coordinates, Failure> {
    let envelope: GeoEnvelope = serde_json::from_str(raw.as_str()).map_err(malformed)?;
    Ok(Coordinates {
        latitude: degrees("latitude", &envelope.data.latitude, 90.0)?,
        longitude: degrees("longitude", &envelope.data.longitude, 180.0)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    fn payload(s: &str) -> RawGeoPayload {
        RawGeoPayload(s.to_string())
    }

    #[test]
    fn decodes_numeric_coordinates() {
        let c = decode_coordinates(&payload(r#"{"data":{"latitude":1.0,"longitude":2.0}}"#))
            .unwrap();
        assert_eq!(
            c,
            Coordinates {
                latitude: 1.0,
                longitude: 2.0
            }
        );
    }

    #[test]
    fn decodes_string_coordinates_and_ignores_extra_fields() {
        let body = r#"{"status":"success","data":{"ipv4":"8.8.8.8","latitude":"51.50","longitude":"-0.12","city_name":"London"}}"#;
        let c = decode_coordinates(&payload(body)).unwrap();
        assert!((c.latitude - 51.50).abs() < 1e-9);
        assert!((c.longitude + 0.12).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_json_and_missing_fields() {
        for body in ["<html>", r#"{"data":{}}"#, r#"{"latitude":1,"longitude":2}"#] {
            let f = decode_coordinates(&payload(body)).unwrap_err();
            assert_eq!(f.stage, Stage::GeoLookup);
            assert_eq!(f.kind, FailureKind::Decode);
            assert!(f.message.starts_with("malformed coordinate payload"));
        }
    }

    #[test]
    fn rejects_unparseable_and_out_of_range_values() {
        let f = decode_coordinates(&payload(
            r#"{"data":{"latitude":"north","longitude":2.0}}"#,
        ))
        .unwrap_err();
        assert!(f.message.contains("latitude"));

        let f = decode_coordinates(&payload(
            r#"{"data":{"latitude":10.0,"longitude":181.0}}"#,
        ))
        .unwrap_err();
        assert!(f.message.contains("longitude"));
    }

    #[test]
    fn url_joins_base_and_ip() {
        let ip = IpAddress::new("1.2.3.4").unwrap();
        let with_slash = GeoResolver::new(reqwest::Client::new(), "https://geo.test/");
        let without = GeoResolver::new(reqwest::Client::new(), "https://geo.test");
        assert_eq!(with_slash.url_for(&ip), "https://geo.test/1.2.3.4");
        assert_eq!(without.url_for(&ip), "https://geo.test/1.2.3.4");
    }

    #[tokio::test]
    async fn returns_raw_body_untouched() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"data":{"latitude":10.5,"longitude":-20.25}}"#;
        let mock = server
            .mock("GET", "/1.2.3.4")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;
        let resolver = GeoResolver::new(reqwest::Client::new(), server.url());
        let raw = resolver
            .resolve(&IpAddress::new("1.2.3.4").unwrap())
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(raw.as_str(), body);
    }

    #[tokio::test]
    async fn non_200_is_status_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/1.2.3.4")
            .with_status(429)
            .with_body("slow down")
            .create_async()
            .await;
        let resolver = GeoResolver::new(reqwest::Client::new(), server.url());
        let f = resolver
            .resolve(&IpAddress::new("1.2.3.4").unwrap())
            .await
            .unwrap_err();
        assert_eq!(f.stage, Stage::GeoLookup);
        assert_eq!(f.kind, FailureKind::Status);
        assert_eq!(f.status_code, Some(429));
        assert!(f.message.contains("slow down"));
    }

    #[tokio::test]
    async fn unreachable_host_is_geo_transport_failure() {
        let resolver = GeoResolver::new(reqwest::Client::new(), "http://127.0.0.1:1/");
        let f = resolver
            .resolve(&IpAddress::new("1.2.3.4").unwrap())
            .await
            .unwrap_err();
        assert_eq!(f.stage, Stage::GeoLookup);
        assert_eq!(f.kind, FailureKind::Transport);
        assert_eq!(f.status_code, None);
    }
}
