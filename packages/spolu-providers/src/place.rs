use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use spolu_domain::geo::GeoPoint;

use crate::{Error, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlaceCandidate {
	pub id: String,
	pub label: String,
	pub location: Option<GeoPoint>,
	/// Relevance rank supplied by the autocomplete service, already in `[0, 1]`
	/// when present.
	pub rank: Option<f32>,
}

/// Queries the external place-autocomplete capability. The request shape
/// follows the autocomplete contract: free text plus an optional bias location
/// and a country restriction.
pub async fn suggest(
	cfg: &spolu_config::PlaceProviderConfig,
	text: &str,
	origin: Option<GeoPoint>,
) -> Result<Vec<PlaceCandidate>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let mut body = serde_json::json!({
		"input": text,
		"country": cfg.country,
	});

	if let Some(origin) = origin {
		body["location"] = serde_json::json!({ "lat": origin.lat, "lng": origin.lng });
	}

	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_place_response(json)
}

fn parse_place_response(json: Value) -> Result<Vec<PlaceCandidate>> {
	let predictions = json
		.get("predictions")
		.and_then(|v| v.as_array())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Place response is missing predictions array.".to_string(),
		})?;

	let mut out = Vec::with_capacity(predictions.len());

	for item in predictions {
		let id = item
			.get("place_id")
			.and_then(|v| v.as_str())
			.ok_or_else(|| Error::InvalidResponse {
				message: "Place prediction missing place_id.".to_string(),
			})?;
		let label = item
			.get("description")
			.and_then(|v| v.as_str())
			.ok_or_else(|| Error::InvalidResponse {
				message: "Place prediction missing description.".to_string(),
			})?;
		let rank = item.get("rank").and_then(|v| v.as_f64()).map(|v| v as f32);
		let location = item.get("location").and_then(parse_location);

		out.push(PlaceCandidate {
			id: id.to_string(),
			label: label.to_string(),
			location,
			rank,
		});
	}

	Ok(out)
}

fn parse_location(value: &Value) -> Option<GeoPoint> {
	let lat = value.get("lat").and_then(|v| v.as_f64())?;
	let lng = value.get("lng").and_then(|v| v.as_f64())?;

	Some(GeoPoint { lat, lng })
}
