use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RideRecord {
	pub id: i64,
	pub from_location: String,
	pub to_location: String,
	pub departure_time: String,
	#[serde(default)]
	pub available_seats: Option<u32>,
	pub price_per_person: f64,
	#[serde(default)]
	pub driver_name: Option<String>,
	#[serde(default)]
	pub driver_rating: Option<f32>,
}

/// Queries the ride directory for rides whose route text matches.
pub async fn find_rides(cfg: &spolu_config::ProviderConfig, text: &str) -> Result<Vec<RideRecord>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let res = client
		.get(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.query(&[("q", text)])
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_ride_response(json)
}

fn parse_ride_response(json: Value) -> Result<Vec<RideRecord>> {
	if !json.is_array() {
		return Err(Error::InvalidResponse {
			message: "Ride response must be an array.".to_string(),
		});
	}

	Ok(serde_json::from_value(json)?)
}
