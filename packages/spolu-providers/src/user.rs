use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UserRecord {
	pub id: i64,
	pub name: String,
	#[serde(default)]
	pub phone: Option<String>,
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub rating: Option<f32>,
}

/// Queries the user directory by display name.
pub async fn find_users(cfg: &spolu_config::ProviderConfig, text: &str) -> Result<Vec<UserRecord>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({ "query": text });
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_user_response(json)
}

fn parse_user_response(json: Value) -> Result<Vec<UserRecord>> {
	if !json.is_array() {
		return Err(Error::InvalidResponse {
			message: "User response must be an array.".to_string(),
		});
	}

	Ok(serde_json::from_value(json)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_users_with_optional_contact_fields() {
		let json = serde_json::json!([
			{ "id": 1, "name": "Miroslav Dvořák", "phone": "+420 777 123 456", "rating": 4.9 },
			{ "id": 2, "name": "Petra Svobodová" }
		]);
		let parsed = parse_user_response(json).expect("parse failed");

		assert_eq!(parsed.len(), 2);
		assert_eq!(parsed[0].phone.as_deref(), Some("+420 777 123 456"));
		assert_eq!(parsed[1].phone, None);
		assert_eq!(parsed[1].rating, None);
	}

	#[test]
	fn rejects_non_array_response() {
		let json = serde_json::json!({ "users": [] });

		assert!(parse_user_response(json).is_err());
	}
}
