//! # Azonbot Directory
//! Client for the external directory that owns subscriber-to-mosque bindings.
//!
//! Every call is one request with a per-request timeout and no retries —
//! retry policy belongs to the caller (the dispatcher's next poll tick, or
//! the user pressing a button again). Transport errors and non-success
//! statuses both collapse into the single `Directory` error kind.

use azonbot_core::error::{AzonError, Result};
use azonbot_core::types::{MosqueInfo, MosqueSummary, Registration, Subscriber};
use serde::Deserialize;

const ROSTER_PATH: &str = "api/v1/get-all-user-info/";
const CHECK_USER_PATH: &str = "check-user/";
const MOSQUE_LIST_PATH: &str = "get-masjid-info";
const REGISTER_PATH: &str = "add-or-update/";
const USER_MOSQUE_PATH: &str = "get-user-masjid/";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct CheckUser {
    status: bool,
}

#[derive(Debug, Deserialize)]
struct UserMosque {
    masjid: MosqueInfo,
}

/// Directory API client.
pub struct DirectoryClient {
    base_url: String,
    client: reqwest::Client,
}

impl DirectoryClient {
    pub fn new(base_url: &str) -> Self {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        Self {
            base_url,
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `path`, demand a success status, and deserialize the JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| AzonError::Directory(format!("GET {path}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AzonError::Directory(format!("GET {path}: HTTP {status}")));
        }
        response
            .json()
            .await
            .map_err(|e| AzonError::Directory(format!("GET {path}: bad payload: {e}")))
    }

    /// The full current roster. An empty roster is a valid (empty) answer,
    /// not a failure.
    pub async fn fetch_subscribers(&self) -> Result<Vec<Subscriber>> {
        self.get_json(ROSTER_PATH, &[]).await
    }

    /// Whether a Telegram user already has a mosque binding.
    pub async fn check_user(&self, telegram_id: i64) -> Result<bool> {
        let answer: CheckUser = self
            .get_json(CHECK_USER_PATH, &[("telegram_id", telegram_id.to_string())])
            .await?;
        Ok(answer.status)
    }

    /// Mosques available in one district. The API's `district` parameter
    /// carries the province name and `region` the district name.
    pub async fn mosques(&self, province: &str, district: &str) -> Result<Vec<MosqueSummary>> {
        self.get_json(
            MOSQUE_LIST_PATH,
            &[
                ("district", province.to_string()),
                ("region", district.to_string()),
            ],
        )
        .await
    }

    /// Create or update one subscriber's mosque binding.
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        let response = self
            .client
            .post(self.url(REGISTER_PATH))
            .json(registration)
            .send()
            .await
            .map_err(|e| AzonError::Directory(format!("POST {REGISTER_PATH}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AzonError::Directory(format!(
                "POST {REGISTER_PATH}: HTTP {status}"
            )));
        }
        tracing::info!("📝 Registered {} → {}", registration.telegram_id, registration.masjid);
        Ok(())
    }

    /// The full mosque card for one subscriber.
    pub async fn user_mosque(&self, telegram_id: i64) -> Result<MosqueInfo> {
        let answer: UserMosque = self
            .get_json(USER_MOSQUE_PATH, &[("telegram_id", telegram_id.to_string())])
            .await?;
        Ok(answer.masjid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = DirectoryClient::new("https://directory.example");
        assert_eq!(
            client.url(ROSTER_PATH),
            "https://directory.example/api/v1/get-all-user-info/"
        );

        let client = DirectoryClient::new("https://directory.example/");
        assert_eq!(
            client.url(CHECK_USER_PATH),
            "https://directory.example/check-user/"
        );
    }

    #[test]
    fn test_check_user_payload() {
        let answer: CheckUser = serde_json::from_str(r#"{"status": true}"#).unwrap();
        assert!(answer.status);
    }

    #[test]
    fn test_user_mosque_payload() {
        let json = r#"{"masjid": {
            "name": "Xo‘ja Ahror Valiy",
            "district": "Toshkent",
            "region": "Shayxontohur",
            "contact": "+998 71 111 11 11",
            "location_url": "https://maps.example/xav",
            "bomdod": "04:56"
        }}"#;
        let answer: UserMosque = serde_json::from_str(json).unwrap();
        assert_eq!(answer.masjid.name, "Xo‘ja Ahror Valiy");
        assert_eq!(answer.masjid.province, "Toshkent");
    }

    #[test]
    fn test_empty_roster_is_not_an_error() {
        let roster: Vec<Subscriber> = serde_json::from_str("[]").unwrap();
        assert!(roster.is_empty());
    }
}
