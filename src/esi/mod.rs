//! Thin typed client for the ESI endpoints this app consumes.
//!
//! Every call carries a request timeout and maps failures into the
//! [`EsiError`] taxonomy: 401/403 become `Unauthorized` (credential must be
//! deactivated), 420/429 become `RateLimited` with the provider-supplied
//! delay, 5xx and transport failures become `Transient`, and remaining 4xx
//! become `Permanent`.

pub mod model;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::esi::EsiError;
use model::{
    EsiAsset, EsiCharacterRoles, EsiCorporationStructure, EsiCustomsOffice, EsiNotification,
    EsiSolarSystem, EsiStarbase, EsiUniverseStructure,
};

#[derive(Clone)]
pub struct EsiClient {
    http: reqwest::Client,
    base_url: String,
}

impl EsiClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// - `base_url` - ESI base URL without trailing slash, overridable for tests
    /// - `user_agent` - identifying user agent including a contact email
    /// - `timeout` - per-request timeout applied to every call
    pub fn new(
        base_url: &str,
        user_agent: &str,
        timeout: std::time::Duration,
    ) -> Result<Self, EsiError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| EsiError::Transient(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// List all structures owned by a corporation, following pagination.
    pub async fn corporation_structures(
        &self,
        corporation_id: i64,
        character_id: i64,
        token: &str,
    ) -> Result<Vec<EsiCorporationStructure>, EsiError> {
        self.get_paginated(
            &format!("/corporations/{corporation_id}/structures/"),
            character_id,
            token,
        )
        .await
    }

    /// Fetch name and location detail for a single structure.
    pub async fn universe_structure(
        &self,
        structure_id: i64,
        character_id: i64,
        token: &str,
    ) -> Result<EsiUniverseStructure, EsiError> {
        let url = format!("{}/universe/structures/{structure_id}/", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(EsiError::from)?;
        decode(check_status(response, character_id).await?).await
    }

    /// Public solar system info, no token required.
    pub async fn solar_system(&self, system_id: i64) -> Result<EsiSolarSystem, EsiError> {
        let url = format!("{}/universe/systems/{system_id}/", self.base_url);
        let response = self.http.get(&url).send().await.map_err(EsiError::from)?;
        decode(check_status(response, 0).await?).await
    }

    /// List all corporation assets, following pagination.
    pub async fn corporation_assets(
        &self,
        corporation_id: i64,
        character_id: i64,
        token: &str,
    ) -> Result<Vec<EsiAsset>, EsiError> {
        self.get_paginated(
            &format!("/corporations/{corporation_id}/assets/"),
            character_id,
            token,
        )
        .await
    }

    /// List recent notifications for a character.
    ///
    /// ESI caches this endpoint for 10 minutes per character, which is why
    /// the sync orchestrator rotates across credentials.
    pub async fn character_notifications(
        &self,
        character_id: i64,
        token: &str,
    ) -> Result<Vec<EsiNotification>, EsiError> {
        let url = format!("{}/characters/{character_id}/notifications/", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(EsiError::from)?;
        decode(check_status(response, character_id).await?).await
    }

    /// Fetch the character's corporation roles.
    pub async fn character_roles(
        &self,
        character_id: i64,
        token: &str,
    ) -> Result<EsiCharacterRoles, EsiError> {
        let url = format!("{}/characters/{character_id}/roles/", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(EsiError::from)?;
        decode(check_status(response, character_id).await?).await
    }

    /// List customs offices owned by a corporation, following pagination.
    pub async fn corporation_customs_offices(
        &self,
        corporation_id: i64,
        character_id: i64,
        token: &str,
    ) -> Result<Vec<EsiCustomsOffice>, EsiError> {
        self.get_paginated(
            &format!("/corporations/{corporation_id}/customs_offices/"),
            character_id,
            token,
        )
        .await
    }

    /// List starbases owned by a corporation, following pagination.
    pub async fn corporation_starbases(
        &self,
        corporation_id: i64,
        character_id: i64,
        token: &str,
    ) -> Result<Vec<EsiStarbase>, EsiError> {
        self.get_paginated(
            &format!("/corporations/{corporation_id}/starbases/"),
            character_id,
            token,
        )
        .await
    }

    /// GET a paginated endpoint, concatenating all pages per the `X-Pages`
    /// response header.
    async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        character_id: i64,
        token: &str,
    ) -> Result<Vec<T>, EsiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut page = 1;
        let mut results: Vec<T> = Vec::new();

        loop {
            let request = self
                .http
                .get(&url)
                .query(&[("page", page)])
                .bearer_auth(token);
            let response = send(request).await?;
            let response = check_status(response, character_id).await?;

            let pages = response
                .headers()
                .get("x-pages")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u32>().ok())
                .unwrap_or(1);

            let mut items: Vec<T> = decode(response).await?;
            results.append(&mut items);

            if page >= pages {
                break;
            }
            page += 1;
        }

        Ok(results)
    }
}

async fn send(request: RequestBuilder) -> Result<Response, EsiError> {
    request.send().await.map_err(EsiError::from)
}

/// Map a non-success response into the error taxonomy.
async fn check_status(response: Response, character_id: i64) -> Result<Response, EsiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let reason = response.text().await.unwrap_or_default();
        return Err(EsiError::Unauthorized {
            character_id,
            reason,
        });
    }

    // 420 is ESI's error-limit status, treated like 429.
    if status == StatusCode::TOO_MANY_REQUESTS || status.as_u16() == 420 {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(EsiError::RateLimited { retry_after });
    }

    if status.is_server_error() {
        return Err(EsiError::Transient(format!("ESI returned {status}")));
    }

    let body = response.text().await.unwrap_or_default();
    Err(EsiError::Permanent {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, EsiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| EsiError::Decode(e.to_string()))
}
