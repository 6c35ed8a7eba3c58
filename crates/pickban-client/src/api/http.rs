// reqwest implementation of `LobbyApi`.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::{ApiError, CreatedLobby, JoinedLobby, LobbyApi, OrganizerJoined};
use crate::config::Config;
use crate::lobby::{LobbySnapshot, PlayerSlot, Role};

/// Error body shape used by every lobby endpoint.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

pub struct HttpLobbyApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpLobbyApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(
            config.api.base_url.clone(),
            Duration::from_secs(config.api.request_timeout_secs),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty());
        let err = ApiError::Status {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            message,
        };
        debug!("lobby service returned {err} ({})", err.detail());
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        response.json::<T>().await.map_err(|e| {
            warn!("failed to decode lobby service response: {e}");
            ApiError::Decode(e.to_string())
        })
    }

    async fn send_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }
}

#[async_trait]
impl LobbyApi for HttpLobbyApi {
    async fn get_lobby(&self, code: &str) -> Result<LobbySnapshot, ApiError> {
        self.send_json(self.http.get(self.url(&format!("/lobbies/{code}"))))
            .await
    }

    async fn create_lobby(&self, player_name: &str) -> Result<CreatedLobby, ApiError> {
        self.send_json(
            self.http
                .post(self.url("/lobbies"))
                .json(&json!({ "playerName": player_name })),
        )
        .await
    }

    async fn join_lobby(
        &self,
        code: &str,
        slot: PlayerSlot,
        player_name: &str,
    ) -> Result<JoinedLobby, ApiError> {
        let mut body = serde_json::Map::new();
        body.insert(slot.as_str().to_string(), json!(player_name));
        body.insert("playerName".to_string(), json!(player_name));
        self.send_json(
            self.http
                .post(self.url(&format!("/lobbies/{code}/join")))
                .json(&body),
        )
        .await
    }

    async fn organizer_join(
        &self,
        code: &str,
        player_name: &str,
    ) -> Result<OrganizerJoined, ApiError> {
        self.send_json(
            self.http
                .post(self.url(&format!("/lobbies/{code}/organizer-join")))
                .json(&json!({ "playerName": player_name })),
        )
        .await
    }

    async fn leave_lobby(&self, code: &str, slot: PlayerSlot) -> Result<(), ApiError> {
        self.send_empty(
            self.http
                .post(self.url(&format!("/lobbies/{code}/leave")))
                .json(&json!({ "player": slot.as_str() })),
        )
        .await
    }

    async fn delete_lobby(&self, code: &str, player_name: &str) -> Result<(), ApiError> {
        self.send_empty(
            self.http
                .delete(self.url(&format!("/lobbies/{code}")))
                .json(&json!({ "playerName": player_name })),
        )
        .await
    }

    async fn reset_lobby(&self, code: &str, player_name: &str) -> Result<(), ApiError> {
        self.send_empty(
            self.http
                .post(self.url(&format!("/lobbies/{code}/reset")))
                .json(&json!({ "playerName": player_name })),
        )
        .await
    }

    async fn submit_action(
        &self,
        code: &str,
        role: Role,
        resonator_id: &str,
    ) -> Result<(), ApiError> {
        self.send_empty(
            self.http
                .post(self.url(&format!("/lobbies/{code}/action")))
                .json(&json!({ "player": role.as_str(), "pick": resonator_id })),
        )
        .await
    }

    async fn mark_ready(&self, code: &str, role: Role) -> Result<(), ApiError> {
        self.send_empty(
            self.http
                .post(self.url(&format!("/lobbies/{code}")))
                .json(&json!({ "action": "ready", "player": role.as_str(), "ready": true })),
        )
        .await
    }
}
