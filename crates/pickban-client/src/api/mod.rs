// Lobby service API: the request surface the app loop talks to, its error
// taxonomy, and response bodies. `http` holds the reqwest implementation.

pub mod http;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::lobby::{LobbySnapshot, PlayerSlot, Role};

pub use http::HttpLobbyApi;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response. `message` is the body's `error` field when present.
    #[error("HTTP {status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        message: Option<String>,
    },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// The server's error string, falling back to the status text.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Status {
                status,
                status_text,
                message,
            } => match message {
                Some(m) => m.clone(),
                None if !status_text.is_empty() => status_text.clone(),
                None => format!("HTTP {status}"),
            },
            ApiError::Network(m) | ApiError::Decode(m) => m.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedLobby {
    pub lobby_code: String,
    #[serde(default)]
    pub organizer_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JoinedLobby {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerJoined {
    #[serde(default)]
    pub new_role: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// LobbyApi
// ---------------------------------------------------------------------------

/// One method per lobby service endpoint. Each call is a single request with
/// no retry.
#[async_trait]
pub trait LobbyApi: Send + Sync {
    /// `GET /lobbies/{code}`
    async fn get_lobby(&self, code: &str) -> Result<LobbySnapshot, ApiError>;

    /// `POST /lobbies`
    async fn create_lobby(&self, player_name: &str) -> Result<CreatedLobby, ApiError>;

    /// `POST /lobbies/{code}/join`, claiming `slot`.
    async fn join_lobby(
        &self,
        code: &str,
        slot: PlayerSlot,
        player_name: &str,
    ) -> Result<JoinedLobby, ApiError>;

    /// `POST /lobbies/{code}/organizer-join`
    async fn organizer_join(
        &self,
        code: &str,
        player_name: &str,
    ) -> Result<OrganizerJoined, ApiError>;

    /// `POST /lobbies/{code}/leave`
    async fn leave_lobby(&self, code: &str, slot: PlayerSlot) -> Result<(), ApiError>;

    /// `DELETE /lobbies/{code}`
    async fn delete_lobby(&self, code: &str, player_name: &str) -> Result<(), ApiError>;

    /// `POST /lobbies/{code}/reset`
    async fn reset_lobby(&self, code: &str, player_name: &str) -> Result<(), ApiError>;

    /// `POST /lobbies/{code}/action`: a pick or ban, whichever the turn calls for.
    async fn submit_action(&self, code: &str, role: Role, resonator_id: &str)
        -> Result<(), ApiError>;

    /// `POST /lobbies/{code}` with the ready action.
    async fn mark_ready(&self, code: &str, role: Role) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16, text: &str, message: Option<&str>) -> ApiError {
        ApiError::Status {
            status: code,
            status_text: text.into(),
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn detail_prefers_server_message() {
        assert_eq!(status(409, "Conflict", Some("Lobby is full")).detail(), "Lobby is full");
        assert_eq!(status(500, "Internal Server Error", None).detail(), "Internal Server Error");
        assert_eq!(status(599, "", None).detail(), "HTTP 599");
    }

    #[test]
    fn classification_helpers() {
        assert!(status(404, "Not Found", None).is_not_found());
        assert!(!status(409, "Conflict", None).is_not_found());
        assert_eq!(status(502, "Bad Gateway", None).status(), Some(502));
        assert!(ApiError::Network("refused".into()).status().is_none());
        assert_eq!(ApiError::Decode("eof".into()).status(), None);
        assert_eq!(
            status(403, "Forbidden", Some("nope")).server_message(),
            Some("nope")
        );
    }
}
