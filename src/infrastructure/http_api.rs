// src/infrastructure/http_api.rs
use crate::application::{AuthApi, NoteRepository};
use crate::domain::{Credentials, DomainError, Note, NoteDraft, NotePatch, Token};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const NOTES_PATH: &str = "tareas";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// REST client for the auth and notes endpoints
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    client: Client,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            bail!("API URL must start with http:// or https://, got '{}'", base_url);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        debug!(%base_url, "Created HTTP API client");
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn note_url(&self, id: i64) -> String {
        self.url(&format!("{}/{}", NOTES_PATH, id))
    }

    async fn send(request: RequestBuilder) -> Result<Response, DomainError> {
        request.send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            DomainError::Network(e.to_string())
        })
    }

    async fn authorized(
        request: RequestBuilder,
        token: &Token,
        id: Option<i64>,
    ) -> Result<Response, DomainError> {
        let response = Self::send(request.header(reqwest::header::AUTHORIZATION, token.bearer())).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(%status, %body, "Notes request rejected");
        Err(match (status, id) {
            (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => {
                DomainError::Auth(error_message(&body, "Session expired, log in again"))
            }
            (StatusCode::NOT_FOUND, Some(id)) => DomainError::NoteNotFound(id),
            (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => {
                DomainError::Validation(error_message(&body, "Invalid note"))
            }
            _ => DomainError::Network(format!("Server returned {}", status)),
        })
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, DomainError> {
        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::Network(format!("Unexpected response: {}", e)))
    }
}

/// Server-supplied `{error}` message, the raw body, or the fallback
fn error_message(body: &str, fallback: &str) -> String {
    if let Ok(ErrorBody { error: Some(msg) }) = serde_json::from_str::<ErrorBody>(body) {
        return msg;
    }
    let body = body.trim();
    if body.is_empty() || body.starts_with('{') {
        fallback.to_string()
    } else {
        body.to_string()
    }
}

#[async_trait]
impl AuthApi for HttpApi {
    #[instrument(level = "debug", skip(self))]
    async fn login(&self, credentials: &Credentials) -> Result<Token, DomainError> {
        let response = Self::send(self.client.post(self.url("auth/login")).json(credentials)).await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.trim();
            let msg = if text.is_empty() {
                format!("Server returned {}", status)
            } else {
                text.to_string()
            };
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DomainError::CredentialsRejected(msg),
                _ => DomainError::Auth(msg),
            });
        }

        let body: LoginResponse = Self::json(response).await?;
        Ok(Token::new(body.token))
    }

    #[instrument(level = "debug", skip(self))]
    async fn register(&self, credentials: &Credentials) -> Result<(), DomainError> {
        let response =
            Self::send(self.client.post(self.url("auth/register")).json(credentials)).await?;

        if response.status().is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        let msg = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| "Could not register user".to_string());
        Err(DomainError::Validation(msg))
    }
}

#[async_trait]
impl NoteRepository for HttpApi {
    #[instrument(level = "debug", skip(self, token))]
    async fn list_notes(&self, token: &Token) -> Result<Vec<Note>, DomainError> {
        let response = Self::authorized(self.client.get(self.url(NOTES_PATH)), token, None).await?;
        Self::json(response).await
    }

    #[instrument(level = "debug", skip(self, token))]
    async fn get_note(&self, token: &Token, id: i64) -> Result<Note, DomainError> {
        let response = Self::authorized(self.client.get(self.note_url(id)), token, Some(id)).await?;
        Self::json(response).await
    }

    #[instrument(level = "debug", skip(self, token))]
    async fn create_note(&self, token: &Token, draft: &NoteDraft) -> Result<Note, DomainError> {
        let request = self.client.post(self.url(NOTES_PATH)).json(draft);
        let response = Self::authorized(request, token, None).await?;
        Self::json(response).await
    }

    #[instrument(level = "debug", skip(self, token))]
    async fn update_note(
        &self,
        token: &Token,
        id: i64,
        patch: &NotePatch,
    ) -> Result<Note, DomainError> {
        let request = self.client.put(self.note_url(id)).json(patch);
        let response = Self::authorized(request, token, Some(id)).await?;
        Self::json(response).await
    }

    #[instrument(level = "debug", skip(self, token))]
    async fn delete_note(&self, token: &Token, id: i64) -> Result<(), DomainError> {
        Self::authorized(self.client.delete(self.note_url(id)), token, Some(id)).await?;
        Ok(())
    }
}
