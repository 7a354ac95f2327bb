//! Typed client for the HTTP API.
//!
//! The bearer token lives in a [`CredentialStore`]; login and register
//! save it, logout and any 401 response clear it.

use std::{sync::Arc, time::Duration};

use reqwest::{header::AUTHORIZATION, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    auth::{
        dto::{AuthResponse, CredentialsRequest, MeResponse},
        jwt::decode_unverified,
    },
    error::ErrorBody,
    inquiries::{dto::CreateInquiryRequest, repo_types::Inquiry},
};

pub mod credentials;

pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the stored token; it has been discarded.
    #[error("not authenticated; log in again")]
    Unauthorized,

    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("credential store error: {0}")]
    Credentials(#[from] std::io::Error),

    #[error("server returned an unreadable token: {0}")]
    Token(String),
}

/// Identity carried by the stored token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: i64,
    pub email: String,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// `base_url` is the API root, e.g. `http://localhost:3000/api`.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, req: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        Ok(match self.credentials.load()? {
            Some(token) => req.header(AUTHORIZATION, format!("Bearer {token}")),
            None => req,
        })
    }

    async fn read<T: DeserializeOwned>(&self, res: Response) -> Result<T, ClientError> {
        let status = res.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("server rejected credentials; clearing stored token");
            self.credentials.clear()?;
            return Err(ClientError::Unauthorized);
        }
        if !status.is_success() {
            let message = match res.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            };
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(res.json::<T>().await?)
    }

    async fn authenticate(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ClientError> {
        let body = CredentialsRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let res = self.http.post(self.url(path)).json(&body).send().await?;
        let AuthResponse { token } = self.read::<AuthResponse>(res).await?;

        let claims = decode_unverified(&token).map_err(|e| ClientError::Token(e.to_string()))?;
        self.credentials.save(&token)?;
        debug!(user_id = claims.id, "session stored");
        Ok(Session {
            id: claims.id,
            email: claims.email,
        })
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        self.authenticate("/auth/register", email, password).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        self.authenticate("/auth/login", email, password).await
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        self.credentials.clear()?;
        Ok(())
    }

    /// Identity of the stored token, read without contacting the server.
    /// An undecodable token is discarded.
    pub fn session(&self) -> Result<Option<Session>, ClientError> {
        let Some(token) = self.credentials.load()? else {
            return Ok(None);
        };
        match decode_unverified(&token) {
            Ok(claims) => Ok(Some(Session {
                id: claims.id,
                email: claims.email,
            })),
            Err(e) => {
                warn!(error = %e, "discarding undecodable stored token");
                self.credentials.clear()?;
                Ok(None)
            }
        }
    }

    pub async fn current_user(&self) -> Result<MeResponse, ClientError> {
        let req = self.authorized(self.http.get(self.url("/auth/me")))?;
        let res = req.send().await?;
        self.read(res).await
    }

    pub async fn list_inquiries(&self) -> Result<Vec<Inquiry>, ClientError> {
        let req = self.authorized(self.http.get(self.url("/inquiries")))?;
        let res = req.send().await?;
        self.read(res).await
    }

    pub async fn create_inquiry(
        &self,
        title: &str,
        description: &str,
    ) -> Result<Inquiry, ClientError> {
        let body = CreateInquiryRequest {
            title: title.to_string(),
            description: description.to_string(),
        };
        let req = self.authorized(self.http.post(self.url("/inquiries")))?;
        let res = req.json(&body).send().await?;
        self.read(res).await
    }
}
