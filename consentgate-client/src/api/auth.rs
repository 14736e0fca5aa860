use consentgate_core::{Credentials, TokenResponse, UserProfile};

use super::ApiClient;
use crate::error::Result;
use crate::http::RequestOptions;

impl ApiClient {
    /// `POST /auth/register`; stores the issued token in the session
    pub async fn register(&self, credentials: &Credentials) -> Result<TokenResponse> {
        let token: TokenResponse = self
            .http
            .request("/auth/register", RequestOptions::post(credentials)?, false)
            .await?;
        self.session().begin(&token);
        Ok(token)
    }

    /// `POST /auth/login`; stores the issued token in the session
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse> {
        let token: TokenResponse = self
            .http
            .request("/auth/login", RequestOptions::post(credentials)?, false)
            .await?;
        self.session().begin(&token);
        Ok(token)
    }

    /// Returns false when the stored token could not be removed
    pub fn logout(&self) -> bool {
        let cleared = self.session().end();
        tracing::info!(cleared, "Signed out");
        cleared
    }

    /// `GET /auth/me`
    pub async fn me(&self) -> Result<UserProfile> {
        self.http.request("/auth/me", RequestOptions::get(), true).await
    }
}
