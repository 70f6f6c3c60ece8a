//! Authentication endpoints

use crate::client::{AuthenticatedClient, ClientError};
use crate::types::{LoginRequest, LoginResponse, UserInfo};
use serde::de::IgnoredAny;

/// Authentication endpoints for the authenticated client
///
/// `login` is sent through the authenticated client as well; while the
/// session is anonymous it simply carries no token.
pub struct AuthApi<'a> {
    client: &'a AuthenticatedClient,
}

impl AuthenticatedClient {
    pub const fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }
}

impl AuthApi<'_> {
    /// Exchange credentials for a token
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let req = self.client.post("/auth/login").json(request);
        self.client.execute(req).await
    }

    /// Invalidate the server-side session
    pub async fn logout(&self) -> Result<(), ClientError> {
        let req = self.client.post("/auth/logout");
        self.client.execute::<IgnoredAny>(req).await.map(|_| ())
    }

    /// Get current user info
    pub async fn get_info(&self) -> Result<UserInfo, ClientError> {
        let req = self.client.get("/auth/info");
        self.client.execute(req).await
    }
}
