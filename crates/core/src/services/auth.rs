use crate::client::{confirm, ApiClient};
use crate::ClientResult;
use api_shared::endpoints;
use api_shared::forms::{LoginForm, RegisterForm};
use api_shared::{Envelope, LoginResponse};

/// Account login and registration.
#[derive(Clone, Debug)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Submit credentials.
    ///
    /// The raw response is returned even when `success` is false so the caller can show the
    /// backend's message; see `LoginScreen` for how a session is derived from it.
    pub async fn login(&self, form: &LoginForm) -> ClientResult<LoginResponse> {
        self.client.post_form(endpoints::LOGIN, form).await
    }

    pub async fn register(&self, form: &RegisterForm) -> ClientResult<Envelope> {
        let envelope = self.client.post_form(endpoints::REGISTER, form).await?;
        confirm(envelope)
    }
}
