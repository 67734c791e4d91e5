use crate::constants::DEFAULT_DISPLAY_NAME;
use crate::services::AuthService;
use crate::state::RemoteMutation;
use crate::validation::{login_form, register_form, RegisterDraft};
use crate::{ClientError, ClientResult};
use api_shared::{Envelope, LoginResponse};
use momcare_types::UserId;

/// The signed-in user, handed to every other screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub display_name: String,
}

impl TryFrom<LoginResponse> for Session {
    type Error = ClientError;

    /// A login only counts when the backend reports success *and* returns a user id.
    fn try_from(response: LoginResponse) -> Result<Self, Self::Error> {
        match (response.success, response.user_id) {
            (true, Some(id)) => Ok(Session {
                user_id: UserId::from(id),
                display_name: response
                    .name
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
            }),
            _ => Err(ClientError::Rejected(response.message)),
        }
    }
}

pub struct LoginScreen {
    service: AuthService,
    submission: RemoteMutation<Session>,
}

impl LoginScreen {
    pub fn new(service: AuthService) -> Self {
        Self {
            service,
            submission: RemoteMutation::new(),
        }
    }

    pub fn submission(&self) -> &RemoteMutation<Session> {
        &self.submission
    }

    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Session> {
        let form = login_form(username, password).map_err(|e| self.submission.reject(e))?;
        self.submission
            .submit(async {
                let response = self.service.login(&form).await?;
                Session::try_from(response)
            })
            .await
    }
}

pub struct RegisterScreen {
    service: AuthService,
    submission: RemoteMutation<Envelope>,
}

impl RegisterScreen {
    pub fn new(service: AuthService) -> Self {
        Self {
            service,
            submission: RemoteMutation::new(),
        }
    }

    pub fn submission(&self) -> &RemoteMutation<Envelope> {
        &self.submission
    }

    pub async fn register(&self, draft: &RegisterDraft) -> ClientResult<Envelope> {
        let form = register_form(draft).map_err(|e| self.submission.reject(e))?;
        self.submission.submit(self.service.register(&form)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(success: bool, user_id: Option<i64>, name: Option<&str>) -> LoginResponse {
        LoginResponse {
            success,
            message: "Sai tên đăng nhập hoặc mật khẩu".into(),
            name: name.map(str::to_string),
            user_id,
        }
    }

    #[test]
    fn test_session_falls_back_to_default_name() {
        let session = Session::try_from(response(true, Some(42), None)).unwrap();
        assert_eq!(session.user_id.as_str(), "42");
        assert_eq!(session.display_name, DEFAULT_DISPLAY_NAME);
    }

    #[test]
    fn test_success_without_user_id_is_rejected() {
        let err = Session::try_from(response(true, None, Some("Lan"))).unwrap_err();
        assert_eq!(err.user_message(), "Sai tên đăng nhập hoặc mật khẩu");
    }

    #[test]
    fn test_failed_login_is_rejected() {
        let err = Session::try_from(response(false, Some(1), None)).unwrap_err();
        assert!(matches!(err, ClientError::Rejected(_)));
    }
}
