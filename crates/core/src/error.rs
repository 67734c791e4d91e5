use crate::store::StoreError;

/// Everything that can go wrong between a screen and the backend.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("server returned {status} for {endpoint}: {body}")]
    Server {
        endpoint: String,
        status: u16,
        body: String,
    },
    #[error("server rejected the request: {0}")]
    Rejected(String),
    #[error("unexpected response from {endpoint}: {source}")]
    Parse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("local store error: {0}")]
    Storage(#[from] StoreError),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

impl From<momcare_types::TextError> for ClientError {
    fn from(err: momcare_types::TextError) -> Self {
        ClientError::InvalidInput(err.to_string())
    }
}

/// Coarse grouping used to pick how a failure is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// No connectivity or timeout.
    Network,
    /// HTTP error status or a `success=false` envelope.
    Server,
    /// Shape mismatch or local problems; nothing to do but retry.
    Unexpected,
    /// Rejected before any call was made.
    Validation,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport { .. } => ErrorKind::Network,
            ClientError::Server { .. } | ClientError::Rejected(_) => ErrorKind::Server,
            ClientError::InvalidInput(_) => ErrorKind::Validation,
            ClientError::Parse { .. }
            | ClientError::Config(_)
            | ClientError::ClientBuild(_)
            | ClientError::Storage(_) => ErrorKind::Unexpected,
        }
    }

    /// Message shown to the user.
    ///
    /// Backend-provided messages and validation messages are passed through verbatim; everything
    /// else maps to a fixed message for its kind.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport { .. } => {
                "Lỗi mạng: Vui lòng kiểm tra kết nối internet.".to_string()
            }
            ClientError::Server { status, .. } => {
                format!("Lỗi server: {status}. Vui lòng thử lại sau.")
            }
            ClientError::Rejected(message) if message.trim().is_empty() => {
                "Yêu cầu không thành công.".to_string()
            }
            ClientError::Rejected(message) | ClientError::InvalidInput(message) => message.clone(),
            ClientError::Parse { .. }
            | ClientError::Config(_)
            | ClientError::ClientBuild(_)
            | ClientError::Storage(_) => "Đã xảy ra lỗi không xác định.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_is_verbatim() {
        let err = ClientError::Rejected("Sai mật khẩu".into());
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.user_message(), "Sai mật khẩu");
    }

    #[test]
    fn test_server_status_in_message() {
        let err = ClientError::Server {
            endpoint: "login.php".into(),
            status: 503,
            body: String::new(),
        };
        assert_eq!(err.user_message(), "Lỗi server: 503. Vui lòng thử lại sau.");
    }

    #[test]
    fn test_parse_error_is_unexpected() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = ClientError::Parse {
            endpoint: "vitamins.php".into(),
            source,
        };
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn test_text_error_becomes_validation() {
        let err: ClientError = momcare_types::TextError::Empty.into();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
