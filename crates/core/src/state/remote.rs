use crate::error::{ClientError, ErrorKind};

/// Cloneable snapshot of a [`ClientError`], suitable for publishing to observers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    pub kind: ErrorKind,
    /// What the user is shown.
    pub message: String,
    /// The full error chain, for logs.
    pub detail: String,
}

impl From<&ClientError> for Failure {
    fn from(err: &ClientError) -> Self {
        Self {
            kind: err.kind(),
            message: err.user_message(),
            detail: err.to_string(),
        }
    }
}

/// State of a value fetched from the backend.
#[derive(Clone, Debug, PartialEq)]
pub enum RemoteState<T> {
    /// Nothing requested yet.
    Idle,
    Loading,
    Loaded(T),
    Failed(Failure),
}

impl<T> Default for RemoteState<T> {
    fn default() -> Self {
        RemoteState::Idle
    }
}

impl<T> RemoteState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            RemoteState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            RemoteState::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Transient message for the user, independent of the screen's main state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(Failure),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Info(message) => message,
            Notice::Error(failure) => &failure.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_snapshot_keeps_user_message() {
        let err = ClientError::Rejected("Mật khẩu không khớp".into());
        let failure = Failure::from(&err);
        assert_eq!(failure.kind, ErrorKind::Server);
        assert_eq!(failure.message, "Mật khẩu không khớp");
        assert!(failure.detail.contains("rejected"));
    }

    #[test]
    fn test_default_state_is_idle() {
        let state: RemoteState<Vec<u8>> = RemoteState::default();
        assert_eq!(state, RemoteState::Idle);
        assert!(state.loaded().is_none());
    }
}
