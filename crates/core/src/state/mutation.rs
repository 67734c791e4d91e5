use super::remote::Failure;
use crate::{ClientError, ClientResult};
use std::future::Future;
use tokio::sync::watch;

/// Outcome of a create / update / delete / login submission.
#[derive(Clone, Debug, PartialEq)]
pub enum MutationState<R> {
    Idle,
    Submitting,
    Succeeded(R),
    Failed(Failure),
}

/// Observable holder for one kind of submission.
///
/// Submissions are not serialised: two overlapping `submit` calls each reach the backend, and
/// whichever completes last decides the published state.
#[derive(Debug)]
pub struct RemoteMutation<R> {
    state: watch::Sender<MutationState<R>>,
}

impl<R> Default for RemoteMutation<R>
where
    R: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RemoteMutation<R>
where
    R: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let (state, _) = watch::channel(MutationState::Idle);
        Self { state }
    }

    pub fn current(&self) -> MutationState<R> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MutationState<R>> {
        self.state.subscribe()
    }

    /// Publish `Submitting`, await `call`, then publish `Succeeded` or `Failed`.
    pub async fn submit<F>(&self, call: F) -> ClientResult<R>
    where
        F: Future<Output = ClientResult<R>>,
    {
        self.state.send_replace(MutationState::Submitting);
        match call.await {
            Ok(result) => {
                self.state
                    .send_replace(MutationState::Succeeded(result.clone()));
                Ok(result)
            }
            Err(e) => {
                tracing::warn!(error = %e, "submission failed");
                self.state.send_replace(MutationState::Failed(Failure::from(&e)));
                Err(e)
            }
        }
    }

    /// Publish an error raised before any call was made (client-side validation) and hand it
    /// back for propagation.
    pub fn reject(&self, err: ClientError) -> ClientError {
        self.state.send_replace(MutationState::Failed(Failure::from(&err)));
        err
    }

    pub fn reset(&self) {
        self.state.send_replace(MutationState::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_submit_publishes_success() {
        let mutation = RemoteMutation::new();
        let value = mutation.submit(async { Ok(7u32) }).await.unwrap();
        assert_eq!(value, 7);
        assert_eq!(mutation.current(), MutationState::Succeeded(7));
    }

    #[tokio::test]
    async fn test_submit_publishes_failure() {
        let mutation: RemoteMutation<u32> = RemoteMutation::new();
        let result = mutation
            .submit(async { Err(ClientError::InvalidInput("Thiếu ngày khám".into())) })
            .await;
        assert!(result.is_err());
        match mutation.current() {
            MutationState::Failed(failure) => {
                assert_eq!(failure.kind, ErrorKind::Validation);
                assert_eq!(failure.message, "Thiếu ngày khám");
            }
            other => panic!("unexpected state: {other:?}"),
        }
        mutation.reset();
        assert_eq!(mutation.current(), MutationState::Idle);
    }

    #[test]
    fn test_reject_publishes_without_call() {
        let mutation: RemoteMutation<()> = RemoteMutation::new();
        let err = mutation.reject(ClientError::InvalidInput("Mật khẩu không khớp".into()));
        assert!(matches!(err, ClientError::InvalidInput(_)));
        assert!(matches!(mutation.current(), MutationState::Failed(_)));
    }
}
