use super::holder::{Identified, StateHolder};
use super::remote::{Notice, RemoteState};
use crate::ClientResult;
use async_trait::async_trait;
use momcare_types::UserId;
use std::future::Future;
use tokio::sync::{broadcast, watch};

/// Where a screen's list comes from.
///
/// Implemented once per feature on top of the matching service.
#[async_trait]
pub trait ListSource: Send + Sync {
    type Item: Clone + Send + Sync + 'static;

    async fn fetch(&self, user_id: &UserId) -> ClientResult<Vec<Self::Item>>;
}

/// A list loaded from a [`ListSource`] and held for one screen.
pub struct RemoteList<S: ListSource> {
    source: S,
    state: StateHolder<Vec<S::Item>>,
}

impl<S: ListSource> RemoteList<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: StateHolder::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn state(&self) -> &StateHolder<Vec<S::Item>> {
        &self.state
    }

    pub fn current(&self) -> RemoteState<Vec<S::Item>> {
        self.state.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<RemoteState<Vec<S::Item>>> {
        self.state.subscribe()
    }

    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.state.notices()
    }

    /// Fetch the list once and publish the outcome.
    pub async fn reload(&self, user_id: &UserId) -> ClientResult<()> {
        tracing::debug!(user_id = %user_id, "reloading list");
        self.state.reload(self.source.fetch(user_id)).await
    }
}

impl<S> RemoteList<S>
where
    S: ListSource,
    S::Item: Identified,
{
    /// See [`StateHolder::mutate`].
    pub async fn mutate<C, F, Fut, R>(
        &self,
        id: &<S::Item as Identified>::Id,
        change: C,
        commit: F,
    ) -> ClientResult<R>
    where
        C: FnOnce(&mut S::Item),
        F: FnOnce(S::Item) -> Fut,
        Fut: Future<Output = ClientResult<R>>,
    {
        self.state.mutate(id, change, commit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    struct Counting {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ListSource for Counting {
        type Item = String;

        async fn fetch(&self, user_id: &UserId) -> ClientResult<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ClientError::Rejected("offline".into()));
            }
            Ok(vec![format!("record for {user_id}")])
        }
    }

    /// Fails the first fetch and succeeds afterwards; each fetch waits for `gate`.
    struct FailsOnce {
        calls: AtomicUsize,
        gate: Notify,
    }

    #[async_trait]
    impl ListSource for FailsOnce {
        type Item = u32;

        async fn fetch(&self, _user_id: &UserId) -> ClientResult<Vec<u32>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            if call == 0 {
                return Err(ClientError::Rejected("offline".into()));
            }
            Ok(vec![1, 2])
        }
    }

    async fn release_while_loading(list: &RemoteList<FailsOnce>) {
        assert_eq!(list.current(), RemoteState::Loading);
        list.source().gate.notify_one();
    }

    #[tokio::test]
    async fn test_retry_reloads_the_same_list() {
        let list = RemoteList::new(FailsOnce {
            calls: AtomicUsize::new(0),
            gate: Notify::new(),
        });
        let user = UserId::new("42").unwrap();

        let (first, _) = tokio::join!(list.reload(&user), release_while_loading(&list));
        assert!(first.is_err());
        assert_eq!(list.current().failure().unwrap().message, "offline");

        let (second, _) = tokio::join!(list.reload(&user), release_while_loading(&list));
        second.unwrap();
        assert_eq!(list.current(), RemoteState::Loaded(vec![1, 2]));
        assert_eq!(list.source().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_reload_fetches_once_per_call() {
        let list = RemoteList::new(Counting {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let user = UserId::new("42").unwrap();

        assert_eq!(list.current(), RemoteState::Idle);
        list.reload(&user).await.unwrap();
        assert_eq!(
            list.current(),
            RemoteState::Loaded(vec!["record for 42".to_string()])
        );
        assert_eq!(list.source().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_reload_is_not_retried() {
        let list = RemoteList::new(Counting {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let user = UserId::new("42").unwrap();

        assert!(list.reload(&user).await.is_err());
        assert!(list.current().failure().is_some());
        assert_eq!(list.source().calls.load(Ordering::SeqCst), 1);
    }
}
