use super::remote::{Failure, Notice, RemoteState};
use crate::{ClientError, ClientResult};
use std::fmt::Debug;
use std::future::Future;
use tokio::sync::{broadcast, watch};

const NOTICE_CAPACITY: usize = 16;

/// A record with a server-issued identifier.
pub trait Identified {
    type Id: PartialEq + Debug;

    fn id(&self) -> Self::Id;
}

/// Observable holder for one remotely loaded value.
///
/// The current state is published on a `watch` channel, so observers always see the latest
/// value and intermediate states may be skipped. Publishing never fails, even with no
/// observers. No lock is held across an `.await`.
#[derive(Debug)]
pub struct StateHolder<T> {
    state: watch::Sender<RemoteState<T>>,
    notices: broadcast::Sender<Notice>,
}

impl<T> Default for StateHolder<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StateHolder<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let (state, _) = watch::channel(RemoteState::Idle);
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        Self { state, notices }
    }

    pub fn current(&self) -> RemoteState<T> {
        self.state.borrow().clone()
    }

    pub fn loaded(&self) -> Option<T> {
        self.state.borrow().loaded().cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<RemoteState<T>> {
        self.state.subscribe()
    }

    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    pub fn publish(&self, state: RemoteState<T>) {
        self.state.send_replace(state);
    }

    pub fn notify(&self, notice: Notice) {
        // Nobody listening is fine; notices are fire-and-forget.
        let _ = self.notices.send(notice);
    }

    /// Publish `Loading`, await `fetch`, then publish `Loaded` or `Failed`.
    ///
    /// Overlapping reloads are not de-duplicated; whichever finishes last wins.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after publishing it as `Failed`.
    pub async fn reload<F>(&self, fetch: F) -> ClientResult<()>
    where
        F: Future<Output = ClientResult<T>>,
    {
        self.publish(RemoteState::Loading);
        match fetch.await {
            Ok(value) => {
                self.publish(RemoteState::Loaded(value));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "load failed");
                self.publish(RemoteState::Failed(Failure::from(&e)));
                Err(e)
            }
        }
    }

    /// Edit the loaded value in place and republish it.
    ///
    /// Returns `false` (and publishes nothing) when no value is loaded.
    pub fn update_loaded(&self, edit: impl FnOnce(&mut T)) -> bool {
        self.state.send_if_modified(|state| match state {
            RemoteState::Loaded(value) => {
                edit(value);
                true
            }
            _ => false,
        })
    }
}

impl<T> StateHolder<Vec<T>>
where
    T: Identified + Clone + Send + Sync + 'static,
{
    /// Optimistically change one record, then confirm it with `commit`.
    ///
    /// The change is applied and published before `commit` runs; `commit` receives the changed
    /// record. When `commit` fails the record is restored from a snapshot taken before the
    /// change, the restored list is published, an error [`Notice`] is emitted and the error is
    /// returned. Repeated calls for the same record are not de-duplicated.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidInput` if no loaded record has `id`, or the commit error.
    pub async fn mutate<C, F, Fut, R>(&self, id: &T::Id, change: C, commit: F) -> ClientResult<R>
    where
        C: FnOnce(&mut T),
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = ClientResult<R>>,
    {
        let mut snapshot = None;
        let mut changed = None;
        self.state.send_if_modified(|state| {
            let RemoteState::Loaded(items) = state else {
                return false;
            };
            let Some(item) = items.iter_mut().find(|item| item.id() == *id) else {
                return false;
            };
            snapshot = Some(item.clone());
            change(item);
            changed = Some(item.clone());
            true
        });

        let (Some(snapshot), Some(changed)) = (snapshot, changed) else {
            return Err(ClientError::InvalidInput(format!(
                "no loaded record with id {id:?}"
            )));
        };

        match commit(changed).await {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::warn!(id = ?id, error = %e, "rolling back optimistic change");
                self.state.send_if_modified(|state| {
                    let RemoteState::Loaded(items) = state else {
                        return false;
                    };
                    match items.iter_mut().find(|item| item.id() == *id) {
                        Some(item) => {
                            *item = snapshot;
                            true
                        }
                        None => false,
                    }
                });
                self.notify(Notice::Error(Failure::from(&e)));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[derive(Clone, Debug, PartialEq)]
    struct Shot {
        id: i64,
        injected: bool,
    }

    impl Identified for Shot {
        type Id = i64;

        fn id(&self) -> i64 {
            self.id
        }
    }

    fn loaded_holder() -> StateHolder<Vec<Shot>> {
        let holder = StateHolder::new();
        holder.publish(RemoteState::Loaded(vec![
            Shot { id: 1, injected: false },
            Shot { id: 2, injected: false },
        ]));
        holder
    }

    #[tokio::test]
    async fn test_reload_publishes_loaded() {
        let holder: StateHolder<Vec<u32>> = StateHolder::new();
        let mut rx = holder.subscribe();
        holder.reload(async { Ok(vec![1, 2]) }).await.unwrap();
        assert_eq!(*rx.borrow_and_update(), RemoteState::Loaded(vec![1, 2]));
    }

    #[tokio::test]
    async fn test_reload_failure_publishes_failed() {
        let holder: StateHolder<Vec<u32>> = StateHolder::new();
        let result = holder
            .reload(async { Err(ClientError::Rejected("hết hạn".into())) })
            .await;
        assert!(result.is_err());
        let failure = holder.current().failure().cloned().unwrap();
        assert_eq!(failure.kind, ErrorKind::Server);
        assert_eq!(failure.message, "hết hạn");
    }

    #[tokio::test]
    async fn test_mutate_keeps_change_on_success() {
        let holder = loaded_holder();
        let committed = holder
            .mutate(&1, |s| s.injected = true, |s| async move { Ok(s.injected) })
            .await
            .unwrap();
        assert!(committed);
        assert!(holder.loaded().unwrap()[0].injected);
    }

    #[tokio::test]
    async fn test_mutate_rolls_back_and_notifies_on_failure() {
        let holder = loaded_holder();
        let mut notices = holder.notices();
        let mut seen_optimistic = false;

        let result: ClientResult<()> = holder
            .mutate(
                &2,
                |s| s.injected = true,
                |s| {
                    seen_optimistic = s.injected;
                    async { Err(ClientError::Rejected("Không thể cập nhật".into())) }
                },
            )
            .await;

        assert!(result.is_err());
        assert!(seen_optimistic);
        assert!(!holder.loaded().unwrap()[1].injected);
        assert_eq!(notices.try_recv().unwrap().message(), "Không thể cập nhật");
    }

    #[tokio::test]
    async fn test_mutate_unknown_id_is_invalid_input() {
        let holder = loaded_holder();
        let result: ClientResult<()> = holder
            .mutate(&99, |s| s.injected = true, |_| async { Ok(()) })
            .await;
        assert!(matches!(result, Err(ClientError::InvalidInput(_))));
    }

    #[test]
    fn test_update_loaded_requires_loaded_value() {
        let holder: StateHolder<u32> = StateHolder::new();
        assert!(!holder.update_loaded(|v| *v += 1));
        holder.publish(RemoteState::Loaded(1));
        assert!(holder.update_loaded(|v| *v += 1));
        assert_eq!(holder.loaded(), Some(2));
    }
}
