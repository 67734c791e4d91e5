//! View model for list screens.
//!
//! Every list screen renders one of four shapes: a spinner, an error with a manual retry, an
//! empty message, or its items. [`list_view`] is the single place that decides which.

use crate::constants::RETRY_LABEL;
use crate::state::RemoteState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    /// Nothing has been requested yet.
    Pending,
    Loading,
    Error {
        message: String,
        retry_label: String,
    },
    Empty(String),
    Items(Vec<String>),
}

/// Map a list state to what should be drawn, rendering one line per item.
pub fn list_view<T>(
    state: &RemoteState<Vec<T>>,
    empty_message: &str,
    render: impl Fn(&T) -> String,
) -> View {
    match state {
        RemoteState::Idle => View::Pending,
        RemoteState::Loading => View::Loading,
        RemoteState::Failed(failure) => View::Error {
            message: failure.message.clone(),
            retry_label: RETRY_LABEL.to_string(),
        },
        RemoteState::Loaded(items) if items.is_empty() => View::Empty(empty_message.to_string()),
        RemoteState::Loaded(items) => View::Items(items.iter().map(render).collect()),
    }
}

/// Map the state of a single value (a summary, a progress record) to what should be drawn.
pub fn item_view<T>(state: &RemoteState<T>, render: impl Fn(&T) -> Vec<String>) -> View {
    match state {
        RemoteState::Idle => View::Pending,
        RemoteState::Loading => View::Loading,
        RemoteState::Failed(failure) => View::Error {
            message: failure.message.clone(),
            retry_label: RETRY_LABEL.to_string(),
        },
        RemoteState::Loaded(value) => View::Items(render(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Failure;
    use crate::ClientError;

    #[test]
    fn test_one_line_per_record() {
        let state = RemoteState::Loaded(vec![1, 2, 3]);
        let view = list_view(&state, "Không có dữ liệu", |n| format!("#{n}"));
        assert_eq!(
            view,
            View::Items(vec!["#1".into(), "#2".into(), "#3".into()])
        );
    }

    #[test]
    fn test_empty_list_shows_message() {
        let state: RemoteState<Vec<u8>> = RemoteState::Loaded(vec![]);
        assert_eq!(
            list_view(&state, "Chưa có lịch tiêm", |n| n.to_string()),
            View::Empty("Chưa có lịch tiêm".into())
        );
    }

    #[test]
    fn test_failure_offers_retry() {
        let err = ClientError::Server {
            endpoint: "vitamins.php".into(),
            status: 500,
            body: String::new(),
        };
        let state: RemoteState<Vec<u8>> = RemoteState::Failed(Failure::from(&err));
        match list_view(&state, "", |n| n.to_string()) {
            View::Error {
                message,
                retry_label,
            } => {
                assert_eq!(message, "Lỗi server: 500. Vui lòng thử lại sau.");
                assert_eq!(retry_label, "Thử lại");
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn test_item_view_renders_loaded_value() {
        let state = RemoteState::Loaded(20u32);
        assert_eq!(
            item_view(&state, |w| vec![format!("Tuần {w}")]),
            View::Items(vec!["Tuần 20".into()])
        );
        assert_eq!(item_view(&RemoteState::<u32>::Loading, |_| vec![]), View::Loading);
    }
}
