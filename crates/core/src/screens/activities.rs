use crate::constants::{
    ACTIVITY_DONE_LABEL, ACTIVITY_MASTER_LIST, ACTIVITY_PENDING_LABEL, DAILY_ACTIVITIES_KEY,
};
use crate::services::ActivityService;
use crate::state::{Identified, Notice, StateHolder};
use crate::store::LocalStore;
use crate::ClientResult;
use api_shared::ActivityRecord;
use momcare_types::{IsoDate, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub const MSG_ACTIVITY_SAVED: &str = "Cập nhật hoạt động thành công!";

/// One daily activity as shown on the checklist.
///
/// Serialised with the field names of the locally cached list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub title: String,
    #[serde(rename = "isDone")]
    pub done: bool,
    #[serde(rename = "desc")]
    pub description: String,
}

impl Activity {
    fn pending(title: &str) -> Self {
        Self {
            title: title.to_string(),
            done: false,
            description: ACTIVITY_PENDING_LABEL.to_string(),
        }
    }
}

impl Identified for Activity {
    type Id = String;

    fn id(&self) -> String {
        self.title.clone()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivityProgress {
    pub completion_percent: u32,
    /// Day of the programme, counted from 1.
    pub day_index: i64,
}

/// The master list with nothing done.
pub fn default_activities() -> Vec<Activity> {
    ACTIVITY_MASTER_LIST.iter().map(|t| Activity::pending(t)).collect()
}

/// Overlay the backend's records on the master list.
///
/// The result always holds exactly the master activities, in master order. Titles the backend
/// returns that are not on the master list are dropped.
pub fn merge_with_master(records: Vec<ActivityRecord>) -> Vec<Activity> {
    let by_title: HashMap<String, ActivityRecord> = records
        .into_iter()
        .map(|r| (r.activity_title.clone(), r))
        .collect();

    ACTIVITY_MASTER_LIST
        .iter()
        .map(|title| match by_title.get(*title) {
            Some(record) => Activity {
                title: record.activity_title.clone(),
                done: record.is_done,
                description: if record.is_done {
                    ACTIVITY_DONE_LABEL.to_string()
                } else {
                    record.description.clone()
                },
            },
            None => Activity::pending(title),
        })
        .collect()
}

/// Daily prenatal-education checklist for one calendar day.
pub struct ActivitiesScreen {
    user_id: UserId,
    date: IsoDate,
    service: ActivityService,
    store: Arc<LocalStore>,
    activities: StateHolder<Vec<Activity>>,
    progress: StateHolder<ActivityProgress>,
}

impl ActivitiesScreen {
    pub fn new(service: ActivityService, store: Arc<LocalStore>, user_id: UserId, date: IsoDate) -> Self {
        Self {
            user_id,
            date,
            service,
            store,
            activities: StateHolder::new(),
            progress: StateHolder::new(),
        }
    }

    pub fn activities(&self) -> &StateHolder<Vec<Activity>> {
        &self.activities
    }

    pub fn progress(&self) -> &StateHolder<ActivityProgress> {
        &self.progress
    }

    pub fn date(&self) -> IsoDate {
        self.date
    }

    /// Load the checklist, then the completion percentage and day index.
    ///
    /// An empty answer from the backend means nothing was recorded today, so the master list is
    /// shown. Every successfully loaded list is cached locally.
    ///
    /// # Errors
    ///
    /// Returns the first failure; both holders are still reloaded.
    pub async fn reload(&self) -> ClientResult<()> {
        let activities = self
            .activities
            .reload(async {
                let records = self.service.daily(&self.user_id, self.date).await?;
                let list = if records.is_empty() {
                    default_activities()
                } else {
                    merge_with_master(records)
                };
                self.cache(&list);
                Ok(list)
            })
            .await;

        let progress = self
            .progress
            .reload(async {
                let completion = self.service.completion(&self.user_id, self.date).await?;
                let day = self.service.day_index(&self.user_id, self.date).await?;
                Ok(ActivityProgress {
                    completion_percent: completion.completion_percentage,
                    day_index: day.day_index.max(1),
                })
            })
            .await;

        activities.and(progress)
    }

    /// The last list cached on this device, if any.
    pub fn cached(&self) -> Option<Vec<Activity>> {
        match self.store.get(DAILY_ACTIVITIES_KEY) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read cached activities");
                None
            }
        }
    }

    fn cache(&self, list: &[Activity]) {
        if let Err(e) = self.store.put(DAILY_ACTIVITIES_KEY, &list) {
            tracing::warn!(error = %e, "failed to cache activities");
        }
    }

    /// Tick or untick an activity; rolled back if the backend refuses.
    ///
    /// Returns the day's new completion percentage as reported by the backend.
    pub async fn set_done(&self, title: &str, done: bool) -> ClientResult<u32> {
        let service = &self.service;
        let user_id = &self.user_id;
        let date = self.date;

        let completion = self
            .activities
            .mutate(
                &title.to_string(),
                |activity| {
                    activity.done = done;
                    activity.description = if done {
                        ACTIVITY_DONE_LABEL.to_string()
                    } else {
                        ACTIVITY_PENDING_LABEL.to_string()
                    };
                },
                |activity| async move {
                    let record = ActivityRecord {
                        activity_title: activity.title,
                        description: activity.description,
                        is_done: activity.done,
                    };
                    service.save(user_id, date, &record).await
                },
            )
            .await?;

        let percent = completion.completion_percentage;
        self.progress.update_loaded(|p| p.completion_percent = percent);
        if let Some(list) = self.activities.loaded() {
            self.cache(&list);
        }
        self.activities
            .notify(Notice::Info(MSG_ACTIVITY_SAVED.to_string()));
        Ok(percent)
    }

    /// Number of activities ticked today.
    pub fn done_count(&self) -> usize {
        self.activities
            .loaded()
            .map(|list| list.iter().filter(|a| a.done).count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_master_order_and_fills_gaps() {
        let records = vec![
            ActivityRecord {
                activity_title: "🎬 Xem phim".into(),
                description: "Phim hoạt hình".into(),
                is_done: false,
            },
            ActivityRecord {
                activity_title: "📖 Kể chuyện".into(),
                description: "Truyện cổ tích".into(),
                is_done: true,
            },
            ActivityRecord {
                activity_title: "🏃 Chạy bộ".into(),
                description: String::new(),
                is_done: true,
            },
        ];

        let merged = merge_with_master(records);
        let titles: Vec<&str> = merged.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ACTIVITY_MASTER_LIST.to_vec());

        assert!(merged[0].done);
        assert_eq!(merged[0].description, ACTIVITY_DONE_LABEL);
        assert_eq!(merged[1].description, ACTIVITY_PENDING_LABEL);
        assert_eq!(merged[3].description, "Phim hoạt hình");
    }

    #[test]
    fn test_default_activities_are_pending() {
        let defaults = default_activities();
        assert_eq!(defaults.len(), 5);
        assert!(defaults.iter().all(|a| !a.done));
    }

    #[test]
    fn test_cached_shape_uses_local_field_names() {
        let json = serde_json::to_value(Activity::pending("🎨 Nghệ thuật")).unwrap();
        assert_eq!(json["isDone"], false);
        assert_eq!(json["desc"], ACTIVITY_PENDING_LABEL);
    }
}
