use crate::client::ApiClient;
use crate::ClientResult;
use api_shared::endpoints;
use api_shared::forms::{ActivityQuery, SaveActivityForm};
use api_shared::{ActivityRecord, CompletionResponse, DayIndexResponse};
use momcare_types::{IsoDate, UserId};

/// Daily prenatal-education activities.
///
/// Every call is scoped to a user and a calendar day.
#[derive(Clone, Debug)]
pub struct ActivityService {
    client: ApiClient,
}

impl ActivityService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn daily(&self, user_id: &UserId, date: IsoDate) -> ClientResult<Vec<ActivityRecord>> {
        self.client
            .get_json_with(endpoints::ACTIVITIES_DAILY, &query(user_id, date))
            .await
    }

    /// Store one activity's state and return the day's new completion percentage.
    pub async fn save(
        &self,
        user_id: &UserId,
        date: IsoDate,
        record: &ActivityRecord,
    ) -> ClientResult<CompletionResponse> {
        let form = SaveActivityForm {
            action: endpoints::SAVE_ACTIVITY_ACTION.to_string(),
            user_id: user_id.to_string(),
            activity_title: record.activity_title.clone(),
            description: record.description.clone(),
            is_done: u8::from(record.is_done),
            activity_date: date.to_string(),
        };
        self.client.post_form(endpoints::ACTIVITY_SAVE, &form).await
    }

    pub async fn completion(&self, user_id: &UserId, date: IsoDate) -> ClientResult<CompletionResponse> {
        self.client
            .get_json_with(endpoints::ACTIVITY_COMPLETION, &query(user_id, date))
            .await
    }

    pub async fn day_index(&self, user_id: &UserId, date: IsoDate) -> ClientResult<DayIndexResponse> {
        self.client
            .get_json_with(endpoints::ACTIVITY_DAY_INDEX, &query(user_id, date))
            .await
    }
}

fn query(user_id: &UserId, date: IsoDate) -> ActivityQuery {
    ActivityQuery {
        user_id: user_id.to_string(),
        activity_date: date.to_string(),
    }
}
