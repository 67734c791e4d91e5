use crate::client::ApiClient;
use crate::ClientResult;
use api_shared::endpoints;
use api_shared::forms::{GrowthRecordForm, PregnancySummaryForm, UserQuery};
use api_shared::{GrowthRecord, PregnancySummary};
use momcare_types::UserId;

/// Growth records and the pregnancy summary shown on the home screen.
#[derive(Clone, Debug)]
pub struct GrowthService {
    client: ApiClient,
}

impl GrowthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, user_id: &UserId) -> ClientResult<Vec<GrowthRecord>> {
        self.client
            .get_json_with(endpoints::GROWTH_LIST, &user_query(user_id))
            .await
    }

    /// Absent fields in the answer fall back to the placeholder summary values.
    pub async fn summary(&self, user_id: &UserId) -> ClientResult<PregnancySummary> {
        self.client
            .get_json_with(endpoints::PREGNANCY_GET, &user_query(user_id))
            .await
    }

    pub async fn save_summary(&self, form: &PregnancySummaryForm) -> ClientResult<()> {
        self.client
            .post_form_unit(endpoints::PREGNANCY_SAVE, form)
            .await
    }

    pub async fn add_record(&self, form: &GrowthRecordForm) -> ClientResult<()> {
        self.client
            .post_form_unit(endpoints::PREGNANCY_ADD, form)
            .await
    }

    /// Absolute URL of a record's illustration, if it has one.
    pub fn image_url(&self, record: &GrowthRecord) -> Option<String> {
        record
            .image
            .as_deref()
            .and_then(|path| self.client.resolve_asset_url(path))
    }
}

fn user_query(user_id: &UserId) -> UserQuery {
    UserQuery {
        user_id: user_id.to_string(),
    }
}
