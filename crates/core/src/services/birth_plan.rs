use crate::client::{confirm, ApiClient};
use crate::ClientResult;
use api_shared::endpoints;
use api_shared::forms::BirthPlanSelection;
use api_shared::{BirthPlanQuestion, Envelope};

#[derive(Clone, Debug)]
pub struct BirthPlanService {
    client: ApiClient,
}

impl BirthPlanService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The question catalogue is shared by all users; selections are not included.
    pub async fn questions(&self) -> ClientResult<Vec<BirthPlanQuestion>> {
        self.client.get_json(endpoints::BIRTH_PLAN_QUESTIONS).await
    }

    /// This endpoint takes a JSON body rather than a form.
    pub async fn save_selection(&self, selection: &BirthPlanSelection) -> ClientResult<Envelope> {
        let envelope = self
            .client
            .post_json(endpoints::BIRTH_PLAN_SAVE, selection)
            .await?;
        confirm(envelope)
    }
}
