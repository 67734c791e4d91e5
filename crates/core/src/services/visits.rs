use crate::client::{confirm, ApiClient};
use crate::ClientResult;
use api_shared::endpoints;
use api_shared::forms::{DeleteVisitForm, UserQuery, VisitForm};
use api_shared::{Envelope, Visit};
use momcare_types::UserId;

/// Antenatal visit log ("sổ khám thai").
#[derive(Clone, Debug)]
pub struct VisitService {
    client: ApiClient,
}

impl VisitService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, user_id: &UserId) -> ClientResult<Vec<Visit>> {
        let query = UserQuery {
            user_id: user_id.to_string(),
        };
        self.client
            .get_json_with(endpoints::VISITS_LIST, &query)
            .await
    }

    /// Create a visit. Any `visit_id` on the form is ignored; the backend issues it.
    pub async fn add(&self, form: &VisitForm) -> ClientResult<Envelope> {
        let form = VisitForm {
            visit_id: None,
            ..form.clone()
        };
        let envelope = self.client.post_form(endpoints::VISITS_ADD, &form).await?;
        confirm(envelope)
    }

    pub async fn update(&self, visit_id: &str, form: &VisitForm) -> ClientResult<Envelope> {
        let form = VisitForm {
            visit_id: Some(visit_id.to_string()),
            ..form.clone()
        };
        let envelope = self.client.post_form(endpoints::VISITS_UPDATE, &form).await?;
        confirm(envelope)
    }

    pub async fn delete(&self, user_id: &UserId, visit_id: &str) -> ClientResult<Envelope> {
        let form = DeleteVisitForm {
            user_id: user_id.to_string(),
            visit_id: visit_id.to_string(),
        };
        let envelope = self.client.post_form(endpoints::VISITS_DELETE, &form).await?;
        confirm(envelope)
    }
}
