use crate::client::ApiClient;
use crate::ClientResult;
use api_shared::endpoints;
use api_shared::forms::{VaccinationQuery, VaccinationUpdateForm};
use api_shared::Vaccination;
use momcare_types::UserId;

#[derive(Clone, Debug)]
pub struct VaccinationService {
    client: ApiClient,
}

impl VaccinationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, user_id: &UserId) -> ClientResult<Vec<Vaccination>> {
        let query = VaccinationQuery {
            user_id: user_id.to_string(),
        };
        self.client
            .get_json_with(endpoints::VACCINATIONS_LIST, &query)
            .await
    }

    /// Record whether a shot has been given. The flag travels as `0`/`1`.
    pub async fn set_injected(&self, user_id: &UserId, id: i64, injected: bool) -> ClientResult<()> {
        let form = VaccinationUpdateForm {
            user_id: user_id.to_string(),
            id,
            is_injected: u8::from(injected),
        };
        self.client
            .post_form_unit(endpoints::VACCINATION_UPDATE, &form)
            .await
    }
}
