use crate::client::ApiClient;
use crate::ClientResult;
use api_shared::endpoints;
use api_shared::forms::UserQuery;
use api_shared::{CrisisWeek, FoodPost, ReferenceProduct, Vitamin};
use momcare_types::UserId;

/// Read-only reference content: crisis weeks, nutrition handbook, products and vitamins.
#[derive(Clone, Debug)]
pub struct ContentService {
    client: ApiClient,
}

impl ContentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn crisis_weeks(&self, user_id: &UserId) -> ClientResult<Vec<CrisisWeek>> {
        let query = UserQuery {
            user_id: user_id.to_string(),
        };
        self.client
            .get_json_with(endpoints::CRISIS_WEEKS, &query)
            .await
    }

    pub async fn food_posts(&self) -> ClientResult<Vec<FoodPost>> {
        self.client.get_json(endpoints::FOOD_POSTS).await
    }

    pub async fn reference_products(&self) -> ClientResult<Vec<ReferenceProduct>> {
        self.client.get_json(endpoints::REFERENCE_PRODUCTS).await
    }

    pub async fn vitamins(&self) -> ClientResult<Vec<Vitamin>> {
        self.client.get_json(endpoints::VITAMINS).await
    }

    /// Image paths in content records are relative to the API base URL.
    pub fn image_url(&self, path: Option<&str>) -> Option<String> {
        path.and_then(|p| self.client.resolve_asset_url(p))
    }
}
