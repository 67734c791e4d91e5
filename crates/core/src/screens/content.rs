use crate::services::ContentService;
use crate::state::{ListSource, RemoteList};
use crate::ClientResult;
use api_shared::{CrisisWeek, FoodPost, ReferenceProduct, Vitamin};
use async_trait::async_trait;
use momcare_types::UserId;

pub struct CrisisWeekSource(pub ContentService);
pub struct FoodPostSource(pub ContentService);
pub struct ReferenceProductSource(pub ContentService);
pub struct VitaminSource(pub ContentService);

#[async_trait]
impl ListSource for CrisisWeekSource {
    type Item = CrisisWeek;

    async fn fetch(&self, user_id: &UserId) -> ClientResult<Vec<CrisisWeek>> {
        self.0.crisis_weeks(user_id).await
    }
}

// The remaining catalogues are shared by all users.

#[async_trait]
impl ListSource for FoodPostSource {
    type Item = FoodPost;

    async fn fetch(&self, _user_id: &UserId) -> ClientResult<Vec<FoodPost>> {
        self.0.food_posts().await
    }
}

#[async_trait]
impl ListSource for ReferenceProductSource {
    type Item = ReferenceProduct;

    async fn fetch(&self, _user_id: &UserId) -> ClientResult<Vec<ReferenceProduct>> {
        self.0.reference_products().await
    }
}

#[async_trait]
impl ListSource for VitaminSource {
    type Item = Vitamin;

    async fn fetch(&self, _user_id: &UserId) -> ClientResult<Vec<Vitamin>> {
        self.0.vitamins().await
    }
}

/// A read-only list screen.
pub struct ContentScreen<S: ListSource> {
    user_id: UserId,
    list: RemoteList<S>,
}

impl<S: ListSource> ContentScreen<S> {
    pub fn new(source: S, user_id: UserId) -> Self {
        Self {
            user_id,
            list: RemoteList::new(source),
        }
    }

    pub fn list(&self) -> &RemoteList<S> {
        &self.list
    }

    pub async fn reload(&self) -> ClientResult<()> {
        self.list.reload(&self.user_id).await
    }
}
