use crate::services::GrowthService;
use crate::state::{ListSource, RemoteList};
use crate::ClientResult;
use api_shared::GrowthRecord;
use async_trait::async_trait;
use momcare_types::UserId;

pub struct GrowthSource(GrowthService);

#[async_trait]
impl ListSource for GrowthSource {
    type Item = GrowthRecord;

    async fn fetch(&self, user_id: &UserId) -> ClientResult<Vec<GrowthRecord>> {
        self.0.list(user_id).await
    }
}

/// Week-by-week foetal growth information.
pub struct GrowthScreen {
    user_id: UserId,
    records: RemoteList<GrowthSource>,
}

impl GrowthScreen {
    pub fn new(service: GrowthService, user_id: UserId) -> Self {
        Self {
            user_id,
            records: RemoteList::new(GrowthSource(service)),
        }
    }

    pub fn records(&self) -> &RemoteList<GrowthSource> {
        &self.records
    }

    pub async fn reload(&self) -> ClientResult<()> {
        self.records.reload(&self.user_id).await
    }

    /// The loaded record for `week`, matched on its numeric week.
    pub fn record_for_week(&self, week: u32) -> Option<GrowthRecord> {
        self.records
            .state()
            .loaded()?
            .into_iter()
            .find(|r| r.week_number() == Some(week))
    }

    pub fn image_url(&self, record: &GrowthRecord) -> Option<String> {
        self.records.source().0.image_url(record)
    }
}
