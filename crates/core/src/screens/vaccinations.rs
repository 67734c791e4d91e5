use crate::services::VaccinationService;
use crate::state::{Identified, ListSource, Notice, RemoteList};
use crate::ClientResult;
use api_shared::Vaccination;
use async_trait::async_trait;
use momcare_types::UserId;

pub const MSG_VACCINATION_SAVED: &str = "Cập nhật thành công!";

impl Identified for Vaccination {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

pub struct VaccinationSource(VaccinationService);

#[async_trait]
impl ListSource for VaccinationSource {
    type Item = Vaccination;

    async fn fetch(&self, user_id: &UserId) -> ClientResult<Vec<Vaccination>> {
        self.0.list(user_id).await
    }
}

/// Vaccination schedule with a per-shot "given" checkbox.
pub struct VaccinationsScreen {
    user_id: UserId,
    shots: RemoteList<VaccinationSource>,
}

impl VaccinationsScreen {
    pub fn new(service: VaccinationService, user_id: UserId) -> Self {
        Self {
            user_id,
            shots: RemoteList::new(VaccinationSource(service)),
        }
    }

    pub fn shots(&self) -> &RemoteList<VaccinationSource> {
        &self.shots
    }

    pub async fn reload(&self) -> ClientResult<()> {
        self.shots.reload(&self.user_id).await
    }

    /// Flip the checkbox at once and confirm with the backend; rolled back if that fails.
    pub async fn set_injected(&self, id: i64, injected: bool) -> ClientResult<()> {
        let service = &self.shots.source().0;
        let user_id = &self.user_id;

        self.shots
            .mutate(
                &id,
                |shot| shot.is_injected = injected,
                |shot| async move { service.set_injected(user_id, shot.id, shot.is_injected).await },
            )
            .await?;

        self.shots
            .state()
            .notify(Notice::Info(MSG_VACCINATION_SAVED.to_string()));
        Ok(())
    }
}
