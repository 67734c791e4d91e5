use crate::services::VisitService;
use crate::state::{Identified, ListSource, Notice, RemoteList, RemoteMutation};
use crate::validation::{visit_form, VisitDraft};
use crate::ClientResult;
use api_shared::{Envelope, Visit};
use async_trait::async_trait;
use momcare_types::UserId;

impl Identified for Visit {
    type Id = String;

    fn id(&self) -> String {
        self.visit_id.clone()
    }
}

pub struct VisitSource(VisitService);

#[async_trait]
impl ListSource for VisitSource {
    type Item = Visit;

    async fn fetch(&self, user_id: &UserId) -> ClientResult<Vec<Visit>> {
        self.0.list(user_id).await
    }
}

/// Antenatal visit log with add, edit and delete.
///
/// Writes are not optimistic: each successful write is followed by a full reload.
pub struct VisitsScreen {
    user_id: UserId,
    visits: RemoteList<VisitSource>,
    submission: RemoteMutation<Envelope>,
}

impl VisitsScreen {
    pub fn new(service: VisitService, user_id: UserId) -> Self {
        Self {
            user_id,
            visits: RemoteList::new(VisitSource(service)),
            submission: RemoteMutation::new(),
        }
    }

    pub fn visits(&self) -> &RemoteList<VisitSource> {
        &self.visits
    }

    pub fn submission(&self) -> &RemoteMutation<Envelope> {
        &self.submission
    }

    pub async fn reload(&self) -> ClientResult<()> {
        self.visits.reload(&self.user_id).await
    }

    /// Create a visit, or update `existing_id` when given, then reload the list.
    ///
    /// Two saves issued before the first answer arrives create two visits.
    pub async fn save(&self, draft: &VisitDraft, existing_id: Option<&str>) -> ClientResult<Envelope> {
        let form = visit_form(&self.user_id, draft).map_err(|e| self.submission.reject(e))?;
        let service = &self.visits.source().0;

        let envelope = self
            .submission
            .submit(async {
                match existing_id {
                    Some(id) => service.update(id, &form).await,
                    None => service.add(&form).await,
                }
            })
            .await?;

        self.after_write(&envelope).await;
        Ok(envelope)
    }

    pub async fn delete(&self, visit_id: &str) -> ClientResult<Envelope> {
        let service = &self.visits.source().0;
        let envelope = self
            .submission
            .submit(service.delete(&self.user_id, visit_id))
            .await?;

        self.after_write(&envelope).await;
        Ok(envelope)
    }

    async fn after_write(&self, envelope: &Envelope) {
        if !envelope.message.is_empty() {
            self.visits.state().notify(Notice::Info(envelope.message.clone()));
        }
        // A failed reload is published on the list state; the write itself succeeded.
        let _ = self.reload().await;
    }
}
