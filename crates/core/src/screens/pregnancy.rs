use crate::layout::{progress_fraction, progress_percent};
use crate::services::GrowthService;
use crate::state::{Notice, RemoteMutation, RemoteState, StateHolder};
use crate::validation::{growth_record_form, summary_form, GrowthRecordDraft, SummaryDraft};
use crate::ClientResult;
use api_shared::PregnancySummary;
use momcare_types::{GestationalWeek, UserId};

pub const MSG_SUMMARY_SAVED: &str = "Cập nhật thành công!";
pub const MSG_RECORD_ADDED: &str = "Thêm dữ liệu thành công!";

/// Progress ring values for the home screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PregnancyProgress {
    pub week: u32,
    pub fraction: f32,
    pub percent: u32,
}

impl PregnancyProgress {
    pub fn of(summary: &PregnancySummary) -> Self {
        Self {
            week: summary.week,
            fraction: progress_fraction(summary.week, GestationalWeek::TERM),
            percent: progress_percent(summary.week, GestationalWeek::TERM),
        }
    }
}

/// Home screen summary (week, size, due date) and the add-growth-record form.
pub struct PregnancyScreen {
    user_id: UserId,
    service: GrowthService,
    summary: StateHolder<PregnancySummary>,
    submission: RemoteMutation<()>,
}

impl PregnancyScreen {
    pub fn new(service: GrowthService, user_id: UserId) -> Self {
        Self {
            user_id,
            service,
            summary: StateHolder::new(),
            submission: RemoteMutation::new(),
        }
    }

    pub fn summary(&self) -> &StateHolder<PregnancySummary> {
        &self.summary
    }

    pub fn submission(&self) -> &RemoteMutation<()> {
        &self.submission
    }

    pub async fn reload(&self) -> ClientResult<()> {
        self.summary.reload(self.service.summary(&self.user_id)).await
    }

    /// Progress of the loaded summary, or of the placeholder summary before the first load.
    pub fn progress(&self) -> PregnancyProgress {
        let summary = self.summary.loaded().unwrap_or_default();
        PregnancyProgress::of(&summary)
    }

    /// Validate and save an edited summary, then show it without reloading.
    pub async fn update(&self, draft: &SummaryDraft) -> ClientResult<()> {
        let form = summary_form(&self.user_id, draft).map_err(|e| self.submission.reject(e))?;
        self.submission
            .submit(self.service.save_summary(&form))
            .await?;

        let saved = PregnancySummary {
            week: form.week,
            length: form.length,
            weight: form.weight,
            due_date: form.due_date,
        };
        if !self.summary.update_loaded(|current| *current = saved.clone()) {
            self.summary.publish(RemoteState::Loaded(saved));
        }
        self.summary
            .notify(Notice::Info(MSG_SUMMARY_SAVED.to_string()));
        Ok(())
    }

    /// Validate and submit a new weekly growth record.
    pub async fn add_record(&self, draft: &GrowthRecordDraft) -> ClientResult<()> {
        let form =
            growth_record_form(&self.user_id, draft).map_err(|e| self.submission.reject(e))?;
        self.submission
            .submit(self.service.add_record(&form))
            .await?;
        self.summary
            .notify(Notice::Info(MSG_RECORD_ADDED.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_of_default_summary() {
        let progress = PregnancyProgress::of(&PregnancySummary::default());
        assert_eq!(progress.week, 20);
        assert_eq!(progress.percent, 50);
        assert_eq!(progress.fraction, 0.5);
    }

    #[test]
    fn test_progress_clamps_post_term() {
        let summary = PregnancySummary {
            week: 42,
            ..PregnancySummary::default()
        };
        assert_eq!(PregnancyProgress::of(&summary).percent, 100);
    }
}
