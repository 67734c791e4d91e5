use crate::services::BirthPlanService;
use crate::state::{Identified, StateHolder};
use crate::{ClientError, ClientResult};
use api_shared::forms::BirthPlanSelection;
use api_shared::{BirthPlanQuestion, Envelope};
use momcare_types::UserId;

impl Identified for BirthPlanQuestion {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }
}

/// Keep selections already made on this screen across a reload.
///
/// Options seen before keep their local selection; new options take the backend's flag.
pub fn carry_selections(
    previous: Option<&[BirthPlanQuestion]>,
    mut fetched: Vec<BirthPlanQuestion>,
) -> Vec<BirthPlanQuestion> {
    let Some(previous) = previous else {
        return fetched;
    };

    for question in &mut fetched {
        let Some(before) = previous.iter().find(|q| q.id == question.id) else {
            continue;
        };
        for option in &mut question.options {
            if let Some(old) = before.option(&option.id) {
                option.is_selected = old.is_selected;
            }
        }
    }
    fetched
}

/// Birth plan questionnaire; each option is an independent checkbox.
pub struct BirthPlanScreen {
    user_id: UserId,
    service: BirthPlanService,
    questions: StateHolder<Vec<BirthPlanQuestion>>,
}

impl BirthPlanScreen {
    pub fn new(service: BirthPlanService, user_id: UserId) -> Self {
        Self {
            user_id,
            service,
            questions: StateHolder::new(),
        }
    }

    pub fn questions(&self) -> &StateHolder<Vec<BirthPlanQuestion>> {
        &self.questions
    }

    pub async fn reload(&self) -> ClientResult<()> {
        let previous = self.questions.loaded();
        self.questions
            .reload(async {
                let fetched = self.service.questions().await?;
                Ok(carry_selections(previous.as_deref(), fetched))
            })
            .await
    }

    /// Tick or untick one option; rolled back if the backend refuses.
    pub async fn select(
        &self,
        question_id: &str,
        option_id: &str,
        selected: bool,
    ) -> ClientResult<Envelope> {
        let question = self
            .questions
            .loaded()
            .and_then(|questions| questions.into_iter().find(|q| q.id == question_id));
        if let Some(question) = question {
            if question.option(option_id).is_none() {
                return Err(ClientError::InvalidInput(format!(
                    "question {question_id} has no option {option_id}"
                )));
            }
        }

        let selection = BirthPlanSelection {
            user_id: self.user_id.to_string(),
            question_id: question_id.to_string(),
            option_id: option_id.to_string(),
            is_selected: selected,
        };
        let service = &self.service;

        self.questions
            .mutate(
                &question_id.to_string(),
                |question| {
                    if let Some(option) = question.options.iter_mut().find(|o| o.id == option_id) {
                        option.is_selected = selected;
                    }
                },
                |_| async move { service.save_selection(&selection).await },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_shared::BirthPlanOption;

    fn question(selected: bool, extra: bool) -> BirthPlanQuestion {
        let mut options = vec![BirthPlanOption {
            id: "o1".into(),
            text: "Chồng".into(),
            is_selected: selected,
        }];
        if extra {
            options.push(BirthPlanOption {
                id: "o2".into(),
                text: "Mẹ ruột".into(),
                is_selected: true,
            });
        }
        BirthPlanQuestion {
            id: "q1".into(),
            title: "Người đi cùng".into(),
            options,
        }
    }

    #[test]
    fn test_reload_keeps_local_choice() {
        let previous = vec![question(true, false)];
        let merged = carry_selections(Some(&previous), vec![question(false, true)]);
        assert!(merged[0].options[0].is_selected);
        // Unseen option keeps the backend flag.
        assert!(merged[0].options[1].is_selected);
    }

    #[test]
    fn test_first_load_uses_backend_flags() {
        let merged = carry_selections(None, vec![question(true, false)]);
        assert!(merged[0].options[0].is_selected);
    }
}
