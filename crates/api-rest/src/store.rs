//! In-memory data behind the development backend.
//!
//! Everything lives in one `DevStore` guarded by a mutex in `AppState`. Identifiers are issued
//! here from a single counter; clients never choose them. Per-user schedules (vaccinations,
//! crisis weeks) are copied from a template the first time a user asks for them.

use api_shared::forms::{
    BirthPlanSelection, GrowthRecordForm, PregnancySummaryForm, RegisterForm, SaveActivityForm,
    VisitForm,
};
use api_shared::{
    ActivityRecord, BirthPlanOption, BirthPlanQuestion, ChatMessage, CrisisWeek, FoodPost,
    GrowthRecord, PregnancySummary, ReferenceProduct, Vaccination, Visit, Vitamin,
};
use std::collections::{BTreeSet, HashMap};

/// Activities per day that the completion percentage is computed against.
pub const DAILY_ACTIVITY_COUNT: u32 = 5;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug)]
pub struct DevUser {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DevStoreError {
    #[error("Tên đăng nhập đã tồn tại")]
    UsernameTaken,
    #[error("Không tìm thấy lần khám")]
    VisitNotFound,
    #[error("Không tìm thấy mũi tiêm")]
    VaccinationNotFound,
    #[error("Không tìm thấy lựa chọn")]
    OptionNotFound,
}

pub type DevStoreResult<T> = std::result::Result<T, DevStoreError>;

#[derive(Debug, Default)]
pub struct DevStore {
    next_id: i64,
    users: Vec<DevUser>,
    visits: Vec<Visit>,
    growth: Vec<GrowthRecord>,
    summaries: HashMap<String, PregnancySummary>,
    vaccination_template: Vec<Vaccination>,
    vaccinations: HashMap<String, Vec<Vaccination>>,
    /// Keyed by (user id, activity date).
    activities: HashMap<(String, String), Vec<ActivityRecord>>,
    questions: Vec<BirthPlanQuestion>,
    /// Keyed by (user id, question id, option id).
    selections: HashMap<(String, String, String), bool>,
    messages: HashMap<String, Vec<ChatMessage>>,
    crisis_template: Vec<CrisisWeek>,
    food_posts: Vec<FoodPost>,
    products: Vec<ReferenceProduct>,
    vitamins: Vec<Vitamin>,
}

fn now() -> String {
    chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

impl DevStore {
    /// A store with no users and no content.
    pub fn empty() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// A store with a demo account and sample content.
    ///
    /// Demo login: `demo` / `123456`.
    pub fn seeded() -> Self {
        let mut store = Self::empty();
        store.users.push(DevUser {
            id: 1,
            username: "demo".into(),
            password: "123456".into(),
            name: "Lan Anh".into(),
            email: "lananh@example.com".into(),
        });
        store.next_id = 2;

        let shots = [
            ("Uốn ván mũi 1", "2025-03-01", "Tuần 20-24", "Trạm y tế phường"),
            ("Uốn ván mũi 2", "2025-04-01", "Cách mũi 1 ít nhất 4 tuần", "Trạm y tế phường"),
            ("Cúm mùa", "2025-05-15", "Tiêm được ở mọi tam cá nguyệt", "Bệnh viện Phụ sản"),
        ];
        for (name, date, notes, location) in shots {
            let id = store.issue_id();
            store.vaccination_template.push(Vaccination {
                id,
                vaccine_name: name.into(),
                vaccination_date: date.into(),
                notes: notes.into(),
                location: location.into(),
                is_injected: false,
            });
        }

        store.questions = vec![
            question(
                "q1",
                "Người đi cùng khi sinh",
                &[("q1o1", "Chồng"), ("q1o2", "Mẹ ruột"), ("q1o3", "Bạn thân")],
            ),
            question(
                "q2",
                "Phương pháp giảm đau",
                &[("q2o1", "Gây tê ngoài màng cứng"), ("q2o2", "Không dùng thuốc")],
            ),
            question(
                "q3",
                "Sau khi sinh",
                &[("q3o1", "Da kề da ngay"), ("q3o2", "Kẹp rốn muộn")],
            ),
        ];

        let crisis = [
            (12, "Tuần khủng hoảng 12", "Sàng lọc độ mờ da gáy."),
            (20, "Tuần khủng hoảng 20", "Siêu âm hình thái học."),
            (28, "Tuần khủng hoảng 28", "Nghiệm pháp dung nạp đường."),
        ];
        for (week, title, description) in crisis {
            let id = store.issue_id();
            store.crisis_template.push(CrisisWeek {
                id: Some(id),
                user_id: None,
                week: Some(week),
                title: Some(title.into()),
                description: Some(description.into()),
                created_at: None,
            });
        }

        let posts = [
            ("Cá hồi", "Đạm", "Giàu omega-3", "Tốt cho não bộ thai nhi"),
            ("Rau bina", "Rau xanh", "Giàu sắt và folate", "Phòng thiếu máu"),
        ];
        for (name, category, nutrition, benefits) in posts {
            let id = store.issue_id();
            store.food_posts.push(FoodPost {
                id,
                name: name.into(),
                image_url: Some(format!("images/food_{id}.png")),
                category: Some(category.into()),
                description: None,
                nutrition: Some(nutrition.into()),
                benefits: Some(benefits.into()),
                created_at: now(),
            });
        }

        for (name, description) in [
            ("Sữa bầu", "Bổ sung DHA và canxi"),
            ("Gối ôm bà bầu", "Hỗ trợ nằm nghiêng trái"),
        ] {
            let id = store.issue_id();
            store.products.push(ReferenceProduct {
                id,
                name: name.into(),
                description: Some(description.into()),
                image_url: None,
                created_at: None,
            });
        }

        for (name, dosage, benefits) in [
            ("Axit folic", "400 mcg/ngày", "Phòng dị tật ống thần kinh"),
            ("Sắt", "30-60 mg/ngày", "Phòng thiếu máu thiếu sắt"),
            ("Canxi", "1000 mg/ngày", "Hỗ trợ phát triển xương"),
        ] {
            let id = store.issue_id();
            store.vitamins.push(Vitamin {
                id: Some(id),
                name: name.into(),
                dosage: dosage.into(),
                benefits: benefits.into(),
            });
        }

        store
    }

    fn issue_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn login(&self, username: &str, password: &str) -> Option<&DevUser> {
        self.users
            .iter()
            .find(|u| u.username == username && u.password == password)
    }

    pub fn register(&mut self, form: &RegisterForm) -> DevStoreResult<i64> {
        if self.users.iter().any(|u| u.username == form.username) {
            return Err(DevStoreError::UsernameTaken);
        }
        let id = self.issue_id();
        self.users.push(DevUser {
            id,
            username: form.username.clone(),
            password: form.password.clone(),
            name: form.name.clone(),
            email: form.email.clone(),
        });
        Ok(id)
    }

    pub fn visits(&self, user_id: &str) -> Vec<Visit> {
        self.visits
            .iter()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn add_visit(&mut self, form: &VisitForm) -> String {
        let visit_id = self.issue_id().to_string();
        self.visits.push(visit_from_form(visit_id.clone(), form));
        visit_id
    }

    pub fn update_visit(&mut self, form: &VisitForm) -> DevStoreResult<()> {
        let visit_id = form.visit_id.clone().ok_or(DevStoreError::VisitNotFound)?;
        let visit = self
            .visits
            .iter_mut()
            .find(|v| v.visit_id == visit_id && v.user_id == form.user_id)
            .ok_or(DevStoreError::VisitNotFound)?;
        *visit = visit_from_form(visit_id, form);
        Ok(())
    }

    pub fn delete_visit(&mut self, user_id: &str, visit_id: &str) -> DevStoreResult<()> {
        let before = self.visits.len();
        self.visits
            .retain(|v| !(v.visit_id == visit_id && v.user_id == user_id));
        if self.visits.len() == before {
            return Err(DevStoreError::VisitNotFound);
        }
        Ok(())
    }

    pub fn growth_records(&self, user_id: &str) -> Vec<GrowthRecord> {
        let user = user_id.parse::<i64>().ok();
        self.growth
            .iter()
            .filter(|r| r.user_id.is_some() && r.user_id == user)
            .cloned()
            .collect()
    }

    /// Stores a growth record. Numeric fields that do not parse are stored as absent.
    pub fn add_growth_record(&mut self, form: &GrowthRecordForm) -> i64 {
        let id = self.issue_id();
        self.growth.push(GrowthRecord {
            id,
            user_id: form.user_id.trim().parse().ok(),
            week: Some(form.week.clone()),
            weight: form.weight.trim().parse().ok(),
            length: form.length.trim().parse().ok(),
            image: Some(format!("images/week_{}.png", form.week.trim())),
            description: None,
            due_date: Some(form.due_date.clone()),
            created_at: Some(now()),
        });
        id
    }

    /// The user's summary, or the placeholder summary when none was saved.
    pub fn summary(&self, user_id: &str) -> PregnancySummary {
        self.summaries.get(user_id).cloned().unwrap_or_default()
    }

    pub fn save_summary(&mut self, form: &PregnancySummaryForm) {
        self.summaries.insert(
            form.user_id.clone(),
            PregnancySummary {
                week: form.week,
                length: form.length,
                weight: form.weight,
                due_date: form.due_date.clone(),
            },
        );
    }

    pub fn vaccinations(&mut self, user_id: &str) -> Vec<Vaccination> {
        self.vaccinations
            .entry(user_id.to_string())
            .or_insert_with(|| self.vaccination_template.clone())
            .clone()
    }

    pub fn set_injected(&mut self, user_id: &str, id: i64, injected: bool) -> DevStoreResult<()> {
        let shots = self
            .vaccinations
            .entry(user_id.to_string())
            .or_insert_with(|| self.vaccination_template.clone());
        let shot = shots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(DevStoreError::VaccinationNotFound)?;
        shot.is_injected = injected;
        Ok(())
    }

    pub fn daily_activities(&self, user_id: &str, date: &str) -> Vec<ActivityRecord> {
        self.activities
            .get(&(user_id.to_string(), date.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    /// Upserts one activity by title and returns the day's completion percentage.
    pub fn save_activity(&mut self, form: &SaveActivityForm) -> u32 {
        let key = (form.user_id.clone(), form.activity_date.clone());
        let day = self.activities.entry(key).or_default();
        let record = ActivityRecord {
            activity_title: form.activity_title.clone(),
            description: form.description.clone(),
            is_done: form.is_done != 0,
        };
        match day
            .iter_mut()
            .find(|r| r.activity_title == form.activity_title)
        {
            Some(existing) => *existing = record,
            None => day.push(record),
        }
        self.completion(&form.user_id, &form.activity_date)
    }

    pub fn completion(&self, user_id: &str, date: &str) -> u32 {
        let done = self
            .daily_activities(user_id, date)
            .iter()
            .filter(|r| r.is_done)
            .count() as u32;
        (done.min(DAILY_ACTIVITY_COUNT) * 100) / DAILY_ACTIVITY_COUNT
    }

    /// Which day of the programme `date` is: the number of recorded days up to and including
    /// it, counting `date` itself even if nothing was recorded yet.
    pub fn day_index(&self, user_id: &str, date: &str) -> i64 {
        let days: BTreeSet<&str> = self
            .activities
            .keys()
            .filter(|(user, _)| user == user_id)
            .map(|(_, day)| day.as_str())
            .filter(|day| *day < date)
            .collect();
        days.len() as i64 + 1
    }

    pub fn questions(&self) -> Vec<BirthPlanQuestion> {
        self.questions.clone()
    }

    pub fn save_selection(&mut self, selection: &BirthPlanSelection) -> DevStoreResult<()> {
        let known = self
            .questions
            .iter()
            .find(|q| q.id == selection.question_id)
            .and_then(|q| q.option(&selection.option_id))
            .is_some();
        if !known {
            return Err(DevStoreError::OptionNotFound);
        }
        self.selections.insert(
            (
                selection.user_id.clone(),
                selection.question_id.clone(),
                selection.option_id.clone(),
            ),
            selection.is_selected,
        );
        Ok(())
    }

    pub fn selection(&self, user_id: &str, question_id: &str, option_id: &str) -> Option<bool> {
        self.selections
            .get(&(
                user_id.to_string(),
                question_id.to_string(),
                option_id.to_string(),
            ))
            .copied()
    }

    pub fn messages(&self, user_id: &str) -> Vec<ChatMessage> {
        self.messages.get(user_id).cloned().unwrap_or_default()
    }

    pub fn send_message(&mut self, user_id: &str, sender: &str, message: &str) {
        self.messages
            .entry(user_id.to_string())
            .or_default()
            .push(ChatMessage {
                message: message.to_string(),
                sender: sender.to_string(),
                time: now(),
            });
    }

    pub fn crisis_weeks(&self, user_id: &str) -> Vec<CrisisWeek> {
        let user = user_id.parse::<i64>().ok();
        self.crisis_template
            .iter()
            .cloned()
            .map(|week| CrisisWeek {
                user_id: user,
                ..week
            })
            .collect()
    }

    pub fn food_posts(&self) -> Vec<FoodPost> {
        self.food_posts.clone()
    }

    pub fn products(&self) -> Vec<ReferenceProduct> {
        self.products.clone()
    }

    pub fn vitamins(&self) -> Vec<Vitamin> {
        self.vitamins.clone()
    }
}

fn question(id: &str, title: &str, options: &[(&str, &str)]) -> BirthPlanQuestion {
    BirthPlanQuestion {
        id: id.into(),
        title: title.into(),
        options: options
            .iter()
            .map(|(id, text)| BirthPlanOption {
                id: (*id).into(),
                text: (*text).into(),
                is_selected: false,
            })
            .collect(),
    }
}

fn visit_from_form(visit_id: String, form: &VisitForm) -> Visit {
    Visit {
        visit_id,
        user_id: form.user_id.clone(),
        visit_date: form.visit_date.clone(),
        doctor_name: form.doctor_name.clone(),
        gestational_age: form.gestational_age.clone(),
        weight: form.weight.clone(),
        blood_pressure: form.blood_pressure.clone(),
        fetal_heart_rate: form.fetal_heart_rate.clone(),
        notes: form.notes.clone(),
    }
}
