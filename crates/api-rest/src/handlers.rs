//! Request handlers, one per backend endpoint.
//!
//! Write handlers answer with the boolean-success envelope. When the failure switch in
//! [`AppState`] is on, every write is refused without touching the store.

use crate::store::DevStoreError;
use crate::AppState;
use api_shared::forms::{
    ActivityQuery, BirthPlanSelection, ChatQuery, DeleteVisitForm, GrowthRecordForm, LoginForm,
    PregnancySummaryForm, RegisterForm, SaveActivityForm, SendMessageForm, UserQuery,
    VaccinationQuery, VaccinationUpdateForm, VisitForm,
};
use api_shared::{
    ActivityRecord, BirthPlanQuestion, CompletionResponse, CrisisWeek, DayIndexResponse, Envelope,
    FoodPost, GrowthRecord, HealthRes, HealthService, LoginResponse, MessagesResponse,
    PregnancySummary, ReferenceProduct, Vaccination, Visit, Vitamin,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Form,
};

pub const MSG_REJECTED: &str = "Máy chủ từ chối yêu cầu";
const MSG_SAVED: &str = "Lưu thành công";

fn rejected() -> Json<Envelope> {
    Json(Envelope::failed(MSG_REJECTED))
}

fn outcome(result: Result<(), DevStoreError>, ok_message: &str) -> Json<Envelope> {
    match result {
        Ok(()) => Json(Envelope::ok(ok_message)),
        Err(e) => Json(Envelope::failed(e.to_string())),
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the development backend
///
/// # Returns
/// * `Json<HealthRes>` - Health status response containing service status
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/mevabe_api/login.php",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login outcome; `success=false` on bad credentials", body = LoginResponse)
    )
)]
/// Check credentials and return the user's id and display name.
#[axum::debug_handler]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Json<LoginResponse> {
    let store = state.lock();
    let response = match store.login(&form.username, &form.password) {
        Some(user) => LoginResponse {
            success: true,
            message: "Đăng nhập thành công".into(),
            name: Some(user.name.clone()),
            user_id: Some(user.id),
        },
        None => LoginResponse {
            success: false,
            message: "Sai tên đăng nhập hoặc mật khẩu".into(),
            name: None,
            user_id: None,
        },
    };
    tracing::info!(username = %form.username, success = response.success, "login");
    Json(response)
}

#[utoipa::path(
    post,
    path = "/mevabe_api/register.php",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Registration outcome", body = Envelope))
)]
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Json<Envelope> {
    if state.rejecting() {
        return rejected();
    }
    let result = state.lock().register(&form).map(|id| {
        tracing::info!(user_id = id, "registered user");
    });
    outcome(result, "Đăng ký thành công")
}

#[utoipa::path(
    get,
    path = "/mevabe_api/so_kham_thai_get.php",
    responses((status = 200, description = "The user's visits", body = [Visit]))
)]
pub async fn list_visits(State(state): State<AppState>, Query(q): Query<UserQuery>) -> Json<Vec<Visit>> {
    Json(state.lock().visits(&q.user_id))
}

#[utoipa::path(
    post,
    path = "/mevabe_api/so_kham_thai_add.php",
    request_body(content = VisitForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Creation outcome", body = Envelope))
)]
/// Create a visit. The visit id is issued here; any id in the form is ignored.
pub async fn add_visit(State(state): State<AppState>, Form(form): Form<VisitForm>) -> Json<Envelope> {
    if state.rejecting() {
        return rejected();
    }
    let visit_id = state.lock().add_visit(&form);
    tracing::debug!(%visit_id, user_id = %form.user_id, "visit added");
    Json(Envelope::ok("Thêm thành công"))
}

#[utoipa::path(
    post,
    path = "/mevabe_api/so_kham_thai_update.php",
    request_body(content = VisitForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Update outcome", body = Envelope))
)]
pub async fn update_visit(State(state): State<AppState>, Form(form): Form<VisitForm>) -> Json<Envelope> {
    if state.rejecting() {
        return rejected();
    }
    outcome(state.lock().update_visit(&form), "Cập nhật thành công")
}

#[utoipa::path(
    post,
    path = "/mevabe_api/so_kham_thai_delete.php",
    request_body(content = DeleteVisitForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Deletion outcome", body = Envelope))
)]
pub async fn delete_visit(
    State(state): State<AppState>,
    Form(form): Form<DeleteVisitForm>,
) -> Json<Envelope> {
    if state.rejecting() {
        return rejected();
    }
    outcome(
        state.lock().delete_visit(&form.user_id, &form.visit_id),
        "Xóa thành công",
    )
}

#[utoipa::path(
    get,
    path = "/mevabe_api/get_pregnancy_info.php",
    responses((status = 200, description = "The user's growth records", body = [GrowthRecord]))
)]
pub async fn list_growth(State(state): State<AppState>, Query(q): Query<UserQuery>) -> Json<Vec<GrowthRecord>> {
    Json(state.lock().growth_records(&q.user_id))
}

#[utoipa::path(
    post,
    path = "/mevabe_api/pregnancy_add.php",
    request_body(content = GrowthRecordForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Creation outcome", body = Envelope))
)]
pub async fn add_growth_record(
    State(state): State<AppState>,
    Form(form): Form<GrowthRecordForm>,
) -> Json<Envelope> {
    if state.rejecting() {
        return rejected();
    }
    state.lock().add_growth_record(&form);
    Json(Envelope::ok("Thêm dữ liệu thành công"))
}

#[utoipa::path(
    get,
    path = "/mevabe_api/get_pregnancy.php",
    responses((status = 200, description = "Current pregnancy summary", body = PregnancySummary))
)]
pub async fn get_summary(State(state): State<AppState>, Query(q): Query<UserQuery>) -> Json<PregnancySummary> {
    Json(state.lock().summary(&q.user_id))
}

#[utoipa::path(
    post,
    path = "/mevabe_api/save_pregnancy.php",
    request_body(content = PregnancySummaryForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Save outcome", body = Envelope))
)]
pub async fn save_summary(
    State(state): State<AppState>,
    Form(form): Form<PregnancySummaryForm>,
) -> Json<Envelope> {
    if state.rejecting() {
        return rejected();
    }
    state.lock().save_summary(&form);
    Json(Envelope::ok(MSG_SAVED))
}

#[utoipa::path(
    get,
    path = "/mevabe_api/getVaccinations.php",
    responses((status = 200, description = "The user's vaccination schedule", body = [Vaccination]))
)]
pub async fn list_vaccinations(
    State(state): State<AppState>,
    Query(q): Query<VaccinationQuery>,
) -> Json<Vec<Vaccination>> {
    Json(state.lock().vaccinations(&q.user_id))
}

#[utoipa::path(
    post,
    path = "/mevabe_api/updateVaccination.php",
    request_body(content = VaccinationUpdateForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Update outcome", body = Envelope))
)]
pub async fn update_vaccination(
    State(state): State<AppState>,
    Form(form): Form<VaccinationUpdateForm>,
) -> Json<Envelope> {
    if state.rejecting() {
        return rejected();
    }
    outcome(
        state
            .lock()
            .set_injected(&form.user_id, form.id, form.is_injected != 0),
        "Cập nhật thành công",
    )
}

#[utoipa::path(
    get,
    path = "/mevabe_api/get_daily_activities.php",
    responses((status = 200, description = "Activities recorded for the day; empty when none", body = [ActivityRecord]))
)]
pub async fn daily_activities(
    State(state): State<AppState>,
    Query(q): Query<ActivityQuery>,
) -> Json<Vec<ActivityRecord>> {
    Json(state.lock().daily_activities(&q.user_id, &q.activity_date))
}

#[utoipa::path(
    post,
    path = "/mevabe_api/save_activity.php",
    request_body(content = SaveActivityForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "The day's new completion percentage", body = CompletionResponse),
        (status = 400, description = "Unknown action", body = Envelope),
        (status = 503, description = "Writes are being refused", body = Envelope)
    )
)]
/// Upsert one activity for the day.
///
/// This endpoint answers with the completion percentage rather than an envelope, so a refusal
/// is signalled with an error status.
pub async fn save_activity(State(state): State<AppState>, Form(form): Form<SaveActivityForm>) -> Response {
    if state.rejecting() {
        return (StatusCode::SERVICE_UNAVAILABLE, rejected()).into_response();
    }
    if form.action != api_shared::endpoints::SAVE_ACTIVITY_ACTION {
        return (
            StatusCode::BAD_REQUEST,
            Json(Envelope::failed(format!("unknown action {:?}", form.action))),
        )
            .into_response();
    }
    let completion_percentage = state.lock().save_activity(&form);
    Json(CompletionResponse {
        completion_percentage,
    })
    .into_response()
}

#[utoipa::path(
    get,
    path = "/mevabe_api/get_completion.php",
    responses((status = 200, description = "Percentage of the day's activities done", body = CompletionResponse))
)]
pub async fn completion(
    State(state): State<AppState>,
    Query(q): Query<ActivityQuery>,
) -> Json<CompletionResponse> {
    let completion_percentage = state.lock().completion(&q.user_id, &q.activity_date);
    Json(CompletionResponse {
        completion_percentage,
    })
}

#[utoipa::path(
    get,
    path = "/mevabe_api/get_activity_day_index.php",
    responses((status = 200, description = "Day of the programme", body = DayIndexResponse))
)]
pub async fn day_index(
    State(state): State<AppState>,
    Query(q): Query<ActivityQuery>,
) -> Json<DayIndexResponse> {
    Json(DayIndexResponse {
        day_index: state.lock().day_index(&q.user_id, &q.activity_date),
    })
}

#[utoipa::path(
    get,
    path = "/mevabe_api/birth_plan_questions.php",
    responses((status = 200, description = "Birth plan questionnaire", body = [BirthPlanQuestion]))
)]
pub async fn birth_plan_questions(State(state): State<AppState>) -> Json<Vec<BirthPlanQuestion>> {
    Json(state.lock().questions())
}

#[utoipa::path(
    post,
    path = "/mevabe_api/save_birth_plan_selection.php",
    request_body = BirthPlanSelection,
    responses((status = 200, description = "Save outcome", body = Envelope))
)]
pub async fn save_birth_plan_selection(
    State(state): State<AppState>,
    Json(selection): Json<BirthPlanSelection>,
) -> Json<Envelope> {
    if state.rejecting() {
        return rejected();
    }
    outcome(state.lock().save_selection(&selection), MSG_SAVED)
}

#[utoipa::path(
    get,
    path = "/mevabe_api/get_messages.php",
    responses((status = 200, description = "Conversation with the care provider", body = MessagesResponse))
)]
pub async fn get_messages(State(state): State<AppState>, Query(q): Query<ChatQuery>) -> Json<MessagesResponse> {
    tracing::debug!(user_id = %q.user_id, doctor_id = q.doctor_id, "messages requested");
    Json(MessagesResponse {
        success: true,
        message: String::new(),
        messages: Some(state.lock().messages(&q.user_id)),
    })
}

#[utoipa::path(
    post,
    path = "/mevabe_api/send_message.php",
    request_body(content = SendMessageForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Send outcome", body = Envelope))
)]
pub async fn send_message(
    State(state): State<AppState>,
    Form(form): Form<SendMessageForm>,
) -> Json<Envelope> {
    if state.rejecting() {
        return rejected();
    }
    if form.message.trim().is_empty() {
        return Json(Envelope::failed("Tin nhắn trống"));
    }
    state
        .lock()
        .send_message(&form.user_id, &form.sender, &form.message);
    Json(Envelope::ok("Đã gửi"))
}

#[utoipa::path(
    get,
    path = "/mevabe_api/get_crisis_week_info.php",
    responses((status = 200, description = "Crisis week milestones", body = [CrisisWeek]))
)]
pub async fn crisis_weeks(State(state): State<AppState>, Query(q): Query<UserQuery>) -> Json<Vec<CrisisWeek>> {
    Json(state.lock().crisis_weeks(&q.user_id))
}

#[utoipa::path(
    get,
    path = "/mevabe_api/get_nutrition_posts.php",
    responses((status = 200, description = "Nutrition handbook", body = [FoodPost]))
)]
pub async fn food_posts(State(state): State<AppState>) -> Json<Vec<FoodPost>> {
    Json(state.lock().food_posts())
}

#[utoipa::path(
    get,
    path = "/mevabe_api/get_reference_product.php",
    responses((status = 200, description = "Reference products", body = [ReferenceProduct]))
)]
pub async fn reference_products(State(state): State<AppState>) -> Json<Vec<ReferenceProduct>> {
    Json(state.lock().products())
}

#[utoipa::path(
    get,
    path = "/mevabe_api/vitamins.php",
    responses((status = 200, description = "Vitamin supplements", body = [Vitamin]))
)]
pub async fn vitamins(State(state): State<AppState>) -> Json<Vec<Vitamin>> {
    Json(state.lock().vitamins())
}
