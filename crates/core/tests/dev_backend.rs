//! Screens driven end to end against the in-memory development backend.

use api_rest::{AppState, DevStore};
use momcare_core::screens::{
    ActivitiesScreen, BirthPlanScreen, ChatScreen, ContentScreen, GrowthScreen, LoginScreen,
    PregnancyScreen, VaccinationsScreen, VisitsScreen, VitaminSource,
};
use momcare_core::services::{
    ActivityService, AuthService, BirthPlanService, ChatService, ContentService, GrowthService,
    VaccinationService, VisitService,
};
use momcare_core::state::RemoteState;
use momcare_core::validation::{GrowthRecordDraft, VisitDraft};
use momcare_core::{ApiClient, ClientConfig, ClientError, ErrorKind, LocalStore};
use momcare_types::{IsoDate, UserId};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

async fn start_backend() -> (AppState, SocketAddr) {
    serve_on("127.0.0.1:0".parse().unwrap()).await
}

async fn serve_on(addr: SocketAddr) -> (AppState, SocketAddr) {
    let state = AppState::new(DevStore::seeded());
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let served = state.clone();
    tokio::spawn(async move {
        let _ = api_rest::serve(listener, served).await;
    });
    (state, addr)
}

fn client_for(addr: SocketAddr) -> ApiClient {
    let config = ClientConfig::new(
        &format!("http://{addr}/mevabe_api/"),
        Duration::from_secs(5),
        false,
        std::env::temp_dir(),
    )
    .unwrap();
    ApiClient::new(&config).unwrap()
}

fn user() -> UserId {
    UserId::new("42").unwrap()
}

fn visit_draft() -> VisitDraft {
    VisitDraft {
        visit_date: "2025-05-01".into(),
        doctor_name: "BS. Hà".into(),
        gestational_age: "20".into(),
        weight: "55".into(),
        blood_pressure: "110/70".into(),
        fetal_heart_rate: "140".into(),
        notes: String::new(),
    }
}

#[tokio::test]
async fn test_health_probe() {
    let (_state, addr) = start_backend().await;
    let health = client_for(addr).health().await.unwrap();
    assert!(health.ok);
}

#[tokio::test]
async fn test_vaccinations_load() {
    let (_state, addr) = start_backend().await;
    let screen = VaccinationsScreen::new(VaccinationService::new(client_for(addr)), user());

    screen.reload().await.unwrap();

    let shots = screen.shots().state().loaded().unwrap();
    assert_eq!(shots.len(), 3);
    assert!(shots.iter().all(|s| !s.is_injected));
}

#[tokio::test]
async fn test_unreachable_backend_fails_then_retry_succeeds() {
    // Reserve a port, then free it so nothing is listening there.
    let probe = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = probe.local_addr().unwrap();
    drop(probe);

    let screen = VaccinationsScreen::new(VaccinationService::new(client_for(addr)), user());
    let err = screen.reload().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    match screen.shots().current() {
        RemoteState::Failed(failure) => assert_eq!(failure.kind, ErrorKind::Network),
        other => panic!("expected Failed, got {other:?}"),
    }

    // Bring the backend up where the screen was pointed, then retry on the same screen.
    let (_state, live) = serve_on(addr).await;
    assert_eq!(live, addr);
    let states = screen.shots().subscribe();
    screen.reload().await.unwrap();

    assert!(states.has_changed().unwrap());
    assert_eq!(screen.shots().state().loaded().unwrap().len(), 3);
    assert!(screen.shots().current().failure().is_none());
}

#[tokio::test]
async fn test_refused_vaccination_toggle_rolls_back() {
    let (state, addr) = start_backend().await;
    let screen = VaccinationsScreen::new(VaccinationService::new(client_for(addr)), user());
    screen.reload().await.unwrap();
    let id = screen.shots().state().loaded().unwrap()[0].id;

    state.set_reject_mutations(true);
    let err = screen.set_injected(id, true).await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected(_)));

    let shots = screen.shots().state().loaded().unwrap();
    assert!(!shots.iter().find(|s| s.id == id).unwrap().is_injected);
    assert!(!state.lock().vaccinations("42")[0].is_injected);

    state.set_reject_mutations(false);
    screen.set_injected(id, true).await.unwrap();
    let shots = screen.shots().state().loaded().unwrap();
    assert!(shots.iter().find(|s| s.id == id).unwrap().is_injected);
}

#[tokio::test]
async fn test_saving_twice_creates_two_visits() {
    let (_state, addr) = start_backend().await;
    let screen = VisitsScreen::new(VisitService::new(client_for(addr)), user());

    let draft = visit_draft();
    let (first, second) = tokio::join!(screen.save(&draft, None), screen.save(&draft, None));
    first.unwrap();
    second.unwrap();
    screen.reload().await.unwrap();

    let visits = screen.visits().state().loaded().unwrap();
    assert_eq!(visits.len(), 2);
    assert_ne!(visits[0].visit_id, visits[1].visit_id);
}

#[tokio::test]
async fn test_visit_update_and_delete() {
    let (_state, addr) = start_backend().await;
    let screen = VisitsScreen::new(VisitService::new(client_for(addr)), user());
    screen.save(&visit_draft(), None).await.unwrap();
    let id = screen.visits().state().loaded().unwrap()[0].visit_id.clone();

    let mut edited = visit_draft();
    edited.weight = "56".into();
    screen.save(&edited, Some(&id)).await.unwrap();
    assert_eq!(screen.visits().state().loaded().unwrap()[0].weight, "56");

    screen.delete(&id).await.unwrap();
    assert!(screen.visits().state().loaded().unwrap().is_empty());
}

#[tokio::test]
async fn test_added_growth_record_shows_up_by_week() {
    let (_state, addr) = start_backend().await;
    let client = client_for(addr);
    let pregnancy = PregnancyScreen::new(GrowthService::new(client.clone()), user());
    let growth = GrowthScreen::new(GrowthService::new(client), user());

    pregnancy
        .add_record(&GrowthRecordDraft {
            week: "12".into(),
            weight: "0.014".into(),
            length: "5.4".into(),
            due_date: "2025-11-20".into(),
        })
        .await
        .unwrap();
    growth.reload().await.unwrap();

    let record = growth.record_for_week(12).unwrap();
    assert_eq!(record.length, Some(5.4));
    assert!(growth
        .image_url(&record)
        .unwrap()
        .ends_with("/mevabe_api/images/week_12.png"));
    assert!(growth.record_for_week(13).is_none());
}

#[tokio::test]
async fn test_demo_login() {
    let (_state, addr) = start_backend().await;
    let screen = LoginScreen::new(AuthService::new(client_for(addr)));

    let session = screen.login("demo", "123456").await.unwrap();
    assert_eq!(session.user_id.to_string(), "1");
    assert_eq!(session.display_name, "Lan Anh");

    let err = screen.login("demo", "sai").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Server);
}

#[tokio::test]
async fn test_activities_merge_and_tick() {
    let (_state, addr) = start_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(LocalStore::open(dir.path().join("app_pref.json")).unwrap());
    let date = IsoDate::parse("2025-05-01").unwrap();
    let screen = ActivitiesScreen::new(
        ActivityService::new(client_for(addr)),
        store.clone(),
        user(),
        date,
    );

    screen.reload().await.unwrap();
    let list = screen.activities().loaded().unwrap();
    assert_eq!(list.len(), 5);
    assert_eq!(screen.done_count(), 0);

    let title = list[0].title.clone();
    let percent = screen.set_done(&title, true).await.unwrap();
    assert_eq!(percent, 20);
    assert_eq!(screen.done_count(), 1);
    assert_eq!(
        screen.progress().loaded().unwrap().completion_percent,
        20
    );

    let cached = screen.cached().unwrap();
    assert!(cached.iter().find(|a| a.title == title).unwrap().done);

    let fresh = ActivitiesScreen::new(ActivityService::new(client_for(addr)), store, user(), date);
    fresh.reload().await.unwrap();
    assert_eq!(fresh.done_count(), 1);
    assert_eq!(fresh.progress().loaded().unwrap().day_index, 1);
}

#[tokio::test]
async fn test_tick_keeps_unloaded_progress_unloaded() {
    let (_state, addr) = start_backend().await;
    let screen = ActivitiesScreen::new(
        ActivityService::new(client_for(addr)),
        Arc::new(LocalStore::in_memory()),
        user(),
        IsoDate::parse("2025-05-02").unwrap(),
    );
    screen.reload().await.unwrap();
    screen.progress().publish(RemoteState::Idle);

    let title = screen.activities().loaded().unwrap()[1].title.clone();
    assert_eq!(screen.set_done(&title, true).await.unwrap(), 20);
    assert_eq!(screen.progress().current(), RemoteState::Idle);
}

#[tokio::test]
async fn test_birth_plan_selection_is_saved() {
    let (state, addr) = start_backend().await;
    let screen = BirthPlanScreen::new(BirthPlanService::new(client_for(addr)), user());
    screen.reload().await.unwrap();

    screen.select("q1", "q1o2", true).await.unwrap();

    let questions = screen.questions().loaded().unwrap();
    assert!(questions[0].option("q1o2").unwrap().is_selected);
    assert_eq!(state.lock().selection("42", "q1", "q1o2"), Some(true));

    let err = screen.select("q1", "q9o9", true).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(state.lock().selection("42", "q1", "q9o9"), None);

    state.set_reject_mutations(true);
    assert!(screen.select("q1", "q1o1", true).await.is_err());
    let questions = screen.questions().loaded().unwrap();
    assert!(!questions[0].option("q1o1").unwrap().is_selected);
}

#[tokio::test]
async fn test_chat_send_appends_message() {
    let (_state, addr) = start_backend().await;
    let screen = ChatScreen::new(ChatService::new(client_for(addr)), user());
    screen.reload().await.unwrap();
    assert!(screen.messages().state().loaded().unwrap().is_empty());

    screen.send("  Chào bác sĩ ").await.unwrap();

    let messages = screen.messages().state().loaded().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].message, "Chào bác sĩ");
    assert!(momcare_core::screens::chat::is_from_patient(&messages[0]));

    let err = screen.send("   ").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_vitamins_content_list() {
    let (_state, addr) = start_backend().await;
    let screen = ContentScreen::new(
        VitaminSource(ContentService::new(client_for(addr))),
        user(),
    );
    screen.reload().await.unwrap();
    assert_eq!(screen.list().state().loaded().unwrap().len(), 3);
}
