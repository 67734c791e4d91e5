mod render;

use clap::{Parser, Subcommand};
use momcare_core::config::{
    base_url_from_env_value, data_dir_from_env_value, flag_from_env_value, timeout_from_env_value,
};
use momcare_core::constants::RETRY_LABEL;
use momcare_core::presentation::{item_view, list_view, View};
use momcare_core::screens::{
    ActivitiesScreen, BirthPlanScreen, ChatScreen, ContentScreen, CrisisWeekSource,
    FoodPostSource, GrowthScreen, LoginScreen, PregnancyScreen, ReferenceProductSource,
    RegisterScreen, VaccinationsScreen, VisitsScreen, VitaminSource,
};
use momcare_core::services::{
    ActivityService, AuthService, BirthPlanService, ChatService, ContentService, GrowthService,
    VaccinationService, VisitService,
};
use momcare_core::state::{ListSource, RemoteState};
use momcare_core::validation::{GrowthRecordDraft, RegisterDraft, SummaryDraft, VisitDraft};
use momcare_core::{open_local_store, ApiClient, ClientConfig, ClientResult};
use momcare_types::{IsoDate, UserId};
use render::*;
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "momcare")]
#[command(about = "MomCare pregnancy tracker CLI")]
struct Cli {
    /// Signed-in user id
    #[arg(long, global = true, default_value = "1")]
    user: UserId,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the backend's health endpoint
    Health,
    /// Sign in
    Login { username: String, password: String },
    /// Create an account
    Register {
        username: String,
        password: String,
        confirm_password: String,
        /// Full name
        name: String,
        #[arg(long, default_value = "")]
        email: String,
    },
    /// List antenatal visits
    Visits,
    /// Add a visit, or update one with --id
    VisitSave {
        #[arg(long)]
        date: String,
        #[arg(long)]
        doctor: String,
        /// Gestational age in weeks
        #[arg(long)]
        week: String,
        #[arg(long)]
        weight: String,
        #[arg(long)]
        blood_pressure: String,
        #[arg(long)]
        heart_rate: String,
        #[arg(long, default_value = "")]
        notes: String,
        /// Visit to update
        #[arg(long)]
        id: Option<String>,
    },
    /// Delete a visit
    VisitDelete { id: String },
    /// Week-by-week growth information
    Growth {
        /// Show a single week
        #[arg(long)]
        week: Option<u32>,
    },
    /// Add a weekly growth record
    GrowthAdd {
        week: String,
        weight: String,
        length: String,
        due_date: String,
    },
    /// Pregnancy summary and progress
    Pregnancy,
    /// Update the pregnancy summary
    PregnancyUpdate {
        week: String,
        length: String,
        weight: String,
        due_date: String,
    },
    /// Vaccination schedule
    Vaccinations,
    /// Mark a vaccination as given
    Vaccinate {
        id: i64,
        /// Mark as not given
        #[arg(long)]
        undo: bool,
    },
    /// Today's prenatal-education checklist
    Activities {
        /// Day to show (YYYY-MM-DD), today by default
        #[arg(long)]
        date: Option<IsoDate>,
    },
    /// Tick an activity
    ActivityDone {
        title: String,
        #[arg(long)]
        date: Option<IsoDate>,
        #[arg(long)]
        undo: bool,
    },
    /// Birth plan questions
    BirthPlan,
    /// Select a birth plan option
    BirthPlanSelect {
        question: String,
        option: String,
        #[arg(long)]
        undo: bool,
    },
    /// Conversation with the care provider
    Chat,
    /// Send a message to the care provider
    ChatSend { message: String },
    /// Crisis weeks
    CrisisWeeks,
    /// Nutrition posts
    Food,
    /// Reference products
    Products,
    /// Vitamin guide
    Vitamins,
}

/// Resolve the client configuration once, from the environment.
///
/// # Environment Variables
/// - `MOMCARE_BASE_URL`: backend base URL (default: the local development backend)
/// - `MOMCARE_TIMEOUT_SECS`: global request timeout (default: 30)
/// - `MOMCARE_DATA_DIR`: directory of the local store (default: `.momcare`)
/// - `MOMCARE_LOG_BODIES`: trace request and response bodies when set to `1`
fn client_config() -> anyhow::Result<ClientConfig> {
    let base_url = base_url_from_env_value(std::env::var("MOMCARE_BASE_URL").ok());
    let timeout = timeout_from_env_value(std::env::var("MOMCARE_TIMEOUT_SECS").ok())?;
    let log_bodies = flag_from_env_value(std::env::var("MOMCARE_LOG_BODIES").ok());
    let data_dir = data_dir_from_env_value(std::env::var("MOMCARE_DATA_DIR").ok());
    Ok(ClientConfig::new(&base_url, timeout, log_bodies, data_dir)?)
}

async fn ask_retry() -> anyhow::Result<bool> {
    let answer = tokio::task::spawn_blocking(|| -> std::io::Result<String> {
        print!("{RETRY_LABEL}? (y/n) ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        Ok(line)
    })
    .await??;
    Ok(matches!(answer.trim(), "y" | "Y" | "c" | "C"))
}

/// Reload once and render; on failure offer the manual retry until it works or is declined.
async fn load<F, Fut>(mut reload: F, render: impl Fn() -> View) -> anyhow::Result<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ClientResult<()>>,
{
    loop {
        let result = reload().await;
        print_view(&render());
        match result {
            Ok(()) => return Ok(true),
            Err(e) => {
                tracing::debug!(error = %e, "reload failed");
                if !ask_retry().await? {
                    return Ok(false);
                }
            }
        }
    }
}

fn report<T>(result: ClientResult<T>, success: impl FnOnce(T) -> String) {
    match result {
        Ok(value) => println!("{}", success(value)),
        Err(e) => eprintln!("{}", e.user_message()),
    }
}

async fn show_content<S: ListSource>(
    screen: ContentScreen<S>,
    empty: &str,
    line: impl Fn(&S::Item) -> String,
) -> anyhow::Result<()> {
    load(
        || screen.reload(),
        || list_view(&screen.list().current(), empty, &line),
    )
    .await?;
    Ok(())
}

fn today() -> IsoDate {
    IsoDate::from_naive(chrono::Local::now().date_naive())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("momcare_cli=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = client_config()?;
    let client = ApiClient::new(&config)?;
    let user = cli.user;

    match cli.command {
        Some(Commands::Health) => report(client.health().await, |h| h.message),
        Some(Commands::Login { username, password }) => {
            let screen = LoginScreen::new(AuthService::new(client));
            report(screen.login(&username, &password).await, |s| {
                format!("Xin chào {} (id {})", s.display_name, s.user_id)
            });
        }
        Some(Commands::Register {
            username,
            password,
            confirm_password,
            name,
            email,
        }) => {
            let screen = RegisterScreen::new(AuthService::new(client));
            let draft = RegisterDraft {
                username,
                password,
                confirm_password,
                name,
                email,
            };
            report(screen.register(&draft).await, |e| e.message);
        }
        Some(Commands::Visits) => {
            let screen = VisitsScreen::new(VisitService::new(client), user);
            load(
                || screen.reload(),
                || list_view(&screen.visits().current(), "Chưa có lần khám nào", visit_line),
            )
            .await?;
        }
        Some(Commands::VisitSave {
            date,
            doctor,
            week,
            weight,
            blood_pressure,
            heart_rate,
            notes,
            id,
        }) => {
            let screen = VisitsScreen::new(VisitService::new(client), user);
            let draft = VisitDraft {
                visit_date: date,
                doctor_name: doctor,
                gestational_age: week,
                weight,
                blood_pressure,
                fetal_heart_rate: heart_rate,
                notes,
            };
            report(screen.save(&draft, id.as_deref()).await, |e| e.message);
            print_view(&list_view(
                &screen.visits().current(),
                "Chưa có lần khám nào",
                visit_line,
            ));
        }
        Some(Commands::VisitDelete { id }) => {
            let screen = VisitsScreen::new(VisitService::new(client), user);
            report(screen.delete(&id).await, |e| e.message);
        }
        Some(Commands::Growth { week }) => {
            let screen = GrowthScreen::new(GrowthService::new(client), user);
            let loaded = load(
                || screen.reload(),
                || {
                    let view =
                        list_view(&screen.records().current(), "Chưa có dữ liệu", growth_line);
                    match (week, view) {
                        // A single week is printed on its own below.
                        (Some(_), View::Items(_) | View::Empty(_)) => View::Pending,
                        (_, view) => view,
                    }
                },
            )
            .await?;
            if let (true, Some(week)) = (loaded, week) {
                match screen.record_for_week(week) {
                    Some(record) => {
                        println!("{}", growth_line(&record));
                        if let Some(url) = screen.image_url(&record) {
                            println!("{url}");
                        }
                    }
                    None => println!("Chưa có dữ liệu cho tuần {week}"),
                }
            }
        }
        Some(Commands::GrowthAdd {
            week,
            weight,
            length,
            due_date,
        }) => {
            let screen = PregnancyScreen::new(GrowthService::new(client), user);
            let draft = GrowthRecordDraft {
                week,
                weight,
                length,
                due_date,
            };
            report(screen.add_record(&draft).await, |_| {
                momcare_core::screens::pregnancy::MSG_RECORD_ADDED.to_string()
            });
        }
        Some(Commands::Pregnancy) => {
            let screen = PregnancyScreen::new(GrowthService::new(client), user);
            load(
                || screen.reload(),
                || {
                    item_view(&screen.summary().current(), |summary| {
                        summary_lines(summary, &screen.progress())
                    })
                },
            )
            .await?;
        }
        Some(Commands::PregnancyUpdate {
            week,
            length,
            weight,
            due_date,
        }) => {
            let screen = PregnancyScreen::new(GrowthService::new(client), user);
            let draft = SummaryDraft {
                week,
                length,
                weight,
                due_date,
            };
            report(screen.update(&draft).await, |_| {
                momcare_core::screens::pregnancy::MSG_SUMMARY_SAVED.to_string()
            });
        }
        Some(Commands::Vaccinations) => {
            let screen = VaccinationsScreen::new(VaccinationService::new(client), user);
            load(
                || screen.reload(),
                || list_view(&screen.shots().current(), "Chưa có lịch tiêm", vaccination_line),
            )
            .await?;
        }
        Some(Commands::Vaccinate { id, undo }) => {
            let screen = VaccinationsScreen::new(VaccinationService::new(client), user);
            let render =
                || list_view(&screen.shots().current(), "Chưa có lịch tiêm", vaccination_line);
            if load(|| screen.reload(), &render).await? {
                report(screen.set_injected(id, !undo).await, |_| {
                    momcare_core::screens::vaccinations::MSG_VACCINATION_SAVED.to_string()
                });
                print_view(&render());
            }
        }
        Some(Commands::Activities { date }) => {
            let store = Arc::new(open_local_store(&config)?);
            let screen = ActivitiesScreen::new(
                ActivityService::new(client),
                store,
                user,
                date.unwrap_or_else(today),
            );
            let loaded = load(|| screen.reload(), || activities_view(&screen)).await?;
            if !loaded {
                if let Some(cached) = screen.cached() {
                    println!("Dữ liệu đã lưu trên máy:");
                    for activity in &cached {
                        println!("• {}", activity_line(activity));
                    }
                }
            }
        }
        Some(Commands::ActivityDone { title, date, undo }) => {
            let store = Arc::new(open_local_store(&config)?);
            let screen = ActivitiesScreen::new(
                ActivityService::new(client),
                store,
                user,
                date.unwrap_or_else(today),
            );
            if load(|| screen.reload(), || activities_view(&screen)).await? {
                report(screen.set_done(&title, !undo).await, |percent| {
                    format!("Hoàn thành {percent}%")
                });
                print_view(&activities_view(&screen));
            }
        }
        Some(Commands::BirthPlan) => {
            let screen = BirthPlanScreen::new(BirthPlanService::new(client), user);
            load(
                || screen.reload(),
                || list_view(&screen.questions().current(), "Chưa có câu hỏi", birth_plan_line),
            )
            .await?;
        }
        Some(Commands::BirthPlanSelect {
            question,
            option,
            undo,
        }) => {
            let screen = BirthPlanScreen::new(BirthPlanService::new(client), user);
            let render =
                || list_view(&screen.questions().current(), "Chưa có câu hỏi", birth_plan_line);
            if load(|| screen.reload(), &render).await? {
                report(screen.select(&question, &option, !undo).await, |e| e.message);
                print_view(&render());
            }
        }
        Some(Commands::Chat) => {
            let screen = ChatScreen::new(ChatService::new(client), user);
            load(
                || screen.reload(),
                || list_view(&screen.messages().current(), "Chưa có tin nhắn", chat_line),
            )
            .await?;
        }
        Some(Commands::ChatSend { message }) => {
            let screen = ChatScreen::new(ChatService::new(client), user);
            report(screen.send(&message).await, |e| e.message);
            print_view(&list_view(
                &screen.messages().current(),
                "Chưa có tin nhắn",
                chat_line,
            ));
        }
        Some(Commands::CrisisWeeks) => {
            let screen = ContentScreen::new(CrisisWeekSource(ContentService::new(client)), user);
            show_content(screen, "Chưa có dữ liệu", crisis_week_line).await?;
        }
        Some(Commands::Food) => {
            let screen = ContentScreen::new(FoodPostSource(ContentService::new(client)), user);
            show_content(screen, "Chưa có bài viết", food_line).await?;
        }
        Some(Commands::Products) => {
            let screen =
                ContentScreen::new(ReferenceProductSource(ContentService::new(client)), user);
            show_content(screen, "Chưa có sản phẩm", product_line).await?;
        }
        Some(Commands::Vitamins) => {
            let screen = ContentScreen::new(VitaminSource(ContentService::new(client)), user);
            show_content(screen, "Chưa có dữ liệu", vitamin_line).await?;
        }
        None => {
            for row in home_menu_lines() {
                println!("{row}");
            }
            println!("Use 'momcare --help' for commands");
        }
    }

    Ok(())
}

fn activities_view(screen: &ActivitiesScreen) -> View {
    let mut view = list_view(&screen.activities().current(), "", activity_line);
    if let (View::Items(lines), RemoteState::Loaded(progress)) =
        (&mut view, screen.progress().current())
    {
        lines.insert(0, progress_line(&progress));
    }
    view
}
