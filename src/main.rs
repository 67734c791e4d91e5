use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, DevStore};

/// Main entry point for the MomCare development backend
///
/// Serves every client endpoint under `/mevabe_api/` from an in-memory store seeded with a
/// demo account (`demo` / `123456`) and sample content. Nothing is persisted between runs.
///
/// # Environment Variables
/// - `MOMCARE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `MOMCARE_REJECT_WRITES`: when `1`, every write answers with a failure envelope
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("momcare_run=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("MOMCARE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let reject_writes = matches!(
        std::env::var("MOMCARE_REJECT_WRITES").as_deref().map(str::trim),
        Ok("1" | "true")
    );

    tracing::info!("++ Starting MomCare REST on {}", rest_addr);

    let state = AppState::new(DevStore::seeded());
    if reject_writes {
        state.set_reject_mutations(true);
    }

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    api_rest::serve(listener, state).await?;

    Ok(())
}
