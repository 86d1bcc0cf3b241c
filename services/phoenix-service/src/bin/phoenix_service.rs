use anyhow::Result;

use phoenix_common::EnvVars;
use phoenix_service_api::{app_router, setup_tracing, ApiServerEnv, GlobalState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let env = ApiServerEnv::load()?;
    setup_tracing(env.mode);

    let global_state = GlobalState::new(&env).await?;
    let app = app_router(global_state, &env.static_dir);

    let addr = env.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("LISTENING ON {addr} ({:?})", env.mode);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
