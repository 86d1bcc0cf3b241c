mod env;
mod global_state;
mod middleware;
mod response;
mod routes;
mod utils;

pub use routes::{
    app_router,
    chat_routes,
    consciousness_routes,
    misc_routes,
    not_found,
};

pub use env::{ApiServerEnv, RunMode};
pub use global_state::GlobalState;
pub use utils::setup_tracing;
pub use middleware::{identify, UserId};
pub use response::{AppError, AppSuccess};
