mod client;
mod env;

pub use client::ModuleClient;
pub use env::{EnvVars, optional_env_var, required_env_var};

use chrono::{DateTime, SecondsFormat, Utc};

pub fn get_current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// RFC 3339 rendering with fixed microsecond precision, so timestamps sort
/// lexicographically in the same order as chronologically.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}
