use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use phoenix_common::{optional_env_var, EnvVars};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    Development,
    #[default]
    Production,
}

impl RunMode {
    pub fn is_development(&self) -> bool {
        matches!(self, RunMode::Development)
    }

    /// Development stays on loopback; production listens on every interface.
    pub fn bind_host(&self) -> IpAddr {
        match self {
            RunMode::Development => IpAddr::V4(Ipv4Addr::LOCALHOST),
            RunMode::Production => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        }
    }

    pub fn log_directive(&self) -> &'static str {
        match self {
            RunMode::Development => "debug",
            RunMode::Production => "info",
        }
    }
}

impl FromStr for RunMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" | "debug" => Ok(RunMode::Development),
            "production" | "prod" => Ok(RunMode::Production),
            other => Err(anyhow!("unknown PHOENIX_ENV value: {}", other)),
        }
    }
}

pub struct ApiServerEnv {
    pub mode: RunMode,
    pub port: u16,
    pub static_dir: PathBuf,
    /// Both SUPABASE_URL and SUPABASE_ANON_KEY are present.
    pub database_configured: bool,
}

impl ApiServerEnv {
    pub const DEFAULT_PORT: u16 = 5000;
    pub const DEFAULT_STATIC_DIR: &'static str = "static";

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.mode.bind_host(), self.port)
    }
}

impl EnvVars for ApiServerEnv {
    fn load() -> Result<Self> {
        let mode = optional_env_var("PHOENIX_ENV")
            .map(|value| value.parse::<RunMode>())
            .transpose()?
            .unwrap_or_default();

        let port = optional_env_var("PORT")
            .map(|value| value.parse::<u16>().with_context(|| format!("invalid PORT: {}", value)))
            .transpose()?
            .unwrap_or(Self::DEFAULT_PORT);

        Ok(Self {
            mode,
            port,
            static_dir: optional_env_var("STATIC_DIR")
                .unwrap_or_else(|| Self::DEFAULT_STATIC_DIR.to_string())
                .into(),
            database_configured: optional_env_var("SUPABASE_URL").is_some()
                && optional_env_var("SUPABASE_ANON_KEY").is_some(),
        })
    }
}
