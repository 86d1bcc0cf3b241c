use anyhow::{anyhow, Result};

pub trait EnvVars: Sized {
    fn load() -> Result<Self>;
}

/// Reads an environment variable, treating an empty value as unset.
pub fn optional_env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn required_env_var(key: &str) -> Result<String> {
    optional_env_var(key).ok_or_else(|| anyhow!("{} is not set", key))
}
