use chrono::Duration;
use config::{Config, ConfigError, Environment, File, FileFormat};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{CONFIG_FILE_NAME, defaults, env};

/// Settings for the account service, layered from an optional JSON file and
/// `TASKAPP__`-prefixed environment variables (e.g. `TASKAPP__JWT__SECRET`).
#[derive(Debug, Clone, Deserialize)]
pub struct AccountSettings {
    pub jwt: JwtSettings,
    #[serde(default)]
    pub login: LoginSettings,
    #[serde(default)]
    pub argon2: Argon2Settings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    #[serde(default = "default_time_to_live")]
    pub time_to_live: i64,
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginSettings {
    #[serde(default = "default_lock_duration")]
    pub lock_duration_secs: i64,
}

impl LoginSettings {
    pub fn lock_duration(&self) -> Duration {
        Duration::seconds(self.lock_duration_secs)
    }
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            lock_duration_secs: defaults::LOCK_DURATION_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Argon2Settings {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for Argon2Settings {
    fn default() -> Self {
        Self {
            memory_kib: defaults::ARGON2_MEMORY_KIB,
            iterations: defaults::ARGON2_ITERATIONS,
            parallelism: defaults::ARGON2_PARALLELISM,
        }
    }
}

fn default_time_to_live() -> i64 {
    defaults::JWT_TIME_TO_LIVE_SECONDS
}

fn default_issuer() -> String {
    defaults::JWT_ISSUER.to_owned()
}

fn default_lock_duration() -> i64 {
    defaults::LOCK_DURATION_SECONDS
}

fn default_memory_kib() -> u32 {
    defaults::ARGON2_MEMORY_KIB
}

fn default_iterations() -> u32 {
    defaults::ARGON2_ITERATIONS
}

fn default_parallelism() -> u32 {
    defaults::ARGON2_PARALLELISM
}

impl AccountSettings {
    /// Loads settings after reading a `.env` file if one is present.
    ///
    /// The JSON file defaults to `taskapp.json` in the working directory and
    /// can be redirected with `TASKAPP_CONFIG_FILE`. A missing file is not an
    /// error, but a missing JWT secret is.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let file_name =
            std::env::var(env::CONFIG_FILE_ENV_VAR).unwrap_or_else(|_| CONFIG_FILE_NAME.to_owned());

        Self::from_sources(Some(&file_name), environment())
    }

    fn from_sources(
        file_name: Option<&str>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(file_name) = file_name {
            builder = builder.add_source(File::new(file_name, FileFormat::Json).required(false));
        }

        builder
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix(env::ENV_PREFIX)
        .prefix_separator(env::ENV_SEPARATOR)
        .separator(env::ENV_SEPARATOR)
        .try_parsing(true)
}
