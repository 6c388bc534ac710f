use std::env;
use std::time::Duration;

use auth::SessionSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub redis: Option<RedisConfig>,
    #[serde(default)]
    pub users: Vec<UserSeed>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_seconds: u64,
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    pub cookie_domain: Option<String>,
    #[serde(default)]
    pub cookie_secure: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default)]
    pub key_prefix: String,
}

/// Account loaded into the user directory at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct UserSeed {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Signing secret committed in `config/default.toml`; only acceptable in development.
pub const DEVELOPMENT_SECRET: &str = "change-me-development-secret-32-bytes-min";

const DEVELOPMENT_MODE: &str = "development";

fn default_store_timeout_ms() -> u64 {
    2000
}

fn default_cookie_name() -> String {
    auth::gate::DEFAULT_COOKIE_NAME.to_string()
}

impl SessionConfig {
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    pub fn settings(&self) -> SessionSettings {
        SessionSettings {
            token_ttl: self.token_ttl(),
            store_timeout: Duration::from_millis(self.store_timeout_ms),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SESSION__SECRET, REDIS__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// Outside the development run mode the committed placeholder secret is refused.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| DEVELOPMENT_MODE.to_string());

        Self::load_from(&run_mode, environment())
    }

    fn load_from(run_mode: &str, environment: Environment) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment)
            .build()?;

        let config: Self = configuration.try_deserialize()?;

        if run_mode != DEVELOPMENT_MODE && config.session.secret == DEVELOPMENT_SECRET {
            return Err(ConfigError::Message(format!(
                "session.secret is the development placeholder in run mode '{}'; set SESSION__SECRET",
                run_mode
            )));
        }

        Ok(config)
    }
}

/// Unprefixed variables, `__` between nesting levels.
/// Example: SESSION__TTL_SECONDS=3600 overrides session.ttl_seconds
fn environment() -> Environment {
    Environment::default().separator("__")
}
