use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_STATIC_DIR: &str = "story-service/static";
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;
/// Story requests are five short strings; 64KB leaves ample room.
const DEFAULT_MAX_BODY_BYTES: usize = 65_536;

#[derive(Debug, Clone)]
pub struct StoryConfig {
    pub common: core_config::Config,
    pub http: HttpConfig,
    pub generation: GenerationConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Directory holding `index.html` and the landing page assets.
    pub static_dir: PathBuf,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub timeout_secs: u64,
}

impl GenerationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl StoryConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build the service settings from a key lookup, applying dev defaults.
    ///
    /// With `ENVIRONMENT=prod` every setting that has a default must be set
    /// explicitly.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").as_deref() == Some("prod");
        let get = |key: &str, default: &str| get_setting(&lookup, key, default, is_prod);

        let static_dir = PathBuf::from(get("STORY_STATIC_DIR", DEFAULT_STATIC_DIR)?);
        let timeout_secs = get(
            "STORY_GENERATION_TIMEOUT_SECS",
            &DEFAULT_GENERATION_TIMEOUT_SECS.to_string(),
        )?
        .parse()
        .unwrap_or(DEFAULT_GENERATION_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "STORY_GENERATION_TIMEOUT_SECS must be greater than zero"
            )));
        }

        Ok(StoryConfig {
            common,
            http: HttpConfig {
                static_dir,
                max_body_bytes: get(
                    "STORY_MAX_BODY_BYTES",
                    &DEFAULT_MAX_BODY_BYTES.to_string(),
                )?
                .parse()
                .unwrap_or(DEFAULT_MAX_BODY_BYTES),
            },
            generation: GenerationConfig { timeout_secs },
            observability: ObservabilityConfig {
                log_level: get("LOG_LEVEL", "info")?,
                otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|v| !v.is_empty()),
            },
        })
    }
}

fn get_setting<F>(lookup: &F, key: &str, default: &str, is_prod: bool) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    // Set-but-empty counts as unset
    match lookup(key).filter(|v| !v.is_empty()) {
        Some(val) => Ok(val),
        None if is_prod => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required in production but not set",
            key
        ))),
        None => Ok(default.to_string()),
    }
}
