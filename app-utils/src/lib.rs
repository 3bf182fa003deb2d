use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use libportal::session::{FileStorage, SessionStore};
use portal_api::client::DEFAULT_TIMEOUT;
use portal_api::{Client, ClientConfig, QuestionCounts};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, registry, EnvFilter};
use url::Url;

pub const DEFAULT_STATE_DIR: &str = ".exam-portal";

/// Everything a run of the portal client is configured with.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub timeout: Duration,
    pub question_counts: QuestionCounts,
    pub state_dir: PathBuf,
}

impl Config {
    /// Reads `PORTAL_API_URL` (required) and the optional `PORTAL_TIMEOUT_SECS`,
    /// `PORTAL_MCQ_NUM`, `PORTAL_TF_NUM` and `PORTAL_STATE_DIR`.
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("PORTAL_API_URL").context("PORTAL_API_URL must be set")?;
        let api_url = Url::parse(&api_url)
            .with_context(|| format!("PORTAL_API_URL is not a valid URL: {api_url:?}"))?;

        let timeout = optional_var("PORTAL_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        let defaults = QuestionCounts::default();
        let question_counts = QuestionCounts::new(
            optional_var("PORTAL_MCQ_NUM")?.unwrap_or(defaults.multiple_choice()),
            optional_var("PORTAL_TF_NUM")?.unwrap_or(defaults.true_false()),
        );

        let state_dir = env::var_os("PORTAL_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR));

        Ok(Self {
            api_url,
            timeout,
            question_counts,
            state_dir,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone())
            .with_timeout(self.timeout)
            .with_question_counts(self.question_counts)
    }
}

fn optional_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => {
            let parsed = value
                .trim()
                .parse()
                .with_context(|| format!("{name} has an invalid value: {value:?}"))?;
            Ok(Some(parsed))
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err).with_context(|| format!("could not read {name}")),
    }
}

pub struct InitFromEnv {
    pub config: Config,
    pub client: Client,
    pub sessions: SessionStore<FileStorage>,
}

/// Loads `.env` if there is one, then builds the portal client and restores the stored session.
pub fn init_from_env() -> Result<InitFromEnv> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err).context("could not load .env");
        }
    }

    let config = Config::from_env()?;
    debug!(?config, "loaded config");

    let client = Client::new(config.client_config()).context("could not build portal client")?;
    let sessions = SessionStore::open(FileStorage::in_dir(&config.state_dir));

    Ok(InitFromEnv {
        config,
        client,
        sessions,
    })
}

/// Logs go to stderr so they never mix with what the screens print.
pub fn init_tracing() {
    registry()
        .with(
            fmt::layer()
                .event_format(format().pretty())
                .with_writer(std::io::stderr),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
}
