use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/centime.toml";
const DEFAULT_SESSION_PATH: &str = "config/session.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub email: String,
    pub session_path: String,
    /// Re-verify a persisted token (expiry claim + server round trip) before
    /// trusting it. Turning this off trusts any stored token+user as-is.
    pub verify_session: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            email: String::new(),
            session_path: DEFAULT_SESSION_PATH.to_string(),
            verify_session: true,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "centime_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the login email prefill (password is never read from CLI).
    #[arg(long)]
    email: Option<String>,
    /// Override the session file path.
    #[arg(long)]
    session_path: Option<String>,
    /// Trust a persisted session without re-verifying the token.
    #[arg(long)]
    no_verify_session: bool,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("CENTIME_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(email) = args.email {
        settings.email = email;
    }
    if let Some(session_path) = args.session_path {
        settings.session_path = session_path;
    }
    if args.no_verify_session {
        settings.verify_session = false;
    }

    Ok(settings)
}
