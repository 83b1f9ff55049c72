use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::screening::validation::is_well_formed_email;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub completion_model: String,
    pub sendgrid_api_key: String,
    pub sendgrid_base_url: String,
    pub from_email: String,
    pub from_name: String,
    pub recruiter_email: String,
    pub upload_dir: String,
    pub requirements_profile_path: Option<String>,
    /// Bearer token for the operator view. Without it the view answers 401.
    pub operator_token: Option<String>,
    pub completion_timeout: Duration,
    pub email_timeout: Duration,
    pub extraction_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

/// Settings handed to the completion client at construction time.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

/// Settings handed to the mail notifier at construction time.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_key: String,
    pub base_url: String,
    pub from_email: String,
    pub from_name: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            database_url: require_env("DATABASE_URL")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            completion_model: env_or("COMPLETION_MODEL", "gpt-4"),
            sendgrid_api_key: require_env("SENDGRID_API_KEY")?,
            sendgrid_base_url: env_or("SENDGRID_BASE_URL", "https://api.sendgrid.com/v3"),
            from_email: require_env("FROM_EMAIL")?,
            from_name: env_or("MAIL_FROM_NAME", "Recruitment Team"),
            recruiter_email: require_env("RECRUITER_EMAIL")?,
            upload_dir: env_or("UPLOAD_DIR", "media"),
            requirements_profile_path: std::env::var("REQUIREMENTS_PROFILE_PATH").ok(),
            operator_token: std::env::var("OPERATOR_TOKEN").ok(),
            completion_timeout: seconds_env("COMPLETION_TIMEOUT_SECS", 120)?,
            email_timeout: seconds_env("EMAIL_TIMEOUT_SECS", 30)?,
            extraction_timeout: seconds_env("EXTRACTION_TIMEOUT_SECS", 30)?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that would only fail later, on the first screening.
    pub fn validate(&self) -> Result<()> {
        if !is_well_formed_email(&self.from_email) {
            bail!("FROM_EMAIL '{}' is not a valid email address", self.from_email);
        }
        if !is_well_formed_email(&self.recruiter_email) {
            bail!(
                "RECRUITER_EMAIL '{}' is not a valid email address",
                self.recruiter_email
            );
        }
        if self
            .operator_token
            .as_deref()
            .is_some_and(|token| token.trim().is_empty())
        {
            bail!("OPERATOR_TOKEN must not be empty when set");
        }
        for (key, timeout) in [
            ("COMPLETION_TIMEOUT_SECS", self.completion_timeout),
            ("EMAIL_TIMEOUT_SECS", self.email_timeout),
            ("EXTRACTION_TIMEOUT_SECS", self.extraction_timeout),
        ] {
            if timeout.is_zero() {
                bail!("{key} must be greater than zero");
            }
        }
        Ok(())
    }

    pub fn completion(&self) -> CompletionConfig {
        CompletionConfig {
            api_key: self.openai_api_key.clone(),
            base_url: self.openai_base_url.clone(),
            model: self.completion_model.clone(),
            timeout: self.completion_timeout,
        }
    }

    pub fn mail(&self) -> MailConfig {
        MailConfig {
            api_key: self.sendgrid_api_key.clone(),
            base_url: self.sendgrid_base_url.clone(),
            from_email: self.from_email.clone(),
            from_name: self.from_name.clone(),
            timeout: self.email_timeout,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn seconds_env(key: &str, default: u64) -> Result<Duration> {
    let secs = match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("{key} must be a whole number of seconds"))?,
        Err(_) => default,
    };
    Ok(Duration::from_secs(secs))
}
