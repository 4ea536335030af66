//! Environment configuration.
//!
//! Everything is read once at start-up (after loading `.env` if present) and
//! handed to `AppState`; nothing reads the environment per request.

use std::env;

use thiserror::Error;

pub const DEFAULT_SUPABASE_URL: &str = "https://urryrxlzyepwklzwwxwa.supabase.co";
pub const DEFAULT_SUPABASE_SCHEMA: &str = "dnawakes";
pub const DEFAULT_PLAN_TYPES: [&str; 3] = ["暴富方案一", "暴富方案二", "暴富方案三"];
pub const DEFAULT_WEBHOOK_URL: &str =
    "https://n8n-samson-lin-u44764.vm.elestio.app/webhook/send-isis-report-email";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable '{0}' is not set")]
    Missing(&'static str),
    #[error("environment variable '{name}' has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings for the Supabase project holding orders and logs.
#[derive(Clone)]
pub struct SupabaseConfig {
    pub supabase_url: String,
    pub service_role_key: String,
    /// Schema of the order and customer tables.
    pub schema: String,
    /// Plan labels that include a report.
    pub plan_types: Vec<String>,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("supabase_url", &self.supabase_url)
            .field("service_role_key", &"<redacted>")
            .field("schema", &self.schema)
            .field("plan_types", &self.plan_types)
            .finish()
    }
}

impl SupabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let service_role_key = env::var("SUPABASE_SERVICE_ROLE_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("SUPABASE_SERVICE_ROLE_KEY"))?;

        Ok(Self {
            supabase_url: env_or("SUPABASE_URL", DEFAULT_SUPABASE_URL)
                .trim_end_matches('/')
                .to_string(),
            service_role_key,
            schema: env_or("SUPABASE_SCHEMA", DEFAULT_SUPABASE_SCHEMA),
            plan_types: env::var("REPORT_PLAN_TYPES")
                .map(|raw| parse_list(&raw))
                .unwrap_or_else(|_| DEFAULT_PLAN_TYPES.iter().map(|p| p.to_string()).collect()),
        })
    }

    /// PostgREST endpoint of the project.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.supabase_url)
    }
}

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: String,
}

impl WebhookConfig {
    pub fn from_env() -> Self {
        Self {
            url: env_or("N8N_WEBHOOK_URL", DEFAULT_WEBHOOK_URL),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase: SupabaseConfig,
    pub webhook: WebhookConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            supabase: SupabaseConfig::from_env()?,
            webhook: WebhookConfig::from_env(),
            host: env_or("HOST", DEFAULT_HOST),
            port,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Split a comma separated list, dropping blanks.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_drops_blanks() {
        assert_eq!(parse_list(" a, b ,,c ,"), vec!["a", "b", "c"]);
        assert!(parse_list("  ").is_empty());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = SupabaseConfig {
            supabase_url: "https://test.supabase.co".to_string(),
            service_role_key: "super-secret".to_string(),
            schema: "dnawakes".to_string(),
            plan_types: vec!["Plan".to_string()],
        };
        let debug = format!("{:?}", config);
        assert!(debug.contains("test.supabase.co"));
        assert!(!debug.contains("super-secret"));
        assert_eq!(config.rest_url(), "https://test.supabase.co/rest/v1");
    }
}
