//! Sync command orchestrator
//!
//! Turns the loaded configuration and command line flags into a core
//! [`SyncOrchestrator`] run and prints the resulting report.

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::output::{OutputFormat, create_formatter};
use gitfresh_core::{SyncOptions, SyncOrchestrator, SyncReport};
use log::debug;

/// Sync command options
#[derive(Debug, Clone)]
pub struct SyncCommandOptions {
    /// GitHub username to copy
    pub username: String,
    /// Freshdesk subdomain, falls back to `freshdesk.default_subdomain`
    pub subdomain: Option<String>,
    /// Output format
    pub format: OutputFormat,
    /// Colorize human output
    pub use_color: bool,
}

/// Orchestrator for the sync command
pub struct SyncCommandOrchestrator {
    engine: SyncOrchestrator,
    tenant: String,
    options: SyncCommandOptions,
}

impl SyncCommandOrchestrator {
    /// Create a new sync command orchestrator
    pub fn new(config: AppConfig, options: SyncCommandOptions) -> CliResult<Self> {
        debug!("Creating sync orchestrator with options: {options:?}");

        let tenant = resolve_tenant(options.subdomain.as_deref(), &config)?;

        if config.freshdesk.api_key.is_blank() {
            return Err(CliError::misuse("No Freshdesk API key configured")
                .hint("Run 'gitfresh config init' to store your API key")
                .hint("Or set GITFRESH_FRESHDESK__API_KEY"));
        }

        let sync_options = SyncOptions::from(&config.sync);
        let engine = SyncOrchestrator::from_configs(config.github, config.freshdesk, sync_options)?;

        Ok(Self {
            engine,
            tenant,
            options,
        })
    }

    /// Run the sync and print the report
    ///
    /// Returns whether the contact write was confirmed by Freshdesk.
    pub async fn execute(&self) -> CliResult<bool> {
        let report = self
            .engine
            .sync_detailed(&self.tenant, &self.options.username)
            .await?;

        self.display_report(&report)?;
        Ok(report.synced())
    }

    fn display_report(&self, report: &SyncReport) -> CliResult<()> {
        let formatter = create_formatter(self.options.format, self.options.use_color);
        let output = formatter.format_report(report)?;
        println!("{}", output.trim_end());
        Ok(())
    }
}

/// Pick the tenant from the flag or the configured default
fn resolve_tenant(flag: Option<&str>, config: &AppConfig) -> CliResult<String> {
    let tenant = flag
        .map(str::to_string)
        .or_else(|| config.freshdesk.default_subdomain.clone())
        .filter(|t| !t.trim().is_empty());

    tenant.ok_or_else(|| {
        CliError::misuse("No Freshdesk subdomain given")
            .hint("Pass --subdomain <name>")
            .hint("Or run 'gitfresh config set freshdesk.default_subdomain <name>'")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExitCode;

    fn options(subdomain: Option<&str>) -> SyncCommandOptions {
        SyncCommandOptions {
            username: "octocat".to_string(),
            subdomain: subdomain.map(str::to_string),
            format: OutputFormat::Minimal,
            use_color: false,
        }
    }

    #[test]
    fn test_flag_wins_over_default_subdomain() {
        let mut config = AppConfig::default();
        config.freshdesk.default_subdomain = Some("fallback".to_string());

        assert_eq!(resolve_tenant(Some("acme"), &config).unwrap(), "acme");
        assert_eq!(resolve_tenant(None, &config).unwrap(), "fallback");
    }

    #[test]
    fn test_missing_subdomain_is_misuse() {
        let err = resolve_tenant(None, &AppConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::Misuse);
    }

    #[test]
    fn test_missing_api_key_is_misuse() {
        let err = SyncCommandOrchestrator::new(AppConfig::default(), options(Some("acme")))
            .err()
            .unwrap();
        assert_eq!(err.exit_code(), ExitCode::Misuse);
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_invalid_api_url_is_misuse() {
        let mut config = AppConfig::default();
        config.freshdesk.api_key = "key".into();
        config.github.api_url = "not a url".to_string();

        let err = SyncCommandOrchestrator::new(config, options(Some("acme")))
            .err()
            .unwrap();
        assert_eq!(err.exit_code(), ExitCode::Misuse);
    }
}
