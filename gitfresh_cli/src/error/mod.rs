//! Command line errors and process exit codes

use colored::*;
use gitfresh_core::{Error as CoreError, ErrorKind};
use std::error::Error as StdError;
use std::fmt;

type BoxedCause = Box<dyn StdError + Send + Sync>;

/// Process exit codes
///
/// `NotSynced` is not an error: the write succeeded but Freshdesk did not
/// return the contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    Misuse = 2,
    RemoteError = 3,
    IdentityError = 4,
    NotSynced = 5,
}

pub type CliResult<T> = Result<T, CliError>;

/// An error ready to be shown to the user
///
/// Carries the exit code it ends the process with, labelled details
/// (service, HTTP status) and hints on how to recover.
#[derive(Debug)]
pub struct CliError {
    code: ExitCode,
    message: String,
    details: Vec<(&'static str, String)>,
    hints: Vec<String>,
    cause: Option<BoxedCause>,
}

impl CliError {
    fn with_code(code: ExitCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Vec::new(),
            hints: Vec::new(),
            cause: None,
        }
    }

    /// Unexpected failure, exit code 1
    pub fn general(message: impl Into<String>) -> Self {
        Self::with_code(ExitCode::GeneralError, message)
    }

    /// Bad arguments or missing configuration, exit code 2
    pub fn misuse(message: impl Into<String>) -> Self {
        Self::with_code(ExitCode::Misuse, message)
            .hint("Run 'gitfresh --help' for usage information")
    }

    /// GitHub or Freshdesk call failed, exit code 3
    pub fn remote(message: impl Into<String>) -> Self {
        Self::with_code(ExitCode::RemoteError, message)
    }

    /// GitHub profile missing or unusable, exit code 4
    pub fn identity(message: impl Into<String>) -> Self {
        Self::with_code(ExitCode::IdentityError, message)
    }

    pub fn detail(mut self, label: &'static str, value: impl fmt::Display) -> Self {
        self.details.push((label, value.to_string()));
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub fn caused_by(mut self, cause: impl Into<BoxedCause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn exit_code(&self) -> ExitCode {
        self.code
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    fn title(&self) -> &'static str {
        match self.code {
            ExitCode::Misuse => "Usage Error",
            ExitCode::RemoteError => "Remote Error",
            ExitCode::IdentityError => "Profile Error",
            _ => "Error",
        }
    }

    /// Multi-line rendering for stderr, with the cause chain when `debug`
    pub fn format_for_user(&self, debug: bool) -> String {
        use std::fmt::Write;

        let title = match self.code {
            ExitCode::Misuse => self.title().yellow(),
            _ => self.title().red(),
        };
        let mut out = format!("{title}: {}\n", self.message);

        if !self.details.is_empty() {
            out.push('\n');
            for (label, value) in &self.details {
                let _ = writeln!(out, "  {}: {value}", label.bold());
            }
        }

        if debug {
            let chain = std::iter::successors(
                self.cause.as_deref().map(|c| c as &(dyn StdError + 'static)),
                |err| (*err).source(),
            );
            for (depth, err) in chain.enumerate() {
                if depth == 0 {
                    out.push_str("\nCaused by:\n");
                }
                let _ = writeln!(out, "  {}: {err}", depth + 1);
            }
        }

        if !self.hints.is_empty() {
            out.push_str("\nTry:\n");
            for hint in &self.hints {
                let _ = writeln!(out, "  • {hint}");
            }
        }

        out
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message)?;
        for (label, value) in &self.details {
            write!(f, " [{label}={value}]")?;
        }
        Ok(())
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|c| c as &(dyn StdError + 'static))
    }
}

impl From<CoreError> for CliError {
    fn from(error: CoreError) -> Self {
        let message = error.to_string();
        let status = error.status();

        let mapped = match error.kind() {
            ErrorKind::IdentityNotFound => CliError::identity(message)
                .hint("Check the spelling of the GitHub username"),
            ErrorKind::IdentityMissingField => CliError::identity(message).hint(
                "The GitHub profile must have a public email address and a display name",
            ),
            ErrorKind::IdentityLookupFailed | ErrorKind::IdentityDeserializationFailed => {
                let remote = CliError::remote(message).detail("service", "GitHub");
                match status {
                    Some(401 | 403) => remote.hint(
                        "Set a personal access token with 'gitfresh config set github.token <token>'",
                    ),
                    _ => remote.hint("Check your internet connection"),
                }
            }
            ErrorKind::DirectorySearchFailed
            | ErrorKind::DirectoryCreateFailed
            | ErrorKind::DirectoryUpdateFailed
            | ErrorKind::DirectoryDeserializationFailed => {
                let remote = CliError::remote(message).detail("service", "Freshdesk");
                match status {
                    Some(401 | 403) => {
                        remote.hint("Check freshdesk.api_key with 'gitfresh config init'")
                    }
                    Some(404) => remote.hint("Check that the Freshdesk subdomain exists"),
                    _ => remote,
                }
            }
            ErrorKind::InvalidInput => CliError::misuse(message),
        };

        let mapped = match status {
            Some(status) => mapped.detail("status", status),
            None => mapped,
        };
        mapped.caused_by(error)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        Self::general(format!("{error:#}"))
    }
}
