//! Terminal detection used to pick output defaults

use is_terminal::IsTerminal;
use log::debug;
use std::env;
use std::io::stdout;

/// Variables set by common CI runners, which may attach a TTY nobody reads
const CI_VARIABLES: &[&str] = &[
    "CI",
    "CONTINUOUS_INTEGRATION",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "JENKINS_URL",
    "BUILDKITE",
    "CIRCLECI",
    "TRAVIS",
    "DRONE",
    "TEAMCITY_VERSION",
    "TF_BUILD",
];

/// Whether a person is likely reading stdout
///
/// Sync output defaults to JSON and `config init` refuses to prompt when
/// this is false.
pub fn is_interactive() -> bool {
    if !stdout().is_terminal() {
        return false;
    }

    if let Some(var) = ci_variable() {
        debug!("Treating terminal as non-interactive, {var} is set");
        return false;
    }

    env::var("DEBIAN_FRONTEND").as_deref() != Ok("noninteractive")
}

/// Whether human output should be colored
///
/// Honors `NO_COLOR` and `TERM=dumb` on top of [`is_interactive`].
pub fn supports_color() -> bool {
    if env::var_os("NO_COLOR").is_some() || !is_interactive() {
        return false;
    }

    matches!(env::var("TERM"), Ok(term) if !term.is_empty() && term != "dumb")
}

fn ci_variable() -> Option<&'static str> {
    CI_VARIABLES
        .iter()
        .copied()
        .find(|var| env::var_os(var).is_some())
}
