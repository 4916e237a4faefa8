use std::env;

/// Fixed path of the release notes hand-off artifact, relative to the working directory.
pub const NOTES_FILE: &str = "release-notes.md";

/// Fixed path of the posted-message status file, relative to the working directory.
pub const MESSAGE_INFO_FILE: &str = "slack-message-info.json";

/// Channel the approval request is posted to when none is configured.
pub const DEFAULT_CHANNEL: &str = "#releases";

/// Version label the note generator falls back to when none is supplied.
pub const DEFAULT_VERSION: &str = "v1.0.0";

/// Version label the approval poster falls back to when neither an explicit
/// version nor a CI ref name is available.
pub const UNKNOWN_VERSION: &str = "Unknown Version";

/// Placeholder used for display-only context values that are absent.
pub const CONTEXT_PLACEHOLDER: &str = "N/A";

/// Environment-provided configuration shared by both pipeline stages.
///
/// Every field is optional at the source; the accessors below encode the
/// documented fallback chains so callers never see an unresolved value.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Explicit target version (`INPUT_VERSION`)
    pub input_version: Option<String>,
    /// Release notes content override (`RELEASE_NOTES`)
    pub release_notes: Option<String>,
    /// Destination Slack channel (`SLACK_CHANNEL`)
    pub channel: String,
    /// Slack bot token (`SLACK_BOT_TOKEN`); required by the poster stage only
    pub bot_token: Option<String>,
    /// Repository name for the context footer (`GITHUB_REPOSITORY`)
    pub repository: Option<String>,
    /// CI run identifier for the context footer (`GITHUB_RUN_ID`)
    pub run_id: Option<String>,
    /// CI ref name, used as a fallback version label (`GITHUB_REF_NAME`)
    pub ref_name: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_version: None,
            release_notes: None,
            channel: DEFAULT_CHANNEL.to_string(),
            bot_token: None,
            repository: None,
            run_id: None,
            ref_name: None,
        }
    }
}

impl Settings {
    /// Loads all recognized environment variables in one place.
    ///
    /// Empty values are treated the same as unset ones, so an empty
    /// `RELEASE_NOTES` still falls through to the file artifact.
    pub fn from_env() -> Self {
        Self {
            input_version: env_non_empty("INPUT_VERSION"),
            release_notes: env_non_empty("RELEASE_NOTES"),
            channel: env_non_empty("SLACK_CHANNEL").unwrap_or_else(|| DEFAULT_CHANNEL.to_string()),
            bot_token: env_non_empty("SLACK_BOT_TOKEN"),
            repository: env_non_empty("GITHUB_REPOSITORY"),
            run_id: env_non_empty("GITHUB_RUN_ID"),
            ref_name: env_non_empty("GITHUB_REF_NAME"),
        }
    }

    /// Version label used by the note generator: explicit input or `v1.0.0`.
    pub fn generator_version(&self) -> String {
        self.input_version
            .clone()
            .unwrap_or_else(|| DEFAULT_VERSION.to_string())
    }

    /// Version label used by the approval poster: explicit input, then the CI
    /// ref name, then the literal `Unknown Version`.
    pub fn poster_version(&self) -> String {
        self.input_version
            .clone()
            .or_else(|| self.ref_name.clone())
            .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
    }

    /// Repository name for display, with the documented placeholder.
    pub fn repository_display(&self) -> &str {
        self.repository.as_deref().unwrap_or(CONTEXT_PLACEHOLDER)
    }

    /// Run identifier for display, with the documented placeholder.
    pub fn run_id_display(&self) -> &str {
        self.run_id.as_deref().unwrap_or(CONTEXT_PLACEHOLDER)
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
