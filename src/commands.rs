use crate::config::{self, Settings};
use crate::git::GitRepo;
use crate::notes::{self, NotesGenerator};
use crate::slack::{self, MessageInfo, SlackClient};
use crate::ui;
use crate::{log_debug, log_error};
use anyhow::{Result, anyhow};
use std::fs;
use std::path::Path;

/// Handles the `notes` command: the note generator stage.
///
/// Reads the repository state from the current working directory, composes
/// the release notes, writes the `release-notes.md` artifact, and emits the
/// content as a CI step output. Missing tags or commits degrade to defaults;
/// composition and write errors are fatal.
pub fn handle_notes_command() -> Result<()> {
    let settings = Settings::from_env();
    let repo = GitRepo::from_current_dir()?;

    let content = NotesGenerator::generate(&repo, &settings)?;

    ui::print_info("Generated release notes:");
    ui::print_message(&content);

    notes::emit_step_output("notes", &content)?;

    let path = Path::new(config::NOTES_FILE);
    notes::write_notes(&content, path)?;
    ui::print_success(&format!("Release notes saved to: {}", path.display()));

    Ok(())
}

/// Resolves the release notes content for the poster stage.
///
/// Two-tier fallback: the environment-provided value wins; otherwise the
/// artifact file is read. Neither present is the one condition that must
/// abort the run, before any network call is attempted.
pub fn resolve_release_notes(env_value: Option<String>, path: &Path) -> Result<String> {
    if let Some(content) = env_value {
        log_debug!("Using release notes from environment");
        return Ok(content);
    }

    if path.exists() {
        log_debug!("Reading release notes from {}", path.display());
        return fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read release notes from {}: {e}", path.display()));
    }

    Err(anyhow!("No release notes found in environment or file"))
}

/// Handles the `post` command: the approval poster stage.
///
/// Resolves the notes and version label, builds the Block Kit payload, posts
/// it to Slack, and persists the posted-message record. Every failure here is
/// fatal; the status file is only written after a successful post.
pub async fn handle_post_command() -> Result<()> {
    let settings = Settings::from_env();

    let release_notes =
        resolve_release_notes(settings.release_notes.clone(), Path::new(config::NOTES_FILE))?;
    let version = settings.poster_version();

    let payload = slack::build_message(&release_notes, &version, &settings);

    let token = settings
        .bot_token
        .clone()
        .ok_or_else(|| anyhow!("SLACK_BOT_TOKEN is not set"))?;
    let client = SlackClient::new(token)?;

    ui::print_info(&format!(
        "Posting release approval request to Slack channel: {}",
        settings.channel
    ));

    let spinner = ui::create_spinner("Waiting for Slack...");
    let result = client.post_message(&payload).await;
    spinner.finish_and_clear();

    let posted = match result {
        Ok(posted) => posted,
        Err(e) => {
            log_error!("Failed to post to Slack: {}", e);
            return Err(e);
        }
    };

    ui::print_success(&format!("Message posted successfully: {}", posted.timestamp));
    ui::print_message(&format!("Channel: {}", posted.channel));

    let info = MessageInfo::new(&posted, &version);
    info.save(Path::new(config::MESSAGE_INFO_FILE))?;
    ui::print_success(&format!(
        "Message info saved to {}",
        config::MESSAGE_INFO_FILE
    ));

    Ok(())
}
