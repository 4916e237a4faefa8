//! Release-candidate note generation.

use crate::config::Settings;
use crate::git::{CommitSummary, GitRepo};
use crate::log_debug;
use anyhow::{Context, Result};
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Line emitted in place of the changes list when no commits exist.
pub const EMPTY_PLACEHOLDER: &str = "- No new commits since last release";

/// Fixed checklist appended to every set of notes.
const CHECKLIST: &str = "\n## Release Checklist\n\
- [ ] Code review completed\n\
- [ ] Tests passing\n\
- [ ] Documentation updated\n\
- [ ] Ready for deployment\n";

// Heredoc delimiter for multi-line GITHUB_OUTPUT records.
const OUTPUT_DELIMITER: &str = "HERALD_EOF";

/// Composes the release notes markdown for a version.
///
/// Pure: the output is fully determined by the arguments. Commits are
/// rendered one line each, in the order given; an empty slice yields the
/// placeholder line instead.
pub fn compose_notes(version: &str, tag: &str, commits: &[CommitSummary]) -> String {
    let mut markdown = format!("# Release Candidate: {version}\n\n");
    markdown.push_str(&format!("## Changes since {tag}\n\n"));

    if commits.is_empty() {
        markdown.push_str(EMPTY_PLACEHOLDER);
        markdown.push('\n');
    } else {
        for commit in commits {
            markdown.push_str(&format!("- {} ({})\n", commit.message, commit.hash));
        }
    }

    markdown.push_str(CHECKLIST);
    markdown
}

/// Generates the release notes for the current repository state.
pub struct NotesGenerator;

impl NotesGenerator {
    /// Resolves the latest tag, the commits since it, and the target version,
    /// then composes the notes document.
    ///
    /// Absence of tags or commits degrades to the documented defaults and is
    /// never an error here.
    pub fn generate(repo: &GitRepo, settings: &Settings) -> Result<String> {
        let tag = repo.latest_tag();
        let commits = repo.commits_since(&tag);
        let version = settings.generator_version();
        log_debug!(
            "Composing notes for version {} ({} commits since {})",
            version,
            commits.len(),
            tag
        );
        Ok(compose_notes(&version, &tag, &commits))
    }
}

/// Writes the notes artifact, replacing any previous run's file.
pub fn write_notes(content: &str, path: &Path) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write release notes to {}", path.display()))
}

/// Emits `content` as a named CI step output.
///
/// Appends a heredoc-delimited record to the file named by `GITHUB_OUTPUT`
/// when that variable is set, and falls back to the legacy `::set-output`
/// workflow command otherwise.
pub fn emit_step_output(name: &str, content: &str) -> Result<()> {
    if let Ok(output_path) = env::var("GITHUB_OUTPUT") {
        append_step_output(Path::new(&output_path), name, content)?;
        log_debug!("Wrote step output '{}' to {}", name, output_path);
    } else {
        println!("{}", legacy_step_output(name, content));
    }
    Ok(())
}

/// Appends one heredoc-delimited `name<<delimiter` record to a step output
/// file, the multi-line form GitHub Actions expects.
pub fn append_step_output(path: &Path, name: &str, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open step output file {}", path.display()))?;
    write!(file, "{name}<<{OUTPUT_DELIMITER}\n{content}\n{OUTPUT_DELIMITER}\n")
        .with_context(|| format!("Failed to write step output {name}"))?;
    Ok(())
}

/// Formats the legacy `::set-output` workflow command for a step output.
pub fn legacy_step_output(name: &str, content: &str) -> String {
    format!("::set-output name={name}::{content}")
}
