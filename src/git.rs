use crate::log_debug;
use anyhow::{Result, anyhow};
use git2::Repository;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::env;
use std::path::{Path, PathBuf};

/// Tag name reported when no tag is reachable from the current head.
pub const SENTINEL_TAG: &str = "v0.0.0";

/// One-line summary of a single commit, as it appears in the release notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    /// Abbreviated (7 character) commit hash
    pub hash: String,
    /// First line of the commit message
    pub message: String,
}

/// Represents a Git repository and provides the read-only queries the
/// release pipeline needs.
pub struct GitRepo {
    repo_path: PathBuf,
}

impl GitRepo {
    /// Creates a new `GitRepo` instance from a local path.
    ///
    /// # Arguments
    ///
    /// * `repo_path` - The path to the Git repository.
    ///
    /// # Returns
    ///
    /// A Result containing the `GitRepo` instance or an error.
    pub fn new(repo_path: &Path) -> Result<Self> {
        Ok(Self {
            repo_path: repo_path.to_path_buf(),
        })
    }

    /// Creates a `GitRepo` rooted at the current working directory.
    pub fn from_current_dir() -> Result<Self> {
        let current_dir = env::current_dir()?;
        Self::new(&current_dir)
    }

    /// Open the repository at the stored path
    pub fn open_repo(&self) -> Result<Repository, git2::Error> {
        Repository::open(&self.repo_path)
    }

    /// Returns the name of the most recent tag reachable from HEAD.
    ///
    /// Never fails: any error (not a repository, unborn head, zero tags)
    /// resolves to the sentinel `v0.0.0`.
    pub fn latest_tag(&self) -> String {
        match self.try_latest_tag() {
            Ok(tag) => {
                log_debug!("Resolved latest tag: {}", tag);
                tag
            }
            Err(e) => {
                log_debug!("No tag resolvable ({}), using sentinel", e);
                SENTINEL_TAG.to_string()
            }
        }
    }

    fn try_latest_tag(&self) -> Result<String> {
        let repo = self.open_repo()?;

        // Map tagged commit ids to tag names, peeling annotated tags. Several
        // tags may point at the same commit; keep the lexicographically
        // greatest name so the result does not depend on iteration order.
        let mut tagged_commits: HashMap<git2::Oid, String> = HashMap::new();
        for reference in repo.references_glob("refs/tags/*")? {
            let reference = reference?;
            let Some(name) = reference.shorthand().map(ToString::to_string) else {
                continue;
            };
            let commit = reference.peel_to_commit()?;
            match tagged_commits.entry(commit.id()) {
                Entry::Occupied(mut entry) => {
                    if name > *entry.get() {
                        entry.insert(name);
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(name);
                }
            }
        }

        if tagged_commits.is_empty() {
            return Err(anyhow!("repository has no tags"));
        }

        // Walk back from HEAD; the first tagged commit encountered is the
        // most recent reachable tag.
        let mut revwalk = repo.revwalk()?;
        revwalk.push_head()?;
        for oid in revwalk {
            let oid = oid?;
            if let Some(name) = tagged_commits.get(&oid) {
                return Ok(name.clone());
            }
        }

        Err(anyhow!("no tag reachable from HEAD"))
    }

    /// Returns one-line summaries of the commits strictly after `tag` up to
    /// HEAD, most-recent-first.
    ///
    /// Never fails: any error (unknown tag, not a repository) resolves to an
    /// empty list. In particular the sentinel tag from [`Self::latest_tag`]
    /// names no real revision, so a tagless repository yields no commits.
    pub fn commits_since(&self, tag: &str) -> Vec<CommitSummary> {
        match self.try_commits_since(tag) {
            Ok(commits) => {
                log_debug!("Found {} commits since {}", commits.len(), tag);
                commits
            }
            Err(e) => {
                log_debug!("Failed to list commits since {} ({})", tag, e);
                Vec::new()
            }
        }
    }

    fn try_commits_since(&self, tag: &str) -> Result<Vec<CommitSummary>> {
        let repo = self.open_repo()?;
        let from_commit = repo.revparse_single(tag)?.peel_to_commit()?;

        let mut revwalk = repo.revwalk()?;
        revwalk.push_head()?;
        revwalk.hide(from_commit.id())?;

        revwalk
            .filter_map(std::result::Result::ok)
            .map(|oid| {
                let commit = repo.find_commit(oid)?;
                let mut hash = oid.to_string();
                hash.truncate(7);
                Ok(CommitSummary {
                    hash,
                    message: commit.summary().unwrap_or_default().to_string(),
                })
            })
            .collect()
    }
}
