//! Slack approval message construction and delivery.

use crate::config::Settings;
use crate::log_debug;
use anyhow::{Context, Result, anyhow};
use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use std::time::Duration;

const POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

// The pipeline is single-shot with no retry, so the one network call gets a
// bounded timeout instead of blocking a CI job indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Stable identifiers for the three approval action buttons, in display order.
pub const ACTION_IDS: [&str; 3] = ["release_approve", "release_reject", "release_changes"];

/// Builds the Block Kit payload for a release approval request.
///
/// Pure: the payload is fully determined by the arguments. The actions block
/// always carries exactly three buttons (approve, reject, request changes)
/// with stable `action_id`s, regardless of the notes content.
pub fn build_message(notes: &str, version: &str, settings: &Settings) -> Value {
    json!({
        "channel": settings.channel,
        "text": format!("Release Approval Request: {version}"),
        "blocks": [
            {
                "type": "header",
                "text": {
                    "type": "plain_text",
                    "text": format!("🚀 Release Approval Request: {version}"),
                    "emoji": true
                }
            },
            {
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": notes
                }
            },
            {
                "type": "divider"
            },
            {
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": "*Please review and approve this release:*"
                }
            },
            {
                "type": "actions",
                "elements": [
                    {
                        "type": "button",
                        "text": {
                            "type": "plain_text",
                            "text": "✅ Approve",
                            "emoji": true
                        },
                        "value": "approve",
                        "action_id": ACTION_IDS[0],
                        "style": "primary"
                    },
                    {
                        "type": "button",
                        "text": {
                            "type": "plain_text",
                            "text": "❌ Reject",
                            "emoji": true
                        },
                        "value": "reject",
                        "action_id": ACTION_IDS[1],
                        "style": "danger"
                    },
                    {
                        "type": "button",
                        "text": {
                            "type": "plain_text",
                            "text": "🤔 Request Changes",
                            "emoji": true
                        },
                        "value": "changes",
                        "action_id": ACTION_IDS[2]
                    }
                ]
            },
            {
                "type": "context",
                "elements": [
                    {
                        "type": "mrkdwn",
                        "text": format!(
                            "Repository: {} | Run: {}",
                            settings.repository_display(),
                            settings.run_id_display()
                        )
                    }
                ]
            }
        ]
    })
}

/// Identifiers returned by Slack for a successfully posted message.
#[derive(Debug, Clone)]
pub struct PostedMessage {
    pub channel: String,
    pub timestamp: String,
}

/// Thin client over the Slack Web API.
pub struct SlackClient {
    client: Client,
    token: String,
}

impl SlackClient {
    /// Creates a new client authenticating with the given bot token.
    pub fn new(token: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, token })
    }

    /// Posts the message payload via `chat.postMessage`.
    ///
    /// One attempt only; any transport error, non-success HTTP status, or
    /// `ok: false` API response is surfaced as an error.
    pub async fn post_message(&self, payload: &Value) -> Result<PostedMessage> {
        let response = self
            .client
            .post(POST_MESSAGE_URL)
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await
            .context("Failed to reach the Slack API")?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Slack API request failed with status {status}: {text}"
            ));
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse Slack API response")?;

        if !body["ok"].as_bool().unwrap_or(false) {
            return Err(anyhow!(
                "Slack API error: {}",
                body["error"].as_str().unwrap_or("unknown error")
            ));
        }

        log_debug!("Slack response: {}", body);

        Ok(PostedMessage {
            channel: body["channel"].as_str().unwrap_or_default().to_string(),
            timestamp: body["ts"].as_str().unwrap_or_default().to_string(),
        })
    }
}

/// Durable record of a posted approval request, consumed by any downstream
/// approval listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageInfo {
    pub channel: String,
    pub timestamp: String,
    pub version: String,
    pub posted_at: String,
}

impl MessageInfo {
    /// Builds the record for a just-posted message, stamped with the current
    /// UTC time in ISO-8601 form.
    pub fn new(posted: &PostedMessage, version: &str) -> Self {
        Self {
            channel: posted.channel.clone(),
            timestamp: posted.timestamp.clone(),
            version: version.to_string(),
            posted_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Serializes the record as pretty-printed JSON, replacing any previous
    /// run's file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize message info")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write message info to {}", path.display()))
    }
}
