use release_herald::slack::{ACTION_IDS, MessageInfo, PostedMessage, build_message};
use release_herald::{Settings, config};
use tempfile::TempDir;

#[test]
fn test_build_message_has_three_action_controls() {
    let settings = Settings::default();
    let payload = build_message("some notes", "v1.0.0", &settings);

    let actions = &payload["blocks"][4];
    assert_eq!(actions["type"], "actions");

    let elements = actions["elements"].as_array().expect("elements missing");
    assert_eq!(elements.len(), 3);

    for (element, action_id) in elements.iter().zip(ACTION_IDS) {
        assert_eq!(element["type"], "button");
        assert_eq!(element["action_id"], action_id);
    }

    assert_eq!(elements[0]["value"], "approve");
    assert_eq!(elements[0]["style"], "primary");
    assert_eq!(elements[1]["value"], "reject");
    assert_eq!(elements[1]["style"], "danger");
    assert_eq!(elements[2]["value"], "changes");
    assert!(elements[2].get("style").is_none());
}

#[test]
fn test_build_message_block_order() {
    let settings = Settings::default();
    let payload = build_message("notes body", "v2.0.0", &settings);

    let types: Vec<&str> = payload["blocks"]
        .as_array()
        .expect("blocks missing")
        .iter()
        .map(|block| block["type"].as_str().expect("block type missing"))
        .collect();
    assert_eq!(
        types,
        vec!["header", "section", "divider", "section", "actions", "context"]
    );
}

#[test]
fn test_build_message_carries_version_and_notes() {
    let settings = Settings::default();
    let payload = build_message("## Changes since v1.0.0", "v1.1.0", &settings);

    assert_eq!(payload["text"], "Release Approval Request: v1.1.0");
    assert_eq!(
        payload["blocks"][0]["text"]["text"],
        "🚀 Release Approval Request: v1.1.0"
    );
    assert_eq!(payload["blocks"][1]["text"]["text"], "## Changes since v1.0.0");
    assert_eq!(
        payload["blocks"][3]["text"]["text"],
        "*Please review and approve this release:*"
    );
}

#[test]
fn test_build_message_channel_defaults_and_overrides() {
    let payload = build_message("notes", "v1.0.0", &Settings::default());
    assert_eq!(payload["channel"], config::DEFAULT_CHANNEL);

    let settings = Settings {
        channel: "#deploys".to_string(),
        ..Settings::default()
    };
    let payload = build_message("notes", "v1.0.0", &settings);
    assert_eq!(payload["channel"], "#deploys");
}

#[test]
fn test_build_message_context_footer() {
    let payload = build_message("notes", "v1.0.0", &Settings::default());
    assert_eq!(
        payload["blocks"][5]["elements"][0]["text"],
        "Repository: N/A | Run: N/A"
    );

    let settings = Settings {
        repository: Some("acme/widgets".to_string()),
        run_id: Some("12345".to_string()),
        ..Settings::default()
    };
    let payload = build_message("notes", "v1.0.0", &settings);
    assert_eq!(
        payload["blocks"][5]["elements"][0]["text"],
        "Repository: acme/widgets | Run: 12345"
    );
}

#[test]
fn test_message_info_save_is_pretty_printed() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join("slack-message-info.json");

    let posted = PostedMessage {
        channel: "C024BE91L".to_string(),
        timestamp: "1503435956.000247".to_string(),
    };
    let info = MessageInfo::new(&posted, "v1.3.0-rc1");
    info.save(&path).expect("save failed");

    let content = std::fs::read_to_string(&path).expect("Failed to read message info");
    // Pretty-printed: one field per indented line
    assert!(content.contains("\n  \"channel\""));
    assert!(content.contains("\n  \"timestamp\""));
    assert!(content.contains("\n  \"version\""));
    assert!(content.contains("\n  \"posted_at\""));

    let parsed: MessageInfo = serde_json::from_str(&content).expect("round-trip failed");
    assert_eq!(parsed, info);
    assert_eq!(parsed.channel, "C024BE91L");
    assert_eq!(parsed.timestamp, "1503435956.000247");
    assert_eq!(parsed.version, "v1.3.0-rc1");
}

#[test]
fn test_message_info_save_overwrites_previous_run() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join("slack-message-info.json");

    let first = MessageInfo {
        channel: "C1".to_string(),
        timestamp: "1.0".to_string(),
        version: "v1".to_string(),
        posted_at: "2026-01-01T00:00:00.000Z".to_string(),
    };
    first.save(&path).expect("first save failed");

    let second = MessageInfo {
        channel: "C2".to_string(),
        timestamp: "2.0".to_string(),
        version: "v2".to_string(),
        posted_at: "2026-01-02T00:00:00.000Z".to_string(),
    };
    second.save(&path).expect("second save failed");

    let content = std::fs::read_to_string(&path).expect("Failed to read message info");
    let parsed: MessageInfo = serde_json::from_str(&content).expect("parse failed");
    assert_eq!(parsed, second);
}
