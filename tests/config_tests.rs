use release_herald::{Settings, config};

#[test]
fn test_generator_version_fallback() {
    let settings = Settings::default();
    assert_eq!(settings.generator_version(), config::DEFAULT_VERSION);

    let settings = Settings {
        input_version: Some("v2.5.0".to_string()),
        ..Settings::default()
    };
    assert_eq!(settings.generator_version(), "v2.5.0");
}

#[test]
fn test_poster_version_three_tier_fallback() {
    // Explicit input wins over everything
    let settings = Settings {
        input_version: Some("v2.5.0".to_string()),
        ref_name: Some("release/v2.5".to_string()),
        ..Settings::default()
    };
    assert_eq!(settings.poster_version(), "v2.5.0");

    // CI ref name is the second tier
    let settings = Settings {
        ref_name: Some("release/v2.5".to_string()),
        ..Settings::default()
    };
    assert_eq!(settings.poster_version(), "release/v2.5");

    // Literal fallback when nothing is set
    let settings = Settings::default();
    assert_eq!(settings.poster_version(), config::UNKNOWN_VERSION);
}

#[test]
fn test_default_channel_and_context_placeholders() {
    let settings = Settings::default();
    assert_eq!(settings.channel, "#releases");
    assert_eq!(settings.repository_display(), "N/A");
    assert_eq!(settings.run_id_display(), "N/A");

    let settings = Settings {
        repository: Some("acme/widgets".to_string()),
        run_id: Some("98765".to_string()),
        ..Settings::default()
    };
    assert_eq!(settings.repository_display(), "acme/widgets");
    assert_eq!(settings.run_id_display(), "98765");
}
