#[cfg(test)]
use super::*;

#[cfg(test)]
fn inline(s: &str, format: FileFormat) -> Sources {
    Sources::new()
        .without_environment()
        .layer(Layer::Inline(s.to_string(), format))
}

#[test]
fn test_read_config() {
    let config = r#"
      api:
        address: 0.0.0.0:8080
        cors: false
      FeatureToggle:
        ValuesFeature: true
        NavigationFeature: false
    "#;
    let config = AppConfig::from_yaml(config).unwrap();

    assert_eq!(config.api.host.address().to_string(), "0.0.0.0:8080");
    assert_eq!(config.api.host.url(), "http://localhost:8080");
    assert!(!config.api.cors);
    assert_eq!(
        config.settings.get("FeatureToggle:ValuesFeature").as_deref(),
        Some("true")
    );
    assert_eq!(
        config.settings.get("FeatureToggle:NavigationFeature").as_deref(),
        Some("false")
    );
}

#[test]
fn test_defaults() {
    let config = AppConfig::from_sources(Sources::new().without_environment()).unwrap();

    assert!(config.api.cors);
    assert_eq!(
        config.api.host.address().to_string(),
        format!("127.0.0.1:{}", DEFAULT_API_LISTEN_PORT)
    );
    assert_eq!(config.settings.get("FeatureToggle:ValuesFeature"), None);
}

#[test]
fn test_json_string_values() {
    let config = r#"{ "FeatureToggle": { "ValuesFeature": "False" } }"#;
    let config = AppConfig::from_json(config).unwrap();

    assert_eq!(
        config.settings.get("FeatureToggle:ValuesFeature").as_deref(),
        Some("False")
    );
}

#[test]
fn test_toml_port_only() {
    let config = r#"
        [api]
        port = 6000

        [FeatureToggle]
        ValuesFeature = true
    "#;
    let config = AppConfig::from_toml(config).unwrap();

    assert_eq!(config.api.host.address().to_string(), "127.0.0.1:6000");
    assert_eq!(
        config.settings.get("FeatureToggle:ValuesFeature").as_deref(),
        Some("true")
    );
}

#[test]
fn test_reload_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "FeatureToggle": { "ValuesFeature": true } }"#).unwrap();

    let store = SettingsStore::from_sources(
        Sources::new()
            .without_environment()
            .layer(Layer::File(path.clone())),
    )
    .unwrap();
    assert_eq!(
        store.get("FeatureToggle:ValuesFeature").as_deref(),
        Some("true")
    );

    std::fs::write(&path, r#"{ "FeatureToggle": { "ValuesFeature": false } }"#).unwrap();
    // not visible until the store is reloaded
    assert_eq!(
        store.get("FeatureToggle:ValuesFeature").as_deref(),
        Some("true")
    );

    store.reload().unwrap();
    assert_eq!(
        store.get("FeatureToggle:ValuesFeature").as_deref(),
        Some("false")
    );
}

#[test]
fn test_missing_file_is_an_error() {
    let result = AppConfig::from_multi_file(vec![PathBuf::from("/nonexistent/featuregate.yaml")]);
    assert!(result.is_err());
}

#[test]
fn test_hashmap_store() {
    let store = std::collections::HashMap::from([(
        "FeatureToggle:ValuesFeature".to_string(),
        "true".to_string(),
    )]);

    assert_eq!(
        ConfigurationStore::get(&store, "FeatureToggle:ValuesFeature").as_deref(),
        Some("true")
    );
    assert_eq!(
        ConfigurationStore::get(&store, "FeatureToggle:NavigationFeature"),
        None
    );
}

#[test]
fn test_mixed_case_keys() {
    let config = r#"{ "featureToggle": { "valuesFeature": true, "NAVIGATIONFEATURE": "false" } }"#;
    let store = SettingsStore::from_sources(inline(config, FileFormat::Json)).unwrap();

    assert_eq!(
        store.get("FeatureToggle:ValuesFeature").as_deref(),
        Some("true")
    );
    assert_eq!(
        store.get("FeatureToggle:NavigationFeature").as_deref(),
        Some("false")
    );
    assert_eq!(store.get("FeatureToggle:OtherFeature"), None);
}

#[test]
fn test_environment_overrides_file() {
    // no other test reads this toggle, so setting it cannot leak
    unsafe {
        std::env::set_var("FEATUREGATE__FEATURETOGGLE__ENVOVERRIDEFEATURE", "false");
    }

    let yaml = r#"
        FeatureToggle:
          EnvOverrideFeature: true
          EnvUntouchedFeature: true
    "#;
    let config = AppConfig::from_yaml(yaml).unwrap();

    assert_eq!(
        config.settings.get("FeatureToggle:EnvOverrideFeature").as_deref(),
        Some("false")
    );
    assert_eq!(
        config.settings.get("FeatureToggle:EnvUntouchedFeature").as_deref(),
        Some("true")
    );

    // the same file without the environment layer keeps its own value
    let store = SettingsStore::from_sources(inline(yaml, FileFormat::Yaml)).unwrap();
    assert_eq!(
        store.get("FeatureToggle:EnvOverrideFeature").as_deref(),
        Some("true")
    );
}
