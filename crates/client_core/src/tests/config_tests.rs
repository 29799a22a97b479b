use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

fn temp_settings_file(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("evcare_settings_test_{suffix}.toml"));
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn missing_file_keeps_defaults() {
    let settings = load_settings_from(Path::new("/nonexistent/evcare.toml"), no_env);
    assert_eq!(settings.api_base_url, "http://localhost:8080");
    assert_eq!(settings.timeout_seconds, None);
    assert_eq!(settings.app_env, AppEnv::Production);
}

#[test]
fn unset_app_env_keeps_request_logging_quiet() {
    let settings = load_settings_from(Path::new("/nonexistent/evcare.toml"), no_env);
    assert!(!settings.app_env.verbose_logging());
    assert_eq!(settings.app_env.default_log_directive(), "warn");

    let dev = load_settings_from(Path::new("/nonexistent/evcare.toml"), |key| {
        (key == "VITE_APP_ENV").then(|| "development".to_string())
    });
    assert!(dev.app_env.verbose_logging());
}

#[test]
fn file_values_apply_and_env_wins() {
    let path = temp_settings_file(
        r#"
api_base_url = "https://file.example.com"
timeout_seconds = 20
app_env = "production"
"#,
    );

    let from_file = load_settings_from(&path, no_env);
    assert_eq!(from_file.api_base_url, "https://file.example.com");
    assert_eq!(from_file.timeout_seconds, Some(20));
    assert_eq!(from_file.app_env, AppEnv::Production);

    let vars: HashMap<&str, &str> = HashMap::from([
        ("APP__API_BASE_URL", "https://env.example.com"),
        ("VITE_APP_ENV", "development"),
        ("EVCARE_TIMEOUT_SECONDS", "not-a-number"),
    ]);
    let overridden = load_settings_from(&path, |key| vars.get(key).map(|v| v.to_string()));
    assert_eq!(overridden.api_base_url, "https://env.example.com");
    assert_eq!(overridden.app_env, AppEnv::Development);
    assert_eq!(overridden.timeout_seconds, Some(20));

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn unparseable_file_is_ignored() {
    let path = temp_settings_file("api_base_url = [not toml");
    let settings = load_settings_from(&path, no_env);
    assert_eq!(settings.api_base_url, "http://localhost:8080");
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn base_url_rejects_other_schemes() {
    let settings = ClientSettings {
        api_base_url: "ftp://files.example.com".into(),
        ..ClientSettings::default()
    };
    assert!(matches!(
        settings.base_url(),
        Err(ConfigError::UnsupportedScheme(scheme)) if scheme == "ftp"
    ));

    let settings = ClientSettings {
        api_base_url: "not a url".into(),
        ..ClientSettings::default()
    };
    assert!(matches!(
        settings.base_url(),
        Err(ConfigError::InvalidBaseUrl { .. })
    ));
}

#[test]
fn app_env_parsing_defaults_to_production() {
    assert_eq!(AppEnv::parse("Development"), AppEnv::Development);
    assert_eq!(AppEnv::parse("staging"), AppEnv::Production);
    assert!(!AppEnv::Production.verbose_logging());
    assert_eq!(AppEnv::Development.default_log_directive(), "debug");
}
