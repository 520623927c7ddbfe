use std::path::PathBuf;

use verdict_app::config::{
    config_info, load_config_from, parse_config, save_config_to, starter_config,
    CredentialSource, Location,
};

const V0_CONFIG: &str = r#"{
    "region": "ap-northeast-1",
    "model_id": "us.anthropic.claude-sonnet-4-20250514-v1:0",
    "credentials": { "type": "profile", "profile_name": "legal" },
    "templates": { "type": "directory", "path": "/srv/verdict/templates" },
    "documents": { "type": "s3", "bucket": "verdict-uploads" },
    "created_at": "2025-01-01T00:00:00Z"
}"#;

#[test]
fn v0_config_is_migrated_with_defaults() {
    let config = parse_config(V0_CONFIG).unwrap();

    assert_eq!(config.config_version, 1);
    assert_eq!(config.backend_timeout_secs, 60);
    assert_eq!(config.document_cap, 4000);
    assert_eq!(config.session_bucket, None);
    assert_eq!(
        config.templates,
        Location::Directory {
            path: PathBuf::from("/srv/verdict/templates")
        }
    );
    assert_eq!(
        config.documents,
        Location::S3 {
            bucket: "verdict-uploads".to_string()
        }
    );
}

#[test]
fn newer_config_version_is_rejected() {
    let json = V0_CONFIG.replacen('{', r#"{ "config_version": 99,"#, 1);
    let err = parse_config(&json).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn non_object_config_is_rejected() {
    assert!(parse_config("[]").is_err());
}

#[test]
fn saved_config_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = starter_config();
    config.session_bucket = Some("verdict-sessions".to_string());
    config.document_cap = 2000;

    save_config_to(dir.path(), &config).unwrap();
    let loaded = load_config_from(&dir.path().join("config.json")).unwrap();

    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.session_bucket.as_deref(), Some("verdict-sessions"));
    assert_eq!(loaded.document_cap, 2000);
    assert_eq!(loaded.templates, config.templates);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[cfg(unix)]
#[test]
fn saved_config_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    save_config_to(dir.path(), &starter_config()).unwrap();
    let mode = std::fs::metadata(dir.path().join("config.json"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn config_info_redacts_inline_keys() {
    let mut config = starter_config();
    config.credentials = CredentialSource::Inline {
        access_key_id: "AKIAABCDEFGHWXYZ".to_string(),
        secret_access_key: "secret".to_string(),
        session_token: None,
    };

    let info = config_info(&config);
    assert_eq!(info.credential_type, "inline");
    assert_eq!(info.access_key_hint.as_deref(), Some("AKIA...WXYZ"));
}

#[test]
fn config_info_redacts_non_ascii_keys_by_character() {
    let mut config = starter_config();
    config.credentials = CredentialSource::Inline {
        access_key_id: "金鑰ABCDEFGH測試".to_string(),
        secret_access_key: "secret".to_string(),
        session_token: None,
    };

    let info = config_info(&config);
    assert_eq!(info.access_key_hint.as_deref(), Some("金鑰AB...GH測試"));
}

#[test]
fn config_info_hides_short_keys_entirely() {
    let mut config = starter_config();
    config.credentials = CredentialSource::Inline {
        access_key_id: "金鑰ABC".to_string(),
        secret_access_key: "secret".to_string(),
        session_token: None,
    };

    assert_eq!(config_info(&config).access_key_hint.as_deref(), Some("****"));
}

#[test]
fn config_info_reports_profile() {
    let config = parse_config(V0_CONFIG).unwrap();
    let info = config_info(&config);
    assert_eq!(info.credential_type, "profile");
    assert_eq!(info.profile_name.as_deref(), Some("legal"));
    assert_eq!(info.access_key_hint, None);
}
