use super::*;
use std::io::Write;

fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("config.json");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(body.as_bytes()).unwrap();
    path
}

#[test]
fn session_name_defaults_when_absent() {
    let cfg: ConfigFile = serde_json::from_str(r#"{"activeProfile":"profiles/a.json"}"#).unwrap();
    assert_eq!(cfg.session_name(), "sigma-quant");
    assert_eq!(cfg.tmux_bin(), "tmux");
}

#[test]
fn load_parses_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"{"activeProfile":"profiles/us-equities.json","session_name":"custom"}"#,
    );
    let cfg = ConfigFile::load(&path).unwrap();
    assert_eq!(cfg.active_profile, Path::new("profiles/us-equities.json"));
    assert_eq!(cfg.session_name(), "custom");
}

#[test]
fn load_missing_file_is_read_error() {
    let err = ConfigFile::load(Path::new("/nonexistent/config.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn global_config_read_returns_snapshot() {
    let cfg = ConfigFile {
        active_profile: PathBuf::from("profiles/a.json"),
        workers: WorkersSection::default(),
        queues: None,
        session_name: None,
        tmux_bin: None,
    };
    let global = GlobalConfig::from_file(cfg);
    assert_eq!(global.read().session_name(), "sigma-quant");
}

#[test]
fn profile_keeps_unknown_fields_as_passthrough() {
    let profile: Profile = serde_json::from_str(
        r#"{"profileId":"p1","marketType":"futures","dataProvider":"ibkr","symbols":["ES"]}"#,
    )
    .unwrap();
    assert_eq!(profile.profile_id, "p1");
    assert_eq!(profile.market_type, "futures");
    assert!(profile.rest.contains_key("symbols"));
}
