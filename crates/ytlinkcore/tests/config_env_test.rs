//! Loading configuration from the process environment.
//!
//! These tests mutate process-wide env vars, so they run serially.

use serial_test::serial;
use std::env;

use ytlinkcore::Config;

const VARS: &[&str] = &[
    "BOT_TOKEN",
    "TELOXIDE_TOKEN",
    "DOWNLOAD_DOMAIN",
    "DOWNLOAD_PATH",
    "CLEANING_INTERVAL_DAYS",
    "MAX_CONCURRENT_FETCHES",
    "DEPLOY_ROOT",
    "PUBLIC_ROOT",
    "SWEEP_INTERVAL_HOURS",
    "YTDL_BIN",
    "LOG_FILE_PATH",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_reads_bot_variables() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    env::set_var("BOT_TOKEN", "123:abc");
    env::set_var("DOWNLOAD_DOMAIN", "https://dl.example.com/");
    env::set_var("DOWNLOAD_PATH", dir.path());
    env::set_var("CLEANING_INTERVAL_DAYS", "5");

    let config = Config::from_env().unwrap();

    assert_eq!(config.require_bot_token().unwrap(), "123:abc");
    assert_eq!(config.download_dir, dir.path());
    assert_eq!(config.retention_days, 5);
    assert!(!format!("{:?}", config).contains("123:abc"));
    clear_env();
}

#[test]
#[serial]
fn test_from_env_without_domain_fails() {
    clear_env();
    env::set_var("BOT_TOKEN", "123:abc");

    assert!(Config::from_env().is_err());
    clear_env();
}

#[test]
#[serial]
fn test_missing_token_only_fails_when_required() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    env::set_var("DOWNLOAD_DOMAIN", "https://dl.example.com");
    env::set_var("DOWNLOAD_PATH", dir.path());

    let config = Config::from_env().unwrap();
    assert!(config.require_bot_token().is_err());
    clear_env();
}
