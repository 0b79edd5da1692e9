//! Integration tests for Settings loading with layered precedence.
//!
//! These tests only use explicit config files in temp directories.
//! Environment overrides live in `config_env_test.rs` (own process).

use std::fs;

use tempfile::TempDir;

use clap::Parser;

use forkjoin::application::ApplicationError;
use forkjoin::cli::commands::load_settings;
use forkjoin::cli::{Cli, CliError};
use forkjoin::config::Settings;
use forkjoin::exitcode;
use forkjoin::infrastructure::ServiceContainer;

#[test]
fn given_config_file_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("forkjoin.toml");
    fs::write(
        &path,
        r#"
workers = 6

[bench]
sizes = [100, 200, 300]
seed = 42
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.workers, 6);
    assert_eq!(settings.fork_depth, 3, "unspecified field keeps default");
    assert_eq!(settings.bench.sizes, vec![100, 200, 300]);
    assert_eq!(settings.bench.max_value, 10_000);
    assert_eq!(settings.bench.seed, Some(42));
}

#[test]
fn given_zero_workers_in_file_when_load_then_rejected_only_by_validate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("forkjoin.toml");
    fs::write(&path, "workers = 0\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load does not validate");

    assert_eq!(settings.workers, 0);
    assert!(matches!(
        settings.validate(),
        Err(ApplicationError::Config { .. })
    ));
    assert!(matches!(
        ServiceContainer::new(settings),
        Err(ApplicationError::Config { .. })
    ));
}

#[test]
fn given_zero_workers_in_file_and_workers_flag_when_loading_then_flag_wins() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("forkjoin.toml");
    fs::write(&path, "workers = 0\n").unwrap();
    let path_arg = path.to_string_lossy().into_owned();

    let cli = Cli::try_parse_from(["forkjoin", "-w", "4", "-c", &path_arg, "sort", "3", "1", "2"])
        .unwrap();
    let settings = load_settings(&cli).expect("flag overrides file");

    assert_eq!(settings.workers, 4);
}

#[test]
fn given_zero_workers_in_file_without_flag_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("forkjoin.toml");
    fs::write(&path, "workers = 0\n").unwrap();
    let path_arg = path.to_string_lossy().into_owned();

    let cli = Cli::try_parse_from(["forkjoin", "-c", &path_arg, "sort", "1"]).unwrap();
    let err = load_settings(&cli).unwrap_err();

    assert!(matches!(
        err,
        CliError::Application(ApplicationError::Config { .. })
    ));
    assert_eq!(err.exit_code(), exitcode::CONFIG);
}

#[test]
fn given_missing_explicit_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();

    let result = Settings::load(Some(&dir.path().join("absent.toml")));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_malformed_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("forkjoin.toml");
    fs::write(&path, "workers = \"many\"\n").unwrap();

    let result = Settings::load(Some(&path));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_loaded_settings_when_building_container_then_pool_has_configured_workers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("forkjoin.toml");
    fs::write(&path, "workers = 3\nfork_depth = 1\n").unwrap();
    let settings = Settings::load(Some(&path)).unwrap();

    let services = ServiceContainer::new(settings).unwrap();

    assert_eq!(services.pool.workers(), 3);
    assert_eq!(services.sorter.fork_depth(), 1);
    assert_eq!(services.pool.install(rayon::current_num_threads), 3);
}
