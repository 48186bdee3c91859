use reko_core::Config;
use reko_telemetry::{atomic_write, Paths};
use serial_test::serial;

#[test]
#[serial]
fn test_config_loaded_from_reko_home() {
    let temp = tempfile::TempDir::new().unwrap();
    std::env::set_var("REKO_HOME", temp.path());

    let paths = Paths::new().unwrap();
    assert_eq!(paths.home_reko, temp.path());

    // nothing written yet, so defaults apply
    let config = Config::load(&paths.config_file()).unwrap();
    assert_eq!(config, Config::new());

    atomic_write(
        &paths.config_file(),
        b"generation:\n  max_length: 8\nreinforcement_learning:\n  learning_rate: 0.2\n",
    )
    .unwrap();
    let config = Config::load(&paths.config_file()).unwrap();
    assert_eq!(config.generation.max_length, 8);
    assert_eq!(config.reinforcement_learning.learning_rate, 0.2);
    assert_eq!(config.reinforcement_learning.discount_factor, 0.9);

    std::env::remove_var("REKO_HOME");
}

#[test]
#[serial]
fn test_invalid_config_is_rejected() {
    let temp = tempfile::TempDir::new().unwrap();
    std::env::set_var("REKO_HOME", temp.path());

    let paths = Paths::new().unwrap();
    atomic_write(
        &paths.config_file(),
        b"reinforcement_learning:\n  discount_factor: 1.5\n",
    )
    .unwrap();
    assert!(Config::load(&paths.config_file()).is_err());

    std::env::remove_var("REKO_HOME");
}
