use rally_domain::config::LoggingConfig;
use rally_logger::{LevelFilter, Logger, LoggerError};
use serial_test::serial;

#[test]
#[serial]
fn second_install_is_rejected() {
    let _logger = Logger::builder()
        .name("rally-first")
        .level(LevelFilter::INFO)
        .init()
        .expect("first init should succeed");

    let err = Logger::from_config("rally-second", &LoggingConfig::default(), true)
        .expect_err("second init should fail");

    assert!(matches!(err, LoggerError::Subscriber { .. }), "got {err:?}");
}

#[test]
#[serial]
fn unknown_level_fails_before_install() {
    let config = LoggingConfig { level: "chatty".to_owned(), ..LoggingConfig::default() };
    let err = Logger::from_config("rally-level", &config, false).expect_err("level is invalid");

    assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    assert!(err.to_string().contains("chatty"));
}
