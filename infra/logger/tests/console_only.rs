use rally_logger::{LevelFilter, Logger};

#[test]
fn console_logger_holds_no_file_guard() {
    let logger = Logger::builder()
        .name("rally-console")
        .level(LevelFilter::WARN)
        .init()
        .expect("console logger should install");

    tracing::warn!(slot = "cn-monday-1830", "console only");
    assert!(logger.guard().is_none());
}
