use log::LevelFilter;
use log4rs::{
    append::{console::ConsoleAppender, file::FileAppender},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use std::path::Path;
use anyhow::Result;

/// `framesplit_run_<timestamp>.log`, where `timestamp` is `YYYYMMDD_HHMMSS`.
#[must_use]
pub fn log_file_name(timestamp: &str) -> String {
    format!("framesplit_run_{timestamp}.log")
}

/// Routes the `log` facade to both the console and `log_file`.
pub fn setup_file_logging(log_file: &Path, log_level: LevelFilter) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let console_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{m}{n}")))
        .build();

    // Plain format for the file, level and time for grepping
    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {m}{n}"
        )))
        .append(false)
        .build(log_file)?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;

    Ok(())
}
