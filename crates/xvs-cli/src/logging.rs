use tracing::level_filters::LevelFilter;

/// Map the numeric `--verbosity` flag to a log level.
///
/// 0 = error, 1 = warn, 2 = info, 3 and above = debug.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

/// Install the global subscriber. Logs go to stderr so stdout carries only
/// the change report.
pub fn init(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_max_level(level_for(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
