use env_logger::Env;
use log::LevelFilter;

/// Log level for the `-v`/`-q` flags.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

/// Install the global logger. `RUST_LOG`, when set, wins over the flags.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = level_for(verbose, quiet);
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .format_timestamp_millis()
        .try_init();
}
