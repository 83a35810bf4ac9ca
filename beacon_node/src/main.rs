use clap::{App, Arg};
use client::{Client, ClientConfig, DatabaseBackend};
use slog::{crit, info, o, warn, Drain, Level};
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = ".lighthouse";

fn main() {
    let matches = App::new("Lighthouse")
        .version("0.1.2")
        .author("Sigma Prime <contact@sigmaprime.io>")
        .about("Eth 2.0 beacon-state management core")
        .arg(
            Arg::with_name("datadir")
                .long("datadir")
                .value_name("DIR")
                .help("Data directory for the hot/cold database.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("db")
                .long("db")
                .value_name("DB")
                .help("Type of database to use.")
                .takes_value(true)
                .possible_values(&["disk", "memory"])
                .default_value("disk"),
        )
        .arg(
            Arg::with_name("genesis-validator-count")
                .long("genesis-validator-count")
                .value_name("COUNT")
                .help("Number of deterministic validators to seed the genesis state with.")
                .takes_value(true)
                .default_value("16"),
        )
        .arg(
            Arg::with_name("debug-level")
                .long("debug-level")
                .value_name("LEVEL")
                .help("Logging verbosity.")
                .takes_value(true)
                .possible_values(&["info", "debug", "trace", "warn", "error", "crit"])
                .default_value("info"),
        )
        .get_matches();

    let decorator = slog_term::TermDecorator::new().build();
    let decorator = logging::AlignedTermDecorator::new(decorator, logging::MAX_MESSAGE_WIDTH);
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build();

    let drain = match matches.value_of("debug-level") {
        Some("info") => drain.filter_level(Level::Info),
        Some("debug") => drain.filter_level(Level::Debug),
        Some("trace") => drain.filter_level(Level::Trace),
        Some("warn") => drain.filter_level(Level::Warning),
        Some("error") => drain.filter_level(Level::Error),
        Some("crit") => drain.filter_level(Level::Critical),
        _ => unreachable!("guarded by clap"),
    };

    let log = slog::Logger::root(drain.fuse(), o!());

    warn!(
        log,
        "Ethereum 2.0 is pre-release. This software is experimental."
    );

    let mut config = ClientConfig::default();
    config.data_dir = matches
        .value_of("datadir")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    config.db = match matches.value_of("db") {
        Some("memory") => DatabaseBackend::Memory,
        _ => DatabaseBackend::Disk,
    };
    config.genesis_validator_count = matches
        .value_of("genesis-validator-count")
        .and_then(|s| s.parse().ok())
        .unwrap_or(config.genesis_validator_count);

    match Client::open(&config, log.clone()) {
        Ok(_client) => info!(log, "Beacon node started"; "data_dir" => format!("{:?}", config.data_dir)),
        Err(e) => crit!(log, "Beacon node failed to start"; "reason" => format!("{}", e)),
    }
}
