// Logging and verbosity control

use tracing::level_filters::LevelFilter;

/// Verbosity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// Quiet mode - errors only
    Quiet = 0,
    /// Normal mode - level from configuration
    Normal = 1,
    /// Verbose mode - debug output
    Verbose = 2,
}

impl VerbosityLevel {
    /// Resolve the level from CLI flags; quiet wins over verbose
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            VerbosityLevel::Quiet
        } else if verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }

    /// Tracing filter for this verbosity, given the configured level name
    pub fn filter(&self, configured: &str) -> LevelFilter {
        match self {
            VerbosityLevel::Quiet => LevelFilter::ERROR,
            VerbosityLevel::Verbose => LevelFilter::DEBUG,
            VerbosityLevel::Normal => parse_level(configured),
        }
    }
}

/// Map a configured level name to a filter, defaulting to INFO
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

/// Initialize logging based on CLI flags and the configured level
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_logging(verbose: bool, quiet: bool, configured: &str) {
    let level = VerbosityLevel::from_flags(verbose, quiet);

    // A subscriber may already be installed by an embedding process
    let _ = tracing_subscriber::fmt()
        .with_max_level(level.filter(configured))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
