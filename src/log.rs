use log::LevelFilter;

/// Environment variable that turns on debug logging in the binaries.
pub const DEBUG_ENV_VAR: &str = "CROSSFORGE_DEBUG";

/// Initialize logging for the crossforge binaries.
///
/// # Behavior
/// - `Debug` level if `debug_enabled` is true, otherwise `Info`.
/// - `RUST_LOG`, when set, overrides both.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger(debug_enabled: bool) {
    use std::env;
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    // Let RUST_LOG override our defaults if explicitly set
    if let Ok(spec) = env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    if builder.try_init().is_ok() {
        log::debug!("Logger initialized at {level:?} level");
    }
}

/// Is debug logging requested through [`DEBUG_ENV_VAR`]?
#[must_use]
pub fn debug_from_env() -> bool {
    std::env::var_os(DEBUG_ENV_VAR).is_some()
}
