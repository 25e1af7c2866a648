use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber.
///
/// Stdout belongs to the plugin output, so logging stays off unless `RUST_LOG` asks for it or the
/// probe runs with `--verbose`.
pub fn init(verbose: bool) {
    let default = if verbose { "nagios_probes=debug" } else { "off" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when probes run inside tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
