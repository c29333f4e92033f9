// ABOUTME: Shared logging setup for the oyatz binaries
// ABOUTME: Two functions: init() for plain stderr, init_for() scoped to one crate

use tracing_subscriber::EnvFilter;

/// Standard logging to stderr. Default: INFO level, RUST_LOG override.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Crate-filtered logging to stderr. Default: INFO for the named crates, WARN for everything else.
/// Used by the `oyatz` CLI so reqwest/hyper chatter stays quiet.
pub fn init_for(crate_names: &[&str]) {
    let mut filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    for name in crate_names {
        let directive = format!("{name}=info");
        filter = filter.add_directive(
            directive
                .parse()
                .unwrap_or_else(|_| tracing::Level::INFO.into()),
        );
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
