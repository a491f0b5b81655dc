use scorepad::config::LogFormat;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry.with(fmt_layer.with_ansi(false).json()).init(),
        LogFormat::Pretty => registry.with(fmt_layer.compact()).init(),
    }
}
