use crate::config::Environment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "local_service_connect=debug,tower_http=debug,info",
        Environment::Staging => "local_service_connect=debug,tower_http=info,info",
        Environment::Prod => "local_service_connect=info,tower_http=info,warn",
    }
}

/// Install the global subscriber. Returns false if one was already set.
pub fn init_logging(env: &Environment) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(env.is_dev())
        .with_line_number(env.is_dev());

    // JSON lines for log shipping in production
    let installed = if matches!(env, Environment::Prod) {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.pretty())
            .try_init()
    };

    match installed {
        Ok(()) => {
            tracing::info!(env = ?env, "Logging initialized");
            true
        }
        Err(_) => false,
    }
}
