use dotenvy::dotenv;
use tracing::{error, info};

fn main() -> std::process::ExitCode {
    // load .env first so RUST_LOG and DATABASE_URL apply
    dotenv().ok();
    let cfg = configs::AppConfig::load_or_env();
    let log_format = cfg.as_ref().map(|c| c.server.log_format.as_str()).unwrap_or("compact");
    common::utils::logging::init_logging(log_format);
    info!(service = "blog_api", event = "logger_init", "tracing subscriber initialized");

    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "blog_api", event = "panic", pid, message = %info, "unhandled panic occurred");
    }));

    // config.toml first, env fallbacks otherwise (TOKIO_WORKER_THREADS)
    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "blog_api", event = "config_invalid", error = %format!("{e:#}"), "invalid configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    let worker_threads = cfg.server.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "blog_api", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "blog_api",
        event = "start",
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "blog_api starting"
    );

    // server::run owns Ctrl+C handling and drains in-flight requests before returning
    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(service = "blog_api", event = "stop", pid, "blog_api stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "blog_api", event = "run_failed", error = %format!("{e:#}"), "server::run returned error");
            std::process::ExitCode::FAILURE
        }
    }
}
