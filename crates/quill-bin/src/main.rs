//! Quill entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::Session;
use core_config::load_from;
use core_input::CrosstermInput;
use core_render::RenderEngine;
use core_terminal::{CrosstermBackend, TerminalBackend};
use quill::{EditorRuntime, initial_state};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE_NAME: &str = "quill.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "Quill terminal text editor")]
struct Args {
    /// File to open. A missing file is created on first save.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `quill.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

/// Log to `quill.log` in the working directory, truncated each run. The
/// returned guard flushes the background writer when dropped.
fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE_NAME);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let config = load_from(args.config.clone())?;
    let state = initial_state(args.path.as_deref(), config.tab_stop());
    info!(
        target: "runtime.startup",
        path = args.path.as_ref().map(|p| p.display().to_string()).as_deref(),
        config_override = args.config.is_some(),
        tab_stop = config.tab_stop(),
        rows = state.buffer.num_rows(),
        "bootstrap_complete"
    );

    let mut backend = CrosstermBackend::new();
    backend.set_title("quill")?;
    let mut terminal = backend.enter_guard()?;
    let session = Session::new(state, config.quit_times());
    let mut runtime = EditorRuntime::new(
        &mut *terminal,
        CrosstermInput,
        session,
        RenderEngine::new(config.message_timeout()),
        config.poll_interval(),
    );
    runtime.run()
}
