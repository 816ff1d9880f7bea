//! minied entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::io_ops::{Opened, open_state};
use core_actions::session::HELP_MESSAGE;
use core_actions::{EditorSession, FsStorage, SessionOptions, SuspendingPrompt};
use core_config::{Config, load_from};
use core_input::{ShutdownSignal, StdinBytes};
use core_state::EditorState;
use core_terminal::{CrosstermBackend, TerminalBackend};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "minied.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "minied", version, about = "Minimal terminal text editor")]
struct Args {
    /// File to edit. A missing file is created on the first save.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `minied.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

struct RuntimeContext<'a> {
    state: EditorState,
    notice: Option<String>,
    config: Config,
    shutdown: ShutdownSignal,
    terminal_guard: core_terminal::TerminalGuard<'a>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn run<'a>(&'a mut self, args: &Args) -> Result<RuntimeContext<'a>> {
        self.configure_logging()?;
        Self::install_panic_hook();

        info!(target: "runtime", "startup");
        let config = load_from(args.config.clone())?;
        let Opened { state, notice } =
            open_state(&FsStorage, args.path.as_deref(), config.limits());

        let shutdown = ShutdownSignal::new();
        shutdown.install_termination_handlers()?;

        let title = state.display_name().unwrap_or_else(|| "minied".to_string());
        self.backend.set_title(&title)?;
        let guard = self.backend.enter_guard()?;

        info!(
            target: "runtime.startup",
            path = args.path.as_ref().map(|p| p.display().to_string()).as_deref(),
            line_count = state.document.line_count(),
            notice = notice.as_deref(),
            config_override = args.config.is_some(),
            config_source = config.source.as_ref().map(|p| p.display().to_string()).as_deref(),
            "bootstrap_complete"
        );

        Ok(RuntimeContext {
            state,
            notice,
            config,
            shutdown,
            terminal_guard: guard,
        })
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }

        Ok(())
    }

    /// Restore the terminal before the default hook prints, so the panic message is readable.
    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                core_terminal::emergency_restore();
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    let mut context = startup.run(&args)?;

    let source = StdinBytes::spawn(context.config.escape_timeout())?;
    let options = SessionOptions::from_config(&context.config);
    let prompt = SuspendingPrompt::new(context.terminal_guard.backend_mut());
    let mut session = EditorSession::new(
        context.state,
        source,
        std::io::stdout(),
        FsStorage,
        prompt,
        options,
    )
    .with_shutdown(context.shutdown);
    session.post_message(context.notice.unwrap_or_else(|| HELP_MESSAGE.to_string()));

    let result = session.run();
    if let Err(e) = &result {
        error!(target: "runtime", error = %e, "fatal");
    }
    info!(target: "runtime", "shutdown");
    result
}
