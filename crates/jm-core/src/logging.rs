use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Where formatted events end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// stdout carries ranking output, so the console target is stderr.
    Stderr,
    /// `<dir>/<app>.log`, rotated daily.
    RollingFile(PathBuf),
}

impl LogTarget {
    /// `JM_LOG_DIR` selects a rolling file; anything else logs to stderr.
    pub fn from_env() -> Self {
        match std::env::var_os("JM_LOG_DIR") {
            Some(dir) if !dir.is_empty() => Self::RollingFile(PathBuf::from(dir)),
            _ => Self::Stderr,
        }
    }

    fn make_writer(&self, app_name: &'static str) -> BoxMakeWriter {
        let Self::RollingFile(dir) = self else {
            return BoxMakeWriter::new(std::io::stderr);
        };

        if let Err(err) = std::fs::create_dir_all(dir) {
            eprintln!("failed to create log dir {}: {err}; logging to stderr", dir.display());
            return BoxMakeWriter::new(std::io::stderr);
        }

        let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        BoxMakeWriter::new(non_blocking)
    }
}

/// Install the global fmt subscriber. Filtering follows `RUST_LOG` (default `info`).
/// Calling it twice is harmless; the second install is ignored.
pub fn init_tracing_subscriber(app_name: &'static str) {
    init_with_target(app_name, LogTarget::from_env());
}

pub fn init_with_target(app_name: &'static str, target: LogTarget) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(target.make_writer(app_name))
        .try_init();
}

/// Report panics as `tracing::error!` events before the default hook runs.
pub fn install_tracing_panic_hook(app_name: &'static str) {
    static INSTALLED: OnceLock<()> = OnceLock::new();

    INSTALLED.get_or_init(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".into());
            let message = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".into());

            tracing::error!(application = app_name, %location, panic_message = %message, "panic captured");
            default_hook(info);
        }));
    });
}
