use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    layer::{Layer, SubscriberExt},
};

/// Tracing setup for the monitor binary. While the interactive view owns the
/// terminal nothing may be written to it, so diagnostics go to an optional
/// debug file; stderr output is only enabled for the one-shot mode.
pub(crate) struct Logging {
    file_guard: Option<WorkerGuard>,
    stderr_guard: Option<WorkerGuard>,
}

impl Logging {
    pub(crate) fn new() -> Self {
        Logging {
            file_guard: None,
            stderr_guard: None,
        }
    }

    pub(crate) fn init(&mut self, interactive: bool, debug: &Option<PathBuf>) -> &mut Self {
        let mut layers = vec![];

        let (stderr_writer, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());
        let stderr_layer = fmt::Layer::default()
            .with_target(false)
            .with_writer(stderr_writer)
            .with_filter(if interactive {
                EnvFilter::default().add_directive(LevelFilter::OFF.into())
            } else {
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::WARN.into())
                    .from_env_lossy()
            })
            .boxed();
        self.stderr_guard = Some(stderr_guard);
        layers.push(stderr_layer);

        if let Some(file_path) = debug {
            let _ = std::fs::remove_file(file_path); // Remove file if it exists
            let file_appender = tracing_appender::rolling::never("", file_path);
            let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(non_blocking_file)
                .with_filter(LevelFilter::TRACE)
                .boxed();
            self.file_guard = Some(file_guard);

            layers.push(file_layer);
        }

        let subscriber = tracing_subscriber::registry().with(layers);

        tracing::subscriber::set_global_default(subscriber)
            .expect("setting default subscriber failed");

        self
    }
}
