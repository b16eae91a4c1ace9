use tokio::runtime::Runtime;
use tracing_appender::non_blocking::WorkerGuard;

use crate::infra::config::AppConfig;

/// Process-wide state assembled at startup. Dropping it shuts the runtime
/// down and flushes file logs.
pub struct AppContext {
    pub config: AppConfig,
    pub runtime: Runtime,
    log_guard: Option<WorkerGuard>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("file_logging", &self.log_guard.is_some())
            .finish_non_exhaustive()
    }
}

impl AppContext {
    pub fn new(config: AppConfig, runtime: Runtime) -> Self {
        Self {
            config,
            runtime,
            log_guard: None,
        }
    }

    pub fn hold_log_guard(&mut self, guard: Option<WorkerGuard>) {
        self.log_guard = guard;
    }
}
