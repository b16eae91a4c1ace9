use std::{path::Path, sync::mpsc};

use tokio::runtime::{self, Runtime};

use crate::{
    chat::WebSocketConnection,
    domain::connection::ConnectionEvent,
    infra::{
        self,
        config::AppConfig,
        error::AppError,
        logging::LogTarget,
        storage_layout::StorageLayout,
    },
    profile::HttpProfileClient,
    usecases::{context::AppContext, session::ChatSession, shell::DefaultShellOrchestrator},
};

const APP_BOOTSTRAPPED: &str = "APP_BOOTSTRAPPED";
const CHAT_SESSION_COMPOSED: &str = "CHAT_SESSION_COMPOSED";

/// How the process is going to use the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Full-screen chat; logs go to a file.
    Interactive,
    /// One-shot command; logs go to stderr.
    OneShot,
}

pub fn bootstrap(config_path: Option<&Path>, mode: LaunchMode) -> Result<AppContext, AppError> {
    let mut context = build_context(config_path)?;

    let target = log_target(&context.config, mode)?;
    let guard = infra::logging::init(&context.config.logging, &target)?;
    context.hold_log_guard(guard);

    tracing::debug!(code = APP_BOOTSTRAPPED, mode = ?mode, config = ?context.config, "bootstrap complete");
    Ok(context)
}

fn build_context(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let config = infra::config::load(config_path)?;
    let runtime = build_runtime()?;

    Ok(AppContext::new(config, runtime))
}

fn build_runtime() -> Result<Runtime, AppError> {
    runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("rchat-io")
        .enable_all()
        .build()
        .map_err(AppError::RuntimeInit)
}

fn log_target(config: &AppConfig, mode: LaunchMode) -> Result<LogTarget, AppError> {
    match mode {
        LaunchMode::OneShot => Ok(LogTarget::Stderr),
        LaunchMode::Interactive => match &config.logging.file {
            Some(path) => Ok(LogTarget::File(path.clone())),
            None => Ok(LogTarget::File(StorageLayout::resolve()?.default_log_file())),
        },
    }
}

/// Resolves the chat id: the override wins over config; blank is an error.
pub fn resolve_chat_id(config: &AppConfig, chat_id_override: Option<&str>) -> Result<String, AppError> {
    let chat_id = chat_id_override.unwrap_or(config.chat.chat_id.as_str()).trim();
    if chat_id.is_empty() {
        return Err(AppError::MissingChatId);
    }

    Ok(chat_id.to_owned())
}

/// Opens the chat connection and wraps it in a shell orchestrator. Connection
/// events are delivered on `event_tx`.
pub fn compose_shell(
    context: &AppContext,
    chat_id_override: Option<&str>,
    event_tx: mpsc::Sender<ConnectionEvent>,
) -> Result<DefaultShellOrchestrator<WebSocketConnection>, AppError> {
    let chat_id = resolve_chat_id(&context.config, chat_id_override)?;
    let connection = WebSocketConnection::open(
        context.runtime.handle().clone(),
        &context.config.chat.endpoint,
        &chat_id,
        event_tx,
    )?;
    tracing::info!(
        code = CHAT_SESSION_COMPOSED,
        url = %connection.url(),
        sender = %context.config.chat.sender,
        "chat session composed"
    );
    let session = ChatSession::new(chat_id, context.config.chat.sender.clone(), connection);

    Ok(DefaultShellOrchestrator::new(session))
}

pub fn compose_profile_client(context: &AppContext) -> Result<HttpProfileClient, AppError> {
    HttpProfileClient::new(
        context.runtime.handle().clone(),
        &context.config.profile,
        &context.config.auth,
    )
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::usecases::contracts::ShellOrchestrator;

    #[test]
    fn builds_context_with_default_config_when_file_is_missing() {
        let dir = tempfile::tempdir().expect("temp dir");

        let context = build_context(Some(&dir.path().join("missing.toml")))
            .expect("context should build from defaults");

        assert_eq!(context.config, AppConfig::default());
    }

    #[test]
    fn chat_id_override_wins_over_config() {
        let mut config = AppConfig::default();
        config.chat.chat_id = "from-config".to_owned();

        assert_eq!(
            resolve_chat_id(&config, Some(" cli ")).expect("chat id"),
            "cli"
        );
        assert_eq!(resolve_chat_id(&config, None).expect("chat id"), "from-config");
    }

    #[test]
    fn blank_chat_id_is_rejected() {
        let config = AppConfig::default();

        assert!(matches!(
            resolve_chat_id(&config, None),
            Err(AppError::MissingChatId)
        ));
        assert!(matches!(
            resolve_chat_id(&config, Some("  ")),
            Err(AppError::MissingChatId)
        ));
    }

    #[test]
    fn one_shot_commands_log_to_stderr() {
        let target = log_target(&AppConfig::default(), LaunchMode::OneShot).expect("target");

        assert_eq!(target, LogTarget::Stderr);
    }

    #[test]
    fn interactive_mode_honors_configured_log_file() {
        let mut config = AppConfig::default();
        config.logging.file = Some(PathBuf::from("/tmp/rchat-test.log"));

        let target = log_target(&config, LaunchMode::Interactive).expect("target");

        assert_eq!(target, LogTarget::File(PathBuf::from("/tmp/rchat-test.log")));
    }

    #[test]
    fn compose_shell_rejects_non_websocket_endpoint() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut context =
            build_context(Some(&dir.path().join("missing.toml"))).expect("context should build");
        context.config.chat.endpoint = "http://localhost:8080/ws".to_owned();
        let (event_tx, _event_rx) = mpsc::channel();

        let result = compose_shell(&context, Some("c1"), event_tx);

        assert!(matches!(result, Err(AppError::Connection(_))));
    }

    #[test]
    fn compose_shell_starts_in_connecting_state() {
        let dir = tempfile::tempdir().expect("temp dir");
        let context =
            build_context(Some(&dir.path().join("missing.toml"))).expect("context should build");
        let (event_tx, _event_rx) = mpsc::channel();

        let shell = compose_shell(&context, Some("c1"), event_tx).expect("shell should compose");

        assert_eq!(shell.state().chat_id(), "c1");
        assert!(shell.state().is_running());
    }
}
