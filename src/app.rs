use std::{path::Path, sync::mpsc};

use anyhow::{Context, Result};

use crate::{
    chat,
    cli::{Cli, Command},
    domain::{self, profile::ProfileView},
    infra, profile, ui,
    usecases::{
        self,
        bootstrap::{self, LaunchMode},
        profile::{delete_paste, load_profile, ProfileSource},
    },
};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command_or_default() {
        Command::Run { chat_id } => run_chat(cli.config.as_deref(), chat_id.as_deref()),
        Command::Profile => run_profile(cli.config.as_deref(), None),
        Command::DeletePaste { id } => run_profile(cli.config.as_deref(), Some(&id)),
    }
}

fn log_module_boundaries() {
    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        chat = chat::module_name(),
        profile = profile::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );
}

fn run_chat(config_path: Option<&Path>, chat_id: Option<&str>) -> Result<()> {
    let context = bootstrap::bootstrap(config_path, LaunchMode::Interactive)?;
    log_module_boundaries();

    let (event_tx, event_rx) = mpsc::channel();
    let mut orchestrator = bootstrap::compose_shell(&context, chat_id, event_tx)?;
    let mut event_source = ui::ShellEventSource::new(event_rx, ui::CrosstermEventSource);

    ui::shell::start(&context, &mut event_source, &mut orchestrator)
}

fn run_profile(config_path: Option<&Path>, delete_id: Option<&str>) -> Result<()> {
    let context = bootstrap::bootstrap(config_path, LaunchMode::OneShot)?;
    log_module_boundaries();

    let client = bootstrap::compose_profile_client(&context)?;
    let (view, outcome) = execute_profile_command(&client, delete_id);

    for line in ui::profile_report(&view) {
        println!("{line}");
    }

    outcome
}

/// Loads the profile and optionally deletes one paste. The view reflects
/// whatever succeeded, even when a later step failed.
fn execute_profile_command(
    source: &dyn ProfileSource,
    delete_id: Option<&str>,
) -> (ProfileView, Result<()>) {
    let mut view = ProfileView::default();

    if let Err(error) = load_profile(source, &mut view) {
        return (view, Err::<(), _>(error).context("failed to load profile"));
    }

    let outcome = match delete_id {
        Some(id) => delete_paste(source, &mut view, id)
            .with_context(|| format!("failed to delete paste {id}")),
        None => Ok(()),
    };

    (view, outcome)
}
