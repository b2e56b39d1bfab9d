use super::{progress, prompts, show, Session};
use crate::output::Output;
use cinelog_core::{DetailView, Route};
use cinelog_models::EntryId;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;

/// Ask before deleting. Declining dismisses the confirmation.
pub fn confirm(view: &mut DetailView) -> Result<bool> {
    let title = view.entry().map(|entry| entry.title.clone()).unwrap_or_default();
    view.request_delete()?;

    let confirmed = prompts::prompt_yes_no(
        &format!("Delete '{}'? This cannot be undone.", title),
        Some(false),
    )?;
    if !confirmed {
        view.dismiss_delete()?;
    }
    Ok(confirmed)
}

/// Issue the delete from an open confirmation.
pub async fn delete_confirmed(view: &mut DetailView, session: &Session, output: &Output) -> Result<Route> {
    let id = view.id();
    let title = view.entry().map(|entry| entry.title.clone()).unwrap_or_default();

    match progress::with_spinner(output, "Deleting...", view.delete(session.backend())).await? {
        Some(route) => {
            output.success(format!("Deleted '{}'", title));
            output.json(&json!({ "deleted": id }));
            Ok(route)
        }
        None => Err(eyre!("{}", view.error().unwrap_or("Failed to delete the movie"))),
    }
}

pub async fn run_delete(session: &Session, id: EntryId, yes: bool, output: &Output) -> Result<()> {
    let mut view = show::load_readable(session, id, output).await?;

    if yes {
        view.request_delete()?;
    } else {
        if !progress::is_interactive() {
            return Err(eyre!("Refusing to delete without confirmation; pass --yes"));
        }
        if !confirm(&mut view)? {
            output.info("Nothing deleted");
            return Ok(());
        }
    }

    delete_confirmed(&mut view, session, output).await?;
    Ok(())
}
