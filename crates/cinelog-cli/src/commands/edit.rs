use super::{progress, prompts, show, Session};
use crate::output::Output;
use crate::render;
use cinelog_core::DetailView;
use cinelog_models::{EntryField, EntryId, Rating};
use color_eyre::eyre::eyre;
use color_eyre::Result;

/// `Some(None)` clears the rating, `None` leaves it alone.
pub fn rating_change(rating: Option<Rating>, no_rating: bool) -> Option<Option<Rating>> {
    if no_rating {
        Some(None)
    } else {
        rating.map(Some)
    }
}

/// Parse a `field=value` assignment. The value may be empty to clear a field.
pub fn parse_assignment(raw: &str) -> Result<(EntryField, String)> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| eyre!("Expected FIELD=VALUE, got '{}'", raw))?;
    Ok((field.trim().parse()?, value.to_string()))
}

/// Re-prompt every field of the open draft.
pub fn prompt_edit(view: &mut DetailView) -> Result<()> {
    let draft = view
        .draft()
        .cloned()
        .ok_or_else(|| eyre!("Not editing entry {}", view.id()))?;
    for (field, value) in prompts::prompt_draft(&draft)? {
        view.update_field(field, &value)?;
    }
    Ok(())
}

/// Send the open draft. Returns whether the backend accepted it; a declined
/// or unchanged draft is dropped and the view goes back to read mode.
pub async fn save_draft(
    view: &mut DetailView,
    session: &Session,
    output: &Output,
    interactive: bool,
) -> Result<bool> {
    loop {
        let changes = view.unsaved_changes();
        if changes.is_empty() {
            output.info("Nothing changed");
            view.cancel_edit()?;
            return Ok(false);
        }

        if let (Some(current), Some(draft)) = (view.entry(), view.draft()) {
            for line in render::change_lines(current, draft, &changes) {
                output.info(format!("  {}", line));
            }
        }
        if interactive && !prompts::prompt_yes_no("Save these changes?", Some(true))? {
            view.cancel_edit()?;
            output.warn("Changes discarded");
            return Ok(false);
        }

        progress::with_spinner(output, "Saving...", view.save(session.backend())).await?;
        let message = match view.error() {
            None => {
                if let Some(saved) = view.entry() {
                    output.success(format!("Saved '{}'", saved.title));
                }
                return Ok(true);
            }
            Some(message) => message.to_string(),
        };

        if !interactive {
            return Err(eyre!("{}", message));
        }
        output.error(&message);
        if !prompts::prompt_yes_no("Edit the fields and try again?", Some(true))? {
            view.cancel_edit()?;
            output.warn("Changes discarded");
            return Ok(false);
        }
        prompt_edit(view)?;
    }
}

pub async fn run_edit(
    session: &Session,
    id: EntryId,
    set: Vec<String>,
    rating: Option<Option<Rating>>,
    interactive: bool,
    output: &Output,
) -> Result<()> {
    let assignments = set
        .iter()
        .map(|raw| parse_assignment(raw))
        .collect::<Result<Vec<_>>>()?;
    if assignments.is_empty() && rating.is_none() && !interactive {
        return Err(eyre!("Nothing to change: pass --set FIELD=VALUE, --rating, --no-rating or --interactive"));
    }

    let mut view = show::load_readable(session, id, output).await?;
    view.begin_edit()?;
    for (field, value) in &assignments {
        view.update_field(*field, value)?;
    }
    if let Some(rating) = rating {
        view.set_rating(rating)?;
    }
    if interactive {
        prompt_edit(&mut view)?;
    }

    if save_draft(&mut view, session, output, interactive).await? {
        if let Some(saved) = view.entry() {
            show::print_entry(saved, session, output)?;
        }
    }
    Ok(())
}
