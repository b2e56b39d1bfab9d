use super::{progress, prompts, show, Session};
use crate::output::Output;
use crate::render;
use crate::RecordArgs;
use cinelog_core::{RecordPhase, RecordView, Route};
use cinelog_models::{EntryField, StagedPoster};
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use std::path::Path;
use tracing::debug;

/// Read an image from disk and stage it for upload.
pub async fn load_poster(path: &Path) -> Result<StagedPoster> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| eyre!("Invalid poster path: {}", path.display()))?;
    let bytes = tokio::fs::read(path)
        .await
        .wrap_err_with(|| format!("Failed to read poster {}", path.display()))?;
    let location = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    debug!("Staged poster {} ({} bytes)", file_name, bytes.len());

    Ok(StagedPoster::new(file_name, bytes, format!("file://{}", location.display()))?)
}

fn apply_args(view: &mut RecordView, args: &RecordArgs) -> Result<()> {
    let values = [
        (EntryField::Title, &args.title),
        (EntryField::Genres, &args.genres),
        (EntryField::Director, &args.director),
        (EntryField::Actors, &args.actors),
        (EntryField::ReleaseYear, &args.release_year),
        (EntryField::Country, &args.country),
        (EntryField::WatchedDate, &args.watched_date),
        (EntryField::WatchMethod, &args.watch_method),
        (EntryField::Impressions, &args.impressions),
    ];
    for (field, value) in values {
        if let Some(value) = value {
            view.update_field(field, value)?;
        }
    }

    if args.no_rating {
        view.set_rating(None)?;
    } else if let Some(rating) = args.rating {
        view.set_rating(Some(rating))?;
    }
    Ok(())
}

/// Prompt for every field, then optionally for a poster.
pub async fn prompt_record(view: &mut RecordView, output: &Output) -> Result<()> {
    for (field, value) in prompts::prompt_draft(view.draft())? {
        view.update_field(field, &value)?;
    }

    let current = view.poster().map(|poster| poster.file_name().to_string());
    let path = prompts::prompt_string("Poster image (JPEG or PNG, empty to skip)", current.as_deref())?;
    let path = path.trim();
    if path.is_empty() {
        view.clear_poster()?;
    } else if current.as_deref() != Some(path) {
        match load_poster(Path::new(path)).await {
            Ok(poster) => view.attach_poster(poster)?,
            Err(e) => output.warn(format!("Poster not attached: {}", e)),
        }
    }
    Ok(())
}

fn has_title(view: &RecordView) -> bool {
    view.draft()
        .title
        .as_deref()
        .is_some_and(|title| !title.trim().is_empty())
}

/// Submit until the backend accepts the record or the user gives up.
/// Returns the route to follow, or `None` when the draft was abandoned.
pub async fn submit_record(
    view: &mut RecordView,
    session: &Session,
    output: &Output,
    interactive: bool,
) -> Result<Option<Route>> {
    loop {
        if !has_title(view) {
            if !interactive {
                return Err(eyre!("A title is required: pass --title or use --interactive"));
            }
            output.error("A title is required");
            prompt_record(view, output).await?;
            continue;
        }

        if interactive {
            println!("{}", render::draft_table(view.draft(), view.poster()));
            if !prompts::prompt_yes_no("Save this record?", Some(true))? {
                output.warn("Record discarded");
                return Ok(None);
            }
        }

        let route = progress::with_spinner(output, "Saving...", view.submit(session.backend())).await?;
        if let RecordPhase::Submitted(created) = view.phase() {
            output.success(format!("Recorded '{}' (#{})", created.title, created.id));
            show::print_entry(created, session, output)?;
            return Ok(route);
        }

        let message = view.error().unwrap_or("Failed to save the record").to_string();
        if !interactive {
            return Err(eyre!("{}", message));
        }
        output.error(&message);
        if !prompts::prompt_yes_no("Edit the fields and try again?", Some(true))? {
            return Ok(None);
        }
        prompt_record(view, output).await?;
    }
}

pub async fn run_record(session: &Session, args: RecordArgs, output: &Output) -> Result<()> {
    let mut view = RecordView::new();
    apply_args(&mut view, &args)?;
    if let Some(path) = &args.poster {
        view.attach_poster(load_poster(path).await?)?;
    }

    if args.interactive {
        prompt_record(&mut view, output).await?;
    }

    submit_record(&mut view, session, output, args.interactive).await?;
    Ok(())
}
