use super::{delete, edit, list, prompts, record, show, Session};
use crate::output::Output;
use crate::render;
use cinelog_core::{ListState, RecordView, Route};
use cinelog_models::EntryId;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing::debug;

/// Follow routes from screen to screen until the user quits. Every screen is
/// mounted fresh, so a revisited list or entry is always re-fetched.
pub async fn run_browse(session: &Session, output: &Output) -> Result<()> {
    if !super::progress::is_interactive() || !output.is_human() {
        return Err(eyre!("browse needs an interactive terminal and human output"));
    }

    let mut route = Route::List;
    loop {
        debug!("Browsing to {:?}", route);
        let next = match route {
            Route::List => list_screen(session, output).await?,
            Route::Detail(id) => detail_screen(session, id, output).await?,
            Route::Record => record_screen(session, output).await?,
        };
        match next {
            Some(next) => route = next,
            None => return Ok(()),
        }
    }
}

async fn list_screen(session: &Session, output: &Output) -> Result<Option<Route>> {
    let view = list::load_list(session, output).await;

    let mut items: Vec<String> = match view.state() {
        ListState::Loaded(entries) if !entries.is_empty() => entries
            .iter()
            .map(|entry| format!("{}  {}", entry.title, render::rating_label(entry.rating)))
            .collect(),
        ListState::Failed(message) => {
            output.error(message);
            Vec::new()
        }
        _ => {
            output.info(render::EMPTY_LIST_MESSAGE);
            Vec::new()
        }
    };
    let shown = items.len();
    items.push("+ Record a new movie".to_string());
    items.push("Refresh".to_string());
    items.push("Quit".to_string());

    Ok(match prompts::select("Your movies", &items)? {
        Some(index) if index < shown => view.route_to(index),
        Some(index) if index == shown => Some(Route::Record),
        Some(index) if index == shown + 1 => Some(Route::List),
        _ => None,
    })
}

async fn detail_screen(session: &Session, id: EntryId, output: &Output) -> Result<Option<Route>> {
    let mut view = match show::load_readable(session, id, output).await {
        Ok(view) => view,
        Err(e) => {
            output.error(e.to_string());
            return Ok(Some(Route::List));
        }
    };

    let actions = ["Edit", "Delete", "Back to list"].map(String::from);
    loop {
        if let Some(entry) = view.entry() {
            render::print_entry(entry, session.placeholder());
        }

        match prompts::select("What next?", &actions)? {
            Some(0) => {
                view.begin_edit()?;
                edit::prompt_edit(&mut view)?;
                if let Err(e) = edit::save_draft(&mut view, session, output, true).await {
                    output.error(e.to_string());
                }
            }
            Some(1) => {
                if delete::confirm(&mut view)? {
                    match delete::delete_confirmed(&mut view, session, output).await {
                        Ok(route) => return Ok(Some(route)),
                        Err(e) => output.error(e.to_string()),
                    }
                }
            }
            _ => return Ok(Some(Route::List)),
        }
    }
}

async fn record_screen(session: &Session, output: &Output) -> Result<Option<Route>> {
    let mut view = RecordView::new();
    record::prompt_record(&mut view, output).await?;
    let route = record::submit_record(&mut view, session, output, true).await?;
    Ok(route.or(Some(Route::List)))
}
