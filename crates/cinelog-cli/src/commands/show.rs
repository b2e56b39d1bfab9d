use super::{progress, Session};
use crate::output::Output;
use crate::render;
use cinelog_core::{DetailPhase, DetailView};
use cinelog_models::{Entry, EntryId};
use color_eyre::Result;

pub async fn load_detail(session: &Session, id: EntryId, output: &Output) -> DetailView {
    let mut view = DetailView::mount(id);
    progress::with_spinner(output, "Loading movie...", view.load(session.backend())).await;
    view
}

/// Load the entry, turning a failed fetch into an error.
pub async fn load_readable(session: &Session, id: EntryId, output: &Output) -> Result<DetailView> {
    let view = load_detail(session, id, output).await;
    if let DetailPhase::Failed(message) = view.phase() {
        return Err(color_eyre::eyre::eyre!("{}", message));
    }
    Ok(view)
}

pub fn print_entry(entry: &Entry, session: &Session, output: &Output) -> Result<()> {
    if !output.is_human() {
        output.json(&render::entry_json(entry, session.placeholder())?);
    } else if !output.is_quiet() {
        render::print_entry(entry, session.placeholder());
    }
    Ok(())
}

pub async fn run_show(session: &Session, id: EntryId, output: &Output) -> Result<()> {
    let view = load_readable(session, id, output).await?;
    match view.entry() {
        Some(entry) => print_entry(entry, session, output),
        None => Ok(()),
    }
}
