use super::{progress, Session};
use crate::output::Output;
use crate::render;
use cinelog_core::{ListState, ListView};
use color_eyre::Result;

/// Mount the list and wait for its one fetch.
pub async fn load_list(session: &Session, output: &Output) -> ListView {
    let mut view = ListView::mount();
    progress::with_spinner(output, "Loading your movies...", view.load(session.backend())).await;
    view
}

pub async fn run_list(session: &Session, output: &Output) -> Result<()> {
    let view = load_list(session, output).await;

    let entries = match view.state() {
        ListState::Loaded(entries) => entries,
        ListState::Failed(message) => return Err(color_eyre::eyre::eyre!("{}", message)),
        ListState::Loading => return Ok(()),
    };

    if !output.is_human() {
        output.json(&render::summaries_json(entries, session.placeholder())?);
        return Ok(());
    }

    if view.is_empty_state() {
        output.info(render::EMPTY_LIST_MESSAGE);
    } else if !output.is_quiet() {
        println!("{}", render::summary_table(entries, session.placeholder()));
        output.info(format!("{} movies recorded", entries.len()));
    }
    Ok(())
}
