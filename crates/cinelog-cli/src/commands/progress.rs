use crate::output::Output;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}

fn spinner(output: &Output, msg: &str) -> ProgressBar {
    if !is_interactive() || !output.is_human() || output.is_quiet() {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Await `task` behind a spinner that is cleared once it settles.
pub async fn with_spinner<F: Future>(output: &Output, msg: &str, task: F) -> F::Output {
    let spinner = spinner(output, msg);
    let result = task.await;
    spinner.finish_and_clear();
    result
}
