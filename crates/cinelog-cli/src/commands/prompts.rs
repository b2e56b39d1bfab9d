use cinelog_models::{EntryDraft, EntryField};
use color_eyre::Result;
use dialoguer::{Confirm, Input, Select};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder.interact_text().map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Pick one item; `None` when the user backs out with Esc or q.
pub fn select(prompt: &str, items: &[String]) -> Result<Option<usize>> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))
}

/// Prompt for one draft field, pre-filled with its current value. Input is
/// checked against the same rules the draft applies.
pub fn prompt_field(field: EntryField, current: Option<String>) -> Result<String> {
    Input::<String>::new()
        .with_prompt(field.label())
        .with_initial_text(current.unwrap_or_default())
        .allow_empty(true)
        .validate_with(move |input: &String| -> Result<(), String> {
            EntryDraft::default().set(field, input).map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read {}: {}", field, e))
}

/// Walk every field in form order; returns the answers to apply.
pub fn prompt_draft(draft: &EntryDraft) -> Result<Vec<(EntryField, String)>> {
    EntryField::ALL
        .into_iter()
        .map(|field| Ok((field, prompt_field(field, draft.get(field))?)))
        .collect()
}
