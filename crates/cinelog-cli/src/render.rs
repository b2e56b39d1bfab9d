//! Text and JSON renderings of entries, summaries and drafts.

use cinelog_models::{Entry, EntryDraft, EntryField, EntrySummary, Rating, StagedPoster};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, Table};
use owo_colors::OwoColorize;
use serde_json::Value;

pub const EMPTY_LIST_MESSAGE: &str = "No movies recorded yet. Use `cinelog record` to add one.";
pub const NOT_AVAILABLE: &str = "Not available";
pub const NO_IMPRESSIONS: &str = "No impressions yet.";

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|name| Cell::new(name).add_attribute(Attribute::Bold))
        .collect()
}

pub fn rating_label(rating: Option<Rating>) -> String {
    match rating {
        Some(rating) => format!("{} {}", rating.stars(), rating),
        None => "Not rated".to_string(),
    }
}

pub fn or_not_available(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}

/// `["SF", "Drama"]` becomes `[SF] [Drama]`.
pub fn genre_chips(genres: &[&str]) -> String {
    let chips: Vec<String> = genres.iter().map(|genre| format!("[{}]", genre)).collect();

    if chips.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        chips.join(" ")
    }
}

pub fn summary_table(entries: &[EntrySummary], placeholder: &str) -> Table {
    let mut table = new_table();
    table.set_header(header(&["ID", "Title", "Rating", "Watched", "Poster"]));

    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.id),
            Cell::new(&entry.title),
            Cell::new(rating_label(entry.rating)),
            Cell::new(
                entry
                    .watched_date
                    .map(|date| date.to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            ),
            Cell::new(entry.poster_or(placeholder)),
        ]);
    }

    table
}

pub fn detail_table(entry: &Entry, placeholder: &str) -> Table {
    let mut table = new_table();
    let actors = entry.actor_list().join(", ");
    let rows = [
        ("Genres", genre_chips(&entry.genre_list())),
        ("Director", or_not_available(&entry.director).to_string()),
        ("Actors", or_not_available(&actors).to_string()),
        (
            "Released",
            entry
                .release_year
                .map(|year| year.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        ("Country", or_not_available(&entry.country).to_string()),
        (
            "Watched on",
            entry
                .watched_date
                .map(|date| date.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        ("Watched via", or_not_available(&entry.watch_method).to_string()),
        ("Rating", rating_label(entry.rating)),
        ("Poster", entry.poster_or(placeholder).to_string()),
    ];

    for (label, value) in rows {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table
}

pub fn print_entry(entry: &Entry, placeholder: &str) {
    println!();
    println!("{} {}", entry.title.bright_cyan().bold(), format!("#{}", entry.id).dimmed());
    println!("{}", detail_table(entry, placeholder));
    println!();
    println!("{}", "Impressions".bold());
    if entry.impressions.trim().is_empty() {
        println!("{}", NO_IMPRESSIONS.dimmed());
    } else {
        println!("{}", entry.impressions);
    }
    println!();
}

/// Draft fields in form order, with the staged poster if any.
pub fn draft_table(draft: &EntryDraft, poster: Option<&StagedPoster>) -> Table {
    let mut table = new_table();
    table.set_header(header(&["Field", "Value"]));

    for field in EntryField::ALL {
        let value = match (field, draft.get(field)) {
            (EntryField::Rating, None) => "Not rated".to_string(),
            (_, Some(value)) if !value.is_empty() => value,
            _ => String::new(),
        };
        table.add_row(vec![Cell::new(field.label()), Cell::new(value)]);
    }
    if let Some(poster) = poster {
        table.add_row(vec![
            Cell::new("Poster"),
            Cell::new(format!("{} ({})", poster.file_name(), poster.preview_url())),
        ]);
    }
    table
}

/// `before -> after` lines for the fields a draft changes.
pub fn change_lines(current: &Entry, draft: &EntryDraft, fields: &[EntryField]) -> Vec<String> {
    let baseline = EntryDraft::from_entry(current);
    fields
        .iter()
        .map(|field| {
            let show = |value: Option<String>| match value {
                Some(value) if !value.is_empty() => value,
                _ => "(empty)".to_string(),
            };
            format!(
                "{}: {} -> {}",
                field.wire_name(),
                show(baseline.get(*field)),
                show(draft.get(*field))
            )
        })
        .collect()
}

/// Entry as JSON with the poster resolved against the placeholder.
pub fn entry_json(entry: &Entry, placeholder: &str) -> serde_json::Result<Value> {
    let mut value = serde_json::to_value(entry)?;
    value["movie_poster"] = Value::String(entry.poster_or(placeholder).to_string());
    Ok(value)
}

pub fn summaries_json(entries: &[EntrySummary], placeholder: &str) -> serde_json::Result<Value> {
    entries
        .iter()
        .map(|entry| {
            let mut value = serde_json::to_value(entry)?;
            value["movie_poster"] = Value::String(entry.poster_or(placeholder).to_string());
            Ok(value)
        })
        .collect::<serde_json::Result<Vec<_>>>()
        .map(Value::Array)
}
