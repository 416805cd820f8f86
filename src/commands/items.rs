//! Implementation of `jindo skills|agents|commands list` and `show`.

use std::fs;

use serde::Serialize;

use crate::{
    catalog::{Item, ItemKind, find, scan},
    commands::ColorChoice,
    diagnostics::Diagnostics,
    error::{Error, Result},
    palette,
    paths::display_path,
    scope::Scope,
};

/// Widest identifier column before truncation.
const MAX_ID_WIDTH: usize = 30;
/// Widest description column before truncation.
const MAX_DESCRIPTION_WIDTH: usize = 50;
/// Widest extra (tools/model) column before truncation.
const MAX_EXTRA_WIDTH: usize = 30;
/// Marker appended to truncated cells.
const ELLIPSIS: &str = "...";

/// JSON payload for `list --json`.
#[derive(Debug, Serialize)]
struct ScopedItems {
    /// Items under `~/.claude`, omitted for `--local`.
    #[serde(skip_serializing_if = "Option::is_none")]
    global: Option<Vec<Item>>,
    /// Items under `./.claude`, omitted when that directory is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    local: Option<Vec<Item>>,
}

/// Execute `<kind> list`.
///
/// Lists the global scope followed by the project scope when it has items.
/// With `local`, only the project scope is listed.
pub async fn list(
    color: ColorChoice,
    verbose: bool,
    kind: ItemKind,
    local: bool,
    json: bool,
) -> Result<()> {
    let mut diagnostics = Diagnostics::new(verbose);
    let use_color = color.enabled();

    let global = if local {
        None
    } else {
        let dir = Scope::Global.dir(kind.dir_name())?;
        let items = scan(kind, &dir, &mut diagnostics)?;
        Some((dir, items))
    };
    let project = match Scope::existing_local_dir(kind.dir_name())? {
        Some(dir) => Some(scan(kind, &dir, &mut diagnostics)?),
        None => None,
    };

    if json {
        let payload = ScopedItems {
            global: global.map(|(_, items)| items),
            local: project,
        };
        let rendered = serde_json::to_string_pretty(&payload)
            .map_err(|error| Error::JsonSerialize { source: error })?;
        println!("{rendered}");
        return Ok(());
    }

    if let Some((dir, items)) = &global {
        let heading = format!("=== {} ({}) ===", Scope::Global.label(), display_path(dir));
        println!("{}", palette::fmt_heading(&heading, use_color));
        if items.is_empty() {
            println!("No {} found.", kind.dir_name());
        } else {
            print_table(kind, items, use_color);
        }
    }

    match project.filter(|items| !items.is_empty()) {
        Some(items) => {
            if global.is_some() {
                println!();
            }
            let heading = format!("=== {} (.claude/{}/) ===", Scope::Local.label(), kind.dir_name());
            println!("{}", palette::fmt_heading(&heading, use_color));
            print_table(kind, &items, use_color);
        }
        None if local => println!("No {} found in .claude/{}/.", kind.dir_name(), kind.dir_name()),
        None => {}
    }

    diagnostics.print_skipped_summary();
    Ok(())
}

/// Execute `<kind> show`.
pub async fn show(
    color: ColorChoice,
    verbose: bool,
    kind: ItemKind,
    name: String,
    local: bool,
    brief: bool,
) -> Result<()> {
    let mut diagnostics = Diagnostics::new(verbose);
    let dir = Scope::from_local_flag(local).dir(kind.dir_name())?;
    let item = find(kind, &dir, &name, &mut diagnostics)?;

    if brief {
        for line in brief_lines(&item, color.enabled()) {
            println!("{line}");
        }
        return Ok(());
    }

    let contents = fs::read_to_string(&item.path).map_err(|error| Error::ItemRead {
        path: item.path.clone(),
        source: error,
    })?;
    print!("{contents}");
    Ok(())
}

/// Metadata lines for `show --brief`.
fn brief_lines(item: &Item, use_color: bool) -> Vec<String> {
    let label = |text: &str| palette::fmt_label(&format!("{text:<15}"), use_color);
    let mut lines = vec![
        format!("{}{}", label("Name:"), palette::fmt_item_name(&item.name, use_color)),
        format!("{}{}", label("Description:"), item.description),
        format!("{}{}", label("Path:"), display_path(&item.path)),
    ];
    if !item.allowed_tools.is_empty() {
        lines.push(format!("{}{}", label("Allowed tools:"), item.allowed_tools.join(", ")));
    }
    if let Some(model) = &item.model {
        lines.push(format!("{}{}", label("Model:"), model));
    }
    lines
}

/// Header of the kind-specific third column, if the kind has one.
fn extra_header(kind: ItemKind) -> Option<&'static str> {
    match kind {
        ItemKind::Skill => Some("ALLOWED-TOOLS"),
        ItemKind::Agent => Some("MODEL"),
        ItemKind::Command => None,
    }
}

/// Kind-specific third column value.
fn extra_value(kind: ItemKind, item: &Item) -> String {
    match kind {
        ItemKind::Skill => item.allowed_tools.join(", "),
        ItemKind::Agent => item.model.clone().unwrap_or_default(),
        ItemKind::Command => String::new(),
    }
}

/// Print items as an aligned table followed by a total line.
fn print_table(kind: ItemKind, items: &[Item], use_color: bool) {
    for line in table_lines(kind, items) {
        println!("{line}");
    }
    let total = format!("\nTotal: {} {}", items.len(), kind.dir_name());
    println!("{}", palette::fmt_description(&total, use_color));
}

/// Build the header, rule, and row lines of an item table.
fn table_lines(kind: ItemKind, items: &[Item]) -> Vec<String> {
    let extra = extra_header(kind);
    let id_width = column_width("ID", items.iter().map(|item| item.id.as_str()), MAX_ID_WIDTH);
    let description_width = column_width(
        "DESCRIPTION",
        items.iter().map(|item| item.description.as_str()),
        MAX_DESCRIPTION_WIDTH,
    );
    let extras = items
        .iter()
        .map(|item| extra_value(kind, item))
        .collect::<Vec<_>>();
    let extra_width = extra.map(|header| {
        column_width(header, extras.iter().map(String::as_str), MAX_EXTRA_WIDTH)
    });

    let row = |id: &str, description: &str, extra_cell: &str| {
        let mut line = format!(
            "{:<id_width$}  {:<description_width$}",
            truncate(id, id_width),
            truncate(description, description_width),
        );
        if let Some(width) = extra_width {
            line.push_str(&format!("  {:<width$}", truncate(extra_cell, width)));
        }
        line.trim_end().to_string()
    };

    let mut lines = vec![row("ID", "DESCRIPTION", extra.unwrap_or_default())];
    let mut rule = format!("{}  {}", "-".repeat(id_width), "-".repeat(description_width));
    if let Some(width) = extra_width {
        rule.push_str(&format!("  {}", "-".repeat(width)));
    }
    lines.push(rule);

    for (item, extra_cell) in items.iter().zip(&extras) {
        lines.push(row(&item.id, &item.description, extra_cell));
    }
    lines
}

/// Width of a column: the widest cell or header, capped at `max`.
fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>, max: usize) -> usize {
    cells
        .map(|cell| cell.chars().count())
        .chain([header.chars().count()])
        .max()
        .unwrap_or_default()
        .min(max)
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(ELLIPSIS.len());
    let mut cut = text.chars().take(keep).collect::<String>();
    cut.push_str(ELLIPSIS);
    cut
}
