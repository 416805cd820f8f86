//! Implementation of the `jindo list` overview.

use serde::Serialize;

use crate::{
    catalog::{Item, ItemKind, scan},
    commands::ColorChoice,
    diagnostics::Diagnostics,
    error::{Error, Result},
    palette,
    scope::Scope,
};

/// Cap on the name column.
const MAX_NAME_WIDTH: usize = 30;
/// Narrowest description column before wrapping gives up on alignment.
const MIN_DESCRIPTION_WIDTH: usize = 20;
/// Indentation before each item name.
const INDENT: &str = "  ";
/// Gap between the name and description columns.
const GAP: &str = "  ";

/// One entry in the JSON overview.
#[derive(Debug, Serialize)]
struct Summary {
    /// Declared or derived item name.
    name: String,
    /// First sentence of the description.
    description: String,
}

/// JSON payload for `list --json`.
#[derive(Debug, Default, Serialize)]
struct Overview {
    /// Installed skills.
    skills: Vec<Summary>,
    /// Installed agents.
    agents: Vec<Summary>,
    /// Installed slash commands.
    commands: Vec<Summary>,
}

/// Execute the list command.
pub async fn run(color: ColorChoice, verbose: bool, json: bool) -> Result<()> {
    let mut diagnostics = Diagnostics::new(verbose);
    let use_color = color.enabled();

    let mut groups = Vec::new();
    for kind in ItemKind::all() {
        let dir = Scope::Global.dir(kind.dir_name())?;
        groups.push((kind, scan(kind, &dir, &mut diagnostics)?));
    }

    if json {
        let rendered = serde_json::to_string_pretty(&overview(&groups))
            .map_err(|error| Error::JsonSerialize { source: error })?;
        println!("{rendered}");
        return Ok(());
    }

    let width = textwrap::termwidth();
    for (index, (kind, items)) in groups.iter().enumerate() {
        if index > 0 {
            println!();
        }
        let heading = format!("{} ({})", kind.plural_label(), items.len());
        println!("{}", palette::fmt_heading(&heading, use_color));
        for line in group_lines(items, width, use_color) {
            println!("{line}");
        }
    }

    println!();
    println!("{}", total_line(&groups));
    diagnostics.print_skipped_summary();
    diagnostics.print_warning_summary();
    Ok(())
}

/// Build the JSON overview from scanned groups.
fn overview(groups: &[(ItemKind, Vec<Item>)]) -> Overview {
    let mut overview = Overview::default();
    for (kind, items) in groups {
        let summaries = items
            .iter()
            .map(|item| Summary {
                name: item.name.clone(),
                description: first_sentence(&item.description).to_string(),
            })
            .collect();
        match kind {
            ItemKind::Skill => overview.skills = summaries,
            ItemKind::Agent => overview.agents = summaries,
            ItemKind::Command => overview.commands = summaries,
        }
    }
    overview
}

/// Render one group as aligned name/description lines.
fn group_lines(items: &[Item], term_width: usize, use_color: bool) -> Vec<String> {
    if items.is_empty() {
        return vec![format!("{INDENT}(none)")];
    }

    let name_width = items
        .iter()
        .map(|item| item.name.chars().count())
        .max()
        .unwrap_or_default()
        .min(MAX_NAME_WIDTH);
    let description_width = term_width
        .saturating_sub(INDENT.len() + name_width + GAP.len())
        .max(MIN_DESCRIPTION_WIDTH);
    let continuation = " ".repeat(INDENT.len() + name_width + GAP.len());

    let mut lines = Vec::new();
    for item in items {
        let padded = format!("{:<name_width$}", item.name);
        let name = palette::fmt_item_name(&padded, use_color);
        let description = first_sentence(&item.description);
        let wrapped = textwrap::wrap(description, description_width);

        let mut wrapped = wrapped.iter();
        let first = wrapped.next().map(|line| line.to_string()).unwrap_or_default();
        lines.push(format!("{INDENT}{name}{GAP}{first}").trim_end().to_string());
        for line in wrapped {
            lines.push(format!("{continuation}{line}"));
        }
    }
    lines
}

/// Summary line counting every group.
fn total_line(groups: &[(ItemKind, Vec<Item>)]) -> String {
    let total = groups.iter().map(|(_, items)| items.len()).sum::<usize>();
    let parts = groups
        .iter()
        .map(|(kind, items)| format!("{} {}", items.len(), kind.dir_name()))
        .collect::<Vec<_>>();
    format!("Total: {total} items ({})", parts.join(", "))
}

/// Cut a description at the end of its first sentence.
///
/// A sentence ends at `.`, `!`, or `?` followed by whitespace or the end of
/// the text.
fn first_sentence(text: &str) -> &str {
    let text = text.trim();
    let mut chars = text.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        match chars.peek() {
            None => return text,
            Some((_, next)) if next.is_whitespace() => return &text[..index + ch.len_utf8()],
            Some(_) => {}
        }
    }
    text
}
