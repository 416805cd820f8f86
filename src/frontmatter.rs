//! YAML frontmatter parsing for skill, agent, and command files.

use serde::Deserialize;

/// Parsed frontmatter fields. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    /// The declared name, if any.
    pub name: Option<String>,
    /// The declared description.
    pub description: String,
    /// Tools a skill may use, from `allowed-tools`.
    pub allowed_tools: Vec<String>,
    /// Model an agent runs on.
    pub model: Option<String>,
}

/// Raw frontmatter fields as written in the file.
#[derive(Debug, Deserialize)]
struct RawFrontmatter {
    /// The declared name.
    name: Option<String>,
    /// The declared description.
    description: Option<String>,
    /// Allowed tools, either comma separated or a YAML list.
    #[serde(rename = "allowed-tools")]
    allowed_tools: Option<ToolList>,
    /// Agent model.
    model: Option<String>,
}

/// The two accepted spellings of `allowed-tools`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ToolList {
    /// `allowed-tools: Read, Grep`
    Inline(String),
    /// `allowed-tools: [Read, Grep]`
    List(Vec<String>),
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, Clone)]
pub struct FrontmatterError {
    /// A human-readable error message.
    pub message: String,
}

impl FrontmatterError {
    /// Create a new frontmatter error message.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parse the frontmatter from a markdown file.
///
/// Files without a closed `---` block parse as empty frontmatter; only
/// invalid YAML inside a block is an error.
pub fn parse_frontmatter(contents: &str) -> Result<Frontmatter, FrontmatterError> {
    let Some(bounds) = frontmatter_bounds(contents) else {
        return Ok(Frontmatter::default());
    };
    let block = &contents[bounds.start..bounds.end];
    if block.trim().is_empty() {
        return Ok(Frontmatter::default());
    }

    let raw: RawFrontmatter =
        serde_yaml::from_str(block).map_err(|error| FrontmatterError::new(error.to_string()))?;

    let allowed_tools = match raw.allowed_tools {
        Some(ToolList::Inline(tools)) => split_tools(tools.split(',')),
        Some(ToolList::List(tools)) => split_tools(tools.iter().map(String::as_str)),
        None => Vec::new(),
    };

    Ok(Frontmatter {
        name: non_empty(raw.name),
        description: raw.description.unwrap_or_default().trim().to_string(),
        allowed_tools,
        model: non_empty(raw.model),
    })
}

/// Trim tool names and drop empty entries.
fn split_tools<'a>(tools: impl Iterator<Item = &'a str>) -> Vec<String> {
    tools
        .map(str::trim)
        .filter(|tool| !tool.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim an optional field, treating blank values as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Byte range bounds for frontmatter in a document.
#[derive(Debug, Clone, Copy)]
struct FrontmatterBounds {
    /// Start byte index of the YAML payload.
    start: usize,
    /// End byte index of the YAML payload.
    end: usize,
}

/// Locate the byte range containing frontmatter in a document.
fn frontmatter_bounds(contents: &str) -> Option<FrontmatterBounds> {
    let mut offset = 0;
    let mut lines = contents.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim() != "---" {
        return None;
    }
    offset += first.len();
    let start = offset;

    for line in lines {
        if line.trim() == "---" {
            return Some(FrontmatterBounds { start, end: offset });
        }
        offset += line.len();
    }

    None
}
