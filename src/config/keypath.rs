//! Dot-path parsing and traversal over nested tables.
//!
//! A dot-path such as `common.api_keys.tiingo` names a location in the
//! config tree. Reads and deletes never create anything; writes create
//! missing intermediate tables but refuse to descend through a scalar.

use std::borrow::Cow;

use crate::{
    config::value::{Table, Value},
    error::{Error, Result},
};

/// Separator between dot-path segments.
const SEPARATOR: char = '.';

/// Split a raw dot-path into its segments.
///
/// Surrounding whitespace is trimmed first. Empty input and empty segments
/// (leading, trailing, or doubled separators) are rejected. Segments
/// themselves are kept verbatim.
pub fn parse_dot_key(raw: &str) -> Result<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_key(raw));
    }

    let segments = trimmed
        .split(SEPARATOR)
        .map(str::to_string)
        .collect::<Vec<_>>();
    if segments.iter().any(String::is_empty) {
        return Err(invalid_key(raw));
    }

    Ok(segments)
}

/// Read the value at `segments`.
///
/// An empty segment list yields the whole root as a table.
pub fn get_nested<'a>(root: &'a Table, segments: &[String]) -> Result<Cow<'a, Value>> {
    if segments.is_empty() {
        return Ok(Cow::Owned(Value::Table(root.clone())));
    }
    lookup(root, segments).map(Cow::Borrowed)
}

/// Borrow the value at a non-empty segment list.
pub(crate) fn lookup<'a>(root: &'a Table, segments: &[String]) -> Result<&'a Value> {
    let Some((last, parents)) = segments.split_last() else {
        return Err(invalid_key(""));
    };
    let parent = descend(root, parents)?;
    parent.get(last).ok_or_else(|| Error::KeyNotFound {
        key: segments.join("."),
    })
}

/// Assign `value` at `segments`, creating missing intermediate tables.
///
/// The terminal entry is overwritten whatever it held. A scalar at an
/// intermediate position fails with `NotAMap` and is left untouched.
pub fn set_nested(root: &mut Table, segments: &[String], value: Value) -> Result<()> {
    let Some((last, parents)) = segments.split_last() else {
        return Err(invalid_key(""));
    };

    let mut current = root;
    for (index, segment) in parents.iter().enumerate() {
        let entry = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Table(Table::new()));
        match entry {
            Value::Table(table) => current = table,
            _ => {
                return Err(Error::NotAMap {
                    key: segments[..=index].join("."),
                });
            }
        }
    }

    current.insert(last.clone(), value);
    Ok(())
}

/// Remove the entry at `segments`, leaving its siblings in place.
pub fn delete_nested(root: &mut Table, segments: &[String]) -> Result<()> {
    let Some((last, parents)) = segments.split_last() else {
        return Err(invalid_key(""));
    };

    let mut current = root;
    for (index, segment) in parents.iter().enumerate() {
        match current.get_mut(segment) {
            Some(Value::Table(table)) => current = table,
            Some(_) => {
                return Err(Error::NotAMap {
                    key: segments[..=index].join("."),
                });
            }
            None => {
                return Err(Error::KeyNotFound {
                    key: segments[..=index].join("."),
                });
            }
        }
    }

    match current.remove(last) {
        Some(_) => Ok(()),
        None => Err(Error::KeyNotFound {
            key: segments.join("."),
        }),
    }
}

/// Walk parent segments down to the table that holds the final key.
fn descend<'a>(root: &'a Table, parents: &[String]) -> Result<&'a Table> {
    let mut current = root;
    for (index, segment) in parents.iter().enumerate() {
        match current.get(segment) {
            Some(Value::Table(table)) => current = table,
            Some(_) => {
                return Err(Error::NotAMap {
                    key: parents[..=index].join("."),
                });
            }
            None => {
                return Err(Error::KeyNotFound {
                    key: parents[..=index].join("."),
                });
            }
        }
    }
    Ok(current)
}

/// Build an `InvalidKey` error for the raw input.
fn invalid_key(raw: &str) -> Error {
    Error::InvalidKey {
        key: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{delete_nested, get_nested, parse_dot_key, set_nested};
    use crate::{
        config::value::{Table, Value},
        error::Error,
    };

    fn segments(path: &str) -> Vec<String> {
        parse_dot_key(path).expect("valid path")
    }

    fn sample() -> Table {
        let mut deep = Table::new();
        deep.insert("level3".to_string(), Value::from("value3"));
        let mut nested = Table::new();
        nested.insert("level2".to_string(), Value::from("value2"));
        nested.insert("deep".to_string(), Value::Table(deep));
        let mut root = Table::new();
        root.insert("level1".to_string(), Value::from("value1"));
        root.insert("nested".to_string(), Value::Table(nested));
        root.insert("notmap".to_string(), Value::from("string_value"));
        root
    }

    #[test]
    fn parses_single_and_multi_level_keys() {
        assert_eq!(segments("common"), vec!["common"]);
        assert_eq!(
            segments("common.api_keys.tiingo"),
            vec!["common", "api_keys", "tiingo"]
        );
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(segments("  common.api_keys  "), vec!["common", "api_keys"]);
    }

    #[test]
    fn keeps_inner_segment_whitespace() {
        assert_eq!(segments("a. b"), vec!["a", " b"]);
    }

    #[test]
    fn rejects_malformed_keys() {
        for raw in ["", "   ", "a..b", ".a", "a.", "."] {
            let error = parse_dot_key(raw).expect_err("key should be rejected");
            assert!(matches!(error, Error::InvalidKey { .. }), "{raw:?}");
        }
    }

    #[test]
    fn gets_nested_values() {
        let root = sample();
        let value = get_nested(&root, &segments("level1")).expect("get");
        assert_eq!(value.as_ref(), &Value::from("value1"));
        let value = get_nested(&root, &segments("nested.deep.level3")).expect("get");
        assert_eq!(value.as_ref(), &Value::from("value3"));
    }

    #[test]
    fn get_with_no_segments_returns_root() {
        let root = sample();
        let value = get_nested(&root, &[]).expect("get");
        assert!(matches!(value, Cow::Owned(Value::Table(ref table)) if *table == root));
    }

    #[test]
    fn get_reports_missing_and_scalar_segments() {
        let root = sample();
        let error = get_nested(&root, &segments("nonexistent")).expect_err("missing");
        assert!(matches!(error, Error::KeyNotFound { .. }));
        let error = get_nested(&root, &segments("nested.absent.leaf")).expect_err("missing");
        assert!(matches!(error, Error::KeyNotFound { ref key } if key == "nested.absent"));
        let error = get_nested(&root, &segments("notmap.child")).expect_err("scalar");
        assert!(matches!(error, Error::NotAMap { ref key } if key == "notmap"));
    }

    #[test]
    fn set_creates_intermediate_tables() {
        let mut root = Table::new();
        set_nested(&mut root, &segments("a.b.c"), Value::from("deep")).expect("set");
        let b = root["a"].as_table().and_then(|a| a["b"].as_table()).expect("tables");
        assert_eq!(b["c"], Value::from("deep"));
    }

    #[test]
    fn set_overwrites_terminal_value() {
        let mut root = Table::new();
        root.insert("key".to_string(), Value::from("old"));
        set_nested(&mut root, &segments("key"), Value::from("new")).expect("set");
        assert_eq!(root["key"], Value::from("new"));

        let mut replacement = Table::new();
        replacement.insert("inner".to_string(), Value::Integer(1));
        set_nested(&mut root, &segments("key"), Value::Table(replacement)).expect("set");
        assert!(root["key"].as_table().is_some());
    }

    #[test]
    fn set_refuses_to_descend_through_scalar() {
        let mut root = Table::new();
        root.insert("key".to_string(), Value::from("string"));
        let error =
            set_nested(&mut root, &segments("key.child"), Value::from("val")).expect_err("scalar");
        assert!(matches!(error, Error::NotAMap { .. }));
        assert_eq!(root["key"], Value::from("string"));
    }

    #[test]
    fn set_and_delete_reject_empty_segments() {
        let mut root = Table::new();
        let error = set_nested(&mut root, &[], Value::from("val")).expect_err("empty");
        assert!(matches!(error, Error::InvalidKey { .. }));
        let error = delete_nested(&mut root, &[]).expect_err("empty");
        assert!(matches!(error, Error::InvalidKey { .. }));
        assert!(root.is_empty());
    }

    #[test]
    fn delete_removes_only_target() {
        let mut root = Table::new();
        set_nested(&mut root, &segments("parent.child"), Value::from("value")).expect("set");
        set_nested(&mut root, &segments("parent.other"), Value::from("keep")).expect("set");

        delete_nested(&mut root, &segments("parent.child")).expect("delete");

        let parent = root["parent"].as_table().expect("parent table");
        assert!(!parent.contains_key("child"));
        assert_eq!(parent["other"], Value::from("keep"));
    }

    #[test]
    fn delete_reports_missing_and_scalar_segments() {
        let mut root = Table::new();
        let error = delete_nested(&mut root, &segments("a.b")).expect_err("missing");
        assert!(matches!(error, Error::KeyNotFound { .. }));

        root.insert("key".to_string(), Value::from("string"));
        let error = delete_nested(&mut root, &segments("key.child")).expect_err("scalar");
        assert!(matches!(error, Error::NotAMap { .. }));

        set_nested(&mut root, &segments("a.b"), Value::Integer(1)).expect("set");
        let error = delete_nested(&mut root, &segments("a.c")).expect_err("missing leaf");
        assert!(matches!(error, Error::KeyNotFound { ref key } if key == "a.c"));
    }
}
