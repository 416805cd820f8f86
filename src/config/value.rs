//! Typed configuration values and raw-string coercion.

use std::{collections::BTreeMap, fmt};

use serde_json::{Map as JsonMap, Number, Value as JsonValue};
use toml::{Table as TomlTable, Value as TomlValue, value::Datetime};

/// A level of the configuration tree, keyed by segment name.
pub type Table = BTreeMap<String, Value>;

/// A single configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 string.
    String(String),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit float.
    Float(f64),
    /// Boolean.
    Boolean(bool),
    /// TOML datetime, preserved from hand-edited files.
    Datetime(Datetime),
    /// Array, preserved from hand-edited files.
    Array(Vec<Self>),
    /// Nested table.
    Table(Table),
}

impl Value {
    /// Borrow the nested table, if this value is one.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Borrow the string contents, if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Short type name for user output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Datetime(_) => "datetime",
            Self::Array(_) => "array",
            Self::Table(_) => "table",
        }
    }

    /// Render as a TOML literal, quoting strings.
    pub fn literal(&self) -> String {
        TomlValue::from(self.clone()).to_string()
    }

    /// Convert into a JSON value for machine-readable output.
    pub(crate) fn to_json(&self) -> JsonValue {
        match self {
            Self::String(value) => JsonValue::String(value.clone()),
            Self::Integer(value) => JsonValue::Number(Number::from(*value)),
            // Non-finite floats have no JSON form.
            Self::Float(value) => Number::from_f64(*value).map_or(JsonValue::Null, JsonValue::Number),
            Self::Boolean(value) => JsonValue::Bool(*value),
            Self::Datetime(value) => JsonValue::String(value.to_string()),
            Self::Array(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            Self::Table(table) => JsonValue::Object(table_to_json(table)),
        }
    }
}

/// Convert a table into a JSON object.
pub(crate) fn table_to_json(table: &Table) -> JsonMap<String, JsonValue> {
    table
        .iter()
        .map(|(key, value)| (key.clone(), value.to_json()))
        .collect()
}

/// Coerce a raw command-line string into the most specific scalar type.
///
/// Checks run in order and the first match wins: the exact literals `true`
/// and `false`, a base-10 `i64`, an `f64`, and finally the string itself.
/// Never fails; the empty string stays a string.
pub fn parse_value(raw: &str) -> Value {
    match raw {
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        _ => {
            if let Ok(integer) = raw.parse::<i64>() {
                Value::Integer(integer)
            } else if let Ok(float) = raw.parse::<f64>() {
                Value::Float(float)
            } else {
                Value::String(raw.to_string())
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => f.write_str(value),
            other => f.write_str(&other.literal()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Self::Table(value)
    }
}

impl From<TomlValue> for Value {
    fn from(value: TomlValue) -> Self {
        match value {
            TomlValue::String(value) => Self::String(value),
            TomlValue::Integer(value) => Self::Integer(value),
            TomlValue::Float(value) => Self::Float(value),
            TomlValue::Boolean(value) => Self::Boolean(value),
            TomlValue::Datetime(value) => Self::Datetime(value),
            TomlValue::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            TomlValue::Table(table) => Self::Table(table_from_toml(table)),
        }
    }
}

impl From<Value> for TomlValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(value) => Self::String(value),
            Value::Integer(value) => Self::Integer(value),
            Value::Float(value) => Self::Float(value),
            Value::Boolean(value) => Self::Boolean(value),
            Value::Datetime(value) => Self::Datetime(value),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Table(table) => Self::Table(table_to_toml(table)),
        }
    }
}

/// Convert a decoded TOML table into a config table.
pub(crate) fn table_from_toml(table: TomlTable) -> Table {
    table
        .into_iter()
        .map(|(key, value)| (key, Value::from(value)))
        .collect()
}

/// Convert a config table into a TOML table for encoding.
pub(crate) fn table_to_toml(table: Table) -> TomlTable {
    table
        .into_iter()
        .map(|(key, value)| (key, TomlValue::from(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Table, Value, parse_value};

    #[test]
    fn coerces_boolean_literals() {
        assert_eq!(parse_value("true"), Value::Boolean(true));
        assert_eq!(parse_value("false"), Value::Boolean(false));
    }

    #[test]
    fn boolean_literals_are_case_sensitive() {
        assert_eq!(parse_value("True"), Value::String("True".to_string()));
        assert_eq!(parse_value("FALSE"), Value::String("FALSE".to_string()));
    }

    #[test]
    fn coerces_integers() {
        assert_eq!(parse_value("123"), Value::Integer(123));
        assert_eq!(parse_value("-42"), Value::Integer(-42));
        assert_eq!(parse_value("0"), Value::Integer(0));
    }

    #[test]
    fn coerces_floats() {
        assert_eq!(parse_value("2.5"), Value::Float(2.5));
        assert_eq!(parse_value("-0.5"), Value::Float(-0.5));
        assert_eq!(parse_value("1e3"), Value::Float(1000.0));
    }

    #[test]
    fn integer_overflow_falls_back_to_float() {
        assert_eq!(
            parse_value("9223372036854775808"),
            Value::Float(9_223_372_036_854_775_808.0)
        );
    }

    #[test]
    fn keeps_everything_else_as_string() {
        assert_eq!(parse_value("hello"), Value::String("hello".to_string()));
        assert_eq!(parse_value(""), Value::String(String::new()));
        assert_eq!(parse_value(" 12"), Value::String(" 12".to_string()));
        assert_eq!(parse_value("1.2.3"), Value::String("1.2.3".to_string()));
    }

    #[test]
    fn displays_strings_without_quotes() {
        assert_eq!(Value::from("kr").to_string(), "kr");
        assert_eq!(Value::Integer(7).to_string(), "7");
        assert_eq!(Value::Boolean(false).to_string(), "false");
    }

    #[test]
    fn literals_quote_strings() {
        assert_eq!(Value::from("kr").literal(), "\"kr\"");
        assert_eq!(Value::Float(1.0).literal(), "1.0");
    }

    #[test]
    fn converts_tables_to_json() {
        let mut inner = Table::new();
        inner.insert("z".to_string(), Value::Integer(42));
        let value = Value::Table(inner);
        assert_eq!(value.to_json().to_string(), r#"{"z":42}"#);
    }
}
