//! Compile-time literal values produced by the static evaluator

use indexmap::IndexMap;
use serde::Serializer;

/// A value known at compile time
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Literal>),
    Object(IndexMap<String, Literal>),
}

impl Literal {
    /// JavaScript truthiness
    pub fn is_truthy(&self) -> bool {
        match self {
            Literal::Undefined | Literal::Null => false,
            Literal::Bool(b) => *b,
            Literal::Number(n) => *n != 0.0 && !n.is_nan(),
            Literal::String(s) => !s.is_empty(),
            Literal::Array(_) | Literal::Object(_) => true,
        }
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Literal::Undefined | Literal::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Literal>> {
        match self {
            Literal::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Strings and numbers as text, the way attribute values like `key` are read
    pub fn as_text(&self) -> Option<String> {
        match self {
            Literal::String(s) => Some(s.clone()),
            Literal::Number(n) => Some(format_js_number(*n)),
            _ => None,
        }
    }

    /// String conversion used by template literals and `+` concatenation
    pub fn to_js_string(&self) -> String {
        match self {
            Literal::Undefined => "undefined".to_string(),
            Literal::Null => "null".to_string(),
            Literal::Bool(b) => b.to_string(),
            Literal::Number(n) => format_js_number(*n),
            Literal::String(s) => s.clone(),
            Literal::Array(items) => items
                .iter()
                .map(|item| {
                    if item.is_nullish() {
                        String::new()
                    } else {
                        item.to_js_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(","),
            Literal::Object(_) => "[object Object]".to_string(),
        }
    }

    /// Numeric conversion for arithmetic operators
    pub fn to_number(&self) -> f64 {
        match self {
            Literal::Undefined => f64::NAN,
            Literal::Null => 0.0,
            Literal::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Literal::Number(n) => *n,
            Literal::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
            Literal::Array(_) | Literal::Object(_) => f64::NAN,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::Undefined => "undefined",
            Literal::Null => "null",
            Literal::Bool(_) => "boolean",
            Literal::Number(_) => "number",
            Literal::String(_) => "string",
            Literal::Array(_) => "array",
            Literal::Object(_) => "object",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Literal::Undefined | Literal::Null => serde_json::Value::Null,
            Literal::Bool(b) => serde_json::Value::Bool(*b),
            Literal::Number(n) => json_number(*n),
            Literal::String(s) => serde_json::Value::String(s.clone()),
            Literal::Array(items) => {
                serde_json::Value::Array(items.iter().map(Literal::to_json).collect())
            }
            Literal::Object(map) => serde_json::Value::Object(
                map.iter()
                    .filter(|(_, v)| !matches!(v, Literal::Undefined))
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0
}

/// Format a number the way JavaScript prints it (`16`, `0.5`, `-3`)
pub fn format_js_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if is_integral(n) {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// JSON number without a trailing `.0` for integral values
pub fn json_number(n: f64) -> serde_json::Value {
    if is_integral(n) {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

/// Serde helper: write integral floats as JSON integers
pub fn serialize_js_number<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if is_integral(*n) {
        serializer.serialize_i64(*n as i64)
    } else {
        serializer.serialize_f64(*n)
    }
}

pub fn serialize_opt_js_number<S: Serializer>(
    n: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match n {
        Some(n) => serialize_js_number(n, serializer),
        None => serializer.serialize_none(),
    }
}
