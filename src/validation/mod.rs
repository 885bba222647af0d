//! Declarative field validation.
//!
//! A [`Schema`] is a static table of [`FieldRule`]s. Validating a JSON object walks the
//! whole table and collects every violation, so a caller gets the full list of
//! problems in one response. Valid input comes back normalized: numeric strings
//! become integers and dates become `YYYY-MM-DD`.

pub mod schemas;

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

pub use schemas::{ENROLLMENT, LOGIN, REGISTER, STUDENT, SUBJECT};

/// Field-level validation failure returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Integer { min: Option<i64>, max: Option<i64> },
    Text { min_len: Option<usize>, max_len: Option<usize> },
    Email,
    Date,
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    /// Human label used in messages ("Year Level", "First name").
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Replaces the generic "must be a number" text when the value has the wrong type.
    pub type_message: Option<&'static str>,
}

impl FieldRule {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
            type_message: None,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            type_message: None,
        }
    }

    pub const fn with_type_message(self, message: &'static str) -> Self {
        Self {
            type_message: Some(message),
            ..self
        }
    }
}

#[derive(Debug)]
pub struct Schema {
    pub fields: &'static [FieldRule],
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Full,
    Partial,
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

impl Schema {
    pub const fn new(fields: &'static [FieldRule]) -> Self {
        Self { fields }
    }

    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|r| r.name == name)
    }

    /// Validate a complete object: every required field must be present.
    pub fn validate(&self, raw: &Map<String, Value>) -> Result<Map<String, Value>, Vec<FieldError>> {
        self.run(raw, Mode::Full)
    }

    /// Validate only the supplied keys (updates). Required fields may be absent.
    pub fn validate_partial(&self, raw: &Map<String, Value>) -> Result<Map<String, Value>, Vec<FieldError>> {
        self.run(raw, Mode::Partial)
    }

    fn run(&self, raw: &Map<String, Value>, mode: Mode) -> Result<Map<String, Value>, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut normalized = Map::new();

        for rule in self.fields {
            match raw.get(rule.name) {
                None if mode == Mode::Partial => {}
                None | Some(Value::Null) if rule.required => {
                    errors.push(FieldError::new(rule.name, format!("{} is required", rule.label)));
                }
                None => {}
                // Explicit null on an optional field clears it.
                Some(Value::Null) => {
                    normalized.insert(rule.name.to_string(), Value::Null);
                }
                Some(value) => match check(rule, value) {
                    Ok(v) => {
                        normalized.insert(rule.name.to_string(), v);
                    }
                    Err(message) => errors.push(FieldError::new(rule.name, message)),
                },
            }
        }

        for key in raw.keys() {
            if self.rule(key).is_none() {
                errors.push(FieldError::new(key.clone(), format!("\"{}\" is not allowed", key)));
            }
        }

        if errors.is_empty() {
            Ok(normalized)
        } else {
            Err(errors)
        }
    }
}

fn check(rule: &FieldRule, value: &Value) -> Result<Value, String> {
    let label = rule.label;
    match rule.kind {
        FieldKind::Integer { min, max } => {
            let n = as_integer(value).ok_or_else(|| match rule.type_message {
                Some(message) => message.to_string(),
                None => format!("{} must be a number", label),
            })?;
            let out_of_range = min.is_some_and(|m| n < m) || max.is_some_and(|m| n > m);
            if out_of_range {
                return Err(match (min, max) {
                    (Some(lo), Some(hi)) => format!("{} must be between {} and {}", label, lo, hi),
                    (Some(lo), None) => format!("{} must be at least {}", label, lo),
                    (None, Some(hi)) => format!("{} must be at most {}", label, hi),
                    (None, None) => unreachable!(),
                });
            }
            Ok(Value::from(n))
        }
        FieldKind::Text { min_len, max_len } => {
            let s = value.as_str().ok_or_else(|| format!("{} must be a string", label))?;
            if s.is_empty() {
                return Err(format!("{} is not allowed to be empty", label));
            }
            let len = s.chars().count();
            if let Some(max) = max_len {
                if len > max {
                    return Err(format!("{} cannot exceed {} characters", label, max));
                }
            }
            if let Some(min) = min_len {
                if len < min {
                    return Err(format!("{} must be at least {} characters", label, min));
                }
            }
            Ok(Value::String(s.to_string()))
        }
        FieldKind::Email => match value.as_str() {
            Some(s) if EMAIL_RE.is_match(s) => Ok(Value::String(s.to_string())),
            _ => Err("Please provide a valid email address".to_string()),
        },
        FieldKind::Date => {
            let date = value
                .as_str()
                .and_then(parse_date)
                .ok_or_else(|| format!("{} must be a valid date", label))?;
            Ok(Value::String(date.format("%Y-%m-%d").to_string()))
        }
        FieldKind::OneOf(allowed) => match value.as_str() {
            Some(s) if allowed.contains(&s) => Ok(Value::String(s.to_string())),
            _ => Err(format!("{} must be one of the following: {}", label, allowed.join(", "))),
        },
    }
}

/// JSON integers, integral floats and numeric strings all count as numbers.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}
