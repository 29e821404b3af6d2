//! Filters and update operators understood by every store backend.

use serde_json::{Map, Number, Value};

use super::{id_key, Document, ID_FIELD};
use crate::errors::domain::DomainError;

/// Conjunction of top-level field equalities. An empty filter matches everything.
///
/// `_id` is compared by storage key (see [`id_key`]), so `5` and `"5"` address
/// the same document. A `null` clause matches a missing field as well as an
/// explicit `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    id: Option<String>,
    clauses: Vec<(String, Value)>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            clauses: Vec::new(),
        }
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let field = field.into();
        let value = value.into();
        if field == ID_FIELD {
            self.id = Some(id_key(&value));
        } else {
            self.clauses.push((field, value));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.clauses.is_empty()
    }

    /// Storage key the `_id` must have, if constrained.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn matches(&self, doc: &Document) -> bool {
        if let Some(key) = &self.id {
            if doc.get(ID_FIELD).map(id_key).as_deref() != Some(key.as_str()) {
                return false;
            }
        }
        self.clauses
            .iter()
            .all(|(field, expected)| doc.get(field).unwrap_or(&Value::Null) == expected)
    }

    /// Non-null clauses as a JSON object, suitable for a `jsonb @>` containment test.
    pub fn to_containment(&self) -> Value {
        Value::Object(
            self.clauses
                .iter()
                .filter(|(_, v)| !v.is_null())
                .cloned()
                .collect(),
        )
    }

    /// Fields that must be missing or `null`. Containment cannot express these.
    pub fn null_fields(&self) -> Vec<&str> {
        self.clauses
            .iter()
            .filter(|(_, v)| v.is_null())
            .map(|(field, _)| field.as_str())
            .collect()
    }

    /// Document an upsert starts from when nothing matched.
    pub fn seed_document(&self) -> Document {
        let mut doc: Document = self.clauses.iter().cloned().collect();
        if let Some(key) = &self.id {
            doc.insert(ID_FIELD.to_string(), Value::String(key.clone()));
        }
        doc
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOp {
    /// `$set`: replace the field.
    Set(String, Value),
    /// `$inc`: add to a numeric field.
    Inc(String, i64),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    ops: Vec<UpdateOp>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.ops.push(UpdateOp::Set(field.into(), value.into()));
        self
    }

    pub fn inc(mut self, field: impl Into<String>, by: i64) -> Self {
        self.ops.push(UpdateOp::Inc(field.into(), by));
        self
    }

    pub fn ops(&self) -> &[UpdateOp] {
        &self.ops
    }

    /// Apply every operator in order. Returns whether the document changed.
    ///
    /// The document is left untouched when any operator fails.
    pub fn apply(&self, doc: &mut Document) -> Result<bool, DomainError> {
        let mut next = doc.clone();
        for op in &self.ops {
            match op {
                UpdateOp::Set(field, value) => {
                    next.insert(field.clone(), value.clone());
                }
                UpdateOp::Inc(field, by) => {
                    let incremented = increment(field, next.get(field), *by)?;
                    next.insert(field.clone(), incremented);
                }
            }
        }

        let changed = next != *doc;
        if changed {
            *doc = next;
        }
        Ok(changed)
    }
}

fn increment(field: &str, current: Option<&Value>, by: i64) -> Result<Value, DomainError> {
    let not_numeric =
        || DomainError::validation(format!("cannot increment non-numeric field '{field}'"));

    match current {
        None | Some(Value::Null) => Ok(Value::from(by)),
        Some(Value::Number(n)) => add(n, by).ok_or_else(not_numeric),
        Some(Value::String(s)) => {
            let parsed = s.trim().parse::<i64>().map_err(|_| not_numeric())?;
            parsed
                .checked_add(by)
                .map(Value::from)
                .ok_or_else(not_numeric)
        }
        Some(_) => Err(not_numeric()),
    }
}

fn add(n: &Number, by: i64) -> Option<Value> {
    if let Some(i) = n.as_i64() {
        return i.checked_add(by).map(Value::from);
    }
    if let Some(u) = n.as_u64() {
        return i64::try_from(u)
            .ok()
            .and_then(|i| i.checked_add(by))
            .map(Value::from);
    }
    n.as_f64()
        .and_then(|f| Number::from_f64(f + by as f64))
        .map(Value::Number)
}

/// Convenience for building documents in code.
pub fn document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
