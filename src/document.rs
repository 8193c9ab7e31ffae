//! Schema-agnostic view of a cluster object.
//!
//! Workloads and custom resources are read as untyped JSON so that missing
//! or partial status blocks, and unknown API versions, never stop a check.

use kube::ResourceExt;
use kube::api::DynamicObject;
use serde_json::Value;

/// Outcome of a nested field lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<T> {
    Present(T),
    Absent,
    WrongType,
}

impl<T> Field<T> {
    /// The value if present and well-typed, `default` otherwise.
    pub fn or(self, default: T) -> T {
        match self {
            Field::Present(v) => v,
            Field::Absent | Field::WrongType => default,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub name: String,
    /// Everything except `apiVersion`, `kind` and `metadata`.
    pub data: Value,
}

impl Document {
    pub fn new(name: impl Into<String>, data: Value) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    fn nested(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(&self.data, |value, key| value.as_object()?.get(*key))
    }

    pub fn nested_i64(&self, path: &[&str]) -> Field<i64> {
        match self.nested(path) {
            None | Some(Value::Null) => Field::Absent,
            Some(v) => v.as_i64().map_or(Field::WrongType, Field::Present),
        }
    }

    pub fn nested_str(&self, path: &[&str]) -> Field<&str> {
        match self.nested(path) {
            None | Some(Value::Null) => Field::Absent,
            Some(v) => v.as_str().map_or(Field::WrongType, Field::Present),
        }
    }
}

impl From<DynamicObject> for Document {
    fn from(obj: DynamicObject) -> Self {
        Self {
            name: obj.name_any(),
            data: obj.data,
        }
    }
}
