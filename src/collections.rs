//! Generic sequence and optional-value helpers.

use serde_json::Value;
use std::collections::HashSet;
use std::hash::Hash;

use crate::error::{Result, UtilsError};

/// Distinct values of `input` in order of first occurrence.
pub fn unique_of<T>(input: &[T]) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::with_capacity(input.len());
    let mut unique = Vec::with_capacity(input.len());
    for item in input {
        if seen.insert(item) {
            unique.push(item.clone());
        }
    }
    unique
}

/// Same as [`unique_of`] for values that can be compared but not hashed
/// (floats, structs holding floats). Quadratic in the number of distinct values.
pub fn unique_by_eq<T>(input: &[T]) -> Vec<T>
where
    T: PartialEq + Clone,
{
    let mut unique: Vec<T> = Vec::with_capacity(input.len());
    for item in input {
        if !unique.contains(item) {
            unique.push(item.clone());
        }
    }
    unique
}

#[derive(Debug, PartialEq, Eq, Hash)]
enum ScalarKey<'a> {
    Null,
    Bool(bool),
    // Rendered form keeps `1` and `1.0` apart
    Number(String),
    String(&'a str),
}

impl<'a> ScalarKey<'a> {
    fn from_value(index: usize, value: &'a Value) -> Result<Self> {
        match value {
            Value::Null => Ok(ScalarKey::Null),
            Value::Bool(b) => Ok(ScalarKey::Bool(*b)),
            Value::Number(n) => Ok(ScalarKey::Number(n.to_string())),
            Value::String(s) => Ok(ScalarKey::String(s)),
            Value::Array(_) => Err(UtilsError::UnhashableElement { index, kind: "array" }),
            Value::Object(_) => Err(UtilsError::UnhashableElement { index, kind: "object" }),
        }
    }
}

/// De-duplicate a dynamically typed sequence.
///
/// Scalars compare by type and value, so `1`, `1.0` and `"1"` are all distinct.
/// Arrays and objects have no identity to compare by and fail with
/// [`UtilsError::UnhashableElement`] at the first one found.
pub fn unique_of_values(input: &[Value]) -> Result<Vec<Value>> {
    let mut seen = HashSet::with_capacity(input.len());
    let mut unique = Vec::with_capacity(input.len());
    for (index, value) in input.iter().enumerate() {
        if seen.insert(ScalarKey::from_value(index, value)?) {
            unique.push(value.clone());
        }
    }
    Ok(unique)
}

/// The referenced value, or `T::default()` when absent.
pub fn value_of<T>(value: Option<&T>) -> T
where
    T: Default + Clone,
{
    value.cloned().unwrap_or_default()
}

/// Crate name from a `module_path!()` string.
pub fn package_name(module_path: &str) -> &str {
    module_path.split("::").next().unwrap_or(module_path)
}

/// Name of the crate the macro is invoked from.
#[macro_export]
macro_rules! package_name {
    () => {
        $crate::collections::package_name(module_path!())
    };
}
