//! Environment macro expansion
//!
//! Resolves `${VAR}` placeholders in configuration strings. Lookups go
//! through [`EnvLookup`] so callers can swap the process environment for a
//! fixed table.

use std::collections::HashMap;

/// Read-only access to environment variables by name
pub trait EnvLookup {
    /// Get a variable's value, `None` when unset
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed in-memory variable table
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        MapEnv {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvLookup for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<T: EnvLookup + ?Sized> EnvLookup for &T {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Returns the variable name when `value` is exactly one `${VAR}` placeholder
pub fn placeholder_name(value: &str) -> Option<&str> {
    let name = value.strip_prefix("${")?.strip_suffix('}')?;
    is_identifier(name).then_some(name)
}

/// Whether `value` is exactly one `${VAR}` placeholder
pub fn is_placeholder(value: &str) -> bool {
    placeholder_name(value).is_some()
}

/// Whole-field expansion.
///
/// A placeholder resolves to its variable's value, or to `""` when the
/// variable is unset or empty. Anything else is returned unchanged.
pub fn expand_field(value: &str, env: &impl EnvLookup) -> String {
    match placeholder_name(value) {
        Some(name) => env.get(name).unwrap_or_default(),
        None => value.to_string(),
    }
}

/// Embedded expansion.
///
/// Replaces every `${VAR}` whose variable is set to a non-empty value.
/// Other placeholders stay verbatim.
pub fn expand_embedded(input: &str, env: &impl EnvLookup) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) if is_identifier(&after[..end]) => {
                let name = &after[..end];
                match env.get(name).filter(|v| !v.is_empty()) {
                    Some(val) => result.push_str(&val),
                    None => {
                        result.push_str("${");
                        result.push_str(name);
                        result.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            _ => {
                // Not a placeholder; keep the `$` and rescan from the `{`
                result.push('$');
                rest = &rest[start + 1..];
            }
        }
    }
    result.push_str(rest);

    result
}

/// Whether `value` still contains a `${VAR}` placeholder
pub fn has_placeholder(value: &str) -> bool {
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        if let Some(end) = after.find('}') {
            if is_identifier(&after[..end]) {
                return true;
            }
        }
        rest = &rest[start + 1..];
    }
    false
}
