//! Variable stack for `$name` lookups
//!
//! Writing an empty value deletes the variable, so "unset" and "empty" are
//! the same state and reading either yields the empty string.

use crate::value::Value;
use indexmap::IndexMap;

/// Named values for one interpreter session
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    /// Current variable bindings in the order they were first set
    variables: IndexMap<String, Value>,
}

impl VariableStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, or remove it when the value is empty
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if value.is_unset() {
            log::trace!("unset ${name}");
            self.variables.shift_remove(&name);
        } else {
            log::trace!("set ${name} = {value}");
            self.variables.insert(name, value);
        }
    }

    /// Get a variable value; missing variables read as the empty string
    #[must_use]
    pub fn get(&self, name: &str) -> Value {
        self.variables.get(name).cloned().unwrap_or_default()
    }

    /// Check if a variable is set
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Remove every variable
    pub fn clear(&mut self) {
        self.variables.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Variables in the order they were first set
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.variables.iter().map(|(name, value)| (name.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_store() {
        let mut store = VariableStore::new();

        assert_eq!(store.get("var"), Value::empty());
        assert!(!store.contains("var"));

        store.set("var", Value::from("value"));

        assert_eq!(store.get("var"), Value::from("value"));
        assert!(store.contains("var"));
    }

    #[test]
    fn test_empty_write_deletes() {
        let mut store = VariableStore::new();
        store.set("x", Value::from(5.0));
        store.set("x", Value::empty());

        assert!(!store.contains("x"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_falsy_values_are_kept() {
        let mut store = VariableStore::new();
        store.set("zero", Value::from(0.0));
        store.set("no", Value::Bool(false));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("zero"), Value::from(0.0));
    }

    #[test]
    fn test_iter_keeps_insertion_order() {
        let mut store = VariableStore::new();
        store.set("zeta", Value::from(1.0));
        store.set("alpha", Value::from(2.0));
        store.set("mid", Value::from(3.0));
        // overwriting keeps the original slot
        store.set("zeta", Value::from(4.0));
        store.set("alpha", Value::empty());

        let names: Vec<&str> = store.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "mid"]);

        store.set("alpha", Value::from(5.0));
        let names: Vec<&str> = store.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "mid", "alpha"]);
    }

    #[test]
    fn test_clear() {
        let mut store = VariableStore::new();
        store.set("b", Value::from(2.0));
        store.set("a", Value::from(1.0));

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.get("a"), Value::empty());
    }
}
