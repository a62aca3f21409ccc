//! Field registry.
//!
//! Built once per analysis frame. Requests refer to columns by name; every
//! name is resolved here, and a name the registry does not know is ignored
//! with a debug log. That is the single place the "unknown field" policy
//! lives for filters, association variables, controls and traits.

use std::collections::BTreeMap;
use std::fmt;

use hipp_model::{VariableSource, VariableType};
use tracing::debug;

/// Registered column of an analysis frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: VariableType,
    pub source: VariableSource,
    /// Identifier columns are excluded from variable discovery.
    pub identifier: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: VariableType, source: VariableSource) -> Self {
        Self {
            name: name.into(),
            kind,
            source,
            identifier: false,
        }
    }

    pub fn identifier(mut self) -> Self {
        self.identifier = true;
        self
    }
}

/// Role a name plays in a request; only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Filter,
    Variable,
    Control,
    Trait,
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Filter => "filter",
            Self::Variable => "variable",
            Self::Control => "control",
            Self::Trait => "trait",
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: Vec<FieldDescriptor>,
    index: BTreeMap<String, usize>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a field, replacing any previous descriptor with the same name.
    pub fn insert(&mut self, descriptor: FieldDescriptor) {
        match self.index.get(&descriptor.name) {
            Some(&pos) => self.fields[pos] = descriptor,
            None => {
                self.index.insert(descriptor.name.clone(), self.fields.len());
                self.fields.push(descriptor);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index.get(name).map(|&pos| &self.fields[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn kind(&self, name: &str) -> Option<VariableType> {
        self.get(name).map(|field| field.kind)
    }

    /// Resolves a requested name, logging names that are not registered.
    pub fn lookup(&self, name: &str, role: FieldRole) -> Option<&FieldDescriptor> {
        let found = self.get(name);
        if found.is_none() {
            debug!(field = name, role = %role, "unknown field ignored");
        }
        found
    }

    /// Fields in registration (frame column) order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    /// Non-identifier fields of one source.
    pub fn variables(&self, source: VariableSource) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields
            .iter()
            .filter(move |field| field.source == source && !field.identifier)
    }

    pub fn trait_columns(&self) -> impl Iterator<Item = &str> {
        self.variables(VariableSource::Trait).map(|field| field.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut registry = FieldRegistry::new();
        registry.insert(
            FieldDescriptor::new("RRID", VariableType::Categorical, VariableSource::Donor)
                .identifier(),
        );
        registry.insert(FieldDescriptor::new(
            "x",
            VariableType::Categorical,
            VariableSource::Donor,
        ));
        registry.insert(FieldDescriptor::new(
            "x",
            VariableType::Numerical,
            VariableSource::External,
        ));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.kind("x"), Some(VariableType::Numerical));
        let names: Vec<&str> = registry.iter().map(|field| field.name.as_str()).collect();
        assert_eq!(names, vec!["RRID", "x"]);
        assert_eq!(registry.variables(VariableSource::Donor).count(), 0);
    }

    #[test]
    fn lookup_of_unknown_name_is_none() {
        let registry = FieldRegistry::new();
        assert!(registry.lookup("Eye colour", FieldRole::Filter).is_none());
    }
}
