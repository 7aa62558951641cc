//! Core domain types shared by the analysis and rewriting stages.

use crate::parser::DeclHandle;
use serde::Serialize;
use std::fmt;

/// Composite graph key: methods are identified by receiver type and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MethodKey {
    pub receiver_type: String,
    pub name: String,
}

impl MethodKey {
    pub fn new(receiver_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            receiver_type: receiver_type.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.receiver_type, self.name)
    }
}

/// One discovered method and its graph metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodRecord {
    pub name: String,
    /// Grouping name with pointer and type arguments stripped (`Server`)
    pub receiver_type: String,
    /// Receiver type as written (`*Server`, `Stack[T]`)
    pub receiver_display: String,
    /// Receiver parameter name, `None` when unnamed or `_`
    pub receiver_ident: Option<String>,
    pub is_exported: bool,
    /// Position among methods in first-appearance order
    pub original_order: usize,
    pub in_degree: usize,
    pub max_depth: usize,
    #[serde(skip)]
    pub handle: DeclHandle,
}

impl MethodRecord {
    pub fn key(&self) -> MethodKey {
        MethodKey::new(self.receiver_type.clone(), self.name.clone())
    }
}

/// Go's export rule: the identifier starts with an uppercase letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
