//! Findings produced by detectors.

use std::fmt;

use serde::Serialize;

use crate::domain::types::{TypeId, simple_name};

/// What a finding is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Subject {
    /// A network-call method on an interface.
    Endpoint { interface: TypeId, method: String },
    /// A declared type (data class checks).
    Type { id: TypeId },
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Endpoint { interface, method } => {
                write!(f, "{}.{}", simple_name(interface), method)
            }
            Subject::Type { id } => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub subject: Subject,
    /// Issue id, e.g. `NetworkLayerImmutableDTORule`.
    pub rule: String,
    pub message: String,
    /// Names of the fields (or types) involved.
    pub fields: Vec<String>,
}

impl Finding {
    pub fn new(
        subject: Subject,
        rule: impl Into<String>,
        message: impl Into<String>,
        fields: Vec<String>,
    ) -> Self {
        Self {
            subject,
            rule: rule.into(),
            message: message.into(),
            fields,
        }
    }
}

/// `[a, b]`, the list rendering used in finding messages.
pub fn bracketed<S: AsRef<str>>(items: &[S]) -> String {
    let joined: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
    format!("[{}]", joined.join(", "))
}
