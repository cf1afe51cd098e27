//! MutabilityClassifier: is a declared field mutable?
//!
//! Three tiers, any of which is sufficient:
//! 1. structural: the binding is reassignable (`var`, non-final);
//! 2. lexical: the type spelling or declaration text matches a mutable-collection pattern;
//! 3. nominal: the declared type's simple name is a known mutable type.

use std::collections::HashSet;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;

use crate::domain::collector::CollectedField;
use crate::domain::config::AnalysisConfig;
use crate::domain::types::FieldDecl;

/// Why a field is mutable. A reassignable binding takes precedence over a mutable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutabilityReason {
    /// `var` / non-final: reassignable after construction.
    Reassignable,
    /// Final binding whose type is a mutable container.
    MutableType,
}

#[derive(Debug, Clone)]
pub struct MutabilityClassifier {
    patterns: Vec<Regex>,
    mutable_types: HashSet<String>,
}

impl MutabilityClassifier {
    /// Compiles `patterns` as full-match expressions.
    pub fn new(patterns: &[String], mutable_types: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(&format!("^(?:{p})$"))
                    .with_context(|| format!("Invalid mutable collection pattern: {p}"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            patterns,
            mutable_types: mutable_types.iter().cloned().collect(),
        })
    }

    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        Self::new(
            &config.mutable_collection_patterns,
            &config.mutable_type_names,
        )
    }

    pub fn classify(&self, field: &FieldDecl) -> Option<MutabilityReason> {
        if !field.is_final {
            return Some(MutabilityReason::Reassignable);
        }
        if self.has_mutable_type(field) {
            return Some(MutabilityReason::MutableType);
        }
        None
    }

    pub fn is_mutable(&self, field: &FieldDecl) -> bool {
        self.classify(field).is_some()
    }

    /// Lexical and nominal tiers only.
    pub fn has_mutable_type(&self, field: &FieldDecl) -> bool {
        // Type aliases defeat this check; the nominal tier below doesn't help there either.
        if let Some(text) = field.source_text.as_deref()
            && self.matches_any(text)
        {
            return true;
        }
        if self.matches_any(&field.ty.canonical_text()) {
            return true;
        }
        self.mutable_types.contains(field.ty.simple_name())
    }

    /// Mutable fields of a collected set, in order.
    pub fn mutable_fields<'a>(
        &self,
        fields: &[CollectedField<'a>],
    ) -> Vec<(CollectedField<'a>, MutabilityReason)> {
        fields
            .iter()
            .filter_map(|f| self.classify(f.field).map(|reason| (*f, reason)))
            .collect()
    }

    fn matches_any(&self, text: &str) -> bool {
        !text.is_empty() && self.patterns.iter().any(|re| re.is_match(text))
    }
}
