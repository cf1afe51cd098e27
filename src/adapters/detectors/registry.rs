//! Issue registry: static metadata for every rule a detector can report.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Informational,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Informational => "informational",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub id: &'static str,
    pub brief_description: &'static str,
    pub explanation: &'static str,
    pub category: &'static str,
    /// 1 (lowest) to 10 (highest)
    pub priority: u8,
    pub severity: Severity,
}

pub const NETWORK_LAYER_IMMUTABLE_DTO: Issue = Issue {
    id: "NetworkLayerImmutableDTORule",
    brief_description: "Network layer data class' fields need to be final or val.",
    explanation: "Data classes used in network layer should be immutable by design.",
    category: "Correctness",
    priority: 8,
    severity: Severity::Error,
};

pub const NETWORK_LAYER_CLASS_SERIALIZED_NAME: Issue = Issue {
    id: "NetworkLayerClassSerializedNameRule",
    brief_description: "SerializedName annotated network layer class",
    explanation: "Data classes used in network layer should use SerializedName annotation for Gson. Adding annotation prevents obfuscation errors.",
    category: "Correctness",
    priority: 5,
    severity: Severity::Informational,
};

pub const NETWORK_LAYER_CLASS_JSON: Issue = Issue {
    id: "NetworkLayerClassJsonRule",
    brief_description: "Json annotated network layer class",
    explanation: "Data classes used in network layer should use Json annotation for Moshi. Adding annotation prevents obfuscation errors.",
    category: "Correctness",
    priority: 5,
    severity: Severity::Informational,
};

pub const NETWORK_LAYER_CLASS_JSON_CLASS: Issue = Issue {
    id: "NetworkLayerClassJsonClassRule",
    brief_description: "Json annotated network layer class",
    explanation: "Data classes used in network layer should use JsonClass annotation for Moshi. Adding annotation prevents obfuscation errors.",
    category: "Correctness",
    priority: 5,
    severity: Severity::Informational,
};

pub const IMMUTABLE_DATA_CLASS: Issue = Issue {
    id: "ImmutableDataClassRule",
    brief_description: "Immutable kotlin data class",
    explanation: "Kotlin data classes should be immutable by design. Use `copy()` method when instance needs to be modified.",
    category: "Correctness",
    priority: 7,
    severity: Severity::Warning,
};

static ALL_ISSUES: [Issue; 5] = [
    NETWORK_LAYER_IMMUTABLE_DTO,
    NETWORK_LAYER_CLASS_SERIALIZED_NAME,
    NETWORK_LAYER_CLASS_JSON,
    NETWORK_LAYER_CLASS_JSON_CLASS,
    IMMUTABLE_DATA_CLASS,
];

/// Every known issue, in report order
pub fn all_issues() -> &'static [Issue] {
    &ALL_ISSUES
}

pub fn find_issue(id: &str) -> Option<&'static Issue> {
    ALL_ISSUES.iter().find(|issue| issue.id == id)
}
