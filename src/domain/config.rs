//! Analysis configuration: recognition lists and registries consumed by the core.
//!
//! Loaded once at startup and never mutated while an analysis runs. Every key is optional in
//! the JSON form; missing keys fall back to [`AnalysisConfig::default`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which type argument a multi-argument generic reference is unwrapped to.
///
/// Single-parameter wrappers (`List<T>`, `Response<T>`, `Optional<T>`) are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionPolicy {
    /// Take the first type argument (`Map<K, V>` → `K`).
    #[default]
    First,
    /// Take the last type argument (`Map<K, V>` → `V`).
    Last,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Annotation names marking an interface method as a network call.
    pub call_verb_annotations: Vec<String>,
    /// Field tag suffix required by Gson.
    pub serialized_name_suffix: String,
    /// Field tag suffix required by Moshi.
    pub json_field_suffix: String,
    /// Class tag suffix required by Moshi codegen.
    pub json_class_suffix: String,
    /// Full-match patterns over a field's type spelling or declaration text.
    pub mutable_collection_patterns: Vec<String>,
    /// Simple names of types that are mutable by convention.
    pub mutable_type_names: Vec<String>,
    /// Types whose descendants are never expanded (exception roots, string types).
    pub excluded_ancestors: Vec<String>,
    /// Payload spellings denoting "no body".
    pub empty_payload_types: Vec<String>,
    /// Payload types passed through untyped.
    pub raw_body_types: Vec<String>,
    pub substitution: SubstitutionPolicy,
    /// Rule ids that never produce findings.
    pub disabled_rules: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            call_verb_annotations: strings(&[
                "retrofit2.http.DELETE",
                "retrofit2.http.GET",
                "retrofit2.http.POST",
                "retrofit2.http.PUT",
                "retrofit2.http.PATCH",
                "retrofit2.http.HEAD",
                "retrofit2.http.OPTIONS",
                "retrofit2.http.HTTP",
                "DELETE",
                "GET",
                "POST",
                "PUT",
                "PATCH",
                "HEAD",
                "OPTIONS",
                "HTTP",
            ]),
            serialized_name_suffix: "SerializedName".to_string(),
            json_field_suffix: "Json".to_string(),
            json_class_suffix: "JsonClass".to_string(),
            // Mutable* collections are compiler intrinsics with no declaration to resolve,
            // so their spelling is the only signal.
            mutable_collection_patterns: strings(&[
                r".*MutableMap(\s)?<.*,(\s)?.*>\??",
                r".*MutableSet(\s)?<.*>\??",
                r".*MutableList(\s)?<.*>\??",
                r".*MutableCollection(\s)?<.*>\??",
            ]),
            mutable_type_names: strings(&[
                // Set
                "MutableSet",
                "ArraySet",
                "HashSet",
                // List
                "MutableList",
                "ArrayList",
                // Array
                "SparseArray",
                "SparseArrayCompat",
                "LongSparseArray",
                "SparseBooleanArray",
                "SparseIntArray",
                // Map
                "MutableMap",
                "HashMap",
                "Hashtable",
                // Compose
                "MutableState",
                // Flow
                "MutableStateFlow",
                "MutableSharedFlow",
                // RxJava & RxRelay
                "PublishSubject",
                "BehaviorSubject",
                "ReplaySubject",
                "PublishRelay",
                "BehaviorRelay",
                "ReplayRelay",
            ]),
            excluded_ancestors: strings(&[
                "java.lang.Throwable",
                "kotlin.Throwable",
                "java.lang.String",
                "kotlin.String",
            ]),
            empty_payload_types: strings(&["kotlin.Unit", "java.lang.Void", "Unit", "Void"]),
            raw_body_types: strings(&["okhttp3.ResponseBody", "ResponseBody"]),
            substitution: SubstitutionPolicy::First,
            disabled_rules: Vec::new(),
        }
    }
}

impl AnalysisConfig {
    pub fn is_rule_enabled(&self, rule: &str) -> bool {
        !self.disabled_rules.iter().any(|r| r == rule)
    }
}

/// True if `name` equals an entry, or its simple name does.
pub(crate) fn name_matches(entries: &[String], name: &str) -> bool {
    let simple = crate::domain::types::simple_name(name);
    entries.iter().any(|e| e == name || e == simple)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
