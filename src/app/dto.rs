use crate::adapters::detectors::registry::Severity;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    /// Declaration file the engine was loaded from; `None` for in-memory stores.
    pub store_path: Option<String>,
    pub config_path: Option<String>,
    pub project: Option<String>,
    pub type_count: usize,
    pub interface_count: usize,
    pub endpoint_count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeRequest {
    /// Restrict the run to these issue ids (all enabled rules when absent).
    #[serde(default)]
    pub rules: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeResponse {
    pub endpoint_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub informational_count: usize,
    pub findings: Vec<FindingDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Endpoint,
    Type,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FindingDto {
    pub rule: String,
    pub severity: Severity,
    pub priority: u8,
    pub subject_kind: SubjectKind,
    /// `Api.method` for endpoints, the type id for types.
    pub subject: String,
    pub message: String,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EndpointsResponse {
    pub endpoints: Vec<EndpointDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EndpointDto {
    pub interface: String,
    pub method: String,
    pub is_suspend: bool,
    /// Effective payload spelling; `None` when the payload is empty, raw or missing.
    pub payload: Option<String>,
    /// Declaration the payload resolves to, if any.
    pub resolved_type: Option<String>,
    pub field_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FieldsRequest {
    /// Qualified or simple interface name.
    pub interface: String,
    pub method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FieldsResponse {
    pub interface: String,
    pub method: String,
    pub payload: Option<String>,
    pub resolved_type: Option<String>,
    pub fields: Vec<FieldDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MutabilityDto {
    Immutable,
    Reassignable,
    MutableType,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FieldDto {
    pub owner: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub is_static: bool,
    pub is_enum_constant: bool,
    pub mutability: MutabilityDto,
    pub annotations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GraphResponse {
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes: Vec<String>,
    pub edges: Vec<GraphEdgeDto>,
    /// Groups of types that reference each other through fields.
    pub cycles: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GraphEdgeDto {
    pub source: String,
    pub target: String,
    /// `field` or `extends`
    pub kind: String,
    /// Field name for `field` edges.
    pub field: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RulesResponse {
    pub rules: Vec<RuleDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RuleDto {
    pub id: String,
    pub brief_description: String,
    pub explanation: String,
    pub category: String,
    pub priority: u8,
    pub severity: Severity,
    pub enabled: bool,
}
