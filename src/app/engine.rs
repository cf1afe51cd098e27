use crate::adapters::detectors::DetectorSuite;
use crate::adapters::detectors::registry::{Severity, all_issues, find_issue};
use crate::adapters::json::{JsonConfigSource, JsonDeclarationSource};
use crate::app::dto::*;
use crate::domain::analysis::Analyzer;
use crate::domain::collector::CollectedField;
use crate::domain::config::AnalysisConfig;
use crate::domain::finding::{Finding, Subject};
use crate::domain::graph::{TypeEdge, TypeGraph};
use crate::domain::mutability::{MutabilityClassifier, MutabilityReason};
use crate::domain::ports::{ConfigSource, DeclarationSource};
use crate::domain::store::DeclarationStore;
use crate::domain::types::DeclarationData;
use anyhow::{Context as _, Result, anyhow, bail};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::info;

/// Shared handle to a loaded declaration store and its analysis setup.
///
/// Cloning is cheap. Analyses take a snapshot of the current state and run without holding
/// the lock, so a concurrent `reload` never blocks on a long analysis.
#[derive(Clone)]
pub struct AnalysisEngine {
    inner: Arc<RwLock<EngineData>>,
}

struct EngineData {
    store_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    project: Option<String>,
    state: Snapshot,
}

#[derive(Clone)]
struct Snapshot {
    store: Arc<DeclarationStore>,
    config: Arc<AnalysisConfig>,
    classifier: Arc<MutabilityClassifier>,
    suite: Arc<DetectorSuite>,
}

impl Snapshot {
    fn build(data: DeclarationData, config: AnalysisConfig) -> Result<Self> {
        let classifier =
            MutabilityClassifier::from_config(&config).context("Invalid analysis config")?;
        Ok(Self {
            store: Arc::new(DeclarationStore::from_data(data)),
            config: Arc::new(config),
            classifier: Arc::new(classifier),
            suite: Arc::new(DetectorSuite::new()),
        })
    }

    fn analyzer(&self) -> Analyzer<'_> {
        Analyzer::new(&self.store, &self.config, &self.classifier)
    }
}

impl AnalysisEngine {
    /// Construct an engine from in-memory declarations.
    ///
    /// Used for testing or when declarations come from something other than a file.
    pub fn from_prebuilt(data: DeclarationData, config: AnalysisConfig) -> Result<Self> {
        let project = data.project.clone();
        Ok(Self {
            inner: Arc::new(RwLock::new(EngineData {
                store_path: None,
                config_path: None,
                project,
                state: Snapshot::build(data, config)?,
            })),
        })
    }

    pub fn load(store_path: &Path, config_path: Option<&Path>) -> Result<Self> {
        let (project, state) = load_state(store_path, config_path)?;
        Ok(Self {
            inner: Arc::new(RwLock::new(EngineData {
                store_path: Some(store_path.to_path_buf()),
                config_path: config_path.map(Path::to_path_buf),
                project,
                state,
            })),
        })
    }

    pub fn reload(&self) -> Result<HealthResponse> {
        let (store_path, config_path) = {
            let data = self.read()?;
            (data.store_path.clone(), data.config_path.clone())
        };
        let Some(store_path) = store_path else {
            bail!("Engine was built from in-memory declarations; nothing to reload");
        };
        let (project, state) = load_state(&store_path, config_path.as_deref())?;
        {
            let mut data = self
                .inner
                .write()
                .map_err(|_| anyhow!("Engine state lock poisoned"))?;
            data.project = project;
            data.state = state;
        }
        info!(path = %store_path.display(), "reloaded declarations");
        self.health()
    }

    pub fn health(&self) -> Result<HealthResponse> {
        let data = self.read()?;
        let store = &data.state.store;
        Ok(HealthResponse {
            store_path: data
                .store_path
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            config_path: data
                .config_path
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            project: data.project.clone(),
            type_count: store.len(),
            interface_count: store.interfaces().count(),
            endpoint_count: data.state.analyzer().endpoints().len(),
        })
    }

    pub fn analyze(&self, req: AnalyzeRequest) -> Result<AnalyzeResponse> {
        if let Some(rules) = &req.rules {
            for id in rules {
                if find_issue(id).is_none() {
                    bail!("Unknown rule: {}", id);
                }
            }
        }

        let state = self.snapshot()?;
        let analyzer = state.analyzer();
        let findings = state.suite.run(&analyzer, req.rules.as_deref());
        let findings: Vec<FindingDto> = findings.into_iter().map(finding_to_dto).collect();

        let count = |severity: Severity| findings.iter().filter(|f| f.severity == severity).count();
        Ok(AnalyzeResponse {
            endpoint_count: analyzer.endpoints().len(),
            error_count: count(Severity::Error),
            warning_count: count(Severity::Warning),
            informational_count: count(Severity::Informational),
            findings,
        })
    }

    pub fn endpoints(&self) -> Result<EndpointsResponse> {
        let state = self.snapshot()?;
        let analyzer = state.analyzer();
        let resolver = analyzer.resolver();

        let endpoints = analyzer
            .endpoints()
            .into_iter()
            .map(|endpoint| {
                let analysis = analyzer.analyze_endpoint(endpoint);
                EndpointDto {
                    interface: endpoint.owner.id.clone(),
                    method: endpoint.method.name.clone(),
                    is_suspend: endpoint.method.is_suspend,
                    payload: analysis.as_ref().map(|a| a.payload.canonical_text()),
                    resolved_type: analysis
                        .as_ref()
                        .and_then(|a| resolver.resolve(&a.payload))
                        .map(|r| r.id().to_string()),
                    field_count: analysis.as_ref().map_or(0, |a| a.fields.len()),
                }
            })
            .collect();
        Ok(EndpointsResponse { endpoints })
    }

    pub fn fields(&self, req: FieldsRequest) -> Result<FieldsResponse> {
        let state = self.snapshot()?;
        let analyzer = state.analyzer();
        let endpoint = analyzer
            .find_endpoint(&req.interface, &req.method)
            .ok_or_else(|| anyhow!("Endpoint not found: {}.{}", req.interface, req.method))?;

        let classifier = analyzer.classifier();
        let (payload, resolved_type, fields) = match analyzer.analyze_endpoint(endpoint) {
            Some(analysis) => {
                let resolved = analyzer
                    .resolver()
                    .resolve(&analysis.payload)
                    .map(|r| r.id().to_string());
                let fields = analysis
                    .fields
                    .iter()
                    .map(|f| field_to_dto(f, classifier))
                    .collect();
                (Some(analysis.payload.canonical_text()), resolved, fields)
            }
            None => (None, None, Vec::new()),
        };

        Ok(FieldsResponse {
            interface: endpoint.owner.id.clone(),
            method: endpoint.method.name.clone(),
            payload,
            resolved_type,
            fields,
        })
    }

    pub fn graph(&self) -> Result<GraphResponse> {
        let state = self.snapshot()?;
        let graph = TypeGraph::build(&state.store, state.analyzer().resolver());
        let snapshot = graph.snapshot();
        Ok(GraphResponse {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            nodes: snapshot.nodes,
            edges: snapshot
                .edges
                .into_iter()
                .map(|e| {
                    let (kind, field) = match e.edge {
                        TypeEdge::Field { name } => ("field", Some(name)),
                        TypeEdge::Extends => ("extends", None),
                    };
                    GraphEdgeDto {
                        source: e.source,
                        target: e.target,
                        kind: kind.to_string(),
                        field,
                    }
                })
                .collect(),
            cycles: snapshot.cycles,
        })
    }

    /// Issue registry, with each rule's enabled state under the current config.
    pub fn rules(&self) -> Result<RulesResponse> {
        let state = self.snapshot()?;
        Ok(rules_response(&state.config))
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, EngineData>> {
        self.inner
            .read()
            .map_err(|_| anyhow!("Engine state lock poisoned"))
    }

    fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.read()?.state.clone())
    }
}

/// Registry listing for a given config (no store needed).
pub fn rules_response(config: &AnalysisConfig) -> RulesResponse {
    RulesResponse {
        rules: all_issues()
            .iter()
            .map(|issue| RuleDto {
                id: issue.id.to_string(),
                brief_description: issue.brief_description.to_string(),
                explanation: issue.explanation.to_string(),
                category: issue.category.to_string(),
                priority: issue.priority,
                severity: issue.severity,
                enabled: config.is_rule_enabled(issue.id),
            })
            .collect(),
    }
}

fn load_state(store_path: &Path, config_path: Option<&Path>) -> Result<(Option<String>, Snapshot)> {
    let data = JsonDeclarationSource::new(store_path).load()?;
    let config = JsonConfigSource::new(config_path).load_config()?;
    let project = data.project.clone();
    let state = Snapshot::build(data, config)?;
    Ok((project, state))
}

fn finding_to_dto(finding: Finding) -> FindingDto {
    let issue = find_issue(&finding.rule);
    let subject_kind = match finding.subject {
        Subject::Endpoint { .. } => SubjectKind::Endpoint,
        Subject::Type { .. } => SubjectKind::Type,
    };
    FindingDto {
        severity: issue.map_or(Severity::Informational, |i| i.severity),
        priority: issue.map_or(0, |i| i.priority),
        subject_kind,
        subject: finding.subject.to_string(),
        rule: finding.rule,
        message: finding.message,
        fields: finding.fields,
    }
}

fn field_to_dto(field: &CollectedField<'_>, classifier: &MutabilityClassifier) -> FieldDto {
    let mutability = match classifier.classify(field.field) {
        None => MutabilityDto::Immutable,
        Some(MutabilityReason::Reassignable) => MutabilityDto::Reassignable,
        Some(MutabilityReason::MutableType) => MutabilityDto::MutableType,
    };
    FieldDto {
        owner: field.owner.id.clone(),
        name: field.field.name.clone(),
        type_text: field.field.ty.canonical_text(),
        is_static: field.field.is_static,
        is_enum_constant: field.field.is_enum_constant,
        mutability,
        annotations: field.field.annotations.clone(),
    }
}
