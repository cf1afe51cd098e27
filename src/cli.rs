use crate::app::dto::{AnalyzeRequest, AnalyzeResponse, FieldsRequest, MutabilityDto, RulesResponse};
use crate::app::engine::AnalysisEngine;
use crate::domain::types::DeclarationData;
use anyhow::Result;

/// Output format of `check`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Run the detectors and print the findings. Returns the analysis for exit-code decisions.
pub fn check(engine: &AnalysisEngine, rules: &[String], format: OutputFormat) -> Result<AnalyzeResponse> {
    let res = engine.analyze(AnalyzeRequest {
        rules: (!rules.is_empty()).then(|| rules.to_vec()),
    })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&res)?),
        OutputFormat::Text => {
            for finding in &res.findings {
                println!(
                    "{}: {} [{}] {}",
                    finding.subject, finding.severity, finding.rule, finding.message.lines().next().unwrap_or("")
                );
                for line in finding.message.lines().skip(1) {
                    println!("    {}", line);
                }
            }
            println!(
                "{} endpoints checked: {} errors, {} warnings, {} informational",
                res.endpoint_count, res.error_count, res.warning_count, res.informational_count
            );
        }
    }
    Ok(res)
}

pub fn list_endpoints(engine: &AnalysisEngine) -> Result<()> {
    let res = engine.endpoints()?;
    println!("Endpoints: {}", res.endpoints.len());
    for e in &res.endpoints {
        let suspend = if e.is_suspend { " (suspend)" } else { "" };
        match &e.payload {
            Some(payload) => println!(
                "  {}.{}{} -> {} [{}; {} fields]",
                e.interface,
                e.method,
                suspend,
                payload,
                e.resolved_type.as_deref().unwrap_or("unresolved"),
                e.field_count
            ),
            None => println!("  {}.{}{} -> (nothing to check)", e.interface, e.method, suspend),
        }
    }
    Ok(())
}

pub fn list_fields(engine: &AnalysisEngine, interface: &str, method: &str) -> Result<()> {
    let res = engine.fields(FieldsRequest {
        interface: interface.to_string(),
        method: method.to_string(),
    })?;
    println!(
        "{}.{}: {}",
        res.interface,
        res.method,
        res.payload.as_deref().unwrap_or("(nothing to check)")
    );
    for f in &res.fields {
        let mutability = match f.mutability {
            MutabilityDto::Immutable => "",
            MutabilityDto::Reassignable => " [var]",
            MutabilityDto::MutableType => " [mutable type]",
        };
        println!("  {}.{}: {}{}", f.owner, f.name, f.type_text, mutability);
        if !f.annotations.is_empty() {
            println!("      @ {}", f.annotations.join(", "));
        }
    }
    Ok(())
}

pub fn print_graph(engine: &AnalysisEngine) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&engine.graph()?)?);
    Ok(())
}

pub fn print_rules(rules: &RulesResponse) {
    for rule in &rules.rules {
        let state = if rule.enabled { "" } else { " (disabled)" };
        println!(
            "{} [{}, priority {}]{}",
            rule.id, rule.severity, rule.priority, state
        );
        println!("    {}", rule.brief_description);
    }
}

/// JSON Schema of the declaration file format
pub fn print_schema() -> Result<()> {
    let schema = schemars::schema_for!(DeclarationData);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
