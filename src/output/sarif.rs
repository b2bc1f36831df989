use crate::error::Result;
use crate::finding::{CheckResult, Outcome, ValidationRun};
use serde_sarif::sarif::{
    ArtifactLocation, Location, Message, MultiformatMessageString, PhysicalLocation,
    ReportingDescriptor, Result as SarifResult, ResultLevel, Run, Sarif, Tool, ToolComponent,
};
use std::collections::BTreeMap;

/// Formats the warnings and issues of a run as a SARIF 2.1.0 log.
///
/// Passed checks are left out. Locations are relative to the extension
/// directory.
pub fn format(run: &ValidationRun) -> Result<String> {
    let failures: Vec<&CheckResult> = run
        .results
        .iter()
        .filter(|r| r.outcome != Outcome::Passed)
        .collect();

    // First message seen per check id becomes the rule description.
    let mut rule_map: BTreeMap<&str, &CheckResult> = BTreeMap::new();
    for r in failures.iter().copied() {
        rule_map.entry(r.check.as_str()).or_insert(r);
    }
    let rule_index: BTreeMap<&str, i64> = rule_map
        .keys()
        .enumerate()
        .map(|(i, id)| (*id, i as i64))
        .collect();

    let rules: Vec<ReportingDescriptor> = rule_map
        .iter()
        .map(|(id, r)| {
            let mut rule = ReportingDescriptor::builder().id(id.to_string()).build();
            rule.short_description = Some(
                MultiformatMessageString::builder()
                    .text(r.message.clone())
                    .build(),
            );
            rule
        })
        .collect();

    let results: Vec<SarifResult> = failures
        .iter()
        .map(|r| {
            let level = match r.outcome {
                Outcome::Issue => ResultLevel::Error,
                _ => ResultLevel::Warning,
            };

            let mut result = SarifResult::builder()
                .message(Message::builder().text(r.message.clone()).build())
                .build();
            result.rule_id = Some(r.check.clone());
            result.level = Some(level);
            result.rule_index = rule_index.get(r.check.as_str()).copied();

            if let Some(ref file) = r.file {
                let mut location = Location::builder().build();
                let mut physical = PhysicalLocation::builder().build();
                physical.artifact_location = Some(
                    ArtifactLocation::builder()
                        .uri(file.replace('\\', "/"))
                        .build(),
                );
                location.physical_location = Some(physical);
                result.locations = Some(vec![location]);
            }

            result
        })
        .collect();

    let driver = ToolComponent::builder()
        .name("extcheck")
        .version(env!("CARGO_PKG_VERSION").to_string())
        .rules(rules)
        .build();
    let tool = Tool::builder().driver(driver).build();
    let sarif_run = Run::builder().tool(tool).results(results).build();
    let sarif = Sarif::builder().version("2.1.0").runs(vec![sarif_run]).build();

    Ok(serde_json::to_string_pretty(&sarif)?)
}
