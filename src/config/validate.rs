// src/config/validate.rs

use std::collections::BTreeSet;
use std::time::Duration;

use crate::config::model::{GuardSection, JobFile, PriorityMode, RawJobFile};
use crate::engine::{EscalationLadder, RobustRunConfig};
use crate::exec::script::{SCRIPT_NAME, clashing_aux_name};
use crate::errors::{QcRunError, Result};
use crate::job::{Geometry, JobSpec};
use crate::option::{JobOption, OptionSet};
use crate::status::registry;
use crate::types::FailurePriority;
use crate::writer::validate_job;

impl TryFrom<RawJobFile> for JobFile {
    type Error = QcRunError;

    fn try_from(raw: RawJobFile) -> std::result::Result<Self, Self::Error> {
        validate_run_section(&raw)?;
        validate_guards(&raw)?;

        let job = build_job(&raw)?;
        validate_job(&job)?;

        let run = build_run_config(raw);
        Ok(JobFile::new_unchecked(job, run))
    }
}

fn validate_run_section(raw: &RawJobFile) -> Result<()> {
    let run = &raw.run;

    if run.input_name.trim().is_empty() {
        return Err(QcRunError::ConfigError(
            "[run].input_name must not be empty".to_string(),
        ));
    }
    if run.output_names.is_empty() {
        return Err(QcRunError::ConfigError(
            "[run].output_names must name at least one file".to_string(),
        ));
    }
    if let Some(name) = run.output_names.iter().find(|n| n.trim().is_empty()) {
        return Err(QcRunError::ConfigError(format!(
            "[run].output_names contains an empty name ({name:?})"
        )));
    }
    if let Some(name) = clashing_aux_name(&run.input_name, run.aux.keys().map(String::as_str)) {
        return Err(QcRunError::ConfigError(format!(
            "[run.aux] file '{name}' would overwrite the input or the '{SCRIPT_NAME}' script"
        )));
    }
    if let Some(script) = &run.script {
        if script.trim().is_empty() {
            return Err(QcRunError::ConfigError(
                "[run].script is empty; omit it for generation-only runs".to_string(),
            ));
        }
    }
    if run.timeout_secs == Some(0) {
        return Err(QcRunError::ConfigError(
            "[run].timeout_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    if run.priority == PriorityMode::Declared && !run.priority_order.is_empty() {
        return Err(QcRunError::ConfigError(
            "[run].priority_order requires priority = \"explicit\"".to_string(),
        ));
    }
    if run.priority == PriorityMode::Explicit && run.priority_order.is_empty() {
        return Err(QcRunError::ConfigError(
            "priority = \"explicit\" requires a non-empty [run].priority_order".to_string(),
        ));
    }

    let guarded: BTreeSet<_> = raw.guard.iter().map(|g| g.error).collect();
    for kind in &run.priority_order {
        if !guarded.contains(kind) {
            return Err(QcRunError::ConfigError(format!(
                "[run].priority_order names '{kind}', which has no [[guard]]"
            )));
        }
    }

    Ok(())
}

fn validate_guards(raw: &RawJobFile) -> Result<()> {
    let table = registry::lookup(raw.job.program);
    let mut seen = BTreeSet::new();

    for guard in &raw.guard {
        table.ensure_recognises(guard.error)?;

        if !seen.insert(guard.error) {
            return Err(QcRunError::ConfigError(format!(
                "error kind '{}' is guarded more than once",
                guard.error
            )));
        }

        for (idx, step) in guard.ladder.iter().enumerate() {
            if step.is_empty() {
                return Err(QcRunError::ConfigError(format!(
                    "ladder for '{}' has an empty step at index {idx}",
                    guard.error
                )));
            }
            ensure_options_allowed(raw, step)?;
        }
    }

    Ok(())
}

fn ensure_options_allowed(raw: &RawJobFile, options: &[JobOption]) -> Result<()> {
    let table = registry::lookup(raw.job.program);
    match options.iter().find(|o| !table.allows_option(o.name)) {
        Some(bad) => Err(QcRunError::UnknownOption {
            program: raw.job.program,
            option: bad.name.to_string(),
        }),
        None => Ok(()),
    }
}

fn build_job(raw: &RawJobFile) -> Result<JobSpec> {
    let section = &raw.job;
    let geometry = Geometry::parse(&section.geometry)?;

    let mut job = JobSpec::new(
        section.program,
        section.method.clone(),
        section.basis.clone(),
        geometry,
        section.charge,
        section.mult,
    )
    .with_kind(section.kind)
    .with_options(raw.option.iter().cloned().collect());
    job.frozen_coordinates = section.frozen.clone();
    job.saddle = section.saddle;
    job.comment = section.comment.clone();

    Ok(job)
}

fn build_run_config(raw: RawJobFile) -> RobustRunConfig {
    let run = raw.run;

    let priority = match run.priority {
        PriorityMode::Declared => FailurePriority::Declared,
        PriorityMode::Explicit => FailurePriority::Explicit(run.priority_order),
    };

    let mut config = RobustRunConfig::new(run.root).with_priority(priority);
    config.script = run.script;
    config.input_name = run.input_name;
    config.output_names = run.output_names;
    config.aux_files = run.aux.into_iter().collect();
    config.timeout = run.timeout_secs.map(Duration::from_secs);

    for GuardSection { error, ladder } in raw.guard {
        let ladder: EscalationLadder = ladder
            .into_iter()
            .map(|step| step.into_iter().collect::<OptionSet>())
            .collect();
        config = config.guard(error, ladder);
    }

    config
}
