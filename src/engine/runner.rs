// src/engine/runner.rs

use tracing::{debug, info, warn};

use crate::engine::core::{CoreDecision, EscalationCore, FailureCause};
use crate::engine::ladder::RobustRunConfig;
use crate::engine::report::{AttemptRecord, RunReport, RunStatus};
use crate::errors::{QcRunError, Result};
use crate::exec::{ExecRequest, ExecutorBackend};
use crate::fingerprint::attempt_digest;
use crate::job::JobSpec;
use crate::status::StatusClassifier;
use crate::status::registry;
use crate::writer::InputWriter;

/// Run `job` until it converges or its remedies run out.
///
/// The job's own option set is the base for every attempt. Each attempt:
/// 1. renders the input with `writer`,
/// 2. executes it through `executor` in a fresh directory,
/// 3. classifies the first output file against the guarded kinds,
/// 4. asks [`EscalationCore`] what to do next.
///
/// With no script in `config`, the input is rendered once and returned as a
/// [`RunStatus::GenerationOnly`] report; the executor is never called.
///
/// Errors are reserved for problems outside the job itself (bad geometry or
/// options, unsupported kinds, staging failures). Non-convergence is reported
/// through [`RunReport::status`].
pub async fn robust_run<W, E>(
    job: &JobSpec,
    config: RobustRunConfig,
    writer: &W,
    executor: &mut E,
) -> Result<RunReport>
where
    W: InputWriter + ?Sized,
    E: ExecutorBackend + ?Sized,
{
    let table = registry::lookup(job.program);
    for guard in &config.guards {
        table.ensure_recognises(guard.kind)?;
    }
    if config.output_names.is_empty() {
        return Err(QcRunError::ConfigError(
            "at least one output file name is required".to_string(),
        ));
    }

    let Some(script) = config.script.clone() else {
        let input = writer.write(job)?;
        info!(program = %job.program, "no execution script; generated input only");
        return Ok(RunReport {
            status: RunStatus::GenerationOnly,
            input,
            output: None,
            outputs: Vec::new(),
            options: job.options.clone(),
            attempts: Vec::new(),
        });
    };

    let classifier = StatusClassifier::for_program(job.program);
    let guarded = config.guarded_kinds();
    let mut core = EscalationCore::new(&config, job.options.clone());
    let mut attempts: Vec<AttemptRecord> = Vec::new();

    info!(
        program = %job.program,
        method = %job.method,
        basis = %job.basis,
        ?guarded,
        max_attempts = core.max_attempts(),
        "starting robust run"
    );

    loop {
        let index = core.attempts();
        let options = core.current_options().clone();
        let spec = job.clone().with_options(options.clone());
        let input = writer.write(&spec)?;
        let digest = attempt_digest(&input, &config.aux_files);

        if let Some(prev) = attempts.last() {
            if prev.input_digest == digest {
                warn!(
                    attempt = index,
                    "remedy produced an input identical to the previous attempt"
                );
            }
        }

        info!(attempt = index, %options, "running attempt");

        let request = ExecRequest {
            script: script.clone(),
            run_root: config.run_root.clone(),
            attempt: index,
            input_name: config.input_name.clone(),
            input_text: input.clone(),
            aux_files: config.aux_files.clone(),
            output_names: config.output_names.clone(),
            timeout: config.timeout,
        };
        let outputs = executor.execute(request).await?;
        let output = outputs.primary().map(str::to_string);

        let classification = classifier.classify(&guarded, output.as_deref())?;
        let decision = core.step(&classification);
        debug!(attempt = index, ?decision, "escalation decision");

        let failure = match &decision {
            CoreDecision::Converged => None,
            CoreDecision::Retry { cause, .. } | CoreDecision::GiveUp { cause, .. } => Some(*cause),
        };
        attempts.push(AttemptRecord {
            index,
            work_dir: outputs.work_dir.clone(),
            options: options.clone(),
            input_digest: digest,
            exit: outputs.exit,
            classification,
            failure,
        });

        let status = match decision {
            CoreDecision::Converged => {
                info!(attempts = attempts.len(), "robust run converged");
                RunStatus::Converged
            }
            CoreDecision::Retry {
                cause,
                remedy_kind,
                step,
                ..
            } => {
                warn!(
                    attempt = index,
                    ?cause,
                    kind = %remedy_kind,
                    step,
                    "attempt failed; escalating"
                );
                continue;
            }
            CoreDecision::GiveUp { cause, reason } => {
                warn!(attempts = attempts.len(), ?cause, ?reason, "robust run failed");
                match cause {
                    FailureCause::Guarded(kind) => RunStatus::LadderExhausted { kind },
                    FailureCause::Unclassified => RunStatus::Unclassified,
                }
            }
        };

        return Ok(RunReport {
            status,
            input,
            output,
            outputs: outputs.outputs,
            options,
            attempts,
        });
    }
}
