// tests/config_loading.rs

mod common;
use crate::common::fixtures::G16_SCF_CONVERGED;
use crate::common::{TestResult, init_tracing, with_timeout};

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;

use qcrun::config::{JobFile, from_toml_str, load_and_validate};
use qcrun::engine::RunStatus;
use qcrun::errors::QcRunError;
use qcrun::job::JobKind;
use qcrun::option::{OptionName, OptionValue};
use qcrun::types::{ErrorKind, FailurePriority, Program};
use qcrun::writer::GaussianWriter;

const WATER_JOB: &str = r#"
[job]
program = "gaussian16"
method = "hf"
basis = "sto-3g"
geometry = """
O  0.000  0.000 -0.110
H  0.000 -1.635  0.876
H -0.000  1.635  0.876
"""
"#;

fn parse(text: &str) -> Result<JobFile, QcRunError> {
    JobFile::try_from(from_toml_str(text)?)
}

fn expect_config_error(text: &str) {
    match parse(text) {
        Err(QcRunError::ConfigError(_)) => {}
        other => panic!("expected a config error, got {other:?}"),
    }
}

#[test]
fn demo_job_file_loads() -> TestResult {
    init_tracing();

    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let file = load_and_validate(manifest.join("demos/water-scf.toml"))?;

    assert_eq!(file.job.program, Program::Gaussian16);
    assert_eq!(file.job.kind, JobKind::Energy);
    assert_eq!(file.job.comment, "water scf");
    assert_eq!(file.job.geometry.natoms(), 3);
    assert_eq!(
        file.job.options.get(OptionName::ScfMaxiter),
        Some(&OptionValue::Int(10))
    );

    assert_eq!(file.run.guarded_kinds(), vec![ErrorKind::ScfNoconv]);
    assert_eq!(file.run.guards[0].ladder.len(), 3);
    assert_eq!(
        file.run.guards[0]
            .ladder
            .step(2)
            .and_then(|s| s.get(OptionName::ScfDiis)),
        Some(&OptionValue::Bool(false))
    );
    assert_eq!(file.run.max_attempts(), 4);
    assert_eq!(file.run.timeout, Some(Duration::from_secs(3600)));
    assert_eq!(file.run.priority, FailurePriority::Declared);
    assert_eq!(file.run.run_root, manifest.join("demos").join("runs/water"));
    assert!(file.run.script.is_some());
    Ok(())
}

#[test]
fn minimal_job_uses_defaults() -> TestResult {
    let file = parse(WATER_JOB)?;

    assert_eq!(file.job.charge, 0);
    assert_eq!(file.job.mult, 1);
    assert!(file.job.options.is_empty());
    assert!(file.run.script.is_none());
    assert!(file.run.guards.is_empty());
    assert_eq!(file.run.run_root, PathBuf::from("runs"));
    assert_eq!(file.run.input_name, "run.inp");
    assert_eq!(file.run.output_names, vec!["run.out".to_string()]);
    assert_eq!(file.run.timeout, None);
    Ok(())
}

#[test]
fn explicit_priority_and_aux_files() -> TestResult {
    let text = format!(
        r#"{WATER_JOB}
[run]
script = "true"
priority = "explicit"
priority_order = ["opt_noconv", "scf_noconv"]

[run.aux]
"z.dat" = "last"
"a.dat" = "first"

[[guard]]
error = "scf_noconv"
ladder = [[{{ name = "scf_guess", value = "core" }}]]

[[guard]]
error = "opt_noconv"
ladder = [[{{ name = "opt_maxiter", value = 100 }}]]
"#
    );
    let file = parse(&text)?;

    assert_eq!(
        file.run.priority,
        FailurePriority::Explicit(vec![ErrorKind::OptNoconv, ErrorKind::ScfNoconv])
    );
    let aux_names: Vec<&str> = file.run.aux_files.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(aux_names, vec!["a.dat", "z.dat"]);
    Ok(())
}

#[test]
fn structural_errors_are_config_errors() {
    // Same kind guarded twice.
    expect_config_error(&format!(
        "{WATER_JOB}\n[[guard]]\nerror = \"scf_noconv\"\n[[guard]]\nerror = \"scf_noconv\"\n"
    ));
    // Empty remedy.
    expect_config_error(&format!(
        "{WATER_JOB}\n[[guard]]\nerror = \"scf_noconv\"\nladder = [[]]\n"
    ));
    // No outputs.
    expect_config_error(&format!("{WATER_JOB}\n[run]\noutput_names = []\n"));
    // Explicit priority without an order.
    expect_config_error(&format!("{WATER_JOB}\n[run]\npriority = \"explicit\"\n"));
    // Order naming an unguarded kind.
    expect_config_error(&format!(
        "{WATER_JOB}\n[run]\npriority = \"explicit\"\npriority_order = [\"irc_noconv\"]\n"
    ));
    // Order without explicit priority.
    expect_config_error(&format!(
        "{WATER_JOB}\n[run]\npriority_order = [\"scf_noconv\"]\n[[guard]]\nerror = \"scf_noconv\"\n"
    ));
    // Zero timeout.
    expect_config_error(&format!("{WATER_JOB}\n[run]\ntimeout_secs = 0\n"));
    // Blank script.
    expect_config_error(&format!("{WATER_JOB}\n[run]\nscript = \"  \"\n"));
    // Aux files that would overwrite the input or the staged script.
    expect_config_error(&format!("{WATER_JOB}\n[run.aux]\n\"run.inp\" = \"x\"\n"));
    expect_config_error(&format!(
        "{WATER_JOB}\n[run]\ninput_name = \"job.com\"\n\n[run.aux]\n\"job.com\" = \"x\"\n"
    ));
    expect_config_error(&format!("{WATER_JOB}\n[run.aux]\n\"run_script.sh\" = \"x\"\n"));
}

#[test]
fn unsupported_guard_is_rejected() {
    let text = WATER_JOB.replace("gaussian16", "molpro2015")
        + "\n[[guard]]\nerror = \"opt_noconv\"\n";
    assert!(matches!(
        parse(&text),
        Err(QcRunError::UnsupportedKind {
            program: Program::Molpro2015,
            kind: ErrorKind::OptNoconv
        })
    ));
}

#[test]
fn disallowed_options_are_rejected_in_base_and_ladders() {
    let nwchem = WATER_JOB.replace("gaussian16", "nwchem6");

    let base = format!("{nwchem}\n[[option]]\nname = \"scf_guess\"\nvalue = \"core\"\n");
    assert!(matches!(parse(&base), Err(QcRunError::UnknownOption { .. })));

    let ladder = format!(
        "{nwchem}\n[[guard]]\nerror = \"scf_noconv\"\nladder = [[{{ name = \"scf_diis\", value = false }}]]\n"
    );
    assert!(matches!(
        parse(&ladder),
        Err(QcRunError::UnknownOption { program: Program::Nwchem6, .. })
    ));
}

#[test]
fn bad_geometry_is_rejected() {
    let text = r#"
[job]
program = "gaussian16"
method = "hf"
basis = "sto-3g"
geometry = "this is not a molecule at all"
"#;
    assert!(matches!(parse(text), Err(QcRunError::InvalidGeometry(_))));
}

#[test]
fn toml_level_mistakes_are_toml_errors() {
    let unknown_program = WATER_JOB.replace("gaussian16", "gaussian03");
    assert!(matches!(parse(&unknown_program), Err(QcRunError::TomlError(_))));

    let unknown_field = format!("{WATER_JOB}\n[run]\nscrpit = \"true\"\n");
    assert!(matches!(parse(&unknown_field), Err(QcRunError::TomlError(_))));

    let unknown_option = format!("{WATER_JOB}\n[[option]]\nname = \"scf_magic\"\nvalue = 1\n");
    assert!(matches!(parse(&unknown_option), Err(QcRunError::TomlError(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let tmp = TempDir::new().expect("tempdir");
    let err = load_and_validate(tmp.path().join("nope.toml")).expect_err("no such file");
    assert!(matches!(err, QcRunError::IoError(_)));
}

#[test]
fn absolute_run_roots_are_kept() -> TestResult {
    let tmp = TempDir::new()?;
    let root = tmp.path().join("elsewhere");
    let path = tmp.path().join("job.toml");
    fs::write(
        &path,
        format!("{WATER_JOB}\n[run]\nroot = {:?}\n", root.display().to_string()),
    )?;

    let file = load_and_validate(&path)?;
    assert_eq!(file.run.run_root, root);
    Ok(())
}

#[tokio::test]
async fn run_job_file_end_to_end() -> TestResult {
    with_timeout(async {
        init_tracing();
        let tmp = TempDir::new()?;
        fs::write(tmp.path().join("converged.log"), G16_SCF_CONVERGED)?;

        let path = tmp.path().join("job.toml");
        fs::write(
            &path,
            format!(
                "{WATER_JOB}\n[run]\nscript = \"cp ../../../converged.log run.out\"\nroot = \"runs/water\"\n\n[[guard]]\nerror = \"scf_noconv\"\nladder = [[{{ name = \"scf_guess\", value = \"core\" }}]]\n"
            ),
        )?;

        let report = qcrun::run_job_file(&path, &GaussianWriter).await?;

        assert_eq!(report.status, RunStatus::Converged);
        assert_eq!(report.attempt_count(), 1);
        assert!(tmp.path().join("runs/water/attempt_000/run.inp").is_file());
        Ok(())
    })
    .await
}
