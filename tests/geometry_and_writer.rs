// tests/geometry_and_writer.rs

mod common;
use crate::common::TestResult;
use crate::common::builders::{JobSpecBuilder, WATER_ZMATRIX, water_zmatrix};

use qcrun::errors::QcRunError;
use qcrun::job::{Geometry, JobKind};
use qcrun::option::OptionName;
use qcrun::types::Program;
use qcrun::writer::{GaussianWriter, InputWriter, validate_job};

#[test]
fn cartesian_geometry_parses() -> TestResult {
    let geo = Geometry::parse("O 0 0 -0.11\nH 0 -1.635 0.876\n\nH 0 1.635 0.876\n")?;
    assert!(!geo.is_zmatrix());
    assert_eq!(geo.natoms(), 3);
    assert!(geo.coordinate_names().is_empty());
    Ok(())
}

#[test]
fn zmatrix_geometry_parses_with_either_value_syntax() -> TestResult {
    let geo = Geometry::parse(WATER_ZMATRIX)?;
    assert!(geo.is_zmatrix());
    assert_eq!(geo.natoms(), 3);
    assert_eq!(geo.coordinate_names(), vec!["AHOH", "ROH", "ROH2"]);

    let spaced = Geometry::parse("H\nH 1 R\n\nR 0.74\n")?;
    assert_eq!(spaced.coordinate_names(), vec!["R"]);
    Ok(())
}

#[test]
fn invalid_geometries_are_rejected() {
    for text in [
        "",
        "   \n\n",
        "garbage text here now",
        "O 0 0",
        "O\nH 2 R\n\nR 1.0\n",
        "O\nH 1 R\n\nQ 1.0\n",
        "O\nH 1 R\n\nR = abc\n",
    ] {
        let err = Geometry::parse(text).expect_err(text);
        assert!(
            matches!(err, QcRunError::InvalidGeometry(_)),
            "{text:?} gave {err:?}"
        );
    }
}

#[test]
fn non_finite_coordinates_fail_validation() {
    let job = JobSpecBuilder::new(Program::Gaussian16)
        .geometry(Geometry::parse("O nan 0 0").expect("parses as Cartesian"))
        .build();

    let err = GaussianWriter.write(&job).expect_err("NaN coordinate");
    assert!(matches!(err, QcRunError::InvalidGeometry(_)));
}

#[test]
fn options_outside_the_allow_list_are_rejected() {
    let job = JobSpecBuilder::new(Program::Orca4)
        .option(OptionName::ScfDiis, false)
        .build();

    let err = validate_job(&job).expect_err("orca has no scf_diis");
    assert!(matches!(
        err,
        QcRunError::UnknownOption { program: Program::Orca4, ref option } if option == "scf_diis"
    ));
}

#[test]
fn frozen_coordinates_must_exist() {
    let job = JobSpecBuilder::new(Program::Gaussian16)
        .geometry(water_zmatrix())
        .kind(JobKind::Optimization)
        .frozen("DIH")
        .build();

    let err = validate_job(&job).expect_err("DIH is not a coordinate");
    assert!(matches!(err, QcRunError::InvalidGeometry(_)));
}

#[test]
fn gaussian_energy_deck() -> TestResult {
    let job = JobSpecBuilder::new(Program::Gaussian16)
        .option(OptionName::ScfMaxiter, 10)
        .option(OptionName::ScfGuess, "CORE")
        .build();

    let deck = GaussianWriter.write(&job)?;
    let lines: Vec<&str> = deck.lines().collect();

    assert_eq!(lines[0], "# hf/sto-3g scf=(maxcycle=10) guess=core");
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "qcrun job");
    assert_eq!(lines[4], "0 1");
    assert_eq!(lines[5], "O  0.00000000  0.00000000  -0.11000000");
    assert_eq!(lines.len(), 9);
    Ok(())
}

#[test]
fn gaussian_deck_uses_the_last_value_of_a_duplicated_option() -> TestResult {
    let job = JobSpecBuilder::new(Program::Gaussian16)
        .option(OptionName::ScfGuess, "core")
        .option(OptionName::ScfGuess, "huckel")
        .option(OptionName::ScfDiis, false)
        .build();

    let deck = GaussianWriter.write(&job)?;
    let route = deck.lines().next().unwrap_or_default();
    assert_eq!(route, "# hf/sto-3g scf=(nodiis) guess=huckel");
    Ok(())
}

#[test]
fn gaussian_saddle_optimization_in_zmatrix() -> TestResult {
    let job = JobSpecBuilder::new(Program::Gaussian16)
        .geometry(water_zmatrix())
        .kind(JobKind::Optimization)
        .saddle(true)
        .frozen("AHOH")
        .option(OptionName::OptMaxiter, 50)
        .option(OptionName::OptCoord, "zmatrix")
        .comment("water ts")
        .build();

    let deck = GaussianWriter.write(&job)?;
    let lines: Vec<&str> = deck.lines().collect();

    assert_eq!(
        lines[0],
        "# hf/sto-3g opt=(ts,calcfc,noeigentest,maxcycles=50,z-matrix)"
    );
    assert_eq!(lines[2], "water ts");
    assert_eq!(&lines[5..8], &["O", "H  1  ROH", "H  1  ROH2  2  AHOH"]);
    assert_eq!(&lines[9..11], &["ROH=0.96000000", "ROH2=0.96000000"]);
    assert_eq!(lines[11], "");
    assert_eq!(lines[12], "AHOH=104.50000000");
    Ok(())
}

#[test]
fn gaussian_job_keywords() -> TestResult {
    let route = |kind: JobKind| -> Result<String, QcRunError> {
        let job = JobSpecBuilder::new(Program::Gaussian09)
            .kind(kind)
            .option(OptionName::IrcMaxiter, 30)
            .build();
        Ok(GaussianWriter.write(&job)?.lines().next().unwrap_or_default().to_string())
    };

    assert_eq!(route(JobKind::Energy)?, "# hf/sto-3g");
    assert_eq!(route(JobKind::Gradient)?, "# hf/sto-3g force");
    assert_eq!(route(JobKind::Hessian)?, "# hf/sto-3g freq");
    assert_eq!(route(JobKind::Optimization)?, "# hf/sto-3g opt");
    assert_eq!(route(JobKind::Irc)?, "# hf/sto-3g irc=(maxpoints=30)");
    Ok(())
}

#[test]
fn mistyped_option_values_are_config_errors() {
    let job = JobSpecBuilder::new(Program::Gaussian16)
        .option(OptionName::ScfMaxiter, "ten")
        .build();

    let err = GaussianWriter.write(&job).expect_err("maxiter must be an integer");
    assert!(matches!(err, QcRunError::ConfigError(_)));
}

#[test]
fn gaussian_writer_refuses_other_programs() {
    let job = JobSpecBuilder::new(Program::Psi4).build();
    let err = GaussianWriter.write(&job).expect_err("psi4 is not gaussian");
    assert!(matches!(err, QcRunError::ConfigError(_)));
}

#[test]
fn closures_are_writers() -> TestResult {
    let writer = |job: &qcrun::job::JobSpec| -> qcrun::errors::Result<String> {
        validate_job(job)?;
        Ok(format!("{} {} {}", job.program, job.method, job.options))
    };
    let job = JobSpecBuilder::new(Program::Psi4)
        .option(OptionName::ScfGuess, "sad")
        .build();

    assert_eq!(writer.write(&job)?, "psi4 hf {scf_guess=sad}");
    Ok(())
}
