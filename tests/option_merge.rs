// tests/option_merge.rs

use qcrun::job::JobSpec;
use qcrun::option::{JobOption, OptionName, OptionSet, OptionValue};
use qcrun::types::Program;
use qcrun_test_utils::builders::{JobSpecBuilder, water};

#[test]
fn merge_appends_new_names_in_order() {
    let base = OptionSet::new().with(OptionName::ScfMaxiter, 10);
    let remedy = OptionSet::new()
        .with(OptionName::ScfGuess, "core")
        .with(OptionName::ScfDiis, false);

    let merged = base.merge(&remedy);
    let names: Vec<OptionName> = merged.iter().map(|o| o.name).collect();
    assert_eq!(
        names,
        vec![OptionName::ScfMaxiter, OptionName::ScfGuess, OptionName::ScfDiis]
    );
}

#[test]
fn merge_overrides_by_name_in_place() {
    let base = OptionSet::new()
        .with(OptionName::ScfGuess, "core")
        .with(OptionName::ScfMaxiter, 10);
    let remedy = OptionSet::new().with(OptionName::ScfGuess, "huckel");

    let merged = base.merge(&remedy);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged.iter().next().map(|o| o.name), Some(OptionName::ScfGuess));
    assert_eq!(merged.get(OptionName::ScfGuess), Some(&OptionValue::from("huckel")));
    assert_eq!(merged.get(OptionName::ScfMaxiter), Some(&OptionValue::Int(10)));
}

#[test]
fn merge_collapses_duplicates_of_overridden_names() {
    let base = OptionSet::new()
        .with(OptionName::ScfGuess, "core")
        .with(OptionName::ScfMaxiter, 10)
        .with(OptionName::ScfGuess, "sad");
    let remedy = OptionSet::new().with(OptionName::ScfGuess, "huckel");

    let merged = base.merge(&remedy);
    assert_eq!(merged.to_string(), "{scf_guess=huckel, scf_maxiter=10}");
}

#[test]
fn merge_leaves_both_inputs_untouched() {
    let base = OptionSet::new().with(OptionName::ScfMaxiter, 10);
    let remedy = OptionSet::new().with(OptionName::ScfMaxiter, 200);

    let _ = base.merge(&remedy);
    assert_eq!(base.get(OptionName::ScfMaxiter), Some(&OptionValue::Int(10)));
    assert_eq!(remedy.get(OptionName::ScfMaxiter), Some(&OptionValue::Int(200)));
}

#[test]
fn get_returns_last_entry_when_duplicates_exist() {
    let set: OptionSet = vec![
        JobOption::new(OptionName::OptMaxiter, 20),
        JobOption::new(OptionName::OptMaxiter, 40),
    ]
    .into_iter()
    .collect();

    assert_eq!(set.get(OptionName::OptMaxiter).and_then(OptionValue::as_int), Some(40));
    assert!(set.contains(&JobOption::new(OptionName::OptMaxiter, 40)));
    assert!(!set.contains(&JobOption::new(OptionName::OptMaxiter, 20)));
}

#[test]
fn next_attempt_spec_is_a_clone_with_merged_options() {
    let job = JobSpecBuilder::new(Program::Gaussian16)
        .option(OptionName::ScfMaxiter, 10)
        .build();
    let remedy = OptionSet::new().with(OptionName::ScfGuess, "core");

    let next: JobSpec = job.clone().with_options(job.options.merge(&remedy));
    assert_eq!(job.options.len(), 1);
    assert_eq!(next.options.len(), 2);
    assert_eq!(next.geometry, water());
    assert_eq!(next.method, job.method);
}

#[test]
fn option_names_parse_from_their_display_form() {
    for name in OptionName::ALL {
        assert_eq!(name.to_string().parse::<OptionName>(), Ok(name));
    }
    assert!("scf_bogus".parse::<OptionName>().is_err());
}
