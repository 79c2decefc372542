// tests/fs_abstraction.rs

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use qcrun::exec::ExecRequest;
use qcrun::exec::script::{SCRIPT_NAME, collect_outputs, stage_attempt};
use qcrun::exec::workdir::{allocate, attempt_dir_name};
use qcrun::fingerprint::{attempt_digest, input_digest};
use qcrun::fs::FileSystem;
use qcrun::fs::mock::MockFileSystem;

fn request(attempt: usize) -> ExecRequest {
    ExecRequest {
        script: "g16 < run.inp > run.out".to_string(),
        run_root: PathBuf::from("runs"),
        attempt,
        input_name: "run.inp".to_string(),
        input_text: "# hf/sto-3g\n".to_string(),
        aux_files: vec![("basis.gbs".to_string(), "H 0\n".to_string())],
        output_names: vec!["run.out".to_string(), "run.fchk".to_string()],
        timeout: None,
    }
}

#[test]
fn attempt_dirs_are_numbered() {
    assert_eq!(attempt_dir_name(0), "attempt_000");
    assert_eq!(attempt_dir_name(7), "attempt_007");
    assert_eq!(attempt_dir_name(1234), "attempt_1234");
}

#[test]
fn staging_writes_input_aux_and_script() -> anyhow::Result<()> {
    let fs = MockFileSystem::new();

    let dir = stage_attempt(&fs, &request(0))?;

    assert_eq!(dir, Path::new("runs/attempt_000"));
    assert_eq!(
        fs.files_in(&dir),
        vec![
            dir.join("basis.gbs"),
            dir.join("run.inp"),
            dir.join(SCRIPT_NAME),
        ]
    );
    assert_eq!(fs.read_to_string(&dir.join("run.inp"))?, "# hf/sto-3g\n");
    assert_eq!(
        fs.read_to_string(&dir.join(SCRIPT_NAME))?,
        "g16 < run.inp > run.out"
    );

    // Input first, then aux files, then the script that consumes them.
    assert_eq!(
        fs.written(),
        vec![
            dir.join("run.inp"),
            dir.join("basis.gbs"),
            dir.join(SCRIPT_NAME),
        ]
    );
    Ok(())
}

#[test]
fn writing_over_a_directory_fails() -> anyhow::Result<()> {
    let fs = MockFileSystem::new();
    fs.create_fresh_dir(Path::new("runs/attempt_000"))?;

    assert!(fs.write(Path::new("runs/attempt_000"), b"x").is_err());
    assert!(fs.written().is_empty());
    Ok(())
}

#[test]
fn taken_directories_get_a_suffix() -> anyhow::Result<()> {
    let fs = MockFileSystem::new();
    fs.add_file("runs/attempt_000/run.out", "old");
    fs.add_file("runs/attempt_000_1/run.out", "older");

    let dir = allocate(&fs, Path::new("runs"), 0)?;
    assert_eq!(dir, Path::new("runs/attempt_000_2"));
    assert!(fs.is_dir(&dir));

    // The previous contents are untouched.
    assert_eq!(fs.read_to_string(Path::new("runs/attempt_000/run.out"))?, "old");
    Ok(())
}

/// Filesystem where a concurrent run grabs `contested` between our existence
/// check and our create call.
#[derive(Debug)]
struct ContestedFs {
    inner: MockFileSystem,
    contested: PathBuf,
    lost: Mutex<bool>,
}

impl FileSystem for ContestedFs {
    fn read_to_string(&self, path: &Path) -> anyhow::Result<String> {
        self.inner.read_to_string(path)
    }
    fn write(&self, path: &Path, contents: &[u8]) -> anyhow::Result<()> {
        self.inner.write(path, contents)
    }
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }
    fn is_file(&self, path: &Path) -> bool {
        self.inner.is_file(path)
    }
    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }
    fn create_fresh_dir(&self, path: &Path) -> anyhow::Result<()> {
        let mut lost = self.lost.lock().unwrap();
        if path == self.contested && !*lost {
            *lost = true;
            self.inner.create_fresh_dir(path)?;
        }
        self.inner.create_fresh_dir(path)
    }
}

#[test]
fn directory_taken_concurrently_moves_to_the_next_suffix() -> anyhow::Result<()> {
    let fs = ContestedFs {
        inner: MockFileSystem::new(),
        contested: PathBuf::from("runs/attempt_000"),
        lost: Mutex::new(false),
    };

    let dir = allocate(&fs, Path::new("runs"), 0)?;

    assert!(*fs.lost.lock().unwrap());
    assert_eq!(dir, Path::new("runs/attempt_000_1"));
    assert!(fs.is_dir(&dir));
    Ok(())
}

#[test]
fn aux_files_may_not_replace_the_input_or_script() {
    for clash in ["run.inp", SCRIPT_NAME] {
        let fs = MockFileSystem::new();
        let mut req = request(0);
        req.aux_files.push((clash.to_string(), "oops".to_string()));

        assert!(stage_attempt(&fs, &req).is_err(), "{clash}");
        assert!(fs.written().is_empty());
        assert!(!fs.exists(Path::new("runs/attempt_000")));
    }
}

#[test]
fn fresh_dir_creation_refuses_existing_paths() {
    let fs = MockFileSystem::new();
    fs.add_file("runs/attempt_000/run.out", "old");

    assert!(fs.create_fresh_dir(Path::new("runs/attempt_000")).is_err());
    assert!(fs.create_fresh_dir(Path::new("runs/attempt_001")).is_ok());
}

#[test]
fn outputs_are_collected_per_slot() -> anyhow::Result<()> {
    let fs = MockFileSystem::new();
    let dir = stage_attempt(&fs, &request(3))?;
    fs.write(&dir.join("run.out"), b"Normal termination of Gaussian 16")?;

    let outputs = collect_outputs(&fs, &dir, &request(3).output_names);
    assert_eq!(
        outputs,
        vec![Some("Normal termination of Gaussian 16".to_string()), None]
    );

    // A directory where a file is expected reads as missing.
    fs.create_fresh_dir(&dir.join("run.fchk"))?;
    let outputs = collect_outputs(&fs, &dir, &request(3).output_names);
    assert_eq!(outputs[1], None);
    Ok(())
}

#[test]
fn digests_track_input_and_aux_content() {
    let input = "# hf/sto-3g\n";
    assert_eq!(input_digest(input), input_digest(input));
    assert_ne!(input_digest(input), input_digest("# hf/3-21g\n"));

    let a = ("a.dat".to_string(), "1".to_string());
    let b = ("b.dat".to_string(), "2".to_string());
    assert_eq!(
        attempt_digest(input, &[a.clone(), b.clone()]),
        attempt_digest(input, &[b.clone(), a.clone()])
    );
    assert_ne!(
        attempt_digest(input, &[a.clone()]),
        attempt_digest(input, &[(a.0.clone(), "changed".to_string())])
    );
    assert_ne!(attempt_digest(input, &[]), attempt_digest(input, &[b]));
}
