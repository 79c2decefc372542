// src/exec/script.rs

//! Production executor: stage files, run the caller's script, collect outputs.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::exec::backend::{ExecOutputs, ExecRequest, ExecutorBackend, ScriptExit};
use crate::exec::workdir;
use crate::fs::{FileSystem, RealFileSystem};

/// Name of the script file written into each attempt directory.
pub const SCRIPT_NAME: &str = "run_script.sh";

/// Runs attempts as shell scripts in fresh directories on the real filesystem.
#[derive(Debug, Clone)]
pub struct ScriptExecutor {
    fs: Arc<RealFileSystem>,
}

impl ScriptExecutor {
    pub fn new() -> Self {
        Self {
            fs: Arc::new(RealFileSystem),
        }
    }
}

impl Default for ScriptExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutorBackend for ScriptExecutor {
    fn execute(
        &mut self,
        request: ExecRequest,
    ) -> Pin<Box<dyn Future<Output = crate::errors::Result<ExecOutputs>> + Send + '_>> {
        let fs = Arc::clone(&self.fs);

        Box::pin(async move {
            let dir = stage_attempt(fs.as_ref(), &request)?;
            let exit = run_script(&dir, request.timeout).await?;
            let outputs = collect_outputs(fs.as_ref(), &dir, &request.output_names);

            info!(
                attempt = request.attempt,
                dir = ?dir,
                ?exit,
                found = outputs.iter().filter(|o| o.is_some()).count(),
                expected = outputs.len(),
                "attempt finished"
            );

            Ok(ExecOutputs {
                work_dir: Some(dir),
                outputs,
                exit,
            })
        })
    }
}

/// First auxiliary file name that would overwrite the input or the script.
pub fn clashing_aux_name<'a>(
    input_name: &str,
    aux_names: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    aux_names
        .into_iter()
        .find(|name| *name == input_name || *name == SCRIPT_NAME)
}

/// Allocate the attempt directory and write input, auxiliary files and the
/// script into it.
pub fn stage_attempt(fs: &dyn FileSystem, request: &ExecRequest) -> Result<PathBuf> {
    let aux_names = request.aux_files.iter().map(|(name, _)| name.as_str());
    if let Some(name) = clashing_aux_name(&request.input_name, aux_names) {
        anyhow::bail!("auxiliary file '{name}' clashes with the input or script file");
    }

    let dir = workdir::allocate(fs, &request.run_root, request.attempt)?;

    fs.write(&dir.join(&request.input_name), request.input_text.as_bytes())
        .with_context(|| format!("writing input file '{}'", request.input_name))?;

    for (name, contents) in &request.aux_files {
        fs.write(&dir.join(name), contents.as_bytes())
            .with_context(|| format!("writing auxiliary file '{name}'"))?;
    }

    fs.write(&dir.join(SCRIPT_NAME), request.script.as_bytes())
        .context("writing execution script")?;

    debug!(
        dir = ?dir,
        input = %request.input_name,
        aux = request.aux_files.len(),
        "staged attempt"
    );
    Ok(dir)
}

/// Read back the declared outputs; a missing or unreadable file is `None`.
pub fn collect_outputs(fs: &dyn FileSystem, dir: &Path, names: &[String]) -> Vec<Option<String>> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            if !fs.is_file(&path) {
                debug!(path = ?path, "output file missing");
                return None;
            }
            match fs.read_to_string(&path) {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(path = ?path, error = %e, "could not read output file");
                    None
                }
            }
        })
        .collect()
}

/// Run the staged script with `sh`, cwd = `dir`, until it exits or the
/// timeout elapses.
pub async fn run_script(dir: &Path, timeout: Option<Duration>) -> Result<ScriptExit> {
    let mut cmd = Command::new("sh");
    cmd.arg(SCRIPT_NAME)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning execution script in {:?}", dir))?;

    // Always drain both pipes so a chatty program cannot block on a full buffer.
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!("stdout: {}", line);
            }
        });
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!("stderr: {}", line);
            }
        });
    }

    let deadline = async {
        match timeout {
            Some(d) => tokio::time::sleep(d).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        status_res = child.wait() => {
            let status = status_res
                .with_context(|| format!("waiting for execution script in {:?}", dir))?;
            let code = status.code().unwrap_or(-1);
            if !status.success() {
                warn!(dir = ?dir, exit_code = code, "execution script exited with failure");
            }
            Ok(ScriptExit::Exited(code))
        }

        _ = deadline => {
            warn!(dir = ?dir, ?timeout, "execution script timed out; killing process");
            if let Err(e) = child.kill().await {
                warn!(dir = ?dir, error = %e, "failed to kill timed-out script");
            }
            Ok(ScriptExit::TimedOut)
        }
    }
}
