use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use qcrun::errors::Result;
use qcrun::exec::workdir::attempt_dir_name;
use qcrun::exec::{ExecOutputs, ExecRequest, ExecutorBackend, ScriptExit};

type Responder = Box<dyn FnMut(&ExecRequest) -> Option<String> + Send>;

/// A fake executor that:
/// - records every request it receives
/// - answers each attempt with canned primary output, without running anything.
pub struct FakeExecutor {
    respond: Responder,
    requests: Arc<Mutex<Vec<ExecRequest>>>,
}

impl FakeExecutor {
    /// Reply with `outputs` in order; the last reply repeats once the list
    /// runs out.
    pub fn scripted<I, S>(outputs: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let mut queue: VecDeque<Option<String>> =
            outputs.into_iter().map(|o| o.map(Into::into)).collect();
        let mut last: Option<String> = None;
        Self::from_fn(move |_req| {
            if let Some(next) = queue.pop_front() {
                last = next;
            }
            last.clone()
        })
    }

    /// Reply with the same output to every attempt.
    pub fn always(output: &str) -> Self {
        let output = output.to_string();
        Self::from_fn(move |_req| Some(output.clone()))
    }

    /// Compute the reply from the request (e.g. from the rendered input).
    pub fn from_fn(f: impl FnMut(&ExecRequest) -> Option<String> + Send + 'static) -> Self {
        Self {
            respond: Box::new(f),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle on the recorded requests.
    pub fn requests(&self) -> Arc<Mutex<Vec<ExecRequest>>> {
        Arc::clone(&self.requests)
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Rendered input of every attempt, in order.
    pub fn inputs(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.input_text.clone())
            .collect()
    }
}

impl ExecutorBackend for FakeExecutor {
    fn execute(
        &mut self,
        request: ExecRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ExecOutputs>> + Send + '_>> {
        let primary = (self.respond)(&request);
        self.requests.lock().unwrap().push(request.clone());

        Box::pin(async move {
            let mut outputs = vec![primary];
            outputs.resize(request.output_names.len().max(1), None);

            Ok(ExecOutputs {
                work_dir: Some(request.run_root.join(attempt_dir_name(request.attempt))),
                outputs,
                exit: ScriptExit::NotRun,
            })
        })
    }
}
