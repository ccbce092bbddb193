//! Pipeline interpreter
//!
//! Strictly sequential dispatch over a sequence of action records against
//! one per-invocation workspace. Step failures are reported and skipped;
//! the loop always proceeds to the next step, so later independent steps
//! still run. A `process` step recursively runs its nested sequence
//! against a fresh workspace; an `output` step returns from the current
//! invocation immediately, leaving any textually following siblings
//! unreached.

use crate::llm::{CompletionRequest, LlmClient, LlmError};
use crate::pipeline::action::ActionRecord;
use crate::pipeline::collaborators::{DebugSink, FileSource};
use crate::pipeline::workspace::Workspace;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Reasons a single step gets reported and skipped.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("file read failed for `{path}`: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("llm call failed: {0}")]
    Llm(#[from] LlmError),
    #[error("prompt step needs `input_path` or `input_array`")]
    EmptyPrompt,
}

/// Outcome of one executed step.
#[derive(Debug)]
pub enum StepStatus {
    Completed,
    Skipped(StepError),
    /// Unrecognized action kind, silently no-oped.
    Ignored,
}

/// One entry in the per-run diagnostic list.
#[derive(Debug)]
pub struct StepReport {
    pub index: usize,
    pub kind: &'static str,
    pub status: StepStatus,
}

impl StepReport {
    pub fn is_skipped(&self) -> bool {
        matches!(self.status, StepStatus::Skipped(_))
    }
}

/// Result of one pipeline invocation: the optional `output` string plus
/// a status per executed step. Steps after an early `output` return do
/// not appear, since they never executed.
#[derive(Debug)]
pub struct RunOutcome {
    pub output: Option<String>,
    pub steps: Vec<StepReport>,
}

impl RunOutcome {
    pub fn skipped_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_skipped()).count()
    }
}

/// The pipeline interpreter, holding its collaborator seams.
pub struct Interpreter {
    files: Arc<dyn FileSource>,
    llm: Arc<dyn LlmClient>,
    sink: Arc<dyn DebugSink>,
}

impl Interpreter {
    pub fn new(
        files: Arc<dyn FileSource>,
        llm: Arc<dyn LlmClient>,
        sink: Arc<dyn DebugSink>,
    ) -> Self {
        Self { files, llm, sink }
    }

    /// Run one pipeline invocation against the given workspace.
    ///
    /// Never fails: step-level problems are reported in the returned
    /// diagnostic list and the sequence continues past them.
    pub async fn run(&self, steps: &[ActionRecord], workspace: &mut Workspace) -> RunOutcome {
        info!(step_count = steps.len(), "pipeline invocation starting");
        self.run_scope(steps, workspace).await
    }

    // Boxed because `process` steps recurse through this future.
    fn run_scope<'a>(
        &'a self,
        steps: &'a [ActionRecord],
        workspace: &'a mut Workspace,
    ) -> Pin<Box<dyn Future<Output = RunOutcome> + Send + 'a>> {
        Box::pin(async move {
            let mut reports = Vec::with_capacity(steps.len());

            for (index, step) in steps.iter().enumerate() {
                let kind = step.kind();
                debug!(index, kind, "executing step");

                // `output` ends the invocation: assemble, snapshot, return.
                if let ActionRecord::Output {
                    input_path,
                    output_array,
                } = step
                {
                    let assembled =
                        assemble_output(workspace, input_path.as_deref(), output_array.as_deref());
                    reports.push(StepReport {
                        index,
                        kind,
                        status: StepStatus::Completed,
                    });
                    self.write_snapshot(workspace).await;
                    return RunOutcome {
                        output: Some(assembled),
                        steps: reports,
                    };
                }

                let status = if matches!(step, ActionRecord::Unknown) {
                    StepStatus::Ignored
                } else {
                    match self.execute(step, workspace).await {
                        Ok(()) => StepStatus::Completed,
                        Err(error) => {
                            warn!(index, kind, %error, "step skipped");
                            StepStatus::Skipped(error)
                        }
                    }
                };

                reports.push(StepReport {
                    index,
                    kind,
                    status,
                });
                self.write_snapshot(workspace).await;
            }

            RunOutcome {
                output: None,
                steps: reports,
            }
        })
    }

    /// Execute one non-output step, mutating the workspace on success.
    async fn execute(
        &self,
        step: &ActionRecord,
        workspace: &mut Workspace,
    ) -> Result<(), StepError> {
        match step {
            ActionRecord::DefineConstant { output_path, value } => {
                let output_path = require(output_path, "output_path")?;
                workspace.set(output_path, value.clone());
                Ok(())
            }

            ActionRecord::FileInput {
                file_path,
                output_path,
            } => {
                let file_path = require(file_path, "file_path")?;
                let output_path = require(output_path, "output_path")?;
                let content =
                    self.files
                        .read(file_path)
                        .await
                        .map_err(|source| StepError::FileRead {
                            path: file_path.to_string(),
                            source,
                        })?;
                workspace.set(output_path, Value::String(content));
                Ok(())
            }

            ActionRecord::LlmPrompt {
                input_path,
                input_array,
                generation_config,
                output_path,
            } => {
                let output_path = require(output_path, "output_path")?;
                if input_path.is_none() && input_array.is_none() {
                    return Err(StepError::EmptyPrompt);
                }

                let mut prompt = input_path
                    .as_deref()
                    .map(|seed| workspace.resolve(seed))
                    .unwrap_or_default();
                if let Some(elements) = input_array {
                    for element in elements {
                        prompt.push(' ');
                        prompt.push_str(&workspace.resolve(element));
                    }
                }

                let request = CompletionRequest::single_turn(prompt, generation_config.clone());
                let text = self.llm.complete(request).await?;

                // Structured responses are kept structured; anything that
                // is not valid JSON is stored as the raw string.
                let value = match serde_json::from_str::<Value>(&text) {
                    Ok(parsed) => parsed,
                    Err(_) => Value::String(text),
                };
                workspace.set(output_path, value);
                Ok(())
            }

            ActionRecord::Process {
                process_steps,
                output_path,
            } => {
                let output_path = require(output_path, "output_path")?;
                let steps = process_steps
                    .as_deref()
                    .ok_or(StepError::MissingField("process_steps"))?;

                // Fresh workspace: nested keys are invisible to the parent
                // except through this explicit return-value assignment.
                let mut nested = Workspace::new();
                let outcome = self.run_scope(steps, &mut nested).await;
                if let Some(value) = outcome.output {
                    workspace.set(output_path, Value::String(value));
                }
                Ok(())
            }

            // Handled in the dispatch loop.
            ActionRecord::Output { .. } | ActionRecord::Unknown => Ok(()),
        }
    }

    async fn write_snapshot(&self, workspace: &Workspace) {
        if let Err(error) = self.sink.record(&workspace.snapshot()).await {
            warn!(%error, "workspace snapshot failed");
        }
    }
}

fn require<'a>(field: &'a Option<String>, name: &'static str) -> Result<&'a str, StepError> {
    field.as_deref().ok_or(StepError::MissingField(name))
}

/// Assemble an `output` step's return string: the resolved `input_path`
/// seed (empty when absent) followed by each resolved `output_array`
/// element, each preceded by a single space.
fn assemble_output(
    workspace: &Workspace,
    input_path: Option<&str>,
    output_array: Option<&[String]>,
) -> String {
    let mut assembled = String::new();
    if let Some(seed) = input_path {
        assembled.push_str(&workspace.resolve(seed));
    }
    if let Some(elements) = output_array {
        for element in elements {
            assembled.push(' ');
            assembled.push_str(&workspace.resolve(element));
        }
    }
    assembled
}
