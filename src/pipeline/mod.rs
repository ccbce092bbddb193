//! Declarative pipeline core: action records, workspace, interpreter,
//! and the collaborator seams the interpreter consumes.

pub mod action;
pub mod collaborators;
pub mod interpreter;
pub mod workspace;

pub use action::ActionRecord;
pub use collaborators::{DebugSink, FileSource, JsonFileSink, LocalFileSource, NullSink};
pub use interpreter::{Interpreter, RunOutcome, StepError, StepReport, StepStatus};
pub use workspace::{value_to_text, Workspace};
