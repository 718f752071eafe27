//! Ordered tasks with all-or-nothing semantics.
//!
//! [`Pipeline::run`] executes tasks strictly in declaration order. When one
//! fails, every task that ran is undone in reverse order of execution,
//! starting with the one that failed, so each compensation sees the state
//! its own `run` left behind.

use std::fmt;

use tracing::{info, instrument, warn};

use crate::error::{ExtkitError, ExtkitResult};

/// An atomic unit of work with a compensating action.
///
/// `undo` must be safe to call after a partial or absent `run`, and must
/// only compensate what `run` actually did.
pub trait Task<C> {
    /// Stable name used in logs and failure reports.
    fn name(&self) -> &'static str;

    fn run(&mut self, ctx: &mut C) -> ExtkitResult<()>;

    fn undo(&mut self, ctx: &mut C) -> ExtkitResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Succeeded,
    Failed,
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        })
    }
}

struct Step<'a, C> {
    task: Box<dyn Task<C> + 'a>,
    state: TaskState,
}

/// Tasks plus their per-run state. Build one per invocation.
pub struct Pipeline<'a, C> {
    steps: Vec<Step<'a, C>>,
}

impl<C> Default for Pipeline<'_, C> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<'a, C> Pipeline<'a, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task.
    pub fn with_task(mut self, task: impl Task<C> + 'a) -> Self {
        self.steps.push(Step {
            task: Box::new(task),
            state: TaskState::Pending,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Task names with their current state, in declaration order.
    pub fn states(&self) -> Vec<(&'static str, TaskState)> {
        self.steps
            .iter()
            .map(|s| (s.task.name(), s.state))
            .collect()
    }

    /// Run every task in order.
    ///
    /// # Errors
    ///
    /// `ExtkitError::StepFailed` naming the first failing task. Its `cause`
    /// is the task's error; failures of compensating actions are attached
    /// as `rollback_errors`.
    #[instrument(skip_all, fields(tasks = self.steps.len()))]
    pub fn run(&mut self, ctx: &mut C) -> ExtkitResult<()> {
        for index in 0..self.steps.len() {
            let step = &mut self.steps[index];
            let name = step.task.name();
            info!(step = name, "Running step");

            if let Err(cause) = step.task.run(ctx) {
                step.state = TaskState::Failed;
                warn!(step = name, error = %cause, "Step failed, rolling back");

                let rollback_errors = self.rollback(ctx);
                if rollback_errors.is_empty() {
                    info!("Rollback complete");
                } else {
                    warn!(count = rollback_errors.len(), "Rollback incomplete");
                }

                return Err(ExtkitError::StepFailed {
                    step: name,
                    cause: Box::new(cause),
                    rollback_errors,
                });
            }

            step.state = TaskState::Succeeded;
        }

        Ok(())
    }

    fn rollback(&mut self, ctx: &mut C) -> Vec<ExtkitError> {
        let mut errors = Vec::new();

        for step in self.steps.iter_mut().rev() {
            if step.state == TaskState::Pending {
                continue;
            }
            let name = step.task.name();
            info!(step = name, "Undoing step");
            if let Err(e) = step.task.undo(ctx) {
                warn!(step = name, error = %e, "Undo failed");
                errors.push(e);
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use std::path::PathBuf;

    /// Test task that logs its calls into the shared context.
    struct Scripted {
        name: &'static str,
        fail_run: bool,
        fail_undo: bool,
    }

    impl Scripted {
        fn ok(name: &'static str) -> Self {
            Self {
                name,
                fail_run: false,
                fail_undo: false,
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                fail_run: true,
                ..Self::ok(name)
            }
        }

        fn bad_undo(name: &'static str) -> Self {
            Self {
                fail_undo: true,
                ..Self::ok(name)
            }
        }
    }

    fn io_error(name: &str) -> ExtkitError {
        ApplicationError::FilesystemError {
            path: PathBuf::from(name),
            reason: "boom".into(),
        }
        .into()
    }

    impl Task<Vec<String>> for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }

        fn run(&mut self, log: &mut Vec<String>) -> ExtkitResult<()> {
            log.push(format!("run {}", self.name));
            if self.fail_run {
                Err(io_error(self.name))
            } else {
                Ok(())
            }
        }

        fn undo(&mut self, log: &mut Vec<String>) -> ExtkitResult<()> {
            log.push(format!("undo {}", self.name));
            if self.fail_undo {
                Err(io_error(self.name))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn runs_all_tasks_in_order() {
        let mut pipeline = Pipeline::new()
            .with_task(Scripted::ok("a"))
            .with_task(Scripted::ok("b"))
            .with_task(Scripted::ok("c"));
        let mut log = Vec::new();

        pipeline.run(&mut log).unwrap();

        assert_eq!(log, ["run a", "run b", "run c"]);
        assert!(
            pipeline
                .states()
                .iter()
                .all(|(_, s)| *s == TaskState::Succeeded)
        );
    }

    #[test]
    fn failure_undoes_failed_task_then_earlier_ones_in_reverse() {
        let mut pipeline = Pipeline::new()
            .with_task(Scripted::ok("a"))
            .with_task(Scripted::ok("b"))
            .with_task(Scripted::failing("c"))
            .with_task(Scripted::ok("d"));
        let mut log = Vec::new();

        let err = pipeline.run(&mut log).unwrap_err();

        assert_eq!(
            log,
            ["run a", "run b", "run c", "undo c", "undo b", "undo a"]
        );
        assert_eq!(err.failed_step(), Some("c"));
        assert_eq!(
            pipeline.states(),
            vec![
                ("a", TaskState::Succeeded),
                ("b", TaskState::Succeeded),
                ("c", TaskState::Failed),
                ("d", TaskState::Pending),
            ]
        );
    }

    #[test]
    fn undo_failures_are_collected_and_do_not_replace_cause() {
        let mut pipeline = Pipeline::new()
            .with_task(Scripted::bad_undo("a"))
            .with_task(Scripted::failing("b"));
        let mut log = Vec::new();

        let err = pipeline.run(&mut log).unwrap_err();

        assert_eq!(log, ["run a", "run b", "undo b", "undo a"]);
        match err {
            ExtkitError::StepFailed {
                step,
                cause,
                rollback_errors,
            } => {
                assert_eq!(step, "b");
                assert!(cause.to_string().contains('b'));
                assert_eq!(rollback_errors.len(), 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn first_task_failure_undoes_only_itself() {
        let mut pipeline = Pipeline::new()
            .with_task(Scripted::failing("a"))
            .with_task(Scripted::ok("b"));
        let mut log = Vec::new();

        assert!(pipeline.run(&mut log).is_err());
        assert_eq!(log, ["run a", "undo a"]);
    }

    #[test]
    fn empty_pipeline_succeeds() {
        let mut pipeline: Pipeline<'_, Vec<String>> = Pipeline::new();
        assert!(pipeline.is_empty());
        pipeline.run(&mut Vec::new()).unwrap();
    }
}
