//! Task bodies for the standard graph

use crate::application::clean::CleanUseCase;
use crate::application::context::BuildContext;
use crate::application::inject::InjectUseCase;
use crate::application::scripts::ScriptsUseCase;
use crate::application::styles::StyleUseCase;
use crate::application::vendor::VendorUseCase;
use crate::domain::ports::FileSystem;
use crate::domain::services::TaskGraph;
use crate::domain::value_objects::{to_slash, AssetCategory, TaskName};
use crate::error::PipeResult;
use crate::infrastructure::fs::BuildLock;

use super::event::{TaskEvent, TaskOutcome};
use super::executor::{BuildReport, Executor, TaskRunner};

/// Maps each task name to its use case
pub struct PipelineRunner<'a, FS: FileSystem> {
    ctx: &'a BuildContext<FS>,
}

impl<'a, FS: FileSystem> PipelineRunner<'a, FS> {
    pub fn new(ctx: &'a BuildContext<FS>) -> Self {
        Self { ctx }
    }

    fn clean(&self, category: AssetCategory) -> PipeResult<TaskOutcome> {
        let result = CleanUseCase::new(self.ctx).execute(category)?;
        Ok(TaskOutcome::Cleaned {
            deleted: result.deleted.iter().map(|p| to_slash(p)).collect(),
        })
    }

    fn inject(&self) -> PipeResult<TaskOutcome> {
        let result = InjectUseCase::new(self.ctx).execute()?;
        Ok(TaskOutcome::Injected {
            html: to_slash(&result.html),
            assets: result.assets,
        })
    }
}

impl<FS: FileSystem> TaskRunner for PipelineRunner<'_, FS> {
    fn run(&self, task: TaskName) -> PipeResult<TaskOutcome> {
        match task {
            TaskName::CleanApp => self.clean(AssetCategory::App),
            TaskName::CleanVendor => self.clean(AssetCategory::Vendor),
            TaskName::Css => {
                let output = StyleUseCase::new(self.ctx).execute()?;
                Ok(TaskOutcome::Wrote {
                    files: vec![output.href()],
                })
            }
            TaskName::Js => {
                let result = ScriptsUseCase::new(self.ctx).execute()?;
                Ok(TaskOutcome::Wrote {
                    files: vec![result.output.href()],
                })
            }
            TaskName::Vendor => {
                let result = VendorUseCase::new(self.ctx).execute()?;
                Ok(TaskOutcome::Wrote {
                    files: vec![result.stylesheet.href(), result.bundle.href()],
                })
            }
            TaskName::Build | TaskName::BuildApp => self.inject(),
            TaskName::Watch => Ok(TaskOutcome::Noop),
        }
    }
}

/// Run `target` on the standard graph while holding the build root lock.
pub fn run_target<FS, F>(
    ctx: &BuildContext<FS>,
    target: TaskName,
    on_event: F,
) -> PipeResult<BuildReport>
where
    FS: FileSystem,
    F: FnMut(&TaskEvent),
{
    let _lock = BuildLock::acquire(&ctx.paths().build_dir)?;
    let graph = TaskGraph::standard();
    let runner = PipelineRunner::new(ctx);
    Executor::new(&graph)
        .execute(target, &runner, on_event)?
        .into_result()
}
