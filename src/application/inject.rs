//! HTML injection
//!
//! Rewrites the template with references to whatever outputs are present in
//! the build root: vendor family first, then app, each sorted by path.

use std::path::PathBuf;

use crate::application::context::BuildContext;
use crate::domain::ports::FileSystem;
use crate::domain::services::inject;
use crate::domain::value_objects::{to_slash, AssetCategory};
use crate::error::{PipeError, PipeResult};

/// Result of rewriting the HTML shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectResult {
    /// Written document, relative to the build root
    pub html: PathBuf,
    /// Referenced outputs in injection order
    pub assets: Vec<String>,
}

pub struct InjectUseCase<'a, FS: FileSystem> {
    ctx: &'a BuildContext<FS>,
}

impl<'a, FS: FileSystem> InjectUseCase<'a, FS> {
    pub fn new(ctx: &'a BuildContext<FS>) -> Self {
        Self { ctx }
    }

    pub fn execute(&self) -> PipeResult<InjectResult> {
        let paths = self.ctx.paths();
        let template_path = &paths.html_template;
        let file_name = match template_path.file_name() {
            Some(name) if self.ctx.fs().is_file(template_path) => PathBuf::from(name),
            _ => {
                return Err(PipeError::MissingSource {
                    path: template_path.clone(),
                })
            }
        };
        let template = self.ctx.fs().read_to_string(template_path)?;

        let mut assets = Vec::new();
        for category in AssetCategory::INJECTION_ORDER {
            assets.extend(
                self.ctx
                    .list_outputs(category)?
                    .iter()
                    .map(|rel| to_slash(rel)),
            );
        }

        let injection = inject(&template, &assets);
        for kind in &injection.missing_markers {
            tracing::warn!(
                template = %template_path.display(),
                marker = %kind.extension(),
                "template has no inject:{} region; references not written",
                kind.extension()
            );
        }

        self.ctx
            .fs()
            .write(&paths.build_dir.join(&file_name), injection.html.as_bytes())?;

        Ok(InjectResult {
            html: file_name,
            assets,
        })
    }
}
