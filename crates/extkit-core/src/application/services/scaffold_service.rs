//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the scaffolding workflow:
//! 1. Check the request's type against the template store
//! 2. Build the project descriptor
//! 3. Run the four scaffolding tasks as one all-or-nothing pipeline
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::{
    application::{
        FormatterRegistry,
        layout::{self, MANIFEST_DIR, SHARED_DIR, SOURCE_DIR, TYPES_DIR},
        pipeline::Pipeline,
        ports::{EntryKind, Filesystem, TemplateRenderer, TemplateStore},
        tasks::{
            CreateRoot, EmitSourceFiles, MergeManifests, RenderGenericTemplates, ScaffoldContext,
        },
    },
    domain::{DomainError, MAIN_ENTRY, ManifestKind, ProjectDescriptor, ScaffoldRequest},
    error::ExtkitResult,
};

/// What a scaffold would do to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedAction {
    Create,
    Overwrite,
    Merge,
}

impl PlannedAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Overwrite => "overwrite",
            Self::Merge => "merge",
        }
    }
}

impl fmt::Display for PlannedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub action: PlannedAction,
}

/// Result of a dry run: the descriptor that would be used and every file
/// that would be touched, in task order.
#[derive(Debug, Clone)]
pub struct ScaffoldPlan {
    pub descriptor: ProjectDescriptor,
    pub root_exists: bool,
    pub files: Vec<PlannedFile>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    formatters: FormatterRegistry,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// No formatters are registered; see [`ScaffoldService::with_formatters`].
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
            formatters: FormatterRegistry::new(),
        }
    }

    pub fn with_formatters(mut self, formatters: FormatterRegistry) -> Self {
        self.formatters = formatters;
        self
    }

    /// Extension types present in the store, sorted.
    pub fn available_types(&self) -> Vec<String> {
        self.store.subdirectories(Path::new(TYPES_DIR))
    }

    /// Scaffold a new extension project.
    ///
    /// The request's type is checked against the store before the
    /// filesystem is touched. On failure the filesystem is restored to its
    /// state before the call and the error names the failing step.
    ///
    /// Returns the final descriptor, with `entries["main"]` populated.
    #[instrument(skip_all, fields(request = %request))]
    pub fn scaffold(&self, request: &ScaffoldRequest) -> ExtkitResult<ProjectDescriptor> {
        self.ensure_known_type(request.extension_type())?;

        let descriptor = ProjectDescriptor::from_request(request);
        info!(
            uuid = %descriptor.uuid(),
            flavor = %descriptor.flavor(),
            "Scaffolding {} extension",
            descriptor.extension_type()
        );

        let mut ctx = ScaffoldContext {
            descriptor,
            fs: self.filesystem.as_ref(),
            store: self.store.as_ref(),
            renderer: self.renderer.as_ref(),
            formatters: &self.formatters,
        };

        let mut pipeline = Pipeline::new()
            .with_task(CreateRoot::new())
            .with_task(EmitSourceFiles::new())
            .with_task(RenderGenericTemplates::new())
            .with_task(MergeManifests::new());
        pipeline.run(&mut ctx)?;

        info!("Scaffold completed successfully");
        Ok(ctx.descriptor)
    }

    /// Work out what [`ScaffoldService::scaffold`] would do without writing.
    #[instrument(skip_all, fields(request = %request))]
    pub fn preview(&self, request: &ScaffoldRequest) -> ExtkitResult<ScaffoldPlan> {
        self.ensure_known_type(request.extension_type())?;

        let mut descriptor = ProjectDescriptor::from_request(request);
        let root = descriptor.root_dir().to_path_buf();
        let src_dir = root.join(SOURCE_DIR);
        let extension_type = descriptor.extension_type().to_string();
        let fs = self.filesystem.as_ref();
        let mut files = Vec::new();

        let write_action = |path: &Path| {
            if fs.exists(path) {
                PlannedAction::Overwrite
            } else {
                PlannedAction::Create
            }
        };

        let entry = format!("{SOURCE_DIR}/{}", descriptor.flavor().entry_filename());
        let entry_path = root.join(&entry);
        files.push(PlannedFile {
            action: write_action(&entry_path),
            path: entry_path,
        });
        descriptor.set_entry(MAIN_ENTRY, entry);

        self.store.walk(
            &layout::type_subdir(&extension_type, SOURCE_DIR),
            &src_dir,
            true,
            &mut |e| {
                if e.kind == EntryKind::File {
                    files.push(PlannedFile {
                        action: write_action(&e.target),
                        path: e.target,
                    });
                }
                Ok(())
            },
        )?;

        self.store
            .walk(Path::new(SHARED_DIR), &root, false, &mut |e| {
                let stripped = e
                    .target
                    .file_name()
                    .and_then(|n| n.to_str())
                    .and_then(layout::strip_template_suffix);
                if let (EntryKind::File, Some(name)) = (e.kind, stripped) {
                    let path = e.target.with_file_name(name);
                    files.push(PlannedFile {
                        action: write_action(&path),
                        path,
                    });
                }
                Ok(())
            })?;

        self.store.walk(
            &layout::type_subdir(&extension_type, MANIFEST_DIR),
            &root,
            true,
            &mut |e| {
                if e.kind == EntryKind::File && ManifestKind::from_path(&e.source).is_some() {
                    let action = if fs.exists(&e.target) {
                        PlannedAction::Merge
                    } else {
                        PlannedAction::Create
                    };
                    files.push(PlannedFile {
                        path: e.target,
                        action,
                    });
                }
                Ok(())
            },
        )?;

        Ok(ScaffoldPlan {
            root_exists: fs.exists(&root),
            descriptor,
            files,
        })
    }

    fn ensure_known_type(&self, extension_type: &str) -> ExtkitResult<()> {
        if self.store.contains(&layout::type_dir(extension_type)) {
            return Ok(());
        }
        Err(DomainError::UnknownExtensionType {
            value: extension_type.to_string(),
            available: self.available_types(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ports::MockFilesystem,
        testing::{EchoRenderer, FakeStore},
    };
    use crate::error::{ErrorKind, ExtkitError};

    fn store() -> FakeStore {
        FakeStore::default()
            .with_file("types/checkout-ui/main/react.js", "react body")
            .with_file("types/checkout-ui/main/javascript.js", "js body")
            .with_file("types/checkout-ui/manifest/package.json", "{}")
            .with_file("types/checkout-ui/manifest/notes.txt", "ignored")
            .with_file("shared/README.md.tpl", "readme")
            .with_file("shared/plain.txt", "ignored")
            .with_dir("types/product-subscription")
    }

    fn request(extension_type: &str) -> ScaffoldRequest {
        ScaffoldRequest::builder()
            .extension_type(extension_type)
            .renderer_name("react")
            .template_id("typescript-react")
            .root_dir("/work/ext1")
            .build()
            .unwrap()
    }

    fn service(fs: MockFilesystem) -> ScaffoldService {
        ScaffoldService::new(Box::new(store()), Box::new(EchoRenderer), Box::new(fs))
    }

    #[test]
    fn unknown_type_fails_before_touching_filesystem() {
        // No expectations: any filesystem call panics.
        let service = service(MockFilesystem::new());

        let err = service.scaffold(&request("post-purchase")).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        match err {
            ExtkitError::Domain(DomainError::UnknownExtensionType { value, available }) => {
                assert_eq!(value, "post-purchase");
                assert_eq!(available, vec!["checkout-ui", "product-subscription"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn failing_first_step_reports_create_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|p| p == Path::new("/work"));
        fs.expect_create_dir().returning(|p| {
            Err(crate::application::ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "read-only".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all().times(1).returning(|_| Ok(()));

        let err = service(fs).scaffold(&request("checkout-ui")).unwrap_err();

        assert_eq!(err.failed_step(), Some("create-root"));
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.rollback_errors().is_empty());
    }

    #[test]
    fn preview_lists_actions_without_writing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|p| p == Path::new("/work/ext1") || p.ends_with("package.json"));

        let plan = service(fs).preview(&request("checkout-ui")).unwrap();

        assert!(plan.root_exists);
        assert_eq!(plan.descriptor.entry(MAIN_ENTRY), Some("src/index.tsx"));
        let actions: Vec<_> = plan
            .files
            .iter()
            .map(|f| (f.path.to_string_lossy().into_owned(), f.action))
            .collect();
        assert_eq!(
            actions,
            vec![
                ("/work/ext1/src/index.tsx".to_string(), PlannedAction::Create),
                ("/work/ext1/README.md".to_string(), PlannedAction::Create),
                ("/work/ext1/package.json".to_string(), PlannedAction::Merge),
            ]
        );
    }
}
