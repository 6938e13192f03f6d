//! Tera-backed renderer.
//!
//! The template context is the serialized [`Project`]: `project_name`,
//! `workspace`, `project_root`, `workspace_config` and `project_config`.

use std::error::Error as _;

use plinth_core::{
    application::ports::TemplateRenderer,
    domain::{DomainError, Project},
    error::{PlinthError, PlinthResult},
};
use tera::{Context, Tera};
use tracing::instrument;

/// Renders one raw template at a time with a fresh engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeraRenderer;

impl TeraRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for TeraRenderer {
    #[instrument(skip(self, source, project), fields(bytes = source.len()))]
    fn render(&self, name: &str, source: &str, project: &Project) -> PlinthResult<String> {
        let context = Context::from_serialize(project).map_err(|e| PlinthError::Internal {
            message: format!("building template context: {e}"),
        })?;

        let mut tera = Tera::default();
        // Tera escapes `.html`/`.htm`/`.xml` names by default; output here is
        // paths and plain files, never markup.
        tera.autoescape_on(vec![]);
        tera.add_raw_template(name, source)
            .and_then(|()| tera.render(name, &context))
            .map_err(|e| {
                DomainError::MalformedTemplate {
                    name: name.to_string(),
                    reason: describe(&e),
                }
                .into()
            })
    }
}

/// Tera wraps the useful message ("Variable `x` not found") a few levels
/// deep; flatten the chain into one line.
fn describe(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
