use super::{ConfigMap, TemplateKind};

/// A template shipped with the tool and written by `deploy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultTemplate {
    pub kind: TemplateKind,
    pub name: String,
    pub content: String,
}

/// Read-only set of built-in templates plus the generated default config.
///
/// Built once at startup by the adapters crate and handed to the
/// `ConfigStore`; nothing here is global.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultTemplates {
    templates: Vec<DefaultTemplate>,
    config: ConfigMap,
}

impl DefaultTemplates {
    pub fn new(config: ConfigMap) -> Self {
        Self {
            templates: Vec::new(),
            config,
        }
    }

    pub fn with_template(
        mut self,
        kind: TemplateKind,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.templates.push(DefaultTemplate {
            kind,
            name: name.into(),
            content: content.into(),
        });
        self
    }

    pub fn templates(&self) -> &[DefaultTemplate] {
        &self.templates
    }

    pub fn of_kind(&self, kind: TemplateKind) -> impl Iterator<Item = &DefaultTemplate> {
        self.templates.iter().filter(move |t| t.kind == kind)
    }

    pub fn config(&self) -> &ConfigMap {
        &self.config
    }
}
