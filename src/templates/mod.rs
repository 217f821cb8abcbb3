//! Task templates keyed by a stable, locale-independent id.
//!
//! The registry is an immutable table built once at startup. Display names
//! are only ever resolved within their own locale.

mod storage;

use std::collections::HashMap;

use serde::Serialize;

use crate::error::AssistError;
use crate::locale::Locale;

pub const VENDOR_PLACEHOLDER: &str = "{vendor}";
pub const INPUT_PLACEHOLDER: &str = "{user_input}";

/// How the front end should present the generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Markdown,
    Yaml,
}

/// One selectable task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTemplate {
    pub id: String,
    pub display_names: Vec<(Locale, String)>,
    pub template: String,
    pub format: OutputFormat,
}

impl TaskTemplate {
    pub fn display_name(&self, locale: Locale) -> Option<&str> {
        self.display_names
            .iter()
            .find(|(l, _)| *l == locale)
            .map(|(_, name)| name.as_str())
    }
}

/// Immutable task table with per-locale reverse indexes.
#[derive(Debug)]
pub struct TemplateRegistry {
    templates: Vec<TaskTemplate>,
    by_id: HashMap<String, usize>,
    by_display: HashMap<(Locale, String), usize>,
}

impl TemplateRegistry {
    /// Build a registry, rejecting tables that would break the id/display
    /// name bijection or contain a template without both placeholders.
    pub fn new(templates: Vec<TaskTemplate>) -> Result<Self, AssistError> {
        let mut by_id = HashMap::new();
        let mut by_display = HashMap::new();

        for (idx, task) in templates.iter().enumerate() {
            if by_id.insert(task.id.clone(), idx).is_some() {
                return Err(AssistError::invalid_parameter(
                    "templates",
                    format!("duplicate task id '{}'", task.id),
                ));
            }
            for placeholder in [VENDOR_PLACEHOLDER, INPUT_PLACEHOLDER] {
                if !task.template.contains(placeholder) {
                    return Err(AssistError::MissingPlaceholder {
                        task: task.id.clone(),
                        placeholder,
                    });
                }
            }
            for locale in Locale::ALL {
                let name = task.display_name(locale).ok_or_else(|| {
                    AssistError::invalid_parameter(
                        "templates",
                        format!("task '{}' has no {} display name", task.id, locale),
                    )
                })?;
                if by_display.insert((locale, name.to_string()), idx).is_some() {
                    return Err(AssistError::invalid_parameter(
                        "templates",
                        format!("display name '{name}' is used twice in {locale}"),
                    ));
                }
            }
        }

        Ok(Self {
            templates,
            by_id,
            by_display,
        })
    }

    /// The built-in storage engineering tasks, validated like any other table.
    pub fn builtin() -> Result<Self, AssistError> {
        let templates = storage::BUILTIN
            .iter()
            .map(|(id, en, de, format, template)| TaskTemplate {
                id: id.to_string(),
                display_names: vec![
                    (Locale::English, en.to_string()),
                    (Locale::German, de.to_string()),
                ],
                template: template.to_string(),
                format: *format,
            })
            .collect();
        Self::new(templates)
    }

    pub fn lookup(&self, task_id: &str) -> Result<&TaskTemplate, AssistError> {
        self.by_id
            .get(task_id)
            .map(|&idx| &self.templates[idx])
            .ok_or_else(|| AssistError::unknown_task(task_id))
    }

    pub fn display_name(&self, task_id: &str, locale: Locale) -> Result<&str, AssistError> {
        self.lookup(task_id)?
            .display_name(locale)
            .ok_or_else(|| AssistError::unknown_task(task_id))
    }

    pub fn resolve_task_id(&self, display_name: &str, locale: Locale) -> Result<&str, AssistError> {
        self.by_display
            .get(&(locale, display_name.to_string()))
            .map(|&idx| self.templates[idx].id.as_str())
            .ok_or_else(|| AssistError::unknown_task(display_name))
    }

    /// Accept either a task id or a display name in `locale`.
    pub fn find(&self, id_or_name: &str, locale: Locale) -> Result<&TaskTemplate, AssistError> {
        let key = id_or_name.trim();
        match self.lookup(key) {
            Ok(task) => Ok(task),
            Err(_) => {
                let id = self.resolve_task_id(key, locale)?;
                self.lookup(id)
            }
        }
    }

    /// Tasks in registration order.
    pub fn tasks(&self) -> impl Iterator<Item = &TaskTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
