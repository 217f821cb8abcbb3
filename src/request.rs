//! Input validation and prompt construction.

use serde::Serialize;
use tracing::debug;

use crate::error::{AssistError, InvalidInput};
use crate::locale::{Locale, Vendor};
use crate::templates::{INPUT_PLACEHOLDER, TaskTemplate, VENDOR_PLACEHOLDER};

pub const DEFAULT_TEMPERATURE: f32 = 0.25;
pub const DEFAULT_TOP_P: f32 = 0.90;

const SYSTEM_INSTRUCTION: &str = "You are a Senior Storage Engineer & Architect with 20+ years of experience in large-scale, highly regulated banking environments (European global systemically important bank - G-SIB).
You have deep expertise in NetApp ONTAP, Pure Storage FlashArray//X, Dell EMC PowerMax and storage-related automation (Ansible).

Your responses must be:
- Precise, professional and audit-ready
- Always consider banking regulatory requirements (DORA, BaFin, ECB, MaRisk, GDPR, 4-eyes principle, strict change management, traceability)
- Use formal technical language suitable for L3 engineers, architects and auditors
- Provide step-by-step clarity when giving procedures
- Include risk considerations, rollback options and validation steps where appropriate
- Always respond in {response_language}
";

/// Reject blank or over-long input. Length is counted in characters.
pub fn validate(raw_text: &str, max_length: usize) -> Result<(), InvalidInput> {
    if raw_text.trim().is_empty() {
        return Err(InvalidInput::Empty);
    }
    let actual = raw_text.chars().count();
    if actual > max_length {
        return Err(InvalidInput::TooLong {
            max: max_length,
            actual,
        });
    }
    Ok(())
}

/// Fill `{vendor}` and `{user_input}` into the task template.
///
/// Substitution is a single left-to-right pass, so placeholder-looking text
/// inside the user's input is copied verbatim.
pub fn compose(task: &TaskTemplate, vendor: &str, user_text: &str) -> Result<String, AssistError> {
    for placeholder in [VENDOR_PLACEHOLDER, INPUT_PLACEHOLDER] {
        if !task.template.contains(placeholder) {
            return Err(AssistError::MissingPlaceholder {
                task: task.id.clone(),
                placeholder,
            });
        }
    }

    let template = task.template.as_str();
    let mut out = String::with_capacity(template.len() + vendor.len() + user_text.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix(VENDOR_PLACEHOLDER) {
            out.push_str(vendor);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(INPUT_PLACEHOLDER) {
            out.push_str(user_text);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);

    debug!(task = %task.id, %vendor, chars = out.chars().count(), "composed prompt");
    Ok(out)
}

/// System instruction for the given language name. Anything other than a
/// supported language falls back to English.
pub fn compose_system_instruction(response_language: &str) -> String {
    system_instruction(Locale::resolve(response_language))
}

pub fn system_instruction(locale: Locale) -> String {
    SYSTEM_INSTRUCTION.replace("{response_language}", locale.response_language())
}

/// Localized "Characters: n/max" caption.
pub fn char_counter(text: &str, max: usize, locale: Locale) -> String {
    let count = text.chars().count();
    match locale {
        Locale::English => format!("Characters: {count}/{max}"),
        Locale::German => format!("Zeichen: {count}/{max}"),
    }
}

/// Sampling parameters sent with every completion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

impl GenerationParams {
    pub fn new(temperature: f32, top_p: f32, max_tokens: u32) -> Result<Self, AssistError> {
        if !(0.0..=1.0).contains(&temperature) {
            return Err(AssistError::invalid_parameter(
                "temperature",
                format!("{temperature} is outside [0, 1]"),
            ));
        }
        if !(0.0..=1.0).contains(&top_p) {
            return Err(AssistError::invalid_parameter(
                "top_p",
                format!("{top_p} is outside [0, 1]"),
            ));
        }
        if max_tokens == 0 {
            return Err(AssistError::invalid_parameter(
                "max_tokens",
                "must be a positive integer",
            ));
        }
        Ok(Self {
            temperature,
            top_p,
            max_tokens,
        })
    }
}

/// A fully validated submission, ready for the completion client.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub vendor: Vendor,
    pub task_id: String,
    pub user_text: String,
    pub locale: Locale,
    pub params: GenerationParams,
    pub system_instruction: String,
    pub prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::templates::{OutputFormat, TemplateRegistry};

    fn acme_task(template: &str) -> TaskTemplate {
        TaskTemplate {
            id: "t".to_string(),
            display_names: vec![],
            template: template.to_string(),
            format: OutputFormat::Markdown,
        }
    }

    #[test]
    fn validate_empty_and_whitespace() {
        assert_eq!(validate("", 10), Err(InvalidInput::Empty));
        assert_eq!(validate("   ", 10), Err(InvalidInput::Empty));
        assert_eq!(validate("\n\t ", 10), Err(InvalidInput::Empty));
    }

    #[test]
    fn validate_length_boundary() {
        assert_eq!(validate("a", 1), Ok(()));
        assert_eq!(validate(&"x".repeat(5000), 5000), Ok(()));
        assert_eq!(
            validate(&"x".repeat(5001), 5000),
            Err(InvalidInput::TooLong {
                max: 5000,
                actual: 5001
            })
        );
    }

    #[test]
    fn validate_counts_characters_not_bytes() {
        // 4 characters, 8 bytes
        assert_eq!(validate("äöüß", 4), Ok(()));
    }

    #[test]
    fn compose_fills_both_placeholders() {
        let task = acme_task("Fix {vendor} now.\nDetails:\n{user_input}\n");
        let out = compose(&task, "Acme", "disk full").unwrap();
        assert_eq!(out, "Fix Acme now.\nDetails:\ndisk full\n");
        assert!(!out.contains(VENDOR_PLACEHOLDER));
        assert!(!out.contains(INPUT_PLACEHOLDER));
    }

    #[test]
    fn compose_keeps_user_braces_verbatim() {
        let task = acme_task("{vendor}: {user_input}");
        let out = compose(&task, Vendor::NetAppOntap.name(), "json {\"a\": 1} and {vendor}").unwrap();
        assert_eq!(out, "NetApp ONTAP: json {\"a\": 1} and {vendor}");
    }

    #[test]
    fn compose_leaves_other_braces_alone() {
        let task = acme_task("{x} {vendor} {user_input} {");
        let out = compose(&task, Vendor::DellEmcPowerMax.name(), "y").unwrap();
        assert_eq!(out, "{x} Dell EMC PowerMax y {");
    }

    #[test]
    fn compose_rejects_malformed_template() {
        let err = compose(&acme_task("only {user_input}"), "Acme", "x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingPlaceholder);
        assert!(err.to_string().contains("{vendor}"));
    }

    #[test]
    fn compose_every_builtin_task() {
        let registry = TemplateRegistry::builtin().unwrap();
        for task in registry.tasks() {
            let out = compose(task, Vendor::NetAppOntap.name(), "aggr0 is 98% full").unwrap();
            assert!(out.contains("NetApp ONTAP"), "{}", task.id);
            assert!(out.contains("aggr0 is 98% full"), "{}", task.id);
        }
    }

    #[test]
    fn system_instruction_language() {
        assert!(compose_system_instruction("German").ends_with("Always respond in German\n"));
        assert!(compose_system_instruction("english").ends_with("Always respond in English\n"));
        assert!(compose_system_instruction("French").ends_with("Always respond in English\n"));
        assert!(!system_instruction(Locale::German).contains("{response_language}"));
    }

    #[test]
    fn char_counter_localized() {
        assert_eq!(char_counter("abc", 5000, Locale::English), "Characters: 3/5000");
        assert_eq!(char_counter("", 10, Locale::German), "Zeichen: 0/10");
    }

    #[test]
    fn params_bounds() {
        assert!(GenerationParams::new(0.0, 1.0, 1).is_ok());
        assert!(GenerationParams::new(1.0, 0.0, 1500).is_ok());
        assert_eq!(
            GenerationParams::new(1.1, 0.9, 10).unwrap_err().kind(),
            ErrorKind::InvalidParameter
        );
        assert!(GenerationParams::new(0.5, -0.1, 10).is_err());
        assert!(GenerationParams::new(f32::NAN, 0.9, 10).is_err());
        assert!(GenerationParams::new(0.5, 0.9, 0).is_err());
    }
}
