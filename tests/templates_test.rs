use storage_copilot::error::{AssistError, ErrorKind, InvalidInput};
use storage_copilot::locale::Locale;
use storage_copilot::request::{compose, validate};
use storage_copilot::templates::{OutputFormat, TaskTemplate, TemplateRegistry};

fn task(id: &str, en: &str, de: &str, template: &str) -> TaskTemplate {
    TaskTemplate {
        id: id.to_string(),
        display_names: vec![
            (Locale::English, en.to_string()),
            (Locale::German, de.to_string()),
        ],
        template: template.to_string(),
        format: OutputFormat::Markdown,
    }
}

#[test]
fn display_names_round_trip_in_every_locale() {
    let registry = TemplateRegistry::builtin().unwrap();
    assert_eq!(registry.len(), 12);
    for task in registry.tasks() {
        for locale in Locale::ALL {
            let name = registry.display_name(&task.id, locale).unwrap();
            assert_eq!(registry.resolve_task_id(name, locale).unwrap(), task.id);
        }
    }
}

#[test]
fn unknown_task_id() {
    let registry = TemplateRegistry::builtin().unwrap();
    assert_eq!(
        registry.lookup("defragment").unwrap_err(),
        AssistError::UnknownTask("defragment".to_string())
    );
}

#[test]
fn registry_rejects_broken_tables() {
    let ok = "{vendor} {user_input}";

    let dup_id = vec![task("a", "A", "A-de", ok), task("a", "B", "B-de", ok)];
    assert!(TemplateRegistry::new(dup_id).is_err());

    let dup_name = vec![task("a", "Same", "A-de", ok), task("b", "Same", "B-de", ok)];
    assert!(TemplateRegistry::new(dup_name).is_err());

    let no_vendor = vec![task("a", "A", "A-de", "{user_input}")];
    assert_eq!(
        TemplateRegistry::new(no_vendor).unwrap_err().kind(),
        ErrorKind::MissingPlaceholder
    );

    let mut no_german = task("a", "A", "A-de", ok);
    no_german.display_names.truncate(1);
    assert!(TemplateRegistry::new(vec![no_german]).is_err());
}

#[test]
fn validate_edges() {
    assert_eq!(validate("", 5000), Err(InvalidInput::Empty));
    assert_eq!(validate("   ", 5000), Err(InvalidInput::Empty));
    assert!(matches!(
        validate(&"a".repeat(5001), 5000),
        Err(InvalidInput::TooLong { .. })
    ));
    assert_eq!(validate("LUN 12 offline", 5000), Ok(()));
}

#[test]
fn compose_with_custom_vendor() {
    let t = task("a", "A", "A-de", "Vendor: {vendor}\nProblem: {user_input}");
    let prompt = compose(&t, "Acme", "disk full").unwrap();
    assert!(prompt.contains("Acme"));
    assert!(prompt.contains("disk full"));
    assert!(!prompt.contains("{vendor}"));
    assert!(!prompt.contains("{user_input}"));
}
