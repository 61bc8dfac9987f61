//! Integration tests for the process-wide registry
//!
//! Every test here touches global state, so they run one at a time.

#[macro_use]
mod common;

use sanitize::{FieldHandle, TransformError, record};
use serial_test::serial;

struct Greeting {
    text: String,
}

record!(Greeting {
    text: "trim_space,greet",
});

fn greet(field: &mut FieldHandle<'_>, _: &str, argument: &str) -> Result<(), TransformError> {
    let salutation = if argument.is_empty() { "Hello" } else { argument };
    field.map_text(|s| format!("{salutation}, {s}"));
    Ok(())
}

#[test]
#[serial]
fn test_builtins_registered_globally() {
    for name in ["trim_space", "strip_space", "lower", "upper", "capitalize"] {
        assert!(sanitize::lookup(name).is_some(), "missing builtin {name}");
    }
    assert!(sanitize::lookup("dive").is_none());
}

#[test]
#[serial]
fn test_register_then_apply() {
    sanitize::register_fn("greet", greet);

    let mut greeting = Greeting {
        text: " world ".to_string(),
    };
    assert_ok!(sanitize::apply(&mut greeting));
    assert_eq!(greeting.text, "Hello, world");
}

#[test]
#[serial]
fn test_last_registration_wins() {
    sanitize::register_fn("greet", greet);
    sanitize::register_fn("greet", |field: &mut FieldHandle<'_>, _: &str, _: &str| {
        field.map_text(|s| format!("Hi {s}"));
        Ok(())
    });

    let mut greeting = Greeting {
        text: "ann".to_string(),
    };
    assert_ok!(sanitize::apply(&mut greeting));
    assert_eq!(greeting.text, "Hi ann");

    sanitize::register_fn("greet", greet);
}

#[test]
#[serial]
fn test_lookup_returns_callable_transformer() {
    let upper = assert_some!(sanitize::lookup("upper"));
    let mut value = "quiet".to_string();
    assert_ok!(upper.transform(&mut FieldHandle::from(&mut value), "upper", ""));
    assert_eq!(value, "QUIET");
}

#[test]
#[serial]
fn test_global_apply_json() {
    use sanitize::record::{FieldSchema, RecordSchema, SchemaCatalog};
    use serde_json::json;

    let schema = RecordSchema::new(vec![FieldSchema::new("name", "trim_space,upper")]);
    let mut value = json!({"name": " ada "});
    assert_ok!(sanitize::apply_json(&mut value, &schema, &SchemaCatalog::new()));
    assert_eq!(value["name"], "ADA");
}

#[test]
#[serial]
fn test_registration_during_apply_does_not_affect_it() {
    struct Form {
        first: String,
        second: String,
    }
    record!(Form {
        first: "late_rule",
        second: "unseen_rule",
    });

    // Registers a new rule while a traversal is in flight
    sanitize::register_fn("late_rule", |_: &mut FieldHandle<'_>, _: &str, _: &str| {
        sanitize::register_fn("unseen_rule", |field: &mut FieldHandle<'_>, _: &str, _: &str| {
            field.map_text(|_| "seen".to_string());
            Ok(())
        });
        Ok(())
    });

    let mut form = Form {
        first: String::new(),
        second: String::new(),
    };
    let err = sanitize::apply(&mut form).unwrap_err();
    assert_eq!(err.rule(), Some("unseen_rule"));

    // A fresh call takes a new snapshot
    assert_ok!(sanitize::apply(&mut form));
    assert_eq!(form.second, "seen");
}

#[test]
#[serial]
fn test_config_aliases_in_global_registry() {
    use sanitize::config::Config;

    let config = assert_ok!(Config::parse(
        "[sanitize]\nversion = \"1\"\n\n[aliases]\nshouty_name = \"trim_space,upper\"\n"
    ));
    assert_ok!(sanitize::rules::registry::with_global(|registry| {
        config.register_aliases(registry)
    }));

    struct Banner {
        title: String,
    }
    record!(Banner {
        title: "shouty_name",
    });

    let mut banner = Banner {
        title: " sale ".to_string(),
    };
    assert_ok!(sanitize::apply(&mut banner));
    assert_eq!(banner.title, "SALE");
    assert_eq!(
        sanitize::rules::registry::snapshot().source("shouty_name"),
        Some(sanitize::RuleSource::Alias)
    );
}
