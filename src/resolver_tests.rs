use crate::config::ReturnLabelConfig;
use crate::event::EventScript;
use crate::resolver::{find_label, Classification, LabelResolver, Resolution};

fn resolver() -> LabelResolver {
    LabelResolver::new(&ReturnLabelConfig::default())
}

#[test]
fn test_plain_name_is_ordinary() {
    let (class, effective) = resolver().classify("Shop Menu");
    assert_eq!(class, Classification::Ordinary);
    assert_eq!(effective, "Shop Menu");
}

#[test]
fn test_prefixed_name_is_save() {
    let (class, effective) = resolver().classify("Return: Shop Menu");
    assert_eq!(class, Classification::Save);
    assert_eq!(effective, "Shop Menu");
}

#[test]
fn test_sentinel_is_return() {
    let (class, _) = resolver().classify("RETURN");
    assert_eq!(class, Classification::Return);
}

#[test]
fn test_empty_suffix_is_still_save() {
    // "Return: " with nothing after it searches for the empty label name
    let (class, effective) = resolver().classify("Return: ");
    assert_eq!(class, Classification::Save);
    assert_eq!(effective, "");
}

#[test]
fn test_prefix_match_is_literal() {
    // Leading whitespace defeats the prefix; no trimming happens
    let (class, _) = resolver().classify(" Return: X");
    assert_eq!(class, Classification::Ordinary);
    // Case matters too
    let (class, _) = resolver().classify("return: X");
    assert_eq!(class, Classification::Ordinary);
}

/// The stripped length must track the configured prefix, whatever its
/// length; a fixed-width strip would mangle these.
#[test]
fn test_strip_length_follows_prefix() {
    for (prefix, requested, expected) in [
        ("@", "@Target", "Target"),
        ("CALL -> ", "CALL -> Target", "Target"),
        ("Return: ", "Return: Target", "Target"),
    ] {
        let resolver = LabelResolver::new(&ReturnLabelConfig::new(prefix, "RETURN"));
        let (class, effective) = resolver.classify(requested);
        assert_eq!(class, Classification::Save, "prefix {:?}", prefix);
        assert_eq!(effective, expected, "prefix {:?}", prefix);
    }
}

#[test]
fn test_sentinel_wins_over_prefix_when_conflicted() {
    // Degraded mode for a conflicted configuration: the exact sentinel
    // match is checked first, so the jump classifies as a return
    let config = ReturnLabelConfig::new("RETURN", "RETURN");
    assert!(config.validate().is_err());
    let resolver = LabelResolver::new(&config);
    let (class, _) = resolver.classify("RETURN");
    assert_eq!(class, Classification::Return);
    // A longer name still matches the prefix and saves
    let (class, effective) = resolver.classify("RETURNTarget");
    assert_eq!(class, Classification::Save);
    assert_eq!(effective, "Target");
}

#[test]
fn test_resolve_finds_first_label() {
    let script = EventScript::builder()
        .text("start")
        .label("X")
        .text("first")
        .label("X")
        .text("second")
        .build();
    match resolver().resolve("X", &script.list) {
        Resolution::Target {
            classification,
            index,
        } => {
            assert_eq!(classification, Classification::Ordinary);
            assert_eq!(index, 1);
        }
        other => panic!("expected target, got {:?}", other),
    }
}

#[test]
fn test_resolve_save_scans_for_stripped_name() {
    let script = EventScript::builder().label("Sub").text("body").build();
    match resolver().resolve("Return: Sub", &script.list) {
        Resolution::Target {
            classification,
            index,
        } => {
            assert_eq!(classification, Classification::Save);
            assert_eq!(index, 0);
        }
        other => panic!("expected target, got {:?}", other),
    }
}

#[test]
fn test_resolve_return_defers_to_stack() {
    let script = EventScript::builder().label("Sub").build();
    assert_eq!(
        resolver().resolve("RETURN", &script.list),
        Resolution::UseStack
    );
}

#[test]
fn test_resolve_missing_label() {
    let script = EventScript::builder().text("nothing here").build();
    assert_eq!(
        resolver().resolve("Ghost", &script.list),
        Resolution::NotFound("Ghost".to_string())
    );
    // The reported name for a save jump is the stripped one
    assert_eq!(
        resolver().resolve("Return: Ghost", &script.list),
        Resolution::NotFound("Ghost".to_string())
    );
}

#[test]
fn test_resolve_on_empty_list() {
    assert_eq!(
        resolver().resolve("Anything", &[]),
        Resolution::NotFound("Anything".to_string())
    );
}

#[test]
fn test_jump_instructions_are_not_label_definitions() {
    // A jump named like a label must not be treated as a target
    let script = EventScript::builder().jump("X").label("X").build();
    assert_eq!(find_label(&script.list, "X"), Some(1));
}
