use crate::operation::SwitchKind;
use crate::operation::SwitchValue;
use crate::operation::VariantSwitch;

fn boolean_switch(name: &str) -> VariantSwitch {
    VariantSwitch {
        kind: SwitchKind::Boolean,
        name: name.to_string(),
        operations: vec![],
    }
}

#[test]
fn boolean_switch_has_arity_two() {
    let switch = boolean_switch("useWide");
    assert_eq!(switch.arity(), 2);
    assert_eq!(
        switch.values(),
        vec![SwitchValue::Bool(true), SwitchValue::Bool(false)],
    );
}

#[test]
fn enum_switch_arity_tracks_choices() {
    let switch = VariantSwitch {
        kind: SwitchKind::Enum(vec![
            "free".to_string(),
            "pro".to_string(),
            "enterprise".to_string(),
        ]),
        name: "planTier".to_string(),
        operations: vec![],
    };
    assert_eq!(switch.arity(), 3);
    assert_eq!(switch.values().len(), 3);
    assert_eq!(
        switch.values()[1],
        SwitchValue::Choice("pro".to_string()),
    );
}

#[test]
fn switch_value_display() {
    assert_eq!(SwitchValue::Bool(true).to_string(), "true");
    assert_eq!(SwitchValue::Choice("pro".to_string()).to_string(), "pro");
}
