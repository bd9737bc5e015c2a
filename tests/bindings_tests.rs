//! Key binding persistence - the on-disk format is a flat JSON object

use blockfall::input::{handle_key_event, KeyBindings};
use blockfall::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent};
use serde_json::Value;

#[test]
fn test_saved_file_is_flat_action_to_key_map() {
    let json = KeyBindings::default().to_json().unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    let map = value.as_object().expect("object");

    assert_eq!(map.len(), GameAction::BINDABLE.len());
    for action in GameAction::BINDABLE {
        assert!(map[action.as_str()].is_string(), "{}", action.as_str());
    }
    assert_eq!(map["hardDrop"], "Space");
    assert_eq!(map["moveLeft"], "Left");
}

#[test]
fn test_edited_file_drives_input_mapping() {
    let json = KeyBindings::default().to_json().unwrap();
    let mut value: Value = serde_json::from_str(&json).unwrap();
    value["hardDrop"] = Value::from("Enter");
    value["hold"] = Value::from("Space");

    let bindings = KeyBindings::from_json(&value.to_string()).unwrap();
    assert_eq!(
        handle_key_event(&bindings, KeyEvent::from(KeyCode::Enter)),
        Some(GameAction::HardDrop)
    );
    assert_eq!(
        handle_key_event(&bindings, KeyEvent::from(KeyCode::Char(' '))),
        Some(GameAction::Hold)
    );
}
