use a2ui_protocol::*;
use serde_json::json;

#[test]
fn test_begin_rendering_deserialization() {
    let line = r##"{"beginRendering": {"surfaceId": "main", "root": "card", "styles": {"primaryColor": "#00BFFF"}}}"##;

    let message: ServerToClientMessage =
        serde_json::from_str(line).expect("Failed to deserialize beginRendering");

    let begin = message.begin_rendering.expect("beginRendering should be populated");
    assert_eq!(begin.surface_id, "main");
    assert_eq!(begin.root, "card");
    assert!(begin.catalog_id.is_none());
    assert_eq!(
        begin.styles.expect("styles should be present")["primaryColor"],
        "#00BFFF"
    );
    assert!(message.surface_update.is_none());
}

#[test]
fn test_surface_update_deserialization() {
    let line = r#"{"surfaceUpdate": {"surfaceId": "main", "components": [
        {"id": "title", "weight": 2, "component": {"Text": {"text": {"literalString": "Hello"}, "usageHint": "h1"}}},
        {"id": "col", "component": {"Column": {"children": {"explicitList": ["title"]}}}}
    ]}}"#;

    let message: ServerToClientMessage =
        serde_json::from_str(line).expect("Failed to deserialize surfaceUpdate");
    let update = message.surface_update.expect("surfaceUpdate should be populated");

    assert_eq!(update.components.len(), 2);
    assert_eq!(update.components[0].id, "title");
    assert_eq!(update.components[0].weight, Some(2.0));
    assert!(update.components[0].component.contains_key("Text"));
    assert_eq!(update.components[1].weight, None);
}

#[test]
fn test_data_model_update_nested_entries() {
    let line = r#"{"dataModelUpdate": {"surfaceId": "main", "path": "/user", "contents": [
        {"key": "name", "valueString": "Ada"},
        {"key": "age", "valueNumber": 36},
        {"key": "admin", "valueBoolean": true},
        {"key": "address", "valueMap": [{"key": "city", "valueString": "London"}]}
    ]}}"#;

    let message: ServerToClientMessage =
        serde_json::from_str(line).expect("Failed to deserialize dataModelUpdate");
    let update = message.data_model_update.expect("dataModelUpdate should be populated");

    assert_eq!(update.path.as_deref(), Some("/user"));
    assert_eq!(update.contents.len(), 4);
    assert_eq!(update.contents[0], DataEntry::string("name", "Ada"));
    assert_eq!(update.contents[1].value_number, Some(36.0));
    assert_eq!(update.contents[2].value_boolean, Some(true));
    let address = update.contents[3].value_map.as_ref().expect("valueMap");
    assert_eq!(address[0].value_string.as_deref(), Some("London"));
    assert_eq!(update.contents[3].value_count(), 1);
}

#[test]
fn test_message_precedence_with_multiple_fields() {
    let line = r#"{
        "deleteSurface": {"surfaceId": "a"},
        "surfaceUpdate": {"surfaceId": "b", "components": []}
    }"#;

    let message: ServerToClientMessage = serde_json::from_str(line).expect("parse");
    assert_eq!(
        message.populated_kinds(),
        vec![MessageKind::SurfaceUpdate, MessageKind::DeleteSurface]
    );

    let action = message.into_action().expect("one action should be selected");
    assert_eq!(action.kind(), MessageKind::SurfaceUpdate);
    assert_eq!(action.surface_id(), "b");
}

#[test]
fn test_empty_message_has_no_action() {
    let message: ServerToClientMessage = serde_json::from_str("{}").expect("parse");
    assert!(message.populated_kinds().is_empty());
    assert!(message.into_action().is_none());
}

#[test]
fn test_server_message_serialization_skips_empty_fields() {
    let message = ServerToClientMessage::from(ServerAction::DeleteSurface(DeleteSurface {
        surface_id: "main".to_string(),
    }));

    let json = serde_json::to_value(&message).expect("Failed to serialize");
    assert_eq!(json, json!({"deleteSurface": {"surfaceId": "main"}}));
}

#[test]
fn test_bound_value_prefers_literal_over_path() {
    let value: BoundValue =
        serde_json::from_value(json!({"literalString": "fixed", "path": "/name"})).expect("parse");
    assert!(value.is_ambiguous());

    let binding = Binding::try_from(value).expect("binding");
    assert_eq!(binding, Binding::Literal(Literal::String("fixed".to_string())));
}

#[test]
fn test_bound_value_path_and_empty() {
    let value: BoundValue = serde_json::from_value(json!({"path": "name"})).expect("parse");
    assert_eq!(Binding::try_from(value), Ok(Binding::path("name")));

    let empty = BoundValue::default();
    assert_eq!(Binding::try_from(empty), Err(EmptyBinding));
}

#[test]
fn test_children_wire_shapes() {
    let explicit: Children =
        serde_json::from_value(json!({"explicitList": ["a", "b"]})).expect("explicitList");
    assert_eq!(
        explicit,
        Children::ExplicitList(vec!["a".to_string(), "b".to_string()])
    );

    let template: Children = serde_json::from_value(json!({
        "template": {"componentId": "item", "dataBinding": "/items"}
    }))
    .expect("template");
    match template {
        Children::Template(t) => {
            assert_eq!(t.component_id, "item");
            assert_eq!(t.data_binding, "/items");
        }
        other => panic!("Wrong variant: {other:?}"),
    }
}

#[test]
fn test_user_action_serialization() {
    let mut context = serde_json::Map::new();
    context.insert("email".to_string(), json!("ada@example.com"));
    let action = UserAction::new("submit", "main", "submit-button", context);

    let json = serde_json::to_value(ClientToServerMessage::user_action(action))
        .expect("Failed to serialize userAction");

    let payload = &json["userAction"];
    assert_eq!(payload["name"], "submit");
    assert_eq!(payload["surfaceId"], "main");
    assert_eq!(payload["sourceComponentId"], "submit-button");
    assert_eq!(payload["context"]["email"], "ada@example.com");
    assert!(payload["timestamp"].as_str().expect("timestamp string").contains('T'));
    assert!(json.get("error").is_none());
}

#[test]
fn test_event_enum_serialization() {
    let event = Event::SurfaceUpdated {
        surface_id: "main".to_string(),
    };

    let json = serde_json::to_value(&event).expect("Failed to serialize Event");
    assert_eq!(json["type"], "surfaceUpdated");
    assert_eq!(json["payload"]["surface_id"], "main");

    let conflict = Event::DataPathConflict {
        surface_id: "main".to_string(),
        path: "/a/b".to_string(),
        segment: "/a".to_string(),
    };
    let json = serde_json::to_value(&conflict).expect("Failed to serialize Event");
    assert_eq!(json["type"], "dataPathConflict");
    assert_eq!(conflict.surface_id(), "main");
}

#[test]
fn test_standard_component_types() {
    assert!(component_types::is_standard(component_types::TEXT));
    assert!(component_types::is_standard("AudioPlayer"));
    assert!(!component_types::is_standard("Carousel"));
    assert!(STANDARD_CATALOG_ID.ends_with("standard_catalog_definition.json"));
}
