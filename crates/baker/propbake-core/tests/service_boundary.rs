use propbake_api_core::json::{
    decode_reply, CommonPropertiesReply, ErrorReply, PropertyStatusReply, MESSAGE_ERROR_PREFIX,
};
use propbake_core::{
    host::resolve_mut,
    memory::{MemoryComposition, MemoryLayer, MemoryProperty},
    HostLayer, PropertyBaker, PropertyPath, PropertyStatus, Value,
};
use propbake_test_fixtures::compositions;
use serde_json::{json, Value as Json};

const ROTATION: &str = "ADBE Transform Group|ADBE Rotate Z";
const SPREAD: &str = "ADBE Effect Parade|Pseudo/Controls B|Pseudo/Controls B-0001";

fn load(name: &str) -> MemoryComposition {
    compositions::load(name).expect("fixture should load")
}

fn parse(reply: &str) -> Json {
    serde_json::from_str(reply).expect("reply should be JSON")
}

#[test]
fn common_properties_reply_decodes_as_tree() {
    let comp = load("shared-controls");
    let reply = PropertyBaker::default().get_common_properties(&comp);

    match decode_reply::<CommonPropertiesReply>(&reply).unwrap() {
        CommonPropertiesReply::Tree(tree) => {
            assert_eq!(tree.layer_count, 3);
            assert_eq!(tree.leaves().len(), 5);
        }
        CommonPropertiesReply::Error(e) => panic!("unexpected error reply: {}", e.error),
    }
}

#[test]
fn empty_selection_replies() {
    let mut comp = load("nothing-selected");
    let baker = PropertyBaker::default();

    assert_eq!(
        parse(&baker.get_common_properties(&comp)),
        json!({ "error": "No layers selected" })
    );
    assert_eq!(
        parse(&baker.get_property_status(&comp, ROTATION, "false")),
        json!({ "error": "No layers selected" })
    );
    assert_eq!(
        baker.bake_keyframe(&mut comp, ROTATION, "false"),
        "Error: No layers selected"
    );
    // Selection is reported ahead of a malformed path.
    assert_eq!(
        baker.set_expression_state(&mut comp, "", "false", "true"),
        "Error: No layers selected"
    );
    assert!(comp.undo_labels().is_empty());
}

#[test]
fn status_reply_shape() {
    let comp = load("shared-controls");
    let baker = PropertyBaker::default();

    assert_eq!(
        parse(&baker.get_property_status(&comp, ROTATION, "false")),
        json!({ "hasExpression": true, "expressionEnabled": true })
    );
    let reply = baker.get_property_status(&comp, SPREAD, "false");
    assert_eq!(
        decode_reply::<PropertyStatusReply>(&reply).unwrap(),
        PropertyStatusReply::Status(PropertyStatus::with_expression(false))
    );
    // Stale path: nothing to report, not an error.
    assert_eq!(
        parse(&baker.get_property_status(&comp, "ADBE Transform Group|ADBE Gone", "false")),
        json!({ "hasExpression": false, "expressionEnabled": false })
    );
}

#[test]
fn malformed_path_is_an_error_reply() {
    let mut comp = load("shared-controls");
    let baker = PropertyBaker::default();

    let reply = baker.get_property_status(&comp, "", "false");
    match decode_reply::<PropertyStatusReply>(&reply).unwrap() {
        PropertyStatusReply::Error(ErrorReply { error }) => {
            assert_eq!(error, "empty property path")
        }
        other => panic!("expected an error reply, got {other:?}"),
    }

    let msg = baker.bake_keyframe(&mut comp, "", "false");
    assert!(msg.starts_with(MESSAGE_ERROR_PREFIX), "{msg}");

    // Essential flag with a structural path.
    let msg = baker.bake_keyframe(&mut comp, ROTATION, "true");
    assert!(msg.starts_with(MESSAGE_ERROR_PREFIX), "{msg}");
    assert!(comp.undo_labels().is_empty());

    // Empty segments are well-formed; this one just does not resolve.
    assert_eq!(
        parse(&baker.get_property_status(&comp, "ADBE Transform Group||ADBE Opacity", "false")),
        json!({ "hasExpression": false, "expressionEnabled": false })
    );
}

#[test]
fn unnamed_property_paths_survive_the_boundary() {
    let layer = |name: &str| {
        MemoryLayer::new(
            name,
            vec![MemoryProperty::indexed_group(
                "Effects",
                "ADBE Effect Parade",
                vec![MemoryProperty::leaf("", "", Value::f(0.0))
                    .with_keyframe(0.0, Value::f(0.0))
                    .with_keyframe(2.0, Value::f(4.0))],
            )],
        )
    };
    let mut comp =
        MemoryComposition::new("Comp", vec![layer("A"), layer("B")]).with_time(1.0);
    let baker = PropertyBaker::default();

    let reply = baker.get_common_properties(&comp);
    let CommonPropertiesReply::Tree(tree) = decode_reply::<CommonPropertiesReply>(&reply).unwrap() else {
        panic!("expected a tree: {reply}");
    };
    let leaves = tree.leaves();
    assert_eq!(leaves.len(), 1);
    let path = leaves[0].path().unwrap().to_string();
    assert_eq!(path, "ADBE Effect Parade|");

    assert_eq!(
        baker.bake_keyframe(&mut comp, &path, "false"),
        "Baked 2 layers at 1.00s"
    );
}

#[test]
fn bake_message() {
    let mut comp = load("shared-controls");
    let baker = PropertyBaker::default();

    assert_eq!(
        baker.bake_keyframe(&mut comp, ROTATION, "false"),
        "Baked 3 layers at 1.00s"
    );
    assert_eq!(
        baker.bake_keyframe(&mut comp, "Essential|Slider", "true"),
        "Baked 3 layers at 1.00s"
    );
    assert_eq!(
        baker.bake_keyframe(&mut comp, "ADBE Transform Group|ADBE Gone", "false"),
        "Baked 0 layers at 1.00s"
    );
    assert_eq!(comp.undo_labels().len(), 3);
}

#[test]
fn bake_message_reports_failures() {
    let mut comp = load("shared-controls");
    let rotation = PropertyPath::parse(ROTATION).unwrap();
    resolve_mut(comp.layers[0].root_mut(), &rotation)
        .unwrap()
        .locked = true;

    assert_eq!(
        PropertyBaker::default().bake_keyframe(&mut comp, ROTATION, "false"),
        "Baked 2 layers at 1.00s (1 failed)"
    );
}

#[test]
fn expression_messages() {
    let mut comp = load("shared-controls");
    let baker = PropertyBaker::default();

    assert_eq!(
        baker.set_expression_state(&mut comp, SPREAD, "false", "true"),
        "Enabled expressions on 3 layers"
    );
    // Anything but "true" disables.
    assert_eq!(
        baker.set_expression_state(&mut comp, ROTATION, "false", "yes"),
        "Disabled expressions on 3 layers"
    );
    assert_eq!(
        parse(&baker.get_property_status(&comp, ROTATION, "false")),
        json!({ "hasExpression": true, "expressionEnabled": false })
    );
    assert_eq!(
        baker.set_expression_state(&mut comp, "ADBE Transform Group|ADBE Position", "false", "true"),
        "Enabled expressions on 0 layers"
    );
    assert_eq!(
        comp.undo_labels(),
        vec!["Enable Expressions", "Disable Expressions", "Enable Expressions"]
    );
}

#[test]
fn essential_status_and_toggle_messages() {
    let mut comp = load("shared-controls");
    let baker = PropertyBaker::default();

    assert_eq!(
        parse(&baker.get_property_status(&comp, "Essential|Slider", "true")),
        json!({ "hasExpression": true, "expressionEnabled": true })
    );
    // Without the flag the sentinel path is looked up in the main tree.
    assert_eq!(
        parse(&baker.get_property_status(&comp, "Essential|Slider", "false")),
        json!({ "hasExpression": false, "expressionEnabled": false })
    );
    assert_eq!(
        baker.set_expression_state(&mut comp, "Essential|Slider", "true", "false"),
        "Disabled expressions on 3 layers"
    );
    assert_eq!(
        parse(&baker.get_property_status(&comp, "Essential|Slider", "true")),
        json!({ "hasExpression": true, "expressionEnabled": false })
    );
    assert_eq!(
        baker.set_expression_state(&mut comp, "Essential|Title", "true", "true"),
        "Enabled expressions on 0 layers"
    );
}
