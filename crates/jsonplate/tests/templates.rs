//! Reading and writing shaped and dynamic templates

use jsonplate::casing::Casing;
use jsonplate::document::{Document, NodeId, NodeKind, Variable};
use jsonplate::shape::{Descriptor, Shape, Slot};
use jsonplate::value::Value;
use jsonplate::{variables, Error, Options};
use pretty_assertions::assert_eq;
use serde_json::json;

const SETTINGS: Descriptor = Descriptor::new(
    "Settings",
    &[
        Slot::new("Name", Shape::String),
        Slot::new("Retries", Shape::Integer),
        Slot::new("Enabled", Shape::Boolean),
        Slot::new("Ratio", Shape::Nullable(&Shape::Decimal)),
    ],
);

const SERVICE: Descriptor = Descriptor::new(
    "Service",
    &[
        Slot::new("Label", Shape::String),
        Slot::new("Settings", Shape::Struct(&SETTINGS)),
    ],
);

fn options() -> Options {
    Options::default().with_casing(Casing::CamelCase)
}

fn settings_with(doc: &mut Document, values: [NodeId; 4]) -> NodeId {
    let settings = doc.shaped(&SETTINGS);
    for (slot, value) in SETTINGS.slots.iter().zip(values) {
        doc.set_slot(settings, slot.name, value).unwrap();
    }
    settings
}

fn named_settings(doc: &mut Document, prefix: &str) -> NodeId {
    let values = [
        doc.variable(Shape::String, format!("{prefix}String")),
        doc.variable(Shape::Integer, format!("{prefix}Int")),
        doc.variable(Shape::Boolean, format!("{prefix}Bool")),
        doc.variable(Shape::Nullable(&Shape::Decimal), format!("{prefix}Ratio")),
    ];
    settings_with(doc, values)
}

fn written(doc: &Document, node: NodeId) -> serde_json::Value {
    serde_json::to_value(doc.render(node, &options())).unwrap()
}

fn variable_name(doc: &Document, node: Option<NodeId>) -> Option<String> {
    match doc.node(node?).kind() {
        NodeKind::Variable(Variable::Named(name)) => Some(name.clone()),
        _ => None,
    }
}

fn constant(doc: &Document, node: Option<NodeId>) -> Option<Value> {
    match doc.node(node?).kind() {
        NodeKind::Constant(value) => Some(value.clone()),
        _ => None,
    }
}

#[test]
fn named_variables_are_written_as_placeholders() {
    let mut doc = Document::default();
    let settings = named_settings(&mut doc, "my");

    assert_eq!(
        written(&doc, settings),
        json!({
            "name": "${myString}",
            "retries": "${myInt}",
            "enabled": "${myBool}",
            "ratio": "${myRatio}"
        })
    );
}

#[test]
fn default_variables_are_named_after_slots() {
    let mut doc = Document::default();
    let values = [
        doc.default_variable(Shape::String),
        doc.default_variable(Shape::Integer),
        doc.default_variable(Shape::Boolean),
        doc.default_variable(Shape::Nullable(&Shape::Decimal)),
    ];
    let settings = settings_with(&mut doc, values);

    assert_eq!(
        written(&doc, settings),
        json!({
            "name": "${name}",
            "retries": "${retries}",
            "enabled": "${enabled}",
            "ratio": "${ratio}"
        })
    );
}

#[test]
fn constants_are_written_as_values() {
    let mut doc = Document::default();
    let values = [
        doc.constant(Shape::String, "constant").unwrap(),
        doc.constant(Shape::Integer, 42).unwrap(),
        doc.constant(Shape::Boolean, true).unwrap(),
        doc.constant(Shape::Nullable(&Shape::Decimal), 42.5).unwrap(),
    ];
    let settings = settings_with(&mut doc, values);

    assert_eq!(
        written(&doc, settings),
        json!({"name": "constant", "retries": 42, "enabled": true, "ratio": 42.5})
    );
}

#[test]
fn some_variables_resolved() {
    let mut doc = Document::default();
    let settings = named_settings(&mut doc, "my");
    doc.set_variables(settings, variables! { "myInt" => 42 });

    assert_eq!(
        written(&doc, settings),
        json!({
            "name": "${myString}",
            "retries": 42,
            "enabled": "${myBool}",
            "ratio": "${myRatio}"
        })
    );
}

#[test]
fn untouched_slots_write_defaults() {
    let mut doc = Document::default();
    let settings = doc.shaped(&SETTINGS);
    let name = doc.variable(Shape::String, "myString");
    doc.set_slot(settings, "Name", name).unwrap();

    assert_eq!(
        written(&doc, settings),
        json!({"name": "${myString}", "retries": 0, "enabled": false, "ratio": null})
    );
}

#[test]
fn nested_shapes() {
    let mut doc = Document::default();
    let service = doc.shaped(&SERVICE);
    let label = doc.variable(Shape::String, "label");
    let settings = named_settings(&mut doc, "inner");
    doc.set_slot(service, "Label", label).unwrap();
    doc.set_slot(service, "Settings", settings).unwrap();

    assert_eq!(
        written(&doc, service),
        json!({
            "label": "${label}",
            "settings": {
                "name": "${innerString}",
                "retries": "${innerInt}",
                "enabled": "${innerBool}",
                "ratio": "${innerRatio}"
            }
        })
    );

    // variables set on the outer template reach the nested one
    doc.set_variables(service, variables! { "innerBool" => true, "label" => "svc" });
    assert_eq!(
        written(&doc, service),
        json!({
            "label": "svc",
            "settings": {
                "name": "${innerString}",
                "retries": "${innerInt}",
                "enabled": true,
                "ratio": "${innerRatio}"
            }
        })
    );
}

#[test]
fn read_named_variables_into_shape() {
    let text = r#"{
        "name": "${myString}",
        "retries": "${myInt}",
        "enabled": "${myBool}",
        "ratio": "${myRatio}"
    }"#;

    let doc = Document::from_json_str(text, Shape::Struct(&SETTINGS), &options()).unwrap();
    let root = doc.root().unwrap();

    let names: Vec<_> = SETTINGS
        .slots
        .iter()
        .map(|slot| variable_name(&doc, doc.slot(root, slot.name)))
        .collect();
    assert_eq!(
        names,
        [
            Some("myString".to_string()),
            Some("myInt".to_string()),
            Some("myBool".to_string()),
            Some("myRatio".to_string()),
        ]
    );

    let ratio = doc.slot(root, "Ratio").unwrap();
    assert_eq!(doc.node(ratio).shape(), Shape::Nullable(&Shape::Decimal));
}

#[test]
fn read_constants_into_shape() {
    let text = r#"{"name": "myString", "retries": 42, "enabled": false, "ratio": 42.5}"#;

    let doc = Document::from_json_str(text, Shape::Struct(&SETTINGS), &options()).unwrap();
    let root = doc.root().unwrap();

    assert_eq!(constant(&doc, doc.slot(root, "Name")), Some("myString".into()));
    assert_eq!(constant(&doc, doc.slot(root, "Retries")), Some(Value::Integer(42)));
    assert_eq!(constant(&doc, doc.slot(root, "Enabled")), Some(Value::Boolean(false)));
    assert_eq!(constant(&doc, doc.slot(root, "Ratio")), Some(Value::Decimal(42.5)));
}

#[test]
fn read_missing_slots_as_defaults() {
    let doc =
        Document::from_json_str(r#"{"name": "myString"}"#, Shape::Struct(&SETTINGS), &options())
            .unwrap();
    let root = doc.root().unwrap();

    assert_eq!(constant(&doc, doc.slot(root, "Retries")), Some(Value::Integer(0)));
    assert_eq!(constant(&doc, doc.slot(root, "Enabled")), Some(Value::Boolean(false)));
    assert_eq!(constant(&doc, doc.slot(root, "Ratio")), Some(Value::Null));
}

#[test]
fn read_nested_shape() {
    let text = r#"{"label": "x", "settings": {"retries": "${n}"}}"#;
    let doc = Document::from_json_str(text, Shape::Struct(&SERVICE), &options()).unwrap();
    let root = doc.root().unwrap();

    let settings = doc.slot(root, "Settings").unwrap();
    assert_eq!(doc.parent(settings), Some(root));
    assert_eq!(variable_name(&doc, doc.slot(settings, "Retries")), Some("n".to_string()));
}

#[test]
fn read_unshaped_into_dynamic() {
    let text = r#"{
        "stringProp": "${myString}",
        "intProp": 42,
        "boolProp": true,
        "decimalProp": 42.5
    }"#;

    let doc = Document::from_json_str(text, Shape::Any, &options()).unwrap();
    let root = doc.root().unwrap();

    let fields: Vec<_> = doc.fields(root).map(|(name, _)| name).collect();
    assert_eq!(fields, ["stringProp", "intProp", "boolProp", "decimalProp"]);

    assert_eq!(
        variable_name(&doc, doc.field(root, "stringProp")),
        Some("myString".to_string())
    );
    assert_eq!(constant(&doc, doc.field(root, "intProp")), Some(Value::Integer(42)));
    assert_eq!(constant(&doc, doc.field(root, "boolProp")), Some(Value::Boolean(true)));
    assert_eq!(constant(&doc, doc.field(root, "decimalProp")), Some(Value::Decimal(42.5)));
}

#[test]
fn same_source_static_and_dynamic() {
    const XY: Descriptor = Descriptor::new(
        "Xy",
        &[Slot::new("x", Shape::Integer), Slot::new("y", Shape::Decimal)],
    );
    let text = r#"{"x": 1}"#;
    let options = Options::default();

    let shaped = Document::from_json_str(text, Shape::Struct(&XY), &options).unwrap();
    let root = shaped.root().unwrap();
    assert_eq!(constant(&shaped, shaped.slot(root, "y")), Some(Value::Decimal(0.0)));
    assert_eq!(shaped.node(shaped.slot(root, "y").unwrap()).shape(), Shape::Decimal);

    let dynamic = Document::from_json_str(text, Shape::Any, &options).unwrap();
    let root = dynamic.root().unwrap();
    assert_eq!(dynamic.fields(root).count(), 1);
    assert!(dynamic.has_field(root, "x"));
}

#[test]
fn read_type_mismatch() {
    let err = Document::from_json_str(r#"{"enabled": 1}"#, Shape::Struct(&SETTINGS), &options())
        .unwrap_err();
    assert_eq!(err.to_string(), "unable to convert integer to boolean");
    assert!(matches!(err, Error::TypeConversion { .. }));
}

#[test]
fn read_then_fill_in() {
    let text = r#"{"host": "${host}", "port": "${port}", "tags": ["a", "b"]}"#;
    let options = Options::default();
    let mut doc = Document::from_json_str(text, Shape::Any, &options).unwrap();
    let root = doc.root().unwrap();

    assert_eq!(doc.unresolved(root, &options), ["host", "port"]);

    doc.set_variables(root, variables! { "host" => "localhost", "port" => 8080 });
    assert!(doc.unresolved(root, &options).is_empty());
    assert_eq!(
        doc.to_json_value(&options).unwrap(),
        json!({"host": "localhost", "port": 8080, "tags": ["a", "b"]})
    );
}

#[test]
fn constants_round_trip() {
    let options = Options::default();
    let cases = [
        (Shape::Integer, json!(-7)),
        (Shape::Decimal, json!(1.25)),
        (Shape::Boolean, json!(true)),
        (Shape::String, json!("plain text")),
        (Shape::String, json!(null)),
        (Shape::List(&Shape::Integer), json!([1, 2, 3])),
        (Shape::Any, json!([{"a": null}, "x", 1.5])),
    ];

    for (shape, value) in cases {
        let mut doc = Document::new(shape);
        let node = doc.constant(shape, Value::from(value.clone())).unwrap();
        doc.set_root(node);

        let text = doc.to_json_string(&options).unwrap();
        let read = Document::from_json_str(&text, shape, &options).unwrap();
        assert_eq!(read.to_json_value(&options).unwrap(), value, "{shape}");
    }
}

#[test]
fn literal_matching_placeholder_is_read_as_variable() {
    // no escaping exists, a constant that looks like a placeholder does not survive a round trip
    let options = Options::default();
    let mut doc = Document::new(Shape::String);
    let node = doc.constant(Shape::String, "${foo}").unwrap();
    doc.set_root(node);

    let text = doc.to_json_string(&options).unwrap();
    let read = Document::from_json_str(&text, Shape::String, &options).unwrap();
    assert_eq!(
        variable_name(&read, read.root()),
        Some("foo".to_string())
    );
}
