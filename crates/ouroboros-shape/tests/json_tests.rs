//! JSON interop tests (requires the `serde` feature)

use ouroboros_shape::*;
use serde_json::json;

fn order_schema() -> ObjectValidator {
    object(
        Schema::new()
            .field("sku", string().min_length(3).unwrap())
            .unwrap()
            .field("quantity", number().min(1.0).unwrap().to_integer().unwrap())
            .unwrap()
            .field("notes", string().optional())
            .unwrap()
            .field("lines", list(number()))
            .unwrap(),
    )
}

#[test]
fn test_json_payload_round_trip() {
    let payload = json!({"sku": "ABC-1", "quantity": "2.4", "lines": [1, 2.5], "extra": true});
    let validated = validate_json(&payload, &order_schema()).unwrap();

    assert_eq!(
        serde_json::Value::from(validated),
        json!({"sku": "ABC-1", "quantity": 2.0, "lines": [1.0, 2.5]})
    );
}

#[test]
fn test_error_tree_serializes_to_json() {
    let payload = json!({"sku": "A", "quantity": 0, "lines": [1, "x"]});
    let errors = validate_json(&payload, &order_schema()).unwrap_err();

    assert_eq!(
        serde_json::to_value(&errors).unwrap(),
        json!({
            "sku": "Expected string length to be at least 3 but got 1",
            "quantity": "Expected number to be at least 1 but got 0",
            "lines": {"1": "Expected number but got string"},
        })
    );
}

#[test]
fn test_json_conversion_edge_cases() {
    assert_eq!(Value::from(json!(null)), Value::Null);
    assert_eq!(Value::from(json!(3)), Value::Number(3.0));
    assert_eq!(
        serde_json::Value::from(Value::Number(f64::INFINITY)),
        serde_json::Value::Null
    );
    assert_eq!(
        serde_json::Value::from(Value::Symbol(Symbol::new("tag"))),
        json!("tag")
    );
    assert_eq!(
        serde_json::Value::from(Value::List(vec![Value::Undefined])),
        json!([null])
    );
}
