use super::*;
use serde_json::json;

#[test]
fn parses_short_and_long_hex() {
    let c: ColorDef = serde_json::from_value(json!("#fff")).unwrap();
    assert_eq!(c, ColorDef::rgba(1.0, 1.0, 1.0, 1.0));

    let c: ColorDef = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, ColorDef::rgba(1.0, 0.0, 0.0, 1.0));

    let c: ColorDef = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);
}

#[test]
fn parses_rgba_object_and_array() {
    let c: ColorDef = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 1.0));

    let c: ColorDef = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 0.9));
}

#[test]
fn rejects_bad_hex() {
    assert!(parse_hex("#12345").is_err());
    assert!(parse_hex("#zzzzzz").is_err());
}

#[test]
fn premul_conversion_clamps() {
    let c = ColorDef::rgba(2.0, -1.0, 0.5, 1.0).to_rgba8_premul();
    assert_eq!(c.r, 255);
    assert_eq!(c.g, 0);
    assert_eq!(c.b, 128);
}
