use super::*;

fn solid(name: &str, z: i32) -> Layer {
    Layer::new(
        name,
        LayerKind::Solid {
            color: Rgba8Premul::white(),
        },
        z,
    )
}

#[test]
fn sort_is_stable_by_z() {
    let mut v = VisualDescriptor {
        layers: vec![solid("c", 5), solid("a", 1), solid("b", 5), solid("d", 0)],
        ..VisualDescriptor::default()
    };
    v.sort();
    let names: Vec<_> = v.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["d", "a", "c", "b"]);
    assert_eq!(v.max_z(), 5);
}

#[test]
fn opacity_is_clamped_and_fade_multiplies() {
    let layer = solid("x", 0).with_opacity(1.7);
    assert_eq!(layer.opacity, 1.0);

    let mut v = VisualDescriptor {
        layers: vec![solid("x", 0).with_opacity(0.5)],
        ..VisualDescriptor::default()
    };
    v.fade(0.5);
    assert_eq!(v.layers[0].opacity, 0.25);
    v.fade(-3.0);
    assert_eq!(v.layers[0].opacity, 0.0);
}

#[test]
fn identity_transform_maps_to_identity_affine() {
    let canvas = Canvas {
        width: 1920,
        height: 1080,
    };
    let a = LayerTransform::default().to_affine(canvas);
    let p = a * kurbo::Point::new(10.0, 20.0);
    assert!((p.x - 10.0).abs() < 1e-9 && (p.y - 20.0).abs() < 1e-9);
}

#[test]
fn scale_keeps_canvas_center_fixed() {
    let canvas = Canvas {
        width: 200,
        height: 100,
    };
    let a = LayerTransform::scale(2.0).to_affine(canvas);
    let c = a * kurbo::Point::new(100.0, 50.0);
    assert!((c.x - 100.0).abs() < 1e-9 && (c.y - 50.0).abs() < 1e-9);
    let corner = a * kurbo::Point::new(0.0, 0.0);
    assert!((corner.x + 100.0).abs() < 1e-9 && (corner.y + 50.0).abs() < 1e-9);
}

#[test]
fn merge_keeps_painter_order() {
    let mut a = VisualDescriptor {
        layers: vec![solid("a", 10)],
        ..VisualDescriptor::default()
    };
    let b = VisualDescriptor {
        layers: vec![solid("b", 3)],
        ..VisualDescriptor::default()
    };
    a.merge(b);
    assert_eq!(a.layers[0].name, "b");
    assert!(a.layer("a").is_some());
    assert!(a.layer("zzz").is_none());
}
