use super::*;

#[test]
fn fnv_of_empty_input_is_the_seed() {
    assert_eq!(Fnv1a64::new(Fnv1a64::OFFSET_BASIS).finish(), Fnv1a64::OFFSET_BASIS);
    let mut h = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    h.write_bytes(b"a");
    // Published FNV-1a 64 value for "a".
    assert_eq!(h.finish(), 0xaf63_dc4c_8601_ec8c);
}

#[test]
fn unit_f64_stays_in_half_open_interval() {
    assert_eq!(unit_f64(0), 0.0);
    assert!(unit_f64(u64::MAX) < 1.0);
    for v in [1u64, 42, 0xDEAD_BEEF, u64::MAX / 3] {
        let u = unit_f64(mix64(v));
        assert!((0.0..1.0).contains(&u));
    }
}

#[test]
fn mix64_separates_adjacent_inputs() {
    assert_ne!(mix64(1), mix64(2));
    assert_ne!(mix64(1) >> 11, mix64(2) >> 11);
}
