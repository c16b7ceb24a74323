use super::*;
use crate::foundation::core::PremulRgba8;

const RED: PremulRgba8 = [255, 0, 0, 255];
const GREEN: PremulRgba8 = [0, 255, 0, 255];

// Translucent, valid premultiplied operands shared by the golden table below.
const S: PremulRgba8 = [200, 40, 0, 200];
const D: PremulRgba8 = [30, 90, 120, 160];

fn apply(f: XferFn, s: PremulRgba8, d: PremulRgba8) -> PremulRgba8 {
    f(Px4::dup_pm_color(s), Px4::dup_pm_color(d)).to_pixels()[0]
}

#[test]
fn opaque_red_over_opaque_green() {
    assert_eq!(apply(src_over, RED, GREEN), RED);
    assert_eq!(apply(modulate, RED, GREEN), [0, 0, 0, 255]);
    assert_eq!(apply(plus, RED, GREEN), [255, 255, 0, 255]);
}

#[test]
fn clear_src_dst() {
    assert_eq!(apply(clear, S, D), [0, 0, 0, 0]);
    assert_eq!(apply(src, S, D), S);
    assert_eq!(apply(dst, S, D), D);
}

#[test]
fn golden_values_for_translucent_operands() {
    let table: [(&str, XferFn, PremulRgba8); 19] = [
        ("src_over", src_over, [206, 59, 26, 235]),
        ("dst_over", dst_over, [105, 105, 120, 235]),
        ("src_in", src_in, [125, 25, 0, 125]),
        ("dst_in", dst_in, [23, 70, 94, 125]),
        ("src_out", src_out, [75, 15, 0, 75]),
        ("dst_out", dst_out, [6, 19, 26, 35]),
        ("src_atop", src_atop, [132, 45, 26, 160]),
        ("dst_atop", dst_atop, [98, 85, 94, 200]),
        ("xor", xor, [81, 34, 26, 109]),
        ("plus", plus, [230, 130, 120, 255]),
        ("modulate", modulate, [24, 14, 0, 125]),
        ("screen", screen, [206, 115, 120, 235]),
        ("multiply", multiply, [105, 48, 26, 235]),
        ("difference", difference, [182, 80, 120, 235]),
        ("exclusion", exclusion, [182, 102, 120, 235]),
        ("hard_light", hard_light, [206, 63, 26, 235]),
        ("overlay", overlay, [128, 72, 89, 235]),
        ("darken", darken, [105, 59, 26, 235]),
        ("lighten", lighten, [206, 105, 120, 235]),
    ];
    for (name, f, expected) in table {
        assert_eq!(apply(f, S, D), expected, "{name}");
    }
}

#[test]
fn approximate_modulate_is_not_symmetric_but_exact_modes_are() {
    // (x*y + x) >> 8 depends on operand order.
    assert_eq!(apply(modulate, D, S), [23, 14, 0, 125]);
    assert_eq!(apply(multiply, D, S), apply(multiply, S, D));
    assert_eq!(apply(xor, D, S), apply(xor, S, D));
}

#[test]
fn difference_of_opaque_self_cancels_color() {
    for px in [RED, GREEN, [17, 99, 254, 255], [255, 255, 255, 255]] {
        assert_eq!(apply(difference, px, px), [0, 0, 0, 255]);
    }
}

#[test]
fn hard_light_over_transparent_source_is_destination() {
    let d = [10, 20, 30, 40];
    assert_eq!(apply(hard_light, [0; 4], d), d);
    assert_eq!(apply(overlay, d, [0; 4]), d);
}

#[test]
fn darken_and_lighten_share_src_over_alpha() {
    let so = apply(src_over, S, D)[3];
    assert_eq!(apply(darken, S, D)[3], so);
    assert_eq!(apply(lighten, S, D)[3], so);
}

#[test]
fn lanes_are_independent() {
    let s = Px4::from_pixels([S, RED, [0; 4], GREEN]);
    let d = Px4::from_pixels([D, GREEN, D, [0; 4]]);
    let out = hard_light(s, d).to_pixels();
    assert_eq!(out[0], apply(hard_light, S, D));
    assert_eq!(out[1], apply(hard_light, RED, GREEN));
    assert_eq!(out[2], apply(hard_light, [0; 4], D));
    assert_eq!(out[3], apply(hard_light, GREEN, [0; 4]));
}
