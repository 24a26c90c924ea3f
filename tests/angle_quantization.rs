use minutiae::geometry::angle_from_vector;
use minutiae::lowlevel::{dequantize_byte_to_angle, quantize_angle_to_byte, DEGREES_PER_BUCKET};

fn circular_diff(a: u16, b: u16) -> f64 {
    let d = f64::from(a.abs_diff(b));
    d.min(360.0 - d)
}

#[test]
fn round_trip_error_stays_within_one_bucket() {
    for angle in 0u16..360 {
        let restored = dequantize_byte_to_angle(quantize_angle_to_byte(angle));
        assert!(restored < 360);
        assert!(
            circular_diff(angle, restored) <= DEGREES_PER_BUCKET,
            "angle {angle} came back as {restored}"
        );
    }
}

#[test]
fn exact_bucket_multiples_round_trip_exactly() {
    // 45 degrees is the smallest whole-degree multiple of 360/256.
    for angle in (0u16..360).step_by(45) {
        assert_eq!(dequantize_byte_to_angle(quantize_angle_to_byte(angle)), angle);
    }
}

#[test]
fn decoded_angles_reencode_to_the_same_byte() {
    for byte in 0u8..=255 {
        assert_eq!(quantize_angle_to_byte(dequantize_byte_to_angle(byte)), byte);
    }
}

#[test]
fn dragged_angles_are_normalized() {
    for step in 0..72 {
        let theta = f64::from(step) * 5.0_f64.to_radians();
        // Screen y grows downwards.
        let angle = angle_from_vector(10.0 * theta.cos(), -10.0 * theta.sin());
        assert!(angle < 360);
        assert_eq!(angle, (step * 5) as u16);
    }
}
