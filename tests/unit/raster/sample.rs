use super::*;

#[test]
fn integer_narrowing_truncates_and_saturates() {
    assert_eq!(u8::from_f64(12.99), 12);
    assert_eq!(u8::from_f64(-3.0), 0);
    assert_eq!(u8::from_f64(300.0), 255);
    assert_eq!(u16::from_f64(65535.7), 65535);
    assert_eq!(u16::from_f64(1.5), 1);
}

#[test]
fn float_samples_pass_through() {
    assert_eq!(f32::from_f64(0.25), 0.25f32);
    assert_eq!(0.5f32.to_f64(), 0.5);
    assert_eq!(<f32 as Sample>::DEPTH, BitDepth::F32);
}

#[test]
fn white_points_per_depth() {
    assert_eq!(BitDepth::U8.white_point(), 255.0);
    assert_eq!(BitDepth::U16.white_point(), 65535.0);
    assert_eq!(BitDepth::F32.white_point(), 1.0);
    assert_eq!(BitDepth::U16.to_string(), "u16");
}

#[test]
fn only_one_three_or_four_channels() {
    for n in [1, 3, 4] {
        assert!(check_channels(n).is_ok());
    }
    for n in [0, 2, 5] {
        let err = check_channels(n).unwrap_err();
        assert!(err.is_unsupported(), "{n}: {err}");
    }
}

#[test]
fn only_bytes_expose_a_byte_view() {
    let bytes = [1u8, 2, 3];
    assert_eq!(u8::as_u8(&bytes), Some(&bytes[..]));
    assert!(u16::as_u8(&[1u16]).is_none());
    assert!(f32::as_u8_mut(&mut [0.5f32]).is_none());
}
