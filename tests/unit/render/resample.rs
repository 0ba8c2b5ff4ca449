use super::*;
use crate::raster::buffer::RasterBuf;

fn grid(w: u32, h: u32) -> RasterBuf<u8> {
    RasterBuf::from_fn(RectI::from_size(w, h), 1, |x, y, _| (y * 10 + x) as u8).unwrap()
}

#[test]
fn integer_coordinates_copy_exactly() {
    let src = grid(4, 4);
    let v = src.view();
    for y in 0..4 {
        for x in 0..4 {
            let px: [u8; 1] = sample(&v, Point::new(f64::from(x), f64::from(y)), x, y, 0.0);
            assert_eq!(px, [(y * 10 + x) as u8]);
        }
    }
}

#[test]
fn integer_coordinates_keep_float_bits() {
    let src = RasterBuf::from_vec(
        vec![-0.0f32, 1.0, 2.0, 3.0, 0.5, 0.25, -7.5, 1e-30, 9.0],
        RectI::from_size(3, 3),
        1,
    )
    .unwrap();
    let px: [f32; 1] = sample(&src.view(), Point::new(0.0, 0.0), 0, 0, 0.0);
    assert_eq!(px[0].to_bits(), (-0.0f32).to_bits());
}

#[test]
fn bilinear_blends_and_truncates() {
    let src = RasterBuf::from_vec(vec![0u8, 100, 0, 50, 150, 0, 0, 0, 0], RectI::from_size(3, 3), 1)
        .unwrap();
    let px: [u8; 1] = sample(&src.view(), Point::new(0.5, 0.5), 0, 0, 0.0);
    assert_eq!(px, [75]);

    let src = RasterBuf::from_vec(vec![10u8, 13, 0, 10, 13, 0, 0, 0, 0], RectI::from_size(3, 3), 1)
        .unwrap();
    let px: [u8; 1] = sample(&src.view(), Point::new(0.25, 0.0), 0, 0, 0.0);
    assert_eq!(px, [10]);
}

#[test]
fn channels_are_independent() {
    let src = RasterBuf::from_fn(RectI::from_size(3, 3), 3, |x, _, c| (x * 20 + c as i32) as u8)
        .unwrap();
    let px: [u8; 3] = sample(&src.view(), Point::new(0.5, 1.0), 0, 0, 0.0);
    assert_eq!(px, [10, 11, 12]);
}

#[test]
fn last_column_and_row_use_nearest() {
    let src = grid(3, 3);
    let px: [u8; 1] = sample(&src.view(), Point::new(2.7, 1.2), 0, 0, 0.0);
    assert_eq!(px, [12]);
    let px: [u8; 1] = sample(&src.view(), Point::new(0.9, 2.4), 0, 0, 0.0);
    assert_eq!(px, [20]);
}

#[test]
fn outside_source_copies_destination_pixel() {
    let src = grid(3, 3);
    let px: [u8; 1] = sample(&src.view(), Point::new(-4.0, 7.5), 1, 2, 0.0);
    assert_eq!(px, [21]);
}

#[test]
fn outside_source_and_destination_clamps() {
    let src = grid(3, 3);
    let px: [u8; 1] = sample(&src.view(), Point::new(-4.0, 7.5), -1, 9, 0.0);
    assert_eq!(px, [20]);
    let px: [u8; 1] = sample(&src.view(), Point::new(1.5, -3.0), 5, 5, 0.0);
    assert_eq!(px, [1]);
}

#[test]
fn non_finite_coordinates_take_the_fallback() {
    let src = grid(3, 3);
    let px: [u8; 1] = sample(&src.view(), Point::new(f64::NAN, 1.0), 2, 2, 0.0);
    assert_eq!(px, [22]);
    let px: [u8; 1] = sample(&src.view(), Point::new(f64::INFINITY, f64::NAN), 10, 10, 0.0);
    assert_eq!(px, [2]);
}

#[test]
fn out_of_bounds_results_are_source_pixels() {
    let src = RasterBuf::from_fn(RectI::new(-3, 4, 5, 9), 1, |x, y, _| (x * 7 + y * 13 + 60) as u8)
        .unwrap();
    let v = src.view();
    let values: Vec<u8> = src.data().to_vec();
    for (cx, cy) in [(-100.0, 0.0), (0.0, 100.0), (50.5, 50.5), (-3.5, 3.9), (5.0, 6.0)] {
        let px: [u8; 1] = sample(&v, Point::new(cx, cy), 1000, 1000, 0.0);
        assert!(values.contains(&px[0]), "({cx}, {cy}) -> {}", px[0]);
    }
}

#[test]
fn diffusion_averages_taps_on_a_ramp() {
    let src = RasterBuf::from_fn(RectI::from_size(20, 20), 1, |x, _, _| x as f32).unwrap();
    let coord = Point::new(10.3, 10.6);
    let plain: [f32; 1] = sample(&src.view(), coord, 0, 0, DIFFUSION_THRESHOLD);
    assert!((plain[0] - 10.3).abs() < 1e-5);
    let blurred: [f32; 1] = sample(&src.view(), coord, 0, 0, 0.5);
    assert!((blurred[0] - (10.3 - 0.15)).abs() < 1e-5, "{}", blurred[0]);
}

#[test]
fn diffusion_keeps_flat_regions_flat() {
    let src = RasterBuf::from_fn(RectI::from_size(8, 8), 4, |_, _, c| 0.25 * c as f32).unwrap();
    let px: [f32; 4] = sample(&src.view(), Point::new(3.5, 3.5), 0, 0, 0.9);
    for (c, v) in px.iter().enumerate() {
        assert!((v - 0.25 * c as f32).abs() < 1e-6, "channel {c}: {v}");
    }
}

#[test]
fn empty_source_yields_default_samples() {
    let src = RasterBuf::<u8>::new(RectI::new(0, 0, 0, 0), 4).unwrap();
    let px: [u8; 4] = sample(&src.view(), Point::new(1.0, 1.0), 0, 0, 0.0);
    assert_eq!(px, [0; 4]);
}
