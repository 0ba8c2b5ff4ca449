use super::*;

fn ramp(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

#[test]
fn packed_view_addresses_pixels_relative_to_bounds() {
    let data = ramp(4 * 3 * 3);
    let v = RasterView::new(&data, RectI::new(10, 20, 14, 23), 3).unwrap();
    assert_eq!(v.row_stride(), 12);
    assert_eq!(v.pixel(10, 20), &[0, 1, 2]);
    assert_eq!(v.pixel(11, 21), &[15, 16, 17]);
    assert_eq!(v.row(22).len(), 12);
    assert_eq!(v.row(22)[0], 24);
    assert!(v.get(14, 20).is_none());
    assert!(v.get(9, 20).is_none());
    assert_eq!(v.depth(), BitDepth::U8);
}

#[test]
fn padded_rows_skip_the_padding() {
    let data = ramp(5 * 2 + 2);
    let v = RasterView::with_stride(&data, RectI::from_size(2, 3), 1, 5).unwrap();
    assert_eq!(v.pixel(1, 1), &[6]);
    assert_eq!(v.pixel(0, 2), &[10]);
}

#[test]
fn short_buffers_are_rejected() {
    let data = vec![0u16; 11];
    let err = RasterView::new(&data, RectI::from_size(4, 3), 1).unwrap_err();
    assert!(err.to_string().contains("need 12"), "{err}");
}

#[test]
fn stride_shorter_than_row_is_rejected() {
    let data = vec![0.0f32; 64];
    let err = RasterView::with_stride(&data, RectI::from_size(4, 2), 4, 15).unwrap_err();
    assert!(err.to_string().starts_with("validation error"), "{err}");
}

#[test]
fn inverted_bounds_are_rejected() {
    let data = vec![0u8; 16];
    assert!(RasterView::new(&data, RectI::new(4, 0, 0, 4), 1).is_err());
}

#[test]
fn absurd_channel_counts_are_unsupported() {
    let data = vec![0u8; 16];
    let err = RasterView::new(&data, RectI::from_size(4, 4), usize::MAX).unwrap_err();
    assert!(err.is_unsupported(), "{err}");

    let mut out = vec![0u8; 16];
    let err = RasterViewMut::new(&mut out, RectI::from_size(4, 4), usize::MAX / 2).unwrap_err();
    assert!(err.is_unsupported(), "{err}");
}

#[test]
fn empty_bounds_need_no_samples() {
    let data: Vec<u8> = Vec::new();
    let v = RasterView::new(&data, RectI::new(3, 3, 3, 9), 4).unwrap();
    assert!(v.bounds().is_empty());
}

#[test]
#[should_panic(expected = "outside raster bounds")]
fn pixel_outside_bounds_panics() {
    let data = vec![0u8; 4];
    let v = RasterView::new(&data, RectI::from_size(2, 2), 1).unwrap();
    let _ = v.pixel(2, 0);
}

#[test]
fn mutable_view_writes_through() {
    let mut data = vec![0u8; 3 * 2 * 4];
    let mut v = RasterViewMut::new(&mut data, RectI::new(1, 1, 4, 3), 4).unwrap();
    v.pixel_mut(2, 2).copy_from_slice(&[9, 8, 7, 6]);
    v.row_mut(1)[0] = 5;
    assert_eq!(v.as_view().pixel(2, 2), &[9, 8, 7, 6]);
    drop(v);
    assert_eq!(data[0], 5);
    assert_eq!(&data[16..20], &[9, 8, 7, 6]);
}

#[test]
fn split_rows_yields_disjoint_strips() {
    let mut data = vec![0u8; 4 * 7];
    let v = RasterViewMut::new(&mut data, RectI::new(0, 10, 4, 17), 1).unwrap();
    let strips = v.split_rows(&[(11, 13), (13, 14), (14, 17)]);
    assert_eq!(strips.len(), 3);
    assert_eq!(strips[0].bounds(), RectI::new(0, 11, 4, 13));
    assert_eq!(strips[2].bounds(), RectI::new(0, 14, 4, 17));
    for (i, mut s) in strips.into_iter().enumerate() {
        let b = s.bounds();
        for y in b.y1..b.y2 {
            for x in b.x1..b.x2 {
                s.pixel_mut(x, y)[0] = i as u8 + 1;
            }
        }
    }
    assert_eq!(&data[0..4], &[0, 0, 0, 0]);
    assert_eq!(&data[4..12], &[1; 8]);
    assert_eq!(&data[12..16], &[2; 4]);
    assert_eq!(&data[16..28], &[3; 12]);
}

#[test]
fn split_rows_handles_unpadded_last_row() {
    let mut data = vec![0u8; 6 * 2 + 3];
    let v = RasterViewMut::with_stride(&mut data, RectI::from_size(3, 3), 1, 6).unwrap();
    let mut strips = v.split_rows(&[(0, 2), (2, 3)]);
    strips[1].pixel_mut(2, 2)[0] = 42;
    strips[0].pixel_mut(0, 1)[0] = 7;
    drop(strips);
    assert_eq!(data[14], 42);
    assert_eq!(data[6], 7);
}

#[test]
fn tagged_views_report_their_layout() {
    let data = vec![0u16; 2 * 2 * 3];
    let r: RasterRef<'_> = RasterView::new(&data, RectI::from_size(2, 2), 3)
        .unwrap()
        .into();
    assert_eq!(r.depth(), BitDepth::U16);
    assert_eq!(r.channels(), 3);
    assert_eq!(r.bounds(), RectI::from_size(2, 2));

    let mut out = vec![0.0f32; 4];
    let m: RasterMut<'_> = RasterViewMut::new(&mut out, RectI::from_size(4, 1), 1)
        .unwrap()
        .into();
    assert_eq!(m.depth(), BitDepth::F32);
    assert_eq!(m.bounds().width(), 4);
}
