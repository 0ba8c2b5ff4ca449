use super::*;

#[test]
fn rgba8_image_keeps_samples() {
    let img = image::RgbaImage::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    let buf = RasterBuf::from_image(&img).unwrap();
    assert_eq!(buf.channels(), 4);
    assert_eq!(buf.bounds(), RectI::from_size(2, 1));
    assert_eq!(buf.get(1, 0), Some(&[5u8, 6, 7, 8][..]));
    let back: image::RgbaImage = buf.to_image().unwrap();
    assert_eq!(back, img);
}

#[test]
fn to_image_rejects_channel_mismatch() {
    let buf = RasterBuf::<u8>::new(RectI::from_size(2, 2), 3).unwrap();
    assert!(buf.to_image::<Rgba<u8>>().is_err());
    assert!(buf.to_image::<Rgb<u8>>().is_ok());
}

#[test]
fn dynamic_images_keep_their_depth() {
    let luma16 = DynamicImage::ImageLuma16(ImageBuffer::from_raw(1, 1, vec![500u16]).unwrap());
    let raster = OwnedRaster::from_dynamic(&luma16).unwrap();
    assert_eq!(raster.depth(), BitDepth::U16);
    assert_eq!(raster.channels(), 1);

    let la8 = DynamicImage::ImageLumaA8(ImageBuffer::from_raw(1, 1, vec![10u8, 20]).unwrap());
    let raster = OwnedRaster::from_dynamic(&la8).unwrap();
    assert_eq!(raster.channels(), 4);
    match &raster {
        OwnedRaster::U8(b) => assert_eq!(b.data(), &[10, 10, 10, 20]),
        other => panic!("unexpected depth {:?}", other.depth()),
    }
}

#[test]
fn round_trip_through_dynamic_image() {
    let img = DynamicImage::ImageRgb32F(
        ImageBuffer::from_raw(2, 1, vec![0.0f32, 0.5, 1.0, 0.25, 0.75, 0.125]).unwrap(),
    );
    let raster = OwnedRaster::from_dynamic(&img).unwrap();
    assert_eq!(raster.as_raster_ref().depth(), BitDepth::F32);
    assert_eq!(raster.clone().into_dynamic().unwrap(), img);
}

#[test]
fn single_channel_float_has_no_dynamic_form() {
    let raster = OwnedRaster::new(BitDepth::F32, RectI::from_size(1, 1), 1).unwrap();
    assert!(raster.into_dynamic().unwrap_err().is_unsupported());
}
