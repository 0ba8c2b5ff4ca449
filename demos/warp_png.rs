use std::fs;
use std::path::Path;

use fluidwarp::{EffectControls, OwnedRaster, RenderOpts, render_effect};

fn checkerboard(width: u32, height: u32) -> image::DynamicImage {
    image::DynamicImage::ImageRgba8(image::RgbaImage::from_fn(width, height, |x, y| {
        let on = ((x / 40) + (y / 40)) % 2 == 0;
        let shade = if on { 230 } else { 40 };
        image::Rgba([shade, (x * 255 / width) as u8, (y * 255 / height) as u8, 255])
    }))
}

// Usage: warp_png [input.png] [controls.json]
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let img = match args.next() {
        Some(path) => image::open(&path)?,
        None => checkerboard(640, 360),
    };
    let controls = match args.next() {
        Some(path) => EffectControls::from_json(&fs::read_to_string(path)?)?,
        None => EffectControls {
            intensity: 3.0,
            ..EffectControls::default()
        },
    };

    let src = OwnedRaster::from_dynamic(&img)?;
    let mut dst = OwnedRaster::new(src.depth(), src.bounds(), src.channels())?;
    let report = render_effect(
        &controls,
        0.5,
        src.as_raster_ref(),
        dst.as_raster_mut(),
        src.bounds(),
        &RenderOpts::default(),
    )?;
    eprintln!("{}", serde_json::to_string(&report)?);

    let out_dir = Path::new("target/warp_demo");
    fs::create_dir_all(out_dir)?;
    let out_path = out_dir.join("warped.png");
    dst.into_dynamic()?.save(&out_path)?;

    eprintln!("wrote {}", out_path.display());
    Ok(())
}
