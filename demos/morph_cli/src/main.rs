use argh::FromArgs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use trimorph::image::{Image, ImageSize};
use trimorph::imgproc::crop::crop_image;
use trimorph::mesh::Point2;
use trimorph::morph::{auto_crop_bounds, MorphConfig, Morpher};

#[derive(FromArgs)]
/// Morph between two images along corresponding feature points
struct Args {
    /// path to the first image
    #[argh(option, short = 'a')]
    image1: PathBuf,

    /// path to the second image
    #[argh(option, short = 'b')]
    image2: PathBuf,

    /// path to a JSON file with the keys `points1` and `points2`
    #[argh(option, short = 'p')]
    points: PathBuf,

    /// directory the frames are written to
    #[argh(option, short = 'o')]
    output_dir: PathBuf,

    /// weight of the second image in the shared mesh
    #[argh(option, default = "0.5")]
    alpha: f32,

    /// number of frames to generate
    #[argh(option, default = "3")]
    steps: usize,

    /// crop the black margins of every frame
    #[argh(switch)]
    auto_crop: bool,
}

/// Point correspondences between the two images, as `[x, y]` pairs.
#[derive(Debug, Deserialize)]
struct Correspondences {
    points1: Vec<[f32; 2]>,
    points2: Vec<[f32; 2]>,
}

fn read_points(path: &Path) -> Result<(Vec<Point2>, Vec<Point2>), Box<dyn std::error::Error>> {
    let file = std::fs::File::open(path)?;
    let correspondences: Correspondences = serde_json::from_reader(std::io::BufReader::new(file))?;

    let points1 = correspondences.points1.into_iter().map(Point2::from).collect();
    let points2 = correspondences.points2.into_iter().map(Point2::from).collect();

    Ok((points1, points2))
}

fn read_image_rgb8(path: &Path) -> Result<Image<u8, 3>, Box<dyn std::error::Error>> {
    let img = image::open(path)?.to_rgb8();
    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };
    Ok(Image::new(size, img.into_raw())?)
}

fn write_image_rgb8(path: &Path, frame: Image<u8, 3>) -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = (frame.width() as u32, frame.height() as u32);
    let buffer = image::RgbImage::from_raw(width, height, frame.into_vec())
        .ok_or("frame buffer does not match its size")?;
    buffer.save(path)?;
    Ok(())
}

fn crop_margins(frame: Image<u8, 3>) -> Result<Image<u8, 3>, Box<dyn std::error::Error>> {
    let rect = auto_crop_bounds(&frame);
    if rect.is_empty() {
        return Ok(frame);
    }

    let mut cropped = Image::from_size_val(
        ImageSize {
            width: rect.width,
            height: rect.height,
        },
        0u8,
    )?;
    crop_image(&frame, &mut cropped, rect.x as usize, rect.y as usize)?;

    Ok(cropped)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let image1 = read_image_rgb8(&args.image1)?;
    let image2 = read_image_rgb8(&args.image2)?;
    let (points1, points2) = read_points(&args.points)?;

    log::info!(
        "morphing {:?} ({}x{}) into {:?} ({}x{}) with {} correspondences",
        args.image1,
        image1.width(),
        image1.height(),
        args.image2,
        image2.width(),
        image2.height(),
        points1.len()
    );

    // stop rendering frames on Ctrl-C
    let cancel_token = Arc::new(AtomicBool::new(false));
    ctrlc::set_handler({
        let cancel_token = cancel_token.clone();
        move || {
            println!("Received Ctrl-C signal. Sending cancel signal !!");
            cancel_token.store(true, Ordering::SeqCst);
        }
    })?;

    let morpher = Morpher::new(MorphConfig {
        alpha: args.alpha,
        steps: args.steps,
        ..Default::default()
    });

    let output = morpher.run_with_cancel(&image1, &image2, &points1, &points2, &cancel_token)?;

    log::info!(
        "canvas {}x{}, crop {:?}, {} points, {} triangles, skipped per frame {:?}",
        output.stats.canvas_size.width,
        output.stats.canvas_size.height,
        output.stats.crop,
        output.stats.num_points,
        output.stats.num_triangles,
        output.stats.skipped_triangles
    );

    std::fs::create_dir_all(&args.output_dir)?;

    for (k, frame) in output.frames.into_iter().enumerate() {
        let frame = if args.auto_crop {
            crop_margins(frame)?
        } else {
            frame
        };

        let path = args.output_dir.join(format!("frame_{k:03}.png"));
        log::debug!("writing {:?} ({}x{})", path, frame.width(), frame.height());
        write_image_rgb8(&path, frame)?;
    }

    println!("Finished writing frames to {:?}", args.output_dir);

    Ok(())
}
