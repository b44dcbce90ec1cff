use std::fs;
use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use log::info;

mod ppm_writer;

use gifdoc::{DecodeMode, DecodeOptions, GifDocument, DEFAULT_MAX_PIXELS};

/// Print the header of a GIF and optionally dump one frame as a PPM image.
#[derive(argh::FromArgs)]
struct Arguments {
    /// path of the GIF to read
    #[argh(positional)]
    path: PathBuf,

    /// zero-based index of the frame to open
    #[argh(option, short = 'f', default = "0")]
    frame: usize,

    /// stop at the frame's image descriptor instead of decoding pixels
    #[argh(switch, short = 'H')]
    header_only: bool,

    /// refuse frames with more pixels than this, 0 disables the limit
    #[argh(option, short = 'd', default = "DEFAULT_MAX_PIXELS")]
    max_pixels: u64,

    /// write the decoded frame to this file as a plain PPM
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args: Arguments = argh::from_env();

    let bytes = fs::read(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    info!("read {} bytes from {}", bytes.len(), args.path.display());

    let mode = if args.header_only {
        DecodeMode::HeaderOnly
    } else {
        DecodeMode::Extended
    };
    let options = DecodeOptions::new()
        .with_mode(mode)
        .with_max_pixels((args.max_pixels != 0).then_some(args.max_pixels));

    let document = GifDocument::open(&bytes, args.frame, &options)
        .with_context(|| format!("failed to decode {}", args.path.display()))?;

    let header = document.header();
    println!("version: {:?}", header.version);
    println!("screen: {}x{}", header.width, header.height);
    println!("global color table: {:?}", header.global_color_table_size);
    println!("background color index: {}", header.background_color_index);
    println!("pixel aspect ratio: {}", header.pixel_aspect_ratio);
    println!("looks animated: {}", header.looks_animated);
    if let Some(loop_count) = document.loop_count() {
        println!("loop count: {:?}", loop_count);
    }

    let descriptor = document.descriptor();
    println!(
        "frame {}: {}x{} at ({}, {}), interlaced: {}, local color table: {:?}",
        document.frame_index(),
        descriptor.width,
        descriptor.height,
        descriptor.left_position,
        descriptor.top_position,
        descriptor.interlace_flag,
        descriptor.local_color_table_size,
    );
    if let Some(gce) = document.graphic_control() {
        println!(
            "delay: {}cs, disposal: {:?}, transparent index: {:?}",
            gce.delay_time,
            gce.disposal(),
            gce.transparent_index(),
        );
    }
    for comment in &document.frame().comments {
        println!("comment: {}", comment);
    }

    if let Some(output) = args.output {
        let Some(indexes) = document.pixel_indices() else {
            bail!("no pixel data to write, drop --header-only");
        };
        let color_table = document
            .active_color_table()
            .context("frame has neither a local nor a global color table")?;

        ppm_writer::write_ppm(&output, descriptor.width, descriptor.height, indexes, color_table)?;
        info!("wrote {}", output.display());
    }

    Ok(())
}
