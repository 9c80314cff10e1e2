use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(about = "A multi-threaded CPU ray tracer")]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON file with render settings; flags below override it
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub render: RenderArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Render settings shared by every scene.
#[derive(Args, Debug, Default)]
pub struct RenderArgs {
    /// Worker threads (defaults to the number of CPUs)
    #[arg(short = 't', long, global = true)]
    pub threads: Option<usize>,

    /// Samples per pixel
    #[arg(short = 's', long, global = true)]
    pub samples: Option<u32>,

    /// Bucket size in pixels (chosen from the image size when unset)
    #[arg(long, global = true)]
    pub bucket_size: Option<u32>,

    /// Seed for the anti-aliasing jitter
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Scale applied to colours before they are clamped
    #[arg(short, long, global = true)]
    pub exposure: Option<f32>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the falling spheres animation, one PNG per frame
    Spheres {
        /// Image width in pixels
        #[arg(long, default_value = "180")]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value = "135")]
        height: u32,

        /// Number of frames in the animation
        #[arg(long, default_value = "60")]
        frames: u32,

        /// First frame to render
        #[arg(long, default_value = "0")]
        start_frame: u32,

        /// Number of spheres
        #[arg(long, default_value = "20")]
        spheres: usize,

        /// Seed for sphere placement and colour
        #[arg(long, default_value = "0")]
        scene_seed: u64,

        /// Output path; the frame number is added before the extension
        #[arg(short, long, default_value = "spheres-falling.png")]
        output: PathBuf,
    },

    /// Render a single white sphere through an orthographic camera
    Sphere {
        /// Image width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Output path
        #[arg(short, long, default_value = "white-sphere-ortho.png")]
        output: PathBuf,
    },
}
