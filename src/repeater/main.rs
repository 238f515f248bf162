// This is free and unencumbered software released into the public domain.

#[cfg(not(feature = "std"))]
compile_error!("ndcam-repeater requires the 'std' feature");

use asimov_module::SysexitsError::{self, *};
use clap::Parser;
use clientele::StandardOptions;
use ndcam::{
    cli::{self, parse_dimensions},
    shared::{CameraError, LensFacing},
};
use std::{
    error::Error as StdError,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

/// Opens one camera, binds an image reader as its output, and logs the
/// timestamps of the images that arrive.
#[derive(Debug, Parser)]
#[cfg_attr(not(all(feature = "android", target_os = "android")), allow(dead_code))]
struct Options {
    #[clap(flatten)]
    flags: StandardOptions,

    /// Table index of the camera (see ndcam-cataloger).
    #[arg(long, conflicts_with = "facing")]
    index: Option<u16>,

    /// Pick the first camera with this lens facing.
    #[arg(long, default_value = "back")]
    facing: LensFacing,

    #[arg(short, long, value_enum, default_value = "repeat")]
    mode: Mode,

    #[arg(short, long = "size", value_parser = parse_dimensions, default_value = "1920x1080")]
    size: (u32, u32),

    /// AImage format code; 35 is YUV_420_888.
    #[arg(long, default_value_t = 35)]
    format: i32,

    #[arg(long, default_value_t = 30)]
    max_images: i32,

    /// Number of images to acquire before stopping (repeat mode).
    #[arg(short = 'n', long, default_value_t = 100)]
    frames: u32,

    /// Delay between polls of the image reader, in milliseconds.
    #[arg(long, default_value_t = 30)]
    interval_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[cfg_attr(not(all(feature = "android", target_os = "android")), allow(dead_code))]
enum Mode {
    Repeat,
    Capture,
}

pub fn main() -> Result<SysexitsError, Box<dyn StdError>> {
    asimov_module::dotenv().ok();
    let args = asimov_module::args_os()?;
    let options = Options::parse_from(args);

    if options.flags.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(EX_OK);
    }

    if options.flags.license {
        print!("{}", include_str!("../../UNLICENSE"));
        return Ok(EX_OK);
    }

    #[cfg(feature = "tracing")]
    asimov_module::init_tracing_subscriber(&options.flags).expect("failed to initialize logging");

    let exit_code = match run_repeater(&options) {
        Ok(()) => EX_OK,
        Err(err) => cli::handle_error(&err, &options.flags),
    };

    Ok(exit_code)
}

fn run_repeater(opts: &Options) -> Result<(), CameraError> {
    cli::info_user(&opts.flags, "starting camera repeater");

    let quit = Arc::new(AtomicBool::new(false));
    {
        let quit2 = Arc::clone(&quit);
        ctrlc::set_handler(move || {
            quit2.store(true, Ordering::SeqCst);
        })
        .map_err(|e| CameraError::other(format!("{e}")))?;
    }

    #[cfg(all(feature = "android", target_os = "android"))]
    return android::run(opts, &quit);

    #[cfg(not(all(feature = "android", target_os = "android")))]
    Err(CameraError::NoDriver)
}

#[cfg(all(feature = "android", target_os = "android"))]
mod android {
    use super::{Mode, Options};
    use ndcam::{
        cli,
        shared::{
            CameraError, GroupConfig, PlatformCameraGroup,
            drivers::android::{ImageReader, MediaStatus},
        },
    };
    use std::{
        sync::atomic::{AtomicBool, Ordering},
        thread::sleep,
        time::Duration,
    };

    fn media(context: &'static str) -> impl Fn(MediaStatus) -> CameraError {
        move |status| CameraError::other(format!("{context} failed: {status}"))
    }

    pub fn run(opts: &Options, quit: &AtomicBool) -> Result<(), CameraError> {
        // The reader and its window must outlive the group's session.
        let reader = ImageReader::new(opts.size, opts.format, opts.max_images)
            .map_err(media("AImageReader_new"))?;
        let window = reader.window().map_err(media("AImageReader_getWindow"))?;
        let mut group = ndcam::shared::open(GroupConfig::default())?;

        let index = select_device(&group, opts)?;
        cli::info_user(&opts.flags, &format!("selected camera index {index}"));

        group.open_device(index)?;
        match opts.mode {
            Mode::Repeat => group.start_repeat(index, &window)?,
            Mode::Capture => group.start_capture(index, &window)?,
        }

        let wanted = match opts.mode {
            Mode::Repeat => opts.frames.max(1),
            Mode::Capture => 1,
        };
        let max_polls = wanted.saturating_mul(10).max(100);
        let interval = Duration::from_millis(opts.interval_ms);

        let (mut acquired, mut polls) = (0u32, 0u32);
        while acquired < wanted && polls < max_polls && !quit.load(Ordering::SeqCst) {
            sleep(interval);
            polls += 1;

            let events = group.pump_events();
            if !group.is_open(index) {
                return match events.into_iter().find(|event| event.invalidates_device()) {
                    Some(event) => Err(CameraError::other(format!("camera lost: {event:?}"))),
                    None => Err(CameraError::other("camera lost")),
                };
            }

            match reader.acquire_next_image() {
                Ok(Some(image)) => {
                    acquired += 1;
                    let timestamp = image.timestamp().unwrap_or_default();
                    let (width, height) = image.dimensions().unwrap_or_default();
                    println!(
                        "format {} width {} height {} timestamp {}",
                        image.format().unwrap_or_default(),
                        width,
                        height,
                        timestamp
                    );
                },
                Ok(None) => {},
                Err(status) => {
                    cli::warn_user(&opts.flags, &format!("AImageReader_acquireNextImage: {status}"))
                },
            }
        }

        match opts.mode {
            Mode::Repeat => group.stop_repeat(index)?,
            Mode::Capture => group.stop_capture(index)?,
        }
        group.close_device(index)?;

        cli::info_user(
            &opts.flags,
            &format!("acquired {acquired} images in {polls} polls"),
        );
        if acquired == 0 {
            return Err(CameraError::other("no image was delivered"));
        }
        Ok(())
    }

    fn select_device(group: &PlatformCameraGroup, opts: &Options) -> Result<u16, CameraError> {
        if let Some(index) = opts.index {
            if (index as usize) >= group.device_count() {
                return Err(CameraError::InvalidDevice(index));
            }
            return Ok(index);
        }
        group
            .devices()
            .into_iter()
            .find(|d| d.facing == Some(opts.facing))
            .map(|d| d.index)
            .ok_or(CameraError::NoCamera)
    }
}
