// This is free and unencumbered software released into the public domain.

#[cfg(not(feature = "std"))]
compile_error!("ndcam-cataloger requires the 'std' feature");

use asimov_module::SysexitsError::{self, *};
use clap::Parser;
use clientele::StandardOptions;
use ndcam::{cli, shared::CameraError};
use serde_json::json;
use std::error::Error as StdError;

/// Lists the cameras of this device with their table index and lens facing.
#[derive(Debug, Parser)]
struct Options {
    #[clap(flatten)]
    flags: StandardOptions,

    #[arg(
        value_name = "FORMAT",
        short = 'o',
        long = "output",
        value_enum,
        default_value = "text"
    )]
    output: OutputFormat,
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Jsonl,
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

    let exit_code = match run_cataloger(&options) {
        Ok(()) => EX_OK,
        Err(err) => cli::handle_error(&err, &options.flags),
    };

    Ok(exit_code)
}

fn run_cataloger(options: &Options) -> Result<(), CameraError> {
    let devices = cli::list_devices(&options.flags)?;
    if devices.is_empty() {
        cli::warn_user(&options.flags, "no camera devices found");
        return Ok(());
    }

    for d in devices {
        let facing = d
            .facing
            .map(|f| f.to_string())
            .unwrap_or_else(|| "unknown".into());
        match options.output {
            OutputFormat::Text => {
                println!("{}: {} [{}]", d.index, d.id, facing);
            },
            OutputFormat::Jsonl => {
                println!("{}", json!({ "index": d.index, "id": d.id, "facing": facing }));
            },
        }
    }

    Ok(())
}
