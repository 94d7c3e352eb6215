use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

/// Append the center of mass of every step of an XYZ trajectory as an extra `X` atom.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input trajectory (xyz).
    #[arg(long, default_value = "micelle.xyz")]
    xyz: PathBuf,

    /// Center of mass coordinates, one `x y z` line per step.
    #[arg(long, default_value = "com.dat")]
    com: PathBuf,

    /// Output path (xyz).
    #[arg(short, long, default_value = "micelle_with_com.xyz")]
    output: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match xyzmerge::merge_files(&args.xyz, &args.com, &args.output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
