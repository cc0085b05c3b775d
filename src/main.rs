use clap::Parser;
use clap::error::ErrorKind;
use std::path::PathBuf;
use tracing::{Level, error};
use tracing_subscriber::FmtSubscriber;

use watermarker::OUTPUT_DIR;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the .png/.jpg images to watermark
    input_directory: Option<PathBuf>,

    /// Arguments after the input directory are accepted and ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    _rest: Vec<String>,

    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprintln!("{}", e);
            println!("Usage: watermarker <input_directory>");
            std::process::exit(1);
        }
    };

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let Some(input_dir) = cli.input_directory else {
        println!("Usage: watermarker <input_directory>");
        std::process::exit(1);
    };

    match watermarker::run(&input_dir, std::path::Path::new(OUTPUT_DIR)) {
        Ok(_) => Ok(()),
        Err(e) if e.is_invalid_input() => {
            eprintln!("Error: Input directory does not exist or is not a directory.");
            std::process::exit(1);
        }
        Err(e) => {
            error!("Batch aborted: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
