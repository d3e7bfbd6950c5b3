use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, ValueEnum};

use forensic_report::{PageSize, ReportConfig};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PageSizeArg {
    A4,
    Letter,
}

/// Compose a paginated forensic evidence report (PDF) from a JSON request.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Report request JSON (query metadata, selected results, options)
    input: PathBuf,

    /// Directory the report is written into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Date used in the file name (YYYY-MM-DD); defaults to today (UTC)
    #[arg(long, env = "FORENSIC_REPORT_DATE")]
    date: Option<NaiveDate>,

    #[arg(long, value_enum, default_value = "a4")]
    page_size: PageSizeArg,

    /// Include the timeline section
    #[arg(long, conflicts_with = "no_timeline")]
    timeline: bool,

    /// Leave out the timeline section
    #[arg(long)]
    no_timeline: bool,

    /// Include the raw data dump section
    #[arg(long)]
    raw_dump: bool,

    /// Write uncompressed content streams
    #[arg(long)]
    uncompressed: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut request = match forensic_report::load_request(&cli.input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.timeline {
        request.options.include_timeline = true;
    }
    if cli.no_timeline {
        request.options.include_timeline = false;
    }
    if cli.raw_dump {
        request.options.include_raw_dump = true;
    }
    if request.generated_at.is_empty() {
        request.generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    }

    let config = ReportConfig {
        page_size: match cli.page_size {
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::Letter => PageSize::Letter,
        },
        compress_streams: !cli.uncompressed,
        ..ReportConfig::default()
    };
    let date = cli.date.unwrap_or_else(|| Utc::now().date_naive());

    match forensic_report::save_report(&request, &config, &cli.out_dir, date) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
