use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::ValueEnum;
use order_sheet::load_config;
use order_sheet::NormalizedOrder;
use order_sheet::ReferenceData;
use order_sheet::Session;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(about = "Deduplicate a shipment export and build the warehouse print request.")]
struct Args {
    /// Shipment export (`.xlsx`, `.xlsm` or a `.json` array of rows).
    file: PathBuf,

    /// Configuration file (defaults to `order-sheet.toml` next to the binary).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Rows to keep checked, 1-based (default: all).
    #[arg(long, value_delimiter = ',')]
    select: Vec<usize>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    file: &'a str,
    selected: usize,
    orders: &'a [NormalizedOrder],
    print_url: Option<&'a str>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = load_config(args.config.as_deref())?;
    let reference = ReferenceData::try_from(config).context("Invalid configuration")?;
    let mut session = Session::new(reference);
    session
        .load_path(&args.file)
        .with_context(|| format!("Cannot load '{}'", args.file.display()))?;

    if !args.select.is_empty() {
        session.set_all(false);
        for row in &args.select {
            match row.checked_sub(1) {
                Some(index) if index < session.orders().len() => session.set(index, true),
                _ => tracing::warn!(row, "ignoring row outside the table"),
            }
        }
    }

    let selected = session.selected_count();
    let table = session.render();
    let print_url = session.process_selected().ok();

    match args.format {
        OutputFormat::Text => {
            print!("{table}");
            println!();
            match &print_url {
                Some(url) => println!("{url}"),
                None => println!("Select at least one order to print."),
            }
        }
        OutputFormat::Json => {
            let file = args.file.to_string_lossy().into_owned();
            let report = JsonReport {
                file: &file,
                selected,
                orders: session.orders(),
                print_url: print_url.as_ref().map(|url| url.as_str()),
            };
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer(&mut handle, &report)?;
            handle.write_all(b"\n")?;
        }
    }

    if print_url.is_none() {
        std::process::exit(1);
    }
    Ok(())
}

/// Logs go to stderr so stdout stays clean for the table and JSON report.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
