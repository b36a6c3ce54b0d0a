//! Read-only inspection of the actuals database: tables, schema, row count,
//! a row sample, and a per-account summary. Never writes anything.

use clap::Parser;
use fpa_pipeline::inspect;
use fpa_pipeline::Store;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "view-db",
    version,
    about = "Inspect the actuals SQLite database (read-only)"
)]
struct Args {
    /// SQLite database path
    #[arg(long, value_name = "FILE", default_value = "data/fpa.db")]
    db: PathBuf,

    /// Number of sample rows to print
    #[arg(long, value_name = "N", default_value_t = 10)]
    limit: usize,

    /// Emit the overview as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn run(args: &Args) -> fpa_pipeline::Result<String> {
    let store = Store::open_read_only(&args.db)?;
    let overview = inspect::overview(&store, args.limit)?;

    if args.json {
        Ok(serde_json::to_string_pretty(&overview)?)
    } else {
        Ok(inspect::render_text(&overview))
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Hint: run the pipeline first so {} exists", args.db.display());
            ExitCode::from(1)
        }
    }
}
