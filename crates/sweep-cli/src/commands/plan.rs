use std::error::Error;
use std::io::{self, Write};

use clap::{Args, ValueEnum};
use sweep_core::to_canonical_json_bytes;

use super::source::{generate, PlanSource};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TupleFormat {
    /// One JSON object per line.
    Json,
    /// CSV with a header row.
    Csv,
    /// The benchmark task lines.
    Task,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub source: PlanSource,
    /// Output format.
    #[arg(long, value_enum, default_value_t = TupleFormat::Json)]
    pub format: TupleFormat,
    /// Print the resolved plan as YAML instead of its tuples.
    #[arg(long)]
    pub show: bool,
}

pub fn run(args: &PlanArgs) -> Result<(), Box<dyn Error>> {
    let plan = args.source.load()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.show {
        write!(out, "{}", plan.to_yaml_string()?)?;
        return Ok(());
    }
    let tuples = generate(&plan)?;
    match args.format {
        TupleFormat::Json => {
            for tuple in &tuples {
                out.write_all(&to_canonical_json_bytes(tuple)?)?;
                writeln!(out)?;
            }
        }
        TupleFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for tuple in &tuples {
                writer.serialize(tuple)?;
            }
            writer.flush()?;
        }
        TupleFormat::Task => {
            for tuple in &tuples {
                writeln!(out, "{} {}", plan.invoker.task, tuple)?;
            }
        }
    }
    Ok(())
}
