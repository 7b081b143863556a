use std::error::Error;
use std::process::Command;

use clap::Args;
use serde::Serialize;
use sweep_core::to_canonical_json_bytes;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit extended metadata including the launcher and lookup toolchain.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    presets: Vec<String>,
    sbt: String,
    rscript: String,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let info = VersionInfo {
        version: env!("CARGO_PKG_VERSION").into(),
        presets: sweep_plan::PRESET_NAMES.iter().map(|name| name.to_string()).collect(),
        sbt: probe("sbt", "--script-version").unwrap_or_else(|| "sbt unavailable".into()),
        rscript: probe("Rscript", "--version").unwrap_or_else(|| "Rscript unavailable".into()),
    };
    let json = to_canonical_json_bytes(&info)?;
    println!("{}", String::from_utf8(json)?);
    Ok(())
}

fn probe(program: &str, flag: &str) -> Option<String> {
    Command::new(program)
        .arg(flag)
        .output()
        .ok()
        .and_then(|out| {
            if out.status.success() {
                // Rscript reports its version on stderr
                let text = if out.stdout.is_empty() { out.stderr } else { out.stdout };
                Some(String::from_utf8_lossy(&text).trim().to_string())
            } else {
                None
            }
        })
}
