use std::error::Error;

use clap::{Args, Subcommand};
use sweep_geom::{equivalent_radius, sphere_radius, sphere_volume};

#[derive(Args, Debug)]
pub struct GeomArgs {
    #[command(subcommand)]
    pub op: GeomOp,
}

#[derive(Subcommand, Debug)]
pub enum GeomOp {
    /// Volume of a ball of the given radius.
    Volume {
        #[arg(long)]
        dim: u32,
        #[arg(long)]
        radius: f64,
    },
    /// Radius of the ball enclosing the given volume.
    Radius {
        #[arg(long)]
        dim: u32,
        #[arg(long)]
        volume: f64,
    },
    /// Radius in `--to` dimensions with the same volume as `--radius` in `--from`.
    Equivalent {
        #[arg(long)]
        from: u32,
        #[arg(long)]
        radius: f64,
        #[arg(long)]
        to: u32,
    },
}

pub fn run(args: &GeomArgs) -> Result<(), Box<dyn Error>> {
    let value = match args.op {
        GeomOp::Volume { dim, radius } => sphere_volume(dim, radius),
        GeomOp::Radius { dim, volume } => sphere_radius(dim, volume),
        GeomOp::Equivalent { from, radius, to } => equivalent_radius(from, radius, to),
    };
    println!("{value}");
    Ok(())
}
