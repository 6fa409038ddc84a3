#![allow(clippy::doc_markdown)]
#![doc = include_str!("../../README.md")]

mod advisor;
mod cli;
mod core;
mod ingest;
mod prelude;
mod statistics;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Energy(args) => args.run()?,
        Command::Ramp(args) => args.run()?,
        Command::Dispatch(args) => args.run()?,
        Command::Profile(args) => args.run()?,
    }

    info!("done!");
    Ok(())
}
