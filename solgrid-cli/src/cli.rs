mod dispatch;
mod energy;
mod profile;
mod ramp;
mod sizing;
mod system;
mod weather;

use clap::{Parser, Subcommand};

pub use self::{
    dispatch::DispatchArgs,
    energy::EnergyArgs,
    profile::ProfileArgs,
    ramp::RampArgs,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Estimate the power and energy production with the selected models.
    #[clap(name = "energy")]
    Energy(Box<EnergyArgs>),

    /// Ramp rates, worst-case swings, and the battery sized on the swing.
    #[clap(name = "ramp")]
    Ramp(Box<RampArgs>),

    /// Simulate a battery holding a day's output to smoothed targets.
    #[clap(name = "dispatch")]
    Dispatch(Box<DispatchArgs>),

    /// Monthly diurnal profile of the weather.
    #[clap(name = "profile")]
    Profile(Box<ProfileArgs>),
}
