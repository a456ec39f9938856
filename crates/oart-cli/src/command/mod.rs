use std::io;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use self::{
    aggregate::AggregateArg, compare::CompareArg, generate_events::GenerateEventsArg,
    generate_model::GenerateModelArg, reliability::ReliabilityArg, score::ScoreArg,
};

mod aggregate;
mod compare;
mod generate_events;
mod generate_model;
mod reliability;
mod score;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Score every pass with OART
    Score(#[clap(flatten)] ScoreArg),
    /// Aggregate OART per player
    Aggregate(#[clap(flatten)] AggregateArg),
    /// Estimate split-half reliability of player OART means
    Reliability(#[clap(flatten)] ReliabilityArg),
    /// Compare the risk tendency of two players
    Compare(#[clap(flatten)] CompareArg),
    /// Generate synthetic pass events
    GenerateEvents(#[clap(flatten)] GenerateEventsArg),
    /// Write a baseline logistic model artifact
    GenerateModel(#[clap(flatten)] GenerateModelArg),
}

fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.verbose)?;
    match args.mode {
        Mode::Score(arg) => score::run(&arg)?,
        Mode::Aggregate(arg) => aggregate::run(&arg)?,
        Mode::Reliability(arg) => reliability::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
        Mode::GenerateEvents(arg) => generate_events::run(&arg)?,
        Mode::GenerateModel(arg) => generate_model::run(&arg)?,
    }
    Ok(())
}
