use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kira-qscore",
    version,
    about = "Q-score histogram plot data from Illumina run metrics"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the Q-score histogram of a metric dump
    Histogram(HistogramArgs),
}

#[derive(Parser)]
pub struct HistogramArgs {
    /// Metric dump, plain or gzip compressed
    pub metrics: PathBuf,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub lane: Option<u32>,

    #[arg(long)]
    pub tile: Option<u32>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub surface: Option<u32>,

    /// 1-based read number
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub read: Option<u32>,

    /// Keep cycles up to and including this one
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub cycle: Option<u32>,
}
