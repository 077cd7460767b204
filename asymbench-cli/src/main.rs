// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! Asymbench CLI
//!
//! Command-line interface for the asymbench benchmark harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use asymbench_core::AlgorithmGroup;

mod commands;
mod export;

/// Asymbench - asymmetric cryptography benchmark harness
#[derive(Parser)]
#[command(name = "asymbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file path (defaults are used when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run benchmark suites and optionally export the results
    Run {
        /// Algorithm group to benchmark (all groups when omitted)
        #[arg(short, long)]
        family: Option<GroupArg>,

        /// Write a CSV report to this path
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write a JSON report into this directory
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Interactive menu session
    Menu,

    /// Print system information and the effective benchmark settings
    Info,

    /// Validate a settings file
    Validate {
        /// Path to the settings file
        file: PathBuf,
    },
}

/// CLI-facing algorithm group names.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GroupArg {
    Curve25519,
    Nist,
    Rsa,
}

impl From<GroupArg> for AlgorithmGroup {
    fn from(arg: GroupArg) -> Self {
        match arg {
            GroupArg::Curve25519 => AlgorithmGroup::Curve25519,
            GroupArg::Nist => AlgorithmGroup::NistCurves,
            GroupArg::Rsa => AlgorithmGroup::Rsa,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Run { family, csv, json } => {
            commands::run::execute(cli.config.as_deref(), family, csv, json)
        }
        Commands::Menu => commands::menu::execute(cli.config.as_deref()),
        Commands::Info => commands::info::execute(cli.config.as_deref()),
        Commands::Validate { file } => commands::validate::execute(&file),
    }
}
