// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! Interactive menu session.
//!
//! Mirrors the classic operator loop: run one group or everything,
//! export, reconfigure the resource budget, clear results, exit. The
//! session (and with it the key material cache) lives for the whole
//! loop.

use std::io::{self, BufRead, Write};
use std::path::Path;

use asymbench_core::{AlgorithmGroup, BenchError, ExportError};

use crate::commands::{build_session, print_result, print_summary, Session};
use crate::export::{CsvExporter, JsonExporter};

pub fn execute(config: Option<&Path>) -> anyhow::Result<()> {
    let mut session = build_session(config)?;
    print_config(&session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!();
        println!("Choose an option:");
        println!("1. Curve25519/Ed25519 benchmark");
        println!("2. NIST curves (P-256/P-384/P-521) benchmark");
        println!("3. RSA benchmark");
        println!("4. Complete benchmark (all algorithms)");
        println!("5. Export results to CSV");
        println!("6. Export results to JSON");
        println!("7. Configure CPU cores and memory limit");
        println!("8. Clear previous results");
        println!("0. Exit");
        print!("\nOption: ");
        io::stdout().flush().ok();

        let Some(Ok(line)) = lines.next() else {
            break;
        };

        match line.trim() {
            "1" => run_group(&mut session, AlgorithmGroup::Curve25519),
            "2" => run_group(&mut session, AlgorithmGroup::NistCurves),
            "3" => run_group(&mut session, AlgorithmGroup::Rsa),
            "4" => {
                let before = session.results().len();
                session.run_all();
                print_new_results(&session, before);
            }
            "5" => export_csv(&session),
            "6" => export_json(&session),
            "7" => configure(&mut session, &mut lines),
            "8" => {
                session.clear_results();
                println!("Results cleared.");
            }
            "0" => break,
            _ => println!("Invalid option, try again."),
        }
    }

    Ok(())
}

fn run_group(session: &mut Session, group: AlgorithmGroup) {
    let before = session.results().len();
    session.run_group(group);
    print_new_results(session, before);
}

fn print_new_results(session: &Session, before: usize) {
    for result in &session.results()[before..] {
        print_result(result);
    }
    print_summary(session.results());
    println!();
    println!(
        "Results added: {} (total {})",
        session.results().len() - before,
        session.results().len()
    );
}

fn export_csv(session: &Session) {
    let filename = CsvExporter::default_filename(&session.metadata());
    let mut exporter = CsvExporter::new(&filename);
    match session.export(&mut exporter) {
        Ok(()) => {
            println!("Results exported to {}", filename);
            println!("Total results exported: {}", session.results().len());
        }
        Err(e) => report_export_error(e),
    }
}

fn export_json(session: &Session) {
    let mut exporter = match JsonExporter::new("data") {
        Ok(exporter) => exporter,
        Err(e) => {
            println!("Export failed: {}", e);
            return;
        }
    };
    match session.export(&mut exporter) {
        Ok(()) => {
            if let Some(path) = exporter.last_written() {
                println!("Results exported to {}", path.display());
            }
        }
        Err(e) => report_export_error(e),
    }
}

fn report_export_error(error: BenchError) {
    match error {
        BenchError::Export(ExportError::NoResults) => {
            println!("No results to export. Run some benchmarks first.");
        }
        other => println!("Export failed: {}", other),
    }
}

fn configure<I>(session: &mut Session, lines: &mut I)
where
    I: Iterator<Item = io::Result<String>>,
{
    println!("===== Resource Configuration =====");
    println!("Current cores: {}", session.use_cores());
    match session.memory_limit_mb() {
        Some(limit) => println!("Current memory limit: {} MB", limit),
        None => println!("Current memory limit: none"),
    }

    print!("Number of cores to use (Enter to keep current): ");
    io::stdout().flush().ok();
    let cores_line = match lines.next() {
        Some(Ok(line)) => line,
        _ => return,
    };
    let cores = if cores_line.trim().is_empty() {
        session.use_cores()
    } else {
        match cores_line.trim().parse::<u32>() {
            Ok(value) => value,
            Err(_) => {
                println!("Invalid input. Keeping previous settings.");
                return;
            }
        }
    };

    print!("Memory limit in MB (Enter for no limit): ");
    io::stdout().flush().ok();
    let memory_line = match lines.next() {
        Some(Ok(line)) => line,
        _ => return,
    };
    let memory_limit = if memory_line.trim().is_empty() {
        None
    } else {
        match memory_line.trim().parse::<u64>() {
            Ok(value) => Some(value),
            Err(_) => {
                println!("Invalid input. Keeping previous settings.");
                return;
            }
        }
    };

    match session.configure(cores, memory_limit) {
        Ok(()) => {
            println!("Resource budget updated. Baseline re-captured.");
            print_config(session);
        }
        Err(e) => println!("{} Previous settings kept.", e),
    }
}

fn print_config(session: &Session) {
    let settings = session.settings();
    println!();
    println!("Benchmark configuration:");
    println!("- Using {} CPU cores", session.use_cores());
    println!("- Operation timeout: {} seconds", settings.timeout_seconds);
    println!("- Test payload size: {} MB", settings.test_data_size_mb);
    if let Some(limit) = session.memory_limit_mb() {
        println!("- Memory limit: {} MB", limit);
    }
    println!("- Baseline memory: {:.4} MB", session.baseline_memory_mb());
    println!("- Baseline CPU: {:.4}%", session.baseline_cpu_percent());
}
