// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! One-shot benchmark run with optional export.

use std::path::{Path, PathBuf};

use asymbench_core::AlgorithmGroup;

use crate::commands::{build_session, print_result, print_summary};
use crate::export::{CsvExporter, JsonExporter};
use crate::GroupArg;

pub fn execute(
    config: Option<&Path>,
    family: Option<GroupArg>,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut session = build_session(config)?;

    let produced = match family {
        Some(group) => session.run_group(AlgorithmGroup::from(group)),
        None => session.run_all(),
    };

    for result in session.results() {
        print_result(result);
    }
    print_summary(session.results());
    println!();
    println!("Total results: {}", produced);

    if let Some(path) = csv {
        let mut exporter = CsvExporter::new(&path);
        session.export(&mut exporter)?;
        println!("CSV report written to {}", path.display());
    }

    if let Some(dir) = json {
        let mut exporter = JsonExporter::new(&dir)?;
        session.export(&mut exporter)?;
        if let Some(path) = exporter.last_written() {
            println!("JSON report written to {}", path.display());
        }
    }

    Ok(())
}
