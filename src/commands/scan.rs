use std::path::PathBuf;

use crate::cleanup::CleanupOrchestrator;
use crate::config::Config;
use crate::error::AppError;
use crate::format::format_bytes;
use crate::model::{ScanPlan, ScanRequest};
use crate::path::display_path;

pub struct ScanOptions {
    pub roots: Vec<PathBuf>,
    pub skip: Vec<PathBuf>,
    pub verbose: bool,
    pub json: bool,
}

pub fn execute_scan(options: ScanOptions) -> Result<ScanPlan, AppError> {
    let config = Config::load()?;
    let request = ScanRequest::new(&options.roots, &config.skip_paths(&options.skip)?);
    let plan = CleanupOrchestrator::new(config.layout()).plan(&request);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan, options.verbose);
    }
    Ok(plan)
}

fn print_plan(plan: &ScanPlan, verbose: bool) {
    println!("Scan results:");
    println!(
        "- {} project(s) found, {} with dependencies installed",
        plan.candidates,
        plan.items.len()
    );
    if verbose {
        for item in &plan.items {
            println!("    • {:<60} {}", display_path(&item.cache), format_bytes(item.size));
        }
    }
    println!("Total reclaimable: {}", format_bytes(plan.total_size()));
}
