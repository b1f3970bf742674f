use std::io::{self, Write};
use std::path::PathBuf;

use crate::cleanup::CleanupOrchestrator;
use crate::config::Config;
use crate::error::AppError;
use crate::format::format_bytes;
use crate::model::{RunSummary, ScanPlan, ScanRequest};
use crate::path::display_path;
use crate::progress::CleanupProgress;

pub struct RunOptions {
    pub roots: Vec<PathBuf>,
    pub skip: Vec<PathBuf>,
    pub verbose: bool,
    pub assume_yes: bool,
    pub json: bool,
}

pub fn execute_run(options: RunOptions) -> Result<RunSummary, AppError> {
    let config = Config::load()?;
    let request = ScanRequest::new(&options.roots, &config.skip_paths(&options.skip)?);
    let orchestrator = CleanupOrchestrator::new(config.layout());
    let candidates = orchestrator.candidates(&request);

    // With --json, stdout carries only the summary document.
    let mut out: Box<dyn Write> =
        if options.json { Box::new(io::stderr()) } else { Box::new(io::stdout()) };

    if !options.assume_yes {
        let plan = orchestrator.plan_for(&candidates);
        if plan.is_empty() {
            writeln!(out, "Nothing to delete. No installed dependencies were found.")?;
            return finish(RunSummary::default(), &options);
        }

        print_plan(&mut out, &plan, options.verbose)?;
        if !confirm_deletion(&mut out, plan.total_size())? {
            writeln!(out, "Aborted. No files were deleted.")?;
            return finish(RunSummary::default(), &options);
        }
    }

    let progress = CleanupProgress::new();
    let summary = orchestrator.execute(&candidates, |event| progress.update(event));
    progress.finish();

    finish(summary, &options)
}

fn finish(summary: RunSummary, options: &RunOptions) -> Result<RunSummary, AppError> {
    if options.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary, options.verbose);
    }
    Ok(summary)
}

fn confirm_deletion(out: &mut dyn Write, total_size: u64) -> Result<bool, AppError> {
    writeln!(out, "About to delete {}. Proceed? [y/N]", format_bytes(total_size))?;
    write!(out, "Confirm: ")?;
    out.flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let answer = input.trim().to_ascii_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes"))
}

fn print_plan(out: &mut dyn Write, plan: &ScanPlan, verbose: bool) -> io::Result<()> {
    writeln!(out, "Deletion plan:")?;
    writeln!(
        out,
        "- {} project(s), {} with dependencies installed",
        plan.candidates,
        plan.items.len()
    )?;
    if verbose {
        for item in &plan.items {
            writeln!(out, "    • {:<60} {}", display_path(&item.cache), format_bytes(item.size))?;
        }
    }
    writeln!(out, "Total to delete: {}", format_bytes(plan.total_size()))
}

fn print_summary(summary: &RunSummary, verbose: bool) {
    if verbose {
        for result in summary.results.iter().filter(|result| result.removed) {
            println!(
                "Removed dependencies from {} ({})",
                display_path(&result.path),
                format_bytes(result.freed_bytes)
            );
        }
    }
    println!(
        "Freed {} across {} project(s).",
        format_bytes(summary.total_freed_bytes),
        summary.removed_count()
    );
    if summary.has_errors() {
        println!("{} error(s):", summary.errors.len());
        for error in &summary.errors {
            println!("  - {error}");
        }
    }
}
