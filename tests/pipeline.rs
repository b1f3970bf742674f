use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use assert_fs::prelude::*;
use modsweep::cleanup::{CleanupExecutor, CleanupOrchestrator, FsRemover, Remover};
use modsweep::model::{Candidate, ScanRequest};
use modsweep::project::ProjectLayout;

fn project(dir: &assert_fs::fixture::ChildPath, cache_bytes: usize) {
    dir.child("package.json").write_str("{}").unwrap();
    if cache_bytes > 0 {
        dir.child("node_modules/dep/index.js").write_binary(&vec![b'x'; cache_bytes]).unwrap();
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap()
}

/// Refuses to delete one specific cache directory, delegating the rest.
struct DenyPath(PathBuf);

impl Remover for DenyPath {
    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        if canonical(path) == self.0 {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"))
        } else {
            FsRemover.remove_dir_all(path)
        }
    }
}

#[test]
fn nested_projects_are_both_cleaned() {
    let temp = assert_fs::TempDir::new().unwrap();
    project(&temp.child("A"), 1000);
    project(&temp.child("A/B"), 500);

    let request = ScanRequest::new(&[temp.path().to_path_buf()], &[]);
    let orchestrator = CleanupOrchestrator::new(ProjectLayout::default());

    let candidates: Vec<PathBuf> =
        orchestrator.candidates(&request).into_iter().map(Candidate::into_path).collect();
    let root = canonical(temp.path());
    assert_eq!(candidates, vec![root.join("A"), root.join("A/B")]);

    let summary = orchestrator.run(&request, |_| {});
    assert_eq!(summary.total_freed_bytes, 1500);
    assert!(summary.errors.is_empty());
    assert_eq!(summary.items_processed, 2);
    temp.child("A/node_modules").assert(predicates::path::missing());
    temp.child("A/B/node_modules").assert(predicates::path::missing());
    temp.child("A/B/package.json").assert(predicates::path::exists());
}

#[test]
fn skipped_project_keeps_its_dependencies() {
    let temp = assert_fs::TempDir::new().unwrap();
    project(&temp.child("A"), 1000);
    project(&temp.child("A/B"), 500);

    let request = ScanRequest::new(&[temp.path().to_path_buf()], &[temp.path().join("A/B")]);
    let summary = CleanupOrchestrator::new(ProjectLayout::default()).run(&request, |_| {});

    assert_eq!(summary.total_freed_bytes, 1000);
    assert_eq!(summary.items_processed, 1);
    temp.child("A/B/node_modules").assert(predicates::path::exists());
}

#[test]
fn relative_skip_path_is_resolved() {
    let temp = assert_fs::TempDir::new().unwrap();
    project(&temp.child("A"), 10);
    project(&temp.child("A/B"), 10);

    // `A/B/../B/` still names the same directory once resolved.
    let skip = temp.path().join("A/B/../B/");
    let request = ScanRequest::new(&[temp.path().to_path_buf()], &[skip]);
    let summary = CleanupOrchestrator::new(ProjectLayout::default()).run(&request, |_| {});

    assert_eq!(summary.total_freed_bytes, 10);
}

#[test]
fn nonexistent_skip_path_changes_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    project(&temp.child("A"), 42);

    let request = ScanRequest::new(&[temp.path().to_path_buf()], &[temp.path().join("nope")]);
    let summary = CleanupOrchestrator::new(ProjectLayout::default()).run(&request, |_| {});

    assert_eq!(summary.total_freed_bytes, 42);
    assert!(summary.errors.is_empty());
}

#[test]
fn denied_removal_is_reported_and_not_counted() {
    let temp = assert_fs::TempDir::new().unwrap();
    project(&temp.child("A"), 1000);

    let denied = canonical(&temp.path().join("A/node_modules"));
    let executor = CleanupExecutor::with_remover(ProjectLayout::default(), DenyPath(denied));
    let request = ScanRequest::new(&[temp.path().to_path_buf()], &[]);
    let summary = CleanupOrchestrator::with_executor(executor).run(&request, |_| {});

    assert_eq!(summary.total_freed_bytes, 0);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].contains("A/node_modules"), "{}", summary.errors[0]);
    temp.child("A/node_modules").assert(predicates::path::exists());
}

#[test]
fn one_failure_does_not_stop_the_rest() {
    let temp = assert_fs::TempDir::new().unwrap();
    project(&temp.child("A"), 100);
    project(&temp.child("Z"), 7);

    let denied = canonical(&temp.path().join("A/node_modules"));
    let executor = CleanupExecutor::with_remover(ProjectLayout::default(), DenyPath(denied));
    let request = ScanRequest::new(&[temp.path().to_path_buf()], &[]);

    let mut events = Vec::new();
    let summary = CleanupOrchestrator::with_executor(executor).run(&request, |p| events.push(p));

    assert_eq!(summary.total_freed_bytes, 7);
    assert_eq!(summary.errors.len(), 1);
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|p| p.total == 2));
    temp.child("Z/node_modules").assert(predicates::path::missing());
}

#[test]
fn second_run_has_nothing_left() {
    let temp = assert_fs::TempDir::new().unwrap();
    project(&temp.child("web"), 256);
    project(&temp.child("api"), 0);

    let request = ScanRequest::new(&[temp.path().to_path_buf()], &[]);
    let orchestrator = CleanupOrchestrator::new(ProjectLayout::default());

    let first = orchestrator.run(&request, |_| {});
    assert_eq!(first.total_freed_bytes, 256);

    let second = orchestrator.run(&request, |_| {});
    assert_eq!(second.total_freed_bytes, 0);
    assert!(second.errors.is_empty());
    assert_eq!(second.items_processed, 2);
}

#[test]
fn custom_layout_targets_other_ecosystems() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("svc/composer.json").write_str("{}").unwrap();
    temp.child("svc/vendor/lib.php").write_binary(&[0u8; 30]).unwrap();
    temp.child("svc/node_modules/x.js").write_binary(&[0u8; 5]).unwrap();

    let request = ScanRequest::new(&[temp.path().to_path_buf()], &[]);
    let summary = CleanupOrchestrator::new(ProjectLayout::new("composer.json", "vendor"))
        .run(&request, |_| {});

    assert_eq!(summary.total_freed_bytes, 30);
    temp.child("svc/node_modules").assert(predicates::path::exists());
}
