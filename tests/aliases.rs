use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn command() -> Command {
    Command::cargo_bin("modsweep").expect("binary exists")
}

#[test]
fn alias_sc_works_like_scan() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("project/package.json").write_str("{}").unwrap();
    temp.child("project/node_modules/foo.js").write_str("cache").unwrap();

    let mut cmd = command();
    cmd.env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.child("config").path())
        .arg("sc")
        .arg("--verbose")
        .arg(temp.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Scan results"))
        .stdout(predicate::str::contains("~/project/node_modules"));
}

#[test]
fn alias_rn_works_like_run() {
    let mut cmd = command();
    cmd.arg("rn").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Delete the dependency directory of every project found"));
}

#[test]
fn alias_cfg_works_like_config() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = command();
    cmd.env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.child("config").path())
        .arg("cfg")
        .arg("--path");

    cmd.assert().success().stdout(predicate::str::contains("config.toml"));
}
