use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn textflow(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("textflow").unwrap();
    cmd.env("TEXTFLOW_HOME", home)
        .env_remove("TEXTFLOW_USER")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn register(home: &Path, username: &str, email: &str) {
    textflow(home)
        .args(["register", username, email])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered"));
}

#[test]
fn count_reports_statistics_without_a_user() {
    let temp_dir = tempfile::tempdir().unwrap();

    textflow(temp_dir.path())
        .args(["count", "hello world"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Characters"))
        .stdout(predicate::str::contains("11"))
        .stdout(predicate::str::contains("129 / 140"));
}

#[test]
fn count_reads_piped_stdin() {
    let temp_dir = tempfile::tempdir().unwrap();

    textflow(temp_dir.path())
        .arg("count")
        .write_stdin("p1\n\np2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Paragraphs"))
        .stdout(predicate::str::contains("2193 / 2200"));
}

#[test]
fn history_lifecycle() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    register(home, "alice", "alice@example.com");

    textflow(home)
        .args(["--user", "alice@example.com", "create", "--title", "Shopping"])
        .arg("milk\neggs\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("History saved (1): Shopping"));

    textflow(home)
        .args(["--user", "alice@example.com", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shopping"))
        .stdout(predicate::str::contains("10c 3l"));

    textflow(home)
        .args(["--user", "alice@example.com", "search", "SHOP"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shopping"));

    textflow(home)
        .args(["--user", "alice@example.com", "search", "nothing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No histories found."));

    textflow(home)
        .args(["--user", "alice@example.com", "view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("milk\neggs"));

    textflow(home)
        .args(["--user", "alice@example.com", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("History deleted (1)"));

    textflow(home)
        .args(["--user", "alice@example.com", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("History not found with id: 1"));
}

#[test]
fn untitled_history_gets_inferred_title() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    register(home, "alice", "alice@example.com");

    textflow(home)
        .args(["--user", "alice@example.com", "create"])
        .arg("The quick brown fox jumps over the lazy dog")
        .assert()
        .success()
        .stdout(predicate::str::contains("The quick brown fox jumps over..."));
}

#[test]
fn histories_are_private_to_their_owner() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    register(home, "alice", "alice@example.com");
    register(home, "bobby", "bob@example.com");

    textflow(home)
        .args(["--user", "alice@example.com", "create", "private"])
        .assert()
        .success();

    textflow(home)
        .args(["--user", "bob@example.com", "view", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("History not found with id: 1"));

    textflow(home)
        .args(["--user", "bob@example.com", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No histories found."));
}

#[test]
fn history_commands_require_a_known_user() {
    let temp_dir = tempfile::tempdir().unwrap();

    textflow(temp_dir.path())
        .args(["create", "orphan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication required"));

    textflow(temp_dir.path())
        .args(["--user", "ghost@example.com", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication required"));
}

#[test]
fn duplicate_registration_conflicts() {
    let temp_dir = tempfile::tempdir().unwrap();
    register(temp_dir.path(), "alice", "alice@example.com");

    textflow(temp_dir.path())
        .args(["register", "alice2", "alice@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "User already exists with email: alice@example.com",
        ));
}

#[test]
fn import_skips_items_without_content_or_over_limits() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    register(home, "alice", "alice@example.com");

    let export = home.join("export.json");
    std::fs::write(
        &export,
        r#"{"histories":[
            {"content":""},
            {"title":"First kept","content":"X"},
            {"content":null},
            {"title":"TITLE_TOO_LONG","content":"Z"},
            {"title":"Second kept","content":"Y","contentType":"markdown"}
        ]}"#
        .replace("TITLE_TOO_LONG", &"t".repeat(150)),
    )
    .unwrap();

    textflow(home)
        .args(["--user", "alice@example.com", "import"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 histories"))
        .stdout(predicate::str::contains(
            "Skipped 3 items that were empty or too long",
        ));

    textflow(home)
        .args(["--user", "alice@example.com", "list", "--asc"])
        .assert()
        .success()
        .stdout(
            predicate::str::is_match("(?s)First kept.*Second kept").unwrap(),
        )
        .stdout(predicate::str::contains("ttttt").not());
}

#[test]
fn login_sets_the_default_user() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    register(home, "alice", "alice@example.com");

    textflow(home)
        .args(["login", "alice@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as alice@example.com"));

    textflow(home)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("alice <alice@example.com>"))
        .stdout(predicate::str::contains("Histories"));
}

#[test]
fn config_page_size_limits_list_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    register(home, "alice", "alice@example.com");

    for body in ["one", "two", "three"] {
        textflow(home)
            .args(["--user", "alice@example.com", "create", body])
            .assert()
            .success();
    }

    textflow(home)
        .args(["config", "page-size", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page-size set to 2"));

    textflow(home)
        .args(["--user", "alice@example.com", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("three"))
        .stdout(predicate::str::contains("one").not())
        .stdout(predicate::str::contains("Page 1 of 2 (3 histories)"));
}
