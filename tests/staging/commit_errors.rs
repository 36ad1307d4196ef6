use crate::common::command::{
    bitlet_commit, bitlet_stdout, init_repository_dir, run_bitlet_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn committing_a_clean_stage_is_reported(init_repository_dir: TempDir) {
    bitlet_commit(init_repository_dir.path(), "nothing")
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");
}

#[rstest]
#[case(&["commit", ""])]
#[case(&["commit"])]
fn committing_without_a_message_is_reported(init_repository_dir: TempDir, #[case] args: &[&str]) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("wug.txt"), "hello".to_string()));
    run_bitlet_command(dir.path(), &["add", "wug.txt"]).assert().success();

    run_bitlet_command(dir.path(), args)
        .assert()
        .success()
        .stdout("Please enter a commit message.\n");

    // the stage survives the failed commit
    bitlet_commit(dir.path(), "added wug")
        .assert()
        .success()
        .stdout("");
}

#[rstest]
fn whitespace_is_a_valid_commit_message(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("wug.txt"), "hello".to_string()));
    run_bitlet_command(dir.path(), &["add", "wug.txt"]).assert().success();

    bitlet_commit(dir.path(), " ")
        .assert()
        .success()
        .stdout("");

    assert!(bitlet_stdout(dir.path(), &["log"]).starts_with("===\ncommit "));
    assert!(bitlet_stdout(dir.path(), &["log"]).contains("\n \n\n===\n"));
}
