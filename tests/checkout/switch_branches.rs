use crate::common::command::{
    bitlet_stdout, clean_status, commit_files, head_commit_id, init_repository_dir,
    run_bitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn switching_branches_replaces_the_working_tree(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_files(dir.path(), &[("shared.txt", "base"), ("master.txt", "m")], "base");
    run_bitlet_command(dir.path(), &["branch", "other"]).assert().success();

    run_bitlet_command(dir.path(), &["checkout", "other"])
        .assert()
        .success()
        .stdout("");
    run_bitlet_command(dir.path(), &["rm", "master.txt"]).assert().success();
    commit_files(
        dir.path(),
        &[("shared.txt", "other"), ("dir/other.txt", "o")],
        "on other",
    );
    let other_id = head_commit_id(dir.path());

    run_bitlet_command(dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout("");
    assert_eq!(read_file(&dir.path().join("shared.txt")), "base");
    assert_eq!(read_file(&dir.path().join("master.txt")), "m");
    assert!(!dir.path().join("dir").exists());
    assert_eq!(
        bitlet_stdout(dir.path(), &["status"]),
        clean_status(&["master", "other"], "master")
    );

    run_bitlet_command(dir.path(), &["checkout", "other"])
        .assert()
        .success()
        .stdout("");
    assert_eq!(read_file(&dir.path().join("shared.txt")), "other");
    assert_eq!(read_file(&dir.path().join("dir/other.txt")), "o");
    assert!(!dir.path().join("master.txt").exists());
    assert_eq!(head_commit_id(dir.path()), other_id);
    assert_eq!(
        bitlet_stdout(dir.path(), &["status"]),
        clean_status(&["master", "other"], "other")
    );
}

#[rstest]
fn switching_branches_clears_the_stage(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", "other"]).assert().success();

    write_file(FileSpec::new(dir.path().join("staged.txt"), "s".to_string()));
    run_bitlet_command(dir.path(), &["add", "staged.txt"]).assert().success();
    run_bitlet_command(dir.path(), &["checkout", "other"])
        .assert()
        .success()
        .stdout("");

    assert!(
        bitlet_stdout(dir.path(), &["status"])
            .contains("=== Staged Files ===\n\n")
    );
}

#[rstest]
fn unknown_branch_is_reported(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["checkout", "ghost"])
        .assert()
        .success()
        .stdout("No such branch exists.\n");
}

#[rstest]
fn checking_out_the_current_branch_is_reported(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout("No need to checkout the current branch.\n");
}

#[rstest]
fn untracked_files_block_the_switch(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", "other"]).assert().success();
    run_bitlet_command(dir.path(), &["checkout", "other"]).assert().success();
    commit_files(dir.path(), &[("wug.txt", "from other")], "on other");
    run_bitlet_command(dir.path(), &["checkout", "master"]).assert().success();

    write_file(FileSpec::new(dir.path().join("wug.txt"), "untracked".to_string()));
    run_bitlet_command(dir.path(), &["checkout", "other"])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    assert_eq!(read_file(&dir.path().join("wug.txt")), "untracked");
    assert!(
        bitlet_stdout(dir.path(), &["status"])
            .starts_with("=== Branches ===\n*master\nother\n\n")
    );
}

#[rstest]
fn missing_operands_are_reported(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["checkout"])
        .assert()
        .success()
        .stdout("Incorrect operands.\n");
}
