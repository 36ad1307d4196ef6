use crate::common::command::{
    commit_files, head_commit_id, init_repository_dir, run_bitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merging_the_current_branch_is_reported(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["merge", "master"])
        .assert()
        .success()
        .stdout("Cannot merge a branch with itself.\n");
}

#[rstest]
fn merging_an_unknown_branch_is_reported(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["merge", "ghost"])
        .assert()
        .success()
        .stdout("A branch with that name does not exist.\n");
}

#[rstest]
fn merging_with_staged_changes_is_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", "other"]).assert().success();
    write_file(FileSpec::new(dir.path().join("staged.txt"), "s".to_string()));
    run_bitlet_command(dir.path(), &["add", "staged.txt"]).assert().success();

    run_bitlet_command(dir.path(), &["merge", "other"])
        .assert()
        .success()
        .stdout("You have uncommitted changes.\n");
}

#[rstest]
fn untracked_files_block_the_merge(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_files(dir.path(), &[("f.txt", "1")], "base");
    run_bitlet_command(dir.path(), &["branch", "other"]).assert().success();
    commit_files(dir.path(), &[("f.txt", "3")], "on master");
    run_bitlet_command(dir.path(), &["checkout", "other"]).assert().success();
    commit_files(dir.path(), &[("f.txt", "2")], "on other");
    run_bitlet_command(dir.path(), &["checkout", "master"]).assert().success();
    let head_id = head_commit_id(dir.path());

    write_file(FileSpec::new(dir.path().join("stray.txt"), "stray".to_string()));
    run_bitlet_command(dir.path(), &["merge", "other"])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    assert_eq!(read_file(&dir.path().join("f.txt")), "3");
    assert_eq!(head_commit_id(dir.path()), head_id);
}
