use crate::common::command::{
    bitlet_stdout, clean_status, commit_files, head_commit_id, init_repository_dir,
    run_bitlet_command,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn new_branch_points_at_head_without_switching(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_files(dir.path(), &[("a.txt", "1")], "first");
    let head_id = head_commit_id(dir.path());

    run_bitlet_command(dir.path(), &["branch", "feature"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(
        bitlet_stdout(dir.path(), &["status"]),
        clean_status(&["feature", "master"], "master")
    );

    run_bitlet_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success()
        .stdout("");
    assert_eq!(head_commit_id(dir.path()), head_id);
}

#[rstest]
fn creating_an_existing_branch_is_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", "feature"]).assert().success();

    run_bitlet_command(dir.path(), &["branch", "feature"])
        .assert()
        .success()
        .stdout("A branch with that name already exists.\n");
    run_bitlet_command(dir.path(), &["branch", "master"])
        .assert()
        .success()
        .stdout("A branch with that name already exists.\n");
}

#[rstest]
fn removing_a_branch_keeps_its_commits(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", "feature"]).assert().success();
    run_bitlet_command(dir.path(), &["checkout", "feature"]).assert().success();
    commit_files(dir.path(), &[("a.txt", "1")], "on feature");
    let feature_id = head_commit_id(dir.path());
    run_bitlet_command(dir.path(), &["checkout", "master"]).assert().success();

    run_bitlet_command(dir.path(), &["rm-branch", "feature"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(
        bitlet_stdout(dir.path(), &["status"]),
        clean_status(&["master"], "master")
    );
    assert!(bitlet_stdout(dir.path(), &["global-log"]).contains(&feature_id));
}

#[rstest]
fn removing_an_unknown_branch_is_reported(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["rm-branch", "ghost"])
        .assert()
        .success()
        .stdout("A branch with that name does not exist.\n");
}

#[rstest]
fn removing_the_current_branch_is_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_bitlet_command(dir.path(), &["rm-branch", "master"])
        .assert()
        .success()
        .stdout("Cannot remove the current branch.\n");
    assert_eq!(
        bitlet_stdout(dir.path(), &["status"]),
        clean_status(&["master"], "master")
    );
}
