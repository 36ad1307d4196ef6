use crate::common::command::{
    bitlet_stdout, clean_status, commit_files, head_commit_id, init_repository_dir,
    run_bitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reset_restores_the_snapshot_and_moves_the_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_files(dir.path(), &[("a.txt", "1")], "first");
    let first_id = head_commit_id(dir.path());
    commit_files(dir.path(), &[("a.txt", "2"), ("b.txt", "b")], "second");

    run_bitlet_command(dir.path(), &["reset", &first_id[..8]])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.path().join("a.txt")), "1");
    assert!(!dir.path().join("b.txt").exists());
    assert_eq!(head_commit_id(dir.path()), first_id);
    assert_eq!(
        bitlet_stdout(dir.path(), &["status"]),
        clean_status(&["master"], "master")
    );
}

#[rstest]
fn reset_clears_the_stage(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_files(dir.path(), &[("a.txt", "1")], "first");
    let first_id = head_commit_id(dir.path());

    write_file(FileSpec::new(dir.path().join("a.txt"), "staged".to_string()));
    run_bitlet_command(dir.path(), &["add", "a.txt"]).assert().success();

    run_bitlet_command(dir.path(), &["reset", &first_id])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.path().join("a.txt")), "1");
    assert_eq!(
        bitlet_stdout(dir.path(), &["status"]),
        clean_status(&["master"], "master")
    );
}

#[rstest]
fn reset_to_an_unknown_commit_is_reported(init_repository_dir: TempDir) {
    run_bitlet_command(init_repository_dir.path(), &["reset", "0123456789abcdef"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");
}

#[rstest]
fn reset_refuses_to_overwrite_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let root_id = head_commit_id(dir.path());
    commit_files(dir.path(), &[("a.txt", "1")], "first");
    let first_id = head_commit_id(dir.path());
    write_file(FileSpec::new(dir.path().join("stray.txt"), "stray".to_string()));

    run_bitlet_command(dir.path(), &["reset", &root_id])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    assert_eq!(read_file(&dir.path().join("a.txt")), "1");
    assert_eq!(head_commit_id(dir.path()), first_id);
}
