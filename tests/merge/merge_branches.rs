use crate::common::command::{
    bitlet_stdout, clean_status, commit_files, head_commit_id, init_repository_dir,
    run_bitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn non_conflicting_changes_from_both_sides_are_combined(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_files(
        dir.path(),
        &[("a.txt", "a1"), ("b.txt", "b1"), ("d.txt", "d")],
        "base",
    );
    run_bitlet_command(dir.path(), &["branch", "other"]).assert().success();
    commit_files(dir.path(), &[("a.txt", "a2")], "master changes a");
    let master_id = head_commit_id(dir.path());

    run_bitlet_command(dir.path(), &["checkout", "other"]).assert().success();
    run_bitlet_command(dir.path(), &["rm", "d.txt"]).assert().success();
    commit_files(dir.path(), &[("b.txt", "b2"), ("c.txt", "c")], "other changes b");
    let other_id = head_commit_id(dir.path());
    run_bitlet_command(dir.path(), &["checkout", "master"]).assert().success();

    run_bitlet_command(dir.path(), &["merge", "other"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.path().join("a.txt")), "a2");
    assert_eq!(read_file(&dir.path().join("b.txt")), "b2");
    assert_eq!(read_file(&dir.path().join("c.txt")), "c");
    assert!(!dir.path().join("d.txt").exists());
    assert_eq!(
        bitlet_stdout(dir.path(), &["status"]),
        clean_status(&["master", "other"], "master")
    );

    let log = bitlet_stdout(dir.path(), &["log"]);
    let merge_entry = log.split("===\n").nth(1).expect("log has a merge entry");
    assert!(merge_entry.contains(&format!(
        "Merge: {} {}\n",
        &master_id[..7],
        &other_id[..7]
    )));
    assert!(merge_entry.ends_with("Merged other into master.\n\n"));
    // log follows first parents only
    assert!(log.contains(&master_id));
    assert!(!log.contains(&other_id));
}

#[rstest]
fn branch_behind_the_given_one_is_fast_forwarded(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_files(dir.path(), &[("a.txt", "1"), ("b.txt", "b")], "base");
    run_bitlet_command(dir.path(), &["branch", "other"]).assert().success();
    run_bitlet_command(dir.path(), &["checkout", "other"]).assert().success();
    run_bitlet_command(dir.path(), &["rm", "b.txt"]).assert().success();
    commit_files(dir.path(), &[("a.txt", "2")], "ahead");
    let other_id = head_commit_id(dir.path());
    run_bitlet_command(dir.path(), &["checkout", "master"]).assert().success();

    run_bitlet_command(dir.path(), &["merge", "other"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert_eq!(head_commit_id(dir.path()), other_id);
    assert_eq!(read_file(&dir.path().join("a.txt")), "2");
    assert!(!dir.path().join("b.txt").exists());
    assert_eq!(
        bitlet_stdout(dir.path(), &["status"]),
        clean_status(&["master", "other"], "master")
    );
}

#[rstest]
fn merging_an_ancestor_changes_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", "old"]).assert().success();
    commit_files(dir.path(), &[("a.txt", "1")], "ahead of old");
    let head_id = head_commit_id(dir.path());

    run_bitlet_command(dir.path(), &["merge", "old"])
        .assert()
        .success()
        .stdout("Given branch is an ancestor of the current branch.\n");

    assert_eq!(head_commit_id(dir.path()), head_id);
    assert_eq!(read_file(&dir.path().join("a.txt")), "1");
}

#[rstest]
fn merging_an_ancestor_ignores_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_bitlet_command(dir.path(), &["branch", "old"]).assert().success();
    commit_files(dir.path(), &[("a.txt", "1")], "ahead of old");
    let head_id = head_commit_id(dir.path());
    write_file(FileSpec::new(dir.path().join("stray.txt"), "stray".to_string()));

    run_bitlet_command(dir.path(), &["merge", "old"])
        .assert()
        .success()
        .stdout("Given branch is an ancestor of the current branch.\n");

    assert_eq!(head_commit_id(dir.path()), head_id);
    assert_eq!(read_file(&dir.path().join("stray.txt")), "stray");
}
