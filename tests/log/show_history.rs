use crate::common::command::{
    READABLE_COMMIT_DATE, READABLE_ROOT_DATE, bitlet_stdout, commit_files, head_commit_id,
    init_repository_dir, run_bitlet_command,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn entry(commit_id: &str, date: &str, message: &str) -> String {
    format!("===\ncommit {commit_id}\nDate: {date}\n{message}\n\n")
}

#[rstest]
fn log_walks_first_parents_newest_first(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let root_id = head_commit_id(dir.path());

    commit_files(dir.path(), &[("a.txt", "1")], "first");
    let first_id = head_commit_id(dir.path());
    commit_files(dir.path(), &[("a.txt", "2")], "second");
    let second_id = head_commit_id(dir.path());

    assert_eq!(
        bitlet_stdout(dir.path(), &["log"]),
        [
            entry(&second_id, READABLE_COMMIT_DATE, "second"),
            entry(&first_id, READABLE_COMMIT_DATE, "first"),
            entry(&root_id, READABLE_ROOT_DATE, "initial commit"),
        ]
        .concat()
    );
}

#[rstest]
fn global_log_includes_commits_no_longer_reachable(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    let root_id = head_commit_id(dir.path());

    commit_files(dir.path(), &[("a.txt", "1")], "soon unreachable");
    let orphan_id = head_commit_id(dir.path());
    run_bitlet_command(dir.path(), &["reset", &root_id])
        .assert()
        .success()
        .stdout("");

    let log = bitlet_stdout(dir.path(), &["log"]);
    assert!(!log.contains(&orphan_id));

    let global_log = bitlet_stdout(dir.path(), &["global-log"]);
    assert!(global_log.contains(&entry(&orphan_id, READABLE_COMMIT_DATE, "soon unreachable")));
    assert!(global_log.contains(&entry(&root_id, READABLE_ROOT_DATE, "initial commit")));
    assert_eq!(global_log.matches("===\n").count(), 2);
}
