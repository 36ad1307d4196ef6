use crate::common::command::{
    bitlet_stdout, clean_status, commit_files, init_repository_dir, run_bitlet_command,
};
use crate::common::file::{FileSpec, delete_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn fresh_repository_is_clean(init_repository_dir: TempDir) {
    assert_eq!(
        bitlet_stdout(init_repository_dir.path(), &["status"]),
        clean_status(&["master"], "master")
    );
}

#[rstest]
fn every_section_is_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_files(
        dir.path(),
        &[("b.txt", "b"), ("c.txt", "c"), ("d.txt", "d")],
        "tracked files",
    );
    run_bitlet_command(dir.path(), &["branch", "other"])
        .assert()
        .success()
        .stdout("");

    write_file(FileSpec::new(dir.path().join("a.txt"), "a".to_string()));
    run_bitlet_command(dir.path(), &["add", "a.txt"]).assert().success();
    run_bitlet_command(dir.path(), &["rm", "b.txt"]).assert().success();
    write_file(FileSpec::new(dir.path().join("c.txt"), "changed".to_string()));
    delete_file(&dir.path().join("d.txt"));
    write_file(FileSpec::new(dir.path().join("e.txt"), "e".to_string()));

    assert_eq!(
        bitlet_stdout(dir.path(), &["status"]),
        "=== Branches ===\n*master\nother\n\n\
         === Staged Files ===\na.txt\n\n\
         === Removed Files ===\nb.txt\n\n\
         === Modifications Not Staged For Commit ===\nc.txt (modified)\nd.txt (deleted)\n\n\
         === Untracked Files ===\ne.txt\n\n"
    );
}

#[rstest]
fn staged_files_changed_afterwards_are_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("edited.txt"), "v1".to_string()));
    write_file(FileSpec::new(dir.path().join("gone.txt"), "v1".to_string()));
    run_bitlet_command(dir.path(), &["add", "edited.txt"]).assert().success();
    run_bitlet_command(dir.path(), &["add", "gone.txt"]).assert().success();
    write_file(FileSpec::new(dir.path().join("edited.txt"), "v2".to_string()));
    delete_file(&dir.path().join("gone.txt"));

    let status = bitlet_stdout(dir.path(), &["status"]);
    assert!(status.contains("=== Staged Files ===\nedited.txt\ngone.txt\n\n"));
    assert!(status.contains(
        "=== Modifications Not Staged For Commit ===\nedited.txt (modified)\ngone.txt (deleted)\n\n"
    ));
}

#[rstest]
fn files_in_nested_directories_are_listed_with_relative_paths(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("nested/dir/new.txt"), "new".to_string()));

    assert!(
        bitlet_stdout(dir.path(), &["status"])
            .contains("=== Untracked Files ===\nnested/dir/new.txt\n\n")
    );
}
