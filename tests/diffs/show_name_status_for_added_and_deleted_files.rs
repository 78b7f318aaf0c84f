use crate::common::command::run_mrdiff_command;
use crate::common::repository::{RepositoryFixture, merge_request_repository};
use rstest::rstest;

#[rstest]
fn show_name_status_for_added_and_deleted_files(
    merge_request_repository: (RepositoryFixture, String, String),
) -> Result<(), Box<dyn std::error::Error>> {
    let (repository, base, head) = merge_request_repository;

    run_mrdiff_command(
        &repository.git_dir(),
        &["show", &base, &head, "--name-status", "--diff-filter=AD"],
    )
    .assert()
    .success()
    .stdout("A\t4.txt\nD\ta/2.txt\n");

    Ok(())
}

#[rstest]
fn show_name_status_for_every_change(
    merge_request_repository: (RepositoryFixture, String, String),
) -> Result<(), Box<dyn std::error::Error>> {
    let (repository, base, head) = merge_request_repository;

    run_mrdiff_command(&repository.git_dir(), &["show", &base, &head, "--name-status"])
        .assert()
        .success()
        .stdout("M\t1.txt\nA\t4.txt\nD\ta/2.txt\nM\ta/b/3.txt\nS\tvendor/lib\n");

    Ok(())
}

#[test]
fn show_name_status_for_renamed_file() -> Result<(), Box<dyn std::error::Error>> {
    let repository = RepositoryFixture::new();
    let base = repository.commit(&[repository.file("docs/old.md", "guide\n")], "Add guide");
    let head = repository.commit(&[repository.file("docs/new.md", "guide\n")], "Move guide");

    run_mrdiff_command(&repository.git_dir(), &["show", &base, &head, "--name-status"])
        .assert()
        .success()
        .stdout("R100\tdocs/old.md\tdocs/new.md\n");

    Ok(())
}
