use crate::common::command::run_mrdiff_command;
use crate::common::repository::{RepositoryFixture, merge_request_repository};
use predicates::prelude::predicate;
use rstest::rstest;

const UNKNOWN_REVISION: &str = "0123456789abcdef0123456789abcdef01234567";

#[rstest]
#[case::full(&["show"])]
#[case::single_path(&["diff-for-path", "--old-path", "1.txt", "--new-path", "1.txt"])]
#[case::batch(&["diffs-batch"])]
fn unknown_base_revision_is_not_found(
    merge_request_repository: (RepositoryFixture, String, String),
    #[case] command: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    let (repository, _, head) = merge_request_repository;
    let mut args = vec![command[0], UNKNOWN_REVISION, &head];
    args.extend_from_slice(&command[1..]);

    run_mrdiff_command(&repository.git_dir(), &args)
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("404 Not Found"));

    Ok(())
}

#[rstest]
fn blob_given_as_revision_is_not_found(
    merge_request_repository: (RepositoryFixture, String, String),
) -> Result<(), Box<dyn std::error::Error>> {
    let (repository, base, _) = merge_request_repository;
    let blob = repository.file("1.txt", "one\n").entry.oid.to_string();

    run_mrdiff_command(&repository.git_dir(), &["show", &base, &blob])
        .assert()
        .failure()
        .stderr(predicate::str::contains("404 Not Found"));

    Ok(())
}
