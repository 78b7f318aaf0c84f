use crate::common::command::run_mrdiff_command;
use crate::common::repository::{RepositoryFixture, merge_request_repository};
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case::directory_path("a", "a")]
#[case::absent_path("missing.txt", "missing.txt")]
fn diff_for_path_of_unknown_path_is_not_found(
    merge_request_repository: (RepositoryFixture, String, String),
    #[case] old_path: &str,
    #[case] new_path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (repository, base, head) = merge_request_repository;

    run_mrdiff_command(
        &repository.git_dir(),
        &[
            "diff-for-path",
            &base,
            &head,
            "--old-path",
            old_path,
            "--new-path",
            new_path,
        ],
    )
    .assert()
    .failure()
    .stdout("")
    .stderr(predicate::str::contains("404 Not Found"));

    Ok(())
}

#[rstest]
fn diff_for_path_falls_back_to_the_new_path(
    merge_request_repository: (RepositoryFixture, String, String),
) -> Result<(), Box<dyn std::error::Error>> {
    let (repository, base, head) = merge_request_repository;

    run_mrdiff_command(
        &repository.git_dir(),
        &[
            "diff-for-path",
            &base,
            &head,
            "--old-path",
            "4.txt",
            "--new-path",
            "4.txt",
        ],
    )
    .assert()
    .success()
    .stdout(predicate::str::starts_with(
        "diff --git a/4.txt b/4.txt\nnew file mode 100644\n",
    ));

    Ok(())
}
