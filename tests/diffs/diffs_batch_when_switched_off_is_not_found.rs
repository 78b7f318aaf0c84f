use crate::common::command::run_mrdiff_command;
use crate::common::repository::many_files_repository;
use predicates::prelude::predicate;

#[test]
fn diffs_batch_with_no_batch_flag_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let (repository, base, head) = many_files_repository(3);

    run_mrdiff_command(
        &repository.git_dir(),
        &["--no-batch", "diffs-batch", &base, &head, "--page", "1"],
    )
    .assert()
    .failure()
    .stdout("")
    .stderr(predicate::str::contains("404 Not Found"));

    Ok(())
}

#[test]
fn diffs_batch_switched_off_by_environment_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let (repository, base, head) = many_files_repository(3);

    run_mrdiff_command(&repository.git_dir(), &["diffs-batch", &base, &head])
        .env("MRDIFF_BATCH_LOAD", "off")
        .assert()
        .failure()
        .stderr(predicate::str::contains("404 Not Found"));

    Ok(())
}

#[test]
fn show_still_works_with_batch_switched_off() -> Result<(), Box<dyn std::error::Error>> {
    let (repository, base, head) = many_files_repository(3);

    run_mrdiff_command(
        &repository.git_dir(),
        &["--no-batch", "show", &base, &head, "--name-status"],
    )
    .assert()
    .success()
    .stdout("A\tfile_00.txt\nA\tfile_01.txt\nA\tfile_02.txt\n");

    Ok(())
}
