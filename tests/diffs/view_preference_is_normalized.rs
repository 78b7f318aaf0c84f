use crate::common::command::{run_mrdiff_command, stdout_of};
use crate::common::repository::{RepositoryFixture, merge_request_repository};
use rstest::rstest;

#[rstest]
#[case::parallel("parallel", Some("parallel"))]
#[case::inline("inline", Some("inline"))]
#[case::case_sensitive("Parallel", None)]
#[case::unknown("side-by-side", None)]
fn view_preference_is_normalized(
    merge_request_repository: (RepositoryFixture, String, String),
    #[case] requested: &str,
    #[case] persisted: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (repository, base, head) = merge_request_repository;

    let actual_output = stdout_of(&mut run_mrdiff_command(
        &repository.git_dir(),
        &["show", &base, &head, "--name-status", "--view", requested],
    ))?;

    let view_line = actual_output.lines().find(|line| line.starts_with("# view"));
    pretty_assertions::assert_eq!(view_line.map(|line| line.trim_start_matches("# view ")), persisted);

    Ok(())
}
