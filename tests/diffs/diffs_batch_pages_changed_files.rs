use crate::common::command::{run_mrdiff_command, stdout_of};
use crate::common::repository::many_files_repository;
use rstest::rstest;

fn changed_files(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter_map(|line| line.strip_prefix("diff --git a/"))
        .filter_map(|line| line.split_whitespace().next())
        .collect()
}

#[test]
fn diffs_batch_pages_changed_files() -> Result<(), Box<dyn std::error::Error>> {
    let (repository, base, head) = many_files_repository(20);

    let actual_output = stdout_of(&mut run_mrdiff_command(
        &repository.git_dir(),
        &["diffs-batch", &base, &head, "--page", "2", "--per-page", "5"],
    ))?;

    pretty_assertions::assert_eq!(
        changed_files(&actual_output),
        vec![
            "file_05.txt",
            "file_06.txt",
            "file_07.txt",
            "file_08.txt",
            "file_09.txt"
        ]
    );
    assert!(actual_output.ends_with("# page 2 of 4, next page: 3\n"));

    Ok(())
}

#[rstest]
#[case::last_page("4", "5", "# page 4 of 4, next page: none\n", 5)]
#[case::past_the_end_clamps("9", "5", "# page 4 of 4, next page: none\n", 5)]
#[case::single_page("1", "100", "# page 1 of 1, next page: none\n", 20)]
#[case::zero_page_normalized("0", "5", "# page 1 of 4, next page: 2\n", 5)]
#[case::garbage_normalized("abc", "0", "# page 1 of 1, next page: none\n", 20)]
fn diffs_batch_windows(
    #[case] page: &str,
    #[case] per_page: &str,
    #[case] footer: &str,
    #[case] files_on_page: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let (repository, base, head) = many_files_repository(20);

    let actual_output = stdout_of(&mut run_mrdiff_command(
        &repository.git_dir(),
        &["diffs-batch", &base, &head, "--page", page, "--per-page", per_page],
    ))?;

    assert!(actual_output.ends_with(footer));
    assert_eq!(changed_files(&actual_output).len(), files_on_page);

    Ok(())
}

#[test]
fn diffs_batch_uses_configured_page_size() -> Result<(), Box<dyn std::error::Error>> {
    let (repository, base, head) = many_files_repository(20);

    let actual_output = stdout_of(
        run_mrdiff_command(&repository.git_dir(), &["diffs-batch", &base, &head])
            .env("MRDIFF_PER_PAGE", "8"),
    )?;

    assert_eq!(changed_files(&actual_output).len(), 8);
    assert!(actual_output.ends_with("# page 1 of 3, next page: 2\n"));

    Ok(())
}
