use crate::common::command::{run_mrdiff_command, stdout_of};
use crate::common::repository::{RepositoryFixture, merge_request_repository};
use rstest::rstest;

#[rstest]
fn diff_for_path_enables_notes_inside_hunks(
    merge_request_repository: (RepositoryFixture, String, String),
) -> Result<(), Box<dyn std::error::Error>> {
    let (repository, base, head) = merge_request_repository;

    let expected_output = "\
diff --git a/1.txt b/1.txt
index 5626abf..9a1ee66 100644
--- a/1.txt
+++ b/1.txt
@@ -1,1 +1,2 @@
-one
+one modified
+with new line
# notes enabled, noteable MergeRequest 42, commit none
";
    let actual_output = stdout_of(&mut run_mrdiff_command(
        &repository.git_dir(),
        &[
            "diff-for-path",
            &base,
            &head,
            "--merge-request-id",
            "42",
            "--old-path",
            "1.txt",
            "--new-path",
            "1.txt",
            "--new-line",
            "2",
        ],
    ))?;

    pretty_assertions::assert_eq!(actual_output, expected_output);

    Ok(())
}

#[rstest]
#[case::line_outside_every_hunk(&["--new-line", "7"])]
#[case::old_line_outside_every_hunk(&["--old-line", "3"])]
fn diff_for_path_disables_notes_outside_hunks(
    merge_request_repository: (RepositoryFixture, String, String),
    #[case] lines: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    let (repository, base, head) = merge_request_repository;
    let mut args = vec![
        "diff-for-path",
        &base,
        &head,
        "--old-path",
        "1.txt",
        "--new-path",
        "1.txt",
    ];
    args.extend_from_slice(lines);

    let actual_output = stdout_of(&mut run_mrdiff_command(&repository.git_dir(), &args))?;

    assert!(actual_output.ends_with("# notes disabled, noteable MergeRequest 1, commit none\n"));

    Ok(())
}

#[rstest]
fn diff_for_path_passes_commit_through(
    merge_request_repository: (RepositoryFixture, String, String),
) -> Result<(), Box<dyn std::error::Error>> {
    let (repository, base, head) = merge_request_repository;

    let actual_output = stdout_of(&mut run_mrdiff_command(
        &repository.git_dir(),
        &[
            "diff-for-path",
            &base,
            &head,
            "--old-path",
            "a/b/3.txt",
            "--new-path",
            "a/b/3.txt",
            "--commit-id",
            &head,
        ],
    ))?;

    assert!(actual_output.contains("+three modified\n"));
    assert!(actual_output.ends_with(&format!(
        "# notes enabled, noteable MergeRequest 1, commit {head}\n"
    )));

    Ok(())
}
