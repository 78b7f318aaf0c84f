use crate::common::command::run_mrdiff_command;
use crate::common::repository::{NEW_SUBMODULE_COMMIT, OLD_SUBMODULE_COMMIT, RepositoryFixture};
use predicates::prelude::*;

#[test]
fn show_submodule_pointer_change() -> Result<(), Box<dyn std::error::Error>> {
    let repository = RepositoryFixture::new();
    let base = repository.commit(
        &[
            repository.file("README.md", "readme\n"),
            repository.submodule("vendor/lib", OLD_SUBMODULE_COMMIT),
        ],
        "Add submodule",
    );
    let head = repository.commit(
        &[
            repository.file("README.md", "readme\n"),
            repository.submodule("vendor/lib", NEW_SUBMODULE_COMMIT),
        ],
        "Bump submodule",
    );

    run_mrdiff_command(&repository.git_dir(), &["show", &base, &head])
        .assert()
        .success()
        .stdout(format!(
            "diff --git a/vendor/lib b/vendor/lib\nindex 1111111..2222222 160000\n--- a/vendor/lib\n+++ b/vendor/lib\n@@ -1,1 +1,1 @@\n-Subproject commit {OLD_SUBMODULE_COMMIT}\n+Subproject commit {NEW_SUBMODULE_COMMIT}\n"
        ));

    Ok(())
}

#[test]
fn show_added_submodule() -> Result<(), Box<dyn std::error::Error>> {
    let repository = RepositoryFixture::new();
    let base = repository.commit(&[repository.file("README.md", "readme\n")], "Initial commit");
    let head = repository.commit(
        &[
            repository.file("README.md", "readme\n"),
            repository.submodule("vendor/lib", NEW_SUBMODULE_COMMIT),
        ],
        "Add submodule",
    );

    run_mrdiff_command(&repository.git_dir(), &["show", &base, &head])
        .assert()
        .success()
        .stdout(predicate::str::contains("new file mode 160000"))
        .stdout(predicate::str::contains(format!(
            "@@ -0,0 +1,1 @@\n+Subproject commit {NEW_SUBMODULE_COMMIT}\n"
        )))
        .stdout(predicate::str::contains("-Subproject commit").not());

    Ok(())
}
