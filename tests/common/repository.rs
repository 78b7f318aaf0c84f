use assert_fs::TempDir;
use chrono::Local;
use derive_new::new;
use mrdiff::areas::database::Database;
use mrdiff::artifacts::database::database_entry::DatabaseEntry;
use mrdiff::artifacts::database::entry_mode::{EntryMode, FileMode};
use mrdiff::artifacts::objects::blob::Blob;
use mrdiff::artifacts::objects::commit::{Author, Commit};
use mrdiff::artifacts::objects::object_id::ObjectId;
use mrdiff::artifacts::objects::tree::TreeBuilder;
use rstest::fixture;
use std::path::{Path, PathBuf};

pub const OLD_SUBMODULE_COMMIT: &str = "1111111111111111111111111111111111111111";
pub const NEW_SUBMODULE_COMMIT: &str = "2222222222222222222222222222222222222222";

#[derive(Debug, Clone, new)]
pub struct EntrySpec {
    pub path: String,
    pub entry: DatabaseEntry,
}

/// A `.git/objects` database populated through the library
pub struct RepositoryFixture {
    dir: TempDir,
    database: Database,
}

impl RepositoryFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let objects_path = dir.path().join(".git").join("objects");
        std::fs::create_dir_all(&objects_path).expect("Failed to create objects dir");

        RepositoryFixture {
            database: Database::new(objects_path.into_boxed_path()),
            dir,
        }
    }

    pub fn git_dir(&self) -> PathBuf {
        self.dir.path().join(".git")
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn file(&self, path: &str, content: &str) -> EntrySpec {
        let oid = self
            .database
            .store(&Blob::from(content))
            .expect("Failed to store blob");
        EntrySpec::new(
            path.to_string(),
            DatabaseEntry::new(oid, EntryMode::File(FileMode::Regular)),
        )
    }

    pub fn submodule(&self, path: &str, commit: &str) -> EntrySpec {
        let oid = ObjectId::try_from(commit).expect("Invalid submodule commit");
        EntrySpec::new(path.to_string(), DatabaseEntry::new(oid, EntryMode::Submodule))
    }

    pub fn commit(&self, entries: &[EntrySpec], message: &str) -> String {
        let mut builder = TreeBuilder::new();
        for spec in entries {
            builder
                .add(Path::new(&spec.path), spec.entry.clone())
                .expect("Failed to add tree entry");
        }
        let tree_oid = self
            .database
            .store_trees(&builder)
            .expect("Failed to store trees");

        let commit = Commit::new(Vec::new(), tree_oid, random_author(), message.to_string());
        self.database
            .store(&commit)
            .expect("Failed to store commit")
            .to_string()
    }
}

fn random_author() -> Author {
    use fake::Fake;
    use fake::faker::internet::en::FreeEmail;
    use fake::faker::name::en::Name;

    Author::new(
        Name().fake::<String>(),
        FreeEmail().fake::<String>(),
        Local::now().fixed_offset(),
    )
}

/// Base and head commits of a merge request touching every kind of change
///
/// | path        | change                    |
/// |-------------|---------------------------|
/// | `1.txt`     | modified                  |
/// | `4.txt`     | added                     |
/// | `a/2.txt`   | deleted                   |
/// | `a/b/3.txt` | modified                  |
/// | `vendor/lib`| submodule pointer bumped  |
#[fixture]
pub fn merge_request_repository() -> (RepositoryFixture, String, String) {
    let repository = RepositoryFixture::new();

    let base = repository.commit(
        &[
            repository.file("1.txt", "one\n"),
            repository.file("a/2.txt", "two\n"),
            repository.file("a/b/3.txt", "three\n"),
            repository.submodule("vendor/lib", OLD_SUBMODULE_COMMIT),
        ],
        "Initial commit",
    );
    let head = repository.commit(
        &[
            repository.file("1.txt", "one modified\nwith new line\n"),
            repository.file("4.txt", "four\nnew file\n"),
            repository.file("a/b/3.txt", "three modified\n"),
            repository.submodule("vendor/lib", NEW_SUBMODULE_COMMIT),
        ],
        "Second commit with multiple changes",
    );

    (repository, base, head)
}

/// Base with nothing, head with `count` added files `file_00.txt`, `file_01.txt`...
pub fn many_files_repository(count: usize) -> (RepositoryFixture, String, String) {
    let repository = RepositoryFixture::new();

    let base = repository.commit(&[repository.file("README.md", "readme\n")], "Initial commit");
    let mut entries = vec![repository.file("README.md", "readme\n")];
    entries.extend((0..count).map(|index| {
        repository.file(&format!("file_{index:02}.txt"), &format!("content {index}\n"))
    }));
    let head = repository.commit(&entries, "Add many files");

    (repository, base, head)
}
