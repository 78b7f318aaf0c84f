use crate::common::repository::{RepositoryFixture, merge_request_repository};
use mrdiff::areas::config::DiffsConfig;
use mrdiff::areas::database::Database;
use mrdiff::areas::merge_requests::{MergeRequest, MergeRequestRef};
use mrdiff::areas::repository::Repository;
use mrdiff::artifacts::diff::diff_view::DiffViewMode;
use mrdiff::artifacts::diff::revision_pair::RevisionPair;
use mrdiff::artifacts::notes::note_anchor::{DiffPosition, NoteAnchor};
use mrdiff::artifacts::objects::object_id::ObjectId;
use mrdiff::commands::diffs::{DiffsMode, DiffsPayload, DiffsRequest, RequestContext};
use mrdiff::errors::DiffError;
use rstest::rstest;
use std::sync::Arc;

const REFERENCE: MergeRequestRef = MergeRequestRef {
    project_id: 7,
    iid: 3,
};

fn open_repository(
    fixture: &RepositoryFixture,
    base: &str,
    head: &str,
    config: DiffsConfig,
) -> Result<Repository, Box<dyn std::error::Error>> {
    let database = Database::new(fixture.git_dir().join("objects").into_boxed_path());
    let repository = Repository::new(Box::new(database), config)?;

    let diff_refs = RevisionPair::new(ObjectId::try_from(base)?, ObjectId::try_from(head)?);
    repository
        .merge_requests()
        .register(MergeRequest::new(70, REFERENCE.project_id, REFERENCE.iid, diff_refs));

    Ok(repository)
}

fn verified() -> RequestContext {
    RequestContext::new(Some(1), true)
}

#[rstest]
fn unverified_access_is_not_found(
    merge_request_repository: (RepositoryFixture, String, String),
) -> Result<(), Box<dyn std::error::Error>> {
    let (fixture, base, head) = merge_request_repository;
    let repository = open_repository(&fixture, &base, &head, DiffsConfig::default())?;

    let result = repository.diffs(
        &RequestContext::new(Some(1), false),
        &DiffsRequest::new(REFERENCE, DiffsMode::Full, None),
    );

    assert!(matches!(result, Err(DiffError::NotFound(_))));
    assert!(repository.diff_cache().get(&RevisionPair::new(
        ObjectId::try_from(base.as_str())?,
        ObjectId::try_from(head.as_str())?
    )).is_none());

    Ok(())
}

#[rstest]
fn merge_request_of_another_project_is_not_found(
    merge_request_repository: (RepositoryFixture, String, String),
) -> Result<(), Box<dyn std::error::Error>> {
    let (fixture, base, head) = merge_request_repository;
    let repository = open_repository(&fixture, &base, &head, DiffsConfig::default())?;

    let result = repository.diffs(
        &verified(),
        &DiffsRequest::new(MergeRequestRef::new(8, REFERENCE.iid), DiffsMode::Full, None),
    );

    assert!(matches!(result, Err(DiffError::NotFound(_))));

    Ok(())
}

#[rstest]
#[case::invalid_window(0, 20)]
#[case::valid_window(1, 20)]
fn switched_off_batch_is_disabled_whatever_the_window(
    merge_request_repository: (RepositoryFixture, String, String),
    #[case] page: usize,
    #[case] per_page: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let (fixture, base, head) = merge_request_repository;
    let config = DiffsConfig::default().with_batch_enabled(false);
    let repository = open_repository(&fixture, &base, &head, config)?;

    let result = repository.diffs(
        &verified(),
        &DiffsRequest::new(REFERENCE, DiffsMode::Batch { page, per_page }, None),
    );

    assert!(matches!(result, Err(DiffError::FeatureDisabled("diffs_batch_load"))));

    Ok(())
}

#[rstest]
fn unnormalized_window_is_rejected(
    merge_request_repository: (RepositoryFixture, String, String),
) -> Result<(), Box<dyn std::error::Error>> {
    let (fixture, base, head) = merge_request_repository;
    let repository = open_repository(&fixture, &base, &head, DiffsConfig::default())?;

    let result = repository.diffs(
        &verified(),
        &DiffsRequest::new(REFERENCE, DiffsMode::Batch { page: 1, per_page: 0 }, None),
    );

    assert!(matches!(
        result,
        Err(DiffError::InvalidWindow { page: 1, per_page: 0 })
    ));

    Ok(())
}

#[rstest]
fn repeated_requests_share_one_collection(
    merge_request_repository: (RepositoryFixture, String, String),
) -> Result<(), Box<dyn std::error::Error>> {
    let (fixture, base, head) = merge_request_repository;
    let repository = open_repository(&fixture, &base, &head, DiffsConfig::default())?;
    let request = DiffsRequest::new(REFERENCE, DiffsMode::Full, Some("parallel".to_string()));

    let collections = std::thread::scope(|scope| {
        let handles = (0..4)
            .map(|_| scope.spawn(|| repository.diffs(&verified(), &request)))
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| match handle.join().expect("request thread panicked") {
                Ok(response) => {
                    assert_eq!(response.view, Some(DiffViewMode::Parallel));
                    match response.payload {
                        DiffsPayload::Full(collection) => collection,
                        payload => panic!("unexpected payload {payload:?}"),
                    }
                }
                Err(error) => panic!("request failed: {error}"),
            })
            .collect::<Vec<_>>()
    });

    assert_eq!(collections[0].len(), 5);
    assert!(collections.iter().all(|collection| Arc::ptr_eq(collection, &collections[0])));

    Ok(())
}

#[rstest]
fn single_path_request_resolves_note_position(
    merge_request_repository: (RepositoryFixture, String, String),
) -> Result<(), Box<dyn std::error::Error>> {
    let (fixture, base, head) = merge_request_repository;
    let repository = open_repository(&fixture, &base, &head, DiffsConfig::default())?;
    let anchor = NoteAnchor::new(
        Some(DiffPosition::for_paths("a/b/3.txt", "a/b/3.txt").with_lines(Some(1), Some(1))),
        None,
    );
    let mode = DiffsMode::SinglePath {
        old_path: "a/b/3.txt".into(),
        new_path: "a/b/3.txt".into(),
        anchor,
    };

    let response = repository.diffs(&verified(), &DiffsRequest::new(REFERENCE, mode, None))?;

    match response.payload {
        DiffsPayload::SinglePath(diff) => {
            assert!(!diff.disabled);
            assert_eq!(diff.default_attrs.noteable_id, 70);
            assert_eq!(diff.file.new_path.as_deref(), Some(std::path::Path::new("a/b/3.txt")));
        }
        payload => panic!("unexpected payload {payload:?}"),
    }
    assert_eq!(response.view, None);

    Ok(())
}
