//! Service orchestration tests for author-checked comment CRUD.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};

use crate::account::domain::AccountId;
use crate::task::{
    adapters::memory::InMemoryCommentRepository,
    domain::{PageRequest, TaskId},
    services::{CommentService, CommentServiceError},
};

type TestService = CommentService<InMemoryCommentRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    CommentService::new(
        Arc::new(InMemoryCommentRepository::new()),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_are_readable_by_non_authors_within_the_task(service: TestService) {
    let task_id = TaskId::new();
    let author = AccountId::new();
    let comment = service
        .create(task_id, author, "looks good")
        .await
        .expect("creation succeeds");

    // Reads are task-scoped, not author-scoped.
    let fetched = service
        .get(task_id, comment.id())
        .await
        .expect("read succeeds");
    assert_eq!(fetched.account_id(), author);

    // But the comment is invisible under another task.
    assert!(matches!(
        service.get(TaskId::new(), comment.id()).await,
        Err(CommentServiceError::NotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_author_mutation_reads_as_not_found(service: TestService) {
    let task_id = TaskId::new();
    let author = AccountId::new();
    let other = AccountId::new();
    let comment = service
        .create(task_id, author, "mine")
        .await
        .expect("creation succeeds");

    assert!(matches!(
        service.update(task_id, comment.id(), other, "hijacked").await,
        Err(CommentServiceError::NotFound(_))
    ));
    assert!(matches!(
        service.delete(task_id, comment.id(), other).await,
        Err(CommentServiceError::NotFound(_))
    ));

    // The author still can.
    let updated = service
        .update(task_id, comment.id(), author, "edited")
        .await
        .expect("author update succeeds");
    assert_eq!(updated.content().as_str(), "edited");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_comment_is_gone_and_totals_shrink(service: TestService) {
    let task_id = TaskId::new();
    let author = AccountId::new();
    let comment = service
        .create(task_id, author, "to be removed")
        .await
        .expect("creation succeeds");
    service
        .create(task_id, author, "to stay")
        .await
        .expect("creation succeeds");

    service
        .delete(task_id, comment.id(), author)
        .await
        .expect("deletion succeeds");

    assert!(matches!(
        service.get(task_id, comment.id()).await,
        Err(CommentServiceError::NotFound(_))
    ));
    let page = service
        .list(task_id, PageRequest::new(1, 10).expect("valid page"), None)
        .await
        .expect("list succeeds");
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_content_is_rejected(service: TestService) {
    let result = service.create(TaskId::new(), AccountId::new(), "  ").await;
    assert!(matches!(result, Err(CommentServiceError::Domain(_))));
}
