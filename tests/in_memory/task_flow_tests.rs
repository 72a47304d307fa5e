//! Task and comment flows across accounts.

use eyre::Result;

use taskdeck::account::services::CreateAccountRequest;
use taskdeck::task::domain::PageRequest;
use taskdeck::task::services::{CommentServiceError, TaskServiceError};

use crate::in_memory::helpers::world;

#[tokio::test(flavor = "multi_thread")]
async fn tasks_stay_private_to_their_owner() -> Result<()> {
    let world = world();
    let alice = world
        .accounts
        .create_with_credentials(CreateAccountRequest::new("A", "L", "alice", "p1"))
        .await?;
    let bob = world
        .accounts
        .create_with_credentials(CreateAccountRequest::new("B", "M", "bob", "p2"))
        .await?;

    let task = world
        .tasks
        .create(alice.id(), "Ship the release", "cut and tag")
        .await?;

    // Bob can neither read nor list Alice's task.
    assert!(matches!(
        world.tasks.get(bob.id(), task.id()).await,
        Err(TaskServiceError::NotFound(_))
    ));
    let bobs_page = world
        .tasks
        .list(bob.id(), PageRequest::new(1, 10)?, None)
        .await?;
    assert_eq!(bobs_page.total_count, 0);

    let alices_page = world
        .tasks
        .list(alice.id(), PageRequest::new(1, 10)?, None)
        .await?;
    assert_eq!(alices_page.total_count, 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn comment_threads_allow_cross_account_reads_but_not_writes() -> Result<()> {
    let world = world();
    let alice = world
        .accounts
        .create_with_credentials(CreateAccountRequest::new("A", "L", "alice", "p1"))
        .await?;
    let bob = world
        .accounts
        .create_with_credentials(CreateAccountRequest::new("B", "M", "bob", "p2"))
        .await?;

    let task = world
        .tasks
        .create(alice.id(), "Plan the offsite", "")
        .await?;
    let comment = world
        .comments
        .create(task.id(), alice.id(), "I'll book the venue")
        .await?;

    // Bob reads within the task but cannot mutate Alice's comment;
    // and the refusal reads as not-found.
    let fetched = world.comments.get(task.id(), comment.id()).await?;
    assert_eq!(fetched.account_id(), alice.id());
    assert!(matches!(
        world
            .comments
            .update(task.id(), comment.id(), bob.id(), "mine now")
            .await,
        Err(CommentServiceError::NotFound(_))
    ));

    // Bob adds his own comment; the thread paginates over both.
    world
        .comments
        .create(task.id(), bob.id(), "I'll sort travel")
        .await?;
    let page = world
        .comments
        .list(task.id(), PageRequest::new(1, 10)?, None)
        .await?;
    assert_eq!(page.total_count, 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn listings_paginate_with_accurate_totals() -> Result<()> {
    let world = world();
    let account = world
        .accounts
        .create_with_credentials(CreateAccountRequest::new("A", "L", "alice", "p1"))
        .await?;

    for index in 0..12 {
        world
            .tasks
            .create(account.id(), &format!("task {index}"), "")
            .await?;
    }

    let page = world
        .tasks
        .list(account.id(), PageRequest::new(2, 5)?, None)
        .await?;
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total_count, 12);
    assert_eq!(page.total_pages, 3);

    let beyond = world
        .tasks
        .list(account.id(), PageRequest::new(4, 5)?, None)
        .await?;
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_count, 12);
    Ok(())
}
