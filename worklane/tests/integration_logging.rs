//! Audit trail and realtime push across a full board workflow.

use tempfile::TempDir;
use worklane::activity::ListActivity;
use worklane::board::InitBoard;
use worklane::comment::AddComment;
use worklane::member::AddMember;
use worklane::notification::AddNotification;
use worklane::task::{AddTask, MoveTask};
use worklane::timer::{StartTimer, StopTimer};
use worklane::{BoardEvent, Execute, MemberId, TaskId, WorklaneContext, WorklaneProcessor};

async fn setup() -> (TempDir, WorklaneContext) {
    let temp = TempDir::new().unwrap();
    let ctx = WorklaneContext::new(temp.path().join(".worklane"));
    (temp, ctx)
}

#[tokio::test]
async fn full_workflow_is_audited() {
    let (_temp, ctx) = setup().await;
    let processor = WorklaneProcessor::new(&ctx).with_actor("alice");

    processor.run(&InitBoard::new("Sprint")).await.unwrap();
    processor.run(&AddMember::new("alice", "Alice")).await.unwrap();

    let added = processor.run(&AddTask::new("Ship it")).await.unwrap();
    let task_id = TaskId::from_string(added["id"].as_str().unwrap());

    processor
        .run(&MoveTask::to_column(task_id.clone(), "doing"))
        .await
        .unwrap();
    processor
        .run(&AddComment::new(task_id.clone(), "On it", "alice"))
        .await
        .unwrap();
    processor
        .run(&StartTimer::new(task_id.clone(), "alice"))
        .await
        .unwrap();
    processor.run(&StopTimer::new("alice")).await.unwrap();

    // Global activity, newest first, every entry stamped with the actor
    let activity = ListActivity::new().execute(&ctx).await.into_result().unwrap();
    let entries = activity.as_array().unwrap();
    assert_eq!(entries.len(), 7);
    assert_eq!(entries[0]["op"], "stop timer");
    assert_eq!(entries[6]["op"], "init board");
    assert!(entries.iter().all(|e| e["actor"] == "alice"));

    // The task's own log holds only task-scoped operations
    let task_log = ctx.read_task_log(&task_id, None).await.unwrap();
    let ops: Vec<&str> = task_log.iter().map(|e| e.op.as_str()).collect();
    assert_eq!(ops, vec!["add comment", "move task", "add task"]);
}

#[tokio::test]
async fn activity_limit_returns_most_recent() {
    let (_temp, ctx) = setup().await;
    let processor = WorklaneProcessor::new(&ctx);

    processor.run(&InitBoard::new("Sprint")).await.unwrap();
    for i in 0..5 {
        processor
            .run(&AddTask::new(format!("Task {}", i)))
            .await
            .unwrap();
    }

    let limited = ListActivity::new()
        .with_limit(2)
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();
    let entries = limited.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["input"]["title"], "Task 4");
}

#[tokio::test]
async fn notification_insert_reaches_live_subscriber() {
    let (_temp, ctx) = setup().await;
    let processor = WorklaneProcessor::new(&ctx);

    processor.run(&InitBoard::new("Sprint")).await.unwrap();
    processor.run(&AddMember::new("alice", "Alice")).await.unwrap();

    let alice = MemberId::from_string("alice");
    let mut subscription = ctx.events().subscribe(&alice);

    let added = processor.run(&AddTask::new("Review PR")).await.unwrap();
    processor
        .run(
            &AddNotification::new("alice", "You were assigned to Review PR")
                .with_task(added["id"].as_str().unwrap()),
        )
        .await
        .unwrap();

    match subscription.recv().await {
        Some(BoardEvent::NotificationAdded(n)) => {
            assert_eq!(n.recipient, alice);
            assert!(n.message.contains("Review PR"));
            assert!(!n.read);
        }
        None => panic!("expected a pushed notification"),
    }

    // Teardown: after unsubscribing, the next publish finds no channel
    subscription.unsubscribe();
    processor
        .run(&AddNotification::new("alice", "again"))
        .await
        .unwrap();
    assert_eq!(ctx.events().channel_count(), 0);
}
