use crate::service::test_helpers::{
    assert_no_call, create_test_service, next_call, tool_failure, wait_for_tasks,
};
use crate::types::{Event, FetchRequest, TaskStatus};

// --- ordering and single-flight ---

#[tokio::test]
async fn test_tasks_listed_in_submission_order() {
    let (service, mut calls) = create_test_service();

    service.queue_request(FetchRequest::from_url("a.mp3")).await;
    service.queue_request(FetchRequest::from_url("b.mp3")).await;
    service.queue_request(FetchRequest::from_url("c.mp3")).await;

    let tasks = service.tasks().await;
    let urls: Vec<_> = tasks.iter().map(|t| t.request.url.as_str()).collect();
    assert_eq!(urls, ["a.mp3", "b.mp3", "c.mp3"]);
    assert!(tasks.iter().all(|t| t.status == TaskStatus::Uploading));

    // Keep the worker from leaking into other assertions
    let call = next_call(&mut calls).await;
    drop(call);
}

#[tokio::test]
async fn test_only_first_task_executes_while_in_flight() {
    let (service, mut calls) = create_test_service();

    service.queue_request(FetchRequest::from_url("a.mp3")).await;
    service.queue_request(FetchRequest::from_url("b.mp3")).await;

    // Only A's executor is invoked while A is in flight
    let call_a = next_call(&mut calls).await;
    assert_eq!(call_a.url, "a.mp3");
    assert_no_call(&mut calls).await;

    // Both tasks are visible as UPLOADING while A runs
    let tasks = service.tasks().await;
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t.status == TaskStatus::Uploading));

    call_a.respond.send(Ok(())).ok();

    // B starts automatically after A's success, with no external trigger
    let call_b = next_call(&mut calls).await;
    assert_eq!(call_b.url, "b.mp3");

    wait_for_tasks(&service, |tasks| {
        tasks[0].status == TaskStatus::Finished && tasks[1].status == TaskStatus::Uploading
    })
    .await;

    call_b.respond.send(Ok(())).ok();
    wait_for_tasks(&service, |tasks| {
        tasks.iter().all(|t| t.status == TaskStatus::Finished)
    })
    .await;
}

#[tokio::test]
async fn test_finish_overwrites_timestamp() {
    let (service, mut calls) = create_test_service();

    service.queue_request(FetchRequest::from_url("a.mp3")).await;
    let queued_at = service.tasks().await[0].timestamp;

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    next_call(&mut calls).await.respond.send(Ok(())).ok();

    wait_for_tasks(&service, |tasks| tasks[0].status == TaskStatus::Finished).await;
    let finished_at = service.tasks().await[0].timestamp;
    assert!(
        finished_at > queued_at,
        "timestamp should be overwritten when the task finishes"
    );
}

#[tokio::test]
async fn test_enqueue_on_idle_queue_starts_new_worker() {
    let (service, mut calls) = create_test_service();

    service.queue_request(FetchRequest::from_url("a.mp3")).await;
    next_call(&mut calls).await.respond.send(Ok(())).ok();
    wait_for_tasks(&service, |tasks| tasks[0].status == TaskStatus::Finished).await;

    // The lane went idle; a later enqueue must start execution again
    service.queue_request(FetchRequest::from_url("b.mp3")).await;
    let call = next_call(&mut calls).await;
    assert_eq!(call.url, "b.mp3");
    call.respond.send(Ok(())).ok();
}

#[tokio::test]
async fn test_ongoing_tasks_excludes_finished() {
    let (service, mut calls) = create_test_service();

    service.queue_request(FetchRequest::from_url("a.mp3")).await;
    service.queue_request(FetchRequest::from_url("b.mp3")).await;

    next_call(&mut calls).await.respond.send(Ok(())).ok();
    let call_b = next_call(&mut calls).await;

    wait_for_tasks(&service, |tasks| tasks[0].status == TaskStatus::Finished).await;

    let ongoing = service.ongoing_tasks().await;
    assert_eq!(ongoing.len(), 1);
    assert_eq!(ongoing[0].request.url, "b.mp3");

    call_b.respond.send(Ok(())).ok();
}

// --- failure semantics ---

#[tokio::test]
async fn test_failed_fetch_stalls_queue() {
    let (service, mut calls) = create_test_service();

    service.queue_request(FetchRequest::from_url("a.mp3")).await;
    service.queue_request(FetchRequest::from_url("b.mp3")).await;

    let call_a = next_call(&mut calls).await;
    call_a.respond.send(Err(tool_failure())).ok();

    // B never starts, and A keeps its UPLOADING status: no failed state exists
    assert_no_call(&mut calls).await;
    let tasks = service.tasks().await;
    assert!(tasks.iter().all(|t| t.status == TaskStatus::Uploading));
}

#[tokio::test]
async fn test_stall_persists_across_later_enqueues() {
    let (service, mut calls) = create_test_service();

    service.queue_request(FetchRequest::from_url("a.mp3")).await;
    next_call(&mut calls)
        .await
        .respond
        .send(Err(tool_failure()))
        .ok();
    assert_no_call(&mut calls).await;

    // A stalled queue is never restarted by new submissions: the uploading
    // count can no longer drop to one.
    service.queue_request(FetchRequest::from_url("b.mp3")).await;
    service.queue_request(FetchRequest::from_url("c.mp3")).await;
    assert_no_call(&mut calls).await;

    let tasks = service.tasks().await;
    assert_eq!(tasks.len(), 3);
    assert!(tasks.iter().all(|t| t.status == TaskStatus::Uploading));
}

// --- events ---

#[tokio::test]
async fn test_lifecycle_events_emitted() {
    let (service, mut calls) = create_test_service();
    let mut events = service.subscribe();

    service.queue_request(FetchRequest::from_url("a.mp3")).await;
    next_call(&mut calls).await.respond.send(Ok(())).ok();
    wait_for_tasks(&service, |tasks| tasks[0].status == TaskStatus::Finished).await;

    assert!(matches!(
        events.recv().await.unwrap(),
        Event::TaskQueued { url } if url == "a.mp3"
    ));
    assert!(matches!(
        events.recv().await.unwrap(),
        Event::FetchStarted { url } if url == "a.mp3"
    ));
    assert!(matches!(
        events.recv().await.unwrap(),
        Event::TaskFinished { url } if url == "a.mp3"
    ));
}

#[tokio::test]
async fn test_failure_event_carries_diagnostic() {
    let (service, mut calls) = create_test_service();
    let mut events = service.subscribe();

    service.queue_request(FetchRequest::from_url("a.mp3")).await;
    next_call(&mut calls)
        .await
        .respond
        .send(Err(tool_failure()))
        .ok();
    assert_no_call(&mut calls).await;

    let mut saw_failure = false;
    while let Ok(event) = events.try_recv() {
        if let Event::FetchFailed { url, reason } = event {
            assert_eq!(url, "a.mp3");
            assert!(reason.contains("exit status"));
            saw_failure = true;
        }
    }
    assert!(saw_failure, "expected a FetchFailed event");
}
