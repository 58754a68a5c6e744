use std::sync::{Arc, Mutex};
use std::thread;

use crate::event::{EventLoop, EventSystemError, PayloadRegistry};

#[tokio::test]
async fn test_exec_returns_exit_code() {
    let event_loop = EventLoop::new(PayloadRegistry::new());
    let handle = event_loop.handle();

    let inner = handle.clone();
    handle.post(move || inner.exit(42)).expect("post should succeed");

    assert_eq!(event_loop.exec().await, 42);
}

#[tokio::test]
async fn test_tasks_run_in_submission_order() {
    let event_loop = EventLoop::new(PayloadRegistry::new());
    let handle = event_loop.handle();
    let order = Arc::new(Mutex::new(Vec::new()));

    for i in 0..5 {
        let order = order.clone();
        handle.post(move || order.lock().unwrap().push(i)).unwrap();
    }
    handle.quit();

    assert_eq!(event_loop.exec().await, 0);
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn test_tasks_after_exit_are_not_run() {
    let event_loop = EventLoop::new(PayloadRegistry::new());
    let handle = event_loop.handle();
    let ran = Arc::new(Mutex::new(false));

    handle.exit(-1);
    let ran_clone = ran.clone();
    handle.post(move || *ran_clone.lock().unwrap() = true).unwrap();

    assert_eq!(event_loop.exec().await, -1);
    assert!(!*ran.lock().unwrap(), "Task queued after exit must not run");
}

#[tokio::test]
async fn test_tasks_from_other_threads_run_on_loop_thread() {
    let event_loop = EventLoop::new(PayloadRegistry::new());
    let handle = event_loop.handle();
    let loop_thread = thread::current().id();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let handle = handle.clone();
            let seen = seen.clone();
            thread::spawn(move || {
                for step in 0..10 {
                    let seen = seen.clone();
                    handle
                        .post(move || {
                            seen.lock().unwrap().push((worker, step, thread::current().id()));
                        })
                        .unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }
    handle.quit();

    assert_eq!(event_loop.exec().await, 0);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 40);
    assert!(seen.iter().all(|(_, _, id)| *id == loop_thread));
    for worker in 0..4 {
        let steps: Vec<_> = seen.iter().filter(|(w, _, _)| *w == worker).map(|(_, s, _)| *s).collect();
        assert_eq!(steps, (0..10).collect::<Vec<_>>(), "Per-thread order must be preserved");
    }
}

#[test]
fn test_process_pending_drains_without_blocking() {
    let mut event_loop = EventLoop::new(PayloadRegistry::new());
    let handle = event_loop.handle();
    let count = Arc::new(Mutex::new(0));

    for _ in 0..3 {
        let count = count.clone();
        handle.post(move || *count.lock().unwrap() += 1).unwrap();
    }

    assert_eq!(event_loop.process_pending(), None);
    assert_eq!(*count.lock().unwrap(), 3);
    assert_eq!(event_loop.process_pending(), None);
}

#[test]
fn test_post_after_loop_dropped_fails() {
    let event_loop = EventLoop::new(PayloadRegistry::new());
    let handle = event_loop.handle();
    drop(event_loop);

    assert!(!handle.is_open());
    match handle.post_labeled("late", || {}) {
        Err(EventSystemError::LoopClosed { task }) => assert_eq!(task, "late"),
        other => panic!("Expected LoopClosed, got {:?}", other),
    }
}

#[test]
fn test_post_payload_requires_registration() {
    #[derive(Debug)]
    struct Unregistered;

    let mut event_loop = EventLoop::new(PayloadRegistry::new());
    let handle = event_loop.handle();

    let result = handle.post_payload(Unregistered, |_| {});
    assert!(matches!(result, Err(EventSystemError::UnregisteredPayload { .. })));

    let received = Arc::new(Mutex::new(None));
    let received_clone = received.clone();
    handle
        .post_payload(String::from("hello"), move |s| *received_clone.lock().unwrap() = Some(s))
        .expect("String is a builtin payload");
    event_loop.process_pending();
    assert_eq!(received.lock().unwrap().as_deref(), Some("hello"));
}
