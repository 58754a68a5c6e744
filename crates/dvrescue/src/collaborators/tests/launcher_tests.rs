use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use dvrescue_core::{Application, ApplicationBuilder};

use crate::collaborators::{Launcher, Thread};
use crate::payloads::{self, ExitStatus, ProcessError, ProcessState};

fn app() -> Application {
    payloads::register(ApplicationBuilder::new().without_subscriber()).build()
}

#[cfg(unix)]
#[tokio::test]
async fn test_launcher_reports_output_and_exit() {
    let app = app();
    let handle = app.loop_handle();
    let launcher = Launcher::new(handle.clone());
    launcher.set_program("sh");
    launcher.set_arguments(vec!["-c".to_string(), "echo hello".to_string()]);

    let states = Arc::new(Mutex::new(Vec::new()));
    let recorded = states.clone();
    launcher
        .state_changed()
        .connect_direct(move |state| recorded.lock().unwrap().push(*state));
    let statuses = Arc::new(Mutex::new(Vec::new()));
    let finished = statuses.clone();
    let quit = handle.clone();
    launcher.finished().connect_direct(move |status| {
        finished.lock().unwrap().push(*status);
        quit.quit();
    });

    launcher.execute().unwrap();
    assert_eq!(app.exec().await, 0);

    assert_eq!(launcher.output(), "hello\n");
    assert_eq!(*statuses.lock().unwrap(), vec![ExitStatus::NormalExit]);
    assert_eq!(
        *states.lock().unwrap(),
        vec![
            ProcessState::Starting,
            ProcessState::Running,
            ProcessState::NotRunning
        ]
    );
    assert_eq!(launcher.state(), ProcessState::NotRunning);
}

#[tokio::test]
async fn test_launcher_reports_start_failure() {
    let app = app();
    let handle = app.loop_handle();
    let launcher = Launcher::new(handle.clone());
    launcher.set_program("/nonexistent/dvrescue-tool");

    let errors = Arc::new(Mutex::new(Vec::new()));
    let recorded = errors.clone();
    launcher
        .error_occurred()
        .connect_direct(move |error| recorded.lock().unwrap().push(*error));
    let quit = handle.clone();
    launcher.state_changed().connect_direct(move |state| {
        if *state == ProcessState::NotRunning {
            quit.quit();
        }
    });

    launcher.execute().unwrap();
    assert_eq!(app.exec().await, 0);
    assert_eq!(*errors.lock().unwrap(), vec![ProcessError::FailedToStart]);
}

#[test]
fn test_launcher_needs_program() {
    let app = app();
    let launcher = Launcher::new(app.loop_handle());
    assert!(launcher.execute().is_err());
}

#[tokio::test]
async fn test_thread_runs_work_once_at_a_time() {
    let app = app();
    let handle = app.loop_handle();
    let thread = Thread::new(handle.clone());
    let (release, gate) = mpsc::channel::<()>();
    let (done, result) = mpsc::channel::<u32>();

    let quit = handle.clone();
    thread.finished().connect_direct(move |_| quit.quit());

    thread
        .start(move || {
            gate.recv().unwrap();
            done.send(42).unwrap();
        })
        .unwrap();
    assert!(thread.is_running());
    assert!(thread.start(|| {}).is_err(), "second run must be refused");

    release.send(()).unwrap();
    assert_eq!(app.exec().await, 0);
    assert_eq!(result.recv().unwrap(), 42);
    assert!(!thread.is_running());
}

#[tokio::test]
async fn test_thread_recovers_from_panicking_work() {
    let app = app();
    let handle = app.loop_handle();
    let thread = Thread::new(handle.clone());

    let quit = handle.clone();
    thread.finished().connect_direct(move |_| quit.quit());

    thread.start(|| panic!("work failed")).unwrap();
    assert_eq!(app.exec().await, 0);

    assert!(!thread.is_running());
    assert!(thread.start(|| {}).is_ok(), "a new run is accepted after the panic");
}
