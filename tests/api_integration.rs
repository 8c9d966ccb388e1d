//! End-to-end test: spawn the binary in `--serve` mode and drive the
//! full form workflow through the REST store against the live server.

#![cfg(feature = "api")]

use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use windkalk::form::{AnlageInput, DateField, ProjectForm, SubmitOutcome, TextField};
use windkalk::provider::{ProjectStore, RestStore};

struct ChildGuard {
    child: Child,
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn form_submission_round_trips_through_the_live_server() {
    let addr = allocate_bind_addr();
    let _child = spawn_server_process(&addr);

    let store = RestStore::new(&format!("http://{addr}/api/v1"));
    wait_for_server(&store, Duration::from_secs(8));

    let listed = store.list().expect("initial list should succeed");
    assert_eq!(listed.len(), 6);

    let mut form = ProjectForm::new();
    form.set_text(TextField::Name, "Testpark");
    form.set_text(TextField::Standort, "Kiel");
    form.set_date(
        DateField::Baubeginn,
        chrono::NaiveDate::from_ymd_opt(2025, 3, 1),
    );
    form.set_date(
        DateField::Inbetriebnahme,
        chrono::NaiveDate::from_ymd_opt(2026, 6, 1),
    );
    form.set_anlage(0, AnlageInput::Hersteller("Vestas".to_string()));
    form.set_anlage(0, AnlageInput::Modell("V150-4.2".to_string()));
    form.set_anlage(0, AnlageInput::Anzahl(3));

    let outcome = form.submit(&store);
    let SubmitOutcome::Created(created) = outcome else {
        panic!("expected Created, got {outcome:?}");
    };
    assert_eq!(created.id, "7");
    assert_eq!(created.name, "Testpark");
    assert_eq!(created.anlagen[0].anzahl, 3);

    let listed = store.list().expect("second list should succeed");
    assert_eq!(listed.len(), 7);
    assert_eq!(listed[6].name, "Testpark");
}

#[test]
fn server_rejects_invalid_payload_with_detail() {
    let addr = allocate_bind_addr();
    let _child = spawn_server_process(&addr);

    let store = RestStore::new(&format!("http://{addr}/api/v1"));
    wait_for_server(&store, Duration::from_secs(8));

    // bypass client-side validation to exercise the server's checks
    let payload = windkalk::model::NewProjectPayload {
        name: "Testpark".to_string(),
        ek_quote: 120.0,
        ..Default::default()
    };
    let err = store.create(&payload).unwrap_err();
    match err {
        windkalk::provider::ProviderError::Server { status, detail } => {
            assert_eq!(status, 422);
            assert!(detail.contains("EK-Quote"), "unexpected detail: {detail}");
        }
        other => panic!("expected server error, got {other}"),
    }
}

fn allocate_bind_addr() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("ephemeral port bind should succeed");
    let addr = listener
        .local_addr()
        .expect("local_addr should be available")
        .to_string();
    drop(listener);
    addr
}

fn spawn_server_process(bind_addr: &str) -> ChildGuard {
    let child = Command::new(env!("CARGO_BIN_EXE_windkalk"))
        .args(["--serve", "--bind", bind_addr])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("windkalk process should spawn");

    ChildGuard { child }
}

fn wait_for_server(store: &RestStore, timeout: Duration) {
    let start = Instant::now();
    loop {
        if store.list().is_ok() {
            return;
        }
        if start.elapsed() >= timeout {
            panic!("timed out waiting for the project API");
        }
        thread::sleep(Duration::from_millis(50));
    }
}
