use std::sync::{mpsc, Arc};
use std::time::Duration;

use pitwall_core::{ImportRequest, ImportStatus, ImportType, ProcessType};
use pitwall_engine::{
    ApiKey, ApiSettings, ChannelEventSink, EngineEvent, EngineHandle, MonitorSettings, ReqwestApi,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const STATUS_PATH: &str = "/api/v1/imports/status/17";

async fn next_event(rx: &Arc<std::sync::Mutex<mpsc::Receiver<EngineEvent>>>) -> EngineEvent {
    let rx = rx.clone();
    tokio::task::spawn_blocking(move || {
        rx.lock()
            .unwrap()
            .recv_timeout(Duration::from_secs(5))
            .expect("engine event")
    })
    .await
    .unwrap()
}

async fn status_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == STATUS_PATH)
        .count()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn engine_probes_submits_and_polls_to_completion() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/sessions/42/results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/imports"))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(json!({ "importId": "17", "status": "PENDING" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "importId": "17", "status": "IN_PROGRESS" })),
        )
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "importId": "17",
            "status": "COMPLETE",
            "completionTime": 2400
        })))
        .mount(&server)
        .await;

    let api = Arc::new(
        ReqwestApi::new(ApiSettings {
            base_url: format!("{}/api/v1", server.uri()),
            ..ApiSettings::default()
        })
        .unwrap(),
    );
    let (tx, rx) = mpsc::channel();
    let rx = Arc::new(std::sync::Mutex::new(rx));
    let engine = EngineHandle::new(
        api,
        ApiKey::new("letmein").unwrap(),
        MonitorSettings {
            poll_interval: Duration::from_millis(200),
        },
        Arc::new(ChannelEventSink::new(tx)),
    )
    .expect("engine");

    engine.probe_session(42);
    match next_event(&rx).await {
        EngineEvent::ProbeCompleted { session_id, result } => {
            assert_eq!(session_id, 42);
            assert_eq!(result, Ok(0));
        }
        other => panic!("unexpected event {other:?}"),
    }

    engine.submit(ImportRequest {
        url: "http://x/results.html".to_string(),
        session_id: 42,
        import_type: ImportType::Imsa,
        process_type: ProcessType::Results,
    });
    let import_id = match next_event(&rx).await {
        EngineEvent::SubmitCompleted { result } => result.expect("accepted").import_id,
        other => panic!("unexpected event {other:?}"),
    };
    assert_eq!(import_id, "17");

    engine.watch(import_id.clone());
    let mut statuses = Vec::new();
    while statuses.last() != Some(&ImportStatus::Complete) {
        match next_event(&rx).await {
            EngineEvent::PollCompleted { result, .. } => {
                statuses.push(result.expect("status").status);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert_eq!(statuses, vec![ImportStatus::InProgress, ImportStatus::Complete]);

    // Neither the finished poller nor a repeated watch issue more requests.
    engine.watch(import_id);
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(status_requests(&server).await, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stop_watching_cancels_poller() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "importId": "17", "status": "PENDING" })),
        )
        .mount(&server)
        .await;

    let api = Arc::new(
        ReqwestApi::new(ApiSettings {
            base_url: format!("{}/api/v1", server.uri()),
            ..ApiSettings::default()
        })
        .unwrap(),
    );
    let (tx, rx) = mpsc::channel();
    let rx = Arc::new(std::sync::Mutex::new(rx));
    let engine = EngineHandle::new(
        api,
        ApiKey::new("letmein").unwrap(),
        MonitorSettings {
            poll_interval: Duration::from_millis(50),
        },
        Arc::new(ChannelEventSink::new(tx)),
    )
    .expect("engine");

    engine.watch("17");
    assert!(matches!(
        next_event(&rx).await,
        EngineEvent::PollCompleted { seq: 1, .. }
    ));
    engine.stop_watching("17");
    tokio::time::sleep(Duration::from_millis(100)).await;
    let after_stop = status_requests(&server).await;

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(status_requests(&server).await, after_stop);
}
