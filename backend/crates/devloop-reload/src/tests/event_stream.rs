use crate::{ReloadBroadcaster, ReloadEvent, ReloadState, ShutdownCoordinator, StreamConfig, router};

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use futures::StreamExt;
use tokio::time::{Duration, timeout};
use tower::ServiceExt;

fn state() -> ReloadState {
    ReloadState {
        broadcaster: ReloadBroadcaster::default(),
        shutdown: ShutdownCoordinator::new(),
        config: StreamConfig::default(),
    }
}

fn request(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn given_stream_path_when_requested_then_event_stream_response() {
    let state = state();
    let app = router(state.clone());

    let response = app.oneshot(request("/__rspack_hmr")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/event-stream"));
    assert_eq!(state.broadcaster.subscriber_count(), 1);
}

#[tokio::test]
async fn given_connected_client_when_event_published_then_data_frame_sent() {
    let state = state();
    let app = router(state.clone());

    let response = app.oneshot(request("/__rspack_hmr")).await.unwrap();
    let mut body = response.into_body().into_data_stream();

    state.broadcaster.broadcast(ReloadEvent::RscUpdate);

    let chunk = timeout(Duration::from_secs(1), body.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let text = String::from_utf8(chunk.to_vec()).unwrap();
    assert!(text.contains(r#"data: {"type":"rsc:update"}"#), "got {text:?}");
}

#[tokio::test]
async fn given_shutdown_when_streaming_then_stream_ends() {
    let state = state();
    let app = router(state.clone());

    let response = app.oneshot(request("/__rspack_hmr")).await.unwrap();
    let mut body = response.into_body().into_data_stream();

    state.shutdown.shutdown();

    let next = timeout(Duration::from_secs(1), body.next()).await.unwrap();
    assert!(next.is_none());
}

#[tokio::test]
async fn given_other_path_when_requested_then_not_found() {
    let app = router(state());

    let response = app.oneshot(request("/elsewhere")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
