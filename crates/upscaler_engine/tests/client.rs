use std::time::Duration;

use pretty_assertions::assert_eq;
use upscaler_engine::{
    FailureKind, ReqwestUpscaleClient, UpscaleClient, UpscaleRequest, UpscaleSettings,
};
use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> UpscaleSettings {
    let endpoint = Url::parse(&format!("{}/upscale", server.uri())).unwrap();
    UpscaleSettings::with_endpoint(endpoint)
}

fn cat_request(scale: u32, force_cpu: bool) -> UpscaleRequest {
    UpscaleRequest {
        file_name: "cat.jpg".to_string(),
        mime_type: "image/jpeg".to_string(),
        bytes: b"not really a jpeg".to_vec(),
        scale,
        force_cpu,
    }
}

#[tokio::test]
async fn client_posts_multipart_and_decodes_metrics() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upscale"))
        .and(body_string_contains("name=\"file\"; filename=\"cat.jpg\""))
        .and(body_string_contains("name=\"scale\"\r\n\r\n4"))
        .and(body_string_contains("name=\"force_cpu\"\r\n\r\ntrue"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"url":"/outputs/a.png","metrics":{"technique":"Real-ESRGAN","model_architecture":"RRDBNet","processing_time":1.23,"input_resolution":"100x100","output_resolution":"400x400","device_used":"CPU","output_size":"0.42MB","scale_factor":4}}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReqwestUpscaleClient::new(settings_for(&server)).expect("client");
    let response = client.upscale(&cat_request(4, true)).await.expect("upscale ok");

    assert_eq!(response.url, "/outputs/a.png");
    assert_eq!(response.metrics.model_architecture, "RRDBNet");
    assert_eq!(response.metrics.input_resolution, "100x100");
    assert_eq!(response.metrics.device_used.as_deref(), Some("CPU"));
    assert_eq!(response.metrics.output_size.as_deref(), Some("0.42MB"));
    assert_eq!(response.metrics.scale_factor, Some(4));
}

#[tokio::test]
async fn server_error_message_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upscale"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"{"error":"model unavailable"}"#),
        )
        .mount(&server)
        .await;

    let client = ReqwestUpscaleClient::new(settings_for(&server)).expect("client");
    let err = client.upscale(&cat_request(2, false)).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::ServerRejected);
    assert_eq!(err.server_message.as_deref(), Some("model unavailable"));
    assert!(err.is_server_failure());
}

#[tokio::test]
async fn status_without_body_reports_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upscale"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = ReqwestUpscaleClient::new(settings_for(&server)).expect("client");
    let err = client.upscale(&cat_request(2, true)).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert_eq!(err.server_message, None);
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upscale"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_string("{}"),
        )
        .mount(&server)
        .await;

    let settings = UpscaleSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let client = ReqwestUpscaleClient::new(settings).expect("client");
    let err = client.upscale(&cat_request(2, true)).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let endpoint = Url::parse(&format!("http://127.0.0.1:{port}/upscale")).unwrap();
    let settings = UpscaleSettings::with_endpoint(endpoint);

    let client = ReqwestUpscaleClient::new(settings).expect("client");
    let err = client.upscale(&cat_request(2, true)).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Network);
    assert!(!err.is_server_failure());
}
