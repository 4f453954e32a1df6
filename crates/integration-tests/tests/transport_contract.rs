//! Transport contract tests
//!
//! Every invocation against a real HTTP server ends in exactly one of:
//! a decoded output, Transport, ServerRejection or Decode.

use ruleskit_integration_tests::{MockRuleService, Reply};
use ruleskit_sdk::shapes::{
    BBox, BeamCollisionInput, BeamSegment, DynamicKerningInput, LyricsHyphenMelismaOutput,
};
use ruleskit_sdk::{ClientConfig, OperationPath, RulesError, RulesKitClient, TransportErrorKind};
use std::time::Duration;

const BEAM_PATH: &str = "/apply/collision/BeamCollision-resolve_overlaps";

fn beam_input() -> BeamCollisionInput {
    BeamCollisionInput {
        beam_segments: vec![BeamSegment::new(0.0, 0.0, 10.0, 2.0)],
        nearby_grobs: vec![BBox::new(1.0, 1.0, 2.0, 2.0)],
    }
}

#[tokio::test]
async fn test_resolve_beam_collisions_example() {
    let service = MockRuleService::start().await;
    service.on(BEAM_PATH, Reply::json(200, r#"{"offsets":[0.5]}"#));
    let client = RulesKitClient::connect(service.base_url()).unwrap();

    let output = client.resolve_beam_collisions(&beam_input()).await.unwrap();

    assert_eq!(output.offsets, vec![0.5]);
}

#[tokio::test]
async fn test_request_is_json_post_to_joined_path() {
    let service = MockRuleService::start().await;
    service.on(
        "/rules/v1/apply/collision/BeamCollision-resolve_overlaps",
        Reply::json(200, r#"{"offsets":[]}"#),
    );
    let client = RulesKitClient::connect(format!("{}/rules/v1", service.base_url())).unwrap();

    client.resolve_beam_collisions(&beam_input()).await.unwrap();

    let received = service.received();
    assert_eq!(received.len(), 1, "exactly one request per invocation");
    assert_eq!(received[0].method, "POST");
    assert_eq!(
        received[0].path,
        "/rules/v1/apply/collision/BeamCollision-resolve_overlaps"
    );
    assert_eq!(received[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(
        received[0].json(),
        serde_json::json!({
            "beamSegments": [{"x1": 0.0, "y1": 0.0, "x2": 10.0, "y2": 2.0}],
            "nearbyGrobs": [{"x": 1.0, "y": 1.0, "w": 2.0, "h": 2.0}]
        })
    );
}

#[tokio::test]
async fn test_http_500_is_server_rejection() {
    let service = MockRuleService::start().await;
    service.on(BEAM_PATH, Reply::json(500, "\"internal error\""));
    let client = RulesKitClient::connect(service.base_url()).unwrap();

    let err = client.resolve_beam_collisions(&beam_input()).await.unwrap_err();

    match err {
        RulesError::ServerRejection { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "\"internal error\"");
        }
        other => panic!("expected ServerRejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rejection_body_is_never_decoded() {
    let service = MockRuleService::start().await;
    // A body that would decode fine as the output shape
    service.on(BEAM_PATH, Reply::json(422, r#"{"offsets":[0.5]}"#));
    let client = RulesKitClient::connect(service.base_url()).unwrap();

    let err = client.resolve_beam_collisions(&beam_input()).await.unwrap_err();

    assert!(err.is_server_rejection());
    assert_eq!(err.status(), Some(422));
}

#[tokio::test]
async fn test_unscripted_path_is_rejection_not_decode() {
    let service = MockRuleService::start().await;
    let client = RulesKitClient::connect(service.base_url()).unwrap();

    let err = client.resolve_beam_collisions(&beam_input()).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_missing_required_field_is_decode_error() {
    let service = MockRuleService::start().await;
    service.on(
        "/apply/dynamicstext/DynamicAlign-kerning_with_hairpins",
        Reply::json(200, r#"{"dynamicPosition":{"x":1.0}}"#),
    );
    let client = RulesKitClient::connect(service.base_url()).unwrap();

    let result = client
        .dynamic_kerning(&DynamicKerningInput {
            dynamic_bbox: BBox::new(0.0, 0.0, 2.0, 1.0),
            hairpin_bbox: None,
            lyric_bbox: None,
        })
        .await;

    match result {
        Err(RulesError::Decode { path, .. }) => {
            assert_eq!(path, "apply/dynamicstext/DynamicAlign-kerning_with_hairpins")
        }
        other => panic!("expected Decode, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_success_body_is_decode_error() {
    let service = MockRuleService::start().await;
    service.on(BEAM_PATH, Reply::json(200, "<html>ok</html>"));
    let client = RulesKitClient::connect(service.base_url()).unwrap();

    let err = client.resolve_beam_collisions(&beam_input()).await.unwrap_err();

    assert!(err.is_decode());
}

#[tokio::test]
async fn test_success_decodes_like_independent_parse() {
    let body = r#"{"lyricOffsets":[0.0,0.25,-0.5],"baselineYOffsetSP":1.75,"debug":{"ms":3}}"#;
    let service = MockRuleService::start().await;
    service.on(
        "/apply/verticalstack/Lyrics-hyphen_melisma_spacing_interaction",
        Reply::json(200, body),
    );
    let client = RulesKitClient::connect(service.base_url()).unwrap();

    let output = client
        .lyrics_hyphen_melisma(&ruleskit_sdk::shapes::LyricsHyphenMelismaInput {
            syllable_bboxes: vec![BBox::new(0.0, -6.0, 3.0, 1.0)],
            hyphen_bboxes: Some(vec![BBox::new(3.2, -5.6, 0.8, 0.2)]),
            melisma_line_bboxes: None,
            staff_baseline: -4.0,
        })
        .await
        .unwrap();

    let expected: LyricsHyphenMelismaOutput = serde_json::from_str(body).unwrap();
    assert_eq!(output, expected);
}

#[tokio::test]
async fn test_untyped_echo_is_lossless() {
    let service = MockRuleService::start().await;
    service.on("/apply/beaming/Beaming-auto_knee_threshold", Reply::echo());
    let client = RulesKitClient::connect(service.base_url()).unwrap();
    let input = serde_json::json!({
        "notePositionsSP": [0.0, 7.5, -3.25],
        "stemDirections": ["up", "down", "up"],
        "nested": {"flag": true, "count": 3}
    });

    let path = OperationPath::new("apply/beaming/Beaming-auto_knee_threshold").unwrap();
    let output = client.apply_untyped(&path, &input).await.unwrap();

    assert_eq!(output, input);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Reserve a port, then close it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RulesKitClient::connect(format!("http://{}", addr)).unwrap();

    let err = client.resolve_beam_collisions(&beam_input()).await.unwrap_err();

    match err {
        RulesError::Transport { kind, .. } => assert_eq!(kind, TransportErrorKind::Connect),
        other => panic!("expected Transport, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let service = MockRuleService::start().await;
    service.on(
        BEAM_PATH,
        Reply::json(200, r#"{"offsets":[0.5]}"#).after(Duration::from_secs(5)),
    );
    let config = ClientConfig::new(service.base_url()).with_timeout(Duration::from_millis(100));
    let client = RulesKitClient::with_config(config).unwrap();

    let err = client.resolve_beam_collisions(&beam_input()).await.unwrap_err();

    match err {
        RulesError::Transport { kind, .. } => assert_eq!(kind, TransportErrorKind::Timeout),
        other => panic!("expected Transport timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_endpoint_is_rejected_at_construction() {
    let result = RulesKitClient::connect("ftp://127.0.0.1:8000");

    assert!(matches!(result, Err(RulesError::InvalidEndpoint(_))));
}
