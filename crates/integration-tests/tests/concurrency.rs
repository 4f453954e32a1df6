//! Concurrent and cancelled invocations on one shared client

use ruleskit_integration_tests::{MockRuleService, Reply};
use ruleskit_sdk::shapes::{
    BBox, BeamCollisionInput, BeamSegment, NoteSpacingOpticalWeightsInput, StemDirection,
};
use ruleskit_sdk::RulesKitClient;
use std::time::Duration;

const BEAM_PATH: &str = "/apply/collision/BeamCollision-resolve_overlaps";
const SPACING_PATH: &str = "/apply/spacing/NoteSpacing-optical_stem_weight_scalars";

fn beam_input() -> BeamCollisionInput {
    BeamCollisionInput {
        beam_segments: vec![BeamSegment::new(0.0, 0.0, 10.0, 2.0)],
        nearby_grobs: vec![BBox::new(1.0, 1.0, 2.0, 2.0)],
    }
}

fn spacing_input() -> NoteSpacingOpticalWeightsInput {
    NoteSpacingOpticalWeightsInput {
        stem_directions: vec![StemDirection::Up, StemDirection::Down],
        beat_strengths: vec![1.0, 0.5],
    }
}

#[tokio::test]
async fn test_concurrent_invocations_get_their_own_responses() {
    let service = MockRuleService::start().await;
    // The slower reply is issued first so completion order differs from issue order
    service
        .on(
            BEAM_PATH,
            Reply::json(200, r#"{"offsets":[0.5]}"#).after(Duration::from_millis(200)),
        )
        .on(
            SPACING_PATH,
            Reply::json(200, r#"{"weights":[1.1,0.9]}"#).after(Duration::from_millis(20)),
        );
    let client = RulesKitClient::connect(service.base_url()).unwrap();

    let beam_input = beam_input();
    let spacing_input = spacing_input();
    let (beams, spacing) = tokio::join!(
        client.resolve_beam_collisions(&beam_input),
        client.note_spacing_optical_weights(&spacing_input),
    );

    assert_eq!(beams.unwrap().offsets, vec![0.5]);
    assert_eq!(spacing.unwrap().weights, vec![1.1, 0.9]);
    assert_eq!(service.received_count(), 2);
}

#[tokio::test]
async fn test_many_tasks_share_one_client() {
    let service = MockRuleService::start().await;
    service.on(BEAM_PATH, Reply::echo());
    let client = RulesKitClient::connect(service.base_url()).unwrap();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                let input = serde_json::json!({ "offsets": [i as f64] });
                let output = client
                    .apply_rule("CollisionAgent", "RULE.BeamCollision.resolve_overlaps", &input)
                    .await
                    .unwrap();
                (i, output)
            })
        })
        .collect();

    let results = futures::future::join_all(handles).await;

    for result in results {
        let (i, output) = result.unwrap();
        assert_eq!(output["offsets"][0], i as f64);
    }
    assert_eq!(service.received_count(), 16);
}

#[tokio::test]
async fn test_cancelled_invocation_leaves_client_usable() {
    let service = MockRuleService::start().await;
    service
        .on(
            BEAM_PATH,
            Reply::json(200, r#"{"offsets":[0.5]}"#).after(Duration::from_secs(5)),
        )
        .on(SPACING_PATH, Reply::json(200, r#"{"weights":[1.0]}"#));
    let client = RulesKitClient::connect(service.base_url()).unwrap();

    let input = beam_input();
    let cancelled = tokio::time::timeout(
        Duration::from_millis(100),
        client.resolve_beam_collisions(&input),
    )
    .await;
    assert!(cancelled.is_err(), "slow invocation should have been dropped");

    let output = client
        .note_spacing_optical_weights(&spacing_input())
        .await
        .unwrap();
    assert_eq!(output.weights, vec![1.0]);
}
