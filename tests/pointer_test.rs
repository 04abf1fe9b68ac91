mod common;

use common::{proficiency_of, spawn_server, spawn_server_with, TestServer};
use serde_json::{json, Value};
use skill_assessment::proficiency::TrackDirection;
use skill_assessment::Config;

async fn designer_with(server: &TestServer, skill: &str, proficiency: u8) -> String {
    let id = server.create_designer("Ada").await;
    let (status, _) = server
        .save(
            &id,
            json!({ "skills": [{ "name": skill, "proficiency": proficiency }] }),
        )
        .await;
    assert_eq!(status, 200);
    id
}

async fn active_drags(server: &TestServer) -> u64 {
    let body: Value = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");
    body["active_drags"].as_u64().unwrap()
}

#[tokio::test]
async fn test_drag_commits_snapped_value() {
    let server = spawn_server().await;
    let id = designer_with(&server, "Interaction design", 40).await;

    let (status, body) = server
        .pointer(&id, "interaction_design", json!({ "kind": "down", "position": 500.0 }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["accepted"], true);
    assert_eq!(body["dragging"], true);
    assert_eq!(body["skill"], "Interaction design");
    assert_eq!(body["frame"]["offset"], 120.0);
    assert_eq!(body["frame"]["proficiency"], 40);
    assert_eq!(active_drags(&server).await, 1);

    let (_, body) = server
        .pointer(&id, "interaction_design", json!({ "kind": "move", "position": 530.0 }))
        .await;
    assert_eq!(body["accepted"], true);
    assert_eq!(body["frame"]["offset"], 150.0);
    assert_eq!(body["frame"]["proficiency"], 50);
    assert_eq!(body["frame"]["label"], "Moderate");

    let (_, body) = server
        .pointer(&id, "interaction_design", json!({ "kind": "up" }))
        .await;
    assert_eq!(body["accepted"], true);
    assert_eq!(body["dragging"], false);
    assert!(body.get("frame").is_none());
    assert_eq!(body["committed"]["proficiency"], 50);

    let saved = server.assessment(&id).await;
    assert_eq!(proficiency_of(&saved, "Interaction design"), 50);
    assert_eq!(proficiency_of(&saved, "Business analysis"), 0);
    assert_eq!(active_drags(&server).await, 0);
}

#[tokio::test]
async fn test_small_movement_snaps_back() {
    let server = spawn_server().await;
    let id = designer_with(&server, "Prototyping", 70).await;

    server
        .pointer(&id, "prototyping", json!({ "kind": "down", "position": 0.0 }))
        .await;
    let (_, body) = server
        .pointer(&id, "prototyping", json!({ "kind": "move", "position": 9.0 }))
        .await;
    assert_eq!(body["frame"]["proficiency"], 73);

    let (_, body) = server
        .pointer(&id, "prototyping", json!({ "kind": "up" }))
        .await;
    assert_eq!(body["committed"]["proficiency"], 70);
    assert_eq!(body["committed"]["label"], "Proficient");
}

#[tokio::test]
async fn test_drag_past_track_end_clamps() {
    let server = spawn_server().await;
    let id = designer_with(&server, "Prototyping", 40).await;

    server
        .pointer(&id, "prototyping", json!({ "kind": "down", "position": 100.0 }))
        .await;
    let (_, body) = server
        .pointer(&id, "prototyping", json!({ "kind": "move", "position": 5000.0 }))
        .await;
    assert_eq!(body["frame"]["offset"], 300.0);
    assert_eq!(body["frame"]["proficiency"], 100);

    let (_, body) = server
        .pointer(&id, "prototyping", json!({ "kind": "up" }))
        .await;
    assert_eq!(body["committed"]["proficiency"], 100);
    assert_eq!(body["committed"]["label"], "Master");
}

#[tokio::test]
async fn test_upward_track_inverts_movement() {
    let server = spawn_server_with(Config {
        track_direction: TrackDirection::Upward,
        ..Config::default()
    })
    .await;
    let id = designer_with(&server, "Prototyping", 40).await;

    server
        .pointer(&id, "prototyping", json!({ "kind": "down", "position": 500.0 }))
        .await;
    let (_, body) = server
        .pointer(&id, "prototyping", json!({ "kind": "move", "position": 470.0 }))
        .await;
    assert_eq!(body["frame"]["proficiency"], 50);
}

#[tokio::test]
async fn test_stale_events_are_ignored() {
    let server = spawn_server().await;
    let id = designer_with(&server, "Prototyping", 40).await;

    let (status, body) = server
        .pointer(&id, "prototyping", json!({ "kind": "move", "position": 900.0 }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["accepted"], false);
    assert_eq!(body["dragging"], false);

    let (status, body) = server
        .pointer(&id, "prototyping", json!({ "kind": "up" }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["accepted"], false);
    assert!(body.get("committed").is_none());

    let body: Value = server
        .client
        .get(server.url(&format!("/designers/{}/assessments", id)))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(body["assessments"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_second_press_while_dragging_is_rejected() {
    let server = spawn_server().await;
    let id = designer_with(&server, "Prototyping", 40).await;

    server
        .pointer(&id, "prototyping", json!({ "kind": "down", "position": 500.0 }))
        .await;
    server
        .pointer(&id, "prototyping", json!({ "kind": "move", "position": 530.0 }))
        .await;

    let (_, body) = server
        .pointer(&id, "prototyping", json!({ "kind": "down", "position": 0.0 }))
        .await;
    assert_eq!(body["accepted"], false);
    assert_eq!(body["dragging"], true);
    assert_eq!(body["frame"]["proficiency"], 50);
}

#[tokio::test]
async fn test_cancel_discards_tentative_value() {
    let server = spawn_server().await;
    let id = designer_with(&server, "Prototyping", 40).await;

    server
        .pointer(&id, "prototyping", json!({ "kind": "down", "position": 500.0 }))
        .await;
    server
        .pointer(&id, "prototyping", json!({ "kind": "move", "position": 590.0 }))
        .await;

    let (_, body) = server
        .pointer(&id, "prototyping", json!({ "kind": "cancel" }))
        .await;
    assert_eq!(body["accepted"], true);
    assert_eq!(body["dragging"], false);

    let (_, body) = server
        .pointer(&id, "prototyping", json!({ "kind": "up" }))
        .await;
    assert_eq!(body["accepted"], false);

    let saved = server.assessment(&id).await;
    assert_eq!(proficiency_of(&saved, "Prototyping"), 40);
}

#[tokio::test]
async fn test_skills_drag_independently() {
    let server = spawn_server().await;
    let id = designer_with(&server, "Prototyping", 40).await;

    server
        .pointer(&id, "prototyping", json!({ "kind": "down", "position": 0.0 }))
        .await;
    let (_, body) = server
        .pointer(&id, "user_testing", json!({ "kind": "move", "position": 90.0 }))
        .await;
    assert_eq!(body["accepted"], false);
    assert_eq!(
        server
            .pointer(&id, "prototyping", json!({ "kind": "move", "position": 30.0 }))
            .await
            .1["frame"]["proficiency"],
        50
    );
}

#[tokio::test]
async fn test_pointer_errors() {
    let server = spawn_server().await;
    let id = server.create_designer("Ada").await;

    let (status, _) = server
        .pointer(&id, "prototyping", json!({ "kind": "down" }))
        .await;
    assert_eq!(status, 400);

    let (status, _) = server
        .pointer(&id, "cooking", json!({ "kind": "down", "position": 1.0 }))
        .await;
    assert_eq!(status, 404);

    let unknown = uuid::Uuid::new_v4().to_string();
    let (status, _) = server
        .pointer(&unknown, "prototyping", json!({ "kind": "down", "position": 1.0 }))
        .await;
    assert_eq!(status, 404);
}
