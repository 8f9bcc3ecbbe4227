//! End-to-end tests for the WebSocket sync channel.

mod common;

use dmscreen_core::event::ServerEvent;
use dmscreen_core::handout::Handout;
use dmscreen_core::initiative::ItemId;
use dmscreen_core::state::SessionState;
use dmscreen_test_support::party_order;
use serde_json::json;

fn party_update() -> serde_json::Value {
    json!({
        "event": "initiative:update",
        "data": {
            "currentId": 2,
            "items": [
                { "id": 1, "name": "Aria" },
                { "id": 2, "name": "Borin" },
                { "id": 3, "name": "Cade" }
            ],
            "round": 1
        }
    })
}

#[tokio::test]
async fn test_new_connection_receives_empty_snapshot() {
    let server = common::spawn_server().await;
    let mut player = common::ws_connect(&server, "/ws").await;

    let event = common::recv_event(&mut player).await;

    assert_eq!(event, ServerEvent::Snapshot(SessionState::default()));
}

#[tokio::test]
async fn test_initiative_update_is_broadcast_to_gm_and_players() {
    // Arrange
    let server = common::spawn_server().await;
    let mut gm = common::ws_connect(&server, "/ws").await;
    let mut player = common::ws_connect(&server, "/ws").await;
    common::recv_event(&mut gm).await;
    common::recv_event(&mut player).await;

    // Act
    common::send_json(&mut gm, &party_update()).await;

    // Assert
    let expected = ServerEvent::InitiativeReceive(party_order());
    assert_eq!(common::recv_event(&mut gm).await, expected);
    assert_eq!(common::recv_event(&mut player).await, expected);
}

#[tokio::test]
async fn test_late_joiner_gets_current_state_without_empty_flash() {
    // Arrange
    let server = common::spawn_server().await;
    let mut gm = common::ws_connect(&server, "/ws").await;
    common::recv_event(&mut gm).await;
    common::send_json(&mut gm, &party_update()).await;
    common::send_json(
        &mut gm,
        &json!({
            "event": "handout:show",
            "data": { "id": "map", "url": "/map.png", "description": "Dungeon map" }
        }),
    )
    .await;
    common::recv_event(&mut gm).await;
    common::recv_event(&mut gm).await;

    // Act
    let mut late = common::ws_connect(&server, "/ws").await;

    // Assert
    assert_eq!(
        common::recv_event(&mut late).await,
        ServerEvent::Snapshot(SessionState {
            initiative: party_order(),
            handout: Some(Handout::new("map", "/map.png", "Dungeon map")),
        })
    );
    common::assert_silent(&mut late).await;
}

#[tokio::test]
async fn test_invalid_update_is_reported_to_originator_only() {
    // Arrange
    let server = common::spawn_server().await;
    let mut gm = common::ws_connect(&server, "/ws").await;
    let mut player = common::ws_connect(&server, "/ws").await;
    common::recv_event(&mut gm).await;
    common::recv_event(&mut player).await;

    // Act
    common::send_json(
        &mut gm,
        &json!({
            "event": "initiative:update",
            "data": {
                "currentId": 1,
                "items": [{ "id": 1, "name": "Aria" }, { "id": 1, "name": "Aria" }],
                "round": 1
            }
        }),
    )
    .await;

    // Assert
    let ServerEvent::Error(payload) = common::recv_event(&mut gm).await else {
        panic!("expected session:error");
    };
    assert_eq!(payload.code, "validation_error");
    assert!(payload.message.contains("duplicate"));
    common::assert_silent(&mut player).await;

    let session = server.hub.get("1").await.unwrap();
    assert_eq!(session.snapshot().await, SessionState::default());
}

#[tokio::test]
async fn test_garbage_frame_is_rejected_and_connection_survives() {
    // Arrange
    let server = common::spawn_server().await;
    let mut gm = common::ws_connect(&server, "/ws").await;
    common::recv_event(&mut gm).await;

    // Act
    common::send_json(&mut gm, &json!({ "hello": "world" })).await;
    let rejection = common::recv_event(&mut gm).await;
    common::send_json(&mut gm, &party_update()).await;

    // Assert
    assert!(matches!(rejection, ServerEvent::Error(_)));
    assert_eq!(
        common::recv_event(&mut gm).await,
        ServerEvent::InitiativeReceive(party_order())
    );
}

#[tokio::test]
async fn test_handout_show_then_clear_closes_overlay_everywhere() {
    // Arrange
    let server = common::spawn_server().await;
    let mut gm = common::ws_connect(&server, "/ws").await;
    let mut player = common::ws_connect(&server, "/ws").await;
    common::recv_event(&mut gm).await;
    common::recv_event(&mut player).await;

    // Act
    common::send_json(
        &mut gm,
        &json!({
            "event": "handout:show",
            "data": { "id": "map", "url": "/map.png", "description": "Dungeon map" }
        }),
    )
    .await;
    common::send_json(&mut gm, &json!({ "event": "handout:show", "data": null })).await;

    // Assert
    assert_eq!(
        common::recv_event(&mut player).await,
        ServerEvent::HandoutReceiveShow(Some(Handout::new("map", "/map.png", "Dungeon map")))
    );
    assert_eq!(
        common::recv_event(&mut player).await,
        ServerEvent::HandoutReceiveShow(None)
    );
}

#[tokio::test]
async fn test_back_to_back_updates_are_broadcast_in_order() {
    // Arrange
    let server = common::spawn_server().await;
    let mut gm = common::ws_connect(&server, "/ws").await;
    let mut player = common::ws_connect(&server, "/ws").await;
    common::recv_event(&mut gm).await;
    common::recv_event(&mut player).await;
    let mut second = party_update();
    second["data"]["currentId"] = json!(3);

    // Act
    common::send_json(&mut gm, &party_update()).await;
    common::send_json(&mut gm, &second).await;

    // Assert
    let mut expected_second = party_order();
    expected_second.current_id = Some(ItemId::Number(3));
    assert_eq!(
        common::recv_event(&mut player).await,
        ServerEvent::InitiativeReceive(party_order())
    );
    assert_eq!(
        common::recv_event(&mut player).await,
        ServerEvent::InitiativeReceive(expected_second)
    );
}

#[tokio::test]
async fn test_advance_wraps_round_for_all_clients() {
    // Arrange
    let server = common::spawn_server().await;
    let mut gm = common::ws_connect(&server, "/ws").await;
    let mut player = common::ws_connect(&server, "/ws").await;
    common::recv_event(&mut gm).await;
    common::recv_event(&mut player).await;
    common::send_json(&mut gm, &party_update()).await;
    common::recv_event(&mut player).await;

    // Act
    common::send_json(&mut gm, &json!({ "event": "initiative:advance" })).await;
    common::send_json(&mut gm, &json!({ "event": "initiative:advance" })).await;

    // Assert
    let ServerEvent::InitiativeReceive(cade) = common::recv_event(&mut player).await else {
        panic!("expected initiative:receive");
    };
    assert_eq!(cade.current_player().unwrap().name, "Cade");
    assert_eq!(cade.next_player().unwrap().name, "Aria");

    let ServerEvent::InitiativeReceive(wrapped) = common::recv_event(&mut player).await else {
        panic!("expected initiative:receive");
    };
    assert_eq!(wrapped.current_id, Some(ItemId::Number(1)));
    assert_eq!(wrapped.round, 2);
}

#[tokio::test]
async fn test_sessions_do_not_share_state() {
    // Arrange
    let server = common::spawn_server().await;
    let mut table_a = common::ws_connect(&server, "/sessions/a/ws").await;
    let mut table_b = common::ws_connect(&server, "/sessions/b/ws").await;
    common::recv_event(&mut table_a).await;
    common::recv_event(&mut table_b).await;

    // Act
    common::send_json(&mut table_a, &party_update()).await;

    // Assert
    assert_eq!(
        common::recv_event(&mut table_a).await,
        ServerEvent::InitiativeReceive(party_order())
    );
    common::assert_silent(&mut table_b).await;
    assert_eq!(server.hub.len().await, 2);
}

#[tokio::test]
async fn test_disconnect_unregisters_connection() {
    // Arrange
    let server = common::spawn_server().await;
    let mut player = common::ws_connect(&server, "/ws").await;
    common::recv_event(&mut player).await;
    let session = server.hub.get("1").await.unwrap();
    assert_eq!(session.connection_count().await, 1);

    // Act
    player.close(None).await.unwrap();
    drop(player);

    // Assert
    tokio::time::timeout(common::TIMEOUT, async {
        while session.connection_count().await > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
    })
    .await
    .unwrap();
}
