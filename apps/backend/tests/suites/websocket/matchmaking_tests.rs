// Queueing and pairing through the gateway.

use serde_json::json;

use crate::support::server::{join_pair, start_test_server, test_config, TestResult, RECV};

#[actix_web::test]
async fn two_players_are_matched() -> TestResult {
    let server = start_test_server(test_config(3)).await?;
    let (mut a, a_id) = server.connect().await?;
    let (mut b, b_id) = server.connect().await?;

    a.send_event("JOIN", json!({ "displayName": "alice", "playerId": 11 }))
        .await?;
    let waiting = a.expect_event("WAITING_FOR_OPPONENT", RECV).await?;
    assert_eq!(waiting["payload"]["position"], 1);

    b.send_event("join", json!({ "username": "bob" })).await?;
    let found_a = a.expect_event("MATCH_FOUND", RECV).await?;
    let found_b = b.expect_event("MATCH_FOUND", RECV).await?;

    assert_eq!(found_a["payload"]["opponent"], "bob");
    assert_eq!(found_a["payload"]["you"], a_id.as_str());
    assert_eq!(found_b["payload"]["opponent"], "alice");
    assert_eq!(found_b["payload"]["you"], b_id.as_str());

    let players = found_a["payload"]["players"].as_array().unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0]["playerId"], 11);
    assert!(players[1]["playerId"].is_null());

    let start = a.expect_event("GAME_START", RECV).await?;
    assert_eq!(start["payload"]["maxRounds"], 3);
    assert_eq!(start["payload"]["round"], 1);
    assert_eq!(start["payload"]["timeoutMs"], 400);
    assert_eq!(start["payload"]["timeout"], 0);
    server.wait_for(|s| s.sessions == 1 && s.queued == 0).await?;

    a.close().await?;
    b.close().await?;
    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn third_player_waits_for_the_next_arrival() -> TestResult {
    let server = start_test_server(test_config(3)).await?;
    let pair = join_pair(&server, "p1", "p2").await?;

    let (mut c, _) = server.connect().await?;
    c.send_event("JOIN", json!({ "displayName": "p3" })).await?;
    let waiting = c.expect_event("WAITING_FOR_OPPONENT", RECV).await?;
    assert_eq!(waiting["payload"]["position"], 1);
    server.wait_for(|s| s.queued == 1 && s.sessions == 1).await?;

    let (mut d, _) = server.connect().await?;
    d.send_event("JOIN", json!({ "displayName": "p4" })).await?;
    let found = c.expect_event("MATCH_FOUND", RECV).await?;
    assert_eq!(found["payload"]["opponent"], "p4");
    assert_ne!(found["payload"]["sessionId"], pair.session_id.as_str());
    server.wait_for(|s| s.queued == 0 && s.sessions == 2).await?;

    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn duplicate_join_is_rejected() -> TestResult {
    let server = start_test_server(test_config(3)).await?;
    let (mut a, _) = server.connect().await?;

    a.send_event("JOIN", json!({})).await?;
    a.expect_event("WAITING_FOR_OPPONENT", RECV).await?;
    a.send_event("JOIN", json!({})).await?;
    let err = a.expect_event("ERROR", RECV).await?;
    assert_eq!(err["payload"]["code"], "ALREADY_QUEUED");

    let (mut b, _) = server.connect().await?;
    b.send_event("JOIN", json!({})).await?;
    a.expect_event("MATCH_FOUND", RECV).await?;
    a.send_event("JOIN", json!({})).await?;
    let err = a.expect_event("ERROR", RECV).await?;
    assert_eq!(err["payload"]["code"], "ALREADY_IN_SESSION");

    a.close().await?;
    b.close().await?;
    server.stop().await;
    Ok(())
}

#[actix_web::test]
async fn leaving_the_queue() -> TestResult {
    let server = start_test_server(test_config(3)).await?;
    let (mut a, _) = server.connect().await?;

    a.send_event("JOIN", json!({})).await?;
    a.expect_event("WAITING_FOR_OPPONENT", RECV).await?;
    a.send_event("LEAVE", json!({})).await?;
    let info = a.expect_event("INFO", RECV).await?;
    assert_eq!(info["payload"]["message"], "Left queue");
    server.wait_for(|s| s.queued == 0).await?;

    a.close().await?;
    server.stop().await;
    Ok(())
}
