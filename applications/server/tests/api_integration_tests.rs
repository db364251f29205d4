/// API integration tests
/// Full HTTP request/response cycles against a real SQLite file
mod common;

use axum::http::{Method, StatusCode};
use common::{fixtures, TestApp};
use serde_json::json;

// ===== Health =====

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

// ===== Players =====

#[tokio::test]
async fn test_register_and_login() {
    let app = TestApp::new().await;
    let player_id = app.register("Ada Lovelace", "ada").await;

    let (status, body) = app
        .post(
            "/api/login",
            json!({ "username": "ada", "password": fixtures::PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["player"]["playerId"], player_id);
    assert_eq!(body["player"]["username"], "ada");
    assert_eq!(body["player"]["playerName"], "Ada Lovelace");
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = TestApp::new().await;
    app.register("Ada Lovelace", "ada").await;

    let (status, body) = app
        .post("/api/login", json!({ "username": "ada", "password": "nope" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = app
        .post("/api/login", json!({ "username": "ghost", "password": "nope" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let app = TestApp::new().await;
    app.register("Ada Lovelace", "ada").await;

    let (status, body) = app
        .post(
            "/api/players",
            json!({ "player_name": "Other Ada", "username": "ada", "password": "pw" }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("ada"));
}

#[tokio::test]
async fn test_registration_validation() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post(
            "/api/players",
            json!({ "player_name": "Ada", "username": "ada", "password": "" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/players",
            json!({ "player_name": " ", "username": "ada", "password": "pw" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Missing field
    let (status, body) = app
        .post("/api/players", json!({ "username": "ada" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_list_players() {
    let app = TestApp::new().await;
    let ada = app.register("Ada Lovelace", "ada").await;
    let grace = app.register("Grace Hopper", "grace").await;

    let (status, body) = app.get("/api/players").await;

    assert_eq!(status, StatusCode::OK);
    let players = body.as_array().unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0]["playerId"], ada);
    assert_eq!(players[1]["playerId"], grace);
    assert_eq!(players[1]["playerName"], "Grace Hopper");
}

#[tokio::test]
async fn test_update_password() {
    let app = TestApp::new().await;
    let ada = app.register("Ada Lovelace", "ada").await;

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/players/{ada}/password"),
            Some(json!({ "password": "new-secret" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(
            "/api/login",
            json!({ "username": "ada", "password": fixtures::PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post(
            "/api/login",
            json!({ "username": "ada", "password": "new-secret" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(
            Method::PUT,
            "/api/players/999/password",
            Some(json!({ "password": "x" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_player_removes_owned_leagues() {
    let app = TestApp::new().await;
    let ada = app.register("Ada Lovelace", "ada").await;
    let grace = app.register("Grace Hopper", "grace").await;
    let league = app.create_league("Indie Heads", ada).await;
    app.post(
        &format!("/api/leagues/{league}/join"),
        json!({ "playerId": grace }),
    )
    .await;

    let (status, _) = app.delete(&format!("/api/players/{ada}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, leagues) = app.get("/api/leagues").await;
    assert!(leagues.as_array().unwrap().is_empty());

    let (_, rosters) = app.get(&format!("/api/rosters?playerId={grace}")).await;
    assert!(rosters.as_array().unwrap().is_empty());

    let (status, _) = app.delete(&format!("/api/players/{ada}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ===== Leagues =====

#[tokio::test]
async fn test_create_and_list_leagues() {
    let app = TestApp::new().await;
    let ada = app.register("Ada Lovelace", "ada").await;
    let grace = app.register("Grace Hopper", "grace").await;
    let league = app.create_league("Indie Heads", ada).await;

    let (status, _) = app
        .post(
            &format!("/api/leagues/{league}/join"),
            json!({ "playerId": grace }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/api/leagues").await;
    assert_eq!(status, StatusCode::OK);

    let entry = &body.as_array().unwrap()[0];
    assert_eq!(entry["leagueId"], league);
    assert_eq!(entry["leagueName"], "Indie Heads");
    assert_eq!(entry["ownerId"], ada);
    assert_eq!(entry["ownerName"], "Ada Lovelace");
    assert_eq!(entry["playerCount"], 2);
    assert_eq!(entry["players"][1]["playerName"], "Grace Hopper");
}

#[tokio::test]
async fn test_create_league_validation() {
    let app = TestApp::new().await;
    let ada = app.register("Ada Lovelace", "ada").await;

    let (status, body) = app
        .post("/api/leagues", json!({ "leagueName": "ab", "ownerId": ada }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains('3'));

    let (status, _) = app
        .post(
            "/api/leagues",
            json!({ "leagueName": "Indie Heads", "ownerId": 999 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_join_twice_is_conflict() {
    let app = TestApp::new().await;
    let ada = app.register("Ada Lovelace", "ada").await;
    let grace = app.register("Grace Hopper", "grace").await;
    let league = app.create_league("Indie Heads", ada).await;
    let uri = format!("/api/leagues/{league}/join");

    let (status, _) = app.post(&uri, json!({ "playerId": grace })).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.post(&uri, json!({ "playerId": grace })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, leagues) = app.get("/api/leagues").await;
    assert_eq!(leagues[0]["playerCount"], 2);
}

#[tokio::test]
async fn test_join_unknown_league_is_not_found() {
    let app = TestApp::new().await;
    let ada = app.register("Ada Lovelace", "ada").await;

    let (status, _) = app
        .post("/api/leagues/42/join", json!({ "playerId": ada }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_cannot_leave() {
    let app = TestApp::new().await;
    let ada = app.register("Ada Lovelace", "ada").await;
    let grace = app.register("Grace Hopper", "grace").await;
    let league = app.create_league("Indie Heads", ada).await;
    let leave = format!("/api/leagues/{league}/leave");
    app.post(
        &format!("/api/leagues/{league}/join"),
        json!({ "playerId": grace }),
    )
    .await;

    let (status, _) = app.post(&leave, json!({ "playerId": ada })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.post(&leave, json!({ "playerId": grace })).await;
    assert_eq!(status, StatusCode::OK);

    let (_, leagues) = app.get("/api/leagues").await;
    assert_eq!(leagues[0]["playerCount"], 1);
}

#[tokio::test]
async fn test_transfer_is_not_implemented() {
    let app = TestApp::new().await;
    let ada = app.register("Ada Lovelace", "ada").await;
    let league = app.create_league("Indie Heads", ada).await;

    let (status, body) = app
        .post(
            &format!("/api/leagues/{league}/transfer"),
            json!({ "newOwnerId": ada }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert!(body["error"].is_string());
}

// ===== Artists & rosters =====

#[tokio::test]
async fn test_search_artists() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/artists/search?term=ER").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["artistName"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Phoebe Bridgers", "Soccer Mommy"]);

    let (_, limited) = app.get("/api/artists/search?limit=2").await;
    assert_eq!(limited.as_array().unwrap().len(), 2);
    assert_eq!(limited[0]["artistId"], 3);
    assert_eq!(limited[0]["price"], 400);

    let (status, _) = app.get("/api/artists/search?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_roster_draft_flow() {
    let app = TestApp::new().await;
    let ada = app.register("Ada Lovelace", "ada").await;
    let league = app.create_league("Indie Heads", ada).await;
    let roster = app.roster_of(ada, league).await;
    let artists = format!("/api/rosters/{roster}/artists");

    let (status, _) = app.post(&artists, json!({ "artistId": 3 })).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.post(&artists, json!({ "artistId": 1 })).await;
    assert_eq!(status, StatusCode::OK);

    // Duplicate
    let (status, _) = app.post(&artists, json!({ "artistId": 3 })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.post(&artists, json!({ "artistId": 2 })).await;
    assert_eq!(status, StatusCode::OK);

    // 50 left
    let (status, body) = app.post(&artists, json!({ "artistId": 5 })).await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert!(body["error"].is_string());

    let (_, listing) = app.get(&format!("/api/rosters?playerId={ada}")).await;
    assert_eq!(listing[0]["budget"], 50);
    assert_eq!(listing[0]["leagueName"], "Indie Heads");
    assert_eq!(listing[0]["scoringStatus"], "complete");

    let (_, held) = app.get(&artists).await;
    let ids: Vec<_> = held
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["artistId"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 1, 2]);

    let (status, _) = app.delete(&format!("{artists}/1")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, listing) = app.get(&format!("/api/rosters?playerId={ada}")).await;
    assert_eq!(listing[0]["budget"], 350);

    let (status, _) = app.delete(&format!("{artists}/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_artist_and_roster() {
    let app = TestApp::new().await;
    let ada = app.register("Ada Lovelace", "ada").await;
    let league = app.create_league("Indie Heads", ada).await;
    let roster = app.roster_of(ada, league).await;

    let (status, _) = app
        .post(
            &format!("/api/rosters/{roster}/artists"),
            json!({ "artistId": 999 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post("/api/rosters/999/artists", json!({ "artistId": 1 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rosters_requires_player_id() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/rosters").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_delete_roster() {
    let app = TestApp::new().await;
    let ada = app.register("Ada Lovelace", "ada").await;
    let grace = app.register("Grace Hopper", "grace").await;
    let league = app.create_league("Indie Heads", ada).await;
    app.post(
        &format!("/api/leagues/{league}/join"),
        json!({ "playerId": grace }),
    )
    .await;

    let owner_roster = app.roster_of(ada, league).await;
    let (status, _) = app.delete(&format!("/api/rosters/{owner_roster}")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let member_roster = app.roster_of(grace, league).await;
    let (status, _) = app.delete(&format!("/api/rosters/{member_roster}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, leagues) = app.get("/api/leagues").await;
    assert_eq!(leagues[0]["playerCount"], 1);
}

#[tokio::test]
async fn test_catalog_outage_during_draft_is_unavailable() {
    let app = TestApp::new().await;
    let ada = app.register("Ada Lovelace", "ada").await;
    let league = app.create_league("Indie Heads", ada).await;
    let roster = app.roster_of(ada, league).await;

    app.catalog.set_available(false);
    let (status, body) = app
        .post(
            &format!("/api/rosters/{roster}/artists"),
            json!({ "artistId": 1 }),
        )
        .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].is_string());

    let (_, listing) = app.get(&format!("/api/rosters?playerId={ada}")).await;
    assert_eq!(listing[0]["budget"], 1000);
}
