use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::{json, Value};
use shared::rating::Score;
use uuid::Uuid;

use crate::build_app;
use crate::config::AppConfig;
use crate::store::LedgerStore;

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("rateboard_test_{}", Uuid::new_v4()))
}

fn client_with_dir(players: &str, data_dir: PathBuf) -> Client {
    let config = AppConfig::new(players, 0, data_dir);
    let rocket = build_app(config).expect("failed to open ledger");
    Client::tracked(rocket).expect("failed to build client")
}

fn client(players: &str) -> Client {
    client_with_dir(players, scratch_dir())
}

fn login(client: &Client, player: &str) {
    let response = client
        .post("/api/login")
        .header(ContentType::JSON)
        .body(json!({ "player": player }).to_string())
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
}

fn cast(client: &Client, to: &str, score: Value) -> (Status, Value) {
    let response = client
        .post("/api/vote")
        .header(ContentType::JSON)
        .body(json!({ "to": to, "score": score }).to_string())
        .dispatch();
    let status = response.status();
    let body = response.into_json::<Value>().expect("json body");
    (status, body)
}

fn ratings(client: &Client) -> Value {
    let response = client.get("/api/ratings").dispatch();
    assert_eq!(response.status(), Status::Ok);
    response.into_json::<Value>().expect("json body")["summary"].clone()
}

#[test]
fn players_returns_roster_in_order() {
    let client = client("carol, alice ,bob");
    let response = client.get("/api/players").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_json::<Value>().unwrap();
    assert_eq!(body, json!({ "players": ["carol", "alice", "bob"] }));
}

#[test]
fn login_rejects_unknown_player() {
    let client = client("a,b,c");
    for body in [
        json!({ "player": "mallory" }),
        json!({ "player": "" }),
        json!({ "player": "A" }),
        json!({}),
    ] {
        let response = client
            .post("/api/login")
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch();
        assert_eq!(response.status(), Status::BadRequest);
        let body = response.into_json::<Value>().unwrap();
        assert_eq!(body["error"], "invalid_player");
    }
}

#[test]
fn login_me_logout_round_trip() {
    let client = client("a,b,c");

    let response = client.get("/api/me").dispatch();
    assert_eq!(response.into_json::<Value>().unwrap()["player"], Value::Null);

    let response = client
        .post("/api/login")
        .header(ContentType::JSON)
        .body(json!({ "player": "b" }).to_string())
        .dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.into_json::<Value>().unwrap(),
        json!({ "ok": true, "player": "b" })
    );

    let response = client.get("/api/me").dispatch();
    assert_eq!(response.into_json::<Value>().unwrap()["player"], "b");

    let response = client.post("/api/logout").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_json::<Value>().unwrap(), json!({ "ok": true }));

    let response = client.get("/api/me").dispatch();
    assert_eq!(response.into_json::<Value>().unwrap()["player"], Value::Null);

    // logout with no session is still ok
    let response = client.post("/api/logout").dispatch();
    assert_eq!(response.status(), Status::Ok);
}

#[test]
fn vote_requires_session() {
    let client = client("a,b,c");
    let (status, body) = cast(&client, "b", json!(7));
    assert_eq!(status, Status::Unauthorized);
    assert_eq!(body["error"], "not_logged_in");
}

#[test]
fn vote_error_codes_in_order() {
    let client = client("a,b,c");
    login(&client, "a");

    // bad target beats bad score
    let (status, body) = cast(&client, "zz", json!(99));
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body["error"], "invalid_to");

    // self-vote beats bad score
    let (status, body) = cast(&client, "a", json!(99));
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body["error"], "self_vote_forbidden");

    for bad in [json!(0), json!(11), json!(1.5), json!("abc"), Value::Null] {
        let (status, body) = cast(&client, "b", bad.clone());
        assert_eq!(status, Status::BadRequest, "score {bad}");
        assert_eq!(body["error"], "invalid_score", "score {bad}");
    }

    // nothing above should have reached the ledger
    assert_eq!(ratings(&client)["b"], json!({ "average": 0.0, "count": 0 }));
}

#[test]
fn boundary_scores_accepted() {
    let client = client("a,b,c");
    login(&client, "a");

    let (status, body) = cast(&client, "b", json!(1));
    assert_eq!(status, Status::Ok);
    assert_eq!(body, json!({ "ok": true }));

    let (status, _) = cast(&client, "c", json!(10));
    assert_eq!(status, Status::Ok);

    let summary = ratings(&client);
    assert_eq!(summary["b"], json!({ "average": 1.0, "count": 1 }));
    assert_eq!(summary["c"], json!({ "average": 10.0, "count": 1 }));
}

#[test]
fn full_flow_matches_expected_summary() {
    let client = client("a,b,c");

    login(&client, "a");
    assert_eq!(cast(&client, "b", json!(8)).0, Status::Ok);

    login(&client, "c");
    assert_eq!(cast(&client, "b", json!(4)).0, Status::Ok);

    login(&client, "b");
    assert_eq!(cast(&client, "a", json!(10)).0, Status::Ok);

    let summary = ratings(&client);
    assert_eq!(summary["a"], json!({ "average": 10.0, "count": 1 }));
    assert_eq!(summary["b"], json!({ "average": 6.0, "count": 2 }));
    assert_eq!(summary["c"], json!({ "average": 0.0, "count": 0 }));
}

#[test]
fn revote_overwrites_prior_score() {
    let client = client("a,b,c");
    login(&client, "a");

    assert_eq!(cast(&client, "b", json!(8)).0, Status::Ok);
    assert_eq!(cast(&client, "b", json!(2)).0, Status::Ok);

    let summary = ratings(&client);
    assert_eq!(summary["b"], json!({ "average": 2.0, "count": 1 }));
}

#[test]
fn ledger_survives_restart() {
    let data_dir = scratch_dir();

    {
        let client = client_with_dir("a,b,c", data_dir.clone());
        login(&client, "a");
        assert_eq!(cast(&client, "b", json!(9)).0, Status::Ok);
    }

    let client = client_with_dir("a,b,c", data_dir);
    let summary = ratings(&client);
    assert_eq!(summary["b"], json!({ "average": 9.0, "count": 1 }));
}

#[test]
fn failed_flush_rolls_back_and_reports_500() {
    let data_dir = scratch_dir();
    let client = client_with_dir("a,b,c", data_dir.clone());
    login(&client, "a");

    // occupy the flush's temp-file slot with a directory so the write fails
    std::fs::create_dir_all(data_dir.join("votes.json.tmp")).unwrap();

    let (status, body) = cast(&client, "b", json!(7));
    assert_eq!(status, Status::InternalServerError);
    assert_eq!(body["error"], "persistence_error");

    // the upsert was rolled back in memory...
    assert_eq!(ratings(&client)["b"], json!({ "average": 0.0, "count": 0 }));

    // ...and never reached disk
    std::fs::remove_dir(data_dir.join("votes.json.tmp")).unwrap();
    drop(client);
    let client = client_with_dir("a,b,c", data_dir);
    assert_eq!(ratings(&client)["b"], json!({ "average": 0.0, "count": 0 }));
}

#[test]
fn concurrent_votes_by_same_voter_all_survive() {
    let ledger_path = scratch_dir().join("votes.json");
    let store = Arc::new(LedgerStore::open(&ledger_path).unwrap());

    let handles: Vec<_> = (0..8i64)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let target = format!("p{i}");
                store
                    .record("a", &target, Score::try_from(i + 1).unwrap())
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // every edge survives in memory and in the reloaded document
    assert_eq!(store.snapshot().unwrap()["a"].len(), 8);

    let reloaded = LedgerStore::open(&ledger_path).unwrap();
    let snapshot = reloaded.snapshot().unwrap();
    let targets = &snapshot["a"];
    assert_eq!(targets.len(), 8);
    for i in 0..8i64 {
        assert_eq!(targets[&format!("p{i}")], (i + 1) as u8);
    }
}

#[test]
fn malformed_json_body_is_rejected() {
    let client = client("a,b,c");
    let response = client
        .post("/api/login")
        .header(ContentType::JSON)
        .body("{not json")
        .dispatch();
    assert!(response.status().code >= 400);
    let body = response.into_json::<Value>().unwrap();
    assert_eq!(body["error"], "invalid_request");
}

#[test]
fn unknown_route_is_json_404() {
    let client = client("a,b,c");
    let response = client.get("/api/nope").dispatch();
    assert_eq!(response.status(), Status::NotFound);
    let body = response.into_json::<Value>().unwrap();
    assert_eq!(body["error"], "not_found");
}
