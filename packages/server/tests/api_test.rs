//! Integration tests for the Renju room server.
//!
//! Each test serves the real router on an ephemeral port inside the test
//! process, drives the HTTP API with reqwest and watches rooms over
//! WebSocket with tokio-tungstenite.

use std::{sync::Arc, time::Duration};

use futures_util::StreamExt;
use renju_server::{
    infrastructure::{message_pusher::WebSocketRoomPusher, repository::InMemoryRoomRepository},
    ui::{AppState, build_router},
};
use renju_shared::time::FixedClock;
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Helper struct to manage an in-process server
struct TestServer {
    handle: JoinHandle<()>,
    port: u16,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a server on an ephemeral port with a 15x15 board
    async fn start() -> Self {
        let state = AppState::new(
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(WebSocketRoomPusher::new()),
            Arc::new(FixedClock::new(1_672_531_200_000)),
            15,
        );
        let app = build_router(Arc::new(state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let port = listener.local_addr().unwrap().port();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestServer {
            handle,
            port,
            client: reqwest::Client::new(),
        }
    }

    /// Start a server holding one room with alice (black) and bob (white)
    async fn start_with_players() -> (Self, String) {
        let server = Self::start().await;
        let room_id = server.create_room_with_players().await;
        (server, room_id)
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self.client.get(self.url(path)).send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn delete(&self, path: &str) -> (StatusCode, Value) {
        let response = self.client.delete(self.url(path)).send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    /// Create a room and return its id
    async fn create_room(&self, creator: &str) -> String {
        let (status, body) = self
            .post("/api/rooms", json!({"name": "test room", "creator": creator}))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["room_id"].as_str().unwrap().to_string()
    }

    /// Create a room with alice (black) and bob (white) seated
    async fn create_room_with_players(&self) -> String {
        let room_id = self.create_room("alice").await;
        let (status, _) = self
            .post(
                &format!("/api/rooms/{}/join", room_id),
                json!({"identity": "bob"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        room_id
    }

    async fn place(&self, room_id: &str, identity: &str, row: i32, col: i32) -> (StatusCode, Value) {
        self.post(
            &format!("/api/rooms/{}/moves", room_id),
            json!({"identity": identity, "row": row, "col": col}),
        )
        .await
    }

    async fn watch(&self, room_id: &str, identity: &str) -> WsStream {
        let url = format!(
            "ws://127.0.0.1:{}/ws/rooms/{}?identity={}",
            self.port, room_id, identity
        );
        let (stream, _) = connect_async(url).await.expect("Failed to connect");
        stream
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Stop the server task when the test ends
        self.handle.abort();
    }
}

/// Wait for the next text frame and parse it as JSON
async fn next_json(stream: &mut WsStream) -> Value {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(2), stream.next())
            .await
            .expect("Timed out waiting for a push")
            .expect("Stream ended")
            .expect("WebSocket error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

#[tokio::test]
async fn test_health_check() {
    // テスト項目: ヘルスチェックが ok を返す
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let (status, body) = server.get("/api/health").await;

    // then (期待する結果):
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_room_appears_in_list_and_detail() {
    // テスト項目: 作成した部屋が一覧と詳細に現れ、作成者が黒番になる
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let room_id = server.create_room("alice").await;
    let (list_status, list) = server.get("/api/rooms").await;
    let (detail_status, detail) = server.get(&format!("/api/rooms/{}", room_id)).await;

    // then (期待する結果):
    assert_eq!(list_status, StatusCode::OK);
    let rooms = list.as_array().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["id"], room_id.as_str());
    assert_eq!(rooms[0]["black"], "alice");
    assert_eq!(rooms[0]["created_at"], "2023-01-01T00:00:00.000Z");

    assert_eq!(detail_status, StatusCode::OK);
    assert_eq!(detail["board_size"], 15);
    assert_eq!(detail["board"].as_array().unwrap().len(), 15);
    assert_eq!(detail["current_turn"], "black");
    assert_eq!(detail["started"], false);
    assert!(detail["white"].is_null());
}

#[tokio::test]
async fn test_create_room_rejects_blank_creator() {
    // テスト項目: 空白のみの作成者名は 400 InvalidInput になる
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let (status, body) = server
        .post("/api/rooms", json!({"name": "room", "creator": "   "}))
        .await;

    // then (期待する結果):
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"]["kind"], "InvalidInput");
}

#[tokio::test]
async fn test_join_assigns_white_then_spectator() {
    // テスト項目: 参加順に白番、観戦者が割り当てられる
    // given (前提条件):
    let server = TestServer::start().await;
    let room_id = server.create_room("alice").await;
    let join_path = format!("/api/rooms/{}/join", room_id);

    // when (操作):
    let (_, bob) = server.post(&join_path, json!({"identity": "bob"})).await;
    let (_, carol) = server.post(&join_path, json!({"identity": "carol"})).await;
    let (_, alice_again) = server.post(&join_path, json!({"identity": "alice"})).await;

    // then (期待する結果):
    assert_eq!(bob["role"], "white");
    assert_eq!(carol["role"], "spectator");
    assert_eq!(alice_again["role"], "black");
}

#[tokio::test]
async fn test_unknown_room_is_404() {
    // テスト項目: 存在しない部屋への操作は 404 RoomNotFound になる
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let (detail_status, _) = server.get("/api/rooms/no-such-room").await;
    let (join_status, join) = server
        .post("/api/rooms/no-such-room/join", json!({"identity": "alice"}))
        .await;

    // then (期待する結果):
    assert_eq!(detail_status, StatusCode::NOT_FOUND);
    assert_eq!(join_status, StatusCode::NOT_FOUND);
    assert_eq!(join["error"]["kind"], "RoomNotFound");
}

#[tokio::test]
async fn test_malformed_move_body_is_400_invalid_input() {
    // テスト項目: 不正な JSON ボディは 400 InvalidInput のエラー形式で返される
    // given (前提条件):
    let (server, room_id) = TestServer::start_with_players().await;
    let moves_path = format!("/api/rooms/{}/moves", room_id);

    // when (操作):
    let (missing_status, missing) = server.post(&moves_path, json!({"identity": "alice"})).await;
    let (overflow_status, overflow) = server
        .post(
            &moves_path,
            json!({"identity": "alice", "row": 4294967296_i64, "col": 0}),
        )
        .await;
    let response = server
        .client
        .post(server.url(&moves_path))
        .body(r#"{"identity":"alice","row":7,"col":7}"#)
        .send()
        .await
        .unwrap();
    let no_content_type_status = response.status();
    let no_content_type: Value = response.json().await.unwrap();

    // then (期待する結果):
    for (status, body) in [
        (missing_status, missing),
        (overflow_status, overflow),
        (no_content_type_status, no_content_type),
    ] {
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"]["kind"], "InvalidInput");
    }
    let (_, detail) = server.get(&format!("/api/rooms/{}", room_id)).await;
    assert_eq!(detail["history"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_move_needs_both_players() {
    // テスト項目: 白番が不在の間は着手できない
    // given (前提条件):
    let server = TestServer::start().await;
    let room_id = server.create_room("alice").await;

    // when (操作):
    let (status, body) = server.place(&room_id, "alice", 7, 7).await;

    // then (期待する結果):
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["kind"], "GameNotReady");
}

#[tokio::test]
async fn test_turn_order_and_board_errors() {
    // テスト項目: 手番違反は 409、盤外・既に石のある点は 422 になる
    // given (前提条件):
    let (server, room_id) = TestServer::start_with_players().await;

    // when (操作):
    let (wrong_turn, wrong_turn_body) = server.place(&room_id, "bob", 7, 7).await;
    let (outside, outside_body) = server.place(&room_id, "alice", 15, 0).await;
    let (first, _) = server.place(&room_id, "alice", 7, 7).await;
    let (occupied, occupied_body) = server.place(&room_id, "bob", 7, 7).await;

    // then (期待する結果):
    assert_eq!(wrong_turn, StatusCode::CONFLICT);
    assert_eq!(wrong_turn_body["error"]["kind"], "NotYourTurn");
    assert_eq!(outside, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(outside_body["error"]["kind"], "InvalidPosition");
    assert_eq!(first, StatusCode::OK);
    assert_eq!(occupied, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(occupied_body["error"]["kind"], "OccupiedCell");
}

#[tokio::test]
async fn test_five_in_a_row_wins_and_ends_the_game() {
    // テスト項目: 黒が五連を作ると勝利し、以降の着手は GameOver になる
    // given (前提条件):
    let (server, room_id) = TestServer::start_with_players().await;
    for col in 0..4 {
        server.place(&room_id, "alice", 7, col).await;
        server.place(&room_id, "bob", 0, col * 2).await;
    }

    // when (操作):
    let (status, body) = server.place(&room_id, "alice", 7, 4).await;
    let (after_status, after) = server.place(&room_id, "bob", 10, 10).await;

    // then (期待する結果):
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stone"], "black");
    assert_eq!(body["winner"], "black");
    assert_eq!(after_status, StatusCode::CONFLICT);
    assert_eq!(after["error"]["kind"], "GameOver");
}

#[tokio::test]
async fn test_black_double_open_three_is_forbidden() {
    // テスト項目: 黒の三三は禁手として 422 ForbiddenMove になり、盤面は変わらない
    // given (前提条件):
    let (server, room_id) = TestServer::start_with_players().await;
    let black = [(7, 5), (7, 6), (8, 7), (9, 7)];
    let white = [(14, 0), (14, 2), (14, 4), (14, 6)];
    for (b, w) in black.iter().zip(white.iter()) {
        server.place(&room_id, "alice", b.0, b.1).await;
        server.place(&room_id, "bob", w.0, w.1).await;
    }

    // when (操作):
    let (status, body) = server.place(&room_id, "alice", 7, 7).await;
    let (_, detail) = server.get(&format!("/api/rooms/{}", room_id)).await;

    // then (期待する結果):
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["kind"], "ForbiddenMove");
    assert_eq!(detail["board"][7], ".....BB........");
    assert_eq!(detail["current_turn"], "black");
    assert_eq!(detail["history"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_undo_request_round_trip() {
    // テスト項目: 待ったの申請中は着手できず、承認されると直前の一手が取り消される
    // given (前提条件):
    let (server, room_id) = TestServer::start_with_players().await;
    server.place(&room_id, "alice", 7, 7).await;
    let requests_path = format!("/api/rooms/{}/requests", room_id);

    // when (操作):
    let (request_status, request) = server
        .post(&requests_path, json!({"identity": "alice", "kind": "undo"}))
        .await;
    let (blocked_status, blocked) = server.place(&room_id, "bob", 7, 8).await;
    let (resolve_status, resolve) = server
        .post(
            &format!("{}/resolve", requests_path),
            json!({"approved": true}),
        )
        .await;
    let (_, detail) = server.get(&format!("/api/rooms/{}", room_id)).await;

    // then (期待する結果):
    assert_eq!(request_status, StatusCode::OK);
    assert_eq!(request["executed"], false);
    assert_eq!(blocked_status, StatusCode::CONFLICT);
    assert_eq!(blocked["error"]["kind"], "RequestPending");
    assert_eq!(resolve_status, StatusCode::OK);
    assert_eq!(resolve["kind"], "undo");
    assert_eq!(resolve["approved"], true);
    assert_eq!(detail["history"].as_array().unwrap().len(), 0);
    assert_eq!(detail["current_turn"], "black");
    assert!(detail["pending_request"].is_null());
}

#[tokio::test]
async fn test_request_errors() {
    // テスト項目: 未知の種別は 400、二重申請は 409、申請なしの承認は 409 になる
    // given (前提条件):
    let (server, room_id) = TestServer::start_with_players().await;
    server.place(&room_id, "alice", 7, 7).await;
    let requests_path = format!("/api/rooms/{}/requests", room_id);

    // when (操作):
    let (unknown_status, unknown) = server
        .post(&requests_path, json!({"identity": "alice", "kind": "resign"}))
        .await;
    let (resolve_status, resolve) = server
        .post(
            &format!("{}/resolve", requests_path),
            json!({"approved": false}),
        )
        .await;
    server
        .post(&requests_path, json!({"identity": "alice", "kind": "undo"}))
        .await;
    let (duplicate_status, duplicate) = server
        .post(&requests_path, json!({"identity": "bob", "kind": "undo"}))
        .await;
    let (cancel_status, _) = server.delete(&requests_path).await;

    // then (期待する結果):
    assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown["error"]["kind"], "UnknownRequestKind");
    assert_eq!(resolve_status, StatusCode::CONFLICT);
    assert_eq!(resolve["error"]["kind"], "NoPendingRequest");
    assert_eq!(duplicate_status, StatusCode::CONFLICT);
    assert_eq!(duplicate["error"]["kind"], "RequestAlreadyPending");
    assert_eq!(cancel_status, StatusCode::OK);
}

#[tokio::test]
async fn test_swap_with_vacant_seat_executes_immediately() {
    // テスト項目: 相手が不在のときの席交換は即座に実行される
    // given (前提条件):
    let server = TestServer::start().await;
    let room_id = server.create_room("alice").await;

    // when (操作):
    let (status, body) = server
        .post(
            &format!("/api/rooms/{}/requests", room_id),
            json!({"identity": "alice", "kind": "swap"}),
        )
        .await;
    let (_, detail) = server.get(&format!("/api/rooms/{}", room_id)).await;

    // then (期待する結果):
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["executed"], true);
    assert!(detail["black"].is_null());
    assert_eq!(detail["white"], "alice");
}

#[tokio::test]
async fn test_spectator_cannot_reset() {
    // テスト項目: 観戦者による盤面リセットは 403 NotAPlayer になる
    // given (前提条件):
    let (server, room_id) = TestServer::start_with_players().await;
    server
        .post(
            &format!("/api/rooms/{}/join", room_id),
            json!({"identity": "carol"}),
        )
        .await;
    let reset_path = format!("/api/rooms/{}/reset", room_id);

    // when (操作):
    let (spectator_status, spectator) = server.post(&reset_path, json!({"identity": "carol"})).await;
    let (player_status, _) = server.post(&reset_path, json!({"identity": "bob"})).await;

    // then (期待する結果):
    assert_eq!(spectator_status, StatusCode::FORBIDDEN);
    assert_eq!(spectator["error"]["kind"], "NotAPlayer");
    assert_eq!(player_status, StatusCode::OK);
}

#[tokio::test]
async fn test_leave_mid_game_forfeits_and_last_leave_removes_room() {
    // テスト項目: 対局中の退出は相手の勝ちとなり、最後の退出で部屋が削除される
    // given (前提条件):
    let (server, room_id) = TestServer::start_with_players().await;
    server.place(&room_id, "alice", 7, 7).await;
    let leave_path = format!("/api/rooms/{}/leave", room_id);

    // when (操作):
    let (_, first) = server.post(&leave_path, json!({"identity": "alice"})).await;
    let (_, second) = server.post(&leave_path, json!({"identity": "bob"})).await;
    let (detail_status, _) = server.get(&format!("/api/rooms/{}", room_id)).await;

    // then (期待する結果):
    assert_eq!(first["forfeit_winner"], "white");
    assert_eq!(first["room_removed"], false);
    assert_eq!(second["room_removed"], true);
    assert_eq!(detail_status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_watcher_receives_snapshots() {
    // テスト項目: 観戦用 WebSocket に接続時のスナップショットと着手後の更新が届く
    // given (前提条件):
    let (server, room_id) = TestServer::start_with_players().await;
    let mut stream = server.watch(&room_id, "carol").await;
    let initial = next_json(&mut stream).await;

    // when (操作):
    server.place(&room_id, "alice", 7, 7).await;
    let update = next_json(&mut stream).await;

    // then (期待する結果):
    assert_eq!(initial["type"], "room-state");
    assert_eq!(initial["room"]["started"], false);
    assert_eq!(update["type"], "room-state");
    assert_eq!(update["room"]["current_turn"], "white");
    assert_eq!(update["room"]["last_move"]["row"], 7);
    assert_eq!(update["room"]["last_move"]["stone"], "black");
}

#[tokio::test]
async fn test_watcher_is_told_when_room_closes() {
    // テスト項目: 部屋が削除されると観戦者に room-closed が届く
    // given (前提条件):
    let server = TestServer::start().await;
    let room_id = server.create_room("alice").await;
    let mut stream = server.watch(&room_id, "carol").await;
    next_json(&mut stream).await;

    // when (操作):
    server
        .post(
            &format!("/api/rooms/{}/leave", room_id),
            json!({"identity": "alice"}),
        )
        .await;

    // then (期待する結果):
    let mut closed = next_json(&mut stream).await;
    // 退出時の room-state が先に届くことがある
    if closed["type"] == "room-state" {
        closed = next_json(&mut stream).await;
    }
    assert_eq!(closed["type"], "room-closed");
    assert_eq!(closed["room_id"], room_id.as_str());
}

#[tokio::test]
async fn test_watch_unknown_room_is_rejected() {
    // テスト項目: 存在しない部屋の観戦は接続できない
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let url = format!("ws://127.0.0.1:{}/ws/rooms/missing", server.port);
    let result = connect_async(url).await;

    // then (期待する結果):
    assert!(result.is_err());
}
