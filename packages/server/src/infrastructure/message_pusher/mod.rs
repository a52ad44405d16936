//! 部屋の状態プッシュの実装
//!
//! ## 概要
//!
//! このモジュールは `RoomPusher` trait の具体的な実装を提供します。
//!
//! ## 実装
//!
//! - `websocket`: WebSocket 接続ごとの送信チャンネルを使った実装

pub mod websocket;

pub use websocket::WebSocketRoomPusher;
