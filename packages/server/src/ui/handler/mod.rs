mod error;
mod extract;
mod http;
mod websocket;

pub use error::ApiError;
pub use extract::ApiJson;
pub use http::{
    cancel_request, create_room, get_room_detail, get_rooms, health_check, join_room,
    leave_room, make_request, place_stone, reset_game, resolve_request,
};
pub use websocket::websocket_handler;
