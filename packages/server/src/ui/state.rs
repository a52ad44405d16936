//! Server state shared by every handler.

use std::sync::Arc;

use renju_shared::time::Clock;

use crate::{
    domain::{RoomPusher, RoomRepository},
    usecase::{
        CancelRequestUseCase, CreateRoomUseCase, GetRoomDetailUseCase, JoinRoomUseCase,
        LeaveRoomUseCase, ListRoomsUseCase, MakeRequestUseCase, PlaceStoneUseCase,
        ResetGameUseCase, ResolveRequestUseCase, WatchRoomUseCase,
    },
};

/// Shared application state
pub struct AppState {
    pub create_room_usecase: CreateRoomUseCase,
    pub list_rooms_usecase: ListRoomsUseCase,
    pub get_room_detail_usecase: GetRoomDetailUseCase,
    pub join_room_usecase: JoinRoomUseCase,
    pub leave_room_usecase: LeaveRoomUseCase,
    pub place_stone_usecase: PlaceStoneUseCase,
    pub make_request_usecase: MakeRequestUseCase,
    pub cancel_request_usecase: CancelRequestUseCase,
    pub resolve_request_usecase: ResolveRequestUseCase,
    pub reset_game_usecase: ResetGameUseCase,
    pub watch_room_usecase: WatchRoomUseCase,
}

impl AppState {
    /// Wire every use case to the same registry and pusher.
    ///
    /// # Arguments
    ///
    /// * `repository` - Room registry（データアクセス層の抽象化）
    /// * `pusher` - Room state push（メッセージ通知の抽象化）
    /// * `clock` - Clock used to stamp new rooms
    /// * `board_size` - Side length of the board of new rooms
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        pusher: Arc<dyn RoomPusher>,
        clock: Arc<dyn Clock>,
        board_size: usize,
    ) -> Self {
        Self {
            create_room_usecase: CreateRoomUseCase::new(repository.clone(), clock, board_size),
            list_rooms_usecase: ListRoomsUseCase::new(repository.clone()),
            get_room_detail_usecase: GetRoomDetailUseCase::new(repository.clone()),
            join_room_usecase: JoinRoomUseCase::new(repository.clone(), pusher.clone()),
            leave_room_usecase: LeaveRoomUseCase::new(repository.clone(), pusher.clone()),
            place_stone_usecase: PlaceStoneUseCase::new(repository.clone(), pusher.clone()),
            make_request_usecase: MakeRequestUseCase::new(repository.clone(), pusher.clone()),
            cancel_request_usecase: CancelRequestUseCase::new(repository.clone(), pusher.clone()),
            resolve_request_usecase: ResolveRequestUseCase::new(
                repository.clone(),
                pusher.clone(),
            ),
            reset_game_usecase: ResetGameUseCase::new(repository.clone(), pusher.clone()),
            watch_room_usecase: WatchRoomUseCase::new(repository, pusher),
        }
    }
}
