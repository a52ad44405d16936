//! Room entity: one game, two seats, spectators and the consent protocol
//! for undo and seat swaps.

use crate::domain::{
    error::{GameError, RoomError},
    value_object::{Identity, RequestKind, Role, RoomId, RoomName, Stone, Timestamp},
};

use super::game::{GameEngine, Move};

/// An action awaiting the other player's consent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub kind: RequestKind,
    pub requester: Identity,
}

/// Result of [`Room::make_request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The request waits for the opponent's decision.
    Pending,
    /// The request took effect immediately (swap with a vacant seat).
    Executed,
}

/// Result of [`Room::resolve_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub request: PendingRequest,
    pub approved: bool,
    /// Stone taken back by an approved undo.
    pub undone: Option<Move>,
}

/// Result of [`Room::leave`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Departure {
    /// Role the identity held before leaving, `None` if it was not in the room.
    pub role: Option<Role>,
    /// Winner declared because a player left a running game.
    pub forfeit_winner: Option<Stone>,
    /// Whether a pending request was dropped along with the player.
    pub request_dropped: bool,
}

#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub name: RoomName,
    pub created_at: Timestamp,
    black: Option<Identity>,
    white: Option<Identity>,
    spectators: Vec<Identity>,
    game: GameEngine,
    pending_request: Option<PendingRequest>,
    /// Set once the registry has dropped the room.
    closed: bool,
}

impl Room {
    /// Create a room with `creator` seated as black.
    pub fn new(
        id: RoomId,
        name: RoomName,
        creator: Identity,
        created_at: Timestamp,
        board_size: usize,
    ) -> Self {
        Self {
            id,
            name,
            created_at,
            black: Some(creator),
            white: None,
            spectators: Vec::new(),
            game: GameEngine::new(board_size),
            pending_request: None,
            closed: false,
        }
    }

    pub fn game(&self) -> &GameEngine {
        &self.game
    }

    pub fn player(&self, seat: Stone) -> Option<&Identity> {
        match seat {
            Stone::Black => self.black.as_ref(),
            Stone::White => self.white.as_ref(),
        }
    }

    pub fn spectators(&self) -> &[Identity] {
        &self.spectators
    }

    pub fn pending_request(&self) -> Option<&PendingRequest> {
        self.pending_request.as_ref()
    }

    /// Seat held by `identity`, if any.
    pub fn seat_of(&self, identity: &Identity) -> Option<Stone> {
        [Stone::Black, Stone::White]
            .into_iter()
            .find(|&seat| self.player(seat) == Some(identity))
    }

    pub fn role_of(&self, identity: &Identity) -> Option<Role> {
        if let Some(seat) = self.seat_of(identity) {
            return Some(seat.into());
        }
        self.spectators
            .contains(identity)
            .then_some(Role::Spectator)
    }

    pub fn both_seats_filled(&self) -> bool {
        self.black.is_some() && self.white.is_some()
    }

    /// True when nobody is left in the room.
    pub fn is_empty(&self) -> bool {
        self.black.is_none() && self.white.is_none() && self.spectators.is_empty()
    }

    /// Mark the room as removed from the registry.
    ///
    /// Callers still holding a handle must treat a closed room as missing.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Join the room, or reconnect if `identity` is already in it.
    ///
    /// A newcomer takes the white seat while it is vacant and becomes a
    /// spectator otherwise.
    pub fn join(&mut self, identity: Identity) -> Role {
        if let Some(role) = self.role_of(&identity) {
            return role;
        }

        if self.white.is_none() {
            self.white = Some(identity);
            Role::White
        } else {
            self.spectators.push(identity);
            Role::Spectator
        }
    }

    /// Remove `identity` from its seat or from the spectators.
    ///
    /// A player leaving a started, undecided game forfeits it to whoever
    /// still holds the other seat.
    pub fn leave(&mut self, identity: &Identity) -> Departure {
        let Some(seat) = self.seat_of(identity) else {
            let before = self.spectators.len();
            self.spectators.retain(|s| s != identity);
            return Departure {
                role: (self.spectators.len() != before).then_some(Role::Spectator),
                ..Departure::default()
            };
        };

        match seat {
            Stone::Black => self.black = None,
            Stone::White => self.white = None,
        }

        let request_dropped = self.pending_request.take().is_some();

        let remaining = seat.opponent();
        let mut forfeit_winner = None;
        if self.game.has_started() && !self.game.is_over() && self.player(remaining).is_some() {
            self.game.declare_winner(remaining);
            forfeit_winner = Some(remaining);
        }

        Departure {
            role: Some(seat.into()),
            forfeit_winner,
            request_dropped,
        }
    }

    /// Play a stone for `identity`.
    ///
    /// # Errors
    ///
    /// Checked in this order, without touching the board on failure:
    /// [`GameError::GameOver`],
    /// [`RoomError::GameNotReady`], [`RoomError::RequestPending`],
    /// [`RoomError::NotYourTurn`], then the engine's board-legality errors.
    pub fn place_stone(
        &mut self,
        identity: &Identity,
        row: i32,
        col: i32,
    ) -> Result<Stone, RoomError> {
        if self.game.is_over() {
            return Err(GameError::GameOver.into());
        }
        if !self.both_seats_filled() {
            return Err(RoomError::GameNotReady);
        }
        if let Some(request) = &self.pending_request {
            return Err(RoomError::RequestPending(request.kind));
        }

        let turn = self.game.current_turn();
        if self.player(turn) != Some(identity) {
            return Err(RoomError::NotYourTurn);
        }

        self.game.place_stone(row, col, turn)?;
        Ok(turn)
    }

    /// Ask the opponent for an undo or a seat swap.
    ///
    /// A swap while one seat is vacant has nobody to consent and is
    /// carried out at once.
    pub fn make_request(
        &mut self,
        requester: Identity,
        kind: RequestKind,
    ) -> Result<RequestOutcome, RoomError> {
        if let Some(request) = &self.pending_request {
            return Err(RoomError::RequestAlreadyPending(request.kind));
        }

        if !self.both_seats_filled() {
            return match kind {
                RequestKind::Swap => {
                    self.swap_players();
                    Ok(RequestOutcome::Executed)
                }
                RequestKind::Undo => Err(RoomError::GameNotReady),
            };
        }

        self.pending_request = Some(PendingRequest { kind, requester });
        Ok(RequestOutcome::Pending)
    }

    /// Withdraw the pending request, if any. Returns what was withdrawn.
    pub fn cancel_request(&mut self) -> Option<PendingRequest> {
        self.pending_request.take()
    }

    /// Approve or deny the pending request.
    ///
    /// The request is cleared in every case; an approved undo with nothing
    /// to undo reports [`GameError::NoHistory`].
    pub fn resolve_request(&mut self, approved: bool) -> Result<Resolution, RoomError> {
        let request = self
            .pending_request
            .take()
            .ok_or(RoomError::NoPendingRequest)?;

        let mut undone = None;
        if approved {
            match request.kind {
                RequestKind::Undo => undone = Some(self.game.undo_move()?),
                RequestKind::Swap => self.swap_players(),
            }
        }

        Ok(Resolution {
            request,
            approved,
            undone,
        })
    }

    /// Exchange the black and white seats and start a fresh game.
    pub fn swap_players(&mut self) {
        std::mem::swap(&mut self.black, &mut self.white);
        self.game.reset();
    }

    pub fn reset_game(&mut self) {
        self.game.reset();
        self.pending_request = None;
    }
}
