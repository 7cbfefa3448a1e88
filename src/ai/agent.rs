use crate::game::Board;

/// Universal interface for move selectors.
pub trait Agent<B: Board> {
    /// Select a move for the side to move. The board may be mutated during
    /// selection but must be returned in its original state.
    /// Returns `None` only when no move is available.
    fn select_move(&mut self, board: &mut B) -> Option<B::Move>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
