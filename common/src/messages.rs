use crate::gomoku::{Board, Outcome, Stone};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct StateResponse {
    pub board: Board,
    pub outcome: Outcome,
    pub to_move: Stone,
}
