use crate::error::EngineError;
use crate::types::{BOARD_SIZE, CellState, Color, Position, Scores};

const NUM_SQUARES: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Reversi board state represented by two bitboards.
///
/// Bit `row * 8 + col` is set in `black` or `white` when that side owns the
/// cell. The two masks never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the initial board:
    /// (3,3)=white, (3,4)=black, (4,3)=black, (4,4)=white.
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    /// Builds a board from raw masks. Cells set in both masks are owned by black.
    pub fn from_bitboards(black: u64, white: u64) -> Self {
        Self {
            black,
            white: white & !black,
        }
    }

    pub fn get(&self, pos: Position) -> CellState {
        let square = bit(pos.index());
        if (self.black & square) != 0 {
            CellState::Black
        } else if (self.white & square) != 0 {
            CellState::White
        } else {
            CellState::Empty
        }
    }

    /// Raw-coordinate lookup for callers that have not validated their input.
    pub fn cell(&self, row: u8, col: u8) -> Result<CellState, EngineError> {
        Ok(self.get(Position::new(row, col)?))
    }

    /// Overwrites one cell. No rule validation happens here.
    pub fn set(&mut self, pos: Position, color: Color) {
        let square = bit(pos.index());
        match color {
            Color::Black => {
                self.black |= square;
                self.white &= !square;
            }
            Color::White => {
                self.white |= square;
                self.black &= !square;
            }
        }
    }

    pub fn count(&self, color: Color) -> u8 {
        match color {
            Color::Black => self.black.count_ones() as u8,
            Color::White => self.white.count_ones() as u8,
        }
    }

    pub fn scores(&self) -> Scores {
        Scores {
            black: self.count(Color::Black),
            white: self.count(Color::White),
        }
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - self.count(Color::Black) - self.count(Color::White)
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (index, cell) in board.iter_mut().enumerate() {
            let square = bit(index);
            *cell = if (self.black & square) != 0 {
                1
            } else if (self.white & square) != 0 {
                2
            } else {
                0
            };
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn bit(index: usize) -> u64 {
    if index < NUM_SQUARES { 1u64 << index } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn initial_board_has_four_center_discs() {
        let board = Board::new();

        assert_eq!(board.get(pos(3, 3)), CellState::White);
        assert_eq!(board.get(pos(3, 4)), CellState::Black);
        assert_eq!(board.get(pos(4, 3)), CellState::Black);
        assert_eq!(board.get(pos(4, 4)), CellState::White);
        assert_eq!(board.count(Color::Black), 2);
        assert_eq!(board.count(Color::White), 2);
        assert_eq!(board.empty_count(), 60);
    }

    #[test]
    fn set_overwrites_previous_owner() {
        let mut board = Board::new();

        board.set(pos(3, 3), Color::Black);

        assert_eq!(board.get(pos(3, 3)), CellState::Black);
        assert_eq!(board.scores(), Scores { black: 3, white: 1 });
        assert_eq!(board.empty_count(), 60);
    }

    #[test]
    fn cell_rejects_out_of_range_coordinates() {
        let board = Board::new();

        assert_eq!(board.cell(4, 4), Ok(CellState::White));
        assert_eq!(
            board.cell(8, 0),
            Err(EngineError::OutOfRange { row: 8, col: 0 })
        );
    }

    #[test]
    fn to_array_uses_row_major_codes() {
        let cells = Board::new().to_array();

        assert_eq!(cells[27], 2);
        assert_eq!(cells[28], 1);
        assert_eq!(cells[35], 1);
        assert_eq!(cells[36], 2);
        assert_eq!(cells.iter().filter(|&&c| c == 0).count(), 60);
    }

    #[test]
    fn square_count_agrees_with_position_indexing() {
        let last = Position::from_index(NUM_SQUARES - 1).unwrap();

        assert_eq!((last.row(), last.col()), (BOARD_SIZE - 1, BOARD_SIZE - 1));
        assert_eq!(Position::from_index(NUM_SQUARES), None);
        assert_eq!(Board::from_bitboards(u64::MAX, 0).empty_count(), 0);
    }

    #[test]
    fn from_bitboards_gives_black_priority_on_overlap() {
        let board = Board::from_bitboards(0b11, 0b10);

        assert_eq!(board.get(pos(0, 1)), CellState::Black);
        assert_eq!(board.count(Color::White), 0);
    }
}
