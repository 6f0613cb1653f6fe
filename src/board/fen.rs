//! FEN parsing and serialization.

use super::fen_tables::{CHAR_TO_PC, PC_TO_CHAR};
use super::{Board, Color, EMPTY_SQ, Piece};
use crate::board::castle_bits::*;
use crate::square::Square;

fn pc_index(piece: Piece, color: Color) -> usize {
    (color as usize) * 6 + (piece as usize)
}

impl Board {
    /// Replaces `self` with the position described by `fen`. On error
    /// `self` is left in an unspecified but valid (empty) state.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), String> {
        let mut fields = fen.split_whitespace();

        let placement = fields.next().ok_or("FEN missing piece placement field")?;
        let side = fields.next().unwrap_or("w");
        let castling = fields.next().unwrap_or("-");
        let ep = fields.next().unwrap_or("-");
        let halfmove = fields.next().unwrap_or("0");
        let fullmove = fields.next().unwrap_or("1");

        *self = Board::new_empty();

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(format!(
                "FEN piece placement must have 8 ranks, got {}",
                ranks.len()
            ));
        }

        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_from_top;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    if file > 8 {
                        return Err(format!("FEN rank overflow: '{}'", rank_str));
                    }
                    continue;
                }
                if file >= 8 {
                    return Err(format!("FEN rank overflow: '{}'", rank_str));
                }
                let (piece, color) = CHAR_TO_PC[c as usize]
                    .ok_or_else(|| format!("Invalid FEN piece glyph: '{}'", c))?;
                let sq_idx = rank * 8 + file;
                let bb = self.bb(color, piece) | (1u64 << sq_idx);
                self.set_bb(color, piece, bb);
                file += 1;
            }
            if file != 8 {
                return Err(format!("FEN rank does not cover 8 files: '{}'", rank_str));
            }
        }

        self.side_to_move = match side {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(format!("Invalid side-to-move field: '{}'", other)),
        };

        let mut rights = 0u8;
        if castling != "-" {
            for c in castling.chars() {
                rights |= match c {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    other => return Err(format!("Invalid castling glyph: '{}'", other)),
                };
            }
        }
        self.castling_rights = rights;

        self.en_passant = if ep == "-" {
            None
        } else {
            Some(Square::from_algebraic(ep).ok_or_else(|| format!("Invalid en passant square: '{}'", ep))?)
        };

        self.halfmove_clock = halfmove
            .parse()
            .map_err(|_| format!("Invalid halfmove clock: '{}'", halfmove))?;
        self.fullmove_number = fullmove
            .parse()
            .map_err(|_| format!("Invalid fullmove number: '{}'", fullmove))?;

        self.refresh_zobrist();
        self.history.clear();
        self.validate()?;
        Ok(())
    }

    /// Serializes the current position to FEN.
    pub fn to_fen(&self) -> String {
        let mut s = String::new();

        for rank in (0..8).rev() {
            let mut empty_run = 0u32;
            for file in 0..8 {
                let idx = rank * 8 + file;
                let occupant = self.piece_on_sq[idx];
                if occupant == EMPTY_SQ {
                    empty_run += 1;
                    continue;
                }
                if empty_run > 0 {
                    s.push_str(&empty_run.to_string());
                    empty_run = 0;
                }
                let color = Color::from_u8((occupant >> 3) & 1);
                let piece = Piece::from_u8(occupant & 0b111);
                s.push(PC_TO_CHAR[pc_index(piece, color)]);
            }
            if empty_run > 0 {
                s.push_str(&empty_run.to_string());
            }
            if rank > 0 {
                s.push('/');
            }
        }

        s.push(' ');
        s.push(if self.side_to_move == Color::White {
            'w'
        } else {
            'b'
        });

        s.push(' ');
        if self.castling_rights == 0 {
            s.push('-');
        } else {
            if self.has_castling(CASTLE_WK) {
                s.push('K');
            }
            if self.has_castling(CASTLE_WQ) {
                s.push('Q');
            }
            if self.has_castling(CASTLE_BK) {
                s.push('k');
            }
            if self.has_castling(CASTLE_BQ) {
                s.push('q');
            }
        }

        s.push(' ');
        match self.en_passant {
            Some(sq) => s.push_str(&sq.to_string()),
            None => s.push('-'),
        }

        s.push(' ');
        s.push_str(&self.halfmove_clock.to_string());
        s.push(' ');
        s.push_str(&self.fullmove_number.to_string());

        s
    }
}
