//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use thiserror::Error;

use crate::{Color, Piece, Square};

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 2 to 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),

    #[error("missing piece '{0}'")]
    MissingPiece(char),

    #[error("piece '{0}' appears more than once")]
    DuplicatePiece(char),

    #[error("piece '{0}' is not part of a king and rook versus king position")]
    UnsupportedPiece(char),
}

/// Parsed FEN data.
///
/// This struct holds the raw parsed FEN components. The engine is
/// responsible for converting this into its internal position
/// representation, usually through [`FenParser::krk_squares`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Piece placement string (e.g., "8/8/8/k7/8/KR6/8/8")
    pub piece_placement: String,
    /// Active color ('w' or 'b')
    pub active_color: char,
    /// Castling availability (e.g., "KQkq", "-")
    pub castling: String,
    /// En passant target square (e.g., "e3", "-")
    pub en_passant: String,
    /// Halfmove clock (for 50-move rule)
    pub halfmove_clock: u32,
    /// Fullmove number
    pub fullmove_number: u32,
}

/// The three piece locations of a KRK position, as read from a FEN string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KrkPlacement {
    pub white_king: Square,
    pub white_rook: Square,
    pub black_king: Square,
    pub side_to_move: Color,
}

impl FenParser {
    /// Parses a FEN string.
    ///
    /// Only the piece placement and active color are required. Missing
    /// trailing fields default to `- - 0 1`.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 2 || parts.len() > 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let piece_placement = parts[0];
        Self::validate_piece_placement(piece_placement)?;

        let active_color = match parts[1] {
            "w" => 'w',
            "b" => 'b',
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = parts.get(2).copied().unwrap_or("-");
        Self::validate_castling(castling)?;

        let en_passant = parts.get(3).copied().unwrap_or("-");
        Self::validate_en_passant(en_passant)?;

        let halfmove_clock = match parts.get(4) {
            Some(s) => s
                .parse::<u32>()
                .map_err(|_| FenError::InvalidHalfmoveClock(s.to_string()))?,
            None => 0,
        };

        let fullmove_number = match parts.get(5) {
            Some(s) => s
                .parse::<u32>()
                .map_err(|_| FenError::InvalidFullmoveNumber(s.to_string()))?,
            None => 1,
        };

        Ok(FenParser {
            piece_placement: piece_placement.to_string(),
            active_color,
            castling: castling.to_string(),
            en_passant: en_passant.to_string(),
            halfmove_clock,
            fullmove_number,
        })
    }

    fn validate_piece_placement(placement: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        for (i, rank) in ranks.iter().enumerate() {
            let mut squares = 0;
            for c in rank.chars() {
                if let Some(digit) = c.to_digit(10) {
                    squares += digit;
                } else if "pnbrqkPNBRQK".contains(c) {
                    squares += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - i
                    )));
                }
            }
            if squares != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - i,
                    squares
                )));
            }
        }

        Ok(())
    }

    fn validate_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }

        for c in castling.chars() {
            if !"KQkq".contains(c) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "invalid character '{}'",
                    c
                )));
            }
        }

        Ok(())
    }

    fn validate_en_passant(ep: &str) -> Result<(), FenError> {
        if ep == "-" {
            return Ok(());
        }

        let bytes = ep.as_bytes();
        if bytes.len() != 2 || !(b'a'..=b'h').contains(&bytes[0]) || !matches!(bytes[1], b'3' | b'6')
        {
            return Err(FenError::InvalidEnPassantSquare(ep.to_string()));
        }

        Ok(())
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        if self.active_color == 'b' {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Locates the white king, white rook and black king.
    ///
    /// Exactly one of each marker must be present and no other piece may
    /// appear on the board.
    pub fn krk_squares(&self) -> Result<KrkPlacement, FenError> {
        let mut white_king = None;
        let mut white_rook = None;
        let mut black_king = None;

        for (rank_idx, rank_str) in self.piece_placement.split('/').enumerate() {
            let row = 7 - rank_idx as u8; // FEN starts from rank 8
            let mut col = 0u8;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    col += digit as u8;
                    continue;
                }
                let slot = match Piece::from_fen_char(c) {
                    Some((Piece::King, Color::White)) => &mut white_king,
                    Some((Piece::Rook, Color::White)) => &mut white_rook,
                    Some((Piece::King, Color::Black)) => &mut black_king,
                    _ => return Err(FenError::UnsupportedPiece(c)),
                };
                if slot.is_some() {
                    return Err(FenError::DuplicatePiece(c));
                }
                *slot = Square::new(row, col);
                col += 1;
            }
        }

        Ok(KrkPlacement {
            white_king: white_king.ok_or(FenError::MissingPiece('K'))?,
            white_rook: white_rook.ok_or(FenError::MissingPiece('R'))?,
            black_king: black_king.ok_or(FenError::MissingPiece('k'))?,
            side_to_move: self.side_to_move(),
        })
    }
}
