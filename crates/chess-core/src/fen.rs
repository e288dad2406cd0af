//! FEN (Forsyth-Edwards Notation) field parsing.
//!
//! Only the fields the rules engine models are kept: piece placement, side
//! to move, castling availability and the en passant target. The two clock
//! fields are optional and validated but otherwise ignored.

use crate::{Color, PieceKind, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 or 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid move clock: {0}")]
    InvalidClock(String),
}

/// A placement grid: `grid[row][col]`, row 0 being rank 8.
pub type Placement = [[Option<(PieceKind, Color)>; 8]; 8];

/// Parsed FEN data.
///
/// The engine turns these fields into its own game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenFields {
    pub placement: Placement,
    pub active_color: Color,
    /// `castling[color][0]` is kingside, `castling[color][1]` queenside.
    pub castling: [[bool; 2]; 2],
    pub en_passant: Option<Square>,
}

impl FenFields {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 4 && parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let placement = Self::parse_placement(parts[0])?;

        let active_color = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = Self::parse_castling(parts[2])?;
        let en_passant = Self::parse_en_passant(parts[3])?;

        for clock in parts.iter().skip(4) {
            clock
                .parse::<u32>()
                .map_err(|_| FenError::InvalidClock(clock.to_string()))?;
        }

        Ok(FenFields {
            placement,
            active_color,
            castling,
            en_passant,
        })
    }

    fn parse_placement(placement: &str) -> Result<Placement, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut grid: Placement = [[None; 8]; 8];
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip as usize;
                } else if let Some(entry) = PieceKind::from_fen_char(c) {
                    if col < 8 {
                        grid[row][col] = Some(entry);
                    }
                    col += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - row
                    )));
                }
            }
            if col != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - row,
                    col
                )));
            }
        }

        Ok(grid)
    }

    fn parse_castling(castling: &str) -> Result<[[bool; 2]; 2], FenError> {
        let mut rights = [[false; 2]; 2];
        if castling == "-" {
            return Ok(rights);
        }

        for c in castling.chars() {
            match c {
                'K' => rights[Color::White.index()][0] = true,
                'Q' => rights[Color::White.index()][1] = true,
                'k' => rights[Color::Black.index()][0] = true,
                'q' => rights[Color::Black.index()][1] = true,
                _ => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "invalid character '{}'",
                        c
                    )))
                }
            }
        }

        Ok(rights)
    }

    fn parse_en_passant(ep: &str) -> Result<Option<Square>, FenError> {
        if ep == "-" {
            return Ok(None);
        }

        match Square::from_algebraic(ep) {
            // Only the third and sixth ranks can be passed over by a double push.
            Some(sq) if sq.row() == 2 || sq.row() == 5 => Ok(Some(sq)),
            _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
        }
    }

    /// Converts the fields back to a FEN string with `0 1` clocks.
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for (row, rank) in self.placement.iter().enumerate() {
            let mut empty = 0;
            for cell in rank {
                match cell {
                    Some((kind, color)) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(kind.to_fen_char(*color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if row < 7 {
                placement.push('/');
            }
        }

        let active = match self.active_color {
            Color::White => 'w',
            Color::Black => 'b',
        };

        let mut castling = String::new();
        for (flag, c) in [
            (self.castling[0][0], 'K'),
            (self.castling[0][1], 'Q'),
            (self.castling[1][0], 'k'),
            (self.castling[1][1], 'q'),
        ] {
            if flag {
                castling.push(c);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic());

        format!("{} {} {} {} 0 1", placement, active, castling, ep)
    }
}

impl Default for FenFields {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}
