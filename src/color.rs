//! The fixed set of colors that categories and tags can be displayed with.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// A display color.
///
/// Serialized as its upper case name, e.g. `"RED"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Brown,
    Gray,
    Black,
    White,
}

impl Color {
    /// Every legal color literal, in declaration order.
    pub const NAMES: &'static [&'static str] = &[
        "RED", "ORANGE", "YELLOW", "GREEN", "BLUE", "PURPLE", "PINK", "BROWN", "GRAY", "BLACK",
        "WHITE",
    ];

    /// The wire and database representation of the color.
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Orange => "ORANGE",
            Color::Yellow => "YELLOW",
            Color::Green => "GREEN",
            Color::Blue => "BLUE",
            Color::Purple => "PURPLE",
            Color::Pink => "PINK",
            Color::Brown => "BROWN",
            Color::Gray => "GRAY",
            Color::Black => "BLACK",
            Color::White => "WHITE",
        }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RED" => Ok(Color::Red),
            "ORANGE" => Ok(Color::Orange),
            "YELLOW" => Ok(Color::Yellow),
            "GREEN" => Ok(Color::Green),
            "BLUE" => Ok(Color::Blue),
            "PURPLE" => Ok(Color::Purple),
            "PINK" => Ok(Color::Pink),
            "BROWN" => Ok(Color::Brown),
            "GRAY" => Ok(Color::Gray),
            "BLACK" => Ok(Color::Black),
            "WHITE" => Ok(Color::White),
            other => Err(format!("unknown color {other:?}")),
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for Color {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Color {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: String| FromSqlError::Other(error.into()))
    }
}
