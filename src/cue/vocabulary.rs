//! Shared vocabulary for cue entries
//!
//!     Every cue entry carries an [Instruction] (what the rider does), an optional
//!     [Modifier] qualifying a turn, and a [Color] hint for the row background. All three
//!     are closed sets: the renderer matches on them exhaustively, and the only open-ended
//!     value, a user-authored custom instruction, travels as the string payload of
//!     [Instruction::Custom].

use serde::Serialize;
use std::fmt;

/// The action a cue entry represents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Instruction {
    Left,
    Right,
    Straight,
    /// Food or water stop.
    Pit,
    Danger,
    Crosses,
    CatHc,
    Cat1,
    Cat2,
    Cat3,
    Cat4,
    Cat5,
    Summit,
    FirstAid,
    RouteStart,
    RouteEnd,
    /// User-authored instruction, displayed verbatim.
    Custom(String),
    None,
}

impl Instruction {
    /// Fixed short display code. Custom instructions display their own text.
    pub fn code(&self) -> &str {
        match self {
            Instruction::Left => "L",
            Instruction::Right => "R",
            Instruction::Straight => "S",
            Instruction::Pit => "PIT",
            Instruction::Danger => "!",
            Instruction::Crosses => "X",
            Instruction::CatHc => "CHC",
            Instruction::Cat1 => "C1",
            Instruction::Cat2 => "C2",
            Instruction::Cat3 => "C3",
            Instruction::Cat4 => "C4",
            Instruction::Cat5 => "C5",
            Instruction::Summit => "^",
            Instruction::FirstAid => "+",
            Instruction::RouteStart => "START",
            Instruction::RouteEnd => "END",
            Instruction::Custom(text) => text,
            Instruction::None => "",
        }
    }

    /// Maps a route-service type string to an instruction.
    ///
    /// Unknown strings are not an error: they become [Instruction::Custom] with the
    /// original text preserved so the sheet still shows something meaningful.
    pub fn from_service_type(type_str: &str) -> Self {
        Self::lookup(type_str).unwrap_or_else(|| Instruction::Custom(type_str.to_string()))
    }

    /// Fixed lookup table for the route-service type strings.
    pub fn lookup(type_str: &str) -> Option<Self> {
        let instruction = match type_str {
            "Left" => Instruction::Left,
            "Right" => Instruction::Right,
            "Straight" => Instruction::Straight,
            "Food" | "Water" => Instruction::Pit,
            "Danger" => Instruction::Danger,
            "Start" => Instruction::RouteStart,
            "End" => Instruction::RouteEnd,
            "Summit" => Instruction::Summit,
            "4th Category" => Instruction::Cat4,
            "3rd Category" => Instruction::Cat3,
            "2nd Category" => Instruction::Cat2,
            "1st Category" => Instruction::Cat1,
            "Hors Category" => Instruction::CatHc,
            "First Aid" => Instruction::FirstAid,
            _ => return None,
        };
        Some(instruction)
    }

    /// Label used by the climb icon, for the categorized climbs only.
    pub fn climb_label(&self) -> Option<&'static str> {
        match self {
            Instruction::Cat1 => Some("1"),
            Instruction::Cat2 => Some("2"),
            Instruction::Cat3 => Some("3"),
            Instruction::Cat4 => Some("4"),
            Instruction::Cat5 => Some("5"),
            Instruction::CatHc => Some("HC"),
            _ => None,
        }
    }

    pub fn is_turn(&self) -> bool {
        matches!(self, Instruction::Left | Instruction::Right)
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Instruction::Custom(_))
    }

    /// The custom text, if this is a custom instruction.
    pub fn custom_text(&self) -> Option<&str> {
        match self {
            Instruction::Custom(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Qualifier on a turn instruction. Only meaningful for left/right turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    #[default]
    None,
    Slight,
    Quick,
}

impl Modifier {
    pub fn code(self) -> &'static str {
        match self {
            Modifier::None => "",
            Modifier::Slight => "B",
            Modifier::Quick => "Q",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Background hint for a cue row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    None,
    Gray,
    Yellow,
}

impl Color {
    /// Color derived from an instruction at ingestion time.
    pub fn from_instruction(instruction: &Instruction) -> Self {
        match instruction {
            Instruction::Pit | Instruction::Danger => Color::Yellow,
            Instruction::Right => Color::Gray,
            _ => Color::None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::None => "None",
            Color::Gray => "Gray",
            Color::Yellow => "Yellow",
        };
        f.write_str(name)
    }
}
