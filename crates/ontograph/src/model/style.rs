//! Style vocabulary: the closed sets of shapes, line types and arrow
//! terminals a request may name, plus validated hex colors.
//!
//! Each enum carries two spellings: the request token accepted from callers
//! (`roundRectangle`) and the value written into the yEd document
//! (`roundrectangle`).

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeShape {
    None,
    Circle,
    SmallCircle,
    Diamond,
    Ellipse,
    Hexagon,
    ParallelogramLeft,
    ParallelogramRight,
    RoundRectangle,
    SquareRectangle,
}

impl NodeShape {
    pub const ALL: [NodeShape; 10] = [
        NodeShape::None,
        NodeShape::Circle,
        NodeShape::SmallCircle,
        NodeShape::Diamond,
        NodeShape::Ellipse,
        NodeShape::Hexagon,
        NodeShape::ParallelogramLeft,
        NodeShape::ParallelogramRight,
        NodeShape::RoundRectangle,
        NodeShape::SquareRectangle,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.token() == token)
    }

    pub fn token(self) -> &'static str {
        match self {
            NodeShape::None => "none",
            NodeShape::Circle => "circle",
            NodeShape::SmallCircle => "smallCircle",
            NodeShape::Diamond => "diamond",
            NodeShape::Ellipse => "ellipse",
            NodeShape::Hexagon => "hexagon",
            NodeShape::ParallelogramLeft => "parallelogramLeft",
            NodeShape::ParallelogramRight => "parallelogramRight",
            NodeShape::RoundRectangle => "roundRectangle",
            NodeShape::SquareRectangle => "squareRectangle",
        }
    }

    pub fn yed_name(self) -> &'static str {
        match self {
            NodeShape::None | NodeShape::SquareRectangle => "rectangle",
            NodeShape::Circle | NodeShape::SmallCircle => "ellipse",
            NodeShape::Diamond => "diamond",
            NodeShape::Ellipse => "ellipse",
            NodeShape::Hexagon => "hexagon",
            NodeShape::ParallelogramLeft => "parallelogram2",
            NodeShape::ParallelogramRight => "parallelogram",
            NodeShape::RoundRectangle => "roundrectangle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineType {
    Solid,
    Dashed,
    Dotted,
    DashedDotted,
}

impl LineType {
    pub const ALL: [LineType; 4] = [
        LineType::Solid,
        LineType::Dashed,
        LineType::Dotted,
        LineType::DashedDotted,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.token() == token)
    }

    pub fn token(self) -> &'static str {
        match self {
            LineType::Solid => "solid",
            LineType::Dashed => "dashed",
            LineType::Dotted => "dotted",
            LineType::DashedDotted => "dashedDotted",
        }
    }

    pub fn yed_name(self) -> &'static str {
        match self {
            LineType::Solid => "line",
            LineType::Dashed => "dashed",
            LineType::Dotted => "dotted",
            LineType::DashedDotted => "dashed_dotted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowShape {
    None,
    CircleEmpty,
    CircleSolid,
    DiamondEmpty,
    DiamondSolid,
    TriangleEmpty,
    TriangleSolid,
    AngleBracket,
    Backslash,
}

impl ArrowShape {
    pub const ALL: [ArrowShape; 9] = [
        ArrowShape::None,
        ArrowShape::CircleEmpty,
        ArrowShape::CircleSolid,
        ArrowShape::DiamondEmpty,
        ArrowShape::DiamondSolid,
        ArrowShape::TriangleEmpty,
        ArrowShape::TriangleSolid,
        ArrowShape::AngleBracket,
        ArrowShape::Backslash,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.token() == token)
    }

    pub fn token(self) -> &'static str {
        match self {
            ArrowShape::None => "none",
            ArrowShape::CircleEmpty => "circleEmpty",
            ArrowShape::CircleSolid => "circleSolid",
            ArrowShape::DiamondEmpty => "diamondEmpty",
            ArrowShape::DiamondSolid => "diamondSolid",
            ArrowShape::TriangleEmpty => "triangleEmpty",
            ArrowShape::TriangleSolid => "triangleSolid",
            ArrowShape::AngleBracket => "angleBracket",
            ArrowShape::Backslash => "backslash",
        }
    }

    pub fn yed_name(self) -> &'static str {
        match self {
            ArrowShape::None => "none",
            ArrowShape::CircleEmpty => "transparent_circle",
            ArrowShape::CircleSolid => "circle",
            ArrowShape::DiamondEmpty => "white_diamond",
            ArrowShape::DiamondSolid => "diamond",
            ArrowShape::TriangleEmpty => "white_delta",
            ArrowShape::TriangleSolid => "delta",
            ArrowShape::AngleBracket => "plain",
            ArrowShape::Backslash => "skewed_dash",
        }
    }
}

/// A `#RRGGBB` color. Construction goes through [`Color::parse`] or the
/// built-in constants, so a `Color` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    pub fn parse(value: &str) -> Option<Self> {
        is_hex_color(value).then(|| Color(value.to_ascii_uppercase()))
    }

    /// For compile-time palette entries that are known to be well formed.
    pub(crate) fn fixed(value: &'static str) -> Self {
        Color(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip_through_from_token() {
        for shape in NodeShape::ALL {
            assert_eq!(NodeShape::from_token(shape.token()), Some(shape));
        }
        for line in LineType::ALL {
            assert_eq!(LineType::from_token(line.token()), Some(line));
        }
        for arrow in ArrowShape::ALL {
            assert_eq!(ArrowShape::from_token(arrow.token()), Some(arrow));
        }
    }

    #[test]
    fn tokens_are_case_sensitive() {
        assert_eq!(NodeShape::from_token("RoundRectangle"), None);
        assert_eq!(LineType::from_token("Solid"), None);
    }

    #[test]
    fn hex_colors_require_six_digits() {
        assert!(is_hex_color("#A1b2C3"));
        assert!(!is_hex_color("#FFF"));
        assert!(!is_hex_color("FFFFFF"));
        assert!(!is_hex_color("#GGGGGG"));
        assert_eq!(Color::parse("#aaccff").map(|c| c.to_string()), Some("#AACCFF".into()));
    }
}
