//! Core type definitions for diagram editing
//!
//! This module contains the enumerated vocabulary shared by the store,
//! the serializer and the layout adapter: node shapes, edge styles, arrow
//! types, flow direction and the diagram-wide appearance settings.
//!
//! Every enum has a stable wire name (`as_str`) used for the persisted JSON
//! format, the `%%{ init }%%` directive and `Display`.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Node shapes matching Mermaid.js flowchart syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeShape {
    /// Rectangle: `A["label"]`
    #[default]
    Rectangle,
    /// Rounded rectangle: `A("label")`
    Rounded,
    /// Stadium: `A(["label"])`
    Stadium,
    /// Subroutine: `A[["label"]]`
    Subroutine,
    /// Cylinder (database): `A[("label")]`
    Cylinder,
    /// Circle: `A(("label"))`
    Circle,
    /// Double circle: `A((("label")))`
    DoubleCircle,
    /// Diamond (decision): `A{"label"}`
    Diamond,
    /// Hexagon: `A{{"label"}}`
    Hexagon,
    /// Parallelogram: `A[/"label"/]`
    Parallelogram,
    /// Alternate parallelogram: `A[\"label"\]`
    ParallelogramAlt,
    /// Trapezoid: `A[/"label"\]`
    Trapezoid,
    /// Alternate trapezoid: `A[\"label"/]`
    TrapezoidAlt,
    /// Asymmetric (flag): `A>"label"]`
    Asymmetric,
}

impl NodeShape {
    /// Every shape, in toolbar order
    pub const ALL: [NodeShape; 14] = [
        NodeShape::Rectangle,
        NodeShape::Rounded,
        NodeShape::Stadium,
        NodeShape::Subroutine,
        NodeShape::Cylinder,
        NodeShape::Circle,
        NodeShape::DoubleCircle,
        NodeShape::Diamond,
        NodeShape::Hexagon,
        NodeShape::Parallelogram,
        NodeShape::ParallelogramAlt,
        NodeShape::Trapezoid,
        NodeShape::TrapezoidAlt,
        NodeShape::Asymmetric,
    ];

    /// Wire name of the shape
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeShape::Rectangle => "rectangle",
            NodeShape::Rounded => "rounded",
            NodeShape::Stadium => "stadium",
            NodeShape::Subroutine => "subroutine",
            NodeShape::Cylinder => "cylinder",
            NodeShape::Circle => "circle",
            NodeShape::DoubleCircle => "double-circle",
            NodeShape::Diamond => "diamond",
            NodeShape::Hexagon => "hexagon",
            NodeShape::Parallelogram => "parallelogram",
            NodeShape::ParallelogramAlt => "parallelogram-alt",
            NodeShape::Trapezoid => "trapezoid",
            NodeShape::TrapezoidAlt => "trapezoid-alt",
            NodeShape::Asymmetric => "asymmetric",
        }
    }

    /// Opening and closing bracket tokens wrapped around the quoted label
    pub fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            NodeShape::Rectangle => ("[", "]"),
            NodeShape::Rounded => ("(", ")"),
            NodeShape::Stadium => ("([", "])"),
            NodeShape::Subroutine => ("[[", "]]"),
            NodeShape::Cylinder => ("[(", ")]"),
            NodeShape::Circle => ("((", "))"),
            NodeShape::DoubleCircle => ("(((", ")))"),
            NodeShape::Diamond => ("{", "}"),
            NodeShape::Hexagon => ("{{", "}}"),
            NodeShape::Parallelogram => ("[/", "/]"),
            NodeShape::ParallelogramAlt => ("[\\", "\\]"),
            NodeShape::Trapezoid => ("[/", "\\]"),
            NodeShape::TrapezoidAlt => ("[\\", "/]"),
            NodeShape::Asymmetric => (">", "]"),
        }
    }
}

/// Line style of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    /// Solid line: `--`
    #[default]
    Solid,
    /// Dashed line: `-.-`
    Dashed,
    /// Thick line: `==`
    Thick,
}

impl EdgeStyle {
    pub const ALL: [EdgeStyle; 3] = [EdgeStyle::Solid, EdgeStyle::Dashed, EdgeStyle::Thick];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeStyle::Solid => "solid",
            EdgeStyle::Dashed => "dashed",
            EdgeStyle::Thick => "thick",
        }
    }
}

/// Arrowhead decoration of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowType {
    /// Single arrowhead at the target
    #[default]
    Arrow,
    /// Plain line
    None,
    /// Arrowheads at both ends
    Bidirectional,
    /// Open circle at the target
    Circle,
    /// Cross at the target
    Cross,
}

impl ArrowType {
    pub const ALL: [ArrowType; 5] = [
        ArrowType::Arrow,
        ArrowType::None,
        ArrowType::Bidirectional,
        ArrowType::Circle,
        ArrowType::Cross,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArrowType::Arrow => "arrow",
            ArrowType::None => "none",
            ArrowType::Bidirectional => "bidirectional",
            ArrowType::Circle => "circle",
            ArrowType::Cross => "cross",
        }
    }

    /// Returns true if the edge is decorated at its source end as well
    pub fn is_bidirectional(&self) -> bool {
        matches!(self, ArrowType::Bidirectional)
    }
}

/// Flow direction for the diagram layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
pub enum Direction {
    /// Top to bottom (TD or TB)
    #[default]
    #[serde(rename = "TD")]
    TopDown,
    /// Left to right (LR)
    #[serde(rename = "LR")]
    LeftRight,
    /// Bottom to top (BT)
    #[serde(rename = "BT")]
    BottomUp,
    /// Right to left (RL)
    #[serde(rename = "RL")]
    RightLeft,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::TopDown,
        Direction::LeftRight,
        Direction::BottomUp,
        Direction::RightLeft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::TopDown => "TD",
            Direction::LeftRight => "LR",
            Direction::BottomUp => "BT",
            Direction::RightLeft => "RL",
        }
    }

    /// Returns true if this is a vertical layout (TD or BT)
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::TopDown | Direction::BottomUp)
    }

    /// Returns true if this is a horizontal layout (LR or RL)
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::LeftRight | Direction::RightLeft)
    }

    /// Returns true if the flow is reversed (RL or BT)
    pub fn is_reversed(&self) -> bool {
        matches!(self, Direction::RightLeft | Direction::BottomUp)
    }
}

/// Mermaid color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Dark,
    Forest,
    Neutral,
    Base,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Default,
        Theme::Dark,
        Theme::Forest,
        Theme::Neutral,
        Theme::Base,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Dark => "dark",
            Theme::Forest => "forest",
            Theme::Neutral => "neutral",
            Theme::Base => "base",
        }
    }
}

/// Rendering look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Look {
    #[default]
    Classic,
    HandDrawn,
}

impl Look {
    pub const ALL: [Look; 2] = [Look::Classic, Look::HandDrawn];

    pub fn as_str(&self) -> &'static str {
        match self {
            Look::Classic => "classic",
            Look::HandDrawn => "handDrawn",
        }
    }
}

/// Spline interpolation used for edge curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CurveStyle {
    #[default]
    Basis,
    BumpX,
    BumpY,
    Cardinal,
    CatmullRom,
    Linear,
    MonotoneX,
    MonotoneY,
    Natural,
    Step,
    StepAfter,
    StepBefore,
}

impl CurveStyle {
    pub const ALL: [CurveStyle; 12] = [
        CurveStyle::Basis,
        CurveStyle::BumpX,
        CurveStyle::BumpY,
        CurveStyle::Cardinal,
        CurveStyle::CatmullRom,
        CurveStyle::Linear,
        CurveStyle::MonotoneX,
        CurveStyle::MonotoneY,
        CurveStyle::Natural,
        CurveStyle::Step,
        CurveStyle::StepAfter,
        CurveStyle::StepBefore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CurveStyle::Basis => "basis",
            CurveStyle::BumpX => "bumpX",
            CurveStyle::BumpY => "bumpY",
            CurveStyle::Cardinal => "cardinal",
            CurveStyle::CatmullRom => "catmullRom",
            CurveStyle::Linear => "linear",
            CurveStyle::MonotoneX => "monotoneX",
            CurveStyle::MonotoneY => "monotoneY",
            CurveStyle::Natural => "natural",
            CurveStyle::Step => "step",
            CurveStyle::StepAfter => "stepAfter",
            CurveStyle::StepBefore => "stepBefore",
        }
    }
}

// Display and FromStr share the wire names for every enum above.
macro_rules! wire_name_impls {
    ($($ty:ident => $what:literal),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = String;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    $ty::ALL
                        .iter()
                        .copied()
                        .find(|v| v.as_str() == s)
                        .ok_or_else(|| format!("Unknown {}: {}", $what, s))
                }
            }
        )+
    };
}

wire_name_impls! {
    NodeShape => "node shape",
    EdgeStyle => "edge style",
    ArrowType => "arrow type",
    Theme => "theme",
    Look => "look",
    CurveStyle => "curve style",
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Parse direction from mermaid syntax (TD, TB, LR, RL, BT)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TD" | "TB" => Ok(Direction::TopDown),
            "LR" => Ok(Direction::LeftRight),
            "RL" => Ok(Direction::RightLeft),
            "BT" => Ok(Direction::BottomUp),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

/// A point on the editing canvas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, serde::Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return this position moved by `(dx, dy)`
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}
