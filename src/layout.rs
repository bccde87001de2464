//! Flexbox alignment and box-model resolution shared by the generators
//!
//! Both generators read `alignItems`, `justifyContent` and the box-model keys
//! through this module and only own the lowering into their native names.

use crate::ir::{Axis, Node, NodeKind};
use crate::style::NormalizedStyle;

/// Cross-axis placement of children (`alignItems`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossAlign {
    Start,
    Center,
    End,
    Stretch,
    Baseline,
}

/// Main-axis distribution of children (`justifyContent`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainArrange {
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl CrossAlign {
    /// Unset or unknown values center the children
    pub fn from_style(style: Option<&NormalizedStyle>) -> Self {
        match style.and_then(|s| s.text("alignItems")) {
            Some("flex-start") => CrossAlign::Start,
            Some("flex-end") => CrossAlign::End,
            Some("stretch") => CrossAlign::Stretch,
            Some("baseline") => CrossAlign::Baseline,
            _ => CrossAlign::Center,
        }
    }
}

impl MainArrange {
    pub fn from_style(style: Option<&NormalizedStyle>) -> Self {
        match style.and_then(|s| s.text("justifyContent")) {
            Some("center") => MainArrange::Center,
            Some("flex-end") => MainArrange::End,
            Some("space-between") => MainArrange::SpaceBetween,
            Some("space-around") => MainArrange::SpaceAround,
            Some("space-evenly") => MainArrange::SpaceEvenly,
            _ => MainArrange::Start,
        }
    }
}

/// Resolved container layout for a View or Stack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerLayout {
    pub axis: Axis,
    pub cross: CrossAlign,
    pub main: MainArrange,
    pub gap: f64,
}

impl ContainerLayout {
    /// `None` for nodes that do not hold children
    pub fn of(node: &Node) -> Option<Self> {
        let axis = match &node.kind {
            NodeKind::View { .. } => Axis::Vertical,
            NodeKind::Stack { axis, .. } => *axis,
            _ => return None,
        };
        let style = node.style.as_ref();
        Some(Self {
            axis,
            cross: CrossAlign::from_style(style),
            main: MainArrange::from_style(style),
            gap: style.and_then(|s| s.number("gap")).unwrap_or(0.0),
        })
    }
}

/// Padding: a uniform value wins over the directional shortcuts
#[derive(Debug, Clone, PartialEq)]
pub enum Padding {
    Uniform(f64),
    Edges {
        horizontal: Option<f64>,
        vertical: Option<f64>,
        top: Option<f64>,
        bottom: Option<f64>,
        left: Option<f64>,
        right: Option<f64>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.min_width.is_none()
            && self.min_height.is_none()
            && self.max_width.is_none()
            && self.max_height.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub width: f64,
    pub color: String,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    pub color: Option<String>,
    pub opacity: f64,
    pub radius: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

pub const DEFAULT_SHADOW_OPACITY: f64 = 0.2;
pub const DEFAULT_SHADOW_RADIUS: f64 = 4.0;
pub const DEFAULT_SHADOW_OFFSET: (f64, f64) = (0.0, 2.0);

const SHADOW_KEYS: &[&str] = &[
    "shadowColor",
    "shadowOpacity",
    "shadowRadius",
    "shadowOffsetX",
    "shadowOffsetY",
];

/// Box-model modifiers of one node. Generators emit them in field order:
/// padding, frame, aspect ratio, background, corner radius, border, shadow,
/// opacity, z-index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxModel {
    pub padding: Option<Padding>,
    pub frame: Option<Frame>,
    pub aspect_ratio: Option<f64>,
    pub background: Option<String>,
    pub corner_radius: Option<f64>,
    pub border: Option<Border>,
    pub shadow: Option<Shadow>,
    pub opacity: Option<f64>,
    pub z_index: Option<f64>,
}

impl BoxModel {
    /// Zero sizes, paddings and radii count as unset
    pub fn from_style(style: Option<&NormalizedStyle>) -> Self {
        let Some(style) = style else {
            return Self::default();
        };

        let padding = match style.nonzero("padding") {
            Some(all) => Some(Padding::Uniform(all)),
            None => {
                let edges = Padding::Edges {
                    horizontal: style.nonzero("paddingHorizontal"),
                    vertical: style.nonzero("paddingVertical"),
                    top: style.nonzero("paddingTop"),
                    bottom: style.nonzero("paddingBottom"),
                    left: style.nonzero("paddingLeft"),
                    right: style.nonzero("paddingRight"),
                };
                match &edges {
                    Padding::Edges {
                        horizontal: None,
                        vertical: None,
                        top: None,
                        bottom: None,
                        left: None,
                        right: None,
                    } => None,
                    _ => Some(edges),
                }
            }
        };

        let frame = Frame {
            width: style.nonzero("width"),
            height: style.nonzero("height"),
            min_width: style.nonzero("minWidth"),
            min_height: style.nonzero("minHeight"),
            max_width: style.nonzero("maxWidth"),
            max_height: style.nonzero("maxHeight"),
        };
        let frame = (!frame.is_empty()).then_some(frame);

        let corner_radius = style.nonzero("borderRadius");
        let border = match (style.nonzero("borderWidth"), style.text("borderColor")) {
            (Some(width), Some(color)) => Some(Border {
                width,
                color: color.to_string(),
                radius: corner_radius.unwrap_or(0.0),
            }),
            _ => None,
        };

        let shadow = SHADOW_KEYS
            .iter()
            .any(|key| style.get(key).is_some())
            .then(|| Shadow {
                color: style.text("shadowColor").map(str::to_string),
                opacity: style.number("shadowOpacity").unwrap_or(DEFAULT_SHADOW_OPACITY),
                radius: style.number("shadowRadius").unwrap_or(DEFAULT_SHADOW_RADIUS),
                offset_x: style.number("shadowOffsetX").unwrap_or(DEFAULT_SHADOW_OFFSET.0),
                offset_y: style.number("shadowOffsetY").unwrap_or(DEFAULT_SHADOW_OFFSET.1),
            });

        Self {
            padding,
            frame,
            aspect_ratio: style.nonzero("aspectRatio"),
            background: style.text("backgroundColor").map(str::to_string),
            corner_radius,
            border,
            shadow,
            opacity: style.number("opacity"),
            z_index: style.number("zIndex"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::normalize_style;
    use crate::value::Literal;
    use indexmap::IndexMap;

    fn styled(kind: NodeKind, entries: &[(&str, &str)]) -> Node {
        let bag: IndexMap<String, Literal> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), Literal::String(v.to_string())))
            .collect();
        let mut node = Node::new(kind);
        node.style = Some(normalize_style(Some(&bag)));
        node
    }

    #[test]
    fn test_unset_alignment_centers() {
        let layout = ContainerLayout::of(&Node::placeholder()).unwrap();
        assert_eq!(layout.axis, Axis::Vertical);
        assert_eq!(layout.cross, CrossAlign::Center);
        assert_eq!(layout.main, MainArrange::Start);
        assert_eq!(layout.gap, 0.0);
    }

    #[test]
    fn test_stack_reads_style() {
        let node = styled(
            NodeKind::Stack {
                axis: Axis::Horizontal,
                children: Vec::new(),
            },
            &[("alignItems", "baseline"), ("justifyContent", "space-between")],
        );
        let layout = ContainerLayout::of(&node).unwrap();
        assert_eq!(layout.axis, Axis::Horizontal);
        assert_eq!(layout.cross, CrossAlign::Baseline);
        assert_eq!(layout.main, MainArrange::SpaceBetween);
    }

    fn with_numbers(entries: &[(&str, f64)]) -> NormalizedStyle {
        let bag: IndexMap<String, Literal> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), Literal::Number(*v)))
            .collect();
        normalize_style(Some(&bag))
    }

    #[test]
    fn test_uniform_padding_wins() {
        let style = with_numbers(&[("padding", 16.0), ("paddingTop", 4.0)]);
        let model = BoxModel::from_style(Some(&style));
        assert_eq!(model.padding, Some(Padding::Uniform(16.0)));

        let style = with_numbers(&[("paddingTop", 4.0), ("paddingLeft", 0.0)]);
        match BoxModel::from_style(Some(&style)).padding {
            Some(Padding::Edges { top, left, .. }) => {
                assert_eq!(top, Some(4.0));
                assert_eq!(left, None);
            }
            other => panic!("unexpected padding {:?}", other),
        }
    }

    #[test]
    fn test_shadow_defaults() {
        let style = with_numbers(&[("shadowRadius", 8.0)]);
        let shadow = BoxModel::from_style(Some(&style)).shadow.unwrap();
        assert_eq!(shadow.radius, 8.0);
        assert_eq!(shadow.opacity, DEFAULT_SHADOW_OPACITY);
        assert_eq!((shadow.offset_x, shadow.offset_y), DEFAULT_SHADOW_OFFSET);
        assert!(shadow.color.is_none());

        assert!(BoxModel::from_style(Some(&with_numbers(&[("width", 10.0)])))
            .shadow
            .is_none());
    }

    #[test]
    fn test_border_needs_width_and_color() {
        let mut bag: IndexMap<String, Literal> = IndexMap::new();
        bag.insert("borderWidth".into(), Literal::Number(1.0));
        let style = normalize_style(Some(&bag));
        assert!(BoxModel::from_style(Some(&style)).border.is_none());

        bag.insert("borderColor".into(), Literal::String("#000".into()));
        bag.insert("borderRadius".into(), Literal::Number(6.0));
        let model = BoxModel::from_style(Some(&normalize_style(Some(&bag))));
        assert_eq!(model.border.unwrap().radius, 6.0);
        assert_eq!(model.corner_radius, Some(6.0));
    }

    #[test]
    fn test_frame_and_opacity_zero() {
        let style = with_numbers(&[("height", 40.0), ("width", 100.0), ("opacity", 0.0)]);
        let model = BoxModel::from_style(Some(&style));
        let frame = model.frame.unwrap();
        assert_eq!((frame.width, frame.height, frame.max_width), (Some(100.0), Some(40.0), None));
        assert_eq!(model.opacity, Some(0.0));
        assert_eq!(BoxModel::from_style(None), BoxModel::default());
    }

    #[test]
    fn test_leaf_has_no_layout() {
        let node = Node::new(NodeKind::Spacer { flex: None });
        assert!(ContainerLayout::of(&node).is_none());
    }
}
