//! Style normalization
//!
//! A flat bag of presentation attributes is classified into five disjoint
//! buckets (layout, typography, colors, borders, shadows). Each bucket is a
//! fixed record of known keys; anything else is dropped.

use crate::value::{serialize_js_number, Literal};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// Scalar style value as it appears in source and in the IR
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Serialize for StyleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StyleValue::Bool(b) => serializer.serialize_bool(*b),
            StyleValue::Number(n) => serialize_js_number(n, serializer),
            StyleValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl StyleValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn from_literal(literal: &Literal) -> Option<Self> {
        match literal {
            Literal::Bool(b) => Some(StyleValue::Bool(*b)),
            Literal::Number(n) => Some(StyleValue::Number(*n)),
            Literal::String(s) => Some(StyleValue::Text(s.clone())),
            _ => None,
        }
    }

    pub fn to_literal(&self) -> Literal {
        match self {
            StyleValue::Bool(b) => Literal::Bool(*b),
            StyleValue::Number(n) => Literal::Number(*n),
            StyleValue::Text(s) => Literal::String(s.clone()),
        }
    }
}

/// Expected shape of a style key, checked by the schema validator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueKind {
    Number,
    /// Number in `[0, 1]`
    Fraction,
    Text,
    OneOf(&'static [&'static str]),
}

macro_rules! style_bucket {
    ($(#[$meta:meta])* $name:ident { $($field:ident : $key:literal => $kind:expr),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            $(
                #[serde(rename = $key, default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<StyleValue>,
            )*
        }

        impl $name {
            pub const KEYS: &'static [(&'static str, ValueKind)] = &[$(($key, $kind)),*];

            pub fn contains(key: &str) -> bool {
                Self::KEYS.iter().any(|(k, _)| *k == key)
            }

            pub fn get(&self, key: &str) -> Option<&StyleValue> {
                match key {
                    $($key => self.$field.as_ref(),)*
                    _ => None,
                }
            }

            fn insert(&mut self, key: &str, value: StyleValue) -> bool {
                match key {
                    $($key => {
                        self.$field = Some(value);
                        true
                    })*
                    _ => false,
                }
            }

            /// Populated keys in declaration order
            pub fn entries(&self) -> Vec<(&'static str, &StyleValue)> {
                let mut out = Vec::new();
                $(
                    if let Some(value) = &self.$field {
                        out.push(($key, value));
                    }
                )*
                out
            }

            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())*
            }
        }
    };
}

const FLEX_DIRECTIONS: &[&str] = &["row", "column"];
const ALIGN_ITEMS: &[&str] = &["flex-start", "flex-end", "center", "stretch", "baseline"];
const JUSTIFY_CONTENT: &[&str] = &[
    "flex-start",
    "flex-end",
    "center",
    "space-between",
    "space-around",
    "space-evenly",
];
const POSITIONS: &[&str] = &["relative", "absolute"];
const FONT_WEIGHTS: &[&str] = &[
    "100", "200", "300", "400", "500", "600", "700", "800", "900", "normal", "bold",
];
const FONT_STYLES: &[&str] = &["normal", "italic"];
const ELLIPSIZE_MODES: &[&str] = &["head", "middle", "tail", "clip"];
const TEXT_ALIGNS: &[&str] = &["auto", "left", "right", "center", "justify"];
const TEXT_TRANSFORMS: &[&str] = &["none", "uppercase", "lowercase", "capitalize"];
const BORDER_STYLES: &[&str] = &["solid", "dashed", "dotted"];

style_bucket! {
    LayoutStyle {
        flex_direction: "flexDirection" => ValueKind::OneOf(FLEX_DIRECTIONS),
        align_items: "alignItems" => ValueKind::OneOf(ALIGN_ITEMS),
        justify_content: "justifyContent" => ValueKind::OneOf(JUSTIFY_CONTENT),
        gap: "gap" => ValueKind::Number,
        padding: "padding" => ValueKind::Number,
        padding_horizontal: "paddingHorizontal" => ValueKind::Number,
        padding_vertical: "paddingVertical" => ValueKind::Number,
        padding_top: "paddingTop" => ValueKind::Number,
        padding_right: "paddingRight" => ValueKind::Number,
        padding_bottom: "paddingBottom" => ValueKind::Number,
        padding_left: "paddingLeft" => ValueKind::Number,
        margin: "margin" => ValueKind::Number,
        margin_horizontal: "marginHorizontal" => ValueKind::Number,
        margin_vertical: "marginVertical" => ValueKind::Number,
        margin_top: "marginTop" => ValueKind::Number,
        margin_right: "marginRight" => ValueKind::Number,
        margin_bottom: "marginBottom" => ValueKind::Number,
        margin_left: "marginLeft" => ValueKind::Number,
        width: "width" => ValueKind::Number,
        height: "height" => ValueKind::Number,
        min_width: "minWidth" => ValueKind::Number,
        min_height: "minHeight" => ValueKind::Number,
        max_width: "maxWidth" => ValueKind::Number,
        max_height: "maxHeight" => ValueKind::Number,
        flex: "flex" => ValueKind::Number,
        flex_grow: "flexGrow" => ValueKind::Number,
        flex_shrink: "flexShrink" => ValueKind::Number,
        flex_basis: "flexBasis" => ValueKind::Number,
        position: "position" => ValueKind::OneOf(POSITIONS),
        top: "top" => ValueKind::Number,
        right: "right" => ValueKind::Number,
        bottom: "bottom" => ValueKind::Number,
        left: "left" => ValueKind::Number,
        aspect_ratio: "aspectRatio" => ValueKind::Number,
        z_index: "zIndex" => ValueKind::Number,
    }
}

style_bucket! {
    TypographyStyle {
        font_size: "fontSize" => ValueKind::Number,
        font_weight: "fontWeight" => ValueKind::OneOf(FONT_WEIGHTS),
        font_family: "fontFamily" => ValueKind::Text,
        font_style: "fontStyle" => ValueKind::OneOf(FONT_STYLES),
        color: "color" => ValueKind::Text,
        number_of_lines: "numberOfLines" => ValueKind::Number,
        ellipsize_mode: "ellipsizeMode" => ValueKind::OneOf(ELLIPSIZE_MODES),
        text_align: "textAlign" => ValueKind::OneOf(TEXT_ALIGNS),
        text_transform: "textTransform" => ValueKind::OneOf(TEXT_TRANSFORMS),
        line_height: "lineHeight" => ValueKind::Number,
        letter_spacing: "letterSpacing" => ValueKind::Number,
    }
}

style_bucket! {
    ColorStyle {
        background_color: "backgroundColor" => ValueKind::Text,
        opacity: "opacity" => ValueKind::Fraction,
        tint_color: "tintColor" => ValueKind::Text,
    }
}

style_bucket! {
    BorderStyle {
        border_radius: "borderRadius" => ValueKind::Number,
        border_top_left_radius: "borderTopLeftRadius" => ValueKind::Number,
        border_top_right_radius: "borderTopRightRadius" => ValueKind::Number,
        border_bottom_left_radius: "borderBottomLeftRadius" => ValueKind::Number,
        border_bottom_right_radius: "borderBottomRightRadius" => ValueKind::Number,
        border_width: "borderWidth" => ValueKind::Number,
        border_color: "borderColor" => ValueKind::Text,
        border_style: "borderStyle" => ValueKind::OneOf(BORDER_STYLES),
    }
}

style_bucket! {
    ShadowStyle {
        shadow_color: "shadowColor" => ValueKind::Text,
        shadow_opacity: "shadowOpacity" => ValueKind::Fraction,
        shadow_radius: "shadowRadius" => ValueKind::Number,
        shadow_offset_x: "shadowOffsetX" => ValueKind::Number,
        shadow_offset_y: "shadowOffsetY" => ValueKind::Number,
        elevation: "elevation" => ValueKind::Number,
    }
}

/// Style split into semantic buckets; empty buckets are `None`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<TypographyStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borders: Option<BorderStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadows: Option<ShadowStyle>,
}

impl NormalizedStyle {
    pub fn is_empty(&self) -> bool {
        self.layout.is_none()
            && self.typography.is_none()
            && self.colors.is_none()
            && self.borders.is_none()
            && self.shadows.is_none()
    }

    /// Look up a key in whichever bucket owns it
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        if LayoutStyle::contains(key) {
            self.layout.as_ref()?.get(key)
        } else if TypographyStyle::contains(key) {
            self.typography.as_ref()?.get(key)
        } else if ColorStyle::contains(key) {
            self.colors.as_ref()?.get(key)
        } else if BorderStyle::contains(key) {
            self.borders.as_ref()?.get(key)
        } else if ShadowStyle::contains(key) {
            self.shadows.as_ref()?.get(key)
        } else {
            None
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(StyleValue::as_f64)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(StyleValue::as_str)
    }

    /// Number that is present and non-zero
    pub fn nonzero(&self, key: &str) -> Option<f64> {
        self.number(key).filter(|n| *n != 0.0)
    }

    /// Every populated key, bucket by bucket
    pub fn entries(&self) -> Vec<(&'static str, &StyleValue)> {
        let mut out = Vec::new();
        if let Some(bucket) = &self.layout {
            out.extend(bucket.entries());
        }
        if let Some(bucket) = &self.typography {
            out.extend(bucket.entries());
        }
        if let Some(bucket) = &self.colors {
            out.extend(bucket.entries());
        }
        if let Some(bucket) = &self.borders {
            out.extend(bucket.entries());
        }
        if let Some(bucket) = &self.shadows {
            out.extend(bucket.entries());
        }
        out
    }

    /// Flatten the buckets back into a single bag
    pub fn to_flat(&self) -> IndexMap<String, Literal> {
        self.entries()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_literal()))
            .collect()
    }
}

/// Bucket a flat property bag. Unknown keys and non-scalar values are dropped.
pub fn normalize_style(bag: Option<&IndexMap<String, Literal>>) -> NormalizedStyle {
    let bag = match bag {
        Some(bag) if !bag.is_empty() => bag,
        _ => return NormalizedStyle::default(),
    };

    let mut layout = LayoutStyle::default();
    let mut typography = TypographyStyle::default();
    let mut colors = ColorStyle::default();
    let mut borders = BorderStyle::default();
    let mut shadows = ShadowStyle::default();

    for (key, literal) in expand_shadow_offset(bag) {
        let value = match StyleValue::from_literal(&literal) {
            Some(value) => value,
            None => {
                log::debug!("Dropping non-scalar style value for '{}'", key);
                continue;
            }
        };

        let placed = layout.insert(&key, value.clone())
            || typography.insert(&key, value.clone())
            || colors.insert(&key, value.clone())
            || borders.insert(&key, value.clone())
            || shadows.insert(&key, value);
        if !placed {
            log::debug!("Dropping unknown style key '{}'", key);
        }
    }

    NormalizedStyle {
        layout: (!layout.is_empty()).then_some(layout),
        typography: (!typography.is_empty()).then_some(typography),
        colors: (!colors.is_empty()).then_some(colors),
        borders: (!borders.is_empty()).then_some(borders),
        shadows: (!shadows.is_empty()).then_some(shadows),
    }
}

/// `shadowOffset: { width, height }` becomes `shadowOffsetX` / `shadowOffsetY`
fn expand_shadow_offset(bag: &IndexMap<String, Literal>) -> Vec<(String, Literal)> {
    let mut out = Vec::with_capacity(bag.len() + 1);
    for (key, value) in bag {
        if key == "shadowOffset" {
            if let Literal::Object(offset) = value {
                if let Some(width) = offset.get("width") {
                    out.push(("shadowOffsetX".to_string(), width.clone()));
                }
                if let Some(height) = offset.get("height") {
                    out.push(("shadowOffsetY".to_string(), height.clone()));
                }
            }
            continue;
        }
        out.push((key.clone(), value.clone()));
    }
    out
}
