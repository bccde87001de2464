//! Intermediate representation shared by the compiler and both generators
//!
//! The IR is a versioned tree of [`Node`]s wrapped in an [`IrRoot`]. It is
//! serialized as camelCase JSON with the node variant stored in a `type` tag.

use crate::style::NormalizedStyle;
use crate::value::{serialize_js_number, serialize_opt_js_number};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// Current IR schema version. Generators reject anything else.
pub const IR_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrRoot {
    pub version: u32,
    pub root_id: String,
    pub tree: Node,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<WidgetMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_activity: Option<LiveActivityConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_provider: Option<DataProvider>,
}

impl IrRoot {
    pub fn new(root_id: impl Into<String>, tree: Node) -> Self {
        Self {
            version: IR_VERSION,
            root_id: root_id.into(),
            tree,
            widget: None,
            live_activity: None,
            data_provider: None,
        }
    }

    pub fn is_live_activity(&self) -> bool {
        self.live_activity.is_some()
    }

    pub fn is_widget(&self) -> bool {
        self.widget.is_some()
    }
}

/// One UI node: variant payload plus the fields every variant shares
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<NormalizedStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Accessibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_binding: Option<DataBinding>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum NodeKind {
    View {
        #[serde(default)]
        children: Vec<Node>,
    },
    Text {
        text: TextContent,
    },
    Button {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variant: Option<ButtonVariant>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<ButtonSize>,
    },
    Image {
        uri: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resize_mode: Option<ResizeMode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    Stack {
        axis: Axis,
        #[serde(default)]
        children: Vec<Node>,
    },
    Spacer {
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            serialize_with = "serialize_opt_js_number"
        )]
        flex: Option<f64>,
    },
    ProgressBar {
        #[serde(serialize_with = "serialize_js_number")]
        progress: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        indeterminate: Option<bool>,
    },
    List {
        #[serde(default)]
        items: Vec<serde_json::Value>,
        render_item: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        horizontal: Option<bool>,
    },
}

impl NodeKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::View { .. } => "View",
            NodeKind::Text { .. } => "Text",
            NodeKind::Button { .. } => "Button",
            NodeKind::Image { .. } => "Image",
            NodeKind::Stack { .. } => "Stack",
            NodeKind::Spacer { .. } => "Spacer",
            NodeKind::ProgressBar { .. } => "ProgressBar",
            NodeKind::List { .. } => "List",
        }
    }
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            key: None,
            style: None,
            accessibility: None,
            action: None,
            data_binding: None,
        }
    }

    /// Empty `View`, used as the tree of live-activity roots
    pub fn placeholder() -> Self {
        Self::new(NodeKind::View {
            children: Vec::new(),
        })
    }

    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::View { children } | NodeKind::Stack { children, .. } => children,
            _ => &[],
        }
    }

    /// Number of nodes in this subtree, including itself
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(Node::count).sum::<usize>()
    }

    pub fn style_or_default(&self) -> NormalizedStyle {
        self.style.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextContent {
    Number(f64),
    String(String),
}

impl Serialize for TextContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TextContent::Number(n) => serialize_js_number(n, serializer),
            TextContent::String(s) => serializer.serialize_str(s),
        }
    }
}

impl TextContent {
    pub fn display(&self) -> String {
        match self {
            TextContent::Number(n) => crate::value::format_js_number(*n),
            TextContent::String(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Ghost,
}

impl ButtonVariant {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "primary" => Some(Self::Primary),
            "secondary" => Some(Self::Secondary),
            "ghost" => Some(Self::Ghost),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Small,
    Medium,
    Large,
}

impl ButtonSize {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeMode {
    Cover,
    Contain,
    Fill,
    ScaleDown,
    None,
}

impl ResizeMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cover" => Some(Self::Cover),
            "contain" => Some(Self::Contain),
            "fill" => Some(Self::Fill),
            "scale-down" => Some(Self::ScaleDown),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessibility {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Accessibility {
    pub fn is_empty(&self) -> bool {
        self.accessibility_label.is_none() && self.accessible.is_none() && self.role.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    Deeplink,
    OpenApp,
    Refresh,
    Custom,
}

impl ActionType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "deeplink" => Some(Self::Deeplink),
            "openApp" => Some(Self::OpenApp),
            "refresh" => Some(Self::Refresh),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Declarative tap intent; carries no code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<IndexMap<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

impl Action {
    /// URL of a deeplink action, if this is one
    pub fn deeplink_url(&self) -> Option<&str> {
        match self.action_type {
            ActionType::Deeplink => self.url.as_deref().filter(|url| !url.is_empty()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingSource {
    Local,
    Remote,
    Shared,
}

impl BindingSource {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "local" => Some(Self::Local),
            "remote" => Some(Self::Remote),
            "shared" => Some(Self::Shared),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBinding {
    pub source: BindingSource,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
}

/// Home-screen widget registration data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetMetadata {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub families: Vec<WidgetFamily>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_platforms: Option<Vec<Platform>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WidgetFamily {
    SystemSmall,
    SystemMedium,
    SystemLarge,
    SystemExtraLarge,
    AccessoryRectangular,
    AccessoryCircular,
    AccessoryInline,
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Watchos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<TimelineEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<TimelinePolicy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimelinePolicy {
    Named(NamedPolicy),
    Custom(CustomPolicy),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NamedPolicy {
    AtEnd,
    Never,
    After15Minutes,
    AfterHour,
    AfterDay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomPolicy {
    #[serde(rename = "type")]
    pub policy_type: CustomPolicyTag,
    pub minutes: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomPolicyTag {
    Custom,
}

/// Scalar type of a live-activity attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Number,
    Boolean,
    Date,
}

impl AttributeType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "date" => Some(Self::Date),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityAttributes {
    #[serde(rename = "static", default)]
    pub static_fields: IndexMap<String, AttributeType>,
    #[serde(rename = "dynamic", default)]
    pub dynamic_fields: IndexMap<String, AttributeType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRegions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_screen: Option<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_island: Option<DynamicIsland>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicIsland {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compact: Option<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimal: Option<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveActivityConfig {
    pub activity_type: String,
    pub attributes: ActivityAttributes,
    pub regions: ActivityRegions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stale_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

impl LiveActivityConfig {
    /// Region nodes paired with their dotted paths, in a fixed order
    pub fn region_nodes(&self) -> Vec<(&'static str, &Node)> {
        let mut out = Vec::new();
        if let Some(node) = &self.regions.lock_screen {
            out.push(("regions.lockScreen", node));
        }
        if let Some(island) = &self.regions.dynamic_island {
            if let Some(node) = &island.compact {
                out.push(("regions.dynamicIsland.compact", node));
            }
            if let Some(node) = &island.minimal {
                out.push(("regions.dynamicIsland.minimal", node));
            }
            if let Some(node) = &island.expanded {
                out.push(("regions.dynamicIsland.expanded", node));
            }
        }
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_serializes_with_type_tag() {
        let node = Node::new(NodeKind::Stack {
            axis: Axis::Horizontal,
            children: vec![Node::new(NodeKind::Text {
                text: TextContent::String("Hi".into()),
            })],
        });
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "Stack",
                "axis": "horizontal",
                "children": [{ "type": "Text", "text": "Hi" }]
            })
        );
    }

    #[test]
    fn test_root_round_trips_through_json() {
        let mut root = IrRoot::new(
            "src_Widget_tsx",
            Node::new(NodeKind::ProgressBar {
                progress: 0.75,
                indeterminate: None,
            }),
        );
        root.live_activity = Some(LiveActivityConfig {
            activity_type: "Delivery".into(),
            attributes: ActivityAttributes::default(),
            regions: ActivityRegions::default(),
            stale_date: None,
            relevance_score: Some(50.0),
        });

        let text = serde_json::to_string(&root).unwrap();
        assert!(text.contains(r#""rootId":"src_Widget_tsx""#));
        assert!(text.contains(r#""liveActivity""#));
        let back: IrRoot = serde_json::from_str(&text).unwrap();
        assert_eq!(back, root);
    }

    #[test]
    fn test_list_and_image_field_names() {
        let node = Node::new(NodeKind::List {
            items: vec![json!(1)],
            render_item: "renderRow".into(),
            horizontal: None,
        });
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["renderItem"], "renderRow");

        let image = Node::new(NodeKind::Image {
            uri: "https://x/y.png".into(),
            resize_mode: Some(ResizeMode::ScaleDown),
            placeholder: None,
        });
        let value = serde_json::to_value(&image).unwrap();
        assert_eq!(value["resizeMode"], "scale-down");
    }

    #[test]
    fn test_timeline_policy_forms() {
        let named: TimelinePolicy = serde_json::from_value(json!("afterHour")).unwrap();
        assert_eq!(named, TimelinePolicy::Named(NamedPolicy::AfterHour));
        let custom: TimelinePolicy =
            serde_json::from_value(json!({ "type": "custom", "minutes": 30 })).unwrap();
        assert!(matches!(custom, TimelinePolicy::Custom(_)));
    }

    #[test]
    fn test_count_nodes() {
        let tree = Node::new(NodeKind::View {
            children: vec![Node::placeholder(), Node::placeholder()],
        });
        assert_eq!(tree.count(), 3);
    }
}
