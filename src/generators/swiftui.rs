//! SwiftUI generator (iOS)
//!
//! Plain roots become one `View` struct per file. Live-activity roots are
//! handed to [`super::live_activity`], and roots carrying widget metadata are
//! registered in a single WidgetKit bundle.

use super::{
    comment_text, ensure_version, escape_swift, live_activity, sanitize_identifier, CodeGenerator, GeneratedFile,
    SourceWriter,
};
use crate::color::parse_hex_color;
use crate::error::Result;
use crate::ir::{
    Accessibility, Axis, ButtonSize, ButtonVariant, IrRoot, NamedPolicy, Node, NodeKind, ResizeMode,
    TimelinePolicy, WidgetFamily, WidgetMetadata,
};
use crate::layout::{BoxModel, ContainerLayout, CrossAlign, Frame, Padding};
use crate::style::NormalizedStyle;
use crate::value::format_js_number;
use std::path::PathBuf;

pub const GENERATED_DIR: &str = "brik/Generated";
pub const ACTIVITIES_DIR: &str = "BrikActivities";
pub const WIDGET_BUNDLE_FILE: &str = "BrikWidget/BrikWidget.swift";

#[derive(Debug, Clone, Default)]
pub struct SwiftUiGenerator;

impl SwiftUiGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for SwiftUiGenerator {
    fn name(&self) -> &'static str {
        "swiftui"
    }

    fn generate(&self, roots: &[IrRoot]) -> Result<Vec<GeneratedFile>> {
        let mut files = Vec::new();
        let mut widgets = Vec::new();

        for root in roots {
            ensure_version(root)?;

            if let Some(activity) = &root.live_activity {
                let type_name = sanitize_identifier(&activity.activity_type);
                files.push(GeneratedFile::new(
                    PathBuf::from(ACTIVITIES_DIR).join(format!("{}Activity.swift", type_name)),
                    live_activity::generate_live_activity(activity),
                ));
                continue;
            }

            let name = sanitize_identifier(&root.root_id);
            files.push(GeneratedFile::new(
                PathBuf::from(GENERATED_DIR).join(format!("{}.swift", name)),
                generate_swift_view(root),
            ));
            if let Some(widget) = &root.widget {
                widgets.push((name, widget));
            }
        }

        if !widgets.is_empty() {
            files.push(GeneratedFile::new(WIDGET_BUNDLE_FILE, generate_widget_bundle(&widgets)));
        }

        log::debug!("swiftui: {} files for {} roots", files.len(), roots.len());
        Ok(files)
    }
}

/// One `View` struct whose body is the lowered tree
pub fn generate_swift_view(root: &IrRoot) -> String {
    let mut w = SourceWriter::new();
    w.line("import SwiftUI");
    w.blank();
    w.block(
        format!("struct {}: View {{", sanitize_identifier(&root.root_id)),
        "}",
        |w| {
            w.block("var body: some View {", "}", |w| emit_node(w, &root.tree));
        },
    );
    w.finish()
}

/// Device-space color for hex input, named asset color otherwise
pub fn swift_color(value: &str) -> String {
    match parse_hex_color(value) {
        Some(argb) => {
            let (r, g, b, a) = argb.unit_channels();
            format!(
                "Color(.sRGB, red: {:.3}, green: {:.3}, blue: {:.3}, opacity: {:.3})",
                r, g, b, a
            )
        }
        None => format!("Color(\"{}\")", escape_swift(value)),
    }
}

pub(crate) fn emit_node(w: &mut SourceWriter, node: &Node) {
    let link = match &node.kind {
        NodeKind::Stack { .. } => node.action.as_ref().and_then(|a| a.deeplink_url()),
        _ => None,
    };

    match link {
        Some(url) => w.block(
            format!("Link(destination: URL(string: \"{}\")!) {{", escape_swift(url)),
            "}",
            |w| emit_styled(w, node),
        ),
        None => emit_styled(w, node),
    }
}

fn emit_styled(w: &mut SourceWriter, node: &Node) {
    let style = node.style.as_ref();

    match &node.kind {
        NodeKind::View { children } if children.is_empty() => w.line("Color.clear"),
        NodeKind::View { children } | NodeKind::Stack { children, .. } => {
            if let Some(layout) = ContainerLayout::of(node) {
                let (container, alignment) = match layout.axis {
                    Axis::Horizontal => ("HStack", row_alignment(layout.cross)),
                    Axis::Vertical => ("VStack", column_alignment(layout.cross)),
                };
                w.block(
                    format!(
                        "{}(alignment: {}, spacing: {}) {{",
                        container,
                        alignment,
                        format_js_number(layout.gap)
                    ),
                    "}",
                    |w| {
                        for child in children {
                            emit_node(w, child);
                        }
                    },
                );
            }
        }
        NodeKind::Text { text } => {
            w.line(format!("Text(\"{}\")", escape_swift(&text.display())));
            if let Some(style) = style {
                text_modifiers(w, style);
            }
        }
        NodeKind::Button { label, variant, size } => {
            w.line(format!("Button(\"{}\") {{}}", escape_swift(label)));
            match variant {
                Some(ButtonVariant::Primary) => w.line(".buttonStyle(.borderedProminent)"),
                Some(ButtonVariant::Secondary) => w.line(".buttonStyle(.bordered)"),
                Some(ButtonVariant::Ghost) => w.line(".buttonStyle(.plain)"),
                None => {}
            }
            match size {
                Some(ButtonSize::Small) => w.line(".controlSize(.small)"),
                Some(ButtonSize::Medium) => w.line(".controlSize(.regular)"),
                Some(ButtonSize::Large) => w.line(".controlSize(.large)"),
                None => {}
            }
        }
        NodeKind::Image { uri, resize_mode, .. } => {
            let header = format!("AsyncImage(url: URL(string: \"{}\"))", escape_swift(uri));
            match resize_mode.and_then(content_mode) {
                Some(mode) => {
                    w.line(format!("{} {{ image in", header));
                    w.indent();
                    w.line(format!("image.resizable().aspectRatio(contentMode: {})", mode));
                    w.dedent();
                    w.line("} placeholder: {");
                    w.indent();
                    w.line("Color.gray.opacity(0.2)");
                    w.dedent();
                    w.line("}");
                }
                None => w.line(header),
            }
        }
        NodeKind::Spacer { flex } => {
            w.line("Spacer()");
            if flex.is_some_and(|f| f != 0.0) {
                w.line(".frame(maxWidth: .infinity, maxHeight: .infinity)");
            }
        }
        NodeKind::ProgressBar {
            progress,
            indeterminate,
        } => {
            if *indeterminate == Some(true) {
                w.line("ProgressView()");
            } else {
                w.line(format!("ProgressView(value: {})", format_js_number(*progress)));
            }
        }
        NodeKind::List {
            items,
            render_item,
            horizontal,
        } => {
            let axis = if *horizontal == Some(true) { ".horizontal" } else { ".vertical" };
            w.block(format!("ScrollView({}) {{", axis), "}", |w| {
                w.line(format!("// renderItem: {} ({} items)", comment_text(render_item), items.len()));
            });
        }
    }

    box_modifiers(w, &BoxModel::from_style(style));
    if let Some(accessibility) = &node.accessibility {
        accessibility_modifiers(w, accessibility);
    }
}

fn row_alignment(cross: CrossAlign) -> &'static str {
    match cross {
        CrossAlign::Start => ".top",
        CrossAlign::End => ".bottom",
        CrossAlign::Baseline => ".firstTextBaseline",
        CrossAlign::Center | CrossAlign::Stretch => ".center",
    }
}

fn column_alignment(cross: CrossAlign) -> &'static str {
    match cross {
        CrossAlign::Start => ".leading",
        CrossAlign::End => ".trailing",
        _ => ".center",
    }
}

fn content_mode(mode: ResizeMode) -> Option<&'static str> {
    match mode {
        ResizeMode::Cover | ResizeMode::Fill => Some(".fill"),
        ResizeMode::Contain | ResizeMode::ScaleDown => Some(".fit"),
        ResizeMode::None => None,
    }
}

fn font_weight(weight: &str) -> Option<&'static str> {
    let name = match weight {
        "100" => "ultraLight",
        "200" => "thin",
        "300" => "light",
        "400" | "normal" => "regular",
        "500" => "medium",
        "600" => "semibold",
        "700" | "bold" => "bold",
        "800" => "heavy",
        "900" => "black",
        _ => return None,
    };
    Some(name)
}

fn text_modifiers(w: &mut SourceWriter, style: &NormalizedStyle) {
    if let Some(size) = style.number("fontSize") {
        w.line(format!(".font(.system(size: {}))", format_js_number(size)));
    }
    if let Some(weight) = style.text("fontWeight").and_then(font_weight) {
        w.line(format!(".fontWeight(.{})", weight));
    }
    if style.text("fontStyle") == Some("italic") {
        w.line(".italic()");
    }
    if let Some(color) = style.text("color") {
        w.line(format!(".foregroundStyle({})", swift_color(color)));
    }
    if let Some(lines) = style.number("numberOfLines").filter(|n| *n > 0.0) {
        w.line(format!(".lineLimit({})", format_js_number(lines)));
    }
    let alignment = match style.text("textAlign") {
        Some("left") => Some(".leading"),
        Some("center") => Some(".center"),
        Some("right") => Some(".trailing"),
        _ => None,
    };
    if let Some(alignment) = alignment {
        w.line(format!(".multilineTextAlignment({})", alignment));
    }
    match style.text("textTransform") {
        Some("uppercase") => w.line(".textCase(.uppercase)"),
        Some("lowercase") => w.line(".textCase(.lowercase)"),
        _ => {}
    }
    if let Some(spacing) = style.nonzero("letterSpacing") {
        w.line(format!(".kerning({})", format_js_number(spacing)));
    }
}

/// A fixed frame when only width/height are set, otherwise the flexible
/// overload with fixed sizes folded into both bounds
fn frame_modifier(frame: &Frame) -> String {
    let flexible = frame.min_width.is_some()
        || frame.max_width.is_some()
        || frame.min_height.is_some()
        || frame.max_height.is_some();

    let args: Vec<(&str, Option<f64>)> = if flexible {
        vec![
            ("minWidth", frame.min_width.or(frame.width)),
            ("maxWidth", frame.max_width.or(frame.width)),
            ("minHeight", frame.min_height.or(frame.height)),
            ("maxHeight", frame.max_height.or(frame.height)),
        ]
    } else {
        vec![("width", frame.width), ("height", frame.height)]
    };

    let args: Vec<String> = args
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| format!("{}: {}", name, format_js_number(v))))
        .collect();
    format!(".frame({})", args.join(", "))
}

fn box_modifiers(w: &mut SourceWriter, model: &BoxModel) {
    if let Some(frame) = &model.frame {
        w.line(frame_modifier(frame));
    }
    if let Some(ratio) = model.aspect_ratio {
        w.line(format!(".aspectRatio({}, contentMode: .fit)", format_js_number(ratio)));
    }
    if let Some(background) = &model.background {
        w.line(format!(".background({})", swift_color(background)));
    }
    if let Some(opacity) = model.opacity {
        w.line(format!(".opacity({})", format_js_number(opacity)));
    }
    if let Some(radius) = model.corner_radius {
        w.line(format!(".cornerRadius({})", format_js_number(radius)));
    }
    if let Some(border) = &model.border {
        w.line(format!(
            ".overlay(RoundedRectangle(cornerRadius: {}).stroke({}, lineWidth: {}))",
            format_js_number(border.radius),
            swift_color(&border.color),
            format_js_number(border.width)
        ));
    }
    if let Some(shadow) = &model.shadow {
        let color = shadow
            .color
            .as_deref()
            .map(swift_color)
            .unwrap_or_else(|| "Color.black".to_string());
        w.line(format!(
            ".shadow(color: {}.opacity({}), radius: {}, x: {}, y: {})",
            color,
            format_js_number(shadow.opacity),
            format_js_number(shadow.radius),
            format_js_number(shadow.offset_x),
            format_js_number(shadow.offset_y)
        ));
    }
    if let Some(padding) = &model.padding {
        padding_modifiers(w, padding);
    }
    if let Some(z) = model.z_index {
        w.line(format!(".zIndex({})", format_js_number(z)));
    }
}

fn padding_modifiers(w: &mut SourceWriter, padding: &Padding) {
    match padding {
        Padding::Uniform(all) => w.line(format!(".padding({})", format_js_number(*all))),
        Padding::Edges {
            horizontal,
            vertical,
            top,
            bottom,
            left,
            right,
        } => {
            let edges = [
                (".horizontal", horizontal),
                (".vertical", vertical),
                (".top", top),
                (".bottom", bottom),
                (".leading", left),
                (".trailing", right),
            ];
            for (edge, value) in edges {
                if let Some(value) = value {
                    w.line(format!(".padding({}, {})", edge, format_js_number(*value)));
                }
            }
        }
    }
}

fn accessibility_modifiers(w: &mut SourceWriter, accessibility: &Accessibility) {
    if let Some(label) = &accessibility.accessibility_label {
        w.line(format!(".accessibilityLabel(\"{}\")", escape_swift(label)));
    }
    if accessibility.accessible == Some(false) {
        w.line(".accessibilityHidden(true)");
    }
    let trait_name = match accessibility.role.as_deref() {
        Some("button") => Some(".isButton"),
        Some("header") => Some(".isHeader"),
        Some("image") => Some(".isImage"),
        Some("link") => Some(".isLink"),
        _ => None,
    };
    if let Some(trait_name) = trait_name {
        w.line(format!(".accessibilityAddTraits({})", trait_name));
    }
}

fn widget_family(family: WidgetFamily) -> &'static str {
    match family {
        WidgetFamily::SystemSmall | WidgetFamily::Small => ".systemSmall",
        WidgetFamily::SystemMedium | WidgetFamily::Medium => ".systemMedium",
        WidgetFamily::SystemLarge | WidgetFamily::Large => ".systemLarge",
        WidgetFamily::SystemExtraLarge => ".systemExtraLarge",
        WidgetFamily::AccessoryRectangular => ".accessoryRectangular",
        WidgetFamily::AccessoryCircular => ".accessoryCircular",
        WidgetFamily::AccessoryInline => ".accessoryInline",
    }
}

fn reload_policy(widget: &WidgetMetadata) -> String {
    let minutes = |m: f64| {
        format!(
            ".after(Calendar.current.date(byAdding: .minute, value: {}, to: Date())!)",
            format_js_number(m)
        )
    };
    match widget.timeline.as_ref().and_then(|t| t.policy.as_ref()) {
        Some(TimelinePolicy::Named(NamedPolicy::AtEnd)) => ".atEnd".to_string(),
        Some(TimelinePolicy::Named(NamedPolicy::After15Minutes)) => minutes(15.0),
        Some(TimelinePolicy::Named(NamedPolicy::AfterHour)) => minutes(60.0),
        Some(TimelinePolicy::Named(NamedPolicy::AfterDay)) => minutes(1440.0),
        Some(TimelinePolicy::Custom(custom)) => minutes(custom.minutes.round()),
        Some(TimelinePolicy::Named(NamedPolicy::Never)) | None => ".never".to_string(),
    }
}

/// WidgetKit bundle registering every widget root with a static timeline
fn generate_widget_bundle(widgets: &[(String, &WidgetMetadata)]) -> String {
    let mut w = SourceWriter::new();
    w.line("import WidgetKit");
    w.line("import SwiftUI");
    w.blank();
    w.line("@main");
    w.block("struct BrikWidgets: WidgetBundle {", "}", |w| {
        w.block("var body: some Widget {", "}", |w| {
            for (name, _) in widgets {
                w.line(format!("{}Widget()", name));
            }
        });
    });
    w.blank();
    w.block("struct BrikEntry: TimelineEntry {", "}", |w| {
        w.line("let date: Date");
    });

    for (name, widget) in widgets {
        w.blank();
        w.block(format!("struct {}Provider: TimelineProvider {{", name), "}", |w| {
            w.block("func placeholder(in context: Context) -> BrikEntry {", "}", |w| {
                w.line("BrikEntry(date: Date())");
            });
            w.blank();
            w.block(
                "func getSnapshot(in context: Context, completion: @escaping (BrikEntry) -> Void) {",
                "}",
                |w| w.line("completion(BrikEntry(date: Date()))"),
            );
            w.blank();
            w.block(
                "func getTimeline(in context: Context, completion: @escaping (Timeline<BrikEntry>) -> Void) {",
                "}",
                |w| {
                    w.line(format!(
                        "completion(Timeline(entries: [BrikEntry(date: Date())], policy: {}))",
                        reload_policy(widget)
                    ));
                },
            );
        });
        w.blank();
        w.block(format!("struct {}Widget: Widget {{", name), "}", |w| {
            w.line(format!("let kind: String = \"{}\"", escape_swift(&widget.kind)));
            w.blank();
            w.block("var body: some WidgetConfiguration {", "}", |w| {
                w.block(
                    format!("StaticConfiguration(kind: kind, provider: {}Provider()) {{ _ in", name),
                    "}",
                    |w| w.line(format!("{}()", name)),
                );
                let display_name = widget.display_name.as_deref().unwrap_or(&widget.kind);
                w.line(format!(".configurationDisplayName(\"{}\")", escape_swift(display_name)));
                if let Some(description) = &widget.description {
                    w.line(format!(".description(\"{}\")", escape_swift(description)));
                }
                let families: Vec<&str> = widget.families.iter().map(|f| widget_family(*f)).collect();
                w.line(format!(".supportedFamilies([{}])", families.join(", ")));
            });
        });
    }
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Action, ActionType, TextContent};
    use crate::style::normalize_style;
    use crate::value::Literal;
    use indexmap::IndexMap;

    fn styled(kind: NodeKind, entries: &[(&str, Literal)]) -> Node {
        let bag: IndexMap<String, Literal> =
            entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        let mut node = Node::new(kind);
        node.style = Some(normalize_style(Some(&bag)));
        node
    }

    fn text(value: &str) -> Node {
        Node::new(NodeKind::Text {
            text: TextContent::String(value.to_string()),
        })
    }

    fn render(node: &Node) -> String {
        let mut w = SourceWriter::new();
        emit_node(&mut w, node);
        w.finish()
    }

    #[test]
    fn test_colors() {
        assert_eq!(
            swift_color("#FF0000"),
            "Color(.sRGB, red: 1.000, green: 0.000, blue: 0.000, opacity: 1.000)"
        );
        assert_eq!(
            swift_color("#80FFFFFF"),
            "Color(.sRGB, red: 1.000, green: 1.000, blue: 1.000, opacity: 0.502)"
        );
        assert_eq!(swift_color("brandPrimary"), "Color(\"brandPrimary\")");
    }

    #[test]
    fn test_view_file_shape() {
        let node = styled(
            NodeKind::View {
                children: vec![text("Hello")],
            },
            &[
                ("padding", Literal::Number(16.0)),
                ("backgroundColor", Literal::String("#FFFFFF".into())),
            ],
        );
        let root = IrRoot::new("src_Hello_tsx", node);
        let code = generate_swift_view(&root);
        assert!(code.starts_with("import SwiftUI\n\nstruct src_Hello_tsx: View {\n    var body: some View {\n"));
        assert!(code.contains("        VStack(alignment: .center, spacing: 0) {\n            Text(\"Hello\")\n        }\n"));
        assert!(code.contains("        .padding(16)\n"));
        assert!(code.contains(".background(Color(.sRGB, red: 1.000, green: 1.000, blue: 1.000, opacity: 1.000))"));
    }

    #[test]
    fn test_modifier_order() {
        let node = styled(
            NodeKind::View { children: vec![] },
            &[
                ("opacity", Literal::Number(0.5)),
                ("shadowRadius", Literal::Number(6.0)),
                ("borderRadius", Literal::Number(8.0)),
                ("width", Literal::Number(100.0)),
                ("padding", Literal::Number(4.0)),
                ("backgroundColor", Literal::String("brand".into())),
                ("zIndex", Literal::Number(2.0)),
            ],
        );
        let code = render(&node);
        let lines: Vec<&str> = code.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Color.clear",
                ".frame(width: 100)",
                ".background(Color(\"brand\"))",
                ".opacity(0.5)",
                ".cornerRadius(8)",
                ".shadow(color: Color.black.opacity(0.2), radius: 6, x: 0, y: 2)",
                ".padding(4)",
                ".zIndex(2)",
            ]
        );
    }

    #[test]
    fn test_directional_padding_and_flexible_frame() {
        let node = styled(
            NodeKind::Spacer { flex: None },
            &[
                ("paddingHorizontal", Literal::Number(8.0)),
                ("paddingTop", Literal::Number(2.0)),
                ("width", Literal::Number(50.0)),
                ("maxHeight", Literal::Number(80.0)),
            ],
        );
        let code = render(&node);
        assert!(code.ends_with(".padding(.horizontal, 8)\n.padding(.top, 2)\n"));
        assert!(code.contains(".frame(minWidth: 50, maxWidth: 50, maxHeight: 80)"));
    }

    #[test]
    fn test_stack_alignment_and_link() {
        let mut node = styled(
            NodeKind::Stack {
                axis: Axis::Horizontal,
                children: vec![text("A")],
            },
            &[
                ("alignItems", Literal::String("baseline".into())),
                ("gap", Literal::Number(8.0)),
            ],
        );
        node.action = Some(Action {
            action_type: ActionType::Deeplink,
            url: Some("myapp://home".into()),
            params: None,
            app_id: None,
        });
        let code = render(&node);
        assert!(code.starts_with("Link(destination: URL(string: \"myapp://home\")!) {\n"));
        assert!(code.contains("    HStack(alignment: .firstTextBaseline, spacing: 8) {\n"));

        node.action.as_mut().unwrap().action_type = ActionType::Refresh;
        assert!(render(&node).starts_with("HStack("));
    }

    #[test]
    fn test_text_modifiers() {
        let node = styled(
            NodeKind::Text {
                text: TextContent::Number(42.0),
            },
            &[
                ("fontSize", Literal::Number(14.0)),
                ("fontWeight", Literal::String("600".into())),
                ("color", Literal::String("#000".into())),
                ("numberOfLines", Literal::Number(2.0)),
                ("textAlign", Literal::String("right".into())),
            ],
        );
        let code = render(&node);
        assert!(code.starts_with("Text(\"42\")\n.font(.system(size: 14))\n.fontWeight(.semibold)\n"));
        assert!(code.contains(".lineLimit(2)"));
        assert!(code.contains(".multilineTextAlignment(.trailing)"));
    }

    #[test]
    fn test_leaves() {
        let progress = Node::new(NodeKind::ProgressBar {
            progress: 0.75,
            indeterminate: None,
        });
        assert_eq!(render(&progress), "ProgressView(value: 0.75)\n");

        let spinner = Node::new(NodeKind::ProgressBar {
            progress: 0.0,
            indeterminate: Some(true),
        });
        assert_eq!(render(&spinner), "ProgressView()\n");

        let spacer = Node::new(NodeKind::Spacer { flex: Some(1.0) });
        assert_eq!(
            render(&spacer),
            "Spacer()\n.frame(maxWidth: .infinity, maxHeight: .infinity)\n"
        );

        let button = Node::new(NodeKind::Button {
            label: "Go \"now\"".into(),
            variant: Some(ButtonVariant::Primary),
            size: None,
        });
        assert_eq!(render(&button), "Button(\"Go \\\"now\\\"\") {}\n.buttonStyle(.borderedProminent)\n");

        let image = Node::new(NodeKind::Image {
            uri: "https://x/y.png".into(),
            resize_mode: None,
            placeholder: None,
        });
        assert_eq!(render(&image), "AsyncImage(url: URL(string: \"https://x/y.png\"))\n");
    }

    #[test]
    fn test_widget_bundle() {
        let mut root = IrRoot::new("Weather_tsx", text("Sunny"));
        root.widget = Some(WidgetMetadata {
            kind: "Weather_tsx".into(),
            display_name: Some("Weather".into()),
            description: None,
            families: vec![WidgetFamily::SystemSmall, WidgetFamily::SystemMedium],
            supported_platforms: None,
            configurable: None,
            timeline: None,
        });
        let files = SwiftUiGenerator::new().generate(&[root]).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, PathBuf::from("brik/Generated/Weather_tsx.swift"));
        assert_eq!(files[1].path, PathBuf::from(WIDGET_BUNDLE_FILE));
        let bundle = &files[1].content;
        assert!(bundle.contains("Weather_tsxWidget()"));
        assert!(bundle.contains(".supportedFamilies([.systemSmall, .systemMedium])"));
        assert!(bundle.contains("policy: .never"));
    }

    #[test]
    fn test_render_item_comment_is_single_line() {
        let list = Node::new(NodeKind::List {
            items: vec![],
            render_item: "row\r\n}\nstruct Injected {".into(),
            horizontal: Some(true),
        });
        let code = render(&list);
        assert!(code.contains("// renderItem: row  } struct Injected { (0 items)\n"));
        assert!(!code.lines().any(|line| line.trim_start().starts_with("struct Injected")));
    }

    #[test]
    fn test_rejects_other_versions() {
        let mut root = IrRoot::new("a", text("x"));
        root.version = 2;
        let err = SwiftUiGenerator::new().generate(&[root]).unwrap_err();
        assert_eq!(err.code(), "BR302");
    }
}
