//! Jetpack Compose / Glance generator (Android)
//!
//! Each root is emitted in one of three shapes: a plain `@Composable` screen,
//! a Glance app widget (receiver, widget and content composable) when the
//! root carries widget metadata, or activity data classes plus one
//! composable per region for live-activity roots.
//!
//! Modifier chains are written outermost first: background sits outside the
//! padding, so it fills the padded box.

use super::{comment_text, ensure_version, escape_kotlin, sanitize_identifier, CodeGenerator, GeneratedFile, SourceWriter};
use crate::color::{parse_hex_color, Argb};
use crate::error::Result;
use crate::ir::{
    Accessibility, Action, ActionType, AttributeType, Axis, ButtonVariant, IrRoot, LiveActivityConfig, Node,
    NodeKind, ResizeMode,
};
use crate::layout::{BoxModel, ContainerLayout, CrossAlign, MainArrange, Padding};
use crate::style::NormalizedStyle;
use crate::value::format_js_number;
use indexmap::IndexMap;
use std::path::PathBuf;

pub const DEFAULT_PACKAGE: &str = "generated";
pub const SOURCE_ROOT: &str = "brik/src/main/java";

const SCREEN_IMPORTS: &[&str] = &[
    "android.content.Intent",
    "android.net.Uri",
    "androidx.compose.foundation.background",
    "androidx.compose.foundation.border",
    "androidx.compose.foundation.clickable",
    "androidx.compose.foundation.layout.*",
    "androidx.compose.foundation.lazy.LazyColumn",
    "androidx.compose.foundation.lazy.LazyRow",
    "androidx.compose.foundation.shape.RoundedCornerShape",
    "androidx.compose.material3.Button",
    "androidx.compose.material3.LinearProgressIndicator",
    "androidx.compose.material3.OutlinedButton",
    "androidx.compose.material3.Text",
    "androidx.compose.material3.TextButton",
    "androidx.compose.runtime.Composable",
    "androidx.compose.ui.Alignment",
    "androidx.compose.ui.Modifier",
    "androidx.compose.ui.draw.alpha",
    "androidx.compose.ui.draw.clip",
    "androidx.compose.ui.draw.shadow",
    "androidx.compose.ui.graphics.Color",
    "androidx.compose.ui.layout.ContentScale",
    "androidx.compose.ui.platform.LocalContext",
    "androidx.compose.ui.semantics.clearAndSetSemantics",
    "androidx.compose.ui.semantics.contentDescription",
    "androidx.compose.ui.semantics.semantics",
    "androidx.compose.ui.text.font.FontStyle",
    "androidx.compose.ui.text.font.FontWeight",
    "androidx.compose.ui.text.style.TextAlign",
    "androidx.compose.ui.unit.dp",
    "androidx.compose.ui.unit.sp",
    "androidx.compose.ui.zIndex",
    "coil.compose.AsyncImage",
];

const GLANCE_IMPORTS: &[&str] = &[
    "android.content.Context",
    "androidx.compose.runtime.Composable",
    "androidx.compose.ui.graphics.Color",
    "androidx.compose.ui.unit.dp",
    "androidx.compose.ui.unit.sp",
    "androidx.glance.Button",
    "androidx.glance.GlanceId",
    "androidx.glance.GlanceModifier",
    "androidx.glance.Image",
    "androidx.glance.ImageProvider",
    "androidx.glance.action.actionStartActivity",
    "androidx.glance.action.clickable",
    "androidx.glance.appwidget.GlanceAppWidget",
    "androidx.glance.appwidget.GlanceAppWidgetReceiver",
    "androidx.glance.appwidget.LinearProgressIndicator",
    "androidx.glance.appwidget.action.actionRunCallback",
    "androidx.glance.appwidget.cornerRadius",
    "androidx.glance.appwidget.lazy.LazyColumn",
    "androidx.glance.appwidget.provideContent",
    "androidx.glance.background",
    "androidx.glance.layout.*",
    "androidx.glance.text.FontWeight",
    "androidx.glance.text.Text",
    "androidx.glance.text.TextAlign",
    "androidx.glance.text.TextStyle",
    "androidx.glance.unit.ColorProvider",
];

#[derive(Debug, Clone)]
pub struct ComposeGenerator {
    package: String,
}

impl Default for ComposeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposeGenerator {
    pub fn new() -> Self {
        Self::with_package(DEFAULT_PACKAGE)
    }

    pub fn with_package(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    fn file_path(&self, name: &str) -> PathBuf {
        let mut path = PathBuf::from(SOURCE_ROOT);
        for segment in self.package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.kt", name));
        path
    }
}

impl CodeGenerator for ComposeGenerator {
    fn name(&self) -> &'static str {
        "compose"
    }

    fn generate(&self, roots: &[IrRoot]) -> Result<Vec<GeneratedFile>> {
        let mut files = Vec::with_capacity(roots.len());

        for root in roots {
            ensure_version(root)?;

            let file = match &root.live_activity {
                Some(activity) => {
                    let type_name = sanitize_identifier(&activity.activity_type);
                    GeneratedFile::new(
                        self.file_path(&format!("{}Activity", type_name)),
                        generate_activity_kotlin(activity, &self.package),
                    )
                }
                None if root.is_widget() => GeneratedFile::new(
                    self.file_path(&sanitize_identifier(&root.root_id)),
                    generate_glance_widget(root, &self.package),
                ),
                None => GeneratedFile::new(
                    self.file_path(&sanitize_identifier(&root.root_id)),
                    generate_compose_screen(root, &self.package),
                ),
            };
            files.push(file);
        }

        log::debug!("compose: {} files in package {}", files.len(), self.package);
        Ok(files)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Screen,
    Glance,
}

impl Mode {
    fn modifier(self) -> &'static str {
        match self {
            Mode::Screen => "Modifier",
            Mode::Glance => "GlanceModifier",
        }
    }
}

fn header(w: &mut SourceWriter, package: &str, imports: &[&str]) {
    w.line(format!("package {}", package));
    w.blank();
    for import in imports {
        w.line(format!("import {}", import));
    }
}

/// Ordinary `@Composable` screen
pub fn generate_compose_screen(root: &IrRoot, package: &str) -> String {
    let mut w = SourceWriter::new();
    header(&mut w, package, SCREEN_IMPORTS);
    w.blank();
    screen_function(&mut w, &sanitize_identifier(&root.root_id), &root.tree);
    w.finish()
}

fn screen_function(w: &mut SourceWriter, name: &str, tree: &Node) {
    w.line("@Composable");
    w.block(format!("fun {}() {{", name), "}", |w| {
        if uses_context(tree) {
            w.line("val context = LocalContext.current");
        }
        emit_node(w, tree, Mode::Screen, false);
    });
}

/// Glance receiver, widget and content composable for a widget root
pub fn generate_glance_widget(root: &IrRoot, package: &str) -> String {
    let name = sanitize_identifier(&root.root_id);
    let mut w = SourceWriter::new();
    header(&mut w, package, GLANCE_IMPORTS);
    w.blank();
    w.block(
        format!("class {}Receiver : GlanceAppWidgetReceiver() {{", name),
        "}",
        |w| {
            w.line(format!("override val glanceAppWidget: GlanceAppWidget = {}Widget()", name));
        },
    );
    w.blank();
    w.block(format!("class {}Widget : GlanceAppWidget() {{", name), "}", |w| {
        w.block(
            "override suspend fun provideGlance(context: Context, id: GlanceId) {",
            "}",
            |w| {
                w.block("provideContent {", "}", |w| w.line(format!("{}Content()", name)));
            },
        );
    });
    w.blank();
    w.line("@Composable");
    w.block(format!("fun {}Content() {{", name), "}", |w| {
        emit_node(w, &root.tree, Mode::Glance, false);
    });
    w.finish()
}

fn kotlin_type(ty: AttributeType) -> &'static str {
    match ty {
        AttributeType::String => "String",
        AttributeType::Number => "Double",
        AttributeType::Boolean => "Boolean",
        AttributeType::Date => "Instant",
    }
}

fn data_class(w: &mut SourceWriter, name: &str, fields: &IndexMap<String, AttributeType>) {
    if fields.is_empty() {
        w.line(format!("class {}", name));
        return;
    }
    w.block(format!("data class {}(", name), ")", |w| {
        for (field, ty) in fields {
            w.line(format!("val {}: {},", sanitize_identifier(field), kotlin_type(*ty)));
        }
    });
}

/// Attribute data classes plus one composable per populated region
pub fn generate_activity_kotlin(config: &LiveActivityConfig, package: &str) -> String {
    let type_name = sanitize_identifier(&config.activity_type);
    let mut imports = SCREEN_IMPORTS.to_vec();
    imports.push("java.time.Instant");

    let mut w = SourceWriter::new();
    header(&mut w, package, &imports);
    w.blank();
    data_class(&mut w, &format!("{}Attributes", type_name), &config.attributes.static_fields);
    w.blank();
    data_class(&mut w, &format!("{}ContentState", type_name), &config.attributes.dynamic_fields);

    let island = config.regions.dynamic_island.as_ref();
    let regions = [
        ("LockScreen", config.regions.lock_screen.as_ref()),
        ("Expanded", island.and_then(|i| i.expanded.as_ref())),
        ("Compact", island.and_then(|i| i.compact.as_ref())),
        ("Minimal", island.and_then(|i| i.minimal.as_ref())),
    ];
    for (suffix, node) in regions {
        if let Some(node) = node {
            w.blank();
            screen_function(&mut w, &format!("{}{}", type_name, suffix), node);
        }
    }
    w.finish()
}

/// `Color(0xAARRGGBB)`; non-hex input has no Compose form
pub fn compose_color(value: &str) -> Option<String> {
    parse_hex_color(value).map(argb_literal)
}

fn argb_literal(argb: Argb) -> String {
    format!("Color(0x{:08X})", argb.to_u32())
}

fn dp(n: f64) -> String {
    format!("{}.dp", format_js_number(n))
}

fn sp(n: f64) -> String {
    format!("{}.sp", format_js_number(n))
}

fn float(n: f64) -> String {
    format!("{}f", format_js_number(n))
}

fn uses_context(node: &Node) -> bool {
    let own = node.action.as_ref().is_some_and(|action| match action.action_type {
        ActionType::Deeplink => action.deeplink_url().is_some(),
        ActionType::OpenApp => true,
        ActionType::Refresh | ActionType::Custom => false,
    });
    own || node.children().iter().any(uses_context)
}

fn screen_action(action: &Action) -> String {
    match action.action_type {
        ActionType::Deeplink => match action.deeplink_url() {
            Some(url) => format!(
                "context.startActivity(Intent(Intent.ACTION_VIEW, Uri.parse(\"{}\")))",
                escape_kotlin(url)
            ),
            None => "/* deeplink */".to_string(),
        },
        ActionType::OpenApp => {
            let package = action
                .app_id
                .as_deref()
                .map(|id| format!("\"{}\"", escape_kotlin(id)))
                .unwrap_or_else(|| "context.packageName".to_string());
            format!(
                "context.packageManager.getLaunchIntentForPackage({})?.let {{ context.startActivity(it) }}",
                package
            )
        }
        ActionType::Refresh => "/* refresh */".to_string(),
        ActionType::Custom => "/* custom */".to_string(),
    }
}

fn glance_action(action: Option<&Action>) -> &'static str {
    match action.map(|a| a.action_type) {
        Some(ActionType::Refresh) | Some(ActionType::Custom) => "actionRunCallback<RefreshAction>()",
        Some(ActionType::Deeplink) | Some(ActionType::OpenApp) | None => "actionStartActivity<MainActivity>()",
    }
}

fn padding_parts(padding: &Padding, parts: &mut Vec<String>) {
    match padding {
        Padding::Uniform(all) => parts.push(format!("padding({})", dp(*all))),
        Padding::Edges {
            horizontal,
            vertical,
            top,
            bottom,
            left,
            right,
        } => {
            let edges = [
                ("horizontal", horizontal),
                ("vertical", vertical),
                ("top", top),
                ("bottom", bottom),
                ("start", left),
                ("end", right),
            ];
            for (edge, value) in edges {
                if let Some(value) = value {
                    parts.push(format!("padding({} = {})", edge, dp(*value)));
                }
            }
        }
    }
}

fn size_parts(model: &BoxModel, parts: &mut Vec<String>, mode: Mode) {
    let Some(frame) = &model.frame else {
        return;
    };
    if let Some(width) = frame.width {
        parts.push(format!("width({})", dp(width)));
    }
    if let Some(height) = frame.height {
        parts.push(format!("height({})", dp(height)));
    }
    if mode == Mode::Glance {
        return;
    }
    let bounds = |name: &str, min: Option<f64>, max: Option<f64>| -> Option<String> {
        let args: Vec<String> = [("min", min), ("max", max)]
            .into_iter()
            .filter_map(|(arg, value)| value.map(|v| format!("{} = {}", arg, dp(v))))
            .collect();
        (!args.is_empty()).then(|| format!("{}({})", name, args.join(", ")))
    };
    parts.extend(bounds("widthIn", frame.min_width, frame.max_width));
    parts.extend(bounds("heightIn", frame.min_height, frame.max_height));
}

fn shadow_color(color: Option<&str>, opacity: f64) -> String {
    let base = color.and_then(parse_hex_color).unwrap_or(Argb {
        a: 255,
        r: 0,
        g: 0,
        b: 0,
    });
    let alpha = (f64::from(base.a) * opacity.clamp(0.0, 1.0)).round() as u8;
    argb_literal(Argb { a: alpha, ..base })
}

fn modifier_chain(node: &Node, mode: Mode, in_container: bool) -> Option<String> {
    let model = BoxModel::from_style(node.style.as_ref());
    let mut parts: Vec<String> = Vec::new();

    if let NodeKind::Spacer { flex: Some(flex) } = node.kind {
        if flex != 0.0 {
            parts.push(match (mode, in_container) {
                (Mode::Screen, true) => format!("weight({})", float(flex)),
                (Mode::Glance, true) => "defaultWeight()".to_string(),
                (_, false) => "fillMaxSize()".to_string(),
            });
        }
    }

    let is_button = matches!(node.kind, NodeKind::Button { .. });
    if let (Some(action), false) = (&node.action, is_button) {
        parts.push(match mode {
            Mode::Screen => format!("clickable {{ {} }}", screen_action(action)),
            Mode::Glance => format!("clickable({})", glance_action(Some(action))),
        });
    }

    if mode == Mode::Screen {
        if let Some(accessibility) = &node.accessibility {
            semantics_parts(accessibility, &mut parts);
        }
        if let Some(z) = model.z_index {
            parts.push(format!("zIndex({})", float(z)));
        }
        if let Some(opacity) = model.opacity {
            parts.push(format!("alpha({})", float(opacity)));
        }
        if let Some(shadow) = &model.shadow {
            let color = shadow_color(shadow.color.as_deref(), shadow.opacity);
            parts.push(format!(
                "shadow(elevation = {}, shape = RoundedCornerShape({}), ambientColor = {}, spotColor = {})",
                dp(shadow.radius),
                dp(model.corner_radius.unwrap_or(0.0)),
                color,
                color
            ));
        }
        if let Some(border) = &model.border {
            if let Some(color) = compose_color(&border.color) {
                parts.push(format!(
                    "border({}, {}, RoundedCornerShape({}))",
                    dp(border.width),
                    color,
                    dp(border.radius)
                ));
            }
        }
        if let Some(radius) = model.corner_radius {
            parts.push(format!("clip(RoundedCornerShape({}))", dp(radius)));
        }
    } else if let Some(radius) = model.corner_radius {
        parts.push(format!("cornerRadius({})", dp(radius)));
    }

    if let Some(color) = model.background.as_deref().and_then(compose_color) {
        parts.push(format!("background({})", color));
    }
    if mode == Mode::Screen {
        if let Some(ratio) = model.aspect_ratio {
            parts.push(format!("aspectRatio({})", float(ratio)));
        }
    }
    size_parts(&model, &mut parts, mode);
    if let Some(padding) = &model.padding {
        padding_parts(padding, &mut parts);
    }

    if parts.is_empty() {
        return None;
    }
    let chain: String = parts.iter().map(|p| format!(".{}", p)).collect();
    Some(format!("{}{}", mode.modifier(), chain))
}

fn semantics_parts(accessibility: &Accessibility, parts: &mut Vec<String>) {
    if accessibility.accessible == Some(false) {
        parts.push("clearAndSetSemantics {}".to_string());
    } else if let Some(label) = &accessibility.accessibility_label {
        parts.push(format!(
            "semantics {{ contentDescription = \"{}\" }}",
            escape_kotlin(label)
        ));
    }
}

/// `modifier = ...` argument, empty when the chain is empty
fn modifier_arg(node: &Node, mode: Mode, in_container: bool) -> Option<String> {
    modifier_chain(node, mode, in_container).map(|chain| format!("modifier = {}", chain))
}

fn call(name: &str, args: Vec<String>) -> String {
    format!("{}({})", name, args.join(", "))
}

fn column_arrangement(main: MainArrange) -> &'static str {
    match main {
        MainArrange::Start => "Arrangement.Top",
        MainArrange::Center => "Arrangement.Center",
        MainArrange::End => "Arrangement.Bottom",
        MainArrange::SpaceBetween => "Arrangement.SpaceBetween",
        MainArrange::SpaceAround => "Arrangement.SpaceAround",
        MainArrange::SpaceEvenly => "Arrangement.SpaceEvenly",
    }
}

fn row_arrangement(main: MainArrange) -> &'static str {
    match main {
        MainArrange::Start => "Arrangement.Start",
        MainArrange::Center => "Arrangement.Center",
        MainArrange::End => "Arrangement.End",
        MainArrange::SpaceBetween => "Arrangement.SpaceBetween",
        MainArrange::SpaceAround => "Arrangement.SpaceAround",
        MainArrange::SpaceEvenly => "Arrangement.SpaceEvenly",
    }
}

fn horizontal_alignment(cross: CrossAlign, mode: Mode) -> &'static str {
    match (cross, mode) {
        (CrossAlign::Start, Mode::Screen) => "Alignment.Start",
        (CrossAlign::End, Mode::Screen) => "Alignment.End",
        (_, Mode::Screen) => "Alignment.CenterHorizontally",
        (CrossAlign::Start, Mode::Glance) => "Alignment.Horizontal.Start",
        (CrossAlign::End, Mode::Glance) => "Alignment.Horizontal.End",
        (_, Mode::Glance) => "Alignment.Horizontal.CenterHorizontally",
    }
}

fn vertical_alignment(cross: CrossAlign, mode: Mode) -> &'static str {
    match (cross, mode) {
        (CrossAlign::Start, Mode::Screen) => "Alignment.Top",
        (CrossAlign::End, Mode::Screen) => "Alignment.Bottom",
        (_, Mode::Screen) => "Alignment.CenterVertically",
        (CrossAlign::Start, Mode::Glance) => "Alignment.Vertical.Top",
        (CrossAlign::End, Mode::Glance) => "Alignment.Vertical.Bottom",
        (_, Mode::Glance) => "Alignment.Vertical.CenterVertically",
    }
}

/// Glance has no arrangements; the main axis maps onto the other alignment
fn glance_main_alignment(main: MainArrange, axis: Axis) -> &'static str {
    match (axis, main) {
        (Axis::Vertical, MainArrange::Center) => "Alignment.Vertical.CenterVertically",
        (Axis::Vertical, MainArrange::End) => "Alignment.Vertical.Bottom",
        (Axis::Vertical, _) => "Alignment.Vertical.Top",
        (Axis::Horizontal, MainArrange::Center) => "Alignment.Horizontal.CenterHorizontally",
        (Axis::Horizontal, MainArrange::End) => "Alignment.Horizontal.End",
        (Axis::Horizontal, _) => "Alignment.Horizontal.Start",
    }
}

fn container_args(layout: &ContainerLayout, mode: Mode) -> Vec<String> {
    let mut args = Vec::new();
    match (layout.axis, mode) {
        (Axis::Vertical, Mode::Screen) => {
            let arrangement = if layout.gap > 0.0 {
                format!("Arrangement.spacedBy({})", dp(layout.gap))
            } else {
                column_arrangement(layout.main).to_string()
            };
            args.push(format!("verticalArrangement = {}", arrangement));
            args.push(format!(
                "horizontalAlignment = {}",
                horizontal_alignment(layout.cross, mode)
            ));
        }
        (Axis::Horizontal, Mode::Screen) => {
            let arrangement = if layout.gap > 0.0 {
                format!("Arrangement.spacedBy({})", dp(layout.gap))
            } else {
                row_arrangement(layout.main).to_string()
            };
            args.push(format!("horizontalArrangement = {}", arrangement));
            args.push(format!("verticalAlignment = {}", vertical_alignment(layout.cross, mode)));
        }
        (Axis::Vertical, Mode::Glance) => {
            args.push(format!(
                "verticalAlignment = {}",
                glance_main_alignment(layout.main, layout.axis)
            ));
            args.push(format!(
                "horizontalAlignment = {}",
                horizontal_alignment(layout.cross, mode)
            ));
        }
        (Axis::Horizontal, Mode::Glance) => {
            args.push(format!(
                "horizontalAlignment = {}",
                glance_main_alignment(layout.main, layout.axis)
            ));
            args.push(format!("verticalAlignment = {}", vertical_alignment(layout.cross, mode)));
        }
    }
    args
}

fn transformed_text(text: &str, style: Option<&NormalizedStyle>) -> String {
    match style.and_then(|s| s.text("textTransform")) {
        Some("uppercase") => text.to_uppercase(),
        Some("lowercase") => text.to_lowercase(),
        _ => text.to_string(),
    }
}

fn screen_font_weight(weight: &str) -> Option<&'static str> {
    let name = match weight {
        "100" => "FontWeight.W100",
        "200" => "FontWeight.W200",
        "300" => "FontWeight.W300",
        "400" | "normal" => "FontWeight.Normal",
        "500" => "FontWeight.Medium",
        "600" => "FontWeight.W600",
        "700" | "bold" => "FontWeight.Bold",
        "800" => "FontWeight.W800",
        "900" => "FontWeight.W900",
        _ => return None,
    };
    Some(name)
}

/// Glance only knows three weights
fn glance_font_weight(weight: &str) -> Option<&'static str> {
    match weight {
        "100" | "200" | "300" | "400" | "normal" => Some("FontWeight.Normal"),
        "500" => Some("FontWeight.Medium"),
        "600" | "700" | "800" | "900" | "bold" => Some("FontWeight.Bold"),
        _ => None,
    }
}

fn text_align(style: &NormalizedStyle) -> Option<&'static str> {
    match style.text("textAlign") {
        Some("left") => Some("TextAlign.Start"),
        Some("center") => Some("TextAlign.Center"),
        Some("right") => Some("TextAlign.End"),
        Some("justify") => Some("TextAlign.Justify"),
        _ => None,
    }
}

fn text_call(node: &Node, text: &str, mode: Mode, in_container: bool) -> String {
    let style = node.style.as_ref();
    let mut args = vec![format!("text = \"{}\"", escape_kotlin(&transformed_text(text, style)))];
    args.extend(modifier_arg(node, mode, in_container));

    let Some(style) = style else {
        return call("Text", args);
    };

    let color = style.text("color").and_then(compose_color);
    let max_lines = style
        .number("numberOfLines")
        .filter(|n| *n > 0.0)
        .map(|n| format!("maxLines = {}", format_js_number(n)));

    match mode {
        Mode::Screen => {
            args.extend(color.map(|c| format!("color = {}", c)));
            args.extend(style.number("fontSize").map(|n| format!("fontSize = {}", sp(n))));
            args.extend(
                style
                    .text("fontWeight")
                    .and_then(screen_font_weight)
                    .map(|w| format!("fontWeight = {}", w)),
            );
            if style.text("fontStyle") == Some("italic") {
                args.push("fontStyle = FontStyle.Italic".to_string());
            }
            args.extend(style.nonzero("letterSpacing").map(|n| format!("letterSpacing = {}", sp(n))));
            args.extend(max_lines);
            args.extend(text_align(style).map(|a| format!("textAlign = {}", a)));
        }
        Mode::Glance => {
            let mut text_style = Vec::new();
            text_style.extend(color.map(|c| format!("color = ColorProvider({})", c)));
            text_style.extend(style.number("fontSize").map(|n| format!("fontSize = {}", sp(n))));
            text_style.extend(
                style
                    .text("fontWeight")
                    .and_then(glance_font_weight)
                    .map(|w| format!("fontWeight = {}", w)),
            );
            text_style.extend(text_align(style).map(|a| format!("textAlign = {}", a)));
            if !text_style.is_empty() {
                args.push(format!("style = {}", call("TextStyle", text_style)));
            }
            args.extend(max_lines);
        }
    }
    call("Text", args)
}

fn content_scale(mode: ResizeMode) -> &'static str {
    match mode {
        ResizeMode::Cover => "ContentScale.Crop",
        ResizeMode::Contain => "ContentScale.Fit",
        ResizeMode::Fill => "ContentScale.FillBounds",
        ResizeMode::ScaleDown => "ContentScale.Inside",
        ResizeMode::None => "ContentScale.None",
    }
}

fn emit_node(w: &mut SourceWriter, node: &Node, mode: Mode, in_container: bool) {
    let modifier = modifier_arg(node, mode, in_container);

    match &node.kind {
        NodeKind::View { children } if children.is_empty() => {
            w.line(format!(
                "Box(modifier = {}) {{}}",
                modifier_chain(node, mode, in_container).unwrap_or_else(|| mode.modifier().to_string())
            ));
        }
        NodeKind::View { children } | NodeKind::Stack { children, .. } => {
            if let Some(layout) = ContainerLayout::of(node) {
                let container = match layout.axis {
                    Axis::Horizontal => "Row",
                    Axis::Vertical => "Column",
                };
                let mut args: Vec<String> = modifier.into_iter().collect();
                args.extend(container_args(&layout, mode));
                w.block(format!("{} {{", call(container, args)), "}", |w| {
                    for child in children {
                        emit_node(w, child, mode, true);
                    }
                });
            }
        }
        NodeKind::Text { text } => w.line(text_call(node, &text.display(), mode, in_container)),
        NodeKind::Button { label, variant, .. } => match mode {
            Mode::Screen => {
                let name = match variant {
                    Some(ButtonVariant::Secondary) => "OutlinedButton",
                    Some(ButtonVariant::Ghost) => "TextButton",
                    Some(ButtonVariant::Primary) | None => "Button",
                };
                let on_click = node
                    .action
                    .as_ref()
                    .map(screen_action)
                    .unwrap_or_default();
                let mut args = vec![format!("onClick = {{ {} }}", on_click)];
                args.extend(modifier);
                w.line(format!(
                    "{} {{ Text(\"{}\") }}",
                    call(name, args),
                    escape_kotlin(label)
                ));
            }
            Mode::Glance => {
                let mut args = vec![
                    format!("text = \"{}\"", escape_kotlin(label)),
                    format!("onClick = {}", glance_action(node.action.as_ref())),
                ];
                args.extend(modifier);
                w.line(call("Button", args));
            }
        },
        NodeKind::Image { uri, resize_mode, .. } => {
            let description = node
                .accessibility
                .as_ref()
                .and_then(|a| a.accessibility_label.as_deref())
                .map(|label| format!("\"{}\"", escape_kotlin(label)))
                .unwrap_or_else(|| "null".to_string());
            match mode {
                Mode::Screen => {
                    let mut args = vec![
                        format!("model = \"{}\"", escape_kotlin(uri)),
                        format!("contentDescription = {}", description),
                    ];
                    args.extend(modifier);
                    args.extend(resize_mode.map(|m| format!("contentScale = {}", content_scale(m))));
                    w.line(call("AsyncImage", args));
                }
                Mode::Glance => {
                    w.line(format!(
                        "// Glance widgets cannot load network images; bundled placeholder used for {}",
                        comment_text(uri)
                    ));
                    let mut args = vec![
                        "provider = ImageProvider(R.drawable.placeholder)".to_string(),
                        format!("contentDescription = {}", description),
                    ];
                    args.extend(modifier);
                    w.line(call("Image", args));
                }
            }
        }
        NodeKind::Spacer { .. } => {
            w.line(format!(
                "Spacer(modifier = {})",
                modifier_chain(node, mode, in_container).unwrap_or_else(|| mode.modifier().to_string())
            ));
        }
        NodeKind::ProgressBar {
            progress,
            indeterminate,
        } => {
            let mut args = Vec::new();
            if *indeterminate != Some(true) {
                args.push(match mode {
                    Mode::Screen => format!("progress = {{ {} }}", float(*progress)),
                    Mode::Glance => format!("progress = {}", float(*progress)),
                });
            }
            args.extend(modifier);
            w.line(call("LinearProgressIndicator", args));
        }
        NodeKind::List {
            items,
            render_item,
            horizontal,
        } => {
            let lazy = match (mode, *horizontal == Some(true)) {
                (Mode::Screen, true) => "LazyRow",
                _ => "LazyColumn",
            };
            w.block(format!("{} {{", call(lazy, modifier.into_iter().collect())), "}", |w| {
                w.line(format!("// renderItem: {} ({} items)", comment_text(render_item), items.len()));
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ActivityAttributes, ActivityRegions, TextContent, WidgetFamily, WidgetMetadata};
    use crate::style::normalize_style;
    use crate::value::Literal;

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

    fn render(node: &Node, mode: Mode) -> String {
        let mut w = SourceWriter::new();
        emit_node(&mut w, node, mode, false);
        w.finish()
    }

    fn widget(kind: &str) -> WidgetMetadata {
        WidgetMetadata {
            kind: kind.into(),
            display_name: None,
            description: None,
            families: vec![WidgetFamily::SystemSmall],
            supported_platforms: None,
            configurable: None,
            timeline: None,
        }
    }

    #[test]
    fn test_colors() {
        assert_eq!(compose_color("#FFFFFF").as_deref(), Some("Color(0xFFFFFFFF)"));
        assert_eq!(compose_color("#8000"), Some("Color(0x88000000)".to_string()));
        assert_eq!(compose_color("red"), None);
    }

    #[test]
    fn test_screen_file() {
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
        let code = generate_compose_screen(&root, DEFAULT_PACKAGE);
        assert!(code.starts_with("package generated\n\n"));
        assert!(code.contains("@Composable\nfun src_Hello_tsx() {\n"));
        assert!(code.contains(
            "    Column(modifier = Modifier.background(Color(0xFFFFFFFF)).padding(16.dp), verticalArrangement = Arrangement.Top, horizontalAlignment = Alignment.CenterHorizontally) {\n        Text(text = \"Hello\")\n    }\n"
        ));
        assert!(!code.contains("val context"));
    }

    #[test]
    fn test_modifier_chain_order() {
        let node = styled(
            NodeKind::View { children: vec![] },
            &[
                ("padding", Literal::Number(4.0)),
                ("width", Literal::Number(100.0)),
                ("borderRadius", Literal::Number(8.0)),
                ("opacity", Literal::Number(0.5)),
                ("backgroundColor", Literal::String("brand".into())),
            ],
        );
        assert_eq!(
            render(&node, Mode::Screen),
            "Box(modifier = Modifier.alpha(0.5f).clip(RoundedCornerShape(8.dp)).width(100.dp).padding(4.dp)) {}\n"
        );
    }

    #[test]
    fn test_row_gap_overrides_justify() {
        let node = styled(
            NodeKind::Stack {
                axis: Axis::Horizontal,
                children: vec![text("A"), Node::new(NodeKind::Spacer { flex: Some(1.0) })],
            },
            &[
                ("gap", Literal::Number(8.0)),
                ("justifyContent", Literal::String("space-between".into())),
                ("alignItems", Literal::String("flex-end".into())),
            ],
        );
        let code = render(&node, Mode::Screen);
        assert!(code.starts_with(
            "Row(horizontalArrangement = Arrangement.spacedBy(8.dp), verticalAlignment = Alignment.Bottom) {\n"
        ));
        assert!(code.contains("    Spacer(modifier = Modifier.weight(1f))\n"));
    }

    #[test]
    fn test_actions() {
        let mut node = Node::new(NodeKind::Stack {
            axis: Axis::Vertical,
            children: vec![],
        });
        node.action = Some(Action {
            action_type: ActionType::Deeplink,
            url: Some("myapp://orders".into()),
            params: None,
            app_id: None,
        });
        let code = render(&node, Mode::Screen);
        assert!(code.contains(
            "Modifier.clickable { context.startActivity(Intent(Intent.ACTION_VIEW, Uri.parse(\"myapp://orders\"))) }"
        ));
        assert!(uses_context(&node));

        let code = render(&node, Mode::Glance);
        assert!(code.contains("GlanceModifier.clickable(actionStartActivity<MainActivity>())"));

        node.action.as_mut().unwrap().action_type = ActionType::Refresh;
        assert!(render(&node, Mode::Glance).contains("clickable(actionRunCallback<RefreshAction>())"));
        assert!(!uses_context(&node));
    }

    #[test]
    fn test_leaves() {
        let progress = Node::new(NodeKind::ProgressBar {
            progress: 0.75,
            indeterminate: None,
        });
        assert_eq!(
            render(&progress, Mode::Screen),
            "LinearProgressIndicator(progress = { 0.75f })\n"
        );
        assert_eq!(
            render(&progress, Mode::Glance),
            "LinearProgressIndicator(progress = 0.75f)\n"
        );

        let spinner = Node::new(NodeKind::ProgressBar {
            progress: 0.0,
            indeterminate: Some(true),
        });
        assert_eq!(render(&spinner, Mode::Screen), "LinearProgressIndicator()\n");

        let button = Node::new(NodeKind::Button {
            label: "Pay $5".into(),
            variant: None,
            size: None,
        });
        assert_eq!(
            render(&button, Mode::Screen),
            "Button(onClick = {  }) { Text(\"Pay \\$5\") }\n"
        );

        let image = Node::new(NodeKind::Image {
            uri: "https://x/y.png".into(),
            resize_mode: Some(ResizeMode::Cover),
            placeholder: None,
        });
        assert_eq!(
            render(&image, Mode::Screen),
            "AsyncImage(model = \"https://x/y.png\", contentDescription = null, contentScale = ContentScale.Crop)\n"
        );
        let glance = render(&image, Mode::Glance);
        assert!(glance.starts_with("// Glance widgets cannot load network images"));
        assert!(glance.contains("Image(provider = ImageProvider(R.drawable.placeholder), contentDescription = null)"));
    }

    #[test]
    fn test_text_arguments() {
        let node = styled(
            NodeKind::Text {
                text: TextContent::String("total".into()),
            },
            &[
                ("fontSize", Literal::Number(14.0)),
                ("fontWeight", Literal::String("700".into())),
                ("color", Literal::String("#FF0000".into())),
                ("textTransform", Literal::String("uppercase".into())),
            ],
        );
        assert_eq!(
            render(&node, Mode::Screen),
            "Text(text = \"TOTAL\", color = Color(0xFFFF0000), fontSize = 14.sp, fontWeight = FontWeight.Bold)\n"
        );
        assert_eq!(
            render(&node, Mode::Glance),
            "Text(text = \"TOTAL\", style = TextStyle(color = ColorProvider(Color(0xFFFF0000)), fontSize = 14.sp, fontWeight = FontWeight.Bold))\n"
        );
    }

    #[test]
    fn test_comments_stay_on_one_line() {
        let list = Node::new(NodeKind::List {
            items: vec![serde_json::json!(1)],
            render_item: "row\n}\nfun injected() {".into(),
            horizontal: None,
        });
        let code = render(&list, Mode::Screen);
        assert!(code.contains("// renderItem: row } fun injected() { (1 items)\n"));
        assert!(!code.lines().any(|line| line.trim_start().starts_with("fun injected")));

        let image = Node::new(NodeKind::Image {
            uri: "https://x/a.png\r\nimport evil".into(),
            resize_mode: None,
            placeholder: None,
        });
        let code = render(&image, Mode::Glance);
        assert!(!code.lines().any(|line| line.trim_start().starts_with("import evil")));
    }

    #[test]
    fn test_glance_widget_file() {
        let mut root = IrRoot::new("Weather_tsx", text("Sunny"));
        root.widget = Some(widget("Weather_tsx"));
        let files = ComposeGenerator::with_package("com.example.widgets")
            .generate(&[root])
            .unwrap();
        assert_eq!(
            files[0].path,
            PathBuf::from("brik/src/main/java/com/example/widgets/Weather_tsx.kt")
        );
        let code = &files[0].content;
        assert!(code.starts_with("package com.example.widgets\n"));
        assert!(code.contains("class Weather_tsxReceiver : GlanceAppWidgetReceiver() {\n    override val glanceAppWidget: GlanceAppWidget = Weather_tsxWidget()\n}"));
        assert!(code.contains("        provideContent {\n            Weather_tsxContent()\n        }\n"));
        assert!(code.contains("@Composable\nfun Weather_tsxContent() {\n    Text(text = \"Sunny\")\n}"));
        assert!(!code.contains("AsyncImage"));
    }

    #[test]
    fn test_activity_file() {
        let mut attributes = ActivityAttributes::default();
        attributes.dynamic_fields.insert("eta".into(), AttributeType::Date);
        let config = LiveActivityConfig {
            activity_type: "Delivery".into(),
            attributes,
            regions: ActivityRegions {
                lock_screen: Some(text("Soon")),
                dynamic_island: None,
            },
            stale_date: None,
            relevance_score: None,
        };
        let mut root = IrRoot::new("src_Delivery_tsx", Node::placeholder());
        root.live_activity = Some(config);

        let files = ComposeGenerator::new().generate(&[root]).unwrap();
        assert_eq!(
            files[0].path,
            PathBuf::from("brik/src/main/java/generated/DeliveryActivity.kt")
        );
        let code = &files[0].content;
        assert!(code.contains("import java.time.Instant\n"));
        assert!(code.contains("class DeliveryAttributes\n"));
        assert!(code.contains("data class DeliveryContentState(\n    val eta: Instant,\n)\n"));
        assert!(code.contains("fun DeliveryLockScreen() {\n    Text(text = \"Soon\")\n}"));
        assert!(!code.contains("DeliveryMinimal"));
    }
}
