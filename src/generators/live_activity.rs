//! ActivityKit output for live-activity roots
//!
//! One Swift file per activity holds the `ActivityAttributes` type and the
//! widget configuration that renders its lock-screen and Dynamic Island
//! regions. Missing regions render a fixed placeholder glyph.

use super::swiftui::emit_node;
use super::{escape_swift, sanitize_identifier, SourceWriter};
use crate::ir::{AttributeType, LiveActivityConfig, Node};
use crate::value::format_js_number;
use indexmap::IndexMap;

pub const LOCK_SCREEN_PLACEHOLDER: &str = "Activity";
pub const COMPACT_PLACEHOLDER: &str = "•";
pub const MINIMAL_PLACEHOLDER: &str = "-";
pub const EXPANDED_PLACEHOLDER: &str = "Expanded";

pub fn swift_type(ty: AttributeType) -> &'static str {
    match ty {
        AttributeType::String => "String",
        AttributeType::Number => "Double",
        AttributeType::Boolean => "Bool",
        AttributeType::Date => "Date",
    }
}

/// Attributes type plus widget configuration for one activity
pub fn generate_live_activity(config: &LiveActivityConfig) -> String {
    let type_name = sanitize_identifier(&config.activity_type);
    let mut w = SourceWriter::new();

    w.line("import ActivityKit");
    w.line("import SwiftUI");
    w.line("import WidgetKit");
    w.blank();

    w.block(
        format!("struct {}Attributes: ActivityAttributes {{", type_name),
        "}",
        |w| {
            w.block("public struct ContentState: Codable, Hashable {", "}", |w| {
                fields(w, &config.attributes.dynamic_fields);
            });
            if !config.attributes.static_fields.is_empty() {
                w.blank();
                fields(w, &config.attributes.static_fields);
            }
        },
    );

    if config.stale_date.is_some() || config.relevance_score.is_some() {
        w.blank();
        w.block(format!("extension {}Attributes {{", type_name), "}", |w| {
            if let Some(stale_date) = &config.stale_date {
                w.line(format!("static let staleDate: String = \"{}\"", escape_swift(stale_date)));
            }
            if let Some(score) = config.relevance_score {
                w.line(format!("static let relevanceScore: Double = {}", format_js_number(score)));
            }
        });
    }

    w.blank();
    let island = config.regions.dynamic_island.as_ref();
    w.block(
        format!("struct {}ActivityWidget: Widget {{", type_name),
        "}",
        |w| {
            w.block("var body: some WidgetConfiguration {", "}", |w| {
                w.line(format!(
                    "ActivityConfiguration(for: {}Attributes.self) {{ context in",
                    type_name
                ));
                w.indent();
                region(w, config.regions.lock_screen.as_ref(), LOCK_SCREEN_PLACEHOLDER);
                w.dedent();
                w.line("} dynamicIsland: { context in");
                w.indent();
                w.line("DynamicIsland {");
                w.indent();
                w.block("DynamicIslandExpandedRegion(.leading) {", "}", |w| {
                    region(w, island.and_then(|i| i.expanded.as_ref()), EXPANDED_PLACEHOLDER);
                });
                w.dedent();
                w.line("} compactLeading: {");
                w.indent();
                region(w, island.and_then(|i| i.compact.as_ref()), COMPACT_PLACEHOLDER);
                w.dedent();
                w.line("} compactTrailing: {");
                w.indent();
                w.line("Text(\"\")");
                w.dedent();
                w.line("} minimal: {");
                w.indent();
                region(w, island.and_then(|i| i.minimal.as_ref()), MINIMAL_PLACEHOLDER);
                w.dedent();
                w.line("}");
                w.dedent();
                w.line("}");
            });
        },
    );

    w.finish()
}

fn fields(w: &mut SourceWriter, fields: &IndexMap<String, AttributeType>) {
    for (name, ty) in fields {
        w.line(format!("var {}: {}", sanitize_identifier(name), swift_type(*ty)));
    }
}

fn region(w: &mut SourceWriter, node: Option<&Node>, placeholder: &str) {
    match node {
        Some(node) => emit_node(w, node),
        None => w.line(format!("Text(\"{}\")", placeholder)),
    }
}
