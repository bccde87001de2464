//! Source-to-IR compilation
//!
//! Each file is parsed on its own allocator and yields zero or one root. Root
//! selection runs an ordered list of strategies: a live-activity
//! configuration marked with `@brik-activity` wins over a plain widget tree.

use crate::builder::NodeBuilder;
use crate::error::{CompilerError, Result};
use crate::evaluator::property_key_name;
use crate::ir::{
    ActivityAttributes, ActivityRegions, AttributeType, DynamicIsland, IrRoot, LiveActivityConfig,
    Node, Platform, WidgetFamily, WidgetMetadata,
};
use crate::parser::{has_marker, parse_source, ACTIVITY_MARKER, WIDGET_MARKER};
use crate::schema::validate_root;
use crate::value::Literal;
use crate::{CompilationStats, CompilerOptions};
use indexmap::IndexMap;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Declaration, ExportDefaultDeclarationKind, Expression, FunctionBody, JSXElement,
    ObjectPropertyKind, Program, Statement,
};
use oxc_ast_visit::{walk, Visit};
use oxc_span::GetSpan;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// Directories never scanned for sources
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules", "dist", "lib", "build", ".git", ".brik"];

const SOURCE_EXTENSIONS: &[&str] = &["tsx", "jsx"];

/// What a strategy found in one file
#[derive(Debug, Clone)]
struct Candidate {
    tree: Node,
    live_activity: Option<LiveActivityConfig>,
    widget_marker: bool,
}

type Strategy = fn(&Program<'_>, &str) -> Option<Candidate>;

/// Root strategies in priority order
const STRATEGIES: &[(&str, Strategy)] = &[
    ("live-activity", find_live_activity),
    ("widget", find_plain_root),
];

/// A file that produced no root because of an error
#[derive(Debug)]
pub struct FileFailure {
    pub file: String,
    pub error: CompilerError,
}

/// Result of compiling a project
#[derive(Debug, Default)]
pub struct CompileOutput {
    pub roots: Vec<IrRoot>,
    pub failures: Vec<FileFailure>,
    pub stats: CompilationStats,
}

impl CompileOutput {
    pub fn root_ids(&self) -> Vec<String> {
        self.roots.iter().map(|r| r.root_id.clone()).collect()
    }
}

/// Compile one source text into at most one validated root
pub fn compile_source(
    source: &str,
    file: &str,
    root_id: &str,
    options: &CompilerOptions,
) -> Result<Option<IrRoot>> {
    let allocator = Allocator::default();
    let program = parse_source(&allocator, file, source)?;

    let mut candidate = None;
    for (name, strategy) in STRATEGIES {
        if let Some(found) = strategy(&program, source) {
            if options.debug_mode {
                log::debug!("{}: root found by {} strategy", file, name);
            }
            candidate = Some(found);
            break;
        }
    }

    let Some(candidate) = candidate else {
        if options.debug_mode {
            log::debug!("{}: no buildable root", file);
        }
        return Ok(None);
    };

    let mut root = IrRoot::new(root_id, candidate.tree);
    let is_activity = candidate.live_activity.is_some();
    root.live_activity = candidate.live_activity;
    if !is_activity && (options.as_widget || candidate.widget_marker) {
        root.widget = Some(default_widget_metadata(root_id, file));
    }

    validate_root(&root)?;
    Ok(Some(root))
}

/// Compile every source of a project. Per-file errors are collected, not returned.
pub fn compile_files(options: &CompilerOptions) -> Result<CompileOutput> {
    let start_time = Instant::now();
    let project_root = &options.project_root;

    let files = match &options.entries {
        Some(entries) => entries.iter().map(|entry| project_root.join(entry)).collect(),
        None => discover_sources(project_root, &options.exclude_dirs)?,
    };

    if options.debug_mode {
        log::info!("Compiling {} source files under {}", files.len(), project_root.display());
    }

    let mut output = CompileOutput::default();
    let mut taken_ids: HashSet<String> = HashSet::new();

    for path in &files {
        output.stats.files_scanned += 1;
        let relative = relative_path(project_root, path);

        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                log::warn!("Cannot read {}: {}", relative, e);
                output.failures.push(FileFailure {
                    file: relative,
                    error: CompilerError::FileNotFound {
                        path: format!("{}: {}", path.display(), e),
                    },
                });
                continue;
            }
        };

        let derived_id = derive_root_id(&relative);
        let root_id = unique_root_id(&derived_id, &taken_ids);

        match compile_source(&source, &relative, &root_id, options) {
            Ok(Some(root)) => {
                if root_id != derived_id {
                    log::warn!("Duplicate root id '{}', using '{}'", derived_id, root_id);
                }
                taken_ids.insert(root_id);
                output.stats.node_count += root.tree.count();
                if root.is_live_activity() {
                    output.stats.live_activity_count += 1;
                }
                if root.is_widget() {
                    output.stats.widget_count += 1;
                }
                if options.debug_mode {
                    log::debug!("{} -> {}", relative, root.root_id);
                }
                output.roots.push(root);
            }
            Ok(None) => {}
            Err(error) => {
                match &error {
                    CompilerError::Parse { .. } => output.stats.parse_failures += 1,
                    CompilerError::Validation { .. } => output.stats.validation_failures += 1,
                    _ => {}
                }
                log::warn!("{}: {}", relative, error);
                output.failures.push(FileFailure { file: relative, error });
            }
        }
    }

    output.stats.roots_compiled = output.roots.len();
    output.stats.compile_time_ms = start_time.elapsed().as_millis() as u64;

    if options.debug_mode {
        log::info!(
            "Compiled {} roots from {} files ({} failed) in {}ms",
            output.stats.roots_compiled,
            output.stats.files_scanned,
            output.failures.len(),
            output.stats.compile_time_ms
        );
    }

    Ok(output)
}

/// All markup sources below `root`, sorted, skipping excluded and hidden directories
pub fn discover_sources(root: &Path, exclude_dirs: &[String]) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(CompilerError::FileNotFound {
            path: root.display().to_string(),
        });
    }

    let excluded: HashSet<&str> = DEFAULT_EXCLUDED_DIRS
        .iter()
        .copied()
        .chain(exclude_dirs.iter().map(String::as_str))
        .collect();

    let mut files = Vec::new();
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        !excluded.contains(name.as_ref()) && !name.starts_with('.')
    });

    for entry in walker {
        let entry = entry.map_err(|e| CompilerError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_source = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));
        if is_source {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Root id from a project-relative path: separators become underscores
pub fn derive_root_id(relative_path: &str) -> String {
    relative_path.replace(['/', '\\'], "_")
}

/// `candidate`, or the first free `candidate_N` when it is already taken
fn unique_root_id(candidate: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(candidate) {
        return candidate.to_string();
    }
    let mut suffix = 2;
    loop {
        let renamed = format!("{}_{}", candidate, suffix);
        if !taken.contains(&renamed) {
            return renamed;
        }
        suffix += 1;
    }
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn default_widget_metadata(root_id: &str, file: &str) -> WidgetMetadata {
    let display_name = Path::new(file)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned());
    WidgetMetadata {
        kind: root_id.to_string(),
        display_name,
        description: None,
        families: vec![WidgetFamily::SystemSmall, WidgetFamily::SystemMedium],
        supported_platforms: Some(vec![Platform::Ios, Platform::Android]),
        configurable: None,
        timeline: None,
    }
}

// --- plain widget roots ---

struct RootFinder<'s> {
    builder: NodeBuilder<'s>,
    found: Option<Node>,
}

impl<'a, 's> Visit<'a> for RootFinder<'s> {
    fn visit_jsx_element(&mut self, it: &JSXElement<'a>) {
        if self.found.is_some() {
            return;
        }
        if let Some(node) = self.builder.build_element(it) {
            self.found = Some(node);
            return;
        }
        walk::walk_jsx_element(self, it);
    }

    fn visit_function_body(&mut self, it: &FunctionBody<'a>) {
        self.builder.enter_function_body(&it.statements);
        walk::walk_function_body(self, it);
        self.builder.leave_function_body();
    }
}

/// First element, in document order, that builds
fn find_plain_root(program: &Program<'_>, source: &str) -> Option<Candidate> {
    let mut finder = RootFinder {
        builder: NodeBuilder::new(source),
        found: None,
    };
    for statement in &program.body {
        finder.visit_statement(statement);
        if let Some(tree) = finder.found.take() {
            return Some(Candidate {
                tree,
                live_activity: None,
                widget_marker: has_marker(source, statement.span().start, WIDGET_MARKER),
            });
        }
    }
    None
}

// --- live activities ---

fn push_function_init<'b, 'a>(
    init: Option<&'b Expression<'a>>,
    bodies: &mut Vec<(&'b FunctionBody<'a>, bool)>,
) {
    match init {
        Some(Expression::ArrowFunctionExpression(arrow)) => bodies.push((&arrow.body, arrow.expression)),
        Some(Expression::FunctionExpression(func)) => {
            if let Some(body) = &func.body {
                bodies.push((body, false));
            }
        }
        _ => {}
    }
}

/// Values returned by the functions a top-level statement declares, with their bodies
fn returned_expressions<'b, 'a>(
    statement: &'b Statement<'a>,
) -> Vec<(&'b FunctionBody<'a>, &'b Expression<'a>)> {
    let mut bodies: Vec<(&'b FunctionBody<'a>, bool)> = Vec::new();

    match statement {
        Statement::FunctionDeclaration(func) => {
            if let Some(body) = &func.body {
                bodies.push((body, false));
            }
        }
        Statement::VariableDeclaration(decl) => {
            for declarator in &decl.declarations {
                push_function_init(declarator.init.as_ref(), &mut bodies);
            }
        }
        Statement::ExportNamedDeclaration(export) => match &export.declaration {
            Some(Declaration::FunctionDeclaration(func)) => {
                if let Some(body) = &func.body {
                    bodies.push((body, false));
                }
            }
            Some(Declaration::VariableDeclaration(decl)) => {
                for declarator in &decl.declarations {
                    push_function_init(declarator.init.as_ref(), &mut bodies);
                }
            }
            _ => {}
        },
        Statement::ExportDefaultDeclaration(export) => match &export.declaration {
            ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                if let Some(body) = &func.body {
                    bodies.push((body, false));
                }
            }
            ExportDefaultDeclarationKind::ArrowFunctionExpression(arrow) => {
                bodies.push((&arrow.body, arrow.expression));
            }
            _ => {}
        },
        _ => {}
    }

    bodies
        .into_iter()
        .filter_map(|(body, expression_body)| {
            body.statements
                .iter()
                .find_map(|statement| match statement {
                    Statement::ExpressionStatement(stmt) if expression_body => Some(&stmt.expression),
                    Statement::ReturnStatement(ret) if !expression_body => ret.argument.as_ref(),
                    _ => None,
                })
                .map(|returned| (body, returned))
        })
        .collect()
}

fn find_live_activity(program: &Program<'_>, source: &str) -> Option<Candidate> {
    for statement in &program.body {
        if !has_marker(source, statement.span().start, ACTIVITY_MARKER) {
            continue;
        }
        for (body, returned) in returned_expressions(statement) {
            let mut builder = NodeBuilder::new(source);
            builder.enter_function_body(&body.statements);
            match parse_activity_config(&mut builder, returned) {
                Ok(config) => {
                    return Some(Candidate {
                        tree: Node::placeholder(),
                        live_activity: Some(config),
                        widget_marker: false,
                    });
                }
                Err(reason) => log::warn!("Ignoring live activity: {}", reason),
            }
        }
    }
    None
}

/// Non-computed properties of an object literal, looking through parentheses and TS casts
fn object_properties<'b, 'a>(expr: &'b Expression<'a>) -> Option<Vec<(String, &'b Expression<'a>)>> {
    match expr {
        Expression::ParenthesizedExpression(paren) => object_properties(&paren.expression),
        Expression::TSAsExpression(e) => object_properties(&e.expression),
        Expression::TSSatisfiesExpression(e) => object_properties(&e.expression),
        Expression::ObjectExpression(object) => Some(
            object
                .properties
                .iter()
                .filter_map(|property| match property {
                    ObjectPropertyKind::ObjectProperty(prop) if !prop.computed => {
                        Some((property_key_name(&prop.key)?, &prop.value))
                    }
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}

fn parse_activity_config(
    builder: &mut NodeBuilder<'_>,
    returned: &Expression<'_>,
) -> std::result::Result<LiveActivityConfig, String> {
    let properties = object_properties(returned).ok_or("return value is not an object literal")?;

    let mut activity_type = None;
    let mut attributes = ActivityAttributes::default();
    let mut regions = ActivityRegions::default();
    let mut stale_date = None;
    let mut relevance_score = None;

    for (key, value) in properties {
        match key.as_str() {
            "activityType" => {
                activity_type = builder
                    .evaluator()
                    .eval(value)
                    .and_then(|v| v.as_str().map(str::to_string));
            }
            "attributes" => {
                for (group, fields) in object_properties(value).unwrap_or_default() {
                    let target = match group.as_str() {
                        "static" => &mut attributes.static_fields,
                        "dynamic" => &mut attributes.dynamic_fields,
                        _ => continue,
                    };
                    match builder.evaluator().eval(fields) {
                        Some(Literal::Object(map)) => *target = attribute_types(&group, &map),
                        _ => log::warn!("attributes.{} is not an object literal", group),
                    }
                }
            }
            "regions" => {
                for (slot, slot_value) in object_properties(value).unwrap_or_default() {
                    match slot.as_str() {
                        "lockScreen" => regions.lock_screen = builder.build_markup(slot_value),
                        "dynamicIsland" => {
                            let mut island = DynamicIsland::default();
                            for (part, part_value) in object_properties(slot_value).unwrap_or_default() {
                                match part.as_str() {
                                    "compact" => island.compact = builder.build_markup(part_value),
                                    "minimal" => island.minimal = builder.build_markup(part_value),
                                    "expanded" => island.expanded = builder.build_markup(part_value),
                                    other => log::debug!("Ignoring dynamicIsland.{}", other),
                                }
                            }
                            regions.dynamic_island = Some(island);
                        }
                        other => log::debug!("Ignoring regions.{}", other),
                    }
                }
            }
            "staleDate" => {
                stale_date = builder.evaluator().eval(value).and_then(|v| v.as_text());
            }
            "relevanceScore" => {
                relevance_score = builder.evaluator().eval(value).and_then(|v| v.as_f64());
            }
            other => log::debug!("Ignoring live activity field '{}'", other),
        }
    }

    let activity_type = activity_type
        .filter(|t| !t.is_empty())
        .ok_or("missing activityType")?;

    Ok(LiveActivityConfig {
        activity_type,
        attributes,
        regions,
        stale_date,
        relevance_score,
    })
}

fn attribute_types(group: &str, map: &IndexMap<String, Literal>) -> IndexMap<String, AttributeType> {
    let mut out = IndexMap::new();
    for (name, value) in map {
        match value.as_str().and_then(AttributeType::parse) {
            Some(ty) => {
                out.insert(name.clone(), ty);
            }
            None => log::warn!(
                "Ignoring attributes.{}.{}: expected one of string, number, boolean, date",
                group,
                name
            ),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{AttributeType, Axis, NodeKind, TextContent};
    use std::fs;
    use tempfile::TempDir;

    fn compile(source: &str) -> Result<Option<IrRoot>> {
        compile_source(source, "src/Widget.tsx", "src_Widget_tsx", &CompilerOptions::default())
    }

    #[test]
    fn test_end_to_end_view() {
        let source = r#"
            import { View, Text } from '@brik/react-native';
            export function Widget() {
                return (
                    <View style={{ padding: 16, backgroundColor: '#FFFFFF' }}>
                        <Text>Hello</Text>
                    </View>
                );
            }
        "#;
        let root = compile(source).unwrap().unwrap();
        assert_eq!(root.version, 1);
        assert_eq!(root.root_id, "src_Widget_tsx");
        let style = root.tree.style.as_ref().unwrap();
        assert_eq!(style.number("padding"), Some(16.0));
        assert_eq!(style.text("backgroundColor"), Some("#FFFFFF"));
        assert!(matches!(
            &root.tree.children()[0].kind,
            NodeKind::Text { text: TextContent::String(s) } if s == "Hello"
        ));
        assert!(root.widget.is_none());
    }

    #[test]
    fn test_first_buildable_element_wins() {
        let source = r#"
            const Header = () => <SafeAreaView><Stack axis="horizontal"><Text>A</Text></Stack></SafeAreaView>;
            const Other = () => <View><Text>B</Text></View>;
        "#;
        let root = compile(source).unwrap().unwrap();
        assert!(matches!(root.tree.kind, NodeKind::Stack { axis: Axis::Horizontal, .. }));
    }

    fn child_texts(node: &Node) -> Vec<String> {
        node.children()
            .iter()
            .filter_map(|child| match &child.kind {
                NodeKind::Text { text } => Some(text.display()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_conditional_on_body_constant() {
        let source = r#"
            export function W() {
                const show = true;
                const hidden = false;
                return (
                    <View>
                        {show && <Text>Visible</Text>}
                        {hidden && <Text>Hidden</Text>}
                    </View>
                );
            }
        "#;
        let root = compile(source).unwrap().unwrap();
        assert_eq!(child_texts(&root.tree), vec!["Visible"]);
    }

    #[test]
    fn test_map_over_body_constant() {
        let source = r#"
            export function W() {
                const items = ['One', 'Two', 'Three'];
                return <View>{items.map((item: string) => <Text key={item}>{item}</Text>)}</View>;
            }
        "#;
        let root = compile(source).unwrap().unwrap();
        assert_eq!(child_texts(&root.tree), vec!["One", "Two", "Three"]);
        let keys: Vec<Option<&str>> = root.tree.children().iter().map(|c| c.key.as_deref()).collect();
        assert_eq!(keys, vec![Some("One"), Some("Two"), Some("Three")]);
    }

    #[test]
    fn test_template_over_body_constants() {
        let source = r#"
            export const W = () => {
                const temperature = 72;
                const unit = 'F';
                return <Text>{`${temperature}°${unit}`}</Text>;
            };
        "#;
        let root = compile(source).unwrap().unwrap();
        assert!(matches!(
            &root.tree.kind,
            NodeKind::Text { text: TextContent::String(s) } if s == "72°F"
        ));
    }

    #[test]
    fn test_body_constants_mixed() {
        let source = r#"
            export function W() {
                const items = ['One', 'Two', 'Three'];
                const show = true;
                const temperature = 72;
                const unit = 'F';
                const data = fetch('/weather');
                return (
                    <View>
                        {show && <Text>V</Text>}
                        {items.map(i => <Text>{i}</Text>)}
                        <Text>{`${temperature}°${unit}`}</Text>
                        {data && <Text>Loaded</Text>}
                    </View>
                );
            }
        "#;
        let root = compile(source).unwrap().unwrap();
        assert_eq!(root.tree.children().len(), 5);
        assert_eq!(child_texts(&root.tree), vec!["V", "One", "Two", "Three", "72°F"]);
    }

    #[test]
    fn test_body_constants_do_not_leak_between_functions() {
        let source = r#"
            function Helper() {
                const label = 'inner';
                return null;
            }
            export function W() {
                return <Text>{label}</Text>;
            }
        "#;
        let root = compile(source).unwrap().unwrap();
        assert!(matches!(
            &root.tree.kind,
            NodeKind::Text { text: TextContent::String(s) } if s.is_empty()
        ));
    }

    #[test]
    fn test_file_without_markup_yields_nothing() {
        assert!(compile("export const x = 1;").unwrap().is_none());
    }

    #[test]
    fn test_parse_failure() {
        let err = compile("export function (").unwrap_err();
        assert!(matches!(err, CompilerError::Parse { .. }));
    }

    #[test]
    fn test_invalid_root_is_rejected() {
        let err = compile("export const W = () => <ProgressBar progress={1.5} />;").unwrap_err();
        assert!(matches!(err, CompilerError::Validation { .. }));
        assert_eq!(err.issues()[0].path, "tree.progress");
    }

    #[test]
    fn test_widget_marker_and_flag() {
        let source = "/** @brik-widget */\nexport const W = () => <View />;";
        let root = compile(source).unwrap().unwrap();
        let widget = root.widget.unwrap();
        assert_eq!(widget.kind, "src_Widget_tsx");
        assert_eq!(widget.display_name.as_deref(), Some("Widget"));

        let options = CompilerOptions {
            as_widget: true,
            ..CompilerOptions::default()
        };
        let root = compile_source("const W = () => <View />;", "W.tsx", "W_tsx", &options)
            .unwrap()
            .unwrap();
        assert!(root.widget.is_some());
    }

    #[test]
    fn test_live_activity() {
        let source = r#"
            /** @brik-activity */
            export function OrderTracking() {
                return {
                    activityType: 'OrderTracking',
                    attributes: {
                        static: { orderId: 'string', placedAt: 'date' },
                        dynamic: { progress: 'number', delivered: 'boolean', mood: 'emoji' },
                    },
                    regions: {
                        lockScreen: <Stack axis="horizontal"><Text>Order</Text></Stack>,
                        dynamicIsland: {
                            compact: <Text>🚚</Text>,
                            minimal: <Text>•</Text>,
                            expanded: (
                                <View><Text>Arriving soon</Text></View>
                            ),
                        },
                    },
                    relevanceScore: 75,
                };
            }
        "#;
        let root = compile(source).unwrap().unwrap();
        assert_eq!(root.tree, Node::placeholder());
        let activity = root.live_activity.unwrap();
        assert_eq!(activity.activity_type, "OrderTracking");
        assert_eq!(activity.attributes.static_fields["placedAt"], AttributeType::Date);
        assert_eq!(activity.attributes.dynamic_fields.len(), 2);
        assert!(activity.regions.lock_screen.is_some());
        let island = activity.regions.dynamic_island.unwrap();
        assert!(island.compact.is_some() && island.minimal.is_some() && island.expanded.is_some());
        assert_eq!(activity.relevance_score, Some(75.0));
    }

    #[test]
    fn test_activity_reads_body_constants() {
        let source = r#"
            /** @brik-activity */
            export function Delivery() {
                const kind = 'Delivery';
                const eta = '5 min';
                return {
                    activityType: kind,
                    regions: { lockScreen: <Text>{`ETA ${eta}`}</Text> },
                };
            }
        "#;
        let root = compile(source).unwrap().unwrap();
        let config = root.live_activity.unwrap();
        assert_eq!(config.activity_type, "Delivery");
        assert!(matches!(
            &config.regions.lock_screen.unwrap().kind,
            NodeKind::Text { text: TextContent::String(s) } if s == "ETA 5 min"
        ));
    }

    #[test]
    fn test_activity_without_type_falls_back_to_plain_root() {
        let source = r#"
            /** @brik-activity */
            export const A = () => ({ regions: { lockScreen: <Text>x</Text> } });
        "#;
        let root = compile(source).unwrap().unwrap();
        assert!(root.live_activity.is_none());
        assert!(matches!(root.tree.kind, NodeKind::Text { .. }));
    }

    #[test]
    fn test_non_literal_activity_return_is_skipped() {
        let source = r#"
            /** @brik-activity */
            export function A() { return buildConfig(); }
        "#;
        assert!(compile(source).unwrap().is_none());
    }

    #[test]
    fn test_compile_files_continues_after_failures() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("src/widgets")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("src/widgets/Weather.tsx"), "export const W = () => <Text>Sunny</Text>;").unwrap();
        fs::write(root.join("src/Broken.tsx"), "export const = <View").unwrap();
        fs::write(root.join("src/Plain.ts"), "export const x = 1;").unwrap();
        fs::write(root.join("node_modules/pkg/Ignored.tsx"), "export const W = () => <View />;").unwrap();

        let options = CompilerOptions {
            project_root: root.to_path_buf(),
            ..CompilerOptions::default()
        };
        let output = compile_files(&options).unwrap();

        assert_eq!(output.root_ids(), vec!["src_widgets_Weather.tsx"]);
        assert_eq!(output.failures.len(), 1);
        assert_eq!(output.failures[0].file, "src/Broken.tsx");
        assert_eq!(output.stats.files_scanned, 2);
        assert_eq!(output.stats.parse_failures, 1);
    }

    #[test]
    fn test_explicit_entries_and_duplicate_ids() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("a/b.tsx"), "export const W = () => <View />;").unwrap();
        fs::write(root.join("a_b.tsx"), "export const W = () => <View />;").unwrap();

        let options = CompilerOptions {
            project_root: root.to_path_buf(),
            entries: Some(vec![PathBuf::from("a/b.tsx"), PathBuf::from("a_b.tsx")]),
            ..CompilerOptions::default()
        };
        let output = compile_files(&options).unwrap();
        assert_eq!(output.root_ids(), vec!["a_b.tsx", "a_b.tsx_2"]);
    }

    #[test]
    fn test_rootless_file_does_not_claim_its_id() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("a/b.tsx"), "export const helper = 1;").unwrap();
        fs::write(root.join("a_b.tsx"), "export const W = () => <View />;").unwrap();

        let options = CompilerOptions {
            project_root: root.to_path_buf(),
            entries: Some(vec![PathBuf::from("a/b.tsx"), PathBuf::from("a_b.tsx")]),
            ..CompilerOptions::default()
        };
        let output = compile_files(&options).unwrap();
        assert_eq!(output.root_ids(), vec!["a_b.tsx"]);
    }

    #[test]
    fn test_unique_root_id() {
        let mut taken = HashSet::new();
        assert_eq!(unique_root_id("a", &taken), "a");
        taken.insert("a".to_string());
        taken.insert("a_2".to_string());
        assert_eq!(unique_root_id("a", &taken), "a_3");
    }

    #[test]
    fn test_derive_root_id() {
        assert_eq!(derive_root_id("src/widgets/Weather.tsx"), "src_widgets_Weather.tsx");
        assert_eq!(derive_root_id("src\\App.jsx"), "src_App.jsx");
    }
}
