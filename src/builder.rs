//! Markup element to IR node conversion
//!
//! The builder resolves attributes and children through the static
//! [`Evaluator`]. Conditionals and `.map` repetitions over literal arrays are
//! decided here, so the IR only ever contains their outcome. An element that
//! uses anything outside the supported subset fails to build; containers drop
//! such children and keep going.

use crate::evaluator::Evaluator;
use crate::ir::{
    Accessibility, Action, ActionType, Axis, BindingSource, ButtonSize, ButtonVariant,
    DataBinding, Node, NodeKind, ResizeMode, TextContent,
};
use crate::parser::span_text;
use crate::style::normalize_style;
use crate::value::Literal;
use indexmap::IndexMap;
use oxc_ast::ast::{
    BindingPattern, Expression, FormalParameters, FunctionBody, JSXAttributeItem,
    JSXAttributeName, JSXAttributeValue, JSXChild, JSXElement, JSXExpression, LogicalOperator,
    Statement, VariableDeclarationKind, VariableDeclarator,
};
use oxc_span::GetSpan;

/// Why an element could not be built; only used for debug logging
#[derive(Debug, Clone)]
struct Unbuildable(String);

type Built<T> = std::result::Result<T, Unbuildable>;

fn unbuildable<T>(reason: impl Into<String>) -> Built<T> {
    Err(Unbuildable(reason.into()))
}

/// Supported element tags, with or without the `Brik` prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementTag {
    View,
    Text,
    Button,
    Image,
    Stack,
    Spacer,
    ProgressBar,
    List,
}

impl ElementTag {
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.rsplit('.').next().unwrap_or(name);
        let name = name.strip_prefix("Brik").unwrap_or(name);
        match name {
            "View" => Some(Self::View),
            "Text" => Some(Self::Text),
            "Button" => Some(Self::Button),
            "Image" => Some(Self::Image),
            "Stack" => Some(Self::Stack),
            "Spacer" => Some(Self::Spacer),
            "ProgressBar" => Some(Self::ProgressBar),
            "List" => Some(Self::List),
            _ => None,
        }
    }
}

enum AttrValue<'b, 'a> {
    Flag,
    Str(String),
    Expr(&'b Expression<'a>),
    Markup,
    Empty,
    Lit(Literal),
}

type Attrs<'b, 'a> = IndexMap<String, AttrValue<'b, 'a>>;

/// One resolved child before it is turned into a node
enum Child {
    Node(Node),
    Text(TextContent),
}

/// A callback usable as a `.map` or `renderItem` template
struct Callback<'b, 'a> {
    params: &'b FormalParameters<'a>,
    body: &'b FunctionBody<'a>,
    expression_body: bool,
}

pub struct NodeBuilder<'s> {
    source: &'s str,
    evaluator: Evaluator,
}

impl<'s> NodeBuilder<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            evaluator: Evaluator::new(),
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Build one element, `None` if it uses unsupported constructs
    pub fn build_element(&mut self, element: &JSXElement<'_>) -> Option<Node> {
        match self.element(element) {
            Ok(node) => Some(node),
            Err(Unbuildable(reason)) => {
                log::debug!(
                    "Skipping <{}>: {}",
                    span_text(self.source, element.opening_element.name.span()),
                    reason
                );
                None
            }
        }
    }

    /// Build a markup-valued expression such as a live-activity region
    pub fn build_markup(&mut self, expr: &Expression<'_>) -> Option<Node> {
        match expr {
            Expression::ParenthesizedExpression(paren) => self.build_markup(&paren.expression),
            Expression::JSXElement(element) => self.build_element(element),
            Expression::JSXFragment(fragment) => {
                let mut nodes = self.child_nodes(&fragment.children);
                match nodes.len() {
                    0 => None,
                    1 => nodes.pop(),
                    _ => Some(Node::new(NodeKind::View { children: nodes })),
                }
            }
            _ => None,
        }
    }

    fn element(&mut self, element: &JSXElement<'_>) -> Built<Node> {
        let name = span_text(self.source, element.opening_element.name.span());
        let Some(tag) = ElementTag::from_name(name) else {
            return unbuildable(format!("unknown element '{}'", name));
        };

        let attrs = self.collect_attrs(element)?;

        let kind = match tag {
            ElementTag::View => NodeKind::View {
                children: self.child_nodes(&element.children),
            },
            ElementTag::Stack => {
                let axis = match self.attr_literal(&attrs, "axis")? {
                    Some(Literal::String(axis)) if axis == "horizontal" || axis == "row" => {
                        Axis::Horizontal
                    }
                    _ => Axis::Vertical,
                };
                NodeKind::Stack {
                    axis,
                    children: self.child_nodes(&element.children),
                }
            }
            ElementTag::Text => NodeKind::Text {
                text: self.text_content(&element.children),
            },
            ElementTag::Button => {
                let label = match self.attr_literal(&attrs, "label")? {
                    Some(literal) => literal
                        .as_text()
                        .ok_or_else(|| Unbuildable("label must be a string".into()))?,
                    None => match self.text_content(&element.children).display() {
                        text if text.is_empty() => "Button".to_string(),
                        text => text,
                    },
                };
                NodeKind::Button {
                    label,
                    variant: self.enum_attr(&attrs, "variant", ButtonVariant::parse)?,
                    size: self.enum_attr(&attrs, "size", ButtonSize::parse)?,
                }
            }
            ElementTag::Image => {
                let uri = match self.attr_literal(&attrs, "uri")? {
                    Some(literal) => literal.as_text(),
                    None => match self.attr_literal(&attrs, "source")? {
                        Some(Literal::Object(source)) => {
                            source.get("uri").and_then(Literal::as_text)
                        }
                        Some(literal) => literal.as_text(),
                        None => None,
                    },
                };
                let placeholder = self.attr_literal(&attrs, "placeholder")?;
                NodeKind::Image {
                    uri: uri.unwrap_or_default(),
                    resize_mode: self.enum_attr(&attrs, "resizeMode", ResizeMode::parse)?,
                    placeholder: placeholder.and_then(|p| p.as_text()),
                }
            }
            ElementTag::Spacer => NodeKind::Spacer {
                flex: self.number_attr(&attrs, "flex")?,
            },
            ElementTag::ProgressBar => NodeKind::ProgressBar {
                progress: self.number_attr(&attrs, "progress")?.unwrap_or(0.0),
                indeterminate: self.bool_attr(&attrs, "indeterminate")?,
            },
            ElementTag::List => return self.list(&attrs),
        };

        let mut node = Node::new(kind);
        self.apply_common(&mut node, &attrs)?;
        Ok(node)
    }

    fn collect_attrs<'b, 'a>(&self, element: &'b JSXElement<'a>) -> Built<Attrs<'b, 'a>> {
        let mut attrs = Attrs::new();
        for item in &element.opening_element.attributes {
            match item {
                JSXAttributeItem::Attribute(attr) => {
                    let name = match &attr.name {
                        JSXAttributeName::Identifier(ident) => ident.name.as_str().to_string(),
                        JSXAttributeName::NamespacedName(_) => {
                            return unbuildable("namespaced attributes are not supported");
                        }
                    };
                    let value = match &attr.value {
                        None => AttrValue::Flag,
                        Some(JSXAttributeValue::StringLiteral(lit)) => {
                            AttrValue::Str(lit.value.as_str().to_string())
                        }
                        Some(JSXAttributeValue::ExpressionContainer(container)) => {
                            match container.expression.as_expression() {
                                Some(expr) => AttrValue::Expr(expr),
                                None => AttrValue::Empty,
                            }
                        }
                        Some(JSXAttributeValue::Element(_)) | Some(JSXAttributeValue::Fragment(_)) => {
                            AttrValue::Markup
                        }
                    };
                    attrs.insert(name, value);
                }
                JSXAttributeItem::SpreadAttribute(spread) => {
                    match self.evaluator.eval(&spread.argument) {
                        Some(Literal::Object(map)) => {
                            for (key, value) in map {
                                attrs.insert(key, AttrValue::Lit(value));
                            }
                        }
                        _ => return unbuildable("spread attributes must be object literals"),
                    }
                }
            }
        }
        Ok(attrs)
    }

    /// `Ok(None)` when absent, an error when present but not a literal
    fn attr_literal(&self, attrs: &Attrs<'_, '_>, name: &str) -> Built<Option<Literal>> {
        match attrs.get(name) {
            None => Ok(None),
            Some(AttrValue::Flag) => Ok(Some(Literal::Bool(true))),
            Some(AttrValue::Str(s)) => Ok(Some(Literal::String(s.clone()))),
            Some(AttrValue::Lit(literal)) => Ok(Some(literal.clone())),
            Some(AttrValue::Expr(expr)) => match self.evaluator.eval(expr) {
                Some(literal) => Ok(Some(literal)),
                None => unbuildable(format!("attribute '{}' is not a compile-time literal", name)),
            },
            Some(AttrValue::Markup) | Some(AttrValue::Empty) => {
                unbuildable(format!("attribute '{}' has no literal value", name))
            }
        }
    }

    fn number_attr(&self, attrs: &Attrs<'_, '_>, name: &str) -> Built<Option<f64>> {
        match self.attr_literal(attrs, name)? {
            None | Some(Literal::Undefined) => Ok(None),
            Some(Literal::Number(n)) => Ok(Some(n)),
            Some(other) => unbuildable(format!("'{}' must be a number, found {}", name, other.type_name())),
        }
    }

    fn bool_attr(&self, attrs: &Attrs<'_, '_>, name: &str) -> Built<Option<bool>> {
        match self.attr_literal(attrs, name)? {
            None | Some(Literal::Undefined) => Ok(None),
            Some(Literal::Bool(b)) => Ok(Some(b)),
            Some(other) => unbuildable(format!("'{}' must be a boolean, found {}", name, other.type_name())),
        }
    }

    fn string_attr(&self, attrs: &Attrs<'_, '_>, name: &str) -> Built<Option<String>> {
        Ok(self.attr_literal(attrs, name)?.and_then(|l| l.as_text()))
    }

    /// Enumerated string attribute; unknown spellings are dropped
    fn enum_attr<T>(
        &self,
        attrs: &Attrs<'_, '_>,
        name: &str,
        parse: fn(&str) -> Option<T>,
    ) -> Built<Option<T>> {
        let Some(literal) = self.attr_literal(attrs, name)? else {
            return Ok(None);
        };
        let parsed = literal.as_str().and_then(parse);
        if parsed.is_none() {
            log::warn!("Ignoring unsupported {} value {:?}", name, literal.to_js_string());
        }
        Ok(parsed)
    }

    fn apply_common(&self, node: &mut Node, attrs: &Attrs<'_, '_>) -> Built<()> {
        node.key = self.string_attr(attrs, "key")?;

        if let Some(style) = self.style_bag(attrs)? {
            let normalized = normalize_style(Some(&style));
            if !normalized.is_empty() {
                node.style = Some(normalized);
            }
        }

        node.action = match self.attr_literal(attrs, "action") {
            Ok(Some(Literal::Object(map))) => parse_action(&map),
            Ok(Some(other)) => {
                log::warn!("Ignoring action of type {}", other.type_name());
                None
            }
            Ok(None) => None,
            Err(Unbuildable(reason)) => {
                log::warn!("Ignoring action: {}", reason);
                None
            }
        };

        node.data_binding = match self.attr_literal(attrs, "dataBinding") {
            Ok(Some(Literal::Object(map))) => parse_data_binding(&map),
            Ok(_) => None,
            Err(Unbuildable(reason)) => {
                log::warn!("Ignoring dataBinding: {}", reason);
                None
            }
        };

        let role = match self.string_attr(attrs, "role")? {
            Some(role) => Some(role),
            None => self.string_attr(attrs, "accessibilityRole")?,
        };
        let accessibility = Accessibility {
            accessibility_label: self.string_attr(attrs, "accessibilityLabel")?,
            accessible: self.bool_attr(attrs, "accessible")?,
            role,
        };
        if !accessibility.is_empty() {
            node.accessibility = Some(accessibility);
        }

        Ok(())
    }

    /// Style object, or an array of style objects merged left to right
    fn style_bag(&self, attrs: &Attrs<'_, '_>) -> Built<Option<IndexMap<String, Literal>>> {
        let literal = match self.attr_literal(attrs, "style") {
            Ok(literal) => literal,
            Err(Unbuildable(reason)) => {
                log::warn!("Ignoring style: {}", reason);
                return Ok(None);
            }
        };
        match literal {
            None => Ok(None),
            Some(Literal::Object(map)) => Ok(Some(map)),
            Some(Literal::Array(items)) => {
                let mut merged = IndexMap::new();
                for item in items {
                    if let Literal::Object(map) = item {
                        merged.extend(map);
                    }
                }
                Ok(Some(merged))
            }
            Some(other) => {
                log::warn!("Ignoring style of type {}", other.type_name());
                Ok(None)
            }
        }
    }

    /// `List` with literal items and an inline template expands into a Stack
    fn list(&mut self, attrs: &Attrs<'_, '_>) -> Built<Node> {
        let items = match self.attr_literal(attrs, "items")? {
            Some(items) => Some(items),
            None => self.attr_literal(attrs, "data")?,
        };
        let items = match items {
            Some(Literal::Array(items)) => items,
            None => Vec::new(),
            Some(other) => return unbuildable(format!("list items must be an array, found {}", other.type_name())),
        };
        let horizontal = self.bool_attr(attrs, "horizontal")?;

        let kind = match attrs.get("renderItem") {
            Some(AttrValue::Expr(expr)) => match callback_of(expr) {
                Some(callback) => {
                    let mut children = Vec::new();
                    for (index, item) in items.iter().enumerate() {
                        let produced = self.with_callback(&callback, item, index)?;
                        children.extend(produced);
                    }
                    NodeKind::Stack {
                        axis: if horizontal == Some(true) {
                            Axis::Horizontal
                        } else {
                            Axis::Vertical
                        },
                        children: self.children_to_nodes(children),
                    }
                }
                None => NodeKind::List {
                    items: items.iter().map(Literal::to_json).collect(),
                    render_item: template_name(self.source, expr),
                    horizontal,
                },
            },
            Some(AttrValue::Str(name)) => NodeKind::List {
                items: items.iter().map(Literal::to_json).collect(),
                render_item: name.clone(),
                horizontal,
            },
            _ => return unbuildable("list requires a renderItem template"),
        };

        let mut node = Node::new(kind);
        self.apply_common(&mut node, attrs)?;
        Ok(node)
    }

    /// Children of a container; failed children are omitted
    fn child_nodes(&mut self, children: &[JSXChild<'_>]) -> Vec<Node> {
        let resolved = self.expand_children(children);
        self.children_to_nodes(resolved)
    }

    fn children_to_nodes(&self, children: Vec<Child>) -> Vec<Node> {
        children
            .into_iter()
            .map(|child| match child {
                Child::Node(node) => node,
                Child::Text(text) => Node::new(NodeKind::Text { text }),
            })
            .collect()
    }

    fn expand_children(&mut self, children: &[JSXChild<'_>]) -> Vec<Child> {
        let mut out = Vec::new();
        for child in children {
            let expanded = match child {
                JSXChild::Text(text) => {
                    let text = normalize_jsx_text(text.value.as_str());
                    if !text.is_empty() {
                        out.push(Child::Text(TextContent::String(text)));
                    }
                    continue;
                }
                JSXChild::Element(element) => self.element(element).map(|node| vec![Child::Node(node)]),
                JSXChild::Fragment(fragment) => Ok(self.expand_children(&fragment.children)),
                JSXChild::ExpressionContainer(container) => match &container.expression {
                    JSXExpression::EmptyExpression(_) => continue,
                    other => match other.as_expression() {
                        Some(expr) => self.expand_expression(expr),
                        None => continue,
                    },
                },
                JSXChild::Spread(_) => unbuildable("spread children are not supported"),
            };
            match expanded {
                Ok(children) => out.extend(children),
                Err(Unbuildable(reason)) => log::debug!("Omitting child: {}", reason),
            }
        }
        out
    }

    /// Resolve a child expression into zero or more concrete children
    fn expand_expression(&mut self, expr: &Expression<'_>) -> Built<Vec<Child>> {
        match expr {
            Expression::ParenthesizedExpression(paren) => self.expand_expression(&paren.expression),
            Expression::TSAsExpression(e) => self.expand_expression(&e.expression),
            Expression::TSNonNullExpression(e) => self.expand_expression(&e.expression),
            Expression::JSXElement(element) => Ok(vec![Child::Node(self.element(element)?)]),
            Expression::JSXFragment(fragment) => Ok(self.expand_children(&fragment.children)),
            Expression::LogicalExpression(logical) => {
                let Some(left) = self.evaluator.eval(&logical.left) else {
                    return unbuildable("condition is not a compile-time literal");
                };
                let take_right = match logical.operator {
                    LogicalOperator::And => left.is_truthy(),
                    LogicalOperator::Or => !left.is_truthy(),
                    LogicalOperator::Coalesce => left.is_nullish(),
                };
                if take_right {
                    self.expand_expression(&logical.right)
                } else {
                    literal_children(left)
                }
            }
            Expression::ConditionalExpression(cond) => {
                let Some(test) = self.evaluator.eval(&cond.test) else {
                    return unbuildable("condition is not a compile-time literal");
                };
                if test.is_truthy() {
                    self.expand_expression(&cond.consequent)
                } else {
                    self.expand_expression(&cond.alternate)
                }
            }
            Expression::ArrayExpression(array) => {
                let mut out = Vec::new();
                for element in &array.elements {
                    let Some(expr) = element.as_expression() else {
                        return unbuildable("array children must be plain expressions");
                    };
                    out.extend(self.expand_expression(expr)?);
                }
                Ok(out)
            }
            Expression::CallExpression(call) => {
                let Expression::StaticMemberExpression(member) = &call.callee else {
                    return unbuildable("only .map calls are evaluated");
                };
                if member.property.name.as_str() != "map" {
                    return unbuildable(format!(".{} calls are not evaluated", member.property.name.as_str()));
                }
                let Some(Literal::Array(items)) = self.evaluator.eval(&member.object) else {
                    return unbuildable(".map requires a literal array");
                };
                let Some(callback) = call
                    .arguments
                    .first()
                    .and_then(|arg| arg.as_expression())
                    .and_then(callback_of)
                else {
                    return unbuildable(".map requires an inline callback");
                };

                let mut out = Vec::new();
                for (index, item) in items.iter().enumerate() {
                    out.extend(self.with_callback(&callback, item, index)?);
                }
                Ok(out)
            }
            other => match self.evaluator.eval(other) {
                Some(literal) => literal_children(literal),
                None => unbuildable("expression is not a compile-time literal"),
            },
        }
    }

    /// Run a callback body once with `item` (and optionally its index) bound
    fn with_callback(
        &mut self,
        callback: &Callback<'_, '_>,
        item: &Literal,
        index: usize,
    ) -> Built<Vec<Child>> {
        let mut frame = IndexMap::new();
        for (position, param) in callback.params.items.iter().enumerate() {
            let Some(name) = binding_name(&param.pattern) else {
                return unbuildable("destructured callback parameters are not supported");
            };
            let value = match position {
                0 => item.clone(),
                1 => Literal::Number(index as f64),
                _ => Literal::Undefined,
            };
            frame.insert(name, value);
        }

        self.evaluator.push_scope(frame);
        let result = if callback.expression_body {
            match callback.body.statements.first() {
                Some(Statement::ExpressionStatement(stmt)) => self.expand_expression(&stmt.expression),
                _ => unbuildable("unexpected callback body"),
            }
        } else {
            self.run_statements(&callback.body.statements)
        };
        self.evaluator.pop_scope();
        result
    }

    /// Block body: `const` declarations followed by a `return`
    fn run_statements(&mut self, statements: &[Statement<'_>]) -> Built<Vec<Child>> {
        let Some((first, rest)) = statements.split_first() else {
            return Ok(Vec::new());
        };
        match first {
            Statement::VariableDeclaration(decl) => {
                self.evaluator.push_scope(IndexMap::new());
                let result = decl
                    .declarations
                    .iter()
                    .try_for_each(|declarator| self.declare(declarator))
                    .and_then(|()| self.run_statements(rest));
                self.evaluator.pop_scope();
                result
            }
            Statement::ReturnStatement(ret) => match &ret.argument {
                Some(argument) => self.expand_expression(argument),
                None => Ok(Vec::new()),
            },
            Statement::EmptyStatement(_) => self.run_statements(rest),
            _ => unbuildable("callback bodies may only declare constants and return"),
        }
    }

    /// Bind one declarator in the innermost frame; later declarators see it
    fn declare(&mut self, declarator: &VariableDeclarator<'_>) -> Built<()> {
        let Some(name) = binding_name(&declarator.id) else {
            return unbuildable("destructuring is not supported");
        };
        let value = match &declarator.init {
            Some(init) => match self.evaluator.eval(init) {
                Some(value) => value,
                None => return unbuildable(format!("'{}' is not a compile-time literal", name)),
            },
            None => Literal::Undefined,
        };
        self.evaluator.bind(name, value);
        Ok(())
    }

    /// Open a frame holding the literal `const` declarations of a function
    /// body; pair with [`NodeBuilder::leave_function_body`]
    pub fn enter_function_body(&mut self, statements: &[Statement<'_>]) {
        self.evaluator.push_scope(IndexMap::new());
        for statement in statements {
            let Statement::VariableDeclaration(decl) = statement else {
                continue;
            };
            if decl.kind != VariableDeclarationKind::Const {
                continue;
            }
            for declarator in &decl.declarations {
                if let Err(Unbuildable(reason)) = self.declare(declarator) {
                    log::debug!("Leaving constant unbound: {}", reason);
                }
            }
        }
    }

    pub fn leave_function_body(&mut self) {
        self.evaluator.pop_scope();
    }

    /// Text content of a `Text` element; unresolvable content yields ""
    fn text_content(&self, children: &[JSXChild<'_>]) -> TextContent {
        let mut parts: Vec<Literal> = Vec::new();
        for child in children {
            match child {
                JSXChild::Text(text) => {
                    let text = normalize_jsx_text(text.value.as_str());
                    if !text.is_empty() {
                        parts.push(Literal::String(text));
                    }
                }
                JSXChild::ExpressionContainer(container) => {
                    let Some(expr) = container.expression.as_expression() else {
                        continue;
                    };
                    match self.evaluator.eval(expr) {
                        Some(literal @ (Literal::String(_) | Literal::Number(_))) => parts.push(literal),
                        Some(Literal::Bool(_) | Literal::Null | Literal::Undefined) => {}
                        _ => {
                            log::debug!("Text content is not a compile-time literal");
                            return TextContent::String(String::new());
                        }
                    }
                }
                _ => {
                    log::debug!("Text content contains markup");
                    return TextContent::String(String::new());
                }
            }
        }

        match parts.as_slice() {
            [Literal::Number(n)] => TextContent::Number(*n),
            _ => TextContent::String(parts.iter().map(Literal::to_js_string).collect()),
        }
    }
}

fn callback_of<'b, 'a>(expr: &'b Expression<'a>) -> Option<Callback<'b, 'a>> {
    match expr {
        Expression::ParenthesizedExpression(paren) => callback_of(&paren.expression),
        Expression::ArrowFunctionExpression(arrow) => Some(Callback {
            params: &arrow.params,
            body: &arrow.body,
            expression_body: arrow.expression,
        }),
        Expression::FunctionExpression(func) => Some(Callback {
            params: &func.params,
            body: func.body.as_ref()?,
            expression_body: false,
        }),
        _ => None,
    }
}

/// Identifier of a non-literal `renderItem`, e.g. `renderRow`
fn template_name(source: &str, expr: &Expression<'_>) -> String {
    match expr {
        Expression::Identifier(ident) => ident.name.as_str().to_string(),
        other => span_text(source, other.span()).to_string(),
    }
}

/// Plain binding name from `item`, `item?: string` or `item = 1`
fn binding_name(pattern: &BindingPattern<'_>) -> Option<String> {
    pattern.get_identifier_name().map(|name| name.as_str().to_string())
}

/// Children produced by a literal in child position
fn literal_children(literal: Literal) -> Built<Vec<Child>> {
    match literal {
        Literal::Undefined | Literal::Null | Literal::Bool(_) => Ok(Vec::new()),
        Literal::String(s) => Ok(vec![Child::Text(TextContent::String(s))]),
        Literal::Number(n) => Ok(vec![Child::Text(TextContent::Number(n))]),
        Literal::Array(items) => {
            let mut out = Vec::new();
            for item in items {
                out.extend(literal_children(item)?);
            }
            Ok(out)
        }
        Literal::Object(_) => unbuildable("objects cannot be rendered as children"),
    }
}

/// JSX whitespace: trim each line, drop blank lines, join with spaces
pub fn normalize_jsx_text(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let last = lines.len().saturating_sub(1);
    let mut out: Vec<&str> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let mut line = *line;
        if i != 0 {
            line = line.trim_start_matches([' ', '\t']);
        }
        if i != last {
            line = line.trim_end_matches([' ', '\t']);
        }
        if !line.is_empty() {
            out.push(line);
        }
    }
    if lines.len() > 1 {
        out.join(" ")
    } else {
        out.concat()
    }
}

fn parse_action(map: &IndexMap<String, Literal>) -> Option<Action> {
    let raw_type = map.get("type").and_then(Literal::as_str).unwrap_or("");
    let Some(action_type) = ActionType::parse(raw_type) else {
        log::warn!("Ignoring action with unsupported type {:?}", raw_type);
        return None;
    };

    let params = match map.get("params") {
        Some(Literal::Object(params)) => {
            let mut out = IndexMap::new();
            for (name, value) in params {
                match value {
                    Literal::String(_) | Literal::Number(_) | Literal::Bool(_) => {
                        out.insert(name.clone(), value.to_json());
                    }
                    other => log::warn!("Ignoring action param '{}' of type {}", name, other.type_name()),
                }
            }
            Some(out)
        }
        _ => None,
    };

    Some(Action {
        action_type,
        url: map.get("url").and_then(Literal::as_text),
        params,
        app_id: map.get("appId").and_then(Literal::as_text),
    })
}

fn parse_data_binding(map: &IndexMap<String, Literal>) -> Option<DataBinding> {
    let raw_source = map.get("source").and_then(Literal::as_str).unwrap_or("");
    let Some(source) = BindingSource::parse(raw_source) else {
        log::warn!("Ignoring dataBinding with unsupported source {:?}", raw_source);
        return None;
    };
    let Some(key) = map.get("key").and_then(Literal::as_text) else {
        log::warn!("Ignoring dataBinding without a key");
        return None;
    };
    Some(DataBinding {
        source,
        key,
        fallback: map.get("fallback").map(Literal::to_json),
        transform: map.get("transform").and_then(Literal::as_text),
    })
}
