//! Static evaluation of a restricted expression subset
//!
//! Generated widgets have no script runtime, so every value that reaches the
//! IR must be known at compile time. The evaluator folds literals, template
//! literals, ternaries, logical and arithmetic operators, array and object
//! literals, and reads of variables bound by the node builder (`.map` loop
//! variables and `const` declarations of the enclosing function body). Anything else evaluates to `None` and the caller decides how
//! to degrade.

use crate::value::{format_js_number, Literal};
use indexmap::IndexMap;
use oxc_ast::ast::{
    ArrayExpressionElement, BinaryOperator, Expression, LogicalOperator, ObjectPropertyKind,
    PropertyKey, TemplateLiteral, UnaryOperator,
};
use std::cmp::Ordering;

/// Lexical bindings visible to the evaluator, innermost frame last
#[derive(Debug, Clone, Default)]
pub struct Scope {
    frames: Vec<IndexMap<String, Literal>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: IndexMap<String, Literal>) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Bind `name` in the innermost frame, opening one if the stack is empty
    pub fn bind(&mut self, name: String, value: Literal) {
        if self.frames.is_empty() {
            self.frames.push(IndexMap::new());
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name, value);
        }
    }

    /// Search from the innermost frame outwards
    pub fn lookup(&self, name: &str) -> Option<&Literal> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }
}

#[derive(Debug, Default)]
pub struct Evaluator {
    scope: Scope,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn push_scope(&mut self, frame: IndexMap<String, Literal>) {
        self.scope.push(frame);
    }

    pub fn pop_scope(&mut self) {
        self.scope.pop();
    }

    pub fn bind(&mut self, name: String, value: Literal) {
        self.scope.bind(name, value);
    }

    pub fn eval(&self, expr: &Expression<'_>) -> Option<Literal> {
        match expr {
            Expression::StringLiteral(lit) => Some(Literal::String(lit.value.as_str().to_string())),
            Expression::NumericLiteral(lit) => Some(Literal::Number(lit.value)),
            Expression::BooleanLiteral(lit) => Some(Literal::Bool(lit.value)),
            Expression::NullLiteral(_) => Some(Literal::Null),
            Expression::TemplateLiteral(template) => self.eval_template(template).map(Literal::String),
            Expression::Identifier(ident) => {
                let name = ident.name.as_str();
                match self.scope.lookup(name) {
                    Some(value) => Some(value.clone()),
                    None => match name {
                        "undefined" => Some(Literal::Undefined),
                        "NaN" => Some(Literal::Number(f64::NAN)),
                        "Infinity" => Some(Literal::Number(f64::INFINITY)),
                        _ => None,
                    },
                }
            }
            Expression::ParenthesizedExpression(paren) => self.eval(&paren.expression),
            Expression::TSAsExpression(e) => self.eval(&e.expression),
            Expression::TSSatisfiesExpression(e) => self.eval(&e.expression),
            Expression::TSNonNullExpression(e) => self.eval(&e.expression),
            Expression::UnaryExpression(unary) => {
                let value = self.eval(&unary.argument)?;
                match unary.operator {
                    UnaryOperator::LogicalNot => Some(Literal::Bool(!value.is_truthy())),
                    UnaryOperator::UnaryNegation => Some(Literal::Number(-value.to_number())),
                    UnaryOperator::UnaryPlus => Some(Literal::Number(value.to_number())),
                    UnaryOperator::Typeof => Some(Literal::String(typeof_name(&value).to_string())),
                    UnaryOperator::Void => Some(Literal::Undefined),
                    _ => None,
                }
            }
            Expression::LogicalExpression(logical) => {
                let left = self.eval(&logical.left)?;
                match logical.operator {
                    LogicalOperator::And => {
                        if left.is_truthy() {
                            self.eval(&logical.right)
                        } else {
                            Some(left)
                        }
                    }
                    LogicalOperator::Or => {
                        if left.is_truthy() {
                            Some(left)
                        } else {
                            self.eval(&logical.right)
                        }
                    }
                    LogicalOperator::Coalesce => {
                        if left.is_nullish() {
                            self.eval(&logical.right)
                        } else {
                            Some(left)
                        }
                    }
                }
            }
            Expression::BinaryExpression(binary) => {
                let left = self.eval(&binary.left)?;
                let right = self.eval(&binary.right)?;
                eval_binary(binary.operator, &left, &right)
            }
            Expression::ConditionalExpression(cond) => {
                if self.eval(&cond.test)?.is_truthy() {
                    self.eval(&cond.consequent)
                } else {
                    self.eval(&cond.alternate)
                }
            }
            Expression::ArrayExpression(array) => {
                let mut items = Vec::with_capacity(array.elements.len());
                for element in &array.elements {
                    match element {
                        ArrayExpressionElement::SpreadElement(spread) => {
                            match self.eval(&spread.argument)? {
                                Literal::Array(inner) => items.extend(inner),
                                _ => return None,
                            }
                        }
                        ArrayExpressionElement::Elision(_) => items.push(Literal::Undefined),
                        other => items.push(self.eval(other.as_expression()?)?),
                    }
                }
                Some(Literal::Array(items))
            }
            Expression::ObjectExpression(object) => {
                let mut map = IndexMap::new();
                for property in &object.properties {
                    match property {
                        ObjectPropertyKind::ObjectProperty(prop) => {
                            if prop.computed || prop.method {
                                return None;
                            }
                            let key = property_key_name(&prop.key)?;
                            let value = self.eval(&prop.value)?;
                            map.insert(key, value);
                        }
                        ObjectPropertyKind::SpreadProperty(spread) => {
                            match self.eval(&spread.argument)? {
                                Literal::Object(inner) => map.extend(inner),
                                Literal::Null | Literal::Undefined => {}
                                _ => return None,
                            }
                        }
                    }
                }
                Some(Literal::Object(map))
            }
            Expression::StaticMemberExpression(member) => {
                let object = self.eval(&member.object)?;
                if object.is_nullish() {
                    return member.optional.then_some(Literal::Undefined);
                }
                read_property(&object, member.property.name.as_str())
            }
            Expression::ComputedMemberExpression(member) => {
                let object = self.eval(&member.object)?;
                if object.is_nullish() {
                    return member.optional.then_some(Literal::Undefined);
                }
                let key = self.eval(&member.expression)?;
                let key = match key {
                    Literal::Number(n) => format_js_number(n),
                    Literal::String(s) => s,
                    _ => return None,
                };
                read_property(&object, &key)
            }
            _ => None,
        }
    }

    /// Fold a template literal; every interpolation must evaluate
    pub fn eval_template(&self, template: &TemplateLiteral<'_>) -> Option<String> {
        let mut out = String::new();
        for (i, quasi) in template.quasis.iter().enumerate() {
            let part = quasi.value.cooked.as_ref().unwrap_or(&quasi.value.raw);
            out.push_str(part.as_str());
            if let Some(expr) = template.expressions.get(i) {
                out.push_str(&self.eval(expr)?.to_js_string());
            }
        }
        Some(out)
    }
}

pub fn property_key_name(key: &PropertyKey<'_>) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.as_str().to_string()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.as_str().to_string()),
        PropertyKey::NumericLiteral(lit) => Some(format_js_number(lit.value)),
        _ => None,
    }
}

fn read_property(object: &Literal, key: &str) -> Option<Literal> {
    match object {
        Literal::Object(map) => Some(map.get(key).cloned().unwrap_or(Literal::Undefined)),
        Literal::Array(items) => {
            if key == "length" {
                return Some(Literal::Number(items.len() as f64));
            }
            match key.parse::<usize>() {
                Ok(index) => Some(items.get(index).cloned().unwrap_or(Literal::Undefined)),
                Err(_) => None,
            }
        }
        Literal::String(s) if key == "length" => Some(Literal::Number(s.encode_utf16().count() as f64)),
        _ => None,
    }
}

fn typeof_name(value: &Literal) -> &'static str {
    match value {
        Literal::Undefined => "undefined",
        Literal::Null | Literal::Array(_) | Literal::Object(_) => "object",
        Literal::Bool(_) => "boolean",
        Literal::Number(_) => "number",
        Literal::String(_) => "string",
    }
}

fn eval_binary(operator: BinaryOperator, left: &Literal, right: &Literal) -> Option<Literal> {
    let number = |f: fn(f64, f64) -> f64| Some(Literal::Number(f(left.to_number(), right.to_number())));
    match operator {
        BinaryOperator::Addition => {
            let stringy = |v: &Literal| {
                matches!(v, Literal::String(_) | Literal::Array(_) | Literal::Object(_))
            };
            if stringy(left) || stringy(right) {
                Some(Literal::String(format!(
                    "{}{}",
                    left.to_js_string(),
                    right.to_js_string()
                )))
            } else {
                number(|a, b| a + b)
            }
        }
        BinaryOperator::Subtraction => number(|a, b| a - b),
        BinaryOperator::Multiplication => number(|a, b| a * b),
        BinaryOperator::Division => number(|a, b| a / b),
        BinaryOperator::Remainder => number(|a, b| a % b),
        BinaryOperator::Exponential => number(f64::powf),
        BinaryOperator::StrictEquality => strict_equals(left, right).map(Literal::Bool),
        BinaryOperator::StrictInequality => strict_equals(left, right).map(|eq| Literal::Bool(!eq)),
        BinaryOperator::Equality => loose_equals(left, right).map(Literal::Bool),
        BinaryOperator::Inequality => loose_equals(left, right).map(|eq| Literal::Bool(!eq)),
        BinaryOperator::LessThan => Some(Literal::Bool(compare(left, right) == Some(Ordering::Less))),
        BinaryOperator::GreaterThan => {
            Some(Literal::Bool(compare(left, right) == Some(Ordering::Greater)))
        }
        BinaryOperator::LessEqualThan => Some(Literal::Bool(matches!(
            compare(left, right),
            Some(Ordering::Less | Ordering::Equal)
        ))),
        BinaryOperator::GreaterEqualThan => Some(Literal::Bool(matches!(
            compare(left, right),
            Some(Ordering::Greater | Ordering::Equal)
        ))),
        _ => None,
    }
}

/// `===`; `None` when identity of arrays or objects would decide the answer
fn strict_equals(left: &Literal, right: &Literal) -> Option<bool> {
    match (left, right) {
        (Literal::Undefined, Literal::Undefined) | (Literal::Null, Literal::Null) => Some(true),
        (Literal::Bool(a), Literal::Bool(b)) => Some(a == b),
        (Literal::Number(a), Literal::Number(b)) => Some(a == b),
        (Literal::String(a), Literal::String(b)) => Some(a == b),
        (Literal::Array(_) | Literal::Object(_), Literal::Array(_) | Literal::Object(_)) => None,
        _ => Some(false),
    }
}

fn loose_equals(left: &Literal, right: &Literal) -> Option<bool> {
    match (left, right) {
        (a, b) if a.is_nullish() && b.is_nullish() => Some(true),
        (a, b) if a.is_nullish() || b.is_nullish() => Some(false),
        (Literal::Array(_) | Literal::Object(_), _) | (_, Literal::Array(_) | Literal::Object(_)) => {
            None
        }
        (Literal::String(a), Literal::String(b)) => Some(a == b),
        (a, b) => Some(a.to_number() == b.to_number()),
    }
}

fn compare(left: &Literal, right: &Literal) -> Option<Ordering> {
    match (left, right) {
        (Literal::String(a), Literal::String(b)) => Some(a.cmp(b)),
        _ => left.to_number().partial_cmp(&right.to_number()),
    }
}
