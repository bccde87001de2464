//! Structural validation of IR roots
//!
//! Serde enforces the shape of the data (variant tags, enum spellings, field
//! types). This module enforces everything serde cannot: numeric ranges,
//! per-key style kinds, non-empty identifiers. Every violation is collected
//! so a rejected root reports all of its problems at once.

use crate::error::{CompilerError, Result, ValidationIssue};
use crate::ir::{IrRoot, Node, NodeKind, TimelinePolicy, IR_VERSION};
use crate::style::{
    BorderStyle, ColorStyle, LayoutStyle, NormalizedStyle, ShadowStyle, StyleValue,
    TypographyStyle, ValueKind,
};

/// Validate a fully built root
pub fn validate_root(root: &IrRoot) -> Result<()> {
    let issues = collect_issues(root);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(CompilerError::validation(display_id(&root.root_id), issues))
    }
}

/// Check a root and return every violation found
pub fn collect_issues(root: &IrRoot) -> Vec<ValidationIssue> {
    let mut validator = Validator::default();
    validator.check_root(root);
    validator.issues
}

/// Decode and validate a root read from JSON
pub fn validate_root_json(value: serde_json::Value) -> Result<IrRoot> {
    let root_id = value
        .get("rootId")
        .and_then(|v| v.as_str())
        .unwrap_or("<unknown>")
        .to_string();

    if let Some(found) = value.get("version").and_then(|v| v.as_u64()) {
        if found != u64::from(IR_VERSION) {
            return Err(CompilerError::UnsupportedVersion {
                root_id,
                found,
                expected: IR_VERSION,
            });
        }
    }

    let root: IrRoot = serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        let path = if path == "." { String::new() } else { path };
        CompilerError::validation(
            root_id.clone(),
            vec![ValidationIssue::new(path, err.inner().to_string())],
        )
    })?;

    validate_root(&root)?;
    Ok(root)
}

/// Parse root JSON text and validate it
pub fn parse_root(text: &str) -> Result<IrRoot> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    validate_root_json(value)
}

fn display_id(root_id: &str) -> String {
    if root_id.is_empty() {
        "<unnamed>".to_string()
    } else {
        root_id.to_string()
    }
}

#[derive(Default)]
struct Validator {
    issues: Vec<ValidationIssue>,
}

impl Validator {
    fn issue(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new(path, message));
    }

    fn check_root(&mut self, root: &IrRoot) {
        if root.version != IR_VERSION {
            self.issue("version", format!("expected {}, found {}", IR_VERSION, root.version));
        }
        if root.root_id.trim().is_empty() {
            self.issue("rootId", "must not be empty");
        }

        self.check_node("tree", &root.tree);

        if let Some(widget) = &root.widget {
            if widget.kind.trim().is_empty() {
                self.issue("widget.kind", "must not be empty");
            }
            if widget.families.is_empty() {
                self.issue("widget.families", "must list at least one family");
            }
            if let Some(timeline) = &widget.timeline {
                if let Some(TimelinePolicy::Custom(custom)) = &timeline.policy {
                    if !(custom.minutes.is_finite() && custom.minutes > 0.0) {
                        self.issue(
                            "widget.timeline.policy.minutes",
                            "must be a positive number",
                        );
                    }
                }
                for (i, entry) in timeline.entries.iter().flatten().enumerate() {
                    if entry.date.trim().is_empty() {
                        self.issue(format!("widget.timeline.entries.{}.date", i), "must not be empty");
                    }
                }
            }
        }

        if let Some(activity) = &root.live_activity {
            if activity.activity_type.trim().is_empty() {
                self.issue("liveActivity.activityType", "must not be empty");
            }
            if let Some(score) = activity.relevance_score {
                if !score.is_finite() {
                    self.issue("liveActivity.relevanceScore", "must be a finite number");
                }
            }
            for (path, node) in activity.region_nodes() {
                self.check_node(&format!("liveActivity.{}", path), node);
            }
        }

        if let Some(provider) = &root.data_provider {
            if let Some(interval) = provider.refresh_interval {
                if !(interval.is_finite() && interval >= 0.0) {
                    self.issue("dataProvider.refreshInterval", "must be a non-negative number");
                }
            }
        }
    }

    fn check_node(&mut self, path: &str, node: &Node) {
        match &node.kind {
            NodeKind::View { children } | NodeKind::Stack { children, .. } => {
                for (i, child) in children.iter().enumerate() {
                    self.check_node(&format!("{}.children.{}", path, i), child);
                }
            }
            NodeKind::Text { text } => {
                if let crate::ir::TextContent::Number(n) = text {
                    if !n.is_finite() {
                        self.issue(format!("{}.text", path), "must be a finite number");
                    }
                }
            }
            NodeKind::ProgressBar { progress, .. } => {
                if !(progress.is_finite() && (0.0..=1.0).contains(progress)) {
                    self.issue(
                        format!("{}.progress", path),
                        format!("must be between 0 and 1, found {}", progress),
                    );
                }
            }
            NodeKind::Spacer { flex: Some(flex) } => {
                if !flex.is_finite() {
                    self.issue(format!("{}.flex", path), "must be a finite number");
                }
            }
            NodeKind::List { render_item, .. } => {
                if render_item.trim().is_empty() {
                    self.issue(format!("{}.renderItem", path), "must not be empty");
                }
            }
            NodeKind::Spacer { flex: None } | NodeKind::Button { .. } | NodeKind::Image { .. } => {}
        }

        if let Some(style) = &node.style {
            self.check_style(&format!("{}.style", path), style);
        }

        if let Some(action) = &node.action {
            for (name, value) in action.params.iter().flatten() {
                if !(value.is_string() || value.is_number() || value.is_boolean()) {
                    self.issue(
                        format!("{}.action.params.{}", path, name),
                        "must be a string, number or boolean",
                    );
                }
            }
        }

        if let Some(binding) = &node.data_binding {
            if binding.key.trim().is_empty() {
                self.issue(format!("{}.dataBinding.key", path), "must not be empty");
            }
        }
    }

    fn check_style(&mut self, path: &str, style: &NormalizedStyle) {
        if let Some(bucket) = &style.layout {
            self.check_bucket(&format!("{}.layout", path), bucket.entries(), LayoutStyle::KEYS);
        }
        if let Some(bucket) = &style.typography {
            self.check_bucket(
                &format!("{}.typography", path),
                bucket.entries(),
                TypographyStyle::KEYS,
            );
        }
        if let Some(bucket) = &style.colors {
            self.check_bucket(&format!("{}.colors", path), bucket.entries(), ColorStyle::KEYS);
        }
        if let Some(bucket) = &style.borders {
            self.check_bucket(&format!("{}.borders", path), bucket.entries(), BorderStyle::KEYS);
        }
        if let Some(bucket) = &style.shadows {
            self.check_bucket(&format!("{}.shadows", path), bucket.entries(), ShadowStyle::KEYS);
        }
    }

    fn check_bucket(
        &mut self,
        path: &str,
        entries: Vec<(&'static str, &StyleValue)>,
        table: &[(&'static str, ValueKind)],
    ) {
        for (key, value) in entries {
            let Some((_, kind)) = table.iter().find(|(k, _)| *k == key) else {
                continue;
            };
            if let Some(message) = check_kind(*kind, value) {
                self.issue(format!("{}.{}", path, key), message);
            }
        }
    }
}

fn check_kind(kind: ValueKind, value: &StyleValue) -> Option<String> {
    match (kind, value) {
        (ValueKind::Number, StyleValue::Number(n)) if n.is_finite() => None,
        (ValueKind::Number, _) => Some("expected number".to_string()),
        (ValueKind::Fraction, StyleValue::Number(n)) if (0.0..=1.0).contains(n) => None,
        (ValueKind::Fraction, _) => Some("expected number between 0 and 1".to_string()),
        (ValueKind::Text, StyleValue::Text(_)) => None,
        (ValueKind::Text, _) => Some("expected string".to_string()),
        (ValueKind::OneOf(allowed), StyleValue::Text(s)) if allowed.contains(&s.as_str()) => None,
        (ValueKind::OneOf(allowed), _) => Some(format!(
            "expected one of {}",
            allowed
                .iter()
                .map(|a| format!("'{}'", a))
                .collect::<Vec<_>>()
                .join(", ")
        )),
    }
}
