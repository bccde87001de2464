//! Front end: JSX/TSX source text to an oxc syntax tree

use crate::error::{CompilerError, Result};
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::{SourceType, Span};
use std::path::Path;

/// Doc marker selecting the live-activity path
pub const ACTIVITY_MARKER: &str = "@brik-activity";

/// Doc marker flagging a plain root as a home-screen widget
pub const WIDGET_MARKER: &str = "@brik-widget";

/// Source type from the file extension, TSX when unknown
pub fn source_type_for(file: &str) -> SourceType {
    SourceType::from_path(Path::new(file)).unwrap_or_else(|_| SourceType::tsx())
}

/// Parse one file. Any syntax error fails the whole file.
pub fn parse_source<'a>(allocator: &'a Allocator, file: &str, text: &'a str) -> Result<Program<'a>> {
    let ret = Parser::new(allocator, text, source_type_for(file)).parse();

    if ret.panicked || !ret.errors.is_empty() {
        let message = ret
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        let message = if message.is_empty() {
            "unrecoverable syntax error".to_string()
        } else {
            message
        };
        return Err(CompilerError::parse(file, message));
    }

    Ok(ret.program)
}

pub fn span_text(text: &str, span: Span) -> &str {
    text.get(span.start as usize..span.end as usize).unwrap_or("")
}

/// Block comment that ends right before `offset`, separated only by whitespace
pub fn leading_doc_comment(text: &str, offset: u32) -> Option<&str> {
    let before = text.get(..offset as usize)?.trim_end();
    let body_end = before.strip_suffix("*/")?;
    let start = body_end.rfind("/*")?;
    Some(&before[start..])
}

pub fn has_marker(text: &str, offset: u32, marker: &str) -> bool {
    leading_doc_comment(text, offset).is_some_and(|comment| comment.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_tsx() {
        let allocator = Allocator::default();
        let text = "export const A = () => <View><Text>Hi</Text></View>;";
        let program = parse_source(&allocator, "A.tsx", text).unwrap();
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn test_reports_parse_errors() {
        let allocator = Allocator::default();
        let err = parse_source(&allocator, "Broken.tsx", "export const = <View>").unwrap_err();
        assert_eq!(err.code(), "BR002");
        assert!(err.to_string().contains("Broken.tsx"));
    }

    #[test]
    fn test_leading_doc_comment() {
        let text = "/** @brik-activity */\nexport function A() {}";
        let offset = text.find("export").unwrap() as u32;
        assert!(has_marker(text, offset, ACTIVITY_MARKER));
        assert!(!has_marker(text, offset, WIDGET_MARKER));

        let text = "/** @brik-activity */\nconst x = 1;\nexport function A() {}";
        let offset = text.find("export").unwrap() as u32;
        assert!(leading_doc_comment(text, offset).is_none());
    }
}
