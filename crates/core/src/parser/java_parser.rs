use tree_sitter::Parser;

use crate::error::{Error, Result};

/// Thin wrapper around a tree-sitter parser configured for Java
pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .map_err(|e| Error::TreeSitterError(format!("Failed to set language: {e}")))?;
        Ok(Self { parser })
    }

    pub fn parse(&mut self, source: &str) -> Result<tree_sitter::Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| Error::ParseError("Failed to parse source code".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_creation() {
        assert!(JavaParser::new().is_ok());
    }

    #[test]
    fn test_basic_parsing() {
        let mut parser = JavaParser::new().unwrap();
        let source = r#"
public class Hello {
    public static void main(String[] args) {
        System.out.println("Hello, world!");
    }
}
"#;
        let tree = parser.parse(source).unwrap();
        assert_eq!(tree.root_node().kind(), "program");
    }

    #[test]
    fn test_parse_invalid_syntax() {
        let mut parser = JavaParser::new().unwrap();
        // Tree-sitter still produces a tree with error nodes
        let tree = parser.parse("class { int = ;").unwrap();
        assert!(tree.root_node().has_error());
    }
}
