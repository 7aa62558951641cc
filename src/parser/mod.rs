//! Go source adapter over tree-sitter.
//!
//! Parses a Go file into a [`ParsedUnit`]: the concrete syntax tree plus a flat
//! arena of top-level declarations. Every declaration carries its leading doc
//! comment and same-line trailing comment as explicit fields, so later stages
//! never have to guess comment ownership from positions.

mod comments;

use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

/// Byte and row range of a piece of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub start_row: usize,
    pub end_row: usize,
}

impl Span {
    fn of(node: Node) -> Self {
        Self {
            start: node.start_byte(),
            end: node.end_byte(),
            start_row: node.start_position().row,
            end_row: node.end_position().row,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        let (first, last) = if self.start <= other.start {
            (self, other)
        } else {
            (other, self)
        };
        Span {
            start: first.start,
            end: last.end.max(first.end),
            start_row: first.start_row,
            end_row: last.end_row.max(first.end_row),
        }
    }
}

/// A run of adjacent comments with no blank line between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentBlock {
    pub span: Span,
    pub count: usize,
}

/// Syntactic category of a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Package,
    Import,
    Type,
    Const,
    Var,
    Function,
    Method,
    /// Freestanding comment group owned by no declaration
    Comment,
    Other,
}

impl DeclKind {
    fn from_node_kind(kind: &str) -> Self {
        match kind {
            "package_clause" => Self::Package,
            "import_declaration" => Self::Import,
            "type_declaration" => Self::Type,
            "const_declaration" => Self::Const,
            "var_declaration" => Self::Var,
            "function_declaration" => Self::Function,
            "method_declaration" => Self::Method,
            "comment" => Self::Comment,
            _ => Self::Other,
        }
    }
}

/// Index of a declaration in a [`ParsedUnit`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclHandle(pub(crate) usize);

impl DeclHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One top-level declaration (or freestanding comment group).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLevelDecl {
    pub kind: DeclKind,
    /// Position among the source file's named children (first node of a
    /// comment group)
    pub node_index: usize,
    /// The declaration node itself, comments excluded
    pub span: Span,
    pub doc: Option<CommentBlock>,
    pub trailing: Option<CommentBlock>,
}

impl TopLevelDecl {
    /// Span including the doc comment and the trailing comment.
    pub fn full_span(&self) -> Span {
        let mut span = self.span;
        if let Some(doc) = self.doc {
            span = doc.span.cover(span);
        }
        if let Some(trailing) = self.trailing {
            span = span.cover(trailing.span);
        }
        span
    }
}

/// A parsed Go compilation unit.
pub struct ParsedUnit {
    path: PathBuf,
    source: String,
    tree: Tree,
    decls: Vec<TopLevelDecl>,
}

impl std::fmt::Debug for ParsedUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedUnit")
            .field("path", &self.path)
            .field("decls", &self.decls.len())
            .finish()
    }
}

impl ParsedUnit {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn decls(&self) -> &[TopLevelDecl] {
        &self.decls
    }

    pub fn decl(&self, handle: DeclHandle) -> &TopLevelDecl {
        &self.decls[handle.0]
    }

    pub fn handles(&self) -> impl Iterator<Item = DeclHandle> + '_ {
        (0..self.decls.len()).map(DeclHandle)
    }

    /// Syntax node of a declaration. Comment groups resolve to their first
    /// comment node.
    pub fn node(&self, handle: DeclHandle) -> Option<Node<'_>> {
        self.tree
            .root_node()
            .named_child(self.decls[handle.0].node_index)
    }

    pub fn text(&self, span: Span) -> &str {
        &self.source[span.start..span.end]
    }

    /// Source text of a node, empty when the bytes are not valid UTF-8.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }
}

/// Reusable tree-sitter parser configured for Go.
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| Error::Invariant(format!("failed to load Go grammar: {e}")))?;
        Ok(Self { parser })
    }

    /// Parse `source` into a declaration arena. Any syntax error rejects the
    /// whole file.
    pub fn parse(&mut self, path: impl Into<PathBuf>, source: String) -> Result<ParsedUnit> {
        let path = path.into();
        let tree = self
            .parser
            .parse(&source, None)
            .ok_or_else(|| Error::parse(&path, 1, 1, "parser produced no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            let (line, column, message) = first_error(root);
            return Err(Error::parse(&path, line, column, message));
        }

        let decls = comments::associate(root);
        log::debug!(
            "Parsed {}: {} top-level declarations",
            path.display(),
            decls.len()
        );

        Ok(ParsedUnit {
            path,
            source,
            tree,
            decls,
        })
    }
}

/// Parse a single source text with a fresh parser.
pub fn parse_source(path: impl Into<PathBuf>, source: impl Into<String>) -> Result<ParsedUnit> {
    GoParser::new()?.parse(path, source.into())
}

fn first_error(root: Node) -> (usize, usize, String) {
    let mut cursor = root.walk();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            let message = if node.is_missing() {
                format!("missing {}", node.kind())
            } else {
                "syntax error".to_string()
            };
            return (pos.row + 1, pos.column + 1, message);
        }
        if node.has_error() {
            let children: Vec<Node> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    (1, 1, "syntax error".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_parse_classifies_top_level_declarations() {
        let unit = parse_source(
            "a.go",
            indoc! {r#"
                package a

                import "fmt"

                const limit = 3

                var debug = false

                type Server struct{}

                func New() *Server { return &Server{} }

                func (s *Server) Start() { fmt.Println(limit) }
            "#},
        )
        .unwrap();

        let kinds: Vec<DeclKind> = unit.decls().iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DeclKind::Package,
                DeclKind::Import,
                DeclKind::Const,
                DeclKind::Var,
                DeclKind::Type,
                DeclKind::Function,
                DeclKind::Method,
            ]
        );
    }

    #[test]
    fn test_parse_rejects_syntax_errors() {
        let err = parse_source("broken.go", "package a\n\nfunc (s *S) Start( {\n").unwrap_err();
        match err {
            Error::Parse { file, line, .. } => {
                assert_eq!(file, PathBuf::from("broken.go"));
                assert!(line >= 3);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_node_handle_resolves_declaration() {
        let unit = parse_source(
            "a.go",
            "package a\n\ntype T int\n\nfunc (t T) Value() int { return int(t) }\n",
        )
        .unwrap();
        let method = unit
            .handles()
            .find(|h| unit.decl(*h).kind == DeclKind::Method)
            .unwrap();
        let node = unit.node(method).unwrap();
        assert_eq!(node.kind(), "method_declaration");
        let name = node.child_by_field_name("name").unwrap();
        assert_eq!(unit.node_text(name), "Value");
    }
}
