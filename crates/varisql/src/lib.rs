//! Public API facade for VariSQL.
//!
//! VariSQL converts SQL text into an AST and renders any AST node back to
//! canonical SQL. Parsing is parameterised by a [`Dialect`]; rendering and
//! traversal are dialect-free because the AST captures every dialect-
//! specific surface form at parse time.
//!
//! ```
//! use varisql::{parse, render, GenericDialect};
//!
//! let statements = parse("SELECT a, b FROM t WHERE a > 1", &GenericDialect).unwrap();
//! assert_eq!(render(&statements[0]), "SELECT a, b FROM t WHERE a > 1");
//! ```

use std::fmt;

pub use varisql_ast as ast;
pub use varisql_ast::visit;
pub use varisql_ast::{Expr, Statement};
pub use varisql_parser::{
    Dialect, GenericDialect, Keyword, Lexer, Parser, ParserError, Token, TokenKind,
    TokenizerError,
};

/// Parse a SQL source into its sequence of statements.
pub fn parse(sql: &str, dialect: &dyn Dialect) -> Result<Vec<Statement>, ParserError> {
    Parser::parse_sql(dialect, sql)
}

/// Parse a source holding exactly one expression.
pub fn parse_expr(sql: &str, dialect: &dyn Dialect) -> Result<Expr, ParserError> {
    let tokens = Lexer::new(sql, dialect).tokenize()?;
    let mut parser = Parser::new(tokens, dialect);
    let expr = parser.parse_expr()?;
    parser.expect_eof()?;
    Ok(expr)
}

/// Render an AST node as canonical SQL text.
pub fn render<N: fmt::Display>(node: &N) -> String {
    node.to_string()
}
