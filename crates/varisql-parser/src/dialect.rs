//! The dialect contract: the value that specialises the generic tokenizer
//! and parser to one SQL variant.
//!
//! A [`Dialect`] bundles three kinds of behaviour:
//!
//! * character classifiers consulted by the tokenizer,
//! * four parser hooks, each of which may take over a parse position or
//!   return `None` to defer to the built-in grammar,
//! * read-only capability flags that gate optional syntax.
//!
//! Everything defaults to conservative behaviour, so a concrete dialect is
//! a thin parameter pack: override only what differs. Dialects must be
//! `Send + Sync` so a single dialect value can serve parses running on
//! multiple threads.

use std::fmt::Debug;
use std::iter::Peekable;
use std::str::Chars;

use varisql_ast::{Expr, Statement};

use crate::parser::{Parser, ParserError};

pub trait Dialect: Debug + Send + Sync {
    // -- Character classifiers ---------------------------------------------

    /// Whether `ch` can start an unquoted identifier.
    fn is_identifier_start(&self, ch: char) -> bool;

    /// Whether `ch` can continue an unquoted identifier.
    fn is_identifier_part(&self, ch: char) -> bool;

    /// Whether `ch` opens a delimited identifier (`"`, `` ` ``, `[`).
    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        ch == '"'
    }

    /// Given the characters following a delimited-identifier start, decide
    /// whether they really form an identifier. Lets a dialect reject quote
    /// characters it uses for something else.
    fn is_proper_identifier_inside_quotes(&self, _chars: Peekable<Chars<'_>>) -> bool {
        true
    }

    /// The quote character this dialect would use to quote `identifier`
    /// when generating SQL, or `None` for no preference.
    fn identifier_quote_style(&self, _identifier: &str) -> Option<char> {
        None
    }

    // -- Parser hooks ------------------------------------------------------

    /// Parse a whole statement. Runs before built-in statement dispatch;
    /// return `None` to defer.
    fn parse_statement(&self, _parser: &mut Parser) -> Option<Result<Statement, ParserError>> {
        None
    }

    /// Parse a prefix (nud) position. Runs before the built-in prefix
    /// grammar; return `None` to defer.
    fn parse_prefix(&self, _parser: &mut Parser) -> Option<Result<Expr, ParserError>> {
        None
    }

    /// Parse an infix position for `expr` at precedence `precedence`. Runs
    /// before the built-in infix grammar; return `None` to defer.
    fn parse_infix(
        &self,
        _parser: &mut Parser,
        _expr: &Expr,
        _precedence: u8,
    ) -> Option<Result<Expr, ParserError>> {
        None
    }

    /// Report a custom precedence for the parser's current token. The
    /// effective precedence is the maximum of this and the built-in table.
    fn get_next_precedence(&self, _parser: &Parser) -> Option<Result<u8, ParserError>> {
        None
    }

    // -- Capability flags --------------------------------------------------

    /// `agg(x) FILTER (WHERE ...)` after aggregate calls.
    fn supports_filter_during_aggregation(&self) -> bool {
        false
    }

    /// `expr IN ()` with an empty list.
    fn supports_in_empty_list(&self) -> bool {
        false
    }

    /// `GROUP BY ROLLUP (..)` / `CUBE (..)` / `GROUPING SETS (..)`.
    fn supports_group_by_expression(&self) -> bool {
        false
    }

    /// `SUBSTRING(s FROM a FOR b)` keyword argument form.
    fn supports_substring_from_for_expression(&self) -> bool {
        false
    }

    /// `CONVERT(type, expr)` argument order instead of `CONVERT(expr, type)`.
    fn convert_type_before_value(&self) -> bool {
        false
    }

    /// Transaction modes after `START TRANSACTION` / `BEGIN`.
    fn supports_start_transaction_modifier(&self) -> bool {
        false
    }

    /// Named function arguments written `name = value`; otherwise only
    /// `name => value` is accepted.
    fn supports_named_function_args_with_eq_operator(&self) -> bool {
        false
    }

    /// Backslash escape sequences inside string literals.
    fn supports_string_literal_backslash_escape(&self) -> bool {
        false
    }

    /// `FROM t MATCH_RECOGNIZE (...)` row-pattern matching.
    fn supports_match_recognize(&self) -> bool {
        false
    }

    /// `{'key': value}` dictionary literals.
    fn supports_dictionary_syntax(&self) -> bool {
        false
    }

    /// `CONNECT BY` hierarchical queries.
    fn supports_connect_by(&self) -> bool {
        false
    }

    /// `OVER window_name` references to a window defined in the WINDOW
    /// clause.
    fn supports_window_clause_named_window_reference(&self) -> bool {
        false
    }

    /// Identifiers may begin with a digit (`1st_column`).
    fn supports_numeric_prefix(&self) -> bool {
        false
    }

    /// `IGNORE NULLS` / `RESPECT NULLS` inside window function arguments.
    fn supports_window_function_null_treatment_arg(&self) -> bool {
        false
    }

    /// `x -> x + 1` lambda arguments. When enabled, `->` after a bare
    /// identifier is a lambda arrow, not JSON access.
    fn supports_lambda_functions(&self) -> bool {
        false
    }

    /// `SET (a, b) = (1, 2)` multi-variable assignment.
    fn supports_parenthesized_set_variables(&self) -> bool {
        false
    }

    /// Triple-quoted string literals (`'''text'''`).
    fn supports_triple_quoted_string(&self) -> bool {
        false
    }

    /// `SELECT * EXCEPT (a, b)` projection.
    fn supports_select_wildcard_except(&self) -> bool {
        false
    }

    /// Trailing commas in comma-separated lists generally.
    fn supports_trailing_commas(&self) -> bool {
        false
    }

    /// Trailing commas in the SELECT projection specifically.
    fn supports_projection_trailing_commas(&self) -> bool {
        self.supports_trailing_commas()
    }
}

/// A permissive baseline dialect. Accepts the common union of vendor
/// syntaxes so that generic SQL parses without picking a vendor; features
/// whose surface forms collide across vendors (lambdas vs JSON arrows,
/// dictionary braces, trailing commas) stay off.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl Dialect for GenericDialect {
    fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_alphabetic() || ch == '_'
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || ch == '$'
    }

    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        // `[` is left to subscript expressions; bracket quoting is a
        // T-SQL-style dialect choice.
        ch == '"' || ch == '`'
    }

    fn supports_filter_during_aggregation(&self) -> bool {
        true
    }

    fn supports_in_empty_list(&self) -> bool {
        true
    }

    fn supports_group_by_expression(&self) -> bool {
        true
    }

    fn supports_substring_from_for_expression(&self) -> bool {
        true
    }

    fn supports_start_transaction_modifier(&self) -> bool {
        true
    }

    fn supports_string_literal_backslash_escape(&self) -> bool {
        true
    }

    fn supports_window_clause_named_window_reference(&self) -> bool {
        true
    }

    fn supports_window_function_null_treatment_arg(&self) -> bool {
        true
    }

    fn supports_parenthesized_set_variables(&self) -> bool {
        true
    }

    fn supports_select_wildcard_except(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_dialect_classifiers() {
        let d = GenericDialect;
        assert!(d.is_identifier_start('a'));
        assert!(d.is_identifier_start('_'));
        assert!(!d.is_identifier_start('1'));
        assert!(d.is_identifier_part('1'));
        assert!(d.is_identifier_part('$'));
        assert!(d.is_delimited_identifier_start('"'));
        assert!(d.is_delimited_identifier_start('`'));
        assert!(!d.is_delimited_identifier_start('['));
        assert!(!d.is_delimited_identifier_start('\''));
    }

    #[test]
    fn test_generic_dialect_default_flags() {
        let d = GenericDialect;
        assert!(d.supports_substring_from_for_expression());
        assert!(d.supports_in_empty_list());
        assert!(!d.supports_trailing_commas());
        assert!(!d.supports_projection_trailing_commas());
        assert!(!d.supports_lambda_functions());
        assert!(!d.supports_dictionary_syntax());
        assert!(!d.supports_match_recognize());
        assert!(!d.supports_connect_by());
        assert!(!d.convert_type_before_value());
        assert!(!d.supports_numeric_prefix());
    }

    #[test]
    fn test_projection_trailing_commas_follows_general_flag() {
        #[derive(Debug)]
        struct TrailingCommas;
        impl Dialect for TrailingCommas {
            fn is_identifier_start(&self, ch: char) -> bool {
                ch.is_alphabetic()
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                ch.is_alphanumeric()
            }
            fn supports_trailing_commas(&self) -> bool {
                true
            }
        }
        assert!(TrailingCommas.supports_projection_trailing_commas());
    }
}
