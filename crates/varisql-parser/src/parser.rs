//! Hand-written recursive descent SQL parser.
//!
//! Statement grammar lives here; Pratt expression parsing lives in
//! `expr.rs`. The parser is parameterised by a [`Dialect`], which is
//! consulted before built-in statement dispatch and at every prefix/infix
//! position, and whose capability flags gate optional syntax.
//!
//! The parser never consumes more than it can unconsume: speculative
//! parses save the token index with [`Parser::checkpoint`] and restore it
//! with [`Parser::rewind`].

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use varisql_ast::{
    Action, AlterTableOperation, Assignment, ColumnDef, ColumnOption, ColumnOptionDef, ConnectBy,
    Cte, Expr, Fetch, GrantObjects, Ident, Join, JoinConstraint, JoinOperator, LockType,
    MatchRecognizePattern, MatchRecognizeQuantifier, Measure, NamedWindowDef, ObjectName,
    ObjectType, Offset, OffsetRows, OrderByExpr, Privileges, Query, Select, SelectItem, SetExpr,
    SetOperator, Statement, SymbolDefinition, TableAlias, TableConstraint, TableFactor,
    TableWithJoins, Top, TransactionAccessMode, TransactionIsolationLevel, TransactionMode,
    Values, With,
};

use crate::dialect::Dialect;
use crate::lexer::{Lexer, TokenizerError};
use crate::token::{Keyword, Token, TokenKind, Word};

// ---------------------------------------------------------------------------
// Parse metrics
// ---------------------------------------------------------------------------

/// Monotonic counter of successfully parsed statements, process-wide.
static VARISQL_PARSE_STATEMENTS_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Point-in-time parse metrics snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseMetricsSnapshot {
    /// Total statements successfully parsed.
    pub varisql_parse_statements_total: u64,
}

/// Take a point-in-time snapshot of parse metrics.
#[must_use]
pub fn parse_metrics_snapshot() -> ParseMetricsSnapshot {
    ParseMetricsSnapshot {
        varisql_parse_statements_total: VARISQL_PARSE_STATEMENTS_TOTAL.load(Ordering::Relaxed),
    }
}

/// Reset parse metrics (used by tests and diagnostics).
pub fn reset_parse_metrics() {
    VARISQL_PARSE_STATEMENTS_TOTAL.store(0, Ordering::Relaxed);
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Parser failure: unexpected token, missing expected token, or a construct
/// the active dialect does not support. Fatal to the current parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at line {line}, column {col}: {message}")]
pub struct ParserError {
    pub message: String,
    pub line: u32,
    pub col: u32,
}

impl From<TokenizerError> for ParserError {
    fn from(err: TokenizerError) -> Self {
        Self {
            message: err.message,
            line: err.line,
            col: err.col,
        }
    }
}

/// Nesting bound for expressions and queries.
pub const MAX_PARSE_DEPTH: u32 = 200;

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Token-stream parser for one SQL input.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    dialect: &'a dyn Dialect,
    pub(crate) depth: u32,
}

/// Keywords that terminate an implicit (AS-less) table alias.
const RESERVED_FOR_TABLE_ALIAS: &[Keyword] = &[
    Keyword::With,
    Keyword::Select,
    Keyword::Where,
    Keyword::Group,
    Keyword::Having,
    Keyword::Order,
    Keyword::Limit,
    Keyword::Offset,
    Keyword::Fetch,
    Keyword::For,
    Keyword::Union,
    Keyword::Except,
    Keyword::Intersect,
    Keyword::On,
    Keyword::Join,
    Keyword::Inner,
    Keyword::Left,
    Keyword::Right,
    Keyword::Full,
    Keyword::Cross,
    Keyword::Natural,
    Keyword::Using,
    Keyword::Window,
    Keyword::Set,
    Keyword::Connect,
    Keyword::Start,
    Keyword::MatchRecognize,
    Keyword::Values,
    Keyword::Pattern,
    Keyword::Define,
    Keyword::Measures,
];

/// Keywords that terminate an implicit column alias.
const RESERVED_FOR_COLUMN_ALIAS: &[Keyword] = &[
    Keyword::From,
    Keyword::Where,
    Keyword::Group,
    Keyword::Having,
    Keyword::Order,
    Keyword::Limit,
    Keyword::Offset,
    Keyword::Fetch,
    Keyword::For,
    Keyword::Union,
    Keyword::Except,
    Keyword::Intersect,
    Keyword::Window,
    Keyword::Into,
    Keyword::End,
    Keyword::When,
    Keyword::Then,
    Keyword::Else,
];

impl<'a> Parser<'a> {
    /// Create a parser over an already-tokenized input.
    #[must_use]
    pub fn new(tokens: Vec<Token>, dialect: &'a dyn Dialect) -> Self {
        Self {
            tokens,
            pos: 0,
            dialect,
            depth: 0,
        }
    }

    /// Tokenize and parse a whole SQL source into statements.
    pub fn parse_sql(dialect: &'a dyn Dialect, sql: &str) -> Result<Vec<Statement>, ParserError> {
        let tokens = Lexer::new(sql, dialect).tokenize()?;
        Parser::new(tokens, dialect).parse_statements()
    }

    /// The dialect this parser was built with.
    #[must_use]
    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// Parse a `;`-separated sequence of statements terminated by end of
    /// input. Empty statements are discarded; a token following a statement
    /// without a `;` in between is an error.
    pub fn parse_statements(&mut self) -> Result<Vec<Statement>, ParserError> {
        let span = tracing::debug_span!(
            target: "varisql.parse",
            "parse_statements",
            statements = tracing::field::Empty,
        );
        let _guard = span.enter();

        let mut statements = Vec::new();
        let mut expecting_delimiter = false;
        loop {
            while self.eat_token(&TokenKind::SemiColon) {
                expecting_delimiter = false;
            }
            if self.at_eof() {
                break;
            }
            if expecting_delimiter {
                let err = self.expected("end of statement");
                tracing::debug!(target: "varisql.parse", error = %err, "parse failed");
                return Err(err);
            }
            match self.parse_statement() {
                Ok(stmt) => {
                    VARISQL_PARSE_STATEMENTS_TOTAL.fetch_add(1, Ordering::Relaxed);
                    statements.push(stmt);
                    expecting_delimiter = true;
                }
                Err(err) => {
                    tracing::debug!(target: "varisql.parse", error = %err, "parse failed");
                    return Err(err);
                }
            }
        }
        span.record("statements", statements.len() as u64);
        Ok(statements)
    }

    /// Parse a single statement. The dialect's statement hook runs first.
    pub fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        if let Some(result) = self.dialect.parse_statement(self) {
            return result;
        }
        match self.peek_keyword() {
            Some(Keyword::Select | Keyword::Values | Keyword::With) => {
                Ok(Statement::Query(Box::new(self.parse_query()?)))
            }
            _ if self.check_token(&TokenKind::LParen) => {
                Ok(Statement::Query(Box::new(self.parse_query()?)))
            }
            Some(Keyword::Insert) => self.parse_insert(),
            Some(Keyword::Update) => self.parse_update(),
            Some(Keyword::Delete) => self.parse_delete(),
            Some(Keyword::Create) => self.parse_create(),
            Some(Keyword::Alter) => self.parse_alter(),
            Some(Keyword::Drop) => self.parse_drop(),
            Some(Keyword::Truncate) => self.parse_truncate(),
            Some(Keyword::Start | Keyword::Begin) => self.parse_start_transaction(),
            Some(Keyword::Commit) => {
                self.advance();
                Ok(Statement::Commit {
                    chain: self.parse_commit_rollback_chain()?,
                })
            }
            Some(Keyword::Rollback) => {
                self.advance();
                Ok(Statement::Rollback {
                    chain: self.parse_commit_rollback_chain()?,
                })
            }
            Some(Keyword::Set) => self.parse_set(),
            Some(Keyword::Use) => {
                self.advance();
                Ok(Statement::Use {
                    db_name: self.parse_identifier()?,
                })
            }
            Some(Keyword::Grant) => self.parse_grant(),
            _ => Err(self.expected("a statement")),
        }
    }

    // -----------------------------------------------------------------------
    // Token navigation
    // -----------------------------------------------------------------------

    /// The current token kind, `Eof` past the end.
    #[must_use]
    pub fn peek(&self) -> &TokenKind {
        self.tokens.get(self.pos).map_or(&TokenKind::Eof, |t| &t.kind)
    }

    /// The token kind `n` positions ahead.
    #[must_use]
    pub fn peek_nth(&self, n: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(&TokenKind::Eof, |t| &t.kind)
    }

    /// The keyword of the current token, if it is an unquoted keyword word.
    #[must_use]
    pub fn peek_keyword(&self) -> Option<Keyword> {
        self.keyword_at(0)
    }

    /// The keyword of the token `n` positions ahead, if any.
    #[must_use]
    pub fn keyword_at(&self, n: usize) -> Option<Keyword> {
        match self.peek_nth(n) {
            TokenKind::Word(w) if w.quote_style.is_none() => w.keyword,
            _ => None,
        }
    }

    /// Consume and return the current token. Does not move past Eof.
    pub fn advance(&mut self) -> Token {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, 0, 0));
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Save the token position for a speculative parse.
    #[must_use]
    pub fn checkpoint(&self) -> usize {
        self.pos
    }

    /// Restore a position saved with [`Parser::checkpoint`].
    pub fn rewind(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }

    #[must_use]
    pub fn at_eof(&self) -> bool {
        matches!(self.peek(), TokenKind::Eof)
    }

    /// Error unless the whole input has been consumed.
    pub fn expect_eof(&mut self) -> Result<(), ParserError> {
        if self.at_eof() {
            Ok(())
        } else {
            Err(self.expected("end of input"))
        }
    }

    #[must_use]
    pub fn check_token(&self, kind: &TokenKind) -> bool {
        self.peek() == kind
    }

    pub fn eat_token(&mut self, kind: &TokenKind) -> bool {
        if self.check_token(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect_token(&mut self, kind: &TokenKind) -> Result<(), ParserError> {
        if self.eat_token(kind) {
            Ok(())
        } else {
            Err(self.expected(&kind.to_string()))
        }
    }

    #[must_use]
    pub fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek_keyword() == Some(keyword)
    }

    pub fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a keyword sequence all-or-nothing.
    pub fn eat_keywords(&mut self, keywords: &[Keyword]) -> bool {
        let checkpoint = self.checkpoint();
        for &keyword in keywords {
            if !self.eat_keyword(keyword) {
                self.rewind(checkpoint);
                return false;
            }
        }
        true
    }

    /// Consume whichever of `keywords` is next, if any.
    pub fn eat_one_of_keywords(&mut self, keywords: &[Keyword]) -> Option<Keyword> {
        let found = self.peek_keyword()?;
        if keywords.contains(&found) {
            self.advance();
            Some(found)
        } else {
            None
        }
    }

    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParserError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.expected(&format!("{keyword:?}").to_uppercase()))
        }
    }

    /// Build an "expected X, found Y" error at the current position.
    #[must_use]
    pub fn expected(&self, what: &str) -> ParserError {
        self.error_here(format!("expected {what}, found {}", self.peek()))
    }

    /// Build an error with an explicit message at the current position.
    #[must_use]
    pub fn error_here(&self, message: impl Into<String>) -> ParserError {
        let (line, col) = self
            .tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or((0, 0), |t| (t.line, t.col));
        ParserError {
            message: message.into(),
            line,
            col,
        }
    }

    pub(crate) fn enter_recursion(&mut self) -> Result<(), ParserError> {
        if self.depth >= MAX_PARSE_DEPTH {
            return Err(
                self.error_here(format!("statement nests too deeply (maximum {MAX_PARSE_DEPTH})"))
            );
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // -----------------------------------------------------------------------
    // Identifiers, names, lists
    // -----------------------------------------------------------------------

    /// Parse one identifier. Keywords are accepted: context decides whether
    /// a word is usable as a name, and quoting always forces a name.
    pub fn parse_identifier(&mut self) -> Result<Ident, ParserError> {
        match self.peek() {
            TokenKind::Word(w) => {
                let ident = word_to_ident(w);
                self.advance();
                Ok(ident)
            }
            _ => Err(self.expected("an identifier")),
        }
    }

    /// Parse a dotted object name: `ident (. ident)*`.
    pub fn parse_object_name(&mut self) -> Result<ObjectName, ParserError> {
        let mut parts = vec![self.parse_identifier()?];
        while self.eat_token(&TokenKind::Period) {
            parts.push(self.parse_identifier()?);
        }
        Ok(ObjectName::new(parts))
    }

    /// Parse an optional alias: explicit with `AS`, or a bare word that is
    /// not one of `reserved`.
    fn parse_optional_alias(
        &mut self,
        reserved: &[Keyword],
    ) -> Result<Option<Ident>, ParserError> {
        if self.eat_keyword(Keyword::As) {
            return Ok(Some(self.parse_identifier()?));
        }
        match self.peek() {
            TokenKind::Word(w)
                if w.quote_style.is_some() || !w.keyword.is_some_and(|k| reserved.contains(&k)) =>
            {
                Ok(Some(self.parse_identifier()?))
            }
            _ => Ok(None),
        }
    }

    /// Parse an optional table alias with its optional column list.
    fn parse_optional_table_alias(&mut self) -> Result<Option<TableAlias>, ParserError> {
        let Some(name) = self.parse_optional_alias(RESERVED_FOR_TABLE_ALIAS)? else {
            return Ok(None);
        };
        let columns = if self.check_token(&TokenKind::LParen)
            && matches!(self.peek_nth(1), TokenKind::Word(_))
        {
            self.expect_token(&TokenKind::LParen)?;
            let columns = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_token(&TokenKind::RParen)?;
            columns
        } else {
            Vec::new()
        };
        Ok(Some(TableAlias { name, columns }))
    }

    /// Parse a comma-separated list. When the dialect allows trailing
    /// commas, a comma followed by a list terminator ends the list.
    pub fn parse_comma_separated<T>(
        &mut self,
        mut f: impl FnMut(&mut Self) -> Result<T, ParserError>,
    ) -> Result<Vec<T>, ParserError> {
        let trailing = self.dialect.supports_trailing_commas();
        self.parse_comma_separated_with(&mut f, trailing)
    }

    fn parse_comma_separated_with<T>(
        &mut self,
        f: &mut impl FnMut(&mut Self) -> Result<T, ParserError>,
        allow_trailing: bool,
    ) -> Result<Vec<T>, ParserError> {
        let mut items = vec![f(self)?];
        while self.eat_token(&TokenKind::Comma) {
            if allow_trailing && self.at_list_terminator() {
                break;
            }
            items.push(f(self)?);
        }
        Ok(items)
    }

    /// Whether the current token cannot start another list item.
    fn at_list_terminator(&self) -> bool {
        match self.peek() {
            TokenKind::RParen
            | TokenKind::RBracket
            | TokenKind::RBrace
            | TokenKind::SemiColon
            | TokenKind::Eof => true,
            TokenKind::Word(w) => w.keyword.is_some_and(|k| {
                matches!(
                    k,
                    Keyword::From
                        | Keyword::Where
                        | Keyword::Group
                        | Keyword::Having
                        | Keyword::Order
                        | Keyword::Limit
                        | Keyword::Offset
                        | Keyword::Fetch
                        | Keyword::For
                        | Keyword::Union
                        | Keyword::Except
                        | Keyword::Intersect
                        | Keyword::Window
                )
            }),
            _ => false,
        }
    }

    /// Parse a parenthesised, comma-separated identifier list.
    fn parse_parenthesized_column_list(&mut self) -> Result<Vec<Ident>, ParserError> {
        self.expect_token(&TokenKind::LParen)?;
        let columns = self.parse_comma_separated(Parser::parse_identifier)?;
        self.expect_token(&TokenKind::RParen)?;
        Ok(columns)
    }

    /// Parse a literal unsigned integer (type lengths, TOP quantities).
    pub fn parse_literal_u64(&mut self) -> Result<u64, ParserError> {
        match self.peek() {
            TokenKind::Number(n) => {
                let parsed = n
                    .parse::<u64>()
                    .map_err(|_| self.error_here(format!("invalid unsigned integer: {n}")));
                let value = parsed?;
                self.advance();
                Ok(value)
            }
            _ => Err(self.expected("an unsigned integer literal")),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Parse a full query: `[WITH ...] body [ORDER BY] [LIMIT] [OFFSET]
    /// [FETCH] [FOR UPDATE | SHARE]`.
    pub fn parse_query(&mut self) -> Result<Query, ParserError> {
        self.enter_recursion()?;
        let result = self.parse_query_inner();
        self.leave_recursion();
        result
    }

    fn parse_query_inner(&mut self) -> Result<Query, ParserError> {
        let with = if self.eat_keyword(Keyword::With) {
            let recursive = self.eat_keyword(Keyword::Recursive);
            let ctes = self.parse_comma_separated(Parser::parse_cte)?;
            Some(With { recursive, ctes })
        } else {
            None
        };

        let body = self.parse_query_body(0)?;

        let order_by = if self.eat_keywords(&[Keyword::Order, Keyword::By]) {
            self.parse_comma_separated(Parser::parse_order_by_expr)?
        } else {
            Vec::new()
        };

        let limit = if self.eat_keyword(Keyword::Limit) {
            // LIMIT ALL means no limit.
            if self.eat_keyword(Keyword::All) {
                None
            } else {
                Some(self.parse_expr()?)
            }
        } else {
            None
        };

        let offset = if self.eat_keyword(Keyword::Offset) {
            let value = self.parse_expr()?;
            let rows = match self.eat_one_of_keywords(&[Keyword::Row, Keyword::Rows]) {
                Some(Keyword::Row) => OffsetRows::Row,
                Some(Keyword::Rows) => OffsetRows::Rows,
                _ => OffsetRows::None,
            };
            Some(Offset { value, rows })
        } else {
            None
        };

        let fetch = if self.eat_keyword(Keyword::Fetch) {
            Some(self.parse_fetch()?)
        } else {
            None
        };

        let lock = if self.eat_keyword(Keyword::For) {
            match self.eat_one_of_keywords(&[Keyword::Update, Keyword::Share]) {
                Some(Keyword::Update) => Some(LockType::Update),
                Some(Keyword::Share) => Some(LockType::Share),
                _ => return Err(self.expected("UPDATE or SHARE after FOR")),
            }
        } else {
            None
        };

        Ok(Query {
            with,
            body: Box::new(body),
            order_by,
            limit,
            offset,
            fetch,
            lock,
        })
    }

    fn parse_cte(&mut self) -> Result<Cte, ParserError> {
        let name = self.parse_identifier()?;
        let columns = if self.check_token(&TokenKind::LParen) {
            self.parse_parenthesized_column_list()?
        } else {
            Vec::new()
        };
        self.expect_keyword(Keyword::As)?;
        self.expect_token(&TokenKind::LParen)?;
        let query = self.parse_query()?;
        self.expect_token(&TokenKind::RParen)?;
        Ok(Cte {
            alias: TableAlias { name, columns },
            query: Box::new(query),
        })
    }

    /// Parse one or more query bodies combined with set operators,
    /// left-associative, INTERSECT binding tighter than UNION/EXCEPT.
    fn parse_query_body(&mut self, precedence: u8) -> Result<SetExpr, ParserError> {
        let mut body = if self.check_keyword(Keyword::Select) {
            SetExpr::Select(Box::new(self.parse_select()?))
        } else if self.eat_keyword(Keyword::Values) {
            SetExpr::Values(self.parse_values()?)
        } else if self.eat_token(&TokenKind::LParen) {
            let query = self.parse_query()?;
            self.expect_token(&TokenKind::RParen)?;
            SetExpr::Query(Box::new(query))
        } else {
            return Err(self.expected("SELECT, VALUES, or a parenthesized query"));
        };

        loop {
            let op = match self.peek_keyword() {
                Some(Keyword::Union) => SetOperator::Union,
                Some(Keyword::Except) => SetOperator::Except,
                Some(Keyword::Intersect) => SetOperator::Intersect,
                _ => break,
            };
            let op_precedence = match op {
                SetOperator::Intersect => 2,
                SetOperator::Union | SetOperator::Except => 1,
            };
            if precedence >= op_precedence {
                break;
            }
            self.advance();
            let all = self.eat_keyword(Keyword::All);
            let right = self.parse_query_body(op_precedence)?;
            body = SetExpr::SetOperation {
                op,
                all,
                left: Box::new(body),
                right: Box::new(right),
            };
        }
        Ok(body)
    }

    fn parse_values(&mut self) -> Result<Values, ParserError> {
        let rows = self.parse_comma_separated(|parser| {
            parser.expect_token(&TokenKind::LParen)?;
            let row = parser.parse_comma_separated(Parser::parse_expr)?;
            parser.expect_token(&TokenKind::RParen)?;
            Ok(row)
        })?;
        Ok(Values(rows))
    }

    #[allow(clippy::too_many_lines)]
    fn parse_select(&mut self) -> Result<Select, ParserError> {
        self.expect_keyword(Keyword::Select)?;

        let distinct = if self.eat_keyword(Keyword::Distinct) {
            true
        } else {
            let _ = self.eat_keyword(Keyword::All);
            false
        };

        let top = if self.eat_keyword(Keyword::Top) {
            Some(self.parse_top()?)
        } else {
            None
        };

        let allow_trailing = self.dialect.supports_projection_trailing_commas();
        let projection =
            self.parse_comma_separated_with(&mut Parser::parse_select_item, allow_trailing)?;

        let from = if self.eat_keyword(Keyword::From) {
            self.parse_comma_separated(Parser::parse_table_with_joins)?
        } else {
            Vec::new()
        };

        let selection = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let group_by = if self.eat_keywords(&[Keyword::Group, Keyword::By]) {
            self.parse_comma_separated(Parser::parse_group_by_item)?
        } else {
            Vec::new()
        };

        let having = if self.eat_keyword(Keyword::Having) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let named_windows = if self.eat_keyword(Keyword::Window) {
            self.parse_comma_separated(|parser| {
                let name = parser.parse_identifier()?;
                parser.expect_keyword(Keyword::As)?;
                parser.expect_token(&TokenKind::LParen)?;
                let spec = parser.parse_window_spec()?;
                parser.expect_token(&TokenKind::RParen)?;
                Ok(NamedWindowDef { name, spec })
            })?
        } else {
            Vec::new()
        };

        let connect_by = if self.dialect.supports_connect_by() {
            self.parse_optional_connect_by()?
        } else {
            None
        };

        Ok(Select {
            distinct,
            top,
            projection,
            from,
            selection,
            group_by,
            having,
            named_windows,
            connect_by,
        })
    }

    /// `TOP n` takes a bare integer or a parenthesized expression, so that
    /// a following `*` projection is not mistaken for multiplication.
    fn parse_top(&mut self) -> Result<Top, ParserError> {
        let quantity = if self.eat_token(&TokenKind::LParen) {
            let quantity = self.parse_expr()?;
            self.expect_token(&TokenKind::RParen)?;
            Some(Expr::Nested(Box::new(quantity)))
        } else {
            Some(Expr::Value(varisql_ast::Value::Number(
                self.parse_literal_u64()?.to_string(),
            )))
        };
        let percent = self.eat_keyword(Keyword::Percent);
        let with_ties = self.eat_keywords(&[Keyword::With, Keyword::Ties]);
        Ok(Top {
            quantity,
            percent,
            with_ties,
        })
    }

    /// `[START WITH cond] CONNECT BY cond`, in either order.
    fn parse_optional_connect_by(&mut self) -> Result<Option<ConnectBy>, ParserError> {
        if self.eat_keywords(&[Keyword::Start, Keyword::With]) {
            let start_with = Some(self.parse_expr()?);
            self.expect_keyword(Keyword::Connect)?;
            self.expect_keyword(Keyword::By)?;
            let condition = self.parse_expr()?;
            return Ok(Some(ConnectBy {
                start_with,
                condition,
            }));
        }
        if self.eat_keywords(&[Keyword::Connect, Keyword::By]) {
            let condition = self.parse_expr()?;
            let start_with = if self.eat_keywords(&[Keyword::Start, Keyword::With]) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            return Ok(Some(ConnectBy {
                start_with,
                condition,
            }));
        }
        Ok(None)
    }

    fn parse_select_item(&mut self) -> Result<SelectItem, ParserError> {
        if self.eat_token(&TokenKind::Mul) {
            let except = self.parse_optional_wildcard_except()?;
            return Ok(SelectItem::Wildcard { except });
        }

        // `qualifier.*`, where the qualifier may be dotted.
        let mut ahead = 0;
        while matches!(self.peek_nth(ahead), TokenKind::Word(_))
            && self.peek_nth(ahead + 1) == &TokenKind::Period
        {
            ahead += 2;
        }
        if ahead > 0 && self.peek_nth(ahead) == &TokenKind::Mul {
            let mut parts = vec![self.parse_identifier()?];
            while self.check_token(&TokenKind::Period)
                && matches!(self.peek_nth(1), TokenKind::Word(_))
            {
                self.advance();
                parts.push(self.parse_identifier()?);
            }
            self.expect_token(&TokenKind::Period)?;
            self.expect_token(&TokenKind::Mul)?;
            let except = self.parse_optional_wildcard_except()?;
            return Ok(SelectItem::QualifiedWildcard {
                name: ObjectName::new(parts),
                except,
            });
        }

        let expr = self.parse_expr()?;
        match self.parse_optional_alias(RESERVED_FOR_COLUMN_ALIAS)? {
            Some(alias) => Ok(SelectItem::ExprWithAlias { expr, alias }),
            None => Ok(SelectItem::UnnamedExpr(expr)),
        }
    }

    fn parse_optional_wildcard_except(&mut self) -> Result<Vec<Ident>, ParserError> {
        if self.dialect.supports_select_wildcard_except()
            && self.check_keyword(Keyword::Except)
            && self.peek_nth(1) == &TokenKind::LParen
        {
            self.advance();
            return self.parse_parenthesized_column_list();
        }
        Ok(Vec::new())
    }

    /// One GROUP BY element; ROLLUP/CUBE/GROUPING SETS are dialect-gated.
    fn parse_group_by_item(&mut self) -> Result<Expr, ParserError> {
        if self.dialect.supports_group_by_expression() {
            if self.eat_keywords(&[Keyword::Grouping, Keyword::Sets]) {
                self.expect_token(&TokenKind::LParen)?;
                let sets = self.parse_comma_separated(|parser| {
                    parser.expect_token(&TokenKind::LParen)?;
                    let set = if parser.check_token(&TokenKind::RParen) {
                        Vec::new()
                    } else {
                        parser.parse_comma_separated(Parser::parse_expr)?
                    };
                    parser.expect_token(&TokenKind::RParen)?;
                    Ok(set)
                })?;
                self.expect_token(&TokenKind::RParen)?;
                return Ok(Expr::GroupingSets(sets));
            }
            if self.check_keyword(Keyword::Rollup) && self.peek_nth(1) == &TokenKind::LParen {
                self.advance();
                return Ok(Expr::Rollup(self.parse_group_by_set_list()?));
            }
            if self.check_keyword(Keyword::Cube) && self.peek_nth(1) == &TokenKind::LParen {
                self.advance();
                return Ok(Expr::Cube(self.parse_group_by_set_list()?));
            }
        }
        self.parse_expr()
    }

    /// `(a, (b, c), d)` element list for ROLLUP/CUBE.
    fn parse_group_by_set_list(&mut self) -> Result<Vec<Vec<Expr>>, ParserError> {
        self.expect_token(&TokenKind::LParen)?;
        let sets = self.parse_comma_separated(|parser| {
            if parser.eat_token(&TokenKind::LParen) {
                let set = parser.parse_comma_separated(Parser::parse_expr)?;
                parser.expect_token(&TokenKind::RParen)?;
                Ok(set)
            } else {
                Ok(vec![parser.parse_expr()?])
            }
        })?;
        self.expect_token(&TokenKind::RParen)?;
        Ok(sets)
    }

    pub fn parse_order_by_expr(&mut self) -> Result<OrderByExpr, ParserError> {
        let expr = self.parse_expr()?;
        let asc = if self.eat_keyword(Keyword::Asc) {
            Some(true)
        } else if self.eat_keyword(Keyword::Desc) {
            Some(false)
        } else {
            None
        };
        let nulls_first = if self.eat_keywords(&[Keyword::Nulls, Keyword::First]) {
            Some(true)
        } else if self.eat_keywords(&[Keyword::Nulls, Keyword::Last]) {
            Some(false)
        } else {
            None
        };
        Ok(OrderByExpr {
            expr,
            asc,
            nulls_first,
        })
    }

    fn parse_fetch(&mut self) -> Result<Fetch, ParserError> {
        if self.eat_one_of_keywords(&[Keyword::First, Keyword::Next]).is_none() {
            return Err(self.expected("FIRST or NEXT after FETCH"));
        }
        let (quantity, percent) = if self.check_keyword(Keyword::Row)
            || self.check_keyword(Keyword::Rows)
        {
            (None, false)
        } else {
            let quantity = self.parse_expr()?;
            let percent = self.eat_keyword(Keyword::Percent);
            (Some(quantity), percent)
        };
        if self.eat_one_of_keywords(&[Keyword::Row, Keyword::Rows]).is_none() {
            return Err(self.expected("ROW or ROWS in FETCH clause"));
        }
        let with_ties = if self.eat_keyword(Keyword::Only) {
            false
        } else if self.eat_keywords(&[Keyword::With, Keyword::Ties]) {
            true
        } else {
            return Err(self.expected("ONLY or WITH TIES in FETCH clause"));
        };
        Ok(Fetch {
            with_ties,
            percent,
            quantity,
        })
    }

    // -----------------------------------------------------------------------
    // FROM clause
    // -----------------------------------------------------------------------

    fn parse_table_with_joins(&mut self) -> Result<TableWithJoins, ParserError> {
        let relation = self.parse_table_factor()?;
        let mut joins = Vec::new();
        loop {
            if self.eat_keyword(Keyword::Cross) {
                self.expect_keyword(Keyword::Join)?;
                joins.push(Join {
                    relation: self.parse_table_factor()?,
                    join_operator: JoinOperator::CrossJoin,
                });
                continue;
            }

            let natural = self.eat_keyword(Keyword::Natural);
            let operator = if self.eat_keyword(Keyword::Join) {
                JoinKindTag::Inner
            } else if self.eat_keyword(Keyword::Inner) {
                self.expect_keyword(Keyword::Join)?;
                JoinKindTag::Inner
            } else if self.eat_keyword(Keyword::Left) {
                let _ = self.eat_keyword(Keyword::Outer);
                self.expect_keyword(Keyword::Join)?;
                JoinKindTag::Left
            } else if self.eat_keyword(Keyword::Right) {
                let _ = self.eat_keyword(Keyword::Outer);
                self.expect_keyword(Keyword::Join)?;
                JoinKindTag::Right
            } else if self.eat_keyword(Keyword::Full) {
                let _ = self.eat_keyword(Keyword::Outer);
                self.expect_keyword(Keyword::Join)?;
                JoinKindTag::Full
            } else if natural {
                return Err(self.expected("a join after NATURAL"));
            } else {
                break;
            };

            let relation = self.parse_table_factor()?;
            let constraint = if natural {
                JoinConstraint::Natural
            } else if self.eat_keyword(Keyword::On) {
                JoinConstraint::On(self.parse_expr()?)
            } else if self.eat_keyword(Keyword::Using) {
                JoinConstraint::Using(self.parse_parenthesized_column_list()?)
            } else {
                JoinConstraint::None
            };
            let join_operator = match operator {
                JoinKindTag::Inner => JoinOperator::Inner(constraint),
                JoinKindTag::Left => JoinOperator::LeftOuter(constraint),
                JoinKindTag::Right => JoinOperator::RightOuter(constraint),
                JoinKindTag::Full => JoinOperator::FullOuter(constraint),
            };
            joins.push(Join {
                relation,
                join_operator,
            });
        }
        Ok(TableWithJoins { relation, joins })
    }

    fn parse_table_factor(&mut self) -> Result<TableFactor, ParserError> {
        let lateral = self.eat_keyword(Keyword::Lateral);

        let factor = if self.eat_token(&TokenKind::LParen) {
            if matches!(
                self.peek_keyword(),
                Some(Keyword::Select | Keyword::With | Keyword::Values)
            ) {
                let subquery = Box::new(self.parse_query()?);
                self.expect_token(&TokenKind::RParen)?;
                let alias = self.parse_optional_table_alias()?;
                TableFactor::Derived {
                    lateral,
                    subquery,
                    alias,
                }
            } else {
                let inner = self.parse_table_with_joins()?;
                self.expect_token(&TokenKind::RParen)?;
                TableFactor::NestedJoin(Box::new(inner))
            }
        } else {
            if lateral {
                return Err(self.expected("a subquery after LATERAL"));
            }
            let name = self.parse_object_name()?;
            if self.eat_token(&TokenKind::LParen) {
                let args = if self.check_token(&TokenKind::RParen) {
                    Vec::new()
                } else {
                    self.parse_comma_separated(Parser::parse_function_arg)?
                };
                self.expect_token(&TokenKind::RParen)?;
                let alias = self.parse_optional_table_alias()?;
                TableFactor::TableFunction { name, args, alias }
            } else {
                let alias = self.parse_optional_table_alias()?;
                TableFactor::Table { name, alias }
            }
        };

        if self.dialect.supports_match_recognize() && self.eat_keyword(Keyword::MatchRecognize) {
            return self.parse_match_recognize(factor);
        }
        Ok(factor)
    }

    // -----------------------------------------------------------------------
    // MATCH_RECOGNIZE
    // -----------------------------------------------------------------------

    fn parse_match_recognize(&mut self, table: TableFactor) -> Result<TableFactor, ParserError> {
        self.expect_token(&TokenKind::LParen)?;

        let partition_by = if self.eat_keywords(&[Keyword::Partition, Keyword::By]) {
            self.parse_comma_separated(Parser::parse_expr)?
        } else {
            Vec::new()
        };
        let order_by = if self.eat_keywords(&[Keyword::Order, Keyword::By]) {
            self.parse_comma_separated(Parser::parse_order_by_expr)?
        } else {
            Vec::new()
        };
        let measures = if self.eat_keyword(Keyword::Measures) {
            self.parse_comma_separated(|parser| {
                let expr = parser.parse_expr()?;
                parser.expect_keyword(Keyword::As)?;
                let alias = parser.parse_identifier()?;
                Ok(Measure { expr, alias })
            })?
        } else {
            Vec::new()
        };

        self.expect_keyword(Keyword::Pattern)?;
        self.expect_token(&TokenKind::LParen)?;
        let pattern = self.parse_pattern_alternation()?;
        self.expect_token(&TokenKind::RParen)?;

        self.expect_keyword(Keyword::Define)?;
        let define = self.parse_comma_separated(|parser| {
            let symbol = parser.parse_identifier()?;
            parser.expect_keyword(Keyword::As)?;
            let definition = parser.parse_expr()?;
            Ok(SymbolDefinition { symbol, definition })
        })?;

        self.expect_token(&TokenKind::RParen)?;
        let alias = self.parse_optional_table_alias()?;

        Ok(TableFactor::MatchRecognize {
            table: Box::new(table),
            partition_by,
            order_by,
            measures,
            pattern,
            define,
            alias,
        })
    }

    fn parse_pattern_alternation(&mut self) -> Result<MatchRecognizePattern, ParserError> {
        let mut branches = vec![self.parse_pattern_concat()?];
        while self.eat_token(&TokenKind::Pipe) {
            branches.push(self.parse_pattern_concat()?);
        }
        if branches.len() == 1 {
            Ok(branches.pop().expect("one alternation branch"))
        } else {
            Ok(MatchRecognizePattern::Alternation(branches))
        }
    }

    fn parse_pattern_concat(&mut self) -> Result<MatchRecognizePattern, ParserError> {
        let mut parts = Vec::new();
        loop {
            match self.peek() {
                TokenKind::Word(_) | TokenKind::LParen => parts.push(self.parse_pattern_term()?),
                _ => break,
            }
        }
        match parts.len() {
            0 => Err(self.expected("a row-pattern term")),
            1 => Ok(parts.pop().expect("one concatenation part")),
            _ => Ok(MatchRecognizePattern::Concat(parts)),
        }
    }

    fn parse_pattern_term(&mut self) -> Result<MatchRecognizePattern, ParserError> {
        let mut term = if self.eat_token(&TokenKind::LParen) {
            let inner = self.parse_pattern_alternation()?;
            self.expect_token(&TokenKind::RParen)?;
            MatchRecognizePattern::Group(Box::new(inner))
        } else {
            MatchRecognizePattern::Symbol(self.parse_identifier()?)
        };
        loop {
            let quantifier = match self.peek() {
                TokenKind::Mul => MatchRecognizeQuantifier::ZeroOrMore,
                TokenKind::Plus => MatchRecognizeQuantifier::OneOrMore,
                TokenKind::Placeholder(p) if p == "?" => MatchRecognizeQuantifier::AtMostOne,
                _ => break,
            };
            self.advance();
            term = MatchRecognizePattern::Quantified(Box::new(term), quantifier);
        }
        Ok(term)
    }

    // -----------------------------------------------------------------------
    // DML
    // -----------------------------------------------------------------------

    fn parse_insert(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let table_name = self.parse_object_name()?;

        // A parenthesis here is a column list unless it opens the source
        // query.
        let columns = if self.check_token(&TokenKind::LParen)
            && !matches!(
                self.keyword_at(1),
                Some(Keyword::Select | Keyword::With | Keyword::Values)
            ) {
            self.parse_parenthesized_column_list()?
        } else {
            Vec::new()
        };

        let source = Box::new(self.parse_query()?);
        Ok(Statement::Insert {
            table_name,
            columns,
            source,
        })
    }

    fn parse_update(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword(Keyword::Update)?;
        let table = self.parse_table_with_joins()?;
        self.expect_keyword(Keyword::Set)?;
        let assignments = self.parse_comma_separated(Parser::parse_assignment)?;
        let from = if self.eat_keyword(Keyword::From) {
            Some(self.parse_table_with_joins()?)
        } else {
            None
        };
        let selection = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::Update {
            table,
            assignments,
            from,
            selection,
        })
    }

    fn parse_assignment(&mut self) -> Result<Assignment, ParserError> {
        let mut id = vec![self.parse_identifier()?];
        while self.eat_token(&TokenKind::Period) {
            id.push(self.parse_identifier()?);
        }
        self.expect_token(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        Ok(Assignment { id, value })
    }

    fn parse_delete(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        let table_name = self.parse_object_name()?;
        let using = if self.eat_keyword(Keyword::Using) {
            Some(self.parse_table_with_joins()?)
        } else {
            None
        };
        let selection = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::Delete {
            table_name,
            using,
            selection,
        })
    }

    // -----------------------------------------------------------------------
    // DDL
    // -----------------------------------------------------------------------

    fn parse_create(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword(Keyword::Create)?;
        let or_replace = self.eat_keywords(&[Keyword::Or, Keyword::Replace]);

        if self.eat_keyword(Keyword::Table) {
            return self.parse_create_table(or_replace);
        }
        let materialized = self.eat_keyword(Keyword::Materialized);
        if self.eat_keyword(Keyword::View) {
            return self.parse_create_view(or_replace, materialized);
        }
        if materialized {
            return Err(self.expected("VIEW after MATERIALIZED"));
        }
        let unique = self.eat_keyword(Keyword::Unique);
        if self.eat_keyword(Keyword::Index) {
            if or_replace {
                return Err(self.error_here("CREATE OR REPLACE INDEX is not supported"));
            }
            return self.parse_create_index(unique);
        }
        Err(self.expected("TABLE, VIEW, or INDEX after CREATE"))
    }

    fn parse_create_table(&mut self, or_replace: bool) -> Result<Statement, ParserError> {
        let if_not_exists = self.eat_keywords(&[Keyword::If, Keyword::Not, Keyword::Exists]);
        let name = self.parse_object_name()?;

        let mut columns = Vec::new();
        let mut constraints = Vec::new();
        if self.eat_token(&TokenKind::LParen) {
            loop {
                if let Some(constraint) = self.parse_optional_table_constraint()? {
                    constraints.push(constraint);
                } else {
                    columns.push(self.parse_column_def()?);
                }
                let comma = self.eat_token(&TokenKind::Comma);
                if self.check_token(&TokenKind::RParen) {
                    if comma && !self.dialect.supports_trailing_commas() {
                        return Err(self.expected("a column or constraint definition"));
                    }
                    break;
                }
                if !comma {
                    return Err(self.expected("',' or ')' in column list"));
                }
            }
            self.expect_token(&TokenKind::RParen)?;
        }

        let query = if self.eat_keyword(Keyword::As) {
            Some(Box::new(self.parse_query()?))
        } else {
            None
        };
        if columns.is_empty() && constraints.is_empty() && query.is_none() {
            return Err(self.expected("a column list or AS query in CREATE TABLE"));
        }

        Ok(Statement::CreateTable {
            or_replace,
            if_not_exists,
            name,
            columns,
            constraints,
            query,
        })
    }

    fn parse_column_def(&mut self) -> Result<ColumnDef, ParserError> {
        let name = self.parse_identifier()?;
        let data_type = self.parse_data_type()?;
        let mut options = Vec::new();
        loop {
            if self.eat_keyword(Keyword::Constraint) {
                let constraint_name = self.parse_identifier()?;
                let Some(option) = self.parse_optional_column_option()? else {
                    return Err(self.expected("a column option after CONSTRAINT name"));
                };
                options.push(ColumnOptionDef {
                    name: Some(constraint_name),
                    option,
                });
            } else if let Some(option) = self.parse_optional_column_option()? {
                options.push(ColumnOptionDef { name: None, option });
            } else {
                break;
            }
        }
        Ok(ColumnDef {
            name,
            data_type,
            options,
        })
    }

    fn parse_optional_column_option(&mut self) -> Result<Option<ColumnOption>, ParserError> {
        if self.eat_keywords(&[Keyword::Not, Keyword::Null]) {
            Ok(Some(ColumnOption::NotNull))
        } else if self.eat_keyword(Keyword::Null) {
            Ok(Some(ColumnOption::Null))
        } else if self.eat_keyword(Keyword::Default) {
            Ok(Some(ColumnOption::Default(self.parse_expr()?)))
        } else if self.eat_keywords(&[Keyword::Primary, Keyword::Key]) {
            Ok(Some(ColumnOption::Unique { is_primary: true }))
        } else if self.eat_keyword(Keyword::Unique) {
            Ok(Some(ColumnOption::Unique { is_primary: false }))
        } else if self.eat_keyword(Keyword::References) {
            let foreign_table = self.parse_object_name()?;
            let referred_columns = if self.check_token(&TokenKind::LParen) {
                self.parse_parenthesized_column_list()?
            } else {
                Vec::new()
            };
            Ok(Some(ColumnOption::ForeignKey {
                foreign_table,
                referred_columns,
            }))
        } else if self.eat_keyword(Keyword::Check) {
            self.expect_token(&TokenKind::LParen)?;
            let expr = self.parse_expr()?;
            self.expect_token(&TokenKind::RParen)?;
            Ok(Some(ColumnOption::Check(expr)))
        } else {
            Ok(None)
        }
    }

    /// Parse a table-level constraint if one starts here.
    fn parse_optional_table_constraint(
        &mut self,
    ) -> Result<Option<TableConstraint>, ParserError> {
        let name = if self.check_keyword(Keyword::Constraint) {
            self.advance();
            Some(self.parse_identifier()?)
        } else {
            None
        };

        if self.eat_keywords(&[Keyword::Primary, Keyword::Key]) {
            let columns = self.parse_parenthesized_column_list()?;
            return Ok(Some(TableConstraint::Unique {
                name,
                columns,
                is_primary: true,
            }));
        }
        // UNIQUE here must be a constraint, not a column named "unique":
        // the constraint form is always followed by a parenthesis.
        if self.check_keyword(Keyword::Unique) && self.peek_nth(1) == &TokenKind::LParen {
            self.advance();
            let columns = self.parse_parenthesized_column_list()?;
            return Ok(Some(TableConstraint::Unique {
                name,
                columns,
                is_primary: false,
            }));
        }
        if self.eat_keywords(&[Keyword::Foreign, Keyword::Key]) {
            let columns = self.parse_parenthesized_column_list()?;
            self.expect_keyword(Keyword::References)?;
            let foreign_table = self.parse_object_name()?;
            let referred_columns = if self.check_token(&TokenKind::LParen) {
                self.parse_parenthesized_column_list()?
            } else {
                Vec::new()
            };
            return Ok(Some(TableConstraint::ForeignKey {
                name,
                columns,
                foreign_table,
                referred_columns,
            }));
        }
        if self.check_keyword(Keyword::Check) && self.peek_nth(1) == &TokenKind::LParen {
            self.advance();
            self.expect_token(&TokenKind::LParen)?;
            let expr = Box::new(self.parse_expr()?);
            self.expect_token(&TokenKind::RParen)?;
            return Ok(Some(TableConstraint::Check { name, expr }));
        }

        if let Some(constraint_name) = name {
            return Err(self.expected(&format!(
                "PRIMARY KEY, UNIQUE, FOREIGN KEY, or CHECK after CONSTRAINT {constraint_name}"
            )));
        }
        Ok(None)
    }

    fn parse_create_view(
        &mut self,
        or_replace: bool,
        materialized: bool,
    ) -> Result<Statement, ParserError> {
        let name = self.parse_object_name()?;
        let columns = if self.check_token(&TokenKind::LParen) {
            self.parse_parenthesized_column_list()?
        } else {
            Vec::new()
        };
        self.expect_keyword(Keyword::As)?;
        let query = Box::new(self.parse_query()?);
        Ok(Statement::CreateView {
            or_replace,
            materialized,
            name,
            columns,
            query,
        })
    }

    fn parse_create_index(&mut self, unique: bool) -> Result<Statement, ParserError> {
        let if_not_exists = self.eat_keywords(&[Keyword::If, Keyword::Not, Keyword::Exists]);
        let name = self.parse_object_name()?;
        self.expect_keyword(Keyword::On)?;
        let table_name = self.parse_object_name()?;
        self.expect_token(&TokenKind::LParen)?;
        let columns = self.parse_comma_separated(Parser::parse_order_by_expr)?;
        self.expect_token(&TokenKind::RParen)?;
        Ok(Statement::CreateIndex {
            unique,
            if_not_exists,
            name,
            table_name,
            columns,
        })
    }

    fn parse_alter(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword(Keyword::Alter)?;
        self.expect_keyword(Keyword::Table)?;
        let name = self.parse_object_name()?;

        let operation = if self.eat_keyword(Keyword::Rename) {
            if self.eat_keyword(Keyword::Column) {
                let old_column_name = self.parse_identifier()?;
                self.expect_keyword(Keyword::To)?;
                let new_column_name = self.parse_identifier()?;
                AlterTableOperation::RenameColumn {
                    old_column_name,
                    new_column_name,
                }
            } else {
                self.expect_keyword(Keyword::To)?;
                AlterTableOperation::RenameTable {
                    table_name: self.parse_object_name()?,
                }
            }
        } else if self.eat_keyword(Keyword::Drop) {
            if self.eat_keyword(Keyword::Constraint) {
                AlterTableOperation::DropConstraint {
                    name: self.parse_identifier()?,
                }
            } else {
                let _ = self.eat_keyword(Keyword::Column);
                let if_exists = self.eat_keywords(&[Keyword::If, Keyword::Exists]);
                let column_name = self.parse_identifier()?;
                let cascade = self.eat_keyword(Keyword::Cascade);
                AlterTableOperation::DropColumn {
                    column_name,
                    if_exists,
                    cascade,
                }
            }
        } else if self.eat_keyword(Keyword::Add) {
            if let Some(constraint) = self.parse_optional_table_constraint()? {
                AlterTableOperation::AddConstraint(constraint)
            } else {
                let _ = self.eat_keyword(Keyword::Column);
                AlterTableOperation::AddColumn {
                    column_def: self.parse_column_def()?,
                }
            }
        } else {
            return Err(self.expected("ADD, DROP, or RENAME after ALTER TABLE name"));
        };

        Ok(Statement::AlterTable { name, operation })
    }

    fn parse_drop(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword(Keyword::Drop)?;
        let object_type = match self.eat_one_of_keywords(&[
            Keyword::Table,
            Keyword::View,
            Keyword::Index,
            Keyword::Schema,
        ]) {
            Some(Keyword::Table) => ObjectType::Table,
            Some(Keyword::View) => ObjectType::View,
            Some(Keyword::Index) => ObjectType::Index,
            Some(Keyword::Schema) => ObjectType::Schema,
            _ => return Err(self.expected("TABLE, VIEW, INDEX, or SCHEMA after DROP")),
        };
        let if_exists = self.eat_keywords(&[Keyword::If, Keyword::Exists]);
        let names = self.parse_comma_separated(Parser::parse_object_name)?;
        let cascade = self.eat_keyword(Keyword::Cascade);
        let _ = self.eat_keyword(Keyword::Restrict);
        Ok(Statement::Drop {
            object_type,
            if_exists,
            names,
            cascade,
        })
    }

    fn parse_truncate(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword(Keyword::Truncate)?;
        let _ = self.eat_keyword(Keyword::Table);
        Ok(Statement::Truncate {
            table_name: self.parse_object_name()?,
        })
    }

    // -----------------------------------------------------------------------
    // Transactions
    // -----------------------------------------------------------------------

    fn parse_start_transaction(&mut self) -> Result<Statement, ParserError> {
        if self.eat_keyword(Keyword::Start) {
            self.expect_keyword(Keyword::Transaction)?;
        } else {
            self.expect_keyword(Keyword::Begin)?;
            let _ = self.eat_keyword(Keyword::Transaction);
        }
        let modes = if self.dialect.supports_start_transaction_modifier() {
            self.parse_transaction_modes()?
        } else {
            Vec::new()
        };
        Ok(Statement::StartTransaction { modes })
    }

    fn parse_transaction_modes(&mut self) -> Result<Vec<TransactionMode>, ParserError> {
        let mut modes = Vec::new();
        loop {
            let mode = if self.eat_keywords(&[Keyword::Isolation, Keyword::Level]) {
                let level = if self.eat_keywords(&[Keyword::Read, Keyword::Uncommitted]) {
                    TransactionIsolationLevel::ReadUncommitted
                } else if self.eat_keywords(&[Keyword::Read, Keyword::Committed]) {
                    TransactionIsolationLevel::ReadCommitted
                } else if self.eat_keywords(&[Keyword::Repeatable, Keyword::Read]) {
                    TransactionIsolationLevel::RepeatableRead
                } else if self.eat_keyword(Keyword::Serializable) {
                    TransactionIsolationLevel::Serializable
                } else {
                    return Err(self.expected("an isolation level"));
                };
                TransactionMode::IsolationLevel(level)
            } else if self.eat_keywords(&[Keyword::Read, Keyword::Only]) {
                TransactionMode::AccessMode(TransactionAccessMode::ReadOnly)
            } else if self.eat_keywords(&[Keyword::Read, Keyword::Write]) {
                TransactionMode::AccessMode(TransactionAccessMode::ReadWrite)
            } else if modes.is_empty() {
                break;
            } else {
                return Err(self.expected("a transaction mode"));
            };
            modes.push(mode);
            if !self.eat_token(&TokenKind::Comma) {
                break;
            }
        }
        Ok(modes)
    }

    fn parse_commit_rollback_chain(&mut self) -> Result<bool, ParserError> {
        let _ = self.eat_keyword(Keyword::Transaction);
        if self.eat_keyword(Keyword::And) {
            let no = self.eat_keyword(Keyword::No);
            self.expect_keyword(Keyword::Chain)?;
            Ok(!no)
        } else {
            Ok(false)
        }
    }

    // -----------------------------------------------------------------------
    // SET / USE / GRANT
    // -----------------------------------------------------------------------

    fn parse_set(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword(Keyword::Set)?;
        let local = self.eat_keyword(Keyword::Local);
        let _ = self.eat_keyword(Keyword::Session);

        if self.check_token(&TokenKind::LParen) {
            if !self.dialect.supports_parenthesized_set_variables() {
                return Err(
                    self.error_here("parenthesized SET variable lists are not supported by this dialect")
                );
            }
            self.expect_token(&TokenKind::LParen)?;
            let variables = self.parse_comma_separated(Parser::parse_object_name)?;
            self.expect_token(&TokenKind::RParen)?;
            self.expect_token(&TokenKind::Eq)?;
            self.expect_token(&TokenKind::LParen)?;
            let values = self.parse_comma_separated(Parser::parse_expr)?;
            self.expect_token(&TokenKind::RParen)?;
            if variables.len() != values.len() {
                return Err(self.error_here(format!(
                    "SET assigns {} variables from {} values",
                    variables.len(),
                    values.len()
                )));
            }
            return Ok(Statement::SetVariable {
                local,
                variables,
                values,
            });
        }

        let variable = self.parse_object_name()?;
        self.expect_token(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        Ok(Statement::SetVariable {
            local,
            variables: vec![variable],
            values: vec![value],
        })
    }

    fn parse_grant(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword(Keyword::Grant)?;

        let privileges = if self.eat_keyword(Keyword::All) {
            Privileges::All {
                with_privileges_keyword: self.eat_keyword(Keyword::Privileges),
            }
        } else {
            Privileges::Actions(self.parse_comma_separated(Parser::parse_grant_action)?)
        };

        self.expect_keyword(Keyword::On)?;
        let objects = if self.eat_keywords(&[
            Keyword::All,
            Keyword::Tables,
            Keyword::In,
            Keyword::Schema,
        ]) {
            GrantObjects::AllTablesInSchema {
                schemas: self.parse_comma_separated(Parser::parse_object_name)?,
            }
        } else if self.eat_keyword(Keyword::Schema) {
            GrantObjects::Schemas(self.parse_comma_separated(Parser::parse_object_name)?)
        } else {
            let _ = self.eat_keyword(Keyword::Table);
            GrantObjects::Tables(self.parse_comma_separated(Parser::parse_object_name)?)
        };

        self.expect_keyword(Keyword::To)?;
        let grantees = self.parse_comma_separated(Parser::parse_identifier)?;
        let with_grant_option =
            self.eat_keywords(&[Keyword::With, Keyword::Grant, Keyword::Option]);

        Ok(Statement::Grant {
            privileges,
            objects,
            grantees,
            with_grant_option,
        })
    }

    fn parse_grant_action(&mut self) -> Result<Action, ParserError> {
        let action = match self.peek_keyword() {
            Some(Keyword::Select) => Action::Select,
            Some(Keyword::Insert) => Action::Insert,
            Some(Keyword::Update) => Action::Update,
            Some(Keyword::Delete) => Action::Delete,
            Some(Keyword::References) => Action::References,
            Some(Keyword::Usage) => Action::Usage,
            Some(Keyword::Create) => Action::Create,
            Some(Keyword::Connect) => Action::Connect,
            Some(Keyword::Execute) => Action::Execute,
            Some(Keyword::Temporary) => Action::Temporary,
            Some(Keyword::Truncate) => Action::Truncate,
            Some(Keyword::Trigger) => Action::Trigger,
            _ => return Err(self.expected("a privilege name")),
        };
        self.advance();
        Ok(action)
    }
}

/// Tag used while assembling a join operator.
enum JoinKindTag {
    Inner,
    Left,
    Right,
    Full,
}

/// Convert a lexed word into an AST identifier, keeping its quote style.
pub(crate) fn word_to_ident(word: &Word) -> Ident {
    Ident {
        value: word.value.clone(),
        quote_style: word.quote_style,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;

    fn parse_one(sql: &str) -> Statement {
        let mut statements =
            Parser::parse_sql(&GenericDialect, sql).unwrap_or_else(|e| panic!("parse {sql}: {e}"));
        assert_eq!(statements.len(), 1, "expected one statement in {sql}");
        statements.pop().unwrap()
    }

    fn parse_err(sql: &str) -> ParserError {
        Parser::parse_sql(&GenericDialect, sql).expect_err("expected a parse error")
    }

    /// Parse, render, re-parse, render again, and require the two rendered
    /// strings to match. Rendering is canonical, so comparing renders
    /// tolerates normalisation (case, spacing) while still proving the
    /// round-trip law.
    fn assert_roundtrip(sql: &str) {
        let first = parse_one(sql);
        let rendered = first.to_string();
        let second_stmt = parse_one(&rendered);
        assert_eq!(
            first, second_stmt,
            "re-parsing rendered SQL changed the tree\n  input: {sql}\n  rendered: {rendered}"
        );
        assert_eq!(
            rendered,
            second_stmt.to_string(),
            "rendering is not a fixed point for {sql}"
        );
    }

    fn assert_renders_as(sql: &str, expected: &str) {
        assert_eq!(parse_one(sql).to_string(), expected, "for input {sql}");
    }

    // -- SELECT --------------------------------------------------------------

    #[test]
    fn test_roundtrip_select_basics() {
        assert_roundtrip("SELECT 1");
        assert_roundtrip("SELECT 1 + 2 * 3");
        assert_roundtrip("SELECT *");
        assert_roundtrip("SELECT * FROM t");
        assert_roundtrip("SELECT a, b FROM t WHERE a > 10");
        assert_roundtrip("SELECT DISTINCT a FROM t");
        assert_roundtrip("SELECT a AS x, b AS y FROM t AS u");
        assert_roundtrip("SELECT t.* FROM t");
        assert_roundtrip("SELECT s.t.* FROM s.t");
    }

    #[test]
    fn test_roundtrip_select_order_limit() {
        assert_roundtrip("SELECT a FROM t ORDER BY a");
        assert_roundtrip("SELECT a FROM t ORDER BY a DESC, b ASC");
        assert_roundtrip("SELECT a FROM t ORDER BY a NULLS FIRST");
        assert_roundtrip("SELECT a FROM t ORDER BY a DESC NULLS LAST");
        assert_roundtrip("SELECT a FROM t LIMIT 10");
        assert_roundtrip("SELECT a FROM t LIMIT 10 OFFSET 5");
        assert_roundtrip("SELECT a FROM t OFFSET 5 ROWS");
        assert_roundtrip("SELECT a FROM t FETCH FIRST 3 ROWS ONLY");
        assert_roundtrip("SELECT a FROM t FETCH FIRST 3 PERCENT ROWS WITH TIES");
        assert_roundtrip("SELECT a FROM t FOR UPDATE");
        assert_roundtrip("SELECT a FROM t FOR SHARE");
        assert_renders_as("SELECT a FROM t LIMIT ALL", "SELECT a FROM t");
    }

    #[test]
    fn test_roundtrip_select_top() {
        assert_roundtrip("SELECT TOP 5 a FROM t");
        assert_roundtrip("SELECT TOP 5 * FROM t");
        assert_roundtrip("SELECT TOP (n + 1) a FROM t");
        assert_roundtrip("SELECT TOP 5 PERCENT a FROM t");
        assert_roundtrip("SELECT TOP 5 WITH TIES a FROM t");
    }

    #[test]
    fn test_roundtrip_joins() {
        assert_roundtrip("SELECT * FROM a JOIN b ON a.id = b.id");
        assert_roundtrip("SELECT * FROM a LEFT JOIN b ON a.id = b.id");
        assert_roundtrip("SELECT * FROM a RIGHT JOIN b ON a.id = b.id");
        assert_roundtrip("SELECT * FROM a FULL JOIN b ON a.id = b.id");
        assert_roundtrip("SELECT * FROM a CROSS JOIN b");
        assert_roundtrip("SELECT * FROM a NATURAL JOIN b");
        assert_roundtrip("SELECT * FROM a JOIN b USING (id, kind)");
        assert_roundtrip("SELECT * FROM a, b WHERE a.x = b.x");
        assert_roundtrip("SELECT * FROM (a JOIN b ON a.id = b.id) JOIN c ON b.id = c.id");
        assert_renders_as(
            "SELECT * FROM a INNER JOIN b ON a.id = b.id",
            "SELECT * FROM a JOIN b ON a.id = b.id",
        );
        assert_renders_as(
            "SELECT * FROM a LEFT OUTER JOIN b ON TRUE",
            "SELECT * FROM a LEFT JOIN b ON TRUE",
        );
    }

    #[test]
    fn test_roundtrip_derived_tables() {
        assert_roundtrip("SELECT * FROM (SELECT 1 AS x) AS sub");
        assert_roundtrip("SELECT * FROM (SELECT 1) AS sub (x)");
        assert_roundtrip("SELECT * FROM LATERAL (SELECT a FROM t) AS l");
        assert_roundtrip("SELECT * FROM generate_series(1, 10) AS g");
    }

    #[test]
    fn test_roundtrip_group_by_having_window() {
        assert_roundtrip("SELECT a, count(*) FROM t GROUP BY a");
        assert_roundtrip("SELECT a, count(*) FROM t GROUP BY a HAVING count(*) > 1");
        assert_roundtrip("SELECT a FROM t GROUP BY ROLLUP (a, b)");
        assert_roundtrip("SELECT a FROM t GROUP BY CUBE (a, (b, c))");
        assert_roundtrip("SELECT a FROM t GROUP BY GROUPING SETS ((a), (b, c), ())");
        assert_roundtrip("SELECT sum(x) OVER w FROM t WINDOW w AS (PARTITION BY g ORDER BY x)");
    }

    #[test]
    fn test_roundtrip_set_operations() {
        assert_roundtrip("SELECT 1 UNION SELECT 2");
        assert_roundtrip("SELECT 1 UNION ALL SELECT 2");
        assert_roundtrip("SELECT 1 EXCEPT SELECT 2");
        assert_roundtrip("SELECT 1 INTERSECT SELECT 2");
        assert_roundtrip("(SELECT 1 ORDER BY 1) UNION SELECT 2");
    }

    #[test]
    fn test_set_operation_precedence_intersect_binds_tighter() {
        // a UNION b INTERSECT c == a UNION (b INTERSECT c)
        let stmt = parse_one("SELECT 1 UNION SELECT 2 INTERSECT SELECT 3");
        let Statement::Query(query) = stmt else {
            panic!("expected query");
        };
        let SetExpr::SetOperation { op, right, .. } = query.body.as_ref() else {
            panic!("expected set operation");
        };
        assert_eq!(*op, SetOperator::Union);
        assert!(matches!(
            right.as_ref(),
            SetExpr::SetOperation {
                op: SetOperator::Intersect,
                ..
            }
        ));
    }

    #[test]
    fn test_roundtrip_ctes() {
        assert_roundtrip("WITH cte AS (SELECT 1 AS n) SELECT * FROM cte");
        assert_roundtrip("WITH cte (a, b) AS (SELECT 1, 2) SELECT a FROM cte");
        assert_roundtrip(
            "WITH RECURSIVE cnt (x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM cnt WHERE x < 10) SELECT * FROM cnt",
        );
        assert_roundtrip("WITH a AS (SELECT 1), b AS (SELECT 2) SELECT * FROM a, b");
    }

    #[test]
    fn test_roundtrip_values() {
        assert_roundtrip("VALUES (1, 'a'), (2, 'b')");
        assert_roundtrip("SELECT * FROM (VALUES (1), (2)) AS v (n)");
    }

    // -- DML -----------------------------------------------------------------

    #[test]
    fn test_roundtrip_insert() {
        assert_roundtrip("INSERT INTO t (a, b) VALUES (1, 2)");
        assert_roundtrip("INSERT INTO t VALUES (1), (2)");
        assert_roundtrip("INSERT INTO t (a) SELECT x FROM u");
        assert_roundtrip("INSERT INTO s.t (a) VALUES (?)");
    }

    #[test]
    fn test_roundtrip_update() {
        assert_roundtrip("UPDATE t SET a = 1");
        assert_roundtrip("UPDATE t SET a = 1, b = b + 1 WHERE c > 3");
        assert_roundtrip("UPDATE t SET a = 1 FROM u WHERE t.id = u.id");
        assert_roundtrip("UPDATE t AS x SET x.a = 2 WHERE x.b IS NULL");
    }

    #[test]
    fn test_roundtrip_delete() {
        assert_roundtrip("DELETE FROM t");
        assert_roundtrip("DELETE FROM t WHERE a = 1");
        assert_roundtrip("DELETE FROM t USING u WHERE t.id = u.id");
    }

    // -- DDL -----------------------------------------------------------------

    #[test]
    fn test_roundtrip_create_table() {
        assert_roundtrip("CREATE TABLE t (a INT, b VARCHAR(255))");
        assert_roundtrip("CREATE TABLE IF NOT EXISTS t (a INT NOT NULL)");
        assert_roundtrip("CREATE TABLE t (a INT PRIMARY KEY, b INT UNIQUE)");
        assert_roundtrip("CREATE TABLE t (a INT DEFAULT 0, b INT CHECK (b > 0))");
        assert_roundtrip("CREATE TABLE t (a INT REFERENCES u (id))");
        assert_roundtrip(
            "CREATE TABLE t (a INT, b INT, CONSTRAINT pk PRIMARY KEY (a), UNIQUE (b), FOREIGN KEY (b) REFERENCES u (id), CHECK (a < b))",
        );
        assert_roundtrip("CREATE TABLE t AS SELECT a, b FROM u");
        assert_roundtrip("CREATE OR REPLACE TABLE t (a INT)");
        assert_roundtrip("CREATE TABLE t (a DECIMAL(10, 2), b TIMESTAMP, c UUID, d JSON)");
    }

    #[test]
    fn test_roundtrip_create_table_array_types() {
        // The bracket style used in the source is preserved in the AST and
        // reproduced by the renderer.
        assert_renders_as(
            "CREATE TABLE t (a INT ARRAY[3], b INT[])",
            "CREATE TABLE t (a INT[3], b INT[])",
        );
        assert_roundtrip("CREATE TABLE t (a INT[3], b INT[], c ARRAY<INT>, d ARRAY(INT))");
        assert_roundtrip("CREATE TABLE t (m ARRAY<VARCHAR(10)>)");
    }

    #[test]
    fn test_roundtrip_create_view_index() {
        assert_roundtrip("CREATE VIEW v AS SELECT a FROM t");
        assert_roundtrip("CREATE OR REPLACE VIEW v (a, b) AS SELECT 1, 2");
        assert_roundtrip("CREATE MATERIALIZED VIEW v AS SELECT a FROM t");
        assert_roundtrip("CREATE INDEX idx ON t(a)");
        assert_roundtrip("CREATE UNIQUE INDEX idx ON t(a DESC, b)");
        assert_roundtrip("CREATE INDEX IF NOT EXISTS idx ON s.t(a)");
    }

    #[test]
    fn test_roundtrip_alter_table() {
        assert_roundtrip("ALTER TABLE t ADD COLUMN c INT NOT NULL");
        assert_roundtrip("ALTER TABLE t DROP COLUMN c");
        assert_roundtrip("ALTER TABLE t DROP COLUMN IF EXISTS c CASCADE");
        assert_roundtrip("ALTER TABLE t RENAME COLUMN a TO b");
        assert_roundtrip("ALTER TABLE t RENAME TO u");
        assert_roundtrip("ALTER TABLE t ADD CONSTRAINT ck CHECK (a > 0)");
        assert_roundtrip("ALTER TABLE t DROP CONSTRAINT ck");
    }

    #[test]
    fn test_roundtrip_drop_truncate() {
        assert_roundtrip("DROP TABLE t");
        assert_roundtrip("DROP TABLE IF EXISTS t, u CASCADE");
        assert_roundtrip("DROP VIEW v");
        assert_roundtrip("DROP INDEX idx");
        assert_roundtrip("DROP SCHEMA s");
        assert_roundtrip("TRUNCATE TABLE t");
        assert_renders_as("TRUNCATE t", "TRUNCATE TABLE t");
    }

    // -- Transactions, SET, USE, GRANT ----------------------------------------

    #[test]
    fn test_roundtrip_transactions() {
        assert_roundtrip("START TRANSACTION");
        assert_roundtrip("START TRANSACTION READ ONLY");
        assert_roundtrip("START TRANSACTION ISOLATION LEVEL SERIALIZABLE, READ WRITE");
        assert_roundtrip("START TRANSACTION ISOLATION LEVEL REPEATABLE READ");
        assert_roundtrip("COMMIT");
        assert_roundtrip("COMMIT AND CHAIN");
        assert_roundtrip("ROLLBACK");
        assert_roundtrip("ROLLBACK AND CHAIN");
        assert_renders_as("BEGIN", "START TRANSACTION");
        assert_renders_as("COMMIT AND NO CHAIN", "COMMIT");
    }

    #[test]
    fn test_roundtrip_set_use_grant() {
        assert_roundtrip("SET search_path = 'public'");
        assert_roundtrip("SET LOCAL timezone = 'UTC'");
        assert_roundtrip("SET (a, b) = (1, 2)");
        assert_roundtrip("USE analytics");
        assert_roundtrip("GRANT SELECT, INSERT ON t TO reporting");
        assert_roundtrip("GRANT ALL PRIVILEGES ON t, u TO admin WITH GRANT OPTION");
        assert_roundtrip("GRANT USAGE ON SCHEMA s TO app");
        assert_roundtrip("GRANT SELECT ON ALL TABLES IN SCHEMA s TO readonly");
    }

    #[test]
    fn test_set_parenthesized_requires_matching_arity() {
        let err = parse_err("SET (a, b) = (1, 2, 3)");
        assert!(err.message.contains("2 variables from 3 values"));
    }

    // -- Statement sequencing --------------------------------------------------

    #[test]
    fn test_multiple_statements_and_empty_statements() {
        let statements =
            Parser::parse_sql(&GenericDialect, "SELECT 1; ; SELECT 2;;; SELECT 3;").unwrap();
        assert_eq!(statements.len(), 3);
    }

    #[test]
    fn test_missing_semicolon_between_statements_is_error() {
        let err = parse_err("SELECT 1 SELECT 2");
        assert!(err.message.contains("end of statement"), "{}", err.message);
    }

    #[test]
    fn test_error_carries_position() {
        let err = parse_err("SELECT a FROM t WHERE\n  ORDER BY a");
        assert_eq!(err.line, 2);
        assert_eq!(err.col, 3);
    }

    #[test]
    fn test_tokenizer_error_surfaces_through_parse_sql() {
        let err = parse_err("SELECT 'unterminated");
        assert!(err.message.contains("unterminated string"));
        assert_eq!(err.col, 8);
    }

    #[test]
    fn test_metrics_count_statements() {
        let before = parse_metrics_snapshot().varisql_parse_statements_total;
        let _ = Parser::parse_sql(&GenericDialect, "SELECT 1; SELECT 2").unwrap();
        let after = parse_metrics_snapshot().varisql_parse_statements_total;
        assert!(after >= before + 2);
    }

    // -- Dialect gates ---------------------------------------------------------

    /// A dialect that keeps every optional capability off.
    #[derive(Debug)]
    struct StrictDialect;
    impl Dialect for StrictDialect {
        fn is_identifier_start(&self, ch: char) -> bool {
            ch.is_alphabetic() || ch == '_'
        }
        fn is_identifier_part(&self, ch: char) -> bool {
            ch.is_alphanumeric() || ch == '_'
        }
    }

    /// GenericDialect plus trailing commas.
    #[derive(Debug)]
    struct TrailingCommaDialect;
    impl Dialect for TrailingCommaDialect {
        fn is_identifier_start(&self, ch: char) -> bool {
            GenericDialect.is_identifier_start(ch)
        }
        fn is_identifier_part(&self, ch: char) -> bool {
            GenericDialect.is_identifier_part(ch)
        }
        fn supports_trailing_commas(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_projection_trailing_comma_gated() {
        let stmt = Parser::parse_sql(&TrailingCommaDialect, "SELECT a, b, FROM t")
            .unwrap()
            .pop()
            .unwrap();
        // The trailing comma is normalised away on render.
        assert_eq!(stmt.to_string(), "SELECT a, b FROM t");

        let err = Parser::parse_sql(&GenericDialect, "SELECT a, b, FROM t")
            .expect_err("trailing commas are off in GenericDialect");
        assert!(err.message.contains("expected"));
    }

    #[test]
    fn test_in_list_trailing_comma_gated() {
        let stmt = Parser::parse_sql(&TrailingCommaDialect, "SELECT 1 IN (1, 2,)")
            .unwrap()
            .pop()
            .unwrap();
        assert_eq!(stmt.to_string(), "SELECT 1 IN (1, 2)");
    }

    #[test]
    fn test_group_by_expression_gated() {
        // With the capability, ROLLUP is a grouping construct.
        let stmt = parse_one("SELECT a FROM t GROUP BY ROLLUP (a)");
        let Statement::Query(query) = &stmt else {
            panic!("expected query");
        };
        let SetExpr::Select(select) = query.body.as_ref() else {
            panic!("expected select");
        };
        assert!(matches!(select.group_by[0], Expr::Rollup(_)));

        // Without it, the same text reads as an ordinary function call.
        let stmt = Parser::parse_sql(&StrictDialect, "SELECT a FROM t GROUP BY ROLLUP (a)")
            .unwrap()
            .pop()
            .unwrap();
        let Statement::Query(query) = &stmt else {
            panic!("expected query");
        };
        let SetExpr::Select(select) = query.body.as_ref() else {
            panic!("expected select");
        };
        assert!(matches!(select.group_by[0], Expr::Function(_)));
    }

    #[test]
    fn test_start_transaction_modifier_gated() {
        assert!(Parser::parse_sql(&StrictDialect, "START TRANSACTION READ ONLY").is_err());
        assert!(Parser::parse_sql(&StrictDialect, "START TRANSACTION").is_ok());
    }

    #[test]
    fn test_parenthesized_set_variables_gated() {
        let err = Parser::parse_sql(&StrictDialect, "SET (a, b) = (1, 2)")
            .expect_err("parenthesized SET is gated");
        assert!(err.message.contains("not supported"));
    }

    #[test]
    fn test_select_wildcard_except_gated() {
        let stmt = parse_one("SELECT * EXCEPT (a, b) FROM t");
        assert_eq!(stmt.to_string(), "SELECT * EXCEPT (a, b) FROM t");
        // With the flag off, EXCEPT reads as a set operation and the
        // parenthesized identifier list is not a query.
        assert!(Parser::parse_sql(&StrictDialect, "SELECT * EXCEPT (a, b) FROM t").is_err());
    }

    #[test]
    fn test_connect_by_gated() {
        #[derive(Debug)]
        struct ConnectByDialect;
        impl Dialect for ConnectByDialect {
            fn is_identifier_start(&self, ch: char) -> bool {
                GenericDialect.is_identifier_start(ch)
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                GenericDialect.is_identifier_part(ch)
            }
            fn supports_connect_by(&self) -> bool {
                true
            }
        }
        let sql = "SELECT name FROM emp START WITH mgr IS NULL CONNECT BY mgr = id";
        let stmt = Parser::parse_sql(&ConnectByDialect, sql).unwrap().pop().unwrap();
        assert_eq!(stmt.to_string(), sql);
        assert!(Parser::parse_sql(&GenericDialect, sql).is_err());
    }

    #[test]
    fn test_match_recognize_gated() {
        #[derive(Debug)]
        struct MatchRecognizeDialect;
        impl Dialect for MatchRecognizeDialect {
            fn is_identifier_start(&self, ch: char) -> bool {
                GenericDialect.is_identifier_start(ch)
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                GenericDialect.is_identifier_part(ch)
            }
            fn supports_match_recognize(&self) -> bool {
                true
            }
        }
        let sql = "SELECT * FROM ticks MATCH_RECOGNIZE (PARTITION BY sym ORDER BY ts MEASURES first(price) AS start_price PATTERN (down+ up+) DEFINE down AS price < 10, up AS price > 10) AS m";
        let stmt = Parser::parse_sql(&MatchRecognizeDialect, sql)
            .unwrap()
            .pop()
            .unwrap();
        assert_eq!(stmt.to_string(), sql);
        assert!(Parser::parse_sql(&GenericDialect, sql).is_err());
    }

    // -- Dialect hooks -----------------------------------------------------------

    #[test]
    fn test_dialect_statement_hook_wins_over_builtin_dispatch() {
        #[derive(Debug)]
        struct PingDialect;
        impl Dialect for PingDialect {
            fn is_identifier_start(&self, ch: char) -> bool {
                ch.is_alphabetic()
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                ch.is_alphanumeric()
            }
            fn parse_statement(
                &self,
                parser: &mut Parser,
            ) -> Option<Result<Statement, ParserError>> {
                match parser.peek() {
                    TokenKind::Word(w) if w.value.eq_ignore_ascii_case("ping") => {
                        parser.advance();
                        Some(Ok(Statement::Commit { chain: false }))
                    }
                    _ => None,
                }
            }
        }
        let statements = Parser::parse_sql(&PingDialect, "PING; SELECT 1").unwrap();
        assert_eq!(statements[0], Statement::Commit { chain: false });
        assert!(matches!(statements[1], Statement::Query(_)));
    }

    #[test]
    fn test_checkpoint_rewind_roundtrip() {
        let dialect = GenericDialect;
        let tokens = Lexer::new("a b c", &dialect).tokenize().unwrap();
        let mut parser = Parser::new(tokens, &dialect);
        let cp = parser.checkpoint();
        let _ = parser.parse_identifier().unwrap();
        let _ = parser.parse_identifier().unwrap();
        parser.rewind(cp);
        assert_eq!(parser.parse_identifier().unwrap(), Ident::new("a"));
    }
}
