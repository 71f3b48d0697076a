//! Pratt expression parser.
//!
//! `parse_subexpr` drives the precedence climb: a prefix (nud) parse
//! followed by an infix loop that continues while the next token binds
//! tighter than `min_prec`. The dialect is consulted first at every prefix
//! and infix position and may override the next token's precedence; the
//! effective precedence is the maximum of the dialect's answer and the
//! built-in ladder.
//!
//! Built-in ladder, loosest to tightest: OR, AND, prefix NOT, IS and
//! comparisons, BETWEEN/IN/LIKE, `||`/`|`, `&`, shifts, additive,
//! multiplicative, `::`, `^` (right-associative), unary prefix,
//! subscript/COLLATE.

use varisql_ast::{
    ArrayElemTypeDef, BinaryOperator, DataType, DateTimeField, DictionaryField, Expr, Function,
    FunctionArg, FunctionArgExpr, FunctionArgOperator, Ident, JsonOperator, LambdaFunction,
    NullTreatment, ObjectName, TrimWhereField, UnaryOperator, Value, WindowFrame,
    WindowFrameBound, WindowFrameUnits, WindowSpec, WindowType,
};

use crate::parser::{word_to_ident, Parser, ParserError};
use crate::token::{Keyword, Token, TokenKind, Word};

/// Precedence tiers, loosest binding first.
pub mod prec {
    pub const OR: u8 = 5;
    pub const AND: u8 = 10;
    /// Right binding power of prefix NOT.
    pub const UNARY_NOT: u8 = 15;
    /// `= < > <= >= <> !=`, `IS`, `AT TIME ZONE`.
    pub const COMPARISON: u8 = 20;
    pub const BETWEEN_LIKE: u8 = 22;
    /// `||`, `|`, and the JSON access operators.
    pub const PIPE: u8 = 25;
    pub const AMPERSAND: u8 = 27;
    pub const SHIFT: u8 = 30;
    pub const PLUS_MINUS: u8 = 35;
    pub const MUL_DIV_MOD: u8 = 40;
    pub const DOUBLE_COLON: u8 = 50;
    /// `^`, right-associative.
    pub const CARET: u8 = 52;
    /// Right binding power of `- + ~ |/ ||/`.
    pub const UNARY: u8 = 55;
    /// `[`, `.`, COLLATE.
    pub const SUBSCRIPT: u8 = 60;
}

/// Keywords that can never begin an expression as a bare identifier.
const RESERVED_IN_EXPR: &[Keyword] = &[
    Keyword::Select,
    Keyword::From,
    Keyword::Where,
    Keyword::Group,
    Keyword::Having,
    Keyword::Order,
    Keyword::By,
    Keyword::Union,
    Keyword::Except,
    Keyword::Intersect,
    Keyword::Limit,
    Keyword::Offset,
    Keyword::Fetch,
    Keyword::When,
    Keyword::Then,
    Keyword::Else,
    Keyword::End,
    Keyword::On,
    Keyword::Join,
    Keyword::Inner,
    Keyword::Outer,
    Keyword::Cross,
    Keyword::Using,
    Keyword::And,
    Keyword::Or,
    Keyword::As,
    Keyword::Distinct,
    Keyword::Into,
    Keyword::Values,
    Keyword::Set,
    Keyword::Is,
    Keyword::In,
    Keyword::Between,
    Keyword::Like,
    Keyword::ILike,
    Keyword::Collate,
];

impl Parser<'_> {
    /// Parse a complete expression.
    pub fn parse_expr(&mut self) -> Result<Expr, ParserError> {
        self.parse_subexpr(0)
    }

    /// Parse an expression whose operators all bind tighter than
    /// `min_prec`. This is the Pratt core.
    pub fn parse_subexpr(&mut self, min_prec: u8) -> Result<Expr, ParserError> {
        self.enter_recursion()?;
        let result = self.parse_subexpr_inner(min_prec);
        self.leave_recursion();
        result
    }

    fn parse_subexpr_inner(&mut self, min_prec: u8) -> Result<Expr, ParserError> {
        let dialect = self.dialect();
        let mut expr = match dialect.parse_prefix(self) {
            Some(result) => result?,
            None => self.parse_prefix()?,
        };
        loop {
            let next_prec = self.next_precedence()?;
            if next_prec <= min_prec {
                break;
            }
            expr = match dialect.parse_infix(self, &expr, next_prec) {
                Some(result) => result?,
                None => self.parse_infix(expr, next_prec)?,
            };
        }
        Ok(expr)
    }

    /// The precedence of the parser's next token: the maximum of the
    /// dialect's answer and the built-in table.
    pub fn next_precedence(&self) -> Result<u8, ParserError> {
        let builtin = self.builtin_precedence();
        if let Some(result) = self.dialect().get_next_precedence(self) {
            return Ok(result?.max(builtin));
        }
        Ok(builtin)
    }

    fn builtin_precedence(&self) -> u8 {
        match self.peek() {
            TokenKind::Word(w) if w.quote_style.is_none() => match w.keyword {
                Some(Keyword::Or) => prec::OR,
                Some(Keyword::And) => prec::AND,
                Some(Keyword::Is) => prec::COMPARISON,
                Some(Keyword::In | Keyword::Between | Keyword::Like | Keyword::ILike) => {
                    prec::BETWEEN_LIKE
                }
                Some(Keyword::Not) => match self.keyword_at(1) {
                    Some(
                        Keyword::In | Keyword::Between | Keyword::Like | Keyword::ILike,
                    ) => prec::BETWEEN_LIKE,
                    _ => 0,
                },
                Some(Keyword::At)
                    if self.keyword_at(1) == Some(Keyword::Time)
                        && self.keyword_at(2) == Some(Keyword::Zone) =>
                {
                    prec::COMPARISON
                }
                Some(Keyword::Collate) => prec::SUBSCRIPT,
                _ => 0,
            },
            TokenKind::Eq
            | TokenKind::Neq
            | TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::LtEq
            | TokenKind::GtEq => prec::COMPARISON,
            TokenKind::StringConcat
            | TokenKind::Pipe
            | TokenKind::Arrow
            | TokenKind::LongArrow
            | TokenKind::HashArrow
            | TokenKind::HashLongArrow
            | TokenKind::AtArrow
            | TokenKind::ArrowAt
            | TokenKind::QuestionPipe
            | TokenKind::QuestionAnd => prec::PIPE,
            TokenKind::Ampersand => prec::AMPERSAND,
            TokenKind::ShiftLeft | TokenKind::ShiftRight => prec::SHIFT,
            TokenKind::Plus | TokenKind::Minus => prec::PLUS_MINUS,
            TokenKind::Mul | TokenKind::Div | TokenKind::Mod => prec::MUL_DIV_MOD,
            TokenKind::DoubleColon => prec::DOUBLE_COLON,
            TokenKind::Caret => prec::CARET,
            TokenKind::LBracket => prec::SUBSCRIPT,
            _ => 0,
        }
    }

    // -----------------------------------------------------------------------
    // Prefix (nud)
    // -----------------------------------------------------------------------

    /// Built-in prefix parser: literals, identifiers, function calls, CASE,
    /// CAST, unary operators, parentheses, subqueries, EXISTS, array
    /// constructors, typed strings, and INTERVAL literals.
    pub fn parse_prefix(&mut self) -> Result<Expr, ParserError> {
        let token = self.advance();
        match &token.kind {
            TokenKind::Number(n) => Ok(Expr::Value(Value::Number(n.clone()))),
            TokenKind::SingleQuotedString(s) => {
                Ok(Expr::Value(Value::SingleQuotedString(s.clone())))
            }
            TokenKind::NationalString(s) => {
                Ok(Expr::Value(Value::NationalStringLiteral(s.clone())))
            }
            TokenKind::HexString(s) => Ok(Expr::Value(Value::HexStringLiteral(s.clone()))),
            TokenKind::BitString(s) => Ok(Expr::Value(Value::BitStringLiteral(s.clone()))),
            TokenKind::Placeholder(s) => Ok(Expr::Value(Value::Placeholder(s.clone()))),
            TokenKind::Word(word) => {
                let word = word.clone();
                self.parse_word_prefix(&word, &token)
            }
            TokenKind::Minus => self.parse_unary(UnaryOperator::Minus),
            TokenKind::Plus => self.parse_unary(UnaryOperator::Plus),
            TokenKind::Tilde => self.parse_unary(UnaryOperator::BitwiseNot),
            TokenKind::PipeSlash => self.parse_unary(UnaryOperator::SquareRoot),
            TokenKind::DoublePipeSlash => self.parse_unary(UnaryOperator::CubeRoot),
            TokenKind::LParen => self.parse_paren_prefix(),
            TokenKind::LBrace => {
                if !self.dialect().supports_dictionary_syntax() {
                    return Err(self.error_at(&token, "dictionary literals are not supported by this dialect"));
                }
                self.parse_dictionary()
            }
            other => Err(self.error_at(
                &token,
                format!("expected an expression, found {other}"),
            )),
        }
    }

    fn parse_unary(&mut self, op: UnaryOperator) -> Result<Expr, ParserError> {
        let expr = self.parse_subexpr(prec::UNARY)?;
        Ok(Expr::UnaryOp {
            op,
            expr: Box::new(expr),
        })
    }

    #[allow(clippy::too_many_lines)]
    fn parse_word_prefix(&mut self, word: &Word, token: &Token) -> Result<Expr, ParserError> {
        if word.quote_style.is_none() {
            match word.keyword {
                Some(Keyword::True) => return Ok(Expr::Value(Value::Boolean(true))),
                Some(Keyword::False) => return Ok(Expr::Value(Value::Boolean(false))),
                Some(Keyword::Null) => return Ok(Expr::Value(Value::Null)),
                Some(Keyword::Case) => return self.parse_case_expr(),
                Some(Keyword::Cast) => return self.parse_cast_expr(),
                Some(Keyword::Convert) => return self.parse_convert_expr(),
                Some(Keyword::Exists) => return self.parse_exists(false),
                Some(Keyword::Extract) => return self.parse_extract_expr(),
                Some(Keyword::Substring) => return self.parse_substring_expr(),
                Some(Keyword::Trim) => return self.parse_trim_expr(),
                Some(Keyword::Position) => return self.parse_position_expr(),
                Some(Keyword::Interval) => return self.parse_interval_expr(),
                Some(Keyword::Not) => {
                    if self.eat_keyword(Keyword::Exists) {
                        return self.parse_exists(true);
                    }
                    let expr = self.parse_subexpr(prec::UNARY_NOT)?;
                    return Ok(Expr::UnaryOp {
                        op: UnaryOperator::Not,
                        expr: Box::new(expr),
                    });
                }
                Some(Keyword::Array) if self.check_token(&TokenKind::LBracket) => {
                    self.advance();
                    let elements = if self.check_token(&TokenKind::RBracket) {
                        Vec::new()
                    } else {
                        self.parse_comma_separated(Parser::parse_expr)?
                    };
                    self.expect_token(&TokenKind::RBracket)?;
                    return Ok(Expr::Array(elements));
                }
                Some(Keyword::Date | Keyword::Time | Keyword::Timestamp)
                    if matches!(self.peek(), TokenKind::SingleQuotedString(_)) =>
                {
                    let data_type = match word.keyword {
                        Some(Keyword::Date) => DataType::Date,
                        Some(Keyword::Time) => DataType::Time,
                        _ => DataType::Timestamp,
                    };
                    let TokenKind::SingleQuotedString(value) = self.advance().kind else {
                        unreachable!("peeked a single-quoted string");
                    };
                    return Ok(Expr::TypedString { data_type, value });
                }
                Some(kw) if RESERVED_IN_EXPR.contains(&kw) => {
                    return Err(self.error_at(
                        token,
                        format!("expected an expression, found {}", word.value),
                    ));
                }
                _ => {}
            }
        }
        self.parse_identifier_prefix(word_to_ident(word))
    }

    /// Continue a word into a compound identifier, qualified wildcard,
    /// function call, lambda, or plain identifier.
    fn parse_identifier_prefix(&mut self, first: Ident) -> Result<Expr, ParserError> {
        let mut parts = vec![first];
        loop {
            if !self.check_token(&TokenKind::Period) {
                break;
            }
            match self.peek_nth(1) {
                TokenKind::Word(_) => {
                    self.advance();
                    parts.push(self.parse_identifier()?);
                }
                TokenKind::Mul => {
                    self.advance();
                    self.advance();
                    return Ok(Expr::QualifiedWildcard(ObjectName::new(parts)));
                }
                _ => break,
            }
        }

        if self.check_token(&TokenKind::LParen) {
            return self.parse_function(ObjectName::new(parts));
        }
        if parts.len() > 1 {
            return Ok(Expr::CompoundIdentifier(parts));
        }
        let ident = parts.pop().expect("one identifier part");

        if self.dialect().supports_lambda_functions() && self.eat_token(&TokenKind::Arrow) {
            let body = self.parse_expr()?;
            return Ok(Expr::Lambda(LambdaFunction {
                params: vec![ident],
                body: Box::new(body),
            }));
        }
        Ok(Expr::Identifier(ident))
    }

    /// After `(`: subquery, nested expression, tuple, or lambda parameter
    /// list.
    fn parse_paren_prefix(&mut self) -> Result<Expr, ParserError> {
        if matches!(
            self.peek_keyword(),
            Some(Keyword::Select | Keyword::With | Keyword::Values)
        ) {
            let query = self.parse_query()?;
            self.expect_token(&TokenKind::RParen)?;
            return Ok(Expr::Subquery(Box::new(query)));
        }

        let mut exprs = self.parse_comma_separated(Parser::parse_expr)?;
        self.expect_token(&TokenKind::RParen)?;

        // `(x) -> x + 1` / `(a, b) -> a + b` lambda parameter lists.
        if self.dialect().supports_lambda_functions()
            && self.check_token(&TokenKind::Arrow)
            && exprs.iter().all(|e| matches!(e, Expr::Identifier(_)))
        {
            self.advance();
            let params = exprs
                .into_iter()
                .map(|e| match e {
                    Expr::Identifier(id) => id,
                    _ => unreachable!("checked all elements are identifiers"),
                })
                .collect();
            let body = self.parse_expr()?;
            return Ok(Expr::Lambda(LambdaFunction {
                params,
                body: Box::new(body),
            }));
        }

        if exprs.len() == 1 {
            return Ok(Expr::Nested(Box::new(exprs.pop().expect("one element"))));
        }
        Ok(Expr::Tuple(exprs))
    }

    fn parse_dictionary(&mut self) -> Result<Expr, ParserError> {
        let fields = self.parse_comma_separated(|parser| {
            let key = match parser.peek().clone() {
                TokenKind::SingleQuotedString(s) => {
                    parser.advance();
                    Ident::new(s)
                }
                TokenKind::Word(_) => parser.parse_identifier()?,
                _ => return Err(parser.expected("a dictionary key")),
            };
            parser.expect_token(&TokenKind::Colon)?;
            let value = parser.parse_expr()?;
            Ok(DictionaryField {
                key,
                value: Box::new(value),
            })
        })?;
        self.expect_token(&TokenKind::RBrace)?;
        Ok(Expr::Dictionary(fields))
    }

    // -----------------------------------------------------------------------
    // Infix (led)
    // -----------------------------------------------------------------------

    /// Built-in infix parser for the token at the head of the stream, with
    /// `lhs` already parsed. `precedence` is the binding power the Pratt
    /// loop looked up for that token.
    #[allow(clippy::too_many_lines)]
    pub fn parse_infix(&mut self, lhs: Expr, precedence: u8) -> Result<Expr, ParserError> {
        let token = self.advance();

        let regular = match &token.kind {
            TokenKind::Plus => Some(BinaryOperator::Plus),
            TokenKind::Minus => Some(BinaryOperator::Minus),
            TokenKind::Mul => Some(BinaryOperator::Multiply),
            TokenKind::Div => Some(BinaryOperator::Divide),
            TokenKind::Mod => Some(BinaryOperator::Modulo),
            TokenKind::StringConcat => Some(BinaryOperator::StringConcat),
            TokenKind::Pipe => Some(BinaryOperator::BitwiseOr),
            TokenKind::Ampersand => Some(BinaryOperator::BitwiseAnd),
            TokenKind::ShiftLeft => Some(BinaryOperator::ShiftLeft),
            TokenKind::ShiftRight => Some(BinaryOperator::ShiftRight),
            TokenKind::Eq => Some(BinaryOperator::Eq),
            TokenKind::Neq => Some(BinaryOperator::NotEq),
            TokenKind::Lt => Some(BinaryOperator::Lt),
            TokenKind::Gt => Some(BinaryOperator::Gt),
            TokenKind::LtEq => Some(BinaryOperator::LtEq),
            TokenKind::GtEq => Some(BinaryOperator::GtEq),
            _ => None,
        };
        if let Some(op) = regular {
            // Left-associative: recurse at the operator's own precedence.
            let rhs = self.parse_subexpr(precedence)?;
            return Ok(Expr::BinaryOp {
                left: Box::new(lhs),
                op,
                right: Box::new(rhs),
            });
        }

        match &token.kind {
            // Right-associative exponentiation recurses one tier looser.
            TokenKind::Caret => {
                let rhs = self.parse_subexpr(precedence - 1)?;
                Ok(Expr::BinaryOp {
                    left: Box::new(lhs),
                    op: BinaryOperator::Power,
                    right: Box::new(rhs),
                })
            }
            TokenKind::DoubleColon => Ok(Expr::Cast {
                expr: Box::new(lhs),
                data_type: self.parse_data_type()?,
            }),
            TokenKind::LBracket => {
                let index = self.parse_expr()?;
                self.expect_token(&TokenKind::RBracket)?;
                Ok(match lhs {
                    Expr::ArrayIndex { obj, mut indexes } => {
                        indexes.push(index);
                        Expr::ArrayIndex { obj, indexes }
                    }
                    other => Expr::ArrayIndex {
                        obj: Box::new(other),
                        indexes: vec![index],
                    },
                })
            }
            TokenKind::Arrow => self.parse_json_access(lhs, JsonOperator::Arrow, precedence),
            TokenKind::LongArrow => self.parse_json_access(lhs, JsonOperator::LongArrow, precedence),
            TokenKind::HashArrow => self.parse_json_access(lhs, JsonOperator::HashArrow, precedence),
            TokenKind::HashLongArrow => {
                self.parse_json_access(lhs, JsonOperator::HashLongArrow, precedence)
            }
            TokenKind::AtArrow => self.parse_json_access(lhs, JsonOperator::AtArrow, precedence),
            TokenKind::ArrowAt => self.parse_json_access(lhs, JsonOperator::ArrowAt, precedence),
            TokenKind::QuestionPipe => {
                self.parse_json_access(lhs, JsonOperator::QuestionPipe, precedence)
            }
            TokenKind::QuestionAnd => {
                self.parse_json_access(lhs, JsonOperator::QuestionAnd, precedence)
            }
            TokenKind::Word(w) if w.quote_style.is_none() => match w.keyword {
                Some(Keyword::And) => {
                    let rhs = self.parse_subexpr(precedence)?;
                    Ok(Expr::BinaryOp {
                        left: Box::new(lhs),
                        op: BinaryOperator::And,
                        right: Box::new(rhs),
                    })
                }
                Some(Keyword::Or) => {
                    let rhs = self.parse_subexpr(precedence)?;
                    Ok(Expr::BinaryOp {
                        left: Box::new(lhs),
                        op: BinaryOperator::Or,
                        right: Box::new(rhs),
                    })
                }
                Some(Keyword::Is) => self.parse_is(lhs),
                Some(Keyword::In) => self.parse_in(lhs, false),
                Some(Keyword::Between) => self.parse_between(lhs, false),
                Some(Keyword::Like) => self.parse_like(lhs, false, false),
                Some(Keyword::ILike) => self.parse_like(lhs, false, true),
                Some(Keyword::Not) => {
                    if self.eat_keyword(Keyword::In) {
                        self.parse_in(lhs, true)
                    } else if self.eat_keyword(Keyword::Between) {
                        self.parse_between(lhs, true)
                    } else if self.eat_keyword(Keyword::Like) {
                        self.parse_like(lhs, true, false)
                    } else if self.eat_keyword(Keyword::ILike) {
                        self.parse_like(lhs, true, true)
                    } else {
                        Err(self.expected("IN, BETWEEN, LIKE, or ILIKE after NOT"))
                    }
                }
                Some(Keyword::At) => {
                    self.expect_keyword(Keyword::Time)?;
                    self.expect_keyword(Keyword::Zone)?;
                    let time_zone = match self.peek().clone() {
                        TokenKind::SingleQuotedString(tz) => {
                            self.advance();
                            tz
                        }
                        _ => return Err(self.expected("a time zone string")),
                    };
                    Ok(Expr::AtTimeZone {
                        timestamp: Box::new(lhs),
                        time_zone,
                    })
                }
                Some(Keyword::Collate) => Ok(Expr::Collate {
                    expr: Box::new(lhs),
                    collation: self.parse_object_name()?,
                }),
                _ => Err(self.error_at(
                    &token,
                    format!("no infix parser for {}", w.value),
                )),
            },
            other => Err(self.error_at(&token, format!("no infix parser for {other}"))),
        }
    }

    fn parse_json_access(
        &mut self,
        lhs: Expr,
        operator: JsonOperator,
        precedence: u8,
    ) -> Result<Expr, ParserError> {
        let rhs = self.parse_subexpr(precedence)?;
        Ok(Expr::JsonAccess {
            left: Box::new(lhs),
            operator,
            right: Box::new(rhs),
        })
    }

    /// `IS [NOT] NULL | TRUE | FALSE | DISTINCT FROM expr`.
    fn parse_is(&mut self, lhs: Expr) -> Result<Expr, ParserError> {
        if self.eat_keyword(Keyword::Null) {
            return Ok(Expr::IsNull(Box::new(lhs)));
        }
        if self.eat_keywords(&[Keyword::Not, Keyword::Null]) {
            return Ok(Expr::IsNotNull(Box::new(lhs)));
        }
        if self.eat_keyword(Keyword::True) {
            return Ok(Expr::IsTrue(Box::new(lhs)));
        }
        if self.eat_keyword(Keyword::False) {
            return Ok(Expr::IsFalse(Box::new(lhs)));
        }
        if self.eat_keywords(&[Keyword::Distinct, Keyword::From]) {
            let rhs = self.parse_subexpr(prec::COMPARISON)?;
            return Ok(Expr::IsDistinctFrom(Box::new(lhs), Box::new(rhs)));
        }
        if self.eat_keywords(&[Keyword::Not, Keyword::Distinct, Keyword::From]) {
            let rhs = self.parse_subexpr(prec::COMPARISON)?;
            return Ok(Expr::IsNotDistinctFrom(Box::new(lhs), Box::new(rhs)));
        }
        Err(self.expected("NULL, TRUE, FALSE, or [NOT] DISTINCT FROM after IS"))
    }

    /// `[NOT] IN (list | subquery)`. The empty list is dialect-gated.
    fn parse_in(&mut self, lhs: Expr, negated: bool) -> Result<Expr, ParserError> {
        self.expect_token(&TokenKind::LParen)?;

        if matches!(
            self.peek_keyword(),
            Some(Keyword::Select | Keyword::With | Keyword::Values)
        ) {
            let subquery = self.parse_query()?;
            self.expect_token(&TokenKind::RParen)?;
            return Ok(Expr::InSubquery {
                expr: Box::new(lhs),
                subquery: Box::new(subquery),
                negated,
            });
        }

        if self.check_token(&TokenKind::RParen) {
            if !self.dialect().supports_in_empty_list() {
                return Err(self.error_here("empty IN lists are not supported by this dialect"));
            }
            self.advance();
            return Ok(Expr::InList {
                expr: Box::new(lhs),
                list: Vec::new(),
                negated,
            });
        }

        let list = self.parse_comma_separated(Parser::parse_expr)?;
        self.expect_token(&TokenKind::RParen)?;
        Ok(Expr::InList {
            expr: Box::new(lhs),
            list,
            negated,
        })
    }

    /// `[NOT] BETWEEN low AND high`. Bounds are parsed above AND so the
    /// separator keyword is never captured by a bound.
    fn parse_between(&mut self, lhs: Expr, negated: bool) -> Result<Expr, ParserError> {
        let low = self.parse_subexpr(prec::BETWEEN_LIKE)?;
        self.expect_keyword(Keyword::And)?;
        let high = self.parse_subexpr(prec::BETWEEN_LIKE)?;
        Ok(Expr::Between {
            expr: Box::new(lhs),
            negated,
            low: Box::new(low),
            high: Box::new(high),
        })
    }

    /// `[NOT] LIKE | ILIKE pattern [ESCAPE 'c']`.
    fn parse_like(&mut self, lhs: Expr, negated: bool, ilike: bool) -> Result<Expr, ParserError> {
        let pattern = self.parse_subexpr(prec::BETWEEN_LIKE)?;
        let escape_char = if self.eat_keyword(Keyword::Escape) {
            match self.peek().clone() {
                TokenKind::SingleQuotedString(s) if s.chars().count() == 1 => {
                    self.advance();
                    s.chars().next()
                }
                _ => return Err(self.expected("a single-character string after ESCAPE")),
            }
        } else {
            None
        };
        let (expr, pattern) = (Box::new(lhs), Box::new(pattern));
        Ok(if ilike {
            Expr::ILike {
                negated,
                expr,
                pattern,
                escape_char,
            }
        } else {
            Expr::Like {
                negated,
                expr,
                pattern,
                escape_char,
            }
        })
    }

    // -----------------------------------------------------------------------
    // Special expression forms
    // -----------------------------------------------------------------------

    fn parse_case_expr(&mut self) -> Result<Expr, ParserError> {
        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        let mut whens = Vec::new();
        while self.eat_keyword(Keyword::When) {
            let condition = self.parse_expr()?;
            self.expect_keyword(Keyword::Then)?;
            let result = self.parse_expr()?;
            whens.push((condition, result));
        }
        if whens.is_empty() {
            return Err(self.expected("WHEN in CASE expression"));
        }
        let else_result = if self.eat_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;
        Ok(Expr::Case {
            operand,
            whens,
            else_result,
        })
    }

    fn parse_cast_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_token(&TokenKind::LParen)?;
        let expr = self.parse_expr()?;
        self.expect_keyword(Keyword::As)?;
        let data_type = self.parse_data_type()?;
        self.expect_token(&TokenKind::RParen)?;
        Ok(Expr::Cast {
            expr: Box::new(expr),
            data_type,
        })
    }

    /// `CONVERT(...)` with the argument order picked by the dialect.
    fn parse_convert_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_token(&TokenKind::LParen)?;
        let type_before_value = self.dialect().convert_type_before_value();
        let (expr, data_type) = if type_before_value {
            let data_type = self.parse_data_type()?;
            self.expect_token(&TokenKind::Comma)?;
            (self.parse_expr()?, data_type)
        } else {
            let expr = self.parse_expr()?;
            self.expect_token(&TokenKind::Comma)?;
            (expr, self.parse_data_type()?)
        };
        self.expect_token(&TokenKind::RParen)?;
        Ok(Expr::Convert {
            expr: Box::new(expr),
            data_type,
            type_before_value,
        })
    }

    fn parse_exists(&mut self, negated: bool) -> Result<Expr, ParserError> {
        self.expect_token(&TokenKind::LParen)?;
        let subquery = self.parse_query()?;
        self.expect_token(&TokenKind::RParen)?;
        Ok(Expr::Exists {
            subquery: Box::new(subquery),
            negated,
        })
    }

    fn parse_extract_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_token(&TokenKind::LParen)?;
        let field = self.parse_date_time_field()?;
        self.expect_keyword(Keyword::From)?;
        let expr = self.parse_expr()?;
        self.expect_token(&TokenKind::RParen)?;
        Ok(Expr::Extract {
            field,
            expr: Box::new(expr),
        })
    }

    /// `SUBSTRING(expr FROM a FOR b)` (dialect-gated) or the comma form
    /// `SUBSTRING(expr, a, b)`.
    fn parse_substring_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_token(&TokenKind::LParen)?;
        let expr = self.parse_expr()?;
        let mut substring_from = None;
        let mut substring_for = None;

        if self.check_keyword(Keyword::From) {
            if !self.dialect().supports_substring_from_for_expression() {
                return Err(
                    self.error_here("SUBSTRING ... FROM is not supported by this dialect")
                );
            }
            self.advance();
            substring_from = Some(Box::new(self.parse_expr()?));
            if self.eat_keyword(Keyword::For) {
                substring_for = Some(Box::new(self.parse_expr()?));
            }
        } else if self.eat_token(&TokenKind::Comma) {
            substring_from = Some(Box::new(self.parse_expr()?));
            if self.eat_token(&TokenKind::Comma) {
                substring_for = Some(Box::new(self.parse_expr()?));
            }
        }

        self.expect_token(&TokenKind::RParen)?;
        Ok(Expr::Substring {
            expr: Box::new(expr),
            substring_from,
            substring_for,
        })
    }

    fn parse_trim_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_token(&TokenKind::LParen)?;
        let trim_where = match self.eat_one_of_keywords(&[
            Keyword::Both,
            Keyword::Leading,
            Keyword::Trailing,
        ]) {
            Some(Keyword::Both) => Some(TrimWhereField::Both),
            Some(Keyword::Leading) => Some(TrimWhereField::Leading),
            Some(Keyword::Trailing) => Some(TrimWhereField::Trailing),
            _ => None,
        };

        let (expr, trim_what) = if self.eat_keyword(Keyword::From) {
            (self.parse_expr()?, None)
        } else {
            let first = self.parse_expr()?;
            if self.eat_keyword(Keyword::From) {
                (self.parse_expr()?, Some(Box::new(first)))
            } else {
                (first, None)
            }
        };

        self.expect_token(&TokenKind::RParen)?;
        Ok(Expr::Trim {
            expr: Box::new(expr),
            trim_where,
            trim_what,
        })
    }

    fn parse_position_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_token(&TokenKind::LParen)?;
        // The needle parses above IN so the separator keyword survives.
        let needle = self.parse_subexpr(prec::BETWEEN_LIKE)?;
        self.expect_keyword(Keyword::In)?;
        let haystack = self.parse_expr()?;
        self.expect_token(&TokenKind::RParen)?;
        Ok(Expr::Position {
            expr: Box::new(needle),
            r#in: Box::new(haystack),
        })
    }

    fn parse_interval_expr(&mut self) -> Result<Expr, ParserError> {
        let value = self.parse_subexpr(prec::UNARY)?;
        let leading_field = self.parse_optional_date_time_field();
        let last_field = if leading_field.is_some() && self.eat_keyword(Keyword::To) {
            Some(self.parse_date_time_field()?)
        } else {
            None
        };
        Ok(Expr::Interval {
            value: Box::new(value),
            leading_field,
            last_field,
        })
    }

    fn parse_optional_date_time_field(&mut self) -> Option<DateTimeField> {
        let field = match self.peek_keyword()? {
            Keyword::Year => DateTimeField::Year,
            Keyword::Month => DateTimeField::Month,
            Keyword::Week => DateTimeField::Week,
            Keyword::Day => DateTimeField::Day,
            Keyword::Hour => DateTimeField::Hour,
            Keyword::Minute => DateTimeField::Minute,
            Keyword::Second => DateTimeField::Second,
            Keyword::Millisecond => DateTimeField::Millisecond,
            Keyword::Microsecond => DateTimeField::Microsecond,
            Keyword::Timezone => DateTimeField::Timezone,
            _ => return None,
        };
        self.advance();
        Some(field)
    }

    fn parse_date_time_field(&mut self) -> Result<DateTimeField, ParserError> {
        self.parse_optional_date_time_field()
            .ok_or_else(|| self.expected("a date/time field"))
    }

    // -----------------------------------------------------------------------
    // Function calls and window specifications
    // -----------------------------------------------------------------------

    fn parse_function(&mut self, name: ObjectName) -> Result<Expr, ParserError> {
        self.expect_token(&TokenKind::LParen)?;
        let distinct = self.eat_keyword(Keyword::Distinct);
        let args = if self.check_token(&TokenKind::RParen) {
            Vec::new()
        } else {
            self.parse_comma_separated(Parser::parse_function_arg)?
        };
        let null_treatment = if self.dialect().supports_window_function_null_treatment_arg() {
            if self.eat_keywords(&[Keyword::Ignore, Keyword::Nulls]) {
                Some(NullTreatment::IgnoreNulls)
            } else if self.eat_keywords(&[Keyword::Respect, Keyword::Nulls]) {
                Some(NullTreatment::RespectNulls)
            } else {
                None
            }
        } else {
            None
        };
        self.expect_token(&TokenKind::RParen)?;

        let filter = if self.dialect().supports_filter_during_aggregation()
            && self.check_keyword(Keyword::Filter)
            && self.peek_nth(1) == &TokenKind::LParen
        {
            self.advance();
            self.expect_token(&TokenKind::LParen)?;
            self.expect_keyword(Keyword::Where)?;
            let filter = self.parse_expr()?;
            self.expect_token(&TokenKind::RParen)?;
            Some(Box::new(filter))
        } else {
            None
        };

        let over = if self.eat_keyword(Keyword::Over) {
            if self.eat_token(&TokenKind::LParen) {
                let spec = self.parse_window_spec()?;
                self.expect_token(&TokenKind::RParen)?;
                Some(WindowType::WindowSpec(spec))
            } else if self.dialect().supports_window_clause_named_window_reference() {
                Some(WindowType::NamedWindow(self.parse_identifier()?))
            } else {
                return Err(self.expected("( after OVER"));
            }
        } else {
            None
        };

        Ok(Expr::Function(Function {
            name,
            args,
            filter,
            null_treatment,
            over,
            distinct,
        }))
    }

    /// One function argument, named (`name => v`, or `name = v` when the
    /// dialect allows it) or positional.
    pub fn parse_function_arg(&mut self) -> Result<FunctionArg, ParserError> {
        if matches!(self.peek(), TokenKind::Word(_)) {
            let operator = match self.peek_nth(1) {
                TokenKind::RArrow => Some(FunctionArgOperator::RightArrow),
                TokenKind::Eq
                    if self
                        .dialect()
                        .supports_named_function_args_with_eq_operator() =>
                {
                    Some(FunctionArgOperator::Equals)
                }
                _ => None,
            };
            if let Some(operator) = operator {
                let name = self.parse_identifier()?;
                self.advance();
                let arg = self.parse_function_arg_expr()?;
                return Ok(FunctionArg::Named {
                    name,
                    arg,
                    operator,
                });
            }
        }
        Ok(FunctionArg::Unnamed(self.parse_function_arg_expr()?))
    }

    fn parse_function_arg_expr(&mut self) -> Result<FunctionArgExpr, ParserError> {
        if self.eat_token(&TokenKind::Mul) {
            return Ok(FunctionArgExpr::Wildcard);
        }
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
            return Ok(FunctionArgExpr::QualifiedWildcard(ObjectName::new(parts)));
        }
        Ok(FunctionArgExpr::Expr(self.parse_expr()?))
    }

    pub(crate) fn parse_window_spec(&mut self) -> Result<WindowSpec, ParserError> {
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
        let window_frame = match self.eat_one_of_keywords(&[
            Keyword::Rows,
            Keyword::Range,
            Keyword::Groups,
        ]) {
            Some(kw) => {
                let units = match kw {
                    Keyword::Rows => WindowFrameUnits::Rows,
                    Keyword::Range => WindowFrameUnits::Range,
                    _ => WindowFrameUnits::Groups,
                };
                let (start_bound, end_bound) = if self.eat_keyword(Keyword::Between) {
                    let start = self.parse_window_frame_bound()?;
                    self.expect_keyword(Keyword::And)?;
                    (start, Some(self.parse_window_frame_bound()?))
                } else {
                    (self.parse_window_frame_bound()?, None)
                };
                Some(WindowFrame {
                    units,
                    start_bound,
                    end_bound,
                })
            }
            None => None,
        };
        Ok(WindowSpec {
            partition_by,
            order_by,
            window_frame,
        })
    }

    fn parse_window_frame_bound(&mut self) -> Result<WindowFrameBound, ParserError> {
        if self.eat_keywords(&[Keyword::Current, Keyword::Row]) {
            return Ok(WindowFrameBound::CurrentRow);
        }
        if self.eat_keyword(Keyword::Unbounded) {
            return if self.eat_keyword(Keyword::Preceding) {
                Ok(WindowFrameBound::Preceding(None))
            } else if self.eat_keyword(Keyword::Following) {
                Ok(WindowFrameBound::Following(None))
            } else {
                Err(self.expected("PRECEDING or FOLLOWING after UNBOUNDED"))
            };
        }
        let offset = Box::new(self.parse_expr()?);
        if self.eat_keyword(Keyword::Preceding) {
            Ok(WindowFrameBound::Preceding(Some(offset)))
        } else if self.eat_keyword(Keyword::Following) {
            Ok(WindowFrameBound::Following(Some(offset)))
        } else {
            Err(self.expected("PRECEDING or FOLLOWING in window frame"))
        }
    }

    // -----------------------------------------------------------------------
    // Data types
    // -----------------------------------------------------------------------

    /// Parse a data type, including the three array syntaxes, which stay
    /// distinct in the AST: `ARRAY<T>`, `T[n]`, `ARRAY(T)`, plus the
    /// standard suffix `T ARRAY[n]` (recorded as the square-bracket form).
    #[allow(clippy::too_many_lines)]
    pub fn parse_data_type(&mut self) -> Result<DataType, ParserError> {
        let token = self.advance();
        let TokenKind::Word(word) = &token.kind else {
            return Err(self.error_at(&token, format!("expected a data type, found {}", token.kind)));
        };

        let mut data_type = match word.keyword {
            Some(Keyword::Boolean) => DataType::Boolean,
            Some(Keyword::TinyInt) => DataType::TinyInt(self.parse_optional_type_length()?),
            Some(Keyword::SmallInt) => DataType::SmallInt(self.parse_optional_type_length()?),
            Some(Keyword::Int | Keyword::Integer) => {
                DataType::Int(self.parse_optional_type_length()?)
            }
            Some(Keyword::BigInt) => DataType::BigInt(self.parse_optional_type_length()?),
            Some(Keyword::Real) => DataType::Real,
            Some(Keyword::Float) => DataType::Float(self.parse_optional_type_length()?),
            Some(Keyword::Double) => {
                let _ = self.eat_keyword(Keyword::Precision);
                DataType::Double
            }
            Some(Keyword::Dec | Keyword::Decimal | Keyword::Numeric) => {
                let (precision, scale) = self.parse_optional_precision_scale()?;
                DataType::Decimal(precision, scale)
            }
            Some(Keyword::Char | Keyword::Character) => {
                DataType::Char(self.parse_optional_type_length()?)
            }
            Some(Keyword::Varchar) => DataType::Varchar(self.parse_optional_type_length()?),
            Some(Keyword::Text) => DataType::Text,
            Some(Keyword::Binary) => DataType::Binary(self.parse_optional_type_length()?),
            Some(Keyword::Varbinary) => DataType::Varbinary(self.parse_optional_type_length()?),
            Some(Keyword::Blob) => DataType::Blob(self.parse_optional_type_length()?),
            Some(Keyword::Date) => DataType::Date,
            Some(Keyword::Time) => DataType::Time,
            Some(Keyword::Timestamp) => DataType::Timestamp,
            Some(Keyword::Interval) => DataType::Interval,
            Some(Keyword::Json) => DataType::Json,
            Some(Keyword::Uuid) => DataType::Uuid,
            Some(Keyword::Array) => {
                if self.eat_token(&TokenKind::Lt) {
                    let inner = self.parse_data_type()?;
                    self.expect_token(&TokenKind::Gt)?;
                    DataType::Array(ArrayElemTypeDef::AngleBracket(Box::new(inner)))
                } else if self.eat_token(&TokenKind::LParen) {
                    let inner = self.parse_data_type()?;
                    self.expect_token(&TokenKind::RParen)?;
                    DataType::Array(ArrayElemTypeDef::Parenthesis(Box::new(inner)))
                } else {
                    return Err(self.expected("< or ( after ARRAY"));
                }
            }
            _ => {
                // User-defined type name, possibly qualified.
                let mut parts = vec![word_to_ident(word)];
                while self.check_token(&TokenKind::Period)
                    && matches!(self.peek_nth(1), TokenKind::Word(_))
                {
                    self.advance();
                    parts.push(self.parse_identifier()?);
                }
                DataType::Custom(ObjectName::new(parts))
            }
        };

        // Array suffixes: `T[]`, `T[3]`, `T ARRAY`, `T ARRAY[3]`.
        loop {
            if self.eat_token(&TokenKind::LBracket) {
                let size = if self.check_token(&TokenKind::RBracket) {
                    None
                } else {
                    Some(self.parse_literal_u64()?)
                };
                self.expect_token(&TokenKind::RBracket)?;
                data_type = DataType::Array(ArrayElemTypeDef::SquareBracket(
                    Box::new(data_type),
                    size,
                ));
            } else if self.check_keyword(Keyword::Array) {
                self.advance();
                let size = if self.eat_token(&TokenKind::LBracket) {
                    let size = Some(self.parse_literal_u64()?);
                    self.expect_token(&TokenKind::RBracket)?;
                    size
                } else {
                    None
                };
                data_type = DataType::Array(ArrayElemTypeDef::SquareBracket(
                    Box::new(data_type),
                    size,
                ));
            } else {
                break;
            }
        }
        Ok(data_type)
    }

    fn parse_optional_type_length(&mut self) -> Result<Option<u64>, ParserError> {
        if self.eat_token(&TokenKind::LParen) {
            let length = self.parse_literal_u64()?;
            self.expect_token(&TokenKind::RParen)?;
            Ok(Some(length))
        } else {
            Ok(None)
        }
    }

    fn parse_optional_precision_scale(
        &mut self,
    ) -> Result<(Option<u64>, Option<u64>), ParserError> {
        if self.eat_token(&TokenKind::LParen) {
            let precision = self.parse_literal_u64()?;
            let scale = if self.eat_token(&TokenKind::Comma) {
                Some(self.parse_literal_u64()?)
            } else {
                None
            };
            self.expect_token(&TokenKind::RParen)?;
            Ok((Some(precision), scale))
        } else {
            Ok((None, None))
        }
    }

    /// Error pinned at a specific (already consumed) token.
    pub(crate) fn error_at(&self, token: &Token, message: impl Into<String>) -> ParserError {
        ParserError {
            message: message.into(),
            line: token.line,
            col: token.col,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{Dialect, GenericDialect};
    use crate::lexer::Lexer;
    use proptest::prelude::*;
    use varisql_ast::Statement;

    fn parse_expr_with(dialect: &dyn Dialect, sql: &str) -> Expr {
        let tokens = Lexer::new(sql, dialect).tokenize().expect("tokenize");
        let mut parser = Parser::new(tokens, dialect);
        let expr = parser
            .parse_expr()
            .unwrap_or_else(|e| panic!("parse expr {sql}: {e}"));
        parser.expect_eof().expect("trailing tokens after expression");
        expr
    }

    fn expr(sql: &str) -> Expr {
        parse_expr_with(&GenericDialect, sql)
    }

    fn expr_err(sql: &str) -> ParserError {
        let dialect = GenericDialect;
        let tokens = Lexer::new(sql, &dialect).tokenize().expect("tokenize");
        let mut parser = Parser::new(tokens, &dialect);
        match parser.parse_expr() {
            Err(e) => e,
            Ok(_) => parser.expect_eof().expect_err("expected an error"),
        }
    }

    /// Render helper: expressions are canonical through Display.
    fn rendered(sql: &str) -> String {
        expr(sql).to_string()
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(expr("42"), Expr::Value(Value::Number("42".to_owned())));
        assert_eq!(expr("1.50"), Expr::Value(Value::Number("1.50".to_owned())));
        assert_eq!(
            expr("'abc'"),
            Expr::Value(Value::SingleQuotedString("abc".to_owned()))
        );
        assert_eq!(
            expr("N'abc'"),
            Expr::Value(Value::NationalStringLiteral("abc".to_owned()))
        );
        assert_eq!(
            expr("X'CAFE'"),
            Expr::Value(Value::HexStringLiteral("CAFE".to_owned()))
        );
        assert_eq!(
            expr("B'0101'"),
            Expr::Value(Value::BitStringLiteral("0101".to_owned()))
        );
        assert_eq!(expr("TRUE"), Expr::Value(Value::Boolean(true)));
        assert_eq!(expr("NULL"), Expr::Value(Value::Null));
        assert_eq!(expr("$1"), Expr::Value(Value::Placeholder("$1".to_owned())));
    }

    #[test]
    fn test_parse_identifiers() {
        assert_eq!(expr("a"), Expr::Identifier(Ident::new("a")));
        assert_eq!(
            expr("a.b.c"),
            Expr::CompoundIdentifier(vec![Ident::new("a"), Ident::new("b"), Ident::new("c")])
        );
        assert_eq!(
            expr("\"Quoted\".col"),
            Expr::CompoundIdentifier(vec![Ident::with_quote('"', "Quoted"), Ident::new("col")])
        );
    }

    #[test]
    fn test_spec_precedence_example() {
        // 1 + 2 * 3 groups as 1 + (2 * 3)
        let parsed = expr("1 + 2 * 3");
        let Expr::BinaryOp { op, right, .. } = &parsed else {
            panic!("expected binary op");
        };
        assert_eq!(*op, BinaryOperator::Plus);
        assert!(matches!(
            right.as_ref(),
            Expr::BinaryOp {
                op: BinaryOperator::Multiply,
                ..
            }
        ));
        assert_eq!(parsed.to_string(), "1 + 2 * 3");
    }

    /// For adjacent precedence tiers (a looser, b tighter):
    /// `x a y b z` groups as `x a (y b z)`.
    #[test]
    fn test_precedence_ladder_pairs() {
        let pairs: &[(&str, BinaryOperator, &str)] = &[
            ("OR", BinaryOperator::Or, "AND"),
            ("AND", BinaryOperator::And, "="),
            ("=", BinaryOperator::Eq, "||"),
            ("||", BinaryOperator::StringConcat, "&"),
            ("&", BinaryOperator::BitwiseAnd, "<<"),
            ("<<", BinaryOperator::ShiftLeft, "+"),
            ("+", BinaryOperator::Plus, "*"),
            ("*", BinaryOperator::Multiply, "^"),
        ];
        for (low, low_op, high) in pairs {
            let sql = format!("x {low} y {high} z");
            let parsed = expr(&sql);
            let Expr::BinaryOp { op, right, .. } = &parsed else {
                panic!("expected binary op for {sql}");
            };
            assert_eq!(op, low_op, "top-level operator of {sql}");
            assert!(
                matches!(right.as_ref(), Expr::BinaryOp { .. }),
                "right side of {sql} must be the tighter pair"
            );
        }
    }

    #[test]
    fn test_power_is_right_associative() {
        // 2 ^ 3 ^ 4 groups as 2 ^ (3 ^ 4)
        let parsed = expr("2 ^ 3 ^ 4");
        let Expr::BinaryOp { left, op, right } = &parsed else {
            panic!("expected binary op");
        };
        assert_eq!(*op, BinaryOperator::Power);
        assert!(matches!(left.as_ref(), Expr::Value(_)));
        assert!(matches!(
            right.as_ref(),
            Expr::BinaryOp {
                op: BinaryOperator::Power,
                ..
            }
        ));
    }

    #[test]
    fn test_comparison_is_left_associative_chain() {
        // a + b - c groups as (a + b) - c
        let parsed = expr("a + b - c");
        let Expr::BinaryOp { left, op, .. } = &parsed else {
            panic!("expected binary op");
        };
        assert_eq!(*op, BinaryOperator::Minus);
        assert!(matches!(
            left.as_ref(),
            Expr::BinaryOp {
                op: BinaryOperator::Plus,
                ..
            }
        ));
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(rendered("-x"), "-x");
        assert_eq!(rendered("+x"), "+x");
        assert_eq!(rendered("~x"), "~x");
        assert_eq!(rendered("|/ x"), "|/x");
        assert_eq!(rendered("||/ x"), "||/x");
        assert_eq!(rendered("NOT a AND b"), "NOT a AND b");
        // NOT binds looser than comparison: NOT (a = b)
        let parsed = expr("NOT a = b");
        assert!(matches!(
            parsed,
            Expr::UnaryOp {
                op: UnaryOperator::Not,
                ..
            }
        ));
    }

    #[test]
    fn test_parens_and_tuples() {
        assert_eq!(rendered("(1 + 2) * 3"), "(1 + 2) * 3");
        assert_eq!(rendered("(a, b, c)"), "(a, b, c)");
        assert!(matches!(expr("(a, b)"), Expr::Tuple(_)));
        assert!(matches!(expr("(a)"), Expr::Nested(_)));
    }

    #[test]
    fn test_between_in_like() {
        assert_eq!(rendered("a BETWEEN 1 AND 5"), "a BETWEEN 1 AND 5");
        assert_eq!(rendered("a NOT BETWEEN 1 AND 5"), "a NOT BETWEEN 1 AND 5");
        assert_eq!(rendered("a IN (1, 2, 3)"), "a IN (1, 2, 3)");
        assert_eq!(rendered("a NOT IN (1)"), "a NOT IN (1)");
        assert_eq!(rendered("a IN (SELECT b FROM t)"), "a IN (SELECT b FROM t)");
        assert_eq!(rendered("a LIKE 'x%'"), "a LIKE 'x%'");
        assert_eq!(rendered("a NOT LIKE 'x%'"), "a NOT LIKE 'x%'");
        assert_eq!(
            rendered("a LIKE 'x!%' ESCAPE '!'"),
            "a LIKE 'x!%' ESCAPE '!'"
        );
        assert_eq!(rendered("a ILIKE 'x%'"), "a ILIKE 'x%'");
        // BETWEEN binds tighter than comparison.
        let parsed = expr("a = b BETWEEN 1 AND 2");
        assert!(matches!(
            parsed,
            Expr::BinaryOp {
                op: BinaryOperator::Eq,
                ..
            }
        ));
    }

    #[test]
    fn test_in_empty_list_gated() {
        assert_eq!(rendered("a IN ()"), "a IN ()");

        #[derive(Debug)]
        struct NoEmptyIn;
        impl Dialect for NoEmptyIn {
            fn is_identifier_start(&self, ch: char) -> bool {
                ch.is_alphabetic()
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                ch.is_alphanumeric()
            }
        }
        let tokens = Lexer::new("a IN ()", &NoEmptyIn).tokenize().unwrap();
        let err = Parser::new(tokens, &NoEmptyIn)
            .parse_expr()
            .expect_err("empty IN is gated");
        assert!(err.message.contains("empty IN lists"));
    }

    #[test]
    fn test_is_forms() {
        assert_eq!(rendered("a IS NULL"), "a IS NULL");
        assert_eq!(rendered("a IS NOT NULL"), "a IS NOT NULL");
        assert_eq!(rendered("a IS TRUE"), "a IS TRUE");
        assert_eq!(rendered("a IS FALSE"), "a IS FALSE");
        assert_eq!(rendered("a IS DISTINCT FROM b"), "a IS DISTINCT FROM b");
        assert_eq!(
            rendered("a IS NOT DISTINCT FROM b"),
            "a IS NOT DISTINCT FROM b"
        );
    }

    #[test]
    fn test_case_expr() {
        assert_eq!(
            rendered("CASE WHEN a > 0 THEN 'p' WHEN a < 0 THEN 'n' ELSE 'z' END"),
            "CASE WHEN a > 0 THEN 'p' WHEN a < 0 THEN 'n' ELSE 'z' END"
        );
        assert_eq!(
            rendered("CASE a WHEN 1 THEN 'one' END"),
            "CASE a WHEN 1 THEN 'one' END"
        );
    }

    #[test]
    fn test_cast_forms() {
        assert_eq!(rendered("CAST(a AS INT)"), "CAST(a AS INT)");
        assert_eq!(rendered("CAST(a AS DECIMAL(10, 2))"), "CAST(a AS DECIMAL(10, 2))");
        // `::` produces the same node and renders canonically.
        assert_eq!(rendered("a::INT"), "CAST(a AS INT)");
        assert_eq!(expr("a::INT"), expr("CAST(a AS INT)"));
        // :: binds tighter than arithmetic.
        let parsed = expr("a::INT + 1");
        assert!(matches!(
            parsed,
            Expr::BinaryOp {
                op: BinaryOperator::Plus,
                ..
            }
        ));
    }

    #[test]
    fn test_convert_argument_order_by_dialect() {
        // GenericDialect: CONVERT(expr, type).
        assert_eq!(rendered("CONVERT(a, INT)"), "CONVERT(a, INT)");

        #[derive(Debug)]
        struct TypeFirst;
        impl Dialect for TypeFirst {
            fn is_identifier_start(&self, ch: char) -> bool {
                ch.is_alphabetic()
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                ch.is_alphanumeric()
            }
            fn convert_type_before_value(&self) -> bool {
                true
            }
        }
        let parsed = parse_expr_with(&TypeFirst, "CONVERT(INT, a)");
        assert_eq!(parsed.to_string(), "CONVERT(INT, a)");
        let Expr::Convert {
            type_before_value, ..
        } = parsed
        else {
            panic!("expected convert");
        };
        assert!(type_before_value);
    }

    #[test]
    fn test_exists_and_subquery() {
        assert_eq!(
            rendered("EXISTS (SELECT 1 FROM t)"),
            "EXISTS (SELECT 1 FROM t)"
        );
        assert_eq!(
            rendered("NOT EXISTS (SELECT 1 FROM t)"),
            "NOT EXISTS (SELECT 1 FROM t)"
        );
        assert_eq!(rendered("(SELECT max(x) FROM t)"), "(SELECT max(x) FROM t)");
    }

    #[test]
    fn test_substring_gating() {
        assert_eq!(
            rendered("SUBSTRING(s FROM 1 FOR 3)"),
            "SUBSTRING(s FROM 1 FOR 3)"
        );
        assert_eq!(rendered("SUBSTRING(s FROM 2)"), "SUBSTRING(s FROM 2)");
        // The comma form parses to the same shape.
        assert_eq!(rendered("SUBSTRING(s, 1, 3)"), "SUBSTRING(s FROM 1 FOR 3)");

        #[derive(Debug)]
        struct NoFromFor;
        impl Dialect for NoFromFor {
            fn is_identifier_start(&self, ch: char) -> bool {
                ch.is_alphabetic()
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                ch.is_alphanumeric()
            }
        }
        let tokens = Lexer::new("SUBSTRING(s FROM 1 FOR 3)", &NoFromFor)
            .tokenize()
            .unwrap();
        let err = Parser::new(tokens, &NoFromFor)
            .parse_expr()
            .expect_err("FROM form is gated");
        assert!(err.message.contains("not supported"));
    }

    #[test]
    fn test_extract_trim_position() {
        assert_eq!(rendered("EXTRACT(YEAR FROM d)"), "EXTRACT(YEAR FROM d)");
        assert_eq!(rendered("TRIM(s)"), "TRIM(s)");
        assert_eq!(rendered("TRIM(BOTH 'x' FROM s)"), "TRIM(BOTH 'x' FROM s)");
        assert_eq!(rendered("TRIM(LEADING FROM s)"), "TRIM(LEADING s)");
        assert_eq!(rendered("POSITION('x' IN s)"), "POSITION('x' IN s)");
    }

    #[test]
    fn test_interval_literals() {
        assert_eq!(rendered("INTERVAL '1' DAY"), "INTERVAL '1' DAY");
        assert_eq!(
            rendered("INTERVAL '1-2' YEAR TO MONTH"),
            "INTERVAL '1-2' YEAR TO MONTH"
        );
        assert_eq!(rendered("INTERVAL '10' HOUR"), "INTERVAL '10' HOUR");
        assert_eq!(rendered("INTERVAL '5'"), "INTERVAL '5'");
    }

    #[test]
    fn test_typed_string() {
        assert_eq!(
            expr("DATE '2024-01-01'"),
            Expr::TypedString {
                data_type: DataType::Date,
                value: "2024-01-01".to_owned(),
            }
        );
        assert_eq!(rendered("TIMESTAMP '2024-01-01 00:00:00'"),
            "TIMESTAMP '2024-01-01 00:00:00'");
    }

    #[test]
    fn test_at_time_zone() {
        assert_eq!(
            rendered("ts AT TIME ZONE 'UTC'"),
            "ts AT TIME ZONE 'UTC'"
        );
    }

    #[test]
    fn test_array_constructor_and_subscript() {
        assert_eq!(rendered("ARRAY[1, 2, 3]"), "ARRAY[1, 2, 3]");
        assert_eq!(rendered("ARRAY[]"), "ARRAY[]");
        assert_eq!(rendered("a[1]"), "a[1]");
        assert_eq!(rendered("a[1][2]"), "a[1][2]");
        let parsed = expr("a[1][2]");
        let Expr::ArrayIndex { indexes, .. } = parsed else {
            panic!("expected subscript");
        };
        assert_eq!(indexes.len(), 2);
    }

    #[test]
    fn test_json_operators() {
        assert_eq!(rendered("j -> 'k'"), "j -> 'k'");
        assert_eq!(rendered("j ->> 'k'"), "j ->> 'k'");
        assert_eq!(rendered("j #> '{a,b}'"), "j #> '{a,b}'");
        assert_eq!(rendered("j #>> '{a,b}'"), "j #>> '{a,b}'");
        assert_eq!(rendered("j @> '{}'"), "j @> '{}'");
        assert_eq!(rendered("j <@ k"), "j <@ k");
        assert_eq!(rendered("j ?| k"), "j ?| k");
        assert_eq!(rendered("j ?& k"), "j ?& k");
        // JSON access binds tighter than comparison.
        let parsed = expr("j -> 'k' = 'v'");
        assert!(matches!(
            parsed,
            Expr::BinaryOp {
                op: BinaryOperator::Eq,
                ..
            }
        ));
    }

    #[test]
    fn test_function_calls() {
        assert_eq!(rendered("count(*)"), "count(*)");
        assert_eq!(rendered("count(DISTINCT a)"), "count(DISTINCT a)");
        assert_eq!(rendered("f()"), "f()");
        assert_eq!(rendered("s.f(a, b)"), "s.f(a, b)");
        assert_eq!(rendered("count(t.*)"), "count(t.*)");
        assert_eq!(
            rendered("count(*) FILTER (WHERE a > 0)"),
            "count(*) FILTER (WHERE a > 0)"
        );
    }

    #[test]
    fn test_window_functions() {
        assert_eq!(
            rendered("sum(x) OVER (PARTITION BY g ORDER BY x)"),
            "sum(x) OVER (PARTITION BY g ORDER BY x)"
        );
        assert_eq!(
            rendered("sum(x) OVER (ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)"),
            "sum(x) OVER (ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)"
        );
        assert_eq!(
            rendered("sum(x) OVER (GROUPS 2 PRECEDING)"),
            "sum(x) OVER (GROUPS 2 PRECEDING)"
        );
        assert_eq!(rendered("row_number() OVER w"), "row_number() OVER w");
        assert_eq!(
            rendered("last_value(x IGNORE NULLS) OVER (ORDER BY ts)"),
            "last_value(x IGNORE NULLS) OVER (ORDER BY ts)"
        );
    }

    #[test]
    fn test_named_function_args() {
        // Arrow form is always accepted.
        assert_eq!(rendered("f(x => 1, y => 2)"), "f(x => 1, y => 2)");

        // `=` named arguments only where the dialect says so; otherwise the
        // token reads as a comparison.
        let parsed = expr("f(a = 1)");
        let Expr::Function(func) = &parsed else {
            panic!("expected function");
        };
        assert!(matches!(
            func.args[0],
            FunctionArg::Unnamed(FunctionArgExpr::Expr(Expr::BinaryOp { .. }))
        ));

        #[derive(Debug)]
        struct EqNamedArgs;
        impl Dialect for EqNamedArgs {
            fn is_identifier_start(&self, ch: char) -> bool {
                ch.is_alphabetic()
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                ch.is_alphanumeric()
            }
            fn supports_named_function_args_with_eq_operator(&self) -> bool {
                true
            }
        }
        let parsed = parse_expr_with(&EqNamedArgs, "f(a = 1)");
        let Expr::Function(func) = &parsed else {
            panic!("expected function");
        };
        assert!(matches!(
            func.args[0],
            FunctionArg::Named {
                operator: FunctionArgOperator::Equals,
                ..
            }
        ));
    }

    #[test]
    fn test_lambda_gated() {
        #[derive(Debug)]
        struct Lambdas;
        impl Dialect for Lambdas {
            fn is_identifier_start(&self, ch: char) -> bool {
                ch.is_alphabetic()
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                ch.is_alphanumeric()
            }
            fn supports_lambda_functions(&self) -> bool {
                true
            }
        }
        let parsed = parse_expr_with(&Lambdas, "transform(xs, x -> x + 1)");
        assert_eq!(parsed.to_string(), "transform(xs, x -> x + 1)");
        let parsed = parse_expr_with(&Lambdas, "reduce(xs, (acc, x) -> acc + x)");
        assert_eq!(parsed.to_string(), "reduce(xs, (acc, x) -> acc + x)");

        // Without the flag, `->` is JSON access.
        assert!(matches!(expr("x -> 'k'"), Expr::JsonAccess { .. }));
    }

    #[test]
    fn test_dictionary_gated() {
        #[derive(Debug)]
        struct Dicts;
        impl Dialect for Dicts {
            fn is_identifier_start(&self, ch: char) -> bool {
                ch.is_alphabetic()
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                ch.is_alphanumeric()
            }
            fn supports_dictionary_syntax(&self) -> bool {
                true
            }
        }
        let parsed = parse_expr_with(&Dicts, "{'a': 1, 'b': x}");
        assert_eq!(parsed.to_string(), "{'a': 1, 'b': x}");
        let err = expr_err("{'a': 1}");
        assert!(err.message.contains("dictionary"));
    }

    #[test]
    fn test_collate() {
        assert_eq!(rendered("a COLLATE de_DE"), "a COLLATE de_DE");
        // COLLATE binds tighter than comparison.
        let parsed = expr("a COLLATE x = b");
        assert!(matches!(
            parsed,
            Expr::BinaryOp {
                op: BinaryOperator::Eq,
                ..
            }
        ));
    }

    #[test]
    fn test_dialect_precedence_hook_takes_maximum() {
        // A dialect that promotes `+` to multiplicative precedence changes
        // the grouping of 1 + 2 * 3.
        #[derive(Debug)]
        struct TightPlus;
        impl Dialect for TightPlus {
            fn is_identifier_start(&self, ch: char) -> bool {
                ch.is_alphabetic()
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                ch.is_alphanumeric()
            }
            fn get_next_precedence(&self, parser: &Parser) -> Option<Result<u8, ParserError>> {
                if parser.peek() == &TokenKind::Plus {
                    Some(Ok(prec::MUL_DIV_MOD))
                } else {
                    None
                }
            }
        }
        let parsed = parse_expr_with(&TightPlus, "1 + 2 * 3");
        let Expr::BinaryOp { op, left, .. } = &parsed else {
            panic!("expected binary op");
        };
        assert_eq!(*op, BinaryOperator::Multiply);
        assert!(matches!(
            left.as_ref(),
            Expr::BinaryOp {
                op: BinaryOperator::Plus,
                ..
            }
        ));
    }

    #[test]
    fn test_dialect_infix_hook_extends_grammar() {
        // `a && b` is not part of the built-in grammar; a dialect can claim
        // the token and produce its own tree.
        #[derive(Debug)]
        struct OverlapDialect;
        impl Dialect for OverlapDialect {
            fn is_identifier_start(&self, ch: char) -> bool {
                ch.is_alphabetic()
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                ch.is_alphanumeric()
            }
            fn get_next_precedence(&self, parser: &Parser) -> Option<Result<u8, ParserError>> {
                (parser.peek() == &TokenKind::DoubleAmpersand).then_some(Ok(prec::AND))
            }
            fn parse_infix(
                &self,
                parser: &mut Parser,
                lhs: &Expr,
                precedence: u8,
            ) -> Option<Result<Expr, ParserError>> {
                if parser.peek() != &TokenKind::DoubleAmpersand {
                    return None;
                }
                parser.advance();
                Some(parser.parse_subexpr(precedence).map(|rhs| Expr::BinaryOp {
                    left: Box::new(lhs.clone()),
                    op: BinaryOperator::And,
                    right: Box::new(rhs),
                }))
            }
        }
        let parsed = parse_expr_with(&OverlapDialect, "a && b");
        assert_eq!(parsed.to_string(), "a AND b");
    }

    #[test]
    fn test_dialect_infix_hook_produces_question_json_operator() {
        // Bare `?` tokenizes as a placeholder; a dialect that uses it as
        // the JSON key-exists operator claims it through the precedence
        // and infix hooks.
        #[derive(Debug)]
        struct QuestionDialect;
        impl Dialect for QuestionDialect {
            fn is_identifier_start(&self, ch: char) -> bool {
                ch.is_alphabetic()
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                ch.is_alphanumeric()
            }
            fn get_next_precedence(&self, parser: &Parser) -> Option<Result<u8, ParserError>> {
                matches!(parser.peek(), TokenKind::Placeholder(p) if p == "?")
                    .then_some(Ok(prec::PIPE))
            }
            fn parse_infix(
                &self,
                parser: &mut Parser,
                lhs: &Expr,
                precedence: u8,
            ) -> Option<Result<Expr, ParserError>> {
                if !matches!(parser.peek(), TokenKind::Placeholder(p) if p == "?") {
                    return None;
                }
                parser.advance();
                Some(parser.parse_subexpr(precedence).map(|rhs| Expr::JsonAccess {
                    left: Box::new(lhs.clone()),
                    operator: JsonOperator::Question,
                    right: Box::new(rhs),
                }))
            }
        }

        let parsed = parse_expr_with(&QuestionDialect, "j ? 'key'");
        assert!(matches!(
            &parsed,
            Expr::JsonAccess {
                operator: JsonOperator::Question,
                ..
            }
        ));
        assert_eq!(parsed.to_string(), "j ? 'key'");
        // The rendered form re-parses to an equal tree under the same
        // dialect.
        let reparsed = parse_expr_with(&QuestionDialect, &parsed.to_string());
        assert_eq!(parsed, reparsed);
        // It binds like the other JSON operators: tighter than comparison.
        let parsed = parse_expr_with(&QuestionDialect, "j ? 'key' = x");
        assert!(matches!(
            parsed,
            Expr::BinaryOp {
                op: BinaryOperator::Eq,
                ..
            }
        ));
    }

    #[test]
    fn test_dialect_prefix_hook_overrides_builtin() {
        // A dialect can claim a prefix position outright.
        #[derive(Debug)]
        struct YesDialect;
        impl Dialect for YesDialect {
            fn is_identifier_start(&self, ch: char) -> bool {
                ch.is_alphabetic()
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                ch.is_alphanumeric()
            }
            fn parse_prefix(&self, parser: &mut Parser) -> Option<Result<Expr, ParserError>> {
                match parser.peek() {
                    TokenKind::Word(w) if w.value == "yes" => {
                        parser.advance();
                        Some(Ok(Expr::Value(Value::Boolean(true))))
                    }
                    _ => None,
                }
            }
        }
        assert_eq!(
            parse_expr_with(&YesDialect, "yes"),
            Expr::Value(Value::Boolean(true))
        );
        assert_eq!(
            parse_expr_with(&YesDialect, "no").to_string(),
            "no"
        );
    }

    #[test]
    fn test_reserved_keyword_cannot_start_expression() {
        let err = expr_err("FROM");
        assert!(err.message.contains("expected an expression"));
    }

    #[test]
    fn test_deep_nesting_is_bounded() {
        let depth = (crate::parser::MAX_PARSE_DEPTH + 10) as usize;
        let sql = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        let err = expr_err(&sql);
        assert!(err.message.contains("too deeply"));
    }

    #[test]
    fn test_error_position_in_expression() {
        let err = expr_err("1 +\n  FROM");
        assert_eq!(err.line, 2);
        assert_eq!(err.col, 3);
    }

    #[test]
    fn test_expression_statement_integration() {
        // Expressions embed everywhere statements need them.
        let statements = Parser::parse_sql(
            &GenericDialect,
            "SELECT CASE WHEN a IS NULL THEN 0 ELSE a END FROM t WHERE b BETWEEN 1 AND 2",
        )
        .unwrap();
        assert!(matches!(statements[0], Statement::Query(_)));
    }

    /// The binary operators of the built-in ladder with their surface text
    /// and precedence tier, for the precedence-law property below.
    const BINARY_OP_TABLE: &[(&str, BinaryOperator, u8)] = &[
        ("OR", BinaryOperator::Or, prec::OR),
        ("AND", BinaryOperator::And, prec::AND),
        ("=", BinaryOperator::Eq, prec::COMPARISON),
        ("<>", BinaryOperator::NotEq, prec::COMPARISON),
        ("<", BinaryOperator::Lt, prec::COMPARISON),
        (">", BinaryOperator::Gt, prec::COMPARISON),
        ("<=", BinaryOperator::LtEq, prec::COMPARISON),
        (">=", BinaryOperator::GtEq, prec::COMPARISON),
        ("||", BinaryOperator::StringConcat, prec::PIPE),
        ("|", BinaryOperator::BitwiseOr, prec::PIPE),
        ("&", BinaryOperator::BitwiseAnd, prec::AMPERSAND),
        ("<<", BinaryOperator::ShiftLeft, prec::SHIFT),
        (">>", BinaryOperator::ShiftRight, prec::SHIFT),
        ("+", BinaryOperator::Plus, prec::PLUS_MINUS),
        ("-", BinaryOperator::Minus, prec::PLUS_MINUS),
        ("*", BinaryOperator::Multiply, prec::MUL_DIV_MOD),
        ("/", BinaryOperator::Divide, prec::MUL_DIV_MOD),
        ("%", BinaryOperator::Modulo, prec::MUL_DIV_MOD),
        ("^", BinaryOperator::Power, prec::CARET),
    ];

    proptest! {
        /// For every operator pair with prec(a) < prec(b),
        /// `x a y b z` parses as `x a (y b z)`.
        #[test]
        fn prop_precedence_law_over_operator_pairs(
            low in 0..BINARY_OP_TABLE.len(),
            high in 0..BINARY_OP_TABLE.len(),
        ) {
            let (low_text, low_op, low_prec) = BINARY_OP_TABLE[low];
            let (high_text, high_op, high_prec) = BINARY_OP_TABLE[high];
            prop_assume!(low_prec < high_prec);

            let sql = format!("x {low_text} y {high_text} z");
            let parsed = parse_expr_with(&GenericDialect, &sql);
            match &parsed {
                Expr::BinaryOp { left, op, right } => {
                    prop_assert_eq!(*op, low_op, "top operator of {}", sql);
                    prop_assert_eq!(
                        left.as_ref(),
                        &Expr::Identifier(Ident::new("x")),
                        "left operand of {}",
                        sql
                    );
                    match right.as_ref() {
                        Expr::BinaryOp { op: inner, .. } => {
                            prop_assert_eq!(*inner, high_op, "inner operator of {}", sql);
                        }
                        other => prop_assert!(
                            false,
                            "right side of {} must be the tighter pair, got {:?}",
                            sql,
                            other
                        ),
                    }
                }
                other => prop_assert!(false, "{} parsed as {:?}", sql, other),
            }
        }
    }
}
