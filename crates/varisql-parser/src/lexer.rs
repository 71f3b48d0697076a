//! SQL lexer.
//!
//! Converts SQL text into a stream of tokens, consulting the [`Dialect`]
//! for identifier classification, quoting rules, and literal extensions.
//! Uses memchr for accelerated closing-quote scans. Tracks line/column for
//! error reporting; `\r\n` counts as a single newline.

use memchr::memchr;
use thiserror::Error;

use crate::dialect::Dialect;
use crate::token::{Token, TokenKind, Word};

/// Tokenizer failure: malformed literal, unterminated string or comment,
/// or a character no rule accepts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tokenizer error at line {line}, column {col}: {message}")]
pub struct TokenizerError {
    pub message: String,
    pub line: u32,
    pub col: u32,
}

// ---------------------------------------------------------------------------
// Character cursor
// ---------------------------------------------------------------------------

/// Character cursor over the UTF-8 source with 1-based position tracking.
struct Cursor<'a> {
    src: &'a str,
    /// Current byte offset.
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        // Only `\n` bumps the line counter, so `\r\n` counts once.
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// The unread remainder of the source.
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

/// SQL lexer parameterised by a dialect.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    dialect: &'a dyn Dialect,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `source` for the given dialect.
    #[must_use]
    pub fn new(source: &'a str, dialect: &'a dyn Dialect) -> Self {
        Self {
            cursor: Cursor::new(source),
            dialect,
        }
    }

    /// Tokenize the entire input. The result is terminated by an Eof token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, TokenizerError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    /// Produce the next token.
    #[allow(clippy::too_many_lines)]
    fn next_token(&mut self) -> Result<Token, TokenizerError> {
        self.skip_whitespace_and_comments()?;

        let line = self.cursor.line;
        let col = self.cursor.col;
        let Some(ch) = self.cursor.peek() else {
            return Ok(Token::new(TokenKind::Eof, line, col));
        };
        let tok = |kind| Token::new(kind, line, col);

        // String literal prefixes: N'...', X'...', B'...'.
        if matches!(ch, 'N' | 'n') && self.cursor.peek_nth(1) == Some('\'') {
            self.cursor.advance();
            let s = self.lex_single_quoted(line, col)?;
            return Ok(tok(TokenKind::NationalString(s)));
        }
        if matches!(ch, 'X' | 'x') && self.cursor.peek_nth(1) == Some('\'') {
            self.cursor.advance();
            let s = self.lex_hex_like(line, col, |c| c.is_ascii_hexdigit(), "hex")?;
            return Ok(tok(TokenKind::HexString(s)));
        }
        if matches!(ch, 'B' | 'b') && self.cursor.peek_nth(1) == Some('\'') {
            self.cursor.advance();
            let s = self.lex_hex_like(line, col, |c| c == '0' || c == '1', "bit")?;
            return Ok(tok(TokenKind::BitString(s)));
        }

        if ch == '\'' {
            if self.dialect.supports_triple_quoted_string()
                && self.cursor.peek_nth(1) == Some('\'')
                && self.cursor.peek_nth(2) == Some('\'')
            {
                let s = self.lex_triple_quoted(line, col)?;
                return Ok(tok(TokenKind::SingleQuotedString(s)));
            }
            let s = self.lex_single_quoted(line, col)?;
            return Ok(tok(TokenKind::SingleQuotedString(s)));
        }

        // Delimited identifier.
        if self.dialect.is_delimited_identifier_start(ch)
            && self
                .dialect
                .is_proper_identifier_inside_quotes(self.cursor.rest().chars().peekable())
        {
            let word = self.lex_delimited_identifier(ch, line, col)?;
            return Ok(tok(TokenKind::Word(word)));
        }

        // Numbers (including `.5`).
        if ch.is_ascii_digit()
            || (ch == '.' && self.cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit()))
        {
            return Ok(tok(self.lex_number()));
        }

        // Words and keywords.
        if self.dialect.is_identifier_start(ch) {
            return Ok(tok(TokenKind::Word(self.lex_word())));
        }

        // Placeholders and punctuation, longest match first.
        let kind = match ch {
            '?' => {
                self.cursor.advance();
                match self.cursor.peek() {
                    Some('|') => {
                        self.cursor.advance();
                        TokenKind::QuestionPipe
                    }
                    Some('&') => {
                        self.cursor.advance();
                        TokenKind::QuestionAnd
                    }
                    Some(c) if c.is_ascii_digit() => {
                        let mut text = String::from("?");
                        while let Some(c) = self.cursor.peek() {
                            if c.is_ascii_digit() {
                                text.push(c);
                                self.cursor.advance();
                            } else {
                                break;
                            }
                        }
                        TokenKind::Placeholder(text)
                    }
                    _ => TokenKind::Placeholder("?".to_owned()),
                }
            }
            '$' => {
                self.cursor.advance();
                let name = if self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
                    let mut digits = String::new();
                    while let Some(c) = self.cursor.peek() {
                        if c.is_ascii_digit() {
                            digits.push(c);
                            self.cursor.advance();
                        } else {
                            break;
                        }
                    }
                    digits
                } else {
                    self.take_identifier_run()
                };
                if name.is_empty() {
                    return Err(self.error_at(line, col, "expected digits or a name after '$'"));
                }
                TokenKind::Placeholder(format!("${name}"))
            }
            ':' => {
                self.cursor.advance();
                if self.cursor.peek() == Some(':') {
                    self.cursor.advance();
                    TokenKind::DoubleColon
                } else if self.cursor.peek().is_some_and(|c| self.dialect.is_identifier_start(c)) {
                    let name = self.take_identifier_run();
                    TokenKind::Placeholder(format!(":{name}"))
                } else {
                    TokenKind::Colon
                }
            }
            '@' => {
                self.cursor.advance();
                if self.cursor.peek() == Some('>') {
                    self.cursor.advance();
                    TokenKind::AtArrow
                } else if self.cursor.peek().is_some_and(|c| self.dialect.is_identifier_start(c)) {
                    let name = self.take_identifier_run();
                    TokenKind::Placeholder(format!("@{name}"))
                } else {
                    TokenKind::AtSign
                }
            }
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::SemiColon),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '.' => self.single(TokenKind::Period),
            '+' => self.single(TokenKind::Plus),
            '*' => self.single(TokenKind::Mul),
            '/' => self.single(TokenKind::Div),
            '%' => self.single(TokenKind::Mod),
            '^' => self.single(TokenKind::Caret),
            '~' => self.single(TokenKind::Tilde),
            '=' => {
                self.cursor.advance();
                if self.cursor.peek() == Some('>') {
                    self.cursor.advance();
                    TokenKind::RArrow
                } else {
                    TokenKind::Eq
                }
            }
            '!' => {
                self.cursor.advance();
                if self.cursor.peek() == Some('=') {
                    self.cursor.advance();
                    TokenKind::Neq
                } else {
                    TokenKind::ExclamationMark
                }
            }
            '<' => {
                self.cursor.advance();
                match self.cursor.peek() {
                    Some('=') => {
                        self.cursor.advance();
                        TokenKind::LtEq
                    }
                    Some('>') => {
                        self.cursor.advance();
                        TokenKind::Neq
                    }
                    Some('<') => {
                        self.cursor.advance();
                        TokenKind::ShiftLeft
                    }
                    Some('@') => {
                        self.cursor.advance();
                        TokenKind::ArrowAt
                    }
                    _ => TokenKind::Lt,
                }
            }
            '>' => {
                self.cursor.advance();
                match self.cursor.peek() {
                    Some('=') => {
                        self.cursor.advance();
                        TokenKind::GtEq
                    }
                    Some('>') => {
                        self.cursor.advance();
                        TokenKind::ShiftRight
                    }
                    _ => TokenKind::Gt,
                }
            }
            '-' => {
                // `--` comments were consumed by the skip phase.
                self.cursor.advance();
                if self.cursor.peek() == Some('>') {
                    self.cursor.advance();
                    if self.cursor.peek() == Some('>') {
                        self.cursor.advance();
                        TokenKind::LongArrow
                    } else {
                        TokenKind::Arrow
                    }
                } else {
                    TokenKind::Minus
                }
            }
            '|' => {
                self.cursor.advance();
                match self.cursor.peek() {
                    Some('|') => {
                        self.cursor.advance();
                        if self.cursor.peek() == Some('/') {
                            self.cursor.advance();
                            TokenKind::DoublePipeSlash
                        } else {
                            TokenKind::StringConcat
                        }
                    }
                    Some('/') => {
                        self.cursor.advance();
                        TokenKind::PipeSlash
                    }
                    _ => TokenKind::Pipe,
                }
            }
            '&' => {
                self.cursor.advance();
                if self.cursor.peek() == Some('&') {
                    self.cursor.advance();
                    TokenKind::DoubleAmpersand
                } else {
                    TokenKind::Ampersand
                }
            }
            '#' => {
                self.cursor.advance();
                if self.cursor.peek() == Some('>') {
                    self.cursor.advance();
                    if self.cursor.peek() == Some('>') {
                        self.cursor.advance();
                        TokenKind::HashLongArrow
                    } else {
                        TokenKind::HashArrow
                    }
                } else {
                    TokenKind::Sharp
                }
            }
            other => {
                return Err(self.error_at(line, col, format!("unrecognized character: {other:?}")));
            }
        };
        Ok(tok(kind))
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }

    fn error_at(&self, line: u32, col: u32, message: impl Into<String>) -> TokenizerError {
        TokenizerError {
            message: message.into(),
            line,
            col,
        }
    }

    // -----------------------------------------------------------------------
    // Whitespace and comments
    // -----------------------------------------------------------------------

    /// Skip whitespace, `--` line comments, and nesting `/* */` block
    /// comments. Both kinds are discarded; positions are still tracked.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), TokenizerError> {
        loop {
            while self.cursor.peek().is_some_and(char::is_whitespace) {
                self.cursor.advance();
            }

            if self.cursor.peek() == Some('-') && self.cursor.peek_nth(1) == Some('-') {
                while let Some(c) = self.cursor.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.cursor.advance();
                }
                continue;
            }

            if self.cursor.peek() == Some('/') && self.cursor.peek_nth(1) == Some('*') {
                let line = self.cursor.line;
                let col = self.cursor.col;
                self.cursor.advance();
                self.cursor.advance();
                let mut depth = 1u32;
                while depth > 0 {
                    if self.cursor.at_eof() {
                        return Err(self.error_at(line, col, "unterminated block comment"));
                    }
                    if self.cursor.peek() == Some('/') && self.cursor.peek_nth(1) == Some('*') {
                        self.cursor.advance();
                        self.cursor.advance();
                        depth += 1;
                    } else if self.cursor.peek() == Some('*') && self.cursor.peek_nth(1) == Some('/')
                    {
                        self.cursor.advance();
                        self.cursor.advance();
                        depth -= 1;
                    } else {
                        self.cursor.advance();
                    }
                }
                continue;
            }

            return Ok(());
        }
    }

    // -----------------------------------------------------------------------
    // Literal lexers
    // -----------------------------------------------------------------------

    /// Lex a single-quoted string. `''` encodes one quote; backslash
    /// escapes are honoured when the dialect enables them.
    fn lex_single_quoted(&mut self, line: u32, col: u32) -> Result<String, TokenizerError> {
        let backslash = self.dialect.supports_string_literal_backslash_escape();
        self.cursor.advance(); // opening quote

        let mut value = String::new();
        loop {
            match self.cursor.advance() {
                None => return Err(self.error_at(line, col, "unterminated string literal")),
                Some('\'') => {
                    if self.cursor.peek() == Some('\'') {
                        value.push('\'');
                        self.cursor.advance();
                    } else {
                        return Ok(value);
                    }
                }
                Some('\\') if backslash => match self.cursor.advance() {
                    None => return Err(self.error_at(line, col, "unterminated string literal")),
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('0') => value.push('\0'),
                    Some('\\') => value.push('\\'),
                    Some('\'') => value.push('\''),
                    Some('"') => value.push('"'),
                    Some(other) => {
                        return Err(self.error_at(
                            line,
                            col,
                            format!("invalid escape sequence: \\{other}"),
                        ));
                    }
                },
                Some(c) => value.push(c),
            }
        }
    }

    /// Lex a triple-quoted string (`'''text'''`). No escape processing;
    /// lone quotes are literal.
    fn lex_triple_quoted(&mut self, line: u32, col: u32) -> Result<String, TokenizerError> {
        for _ in 0..3 {
            self.cursor.advance();
        }
        let mut value = String::new();
        loop {
            if self.cursor.at_eof() {
                return Err(self.error_at(line, col, "unterminated triple-quoted string"));
            }
            if self.cursor.peek() == Some('\'')
                && self.cursor.peek_nth(1) == Some('\'')
                && self.cursor.peek_nth(2) == Some('\'')
            {
                for _ in 0..3 {
                    self.cursor.advance();
                }
                return Ok(value);
            }
            if let Some(c) = self.cursor.advance() {
                value.push(c);
            }
        }
    }

    /// Lex the `'...'` payload of a hex or bit string, validating every
    /// character with `valid`.
    fn lex_hex_like(
        &mut self,
        line: u32,
        col: u32,
        valid: impl Fn(char) -> bool,
        what: &str,
    ) -> Result<String, TokenizerError> {
        self.cursor.advance(); // opening quote
        let rest = self.cursor.rest();
        let Some(end) = memchr(b'\'', rest.as_bytes()) else {
            return Err(self.error_at(line, col, format!("unterminated {what} string literal")));
        };
        let payload = &rest[..end];
        if let Some(bad) = payload.chars().find(|c| !valid(*c)) {
            return Err(self.error_at(
                line,
                col,
                format!("invalid character {bad:?} in {what} string literal"),
            ));
        }
        let value = payload.to_owned();
        for _ in 0..payload.chars().count() + 1 {
            self.cursor.advance();
        }
        Ok(value)
    }

    /// Lex a delimited identifier opened by `quote`. The closing character
    /// pairs with the opener; a doubled closer encodes one literal closer.
    fn lex_delimited_identifier(
        &mut self,
        quote: char,
        line: u32,
        col: u32,
    ) -> Result<Word, TokenizerError> {
        let closer = match quote {
            '[' => ']',
            other => other,
        };
        self.cursor.advance(); // opening quote

        let mut value = String::new();
        loop {
            let rest = self.cursor.rest();
            // Closers are ASCII for every supported quote style.
            let Some(offset) = memchr(closer as u8, rest.as_bytes()) else {
                return Err(self.error_at(line, col, "unterminated delimited identifier"));
            };
            value.push_str(&rest[..offset]);
            for _ in 0..rest[..offset].chars().count() + 1 {
                self.cursor.advance();
            }
            // Doubled closer (not applicable to bracket quoting).
            if closer != ']' && self.cursor.peek() == Some(closer) {
                value.push(closer);
                self.cursor.advance();
            } else {
                return Ok(Word::quoted(quote, value));
            }
        }
    }

    /// Lex a numeric literal, keeping its spelling verbatim:
    /// `digit+ ('.' digit*)? ([eE][+-]? digit+)?` or `.digit+`.
    ///
    /// When the dialect supports numeric prefixes, a plain integer run
    /// followed by identifier characters forms a word instead.
    fn lex_number(&mut self) -> TokenKind {
        let mut text = String::new();
        self.take_digits(&mut text);

        let mut is_decimal = false;
        if self.cursor.peek() == Some('.') {
            // `.` only joins the number when the grammar allows: either we
            // have leading digits, or digits follow.
            let digit_follows = self.cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit());
            if digit_follows || !text.is_empty() {
                is_decimal = true;
                text.push('.');
                self.cursor.advance();
                self.take_digits(&mut text);
            }
        }

        let mut has_exponent = false;
        if let Some(e) = self.cursor.peek() {
            if matches!(e, 'e' | 'E') {
                let next = self.cursor.peek_nth(1);
                let exp_digits = match next {
                    Some(c) if c.is_ascii_digit() => true,
                    Some('+' | '-') => {
                        self.cursor.peek_nth(2).is_some_and(|c| c.is_ascii_digit())
                    }
                    _ => false,
                };
                if exp_digits {
                    has_exponent = true;
                    text.push(e);
                    self.cursor.advance();
                    if let Some(sign @ ('+' | '-')) = self.cursor.peek() {
                        text.push(sign);
                        self.cursor.advance();
                    }
                    self.take_digits(&mut text);
                }
            }
        }

        // `1st_column` style identifiers, where the dialect allows them.
        if !is_decimal
            && !has_exponent
            && self.dialect.supports_numeric_prefix()
            && self
                .cursor
                .peek()
                .is_some_and(|c| self.dialect.is_identifier_part(c) && !c.is_ascii_digit())
        {
            text.push_str(&self.take_identifier_run());
            return TokenKind::Word(Word::bare(text));
        }

        TokenKind::Number(text)
    }

    /// Lex an unquoted word and tag it as a keyword if it matches.
    fn lex_word(&mut self) -> Word {
        let mut value = String::new();
        if let Some(first) = self.cursor.advance() {
            value.push(first);
        }
        value.push_str(&self.take_identifier_run());
        Word::bare(value)
    }

    /// Consume a run of ASCII digits into `out`.
    fn take_digits(&mut self, out: &mut String) {
        while let Some(c) = self.cursor.peek() {
            if c.is_ascii_digit() {
                out.push(c);
                self.cursor.advance();
            } else {
                break;
            }
        }
    }

    /// Consume a run of identifier-part characters.
    fn take_identifier_run(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.cursor.peek() {
            if self.dialect.is_identifier_part(c) {
                out.push(c);
                self.cursor.advance();
            } else {
                break;
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;
    use crate::token::Keyword;
    use proptest::prelude::*;

    fn kinds(sql: &str) -> Vec<TokenKind> {
        Lexer::new(sql, &GenericDialect)
            .tokenize()
            .expect("tokenize")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn lex_err(sql: &str) -> TokenizerError {
        Lexer::new(sql, &GenericDialect)
            .tokenize()
            .expect_err("expected tokenizer error")
    }

    #[test]
    fn test_lex_keywords_and_words() {
        let tokens = kinds("SELECT foo FROM bar");
        assert_eq!(tokens.len(), 5);
        match &tokens[0] {
            TokenKind::Word(w) => assert_eq!(w.keyword, Some(Keyword::Select)),
            other => panic!("expected word, got {other:?}"),
        }
        match &tokens[1] {
            TokenKind::Word(w) => {
                assert_eq!(w.value, "foo");
                assert_eq!(w.keyword, None);
            }
            other => panic!("expected word, got {other:?}"),
        }
    }

    #[test]
    fn test_lex_numbers_verbatim() {
        assert_eq!(
            kinds("42 3.14 .5 1e10 1.5e-3 123."),
            vec![
                TokenKind::Number("42".to_owned()),
                TokenKind::Number("3.14".to_owned()),
                TokenKind::Number(".5".to_owned()),
                TokenKind::Number("1e10".to_owned()),
                TokenKind::Number("1.5e-3".to_owned()),
                TokenKind::Number("123.".to_owned()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_number_then_word_without_numeric_prefix() {
        // GenericDialect does not let a digit start a word.
        assert_eq!(
            kinds("1abc"),
            vec![
                TokenKind::Number("1".to_owned()),
                TokenKind::Word(Word::bare("abc")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_numeric_prefix_dialect_forms_word() {
        #[derive(Debug)]
        struct NumericPrefix;
        impl Dialect for NumericPrefix {
            fn is_identifier_start(&self, ch: char) -> bool {
                ch.is_alphabetic() || ch == '_'
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                ch.is_alphanumeric() || ch == '_'
            }
            fn supports_numeric_prefix(&self) -> bool {
                true
            }
        }
        let tokens: Vec<TokenKind> = Lexer::new("1st_col 2", &NumericPrefix)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            tokens,
            vec![
                TokenKind::Word(Word::bare("1st_col")),
                TokenKind::Number("2".to_owned()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_string_literals() {
        assert_eq!(
            kinds("'hello' 'it''s' ''"),
            vec![
                TokenKind::SingleQuotedString("hello".to_owned()),
                TokenKind::SingleQuotedString("it's".to_owned()),
                TokenKind::SingleQuotedString(String::new()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_string_prefixes() {
        assert_eq!(
            kinds("N'abc' X'CAFE' x'00ff' B'0101'"),
            vec![
                TokenKind::NationalString("abc".to_owned()),
                TokenKind::HexString("CAFE".to_owned()),
                TokenKind::HexString("00ff".to_owned()),
                TokenKind::BitString("0101".to_owned()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_invalid_hex_payload() {
        let err = lex_err("X'NOPE'");
        assert!(err.message.contains("hex"));
    }

    #[test]
    fn test_lex_backslash_escapes() {
        // GenericDialect enables backslash escapes.
        assert_eq!(
            kinds(r"'a\nb' '\\'"),
            vec![
                TokenKind::SingleQuotedString("a\nb".to_owned()),
                TokenKind::SingleQuotedString("\\".to_owned()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_backslash_literal_when_disabled() {
        #[derive(Debug)]
        struct NoEscape;
        impl Dialect for NoEscape {
            fn is_identifier_start(&self, ch: char) -> bool {
                ch.is_alphabetic()
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                ch.is_alphanumeric()
            }
        }
        let tokens: Vec<TokenKind> = Lexer::new(r"'a\nb'", &NoEscape)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            tokens[0],
            TokenKind::SingleQuotedString("a\\nb".to_owned())
        );
    }

    #[test]
    fn test_lex_triple_quoted_string() {
        #[derive(Debug)]
        struct Triple;
        impl Dialect for Triple {
            fn is_identifier_start(&self, ch: char) -> bool {
                ch.is_alphabetic()
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                ch.is_alphanumeric()
            }
            fn supports_triple_quoted_string(&self) -> bool {
                true
            }
        }
        let tokens: Vec<TokenKind> = Lexer::new("'''it's fine'''", &Triple)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            tokens[0],
            TokenKind::SingleQuotedString("it's fine".to_owned())
        );
    }

    #[test]
    fn test_lex_delimited_identifiers() {
        let tokens = kinds("\"table name\" `col` \"a\"\"b\"");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Word(Word::quoted('"', "table name")),
                TokenKind::Word(Word::quoted('`', "col")),
                TokenKind::Word(Word::quoted('"', "a\"b")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_bracket_identifiers_with_bracket_dialect() {
        #[derive(Debug)]
        struct Brackets;
        impl Dialect for Brackets {
            fn is_identifier_start(&self, ch: char) -> bool {
                ch.is_alphabetic()
            }
            fn is_identifier_part(&self, ch: char) -> bool {
                ch.is_alphanumeric()
            }
            fn is_delimited_identifier_start(&self, ch: char) -> bool {
                ch == '[' || ch == '"'
            }
        }
        let tokens: Vec<TokenKind> = Lexer::new("[select]", &Brackets)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(tokens[0], TokenKind::Word(Word::quoted('[', "select")));
    }

    #[test]
    fn test_lex_placeholders() {
        assert_eq!(
            kinds("? ?3 $1 $name @param :named"),
            vec![
                TokenKind::Placeholder("?".to_owned()),
                TokenKind::Placeholder("?3".to_owned()),
                TokenKind::Placeholder("$1".to_owned()),
                TokenKind::Placeholder("$name".to_owned()),
                TokenKind::Placeholder("@param".to_owned()),
                TokenKind::Placeholder(":named".to_owned()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_operators_longest_first() {
        assert_eq!(
            kinds(":: -> ->> => #> #>> @> <@ ?| ?& || | |/ ||/ << >> <= >= <> != && ! ^"),
            vec![
                TokenKind::DoubleColon,
                TokenKind::Arrow,
                TokenKind::LongArrow,
                TokenKind::RArrow,
                TokenKind::HashArrow,
                TokenKind::HashLongArrow,
                TokenKind::AtArrow,
                TokenKind::ArrowAt,
                TokenKind::QuestionPipe,
                TokenKind::QuestionAnd,
                TokenKind::StringConcat,
                TokenKind::Pipe,
                TokenKind::PipeSlash,
                TokenKind::DoublePipeSlash,
                TokenKind::ShiftLeft,
                TokenKind::ShiftRight,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::Neq,
                TokenKind::Neq,
                TokenKind::DoubleAmpersand,
                TokenKind::ExclamationMark,
                TokenKind::Caret,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_comments_discarded() {
        let tokens = kinds("SELECT -- trailing\n a /* block /* nested */ still */ b");
        assert_eq!(tokens.len(), 4); // SELECT, a, b, EOF
    }

    #[test]
    fn test_lex_unterminated_block_comment() {
        let err = lex_err("SELECT /* never closed");
        assert!(err.message.contains("unterminated block comment"));
        assert_eq!(err.line, 1);
        assert_eq!(err.col, 8);
    }

    #[test]
    fn test_lex_unterminated_string() {
        let err = lex_err("SELECT 'abc");
        assert!(err.message.contains("unterminated string"));
        assert_eq!(err.col, 8);
    }

    #[test]
    fn test_lex_unrecognized_character() {
        let err = lex_err("SELECT \u{7f}");
        assert!(err.message.contains("unrecognized character"));
    }

    #[test]
    fn test_lex_line_column_tracking() {
        let tokens = Lexer::new("SELECT\n  a,\r\n  b", &GenericDialect)
            .tokenize()
            .unwrap();
        assert_eq!((tokens[0].line, tokens[0].col), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].col), (2, 3)); // a
        assert_eq!((tokens[2].line, tokens[2].col), (2, 4)); // ,
        assert_eq!((tokens[3].line, tokens[3].col), (3, 3)); // b after \r\n
    }

    proptest! {
        #[test]
        fn prop_identifier_words_lex_as_single_word(
            s in "[a-zA-Z_][a-zA-Z0-9_]{0,20}",
        ) {
            let tokens = kinds(&s);
            prop_assert_eq!(tokens.len(), 2);
            match &tokens[0] {
                TokenKind::Word(w) => prop_assert_eq!(&w.value, &s),
                other => prop_assert!(false, "expected word, got {:?}", other),
            }
        }

        #[test]
        fn prop_numbers_lex_verbatim(
            int in 0u64..1_000_000,
            frac in proptest::option::of(0u64..10_000),
        ) {
            let text = match frac {
                Some(fr) => format!("{int}.{fr}"),
                None => format!("{int}"),
            };
            let tokens = kinds(&text);
            prop_assert_eq!(tokens.len(), 2);
            prop_assert_eq!(&tokens[0], &TokenKind::Number(text));
        }

        #[test]
        fn prop_quoted_string_roundtrips(s in "[^'\\\\]{0,40}") {
            let sql = format!("'{s}'");
            let tokens = kinds(&sql);
            prop_assert_eq!(&tokens[0], &TokenKind::SingleQuotedString(s));
        }
    }
}
