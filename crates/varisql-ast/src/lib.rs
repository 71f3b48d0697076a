//! SQL Abstract Syntax Tree node types for VariSQL.
//!
//! This crate defines the complete AST type hierarchy shared by every
//! dialect. The parser in `varisql-parser` produces trees of these nodes;
//! `display.rs` renders any node back to canonical SQL text and `visit.rs`
//! walks and rewrites trees structurally.
//!
//! All nodes are immutable plain-data values with structural equality.
//! Transformations never mutate in place; they build new nodes.

mod display;
pub mod visit;

// ---------------------------------------------------------------------------
// Identifiers and object names
// ---------------------------------------------------------------------------

/// A single SQL identifier, together with the quote character it was written
/// with (`None` for a bare identifier, `"` / `` ` `` / `[` for delimited
/// ones). The quote style is preserved so rendering reproduces the source
/// form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    /// The identifier text, with quote-escapes already resolved.
    pub value: String,
    /// The opening quote character, if the identifier was delimited.
    pub quote_style: Option<char>,
}

impl Ident {
    /// Create a bare (unquoted) identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote_style: None,
        }
    }

    /// Create a delimited identifier with the given opening quote character.
    #[must_use]
    pub fn with_quote(quote: char, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote_style: Some(quote),
        }
    }
}

impl From<&str> for Ident {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A dotted, possibly-qualified object name such as `catalog.schema.table`.
///
/// Always holds at least one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectName(pub Vec<Ident>);

impl ObjectName {
    /// Create an object name from identifier parts. Panics in debug builds
    /// if `parts` is empty; an `ObjectName` always has length >= 1.
    #[must_use]
    pub fn new(parts: Vec<Ident>) -> Self {
        debug_assert!(!parts.is_empty(), "ObjectName must have at least one part");
        Self(parts)
    }

    /// Create an unqualified single-part name.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self(vec![Ident::new(name)])
    }
}

// ---------------------------------------------------------------------------
// Literal values
// ---------------------------------------------------------------------------

/// A literal value as written in SQL source.
///
/// Numbers keep their source spelling verbatim (`1.50` is not collapsed to
/// `1.5`) so that rendering round-trips exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Numeric literal, verbatim: `42`, `3.14`, `.5`, `1e10`.
    Number(String),
    /// Single-quoted string: `'hello'`.
    SingleQuotedString(String),
    /// National string literal: `N'hello'`.
    NationalStringLiteral(String),
    /// Hex string literal: `X'CAFE'`.
    HexStringLiteral(String),
    /// Bit string literal: `B'0101'`.
    BitStringLiteral(String),
    /// `TRUE` or `FALSE`.
    Boolean(bool),
    /// The keyword `NULL`.
    Null,
    /// A bind parameter: `?`, `$1`, `@name`, `:name`.
    Placeholder(String),
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

/// Binary operators usable in `Expr::BinaryOp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    /// `||`
    StringConcat,
    Gt,
    Lt,
    GtEq,
    LtEq,
    Eq,
    NotEq,
    And,
    Or,
    /// `|`
    BitwiseOr,
    /// `&`
    BitwiseAnd,
    /// `^` (right-associative exponentiation).
    Power,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
}

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
    /// `~`
    BitwiseNot,
    /// `|/` square root.
    SquareRoot,
    /// `||/` cube root.
    CubeRoot,
}

/// JSON access operators (`->`, `->>`, `#>`, `#>>`, `@>`, `<@`, `?`, `?|`,
/// `?&`). The variant choice captures the exact surface operator so that
/// rendering reproduces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonOperator {
    /// `->`
    Arrow,
    /// `->>`
    LongArrow,
    /// `#>`
    HashArrow,
    /// `#>>`
    HashLongArrow,
    /// `@>`
    AtArrow,
    /// `<@`
    ArrowAt,
    /// `?`
    Question,
    /// `?|`
    QuestionPipe,
    /// `?&`
    QuestionAnd,
}

// ---------------------------------------------------------------------------
// Date/time fields
// ---------------------------------------------------------------------------

/// Field names used by `EXTRACT(field FROM ...)` and `INTERVAL` literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeField {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Timezone,
}

/// Position argument of `TRIM`: `TRIM(BOTH 'x' FROM s)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrimWhereField {
    Both,
    Leading,
    Trailing,
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// An expression node.
///
/// The variant set covers scalar expressions across the supported dialects.
/// Dialect-specific surface forms (`::` casts, `{...}` dictionaries, lambda
/// arrows) are captured as their own variants at parse time so rendering
/// needs no dialect reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A bare column or variable reference.
    Identifier(Ident),
    /// A dotted reference such as `alias.column` or `schema.table.column`.
    CompoundIdentifier(Vec<Ident>),
    /// `*` when used in an expression position (e.g. `COUNT(*)`).
    Wildcard,
    /// `table.*` in an expression position.
    QualifiedWildcard(ObjectName),
    /// A literal value.
    Value(Value),
    /// A literal preceded by a type keyword: `DATE '2024-01-01'`.
    TypedString {
        data_type: DataType,
        value: String,
    },
    /// `left op right`.
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    /// `op expr`.
    UnaryOp {
        op: UnaryOperator,
        expr: Box<Expr>,
    },
    /// `expr IS NULL`.
    IsNull(Box<Expr>),
    /// `expr IS NOT NULL`.
    IsNotNull(Box<Expr>),
    /// `expr IS TRUE`.
    IsTrue(Box<Expr>),
    /// `expr IS FALSE`.
    IsFalse(Box<Expr>),
    /// `a IS DISTINCT FROM b`.
    IsDistinctFrom(Box<Expr>, Box<Expr>),
    /// `a IS NOT DISTINCT FROM b`.
    IsNotDistinctFrom(Box<Expr>, Box<Expr>),
    /// `expr [NOT] IN (e1, e2, ...)`.
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    /// `expr [NOT] IN (subquery)`.
    InSubquery {
        expr: Box<Expr>,
        subquery: Box<Query>,
        negated: bool,
    },
    /// `expr [NOT] BETWEEN low AND high`.
    Between {
        expr: Box<Expr>,
        negated: bool,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    /// `expr [NOT] LIKE pattern [ESCAPE ch]`.
    Like {
        negated: bool,
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape_char: Option<char>,
    },
    /// `expr [NOT] ILIKE pattern [ESCAPE ch]` (case-insensitive LIKE).
    ILike {
        negated: bool,
        expr: Box<Expr>,
        pattern: Box<Expr>,
        escape_char: Option<char>,
    },
    /// `expr COLLATE collation`.
    Collate {
        expr: Box<Expr>,
        collation: ObjectName,
    },
    /// A parenthesised subexpression: `(expr)`.
    Nested(Box<Expr>),
    /// A row value: `(a, b, c)` with two or more elements.
    Tuple(Vec<Expr>),
    /// An array constructor: `ARRAY[1, 2, 3]`.
    Array(Vec<Expr>),
    /// Subscript access: `expr[i]` or `expr[i][j]`.
    ArrayIndex {
        obj: Box<Expr>,
        indexes: Vec<Expr>,
    },
    /// A function call.
    Function(Function),
    /// `CASE [operand] WHEN cond THEN result ... [ELSE e] END`.
    Case {
        operand: Option<Box<Expr>>,
        whens: Vec<(Expr, Expr)>,
        else_result: Option<Box<Expr>>,
    },
    /// `CAST(expr AS type)`; also produced by the `::` operator.
    Cast {
        expr: Box<Expr>,
        data_type: DataType,
    },
    /// `CONVERT(...)`. `type_before_value` records the argument order the
    /// dialect used so rendering reproduces it.
    Convert {
        expr: Box<Expr>,
        data_type: DataType,
        type_before_value: bool,
    },
    /// `[NOT] EXISTS (subquery)`.
    Exists {
        subquery: Box<Query>,
        negated: bool,
    },
    /// A scalar subquery: `(SELECT ...)`.
    Subquery(Box<Query>),
    /// `timestamp AT TIME ZONE 'tz'`.
    AtTimeZone {
        timestamp: Box<Expr>,
        time_zone: String,
    },
    /// `SUBSTRING(expr [FROM start] [FOR len])`.
    Substring {
        expr: Box<Expr>,
        substring_from: Option<Box<Expr>>,
        substring_for: Option<Box<Expr>>,
    },
    /// `EXTRACT(field FROM expr)`.
    Extract {
        field: DateTimeField,
        expr: Box<Expr>,
    },
    /// `TRIM([BOTH|LEADING|TRAILING] [chars FROM] expr)`.
    Trim {
        expr: Box<Expr>,
        trim_where: Option<TrimWhereField>,
        trim_what: Option<Box<Expr>>,
    },
    /// `POSITION(needle IN haystack)`.
    Position {
        expr: Box<Expr>,
        r#in: Box<Expr>,
    },
    /// `INTERVAL '1' DAY`, `INTERVAL '1-2' YEAR TO MONTH`.
    Interval {
        value: Box<Expr>,
        leading_field: Option<DateTimeField>,
        last_field: Option<DateTimeField>,
    },
    /// JSON access: `expr -> 'key'`, `expr #>> '{a,b}'`, ...
    JsonAccess {
        left: Box<Expr>,
        operator: JsonOperator,
        right: Box<Expr>,
    },
    /// A lambda: `x -> x + 1` or `(a, b) -> a + b` (dialect-gated).
    Lambda(LambdaFunction),
    /// A dictionary literal: `{'k1': v1, 'k2': v2}` (dialect-gated).
    Dictionary(Vec<DictionaryField>),
    /// `GROUPING SETS ((a), (b, c), ())` inside GROUP BY.
    GroupingSets(Vec<Vec<Expr>>),
    /// `CUBE (a, b)` inside GROUP BY.
    Cube(Vec<Vec<Expr>>),
    /// `ROLLUP (a, b)` inside GROUP BY.
    Rollup(Vec<Vec<Expr>>),
}

/// A lambda expression body with its parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaFunction {
    pub params: Vec<Ident>,
    pub body: Box<Expr>,
}

/// One `key: value` entry of a dictionary literal.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryField {
    pub key: Ident,
    pub value: Box<Expr>,
}

// ---------------------------------------------------------------------------
// Functions and windows
// ---------------------------------------------------------------------------

/// A function call, including aggregate modifiers and window specification.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: ObjectName,
    pub args: Vec<FunctionArg>,
    /// `FILTER (WHERE ...)` after an aggregate (dialect-gated).
    pub filter: Option<Box<Expr>>,
    /// `IGNORE NULLS` / `RESPECT NULLS` inside the argument list
    /// (dialect-gated).
    pub null_treatment: Option<NullTreatment>,
    /// `OVER (...)` or `OVER window_name`.
    pub over: Option<WindowType>,
    pub distinct: bool,
}

/// A single function argument, possibly named.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionArg {
    /// `name => expr` or `name = expr`, depending on the dialect.
    Named {
        name: Ident,
        arg: FunctionArgExpr,
        operator: FunctionArgOperator,
    },
    Unnamed(FunctionArgExpr),
}

/// The value side of a function argument.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionArgExpr {
    Expr(Expr),
    /// `table.*`
    QualifiedWildcard(ObjectName),
    /// `*`
    Wildcard,
}

/// Which operator introduced a named argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionArgOperator {
    /// `=>`
    RightArrow,
    /// `=`
    Equals,
}

/// `IGNORE NULLS` / `RESPECT NULLS` for window functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullTreatment {
    IgnoreNulls,
    RespectNulls,
}

/// The `OVER` argument: inline spec or a named window reference.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowType {
    WindowSpec(WindowSpec),
    NamedWindow(Ident),
}

/// An inline window specification.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<OrderByExpr>,
    pub window_frame: Option<WindowFrame>,
}

/// A window frame clause: `ROWS BETWEEN ... AND ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFrame {
    pub units: WindowFrameUnits,
    pub start_bound: WindowFrameBound,
    /// `None` means the single-bound form (`ROWS n PRECEDING`).
    pub end_bound: Option<WindowFrameBound>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowFrameUnits {
    Rows,
    Range,
    Groups,
}

/// A window frame boundary. `Preceding(None)` / `Following(None)` encode
/// the `UNBOUNDED` forms.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowFrameBound {
    CurrentRow,
    Preceding(Option<Box<Expr>>),
    Following(Option<Box<Expr>>),
}

/// A named window definition in the `WINDOW` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedWindowDef {
    pub name: Ident,
    pub spec: WindowSpec,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// A full query: optional CTEs, one body, and trailing clauses.
///
/// Each trailing clause appears at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub with: Option<With>,
    pub body: Box<SetExpr>,
    pub order_by: Vec<OrderByExpr>,
    pub limit: Option<Expr>,
    pub offset: Option<Offset>,
    pub fetch: Option<Fetch>,
    pub lock: Option<LockType>,
}

/// The `WITH` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct With {
    pub recursive: bool,
    pub ctes: Vec<Cte>,
}

/// A single common table expression: `name (cols) AS (query)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cte {
    pub alias: TableAlias,
    pub query: Box<Query>,
}

/// An alias with optional column renames: `t (a, b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableAlias {
    pub name: Ident,
    pub columns: Vec<Ident>,
}

/// A query body: SELECT core, VALUES, parenthesised query, or a set
/// operation combining two bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum SetExpr {
    Select(Box<Select>),
    /// A parenthesised query with its own ORDER BY / LIMIT.
    Query(Box<Query>),
    SetOperation {
        op: SetOperator,
        all: bool,
        left: Box<SetExpr>,
        right: Box<SetExpr>,
    },
    Values(Values),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOperator {
    Union,
    Except,
    Intersect,
}

/// `VALUES (...), (...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Values(pub Vec<Vec<Expr>>);

/// A SELECT core: projection, FROM, WHERE, GROUP BY, HAVING, WINDOW.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub distinct: bool,
    /// `TOP n` (T-SQL style), if present.
    pub top: Option<Top>,
    pub projection: Vec<SelectItem>,
    pub from: Vec<TableWithJoins>,
    pub selection: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
    /// Named windows from the `WINDOW` clause.
    pub named_windows: Vec<NamedWindowDef>,
    /// Hierarchical query clause (dialect-gated).
    pub connect_by: Option<ConnectBy>,
}

/// `[START WITH cond] CONNECT BY cond` hierarchical clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectBy {
    pub start_with: Option<Expr>,
    pub condition: Expr,
}

/// One projection item.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    UnnamedExpr(Expr),
    ExprWithAlias {
        expr: Expr,
        alias: Ident,
    },
    /// `table.* [EXCEPT (cols)]`.
    QualifiedWildcard {
        name: ObjectName,
        except: Vec<Ident>,
    },
    /// `* [EXCEPT (cols)]`.
    Wildcard {
        except: Vec<Ident>,
    },
}

/// `TOP n [PERCENT] [WITH TIES]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Top {
    pub quantity: Option<Expr>,
    pub percent: bool,
    pub with_ties: bool,
}

/// One FROM item: a relation plus the joins chained onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct TableWithJoins {
    pub relation: TableFactor,
    pub joins: Vec<Join>,
}

/// A relation appearing in FROM.
#[derive(Debug, Clone, PartialEq)]
pub enum TableFactor {
    /// A named table: `schema.table [AS alias]`.
    Table {
        name: ObjectName,
        alias: Option<TableAlias>,
    },
    /// `[LATERAL] (subquery) [AS alias]`.
    Derived {
        lateral: bool,
        subquery: Box<Query>,
        alias: Option<TableAlias>,
    },
    /// A table-valued function: `f(args) [AS alias]`.
    TableFunction {
        name: ObjectName,
        args: Vec<FunctionArg>,
        alias: Option<TableAlias>,
    },
    /// A parenthesised join tree: `(a JOIN b ON ...)`.
    NestedJoin(Box<TableWithJoins>),
    /// `table MATCH_RECOGNIZE (...)` row-pattern matching (dialect-gated).
    MatchRecognize {
        table: Box<TableFactor>,
        partition_by: Vec<Expr>,
        order_by: Vec<OrderByExpr>,
        measures: Vec<Measure>,
        pattern: MatchRecognizePattern,
        define: Vec<SymbolDefinition>,
        alias: Option<TableAlias>,
    },
}

/// One `expr AS name` entry of a MEASURES clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    pub expr: Expr,
    pub alias: Ident,
}

/// A row-pattern term.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchRecognizePattern {
    /// A pattern variable.
    Symbol(Ident),
    /// Concatenation of patterns: `A B+ C`.
    Concat(Vec<MatchRecognizePattern>),
    /// Alternation: `A | B`.
    Alternation(Vec<MatchRecognizePattern>),
    /// A parenthesised group.
    Group(Box<MatchRecognizePattern>),
    /// A quantified pattern: `A*`, `A+`, `A?`.
    Quantified(Box<MatchRecognizePattern>, MatchRecognizeQuantifier),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchRecognizeQuantifier {
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `?`
    AtMostOne,
}

/// One `symbol AS condition` entry of a DEFINE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolDefinition {
    pub symbol: Ident,
    pub definition: Expr,
}

/// A join chained onto a FROM relation.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub relation: TableFactor,
    pub join_operator: JoinOperator,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinOperator {
    Inner(JoinConstraint),
    LeftOuter(JoinConstraint),
    RightOuter(JoinConstraint),
    FullOuter(JoinConstraint),
    CrossJoin,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinConstraint {
    On(Expr),
    Using(Vec<Ident>),
    Natural,
    /// A join written without a constraint.
    None,
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub expr: Expr,
    /// `Some(true)` = ASC, `Some(false)` = DESC, `None` = unspecified.
    pub asc: Option<bool>,
    pub nulls_first: Option<bool>,
}

/// The OFFSET clause with its optional `ROW`/`ROWS` suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct Offset {
    pub value: Expr,
    pub rows: OffsetRows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetRows {
    None,
    Row,
    Rows,
}

/// `FETCH FIRST n ROWS ONLY` / `... WITH TIES`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetch {
    pub with_ties: bool,
    pub percent: bool,
    /// `None` renders without a quantity (`FETCH FIRST ROWS ONLY`).
    pub quantity: Option<Expr>,
}

/// `FOR UPDATE` / `FOR SHARE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockType {
    Share,
    Update,
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

/// A single parsed SQL statement, the top-level AST node.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A bare query (SELECT / VALUES / set operation).
    Query(Box<Query>),
    /// `INSERT INTO table (cols) <query>`. The source query covers both
    /// `VALUES ...` and `SELECT ...` forms.
    Insert {
        table_name: ObjectName,
        columns: Vec<Ident>,
        source: Box<Query>,
    },
    /// `UPDATE table SET assignments [FROM ...] [WHERE ...]`.
    Update {
        table: TableWithJoins,
        assignments: Vec<Assignment>,
        from: Option<TableWithJoins>,
        selection: Option<Expr>,
    },
    /// `DELETE FROM table [USING ...] [WHERE ...]`.
    Delete {
        table_name: ObjectName,
        using: Option<TableWithJoins>,
        selection: Option<Expr>,
    },
    /// `CREATE TABLE`.
    CreateTable {
        or_replace: bool,
        if_not_exists: bool,
        name: ObjectName,
        columns: Vec<ColumnDef>,
        constraints: Vec<TableConstraint>,
        /// `AS SELECT ...`, if present.
        query: Option<Box<Query>>,
    },
    /// `CREATE [MATERIALIZED] VIEW`.
    CreateView {
        or_replace: bool,
        materialized: bool,
        name: ObjectName,
        columns: Vec<Ident>,
        query: Box<Query>,
    },
    /// `CREATE [UNIQUE] INDEX name ON table (cols)`.
    CreateIndex {
        unique: bool,
        if_not_exists: bool,
        name: ObjectName,
        table_name: ObjectName,
        columns: Vec<OrderByExpr>,
    },
    /// `ALTER TABLE name <operation>`.
    AlterTable {
        name: ObjectName,
        operation: AlterTableOperation,
    },
    /// `DROP TABLE|VIEW|INDEX|SCHEMA [IF EXISTS] names [CASCADE]`.
    Drop {
        object_type: ObjectType,
        if_exists: bool,
        names: Vec<ObjectName>,
        cascade: bool,
    },
    /// `TRUNCATE TABLE name`.
    Truncate {
        table_name: ObjectName,
    },
    /// `START TRANSACTION` / `BEGIN` with optional modes.
    StartTransaction {
        modes: Vec<TransactionMode>,
    },
    /// `COMMIT [AND [NO] CHAIN]`.
    Commit {
        chain: bool,
    },
    /// `ROLLBACK [AND [NO] CHAIN]`.
    Rollback {
        chain: bool,
    },
    /// `SET [SESSION|LOCAL] var = value` or `SET (a, b) = (x, y)`.
    SetVariable {
        local: bool,
        variables: Vec<ObjectName>,
        values: Vec<Expr>,
    },
    /// `USE db`.
    Use {
        db_name: Ident,
    },
    /// `GRANT privileges ON objects TO grantees [WITH GRANT OPTION]`.
    Grant {
        privileges: Privileges,
        objects: GrantObjects,
        grantees: Vec<Ident>,
        with_grant_option: bool,
    },
}

/// One `column = expr` assignment in UPDATE SET. The target may be a
/// compound identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub id: Vec<Ident>,
    pub value: Expr,
}

// ---------------------------------------------------------------------------
// DDL supporting types
// ---------------------------------------------------------------------------

/// A column definition inside CREATE TABLE.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: Ident,
    pub data_type: DataType,
    pub options: Vec<ColumnOptionDef>,
}

/// A possibly-named column option: `[CONSTRAINT name] NOT NULL`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOptionDef {
    pub name: Option<Ident>,
    pub option: ColumnOption,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnOption {
    Null,
    NotNull,
    Default(Expr),
    Unique {
        is_primary: bool,
    },
    ForeignKey {
        foreign_table: ObjectName,
        referred_columns: Vec<Ident>,
    },
    Check(Expr),
}

/// A table-level constraint inside CREATE TABLE.
#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraint {
    Unique {
        name: Option<Ident>,
        columns: Vec<Ident>,
        is_primary: bool,
    },
    ForeignKey {
        name: Option<Ident>,
        columns: Vec<Ident>,
        foreign_table: ObjectName,
        referred_columns: Vec<Ident>,
    },
    Check {
        name: Option<Ident>,
        expr: Box<Expr>,
    },
}

/// An ALTER TABLE action.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterTableOperation {
    AddColumn {
        column_def: ColumnDef,
    },
    DropColumn {
        column_name: Ident,
        if_exists: bool,
        cascade: bool,
    },
    RenameColumn {
        old_column_name: Ident,
        new_column_name: Ident,
    },
    RenameTable {
        table_name: ObjectName,
    },
    AddConstraint(TableConstraint),
    DropConstraint {
        name: Ident,
    },
}

/// DROP target kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Table,
    View,
    Index,
    Schema,
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// One mode listed after START TRANSACTION.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionMode {
    AccessMode(TransactionAccessMode),
    IsolationLevel(TransactionIsolationLevel),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionAccessMode {
    ReadOnly,
    ReadWrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionIsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

// ---------------------------------------------------------------------------
// GRANT supporting types
// ---------------------------------------------------------------------------

/// The privilege list of a GRANT statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Privileges {
    /// `ALL [PRIVILEGES]`.
    All {
        with_privileges_keyword: bool,
    },
    Actions(Vec<Action>),
}

/// A single grantable action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Select,
    Insert,
    Update,
    Delete,
    References,
    Usage,
    Create,
    Connect,
    Execute,
    Temporary,
    Truncate,
    Trigger,
}

/// What a GRANT statement applies to.
#[derive(Debug, Clone, PartialEq)]
pub enum GrantObjects {
    Tables(Vec<ObjectName>),
    Schemas(Vec<ObjectName>),
    AllTablesInSchema {
        schemas: Vec<ObjectName>,
    },
}

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A SQL data type as written in DDL or CAST.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    TinyInt(Option<u64>),
    SmallInt(Option<u64>),
    Int(Option<u64>),
    BigInt(Option<u64>),
    Real,
    Float(Option<u64>),
    Double,
    /// `DECIMAL(p, s)` / `NUMERIC(p, s)`.
    Decimal(Option<u64>, Option<u64>),
    Char(Option<u64>),
    Varchar(Option<u64>),
    Text,
    Binary(Option<u64>),
    Varbinary(Option<u64>),
    Blob(Option<u64>),
    Date,
    Time,
    Timestamp,
    Interval,
    Json,
    Uuid,
    /// An array type. The element definition records which of the three
    /// surface syntaxes was used, since they round-trip differently.
    Array(ArrayElemTypeDef),
    /// A user-defined or otherwise unrecognised type name.
    Custom(ObjectName),
}

/// The three array type syntaxes, preserved distinctly:
/// `ARRAY<T>`, `T[n]`, and `ARRAY(T)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArrayElemTypeDef {
    /// `ARRAY<T>`
    AngleBracket(Box<DataType>),
    /// `T[]` or `T[n]`
    SquareBracket(Box<DataType>, Option<u64>),
    /// `ARRAY(T)`
    Parenthesis(Box<DataType>),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
