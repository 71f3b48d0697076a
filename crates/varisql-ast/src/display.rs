//! SQL rendering via `fmt::Display` for AST nodes.
//!
//! Every node type implements `Display`, reconstructing canonical SQL:
//! upper-case keywords, single spaces, `, `-separated lists, and the quote
//! style each identifier was captured with. Rendering is purely structural;
//! no dialect is consulted, because the variant chosen at parse time already
//! records every dialect-specific surface form.

#[allow(clippy::wildcard_imports)]
use crate::*;
use std::fmt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn comma_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quote_style {
            None => f.write_str(&self.value),
            Some('[') => write!(f, "[{}]", self.value),
            Some(q) => {
                // Double any embedded quote character.
                let escaped = self.value.replace(q, &format!("{q}{q}"));
                write!(f, "{q}{escaped}{q}")
            }
        }
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(n),
            Self::SingleQuotedString(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Self::NationalStringLiteral(s) => write!(f, "N'{}'", s.replace('\'', "''")),
            Self::HexStringLiteral(s) => write!(f, "X'{s}'"),
            Self::BitStringLiteral(s) => write!(f, "B'{s}'"),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Null => f.write_str("NULL"),
            Self::Placeholder(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::StringConcat => "||",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::And => "AND",
            Self::Or => "OR",
            Self::BitwiseOr => "|",
            Self::BitwiseAnd => "&",
            Self::Power => "^",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
        })
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "NOT",
            Self::BitwiseNot => "~",
            Self::SquareRoot => "|/",
            Self::CubeRoot => "||/",
        })
    }
}

impl fmt::Display for JsonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Arrow => "->",
            Self::LongArrow => "->>",
            Self::HashArrow => "#>",
            Self::HashLongArrow => "#>>",
            Self::AtArrow => "@>",
            Self::ArrowAt => "<@",
            Self::Question => "?",
            Self::QuestionPipe => "?|",
            Self::QuestionAnd => "?&",
        })
    }
}

impl fmt::Display for DateTimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Week => "WEEK",
            Self::Day => "DAY",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
            Self::Millisecond => "MILLISECOND",
            Self::Microsecond => "MICROSECOND",
            Self::Timezone => "TIMEZONE",
        })
    }
}

impl fmt::Display for TrimWhereField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Both => "BOTH",
            Self::Leading => "LEADING",
            Self::Trailing => "TRAILING",
        })
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

impl fmt::Display for Expr {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(id) => write!(f, "{id}"),
            Self::CompoundIdentifier(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
            Self::Wildcard => f.write_str("*"),
            Self::QualifiedWildcard(name) => write!(f, "{name}.*"),
            Self::Value(v) => write!(f, "{v}"),
            Self::TypedString { data_type, value } => {
                write!(f, "{data_type} '{}'", value.replace('\'', "''"))
            }
            Self::BinaryOp { left, op, right } => write!(f, "{left} {op} {right}"),
            Self::UnaryOp { op, expr } => {
                if matches!(op, UnaryOperator::Not) {
                    write!(f, "NOT {expr}")
                } else if matches!(**expr, Self::UnaryOp { .. }) {
                    // Space keeps `- -x` from merging into a `--` comment.
                    write!(f, "{op} {expr}")
                } else {
                    write!(f, "{op}{expr}")
                }
            }
            Self::IsNull(e) => write!(f, "{e} IS NULL"),
            Self::IsNotNull(e) => write!(f, "{e} IS NOT NULL"),
            Self::IsTrue(e) => write!(f, "{e} IS TRUE"),
            Self::IsFalse(e) => write!(f, "{e} IS FALSE"),
            Self::IsDistinctFrom(a, b) => write!(f, "{a} IS DISTINCT FROM {b}"),
            Self::IsNotDistinctFrom(a, b) => write!(f, "{a} IS NOT DISTINCT FROM {b}"),
            Self::InList {
                expr,
                list,
                negated,
            } => {
                write!(f, "{expr} {}IN (", if *negated { "NOT " } else { "" })?;
                comma_list(f, list)?;
                f.write_str(")")
            }
            Self::InSubquery {
                expr,
                subquery,
                negated,
            } => write!(
                f,
                "{expr} {}IN ({subquery})",
                if *negated { "NOT " } else { "" }
            ),
            Self::Between {
                expr,
                negated,
                low,
                high,
            } => write!(
                f,
                "{expr} {}BETWEEN {low} AND {high}",
                if *negated { "NOT " } else { "" }
            ),
            Self::Like {
                negated,
                expr,
                pattern,
                escape_char,
            } => {
                write!(
                    f,
                    "{expr} {}LIKE {pattern}",
                    if *negated { "NOT " } else { "" }
                )?;
                if let Some(ch) = escape_char {
                    write!(f, " ESCAPE '{ch}'")?;
                }
                Ok(())
            }
            Self::ILike {
                negated,
                expr,
                pattern,
                escape_char,
            } => {
                write!(
                    f,
                    "{expr} {}ILIKE {pattern}",
                    if *negated { "NOT " } else { "" }
                )?;
                if let Some(ch) = escape_char {
                    write!(f, " ESCAPE '{ch}'")?;
                }
                Ok(())
            }
            Self::Collate { expr, collation } => write!(f, "{expr} COLLATE {collation}"),
            Self::Nested(e) => write!(f, "({e})"),
            Self::Tuple(items) => {
                f.write_str("(")?;
                comma_list(f, items)?;
                f.write_str(")")
            }
            Self::Array(items) => {
                f.write_str("ARRAY[")?;
                comma_list(f, items)?;
                f.write_str("]")
            }
            Self::ArrayIndex { obj, indexes } => {
                write!(f, "{obj}")?;
                for idx in indexes {
                    write!(f, "[{idx}]")?;
                }
                Ok(())
            }
            Self::Function(func) => write!(f, "{func}"),
            Self::Case {
                operand,
                whens,
                else_result,
            } => {
                f.write_str("CASE")?;
                if let Some(op) = operand {
                    write!(f, " {op}")?;
                }
                for (cond, result) in whens {
                    write!(f, " WHEN {cond} THEN {result}")?;
                }
                if let Some(el) = else_result {
                    write!(f, " ELSE {el}")?;
                }
                f.write_str(" END")
            }
            Self::Cast { expr, data_type } => write!(f, "CAST({expr} AS {data_type})"),
            Self::Convert {
                expr,
                data_type,
                type_before_value,
            } => {
                if *type_before_value {
                    write!(f, "CONVERT({data_type}, {expr})")
                } else {
                    write!(f, "CONVERT({expr}, {data_type})")
                }
            }
            Self::Exists { subquery, negated } => write!(
                f,
                "{}EXISTS ({subquery})",
                if *negated { "NOT " } else { "" }
            ),
            Self::Subquery(q) => write!(f, "({q})"),
            Self::AtTimeZone {
                timestamp,
                time_zone,
            } => write!(f, "{timestamp} AT TIME ZONE '{time_zone}'"),
            Self::Substring {
                expr,
                substring_from,
                substring_for,
            } => {
                write!(f, "SUBSTRING({expr}")?;
                if let Some(from) = substring_from {
                    write!(f, " FROM {from}")?;
                }
                if let Some(len) = substring_for {
                    write!(f, " FOR {len}")?;
                }
                f.write_str(")")
            }
            Self::Extract { field, expr } => write!(f, "EXTRACT({field} FROM {expr})"),
            Self::Trim {
                expr,
                trim_where,
                trim_what,
            } => {
                f.write_str("TRIM(")?;
                if let Some(loc) = trim_where {
                    write!(f, "{loc} ")?;
                }
                if let Some(what) = trim_what {
                    write!(f, "{what} FROM ")?;
                }
                write!(f, "{expr})")
            }
            Self::Position { expr, r#in } => write!(f, "POSITION({} IN {})", expr, r#in),
            Self::Interval {
                value,
                leading_field,
                last_field,
            } => {
                write!(f, "INTERVAL {value}")?;
                if let Some(lead) = leading_field {
                    write!(f, " {lead}")?;
                }
                if let Some(last) = last_field {
                    write!(f, " TO {last}")?;
                }
                Ok(())
            }
            Self::JsonAccess {
                left,
                operator,
                right,
            } => write!(f, "{left} {operator} {right}"),
            Self::Lambda(lambda) => write!(f, "{lambda}"),
            Self::Dictionary(fields) => {
                f.write_str("{")?;
                comma_list(f, fields)?;
                f.write_str("}")
            }
            Self::GroupingSets(sets) => {
                f.write_str("GROUPING SETS (")?;
                for (i, set) in sets.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str("(")?;
                    comma_list(f, set)?;
                    f.write_str(")")?;
                }
                f.write_str(")")
            }
            Self::Cube(sets) => {
                f.write_str("CUBE (")?;
                write_group_by_sets(f, sets)?;
                f.write_str(")")
            }
            Self::Rollup(sets) => {
                f.write_str("ROLLUP (")?;
                write_group_by_sets(f, sets)?;
                f.write_str(")")
            }
        }
    }
}

/// CUBE/ROLLUP element lists: a one-element set prints bare, larger sets
/// print parenthesised.
fn write_group_by_sets(f: &mut fmt::Formatter<'_>, sets: &[Vec<Expr>]) -> fmt::Result {
    for (i, set) in sets.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        if set.len() == 1 {
            write!(f, "{}", set[0])?;
        } else {
            f.write_str("(")?;
            comma_list(f, set)?;
            f.write_str(")")?;
        }
    }
    Ok(())
}

impl fmt::Display for LambdaFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.len() == 1 {
            write!(f, "{} -> {}", self.params[0], self.body)
        } else {
            f.write_str("(")?;
            comma_list(f, &self.params)?;
            write!(f, ") -> {}", self.body)
        }
    }
}

impl fmt::Display for DictionaryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.key.value, self.value)
    }
}

// ---------------------------------------------------------------------------
// Functions and windows
// ---------------------------------------------------------------------------

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        comma_list(f, &self.args)?;
        if let Some(nt) = self.null_treatment {
            write!(f, " {nt}")?;
        }
        f.write_str(")")?;
        if let Some(filter) = &self.filter {
            write!(f, " FILTER (WHERE {filter})")?;
        }
        if let Some(over) = &self.over {
            write!(f, " OVER {over}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FunctionArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named {
                name,
                arg,
                operator,
            } => write!(f, "{name} {operator} {arg}"),
            Self::Unnamed(arg) => write!(f, "{arg}"),
        }
    }
}

impl fmt::Display for FunctionArgExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr(e) => write!(f, "{e}"),
            Self::QualifiedWildcard(name) => write!(f, "{name}.*"),
            Self::Wildcard => f.write_str("*"),
        }
    }
}

impl fmt::Display for FunctionArgOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RightArrow => "=>",
            Self::Equals => "=",
        })
    }
}

impl fmt::Display for NullTreatment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::IgnoreNulls => "IGNORE NULLS",
            Self::RespectNulls => "RESPECT NULLS",
        })
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowSpec(spec) => write!(f, "({spec})"),
            Self::NamedWindow(name) => write!(f, "{name}"),
        }
    }
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut need_space = false;
        if !self.partition_by.is_empty() {
            f.write_str("PARTITION BY ")?;
            comma_list(f, &self.partition_by)?;
            need_space = true;
        }
        if !self.order_by.is_empty() {
            if need_space {
                f.write_str(" ")?;
            }
            f.write_str("ORDER BY ")?;
            comma_list(f, &self.order_by)?;
            need_space = true;
        }
        if let Some(frame) = &self.window_frame {
            if need_space {
                f.write_str(" ")?;
            }
            write!(f, "{frame}")?;
        }
        Ok(())
    }
}

impl fmt::Display for WindowFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.units)?;
        if let Some(end) = &self.end_bound {
            write!(f, " BETWEEN {} AND {end}", self.start_bound)
        } else {
            write!(f, " {}", self.start_bound)
        }
    }
}

impl fmt::Display for WindowFrameUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rows => "ROWS",
            Self::Range => "RANGE",
            Self::Groups => "GROUPS",
        })
    }
}

impl fmt::Display for WindowFrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentRow => f.write_str("CURRENT ROW"),
            Self::Preceding(None) => f.write_str("UNBOUNDED PRECEDING"),
            Self::Preceding(Some(n)) => write!(f, "{n} PRECEDING"),
            Self::Following(None) => f.write_str("UNBOUNDED FOLLOWING"),
            Self::Following(Some(n)) => write!(f, "{n} FOLLOWING"),
        }
    }
}

impl fmt::Display for NamedWindowDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} AS ({})", self.name, self.spec)
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{with} ")?;
        }
        write!(f, "{}", self.body)?;
        if !self.order_by.is_empty() {
            f.write_str(" ORDER BY ")?;
            comma_list(f, &self.order_by)?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        if let Some(offset) = &self.offset {
            write!(f, " {offset}")?;
        }
        if let Some(fetch) = &self.fetch {
            write!(f, " {fetch}")?;
        }
        if let Some(lock) = &self.lock {
            write!(f, " {lock}")?;
        }
        Ok(())
    }
}

impl fmt::Display for With {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.recursive {
            "WITH RECURSIVE "
        } else {
            "WITH "
        })?;
        comma_list(f, &self.ctes)
    }
}

impl fmt::Display for Cte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} AS ({})", self.alias, self.query)
    }
}

impl fmt::Display for TableAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            comma_list(f, &self.columns)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for SetExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(s) => write!(f, "{s}"),
            Self::Query(q) => write!(f, "({q})"),
            Self::SetOperation {
                op,
                all,
                left,
                right,
            } => {
                write!(f, "{left} {op} ")?;
                if *all {
                    f.write_str("ALL ")?;
                }
                write!(f, "{right}")
            }
            Self::Values(v) => write!(f, "{v}"),
        }
    }
}

impl fmt::Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Union => "UNION",
            Self::Except => "EXCEPT",
            Self::Intersect => "INTERSECT",
        })
    }
}

impl fmt::Display for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VALUES ")?;
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("(")?;
            comma_list(f, row)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT")?;
        if self.distinct {
            f.write_str(" DISTINCT")?;
        }
        if let Some(top) = &self.top {
            write!(f, " {top}")?;
        }
        f.write_str(" ")?;
        comma_list(f, &self.projection)?;
        if !self.from.is_empty() {
            f.write_str(" FROM ")?;
            comma_list(f, &self.from)?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {selection}")?;
        }
        if !self.group_by.is_empty() {
            f.write_str(" GROUP BY ")?;
            comma_list(f, &self.group_by)?;
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {having}")?;
        }
        if !self.named_windows.is_empty() {
            f.write_str(" WINDOW ")?;
            comma_list(f, &self.named_windows)?;
        }
        if let Some(connect_by) = &self.connect_by {
            write!(f, " {connect_by}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ConnectBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = &self.start_with {
            write!(f, "START WITH {start} ")?;
        }
        write!(f, "CONNECT BY {}", self.condition)
    }
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnnamedExpr(e) => write!(f, "{e}"),
            Self::ExprWithAlias { expr, alias } => write!(f, "{expr} AS {alias}"),
            Self::QualifiedWildcard { name, except } => {
                write!(f, "{name}.*")?;
                write_wildcard_except(f, except)
            }
            Self::Wildcard { except } => {
                f.write_str("*")?;
                write_wildcard_except(f, except)
            }
        }
    }
}

fn write_wildcard_except(f: &mut fmt::Formatter<'_>, except: &[Ident]) -> fmt::Result {
    if !except.is_empty() {
        f.write_str(" EXCEPT (")?;
        comma_list(f, except)?;
        f.write_str(")")?;
    }
    Ok(())
}

impl fmt::Display for Top {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TOP")?;
        if let Some(quantity) = &self.quantity {
            write!(f, " {quantity}")?;
        }
        if self.percent {
            f.write_str(" PERCENT")?;
        }
        if self.with_ties {
            f.write_str(" WITH TIES")?;
        }
        Ok(())
    }
}

impl fmt::Display for TableWithJoins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relation)?;
        for join in &self.joins {
            write!(f, "{join}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TableFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table { name, alias } => {
                write!(f, "{name}")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
            Self::Derived {
                lateral,
                subquery,
                alias,
            } => {
                if *lateral {
                    f.write_str("LATERAL ")?;
                }
                write!(f, "({subquery})")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
            Self::TableFunction { name, args, alias } => {
                write!(f, "{name}(")?;
                comma_list(f, args)?;
                f.write_str(")")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
            Self::NestedJoin(inner) => write!(f, "({inner})"),
            Self::MatchRecognize {
                table,
                partition_by,
                order_by,
                measures,
                pattern,
                define,
                alias,
            } => {
                write!(f, "{table} MATCH_RECOGNIZE (")?;
                if !partition_by.is_empty() {
                    f.write_str("PARTITION BY ")?;
                    comma_list(f, partition_by)?;
                    f.write_str(" ")?;
                }
                if !order_by.is_empty() {
                    f.write_str("ORDER BY ")?;
                    comma_list(f, order_by)?;
                    f.write_str(" ")?;
                }
                if !measures.is_empty() {
                    f.write_str("MEASURES ")?;
                    comma_list(f, measures)?;
                    f.write_str(" ")?;
                }
                write!(f, "PATTERN ({pattern}) DEFINE ")?;
                comma_list(f, define)?;
                f.write_str(")")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} AS {}", self.expr, self.alias)
    }
}

impl fmt::Display for MatchRecognizePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(id) => write!(f, "{id}"),
            Self::Concat(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
            Self::Alternation(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
            Self::Group(inner) => write!(f, "({inner})"),
            Self::Quantified(inner, quantifier) => write!(f, "{inner}{quantifier}"),
        }
    }
}

impl fmt::Display for MatchRecognizeQuantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ZeroOrMore => "*",
            Self::OneOrMore => "+",
            Self::AtMostOne => "?",
        })
    }
}

impl fmt::Display for SymbolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} AS {}", self.symbol, self.definition)
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn prefix(constraint: &JoinConstraint) -> &'static str {
            match constraint {
                JoinConstraint::Natural => "NATURAL ",
                _ => "",
            }
        }
        fn suffix(constraint: &JoinConstraint) -> Suffix<'_> {
            Suffix(constraint)
        }
        struct Suffix<'a>(&'a JoinConstraint);
        impl fmt::Display for Suffix<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.0 {
                    JoinConstraint::On(expr) => write!(f, " ON {expr}"),
                    JoinConstraint::Using(cols) => {
                        f.write_str(" USING (")?;
                        comma_list(f, cols)?;
                        f.write_str(")")
                    }
                    JoinConstraint::Natural | JoinConstraint::None => Ok(()),
                }
            }
        }
        match &self.join_operator {
            JoinOperator::Inner(constraint) => write!(
                f,
                " {}JOIN {}{}",
                prefix(constraint),
                self.relation,
                suffix(constraint)
            ),
            JoinOperator::LeftOuter(constraint) => write!(
                f,
                " {}LEFT JOIN {}{}",
                prefix(constraint),
                self.relation,
                suffix(constraint)
            ),
            JoinOperator::RightOuter(constraint) => write!(
                f,
                " {}RIGHT JOIN {}{}",
                prefix(constraint),
                self.relation,
                suffix(constraint)
            ),
            JoinOperator::FullOuter(constraint) => write!(
                f,
                " {}FULL JOIN {}{}",
                prefix(constraint),
                self.relation,
                suffix(constraint)
            ),
            JoinOperator::CrossJoin => write!(f, " CROSS JOIN {}", self.relation),
        }
    }
}

impl fmt::Display for OrderByExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        match self.asc {
            Some(true) => f.write_str(" ASC")?,
            Some(false) => f.write_str(" DESC")?,
            None => {}
        }
        match self.nulls_first {
            Some(true) => f.write_str(" NULLS FIRST")?,
            Some(false) => f.write_str(" NULLS LAST")?,
            None => {}
        }
        Ok(())
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OFFSET {}{}", self.value, self.rows)
    }
}

impl fmt::Display for OffsetRows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Row => f.write_str(" ROW"),
            Self::Rows => f.write_str(" ROWS"),
        }
    }
}

impl fmt::Display for Fetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let extension = if self.with_ties { "WITH TIES" } else { "ONLY" };
        if let Some(quantity) = &self.quantity {
            let percent = if self.percent { " PERCENT" } else { "" };
            write!(f, "FETCH FIRST {quantity}{percent} ROWS {extension}")
        } else {
            write!(f, "FETCH FIRST ROWS {extension}")
        }
    }
}

impl fmt::Display for LockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Share => "FOR SHARE",
            Self::Update => "FOR UPDATE",
        })
    }
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

impl fmt::Display for Statement {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(q) => write!(f, "{q}"),
            Self::Insert {
                table_name,
                columns,
                source,
            } => {
                write!(f, "INSERT INTO {table_name} ")?;
                if !columns.is_empty() {
                    f.write_str("(")?;
                    comma_list(f, columns)?;
                    f.write_str(") ")?;
                }
                write!(f, "{source}")
            }
            Self::Update {
                table,
                assignments,
                from,
                selection,
            } => {
                write!(f, "UPDATE {table} SET ")?;
                comma_list(f, assignments)?;
                if let Some(from) = from {
                    write!(f, " FROM {from}")?;
                }
                if let Some(selection) = selection {
                    write!(f, " WHERE {selection}")?;
                }
                Ok(())
            }
            Self::Delete {
                table_name,
                using,
                selection,
            } => {
                write!(f, "DELETE FROM {table_name}")?;
                if let Some(using) = using {
                    write!(f, " USING {using}")?;
                }
                if let Some(selection) = selection {
                    write!(f, " WHERE {selection}")?;
                }
                Ok(())
            }
            Self::CreateTable {
                or_replace,
                if_not_exists,
                name,
                columns,
                constraints,
                query,
            } => {
                write!(
                    f,
                    "CREATE {}TABLE {}{name}",
                    if *or_replace { "OR REPLACE " } else { "" },
                    if *if_not_exists { "IF NOT EXISTS " } else { "" },
                )?;
                if !columns.is_empty() || !constraints.is_empty() {
                    f.write_str(" (")?;
                    comma_list(f, columns)?;
                    if !columns.is_empty() && !constraints.is_empty() {
                        f.write_str(", ")?;
                    }
                    comma_list(f, constraints)?;
                    f.write_str(")")?;
                }
                if let Some(query) = query {
                    write!(f, " AS {query}")?;
                }
                Ok(())
            }
            Self::CreateView {
                or_replace,
                materialized,
                name,
                columns,
                query,
            } => {
                write!(
                    f,
                    "CREATE {}{}VIEW {name}",
                    if *or_replace { "OR REPLACE " } else { "" },
                    if *materialized { "MATERIALIZED " } else { "" },
                )?;
                if !columns.is_empty() {
                    f.write_str(" (")?;
                    comma_list(f, columns)?;
                    f.write_str(")")?;
                }
                write!(f, " AS {query}")
            }
            Self::CreateIndex {
                unique,
                if_not_exists,
                name,
                table_name,
                columns,
            } => {
                write!(
                    f,
                    "CREATE {}INDEX {}{name} ON {table_name}(",
                    if *unique { "UNIQUE " } else { "" },
                    if *if_not_exists { "IF NOT EXISTS " } else { "" },
                )?;
                comma_list(f, columns)?;
                f.write_str(")")
            }
            Self::AlterTable { name, operation } => {
                write!(f, "ALTER TABLE {name} {operation}")
            }
            Self::Drop {
                object_type,
                if_exists,
                names,
                cascade,
            } => {
                write!(
                    f,
                    "DROP {object_type} {}",
                    if *if_exists { "IF EXISTS " } else { "" },
                )?;
                comma_list(f, names)?;
                if *cascade {
                    f.write_str(" CASCADE")?;
                }
                Ok(())
            }
            Self::Truncate { table_name } => write!(f, "TRUNCATE TABLE {table_name}"),
            Self::StartTransaction { modes } => {
                f.write_str("START TRANSACTION")?;
                if !modes.is_empty() {
                    f.write_str(" ")?;
                    comma_list(f, modes)?;
                }
                Ok(())
            }
            Self::Commit { chain } => {
                write!(f, "COMMIT{}", if *chain { " AND CHAIN" } else { "" })
            }
            Self::Rollback { chain } => {
                write!(f, "ROLLBACK{}", if *chain { " AND CHAIN" } else { "" })
            }
            Self::SetVariable {
                local,
                variables,
                values,
            } => {
                f.write_str("SET ")?;
                if *local {
                    f.write_str("LOCAL ")?;
                }
                if variables.len() == 1 {
                    write!(f, "{} = ", variables[0])?;
                    comma_list(f, values)
                } else {
                    f.write_str("(")?;
                    comma_list(f, variables)?;
                    f.write_str(") = (")?;
                    comma_list(f, values)?;
                    f.write_str(")")
                }
            }
            Self::Use { db_name } => write!(f, "USE {db_name}"),
            Self::Grant {
                privileges,
                objects,
                grantees,
                with_grant_option,
            } => {
                write!(f, "GRANT {privileges} ON {objects} TO ")?;
                comma_list(f, grantees)?;
                if *with_grant_option {
                    f.write_str(" WITH GRANT OPTION")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.id.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        write!(f, " = {}", self.value)
    }
}

// ---------------------------------------------------------------------------
// DDL supporting types
// ---------------------------------------------------------------------------

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        for option in &self.options {
            write!(f, " {option}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ColumnOptionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {name} ")?;
        }
        write!(f, "{}", self.option)
    }
}

impl fmt::Display for ColumnOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::NotNull => f.write_str("NOT NULL"),
            Self::Default(expr) => write!(f, "DEFAULT {expr}"),
            Self::Unique { is_primary: true } => f.write_str("PRIMARY KEY"),
            Self::Unique { is_primary: false } => f.write_str("UNIQUE"),
            Self::ForeignKey {
                foreign_table,
                referred_columns,
            } => {
                write!(f, "REFERENCES {foreign_table}")?;
                if !referred_columns.is_empty() {
                    f.write_str(" (")?;
                    comma_list(f, referred_columns)?;
                    f.write_str(")")?;
                }
                Ok(())
            }
            Self::Check(expr) => write!(f, "CHECK ({expr})"),
        }
    }
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn constraint_name(f: &mut fmt::Formatter<'_>, name: &Option<Ident>) -> fmt::Result {
            if let Some(name) = name {
                write!(f, "CONSTRAINT {name} ")?;
            }
            Ok(())
        }
        match self {
            Self::Unique {
                name,
                columns,
                is_primary,
            } => {
                constraint_name(f, name)?;
                f.write_str(if *is_primary { "PRIMARY KEY (" } else { "UNIQUE (" })?;
                comma_list(f, columns)?;
                f.write_str(")")
            }
            Self::ForeignKey {
                name,
                columns,
                foreign_table,
                referred_columns,
            } => {
                constraint_name(f, name)?;
                f.write_str("FOREIGN KEY (")?;
                comma_list(f, columns)?;
                write!(f, ") REFERENCES {foreign_table}")?;
                if !referred_columns.is_empty() {
                    f.write_str(" (")?;
                    comma_list(f, referred_columns)?;
                    f.write_str(")")?;
                }
                Ok(())
            }
            Self::Check { name, expr } => {
                constraint_name(f, name)?;
                write!(f, "CHECK ({expr})")
            }
        }
    }
}

impl fmt::Display for AlterTableOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddColumn { column_def } => write!(f, "ADD COLUMN {column_def}"),
            Self::DropColumn {
                column_name,
                if_exists,
                cascade,
            } => write!(
                f,
                "DROP COLUMN {}{column_name}{}",
                if *if_exists { "IF EXISTS " } else { "" },
                if *cascade { " CASCADE" } else { "" },
            ),
            Self::RenameColumn {
                old_column_name,
                new_column_name,
            } => write!(f, "RENAME COLUMN {old_column_name} TO {new_column_name}"),
            Self::RenameTable { table_name } => write!(f, "RENAME TO {table_name}"),
            Self::AddConstraint(constraint) => write!(f, "ADD {constraint}"),
            Self::DropConstraint { name } => write!(f, "DROP CONSTRAINT {name}"),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Index => "INDEX",
            Self::Schema => "SCHEMA",
        })
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

impl fmt::Display for TransactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessMode(mode) => write!(f, "{mode}"),
            Self::IsolationLevel(level) => write!(f, "ISOLATION LEVEL {level}"),
        }
    }
}

impl fmt::Display for TransactionAccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ReadOnly => "READ ONLY",
            Self::ReadWrite => "READ WRITE",
        })
    }
}

impl fmt::Display for TransactionIsolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ReadUncommitted => "READ UNCOMMITTED",
            Self::ReadCommitted => "READ COMMITTED",
            Self::RepeatableRead => "REPEATABLE READ",
            Self::Serializable => "SERIALIZABLE",
        })
    }
}

// ---------------------------------------------------------------------------
// GRANT supporting types
// ---------------------------------------------------------------------------

impl fmt::Display for Privileges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All {
                with_privileges_keyword,
            } => {
                f.write_str("ALL")?;
                if *with_privileges_keyword {
                    f.write_str(" PRIVILEGES")?;
                }
                Ok(())
            }
            Self::Actions(actions) => comma_list(f, actions),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::References => "REFERENCES",
            Self::Usage => "USAGE",
            Self::Create => "CREATE",
            Self::Connect => "CONNECT",
            Self::Execute => "EXECUTE",
            Self::Temporary => "TEMPORARY",
            Self::Truncate => "TRUNCATE",
            Self::Trigger => "TRIGGER",
        })
    }
}

impl fmt::Display for GrantObjects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tables(names) => comma_list(f, names),
            Self::Schemas(names) => {
                f.write_str("SCHEMA ")?;
                comma_list(f, names)
            }
            Self::AllTablesInSchema { schemas } => {
                f.write_str("ALL TABLES IN SCHEMA ")?;
                comma_list(f, schemas)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Write `NAME` or `NAME(n)`.
fn write_type_with_len(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    len: &Option<u64>,
) -> fmt::Result {
    f.write_str(name)?;
    if let Some(len) = len {
        write!(f, "({len})")?;
    }
    Ok(())
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => f.write_str("BOOLEAN"),
            Self::TinyInt(len) => write_type_with_len(f, "TINYINT", len),
            Self::SmallInt(len) => write_type_with_len(f, "SMALLINT", len),
            Self::Int(len) => write_type_with_len(f, "INT", len),
            Self::BigInt(len) => write_type_with_len(f, "BIGINT", len),
            Self::Real => f.write_str("REAL"),
            Self::Float(len) => write_type_with_len(f, "FLOAT", len),
            Self::Double => f.write_str("DOUBLE"),
            Self::Decimal(precision, scale) => {
                f.write_str("DECIMAL")?;
                match (precision, scale) {
                    (Some(p), Some(s)) => write!(f, "({p}, {s})"),
                    (Some(p), None) => write!(f, "({p})"),
                    _ => Ok(()),
                }
            }
            Self::Char(len) => write_type_with_len(f, "CHAR", len),
            Self::Varchar(len) => write_type_with_len(f, "VARCHAR", len),
            Self::Text => f.write_str("TEXT"),
            Self::Binary(len) => write_type_with_len(f, "BINARY", len),
            Self::Varbinary(len) => write_type_with_len(f, "VARBINARY", len),
            Self::Blob(len) => write_type_with_len(f, "BLOB", len),
            Self::Date => f.write_str("DATE"),
            Self::Time => f.write_str("TIME"),
            Self::Timestamp => f.write_str("TIMESTAMP"),
            Self::Interval => f.write_str("INTERVAL"),
            Self::Json => f.write_str("JSON"),
            Self::Uuid => f.write_str("UUID"),
            Self::Array(def) => write!(f, "{def}"),
            Self::Custom(name) => write!(f, "{name}"),
        }
    }
}

impl fmt::Display for ArrayElemTypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AngleBracket(inner) => write!(f, "ARRAY<{inner}>"),
            Self::SquareBracket(inner, None) => write!(f, "{inner}[]"),
            Self::SquareBracket(inner, Some(size)) => write!(f, "{inner}[{size}]"),
            Self::Parenthesis(inner) => write!(f, "ARRAY({inner})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::*;

    fn num(n: &str) -> Expr {
        Expr::Value(Value::Number(n.to_owned()))
    }

    fn ident(name: &str) -> Expr {
        Expr::Identifier(Ident::new(name))
    }

    #[test]
    fn test_display_ident_quote_styles() {
        assert_eq!(Ident::new("users").to_string(), "users");
        assert_eq!(Ident::with_quote('"', "order").to_string(), "\"order\"");
        assert_eq!(Ident::with_quote('`', "from").to_string(), "`from`");
        assert_eq!(Ident::with_quote('[', "select").to_string(), "[select]");
        // Embedded quotes are doubled.
        assert_eq!(Ident::with_quote('"', "a\"b").to_string(), "\"a\"\"b\"");
    }

    #[test]
    fn test_display_object_name() {
        let name = ObjectName::new(vec![
            Ident::new("catalog"),
            Ident::with_quote('"', "schema"),
            Ident::new("t"),
        ]);
        assert_eq!(name.to_string(), "catalog.\"schema\".t");
    }

    #[test]
    fn test_display_values() {
        assert_eq!(Value::Number("1.50".to_owned()).to_string(), "1.50");
        assert_eq!(
            Value::SingleQuotedString("it's".to_owned()).to_string(),
            "'it''s'"
        );
        assert_eq!(
            Value::NationalStringLiteral("x".to_owned()).to_string(),
            "N'x'"
        );
        assert_eq!(Value::HexStringLiteral("CAFE".to_owned()).to_string(), "X'CAFE'");
        assert_eq!(Value::BitStringLiteral("0101".to_owned()).to_string(), "B'0101'");
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Boolean(true).to_string(), "TRUE");
        assert_eq!(Value::Placeholder("$1".to_owned()).to_string(), "$1");
    }

    #[test]
    fn test_display_binary_op_no_extra_parens() {
        // 1 + 2 * 3 parsed with correct precedence renders flat.
        let expr = Expr::BinaryOp {
            left: Box::new(num("1")),
            op: BinaryOperator::Plus,
            right: Box::new(Expr::BinaryOp {
                left: Box::new(num("2")),
                op: BinaryOperator::Multiply,
                right: Box::new(num("3")),
            }),
        };
        assert_eq!(expr.to_string(), "1 + 2 * 3");
    }

    #[test]
    fn test_display_nested_preserves_parens() {
        let expr = Expr::BinaryOp {
            left: Box::new(Expr::Nested(Box::new(Expr::BinaryOp {
                left: Box::new(num("1")),
                op: BinaryOperator::Plus,
                right: Box::new(num("2")),
            }))),
            op: BinaryOperator::Multiply,
            right: Box::new(num("3")),
        };
        assert_eq!(expr.to_string(), "(1 + 2) * 3");
    }

    #[test]
    fn test_display_double_negation_does_not_form_comment() {
        let expr = Expr::UnaryOp {
            op: UnaryOperator::Minus,
            expr: Box::new(Expr::UnaryOp {
                op: UnaryOperator::Minus,
                expr: Box::new(ident("x")),
            }),
        };
        assert_eq!(expr.to_string(), "- -x");
    }

    #[test]
    fn test_display_array_type_shapes() {
        let int = Box::new(DataType::Int(None));
        assert_eq!(
            DataType::Array(ArrayElemTypeDef::AngleBracket(int.clone())).to_string(),
            "ARRAY<INT>"
        );
        assert_eq!(
            DataType::Array(ArrayElemTypeDef::SquareBracket(int.clone(), Some(3))).to_string(),
            "INT[3]"
        );
        assert_eq!(
            DataType::Array(ArrayElemTypeDef::SquareBracket(int.clone(), None)).to_string(),
            "INT[]"
        );
        assert_eq!(
            DataType::Array(ArrayElemTypeDef::Parenthesis(int)).to_string(),
            "ARRAY(INT)"
        );
    }

    #[test]
    fn test_display_case() {
        let expr = Expr::Case {
            operand: None,
            whens: vec![(
                Expr::BinaryOp {
                    left: Box::new(ident("a")),
                    op: BinaryOperator::Gt,
                    right: Box::new(num("0")),
                },
                Expr::Value(Value::SingleQuotedString("pos".to_owned())),
            )],
            else_result: Some(Box::new(Expr::Value(Value::SingleQuotedString(
                "neg".to_owned(),
            )))),
        };
        assert_eq!(
            expr.to_string(),
            "CASE WHEN a > 0 THEN 'pos' ELSE 'neg' END"
        );
    }

    #[test]
    fn test_display_interval() {
        let expr = Expr::Interval {
            value: Box::new(Expr::Value(Value::SingleQuotedString("1-2".to_owned()))),
            leading_field: Some(DateTimeField::Year),
            last_field: Some(DateTimeField::Month),
        };
        assert_eq!(expr.to_string(), "INTERVAL '1-2' YEAR TO MONTH");
    }
}
