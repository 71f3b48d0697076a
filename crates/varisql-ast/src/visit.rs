//! Structural traversal and rewriting of AST trees.
//!
//! A [`Visitor`] gets pre/post hooks for the privileged node kinds
//! (statement, query, table factor, expression, object name). Each hook may
//! replace the node it is shown by returning `Some(replacement)`; returning
//! `None` keeps the node. The fold entry points ([`fold_statement`],
//! [`fold_expr`], ...) apply a visitor with rewrite-on-change semantics:
//! they return `None` when no hook replaced anything, so an untouched
//! traversal hands the caller back the original tree, and `Some(new_tree)`
//! otherwise, leaving the original value intact either way.
//!
//! [`descendants`] enumerates every privileged node reachable from a
//! statement's child fields, lazily, in pre-order.

#[allow(clippy::wildcard_imports)]
use crate::*;

// ---------------------------------------------------------------------------
// Visitor trait
// ---------------------------------------------------------------------------

/// Pre/post hooks over the privileged AST node kinds.
///
/// Every hook defaults to "keep the node". Hooks may fail with the
/// visitor's own error type; a hook error aborts the fold immediately and
/// surfaces unchanged, leaving the input tree untouched (nodes are
/// immutable, so there is nothing to roll back). Visitors that cannot fail
/// use `std::convert::Infallible` as the error type.
pub trait Visitor {
    /// Error type raised by hooks.
    type Error;

    fn pre_visit_statement(&mut self, _stmt: &Statement) -> Result<Option<Statement>, Self::Error> {
        Ok(None)
    }
    fn post_visit_statement(&mut self, _stmt: &Statement) -> Result<Option<Statement>, Self::Error> {
        Ok(None)
    }
    fn pre_visit_query(&mut self, _query: &Query) -> Result<Option<Query>, Self::Error> {
        Ok(None)
    }
    fn post_visit_query(&mut self, _query: &Query) -> Result<Option<Query>, Self::Error> {
        Ok(None)
    }
    fn pre_visit_table_factor(
        &mut self,
        _factor: &TableFactor,
    ) -> Result<Option<TableFactor>, Self::Error> {
        Ok(None)
    }
    fn post_visit_table_factor(
        &mut self,
        _factor: &TableFactor,
    ) -> Result<Option<TableFactor>, Self::Error> {
        Ok(None)
    }
    fn pre_visit_expr(&mut self, _expr: &Expr) -> Result<Option<Expr>, Self::Error> {
        Ok(None)
    }
    fn post_visit_expr(&mut self, _expr: &Expr) -> Result<Option<Expr>, Self::Error> {
        Ok(None)
    }
    fn pre_visit_object_name(
        &mut self,
        _name: &ObjectName,
    ) -> Result<Option<ObjectName>, Self::Error> {
        Ok(None)
    }
    fn post_visit_object_name(
        &mut self,
        _name: &ObjectName,
    ) -> Result<Option<ObjectName>, Self::Error> {
        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// Public fold entry points
// ---------------------------------------------------------------------------

/// Apply a visitor to a statement. Returns `Some(rewritten)` if any hook
/// replaced a node, `None` if the traversal left everything unchanged.
pub fn fold_statement<V: Visitor>(
    stmt: &Statement,
    visitor: &mut V,
) -> Result<Option<Statement>, V::Error> {
    let mut work = stmt.clone();
    Ok(fold_statement_mut(&mut work, visitor)?.then_some(work))
}

/// Apply a visitor to a query subtree. Same contract as [`fold_statement`].
pub fn fold_query<V: Visitor>(query: &Query, visitor: &mut V) -> Result<Option<Query>, V::Error> {
    let mut work = query.clone();
    Ok(fold_query_mut(&mut work, visitor)?.then_some(work))
}

/// Apply a visitor to an expression subtree. Same contract as
/// [`fold_statement`].
pub fn fold_expr<V: Visitor>(expr: &Expr, visitor: &mut V) -> Result<Option<Expr>, V::Error> {
    let mut work = expr.clone();
    Ok(fold_expr_mut(&mut work, visitor)?.then_some(work))
}

/// Apply a visitor to a table factor subtree. Same contract as
/// [`fold_statement`].
pub fn fold_table_factor<V: Visitor>(
    factor: &TableFactor,
    visitor: &mut V,
) -> Result<Option<TableFactor>, V::Error> {
    let mut work = factor.clone();
    Ok(fold_table_factor_mut(&mut work, visitor)?.then_some(work))
}

/// Apply a visitor to an object name. Same contract as [`fold_statement`].
pub fn fold_object_name<V: Visitor>(
    name: &ObjectName,
    visitor: &mut V,
) -> Result<Option<ObjectName>, V::Error> {
    let mut work = name.clone();
    Ok(fold_object_name_mut(&mut work, visitor)?.then_some(work))
}

// ---------------------------------------------------------------------------
// Fold drivers
//
// The drivers work on a scratch copy of the tree and report whether any hook
// fired, which is what makes the public API rewrite-on-change: the scratch
// copy is only surfaced when something actually changed. Children are
// visited in field declaration order.
// ---------------------------------------------------------------------------

fn fold_statement_mut<V: Visitor>(stmt: &mut Statement, v: &mut V) -> Result<bool, V::Error> {
    let mut changed = false;
    if let Some(replacement) = v.pre_visit_statement(stmt)? {
        *stmt = replacement;
        changed = true;
    }
    changed |= fold_statement_children(stmt, v)?;
    if let Some(replacement) = v.post_visit_statement(stmt)? {
        *stmt = replacement;
        changed = true;
    }
    Ok(changed)
}

#[allow(clippy::too_many_lines)]
fn fold_statement_children<V: Visitor>(stmt: &mut Statement, v: &mut V) -> Result<bool, V::Error> {
    let mut changed = false;
    match stmt {
        Statement::Query(query) => changed |= fold_query_mut(query, v)?,
        Statement::Insert {
            table_name, source, ..
        } => {
            changed |= fold_object_name_mut(table_name, v)?;
            changed |= fold_query_mut(source, v)?;
        }
        Statement::Update {
            table,
            assignments,
            from,
            selection,
        } => {
            changed |= fold_table_with_joins_mut(table, v)?;
            for assignment in assignments {
                changed |= fold_expr_mut(&mut assignment.value, v)?;
            }
            if let Some(from) = from {
                changed |= fold_table_with_joins_mut(from, v)?;
            }
            if let Some(selection) = selection {
                changed |= fold_expr_mut(selection, v)?;
            }
        }
        Statement::Delete {
            table_name,
            using,
            selection,
        } => {
            changed |= fold_object_name_mut(table_name, v)?;
            if let Some(using) = using {
                changed |= fold_table_with_joins_mut(using, v)?;
            }
            if let Some(selection) = selection {
                changed |= fold_expr_mut(selection, v)?;
            }
        }
        Statement::CreateTable {
            name,
            columns,
            constraints,
            query,
            ..
        } => {
            changed |= fold_object_name_mut(name, v)?;
            for column in columns {
                changed |= fold_column_def_mut(column, v)?;
            }
            for constraint in constraints {
                changed |= fold_table_constraint_mut(constraint, v)?;
            }
            if let Some(query) = query {
                changed |= fold_query_mut(query, v)?;
            }
        }
        Statement::CreateView { name, query, .. } => {
            changed |= fold_object_name_mut(name, v)?;
            changed |= fold_query_mut(query, v)?;
        }
        Statement::CreateIndex {
            name,
            table_name,
            columns,
            ..
        } => {
            changed |= fold_object_name_mut(name, v)?;
            changed |= fold_object_name_mut(table_name, v)?;
            for column in columns {
                changed |= fold_expr_mut(&mut column.expr, v)?;
            }
        }
        Statement::AlterTable { name, operation } => {
            changed |= fold_object_name_mut(name, v)?;
            match operation {
                AlterTableOperation::AddColumn { column_def } => {
                    changed |= fold_column_def_mut(column_def, v)?;
                }
                AlterTableOperation::AddConstraint(constraint) => {
                    changed |= fold_table_constraint_mut(constraint, v)?;
                }
                AlterTableOperation::RenameTable { table_name } => {
                    changed |= fold_object_name_mut(table_name, v)?;
                }
                AlterTableOperation::DropColumn { .. }
                | AlterTableOperation::RenameColumn { .. }
                | AlterTableOperation::DropConstraint { .. } => {}
            }
        }
        Statement::Drop { names, .. } => {
            for name in names {
                changed |= fold_object_name_mut(name, v)?;
            }
        }
        Statement::Truncate { table_name } => {
            changed |= fold_object_name_mut(table_name, v)?;
        }
        Statement::SetVariable {
            variables, values, ..
        } => {
            for variable in variables {
                changed |= fold_object_name_mut(variable, v)?;
            }
            for value in values {
                changed |= fold_expr_mut(value, v)?;
            }
        }
        Statement::Grant { objects, .. } => match objects {
            GrantObjects::Tables(names)
            | GrantObjects::Schemas(names)
            | GrantObjects::AllTablesInSchema { schemas: names } => {
                for name in names {
                    changed |= fold_object_name_mut(name, v)?;
                }
            }
        },
        Statement::StartTransaction { .. }
        | Statement::Commit { .. }
        | Statement::Rollback { .. }
        | Statement::Use { .. } => {}
    }
    Ok(changed)
}

fn fold_query_mut<V: Visitor>(query: &mut Query, v: &mut V) -> Result<bool, V::Error> {
    let mut changed = false;
    if let Some(replacement) = v.pre_visit_query(query)? {
        *query = replacement;
        changed = true;
    }
    if let Some(with) = &mut query.with {
        for cte in &mut with.ctes {
            changed |= fold_query_mut(&mut cte.query, v)?;
        }
    }
    changed |= fold_set_expr_mut(&mut query.body, v)?;
    for order_by in &mut query.order_by {
        changed |= fold_expr_mut(&mut order_by.expr, v)?;
    }
    if let Some(limit) = &mut query.limit {
        changed |= fold_expr_mut(limit, v)?;
    }
    if let Some(offset) = &mut query.offset {
        changed |= fold_expr_mut(&mut offset.value, v)?;
    }
    if let Some(fetch) = &mut query.fetch {
        if let Some(quantity) = &mut fetch.quantity {
            changed |= fold_expr_mut(quantity, v)?;
        }
    }
    if let Some(replacement) = v.post_visit_query(query)? {
        *query = replacement;
        changed = true;
    }
    Ok(changed)
}

fn fold_set_expr_mut<V: Visitor>(body: &mut SetExpr, v: &mut V) -> Result<bool, V::Error> {
    let mut changed = false;
    match body {
        SetExpr::Select(select) => changed |= fold_select_mut(select, v)?,
        SetExpr::Query(query) => changed |= fold_query_mut(query, v)?,
        SetExpr::SetOperation { left, right, .. } => {
            changed |= fold_set_expr_mut(left, v)?;
            changed |= fold_set_expr_mut(right, v)?;
        }
        SetExpr::Values(values) => {
            for row in &mut values.0 {
                for expr in row {
                    changed |= fold_expr_mut(expr, v)?;
                }
            }
        }
    }
    Ok(changed)
}

fn fold_select_mut<V: Visitor>(select: &mut Select, v: &mut V) -> Result<bool, V::Error> {
    let mut changed = false;
    if let Some(top) = &mut select.top {
        if let Some(quantity) = &mut top.quantity {
            changed |= fold_expr_mut(quantity, v)?;
        }
    }
    for item in &mut select.projection {
        match item {
            SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } => {
                changed |= fold_expr_mut(expr, v)?;
            }
            SelectItem::QualifiedWildcard { name, .. } => {
                changed |= fold_object_name_mut(name, v)?;
            }
            SelectItem::Wildcard { .. } => {}
        }
    }
    for twj in &mut select.from {
        changed |= fold_table_with_joins_mut(twj, v)?;
    }
    if let Some(selection) = &mut select.selection {
        changed |= fold_expr_mut(selection, v)?;
    }
    for expr in &mut select.group_by {
        changed |= fold_expr_mut(expr, v)?;
    }
    if let Some(having) = &mut select.having {
        changed |= fold_expr_mut(having, v)?;
    }
    for window in &mut select.named_windows {
        changed |= fold_window_spec_mut(&mut window.spec, v)?;
    }
    if let Some(connect_by) = &mut select.connect_by {
        if let Some(start_with) = &mut connect_by.start_with {
            changed |= fold_expr_mut(start_with, v)?;
        }
        changed |= fold_expr_mut(&mut connect_by.condition, v)?;
    }
    Ok(changed)
}

fn fold_table_with_joins_mut<V: Visitor>(
    twj: &mut TableWithJoins,
    v: &mut V,
) -> Result<bool, V::Error> {
    let mut changed = fold_table_factor_mut(&mut twj.relation, v)?;
    for join in &mut twj.joins {
        changed |= fold_table_factor_mut(&mut join.relation, v)?;
        match &mut join.join_operator {
            JoinOperator::Inner(constraint)
            | JoinOperator::LeftOuter(constraint)
            | JoinOperator::RightOuter(constraint)
            | JoinOperator::FullOuter(constraint) => {
                if let JoinConstraint::On(expr) = constraint {
                    changed |= fold_expr_mut(expr, v)?;
                }
            }
            JoinOperator::CrossJoin => {}
        }
    }
    Ok(changed)
}

fn fold_table_factor_mut<V: Visitor>(
    factor: &mut TableFactor,
    v: &mut V,
) -> Result<bool, V::Error> {
    let mut changed = false;
    if let Some(replacement) = v.pre_visit_table_factor(factor)? {
        *factor = replacement;
        changed = true;
    }
    match factor {
        TableFactor::Table { name, .. } => changed |= fold_object_name_mut(name, v)?,
        TableFactor::Derived { subquery, .. } => changed |= fold_query_mut(subquery, v)?,
        TableFactor::TableFunction { name, args, .. } => {
            changed |= fold_object_name_mut(name, v)?;
            for arg in args {
                changed |= fold_function_arg_mut(arg, v)?;
            }
        }
        TableFactor::NestedJoin(inner) => changed |= fold_table_with_joins_mut(inner, v)?,
        TableFactor::MatchRecognize {
            table,
            partition_by,
            order_by,
            measures,
            define,
            ..
        } => {
            changed |= fold_table_factor_mut(table, v)?;
            for expr in partition_by {
                changed |= fold_expr_mut(expr, v)?;
            }
            for order in order_by {
                changed |= fold_expr_mut(&mut order.expr, v)?;
            }
            for measure in measures {
                changed |= fold_expr_mut(&mut measure.expr, v)?;
            }
            for definition in define {
                changed |= fold_expr_mut(&mut definition.definition, v)?;
            }
        }
    }
    if let Some(replacement) = v.post_visit_table_factor(factor)? {
        *factor = replacement;
        changed = true;
    }
    Ok(changed)
}

fn fold_object_name_mut<V: Visitor>(name: &mut ObjectName, v: &mut V) -> Result<bool, V::Error> {
    let mut changed = false;
    if let Some(replacement) = v.pre_visit_object_name(name)? {
        *name = replacement;
        changed = true;
    }
    if let Some(replacement) = v.post_visit_object_name(name)? {
        *name = replacement;
        changed = true;
    }
    Ok(changed)
}

#[allow(clippy::too_many_lines)]
fn fold_expr_mut<V: Visitor>(expr: &mut Expr, v: &mut V) -> Result<bool, V::Error> {
    let mut changed = false;
    if let Some(replacement) = v.pre_visit_expr(expr)? {
        *expr = replacement;
        changed = true;
    }
    match expr {
        Expr::Identifier(_)
        | Expr::CompoundIdentifier(_)
        | Expr::Wildcard
        | Expr::Value(_)
        | Expr::TypedString { .. }
        | Expr::Dictionary(_) => {}
        Expr::QualifiedWildcard(name) => changed |= fold_object_name_mut(name, v)?,
        Expr::BinaryOp { left, right, .. } => {
            changed |= fold_expr_mut(left, v)?;
            changed |= fold_expr_mut(right, v)?;
        }
        Expr::UnaryOp { expr: inner, .. }
        | Expr::IsNull(inner)
        | Expr::IsNotNull(inner)
        | Expr::IsTrue(inner)
        | Expr::IsFalse(inner)
        | Expr::Nested(inner)
        | Expr::Cast { expr: inner, .. }
        | Expr::Convert { expr: inner, .. }
        | Expr::Extract { expr: inner, .. }
        | Expr::AtTimeZone {
            timestamp: inner, ..
        }
        | Expr::Interval { value: inner, .. } => changed |= fold_expr_mut(inner, v)?,
        Expr::IsDistinctFrom(a, b) | Expr::IsNotDistinctFrom(a, b) => {
            changed |= fold_expr_mut(a, v)?;
            changed |= fold_expr_mut(b, v)?;
        }
        Expr::InList {
            expr: inner, list, ..
        } => {
            changed |= fold_expr_mut(inner, v)?;
            for item in list {
                changed |= fold_expr_mut(item, v)?;
            }
        }
        Expr::InSubquery {
            expr: inner,
            subquery,
            ..
        } => {
            changed |= fold_expr_mut(inner, v)?;
            changed |= fold_query_mut(subquery, v)?;
        }
        Expr::Between {
            expr: inner,
            low,
            high,
            ..
        } => {
            changed |= fold_expr_mut(inner, v)?;
            changed |= fold_expr_mut(low, v)?;
            changed |= fold_expr_mut(high, v)?;
        }
        Expr::Like {
            expr: inner,
            pattern,
            ..
        }
        | Expr::ILike {
            expr: inner,
            pattern,
            ..
        } => {
            changed |= fold_expr_mut(inner, v)?;
            changed |= fold_expr_mut(pattern, v)?;
        }
        Expr::Collate {
            expr: inner,
            collation,
        } => {
            changed |= fold_expr_mut(inner, v)?;
            changed |= fold_object_name_mut(collation, v)?;
        }
        Expr::Tuple(items) | Expr::Array(items) => {
            for item in items {
                changed |= fold_expr_mut(item, v)?;
            }
        }
        Expr::ArrayIndex { obj, indexes } => {
            changed |= fold_expr_mut(obj, v)?;
            for index in indexes {
                changed |= fold_expr_mut(index, v)?;
            }
        }
        Expr::Function(func) => changed |= fold_function_mut(func, v)?,
        Expr::Case {
            operand,
            whens,
            else_result,
        } => {
            if let Some(operand) = operand {
                changed |= fold_expr_mut(operand, v)?;
            }
            for (condition, result) in whens {
                changed |= fold_expr_mut(condition, v)?;
                changed |= fold_expr_mut(result, v)?;
            }
            if let Some(else_result) = else_result {
                changed |= fold_expr_mut(else_result, v)?;
            }
        }
        Expr::Exists { subquery, .. } | Expr::Subquery(subquery) => {
            changed |= fold_query_mut(subquery, v)?;
        }
        Expr::Substring {
            expr: inner,
            substring_from,
            substring_for,
        } => {
            changed |= fold_expr_mut(inner, v)?;
            if let Some(from) = substring_from {
                changed |= fold_expr_mut(from, v)?;
            }
            if let Some(len) = substring_for {
                changed |= fold_expr_mut(len, v)?;
            }
        }
        Expr::Trim {
            expr: inner,
            trim_what,
            ..
        } => {
            changed |= fold_expr_mut(inner, v)?;
            if let Some(what) = trim_what {
                changed |= fold_expr_mut(what, v)?;
            }
        }
        Expr::Position { expr: inner, r#in } => {
            changed |= fold_expr_mut(inner, v)?;
            changed |= fold_expr_mut(r#in, v)?;
        }
        Expr::JsonAccess { left, right, .. } => {
            changed |= fold_expr_mut(left, v)?;
            changed |= fold_expr_mut(right, v)?;
        }
        Expr::Lambda(lambda) => changed |= fold_expr_mut(&mut lambda.body, v)?,
        Expr::GroupingSets(sets) | Expr::Cube(sets) | Expr::Rollup(sets) => {
            for set in sets {
                for item in set {
                    changed |= fold_expr_mut(item, v)?;
                }
            }
        }
    }
    if let Some(replacement) = v.post_visit_expr(expr)? {
        *expr = replacement;
        changed = true;
    }
    Ok(changed)
}

fn fold_function_mut<V: Visitor>(func: &mut Function, v: &mut V) -> Result<bool, V::Error> {
    let mut changed = fold_object_name_mut(&mut func.name, v)?;
    for arg in &mut func.args {
        changed |= fold_function_arg_mut(arg, v)?;
    }
    if let Some(filter) = &mut func.filter {
        changed |= fold_expr_mut(filter, v)?;
    }
    if let Some(WindowType::WindowSpec(spec)) = &mut func.over {
        changed |= fold_window_spec_mut(spec, v)?;
    }
    Ok(changed)
}

fn fold_function_arg_mut<V: Visitor>(arg: &mut FunctionArg, v: &mut V) -> Result<bool, V::Error> {
    let arg_expr = match arg {
        FunctionArg::Named { arg, .. } | FunctionArg::Unnamed(arg) => arg,
    };
    match arg_expr {
        FunctionArgExpr::Expr(expr) => fold_expr_mut(expr, v),
        FunctionArgExpr::QualifiedWildcard(name) => fold_object_name_mut(name, v),
        FunctionArgExpr::Wildcard => Ok(false),
    }
}

fn fold_window_spec_mut<V: Visitor>(spec: &mut WindowSpec, v: &mut V) -> Result<bool, V::Error> {
    let mut changed = false;
    for expr in &mut spec.partition_by {
        changed |= fold_expr_mut(expr, v)?;
    }
    for order_by in &mut spec.order_by {
        changed |= fold_expr_mut(&mut order_by.expr, v)?;
    }
    if let Some(frame) = &mut spec.window_frame {
        changed |= fold_frame_bound_mut(&mut frame.start_bound, v)?;
        if let Some(end) = &mut frame.end_bound {
            changed |= fold_frame_bound_mut(end, v)?;
        }
    }
    Ok(changed)
}

fn fold_frame_bound_mut<V: Visitor>(
    bound: &mut WindowFrameBound,
    v: &mut V,
) -> Result<bool, V::Error> {
    match bound {
        WindowFrameBound::Preceding(Some(expr)) | WindowFrameBound::Following(Some(expr)) => {
            fold_expr_mut(expr, v)
        }
        _ => Ok(false),
    }
}

fn fold_column_def_mut<V: Visitor>(column: &mut ColumnDef, v: &mut V) -> Result<bool, V::Error> {
    let mut changed = false;
    for option in &mut column.options {
        match &mut option.option {
            ColumnOption::Default(expr) | ColumnOption::Check(expr) => {
                changed |= fold_expr_mut(expr, v)?;
            }
            ColumnOption::ForeignKey { foreign_table, .. } => {
                changed |= fold_object_name_mut(foreign_table, v)?;
            }
            ColumnOption::Null | ColumnOption::NotNull | ColumnOption::Unique { .. } => {}
        }
    }
    Ok(changed)
}

fn fold_table_constraint_mut<V: Visitor>(
    constraint: &mut TableConstraint,
    v: &mut V,
) -> Result<bool, V::Error> {
    match constraint {
        TableConstraint::Unique { .. } => Ok(false),
        TableConstraint::ForeignKey { foreign_table, .. } => {
            fold_object_name_mut(foreign_table, v)
        }
        TableConstraint::Check { expr, .. } => fold_expr_mut(expr, v),
    }
}

// ---------------------------------------------------------------------------
// Descendants iterator
// ---------------------------------------------------------------------------

/// A borrowed reference to one of the privileged AST node kinds.
#[derive(Debug, Clone, Copy)]
pub enum AstNode<'a> {
    Statement(&'a Statement),
    Query(&'a Query),
    TableFactor(&'a TableFactor),
    Expr(&'a Expr),
    ObjectName(&'a ObjectName),
}

/// Lazily enumerate every privileged node reachable from the statement's
/// child fields, in pre-order. The statement itself is not yielded.
#[must_use]
pub fn descendants(stmt: &Statement) -> Descendants<'_> {
    let mut roots = Vec::new();
    statement_children(stmt, &mut roots);
    roots.reverse();
    Descendants { stack: roots }
}

/// Pre-order iterator returned by [`descendants`].
pub struct Descendants<'a> {
    stack: Vec<AstNode<'a>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = AstNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let mut children = Vec::new();
        match node {
            AstNode::Statement(stmt) => statement_children(stmt, &mut children),
            AstNode::Query(query) => query_children(query, &mut children),
            AstNode::TableFactor(factor) => table_factor_children(factor, &mut children),
            AstNode::Expr(expr) => expr_children(expr, &mut children),
            AstNode::ObjectName(_) => {}
        }
        children.reverse();
        self.stack.extend(children);
        Some(node)
    }
}

#[allow(clippy::too_many_lines)]
fn statement_children<'a>(stmt: &'a Statement, out: &mut Vec<AstNode<'a>>) {
    match stmt {
        Statement::Query(query) => out.push(AstNode::Query(query)),
        Statement::Insert {
            table_name, source, ..
        } => {
            out.push(AstNode::ObjectName(table_name));
            out.push(AstNode::Query(source));
        }
        Statement::Update {
            table,
            assignments,
            from,
            selection,
        } => {
            table_with_joins_children(table, out);
            for assignment in assignments {
                out.push(AstNode::Expr(&assignment.value));
            }
            if let Some(from) = from {
                table_with_joins_children(from, out);
            }
            if let Some(selection) = selection {
                out.push(AstNode::Expr(selection));
            }
        }
        Statement::Delete {
            table_name,
            using,
            selection,
        } => {
            out.push(AstNode::ObjectName(table_name));
            if let Some(using) = using {
                table_with_joins_children(using, out);
            }
            if let Some(selection) = selection {
                out.push(AstNode::Expr(selection));
            }
        }
        Statement::CreateTable {
            name,
            columns,
            constraints,
            query,
            ..
        } => {
            out.push(AstNode::ObjectName(name));
            for column in columns {
                for option in &column.options {
                    match &option.option {
                        ColumnOption::Default(expr) | ColumnOption::Check(expr) => {
                            out.push(AstNode::Expr(expr));
                        }
                        ColumnOption::ForeignKey { foreign_table, .. } => {
                            out.push(AstNode::ObjectName(foreign_table));
                        }
                        _ => {}
                    }
                }
            }
            for constraint in constraints {
                match constraint {
                    TableConstraint::ForeignKey { foreign_table, .. } => {
                        out.push(AstNode::ObjectName(foreign_table));
                    }
                    TableConstraint::Check { expr, .. } => out.push(AstNode::Expr(expr)),
                    TableConstraint::Unique { .. } => {}
                }
            }
            if let Some(query) = query {
                out.push(AstNode::Query(query));
            }
        }
        Statement::CreateView { name, query, .. } => {
            out.push(AstNode::ObjectName(name));
            out.push(AstNode::Query(query));
        }
        Statement::CreateIndex {
            name,
            table_name,
            columns,
            ..
        } => {
            out.push(AstNode::ObjectName(name));
            out.push(AstNode::ObjectName(table_name));
            for column in columns {
                out.push(AstNode::Expr(&column.expr));
            }
        }
        Statement::AlterTable { name, operation } => {
            out.push(AstNode::ObjectName(name));
            match operation {
                AlterTableOperation::AddColumn { column_def } => {
                    for option in &column_def.options {
                        match &option.option {
                            ColumnOption::Default(expr) | ColumnOption::Check(expr) => {
                                out.push(AstNode::Expr(expr));
                            }
                            ColumnOption::ForeignKey { foreign_table, .. } => {
                                out.push(AstNode::ObjectName(foreign_table));
                            }
                            _ => {}
                        }
                    }
                }
                AlterTableOperation::AddConstraint(TableConstraint::Check { expr, .. }) => {
                    out.push(AstNode::Expr(expr));
                }
                AlterTableOperation::AddConstraint(TableConstraint::ForeignKey {
                    foreign_table,
                    ..
                }) => {
                    out.push(AstNode::ObjectName(foreign_table));
                }
                AlterTableOperation::RenameTable { table_name } => {
                    out.push(AstNode::ObjectName(table_name));
                }
                _ => {}
            }
        }
        Statement::Drop { names, .. } => {
            for name in names {
                out.push(AstNode::ObjectName(name));
            }
        }
        Statement::Truncate { table_name } => out.push(AstNode::ObjectName(table_name)),
        Statement::SetVariable {
            variables, values, ..
        } => {
            for variable in variables {
                out.push(AstNode::ObjectName(variable));
            }
            for value in values {
                out.push(AstNode::Expr(value));
            }
        }
        Statement::Grant { objects, .. } => match objects {
            GrantObjects::Tables(names)
            | GrantObjects::Schemas(names)
            | GrantObjects::AllTablesInSchema { schemas: names } => {
                for name in names {
                    out.push(AstNode::ObjectName(name));
                }
            }
        },
        Statement::StartTransaction { .. }
        | Statement::Commit { .. }
        | Statement::Rollback { .. }
        | Statement::Use { .. } => {}
    }
}

fn query_children<'a>(query: &'a Query, out: &mut Vec<AstNode<'a>>) {
    if let Some(with) = &query.with {
        for cte in &with.ctes {
            out.push(AstNode::Query(&cte.query));
        }
    }
    set_expr_children(&query.body, out);
    for order_by in &query.order_by {
        out.push(AstNode::Expr(&order_by.expr));
    }
    if let Some(limit) = &query.limit {
        out.push(AstNode::Expr(limit));
    }
    if let Some(offset) = &query.offset {
        out.push(AstNode::Expr(&offset.value));
    }
    if let Some(fetch) = &query.fetch {
        if let Some(quantity) = &fetch.quantity {
            out.push(AstNode::Expr(quantity));
        }
    }
}

fn set_expr_children<'a>(body: &'a SetExpr, out: &mut Vec<AstNode<'a>>) {
    match body {
        SetExpr::Select(select) => select_children(select, out),
        SetExpr::Query(query) => out.push(AstNode::Query(query)),
        SetExpr::SetOperation { left, right, .. } => {
            set_expr_children(left, out);
            set_expr_children(right, out);
        }
        SetExpr::Values(values) => {
            for row in &values.0 {
                for expr in row {
                    out.push(AstNode::Expr(expr));
                }
            }
        }
    }
}

fn select_children<'a>(select: &'a Select, out: &mut Vec<AstNode<'a>>) {
    if let Some(top) = &select.top {
        if let Some(quantity) = &top.quantity {
            out.push(AstNode::Expr(quantity));
        }
    }
    for item in &select.projection {
        match item {
            SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } => {
                out.push(AstNode::Expr(expr));
            }
            SelectItem::QualifiedWildcard { name, .. } => out.push(AstNode::ObjectName(name)),
            SelectItem::Wildcard { .. } => {}
        }
    }
    for twj in &select.from {
        table_with_joins_children(twj, out);
    }
    if let Some(selection) = &select.selection {
        out.push(AstNode::Expr(selection));
    }
    for expr in &select.group_by {
        out.push(AstNode::Expr(expr));
    }
    if let Some(having) = &select.having {
        out.push(AstNode::Expr(having));
    }
    for window in &select.named_windows {
        window_spec_children(&window.spec, out);
    }
    if let Some(connect_by) = &select.connect_by {
        if let Some(start_with) = &connect_by.start_with {
            out.push(AstNode::Expr(start_with));
        }
        out.push(AstNode::Expr(&connect_by.condition));
    }
}

fn table_with_joins_children<'a>(twj: &'a TableWithJoins, out: &mut Vec<AstNode<'a>>) {
    out.push(AstNode::TableFactor(&twj.relation));
    for join in &twj.joins {
        out.push(AstNode::TableFactor(&join.relation));
        match &join.join_operator {
            JoinOperator::Inner(JoinConstraint::On(expr))
            | JoinOperator::LeftOuter(JoinConstraint::On(expr))
            | JoinOperator::RightOuter(JoinConstraint::On(expr))
            | JoinOperator::FullOuter(JoinConstraint::On(expr)) => {
                out.push(AstNode::Expr(expr));
            }
            _ => {}
        }
    }
}

fn table_factor_children<'a>(factor: &'a TableFactor, out: &mut Vec<AstNode<'a>>) {
    match factor {
        TableFactor::Table { name, .. } => out.push(AstNode::ObjectName(name)),
        TableFactor::Derived { subquery, .. } => out.push(AstNode::Query(subquery)),
        TableFactor::TableFunction { name, args, .. } => {
            out.push(AstNode::ObjectName(name));
            for arg in args {
                function_arg_children(arg, out);
            }
        }
        TableFactor::NestedJoin(inner) => table_with_joins_children(inner, out),
        TableFactor::MatchRecognize {
            table,
            partition_by,
            order_by,
            measures,
            define,
            ..
        } => {
            out.push(AstNode::TableFactor(table));
            for expr in partition_by {
                out.push(AstNode::Expr(expr));
            }
            for order in order_by {
                out.push(AstNode::Expr(&order.expr));
            }
            for measure in measures {
                out.push(AstNode::Expr(&measure.expr));
            }
            for definition in define {
                out.push(AstNode::Expr(&definition.definition));
            }
        }
    }
}

#[allow(clippy::too_many_lines)]
fn expr_children<'a>(expr: &'a Expr, out: &mut Vec<AstNode<'a>>) {
    match expr {
        Expr::Identifier(_)
        | Expr::CompoundIdentifier(_)
        | Expr::Wildcard
        | Expr::Value(_)
        | Expr::TypedString { .. }
        | Expr::Dictionary(_) => {}
        Expr::QualifiedWildcard(name) => out.push(AstNode::ObjectName(name)),
        Expr::BinaryOp { left, right, .. } => {
            out.push(AstNode::Expr(left));
            out.push(AstNode::Expr(right));
        }
        Expr::UnaryOp { expr: inner, .. }
        | Expr::IsNull(inner)
        | Expr::IsNotNull(inner)
        | Expr::IsTrue(inner)
        | Expr::IsFalse(inner)
        | Expr::Nested(inner)
        | Expr::Cast { expr: inner, .. }
        | Expr::Convert { expr: inner, .. }
        | Expr::Extract { expr: inner, .. }
        | Expr::AtTimeZone {
            timestamp: inner, ..
        }
        | Expr::Interval { value: inner, .. } => out.push(AstNode::Expr(inner)),
        Expr::IsDistinctFrom(a, b) | Expr::IsNotDistinctFrom(a, b) => {
            out.push(AstNode::Expr(a));
            out.push(AstNode::Expr(b));
        }
        Expr::InList {
            expr: inner, list, ..
        } => {
            out.push(AstNode::Expr(inner));
            for item in list {
                out.push(AstNode::Expr(item));
            }
        }
        Expr::InSubquery {
            expr: inner,
            subquery,
            ..
        } => {
            out.push(AstNode::Expr(inner));
            out.push(AstNode::Query(subquery));
        }
        Expr::Between {
            expr: inner,
            low,
            high,
            ..
        } => {
            out.push(AstNode::Expr(inner));
            out.push(AstNode::Expr(low));
            out.push(AstNode::Expr(high));
        }
        Expr::Like {
            expr: inner,
            pattern,
            ..
        }
        | Expr::ILike {
            expr: inner,
            pattern,
            ..
        } => {
            out.push(AstNode::Expr(inner));
            out.push(AstNode::Expr(pattern));
        }
        Expr::Collate {
            expr: inner,
            collation,
        } => {
            out.push(AstNode::Expr(inner));
            out.push(AstNode::ObjectName(collation));
        }
        Expr::Tuple(items) | Expr::Array(items) => {
            for item in items {
                out.push(AstNode::Expr(item));
            }
        }
        Expr::ArrayIndex { obj, indexes } => {
            out.push(AstNode::Expr(obj));
            for index in indexes {
                out.push(AstNode::Expr(index));
            }
        }
        Expr::Function(func) => {
            out.push(AstNode::ObjectName(&func.name));
            for arg in &func.args {
                function_arg_children(arg, out);
            }
            if let Some(filter) = &func.filter {
                out.push(AstNode::Expr(filter));
            }
            if let Some(WindowType::WindowSpec(spec)) = &func.over {
                window_spec_children(spec, out);
            }
        }
        Expr::Case {
            operand,
            whens,
            else_result,
        } => {
            if let Some(operand) = operand {
                out.push(AstNode::Expr(operand));
            }
            for (condition, result) in whens {
                out.push(AstNode::Expr(condition));
                out.push(AstNode::Expr(result));
            }
            if let Some(else_result) = else_result {
                out.push(AstNode::Expr(else_result));
            }
        }
        Expr::Exists { subquery, .. } | Expr::Subquery(subquery) => {
            out.push(AstNode::Query(subquery));
        }
        Expr::Substring {
            expr: inner,
            substring_from,
            substring_for,
        } => {
            out.push(AstNode::Expr(inner));
            if let Some(from) = substring_from {
                out.push(AstNode::Expr(from));
            }
            if let Some(len) = substring_for {
                out.push(AstNode::Expr(len));
            }
        }
        Expr::Trim {
            expr: inner,
            trim_what,
            ..
        } => {
            out.push(AstNode::Expr(inner));
            if let Some(what) = trim_what {
                out.push(AstNode::Expr(what));
            }
        }
        Expr::Position { expr: inner, r#in } => {
            out.push(AstNode::Expr(inner));
            out.push(AstNode::Expr(r#in));
        }
        Expr::JsonAccess { left, right, .. } => {
            out.push(AstNode::Expr(left));
            out.push(AstNode::Expr(right));
        }
        Expr::Lambda(lambda) => out.push(AstNode::Expr(&lambda.body)),
        Expr::GroupingSets(sets) | Expr::Cube(sets) | Expr::Rollup(sets) => {
            for set in sets {
                for item in set {
                    out.push(AstNode::Expr(item));
                }
            }
        }
    }
}

fn function_arg_children<'a>(arg: &'a FunctionArg, out: &mut Vec<AstNode<'a>>) {
    let arg_expr = match arg {
        FunctionArg::Named { arg, .. } | FunctionArg::Unnamed(arg) => arg,
    };
    match arg_expr {
        FunctionArgExpr::Expr(expr) => out.push(AstNode::Expr(expr)),
        FunctionArgExpr::QualifiedWildcard(name) => out.push(AstNode::ObjectName(name)),
        FunctionArgExpr::Wildcard => {}
    }
}

fn window_spec_children<'a>(spec: &'a WindowSpec, out: &mut Vec<AstNode<'a>>) {
    for expr in &spec.partition_by {
        out.push(AstNode::Expr(expr));
    }
    for order_by in &spec.order_by {
        out.push(AstNode::Expr(&order_by.expr));
    }
    if let Some(frame) = &spec.window_frame {
        for bound in std::iter::once(&frame.start_bound).chain(frame.end_bound.as_ref()) {
            if let WindowFrameBound::Preceding(Some(expr))
            | WindowFrameBound::Following(Some(expr)) = bound
            {
                out.push(AstNode::Expr(expr));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
