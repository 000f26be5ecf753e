use std::fmt;

use crate::{
    col::{Columns, IntoColumns, SelectList},
    dialect::Dialect,
    expr::{Conditions, Order, Ordering, where_methods},
    ident::{Ident, IntoIdent},
    statement::StatementInfo,
    table::Tables,
    writer::{self, FormatContext, FormatWriter},
};

pub(crate) const NO_FIELDS_TO_SELECT: &str = "no fields to select";
pub(crate) const ROW_COUNT_FIELD: &str = "rowscount";

/// Builds `select` statements.
///
/// ```
/// use stmtcraft::{Condition, Dialect, SelectBuilder};
///
/// let info = SelectBuilder::new(Dialect::postgres())
///     .select(["q.ID", "qd.QID"])
///     .from("questions", "q")
///     .from("questiondata", "qd")
///     .where_([Condition::eq("q.ID", "qd.QID"), Condition::eq("q.TopicID", "?")])
///     .build(true);
///
/// assert_eq!(
///     "select q.ID, qd.QID from questions q, questiondata qd where (q.ID=qd.QID and q.TopicID=$1);",
///     info.sql()
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    dialect: Dialect,
    columns: SelectList,
    tables: Tables,
    conditions: Conditions,
    group_by: Columns,
    order: Order,
    limit: usize,
    row_count: bool,
    read_only: bool,
}

impl Default for SelectBuilder {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl SelectBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            columns: SelectList::default(),
            tables: Tables::default(),
            conditions: Conditions::default(),
            group_by: Columns::new(),
            order: Order::default(),
            limit: 0,
            row_count: false,
            read_only: true,
        }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn select<T>(&mut self, cols: T) -> &mut Self
    where
        T: IntoColumns,
    {
        self.columns.append(cols.into_columns());
        self
    }

    /// Append `(sub-query) alias` to the select list.
    ///
    /// The sub-query is rendered with this builder's dialect and numbers its
    /// parameters after the ones already emitted.
    pub fn select_sub<A: IntoIdent>(&mut self, query: SelectBuilder, alias: A) -> &mut Self {
        self.columns.push_sub(query, alias.into_ident());
        self
    }

    pub fn from(&mut self, table: &str, alias: &str) -> &mut Self {
        self.tables.insert(table, alias);
        self
    }

    pub fn group_by<T>(&mut self, cols: T) -> &mut Self
    where
        T: IntoColumns,
    {
        self.group_by.extend(
            cols.into_columns()
                .into_iter()
                .filter(|col| !col.is_empty()),
        );
        self
    }

    pub fn order_by<C: IntoIdent>(&mut self, col: C, descending: bool) -> &mut Self {
        let ordering = if descending {
            Ordering::Desc
        } else {
            Ordering::Asc
        };
        self.order.push(col.into_ident(), ordering);
        self
    }

    pub fn limit(&mut self, rows: usize) -> &mut Self {
        self.limit = rows;
        self
    }

    /// Append `count(*) over() as rowscount` to the select list.
    ///
    /// Ignored when the builder is rendered as a sub-query.
    pub fn row_count(&mut self) -> &mut Self {
        self.row_count = true;
        self
    }

    pub fn no_read_only(&mut self) -> &mut Self {
        self.read_only = false;
        self
    }

    pub fn build(&self, terminate: bool) -> StatementInfo {
        if self.columns.is_empty() {
            return StatementInfo::diagnostic(NO_FIELDS_TO_SELECT);
        }
        let (sql, state) = writer::compile(self, &self.dialect, terminate);
        let info = state.finish(sql, self.read_only);
        tracing::trace!(
            statement = "select",
            fields = info.fields_count(),
            params = info.param_count(),
            "statement built"
        );
        info
    }

    pub fn build_where_clause(&self) -> String {
        let (sql, _) = writer::compile(&self.conditions, &self.dialect, false);
        sql
    }
}

where_methods!(SelectBuilder);

pub(crate) fn write_tail<W: fmt::Write>(
    context: &mut FormatContext<'_, W>,
    group_by: &[Ident],
    order: &Order,
    limit: usize,
) -> fmt::Result {
    if !group_by.is_empty() {
        context.writer.write_str(" group by ")?;
        context.write_list(group_by)?;
    }
    if !order.is_empty() {
        context.writer.write_char(' ')?;
        order.format_writer(context)?;
    }
    if limit > 0 {
        write!(context.writer, " limit {}", limit)?;
    }
    Ok(())
}

impl FormatWriter for SelectBuilder {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        if self.columns.is_empty() {
            return context.writer.write_str(NO_FIELDS_TO_SELECT);
        }

        context.writer.write_str("select ")?;
        self.columns.format_writer(context)?;
        if self.row_count && !context.is_sub {
            write!(context.writer, ", count(*) over() as {}", ROW_COUNT_FIELD)?;
            context.state.push_field(ROW_COUNT_FIELD);
        }

        if !self.tables.is_empty() {
            context.writer.write_char(' ')?;
            self.tables.format_writer(context)?;
        }

        if !self.conditions.is_empty() {
            context.writer.write_char(' ')?;
            self.conditions.format_writer(context)?;
        }

        write_tail(context, &self.group_by, &self.order, self.limit)
    }
}
