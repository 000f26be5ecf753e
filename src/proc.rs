use std::fmt;

use crate::{
    builder::{NO_FIELDS_TO_SELECT, ROW_COUNT_FIELD, write_tail},
    col::{Columns, IntoColumns, SelectList},
    dialect::{Dialect, DialectKind},
    error::{Error, Result},
    expr::{Conditions, Order, Ordering, where_methods},
    ident::{Ident, IntoIdent},
    statement::StatementInfo,
    writer::{self, FormatContext, FormatWriter},
};

pub(crate) const NO_PROCEDURE_TO_CALL: &str = "no procedure to call";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum ProcMode {
    #[default]
    Select,
    Perform,
}

#[derive(Debug, Clone)]
pub struct ProcBuilder {
    dialect: Dialect,
    name: Ident,
    mode: ProcMode,
    columns: SelectList,
    args: Columns,
    conditions: Conditions,
    order: Order,
    limit: usize,
    row_count: bool,
    read_only: bool,
}

fn proc_name(name: &str) -> Result<Ident> {
    let name = name.trim();
    let invalid = |c: char| c.is_whitespace() || matches!(c, ';' | '(' | ')');
    if name.is_empty() || name.contains(invalid) {
        return Err(Error::InvalidProcName(name.to_string()));
    }
    Ok(Ident::new(name))
}

impl ProcBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            name: Ident::default(),
            mode: ProcMode::default(),
            columns: SelectList::default(),
            args: Columns::new(),
            conditions: Conditions::default(),
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

    pub fn from_proc(&mut self, name: &str) -> Result<&mut Self> {
        self.name = proc_name(name)?;
        self.mode = ProcMode::Select;
        Ok(self)
    }

    pub fn perform(&mut self, name: &str) -> Result<&mut Self> {
        self.name = proc_name(name)?;
        self.mode = ProcMode::Perform;
        Ok(self)
    }

    pub fn param<T>(&mut self, cols: T) -> &mut Self
    where
        T: IntoColumns,
    {
        self.args.extend(
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

    pub fn row_count(&mut self) -> &mut Self {
        self.row_count = true;
        self
    }

    pub fn no_read_only(&mut self) -> &mut Self {
        self.read_only = false;
        self
    }

    pub fn build(&self, terminate: bool) -> StatementInfo {
        if self.name.is_empty() {
            return StatementInfo::diagnostic(NO_PROCEDURE_TO_CALL);
        }
        let selects_rows =
            self.mode == ProcMode::Select && self.dialect.kind() != DialectKind::MsSql;
        if selects_rows && self.columns.is_empty() {
            return StatementInfo::diagnostic(NO_FIELDS_TO_SELECT);
        }
        let (sql, state) = writer::compile(self, &self.dialect, terminate);
        let info = state.finish(sql, self.read_only);
        tracing::trace!(
            statement = "proc",
            name = self.name.as_str(),
            fields = info.fields_count(),
            params = info.param_count(),
            "statement built"
        );
        info
    }

    fn write_args<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        for (index, arg) in self.args.iter().enumerate() {
            if index > 0 {
                context.writer.write_str(", ")?;
            }
            context.write_placeholder(arg.as_str())?;
        }
        Ok(())
    }

    fn credit_columns<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) {
        for col in self.columns.columns() {
            context.state.push_field(col.as_str());
        }
    }
}

where_methods!(ProcBuilder);

impl FormatWriter for ProcBuilder {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        if context.dialect.kind() == DialectKind::MsSql {
            context.writer.write_str("exec ")?;
            self.name.format_writer(context)?;
            if !self.args.is_empty() {
                context.writer.write_char(' ')?;
                self.write_args(context)?;
            }
            self.credit_columns(context);
            return Ok(());
        }

        if self.mode == ProcMode::Perform {
            context.writer.write_str("perform ")?;
            self.name.format_writer(context)?;
            context.writer.write_char('(')?;
            self.write_args(context)?;
            return context.writer.write_char(')');
        }

        context.writer.write_str("select ")?;
        self.columns.format_writer(context)?;
        if self.row_count {
            write!(context.writer, ", count(*) over() as {}", ROW_COUNT_FIELD)?;
            context.state.push_field(ROW_COUNT_FIELD);
        }
        context.writer.write_str(" from ")?;
        self.name.format_writer(context)?;
        context.writer.write_char('(')?;
        self.write_args(context)?;
        context.writer.write_char(')')?;

        if !self.conditions.is_empty() {
            context.writer.write_char(' ')?;
            self.conditions.format_writer(context)?;
        }

        write_tail(context, &[], &self.order, self.limit)
    }
}
