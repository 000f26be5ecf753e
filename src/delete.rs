use std::fmt;

use crate::{
    col::IntoColumns,
    dialect::Dialect,
    expr::{Conditions, where_methods},
    ident::{Ident, IntoIdent},
    returning::{Returning, Source},
    statement::StatementInfo,
    writer::{self, FormatContext, FormatWriter},
};

#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    dialect: Dialect,
    table: Ident,
    conditions: Conditions,
    returning: Returning,
}

impl DeleteBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            table: Ident::default(),
            conditions: Conditions::default(),
            returning: Returning::new(Source::Deleted),
        }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn table<T: IntoIdent>(&mut self, table: T) -> &mut Self {
        self.table = table.into_ident();
        self
    }

    pub fn returning<T>(&mut self, cols: T) -> &mut Self
    where
        T: IntoColumns,
    {
        self.returning.append(cols.into_columns());
        self
    }

    pub fn build(&self, terminate: bool) -> StatementInfo {
        let (sql, state) = writer::compile(self, &self.dialect, terminate);
        let info = state.finish(sql, false);
        tracing::trace!(
            statement = "delete",
            params = info.param_count(),
            "statement built"
        );
        info
    }
}

where_methods!(DeleteBuilder);

impl FormatWriter for DeleteBuilder {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.writer.write_str("delete from ")?;
        self.table.format_writer(context)?;

        self.returning.write_output(context)?;

        if !self.conditions.is_empty() {
            context.writer.write_char(' ')?;
            self.conditions.format_writer(context)?;
        }

        self.returning.write_trailing(context)
    }
}
