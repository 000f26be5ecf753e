use std::fmt;

use crate::{
    col::{Columns, IntoColumns},
    dialect::Dialect,
    ident::{Ident, IntoIdent},
    returning::{Returning, Source},
    statement::StatementInfo,
    writer::{self, FormatContext, FormatWriter},
};

pub(crate) const NO_FIELDS_TO_INSERT: &str = "no fields to insert";

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    dialect: Dialect,
    table: Ident,
    columns: Columns,
    returning: Returning,
}

impl InsertBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            table: Ident::default(),
            columns: Columns::new(),
            returning: Returning::new(Source::Inserted),
        }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn table<T: IntoIdent>(&mut self, table: T) -> &mut Self {
        self.table = table.into_ident();
        self
    }

    pub fn columns<T>(&mut self, cols: T) -> &mut Self
    where
        T: IntoColumns,
    {
        self.columns.extend(
            cols.into_columns()
                .into_iter()
                .filter(|col| !col.is_empty()),
        );
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
        if self.columns.is_empty() {
            return StatementInfo::diagnostic(NO_FIELDS_TO_INSERT);
        }
        let (sql, state) = writer::compile(self, &self.dialect, terminate);
        let info = state.finish(sql, false);
        tracing::trace!(
            statement = "insert",
            fields = info.fields_count(),
            params = info.param_count(),
            "statement built"
        );
        info
    }
}

impl FormatWriter for InsertBuilder {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.writer.write_str("insert into ")?;
        self.table.format_writer(context)?;
        context.writer.write_char('(')?;
        context.write_list(&self.columns)?;
        context.writer.write_char(')')?;

        self.returning.write_output(context)?;

        context.writer.write_str(" values(")?;
        for (index, col) in self.columns.iter().enumerate() {
            if index > 0 {
                context.writer.write_str(", ")?;
            }
            context.state.push_field(col.as_str());
            context.write_placeholder(col.as_str())?;
        }
        context.writer.write_char(')')?;

        self.returning.write_trailing(context)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn users(dialect: Dialect) -> InsertBuilder {
        let mut builder = InsertBuilder::new(dialect);
        builder.table("users").columns(["name", "age"]).returning("id");
        builder
    }

    #[test]
    fn test_insert_mssql() {
        let info = users(Dialect::mssql()).build(true);
        assert_eq!(
            "insert into users(name, age) output inserted.id values(@p1, @p2);",
            info.sql()
        );
        assert_eq!("name, age", info.fields());
        assert_eq!(2, info.fields_count());
        assert_eq!("name, age", info.param_fields());
        assert_eq!(2, info.param_count());
        assert_eq!("id", info.returning_fields());
        assert!(!info.read_only());
    }

    #[test]
    fn test_insert_postgres() {
        let info = users(Dialect::postgres()).build(true);
        assert_eq!(
            "insert into users(name, age) values($1, $2) returning id;",
            info.sql()
        );
        assert_eq!("id", info.returning_fields());
    }

    #[test]
    fn test_insert_mysql_skips_returning() {
        let info = users(Dialect::mysql()).build(false);
        assert_eq!("insert into users(name, age) values(?, ?)", info.sql());
        assert_eq!("", info.returning_fields());
        assert_eq!(2, info.param_count());
    }

    #[test]
    fn test_no_fields_to_insert() {
        let mut builder = InsertBuilder::new(Dialect::postgres());
        builder.table("users").returning("id");
        let info = builder.build(true);
        assert!(info.is_diagnostic());
        assert_eq!("no fields to insert", info.sql());
        assert_eq!("", info.returning_fields());
    }
}
