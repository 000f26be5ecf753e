use std::fmt;

use indexmap::IndexMap;

use crate::{
    col::{Columns, IntoColumns},
    dialect::Dialect,
    expr::{Conditions, where_methods},
    ident::{Ident, IntoIdent},
    raw::Raw,
    returning::{Returning, Source},
    statement::StatementInfo,
    writer::{self, FormatContext, FormatWriter},
};

pub(crate) const NO_FIELDS_TO_UPDATE: &str = "no fields to update";

/// Builds `update` statements.
///
/// Plain columns get one placeholder each. Calculated columns carry their own
/// expression where every `?` becomes a placeholder, e.g. `points+?`.
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    dialect: Dialect,
    table: Ident,
    columns: Columns,
    calc_columns: IndexMap<Ident, Raw>,
    conditions: Conditions,
    returning: Returning,
}

impl UpdateBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            table: Ident::default(),
            columns: Columns::new(),
            calc_columns: IndexMap::new(),
            conditions: Conditions::default(),
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

    /// Set `col` to a calculated value. Setting the same column twice keeps
    /// the last value.
    pub fn calc_column<C, V>(&mut self, col: C, value: V) -> &mut Self
    where
        C: IntoIdent,
        V: AsRef<str>,
    {
        let col = col.into_ident();
        if col.is_empty() {
            return self;
        }
        let value = Raw::new(value.as_ref().trim());
        if let Some(previous) = self.calc_columns.insert(col.clone(), value) {
            tracing::debug!(
                column = col.as_str(),
                previous = previous.as_str(),
                "calculated column overwritten"
            );
        }
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
        if self.columns.is_empty() && self.calc_columns.is_empty() {
            return StatementInfo::diagnostic(NO_FIELDS_TO_UPDATE);
        }
        let (sql, state) = writer::compile(self, &self.dialect, terminate);
        let info = state.finish(sql, false);
        tracing::trace!(
            statement = "update",
            fields = info.fields_count(),
            params = info.param_count(),
            "statement built"
        );
        info
    }
}

where_methods!(UpdateBuilder);

impl FormatWriter for UpdateBuilder {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.writer.write_str("update ")?;
        self.table.format_writer(context)?;
        context.writer.write_str(" set ")?;

        let mut first = true;
        for col in &self.columns {
            if !first {
                context.writer.write_str(", ")?;
            }
            first = false;
            col.format_writer(context)?;
            context.writer.write_char('=')?;
            context.state.push_field(col.as_str());
            context.write_placeholder(col.as_str())?;
        }

        let mut calc_columns: Vec<(&Ident, &Raw)> = self.calc_columns.iter().collect();
        calc_columns.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (col, value) in calc_columns {
            if !first {
                context.writer.write_str(", ")?;
            }
            first = false;
            col.format_writer(context)?;
            context.writer.write_char('=')?;
            context.state.push_field(col.as_str());
            value.write_bound(col.as_str(), context)?;
        }

        self.returning.write_output(context)?;

        if !self.conditions.is_empty() {
            context.writer.write_char(' ')?;
            self.conditions.format_writer(context)?;
        }

        self.returning.write_trailing(context)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{Condition, Conjunction};

    use super::*;

    fn users(dialect: Dialect) -> UpdateBuilder {
        let mut builder = UpdateBuilder::new(dialect);
        builder
            .table("users")
            .columns(["name", "age"])
            .calc_column("points", "points+?")
            .where_([Condition::eq("id", "?")])
            .returning("id");
        builder
    }

    #[test]
    fn test_update_mssql() {
        let info = users(Dialect::mssql()).build(true);
        assert_eq!(
            "update users set name=@p1, age=@p2, points=points+@p3 output inserted.id where (id=@p4);",
            info.sql()
        );
        assert_eq!("name, age, points", info.fields());
        assert_eq!(3, info.fields_count());
        assert_eq!("name, age, points, id", info.param_fields());
        assert_eq!(4, info.param_count());
        assert_eq!("id", info.returning_fields());
        assert!(!info.read_only());
    }

    #[test]
    fn test_update_postgres() {
        let info = users(Dialect::postgres()).build(true);
        assert_eq!(
            "update users set name=$1, age=$2, points=points+$3 where (id=$4) returning id;",
            info.sql()
        );
    }

    #[test]
    fn test_calc_columns_are_sorted() {
        let mut one = UpdateBuilder::new(Dialect::postgres());
        one.table("stats")
            .calc_column("views", " views+1 ")
            .calc_column("score", "score*?");
        let mut two = UpdateBuilder::new(Dialect::postgres());
        two.table("stats")
            .calc_column("score", "score*?")
            .calc_column("views", "views+1");

        let lhs = one.build(false);
        assert_eq!("update stats set score=score*$1, views=views+1", lhs.sql());
        assert_eq!("score", lhs.param_fields());
        assert_eq!(lhs, two.build(false));
    }

    #[test]
    fn test_calc_column_last_value_wins() {
        let mut builder = UpdateBuilder::new(Dialect::mysql());
        builder
            .table("users")
            .calc_column("points", "points+1")
            .calc_column("points", "points+?");
        let info = builder.build(false);
        assert_eq!("update users set points=points+?", info.sql());
        assert_eq!(1, info.param_count());
    }

    #[test]
    fn test_update_inner_or_group() {
        let mut builder = UpdateBuilder::new(Dialect::postgres());
        builder
            .table("jobs")
            .columns("state")
            .where_([Condition::eq("queue", "?")])
            .where_group_with(
                Conjunction::And,
                Conjunction::Or,
                [Condition::eq("state", "'failed'"), Condition::lt("runs", "?")],
            )
            .unwrap();
        assert_eq!(
            "update jobs set state=$1 where (queue=$2) AND (runs<$3 or state='failed')",
            builder.build(false).sql()
        );
    }

    #[test]
    fn test_no_fields_to_update() {
        let mut builder = UpdateBuilder::new(Dialect::postgres());
        builder.table("users").where_([Condition::eq("id", "?")]);
        let info = builder.build(true);
        assert!(info.is_diagnostic());
        assert_eq!("no fields to update", info.sql());
    }
}
