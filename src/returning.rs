use std::fmt;

use crate::{
    col::Columns,
    dialect::DialectKind,
    writer::{FormatContext, FormatWriter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Source {
    Inserted,
    Deleted,
}

impl Source {
    fn prefix(&self) -> &'static str {
        match self {
            Source::Inserted => "inserted.",
            Source::Deleted => "deleted.",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Returning {
    source: Source,
    columns: Columns,
}

impl Returning {
    pub(crate) fn new(source: Source) -> Self {
        Self {
            source,
            columns: Columns::new(),
        }
    }

    pub(crate) fn append(&mut self, columns: Columns) {
        self.columns
            .extend(columns.into_iter().filter(|col| !col.is_empty()));
    }

    pub(crate) fn write_output<W: fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> fmt::Result {
        if self.columns.is_empty() || context.dialect.kind() != DialectKind::MsSql {
            return Ok(());
        }
        context.writer.write_str(" output ")?;
        for (index, col) in self.columns.iter().enumerate() {
            if index > 0 {
                context.writer.write_str(", ")?;
            }
            context.writer.write_str(self.source.prefix())?;
            col.format_writer(context)?;
            context.state.push_returning(col.as_str());
        }
        Ok(())
    }

    pub(crate) fn write_trailing<W: fmt::Write>(
        &self,
        context: &mut FormatContext<'_, W>,
    ) -> fmt::Result {
        if self.columns.is_empty() {
            return Ok(());
        }
        match context.dialect.kind() {
            DialectKind::Postgres => {}
            DialectKind::MsSql => return Ok(()),
            DialectKind::MySql => {
                tracing::warn!(
                    columns = self.columns.len(),
                    "returning columns are not supported on mysql, skipped"
                );
                return Ok(());
            }
        }
        context.writer.write_str(" returning ")?;
        for (index, col) in self.columns.iter().enumerate() {
            if index > 0 {
                context.writer.write_str(", ")?;
            }
            col.format_writer(context)?;
            context.state.push_returning(col.as_str());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use pretty_assertions::assert_eq;

    use crate::{IntoColumns, dialect::Dialect, writer::FormatContext};

    use super::*;

    fn render(returning: &Returning, dialect: Dialect) -> (String, String) {
        let mut str = String::new();
        let mut context = FormatContext::new(&mut str, &dialect);
        returning.write_output(&mut context).unwrap();
        context.writer.write_str(" |").unwrap();
        returning.write_trailing(&mut context).unwrap();
        let info = context.into_state().finish(String::new(), false);
        (str, info.returning_fields().to_string())
    }

    fn returning(source: Source) -> Returning {
        let mut returning = Returning::new(source);
        returning.append(["id", "", "name"].into_columns());
        returning
    }

    #[test]
    fn test_returning_per_dialect() {
        let (sql, fields) = render(&returning(Source::Deleted), Dialect::mssql());
        assert_eq!(" output deleted.id, deleted.name |", sql);
        assert_eq!("id, name", fields);

        let (sql, fields) = render(&returning(Source::Inserted), Dialect::postgres());
        assert_eq!(" | returning id, name", sql);
        assert_eq!("id, name", fields);

        let (sql, fields) = render(&returning(Source::Inserted), Dialect::mysql());
        assert_eq!(" |", sql);
        assert_eq!("", fields);
    }
}
