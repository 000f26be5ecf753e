mod builder;
mod col;
mod delete;
mod dialect;
mod error;
mod expr;
mod ident;
mod insert;
mod operator;
mod proc;
mod raw;
mod returning;
mod statement;
mod table;
mod update;
mod writer;

pub use builder::SelectBuilder;
pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use proc::ProcBuilder;
pub use update::UpdateBuilder;

pub use col::Columns;
pub use col::IntoColumns;
pub use dialect::{Dialect, DialectKind};
pub use error::{Error, Result};
pub use expr::r#in::InBuilder;
pub use expr::{Condition, Conjunction, Ordering};
pub use ident::{Ident, IntoIdent};
pub use operator::Operator;
pub use raw::{IntoRaw, Raw};
pub use statement::StatementInfo;

/// Build a sub-query for [`Condition::in_sub`], the `*_sub` comparisons or
/// [`SelectBuilder::select_sub`].
///
/// Sub-queries are always rendered with the dialect of the statement that
/// contains them, so the builder handed to `closure` uses the default one.
pub fn sub<F>(closure: F) -> SelectBuilder
where
    F: FnOnce(&mut SelectBuilder),
{
    let mut builder = SelectBuilder::default();
    closure(&mut builder);
    builder
}

pub fn ident<T: IntoIdent>(value: T) -> Ident {
    value.into_ident()
}

pub fn raw<T: IntoRaw>(value: T) -> Raw {
    value.into_raw()
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::{dialect, statement::StatementInfo, writer};

    pub(crate) fn format_writer<W: writer::FormatWriter>(
        writer: W,
        dialect: dialect::Dialect,
    ) -> String {
        format_state(writer, dialect).0
    }

    pub(crate) fn format_state<W: writer::FormatWriter>(
        writer: W,
        dialect: dialect::Dialect,
    ) -> (String, StatementInfo) {
        let mut str = String::new();
        let mut context = writer::FormatContext::new(&mut str, &dialect);
        writer.format_writer(&mut context).unwrap();
        let info = context.into_state().finish(String::new(), true);
        (str, info)
    }
}
