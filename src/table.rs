use std::fmt;

use indexmap::IndexMap;

use crate::{
    ident::Ident,
    writer::{FormatContext, FormatWriter},
};

#[derive(Debug, Default, Clone)]
pub(crate) struct Tables(IndexMap<Ident, Ident>);

impl Tables {
    pub(crate) fn insert(&mut self, table: &str, alias: &str) {
        let table = Ident::lowercase(table);
        if table.is_empty() {
            return;
        }
        let alias = Ident::new(alias);
        if let Some(previous) = self.0.insert(alias.clone(), table) {
            tracing::debug!(
                alias = alias.as_str(),
                previous = previous.as_str(),
                "table alias overwritten"
            );
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FormatWriter for Tables {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        let mut aliases: Vec<&Ident> = self.0.keys().collect();
        aliases.sort();

        context.writer.write_str("from ")?;
        for (index, alias) in aliases.into_iter().enumerate() {
            if index > 0 {
                context.writer.write_str(", ")?;
            }
            self.0[alias].format_writer(context)?;
            if !alias.is_empty() {
                context.writer.write_char(' ')?;
                alias.format_writer(context)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{dialect::Dialect, tests::format_writer};

    use super::*;

    #[test]
    fn test_aliases_are_sorted() {
        let mut one = Tables::default();
        one.insert("Questions", "q");
        one.insert("QuestionData", "qd");
        one.insert("Topics", "");

        let mut two = Tables::default();
        two.insert("Topics", "");
        two.insert("QuestionData", "qd");
        two.insert("Questions", "q");

        let lhs = format_writer(one, Dialect::postgres());
        let rhs = format_writer(two, Dialect::postgres());
        assert_eq!("from topics, questions q, questiondata qd", lhs);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_last_alias_wins() {
        let mut tables = Tables::default();
        tables.insert("users", "u");
        tables.insert("", "x");
        tables.insert("Accounts", "u");
        assert_eq!("from accounts u", format_writer(tables, Dialect::mysql()));
    }
}
