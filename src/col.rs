use std::fmt;

use crate::{
    builder::SelectBuilder,
    ident::{Ident, IntoIdent},
    writer::{FormatContext, FormatWriter},
};

pub type Columns = Vec<Ident>;

pub trait IntoColumns {
    fn into_columns(self) -> Columns;
}

impl IntoColumns for &str {
    fn into_columns(self) -> Columns {
        vec![self.into_ident()]
    }
}

impl IntoColumns for String {
    fn into_columns(self) -> Columns {
        vec![self.into_ident()]
    }
}

impl IntoColumns for Ident {
    fn into_columns(self) -> Columns {
        vec![self]
    }
}

impl<const N: usize> IntoColumns for [&str; N] {
    fn into_columns(self) -> Columns {
        self.into_iter().map(IntoIdent::into_ident).collect()
    }
}

impl<const N: usize> IntoColumns for [String; N] {
    fn into_columns(self) -> Columns {
        self.into_iter().map(IntoIdent::into_ident).collect()
    }
}

impl<const N: usize> IntoColumns for [Ident; N] {
    fn into_columns(self) -> Columns {
        self.to_vec()
    }
}

impl IntoColumns for &[&str] {
    fn into_columns(self) -> Columns {
        self.iter().map(|col| col.into_ident()).collect()
    }
}

impl IntoColumns for Vec<&str> {
    fn into_columns(self) -> Columns {
        self.into_iter().map(IntoIdent::into_ident).collect()
    }
}

impl IntoColumns for Vec<String> {
    fn into_columns(self) -> Columns {
        self.into_iter().map(IntoIdent::into_ident).collect()
    }
}

impl IntoColumns for Vec<Ident> {
    fn into_columns(self) -> Columns {
        self
    }
}

#[derive(Debug, Clone)]
pub(crate) enum SelectItem {
    Column(Ident),
    Sub {
        query: Box<SelectBuilder>,
        alias: Ident,
    },
}

#[derive(Debug, Default, Clone)]
pub(crate) struct SelectList(Vec<SelectItem>);

impl SelectList {
    pub(crate) fn append(&mut self, columns: Columns) {
        self.0.extend(
            columns
                .into_iter()
                .filter(|col| !col.is_empty())
                .map(SelectItem::Column),
        );
    }

    pub(crate) fn push_sub(&mut self, query: SelectBuilder, alias: Ident) {
        self.0.push(SelectItem::Sub {
            query: Box::new(query),
            alias,
        });
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn columns(&self) -> impl Iterator<Item = &Ident> {
        self.0.iter().filter_map(|item| match item {
            SelectItem::Column(ident) => Some(ident),
            SelectItem::Sub { .. } => None,
        })
    }
}

impl FormatWriter for SelectList {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        for (index, item) in self.0.iter().enumerate() {
            if index > 0 {
                context.writer.write_str(", ")?;
            }
            match item {
                SelectItem::Column(ident) => {
                    ident.format_writer(context)?;
                    // fields of a sub-query never reach the outer statement
                    if !context.is_sub {
                        context.state.push_field(ident.as_str());
                    }
                }
                SelectItem::Sub { query, alias } => {
                    context.write_sub_query(query.as_ref())?;
                    if !alias.is_empty() {
                        context.writer.write_char(' ')?;
                        alias.format_writer(context)?;
                    }
                }
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

    fn select<T>(value: T) -> Columns
    where
        T: IntoColumns,
    {
        value.into_columns()
    }

    #[test]
    fn test_into_columns() {
        assert_eq!(1, select("hello").len());
        assert_eq!(1, select(String::from("hello")).len());
        assert_eq!(2, select(["a", "b"]).len());
        assert_eq!(2, select(vec![String::from("a"), String::from("b")]).len());
        let cols: &[&str] = &["a", " b "];
        assert_eq!(vec![Ident::new("a"), Ident::new("b")], select(cols));
    }

    #[test]
    fn test_format_columns() {
        let mut list = SelectList::default();
        list.append(select(["q.ID", " qd.QID ", ""]));
        let sql = format_writer(list, Dialect::mysql());
        assert_eq!("q.ID, qd.QID", sql);
    }
}
