use std::fmt;

use crate::{
    ident::Ident,
    writer::{self, FormatWriter},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    #[default]
    Asc,
    Desc,
}

impl FormatWriter for Ordering {
    fn format_writer<W: fmt::Write>(
        &self,
        context: &mut writer::FormatContext<'_, W>,
    ) -> std::fmt::Result {
        match self {
            Ordering::Asc => context.writer.write_str("asc"),
            Ordering::Desc => context.writer.write_str("desc"),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct Order {
    projections: Vec<(Ident, Ordering)>,
}

impl Order {
    pub(crate) fn is_empty(&self) -> bool {
        self.projections.is_empty()
    }

    pub(crate) fn push(&mut self, ident: Ident, ordering: Ordering) {
        if ident.is_empty() {
            return;
        }
        self.projections.push((ident, ordering));
    }
}

impl FormatWriter for Order {
    fn format_writer<W: fmt::Write>(
        &self,
        context: &mut writer::FormatContext<'_, W>,
    ) -> std::fmt::Result {
        if self.projections.is_empty() {
            return Ok(());
        }
        context.writer.write_str("order by ")?;
        for (index, (ident, ordering)) in self.projections.iter().enumerate() {
            if index > 0 {
                context.writer.write_str(", ")?;
            }
            ident.format_writer(context)?;
            context.writer.write_char(' ')?;
            ordering.format_writer(context)?;
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
    fn test_order_by() {
        let mut order = Order::default();
        order.push(Ident::new("ts.SeqNo"), Ordering::Asc);
        order.push(Ident::new(""), Ordering::Desc);
        order.push(Ident::new("t.ID"), Ordering::Desc);
        let sql = format_writer(order, Dialect::postgres());
        assert_eq!("order by ts.SeqNo asc, t.ID desc", sql);
    }

    #[test]
    fn test_empty_order() {
        assert_eq!("", format_writer(Order::default(), Dialect::postgres()));
    }
}
