use std::fmt::Write;

use crate::{dialect::Dialect, statement::BuildState};

pub(crate) trait FormatWriter {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> std::fmt::Result;
}

pub(crate) struct FormatContext<'a, W: Write> {
    pub(crate) writer: &'a mut W,
    pub(crate) dialect: &'a Dialect,
    pub(crate) state: BuildState,
    pub(crate) is_sub: bool,
}

impl<'a, W: Write> FormatContext<'a, W> {
    pub fn new(writer: &'a mut W, dialect: &'a Dialect) -> Self {
        Self {
            writer,
            dialect,
            state: BuildState::default(),
            is_sub: false,
        }
    }

    fn nested(writer: &'a mut W, dialect: &'a Dialect, start: usize) -> Self {
        Self {
            writer,
            dialect,
            state: BuildState::starting_at(start),
            is_sub: true,
        }
    }

    pub(crate) fn into_state(self) -> BuildState {
        self.state
    }

    pub(crate) fn write_placeholder(&mut self, field: &str) -> std::fmt::Result {
        let ordinal = self.state.next_param(field);
        self.dialect.write_placeholder(&mut *self.writer, ordinal)
    }

    pub(crate) fn write_sub_query<F: FormatWriter>(&mut self, query: &F) -> std::fmt::Result {
        let dialect = self.dialect;
        let start = self.state.param_count();

        self.writer.write_char('(')?;
        let mut nested = FormatContext::nested(&mut *self.writer, dialect, start);
        query.format_writer(&mut nested)?;
        let sub = nested.into_state();
        self.writer.write_char(')')?;

        self.state.adopt(sub);
        Ok(())
    }

    pub(crate) fn write_list<T: AsRef<str>>(&mut self, items: &[T]) -> std::fmt::Result {
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.writer.write_str(", ")?;
            }
            self.writer.write_str(item.as_ref())?;
        }
        Ok(())
    }
}

pub(crate) fn compile<F: FormatWriter>(
    statement: &F,
    dialect: &Dialect,
    terminate: bool,
) -> (String, BuildState) {
    let size_hint = 64;
    let mut str = String::with_capacity(size_hint);
    let mut context = FormatContext::new(&mut str, dialect);
    statement
        .format_writer(&mut context)
        .expect("should not fail on a string writer");
    let state = context.into_state();
    if terminate {
        str.push(';');
    }
    (str, state)
}
