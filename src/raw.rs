use smol_str::SmolStr;

use crate::writer::FormatContext;

/// Literal SQL text that may contain `?` parameter markers.
///
/// Markers are rewritten to the dialect placeholder when the text is
/// rendered. A `?` inside a quoted literal or quoted identifier is kept as is,
/// and so are the `??`, `?|` and `?&` operators.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Raw(SmolStr);

impl Raw {
    pub fn new<T>(value: T) -> Self
    where
        T: AsRef<str>,
    {
        Self(SmolStr::new(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Write the text, crediting every placeholder to `field`.
    pub(crate) fn write_bound<W: std::fmt::Write>(
        &self,
        field: &str,
        context: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        let sql = self.0.as_str();
        let bytes = sql.as_bytes();

        let mut span_start = 0;
        let mut index = 0;
        while index < bytes.len() {
            match bytes[index] {
                quote @ (b'\'' | b'"') => {
                    index += 1;
                    while index < bytes.len() {
                        if bytes[index] == quote {
                            // doubled quote is an escape
                            if bytes.get(index + 1) == Some(&quote) {
                                index += 2;
                                continue;
                            }
                            break;
                        }
                        index += 1;
                    }
                    index += 1;
                }
                b'?' => match (bytes.get(index + 1), bytes.get(index + 2)) {
                    // `?||` is a parameter followed by string concatenation
                    (Some(b'?' | b'&'), _) | (Some(b'|'), None) => index += 2,
                    (Some(b'|'), Some(next)) if *next != b'|' => index += 2,
                    _ => {
                        context.writer.write_str(&sql[span_start..index])?;
                        context.write_placeholder(field)?;
                        index += 1;
                        span_start = index;
                    }
                },
                _ => index += 1,
            }
        }

        if span_start < sql.len() {
            context.writer.write_str(&sql[span_start..])?;
        }

        Ok(())
    }
}

pub trait IntoRaw {
    fn into_raw(self) -> Raw;
}

impl IntoRaw for Raw {
    fn into_raw(self) -> Raw {
        self
    }
}

impl IntoRaw for &str {
    fn into_raw(self) -> Raw {
        Raw::new(self)
    }
}

impl IntoRaw for String {
    fn into_raw(self) -> Raw {
        Raw::new(self)
    }
}

impl IntoRaw for &String {
    fn into_raw(self) -> Raw {
        Raw::new(self)
    }
}
