use std::{fmt::Write, str::FromStr};

use smol_str::SmolStr;

use crate::error::Error;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DialectKind {
    Postgres,
    MsSql,
    #[default]
    MySql,
}

impl DialectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialectKind::Postgres => "pgsql",
            DialectKind::MsSql => "mssql",
            DialectKind::MySql => "mysql",
        }
    }
}

impl FromStr for DialectKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pgsql" | "postgres" | "postgresql" => Ok(DialectKind::Postgres),
            "mssql" | "sqlserver" => Ok(DialectKind::MsSql),
            "mysql" => Ok(DialectKind::MySql),
            _ => Err(Error::UnknownDialect(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dialect {
    kind: DialectKind,
    prefix: SmolStr,
    numbered: bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::mysql()
    }
}

impl Dialect {
    pub fn new<P>(kind: DialectKind, prefix: P, numbered: bool) -> Self
    where
        P: AsRef<str>,
    {
        Self {
            kind,
            prefix: SmolStr::new(prefix),
            numbered,
        }
    }

    pub fn postgres() -> Self {
        Self {
            kind: DialectKind::Postgres,
            prefix: SmolStr::new_static("$"),
            numbered: true,
        }
    }

    pub fn mssql() -> Self {
        Self {
            kind: DialectKind::MsSql,
            prefix: SmolStr::new_static("@p"),
            numbered: true,
        }
    }

    pub fn mysql() -> Self {
        Self {
            kind: DialectKind::MySql,
            prefix: SmolStr::new_static("?"),
            numbered: false,
        }
    }

    pub fn for_kind(kind: DialectKind) -> Self {
        match kind {
            DialectKind::Postgres => Self::postgres(),
            DialectKind::MsSql => Self::mssql(),
            DialectKind::MySql => Self::mysql(),
        }
    }

    pub fn with_prefix<P: AsRef<str>>(mut self, prefix: P) -> Self {
        self.prefix = SmolStr::new(prefix);
        self
    }

    pub fn with_numbered(mut self, numbered: bool) -> Self {
        self.numbered = numbered;
        self
    }

    pub fn kind(&self) -> DialectKind {
        self.kind
    }

    pub fn prefix(&self) -> &str {
        self.prefix.as_str()
    }

    pub fn is_numbered(&self) -> bool {
        self.numbered
    }

    /// Render the placeholder for the 1-based parameter `ordinal`.
    pub fn placeholder(&self, ordinal: usize) -> String {
        let mut str = String::with_capacity(self.prefix.len() + 3);
        self.write_placeholder(&mut str, ordinal)
            .expect("should not fail on a string writer");
        str
    }

    pub(crate) fn write_placeholder<W: Write>(
        &self,
        writer: &mut W,
        ordinal: usize,
    ) -> std::fmt::Result {
        writer.write_str(self.prefix.as_str())?;
        if self.numbered {
            write!(writer, "{}", ordinal)?;
        }
        Ok(())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<DialectKind>().map(Self::for_kind)
    }
}
