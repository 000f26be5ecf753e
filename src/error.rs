pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("default where condition must be added before a where group")]
    MissingWhere,

    #[error("invalid procedure name: '{0}'")]
    InvalidProcName(String),

    #[error("unknown database dialect: '{0}'")]
    UnknownDialect(String),
}
