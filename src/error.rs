use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Recoverable environment and protocol errors.
///
/// Expected negative results (key not found, no further position) are plain
/// booleans on the structures themselves, and structural invariant violations
/// panic — neither belongs here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("wrong number of arguments for '{0}'")]
    WrongArity(&'static str),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{0}' is not a valid key")]
    BadKey(String),

    #[error("cannot open word file '{path}': {source}")]
    WordFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
