//! The public error type, following ironbeam's pattern of one `thiserror`
//! enum at the crate boundary with `anyhow` used for internal plumbing.

use thiserror::Error as ThisError;

/// All ways a graph can fail to build, decode, run, or encode.
#[derive(ThisError, Debug)]
pub enum Error {
    /// The graph was built or invoked incorrectly (bad key columns, a
    /// missing source binding, an unregistered upstream).
    #[error("configuration error{}: {message}", label_suffix(stage))]
    Configuration {
        message: String,
        stage: Option<String>,
    },

    /// A record shape violated an operator's expectations at run time (a
    /// missing key column, an incomparable pair of key values).
    #[error("schema error{}: {message}", label_suffix(stage))]
    Schema {
        message: String,
        stage: Option<String>,
    },

    /// The external representation could not be parsed.
    #[error("decode error at line {line}{}: {message}", label_suffix(stage))]
    Decode {
        message: String,
        line: usize,
        stage: Option<String>,
    },

    /// A record could not be serialized to the external representation.
    #[error("encoding error{}: {message}", label_suffix(stage))]
    Encoding {
        message: String,
        stage: Option<String>,
    },

    /// A user-supplied mapper, folder, or reducer closure returned an error.
    #[error("operator error{}: {message}", label_suffix(stage))]
    Operator {
        message: String,
        stage: Option<String>,
    },
}

fn label_suffix(stage: &Option<String>) -> String {
    match stage {
        Some(label) => format!(" (in {label})"),
        None => String::new(),
    }
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            stage: None,
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Error::Schema {
            message: message.into(),
            stage: None,
        }
    }

    pub fn decode(message: impl Into<String>, line: usize) -> Self {
        Error::Decode {
            message: message.into(),
            line,
            stage: None,
        }
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Error::Encoding {
            message: message.into(),
            stage: None,
        }
    }

    pub fn operator(message: impl Into<String>) -> Self {
        Error::Operator {
            message: message.into(),
            stage: None,
        }
    }

    /// Attach (or overwrite) the stage/graph label that raised this error.
    pub fn with_stage(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        match &mut self {
            Error::Configuration { stage, .. }
            | Error::Schema { stage, .. }
            | Error::Decode { stage, .. }
            | Error::Encoding { stage, .. }
            | Error::Operator { stage, .. } => *stage = Some(label),
        }
        self
    }

    /// Tool-style exit code for a binary built on top of this crate: 0 on
    /// success, 2 for configuration mistakes, 3 for I/O boundary failures
    /// (decode/encode), 4 once the graph itself discovered a bad record.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Configuration { .. } => 2,
            Error::Decode { .. } | Error::Encoding { .. } => 3,
            Error::Schema { .. } | Error::Operator { .. } => 4,
        }
    }
}
