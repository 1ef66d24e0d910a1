//! Request-level errors.

use thiserror::Error;

use di_codegen::CodegenError;
use di_graph::LoadError;

/// A generation request that fails before any graph work begins.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    #[error("function name is empty")]
    EmptyName,

    #[error("{0:?} is not a valid function name")]
    InvalidName(String),

    #[error("{0:?} is not a valid package name")]
    InvalidPackage(String),

    #[error("target import path is empty")]
    EmptyTarget,

    #[error("no results requested")]
    NoResults,

    /// The error sentinel may only be the last result.
    #[error("error must be the last result (found at position {0})")]
    MisplacedError(usize),

    #[error("error cannot be a parameter")]
    ErrorParam,
}

/// Failure of one generation request.
///
/// Every variant but [`Error::Invalid`] names the request as
/// `"<target>".<Name>`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid request: {0}")]
    Invalid(#[from] InvalidRequest),

    #[error("unable to generate {name}: {source}")]
    Load { name: String, source: LoadError },

    #[error("unable to generate {name}: {source}")]
    Codegen { name: String, source: CodegenError },
}
