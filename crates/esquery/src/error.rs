use crate::client::ClientError;
use esquery_core::{compile::CompileError, condition::ConditionError};
use thiserror::Error as ThisError;

///
/// Error
///
/// Public error surface of the facade: condition construction, lowering,
/// and transport. All variants are raised synchronously at compile or
/// execution time.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Condition(#[from] ConditionError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Client(#[from] ClientError),
}
