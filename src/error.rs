use std::io;
use thiserror::Error;

use crate::id::UnitsObjectId;

/// Every way a token kernel invocation can be rejected.
///
/// Each variant maps onto one process status code through [`KernelError::code`];
/// the host translates the code back into its own error convention.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// The instruction names an operation this module does not implement
    #[error("Invalid function: {0:?}")]
    InvalidFunction(String),

    /// Malformed or missing targets, undecodable params or payloads, broken id linkage
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// The requested amount exceeds what the balance holds
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { available: u64, requested: u64 },

    /// Reserved for the host; this module never raises it
    #[error("Unauthorized")]
    Unauthorized,

    /// Transfers are disabled while the token is frozen
    #[error("Token is frozen: {0}")]
    TokenFrozen(UnitsObjectId),

    /// A checked quantity update would wrap
    #[error("Numeric overflow")]
    Overflow,
}

impl KernelError {
    pub const INVALID_FUNCTION: i32 = -1;
    pub const INVALID_PARAMS: i32 = -2;
    pub const INSUFFICIENT_BALANCE: i32 = -3;
    pub const UNAUTHORIZED: i32 = -4;
    pub const TOKEN_FROZEN: i32 = -5;
    pub const OVERFLOW: i32 = -6;

    /// Process status code reported for this error
    pub fn code(&self) -> i32 {
        match self {
            KernelError::InvalidFunction(_) => Self::INVALID_FUNCTION,
            KernelError::InvalidParams(_) => Self::INVALID_PARAMS,
            KernelError::InsufficientBalance { .. } => Self::INSUFFICIENT_BALANCE,
            KernelError::Unauthorized => Self::UNAUTHORIZED,
            KernelError::TokenFrozen(_) => Self::TOKEN_FROZEN,
            KernelError::Overflow => Self::OVERFLOW,
        }
    }

    pub(crate) fn invalid_params(reason: impl Into<String>) -> Self {
        KernelError::InvalidParams(reason.into())
    }
}

/// Failures of the invocation byte-stream codec
#[derive(Error, Debug)]
pub enum WireError {
    /// The stream ended before the expected number of bytes arrived
    #[error("Stream ended while reading {0}")]
    ShortRead(&'static str),

    /// A count or length on the wire is above the configured ceiling
    #[error("{field} of {value} exceeds the limit of {limit}")]
    CapacityExceeded {
        field: &'static str,
        value: usize,
        limit: usize,
    },

    /// The function name field has no terminator, or a name to encode does not fit it
    #[error("Malformed function name: {0}")]
    MalformedFunctionName(String),

    /// Any other I/O failure on the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Failures interpreting an object payload or instruction params
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A decoded field is outside its permitted range
    #[error("{field} is {len} bytes, longer than {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

impl From<bincode::Error> for PayloadError {
    fn from(err: bincode::Error) -> Self {
        PayloadError::Serialization(err.to_string())
    }
}

/// Checked quantity arithmetic failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("Addition overflowed")]
    Overflow,

    #[error("Subtraction underflowed")]
    Underflow,
}

impl From<WireError> for KernelError {
    fn from(err: WireError) -> Self {
        KernelError::InvalidParams(err.to_string())
    }
}

impl From<PayloadError> for KernelError {
    fn from(err: PayloadError) -> Self {
        KernelError::InvalidParams(err.to_string())
    }
}

impl From<ArithmeticError> for KernelError {
    fn from(_: ArithmeticError) -> Self {
        KernelError::Overflow
    }
}
