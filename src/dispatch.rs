use log::debug;
use std::fmt;
use std::str::FromStr;

use crate::constants::TOKEN_MODULE_NAME;
use crate::error::KernelError;
use crate::handlers;
use crate::objects::{ExecutionContext, ObjectEffect};

/// The closed set of operations the token kernel implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenOperation {
    Tokenize,
    Mint,
    Burn,
    Transfer,
    Freeze,
    Unfreeze,
}

impl TokenOperation {
    pub const ALL: [TokenOperation; 6] = [
        TokenOperation::Tokenize,
        TokenOperation::Mint,
        TokenOperation::Burn,
        TokenOperation::Transfer,
        TokenOperation::Freeze,
        TokenOperation::Unfreeze,
    ];

    /// Function name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenOperation::Tokenize => "tokenize",
            TokenOperation::Mint => "mint",
            TokenOperation::Burn => "burn",
            TokenOperation::Transfer => "transfer",
            TokenOperation::Freeze => "freeze",
            TokenOperation::Unfreeze => "unfreeze",
        }
    }

    /// Run the handler for this operation
    pub fn handle(&self, ctx: &ExecutionContext) -> Result<Vec<ObjectEffect>, KernelError> {
        match self {
            TokenOperation::Tokenize => handlers::handle_tokenize(ctx),
            TokenOperation::Mint => handlers::handle_mint(ctx),
            TokenOperation::Burn => handlers::handle_burn(ctx),
            TokenOperation::Transfer => handlers::handle_transfer(ctx),
            TokenOperation::Freeze => handlers::handle_freeze(ctx),
            TokenOperation::Unfreeze => handlers::handle_unfreeze(ctx),
        }
    }
}

impl FromStr for TokenOperation {
    type Err = KernelError;

    /// Exact, case-sensitive match; no trimming or aliases
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        TokenOperation::ALL
            .into_iter()
            .find(|op| op.as_str() == name)
            .ok_or_else(|| KernelError::InvalidFunction(name.to_string()))
    }
}

impl fmt::Display for TokenOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A module the host can invoke once per instruction
pub trait KernelModule {
    /// Name the host registers the module under
    fn name(&self) -> &str;

    /// Evaluate one instruction against its working set.
    ///
    /// Pure: the same context always yields the same result, and nothing is
    /// applied; the caller decides what to do with the effects.
    fn execute(&self, ctx: &ExecutionContext) -> Result<Vec<ObjectEffect>, KernelError>;
}

/// The token lifecycle kernel
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenModule;

impl KernelModule for TokenModule {
    fn name(&self) -> &str {
        TOKEN_MODULE_NAME
    }

    fn execute(&self, ctx: &ExecutionContext) -> Result<Vec<ObjectEffect>, KernelError> {
        let operation: TokenOperation = ctx.instruction.function_name.parse()?;
        let result = operation.handle(ctx);
        if let Err(err) = &result {
            debug!("{} rejected: {}", operation, err);
        }
        result
    }
}
