pub mod arithmetic;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod driver;
pub mod error;
pub mod handlers;
pub mod id;
pub mod mock_host;
pub mod objects;
pub mod payload;
pub mod wire;
pub mod working_set;

// Re-export the main types for convenience
pub use config::{KernelConfig, WireLimits};
pub use dispatch::{KernelModule, TokenModule, TokenOperation};
pub use driver::{run_invocation, Status};
pub use error::{ArithmeticError, KernelError, PayloadError, WireError};
pub use id::UnitsObjectId;
pub use mock_host::{InvocationReceipt, MockHost};
pub use objects::{ExecutionContext, Instruction, ObjectEffect, UnitsObject};
pub use payload::{
    BalanceData, BurnParams, MintParams, Payload, TokenData, TokenizeParams, TransferParams,
};
pub use wire::{encode_effects, read_context, read_effects, write_context, write_effects};
pub use working_set::WorkingSet;
