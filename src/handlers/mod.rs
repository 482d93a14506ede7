//! Token operation handlers.
//!
//! Every handler is a pure function of the execution context. All validation
//! runs before the first effect is built, so a handler either returns its full
//! effect list or an error and nothing else.

mod burn;
mod freeze;
mod mint;
mod tokenize;
mod transfer;

pub use burn::handle_burn;
pub use freeze::{handle_freeze, handle_unfreeze};
pub use mint::handle_mint;
pub use tokenize::handle_tokenize;
pub use transfer::handle_transfer;

use crate::error::KernelError;
use crate::id::UnitsObjectId;
use crate::objects::{ExecutionContext, ObjectEffect, UnitsObject};
use crate::payload::{BalanceData, Payload, TokenData};

/// The first `count` target identifiers, or `InvalidParams` if fewer were supplied
fn targets(ctx: &ExecutionContext, count: usize) -> Result<&[UnitsObjectId], KernelError> {
    let supplied = &ctx.instruction.target_objects;
    if supplied.len() < count {
        return Err(KernelError::invalid_params(format!(
            "{} requires {} target objects, got {}",
            ctx.instruction.function_name,
            count,
            supplied.len()
        )));
    }
    Ok(&supplied[..count])
}

/// Two targets that each receive an effect must not name the same object
fn ensure_distinct(a: &UnitsObjectId, b: &UnitsObjectId) -> Result<(), KernelError> {
    if a == b {
        return Err(KernelError::invalid_params(format!(
            "target {} named twice",
            a
        )));
    }
    Ok(())
}

fn token_data(object: &UnitsObject) -> Result<TokenData, KernelError> {
    TokenData::decode(object.data()).map_err(|e| {
        KernelError::invalid_params(format!("object {} is not a token: {}", object.id, e))
    })
}

fn balance_data(object: &UnitsObject) -> Result<BalanceData, KernelError> {
    BalanceData::decode(object.data()).map_err(|e| {
        KernelError::invalid_params(format!("object {} is not a balance: {}", object.id, e))
    })
}

fn decode_params<P: Payload>(ctx: &ExecutionContext) -> Result<P, KernelError> {
    P::decode(&ctx.instruction.params)
        .map_err(|e| KernelError::invalid_params(format!("params: {}", e)))
}

/// The balance must belong to the token it is operated on together with
fn ensure_linked(balance: &BalanceData, token_id: &UnitsObjectId) -> Result<(), KernelError> {
    if balance.token_id != *token_id {
        return Err(KernelError::invalid_params(format!(
            "balance of token {} used with token {}",
            balance.token_id, token_id
        )));
    }
    Ok(())
}

fn effect<P: Payload>(object_id: UnitsObjectId, payload: &P) -> Result<ObjectEffect, KernelError> {
    Ok(ObjectEffect::new(object_id, payload.encode()?))
}
