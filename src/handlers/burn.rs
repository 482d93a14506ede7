use log::debug;

use super::{balance_data, decode_params, effect, ensure_distinct, ensure_linked, targets, token_data};
use crate::arithmetic::checked_sub;
use crate::error::KernelError;
use crate::objects::{ExecutionContext, ObjectEffect};
use crate::payload::BurnParams;

/// Destroy units held by one balance and shrink the token's supply by the same amount.
///
/// Targets: `[token_id, balance_id]`, both present in the working set.
pub fn handle_burn(ctx: &ExecutionContext) -> Result<Vec<ObjectEffect>, KernelError> {
    let ids = targets(ctx, 2)?;
    ensure_distinct(&ids[0], &ids[1])?;

    let token = ctx.objects.require(&ids[0])?;
    let balance = ctx.objects.require(&ids[1])?;

    let params: BurnParams = decode_params(ctx)?;

    let mut token_state = token_data(token)?;
    let mut balance_state = balance_data(balance)?;
    ensure_linked(&balance_state, &token.id)?;

    if balance_state.amount < params.amount {
        return Err(KernelError::InsufficientBalance {
            available: balance_state.amount,
            requested: params.amount,
        });
    }
    // A balance larger than the supply means the token record is inconsistent
    if token_state.total_supply < params.amount {
        return Err(KernelError::invalid_params(format!(
            "burn of {} exceeds total supply {}",
            params.amount, token_state.total_supply
        )));
    }

    token_state.total_supply = checked_sub(token_state.total_supply, params.amount)?;
    balance_state.amount = checked_sub(balance_state.amount, params.amount)?;

    debug!(
        "burn {} of {} from {}, supply now {}",
        params.amount, token.id, balance.id, token_state.total_supply
    );

    Ok(vec![
        effect(token.id, &token_state)?,
        effect(balance.id, &balance_state)?,
    ])
}
