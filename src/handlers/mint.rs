use log::debug;

use super::{balance_data, decode_params, effect, ensure_distinct, ensure_linked, targets, token_data};
use crate::arithmetic::checked_add;
use crate::error::KernelError;
use crate::objects::{ExecutionContext, ObjectEffect};
use crate::payload::MintParams;

/// Increase a token's supply and credit the new units to one balance.
///
/// Targets: `[token_id, balance_id]`, both present in the working set.
pub fn handle_mint(ctx: &ExecutionContext) -> Result<Vec<ObjectEffect>, KernelError> {
    let ids = targets(ctx, 2)?;
    ensure_distinct(&ids[0], &ids[1])?;

    let token = ctx.objects.require(&ids[0])?;
    let balance = ctx.objects.require(&ids[1])?;

    let params: MintParams = decode_params(ctx)?;

    let mut token_state = token_data(token)?;
    let mut balance_state = balance_data(balance)?;
    ensure_linked(&balance_state, &token.id)?;

    token_state.total_supply = checked_add(token_state.total_supply, params.amount)?;
    balance_state.amount = checked_add(balance_state.amount, params.amount)?;

    debug!(
        "mint {} of {} into {}, supply now {}",
        params.amount, token.id, balance.id, token_state.total_supply
    );

    Ok(vec![
        effect(token.id, &token_state)?,
        effect(balance.id, &balance_state)?,
    ])
}
