use log::debug;

use super::{decode_params, effect, ensure_distinct, targets};
use crate::error::KernelError;
use crate::objects::{ExecutionContext, ObjectEffect};
use crate::payload::{BalanceData, TokenData, TokenizeParams};

/// Create a token and credit its whole initial supply to the owner.
///
/// Targets: `[token_id, owner_id]`. Both identifiers are pre-allocated by the
/// host; neither needs to be present in the working set. The owner's balance
/// record is written to `owner_id` itself.
pub fn handle_tokenize(ctx: &ExecutionContext) -> Result<Vec<ObjectEffect>, KernelError> {
    let ids = targets(ctx, 2)?;
    let (token_id, owner_id) = (ids[0], ids[1]);

    let params: TokenizeParams = decode_params(ctx)?;
    ensure_distinct(&token_id, &owner_id)?;

    let token = TokenData {
        total_supply: params.initial_supply,
        decimals: params.decimals,
        name: params.name,
        symbol: params.symbol,
        is_frozen: false,
    };
    let balance = BalanceData {
        token_id,
        owner_id,
        amount: params.initial_supply,
    };

    debug!(
        "tokenize {} ({}) supply {} to {}",
        token_id, token.symbol, token.total_supply, owner_id
    );

    Ok(vec![effect(token_id, &token)?, effect(owner_id, &balance)?])
}
