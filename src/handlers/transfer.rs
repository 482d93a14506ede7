use log::debug;

use super::{balance_data, decode_params, effect, ensure_distinct, ensure_linked, targets, token_data};
use crate::arithmetic::{checked_add, checked_sub};
use crate::error::KernelError;
use crate::objects::{ExecutionContext, ObjectEffect};
use crate::payload::TransferParams;

/// Move units between two balances of the same token.
///
/// Targets: `[token_id, from_balance_id, to_balance_id]`, all present in the
/// working set. The token must not be frozen.
pub fn handle_transfer(ctx: &ExecutionContext) -> Result<Vec<ObjectEffect>, KernelError> {
    let ids = targets(ctx, 3)?;
    ensure_distinct(&ids[1], &ids[2])?;

    let token = ctx.objects.require(&ids[0])?;
    let from = ctx.objects.require(&ids[1])?;
    let to = ctx.objects.require(&ids[2])?;

    let token_state = token_data(token)?;
    if token_state.is_frozen {
        return Err(KernelError::TokenFrozen(token.id));
    }

    let mut from_state = balance_data(from)?;
    let mut to_state = balance_data(to)?;
    ensure_linked(&from_state, &token.id)?;
    ensure_linked(&to_state, &token.id)?;

    let params: TransferParams = decode_params(ctx)?;

    if from_state.amount < params.amount {
        return Err(KernelError::InsufficientBalance {
            available: from_state.amount,
            requested: params.amount,
        });
    }

    to_state.amount = checked_add(to_state.amount, params.amount)?;
    from_state.amount = checked_sub(from_state.amount, params.amount)?;

    debug!(
        "transfer {} of {} from {} to {}",
        params.amount, token.id, from.id, to.id
    );

    Ok(vec![effect(from.id, &from_state)?, effect(to.id, &to_state)?])
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::id::UnitsObjectId;
    use crate::payload::BalanceData;

    fn transfer_ctx(frozen: bool, from: u64, to: u64, amount: u64) -> ExecutionContext {
        context(
            "transfer",
            vec![TOKEN, ALICE_BALANCE, BOB_BALANCE],
            &TransferParams { amount },
            vec![
                object(TOKEN, &token(from.saturating_add(to), frozen)),
                object(ALICE_BALANCE, &balance(ALICE, from)),
                object(BOB_BALANCE, &balance(BOB, to)),
            ],
        )
    }

    #[test]
    fn test_transfer_updates_balances() {
        let effects = handle_transfer(&transfer_ctx(false, 1000, 0, 300)).unwrap();

        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0].object_id, ALICE_BALANCE);
        assert_eq!(decode_balance(&effects[0]), balance(ALICE, 700));
        assert_eq!(effects[1].object_id, BOB_BALANCE);
        assert_eq!(decode_balance(&effects[1]), balance(BOB, 300));
    }

    #[test]
    fn test_transfer_conserves_total() {
        for (from, to, amount) in [(1000, 0, 1000), (5, 7, 0), (u64::MAX - 10, 10, 3), (9, 1, 9)] {
            let effects = handle_transfer(&transfer_ctx(false, from, to, amount)).unwrap();
            let from_after = decode_balance(&effects[0]).amount;
            let to_after = decode_balance(&effects[1]).amount;

            assert_eq!(from_after + amount, from);
            assert_eq!(to_after, to + amount);
            assert_eq!(from_after as u128 + to_after as u128, from as u128 + to as u128);
        }
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let err = handle_transfer(&transfer_ctx(false, 1000, 0, 1001)).unwrap_err();
        assert_eq!(err.code(), KernelError::INSUFFICIENT_BALANCE);
    }

    #[test]
    fn test_transfer_frozen_token_regardless_of_balances() {
        for (from, amount) in [(1000, 1), (0, 1), (1000, 5000)] {
            let err = handle_transfer(&transfer_ctx(true, from, 0, amount)).unwrap_err();
            assert_eq!(err, KernelError::TokenFrozen(TOKEN));
        }
    }

    #[test]
    fn test_transfer_overflow_on_receiver() {
        let err = handle_transfer(&transfer_ctx(false, 10, u64::MAX, 1)).unwrap_err();
        assert_eq!(err, KernelError::Overflow);
    }

    #[test]
    fn test_transfer_requires_three_targets() {
        let ctx = context(
            "transfer",
            vec![TOKEN, ALICE_BALANCE],
            &TransferParams { amount: 1 },
            vec![],
        );
        assert_eq!(handle_transfer(&ctx).unwrap_err().code(), KernelError::INVALID_PARAMS);
    }

    #[test]
    fn test_transfer_rejects_balance_of_other_token() {
        let other_token = UnitsObjectId::new([7; 32]);
        let stray = BalanceData {
            token_id: other_token,
            owner_id: BOB,
            amount: 0,
        };
        let ctx = context(
            "transfer",
            vec![TOKEN, ALICE_BALANCE, BOB_BALANCE],
            &TransferParams { amount: 1 },
            vec![
                object(TOKEN, &token(10, false)),
                object(ALICE_BALANCE, &balance(ALICE, 10)),
                object(BOB_BALANCE, &stray),
            ],
        );
        assert!(matches!(handle_transfer(&ctx), Err(KernelError::InvalidParams(_))));
    }

    #[test]
    fn test_transfer_to_self_rejected() {
        let ctx = context(
            "transfer",
            vec![TOKEN, ALICE_BALANCE, ALICE_BALANCE],
            &TransferParams { amount: 1 },
            vec![
                object(TOKEN, &token(10, false)),
                object(ALICE_BALANCE, &balance(ALICE, 10)),
            ],
        );
        assert!(matches!(handle_transfer(&ctx), Err(KernelError::InvalidParams(_))));
    }

    #[test]
    fn test_transfer_missing_receiver() {
        let ctx = context(
            "transfer",
            vec![TOKEN, ALICE_BALANCE, BOB_BALANCE],
            &TransferParams { amount: 1 },
            vec![
                object(TOKEN, &token(10, false)),
                object(ALICE_BALANCE, &balance(ALICE, 10)),
            ],
        );
        assert_eq!(handle_transfer(&ctx).unwrap_err().code(), KernelError::INVALID_PARAMS);
    }
}
