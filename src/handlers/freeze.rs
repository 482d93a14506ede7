use log::debug;

use super::{effect, targets, token_data};
use crate::error::KernelError;
use crate::objects::{ExecutionContext, ObjectEffect};

/// Disable transfers of a token. Targets: `[token_id]`.
pub fn handle_freeze(ctx: &ExecutionContext) -> Result<Vec<ObjectEffect>, KernelError> {
    set_frozen(ctx, true)
}

/// Re-enable transfers of a token. Targets: `[token_id]`.
pub fn handle_unfreeze(ctx: &ExecutionContext) -> Result<Vec<ObjectEffect>, KernelError> {
    set_frozen(ctx, false)
}

// Always emits the effect, even when the flag already has the requested value.
fn set_frozen(ctx: &ExecutionContext, frozen: bool) -> Result<Vec<ObjectEffect>, KernelError> {
    let ids = targets(ctx, 1)?;
    let token = ctx.objects.require(&ids[0])?;

    let mut token_state = token_data(token)?;
    token_state.is_frozen = frozen;

    debug!("token {} is_frozen = {}", token.id, frozen);

    Ok(vec![effect(token.id, &token_state)?])
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::objects::Instruction;
    use crate::working_set::WorkingSet;

    fn freeze_ctx(function: &str, frozen: bool) -> ExecutionContext {
        ExecutionContext::new(
            Instruction::new(CONTROLLER, function, vec![TOKEN], vec![]),
            WorkingSet::new(vec![object(TOKEN, &token(1000, frozen))]),
        )
    }

    #[test]
    fn test_freeze_and_unfreeze() {
        let effects = handle_freeze(&freeze_ctx("freeze", false)).unwrap();
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].object_id, TOKEN);
        assert_eq!(decode_token(&effects[0]), token(1000, true));

        let effects = handle_unfreeze(&freeze_ctx("unfreeze", true)).unwrap();
        assert_eq!(decode_token(&effects[0]), token(1000, false));
    }

    #[test]
    fn test_freeze_is_idempotent() {
        let effects = handle_freeze(&freeze_ctx("freeze", true)).unwrap();
        assert_eq!(effects.len(), 1);
        assert!(decode_token(&effects[0]).is_frozen);
    }

    #[test]
    fn test_freeze_requires_target_in_working_set() {
        let no_targets = ExecutionContext::new(
            Instruction::new(CONTROLLER, "freeze", vec![], vec![]),
            WorkingSet::new(vec![object(TOKEN, &token(1, false))]),
        );
        assert_eq!(handle_freeze(&no_targets).unwrap_err().code(), KernelError::INVALID_PARAMS);

        let missing = ExecutionContext::new(
            Instruction::new(CONTROLLER, "unfreeze", vec![TOKEN], vec![]),
            WorkingSet::default(),
        );
        assert_eq!(handle_unfreeze(&missing).unwrap_err().code(), KernelError::INVALID_PARAMS);
    }

    #[test]
    fn test_freeze_rejects_non_token_payload() {
        let ctx = ExecutionContext::new(
            Instruction::new(CONTROLLER, "freeze", vec![ALICE_BALANCE], vec![]),
            WorkingSet::new(vec![object(ALICE_BALANCE, &balance(ALICE, 5))]),
        );
        assert!(matches!(handle_freeze(&ctx), Err(KernelError::InvalidParams(_))));
    }
}
