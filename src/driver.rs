//! One kernel invocation over byte streams: decode once, dispatch once,
//! encode once, report a status.

use log::{error, info, warn};
use std::io::{Read, Write};

use crate::config::WireLimits;
use crate::dispatch::KernelModule;
use crate::error::KernelError;
use crate::objects::ObjectEffect;
use crate::wire::{read_context, write_effects};

/// Process exit status of an invocation
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success = 0,
    InvalidFunction = KernelError::INVALID_FUNCTION,
    InvalidParams = KernelError::INVALID_PARAMS,
    InsufficientBalance = KernelError::INSUFFICIENT_BALANCE,
    Unauthorized = KernelError::UNAUTHORIZED,
    TokenFrozen = KernelError::TOKEN_FROZEN,
    Overflow = KernelError::OVERFLOW,
    /// The effect list could not be written; nothing on the output stream is valid
    OutputFailed = -9,
}

impl Status {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

impl From<&KernelError> for Status {
    fn from(err: &KernelError) -> Self {
        match err {
            KernelError::InvalidFunction(_) => Status::InvalidFunction,
            KernelError::InvalidParams(_) => Status::InvalidParams,
            KernelError::InsufficientBalance { .. } => Status::InsufficientBalance,
            KernelError::Unauthorized => Status::Unauthorized,
            KernelError::TokenFrozen(_) => Status::TokenFrozen,
            KernelError::Overflow => Status::Overflow,
        }
    }
}

/// Run one invocation of `module` reading the context from `input` and
/// writing the effect list to `output`.
///
/// On any rejection, decode failures included, an empty effect list is written
/// and the matching status returned. The host must only apply the written
/// effects when the status is `Success`.
pub fn run_invocation<M, R, W>(module: &M, limits: &WireLimits, input: &mut R, output: &mut W) -> Status
where
    M: KernelModule + ?Sized,
    R: Read,
    W: Write,
{
    let outcome = match read_context(input, limits) {
        Ok(ctx) => {
            let result = module.execute(&ctx);
            match &result {
                Ok(effects) => info!(
                    "{}::{} produced {} effects",
                    module.name(),
                    ctx.instruction.function_name,
                    effects.len()
                ),
                Err(err) => warn!(
                    "{}::{} rejected: {}",
                    module.name(),
                    ctx.instruction.function_name,
                    err
                ),
            }
            result
        }
        Err(err) => {
            warn!("{}: failed to decode invocation context: {}", module.name(), err);
            Err(KernelError::from(err))
        }
    };

    let (status, effects): (Status, Vec<ObjectEffect>) = match outcome {
        Ok(effects) => (Status::Success, effects),
        Err(err) => (Status::from(&err), Vec::new()),
    };

    match write_effects(output, &effects, limits) {
        Ok(()) => status,
        Err(err) => {
            error!("{}: failed to write effects: {}", module.name(), err);
            Status::OutputFailed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::TokenModule;
    use crate::id::UnitsObjectId;
    use crate::objects::{ExecutionContext, Instruction, UnitsObject};
    use crate::payload::{BalanceData, MintParams, Payload, TokenData, TransferParams};
    use crate::wire::{read_effects, write_context};
    use crate::working_set::WorkingSet;
    use std::io::{self, Cursor};

    const TOKEN: UnitsObjectId = UnitsObjectId::new([1; 32]);
    const FROM: UnitsObjectId = UnitsObjectId::new([2; 32]);
    const TO: UnitsObjectId = UnitsObjectId::new([3; 32]);
    const CONTROLLER: UnitsObjectId = UnitsObjectId::new([4; 32]);

    fn token_object(frozen: bool) -> UnitsObject {
        let data = TokenData {
            total_supply: 1000,
            decimals: 2,
            name: "Coin".to_string(),
            symbol: "CN".to_string(),
            is_frozen: frozen,
        };
        UnitsObject::new(TOKEN, CONTROLLER, data.encode().unwrap())
    }

    fn balance_object(id: UnitsObjectId, amount: u64) -> UnitsObject {
        let data = BalanceData {
            token_id: TOKEN,
            owner_id: id,
            amount,
        };
        UnitsObject::new(id, CONTROLLER, data.encode().unwrap())
    }

    fn invoke(ctx: &ExecutionContext) -> (Status, Vec<ObjectEffect>, Vec<u8>) {
        let limits = WireLimits::default();
        let mut input = Vec::new();
        write_context(&mut input, ctx, &limits).unwrap();

        let mut output = Vec::new();
        let status = run_invocation(&TokenModule, &limits, &mut Cursor::new(input), &mut output);
        let effects = read_effects(&mut Cursor::new(output.clone()), &limits).unwrap();
        (status, effects, output)
    }

    fn transfer(amount: u64, frozen: bool) -> ExecutionContext {
        ExecutionContext::new(
            Instruction::new(
                CONTROLLER,
                "transfer",
                vec![TOKEN, FROM, TO],
                TransferParams { amount }.encode().unwrap(),
            ),
            WorkingSet::new(vec![
                token_object(frozen),
                balance_object(FROM, 1000),
                balance_object(TO, 0),
            ]),
        )
    }

    #[test]
    fn test_transfer_success_stream() {
        let (status, effects, _) = invoke(&transfer(300, false));

        assert_eq!(status, Status::Success);
        assert_eq!(effects.len(), 2);
        assert_eq!(BalanceData::decode(&effects[0].new_data).unwrap().amount, 700);
        assert_eq!(BalanceData::decode(&effects[1].new_data).unwrap().amount, 300);
    }

    #[test]
    fn test_insufficient_balance_writes_empty_list() {
        let (status, effects, output) = invoke(&transfer(1001, false));

        assert_eq!(status.code(), -3);
        assert!(effects.is_empty());
        assert_eq!(output, 0u32.to_ne_bytes().to_vec());
    }

    #[test]
    fn test_frozen_token_status() {
        let (status, effects, _) = invoke(&transfer(1, true));
        assert_eq!(status.code(), -5);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_mint_overflow_status() {
        let ctx = ExecutionContext::new(
            Instruction::new(
                CONTROLLER,
                "mint",
                vec![TOKEN, FROM],
                MintParams { amount: u64::MAX }.encode().unwrap(),
            ),
            WorkingSet::new(vec![token_object(false), balance_object(FROM, 1)]),
        );
        let (status, effects, _) = invoke(&ctx);
        assert_eq!(status.code(), -6);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_unknown_function_status() {
        let mut ctx = transfer(1, false);
        ctx.instruction.function_name = "steal".to_string();
        let (status, effects, output) = invoke(&ctx);

        assert_eq!(status, Status::InvalidFunction);
        assert_eq!(status.code(), -1);
        assert!(effects.is_empty());
        assert_eq!(output.len(), 4);
    }

    #[test]
    fn test_non_utf8_function_name_is_invalid_function() {
        let limits = WireLimits::default();
        let mut input = Vec::new();
        write_context(&mut input, &transfer(300, false), &limits).unwrap();
        input[32..96].fill(0);
        input[32..41].copy_from_slice(b"tr\xffansfer");

        let mut output = Vec::new();
        let status = run_invocation(&TokenModule, &limits, &mut Cursor::new(input), &mut output);

        assert_eq!(status.code(), -1);
        assert_eq!(output, 0u32.to_ne_bytes().to_vec());
    }

    #[test]
    fn test_truncated_input_is_invalid_params() {
        let limits = WireLimits::default();
        let mut input = Vec::new();
        write_context(&mut input, &transfer(1, false), &limits).unwrap();
        input.truncate(input.len() - 1);

        let mut output = Vec::new();
        let status = run_invocation(&TokenModule, &limits, &mut Cursor::new(input), &mut output);

        assert_eq!(status, Status::InvalidParams);
        assert_eq!(output, 0u32.to_ne_bytes().to_vec());
    }

    #[test]
    fn test_empty_input_is_invalid_params() {
        let mut output = Vec::new();
        let status = run_invocation(
            &TokenModule,
            &WireLimits::default(),
            &mut Cursor::new(Vec::new()),
            &mut output,
        );
        assert_eq!(status.code(), -2);
        assert_eq!(output.len(), 4);
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "host went away"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_output_failure_is_fatal() {
        let limits = WireLimits::default();
        let mut input = Vec::new();
        write_context(&mut input, &transfer(300, false), &limits).unwrap();

        let status = run_invocation(&TokenModule, &limits, &mut Cursor::new(input), &mut ClosedPipe);
        assert_eq!(status, Status::OutputFailed);
        assert!(!status.is_success());
    }

    #[test]
    fn test_status_codes() {
        let expected = [
            (Status::Success, 0),
            (Status::InvalidFunction, -1),
            (Status::InvalidParams, -2),
            (Status::InsufficientBalance, -3),
            (Status::Unauthorized, -4),
            (Status::TokenFrozen, -5),
            (Status::Overflow, -6),
            (Status::OutputFailed, -9),
        ];
        for (status, code) in expected {
            assert_eq!(status.code(), code);
        }
        assert_eq!(Status::from(&KernelError::Unauthorized), Status::Unauthorized);
        assert_eq!(Status::from(&KernelError::Overflow).code(), KernelError::Overflow.code());
    }
}
