//! Typed views of object payloads and instruction params.
//!
//! Payloads are bincode with fixed-width little-endian integers. Decoding is
//! strict: trailing bytes, non-0/1 booleans, invalid UTF-8 and over-long
//! strings are all rejected instead of being reinterpreted.

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_DATA_SIZE, MAX_TOKEN_NAME_LEN, MAX_TOKEN_SYMBOL_LEN};
use crate::error::PayloadError;
use crate::id::UnitsObjectId;

fn payload_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(MAX_DATA_SIZE as u64)
}

/// A record carried in an object's `data` or an instruction's `params`
pub trait Payload: Serialize + DeserializeOwned {
    /// Field range checks beyond what the encoding itself guarantees
    fn validate(&self) -> Result<(), PayloadError> {
        Ok(())
    }

    fn decode(bytes: &[u8]) -> Result<Self, PayloadError> {
        let value: Self = payload_options().deserialize(bytes)?;
        value.validate()?;
        Ok(value)
    }

    fn encode(&self) -> Result<Vec<u8>, PayloadError> {
        self.validate()?;
        Ok(payload_options().serialize(self)?)
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), PayloadError> {
    if value.len() > max {
        return Err(PayloadError::FieldTooLong {
            field,
            len: value.len(),
            max,
        });
    }
    Ok(())
}

/// Payload of a token object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    pub total_supply: u64,
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
    pub is_frozen: bool,
}

impl Payload for TokenData {
    fn validate(&self) -> Result<(), PayloadError> {
        check_len("name", &self.name, MAX_TOKEN_NAME_LEN)?;
        check_len("symbol", &self.symbol, MAX_TOKEN_SYMBOL_LEN)
    }
}

/// Payload of a balance object: how much of `token_id` `owner_id` holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceData {
    pub token_id: UnitsObjectId,
    pub owner_id: UnitsObjectId,
    pub amount: u64,
}

impl Payload for BalanceData {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferParams {
    pub amount: u64,
}

impl Payload for TransferParams {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizeParams {
    pub initial_supply: u64,
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
}

impl Payload for TokenizeParams {
    fn validate(&self) -> Result<(), PayloadError> {
        check_len("name", &self.name, MAX_TOKEN_NAME_LEN)?;
        check_len("symbol", &self.symbol, MAX_TOKEN_SYMBOL_LEN)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintParams {
    pub amount: u64,
}

impl Payload for MintParams {}

/// Burn takes the same shape as mint
pub type BurnParams = MintParams;
