use std::collections::{HashMap, HashSet};
use std::io::Cursor;

use log::debug;

use crate::config::WireLimits;
use crate::dispatch::{KernelModule, TokenModule};
use crate::driver::{run_invocation, Status};
use crate::error::WireError;
use crate::id::UnitsObjectId;
use crate::objects::{ExecutionContext, Instruction, ObjectEffect, UnitsObject};
use crate::payload::{BalanceData, Payload, TokenData};
use crate::wire::{read_effects, write_context};
use crate::working_set::WorkingSet;

/// Outcome of one invocation as the host recorded it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationReceipt {
    pub function_name: String,
    pub status: Status,
    /// Effects applied to the store; empty unless `status` is `Success`
    pub effects: Vec<ObjectEffect>,
}

/// In-memory host for testing kernel modules end to end.
///
/// Plays the host side of the protocol: assembles the working set, speaks the
/// byte-stream format to the module and applies effects only on success.
/// Authorization is assumed; every instruction is treated as permitted.
pub struct MockHost<M: KernelModule = TokenModule> {
    module: M,
    limits: WireLimits,
    /// Committed objects by their ID
    objects: HashMap<UnitsObjectId, UnitsObject>,
    /// Receipts in invocation order
    receipts: Vec<InvocationReceipt>,
}

impl MockHost<TokenModule> {
    /// Create a host running the token module with default limits
    pub fn new() -> Self {
        Self::with_module(TokenModule, WireLimits::default())
    }
}

impl Default for MockHost<TokenModule> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: KernelModule> MockHost<M> {
    pub fn with_module(module: M, limits: WireLimits) -> Self {
        Self {
            module,
            limits,
            objects: HashMap::new(),
            receipts: Vec::new(),
        }
    }

    pub fn add_object(&mut self, object: UnitsObject) {
        self.objects.insert(object.id, object);
    }

    pub fn get_object(&self, id: &UnitsObjectId) -> Option<&UnitsObject> {
        self.objects.get(id)
    }

    /// Decode a stored object as a token record
    pub fn token(&self, id: &UnitsObjectId) -> Option<TokenData> {
        self.objects.get(id).and_then(|o| TokenData::decode(&o.data).ok())
    }

    /// Decode a stored object as a balance record
    pub fn balance(&self, id: &UnitsObjectId) -> Option<BalanceData> {
        self.objects.get(id).and_then(|o| BalanceData::decode(&o.data).ok())
    }

    pub fn receipts(&self) -> &[InvocationReceipt] {
        &self.receipts
    }

    /// The stored objects named by the instruction's targets, each at most once.
    /// Targets not yet stored are left out; the module decides whether that matters.
    pub fn working_set_for(&self, instruction: &Instruction) -> WorkingSet {
        let mut seen = HashSet::new();
        instruction
            .target_objects
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| self.objects.get(id).cloned())
            .collect()
    }

    /// Run one instruction through the module and commit its effects on success
    pub fn invoke(&mut self, instruction: Instruction) -> Result<InvocationReceipt, WireError> {
        let working_set = self.working_set_for(&instruction);
        let ctx = ExecutionContext::new(instruction, working_set);

        let mut input = Vec::new();
        write_context(&mut input, &ctx, &self.limits)?;

        let mut output = Vec::new();
        let status = run_invocation(&self.module, &self.limits, &mut Cursor::new(input), &mut output);

        let effects = if status.is_success() {
            let effects = read_effects(&mut Cursor::new(output), &self.limits)?;
            self.apply(&ctx.instruction.controller_id, &effects);
            effects
        } else {
            Vec::new()
        };

        let receipt = InvocationReceipt {
            function_name: ctx.instruction.function_name,
            status,
            effects,
        };
        self.receipts.push(receipt.clone());
        Ok(receipt)
    }

    // Only called with a fully decoded effect list
    fn apply(&mut self, controller_id: &UnitsObjectId, effects: &[ObjectEffect]) {
        for effect in effects {
            debug!("applying effect to {}", effect.object_id);
            match self.objects.get_mut(&effect.object_id) {
                Some(object) => object.data = effect.new_data.clone(),
                None => {
                    let object = UnitsObject::new(effect.object_id, *controller_id, effect.new_data.clone());
                    self.objects.insert(effect.object_id, object);
                }
            }
        }
    }
}
