use crate::id::UnitsObjectId;
use crate::working_set::WorkingSet;
use serde::{Deserialize, Serialize};

/// An object as the host storage layer hands it to the kernel.
///
/// `data` is opaque here; the operation that reads it decides whether it is a
/// token record or a balance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitsObject {
    /// Unique identifier for this object
    pub id: UnitsObjectId,

    /// The identifier authorized to operate on this object (enforced by the host)
    pub controller_id: UnitsObjectId,

    /// Payload, at most `MAX_DATA_SIZE` bytes
    pub data: Vec<u8>,
}

impl UnitsObject {
    pub fn new(id: UnitsObjectId, controller_id: UnitsObjectId, data: Vec<u8>) -> Self {
        Self {
            id,
            controller_id,
            data,
        }
    }

    /// Get the payload
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// The single operation requested of one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Controller on whose behalf the host invokes the kernel
    pub controller_id: UnitsObjectId,

    /// Operation name, at most 63 bytes
    pub function_name: String,

    /// Ordered object identifiers the operation works on
    pub target_objects: Vec<UnitsObjectId>,

    /// Operation parameters, interpreted by the selected handler
    pub params: Vec<u8>,
}

impl Instruction {
    pub fn new(
        controller_id: UnitsObjectId,
        function_name: impl Into<String>,
        target_objects: Vec<UnitsObjectId>,
        params: Vec<u8>,
    ) -> Self {
        Self {
            controller_id,
            function_name: function_name.into(),
            target_objects,
            params,
        }
    }
}

/// Replacement payload for one object. Objects without an effect are unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectEffect {
    pub object_id: UnitsObjectId,
    pub new_data: Vec<u8>,
}

impl ObjectEffect {
    pub fn new(object_id: UnitsObjectId, new_data: Vec<u8>) -> Self {
        Self {
            object_id,
            new_data,
        }
    }
}

/// Everything one invocation reads: the instruction and its working set.
/// Built once by the decoder and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    pub instruction: Instruction,
    pub objects: WorkingSet,
}

impl ExecutionContext {
    pub fn new(instruction: Instruction, objects: WorkingSet) -> Self {
        Self {
            instruction,
            objects,
        }
    }
}
