//! Byte-stream codec between the host and the kernel.
//!
//! Input: the instruction followed by the working set. Output: the effect list.
//! All integers are u32 in host byte order; the format never leaves the host
//! machine. Every count and length is checked against [`WireLimits`] before
//! anything is allocated for it.

use std::io::{self, Read, Write};

use crate::config::WireLimits;
use crate::constants::{FUNCTION_NAME_FIELD_SIZE, MAX_FUNCTION_NAME_LEN, OBJECT_ID_SIZE};
use crate::error::WireError;
use crate::id::UnitsObjectId;
use crate::objects::{ExecutionContext, Instruction, ObjectEffect, UnitsObject};
use crate::working_set::WorkingSet;

fn read_bytes<R: Read>(reader: &mut R, buf: &mut [u8], what: &'static str) -> Result<(), WireError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => WireError::ShortRead(what),
        _ => WireError::Io(e),
    })
}

fn read_u32<R: Read>(reader: &mut R, what: &'static str) -> Result<u32, WireError> {
    let mut buf = [0u8; 4];
    read_bytes(reader, &mut buf, what)?;
    Ok(u32::from_ne_bytes(buf))
}

fn read_id<R: Read>(reader: &mut R, what: &'static str) -> Result<UnitsObjectId, WireError> {
    let mut buf = [0u8; OBJECT_ID_SIZE];
    read_bytes(reader, &mut buf, what)?;
    Ok(UnitsObjectId::new(buf))
}

/// Read a count and check it before the caller allocates for it
fn read_count<R: Read>(reader: &mut R, what: &'static str, limit: usize) -> Result<usize, WireError> {
    let value = read_u32(reader, what)? as usize;
    check_limit(what, value, limit)?;
    Ok(value)
}

fn read_blob<R: Read>(reader: &mut R, what: &'static str, limit: usize) -> Result<Vec<u8>, WireError> {
    let len = read_count(reader, what, limit)?;
    let mut data = vec![0u8; len];
    read_bytes(reader, &mut data, what)?;
    Ok(data)
}

fn check_limit(field: &'static str, value: usize, limit: usize) -> Result<(), WireError> {
    if value > limit {
        return Err(WireError::CapacityExceeded { field, value, limit });
    }
    Ok(())
}

fn read_function_name<R: Read>(reader: &mut R) -> Result<String, WireError> {
    let mut field = [0u8; FUNCTION_NAME_FIELD_SIZE];
    read_bytes(reader, &mut field, "function_name")?;

    let end = field.iter().position(|&b| b == 0).ok_or_else(|| {
        WireError::MalformedFunctionName("no null terminator in 64-byte field".to_string())
    })?;
    // Invalid UTF-8 becomes U+FFFD, which no operation name contains
    Ok(String::from_utf8_lossy(&field[..end]).into_owned())
}

/// Decode an instruction and its working set from the input stream
pub fn read_context<R: Read>(reader: &mut R, limits: &WireLimits) -> Result<ExecutionContext, WireError> {
    let controller_id = read_id(reader, "controller_id")?;
    let function_name = read_function_name(reader)?;

    let num_targets = read_count(reader, "num_targets", limits.max_targets)?;
    let mut target_objects = Vec::with_capacity(num_targets);
    for _ in 0..num_targets {
        target_objects.push(read_id(reader, "target_id")?);
    }

    let params = read_blob(reader, "params_len", limits.max_data_size)?;

    let num_objects = read_count(reader, "num_working_objects", limits.max_objects)?;
    let mut objects = Vec::with_capacity(num_objects);
    for _ in 0..num_objects {
        let id = read_id(reader, "object_id")?;
        let object_controller = read_id(reader, "object_controller_id")?;
        let data = read_blob(reader, "data_len", limits.max_data_size)?;
        objects.push(UnitsObject::new(id, object_controller, data));
    }

    let instruction = Instruction {
        controller_id,
        function_name,
        target_objects,
        params,
    };
    Ok(ExecutionContext::new(instruction, WorkingSet::new(objects)))
}

fn write_u32<W: Write>(writer: &mut W, value: usize, field: &'static str) -> Result<(), WireError> {
    let value = u32::try_from(value).map_err(|_| WireError::CapacityExceeded {
        field,
        value,
        limit: u32::MAX as usize,
    })?;
    writer.write_all(&value.to_ne_bytes())?;
    Ok(())
}

fn write_blob<W: Write>(
    writer: &mut W,
    data: &[u8],
    field: &'static str,
    limit: usize,
) -> Result<(), WireError> {
    check_limit(field, data.len(), limit)?;
    write_u32(writer, data.len(), field)?;
    writer.write_all(data)?;
    Ok(())
}

/// Encode an instruction and working set in the input layout. Used by hosts and tests.
pub fn write_context<W: Write>(
    writer: &mut W,
    ctx: &ExecutionContext,
    limits: &WireLimits,
) -> Result<(), WireError> {
    let instruction = &ctx.instruction;
    let name = instruction.function_name.as_bytes();
    if name.len() > MAX_FUNCTION_NAME_LEN || name.contains(&0) {
        return Err(WireError::MalformedFunctionName(instruction.function_name.clone()));
    }
    check_limit("num_targets", instruction.target_objects.len(), limits.max_targets)?;
    check_limit("num_working_objects", ctx.objects.len(), limits.max_objects)?;

    writer.write_all(instruction.controller_id.bytes())?;
    let mut field = [0u8; FUNCTION_NAME_FIELD_SIZE];
    field[..name.len()].copy_from_slice(name);
    writer.write_all(&field)?;

    write_u32(writer, instruction.target_objects.len(), "num_targets")?;
    for target in &instruction.target_objects {
        writer.write_all(target.bytes())?;
    }
    write_blob(writer, &instruction.params, "params_len", limits.max_data_size)?;

    write_u32(writer, ctx.objects.len(), "num_working_objects")?;
    for object in ctx.objects.iter() {
        writer.write_all(object.id.bytes())?;
        writer.write_all(object.controller_id.bytes())?;
        write_blob(writer, &object.data, "data_len", limits.max_data_size)?;
    }
    Ok(())
}

/// Encode the effect list into a buffer so it can be emitted in a single write
pub fn encode_effects(effects: &[ObjectEffect], limits: &WireLimits) -> Result<Vec<u8>, WireError> {
    let mut buf = Vec::new();
    write_u32(&mut buf, effects.len(), "effect_count")?;
    for effect in effects {
        buf.extend_from_slice(effect.object_id.bytes());
        write_blob(&mut buf, &effect.new_data, "data_len", limits.max_data_size)?;
    }
    Ok(buf)
}

/// Write the effect list to the output stream and flush it
pub fn write_effects<W: Write>(
    writer: &mut W,
    effects: &[ObjectEffect],
    limits: &WireLimits,
) -> Result<(), WireError> {
    let buf = encode_effects(effects, limits)?;
    writer.write_all(&buf)?;
    writer.flush()?;
    Ok(())
}

/// Decode an effect list from the output stream. Used by hosts and tests.
pub fn read_effects<R: Read>(reader: &mut R, limits: &WireLimits) -> Result<Vec<ObjectEffect>, WireError> {
    let count = read_count(reader, "effect_count", limits.max_objects)?;
    let mut effects = Vec::with_capacity(count);
    for _ in 0..count {
        let object_id = read_id(reader, "effect_object_id")?;
        let new_data = read_blob(reader, "data_len", limits.max_data_size)?;
        effects.push(ObjectEffect::new(object_id, new_data));
    }
    Ok(effects)
}
