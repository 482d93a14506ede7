//! Fixed ceilings of the kernel invocation protocol.

/// Size of every identifier on the wire
pub const OBJECT_ID_SIZE: usize = 32;

/// Width of the null-padded function name field
pub const FUNCTION_NAME_FIELD_SIZE: usize = 64;

/// Longest function name that fits the field with its terminating null
pub const MAX_FUNCTION_NAME_LEN: usize = FUNCTION_NAME_FIELD_SIZE - 1;

/// Most objects a working set may carry
pub const MAX_OBJECTS: usize = 32;

/// Most target identifiers an instruction may name
pub const MAX_TARGETS: usize = 32;

/// Largest object payload, instruction params or effect payload
pub const MAX_DATA_SIZE: usize = 65536;

/// Longest token name in bytes
pub const MAX_TOKEN_NAME_LEN: usize = 63;

/// Longest token symbol in bytes
pub const MAX_TOKEN_SYMBOL_LEN: usize = 15;

/// Module name the host registers the token kernel under
pub const TOKEN_MODULE_NAME: &str = "token";
