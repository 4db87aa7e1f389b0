use thiserror::Error;

use crate::config::ConfigError;
use crate::process::ProcessId;

/// Everything a manager operation can fail with.
///
/// All variants are recoverable: a failed operation leaves the manager
/// exactly as it was before the call, and the caller decides how to
/// present the failure. The core never prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("process {0} already exists")]
    DuplicateProcess(ProcessId),

    #[error("process size {size} bytes exceeds the maximum of {max} bytes")]
    SizeExceeded { size: usize, max: usize },

    #[error("insufficient memory: {needed} frames needed, {available} free")]
    InsufficientMemory { needed: usize, available: usize },

    #[error("process {0} not found")]
    ProcessNotFound(ProcessId),

    #[error("logical address {address} outside the address space 0..{size}")]
    AddressOutOfRange { address: usize, size: usize },
}
