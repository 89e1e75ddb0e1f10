// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error and status types for the simulator core.
//!
//! [`CpuError`] distinguishes host errors (misuse of the embedding API,
//! I/O failures) from architectural exceptions (conditions the target
//! program itself triggers, such as an unaligned load or an overflowing
//! `ADD`). Both collapse to a single [`StatusCode`] for callers that only
//! care about the FFI-style numeric result.

use thiserror::Error;

/// Errors reported back from the memory bus a [`crate::cpu::Cpu`] is
/// stepped against.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("address {address:#010x} is not mapped")]
    InvalidAddress { address: u32 },

    #[error("access at {address:#010x} with length {length} is misaligned")]
    Misaligned { address: u32, length: u8 },

    #[error("bus rejected access at {address:#010x}")]
    AccessViolation { address: u32 },
}

/// Everything [`crate::cpu::Cpu::step`] can fail with.
///
/// The `Host*` variants indicate the embedding caller did something the
/// API does not allow (an invalid handle, a bad argument); the rest are
/// architectural exceptions the simulated program itself raised and are
/// part of normal operation, not bugs in the host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CpuError {
    #[error("feature not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("invalid handle")]
    InvalidHandle,

    #[error("failed to read input: {0}")]
    FileReadError(String),

    #[error("failed to write output: {0}")]
    FileWriteError(String),

    #[error("BREAK instruction executed at {pc:#010x}")]
    Break { pc: u32 },

    #[error("invalid address at {pc:#010x}: {source}")]
    InvalidAddress { pc: u32, source: MemoryError },

    #[error("misaligned access at {pc:#010x}: {source}")]
    InvalidAlignment { pc: u32, source: MemoryError },

    #[error("access violation at {pc:#010x}: {source}")]
    AccessViolation { pc: u32, source: MemoryError },

    #[error("invalid instruction {word:#010x} at {pc:#010x}")]
    InvalidInstruction { pc: u32, word: u32 },

    #[error("arithmetic overflow at {pc:#010x}")]
    ArithmeticOverflow { pc: u32 },

    #[error("coprocessor {cop} unusable at {pc:#010x}")]
    CoprocessorUnusable { pc: u32, cop: u8 },

    #[error("SYSCALL executed at {pc:#010x}")]
    SystemCall { pc: u32 },
}

impl CpuError {
    /// Maps any error to the status-code taxonomy the embedding API
    /// exposes across the FFI boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CpuError::NotImplemented(_) => StatusCode::NotImplemented,
            CpuError::InvalidArgument(_) => StatusCode::InvalidArgument,
            CpuError::InvalidHandle => StatusCode::InvalidHandle,
            CpuError::FileReadError(_) => StatusCode::FileReadError,
            CpuError::FileWriteError(_) => StatusCode::FileWriteError,
            CpuError::Break { .. } => StatusCode::Break,
            CpuError::InvalidAddress { .. } => StatusCode::InvalidAddress,
            CpuError::InvalidAlignment { .. } => StatusCode::InvalidAlignment,
            CpuError::AccessViolation { .. } => StatusCode::AccessViolation,
            CpuError::InvalidInstruction { .. } => StatusCode::InvalidInstruction,
            CpuError::ArithmeticOverflow { .. } => StatusCode::ArithmeticOverflow,
            CpuError::CoprocessorUnusable { .. } => StatusCode::CoprocessorUnusable,
            CpuError::SystemCall { .. } => StatusCode::SystemCall,
        }
    }
}

/// The flat status taxonomy the C-style embedding API returns.
///
/// `Success` is `0`; negative values are reserved for host errors and
/// positive values for architectural exceptions, mirroring the way the
/// original handle-based API partitions its return codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Success = 0,
    NotImplemented = -1,
    InvalidArgument = -2,
    InvalidHandle = -3,
    FileReadError = -4,
    FileWriteError = -5,
    Break = 1,
    InvalidAddress = 2,
    InvalidAlignment = 3,
    AccessViolation = 4,
    InvalidInstruction = 5,
    ArithmeticOverflow = 6,
    CoprocessorUnusable = 7,
    SystemCall = 8,
}

pub type CpuResult<T> = Result<T, CpuError>;
