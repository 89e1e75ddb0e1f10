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

//! The memory bus the core is stepped against.
//!
//! The bus is owned and implemented entirely by the embedder: the core
//! never allocates, frees, or otherwise owns the backing storage. A bus
//! declares which `(address, length)` pairs it supports; anything else
//! should fail with [`MemoryError`] rather than panic.

use crate::error::MemoryError;

/// An externally supplied, byte-addressable memory device.
///
/// Values are transferred as raw big-endian bytes; the core performs
/// any sign/zero extension itself. A bus is free to reject an access
/// (unmapped address, its own alignment requirements) by returning
/// [`MemoryError`] instead of panicking.
pub trait MemoryBus {
    /// Reads `buf.len()` bytes starting at `address` into `buf`.
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<(), MemoryError>;

    /// Writes `buf` to `address`.
    fn write(&mut self, address: u32, buf: &[u8]) -> Result<(), MemoryError>;
}

/// A minimal flat in-memory [`MemoryBus`], used by the test suite and
/// the `demos/harness` binary. Not part of the library's embedding
/// contract — a real embedder supplies its own bus implementation.
#[derive(Debug, Clone)]
pub struct VecBus {
    base: u32,
    data: Vec<u8>,
}

impl VecBus {
    /// Creates a bus of `size` bytes, mapped starting at `base`.
    pub fn new(base: u32, size: usize) -> Self {
        Self {
            base,
            data: vec![0u8; size],
        }
    }

    fn offset(&self, address: u32, len: usize) -> Result<usize, MemoryError> {
        let offset = address
            .checked_sub(self.base)
            .ok_or(MemoryError::InvalidAddress { address })? as usize;
        if offset.checked_add(len).is_none_or(|end| end > self.data.len()) {
            return Err(MemoryError::InvalidAddress { address });
        }
        Ok(offset)
    }
}

impl MemoryBus for VecBus {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<(), MemoryError> {
        let offset = self.offset(address, buf.len())?;
        buf.copy_from_slice(&self.data[offset..offset + buf.len()]);
        Ok(())
    }

    fn write(&mut self, address: u32, buf: &[u8]) -> Result<(), MemoryError> {
        let offset = self.offset(address, buf.len())?;
        self.data[offset..offset + buf.len()].copy_from_slice(buf);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_vec_bus() {
        let mut bus = VecBus::new(0, 16);
        bus.write(4, &[1, 2, 3, 4]).unwrap();
        let mut out = [0u8; 4];
        bus.read(4, &mut out).unwrap();
        assert_eq!(out, [1, 2, 3, 4]);
    }

    #[test]
    fn rejects_out_of_range_address() {
        let mut bus = VecBus::new(0, 16);
        let mut out = [0u8; 4];
        assert!(bus.read(13, &mut out).is_err());
        assert!(bus.read(100, &mut out).is_err());
    }
}
