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

//! Shared memory-access helper used by every load and store instruction.
//!
//! Strict alignment (`align` equal to the access length) is enforced
//! here before the bus is ever touched, raising the architectural
//! `InvalidAlignment` exception directly. Callers that only need
//! byte-level addressing (`LB`/`SB`, and the `LWL`/`LWR`/`SWL`/`SWR`
//! family, which always transfer a 2-byte chunk at `align = 1`) pass
//! that through unchecked at this layer and instead rely on the widen
//! fallback below, so that a coarse-grained bus requiring 4-byte
//! accesses can still serve them.

use crate::bus::MemoryBus;
use crate::error::{CpuError, MemoryError};

fn map_error(pc: u32, strict: bool, err: MemoryError) -> CpuError {
    match err {
        MemoryError::Misaligned { .. } if strict => CpuError::InvalidAlignment { pc, source: err },
        MemoryError::InvalidAddress { .. } => CpuError::InvalidAddress { pc, source: err },
        MemoryError::AccessViolation { .. } => CpuError::AccessViolation { pc, source: err },
        MemoryError::Misaligned { .. } => CpuError::InvalidAlignment { pc, source: err },
    }
}

/// Reads `buf.len()` bytes from `address`, enforcing `align` up front
/// and falling back to a widened, 4-byte-aligned read-and-splice if the
/// bus itself reports misalignment on the direct access.
pub(crate) fn read(
    bus: &mut dyn MemoryBus,
    pc: u32,
    address: u32,
    buf: &mut [u8],
    align: u32,
) -> Result<(), CpuError> {
    let length = buf.len() as u32;
    if align > 1 && (address % align != 0 || length % align != 0) {
        return Err(CpuError::InvalidAlignment {
            pc,
            source: MemoryError::Misaligned {
                address,
                length: length as u8,
            },
        });
    }
    match bus.read(address, buf) {
        Ok(()) => Ok(()),
        Err(MemoryError::Misaligned { .. }) => widen_read(bus, pc, address, buf),
        Err(e) => Err(map_error(pc, false, e)),
    }
}

/// Writes `buf` to `address`, mirroring [`read`]'s alignment and widen
/// behavior via a read-modify-write against the backing bus.
pub(crate) fn write(
    bus: &mut dyn MemoryBus,
    pc: u32,
    address: u32,
    buf: &[u8],
    align: u32,
) -> Result<(), CpuError> {
    let length = buf.len() as u32;
    if align > 1 && (address % align != 0 || length % align != 0) {
        return Err(CpuError::InvalidAlignment {
            pc,
            source: MemoryError::Misaligned {
                address,
                length: length as u8,
            },
        });
    }
    match bus.write(address, buf) {
        Ok(()) => Ok(()),
        Err(MemoryError::Misaligned { .. }) => widen_write(bus, pc, address, buf),
        Err(e) => Err(map_error(pc, false, e)),
    }
}

/// Widens a misaligned sub-word access to an aligned span of up to 8
/// bytes, reads that span, and splices the requested bytes out of it.
fn widen_read(bus: &mut dyn MemoryBus, pc: u32, address: u32, buf: &mut [u8]) -> Result<(), CpuError> {
    let length = buf.len() as u32;
    let data_offset = address % 4;
    let new_addr = address - data_offset;
    let mut new_len = length + data_offset;
    if new_len % 4 != 0 {
        new_len += 4 - (new_len % 4);
    }
    if new_len > 8 {
        return Err(CpuError::InvalidAlignment {
            pc,
            source: MemoryError::Misaligned {
                address,
                length: length as u8,
            },
        });
    }
    let mut wide = [0u8; 8];
    bus.read(new_addr, &mut wide[..new_len as usize])
        .map_err(|e| map_error(pc, true, e))?;
    let start = data_offset as usize;
    buf.copy_from_slice(&wide[start..start + buf.len()]);
    Ok(())
}

/// Same widening as [`widen_read`], but reads the aligned span first,
/// splices `buf` into it, then writes the whole span back.
fn widen_write(bus: &mut dyn MemoryBus, pc: u32, address: u32, buf: &[u8]) -> Result<(), CpuError> {
    let length = buf.len() as u32;
    let data_offset = address % 4;
    let new_addr = address - data_offset;
    let mut new_len = length + data_offset;
    if new_len % 4 != 0 {
        new_len += 4 - (new_len % 4);
    }
    if new_len > 8 {
        return Err(CpuError::InvalidAlignment {
            pc,
            source: MemoryError::Misaligned {
                address,
                length: length as u8,
            },
        });
    }
    let mut wide = [0u8; 8];
    bus.read(new_addr, &mut wide[..new_len as usize])
        .map_err(|e| map_error(pc, true, e))?;
    let start = data_offset as usize;
    wide[start..start + buf.len()].copy_from_slice(buf);
    bus.write(new_addr, &wide[..new_len as usize])
        .map_err(|e| map_error(pc, true, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::VecBus;

    #[test]
    fn strict_alignment_rejects_before_touching_bus() {
        let mut bus = VecBus::new(0, 16);
        let mut buf = [0u8; 4];
        let err = read(&mut bus, 0, 3, &mut buf, 4).unwrap_err();
        assert!(matches!(err, CpuError::InvalidAlignment { .. }));
    }

    #[test]
    fn byte_access_round_trips_through_aligned_bus() {
        let mut bus = VecBus::new(0, 16);
        write(&mut bus, 0, 5, &[0x42], 1).unwrap();
        let mut buf = [0u8; 1];
        read(&mut bus, 0, 5, &mut buf, 1).unwrap();
        assert_eq!(buf[0], 0x42);
    }
}
