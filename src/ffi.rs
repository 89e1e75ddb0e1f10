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

//! A C-compatible veneer over [`crate::cpu::Cpu`], for harnesses written
//! in C or any FFI-capable language.
//!
//! [`MipsCpuHandle`] is an opaque pointer the caller owns; every
//! function here is a thin `Result`-to-[`StatusCode`] translation over
//! the safe API. The memory bus a foreign caller supplies is wrapped in
//! [`FfiBus`], a vtable adapter over a `ctx` pointer plus `read`/`write`
//! C function pointers — there was no `mips_mem.h` in the retrieved
//! original source to mirror exactly, so this shape is this crate's own
//! resolution of that gap (see DESIGN.md).

use std::os::raw::{c_int, c_void};
use std::slice;

use crate::bus::MemoryBus;
use crate::cpu::{Coprocessor, Cpu};
use crate::error::{CpuResult, MemoryError, StatusCode};

/// Opaque handle returned by [`mips_cpu_create`].
pub struct MipsCpuHandle {
    cpu: Cpu,
}

/// C function-pointer signature for a foreign bus's read/write side.
/// Returns 0 on success, nonzero on failure (mapped to
/// [`MemoryError::AccessViolation`]).
pub type FfiBusFn =
    unsafe extern "C" fn(ctx: *mut c_void, address: u32, buf: *mut u8, len: usize) -> c_int;

/// Adapts a foreign bus (a `ctx` pointer plus two C function pointers)
/// to [`MemoryBus`]. The caller retains ownership of `ctx`; this struct
/// never frees it.
pub struct FfiBus {
    ctx: *mut c_void,
    read_fn: FfiBusFn,
    write_fn: FfiBusFn,
}

impl FfiBus {
    /// # Safety
    /// `ctx` must remain valid, and `read_fn`/`write_fn` must be safe to
    /// call with it, for the lifetime of this `FfiBus`.
    pub unsafe fn new(ctx: *mut c_void, read_fn: FfiBusFn, write_fn: FfiBusFn) -> Self {
        Self {
            ctx,
            read_fn,
            write_fn,
        }
    }
}

impl MemoryBus for FfiBus {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<(), MemoryError> {
        let status = unsafe { (self.read_fn)(self.ctx, address, buf.as_mut_ptr(), buf.len()) };
        if status == 0 {
            Ok(())
        } else {
            Err(MemoryError::AccessViolation { address })
        }
    }

    fn write(&mut self, address: u32, buf: &[u8]) -> Result<(), MemoryError> {
        let status =
            unsafe { (self.write_fn)(self.ctx, address, buf.as_ptr() as *mut u8, buf.len()) };
        if status == 0 {
            Ok(())
        } else {
            Err(MemoryError::AccessViolation { address })
        }
    }
}

fn status_of<T>(result: CpuResult<T>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::Success,
        Err(e) => e.status_code(),
    }
}

/// Allocates a new CPU in power-on state. Never returns null.
#[no_mangle]
pub extern "C" fn mips_cpu_create() -> *mut MipsCpuHandle {
    Box::into_raw(Box::new(MipsCpuHandle { cpu: Cpu::new() }))
}

/// Restores power-on state. `handle` must be non-null.
///
/// # Safety
/// `handle` must be a live pointer returned by [`mips_cpu_create`].
#[no_mangle]
pub unsafe extern "C" fn mips_cpu_reset(handle: *mut MipsCpuHandle) -> c_int {
    if handle.is_null() {
        return StatusCode::InvalidHandle as c_int;
    }
    (*handle).cpu.reset();
    StatusCode::Success as c_int
}

/// Steps one instruction against a foreign bus described by `ctx` and
/// the two C function pointers.
///
/// # Safety
/// `handle` must be a live pointer returned by [`mips_cpu_create`];
/// `ctx`, `read_fn`, and `write_fn` must satisfy [`FfiBus::new`]'s
/// contract for the duration of this call.
#[no_mangle]
pub unsafe extern "C" fn mips_cpu_step(
    handle: *mut MipsCpuHandle,
    ctx: *mut c_void,
    read_fn: FfiBusFn,
    write_fn: FfiBusFn,
) -> c_int {
    if handle.is_null() {
        return StatusCode::InvalidHandle as c_int;
    }
    let mut bus = FfiBus::new(ctx, read_fn, write_fn);
    let result = (*handle).cpu.step(&mut bus);
    status_of(result) as c_int
}

/// Writes register `index`'s value into `*out`.
///
/// # Safety
/// `handle` and `out` must be live, non-null pointers of their
/// respective types.
#[no_mangle]
pub unsafe extern "C" fn mips_cpu_get_register(
    handle: *const MipsCpuHandle,
    index: u32,
    out: *mut u32,
) -> c_int {
    if handle.is_null() || out.is_null() {
        return StatusCode::InvalidHandle as c_int;
    }
    match (*handle).cpu.get_register(index) {
        Ok(value) => {
            *out = value;
            StatusCode::Success as c_int
        }
        Err(e) => e.status_code() as c_int,
    }
}

/// # Safety
/// `handle` must be a live pointer returned by [`mips_cpu_create`].
#[no_mangle]
pub unsafe extern "C" fn mips_cpu_set_register(
    handle: *mut MipsCpuHandle,
    index: u32,
    value: u32,
) -> c_int {
    if handle.is_null() {
        return StatusCode::InvalidHandle as c_int;
    }
    status_of((*handle).cpu.set_register(index, value)) as c_int
}

/// # Safety
/// `handle` and `out` must be live, non-null pointers of their
/// respective types.
#[no_mangle]
pub unsafe extern "C" fn mips_cpu_get_pc(handle: *const MipsCpuHandle, out: *mut u32) -> c_int {
    if handle.is_null() || out.is_null() {
        return StatusCode::InvalidHandle as c_int;
    }
    *out = (*handle).cpu.pc();
    StatusCode::Success as c_int
}

/// # Safety
/// `handle` must be a live pointer returned by [`mips_cpu_create`].
#[no_mangle]
pub unsafe extern "C" fn mips_cpu_set_pc(handle: *mut MipsCpuHandle, pc: u32) -> c_int {
    if handle.is_null() {
        return StatusCode::InvalidHandle as c_int;
    }
    (*handle).cpu.set_pc(pc);
    StatusCode::Success as c_int
}

/// Installs the debug verbosity (0 silent .. 3 full trace) and a byte
/// sink callback. Passing a null `sink` falls back to stdout. The core
/// never closes `sink`'s backing resource; the caller retains that
/// responsibility exactly as it would for any `FILE*` it opened itself.
///
/// # Safety
/// `handle` must be a live pointer returned by [`mips_cpu_create`];
/// `sink`, if non-null, must remain safe to call with the given `ctx`
/// for as long as it stays installed.
#[no_mangle]
pub unsafe extern "C" fn mips_cpu_set_debug_level(
    handle: *mut MipsCpuHandle,
    level: u8,
    ctx: *mut c_void,
    sink: Option<unsafe extern "C" fn(ctx: *mut c_void, buf: *const u8, len: usize)>,
) -> c_int {
    if handle.is_null() {
        return StatusCode::InvalidHandle as c_int;
    }
    let cpu = &mut (*handle).cpu;
    match sink {
        Some(sink) => {
            let ctx_addr = ctx as usize;
            cpu.set_debug_handler(Box::new(move |bytes: &[u8]| {
                sink(ctx_addr as *mut c_void, bytes.as_ptr(), bytes.len());
            }));
            cpu.set_debug_level(level, None);
        }
        None => cpu.set_debug_level(level, None),
    }
    StatusCode::Success as c_int
}

/// Installs coprocessor slot `index` (0-3) as a bare `op` hook that
/// always reports `NotImplemented` for `load_word`/`store_word`; a
/// foreign caller wanting full `LWCz`/`SWCz` support should instead
/// link against the safe API and install a [`Coprocessor`] directly.
///
/// # Safety
/// `handle` must be a live pointer returned by [`mips_cpu_create`].
#[no_mangle]
pub unsafe extern "C" fn mips_cpu_set_coprocessor(
    handle: *mut MipsCpuHandle,
    index: u32,
    ctx: *mut c_void,
    op_fn: unsafe extern "C" fn(ctx: *mut c_void, instruction: u32) -> c_int,
) -> c_int {
    if handle.is_null() {
        return StatusCode::InvalidHandle as c_int;
    }
    let ctx_addr = ctx as usize;
    let coprocessor = Coprocessor {
        op: Box::new(move |_cpu, instr| {
            let status = unsafe { op_fn(ctx_addr as *mut c_void, instr) };
            if status == 0 {
                Ok(())
            } else {
                Err(crate::error::CpuError::NotImplemented("ffi coprocessor op"))
            }
        }),
        load_word: Box::new(|_, _, _| Err(crate::error::CpuError::NotImplemented("ffi load_word"))),
        store_word: Box::new(|_, _| Err(crate::error::CpuError::NotImplemented("ffi store_word"))),
    };
    status_of((*handle).cpu.set_coprocessor(index, coprocessor)) as c_int
}

/// Releases a handle created by [`mips_cpu_create`]. Passing null is a
/// no-op; passing an already-freed handle is undefined behavior, the
/// same contract every C-style `destroy` function carries.
///
/// # Safety
/// `handle` must either be null or a pointer previously returned by
/// [`mips_cpu_create`] and not yet freed.
#[no_mangle]
pub unsafe extern "C" fn mips_cpu_free(handle: *mut MipsCpuHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// Helper retained for foreign callers that hand this crate a raw
/// pointer/length pair instead of a Rust slice; not part of the
/// `#[no_mangle]` surface.
#[allow(dead_code)]
unsafe fn slice_from_raw(buf: *mut u8, len: usize) -> &'static mut [u8] {
    slice::from_raw_parts_mut(buf, len)
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe extern "C" fn always_ok(_ctx: *mut c_void, _addr: u32, _buf: *mut u8, _len: usize) -> c_int {
        0
    }

    #[test]
    fn create_and_free_round_trips() {
        let handle = mips_cpu_create();
        assert!(!handle.is_null());
        unsafe {
            let mut out = 0u32;
            assert_eq!(mips_cpu_get_pc(handle, &mut out), StatusCode::Success as c_int);
            assert_eq!(out, 0);
            mips_cpu_free(handle);
        }
    }

    #[test]
    fn step_over_ffi_bus_advances_pc() {
        unsafe {
            let handle = mips_cpu_create();
            let status = mips_cpu_step(handle, std::ptr::null_mut(), always_ok, always_ok);
            assert_eq!(status, StatusCode::Success as c_int);
            let mut pc = 0u32;
            mips_cpu_get_pc(handle, &mut pc);
            assert_eq!(pc, 4);
            mips_cpu_free(handle);
        }
    }

    #[test]
    fn null_handle_reports_invalid_handle() {
        unsafe {
            let mut out = 0u32;
            assert_eq!(
                mips_cpu_get_pc(std::ptr::null(), &mut out),
                StatusCode::InvalidHandle as c_int
            );
        }
    }
}
