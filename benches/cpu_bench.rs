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

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mips_core::bus::VecBus;
use mips_core::cpu::Cpu;

fn cpu_step_benchmark(c: &mut Criterion) {
    c.bench_function("cpu_step", |b| {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 16);

        // NOP = 0x00000000 (SLL r0, r0, 0)
        bus.write(0, &0x0000_0000u32.to_be_bytes()).unwrap();

        b.iter(|| {
            cpu.reset();
            black_box(cpu.step(&mut bus).unwrap());
        });
    });
}

fn cpu_arithmetic_stream_benchmark(c: &mut Criterion) {
    c.bench_function("cpu_addiu_stream", |b| {
        let mut cpu = Cpu::new();
        let mut bus = VecBus::new(0, 4096);

        // ADDIU $1, $1, 1, repeated, looping back to the start.
        let instr: u32 = (0x09 << 26) | (1 << 21) | (1 << 16) | 1;
        for i in 0..256u32 {
            bus.write(i * 4, &instr.to_be_bytes()).unwrap();
        }

        b.iter(|| {
            cpu.reset();
            for _ in 0..256 {
                black_box(cpu.step(&mut bus).unwrap());
            }
        });
    });
}

fn cpu_register_access_benchmark(c: &mut Criterion) {
    c.bench_function("cpu_register_read", |b| {
        let cpu = Cpu::new();
        b.iter(|| {
            for i in 0..32u8 {
                black_box(cpu.reg(i));
            }
        });
    });

    c.bench_function("cpu_register_write", |b| {
        let mut cpu = Cpu::new();
        b.iter(|| {
            for i in 0..32u8 {
                cpu.set_reg(i, black_box(i as u32 * 100));
            }
        });
    });
}

criterion_group!(
    benches,
    cpu_step_benchmark,
    cpu_arithmetic_stream_benchmark,
    cpu_register_access_benchmark
);
criterion_main!(benches);
