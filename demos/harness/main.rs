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

//! A minimal CLI for single-stepping a flat MIPS-I binary image. Loads
//! the image into a [`VecBus`], wires a stdout trace sink, and runs
//! until `max_steps` or a non-success status, then prints the register
//! file.

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use mips_core::bus::VecBus;
use mips_core::config::SimulatorConfig;
use mips_core::cpu::Cpu;

/// Single-step a flat big-endian MIPS-I binary image.
#[derive(Parser)]
#[command(name = "mips-core-harness")]
#[command(about = "Runs a flat MIPS-I binary image against the core", long_about = None)]
struct Args {
    /// Path to the flat, big-endian binary image to load at address 0.
    image: String,

    /// Optional TOML config (trace_level, max_steps). CLI flags below override it.
    #[arg(long)]
    config: Option<String>,

    /// Trace verbosity, 0-3.
    #[arg(short, long)]
    trace_level: Option<u8>,

    /// Stop after this many instructions.
    #[arg(short = 'n', long)]
    max_steps: Option<u64>,

    /// Bytes to reserve for the image's bus, beyond the image's own size.
    #[arg(long, default_value = "65536")]
    bus_size: usize,
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match SimulatorConfig::from_toml_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("failed to load config {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => SimulatorConfig::default(),
    };
    if let Some(level) = args.trace_level {
        config.trace_level = level;
    }
    if let Some(max_steps) = args.max_steps {
        config.max_steps = Some(max_steps);
    }

    let image = match fs::read(&args.image) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("failed to read image {}: {e}", args.image);
            return ExitCode::FAILURE;
        }
    };

    let bus_size = image.len() + args.bus_size;
    let mut bus = VecBus::new(0, bus_size);
    if bus.write(0, &image).is_err() {
        error!("image does not fit the configured bus size");
        return ExitCode::FAILURE;
    }

    let mut cpu = Cpu::new();
    if config.trace_level > 0 {
        cpu.set_debug_level(config.trace_level, Some(Box::new(std::io::stdout())));
    }

    info!("mips-core-harness v{}", env!("CARGO_PKG_VERSION"));
    info!("loaded {} bytes from {}", image.len(), args.image);

    let mut steps = 0u64;
    loop {
        if let Some(limit) = config.max_steps {
            if steps >= limit {
                info!("reached step limit ({limit})");
                break;
            }
        }
        match cpu.step(&mut bus) {
            Ok(()) => steps += 1,
            Err(e) => {
                warn!("stopped after {steps} steps at pc={:#010x}: {e}", cpu.pc());
                break;
            }
        }
    }

    info!("executed {steps} instructions, final pc={:#010x}", cpu.pc());
    for i in 0..32u32 {
        print!("r{i:<2} = {:#010x}  ", cpu.get_register(i).unwrap());
        if i % 4 == 3 {
            println!();
        }
    }

    ExitCode::SUCCESS
}
