//! Circuit driver and interactive emulator for PQA
//!
//! This crate sits on top of the state and gate crates and provides:
//!
//! - **Simulator**: runs [`pqa_core::Circuit`]s with a seeded or entropy-backed
//!   random source, logging each operation through `tracing`
//! - **Configuration**: [`SimulatorConfig`] with builder methods, presets and
//!   JSON loading
//! - **Scripting**: a line-oriented command language shared by the REPL and
//!   script runner ([`script`])
//! - **Demo**: the guided single-qubit and Bell-pair walk ([`demo`])
//! - **Snapshots**: JSON-friendly views of a register ([`StateSnapshot`])
//!
//! # Example
//!
//! ```
//! use pqa_sim::script::Session;
//! use pqa_sim::{Simulator, SimulatorConfig};
//!
//! let simulator = Simulator::new(SimulatorConfig::deterministic(42)).unwrap();
//! let mut session = Session::new(simulator).unwrap();
//!
//! let mut out = Vec::new();
//! session.run_script("bell\nmeasure\n", &mut out).unwrap();
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.contains("Measured: |00⟩") || text.contains("Measured: |11⟩"));
//! ```

pub mod config;
pub mod demo;
pub mod error;
pub mod result;
pub mod script;
pub mod simulator;

pub use config::SimulatorConfig;
pub use error::{Result, SimulatorError};
pub use result::{SimulationResult, StateSnapshot};
pub use simulator::Simulator;
