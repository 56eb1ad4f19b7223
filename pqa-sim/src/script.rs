//! Line-oriented command language for the interactive emulator
//!
//! The same commands drive `pqa repl` and `pqa run <script>`:
//!
//! ```text
//! add_qubit            tensor a fresh |0⟩ qubit onto the register
//! apply GATE q...      apply a named gate to target qubits (apply CNOT 0 1)
//! show                 print amplitudes and probability bars
//! measure [q]          measure one qubit, or every qubit
//! bell                 prepare (|00⟩ + |11⟩)/√2 on a fresh 2-qubit register
//! reset [n]            back to |0…0⟩, optionally with n qubits
//! help                 list the commands
//! quit                 stop
//! ```
//!
//! `#` starts a comment. The REPL reports an error and keeps going; a script
//! stops at its first error, which carries the line number.

use crate::error::{Result, SimulatorError};
use crate::simulator::Simulator;
use pqa_core::QubitId;
use pqa_gates::{CNot, GateRegistry, Hadamard};
use pqa_state::{QuantumRegister, Qubit, SamplingResult};
use std::io::{BufRead, Write};
use tracing::debug;

/// Width of the probability bars printed by `show`
const BAR_WIDTH: usize = 40;

const HELP: &str = "\
Available commands:
  add_qubit          - Add a new qubit in the |0⟩ state to the register.
  apply GATE Q...    - Apply a gate (H, X, Y, Z, S, T, I, P(θ), CNOT) to target qubits.
  show               - Display the current quantum state of the register.
  measure [Q]        - Measure one qubit, or all qubits, collapsing the state.
  bell               - Reset to two qubits in the Bell state (|00⟩ + |11⟩)/√2.
  reset [N]          - Return to |0…0⟩, optionally with N qubits.
  help               - Show this help message.
  quit               - Exit the emulator.";

/// One parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddQubit,
    Apply { gate: String, targets: Vec<QubitId> },
    Show,
    Measure(Option<QubitId>),
    Bell,
    Reset(Option<usize>),
    Help,
    Quit,
}

/// Whether the session should keep reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

fn parse_error(line: usize, message: impl Into<String>) -> SimulatorError {
    SimulatorError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_qubit(token: &str, line: usize) -> Result<QubitId> {
    let digits = token.strip_prefix(|c: char| c == 'q' || c == 'Q').unwrap_or(token);
    digits
        .parse::<usize>()
        .map(QubitId::new)
        .map_err(|_| parse_error(line, format!("expected a qubit index, found '{}'", token)))
}

impl Command {
    /// Parse one line; blank lines and comments yield `None`
    ///
    /// `line` is only used for error reporting.
    pub fn parse(text: &str, line: usize) -> Result<Option<Command>> {
        let text = match text.find('#') {
            Some(pos) => &text[..pos],
            None => text,
        };
        let mut tokens = text.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = tokens.collect();

        let command = match keyword.to_lowercase().as_str() {
            "add_qubit" => {
                no_args(&args, "add_qubit", line)?;
                Command::AddQubit
            }
            "apply" => parse_apply(&args, line)?,
            "show" => {
                no_args(&args, "show", line)?;
                Command::Show
            }
            "measure" => match args.as_slice() {
                [] => Command::Measure(None),
                [q] => Command::Measure(Some(parse_qubit(q, line)?)),
                _ => return Err(parse_error(line, "usage: measure [QUBIT]")),
            },
            "bell" => {
                no_args(&args, "bell", line)?;
                Command::Bell
            }
            "reset" => match args.as_slice() {
                [] => Command::Reset(None),
                [n] => Command::Reset(Some(n.parse().map_err(|_| {
                    parse_error(line, format!("expected a qubit count, found '{}'", n))
                })?)),
                _ => return Err(parse_error(line, "usage: reset [NUM_QUBITS]")),
            },
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(parse_error(line, format!("unknown command '{}'", other))),
        };
        Ok(Some(command))
    }
}

fn no_args(args: &[&str], keyword: &str, line: usize) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(parse_error(line, format!("'{}' takes no arguments", keyword)))
    }
}

fn parse_apply(args: &[&str], line: usize) -> Result<Command> {
    const USAGE: &str = "usage: apply GATE QUBIT... (e.g. apply H 0, apply CNOT 0 1)";
    if args.is_empty() {
        return Err(parse_error(line, USAGE));
    }

    // A parameterized gate may contain spaces: P( pi / 4 )
    let mut gate = String::from(args[0]);
    let mut rest = 1;
    if gate.contains('(') {
        while !gate.contains(')') && rest < args.len() {
            gate.push_str(args[rest]);
            rest += 1;
        }
    }

    let targets = args[rest..]
        .iter()
        .map(|t| parse_qubit(t, line))
        .collect::<Result<Vec<_>>>()?;
    if targets.is_empty() {
        return Err(parse_error(line, USAGE));
    }
    Ok(Command::Apply { gate, targets })
}

/// An emulator session: a register, a gate registry and a simulator
pub struct Session {
    simulator: Simulator,
    registry: GateRegistry,
    register: QuantumRegister,
}

impl Session {
    /// Start with a single qubit in |0⟩
    pub fn new(simulator: Simulator) -> Result<Self> {
        let register = simulator.new_register(1)?;
        Ok(Self {
            simulator,
            registry: GateRegistry::standard(),
            register,
        })
    }

    /// The current register
    pub fn register(&self) -> &QuantumRegister {
        &self.register
    }

    /// Draw `shots` samples from the current register without collapsing it
    pub fn sample(&mut self, shots: usize) -> SamplingResult {
        SamplingResult::sample(&self.register, shots, self.simulator.rng())
    }

    /// The gate registry used to resolve `apply` commands
    pub fn registry_mut(&mut self) -> &mut GateRegistry {
        &mut self.registry
    }

    /// Execute one command, writing its output to `out`
    pub fn execute<W: Write>(&mut self, command: &Command, out: &mut W) -> Result<Flow> {
        debug!(?command, "executing command");
        match command {
            Command::AddQubit => {
                self.simulator.check_width(self.register.num_qubits() + 1)?;
                self.register.add_qubit(&Qubit::new())?;
                writeln!(out, "Added qubit. Total qubits: {}", self.register.num_qubits())?;
            }
            Command::Apply { gate, targets } => {
                let resolved = self
                    .registry
                    .resolve(gate)
                    .ok_or_else(|| SimulatorError::UnknownGate(gate.clone()))?;
                self.register.apply_gate(resolved.as_ref(), targets)?;

                let list = targets
                    .iter()
                    .map(|q| q.index().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let noun = if targets.len() == 1 { "qubit" } else { "qubits" };
                writeln!(out, "Applied {} to {} {}", gate.to_uppercase(), noun, list)?;
            }
            Command::Show => self.show(out)?,
            Command::Measure(Some(qubit)) => {
                let outcome = self.simulator.measure(&mut self.register, *qubit)?;
                writeln!(out, "Measured {}. State has collapsed.", outcome)?;
            }
            Command::Measure(None) => {
                let index = self.simulator.measure_all(&mut self.register)?;
                writeln!(
                    out,
                    "Measured: {}. State has collapsed.",
                    self.register.basis_label(index)
                )?;
            }
            Command::Bell => {
                let mut register = self.simulator.new_register(2)?;
                register.apply_gate(&Hadamard, &[QubitId::new(0)])?;
                register.apply_gate(&CNot, &[QubitId::new(0), QubitId::new(1)])?;
                self.register = register;
                writeln!(out, "Created Bell state |Φ+⟩ = (|00⟩ + |11⟩)/√2")?;
            }
            Command::Reset(num_qubits) => {
                let n = num_qubits.unwrap_or(self.register.num_qubits());
                self.register = self.simulator.new_register(n)?;
                writeln!(out, "Reset to {}", self.register.basis_label(0))?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => {
                writeln!(out, "Exiting Quantum REPL.")?;
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Parse and execute one line
    pub fn execute_line<W: Write>(&mut self, text: &str, line: usize, out: &mut W) -> Result<Flow> {
        match Command::parse(text, line)? {
            Some(command) => self.execute(&command, out),
            None => Ok(Flow::Continue),
        }
    }

    /// Run a whole script, stopping at the first error or at `quit`
    ///
    /// # Errors
    /// The first failing line, as [`SimulatorError::Parse`] with its line number.
    pub fn run_script<W: Write>(&mut self, source: &str, out: &mut W) -> Result<()> {
        for (index, text) in source.lines().enumerate() {
            let line = index + 1;
            let flow = self
                .execute_line(text, line, out)
                .map_err(|err| err.at_line(line))?;
            if flow == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Read commands from `input` until `quit` or end of input
    ///
    /// Command errors are printed and the loop continues.
    pub fn repl<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(out, "Quantum Emulator REPL. Type help for commands. Type quit to exit.")?;
        let mut lines = input.lines();
        let mut line = 0;
        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(text) = lines.next() else {
                writeln!(out)?;
                break;
            };
            line += 1;

            match self.execute_line(&text?, line, out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(SimulatorError::Io(err)) => return Err(err.into()),
                Err(err) => writeln!(out, "Error: {}", err)?,
            }
        }
        Ok(())
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<()> {
        let register = &self.register;
        writeln!(out, "System state ({} qubits):", register.num_qubits())?;
        writeln!(out, "{:.4}", register)?;

        writeln!(out, "Probabilities:")?;
        let threshold = self.simulator.config().show_threshold;
        for (index, p) in register.probabilities().into_iter().enumerate() {
            if p > threshold {
                let bar = "=".repeat((p * BAR_WIDTH as f64).round() as usize);
                writeln!(
                    out,
                    "{}: [{:<width$}] {:.3}",
                    register.basis_label(index),
                    bar,
                    p,
                    width = BAR_WIDTH
                )?;
            }
        }

        if register.num_qubits() == 1 {
            let qubit = Qubit::from_amplitudes(register.amplitudes()[0], register.amplitudes()[1])?;
            writeln!(out, "\nBloch vector (qubit 0):")?;
            writeln!(out, "  {}", qubit.bloch_vector())?;
        }
        Ok(())
    }
}
