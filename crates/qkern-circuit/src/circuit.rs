//! High-level circuit builder and execution API.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use qkern_core::{Counts, Gate, GateOp, Outcome, Qubit, StandardGate, Unitary2x2};
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::config::AnalysisConfig;
use crate::error::{CircuitError, CircuitResult};

/// Sentinel for "never executed" in the duration slot.
const NO_DURATION: u64 = u64::MAX;

/// One gate application together with its position in the circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitStep {
    /// The gate applied at this step.
    pub gate: Gate,
    /// Zero-based position of the step.
    pub ordinal: usize,
}

/// Execution diagnostics for a circuit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStats {
    /// Number of completed executions.
    pub execution_count: u64,
    /// Wall-clock time of the most recent execution.
    pub last_execution_duration: Option<Duration>,
}

/// A single-qubit quantum circuit.
///
/// A circuit binds an initial state to an ordered list of gate steps.
/// Steps are edited during a build phase and the circuit is then executed
/// or sampled any number of times. Execution does not change the circuit
/// content but updates its [`ExecutionStats`].
#[derive(Debug)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// State every execution starts from.
    initial_state: Qubit,
    /// Gate steps in application order.
    steps: Vec<CircuitStep>,
    /// Tolerances and test-state settings for analysis.
    config: AnalysisConfig,
    execution_count: AtomicU64,
    last_execution_nanos: AtomicU64,
}

impl Circuit {
    /// Create a new empty circuit starting from `|0⟩`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_initial_state(name, Qubit::zero())
    }

    /// Create a new empty circuit starting from `initial_state`.
    pub fn with_initial_state(name: impl Into<String>, initial_state: Qubit) -> Self {
        Self {
            name: name.into(),
            initial_state,
            steps: vec![],
            config: AnalysisConfig::default(),
            execution_count: AtomicU64::new(0),
            last_execution_nanos: AtomicU64::new(NO_DURATION),
        }
    }

    /// Create a circuit from an initial state and a gate sequence.
    pub fn from_gates<I>(name: impl Into<String>, initial_state: Qubit, gates: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Gate>,
    {
        let mut circuit = Self::with_initial_state(name, initial_state);
        circuit.add_gates(gates);
        circuit
    }

    /// Replace the analysis configuration.
    #[must_use]
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the initial state.
    pub fn initial_state(&self) -> &Qubit {
        &self.initial_state
    }

    /// Get the analysis configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Get the steps in application order.
    pub fn steps(&self) -> &[CircuitStep] {
        &self.steps
    }

    /// Iterate over the gates in application order.
    pub fn gates(&self) -> impl Iterator<Item = &Gate> + '_ {
        self.steps.iter().map(|step| &step.gate)
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the circuit has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Count how often each gate name occurs.
    pub fn gate_counts(&self) -> FxHashMap<String, usize> {
        let mut counts = FxHashMap::default();
        for gate in self.gates() {
            *counts.entry(gate.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    // =========================================================================
    // Building
    // =========================================================================

    /// Append a gate.
    pub fn add_gate(&mut self, gate: impl Into<Gate>) -> &mut Self {
        let ordinal = self.steps.len();
        self.steps.push(CircuitStep {
            gate: gate.into(),
            ordinal,
        });
        self
    }

    /// Append several gates in order.
    pub fn add_gates<I>(&mut self, gates: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Gate>,
    {
        for gate in gates {
            self.add_gate(gate);
        }
        self
    }

    /// Insert a gate before position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > self.len()`.
    pub fn insert_gate(&mut self, gate: impl Into<Gate>, index: usize) -> &mut Self {
        let len = self.steps.len();
        assert!(
            index <= len,
            "insert index {index} out of range for circuit with {len} steps"
        );
        self.steps.insert(
            index,
            CircuitStep {
                gate: gate.into(),
                ordinal: index,
            },
        );
        self.reindex(index);
        self
    }

    /// Remove and return the gate at position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn remove_gate(&mut self, index: usize) -> Gate {
        let len = self.steps.len();
        assert!(
            index < len,
            "remove index {index} out of range for circuit with {len} steps"
        );
        let step = self.steps.remove(index);
        self.reindex(index);
        step.gate
    }

    fn reindex(&mut self, from: usize) {
        for (ordinal, step) in self.steps.iter_mut().enumerate().skip(from) {
            step.ordinal = ordinal;
        }
    }

    // =========================================================================
    // Single-gate shortcuts
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self) -> &mut Self {
        self.add_gate(StandardGate::H)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self) -> &mut Self {
        self.add_gate(StandardGate::X)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self) -> &mut Self {
        self.add_gate(StandardGate::Y)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self) -> &mut Self {
        self.add_gate(StandardGate::Z)
    }

    /// Apply S gate.
    pub fn s(&mut self) -> &mut Self {
        self.add_gate(StandardGate::S)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self) -> &mut Self {
        self.add_gate(StandardGate::Sdg)
    }

    /// Apply T gate.
    pub fn t(&mut self) -> &mut Self {
        self.add_gate(StandardGate::T)
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self) -> &mut Self {
        self.add_gate(StandardGate::Tdg)
    }

    /// Apply identity gate.
    pub fn id(&mut self) -> &mut Self {
        self.add_gate(StandardGate::I)
    }

    /// Apply RX rotation.
    pub fn rx(&mut self, theta: f64) -> &mut Self {
        self.add_gate(StandardGate::Rx(theta))
    }

    /// Apply RY rotation.
    pub fn ry(&mut self, theta: f64) -> &mut Self {
        self.add_gate(StandardGate::Ry(theta))
    }

    /// Apply RZ rotation.
    pub fn rz(&mut self, theta: f64) -> &mut Self {
        self.add_gate(StandardGate::Rz(theta))
    }

    /// Apply phase gate.
    pub fn p(&mut self, phi: f64) -> &mut Self {
        self.add_gate(StandardGate::P(phi))
    }

    /// Apply universal U(θ, φ, λ) gate.
    pub fn u(&mut self, theta: f64, phi: f64, lambda: f64) -> &mut Self {
        self.add_gate(StandardGate::U(theta, phi, lambda))
    }

    /// Apply a caller-defined transform.
    pub fn custom(&mut self, name: impl Into<String>, transform: impl GateOp + 'static) -> &mut Self {
        self.add_gate(Gate::custom(name, transform))
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Run every step starting from `state`.
    ///
    /// Pure: does not touch the execution counters.
    pub fn execute_from(&self, state: &Qubit) -> Qubit {
        self.steps
            .iter()
            .fold(*state, |current, step| step.gate.apply(&current))
    }

    /// Run every step starting from the initial state.
    ///
    /// Increments the execution counter and records the elapsed time.
    pub fn execute(&self) -> Qubit {
        let start = Instant::now();
        let result = self.execute_from(&self.initial_state);
        let elapsed = start.elapsed();

        self.execution_count.fetch_add(1, Ordering::Relaxed);
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(NO_DURATION - 1);
        self.last_execution_nanos.store(nanos, Ordering::Relaxed);

        trace!(circuit = %self.name, steps = self.steps.len(), ?elapsed, "executed circuit");
        result
    }

    /// Alias for [`execute`](Self::execute).
    pub fn final_state(&self) -> Qubit {
        self.execute()
    }

    /// Execute once and measure the result.
    pub fn execute_and_measure_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Outcome {
        self.execute().measure_with_rng(rng)
    }

    /// Execute once and measure the result using the thread-local RNG.
    pub fn execute_and_measure(&self) -> Outcome {
        self.execute_and_measure_with_rng(&mut rand::thread_rng())
    }

    /// Sample `shots` independent execute-and-measure trials.
    #[instrument(skip(self, rng), fields(circuit = %self.name, steps = self.steps.len()))]
    pub fn measure_multiple_with_rng<R: Rng + ?Sized>(&self, shots: u64, rng: &mut R) -> Counts {
        let start = Instant::now();
        let mut counts = Counts::new();
        for _ in 0..shots {
            counts.record(self.execute_and_measure_with_rng(rng));
        }
        debug!(
            zero = counts.zero,
            one = counts.one,
            elapsed = ?start.elapsed(),
            "sampling complete"
        );
        counts
    }

    /// Sample `shots` trials using the thread-local RNG.
    pub fn measure_multiple(&self, shots: u64) -> Counts {
        self.measure_multiple_with_rng(shots, &mut rand::thread_rng())
    }

    /// Exact `(P(0), P(1))` of the final state.
    pub fn theoretical_probabilities(&self) -> (f64, f64) {
        let state = self.execute();
        (state.probability0(), state.probability1())
    }

    /// Execution diagnostics.
    pub fn stats(&self) -> ExecutionStats {
        let nanos = self.last_execution_nanos.load(Ordering::Relaxed);
        ExecutionStats {
            execution_count: self.execution_count.load(Ordering::Relaxed),
            last_execution_duration: (nanos != NO_DURATION).then(|| Duration::from_nanos(nanos)),
        }
    }

    /// Product matrix of the whole circuit.
    ///
    /// Returns `None` if any step is a custom gate.
    pub fn unitary(&self) -> Option<Unitary2x2> {
        self.gates().try_fold(Unitary2x2::identity(), |acc, gate| {
            gate.as_standard().map(|g| g.matrix() * acc)
        })
    }

    // =========================================================================
    // Derived circuits
    // =========================================================================

    /// Build a sibling circuit with the same initial state and configuration.
    pub(crate) fn derived<I>(&self, name: impl Into<String>, gates: I) -> Circuit
    where
        I: IntoIterator<Item = Gate>,
    {
        Circuit::from_gates(name, self.initial_state, gates).with_config(self.config.clone())
    }

    /// This circuit's steps followed by `other`'s steps.
    ///
    /// The result starts from this circuit's initial state.
    pub fn composed(&self, other: &Circuit) -> Circuit {
        self.derived(
            format!("{}+{}", self.name, other.name),
            self.gates().chain(other.gates()).cloned(),
        )
    }

    /// This circuit's steps concatenated `n` times.
    pub fn repeated(&self, n: usize) -> Circuit {
        let gates = (0..n).flat_map(|_| self.gates().cloned());
        self.derived(format!("{}^{n}", self.name), gates)
    }

    /// The per-gate inverses in reverse order.
    ///
    /// Fails if any step is a custom gate.
    pub fn inverse(&self) -> CircuitResult<Circuit> {
        let mut gates = Vec::with_capacity(self.steps.len());
        for step in self.steps.iter().rev() {
            let inverse = step.gate.inverse().map_err(|source| {
                debug!(
                    circuit = %self.name,
                    index = step.ordinal,
                    gate = step.gate.name(),
                    "circuit has no inverse"
                );
                CircuitError::NonInvertibleStep {
                    index: step.ordinal,
                    name: step.gate.name().to_string(),
                    source,
                }
            })?;
            gates.push(inverse);
        }
        Ok(self.derived(format!("{}_inv", self.name), gates))
    }
}

impl Clone for Circuit {
    /// Copies content and configuration. Execution counters start fresh.
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            initial_state: self.initial_state,
            steps: self.steps.clone(),
            config: self.config.clone(),
            execution_count: AtomicU64::new(0),
            last_execution_nanos: AtomicU64::new(NO_DURATION),
        }
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new("circuit")
    }
}
