//! Execution reports for display or JSON export.

use qkern_circuit::{Circuit, ExecutionStats};
use qkern_core::{BlochVector, Counts, Outcome, Qubit};
use rand::Rng;
use serde::Serialize;

use crate::{print_result, print_section, probability_bar};

/// Exact measurement probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Probabilities {
    /// Probability of reading `0`.
    pub zero: f64,
    /// Probability of reading `1`.
    pub one: f64,
}

/// Everything a caller reads back after running a circuit.
#[derive(Debug, Clone, Serialize)]
pub struct CircuitReport {
    /// Circuit name.
    pub name: String,
    /// Gate labels in application order.
    pub gates: Vec<String>,
    /// Rendered ASCII diagram.
    pub diagram: String,
    /// State the circuit starts from.
    pub initial_state: Qubit,
    /// State after executing every step.
    pub final_state: Qubit,
    /// Exact probabilities of the final state.
    pub probabilities: Probabilities,
    /// Bloch-sphere point of the final state.
    pub bloch: BlochVector,
    /// Shannon entropy of the final state, in bits.
    pub entropy: f64,
    /// Sampled outcomes; absent when no shots were requested.
    pub counts: Option<Counts>,
    /// Execution counters after sampling.
    pub stats: ExecutionStats,
}

impl CircuitReport {
    /// Execute `circuit`, sample `shots` outcomes and collect the results.
    pub fn collect<R: Rng + ?Sized>(circuit: &Circuit, shots: u64, rng: &mut R) -> Self {
        let final_state = circuit.execute();
        let counts = (shots > 0).then(|| circuit.measure_multiple_with_rng(shots, rng));

        Self {
            name: circuit.name().to_string(),
            gates: circuit.gates().map(|g| g.symbol()).collect(),
            diagram: circuit.ascii_diagram(),
            initial_state: *circuit.initial_state(),
            final_state,
            probabilities: Probabilities {
                zero: final_state.probability0(),
                one: final_state.probability1(),
            },
            bloch: final_state.bloch_vector(),
            entropy: final_state.entropy(),
            counts,
            stats: circuit.stats(),
        }
    }

    /// Gap between the sampled and exact frequency of `0`.
    pub fn sampling_error(&self) -> Option<f64> {
        self.counts
            .map(|counts| (counts.frequency(Outcome::Zero) - self.probabilities.zero).abs())
    }

    /// Render the report to stdout.
    pub fn print(&self) {
        print_section(&format!("Circuit '{}'", self.name));
        for line in self.diagram.lines() {
            println!("  {line}");
        }

        print_section("Final state");
        print_result("State", self.final_state);
        print_result(
            "P(0)",
            format!("{:.4} {}", self.probabilities.zero, probability_bar(self.probabilities.zero, 30)),
        );
        print_result(
            "P(1)",
            format!("{:.4} {}", self.probabilities.one, probability_bar(self.probabilities.one, 30)),
        );
        print_result(
            "Bloch",
            format!("({:.4}, {:.4}, {:.4})", self.bloch.x, self.bloch.y, self.bloch.z),
        );
        print_result("Entropy", format!("{:.4} bits", self.entropy));

        if let Some(counts) = self.counts {
            print_section(&format!("Sampling ({} shots)", counts.shots()));
            print_result("Counts", counts);
            print_result("f(0)", format!("{:.4}", counts.frequency(Outcome::Zero)));
            if let Some(error) = self.sampling_error() {
                print_result("|f(0) - P(0)|", format!("{error:.4}"));
            }
        }

        print_result("Executions", self.stats.execution_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_collect_without_shots() {
        let circuit = Circuit::bell();
        let report = CircuitReport::collect(&circuit, 0, &mut StdRng::seed_from_u64(1));
        assert!(report.counts.is_none());
        assert!(report.sampling_error().is_none());
        assert_eq!(report.gates, ["H"]);
        assert_eq!(report.stats.execution_count, 1);
    }

    #[test]
    fn test_collect_with_shots() {
        let circuit = Circuit::bell();
        let report = CircuitReport::collect(&circuit, 2000, &mut StdRng::seed_from_u64(1));
        assert_eq!(report.counts.map(|c| c.shots()), Some(2000));
        assert!(report.sampling_error().unwrap() < 0.05);
        assert_eq!(report.stats.execution_count, 2001);
    }
}
