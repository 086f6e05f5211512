//! Text rendering of circuits.

use qkern_core::Qubit;

use crate::circuit::Circuit;

/// Label the initial state with a ket name when it is a well-known state.
fn state_label(state: &Qubit) -> String {
    const NAMED: [(&str, fn() -> Qubit); 6] = [
        ("|0⟩", Qubit::zero),
        ("|1⟩", Qubit::one),
        ("|+⟩", Qubit::plus),
        ("|−⟩", Qubit::minus),
        ("|+i⟩", Qubit::plus_i),
        ("|−i⟩", Qubit::minus_i),
    ];
    NAMED
        .iter()
        .find(|(_, make)| state.fidelity(&make()) > 1.0 - 1e-10)
        .map_or_else(|| "|ψ⟩".to_string(), |(label, _)| (*label).to_string())
}

impl Circuit {
    /// Render the circuit as a single wire.
    ///
    /// ```text
    /// q: |0⟩ ──[H]──[RZ(3.1416)]──[H]── M
    /// final: 0.0000|0⟩ + -1.0000i|1⟩
    /// P(0) = 0.0000, P(1) = 1.0000
    /// ```
    ///
    /// Gate labels appear in application order. The final state lines are
    /// only added when the circuit has gates. Rendering does not count as an
    /// execution.
    pub fn ascii_diagram(&self) -> String {
        let mut out = format!("q: {} ──", state_label(self.initial_state()));
        for gate in self.gates() {
            out.push_str(&format!("[{}]──", gate.symbol()));
        }
        out.push_str(" M");

        if !self.is_empty() {
            let state = self.execute_from(self.initial_state());
            out.push_str(&format!(
                "\nfinal: {state}\nP(0) = {:.4}, P(1) = {:.4}",
                state.probability0(),
                state.probability1()
            ));
        }
        out
    }

    /// Multi-line report: name, initial state, numbered steps and the
    /// final state summary.
    pub fn detailed_description(&self) -> String {
        let mut lines = vec![
            format!("Circuit: {}", self.name()),
            format!(
                "Initial state: {} = {}",
                state_label(self.initial_state()),
                self.initial_state()
            ),
            format!("Steps: {}", self.len()),
        ];
        lines.extend(
            self.steps()
                .iter()
                .map(|step| format!("  {:>3}. {}", step.ordinal + 1, step.gate.symbol())),
        );

        if !self.is_empty() {
            let state = self.execute_from(self.initial_state());
            lines.push(format!("Final {}", state.describe()));
        }

        let stats = self.stats();
        lines.push(match stats.last_execution_duration {
            Some(duration) => format!("Executions: {} (last: {duration:?})", stats.execution_count),
            None => format!("Executions: {}", stats.execution_count),
        });
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_empty_diagram() {
        let circuit = Circuit::new("empty");
        assert_eq!(circuit.ascii_diagram(), "q: |0⟩ ── M");
    }

    #[test]
    fn test_diagram_lists_gates_in_order() {
        let mut circuit = Circuit::new("interference");
        circuit.h().rz(PI).h();
        let diagram = circuit.ascii_diagram();
        let first_line = diagram.lines().next().unwrap();
        assert_eq!(first_line, "q: |0⟩ ──[H]──[RZ(3.1416)]──[H]── M");
        assert!(diagram.contains("P(0) = 0.0000, P(1) = 1.0000"));
        assert_eq!(circuit.stats().execution_count, 0);
    }

    #[test]
    fn test_diagram_is_deterministic() {
        let mut circuit = Circuit::with_initial_state("det", Qubit::from_real(0.6, 0.8));
        circuit.t().s();
        assert_eq!(circuit.ascii_diagram(), circuit.ascii_diagram());
        assert!(circuit.ascii_diagram().starts_with("q: |ψ⟩"));
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(state_label(&Qubit::minus()), "|−⟩");
        assert_eq!(state_label(&Qubit::plus_i()), "|+i⟩");
        // Global phase does not change the label.
        let phased = Qubit::new(qkern_core::Complex64::new(0.0, 1.0), qkern_core::Complex64::new(0.0, 0.0));
        assert_eq!(state_label(&phased), "|0⟩");
    }

    #[test]
    fn test_detailed_description() {
        let mut circuit = Circuit::with_initial_state("desc", Qubit::one());
        circuit.h().sdg();
        circuit.execute();
        let text = circuit.detailed_description();

        assert!(text.starts_with("Circuit: desc\nInitial state: |1⟩"));
        assert!(text.contains("Steps: 2"));
        assert!(text.contains("    1. H\n    2. S†"));
        assert!(text.contains("Final State:"));
        assert!(text.contains("Executions: 1 (last:"));
    }

    #[test]
    fn test_description_of_unexecuted_empty_circuit() {
        let circuit = Circuit::new("blank");
        assert_eq!(
            circuit.detailed_description(),
            "Circuit: blank\nInitial state: |0⟩ = 1.0000|0⟩ + 0.0000|1⟩\nSteps: 0\nExecutions: 0"
        );
    }
}
