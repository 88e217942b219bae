// console rendering of session outcomes

use crate::runtime::session::Outcome;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Renders one outcome, `None` when the instruction has nothing to report.
pub fn render(outcome: &Outcome, format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Text => render_text(outcome),
        OutputFormat::Json => match outcome {
            Outcome::Snapshot { .. } | Outcome::Measured(_) => match serde_json::to_string(outcome) {
                Ok(json) => Some(json),
                Err(e) => {
                    log::warn!("failed to serialize outcome {:?}: {}", outcome, e);
                    None
                }
            },
            Outcome::Initialized { .. } | Outcome::Applied => None,
        },
    }
}

pub fn render_text(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Snapshot { amplitudes, .. } => {
            let mut out = String::from("\nThe state of the qubits is : \n");
            for amp in amplitudes {
                // writing into a String cannot fail
                let _ = writeln!(out, "({:.3} + {:.3}i) |{}>", amp.re, amp.im, amp.basis);
            }
            Some(out)
        }
        Outcome::Measured(m) => Some(format!("The qubit {} collapsed to {}\n", m.qubit, m.outcome)),
        Outcome::Initialized { .. } | Outcome::Applied => None,
    }
}
