//! Transaction programs.
//!
//! A program is an ordered sequence of steps the external runtime executes
//! as one atomic unit. Read and append steps contribute to a single text
//! transcript returned with the outcome; write steps are staged and
//! committed together at program end. Programs are built incrementally,
//! owned by one adapter call, and never shared across threads.

use serde::{Deserialize, Serialize};

/// A single step of a transaction program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// Read the value at a flat key and append it to the transcript.
    /// An unset key reads as the empty string.
    Read(String),
    /// Write a value to a flat key.
    Write(String, String),
    /// Append a literal to the transcript.
    Append(String),
}

/// An ordered, composable transaction program.
///
/// Built with consuming-`self` methods:
///
/// ```
/// use trellis_core::TxnProgram;
///
/// let program = TxnProgram::new()
///     .read("usertable$user1$FIELD0")
///     .append("\0")
///     .write("usertable$user1$FIELD1", "b");
///
/// assert_eq!(program.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxnProgram {
    steps: Vec<Step>,
}

impl TxnProgram {
    /// Create an empty program. Executing it is a no-op transaction with
    /// an empty transcript.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a read step.
    pub fn read(mut self, key: impl Into<String>) -> Self {
        self.steps.push(Step::Read(key.into()));
        self
    }

    /// Add a write step.
    pub fn write(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.steps.push(Step::Write(key.into(), value.into()));
        self
    }

    /// Add a literal-append step.
    pub fn append(mut self, literal: impl Into<String>) -> Self {
        self.steps.push(Step::Append(literal.into()));
        self
    }

    /// Compose two programs: `self` runs first, then `other`, still as one
    /// atomic unit.
    pub fn chain(mut self, other: TxnProgram) -> Self {
        self.steps.extend(other.steps);
        self
    }

    /// The steps, in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether executing this program produces a transcript. Write-only
    /// (and empty) programs are acknowledged without one.
    pub fn produces_transcript(&self) -> bool {
        self.steps
            .iter()
            .any(|step| matches!(step, Step::Read(_) | Step::Append(_)))
    }
}

/// The result of executing one program: a transcript for programs that
/// read, a bare acknowledgement for write-only programs. Consumed exactly
/// once by the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Concatenated transcript of all read/append steps.
    Text(String),
    /// The program committed and produced no transcript.
    Ack,
}

impl Outcome {
    /// The transcript text. An acknowledgement reads as the empty
    /// transcript, which decodes to zero entries.
    pub fn text(&self) -> &str {
        match self {
            Outcome::Text(text) => text,
            Outcome::Ack => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order() {
        let program = TxnProgram::new()
            .write("a", "1")
            .read("b")
            .append("\0");

        assert_eq!(
            program.steps(),
            &[
                Step::Write("a".into(), "1".into()),
                Step::Read("b".into()),
                Step::Append("\0".into()),
            ]
        );
    }

    #[test]
    fn test_chain_concatenates() {
        let first = TxnProgram::new().write("a", "1");
        let second = TxnProgram::new().write("b", "2");
        let program = first.chain(second);

        assert_eq!(program.len(), 2);
        assert_eq!(
            program.steps()[1],
            Step::Write("b".into(), "2".into())
        );
    }

    #[test]
    fn test_produces_transcript() {
        assert!(!TxnProgram::new().produces_transcript());
        assert!(!TxnProgram::new().write("a", "1").produces_transcript());
        assert!(TxnProgram::new().read("a").produces_transcript());
        assert!(TxnProgram::new().append("\0").produces_transcript());
    }

    #[test]
    fn test_ack_reads_as_empty_transcript() {
        assert_eq!(Outcome::Ack.text(), "");
        assert_eq!(Outcome::Text("a\0".into()).text(), "a\0");
    }
}
