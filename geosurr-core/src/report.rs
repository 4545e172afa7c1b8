//! Outcome types returned alongside generated surrogates.

use std::fmt;

use crate::matrix::SquareMatrix;

/// Why an attempt left the working matrix unchanged.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RejectionReason {
    /// Fewer than two edges exist, so no pair can be drawn.
    InsufficientEdges,
    /// The two drawn edges touch a common node.
    SharedEndpoint,
    /// A target position lies on the diagonal.
    SelfLoop,
    /// A target position already holds a weight.
    Collision,
    /// The swap rule declined the proposal.
    Rule,
}

impl RejectionReason {
    /// Returns the snake-case label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InsufficientEdges => "insufficient_edges",
            Self::SharedEndpoint => "shared_endpoint",
            Self::SelfLoop => "self_loop",
            Self::Collision => "collision",
            Self::Rule => "rule",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single swap attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwapOutcome {
    /// Both weights moved to previously vacant positions.
    Relocated {
        /// Vacated positions `(a, b)` in canonical form.
        from: [(usize, usize); 2],
        /// Newly occupied positions in canonical form; `to[k]` received the
        /// weight that sat at `from[k]`.
        to: [(usize, usize); 2],
    },
    /// Two occupied positions swapped their weights in place.
    Exchanged {
        /// The two positions in canonical form.
        positions: [(usize, usize); 2],
    },
    /// Nothing changed.
    Rejected(RejectionReason),
}

impl SwapOutcome {
    /// Returns `true` when the attempt mutated the working matrix.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

/// Non-fatal conditions noticed during generation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GenerationWarning {
    /// Fewer than two edges; the output is the unchanged input.
    DegenerateInput {
        /// Edges present in the input.
        edges: usize,
    },
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateInput { edges } => {
                write!(f, "degenerate input: {edges} edge(s), nothing to rewire")
            }
        }
    }
}

/// Rejected attempts broken down by reason.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RejectionCounts {
    /// Attempts rejected because fewer than two edges exist.
    pub insufficient_edges: usize,
    /// Attempts whose edges shared a node.
    pub shared_endpoint: usize,
    /// Attempts that would have created a self-loop.
    pub self_loop: usize,
    /// Attempts whose targets were occupied.
    pub collision: usize,
    /// Attempts declined by the swap rule.
    pub rule: usize,
}

impl RejectionCounts {
    pub(crate) fn record(&mut self, reason: RejectionReason) {
        let slot = match reason {
            RejectionReason::InsufficientEdges => &mut self.insufficient_edges,
            RejectionReason::SharedEndpoint => &mut self.shared_endpoint,
            RejectionReason::SelfLoop => &mut self.self_loop,
            RejectionReason::Collision => &mut self.collision,
            RejectionReason::Rule => &mut self.rule,
        };
        *slot += 1;
    }

    /// Total number of rejected attempts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.insufficient_edges + self.shared_endpoint + self.self_loop + self.collision + self.rule
    }
}

/// Weight–distance relationship of the edge set at one point of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorrelationSample {
    /// Attempts completed when the sample was taken.
    pub iteration: usize,
    /// Pearson correlation of weight and distance, if defined.
    pub pearson: Option<f64>,
    /// Least-squares slope of weight on distance, if defined.
    pub slope: Option<f64>,
}

/// Statistics describing one generation run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RewireReport {
    /// Edges in the input (and output).
    pub edges: usize,
    /// Attempts made.
    pub attempts: usize,
    /// Proposals that moved weights to vacant positions.
    pub relocations: usize,
    /// Proposals that exchanged two weights in place.
    pub exchanges: usize,
    /// Rejected attempts by reason.
    pub rejections: RejectionCounts,
    /// Correlation before the first attempt.
    pub initial: Option<CorrelationSample>,
    /// Correlation after the last attempt.
    pub last: Option<CorrelationSample>,
    /// Periodic samples when a trace interval is configured.
    pub trace: Vec<CorrelationSample>,
    /// Non-fatal conditions.
    pub warning: Option<GenerationWarning>,
}

impl RewireReport {
    /// Number of attempts that changed the matrix.
    #[must_use]
    pub fn accepted(&self) -> usize {
        self.relocations + self.exchanges
    }

    /// Fraction of attempts that were accepted, or `None` before any attempt.
    #[must_use]
    pub fn acceptance_rate(&self) -> Option<f64> {
        (self.attempts > 0).then(|| self.accepted() as f64 / self.attempts as f64)
    }

    pub(crate) fn record(&mut self, outcome: &SwapOutcome) {
        self.attempts += 1;
        match outcome {
            SwapOutcome::Relocated { .. } => self.relocations += 1,
            SwapOutcome::Exchanged { .. } => self.exchanges += 1,
            SwapOutcome::Rejected(reason) => self.rejections.record(*reason),
        }
    }
}

/// A generated surrogate and the report of the run that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Surrogate {
    matrix: SquareMatrix,
    report: RewireReport,
}

impl Surrogate {
    pub(crate) fn new(matrix: SquareMatrix, report: RewireReport) -> Self {
        Self { matrix, report }
    }

    /// Returns the surrogate weight matrix.
    #[must_use]
    pub fn matrix(&self) -> &SquareMatrix {
        &self.matrix
    }

    /// Returns the run statistics.
    #[must_use]
    pub fn report(&self) -> &RewireReport {
        &self.report
    }

    /// Splits the surrogate into its matrix and report.
    #[must_use]
    pub fn into_parts(self) -> (SquareMatrix, RewireReport) {
        (self.matrix, self.report)
    }
}
