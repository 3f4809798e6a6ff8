use skein_core::Stage;

/// How the evaluator reacts to a sample that cannot be evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the whole batch on the first failing sample.
    #[default]
    FailFast,

    /// Write `NaN` for the failing sample, record the failure, and continue.
    PerRow,
}

/// Configuration for the vectorized evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    policy: FailurePolicy,
    through: Stage,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(FailurePolicy::FailFast, Stage::Scalarizations)
    }
}

impl Config {
    /// Creates a config that evaluates every stage up to and including
    /// `through`.
    #[must_use]
    pub fn new(policy: FailurePolicy, through: Stage) -> Self {
        Self { policy, through }
    }

    /// Returns a copy with a different failure policy.
    #[must_use]
    pub fn with_policy(self, policy: FailurePolicy) -> Self {
        Self { policy, ..self }
    }

    /// Returns a copy that stops after `through`.
    #[must_use]
    pub fn with_through(self, through: Stage) -> Self {
        Self { through, ..self }
    }

    #[must_use]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Returns the last stage to evaluate.
    #[must_use]
    pub fn through(&self) -> Stage {
        self.through
    }
}
