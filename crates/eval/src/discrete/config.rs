/// How distances between a query and the stored samples are measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DistanceMetric {
    /// Euclidean distance over the raw variable values.
    #[default]
    Euclidean,

    /// Euclidean distance after dividing each coordinate by a scale: the
    /// variable's bound range when both bounds are known and differ,
    /// otherwise the range of the stored samples, otherwise 1.
    NormalizedEuclidean,
}

/// Configuration for the nearest-match evaluator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    metric: DistanceMetric,
}

impl Config {
    #[must_use]
    pub fn new(metric: DistanceMetric) -> Self {
        Self { metric }
    }

    #[must_use]
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }
}
