use std::fmt::Display;

/// The discrete sentiment assigned to a predicted probability
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Sentiment {
    /// Probability in (0.00, 0.25]
    VeryBad,
    /// Probability in (0.25, 0.50]
    Bad,
    /// Probability in (0.50, 0.75]
    Good,
    /// Probability in (0.75, 1.00]
    Excellent,
    /// Anything else, including exactly 0 and NaN
    Unknown,
}

/// Half-open `(lower, upper]` probability intervals, checked in order
static INTERVALS: [(f64, f64, Sentiment); 4] = [
    (0.00, 0.25, Sentiment::VeryBad),
    (0.25, 0.50, Sentiment::Bad),
    (0.50, 0.75, Sentiment::Good),
    (0.75, 1.00, Sentiment::Excellent),
];

impl Sentiment {
    /// Classify a predicted probability
    pub fn from_probability(probability: f64) -> Self {
        INTERVALS
            .iter()
            .find(|(lower, upper, _)| *lower < probability && probability <= *upper)
            .map(|(_, _, sentiment)| *sentiment)
            .unwrap_or(Sentiment::Unknown)
    }

    /// A short name for the sentiment
    pub fn as_str(&self) -> &str {
        match self {
            Sentiment::VeryBad => "very bad",
            Sentiment::Bad => "bad",
            Sentiment::Good => "good",
            Sentiment::Excellent => "excellent",
            Sentiment::Unknown => "unknown",
        }
    }

    /// The console message for the sentiment
    pub fn message(&self) -> String {
        match self {
            Sentiment::Unknown => "Unknown review!".to_string(),
            known => format!("This review is {}!", known.as_str()),
        }
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
