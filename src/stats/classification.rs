use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Load class of a backend (or path) on one medium.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Low,
    Mid,
    High,
    /// Never classified: the medium is absent, or the path is offline.
    #[default]
    Unclassified,
}

impl Classification {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Mid => "MID",
            Self::High => "HIGH",
            Self::Unclassified => "UNCLASSIFIED",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a load score by its relative deviation from the average score.
///
/// A non-positive average has no meaningful relative deviation and yields MID.
pub fn classify_score(score: f64, avg: f64, threshold: f64) -> Classification {
    if avg <= 0.0 {
        return Classification::Mid;
    }
    classify_deviation(score, avg, (score - avg).abs() / avg, threshold)
}

/// Classify a used-percent by its absolute deviation from the average used-percent.
pub fn classify_used_percent(used_percent: f64, avg: f64, threshold: f64) -> Classification {
    classify_deviation(used_percent, avg, (used_percent - avg).abs(), threshold)
}

fn classify_deviation(value: f64, avg: f64, deviation: f64, threshold: f64) -> Classification {
    if deviation <= threshold {
        Classification::Mid
    } else if value > avg {
        Classification::High
    } else {
        Classification::Low
    }
}

/// Items grouped by classification, as handed to a balancer.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassBuckets<T> {
    pub low: Vec<T>,
    pub mid: Vec<T>,
    pub high: Vec<T>,
}

impl<T> Default for ClassBuckets<T> {
    fn default() -> Self {
        Self { low: Vec::new(), mid: Vec::new(), high: Vec::new() }
    }
}

impl<T> ClassBuckets<T> {
    /// Unclassified items are dropped.
    pub fn push(&mut self, class: Classification, item: T) {
        match class {
            Classification::Low => self.low.push(item),
            Classification::Mid => self.mid.push(item),
            Classification::High => self.high.push(item),
            Classification::Unclassified => {}
        }
    }

    /// Neither LOW nor HIGH has members.
    pub fn is_balanced(&self) -> bool {
        self.low.is_empty() && self.high.is_empty()
    }

    pub fn len(&self) -> usize {
        self.low.len() + self.mid.len() + self.high.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Guarantee a balancer both a source and a destination side.
    ///
    /// A balanced set is left alone. Otherwise, if LOW is empty MID becomes
    /// LOW; if HIGH is empty MID becomes HIGH.
    pub fn collapse_mid(&mut self) {
        if self.is_balanced() {
            return;
        }
        if self.low.is_empty() {
            self.low.append(&mut self.mid);
        } else if self.high.is_empty() {
            self.high.append(&mut self.mid);
        }
    }

    pub fn sort_by(&mut self, mut compare: impl FnMut(&T, &T) -> Ordering) {
        self.low.sort_by(&mut compare);
        self.mid.sort_by(&mut compare);
        self.high.sort_by(&mut compare);
    }
}

impl<T> FromIterator<(Classification, T)> for ClassBuckets<T> {
    fn from_iter<I: IntoIterator<Item = (Classification, T)>>(iter: I) -> Self {
        let mut buckets = Self::default();
        for (class, item) in iter {
            buckets.push(class, item);
        }
        buckets
    }
}
