use serde::Serialize;

/// Single-pass numeric summary (Welford's algorithm for mean and variance).
#[derive(Debug, Clone, Default)]
pub struct NumericSummary {
    count: u64,
    sum: f64,
    mean: f64,
    m2: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl NumericSummary {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    pub fn add_batch(&mut self, values: &[f64]) {
        for &v in values {
            self.add(v);
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Population variance
    pub fn variance(&self) -> Option<f64> {
        (self.count > 0).then(|| self.m2 / self.count as f64)
    }

    pub fn finish(&self) -> SummaryStats {
        let variance = self.variance();
        SummaryStats {
            count: self.count,
            sum: self.sum,
            mean: (self.count > 0).then_some(self.mean),
            variance,
            std_dev: variance.map(f64::sqrt),
            min: self.min,
            max: self.max,
        }
    }
}

/// Reported statistics for one calculation field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub count: u64,
    pub sum: f64,
    pub mean: Option<f64>,
    pub variance: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}
