use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// Supported quantitative scale kinds.
///
/// Unknown names resolve to [`ScaleKind::Linear`], the named default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    #[default]
    Linear,
}

impl ScaleKind {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "linear" => Self::Linear,
            other => {
                debug!(kind = other, "unknown scale kind, falling back to linear");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
        }
    }
}

impl FromStr for ScaleKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

/// Continuous linear mapping from a numeric domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        for (name, value) in [
            ("domain start", domain.0),
            ("domain end", domain.1),
            ("range start", range.0),
            ("range end", range.1),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "linear scale {name} must be finite"
                )));
            }
        }

        Ok(Self { domain, range })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    /// Maps a domain value into range space. A zero-span domain maps
    /// everything onto the range start.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return r0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    /// Maps a range value back into the domain.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return d0;
        }
        d0 + (pixel - r0) / span * (d1 - d0)
    }

    /// Human-friendly tick values inside the domain, roughly `count` of them.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Spacing between consecutive values returned by [`LinearScale::ticks`].
    #[must_use]
    pub fn tick_step(self, count: usize) -> f64 {
        let (start, stop) = ordered(self.domain.0, self.domain.1);
        match tick_increment(start, stop, count) {
            Some(TickIncrement::Step(step)) => step,
            Some(TickIncrement::Inverse(inc)) => 1.0 / inc,
            None => 0.0,
        }
    }
}

/// Quantitative scale produced by [`quantitative_scale`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum QuantitativeScale {
    Linear(LinearScale),
}

impl QuantitativeScale {
    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Linear(_) => ScaleKind::Linear,
        }
    }

    #[must_use]
    pub fn map(&self, value: f64) -> f64 {
        match self {
            Self::Linear(scale) => scale.map(value),
        }
    }

    #[must_use]
    pub fn invert(&self, pixel: f64) -> f64 {
        match self {
            Self::Linear(scale) => scale.invert(pixel),
        }
    }

    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(scale) => scale.ticks(count),
        }
    }

    #[must_use]
    pub fn tick_step(&self, count: usize) -> f64 {
        match self {
            Self::Linear(scale) => scale.tick_step(count),
        }
    }

    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::Linear(scale) => scale.domain(),
        }
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(scale) => scale.range(),
        }
    }
}

impl From<LinearScale> for QuantitativeScale {
    fn from(value: LinearScale) -> Self {
        Self::Linear(value)
    }
}

/// Builds a quantitative scale of the named kind.
///
/// `kind` goes through [`ScaleKind::from_name`], so unrecognized names yield a
/// linear scale rather than an error.
pub fn quantitative_scale(
    kind: &str,
    domain: (f64, f64),
    range: (f64, f64),
) -> ChartResult<QuantitativeScale> {
    match ScaleKind::from_name(kind) {
        ScaleKind::Linear => Ok(QuantitativeScale::Linear(LinearScale::new(domain, range)?)),
    }
}

/// Formats a tick value with just enough decimals for the given tick step.
#[must_use]
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step.is_finite() && step > 0.0 && step < 1.0 {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    let text = format!("{value:.decimals$}");
    // `-0` reads poorly on an axis.
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_owned()
    } else {
        text
    }
}

/// Upper bound on requested tick counts.
const MAX_TICK_COUNT: usize = 1_000;
/// Largest tick index (2^53) whose `f64` value is exact.
const MAX_EXACT_TICK_INDEX: f64 = 9_007_199_254_740_992.0;

enum TickIncrement {
    Step(f64),
    Inverse(f64),
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn tick_increment(start: f64, stop: f64, count: usize) -> Option<TickIncrement> {
    if count == 0 || !(stop - start).is_finite() || stop == start {
        return None;
    }

    let raw = (stop - start) / count.min(MAX_TICK_COUNT) as f64;
    let power = raw.log10().floor();
    let error = raw / 10_f64.powf(power);
    let factor = if error >= 50_f64.sqrt() {
        10.0
    } else if error >= 10_f64.sqrt() {
        5.0
    } else if error >= 2_f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        Some(TickIncrement::Step(factor * 10_f64.powf(power)))
    } else {
        Some(TickIncrement::Inverse(10_f64.powf(-power) / factor))
    }
}

fn ticks(domain_start: f64, domain_end: f64, count: usize) -> Vec<f64> {
    if count == 0 || !domain_start.is_finite() || !domain_end.is_finite() {
        return Vec::new();
    }
    if domain_start == domain_end {
        return vec![domain_start];
    }

    let reverse = domain_end < domain_start;
    let (start, stop) = ordered(domain_start, domain_end);
    let Some(increment) = tick_increment(start, stop, count) else {
        return Vec::new();
    };
    let (first, last) = match increment {
        TickIncrement::Step(step) => ((start / step).ceil(), (stop / step).floor()),
        TickIncrement::Inverse(inc) => ((start * inc).ceil(), (stop * inc).floor()),
    };
    // the span is below what the step can resolve at this magnitude
    if !(first.abs() <= MAX_EXACT_TICK_INDEX && last.abs() <= MAX_EXACT_TICK_INDEX) {
        debug!(start, stop, count, "tick indices not representable, no ticks");
        return Vec::new();
    }

    let indices = first as i64..=last as i64;
    let mut values: Vec<f64> = match increment {
        TickIncrement::Step(step) => indices.map(|i| i as f64 * step).collect(),
        TickIncrement::Inverse(inc) => indices.map(|i| i as f64 / inc).collect(),
    };

    if reverse {
        values.reverse();
    }
    values
}
