use super::series::Statistic;
use serde::Serialize;
use std::collections::BTreeMap;

/// Which way a regime state leans when states are tallied across classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lean {
    Top,
    Bottom,
}

/// Common surface of every classifier's state enum.
pub trait RegimeState: Copy {
    /// Upper-case label, e.g. `EXTREME_TOP`.
    fn label(&self) -> &'static str;

    /// Top/bottom lean for the overall tally. Only states whose label carries
    /// a TOP or BOTTOM token lean.
    fn lean(&self) -> Option<Lean>;
}

/// Short 111-day MA against twice the 350-day MA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PiCycleState {
    Safe,
    Warning,
    Top,
}

impl RegimeState for PiCycleState {
    fn label(&self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Warning => "WARNING",
            Self::Top => "TOP",
        }
    }

    fn lean(&self) -> Option<Lean> {
        match self {
            Self::Top => Some(Lean::Top),
            Self::Safe | Self::Warning => None,
        }
    }
}

/// Ladder shared by the price-to-moving-average multiples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MultipleState {
    Bottom,
    NearBottom,
    Neutral,
    Top,
    ExtremeTop,
}

impl RegimeState for MultipleState {
    fn label(&self) -> &'static str {
        match self {
            Self::Bottom => "BOTTOM",
            Self::NearBottom => "NEAR_BOTTOM",
            Self::Neutral => "NEUTRAL",
            Self::Top => "TOP",
            Self::ExtremeTop => "EXTREME_TOP",
        }
    }

    fn lean(&self) -> Option<Lean> {
        match self {
            Self::Bottom | Self::NearBottom => Some(Lean::Bottom),
            Self::Neutral => None,
            Self::Top | Self::ExtremeTop => Some(Lean::Top),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OscillatorState {
    ExtremeOversold,
    Oversold,
    Neutral,
    Overbought,
    ExtremeOverbought,
}

impl RegimeState for OscillatorState {
    fn label(&self) -> &'static str {
        match self {
            Self::ExtremeOversold => "EXTREME_OVERSOLD",
            Self::Oversold => "OVERSOLD",
            Self::Neutral => "NEUTRAL",
            Self::Overbought => "OVERBOUGHT",
            Self::ExtremeOverbought => "EXTREME_OVERBOUGHT",
        }
    }

    // Momentum extremes are not cycle tops or bottoms.
    fn lean(&self) -> Option<Lean> {
        None
    }
}

/// Position of price inside the moving-average band stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BandState {
    ExtremeBottom,
    Bottom,
    Neutral,
    Top,
    ExtremeTop,
}

impl RegimeState for BandState {
    fn label(&self) -> &'static str {
        match self {
            Self::ExtremeBottom => "EXTREME_BOTTOM",
            Self::Bottom => "BOTTOM",
            Self::Neutral => "NEUTRAL",
            Self::Top => "TOP",
            Self::ExtremeTop => "EXTREME_TOP",
        }
    }

    fn lean(&self) -> Option<Lean> {
        match self {
            Self::ExtremeBottom | Self::Bottom => Some(Lean::Bottom),
            Self::Neutral => None,
            Self::Top | Self::ExtremeTop => Some(Lean::Top),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FibonacciState {
    ExtremeBottom,
    Bottom,
    Neutral,
    Bullish,
    Top,
    ExtremeTop,
}

impl RegimeState for FibonacciState {
    fn label(&self) -> &'static str {
        match self {
            Self::ExtremeBottom => "EXTREME_BOTTOM",
            Self::Bottom => "BOTTOM",
            Self::Neutral => "NEUTRAL",
            Self::Bullish => "BULLISH",
            Self::Top => "TOP",
            Self::ExtremeTop => "EXTREME_TOP",
        }
    }

    fn lean(&self) -> Option<Lean> {
        match self {
            Self::ExtremeBottom | Self::Bottom => Some(Lean::Bottom),
            Self::Neutral | Self::Bullish => None,
            Self::Top | Self::ExtremeTop => Some(Lean::Top),
        }
    }
}

/// Outcome of one classifier: either its window has not filled, or a full reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reading<T> {
    InsufficientData,
    Ready(T),
}

impl<T> Reading<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Reading::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Reading::Ready(inner) => Some(inner),
            Reading::InsufficientData => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PiCycleReading {
    pub state: PiCycleState,
    pub price: f64,
    pub ma_111: f64,
    pub ma_350_x2: f64,
    /// `(ma_111 - ma_350_x2) / price * 100`.
    pub distance_pct: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<Statistic>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwoYearReading {
    pub state: MultipleState,
    pub price: f64,
    pub ma_730: f64,
    pub ma_730_x5: f64,
    pub multiplier: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<Statistic>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OscillatorReading {
    pub state: OscillatorState,
    pub value: f64,
    pub period: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<Statistic>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainbowReading {
    pub state: BandState,
    pub price: f64,
    /// 0 at the 150-day MA, 1 at the 7-day MA.
    pub position_ratio: f64,
    /// Latest value of every band whose window has filled, keyed by window.
    pub bands: BTreeMap<usize, f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<Statistic>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MayerReading {
    pub state: MultipleState,
    pub price: f64,
    pub ma_200: f64,
    pub multiple: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<Statistic>,
}

/// Fibonacci multiples of the 350-day MA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FibonacciLevels {
    pub bottom: f64,
    pub accumulation: f64,
    pub bullish: f64,
    pub euphoria: f64,
    pub extreme: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoldenRatioReading {
    pub state: FibonacciState,
    pub price: f64,
    pub ma_350: f64,
    pub levels: FibonacciLevels,
}

/// Result of a single classifier, one variant per classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "indicator", content = "reading", rename_all = "snake_case")]
pub enum ClassifierResult {
    PiCycle(Reading<PiCycleReading>),
    TwoYearMultiplier(Reading<TwoYearReading>),
    Oscillator(Reading<OscillatorReading>),
    Rainbow(Reading<RainbowReading>),
    Mayer(Reading<MayerReading>),
    GoldenRatio(Reading<GoldenRatioReading>),
}

impl ClassifierResult {
    pub fn id(&self) -> &'static str {
        match self {
            Self::PiCycle(_) => "pi_cycle",
            Self::TwoYearMultiplier(_) => "two_year_multiplier",
            Self::Oscillator(_) => "oscillator",
            Self::Rainbow(_) => "rainbow",
            Self::Mayer(_) => "mayer",
            Self::GoldenRatio(_) => "golden_ratio",
        }
    }

    pub fn is_ready(&self) -> bool {
        match self {
            Self::PiCycle(r) => r.is_ready(),
            Self::TwoYearMultiplier(r) => r.is_ready(),
            Self::Oscillator(r) => r.is_ready(),
            Self::Rainbow(r) => r.is_ready(),
            Self::Mayer(r) => r.is_ready(),
            Self::GoldenRatio(r) => r.is_ready(),
        }
    }

    /// State label, `INSUFFICIENT_DATA` when the window has not filled.
    pub fn state_label(&self) -> &'static str {
        self.state_parts()
            .map(|(label, _)| label)
            .unwrap_or("INSUFFICIENT_DATA")
    }

    pub fn lean(&self) -> Option<Lean> {
        self.state_parts().and_then(|(_, lean)| lean)
    }

    fn state_parts(&self) -> Option<(&'static str, Option<Lean>)> {
        fn parts<S: RegimeState>(state: S) -> (&'static str, Option<Lean>) {
            (state.label(), state.lean())
        }

        match self {
            Self::PiCycle(r) => r.ready().map(|x| parts(x.state)),
            Self::TwoYearMultiplier(r) => r.ready().map(|x| parts(x.state)),
            Self::Oscillator(r) => r.ready().map(|x| parts(x.state)),
            Self::Rainbow(r) => r.ready().map(|x| parts(x.state)),
            Self::Mayer(r) => r.ready().map(|x| parts(x.state)),
            Self::GoldenRatio(r) => r.ready().map(|x| parts(x.state)),
        }
    }

    /// Drop the historical statistics carried for charting.
    pub fn without_history(mut self) -> Self {
        match &mut self {
            Self::PiCycle(Reading::Ready(r)) => r.history.clear(),
            Self::TwoYearMultiplier(Reading::Ready(r)) => r.history.clear(),
            Self::Oscillator(Reading::Ready(r)) => r.history.clear(),
            Self::Rainbow(Reading::Ready(r)) => r.history.clear(),
            Self::Mayer(Reading::Ready(r)) => r.history.clear(),
            _ => {}
        }
        self
    }
}

/// Coarse verdict from tallying classifier leans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallVerdict {
    ApproachingTop,
    ApproachingBottom,
    Mixed,
}

/// Snapshot of all classifiers at the latest row plus the tallied verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketAssessment {
    pub results: Vec<ClassifierResult>,
    pub top_count: usize,
    pub bottom_count: usize,
    pub verdict: OverallVerdict,
}
