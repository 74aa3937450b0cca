//! Ordered threshold tables mapping a metric onto a regime state.

use crate::types::{BandState, FibonacciState, MultipleState, OscillatorState, PiCycleState};

/// Upper bound of one rung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Admits values strictly below the limit.
    Below(f64),
    /// Admits values up to and including the limit.
    AtMost(f64),
}

impl Bound {
    pub fn admits(&self, value: f64) -> bool {
        match *self {
            Bound::Below(limit) => value < limit,
            Bound::AtMost(limit) => value <= limit,
        }
    }
}

/// Rungs are checked low to high; the first that admits the value wins, and
/// anything above every rung falls through to `ceiling`.
#[derive(Debug, Clone, Copy)]
pub struct Ladder<S: 'static> {
    rungs: &'static [(Bound, S)],
    ceiling: S,
}

impl<S: Copy> Ladder<S> {
    pub const fn new(rungs: &'static [(Bound, S)], ceiling: S) -> Self {
        Self { rungs, ceiling }
    }

    pub fn classify(&self, value: f64) -> S {
        self.rungs
            .iter()
            .find(|(bound, _)| bound.admits(value))
            .map(|(_, state)| *state)
            .unwrap_or(self.ceiling)
    }

    pub fn rungs(&self) -> &'static [(Bound, S)] {
        self.rungs
    }
}

/// `(ma111 - 2 * ma350) / price * 100`; negative while the short MA is below.
pub const PI_CYCLE_LADDER: Ladder<PiCycleState> = Ladder::new(
    &[
        (Bound::Below(0.0), PiCycleState::Safe),
        (Bound::Below(5.0), PiCycleState::Warning),
    ],
    PiCycleState::Top,
);

/// Price / 730-day MA.
pub const TWO_YEAR_LADDER: Ladder<MultipleState> = Ladder::new(
    &[
        (Bound::Below(1.0), MultipleState::Bottom),
        (Bound::Below(1.2), MultipleState::NearBottom),
        (Bound::Below(3.0), MultipleState::Neutral),
        (Bound::Below(5.0), MultipleState::Top),
    ],
    MultipleState::ExtremeTop,
);

/// Price / 200-day MA.
pub const MAYER_LADDER: Ladder<MultipleState> = Ladder::new(
    &[
        (Bound::Below(0.8), MultipleState::Bottom),
        (Bound::Below(1.0), MultipleState::NearBottom),
        (Bound::Below(1.8), MultipleState::Neutral),
        (Bound::Below(2.4), MultipleState::Top),
    ],
    MultipleState::ExtremeTop,
);

pub const OSCILLATOR_LADDER: Ladder<OscillatorState> = Ladder::new(
    &[
        (Bound::Below(20.0), OscillatorState::ExtremeOversold),
        (Bound::Below(30.0), OscillatorState::Oversold),
        (Bound::AtMost(70.0), OscillatorState::Neutral),
        (Bound::AtMost(80.0), OscillatorState::Overbought),
    ],
    OscillatorState::ExtremeOverbought,
);

/// `(price - ma150) / (ma7 - ma150)`.
pub const RAINBOW_LADDER: Ladder<BandState> = Ladder::new(
    &[
        (Bound::Below(0.0), BandState::ExtremeBottom),
        (Bound::Below(0.3), BandState::Bottom),
        (Bound::AtMost(1.0), BandState::Neutral),
        (Bound::AtMost(1.5), BandState::Top),
    ],
    BandState::ExtremeTop,
);

/// Price / 350-day MA against the Fibonacci multiples.
pub const GOLDEN_RATIO_LADDER: Ladder<FibonacciState> = Ladder::new(
    &[
        (Bound::Below(0.5), FibonacciState::ExtremeBottom),
        (Bound::Below(1.0), FibonacciState::Bottom),
        (Bound::Below(1.618), FibonacciState::Neutral),
        (Bound::Below(2.618), FibonacciState::Bullish),
        (Bound::Below(3.618), FibonacciState::Top),
    ],
    FibonacciState::ExtremeTop,
);
