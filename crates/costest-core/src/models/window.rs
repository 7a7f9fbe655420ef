//! Aggregation windows and summary periods.

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::InputError;

/// Geographic scope of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scope {
    /// Only records from the project's district.
    District,
    /// Every record, regardless of district.
    State,
}

/// A scope × look-back horizon pair.
///
/// `Window::ALL` is in specificity order: district before statewide,
/// shorter horizon before longer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub scope: Scope,
    pub months: u32,
}

impl Window {
    pub const DIST_12M: Window = Window::new(Scope::District, 12);
    pub const DIST_24M: Window = Window::new(Scope::District, 24);
    pub const DIST_36M: Window = Window::new(Scope::District, 36);
    pub const STATE_12M: Window = Window::new(Scope::State, 12);
    pub const STATE_24M: Window = Window::new(Scope::State, 24);
    pub const STATE_36M: Window = Window::new(Scope::State, 36);

    pub const ALL: [Window; 6] = [
        Self::DIST_12M,
        Self::DIST_24M,
        Self::DIST_36M,
        Self::STATE_12M,
        Self::STATE_24M,
        Self::STATE_36M,
    ];

    pub const fn new(scope: Scope, months: u32) -> Self {
        Self { scope, months }
    }

    /// Earliest bid date inside the window, inclusive.
    /// `None` when the subtraction leaves chrono's date range.
    pub fn start(&self, as_of: NaiveDate) -> Option<NaiveDate> {
        as_of.checked_sub_months(Months::new(self.months))
    }

    /// Whether `bid_date` falls in `[as_of - months, as_of]`.
    pub fn contains(&self, bid_date: NaiveDate, as_of: NaiveDate) -> bool {
        if bid_date > as_of {
            return false;
        }
        match self.start(as_of) {
            Some(start) => bid_date >= start,
            None => true,
        }
    }

    /// Label used in notes and audit rows, e.g. `DIST_12M`.
    pub fn label(&self) -> String {
        let prefix = match self.scope {
            Scope::District => "DIST",
            Scope::State => "STATE",
        };
        format!("{prefix}_{}M", self.months)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Statewide summary periods, most recent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SummaryPeriod {
    #[serde(rename = "STATE-12M")]
    State12M,
    #[serde(rename = "STATE-24M")]
    State24M,
    #[serde(rename = "STATE-36M")]
    State36M,
}

impl SummaryPeriod {
    /// Most recent first.
    pub const ALL: [SummaryPeriod; 3] = [Self::State12M, Self::State24M, Self::State36M];

    pub fn name(&self) -> &'static str {
        match self {
            Self::State12M => "STATE-12M",
            Self::State24M => "STATE-24M",
            Self::State36M => "STATE-36M",
        }
    }

    /// Number of period steps between this period and the most recent one.
    pub fn gap(&self) -> usize {
        match self {
            Self::State12M => 0,
            Self::State24M => 1,
            Self::State36M => 2,
        }
    }
}

impl fmt::Display for SummaryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SummaryPeriod {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_uppercase().replace('_', "-");
        match key.as_str() {
            "STATE-12M" | "12M" => Ok(Self::State12M),
            "STATE-24M" | "24M" => Ok(Self::State24M),
            "STATE-36M" | "36M" => Ok(Self::State36M),
            _ => Err(InputError::UnknownPeriod { raw: s.to_string() }),
        }
    }
}
