use serde::{Deserialize, Serialize};

/// Health states of the stroke model, ordered by severity.
///
/// The ordinal index matters: the probabilistic parameter layer only
/// resamples transitions to states of equal or higher index, and `Death`
/// (highest index) is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthState {
    Well,
    Stroke,
    PostStroke,
    Death,
}

impl HealthState {
    pub const COUNT: usize = 4;

    pub const ALL: [HealthState; Self::COUNT] = [
        HealthState::Well,
        HealthState::Stroke,
        HealthState::PostStroke,
        HealthState::Death,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// An absorbing state permits no further transitions
    #[must_use]
    pub fn is_absorbing(self) -> bool {
        matches!(self, HealthState::Death)
    }
}

/// Treatment arms compared by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Therapy {
    NoTherapy,
    Anticoagulation,
}

impl Therapy {
    /// Display label for reports
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Therapy::NoTherapy => "No Therapy",
            Therapy::Anticoagulation => "Anticoagulation Therapy",
        }
    }
}
