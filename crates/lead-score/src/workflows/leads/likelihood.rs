use serde::{Deserialize, Serialize};

/// Qualitative band for a final lead score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Likelihood {
    ExtremelyLikely,
    QuiteLikely,
    RelativelyLikely,
    SomewhatLikely,
    Neutral,
    SomewhatUnlikely,
    RelativelyUnlikely,
    QuiteUnlikely,
    ExtremelyUnlikely,
}

impl Likelihood {
    /// Bands are closed toward zero on the negative side and closed away
    /// from zero on the positive side, so every integer lands in one band.
    pub const fn from_score(score: i32) -> Self {
        match score {
            75..=i32::MAX => Self::ExtremelyLikely,
            50..=74 => Self::QuiteLikely,
            25..=49 => Self::RelativelyLikely,
            1..=24 => Self::SomewhatLikely,
            0 => Self::Neutral,
            -24..=-1 => Self::SomewhatUnlikely,
            -49..=-25 => Self::RelativelyUnlikely,
            -74..=-50 => Self::QuiteUnlikely,
            i32::MIN..=-75 => Self::ExtremelyUnlikely,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ExtremelyLikely => "extremely likely",
            Self::QuiteLikely => "quite likely",
            Self::RelativelyLikely => "relatively likely",
            Self::SomewhatLikely => "somewhat likely",
            Self::Neutral => "neither likely nor unlikely",
            Self::SomewhatUnlikely => "somewhat unlikely",
            Self::RelativelyUnlikely => "relatively unlikely",
            Self::QuiteUnlikely => "quite unlikely",
            Self::ExtremelyUnlikely => "extremely unlikely",
        }
    }
}
