use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Audience a boost is shown to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum TargetCategory {
    #[default]
    Regular,
    #[serde(rename = "Sugar Mummy")]
    SugarMummy,
    Sponsor,
    #[serde(rename = "Ben 10")]
    Ben10,
    #[serde(rename = "Urban Chics")]
    UrbanChics,
}

impl TargetCategory {
    pub const ALL: [TargetCategory; 5] = [
        TargetCategory::Regular,
        TargetCategory::SugarMummy,
        TargetCategory::Sponsor,
        TargetCategory::Ben10,
        TargetCategory::UrbanChics,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TargetCategory::Regular => "Regular",
            TargetCategory::SugarMummy => "Sugar Mummy",
            TargetCategory::Sponsor => "Sponsor",
            TargetCategory::Ben10 => "Ben 10",
            TargetCategory::UrbanChics => "Urban Chics",
        }
    }
}

impl Display for TargetCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for TargetCategory {
    type Err = UnknownCategory;

    /// Accepts labels regardless of case and spacing, so `"ben10"` is `Ben 10`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let squashed = |label: &str| {
            label
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_lowercase()
        };
        let wanted = squashed(value);
        TargetCategory::ALL
            .into_iter()
            .find(|category| squashed(category.label()) == wanted)
            .ok_or_else(|| UnknownCategory(value.to_owned()))
    }
}
