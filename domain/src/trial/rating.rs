//! Score bands shown with the final verdict

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    ArchitectOfClarity,
    PrincipledThinker,
    FlexiblePragmatist,
    ConflictedSoul,
    LogicalVoid,
}

impl Rating {
    pub fn from_score(score: i64) -> Self {
        match score {
            s if s >= 100 => Rating::ArchitectOfClarity,
            s if s >= 80 => Rating::PrincipledThinker,
            s if s >= 60 => Rating::FlexiblePragmatist,
            s if s >= 40 => Rating::ConflictedSoul,
            _ => Rating::LogicalVoid,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Rating::ArchitectOfClarity => "Architect of Clarity",
            Rating::PrincipledThinker => "Principled Thinker",
            Rating::FlexiblePragmatist => "Flexible Pragmatist",
            Rating::ConflictedSoul => "Conflicted Soul",
            Rating::LogicalVoid => "Logical Void",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}
