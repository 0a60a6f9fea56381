//! Types describing what the sources return.

use store::NationName;

/// A region's roster as resolved at the start of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub region: String,
    pub nations: Vec<NationName>,
}

impl Roster {
    pub fn new(region: impl Into<String>, nations: Vec<NationName>) -> Self {
        Self {
            region: region.into(),
            nations,
        }
    }

    pub fn len(&self) -> usize {
        self.nations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nations.is_empty()
    }
}

/// The recruitment flag of one nation, as reported by the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecruitmentStatus {
    pub nation: NationName,
    /// Normalized name of the region the nation currently lives in
    pub region: Option<String>,
    pub can_recruit: bool,
}
