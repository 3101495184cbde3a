//! Activity categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of activity tags a session can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Study groups and exam prep.
    Study,
    /// Meals and food runs.
    Food,
    /// Hanging out, no agenda.
    Chill,
    /// Pickup games and workouts.
    Sports,
    /// Papers, datasets, lab work.
    Research,
    /// Hack sessions and pair programming.
    Coding,
    /// Multiplayer and tabletop.
    Gaming,
    /// Campus events and performances.
    Events,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 8] = [
        Category::Study,
        Category::Food,
        Category::Chill,
        Category::Sports,
        Category::Research,
        Category::Coding,
        Category::Gaming,
        Category::Events,
    ];

    /// String label as shown to users.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Study => "Study",
            Self::Food => "Food",
            Self::Chill => "Chill",
            Self::Sports => "Sports",
            Self::Research => "Research",
            Self::Coding => "Coding",
            Self::Gaming => "Gaming",
            Self::Events => "Events",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
