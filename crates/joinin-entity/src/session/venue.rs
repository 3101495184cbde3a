//! Campus venues where a session can take place.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of venues a session can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Venue {
    /// Admin Block.
    #[serde(rename = "Admin Block")]
    AdminBlock,
    /// Library.
    Library,
    /// Total Fresh Cafe.
    #[serde(rename = "Total Fresh Cafe")]
    TotalFreshCafe,
    /// Annapurna Mess.
    #[serde(rename = "Annapurna Mess")]
    AnnapurnaMess,
    /// Vedavathi Mess.
    #[serde(rename = "Vedavathi Mess")]
    VedavathiMess,
    /// Food Court.
    #[serde(rename = "Food Court")]
    FoodCourt,
    /// Sports Ground.
    #[serde(rename = "Sports Ground")]
    SportsGround,
    /// Flag Area.
    #[serde(rename = "Flag Area")]
    FlagArea,
    /// Grandstairs.
    Grandstairs,
}

impl Venue {
    /// String label as shown to users.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdminBlock => "Admin Block",
            Self::Library => "Library",
            Self::TotalFreshCafe => "Total Fresh Cafe",
            Self::AnnapurnaMess => "Annapurna Mess",
            Self::VedavathiMess => "Vedavathi Mess",
            Self::FoodCourt => "Food Court",
            Self::SportsGround => "Sports Ground",
            Self::FlagArea => "Flag Area",
            Self::Grandstairs => "Grandstairs",
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
