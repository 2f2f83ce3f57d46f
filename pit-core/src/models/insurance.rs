use serde::{Deserialize, Serialize};

/// Minimum-wage region (I–IV).
///
/// The region selects the unemployment-insurance cap only; tax brackets and
/// the social/health cap are national.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    I,
    II,
    III,
    IV,
}

impl Region {
    pub fn number(&self) -> u8 {
        match self {
            Self::I => 1,
            Self::II => 2,
            Self::III => 3,
            Self::IV => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::I),
            2 => Some(Self::II),
            3 => Some(Self::III),
            4 => Some(Self::IV),
            _ => None,
        }
    }

    /// Zero-based index into per-region tables.
    pub(crate) fn index(&self) -> usize {
        usize::from(self.number() - 1)
    }
}

/// Which mandatory insurance contributions apply.
///
/// Social (BHXH), health (BHYT) and unemployment (BHTN) insurance are
/// independently togglable; "has insurance" in the product UI is the
/// all-on / all-off view of these flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceOptions {
    pub social: bool,
    pub health: bool,
    pub unemployment: bool,
}

impl InsuranceOptions {
    pub fn all_enabled() -> Self {
        Self { social: true, health: true, unemployment: true }
    }

    pub fn none() -> Self {
        Self { social: false, health: false, unemployment: false }
    }

    pub fn any(&self) -> bool {
        self.social || self.health || self.unemployment
    }
}

impl Default for InsuranceOptions {
    fn default() -> Self {
        Self::all_enabled()
    }
}
