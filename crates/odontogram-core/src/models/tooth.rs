//! FDI tooth numbering.
//!
//! Two-digit codes: the tens digit is the quadrant (1-4, clockwise from the
//! patient's upper right), the units digit is the position from the midline
//! (1-8). Only the 32 permanent teeth are modelled.

use serde::{Deserialize, Serialize};

/// Quadrant of the permanent dentition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

impl Quadrant {
    /// Upper or lower jaw.
    pub fn arch(&self) -> Arch {
        match self {
            Quadrant::UpperRight | Quadrant::UpperLeft => Arch::Upper,
            Quadrant::LowerLeft | Quadrant::LowerRight => Arch::Lower,
        }
    }
}

/// Jaw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
    Upper,
    Lower,
}

/// Anatomical tooth type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToothKind {
    Incisor,
    Canine,
    Premolar,
    Molar,
}

impl ToothKind {
    /// Display label shown to clinic staff.
    pub fn label(&self) -> &'static str {
        match self {
            ToothKind::Incisor => "Seri",
            ToothKind::Canine => "Taring",
            ToothKind::Premolar => "Geraham Kecil",
            ToothKind::Molar => "Geraham Besar",
        }
    }
}

/// A validated FDI tooth number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Tooth(u8);

impl Tooth {
    /// Validate an FDI code.
    pub fn new(number: i32) -> Option<Self> {
        if is_valid_fdi(number) {
            Some(Tooth(number as u8))
        } else {
            None
        }
    }

    /// All 32 permanent teeth, quadrant by quadrant.
    pub fn all() -> impl Iterator<Item = Tooth> {
        (1..=4).flat_map(|q| (1..=8).map(move |p| Tooth((q * 10 + p) as u8)))
    }

    pub fn number(&self) -> i32 {
        i32::from(self.0)
    }

    pub fn quadrant(&self) -> Quadrant {
        match self.0 / 10 {
            1 => Quadrant::UpperRight,
            2 => Quadrant::UpperLeft,
            3 => Quadrant::LowerLeft,
            _ => Quadrant::LowerRight,
        }
    }

    /// Position from the midline, 1 (central incisor) to 8 (third molar).
    pub fn position(&self) -> u8 {
        self.0 % 10
    }

    pub fn arch(&self) -> Arch {
        self.quadrant().arch()
    }

    pub fn kind(&self) -> ToothKind {
        match self.position() {
            1 | 2 => ToothKind::Incisor,
            3 => ToothKind::Canine,
            4 | 5 => ToothKind::Premolar,
            _ => ToothKind::Molar,
        }
    }
}

impl TryFrom<i32> for Tooth {
    type Error = String;

    fn try_from(number: i32) -> Result<Self, Self::Error> {
        Tooth::new(number).ok_or_else(|| format!("{} is not an FDI permanent tooth", number))
    }
}

impl From<Tooth> for i32 {
    fn from(tooth: Tooth) -> Self {
        tooth.number()
    }
}

impl std::fmt::Display for Tooth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check whether a number is one of the 32 permanent FDI codes.
pub fn is_valid_fdi(number: i32) -> bool {
    let quadrant = number / 10;
    let position = number % 10;
    (1..=4).contains(&quadrant) && (1..=8).contains(&position)
}
