use std::fmt;

use crate::foundation::error::{PictographError, PictographResult};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// Letter/symbol classification label of a pictograph (`A`, `Σ-`, `Γ`, ...).
pub struct Letter(String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
/// Letter family, determined by the motion kinds the letter combines.
pub enum LetterType {
    /// Two shift motions (`A`..`V`).
    Type1,
    /// Shift + static.
    Type2,
    /// Shift + dash.
    Type3,
    /// Dash + static.
    Type4,
    /// Two dashes.
    Type5,
    /// Two statics.
    Type6,
}

const TYPE1: &[&str] = &[
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V",
];
const TYPE2: &[&str] = &["W", "X", "Y", "Z", "Σ", "Δ", "θ", "Ω"];
const TYPE3: &[&str] = &["W-", "X-", "Y-", "Z-", "Σ-", "Δ-", "θ-", "Ω-"];
const TYPE4: &[&str] = &["Φ", "Ψ", "Λ"];
const TYPE5: &[&str] = &["Φ-", "Ψ-", "Λ-"];
const TYPE6: &[&str] = &["α", "β", "Γ"];

/// Type 1 letters whose two motions are a pro and an anti.
const TYPE1_HYBRIDS: &[&str] = &["C", "F", "I", "L", "O", "R", "U", "V"];

impl Letter {
    /// Wrap a label without checking it against the known alphabet.
    ///
    /// Configuration files may carry letters the classifier never emits, so
    /// lookups accept any label; use [`Letter::parse`] for user input.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Parse a label, rejecting anything outside the known alphabet.
    pub fn parse(s: &str) -> PictographResult<Self> {
        let s = s.trim();
        if LetterType::of(s).is_none() {
            return Err(PictographError::validation(format!("unknown letter '{s}'")));
        }
        Ok(Self(s.to_string()))
    }

    /// The raw label.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First two characters of the label; separates dash variants (`W-`) from their base.
    pub fn base(&self) -> String {
        self.0.chars().take(2).collect()
    }

    /// Letter family, if the label is part of the known alphabet.
    pub fn letter_type(&self) -> Option<LetterType> {
        LetterType::of(&self.0)
    }

    /// `true` when the two motions of this letter are of different kinds.
    pub fn is_hybrid(&self) -> bool {
        match self.letter_type() {
            Some(LetterType::Type1) => TYPE1_HYBRIDS.contains(&self.0.as_str()),
            Some(LetterType::Type2 | LetterType::Type3 | LetterType::Type4) => true,
            Some(LetterType::Type5 | LetterType::Type6) | None => false,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Letter {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl LetterType {
    /// Family of a raw label.
    pub fn of(s: &str) -> Option<Self> {
        [
            (TYPE1, Self::Type1),
            (TYPE2, Self::Type2),
            (TYPE3, Self::Type3),
            (TYPE4, Self::Type4),
            (TYPE5, Self::Type5),
            (TYPE6, Self::Type6),
        ]
        .into_iter()
        .find_map(|(set, ty)| set.contains(&s).then_some(ty))
    }

    /// Every label of this family.
    pub fn letters(self) -> &'static [&'static str] {
        match self {
            Self::Type1 => TYPE1,
            Self::Type2 => TYPE2,
            Self::Type3 => TYPE3,
            Self::Type4 => TYPE4,
            Self::Type5 => TYPE5,
            Self::Type6 => TYPE6,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/letter.rs"]
mod tests;
