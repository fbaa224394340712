//! Resolution error types.
//!
//! Every way a lookup can fail. These never cross the facade as faults; the
//! facade turns them into error-marked results.

use std::fmt;

use super::{InvalidLotNumber, LotKey};

/// Which user input was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Town,
    HouseNumber,
    Facility,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputField::Town => "町名",
            InputField::HouseNumber => "番地",
            InputField::Facility => "施設名",
        })
    }
}

/// Errors from resolving an address to a travel point.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// A required input was blank
    #[error("{0}が入力されていません")]
    EmptyInput(InputField),

    /// No town entry matched and the catch-all does not apply
    #[error("町名「{town}」が見つかりません")]
    TownNotFound { town: String },

    /// The town matched but no range covers the lot number
    #[error("「{town}」に番地 {key} を含む範囲がありません")]
    RangeNotFound { town: String, key: LotKey },

    /// The lot number has no usable numeric part
    #[error("番地「{}」を数値として解釈できません", .0.raw())]
    NotANumber(#[from] InvalidLotNumber),

    /// No facility with this name in the reference data
    #[error("施設「{name}」が見つかりません")]
    FacilityNotFound { name: String },

    /// Unexpected failure inside the resolver
    #[error("内部エラーにより判定できませんでした: {message}")]
    Internal { message: String },
}
