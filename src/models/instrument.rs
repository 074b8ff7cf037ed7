//! Gold instrument codes quoted by the price API

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use lazy_static::lazy_static;
use crate::error::GoldPriceError;

/// Currency the domestic brands are quoted in
pub const DOMESTIC_CURRENCY: &str = "VND";

/// Discord caps autocomplete responses at 25 choices
pub const MAX_SUGGESTIONS: usize = 25;

/// A tradable gold product known to the price API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    WorldSpot,
    Sjc9999,
    SjcRing,
    DojiHanoi,
    DojiHcm,
    DojiJewelry,
    BaoTinSjc,
    BaoTin9999,
    PnjHanoi,
    Pnj24k,
    VnGoldSjc,
    ViettinSjc,
}

impl Instrument {
    /// Every instrument, in display order
    pub const ALL: [Instrument; 12] = [
        Instrument::WorldSpot,
        Instrument::Sjc9999,
        Instrument::SjcRing,
        Instrument::DojiHanoi,
        Instrument::DojiHcm,
        Instrument::DojiJewelry,
        Instrument::BaoTinSjc,
        Instrument::BaoTin9999,
        Instrument::PnjHanoi,
        Instrument::Pnj24k,
        Instrument::VnGoldSjc,
        Instrument::ViettinSjc,
    ];

    /// Code sent as the `type` query parameter
    pub fn code(self) -> &'static str {
        match self {
            Instrument::WorldSpot => "XAUUSD",
            Instrument::Sjc9999 => "SJL1L10",
            Instrument::SjcRing => "SJ9999",
            Instrument::DojiHanoi => "DOHNL",
            Instrument::DojiHcm => "DOHCML",
            Instrument::DojiJewelry => "DOJINHTV",
            Instrument::BaoTinSjc => "BTSJC",
            Instrument::BaoTin9999 => "BT9999NTT",
            Instrument::PnjHanoi => "PQHNVM",
            Instrument::Pnj24k => "PQHN24NTT",
            Instrument::VnGoldSjc => "VNGSJC",
            Instrument::ViettinSjc => "VIETTINMSJC",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Instrument::WorldSpot => "Vàng Thế Giới (XAU/USD)",
            Instrument::Sjc9999 => "SJC 9999",
            Instrument::SjcRing => "Nhẫn SJC",
            Instrument::DojiHanoi => "DOJI Hà Nội",
            Instrument::DojiHcm => "DOJI HCM",
            Instrument::DojiJewelry => "DOJI Nữ Trang",
            Instrument::BaoTinSjc => "Bảo Tín SJC",
            Instrument::BaoTin9999 => "Bảo Tín 9999",
            Instrument::PnjHanoi => "PNJ Hà Nội",
            Instrument::Pnj24k => "PNJ 24K",
            Instrument::VnGoldSjc => "VN Gold SJC",
            Instrument::ViettinSjc => "Viettin SJC",
        }
    }

    pub fn currency(self) -> &'static str {
        match self {
            Instrument::WorldSpot => "USD",
            _ => DOMESTIC_CURRENCY,
        }
    }

    /// Position in the display order
    pub fn rank(self) -> usize {
        Self::ALL.iter().position(|i| *i == self).unwrap_or(Self::ALL.len())
    }

    /// Comma separated list of all codes, formatted for Discord
    pub fn valid_codes() -> String {
        Self::ALL
            .iter()
            .map(|i| format!("`{}`", i.code()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

lazy_static! {
    static ref INSTRUMENT_INDEX: HashMap<&'static str, Instrument> =
        Instrument::ALL.iter().map(|i| (i.code(), *i)).collect();
}

impl FromStr for Instrument {
    type Err = GoldPriceError;

    /// Codes are matched exactly; callers normalise case where they accept user input
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        INSTRUMENT_INDEX
            .get(code)
            .copied()
            .ok_or_else(|| GoldPriceError::InvalidParameter {
                code: code.to_string(),
                valid: Instrument::valid_codes(),
            })
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Autocomplete choices whose code starts with `partial` (case-insensitive).
/// Returns `(label, code)` pairs, the label being `"<code> - <display name>"`.
pub fn suggest(partial: &str) -> Vec<(String, &'static str)> {
    let needle = partial.trim().to_lowercase();
    Instrument::ALL
        .iter()
        .filter(|i| i.code().to_lowercase().starts_with(&needle))
        .take(MAX_SUGGESTIONS)
        .map(|i| (format!("{} - {}", i.code(), i.display_name()), i.code()))
        .collect()
}
