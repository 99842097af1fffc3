use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProvinceCode {
    #[serde(rename = "AB")]
    Alberta,
    #[serde(rename = "BC")]
    BritishColumbia,
    #[serde(rename = "MB")]
    Manitoba,
    #[serde(rename = "NB")]
    NewBrunswick,
    #[serde(rename = "NL")]
    NewfoundlandAndLabrador,
    #[serde(rename = "NS")]
    NovaScotia,
    #[serde(rename = "NT")]
    NorthwestTerritories,
    #[serde(rename = "NU")]
    Nunavut,
    #[serde(rename = "ON")]
    Ontario,
    #[serde(rename = "PE")]
    PrinceEdwardIsland,
    #[serde(rename = "QC")]
    Quebec,
    #[serde(rename = "SK")]
    Saskatchewan,
    #[serde(rename = "YT")]
    Yukon,
}

impl ProvinceCode {
    pub const ALL: [ProvinceCode; 13] = [
        Self::Alberta,
        Self::BritishColumbia,
        Self::Manitoba,
        Self::NewBrunswick,
        Self::NewfoundlandAndLabrador,
        Self::NovaScotia,
        Self::NorthwestTerritories,
        Self::Nunavut,
        Self::Ontario,
        Self::PrinceEdwardIsland,
        Self::Quebec,
        Self::Saskatchewan,
        Self::Yukon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alberta => "AB",
            Self::BritishColumbia => "BC",
            Self::Manitoba => "MB",
            Self::NewBrunswick => "NB",
            Self::NewfoundlandAndLabrador => "NL",
            Self::NovaScotia => "NS",
            Self::NorthwestTerritories => "NT",
            Self::Nunavut => "NU",
            Self::Ontario => "ON",
            Self::PrinceEdwardIsland => "PE",
            Self::Quebec => "QC",
            Self::Saskatchewan => "SK",
            Self::Yukon => "YT",
        }
    }

    /// Parses a two-letter code. Case-insensitive, surrounding whitespace ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let code = s.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|p| p.as_str() == code)
    }
}

impl fmt::Display for ProvinceCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A taxing authority that owns a bracket schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Jurisdiction {
    Federal,
    Provincial(ProvinceCode),
}

impl Jurisdiction {
    /// Code used in the reference data files: `FED` or a province code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Federal => "FED",
            Self::Provincial(p) => p.as_str(),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("FED") {
            return Some(Self::Federal);
        }
        ProvinceCode::parse(s).map(Self::Provincial)
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn province_codes_round_trip_through_parse() {
        for province in ProvinceCode::ALL {
            assert_eq!(ProvinceCode::parse(province.as_str()), Some(province));
        }
    }

    #[test]
    fn province_parse_is_case_insensitive() {
        assert_eq!(ProvinceCode::parse(" qc "), Some(ProvinceCode::Quebec));
    }

    #[test]
    fn province_parse_rejects_unknown_code() {
        assert_eq!(ProvinceCode::parse("XX"), None);
    }

    #[test]
    fn jurisdiction_parse_recognises_federal() {
        assert_eq!(Jurisdiction::parse("fed"), Some(Jurisdiction::Federal));
        assert_eq!(
            Jurisdiction::parse("ON"),
            Some(Jurisdiction::Provincial(ProvinceCode::Ontario))
        );
    }

    #[test]
    fn jurisdiction_displays_data_file_code() {
        assert_eq!(Jurisdiction::Federal.to_string(), "FED");
        assert_eq!(
            Jurisdiction::Provincial(ProvinceCode::BritishColumbia).to_string(),
            "BC"
        );
    }
}
