// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Keys for the report cache.
//!
//! A key is a report type plus its parameters in canonical form: pairs
//! sorted by name, encoded `name=value` and joined with `&`. Two parameter
//! sets with the same pairs always produce the same key.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Reports served by the reporting engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    ClientFrequency,
    RoomPopularity,
    SeasonalSales,
    Dashboard,
    GeneralStats,
    Profitability,
}

impl ReportType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ClientFrequency => "client_frequency",
            Self::RoomPopularity => "room_popularity",
            Self::SeasonalSales => "seasonal_sales",
            Self::Dashboard => "dashboard",
            Self::GeneralStats => "general_stats",
            Self::Profitability => "profitability",
        }
    }

    /// Whether results of this report are stored in the cache.
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        matches!(
            self,
            Self::ClientFrequency | Self::RoomPopularity | Self::SeasonalSales | Self::Profitability
        )
    }
}

impl FromStr for ReportType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client_frequency" => Ok(Self::ClientFrequency),
            "room_popularity" => Ok(Self::RoomPopularity),
            "seasonal_sales" => Ok(Self::SeasonalSales),
            "dashboard" => Ok(Self::Dashboard),
            "general_stats" => Ok(Self::GeneralStats),
            "profitability" => Ok(Self::Profitability),
            _ => Err(ReportError::UnknownReportType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A report's parameters, kept sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportParameters(BTreeMap<String, String>);

impl ReportParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a parameter.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// The canonical `a=1&b=2` encoding.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.0
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<String>>()
            .join("&")
    }

    /// Decodes a canonical encoding.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::MalformedParameters` if a pair has no `=`.
    pub fn from_canonical(encoded: &str) -> Result<Self, ReportError> {
        let mut parameters: BTreeMap<String, String> = BTreeMap::new();
        for pair in encoded.split('&').filter(|pair| !pair.is_empty()) {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| ReportError::MalformedParameters(encoded.to_string()))?;
            parameters.insert(name.to_string(), value.to_string());
        }
        Ok(Self(parameters))
    }
}

/// Identifies one cached report result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportKey {
    pub report_type: ReportType,
    pub parameters: String,
}

impl ReportKey {
    #[must_use]
    pub fn new(report_type: ReportType, parameters: &ReportParameters) -> Self {
        Self {
            report_type,
            parameters: parameters.canonical(),
        }
    }
}

impl std::fmt::Display for ReportKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}?{}", self.report_type, self.parameters)
    }
}
