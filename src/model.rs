//! Domain and wire types for Windpark projects.
//!
//! JSON field names follow the `/api/v1` wire contract: camelCase with the
//! German domain vocabulary (`gewinnProAnnum`, `ekQuote`, `fkZins`, …).
//! Dates travel as ISO-8601 strings.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a Windpark project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Draft — not yet under construction.
    #[default]
    Entwurf,
    /// Running — under construction or producing.
    Laufend,
    /// Completed.
    Abgeschlossen,
}

impl ProjectStatus {
    /// All statuses in selection order.
    pub const ALL: [Self; 3] = [Self::Entwurf, Self::Laufend, Self::Abgeschlossen];

    /// Display label (identical to the wire representation).
    pub fn label(self) -> &'static str {
        match self {
            Self::Entwurf => "Entwurf",
            Self::Laufend => "Laufend",
            Self::Abgeschlossen => "Abgeschlossen",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A turbine-group line item within a project.
///
/// The `id` is unique within its parent project only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anlage {
    /// Identifier, unique within the parent project.
    pub id: String,
    /// Manufacturer name (from the static catalog).
    pub hersteller: String,
    /// Model name (must belong to the manufacturer's model list).
    pub modell: String,
    /// Number of turbines of this type (>= 1).
    pub anzahl: u32,
}

/// A wind-farm investment project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Windpark {
    /// Unique identifier, assigned by the backing store.
    pub id: String,
    /// Project name.
    pub name: String,
    /// Location, free text.
    #[serde(default)]
    pub standort: String,
    /// Construction-start date.
    #[serde(default)]
    pub baubeginn: Option<NaiveDate>,
    /// Commissioning date, strictly after `baubeginn` when both are set.
    #[serde(default)]
    pub inbetriebnahme: Option<NaiveDate>,
    /// Current status.
    #[serde(default)]
    pub status: ProjectStatus,
    /// Estimated annual profit (EUR).
    #[serde(default)]
    pub gewinn_pro_annum: f64,
    /// Total investment volume (EUR).
    #[serde(default)]
    pub investitionsvolumen: f64,
    /// Equity ratio in percent (0-100).
    #[serde(default)]
    pub ek_quote: f64,
    /// Debt interest rate in percent.
    #[serde(default)]
    pub fk_zins: f64,
    /// Return on investment in percent.
    #[serde(default)]
    pub roi: f64,
    /// Turbine groups, in entry order.
    #[serde(default)]
    pub anlagen: Vec<Anlage>,
}

impl Windpark {
    /// Total turbine count across all groups.
    pub fn total_anlagen(&self) -> u32 {
        self.anlagen.iter().map(|a| a.anzahl).sum()
    }
}

impl fmt::Display for Windpark {
    /// One-line overview row: name, location, status, key financials.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<32} {:<36} {:<13} {:>4} WKA  {:>14}  EK {:>6}",
            crate::format::truncate_text(&self.name, 32),
            crate::format::truncate_text(&self.standort, 36),
            self.status,
            self.total_anlagen(),
            crate::format::format_currency(self.gewinn_pro_annum),
            crate::format::format_percentage(self.ek_quote),
        )
    }
}

/// Turbine-group entry of a create payload (no id — the store assigns one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnlagePayload {
    /// Manufacturer name.
    pub hersteller: String,
    /// Model name.
    pub modell: String,
    /// Number of turbines of this type.
    pub anzahl: u32,
}

/// Body of `POST /api/v1/projects`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectPayload {
    /// Project name (required).
    pub name: String,
    /// Location, free text.
    #[serde(default)]
    pub standort: String,
    /// Construction-start date.
    #[serde(default)]
    pub baubeginn: Option<NaiveDate>,
    /// Commissioning date.
    #[serde(default)]
    pub inbetriebnahme: Option<NaiveDate>,
    /// Initial status.
    #[serde(default)]
    pub status: ProjectStatus,
    /// Estimated annual profit (EUR).
    #[serde(default)]
    pub gewinn_pro_annum: f64,
    /// Total investment volume (EUR).
    #[serde(default)]
    pub investitionsvolumen: f64,
    /// Equity ratio in percent.
    #[serde(default)]
    pub ek_quote: f64,
    /// Debt interest rate in percent.
    #[serde(default)]
    pub fk_zins: f64,
    /// Return on investment in percent.
    #[serde(default)]
    pub roi: f64,
    /// Turbine groups; rows without a manufacturer are dropped before send.
    #[serde(default)]
    pub anlagen: Vec<AnlagePayload>,
}
