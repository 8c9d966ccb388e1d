//! Dashboard KPI aggregation over the project collection.

use std::fmt;

use serde::Serialize;

use crate::format;
use crate::model::{ProjectStatus, Windpark};

/// The three overview summary numbers.
///
/// Derived, never persisted. An empty collection yields all zeros rather
/// than NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    /// Number of projects with status "Laufend".
    pub laufende_projekte: usize,
    /// Arithmetic mean of the annual-profit estimate (EUR).
    pub durchschnittlicher_gewinn: f64,
    /// Arithmetic mean of the equity ratio (percent).
    pub durchschnittliche_ek_quote: f64,
}

impl KpiSummary {
    /// Computes the summary from the current project list.
    pub fn from_projects(projects: &[Windpark]) -> Self {
        if projects.is_empty() {
            return Self {
                laufende_projekte: 0,
                durchschnittlicher_gewinn: 0.0,
                durchschnittliche_ek_quote: 0.0,
            };
        }

        let n = projects.len() as f64;
        let laufende = projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Laufend)
            .count();
        let gewinn_sum: f64 = projects.iter().map(|p| p.gewinn_pro_annum).sum();
        let ek_sum: f64 = projects.iter().map(|p| p.ek_quote).sum();

        Self {
            laufende_projekte: laufende,
            durchschnittlicher_gewinn: gewinn_sum / n,
            durchschnittliche_ek_quote: ek_sum / n,
        }
    }
}

impl fmt::Display for KpiSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Projekt-KPIs ---")?;
        writeln!(f, "Laufende Projekte:  {}", self.laufende_projekte)?;
        writeln!(
            f,
            "Ø Gewinn p.a.:      {}",
            format::format_currency(self.durchschnittlicher_gewinn)
        )?;
        write!(
            f,
            "Ø EK-Quote:         {}",
            format::format_percentage(self.durchschnittliche_ek_quote)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_projects;

    #[test]
    fn empty_collection_is_all_zero() {
        let kpi = KpiSummary::from_projects(&[]);
        assert_eq!(kpi.laufende_projekte, 0);
        assert_eq!(kpi.durchschnittlicher_gewinn, 0.0);
        assert_eq!(kpi.durchschnittliche_ek_quote, 0.0);
    }

    #[test]
    fn running_count_matches_status() {
        let projects = seed_projects();
        let expected = projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Laufend)
            .count();
        let kpi = KpiSummary::from_projects(&projects);
        assert_eq!(kpi.laufende_projekte, expected);
        assert_eq!(kpi.laufende_projekte, 4);
    }

    #[test]
    fn averages_are_arithmetic_means() {
        let projects = seed_projects();
        let n = projects.len() as f64;
        let gewinn_mean: f64 = projects.iter().map(|p| p.gewinn_pro_annum).sum::<f64>() / n;
        let ek_mean: f64 = projects.iter().map(|p| p.ek_quote).sum::<f64>() / n;

        let kpi = KpiSummary::from_projects(&projects);
        assert!((kpi.durchschnittlicher_gewinn - gewinn_mean).abs() < 1e-6);
        assert!((kpi.durchschnittliche_ek_quote - ek_mean).abs() < 1e-6);
    }

    #[test]
    fn single_project_average_is_its_value() {
        let projects = vec![seed_projects().remove(0)];
        let kpi = KpiSummary::from_projects(&projects);
        assert_eq!(kpi.durchschnittlicher_gewinn, 2_850_000.0);
        assert_eq!(kpi.durchschnittliche_ek_quote, 35.0);
    }
}
