//! Draft state, validation, and submission for the new-project form.
//!
//! Error keys mirror the wire field names (`name`, `inbetriebnahme`,
//! `ekQuote`, …); turbine-group keys are positional
//! (`anlage_<index>_<field>`) and are re-indexed when a group is removed so
//! no stale message can attach to a group that later shifts into that slot.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::catalog;
use crate::model::{AnlagePayload, NewProjectPayload, ProjectStatus, Windpark};
use crate::provider::ProjectStore;
use crate::validate::{is_not_empty, is_positive, is_valid_percentage};

/// Draft values of the project fields.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    /// Project name (required).
    pub name: String,
    /// Location, free text.
    pub standort: String,
    /// Construction-start date.
    pub baubeginn: Option<NaiveDate>,
    /// Commissioning date.
    pub inbetriebnahme: Option<NaiveDate>,
    /// Initial status.
    pub status: ProjectStatus,
    /// Estimated annual profit (EUR).
    pub gewinn_pro_annum: f64,
    /// Total investment volume (EUR).
    pub investitionsvolumen: f64,
    /// Equity ratio in percent.
    pub ek_quote: f64,
    /// Debt interest rate in percent.
    pub fk_zins: f64,
    /// Return on investment in percent.
    pub roi: f64,
}

/// A turbine-group row of the draft.
#[derive(Debug, Clone)]
pub struct AnlageDraft {
    /// Draft-local identifier, generated at row creation.
    pub id: String,
    /// Chosen manufacturer, empty while the row is unfinished.
    pub hersteller: String,
    /// Chosen model; reset whenever the manufacturer changes.
    pub modell: String,
    /// Number of turbines.
    pub anzahl: u32,
}

impl AnlageDraft {
    fn empty() -> Self {
        Self {
            id: fresh_id(),
            hersteller: String::new(),
            modell: String::new(),
            anzahl: 1,
        }
    }
}

/// Generates a draft-local row identifier.
fn fresh_id() -> String {
    format!("{:08x}", rand::random::<u32>())
}

/// Free-text fields of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    /// Project name.
    Name,
    /// Location.
    Standort,
}

impl TextField {
    /// Error-map key for this field.
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Standort => "standort",
        }
    }
}

/// Date fields of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    /// Construction start.
    Baubeginn,
    /// Commissioning.
    Inbetriebnahme,
}

impl DateField {
    /// Error-map key for this field.
    pub fn key(self) -> &'static str {
        match self {
            Self::Baubeginn => "baubeginn",
            Self::Inbetriebnahme => "inbetriebnahme",
        }
    }
}

/// Numeric financial fields of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    /// Annual profit estimate.
    GewinnProAnnum,
    /// Investment volume.
    Investitionsvolumen,
    /// Equity ratio (percent).
    EkQuote,
    /// Debt interest rate (percent).
    FkZins,
    /// Return on investment (percent).
    Roi,
}

impl AmountField {
    /// Error-map key for this field (wire name).
    pub fn key(self) -> &'static str {
        match self {
            Self::GewinnProAnnum => "gewinnProAnnum",
            Self::Investitionsvolumen => "investitionsvolumen",
            Self::EkQuote => "ekQuote",
            Self::FkZins => "fkZins",
            Self::Roi => "roi",
        }
    }
}

/// Input to a turbine-group row.
#[derive(Debug, Clone)]
pub enum AnlageInput {
    /// Set the manufacturer; resets the row's model.
    Hersteller(String),
    /// Set the model.
    Modell(String),
    /// Set the turbine count.
    Anzahl(u32),
}

impl AnlageInput {
    fn field_name(&self) -> &'static str {
        match self {
            Self::Hersteller(_) => "hersteller",
            Self::Modell(_) => "modell",
            Self::Anzahl(_) => "anzahl",
        }
    }
}

/// Result of a submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; the error map holds the field messages.
    Invalid,
    /// The store accepted the project; carries the server-assigned record.
    Created(Windpark),
    /// The store rejected the request or was unreachable; draft preserved.
    Failed,
}

/// Composes a positional error key for a turbine-group field.
fn anlage_key(index: usize, field: &str) -> String {
    format!("anlage_{index}_{field}")
}

/// Splits `anlage_<index>_<field>` back into its parts.
fn parse_anlage_key(key: &str) -> Option<(usize, &str)> {
    let rest = key.strip_prefix("anlage_")?;
    let (index, field) = rest.split_once('_')?;
    Some((index.parse().ok()?, field))
}

/// State manager for the new-project form.
pub struct ProjectForm {
    /// Draft project fields.
    pub data: ProjectDraft,
    anlagen: Vec<AnlageDraft>,
    errors: BTreeMap<String, String>,
    show_validation: bool,
    is_submitting: bool,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectForm {
    /// Creates an empty form with exactly one blank turbine-group row.
    pub fn new() -> Self {
        Self {
            data: ProjectDraft::default(),
            anlagen: vec![AnlageDraft::empty()],
            errors: BTreeMap::new(),
            show_validation: false,
            is_submitting: false,
        }
    }

    /// The draft turbine-group rows.
    pub fn anlagen(&self) -> &[AnlageDraft] {
        &self.anlagen
    }

    /// The current field-keyed error map.
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Message for one field key, if any.
    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    /// Whether a validation pass has run (errors should be shown inline).
    pub fn show_validation(&self) -> bool {
        self.show_validation
    }

    /// Whether a create request is in flight.
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    fn clear_error(&mut self, key: &str) {
        self.errors.remove(key);
    }

    /// Overwrites a text field, optimistically clearing its error.
    pub fn set_text(&mut self, field: TextField, value: &str) {
        match field {
            TextField::Name => self.data.name = value.to_string(),
            TextField::Standort => self.data.standort = value.to_string(),
        }
        self.clear_error(field.key());
    }

    /// Overwrites a date field, optimistically clearing its error.
    pub fn set_date(&mut self, field: DateField, value: Option<NaiveDate>) {
        match field {
            DateField::Baubeginn => self.data.baubeginn = value,
            DateField::Inbetriebnahme => self.data.inbetriebnahme = value,
        }
        self.clear_error(field.key());
    }

    /// Overwrites a financial field, optimistically clearing its error.
    pub fn set_amount(&mut self, field: AmountField, value: f64) {
        match field {
            AmountField::GewinnProAnnum => self.data.gewinn_pro_annum = value,
            AmountField::Investitionsvolumen => self.data.investitionsvolumen = value,
            AmountField::EkQuote => self.data.ek_quote = value,
            AmountField::FkZins => self.data.fk_zins = value,
            AmountField::Roi => self.data.roi = value,
        }
        self.clear_error(field.key());
    }

    /// Sets the draft status.
    pub fn set_status(&mut self, status: ProjectStatus) {
        self.data.status = status;
    }

    /// Overwrites one field of the turbine group at `index`.
    ///
    /// Setting the manufacturer resets the row's model, since model lists
    /// are manufacturer-specific. Out-of-range indices are ignored.
    pub fn set_anlage(&mut self, index: usize, input: AnlageInput) {
        let key = anlage_key(index, input.field_name());
        let Some(row) = self.anlagen.get_mut(index) else {
            return;
        };
        match input {
            AnlageInput::Hersteller(hersteller) => {
                row.hersteller = hersteller;
                row.modell.clear();
            }
            AnlageInput::Modell(modell) => row.modell = modell,
            AnlageInput::Anzahl(anzahl) => row.anzahl = anzahl,
        }
        self.clear_error(&key);
    }

    /// Appends a blank turbine-group row with a fresh identifier.
    pub fn add_anlage(&mut self) {
        self.anlagen.push(AnlageDraft::empty());
    }

    /// Removes the turbine group at `index`.
    ///
    /// No-op while only one row remains or when `index` is out of range.
    /// Positional error keys for the removed row are dropped and keys for
    /// all higher indices are shifted down to follow their rows.
    pub fn remove_anlage(&mut self, index: usize) {
        if self.anlagen.len() <= 1 || index >= self.anlagen.len() {
            return;
        }
        self.anlagen.remove(index);

        let mut remapped = BTreeMap::new();
        for (key, message) in std::mem::take(&mut self.errors) {
            match parse_anlage_key(&key) {
                Some((i, _)) if i == index => {}
                Some((i, field)) if i > index => {
                    remapped.insert(anlage_key(i - 1, field), message);
                }
                _ => {
                    remapped.insert(key, message);
                }
            }
        }
        self.errors = remapped;
    }

    /// Recomputes the full error map from the draft; returns `true` when
    /// the draft is valid.
    pub fn validate(&mut self) -> bool {
        let mut errors = BTreeMap::new();

        if !is_not_empty(&self.data.name) {
            errors.insert(
                "name".to_string(),
                "Projektname ist erforderlich".to_string(),
            );
        }

        if let (Some(start), Some(go_live)) = (self.data.baubeginn, self.data.inbetriebnahme) {
            if go_live <= start {
                errors.insert(
                    "inbetriebnahme".to_string(),
                    "Inbetriebnahme muss nach Baubeginn liegen".to_string(),
                );
            }
        }

        // Rows without a manufacturer are unfinished and skippable; they are
        // filtered out of the payload at submit time.
        for (i, row) in self.anlagen.iter().enumerate() {
            if !is_not_empty(&row.hersteller) {
                continue;
            }
            if catalog::models_for(&row.hersteller).is_none() {
                errors.insert(
                    anlage_key(i, "hersteller"),
                    "Unbekannter Hersteller".to_string(),
                );
            }
            if !is_not_empty(&row.modell) {
                errors.insert(anlage_key(i, "modell"), "Modell ist erforderlich".to_string());
            } else if !catalog::is_valid_model(&row.hersteller, &row.modell) {
                errors.insert(
                    anlage_key(i, "modell"),
                    "Modell passt nicht zum Hersteller".to_string(),
                );
            }
            if !is_positive(f64::from(row.anzahl)) {
                errors.insert(anlage_key(i, "anzahl"), "Anzahl muss positiv sein".to_string());
            }
        }

        // Financial fields are optional; validated only when provided.
        let d = &self.data;
        for (field, value) in [
            (AmountField::GewinnProAnnum, d.gewinn_pro_annum),
            (AmountField::Investitionsvolumen, d.investitionsvolumen),
            (AmountField::FkZins, d.fk_zins),
            (AmountField::Roi, d.roi),
        ] {
            if value != 0.0 && !is_positive(value) {
                errors.insert(field.key().to_string(), "Wert muss positiv sein".to_string());
            }
        }
        if d.ek_quote != 0.0 && !is_valid_percentage(d.ek_quote) {
            errors.insert(
                AmountField::EkQuote.key().to_string(),
                "EK-Quote muss zwischen 0 und 100 liegen".to_string(),
            );
        }

        self.errors = errors;
        self.show_validation = true;
        self.errors.is_empty()
    }

    /// Builds the create payload, silently dropping unfinished rows.
    fn build_payload(&self) -> NewProjectPayload {
        NewProjectPayload {
            name: self.data.name.clone(),
            standort: self.data.standort.clone(),
            baubeginn: self.data.baubeginn,
            inbetriebnahme: self.data.inbetriebnahme,
            status: self.data.status,
            gewinn_pro_annum: self.data.gewinn_pro_annum,
            investitionsvolumen: self.data.investitionsvolumen,
            ek_quote: self.data.ek_quote,
            fk_zins: self.data.fk_zins,
            roi: self.data.roi,
            anlagen: self
                .anlagen
                .iter()
                .filter(|row| is_not_empty(&row.hersteller))
                .map(|row| AnlagePayload {
                    hersteller: row.hersteller.clone(),
                    modell: row.modell.clone(),
                    anzahl: row.anzahl,
                })
                .collect(),
        }
    }

    /// Validates and, if valid, sends the draft to the store.
    ///
    /// On failure the draft is left untouched so the user can retry; the
    /// submitting flag is cleared in every case.
    pub fn submit<S: ProjectStore + ?Sized>(&mut self, store: &S) -> SubmitOutcome {
        if !self.validate() {
            return SubmitOutcome::Invalid;
        }

        self.is_submitting = true;
        let payload = self.build_payload();
        let outcome = match store.create(&payload) {
            Ok(created) => SubmitOutcome::Created(created),
            Err(e) => {
                log::error!("project create failed: {e}");
                SubmitOutcome::Failed
            }
        };
        self.is_submitting = false;
        outcome
    }
}
