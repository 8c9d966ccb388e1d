//! Dashboard application state and page navigation.

use chrono::NaiveDate;

use crate::catalog;
use crate::form::{
    AmountField, AnlageInput, DateField, ProjectForm, SubmitOutcome, TextField,
};
use crate::kpi::KpiSummary;
use crate::model::{ProjectStatus, Windpark};
use crate::provider::{ProjectCollection, ProjectStore};

/// Read-only detail tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    /// Technical data and turbine groups.
    Windpark,
    /// Yield estimates.
    Gutachten,
    /// Tariffs.
    Tarife,
    /// Costs.
    Kosten,
    /// Profit and loss.
    GuV,
    /// Investment and financing.
    Investition,
}

impl DetailTab {
    /// All tabs in display order.
    pub const ALL: [Self; 6] = [
        Self::Windpark,
        Self::Gutachten,
        Self::Tarife,
        Self::Kosten,
        Self::GuV,
        Self::Investition,
    ];

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Windpark => "Windpark",
            Self::Gutachten => "Gutachten",
            Self::Tarife => "Tarife",
            Self::Kosten => "Kosten",
            Self::GuV => "GuV",
            Self::Investition => "Investition",
        }
    }

    /// Position within [`Self::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Neighbor tab, wrapping around.
    pub fn cycled(self, step: i32) -> Self {
        let len = Self::ALL.len() as i32;
        let next = (self.index() as i32 + step).rem_euclid(len);
        Self::ALL[next as usize]
    }
}

/// The current page.
///
/// Detail pages are only reachable with a selected project; the variant
/// carries the selection so that invalid states are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// KPI cards and the project table.
    Overview,
    /// The new-project form.
    NewProject,
    /// Read-only detail tabs for the project at `index`.
    Detail {
        /// Index into the displayed project list.
        index: usize,
        /// Active tab.
        tab: DetailTab,
    },
}

/// One focusable input of the form page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSlot {
    /// Free-text field.
    Text(TextField),
    /// Date field, entered as `YYYY-MM-DD`.
    Date(DateField),
    /// Status selector (cycled with ←/→).
    Status,
    /// Numeric financial field.
    Amount(AmountField),
    /// Manufacturer selector of row `usize` (cycled with ←/→).
    AnlageHersteller(usize),
    /// Model selector of row `usize` (cycled with ←/→).
    AnlageModell(usize),
    /// Turbine count of row `usize`.
    AnlageAnzahl(usize),
}

impl FormSlot {
    /// Field label shown next to the input.
    pub fn label(self) -> String {
        match self {
            Self::Text(TextField::Name) => "Projektname".to_string(),
            Self::Text(TextField::Standort) => "Standort".to_string(),
            Self::Date(DateField::Baubeginn) => "Baubeginn (JJJJ-MM-TT)".to_string(),
            Self::Date(DateField::Inbetriebnahme) => "Inbetriebnahme (JJJJ-MM-TT)".to_string(),
            Self::Status => "Status".to_string(),
            Self::Amount(AmountField::GewinnProAnnum) => "Gewinn p.a. (€)".to_string(),
            Self::Amount(AmountField::Investitionsvolumen) => {
                "Investitionsvolumen (€)".to_string()
            }
            Self::Amount(AmountField::EkQuote) => "EK-Quote (%)".to_string(),
            Self::Amount(AmountField::FkZins) => "FK-Zins (%)".to_string(),
            Self::Amount(AmountField::Roi) => "RoI (%)".to_string(),
            Self::AnlageHersteller(i) => format!("Anlage {} — Hersteller", i + 1),
            Self::AnlageModell(i) => format!("Anlage {} — Modell", i + 1),
            Self::AnlageAnzahl(i) => format!("Anlage {} — Anzahl", i + 1),
        }
    }

    /// Key into the form's error map.
    pub fn error_key(self) -> String {
        match self {
            Self::Text(f) => f.key().to_string(),
            Self::Date(f) => f.key().to_string(),
            Self::Status => "status".to_string(),
            Self::Amount(f) => f.key().to_string(),
            Self::AnlageHersteller(i) => format!("anlage_{i}_hersteller"),
            Self::AnlageModell(i) => format!("anlage_{i}_modell"),
            Self::AnlageAnzahl(i) => format!("anlage_{i}_anzahl"),
        }
    }

    /// Whether typed characters edit this slot (selectors are cycled instead).
    pub fn is_free_text(self) -> bool {
        !matches!(
            self,
            Self::Status | Self::AnlageHersteller(_) | Self::AnlageModell(_)
        )
    }
}

/// Dashboard application state.
pub struct App {
    store: Box<dyn ProjectStore>,
    /// Displayed project collection.
    pub collection: ProjectCollection,
    /// Draft of the new-project form.
    pub form: ProjectForm,
    /// Current page.
    pub page: Page,
    /// Overview table cursor.
    pub selected: usize,
    /// Focused form slot index.
    pub focus: usize,
    /// Edit buffer of the focused free-text slot.
    pub input: String,
    /// One-line status message shown at the bottom.
    pub status_line: Option<String>,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates the app and performs the initial list load.
    pub fn new(store: Box<dyn ProjectStore>, fallback: Vec<Windpark>) -> Self {
        let mut collection = ProjectCollection::new(fallback);
        collection.refresh(store.as_ref());
        Self {
            store,
            collection,
            form: ProjectForm::new(),
            page: Page::Overview,
            selected: 0,
            focus: 0,
            input: String::new(),
            status_line: None,
            quit: false,
        }
    }

    /// Current KPI summary over the displayed projects.
    pub fn kpis(&self) -> KpiSummary {
        KpiSummary::from_projects(self.collection.projects())
    }

    /// Reloads the project list.
    pub fn refresh(&mut self) {
        self.collection.refresh(self.store.as_ref());
        let count = self.collection.projects().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
        self.status_line = None;
    }

    /// Moves the overview cursor down.
    pub fn select_next(&mut self) {
        let count = self.collection.projects().len();
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
        }
    }

    /// Moves the overview cursor up.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Opens the detail page for the selected project, if any.
    pub fn open_detail(&mut self) {
        if self.selected < self.collection.projects().len() {
            self.page = Page::Detail {
                index: self.selected,
                tab: DetailTab::Windpark,
            };
        }
    }

    /// Switches the detail tab.
    pub fn cycle_tab(&mut self, step: i32) {
        if let Page::Detail { index, tab } = self.page {
            self.page = Page::Detail {
                index,
                tab: tab.cycled(step),
            };
        }
    }

    /// Opens a fresh new-project form.
    pub fn open_form(&mut self) {
        self.form = ProjectForm::new();
        self.focus = 0;
        self.page = Page::NewProject;
        self.status_line = None;
        self.load_input();
    }

    /// Returns to the overview.
    pub fn back_to_overview(&mut self) {
        self.page = Page::Overview;
    }

    /// All form slots in traversal order: project fields, then one
    /// hersteller/modell/anzahl triple per turbine-group row.
    pub fn form_slots(&self) -> Vec<FormSlot> {
        let mut slots = vec![
            FormSlot::Text(TextField::Name),
            FormSlot::Text(TextField::Standort),
            FormSlot::Date(DateField::Baubeginn),
            FormSlot::Date(DateField::Inbetriebnahme),
            FormSlot::Status,
            FormSlot::Amount(AmountField::GewinnProAnnum),
            FormSlot::Amount(AmountField::Investitionsvolumen),
            FormSlot::Amount(AmountField::EkQuote),
            FormSlot::Amount(AmountField::FkZins),
            FormSlot::Amount(AmountField::Roi),
        ];
        for i in 0..self.form.anlagen().len() {
            slots.push(FormSlot::AnlageHersteller(i));
            slots.push(FormSlot::AnlageModell(i));
            slots.push(FormSlot::AnlageAnzahl(i));
        }
        slots
    }

    /// The focused slot.
    pub fn current_slot(&self) -> FormSlot {
        let slots = self.form_slots();
        slots[self.focus.min(slots.len() - 1)]
    }

    /// Display text of a slot's current draft value.
    pub fn slot_value(&self, slot: FormSlot) -> String {
        let d = &self.form.data;
        match slot {
            FormSlot::Text(TextField::Name) => d.name.clone(),
            FormSlot::Text(TextField::Standort) => d.standort.clone(),
            FormSlot::Date(DateField::Baubeginn) => {
                d.baubeginn.map(|x| x.to_string()).unwrap_or_default()
            }
            FormSlot::Date(DateField::Inbetriebnahme) => {
                d.inbetriebnahme.map(|x| x.to_string()).unwrap_or_default()
            }
            FormSlot::Status => d.status.label().to_string(),
            FormSlot::Amount(field) => {
                let value = match field {
                    AmountField::GewinnProAnnum => d.gewinn_pro_annum,
                    AmountField::Investitionsvolumen => d.investitionsvolumen,
                    AmountField::EkQuote => d.ek_quote,
                    AmountField::FkZins => d.fk_zins,
                    AmountField::Roi => d.roi,
                };
                if value == 0.0 {
                    String::new()
                } else {
                    format!("{value}")
                }
            }
            FormSlot::AnlageHersteller(i) => self
                .form
                .anlagen()
                .get(i)
                .map(|r| r.hersteller.clone())
                .unwrap_or_default(),
            FormSlot::AnlageModell(i) => self
                .form
                .anlagen()
                .get(i)
                .map(|r| r.modell.clone())
                .unwrap_or_default(),
            FormSlot::AnlageAnzahl(i) => self
                .form
                .anlagen()
                .get(i)
                .map(|r| r.anzahl.to_string())
                .unwrap_or_default(),
        }
    }

    /// Fills the edit buffer from the focused slot.
    fn load_input(&mut self) {
        let slot = self.current_slot();
        self.input = if slot.is_free_text() {
            self.slot_value(slot)
        } else {
            String::new()
        };
    }

    /// Moves the form focus, committing the edit buffer first.
    pub fn focus_move(&mut self, step: i32) {
        self.commit_input();
        let len = self.form_slots().len() as i32;
        self.focus = (self.focus as i32 + step).rem_euclid(len) as usize;
        self.load_input();
    }

    /// Parses the edit buffer into the focused field.
    pub fn commit_input(&mut self) {
        let slot = self.current_slot();
        let text = self.input.trim().to_string();
        match slot {
            FormSlot::Text(field) => self.form.set_text(field, &text),
            FormSlot::Date(field) => {
                if text.is_empty() {
                    self.form.set_date(field, None);
                } else {
                    match NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
                        Ok(date) => self.form.set_date(field, Some(date)),
                        Err(_) => {
                            self.status_line =
                                Some(format!("Ungültiges Datum \"{text}\" (JJJJ-MM-TT)"));
                        }
                    }
                }
            }
            FormSlot::Amount(field) => {
                if text.is_empty() {
                    self.form.set_amount(field, 0.0);
                } else {
                    match text.replace(',', ".").parse::<f64>() {
                        Ok(value) => self.form.set_amount(field, value),
                        Err(_) => {
                            self.status_line = Some(format!("Ungültige Zahl \"{text}\""));
                        }
                    }
                }
            }
            FormSlot::AnlageAnzahl(i) => match text.parse::<u32>() {
                Ok(anzahl) => self.form.set_anlage(i, AnlageInput::Anzahl(anzahl)),
                Err(_) => {
                    self.status_line = Some(format!("Ungültige Anzahl \"{text}\""));
                }
            },
            // selectors are cycled, not typed
            FormSlot::Status | FormSlot::AnlageHersteller(_) | FormSlot::AnlageModell(_) => {}
        }
    }

    /// Appends a character to the edit buffer of a free-text slot.
    pub fn input_char(&mut self, c: char) {
        if self.current_slot().is_free_text() {
            self.input.push(c);
        }
    }

    /// Removes the last character of the edit buffer.
    pub fn input_backspace(&mut self) {
        if self.current_slot().is_free_text() {
            self.input.pop();
        }
    }

    /// Cycles the focused selector slot (status, manufacturer, model).
    pub fn cycle_selector(&mut self, step: i32) {
        match self.current_slot() {
            FormSlot::Status => {
                let all = ProjectStatus::ALL;
                let pos = all
                    .iter()
                    .position(|s| *s == self.form.data.status)
                    .unwrap_or(0) as i32;
                let next = (pos + step).rem_euclid(all.len() as i32) as usize;
                self.form.set_status(all[next]);
            }
            FormSlot::AnlageHersteller(i) => {
                let mut options: Vec<&str> = vec![""];
                options.extend(catalog::manufacturers());
                let current = self
                    .form
                    .anlagen()
                    .get(i)
                    .map(|r| r.hersteller.clone())
                    .unwrap_or_default();
                let pos = options.iter().position(|o| *o == current).unwrap_or(0) as i32;
                let next = (pos + step).rem_euclid(options.len() as i32) as usize;
                self.form
                    .set_anlage(i, AnlageInput::Hersteller(options[next].to_string()));
            }
            FormSlot::AnlageModell(i) => {
                let hersteller = self
                    .form
                    .anlagen()
                    .get(i)
                    .map(|r| r.hersteller.clone())
                    .unwrap_or_default();
                let Some(models) = catalog::models_for(&hersteller) else {
                    self.status_line = Some("Zuerst Hersteller wählen".to_string());
                    return;
                };
                let mut options: Vec<&str> = vec![""];
                options.extend(models);
                let current = self
                    .form
                    .anlagen()
                    .get(i)
                    .map(|r| r.modell.clone())
                    .unwrap_or_default();
                let pos = options.iter().position(|o| *o == current).unwrap_or(0) as i32;
                let next = (pos + step).rem_euclid(options.len() as i32) as usize;
                self.form
                    .set_anlage(i, AnlageInput::Modell(options[next].to_string()));
            }
            _ => {}
        }
    }

    /// Appends a blank turbine-group row and focuses it.
    pub fn add_anlage_row(&mut self) {
        self.commit_input();
        self.form.add_anlage();
        // focus the new row's manufacturer slot
        self.focus = self.form_slots().len() - 3;
        self.load_input();
    }

    /// Removes the turbine-group row under the cursor, if focus is on one.
    pub fn remove_current_anlage_row(&mut self) {
        let row = match self.current_slot() {
            FormSlot::AnlageHersteller(i)
            | FormSlot::AnlageModell(i)
            | FormSlot::AnlageAnzahl(i) => i,
            _ => return,
        };
        self.form.remove_anlage(row);
        let len = self.form_slots().len();
        if self.focus >= len {
            self.focus = len - 1;
        }
        self.load_input();
    }

    /// Validates and submits the draft.
    pub fn submit_form(&mut self) {
        self.commit_input();
        let store = self.store.as_ref();
        match self.form.submit(store) {
            SubmitOutcome::Created(created) => {
                self.status_line = Some(format!(
                    "Projekt \"{}\" wurde erfolgreich angelegt!",
                    created.name
                ));
                self.collection.push(created);
                self.page = Page::Overview;
            }
            SubmitOutcome::Failed => {
                self.status_line =
                    Some("Speichern fehlgeschlagen — Eingaben bleiben erhalten".to_string());
            }
            SubmitOutcome::Invalid => {
                self.status_line = Some("Bitte markierte Felder korrigieren".to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MemoryStore;
    use crate::seed::seed_projects;

    fn make_app() -> App {
        let store = Box::new(MemoryStore::new(seed_projects()));
        App::new(store, Vec::new())
    }

    #[test]
    fn initial_load_fills_collection() {
        let app = make_app();
        assert_eq!(app.collection.projects().len(), 6);
        assert_eq!(app.page, Page::Overview);
        assert_eq!(app.kpis().laufende_projekte, 4);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut app = make_app();
        for _ in 0..20 {
            app.select_next();
        }
        assert_eq!(app.selected, 5);
        for _ in 0..20 {
            app.select_prev();
        }
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn detail_page_carries_selection_and_cycles_tabs() {
        let mut app = make_app();
        app.select_next();
        app.open_detail();
        assert_eq!(
            app.page,
            Page::Detail {
                index: 1,
                tab: DetailTab::Windpark
            }
        );

        app.cycle_tab(1);
        assert_eq!(
            app.page,
            Page::Detail {
                index: 1,
                tab: DetailTab::Gutachten
            }
        );

        app.cycle_tab(-2);
        assert_eq!(
            app.page,
            Page::Detail {
                index: 1,
                tab: DetailTab::Investition
            }
        );
    }

    #[test]
    fn form_traversal_commits_text_input() {
        let mut app = make_app();
        app.open_form();
        // focus 0 is the name field
        for c in "Testpark".chars() {
            app.input_char(c);
        }
        app.focus_move(1);
        assert_eq!(app.form.data.name, "Testpark");
    }

    #[test]
    fn date_input_parses_iso() {
        let mut app = make_app();
        app.open_form();
        app.focus = 2; // Baubeginn
        app.input = "2025-03-01".to_string();
        app.commit_input();
        assert_eq!(
            app.form.data.baubeginn,
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
    }

    #[test]
    fn invalid_date_keeps_old_value_and_sets_notice() {
        let mut app = make_app();
        app.open_form();
        app.focus = 2;
        app.input = "gestern".to_string();
        app.commit_input();
        assert!(app.form.data.baubeginn.is_none());
        assert!(app.status_line.is_some());
    }

    #[test]
    fn selector_cycling_sets_manufacturer_and_resets_model() {
        let mut app = make_app();
        app.open_form();
        // first anlage row: slots 10/11/12
        app.focus = 10;
        app.cycle_selector(1);
        assert_eq!(app.form.anlagen()[0].hersteller, "Vestas");

        app.focus = 11;
        app.cycle_selector(1);
        assert_eq!(app.form.anlagen()[0].modell, "V112-3.0");

        // changing the manufacturer resets the model
        app.focus = 10;
        app.cycle_selector(1);
        assert_eq!(app.form.anlagen()[0].hersteller, "Siemens Gamesa");
        assert_eq!(app.form.anlagen()[0].modell, "");
    }

    #[test]
    fn add_and_remove_anlage_rows_adjust_slots() {
        let mut app = make_app();
        app.open_form();
        assert_eq!(app.form_slots().len(), 13);

        app.add_anlage_row();
        assert_eq!(app.form.anlagen().len(), 2);
        assert_eq!(app.form_slots().len(), 16);
        assert_eq!(app.focus, 13); // new row's manufacturer slot

        app.remove_current_anlage_row();
        assert_eq!(app.form.anlagen().len(), 1);
        assert_eq!(app.form_slots().len(), 13);
        assert!(app.focus < 13);
    }

    #[test]
    fn submit_flow_returns_to_overview_with_new_project() {
        let mut app = make_app();
        app.open_form();
        app.input = "Testpark".to_string();
        app.commit_input();
        app.focus = 10;
        app.cycle_selector(1); // Vestas
        app.focus = 11;
        app.cycle_selector(1); // V112-3.0

        app.submit_form();
        assert_eq!(app.page, Page::Overview);
        assert_eq!(app.collection.projects().len(), 7);
        assert_eq!(app.collection.projects()[6].name, "Testpark");
    }

    #[test]
    fn invalid_submit_stays_on_form() {
        let mut app = make_app();
        app.open_form();
        app.submit_form(); // empty name
        assert_eq!(app.page, Page::NewProject);
        assert!(app.form.error("name").is_some());
    }
}
