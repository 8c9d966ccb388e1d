//! Integration tests for the new-project form lifecycle against the
//! in-memory store: fill, validate, submit, observe the created project.

use chrono::NaiveDate;

use windkalk::form::{
    AmountField, AnlageInput, DateField, ProjectForm, SubmitOutcome, TextField,
};
use windkalk::model::ProjectStatus;
use windkalk::provider::{MemoryStore, ProjectStore};
use windkalk::seed::seed_projects;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Fills every field of a fresh form with valid values.
fn filled_form() -> ProjectForm {
    let mut form = ProjectForm::new();
    form.set_text(TextField::Name, "Windpark Fehmarn");
    form.set_text(TextField::Standort, "Fehmarn, Schleswig-Holstein");
    form.set_date(DateField::Baubeginn, Some(date(2025, 4, 1)));
    form.set_date(DateField::Inbetriebnahme, Some(date(2026, 10, 1)));
    form.set_status(ProjectStatus::Entwurf);
    form.set_amount(AmountField::GewinnProAnnum, 1_800_000.0);
    form.set_amount(AmountField::Investitionsvolumen, 30_000_000.0);
    form.set_amount(AmountField::EkQuote, 25.0);
    form.set_amount(AmountField::FkZins, 4.1);
    form.set_amount(AmountField::Roi, 7.5);
    form.set_anlage(0, AnlageInput::Hersteller("Vestas".to_string()));
    form.set_anlage(0, AnlageInput::Modell("V150-4.2".to_string()));
    form.set_anlage(0, AnlageInput::Anzahl(6));
    form
}

#[test]
fn valid_form_submits_and_gets_server_id() {
    let store = MemoryStore::new(seed_projects());
    let mut form = filled_form();

    let outcome = form.submit(&store);
    let SubmitOutcome::Created(created) = outcome else {
        panic!("expected Created, got {outcome:?}");
    };
    assert_eq!(created.id, "7");
    assert_eq!(created.name, "Windpark Fehmarn");
    assert_eq!(created.anlagen.len(), 1);
    assert_eq!(created.anlagen[0].anzahl, 6);

    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 7);
    assert_eq!(listed[6].id, "7");
}

#[test]
fn empty_name_blocks_submission() {
    let store = MemoryStore::new(seed_projects());
    let mut form = filled_form();
    form.set_text(TextField::Name, "   ");

    assert!(matches!(form.submit(&store), SubmitOutcome::Invalid));
    assert!(form.show_validation());
    assert!(form.error("name").is_some());
    assert_eq!(store.list().unwrap().len(), 6);
}

#[test]
fn go_live_before_start_blocks_submission() {
    let store = MemoryStore::new(seed_projects());
    let mut form = filled_form();
    form.set_date(DateField::Inbetriebnahme, Some(date(2025, 3, 31)));

    assert!(matches!(form.submit(&store), SubmitOutcome::Invalid));
    assert!(form.error("inbetriebnahme").is_some());
}

#[test]
fn fixing_a_field_clears_its_error_optimistically() {
    let store = MemoryStore::new(seed_projects());
    let mut form = filled_form();
    form.set_text(TextField::Name, "");

    assert!(matches!(form.submit(&store), SubmitOutcome::Invalid));
    assert!(form.error("name").is_some());

    form.set_text(TextField::Name, "Windpark Fehmarn");
    assert!(form.error("name").is_none());

    assert!(matches!(form.submit(&store), SubmitOutcome::Created(_)));
}

#[test]
fn second_turbine_row_is_validated_independently() {
    let store = MemoryStore::new(seed_projects());
    let mut form = filled_form();
    form.add_anlage();
    form.set_anlage(1, AnlageInput::Hersteller("Nordex".to_string()));
    // model missing for row 1

    assert!(matches!(form.submit(&store), SubmitOutcome::Invalid));
    assert!(form.error("anlage_1_modell").is_some());
    assert!(form.error("anlage_0_modell").is_none());

    form.set_anlage(1, AnlageInput::Modell("N149/4.0-4.5".to_string()));
    let outcome = form.submit(&store);
    let SubmitOutcome::Created(created) = outcome else {
        panic!("expected Created, got {outcome:?}");
    };
    assert_eq!(created.anlagen.len(), 2);
}

#[test]
fn removing_a_row_shifts_error_keys_down() {
    let store = MemoryStore::new(seed_projects());
    let mut form = ProjectForm::new();
    form.set_text(TextField::Name, "Windpark Fehmarn");
    form.add_anlage();
    form.set_anlage(0, AnlageInput::Hersteller("Vestas".to_string()));
    form.set_anlage(0, AnlageInput::Modell("V150-4.2".to_string()));
    form.set_anlage(1, AnlageInput::Hersteller("Enercon".to_string()));
    // row 1 model missing

    assert!(matches!(form.submit(&store), SubmitOutcome::Invalid));
    assert!(form.error("anlage_1_modell").is_some());

    form.remove_anlage(0);
    // the remaining row is now index 0; its error must follow it
    assert!(form.error("anlage_0_modell").is_some());
    assert!(form.error("anlage_1_modell").is_none());
}

#[test]
fn unfinished_rows_are_dropped_from_the_payload() {
    let store = MemoryStore::new(seed_projects());
    let mut form = filled_form();
    form.add_anlage(); // left completely blank

    let outcome = form.submit(&store);
    let SubmitOutcome::Created(created) = outcome else {
        panic!("expected Created, got {outcome:?}");
    };
    assert_eq!(created.anlagen.len(), 1);
}
