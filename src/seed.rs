//! Built-in fallback project list.
//!
//! Shown when the REST service is unreachable, and used to seed the
//! bundled API server and the offline mode.

use chrono::NaiveDate;

use crate::model::{Anlage, ProjectStatus, Windpark};

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn anlage(id: &str, hersteller: &str, modell: &str, anzahl: u32) -> Anlage {
    Anlage {
        id: id.to_string(),
        hersteller: hersteller.to_string(),
        modell: modell.to_string(),
        anzahl,
    }
}

/// Returns the six reference projects used as fallback data.
pub fn seed_projects() -> Vec<Windpark> {
    vec![
        Windpark {
            id: "1".to_string(),
            name: "Windpark Nordsee Alpha".to_string(),
            standort: "Husum, Schleswig-Holstein".to_string(),
            baubeginn: date(2023, 3, 15),
            inbetriebnahme: date(2024, 11, 30),
            status: ProjectStatus::Laufend,
            gewinn_pro_annum: 2_850_000.0,
            investitionsvolumen: 45_000_000.0,
            ek_quote: 35.0,
            fk_zins: 4.2,
            roi: 8.5,
            anlagen: vec![
                anlage("1", "Vestas", "V150-4.2", 12),
                anlage("2", "Vestas", "V136-3.45", 8),
            ],
        },
        Windpark {
            id: "2".to_string(),
            name: "Windpark Eifel Süd".to_string(),
            standort: "Bad Münstereifel, Nordrhein-Westfalen".to_string(),
            baubeginn: date(2024, 1, 10),
            inbetriebnahme: date(2025, 9, 15),
            status: ProjectStatus::Laufend,
            gewinn_pro_annum: 3_200_000.0,
            investitionsvolumen: 52_000_000.0,
            ek_quote: 40.0,
            fk_zins: 3.8,
            roi: 9.2,
            anlagen: vec![anlage("1", "Siemens Gamesa", "SG 6.6-170", 15)],
        },
        Windpark {
            id: "3".to_string(),
            name: "Offshore Windpark Baltic".to_string(),
            standort: "Ostsee, vor Rügen".to_string(),
            baubeginn: date(2022, 6, 1),
            inbetriebnahme: date(2023, 12, 20),
            status: ProjectStatus::Abgeschlossen,
            gewinn_pro_annum: 8_750_000.0,
            investitionsvolumen: 125_000_000.0,
            ek_quote: 30.0,
            fk_zins: 4.5,
            roi: 11.8,
            anlagen: vec![anlage("1", "Siemens Gamesa", "SG 11.0-200", 25)],
        },
        Windpark {
            id: "4".to_string(),
            name: "Windpark Brandenburg Ost".to_string(),
            standort: "Frankfurt (Oder), Brandenburg".to_string(),
            baubeginn: date(2024, 8, 1),
            inbetriebnahme: date(2025, 12, 31),
            status: ProjectStatus::Entwurf,
            gewinn_pro_annum: 2_100_000.0,
            investitionsvolumen: 38_000_000.0,
            ek_quote: 45.0,
            fk_zins: 3.5,
            roi: 7.8,
            anlagen: vec![
                anlage("1", "Nordex", "N149/4.0-4.5", 10),
                anlage("2", "Nordex", "N163/5.X", 6),
            ],
        },
        Windpark {
            id: "5".to_string(),
            name: "Windpark Harz Plateau".to_string(),
            standort: "Goslar, Niedersachsen".to_string(),
            baubeginn: date(2023, 9, 15),
            inbetriebnahme: date(2024, 8, 30),
            status: ProjectStatus::Laufend,
            gewinn_pro_annum: 3_450_000.0,
            investitionsvolumen: 58_000_000.0,
            ek_quote: 38.0,
            fk_zins: 4.0,
            roi: 8.9,
            anlagen: vec![anlage("1", "Enercon", "E-147 EP3", 18)],
        },
        Windpark {
            id: "6".to_string(),
            name: "Windpark Offshore Bremen".to_string(),
            standort: "Deutsche Bucht, Nordsee".to_string(),
            baubeginn: date(2024, 4, 1),
            inbetriebnahme: date(2026, 3, 31),
            status: ProjectStatus::Laufend,
            gewinn_pro_annum: 12_500_000.0,
            investitionsvolumen: 180_000_000.0,
            ek_quote: 25.0,
            fk_zins: 5.0,
            roi: 13.2,
            anlagen: vec![anlage("1", "GE Renewable Energy", "Haliade-X 13-220", 30)],
        },
    ]
}
