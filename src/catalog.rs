//! Static manufacturer/model reference data.
//!
//! Read-only: the dependent-dropdown coupling (choosing a manufacturer
//! restricts and resets the model) is resolved against this table.

/// Manufacturer name mapped to its ordered list of valid models.
pub const MANUFACTURER_MODELS: &[(&str, &[&str])] = &[
    (
        "Vestas",
        &[
            "V112-3.0",
            "V117-3.45",
            "V136-3.45",
            "V150-4.2",
            "V162-5.6",
            "V164-10.0",
        ],
    ),
    (
        "Siemens Gamesa",
        &[
            "SG 5.8-170",
            "SG 6.6-170",
            "SG 8.0-167",
            "SG 11.0-200",
            "SG 14-222",
        ],
    ),
    (
        "Nordex",
        &[
            "N100/3300",
            "N131/3900",
            "N149/4.0-4.5",
            "N163/5.X",
            "N175/6.X",
        ],
    ),
    (
        "Enercon",
        &[
            "E-115 EP3",
            "E-138 EP3",
            "E-147 EP3",
            "E-160 EP5",
            "E-175 EP5",
        ],
    ),
    (
        "GE Renewable Energy",
        &[
            "GE 2.5-120",
            "GE 3.2-130",
            "Haliade-X 12-220",
            "Haliade-X 13-220",
        ],
    ),
];

/// All manufacturer names, in catalog order.
pub fn manufacturers() -> impl Iterator<Item = &'static str> {
    MANUFACTURER_MODELS.iter().map(|(name, _)| *name)
}

/// Models offered by the given manufacturer, or `None` if unknown.
pub fn models_for(hersteller: &str) -> Option<&'static [&'static str]> {
    MANUFACTURER_MODELS
        .iter()
        .find(|(name, _)| *name == hersteller)
        .map(|(_, models)| *models)
}

/// Returns `true` when the model belongs to the manufacturer's list.
pub fn is_valid_model(hersteller: &str, modell: &str) -> bool {
    models_for(hersteller).is_some_and(|models| models.contains(&modell))
}
