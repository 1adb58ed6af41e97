use crate::item::Item;
use serde::Serialize;

/// One label/value line of an item's detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
    /// Long free text that layouts wrap instead of truncating.
    pub wrap: bool,
}

impl DetailRow {
    fn new(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
            wrap: false,
        }
    }

    fn wrapped(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
            wrap: true,
        }
    }
}

#[must_use]
pub fn show_capacity(item: &Item) -> bool {
    !item.capacity.trim().is_empty()
}

#[must_use]
pub fn show_equipment(item: &Item) -> bool {
    let equipment = item.equipment.trim();
    !equipment.is_empty() && equipment != "N/A"
}

/// Rows shown in the interactive detail view.
#[must_use]
pub fn detail_rows(item: &Item) -> Vec<DetailRow> {
    let mut rows = vec![
        DetailRow::new("Categoría", item.category),
        DetailRow::new("Año", item.year),
        DetailRow::new("Dominio", &item.domain),
        DetailRow::new("Combustible", item.fuel),
    ];
    if show_capacity(item) {
        rows.push(DetailRow::new("Capacidad", &item.capacity));
    }
    if show_equipment(item) {
        rows.push(DetailRow::wrapped("Equipamiento", &item.equipment));
    }
    rows.push(DetailRow::new("Rastreo Satelital", item.satellite_tracking));
    rows
}

/// Rows printed on a datasheet. Capacity is always listed there.
#[must_use]
pub fn datasheet_rows(item: &Item) -> Vec<DetailRow> {
    let mut rows = vec![
        DetailRow::new("Categoría", item.category),
        DetailRow::new("Tipo", &item.kind),
        DetailRow::new("Año", item.year),
        DetailRow::new("Dominio", &item.domain),
        DetailRow::new("Combustible", item.fuel),
        DetailRow::new("Capacidad", &item.capacity),
    ];
    if show_equipment(item) {
        rows.push(DetailRow::wrapped("Equipamiento", &item.equipment));
    }
    rows.push(DetailRow::new("Rastreo Satelital", item.satellite_tracking));
    rows
}
