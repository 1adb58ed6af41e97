// SPDX-License-Identifier: Apache-2.0

use crate::error::{StoreError, StoreErrorCode};
use chrono::NaiveDate;
use fleet_catalog_model::Item;
use serde_json::Value;

pub const BACKUP_FILE_PREFIX: &str = "respaldo_flota_";

/// Pretty-printed collection, two-space indent.
pub fn backup_json(items: &[Item]) -> Result<String, StoreError> {
    serde_json::to_string_pretty(items)
        .map_err(|e| StoreError::new(StoreErrorCode::Internal, format!("encode backup: {e}")))
}

#[must_use]
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("{BACKUP_FILE_PREFIX}{}.json", date.format("%Y-%m-%d"))
}

#[must_use]
pub fn today_backup_file_name() -> String {
    backup_file_name(chrono::Utc::now().date_naive())
}

/// Parses a backup file. It must be a non-empty JSON array whose entries are
/// objects carrying an `id`, and every entry must also decode as a full
/// catalog item. Anything else is rejected whole.
pub fn parse_restore(raw: &str) -> Result<Vec<Item>, StoreError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| StoreError::new(StoreErrorCode::Parse, format!("backup is not JSON: {e}")))?;
    let Value::Array(entries) = &value else {
        return Err(invalid_format("top-level value is not an array"));
    };
    if entries.is_empty() {
        return Err(invalid_format("backup contains no items"));
    }
    if let Some(pos) = entries
        .iter()
        .position(|entry| entry.get("id").map_or(true, Value::is_null))
    {
        return Err(invalid_format(&format!("entry {pos} has no id")));
    }
    serde_json::from_value(value).map_err(|e| {
        StoreError::new(
            StoreErrorCode::Validation,
            format!("backup entries have ids but do not match the catalog item layout: {e}"),
        )
    })
}

fn invalid_format(detail: &str) -> StoreError {
    StoreError::new(
        StoreErrorCode::Validation,
        format!("backup file does not have a valid format: {detail}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("date");
        assert_eq!(backup_file_name(date), "respaldo_flota_2024-03-09.json");
    }

    #[test]
    fn restore_rejects_wrong_shapes() {
        for raw in ["{}", "[]", "[1,2]", r#"[{"brand":"Ford"}]"#, "not json"] {
            assert!(parse_restore(raw).is_err(), "accepted {raw}");
        }
        assert_eq!(
            parse_restore("[]").expect_err("empty").code,
            StoreErrorCode::Validation
        );
        assert_eq!(
            parse_restore("{").expect_err("broken").code,
            StoreErrorCode::Parse
        );
    }

    #[test]
    fn restore_names_item_layout_mismatch_separately_from_shape() {
        let shape = parse_restore(r#"[{"brand":"Ford"}]"#).expect_err("no id");
        assert!(shape.message.contains("does not have a valid format"));

        let raw = r#"[{"id":1,"category":"Vehiculos","brand":"Ford","model":"Ranger","type":"Pick-up","year":2021,"domain":"AE987ZT","rastreoSatelital":"activo","fuel":"GNC","capacity":"","equipment":"N/A"}]"#;
        let layout = parse_restore(raw).expect_err("unknown fuel");
        assert_eq!(layout.code, StoreErrorCode::Validation);
        assert!(layout.message.contains("do not match the catalog item layout"));
        assert!(layout.message.contains("GNC"));
    }
}
