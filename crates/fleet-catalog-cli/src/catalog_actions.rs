use crate::helpers::{abbreviate_payload, block_on, emit_ok};
use crate::{CliError, OutputMode, PathOverrides};
use fleet_catalog_core::{
    load_config, resolve_fleet_config_path, sha256_hex, CatalogConfig, ConfigPathScope,
};
use fleet_catalog_export::{
    export_datasheet, export_spreadsheet, write_artifact, Artifact, PdfDocumentWriter,
    SnapshotBuilder, XlsxWriter,
};
use fleet_catalog_model::{detail_rows, facets, CatalogFilter, Category, Gallery, Item, ItemId};
use fleet_catalog_store::{
    backup_json, load_seed, read_backup_file, read_image_upload, read_technical_sheet_upload,
    slot_file_path, today_backup_file_name, Fleet, LocalFsStore, Mutation, PersistOutcome,
    StoreError, StoreErrorCode,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Effective configuration for one command invocation.
pub(crate) struct Session {
    config: CatalogConfig,
}

impl Session {
    pub(crate) fn load(overrides: &PathOverrides) -> Result<Self, CliError> {
        let mut config = load_config(overrides.config.as_deref())?;
        if let Some(dir) = &overrides.storage_dir {
            config.storage_dir = dir.clone();
        }
        if let Some(seed) = &overrides.seed {
            config.seed_path = seed.clone();
        }
        Ok(Self { config })
    }

    fn open_fleet(&self) -> Result<Fleet<LocalFsStore>, CliError> {
        let seed = load_seed(&self.config.seed_path)?;
        Ok(Fleet::open(
            &seed,
            LocalFsStore::new(&self.config.storage_dir),
            self.config.storage_slot.as_str(),
        ))
    }

    fn output_dir(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit.unwrap_or_else(|| self.config.output_dir.clone())
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct GalleryMoves {
    pub(crate) start: usize,
    pub(crate) next: u8,
    pub(crate) prev: u8,
}

pub(crate) fn show_config(session: &Session, output_mode: OutputMode) -> Result<(), CliError> {
    let config = &session.config;
    emit_ok(
        output_mode,
        json!({
            "command": "config",
            "config": config,
            "workspace_config": resolve_fleet_config_path(ConfigPathScope::Workspace),
            "user_config": resolve_fleet_config_path(ConfigPathScope::User),
            "slot_file": slot_file_path(&config.storage_dir, &config.storage_slot),
            "spreadsheet_path": config.spreadsheet_path(),
            "snapshot_path": config.snapshot_path(),
        }),
    )
}

fn item_summary(item: &Item) -> Value {
    json!({
        "id": item.id,
        "category": item.category,
        "brand": item.brand,
        "model": item.model,
        "type": item.kind,
        "year": item.year,
        "domain": item.domain,
        "cover": item.cover_image().map(abbreviate_payload),
        "image_count": item.images.len(),
        "has_technical_sheet": item.technical_sheet.is_some(),
    })
}

pub(crate) fn list_items(
    session: &Session,
    filter: &CatalogFilter,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let fleet = session.open_fleet()?;
    let visible = filter.apply(fleet.items());
    emit_ok(
        output_mode,
        json!({
            "command": "list",
            "filter": filter,
            "count": visible.len(),
            "items": visible.iter().map(|item| item_summary(item)).collect::<Vec<_>>(),
        }),
    )
}

pub(crate) fn show_facets(
    session: &Session,
    category: Category,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let fleet = session.open_fleet()?;
    let facets = facets(fleet.items(), category);
    emit_ok(
        output_mode,
        json!({
            "command": "facets",
            "category": category,
            "brands": facets.brands,
            "types": facets.types,
        }),
    )
}

pub(crate) fn show_item(
    session: &Session,
    id: ItemId,
    moves: GalleryMoves,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let fleet = session.open_fleet()?;
    let item = fleet.require(id)?;
    let mut gallery = Gallery::at(item.images.len(), moves.start);
    for _ in 0..moves.next {
        gallery.next();
    }
    for _ in 0..moves.prev {
        gallery.prev();
    }
    let rows: Vec<Value> = detail_rows(item)
        .into_iter()
        .map(|row| json!({ "label": row.label, "value": row.value }))
        .collect();
    emit_ok(
        output_mode,
        json!({
            "command": "show",
            "item": item_summary(item),
            "title": item.display_name(),
            "subtitle": item.kind,
            "details": rows,
            "gallery": {
                "index": gallery.index(),
                "counter": gallery.counter(),
                "has_controls": gallery.has_controls(),
                "current": gallery.current(&item.images).map(abbreviate_payload),
            },
            "technical_sheet": item.technical_sheet.as_deref().map(abbreviate_payload),
        }),
    )
}

fn mutation_payload(command: &str, id: ItemId, outcome: &Mutation) -> Result<Value, CliError> {
    match outcome {
        Mutation::NotFound => Err(CliError::from(StoreError::new(
            StoreErrorCode::NotFound,
            format!("no catalog item with id {id}"),
        ))),
        Mutation::Applied { persisted } => Ok(json!({
            "command": command,
            "id": id,
            "status": "ok",
            "persisted": persist_status(persisted),
        })),
    }
}

fn persist_status(outcome: &PersistOutcome) -> Value {
    match outcome {
        PersistOutcome::Written { bytes } => json!({ "written": true, "bytes": bytes }),
        PersistOutcome::Failed { reason } => json!({ "written": false, "reason": reason }),
    }
}

pub(crate) fn set_image(
    session: &Session,
    id: ItemId,
    file: &Path,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let mut fleet = session.open_fleet()?;
    fleet.require(id)?;
    let payload = block_on(read_image_upload(file))??;
    let outcome = fleet.replace_first_image(id, payload);
    tracing::info!(%id, file = %file.display(), "cover image replaced");
    emit_ok(output_mode, mutation_payload("set-image", id, &outcome)?)
}

pub(crate) fn set_sheet(
    session: &Session,
    id: ItemId,
    file: &Path,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let mut fleet = session.open_fleet()?;
    fleet.require(id)?;
    let payload = block_on(read_technical_sheet_upload(file))??;
    let outcome = fleet.set_technical_sheet(id, payload);
    tracing::info!(%id, file = %file.display(), "technical sheet attached");
    emit_ok(output_mode, mutation_payload("set-sheet", id, &outcome)?)
}

pub(crate) fn write_backup(
    session: &Session,
    out_dir: Option<PathBuf>,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let fleet = session.open_fleet()?;
    let artifact = Artifact {
        file_name: today_backup_file_name(),
        bytes: backup_json(fleet.items())?.into_bytes(),
    };
    let path = write_artifact(&session.output_dir(out_dir), &artifact)?;
    emit_ok(
        output_mode,
        json!({
            "command": "backup",
            "path": path,
            "count": fleet.items().len(),
        }),
    )
}

pub(crate) fn restore_backup(
    session: &Session,
    file: &Path,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let mut fleet = session.open_fleet()?;
    let raw = block_on(read_backup_file(file))??;
    let restored = fleet
        .restore(&raw)
        .map_err(|e| CliError::from(e).with_detail("path", &file.display().to_string()))?;
    emit_ok(
        output_mode,
        json!({
            "command": "restore",
            "count": restored.count,
            "persisted": persist_status(&restored.persisted),
        }),
    )
}

pub(crate) fn export_xlsx(
    session: &Session,
    out_dir: Option<PathBuf>,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let fleet = session.open_fleet()?;
    let artifact = Artifact {
        file_name: session.config.spreadsheet_file_name.clone(),
        bytes: export_spreadsheet(&mut XlsxWriter::new(), fleet.items())?,
    };
    let path = write_artifact(&session.output_dir(out_dir), &artifact)?;
    emit_ok(
        output_mode,
        json!({
            "command": "export-xlsx",
            "path": path,
            "rows": fleet.items().len(),
        }),
    )
}

pub(crate) fn export_pdf(
    session: &Session,
    id: ItemId,
    out_dir: Option<PathBuf>,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let fleet = session.open_fleet()?;
    let item = fleet.require(id)?;
    let mut doc = PdfDocumentWriter::a4(&item.display_name())?;
    let artifact = export_datasheet(&mut doc, item, &session.config.brand)?;
    let path = write_artifact(&session.output_dir(out_dir), &artifact)?;
    emit_ok(
        output_mode,
        json!({
            "command": "export-pdf",
            "id": id,
            "path": path,
            "bytes": artifact.bytes.len(),
        }),
    )
}

pub(crate) fn publish_snapshot(
    session: &Session,
    out_dir: Option<PathBuf>,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let fleet = session.open_fleet()?;
    let artifact = SnapshotBuilder::new(&session.config.brand, &session.config.snapshot_file_name)
        .build(fleet.items())?;
    let path = write_artifact(&session.output_dir(out_dir), &artifact)?;
    emit_ok(
        output_mode,
        json!({
            "command": "publish",
            "path": path,
            "items": fleet.items().len(),
            "bytes": artifact.bytes.len(),
            "sha256": sha256_hex(&artifact.bytes),
        }),
    )
}
