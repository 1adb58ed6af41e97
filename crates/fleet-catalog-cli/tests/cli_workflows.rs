use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};

struct Workspace {
    root: tempfile::TempDir,
    storage: PathBuf,
    out: PathBuf,
    seed: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = tmp.path().join("storage");
        let out = tmp.path().join("out");
        let seed = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("seed.json");
        Self {
            root: tmp,
            storage,
            out,
            seed,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_fleet-catalog"));
        cmd.env_remove("FLEET_STORAGE_DIR")
            .env_remove("FLEET_SEED_PATH")
            .env_remove("FLEET_OUTPUT_DIR")
            .env_remove("FLEET_LOG_JSON")
            .env("XDG_CONFIG_HOME", self.root.path())
            .env("FLEET_LOG_LEVEL", "error")
            .arg("--json")
            .arg("--storage-dir")
            .arg(&self.storage)
            .arg("--seed")
            .arg(&self.seed);
        cmd
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let output = self.command().args(args).output().expect("run command");
        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("json stdout")
    }

    fn scratch(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.root.path().join(name);
        std::fs::write(&path, bytes).expect("write scratch file");
        path
    }
}

#[test]
fn list_filters_by_category_brand_and_type() {
    let ws = Workspace::new();
    let all = ws.run_json(&["list"]);
    assert_eq!(all["count"], 2);

    let machinery = ws.run_json(&["list", "--category", "maquinarias"]);
    assert_eq!(machinery["count"], 1);
    assert_eq!(machinery["items"][0]["brand"], "JCB");

    let narrowed = ws.run_json(&["list", "--brand", "Ford", "--type", "Pick-up"]);
    assert_eq!(narrowed["count"], 0);
}

#[test]
fn facets_are_sorted_per_category() {
    let ws = Workspace::new();
    let facets = ws.run_json(&["facets"]);
    assert_eq!(facets["brands"], serde_json::json!(["Ford", "Toyota"]));
    assert_eq!(facets["types"], serde_json::json!(["Pick-up", "Utilitario"]));
}

#[test]
fn show_reports_gallery_position_and_detail_rows() {
    let ws = Workspace::new();
    let shown = ws.run_json(&["show", "1", "--prev"]);
    assert_eq!(shown["gallery"]["index"], 2);
    assert_eq!(shown["gallery"]["counter"], "3 / 3");
    assert_eq!(shown["gallery"]["has_controls"], true);
    let labels: Vec<&str> = shown["details"]
        .as_array()
        .expect("details")
        .iter()
        .map(|row| row["label"].as_str().expect("label"))
        .collect();
    assert_eq!(
        labels,
        vec!["Categoría", "Año", "Dominio", "Combustible", "Rastreo Satelital"]
    );

    let empty = ws.run_json(&["show", "3", "--next", "--next"]);
    assert_eq!(empty["gallery"]["counter"], "0 / 0");
    assert_eq!(empty["gallery"]["has_controls"], false);
}

#[test]
fn set_image_replaces_cover_and_persists_across_runs() {
    let ws = Workspace::new();
    let cover = ws.scratch("cover.png", b"not-really-a-png");
    let out = ws.run_json(&["set-image", "1", cover.to_str().expect("utf8 path")]);
    assert_eq!(out["persisted"]["written"], true);

    let shown = ws.run_json(&["show", "1"]);
    assert_eq!(shown["item"]["image_count"], 3);
    let current = shown["gallery"]["current"].as_str().expect("current");
    assert!(current.starts_with("data:image/png;base64,"));

    let stored = std::fs::read_to_string(ws.storage.join("vehicleData.json")).expect("slot");
    assert!(stored.contains("https://cdn.example/hilux-side.jpg"));
}

#[test]
fn set_sheet_accepts_pdf_and_rejects_other_files() {
    let ws = Workspace::new();
    let sheet = ws.scratch("ficha.pdf", b"%PDF-1.4");
    ws.run_json(&["set-sheet", "3", sheet.to_str().expect("utf8 path")]);
    let shown = ws.run_json(&["show", "3"]);
    assert!(shown["technical_sheet"]
        .as_str()
        .expect("sheet")
        .starts_with("data:application/pdf;base64,"));

    let notes = ws.scratch("notes.txt", b"hello");
    let output = ws
        .command()
        .args(["set-sheet", "3", notes.to_str().expect("utf8 path")])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn unknown_item_is_a_validation_error() {
    let ws = Workspace::new();
    let output = ws
        .command()
        .args(["show", "99"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(3));
    let err: Value = serde_json::from_slice(&output.stderr).expect("machine error");
    assert_eq!(err["code"], "not_found");
}

#[test]
fn backup_then_restore_round_trips_collection() {
    let ws = Workspace::new();
    let backup = ws.run_json(&["backup", "--out-dir", ws.out.to_str().expect("utf8")]);
    let path = backup["path"].as_str().expect("path").to_string();
    assert!(path.contains("respaldo_flota_"));
    assert_eq!(backup["count"], 3);

    let refused = ws.command().args(["restore", &path]).output().expect("run");
    assert_eq!(refused.status.code(), Some(2));

    let restored = ws.run_json(&["restore", &path, "--yes"]);
    assert_eq!(restored["count"], 3);
}

#[test]
fn restore_rejects_bad_shape_and_keeps_collection() {
    let ws = Workspace::new();
    let cover = ws.scratch("cover.jpg", b"jpeg");
    ws.run_json(&["set-image", "2", cover.to_str().expect("utf8 path")]);
    let before = std::fs::read_to_string(ws.storage.join("vehicleData.json")).expect("slot");

    let bad = ws.scratch("bad.json", b"[]");
    let output = ws
        .command()
        .args(["restore", bad.to_str().expect("utf8 path"), "--yes"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(3));

    let after = std::fs::read_to_string(ws.storage.join("vehicleData.json")).expect("slot");
    assert_eq!(before, after);
}

#[test]
fn exports_write_named_artifacts() {
    let ws = Workspace::new();
    let out_dir = ws.out.to_str().expect("utf8");

    let xlsx = ws.run_json(&["export-xlsx", "--out-dir", out_dir]);
    assert!(xlsx["path"].as_str().expect("path").ends_with("catalogo_azilut.xlsx"));
    assert_eq!(xlsx["rows"], 3);

    let pdf = ws.run_json(&["export-pdf", "1", "--out-dir", out_dir]);
    assert!(pdf["path"]
        .as_str()
        .expect("path")
        .ends_with("ficha_toyota_hilux_dx_4x4.pdf"));
    let bytes = std::fs::read(ws.out.join("ficha_toyota_hilux_dx_4x4.pdf")).expect("pdf");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn publish_is_deterministic_for_unchanged_collection() {
    let ws = Workspace::new();
    let out_dir = ws.out.to_str().expect("utf8");
    let first = ws.run_json(&["publish", "--out-dir", out_dir]);
    let second = ws.run_json(&["publish", "--out-dir", out_dir]);
    assert_eq!(first["sha256"], second["sha256"]);
    let html = std::fs::read_to_string(ws.out.join("catalogo_azilut.html")).expect("html");
    assert!(html.contains("window.CATALOG_DATA = ["));
    assert!(html.contains("https://cdn.example/hilux-rear.jpg"));
}

#[test]
fn missing_command_and_unknown_flag_are_usage_errors() {
    let output = Command::new(env!("CARGO_BIN_EXE_fleet-catalog"))
        .args(["--json", "--unknown-flag"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
    let err: Value = serde_json::from_slice(&output.stderr).expect("machine error");
    assert_eq!(err["code"], "usage_error");

    let output = Command::new(env!("CARGO_BIN_EXE_fleet-catalog"))
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn completion_script_is_generated() {
    let output = Command::new(env!("CARGO_BIN_EXE_fleet-catalog"))
        .args(["completion", "bash"])
        .output()
        .expect("run");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("fleet-catalog"));
}
