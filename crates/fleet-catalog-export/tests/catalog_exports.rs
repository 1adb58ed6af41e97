use fleet_catalog_core::BrandProfile;
use fleet_catalog_export::{
    export_datasheet, export_spreadsheet, generate_snapshot, write_artifact, Cell, DocumentWriter,
    ExportError, ExportErrorCode, PdfDocumentWriter, Sheet, SnapshotBuilder, SpreadsheetWriter,
    XlsxWriter, SHEET_NAME, SNAPSHOT_LIBRARIES, SPREADSHEET_HEADER,
};
use fleet_catalog_model::{Category, Fuel, Item, ItemId, SatelliteTracking};

const PIXEL_PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

fn items() -> Vec<Item> {
    vec![
        Item {
            id: ItemId::new(1),
            category: Category::Vehicle,
            brand: "Toyota".to_string(),
            model: "Hilux".to_string(),
            kind: "Pick-up".to_string(),
            year: 2022,
            domain: "AF123BC".to_string(),
            satellite_tracking: SatelliteTracking::Active,
            fuel: Fuel::Diesel,
            capacity: String::new(),
            equipment: "N/A".to_string(),
            images: vec![PIXEL_PNG.to_string(), "https://cdn.example/hilux-2.jpg".to_string()],
            technical_sheet: Some("data:application/pdf;base64,JVBERi0xLjQ=".to_string()),
        },
        Item {
            id: ItemId::new(2),
            category: Category::Machinery,
            brand: "JCB".to_string(),
            model: "3CX".to_string(),
            kind: "Retroexcavadora".to_string(),
            year: 2019,
            domain: "-".to_string(),
            satellite_tracking: SatelliteTracking::NotApplicable,
            fuel: Fuel::Diesel,
            capacity: "1 m3".to_string(),
            equipment: "Martillo </script><script>alert(1)</script>".to_string(),
            images: vec!["data:image/png;base64,not-really-png".to_string()],
            technical_sheet: None,
        },
    ]
}

#[derive(Default)]
struct CapturingSheetWriter {
    sheets: Vec<Sheet>,
}

impl SpreadsheetWriter for CapturingSheetWriter {
    fn render(&mut self, sheet: &Sheet) -> Result<Vec<u8>, ExportError> {
        self.sheets.push(sheet.clone());
        Ok(vec![1, 2, 3])
    }
}

struct UnavailableSheetWriter;

impl SpreadsheetWriter for UnavailableSheetWriter {
    fn render(&mut self, _sheet: &Sheet) -> Result<Vec<u8>, ExportError> {
        Err(ExportError::new(
            ExportErrorCode::Unavailable,
            "spreadsheet library not loaded",
        ))
    }
}

#[test]
fn spreadsheet_has_fixed_header_and_one_row_per_item() {
    let mut writer = CapturingSheetWriter::default();
    let bytes = export_spreadsheet(&mut writer, &items()).expect("export");
    assert_eq!(bytes, vec![1, 2, 3]);

    let sheet = &writer.sheets[0];
    assert_eq!(sheet.name, SHEET_NAME);
    assert_eq!(sheet.header, SPREADSHEET_HEADER.to_vec());
    assert_eq!(sheet.rows.len(), 2);
    assert_eq!(
        sheet.rows[0],
        vec![
            Cell::Text("Vehiculos".to_string()),
            Cell::Text("Toyota".to_string()),
            Cell::Text("Hilux".to_string()),
            Cell::Text("Pick-up".to_string()),
            Cell::Number(2022.0),
            Cell::Text("AF123BC".to_string()),
            Cell::Text("Diesel".to_string()),
            Cell::Text(String::new()),
            Cell::Text("N/A".to_string()),
            Cell::Text("activo".to_string()),
        ]
    );
}

#[test]
fn spreadsheet_backend_failure_is_surfaced() {
    let err = export_spreadsheet(&mut UnavailableSheetWriter, &items()).expect_err("fails");
    assert_eq!(err.code, ExportErrorCode::Unavailable);
}

#[test]
fn xlsx_backend_produces_a_zip_container() {
    let bytes = export_spreadsheet(&mut XlsxWriter::new(), &items()).expect("xlsx");
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn pdf_backend_produces_pdf_even_with_unusable_images() {
    let brand = BrandProfile::default();
    for item in items() {
        let mut doc = PdfDocumentWriter::a4(&item.display_name()).expect("pdf writer");
        let artifact = export_datasheet(&mut doc, &item, &brand).expect("datasheet");
        assert!(artifact.bytes.starts_with(b"%PDF"));
        assert!(artifact.file_name.starts_with("ficha_"));
        assert_eq!(
            doc.finish().expect_err("finished twice").code,
            ExportErrorCode::Generation
        );
    }
}

#[test]
fn snapshot_is_deterministic() {
    let brand = BrandProfile::default();
    let first = generate_snapshot(&items(), &brand).expect("first");
    let second = generate_snapshot(&items(), &brand).expect("second");
    assert_eq!(first, second);
}

#[test]
fn snapshot_embeds_every_payload_verbatim() {
    let html = generate_snapshot(&items(), &BrandProfile::default()).expect("snapshot");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(PIXEL_PNG));
    assert!(html.contains("data:image/png;base64,not-really-png"));
    assert!(html.contains("\"technicalSheet\":\"data:application/pdf;base64,JVBERi0xLjQ=\""));
    for library in SNAPSHOT_LIBRARIES {
        assert!(html.contains(library), "missing {library}");
    }
    for function in [
        "window.filterData",
        "window.openModal",
        "window.nextImage",
        "window.prevImage",
        "window.openTechnical",
        "window.downloadPdf",
    ] {
        assert!(html.contains(function), "missing {function}");
    }
}

#[test]
fn embedded_data_cannot_close_its_script_element() {
    let html = generate_snapshot(&items(), &BrandProfile::default()).expect("snapshot");
    assert!(!html.contains("Martillo </script>"));
    assert!(html.contains("Martillo <\\/script>"));

    let start = html.find("window.CATALOG_DATA = ").expect("data start") + 22;
    let end = html[start..].find(";\nwindow.CATALOG_BRAND").expect("data end") + start;
    let decoded: Vec<Item> = serde_json::from_str(&html[start..end]).expect("embedded json");
    assert_eq!(decoded, items());
}

#[test]
fn snapshot_chrome_uses_escaped_brand_profile() {
    let mut brand = BrandProfile::default();
    brand.tagline = "Alquileres <24h>".to_string();
    let html = generate_snapshot(&[], &brand).expect("snapshot");
    assert!(html.contains("Alquileres &lt;24h&gt;"));
    assert!(html.contains("<span class=\"text-4xl\">A</span>ZILUT"));
    assert!(html.contains("administracion@azilutsa.com.ar | 221 483-0093 / 483-5670"));
    assert!(html.contains("window.CATALOG_DATA = [];"));
    assert!(!html.contains("__"), "unfilled placeholder left in output");
}

#[test]
fn snapshot_artifact_is_written_under_configured_name() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let brand = BrandProfile::default();
    let artifact = SnapshotBuilder::new(&brand, "catalogo_azilut.html")
        .build(&items())
        .expect("build");
    let path = write_artifact(tmp.path(), &artifact).expect("write");
    let written = std::fs::read_to_string(path).expect("read");
    assert_eq!(written.as_bytes(), artifact.bytes.as_slice());
}
