use std::path::Path;

use crate::error::LoadError;
use crate::row::ObservabilityTier;
use crate::row::RawSopRow;
use crate::row::SopRow;

/// Load the row table from a JSON file: an array of records keyed
/// `Symptom ID` / `Symptom on Field` / `Observability Level` / `SOP`.
///
/// The dataset is read once at startup. Rows whose observability level is
/// not one of the three fixed labels can join no tier set; they are dropped
/// with a warning rather than failing the load.
pub async fn load_rows(path: &Path) -> Result<Vec<SopRow>, LoadError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: Vec<RawSopRow> =
        serde_json::from_slice(&bytes).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(rows_from_raw(raw))
}

fn rows_from_raw(raw: Vec<RawSopRow>) -> Vec<SopRow> {
    raw.into_iter()
        .filter_map(|record| match ObservabilityTier::from_label(&record.observability_level) {
            Some(tier) => Some(SopRow {
                symptom_id: record.symptom_id,
                symptom_label: record.symptom_label,
                tier,
                sop: record.sop,
            }),
            None => {
                tracing::warn!(
                    symptom_id = %record.symptom_id,
                    level = %record.observability_level,
                    "dropping row with unrecognized observability level"
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_dataset(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(json.as_bytes()).expect("write dataset");
        file
    }

    #[tokio::test]
    async fn loads_rows_and_optional_sop() {
        let file = write_dataset(
            r#"[
                {"Symptom ID": "S1", "Symptom on Field": "Leak",
                 "Observability Level": "Field observable", "SOP": "Check hose"},
                {"Symptom ID": "S1", "Symptom on Field": "Leak",
                 "Observability Level": "Internal / inferred"}
            ]"#,
        );
        let rows = load_rows(file.path()).await.expect("load");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].tier, ObservabilityTier::Field);
        assert_eq!(rows[0].sop.as_deref(), Some("Check hose"));
        assert_eq!(rows[1].tier, ObservabilityTier::Internal);
        assert_eq!(rows[1].sop, None);
        assert!(rows[1].sop_unspecified());
    }

    #[tokio::test]
    async fn drops_rows_with_unknown_tier_label() {
        let file = write_dataset(
            r#"[
                {"Symptom ID": "S1", "Symptom on Field": "Leak",
                 "Observability Level": "field observable", "SOP": "x"},
                {"Symptom ID": "S2", "Symptom on Field": "Noise",
                 "Observability Level": "Requires inspection / measurement", "SOP": "y"}
            ]"#,
        );
        let rows = load_rows(file.path()).await.expect("load");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].symptom_id, "S2");
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_rows(&dir.path().join("absent.json"))
            .await
            .expect_err("should fail");
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let file = write_dataset("not json");
        let err = load_rows(file.path()).await.expect_err("should fail");
        assert!(matches!(err, LoadError::Json { .. }));
    }
}
