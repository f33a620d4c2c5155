//! Request loading from JSON or CSV files

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::types::{DeliveryRequest, RequestRecord};

/// Input file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// Pick the format from the file extension, falling back to content sniffing
    pub fn detect(path: &Path, content: &str) -> Self {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("json") => InputFormat::Json,
            Some("csv") => InputFormat::Csv,
            _ if content.trim_start().starts_with('[') => InputFormat::Json,
            _ => InputFormat::Csv,
        }
    }
}

pub fn parse_json(content: &str) -> Result<Vec<RequestRecord>> {
    serde_json::from_str(content).context("Failed to parse JSON request list")
}

/// Parse CSV with a header row; `;` or `,` delimited
pub fn parse_csv(content: &str) -> Result<Vec<RequestRecord>> {
    let header = content.lines().next().unwrap_or_default();
    let delimiter = if header.contains(';') { b';' } else { b',' };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let row: RequestRecord = result.with_context(|| format!("Invalid CSV row {}", i + 1))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Convert records into validated requests, naming the first bad row
pub fn into_requests(records: Vec<RequestRecord>) -> Result<Vec<DeliveryRequest>> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            record
                .into_request()
                .with_context(|| format!("Invalid request #{}", i + 1))
        })
        .collect()
}

pub fn parse_requests(content: &str, format: InputFormat) -> Result<Vec<DeliveryRequest>> {
    let records = match format {
        InputFormat::Json => parse_json(content)?,
        InputFormat::Csv => parse_csv(content)?,
    };
    into_requests(records)
}

pub fn load_requests(path: &Path) -> Result<Vec<DeliveryRequest>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let format = InputFormat::detect(path, &content);
    debug!("Loading requests from {} as {:?}", path.display(), format);

    parse_requests(&content, format).with_context(|| format!("Failed to load {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OperationType, ZoneClass};
    use std::path::PathBuf;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(InputFormat::detect(&PathBuf::from("orders.JSON"), ""), InputFormat::Json);
        assert_eq!(InputFormat::detect(&PathBuf::from("orders.csv"), "[]"), InputFormat::Csv);
    }

    #[test]
    fn test_detect_by_content() {
        assert_eq!(InputFormat::detect(&PathBuf::from("orders"), "  [ {} ]"), InputFormat::Json);
        assert_eq!(InputFormat::detect(&PathBuf::from("orders"), "lat,lon"), InputFormat::Csv);
    }

    #[test]
    fn test_parse_json_form_fields() {
        let content = r#"[
            {"lat": 30.05, "lon": 31.23, "weight": 5.0, "parcels": 2, "zone": "A", "type": "Delivery"},
            {"lat": 30.06, "lon": 31.24, "weight": 3.5, "parcels": 1, "zone": "C", "type": "Pickup"}
        ]"#;

        let requests = parse_requests(content, InputFormat::Json).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].zone_class(), ZoneClass::C);
        assert_eq!(requests[1].operation_type(), OperationType::Pickup);
        assert_eq!(requests[1].mass_kg(), 3.5);
    }

    #[test]
    fn test_parse_csv_comma() {
        let content = "lat,lon,weight,parcels,zone,type\n30.05,31.23,5.0,2,b,Linked\n30.06,31.24,1.0,0,A,Delivery\n";

        let requests = parse_requests(content, InputFormat::Csv).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].zone_class(), ZoneClass::B);
        assert_eq!(requests[0].operation_type(), OperationType::Linked);
        assert_eq!(requests[1].parcel_count(), 0);
    }

    #[test]
    fn test_parse_csv_semicolon_with_defaults() {
        let content = "lat;lon\n30.05;31.23\n";

        let requests = parse_requests(content, InputFormat::Csv).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].mass_kg(), 5.0);
        assert_eq!(requests[0].parcel_count(), 2);
        assert_eq!(requests[0].zone_class(), ZoneClass::A);
    }

    #[test]
    fn test_parse_csv_header_only_is_empty() {
        let requests = parse_requests("lat,lon,weight,parcels,zone,type\n", InputFormat::Csv).unwrap();
        assert!(requests.is_empty());
    }

    #[test]
    fn test_invalid_row_is_reported() {
        let content = r#"[{"lat": 30.05, "lon": 31.23}, {"lat": 130.0, "lon": 31.23}]"#;

        let err = parse_requests(content, InputFormat::Json).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid request #2"));
    }

    #[test]
    fn test_negative_parcels_rejected() {
        let content = "lat,lon,weight,parcels\n30.05,31.23,5.0,-2\n";
        assert!(parse_requests(content, InputFormat::Csv).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_requests(&PathBuf::from("/nonexistent/orders.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
