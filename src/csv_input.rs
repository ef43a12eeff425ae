use crate::error::ApiError;
use crate::models::InventoryRecord;

pub const REQUIRED_COLUMNS: [&str; 6] = [
    "ds",
    "SKU_ID",
    "Warehouse_ID",
    "Price",
    "Stock_On_Hand",
    "Festival",
];

/// Only CSV uploads are accepted; the check is on the declared filename,
/// not the content.
pub fn check_filename(filename: &str) -> Result<(), ApiError> {
    if filename.ends_with(".csv") {
        Ok(())
    } else {
        Err(ApiError::InvalidFileType)
    }
}

/// Parse uploaded CSV bytes into inventory records. The header is validated
/// before any row is read: every required column must be present, and the
/// error names the missing ones. Extra columns are ignored. Row-level parse
/// failures are internal errors, not validation errors.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<InventoryRecord>, ApiError> {
    let mut reader = csv::Reader::from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| ApiError::Internal(format!("unreadable CSV header: {e}")))?
        .clone();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == **required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ApiError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: InventoryRecord =
            row.map_err(|e| ApiError::Internal(format!("malformed CSV row: {e}")))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    const VALID_CSV: &str = "\
ds,SKU_ID,Warehouse_ID,Price,Stock_On_Hand,Festival
2024-01-08,SKU1,WH1,10.5,100,0
2024-01-09,SKU1,WH1,10.5,95,0
2024-01-10,SKU1,WH1,11.0,90,1
";

    #[test]
    fn filename_must_end_in_csv() {
        assert!(check_filename("inventory.csv").is_ok());
        assert!(matches!(
            check_filename("inventory.xlsx"),
            Err(ApiError::InvalidFileType)
        ));
        assert!(matches!(
            check_filename("inventory"),
            Err(ApiError::InvalidFileType)
        ));
    }

    #[test]
    fn parses_all_rows_in_order() {
        let records = parse_records(VALID_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].ds, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(records[2].sku_id, "SKU1");
        assert_eq!(records[2].price, 11.0);
        assert_eq!(records[2].festival, 1.0);
    }

    #[test]
    fn missing_columns_are_named() {
        let csv = "ds,SKU_ID,Warehouse_ID,Stock_On_Hand\n2024-01-10,SKU1,WH1,90\n";
        match parse_records(csv.as_bytes()) {
            Err(ApiError::MissingColumns(missing)) => {
                assert_eq!(missing, vec!["Price".to_string(), "Festival".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "\
ds,SKU_ID,Warehouse_ID,Price,Stock_On_Hand,Festival,Region
2024-01-10,SKU1,WH1,11.0,90,0,North
";
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn malformed_rows_are_internal_errors() {
        let csv = "\
ds,SKU_ID,Warehouse_ID,Price,Stock_On_Hand,Festival
not-a-date,SKU1,WH1,11.0,90,0
";
        assert!(matches!(
            parse_records(csv.as_bytes()),
            Err(ApiError::Internal(_))
        ));
    }

    #[test]
    fn header_only_file_yields_no_records() {
        let csv = "ds,SKU_ID,Warehouse_ID,Price,Stock_On_Hand,Festival\n";
        let records = parse_records(csv.as_bytes()).unwrap();
        assert!(records.is_empty());
    }
}
