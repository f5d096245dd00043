use crate::core::{PropertyRecord, PropertyTable, Storage};
use crate::utils::error::{RelayError, Result};

/// 讀取並解析物件資料集，任何錯誤都不會回傳部分結果
pub async fn load_properties<S: Storage>(storage: &S, path: &str) -> Result<PropertyTable> {
    tracing::debug!("Loading dataset from: {}", path);

    let data = storage
        .read_file(path)
        .await
        .map_err(|e| RelayError::DatasetError {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

    let table = parse_properties(&data)?;
    tracing::info!("📂 Loaded {} properties from {}", table.len(), path);
    Ok(table)
}

/// 解析 CSV 內容；標頭大小寫敏感，欄位值不做 trim
pub fn parse_properties(data: &[u8]) -> Result<PropertyTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let missing: Vec<&str> = PropertyRecord::REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();

    if !missing.is_empty() {
        return Err(RelayError::SchemaError {
            message: format!("missing column(s): {}", missing.join(", ")),
        });
    }

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<PropertyRecord>().enumerate() {
        let record = row?;
        let row_number = index + 1;

        if record.location.is_empty() || record.bhk.is_empty() {
            return Err(RelayError::SchemaError {
                message: format!("row {}: location and bhk must not be empty", row_number),
            });
        }

        records.push(record);
    }

    tracing::debug!("Parsed {} rows with columns: {:?}", records.len(), headers);
    Ok(PropertyTable::new(records))
}
