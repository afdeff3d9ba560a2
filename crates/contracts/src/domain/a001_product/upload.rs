use serde::{Deserialize, Serialize};

/// Строка CSV, отклонённая при импорте (не сохраняется в БД)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedRow {
    /// Line number in the uploaded file, header is line 1
    pub row_number: u64,
    pub error: String,
    /// Raw fields as they appeared in the file
    pub row_data: String,
}

/// Результат загрузки CSV
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    pub stored: usize,
    /// In file order
    pub failed: Vec<FailedRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_result_wire_shape() {
        let result = UploadResult {
            stored: 1,
            failed: vec![FailedRow {
                row_number: 3,
                error: "SKU is missing.".into(),
                row_data: "[, Shirt]".into(),
            }],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["stored"], 1);
        assert_eq!(json["failed"][0]["rowNumber"], 3);
        assert_eq!(json["failed"][0]["rowData"], "[, Shirt]");
    }
}
