use contracts::domain::a001_product::{FailedRow, Product, UploadResult};
use csv::StringRecord;

use super::error::{RowError, UploadError};
use super::row_parser::parse_row;
use super::store::CatalogStore;
use super::validator::validate;

/// Строки файла, разделённые на принятые и отклонённые
#[derive(Debug, Default)]
pub struct ParsedUpload {
    pub accepted: Vec<Product>,
    /// In file order
    pub failed: Vec<FailedRow>,
}

/// Импорт CSV: разбор, валидация и одна пакетная запись принятых строк.
///
/// Row failures end up in `UploadResult::failed` and never abort the run.
/// Only an unreadable/empty file or a failed store write is an error, in
/// which case nothing is reported per row.
pub async fn import_products<S>(store: &S, data: &[u8]) -> Result<UploadResult, UploadError>
where
    S: CatalogStore + ?Sized,
{
    let started_at = std::time::Instant::now();
    let parsed = parse_upload(data)?;

    if !parsed.accepted.is_empty() {
        store
            .upsert_batch(&parsed.accepted)
            .await
            .map_err(UploadError::Store)?;
    }

    tracing::info!(
        "CSV import finished: stored={}, failed={}, elapsed_ms={}",
        parsed.accepted.len(),
        parsed.failed.len(),
        started_at.elapsed().as_millis()
    );

    Ok(UploadResult {
        stored: parsed.accepted.len(),
        failed: parsed.failed,
    })
}

/// Разбирает файл целиком. The first record is the header and is discarded.
/// Blank lines are skipped but still count towards row numbers: a row is
/// numbered by the physical line its content starts on (header = 1).
pub fn parse_upload(data: &[u8]) -> Result<ParsedUpload, UploadError> {
    let lines = LineIndex::new(data);
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);
    let mut records = csv_reader.records();

    match records.next() {
        Some(header) => {
            header?;
        }
        None => return Err(UploadError::EmptyFile),
    }

    let mut parsed = ParsedUpload::default();
    // Используется, только если csv не сообщил позицию записи
    let mut next_row_number: u64 = 2;

    for record in records {
        let record = record?;
        let row_number = record
            .position()
            .map(|pos| lines.line_of_content(pos.byte()))
            .unwrap_or(next_row_number);
        next_row_number = row_number + 1;

        if is_blank(&record) {
            continue;
        }

        match process_row(&record) {
            Ok(product) => parsed.accepted.push(product),
            Err(e) => {
                tracing::debug!("CSV row {} rejected: {}", row_number, e);
                parsed.failed.push(FailedRow {
                    row_number,
                    error: e.to_string(),
                    row_data: render_row(&record),
                });
            }
        }
    }

    Ok(parsed)
}

/// Начала физических строк файла. `\n`, `\r\n` and a lone `\r` each end a line.
///
/// csv reports a record's byte offset before it skips the empty lines in
/// front of the record, so the offset is moved past line terminators first.
struct LineIndex<'a> {
    data: &'a [u8],
    starts: Vec<u64>,
}

impl<'a> LineIndex<'a> {
    fn new(data: &'a [u8]) -> Self {
        let mut starts = vec![0];
        for (i, &b) in data.iter().enumerate() {
            let ends_line = match b {
                b'\n' => true,
                b'\r' => data.get(i + 1) != Some(&b'\n'),
                _ => false,
            };
            if ends_line {
                starts.push(i as u64 + 1);
            }
        }
        Self { data, starts }
    }

    /// 1-based line of the first non-terminator byte at or after `offset`
    fn line_of_content(&self, offset: u64) -> u64 {
        let skipped = self
            .data
            .iter()
            .skip(offset as usize)
            .take_while(|&&b| b == b'\n' || b == b'\r')
            .count() as u64;
        let content_start = offset + skipped;
        self.starts.partition_point(|&start| start <= content_start) as u64
    }
}

fn process_row(record: &StringRecord) -> Result<Product, RowError> {
    let fields: Vec<&str> = record.iter().collect();
    parse_row(&fields).and_then(validate)
}

fn is_blank(record: &StringRecord) -> bool {
    match record.len() {
        0 => true,
        1 => record[0].is_empty(),
        _ => false,
    }
}

/// `[A1, Shirt, Acme]`
fn render_row(record: &StringRecord) -> String {
    format!("[{}]", record.iter().collect::<Vec<_>>().join(", "))
}
