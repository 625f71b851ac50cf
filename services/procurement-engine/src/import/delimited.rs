//! Delimited-text importer.
//!
//! Accepts spreadsheet rows pasted or uploaded as raw text. The delimiter
//! is sniffed from the first line and an optional header row is recognized
//! by keyword. Expected columns: description, quantity, unit, winning
//! price, competitor 1 price, competitor 2 price — all numbers go through
//! the tolerant locale parser.

use prestacao_models::LineItem;
use prestacao_utils::{parse_locale_number, ImportConfig, PrestacaoError, PrestacaoResult};

use super::{ImportBatch, ImportSource, ImportedLine};

pub struct DelimitedImporter {
    /// Tokens that mark the first line as a header row.
    header_keywords: Vec<String>,
    max_rows: usize,
}

impl Default for DelimitedImporter {
    fn default() -> Self {
        Self {
            header_keywords: vec![
                "descrição".to_string(),
                "descricao".to_string(),
                "quantidade".to_string(),
                "description".to_string(),
                "quantity".to_string(),
            ],
            max_rows: ImportConfig::default().max_rows,
        }
    }
}

impl DelimitedImporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &ImportConfig) -> Self {
        Self {
            max_rows: config.max_rows,
            ..Self::default()
        }
    }

    pub fn parse(&self, text: &str) -> PrestacaoResult<ImportBatch> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(PrestacaoError::import_format("Empty import payload"));
        }

        let first_line = trimmed.lines().next().unwrap_or("");
        let delimiter = detect_delimiter(first_line);
        let skip_header = self.is_header_row(first_line);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .has_headers(false)
            .from_reader(trimmed.as_bytes());

        let mut lines = Vec::new();
        let mut warnings = Vec::new();

        for (idx, result) in reader.records().enumerate() {
            if idx == 0 && skip_header {
                continue;
            }
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warnings.push(format!("Row {}: parse error - {}", idx + 1, e));
                    continue;
                }
            };

            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            if record.len() < 2 {
                warnings.push(format!("Row {}: fewer than 2 columns, skipped", idx + 1));
                continue;
            }
            if lines.len() >= self.max_rows {
                warnings.push(format!("Import truncated at {} rows", self.max_rows));
                break;
            }

            let field = |i: usize| record.get(i).unwrap_or("").trim().to_string();
            let unit = {
                let raw = field(2);
                if raw.is_empty() {
                    "un".to_string()
                } else {
                    raw
                }
            };

            lines.push(ImportedLine {
                item: LineItem::new(
                    field(0),
                    parse_locale_number(&field(1)),
                    unit,
                    parse_locale_number(&field(3)),
                ),
                competitor_prices: vec![
                    parse_locale_number(&field(4)),
                    parse_locale_number(&field(5)),
                ],
            });
        }

        if lines.is_empty() {
            return Err(PrestacaoError::import_format(
                "No rows could be parsed from the delimited text",
            ));
        }

        tracing::info!(
            rows = lines.len(),
            skipped = warnings.len(),
            "Delimited import parsed"
        );
        Ok(ImportBatch {
            source: ImportSource::DelimitedText,
            lines,
            warnings,
        })
    }

    fn is_header_row(&self, first_line: &str) -> bool {
        let lower = first_line.to_lowercase();
        self.header_keywords.iter().any(|k| lower.contains(k))
    }
}

/// Semicolon beats comma beats tab, matching how the source spreadsheets
/// are exported.
fn detect_delimiter(first_line: &str) -> u8 {
    if first_line.contains(';') {
        b';'
    } else if first_line.contains(',') {
        b','
    } else {
        b'\t'
    }
}
