//! Fiscal XML importer.
//!
//! Two document shapes are recognized, and only these two: an itemized
//! NF-e product invoice (`<det><prod>` nodes) and a national-standard NFS-e
//! service invoice (`<xDescServ>` plus `<vServ>`). Anything else is
//! rejected as unrecognized — never guessed.
//!
//! Service descriptions sometimes pack several billed items into one text
//! blob separated by "***", each segment leading with an "R$ amount:" tag;
//! those are split back into individual items. Segments without the price
//! tag are imported at price 0 for manual correction.

use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;

use prestacao_models::LineItem;
use prestacao_utils::{parse_locale_number, ImportConfig, PrestacaoError, PrestacaoResult};

use super::{synthetic_competitor_prices, ImportBatch, ImportSource, ImportedLine};

/// Separator token repeated between packed service segments.
const SEGMENT_SEPARATOR: &str = "***";

#[derive(Debug, Default, Clone)]
struct ProductNode {
    description: String,
    quantity: f64,
    unit: String,
    unit_price: f64,
}

pub struct FiscalDocumentImporter {
    config: ImportConfig,
}

impl Default for FiscalDocumentImporter {
    fn default() -> Self {
        Self {
            config: ImportConfig::default(),
        }
    }
}

impl FiscalDocumentImporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn parse(&self, xml: &str) -> PrestacaoResult<ImportBatch> {
        let mut reader = Reader::from_reader(xml.as_bytes());
        reader.trim_text(true);

        let mut products: Vec<ProductNode> = Vec::new();
        let mut current_product: Option<ProductNode> = None;
        let mut current_element = String::new();
        let mut service_description: Option<String> = None;
        let mut service_total: Option<f64> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    if tag == "prod" {
                        current_product = Some(ProductNode::default());
                    } else {
                        current_element = tag;
                    }
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape().unwrap_or_default().to_string();
                    if let Some(product) = current_product.as_mut() {
                        match current_element.as_str() {
                            "xProd" => product.description = text,
                            "qCom" => product.quantity = parse_locale_number(&text),
                            "uCom" => product.unit = text,
                            "vUnCom" => product.unit_price = parse_locale_number(&text),
                            _ => {}
                        }
                    } else {
                        match current_element.as_str() {
                            "xDescServ" => service_description = Some(text),
                            "vServ" => service_total = Some(parse_locale_number(&text)),
                            _ => {}
                        }
                    }
                }
                Ok(Event::End(ref e)) => {
                    let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    if tag == "prod" {
                        if let Some(product) = current_product.take() {
                            products.push(product);
                        }
                    }
                    current_element.clear();
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(PrestacaoError::unrecognized_document(format!(
                        "XML parse error: {}",
                        e
                    )))
                }
                _ => {}
            }
            buf.clear();
        }

        if !products.is_empty() {
            return self.batch_from_products(products);
        }

        match service_description {
            Some(description) => {
                self.batch_from_service(&description, service_total.unwrap_or(0.0))
            }
            None => Err(PrestacaoError::unrecognized_document(
                "Document is neither an NF-e product invoice nor an NFS-e service invoice",
            )),
        }
    }

    fn batch_from_products(&self, products: Vec<ProductNode>) -> PrestacaoResult<ImportBatch> {
        let lines: Vec<ImportedLine> = products
            .into_iter()
            .filter(|p| !p.description.trim().is_empty())
            .map(|p| {
                let unit = if p.unit.trim().is_empty() {
                    "un".to_string()
                } else {
                    p.unit
                };
                ImportedLine {
                    competitor_prices: synthetic_competitor_prices(p.unit_price, &self.config),
                    item: LineItem::new(p.description, p.quantity, unit, p.unit_price),
                }
            })
            .collect();

        if lines.is_empty() {
            return Err(PrestacaoError::import_format(
                "No items found in the fiscal document",
            ));
        }

        tracing::info!(items = lines.len(), "NF-e product invoice imported");
        Ok(ImportBatch {
            source: ImportSource::FiscalXml,
            lines,
            warnings: Vec::new(),
        })
    }

    fn batch_from_service(&self, description: &str, total: f64) -> PrestacaoResult<ImportBatch> {
        let mut lines = Vec::new();
        let mut warnings = Vec::new();

        if description.contains(SEGMENT_SEPARATOR) {
            let price_pattern = Regex::new(r"(?i)R\$\s*([\d.,]+)[:\-\s]+(.*)").unwrap();

            for segment in description
                .split(SEGMENT_SEPARATOR)
                .map(str::trim)
                .filter(|s| !s.is_empty())
            {
                match price_pattern.captures(segment) {
                    Some(caps) => {
                        let price = parse_locale_number(&caps[1]);
                        let item_description = caps[2].trim().to_string();
                        lines.push(ImportedLine {
                            competitor_prices: synthetic_competitor_prices(price, &self.config),
                            item: LineItem::new(item_description, 1.0, "un", price),
                        });
                    }
                    None => {
                        warnings.push(format!(
                            "Segment '{}' has no price tag; imported at price 0 for manual correction",
                            segment
                        ));
                        lines.push(ImportedLine {
                            competitor_prices: vec![0.0, 0.0],
                            item: LineItem::new(segment, 1.0, "un", 0.0),
                        });
                    }
                }
            }
        } else {
            lines.push(ImportedLine {
                competitor_prices: synthetic_competitor_prices(total, &self.config),
                item: LineItem::new(description, 1.0, "un", total),
            });
        }

        if lines.is_empty() {
            return Err(PrestacaoError::import_format(
                "No items found in the fiscal document",
            ));
        }

        tracing::info!(
            items = lines.len(),
            flagged = warnings.len(),
            "NFS-e service invoice imported"
        );
        Ok(ImportBatch {
            source: ImportSource::FiscalXml,
            lines,
            warnings,
        })
    }
}
