//! Document assembly engine.
//!
//! Handlebars-based rendering of the printable procurement records. The
//! engine consumes a finished [`ProcessDossier`] from the procurement
//! engine; no core logic runs here, only formatting.

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use prestacao_procurement_engine::ProcessDossier;
use prestacao_utils::{DocumentConfig, PrestacaoError, PrestacaoResult};

use crate::context;

/// The printable records the suite produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Ata da assembleia geral extraordinária.
    MeetingMinutes,
    /// Consolidação de pesquisas de preços.
    ConsolidationSheet,
    /// Ordem de compra.
    PurchaseOrder,
    /// Recibo de quitação.
    Receipt,
    /// Planilha de pesquisa de preços for one proponent.
    QuoteSheet { proposal_index: usize },
}

impl DocumentKind {
    fn template_id(&self) -> &'static str {
        match self {
            DocumentKind::MeetingMinutes => "meeting_minutes",
            DocumentKind::ConsolidationSheet => "consolidation_sheet",
            DocumentKind::PurchaseOrder => "purchase_order",
            DocumentKind::Receipt => "receipt",
            DocumentKind::QuoteSheet { .. } => "quote_sheet",
        }
    }
}

/// Document template definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub body_template: String,
}

/// Rendering result.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub title: String,
    pub html: String,
}

/// Template engine over the builtin record set.
pub struct DocumentAssembler {
    handlebars: Handlebars<'static>,
    templates: HashMap<String, DocumentTemplate>,
    config: DocumentConfig,
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self::with_config(DocumentConfig::default())
    }

    pub fn with_config(config: DocumentConfig) -> Self {
        let mut engine = Self {
            handlebars: Handlebars::new(),
            templates: HashMap::new(),
            config,
        };
        engine.register_builtin_templates();
        engine
    }

    /// Renders one record from a finished dossier.
    pub fn assemble(
        &self,
        kind: DocumentKind,
        dossier: &ProcessDossier,
    ) -> PrestacaoResult<RenderedDocument> {
        let context = match kind {
            DocumentKind::MeetingMinutes => context::minutes_context(dossier, &self.config),
            DocumentKind::ConsolidationSheet => {
                context::consolidation_context(dossier, &self.config)
            }
            DocumentKind::PurchaseOrder => context::purchase_order_context(dossier, &self.config),
            DocumentKind::Receipt => context::receipt_context(dossier, &self.config),
            DocumentKind::QuoteSheet { proposal_index } => {
                context::quote_context(dossier, proposal_index, &self.config)?
            }
        };

        let template_id = kind.template_id();
        let template = self
            .templates
            .get(template_id)
            .ok_or_else(|| PrestacaoError::not_found(format!("template '{}'", template_id)))?;

        let html = self
            .handlebars
            .render(template_id, &context)
            .map_err(|e| {
                PrestacaoError::configuration(format!("template '{}' failed: {}", template_id, e))
            })?;

        tracing::debug!(template = template_id, "Document rendered");
        Ok(RenderedDocument {
            title: template.name.clone(),
            html,
        })
    }

    pub fn template(&self, id: &str) -> Option<&DocumentTemplate> {
        self.templates.get(id)
    }

    fn register(&mut self, template: DocumentTemplate) {
        self.handlebars
            .register_template_string(&template.id, &template.body_template)
            .expect("builtin template must compile");
        self.templates.insert(template.id.clone(), template);
    }

    fn register_builtin_templates(&mut self) {
        self.register(DocumentTemplate {
            id: "meeting_minutes".to_string(),
            name: "Ata de Assembleia".to_string(),
            description: "Ata da assembleia geral extraordinária que registra a pesquisa de preços"
                .to_string(),
            body_template: MEETING_MINUTES_TEMPLATE.to_string(),
        });
        self.register(DocumentTemplate {
            id: "consolidation_sheet".to_string(),
            name: "Consolidação de Pesquisas de Preços".to_string(),
            description: "Mapa comparativo das propostas com menor preço por item".to_string(),
            body_template: CONSOLIDATION_SHEET_TEMPLATE.to_string(),
        });
        self.register(DocumentTemplate {
            id: "purchase_order".to_string(),
            name: "Ordem de Compra".to_string(),
            description: "Autorização de fornecimento ao proponente vencedor".to_string(),
            body_template: PURCHASE_ORDER_TEMPLATE.to_string(),
        });
        self.register(DocumentTemplate {
            id: "receipt".to_string(),
            name: "Recibo".to_string(),
            description: "Recibo de quitação emitido pelo fornecedor".to_string(),
            body_template: RECEIPT_TEMPLATE.to_string(),
        });
        self.register(DocumentTemplate {
            id: "quote_sheet".to_string(),
            name: "Planilha de Pesquisa de Preços".to_string(),
            description: "Orçamento individual de um proponente".to_string(),
            body_template: QUOTE_SHEET_TEMPLATE.to_string(),
        });
    }
}

const MEETING_MINUTES_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8"/>
<title>Ata de Assembleia</title>
<style>
body { font-family: 'Inter', sans-serif; color: black; padding: 2cm; font-size: 14px; }
.center { text-align: center; }
.justified { text-align: justify; line-height: 1.6; }
@media print { @page { size: A4; margin: 0; } }
</style>
</head>
<body>
<div class="center">
  <h2>CONSELHO ESCOLAR DA {{school.name}}</h2>
  <h1>ATA DA ASSEMBLEIA GERAL EXTRAORDINÁRIA DA UNIDADE EXECUTORA CONSELHO ESCOLAR<br/>DA {{school.name}}</h1>
</div>
<p class="justified">Às {{meeting_time}} horas do dia <strong>{{document_date}}</strong>, foi realizada pesquisa
de preços para aquisição de produtos do <strong>{{entry_description}}</strong>, com recursos oriundos do
<strong>{{program}}</strong>, entre as empresas:</p>
{{#each proponents}}
<div>
  <p><strong>{{position}} - {{name}}</strong><br/>
  CNPJ: {{cnpj}}<br/>
  VALOR: <strong>{{total}}</strong> <em>({{total_words}})</em></p>
</div>
{{/each}}
<p class="justified">Portanto, verificamos que o fornecedor <strong>{{winner_name}}</strong> apresentou a melhor
proposta, sendo assim autorizamos a aquisição dos produtos ofertados, atendendo as normas do FNDE. Nada mais
havendo a tratar, o Presidente deu por encerrada a reunião. Eu, <strong>{{school.secretary}}</strong>, lavrei a
presente ata que depois de lida e aprovada, será assinada por mim e pelos demais presentes.</p>
<p class="center"><strong>{{school.city}}, {{document_date}}</strong></p>
<p>Primeiro Secretário: ____________________</p>
<p>Presidente: ____________________</p>
<p><strong>Conselheiros:</strong></p>
</body>
</html>"#;

const CONSOLIDATION_SHEET_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8"/>
<title>Consolidação de Pesquisas</title>
<style>
body { font-family: 'Inter', sans-serif; font-size: 8px; padding: 10px; }
table { width: 100%; border-collapse: collapse; margin-bottom: 5px; }
th, td { border: 1.5px solid black; padding: 2px 4px; }
.bg-gray { background-color: #f3f3f3; }
.best { background-color: #fef9c3; }
.title { background: #eee; font-weight: bold; padding: 4px; border: 1.5px solid black; border-bottom: none; }
@media print { @page { size: A4 landscape; margin: 1cm; } }
</style>
</head>
<body>
<h3>{{program}} - CONSOLIDAÇÃO DE PESQUISAS DE PREÇOS</h3>
<div class="title">BLOCO I - IDENTIFICAÇÃO DA UNIDADE EXECUTORA PRÓPRIA (UEx)</div>
<table>
<tr><td><strong>UEx:</strong> {{school.name}}</td><td>{{school.cnpj}}</td>
<td class="bg-gray"><strong>RECURSO:</strong></td><td>{{program}}</td>
<td class="bg-gray"><strong>EXERCÍCIO:</strong></td><td>{{exercise}}</td></tr>
</table>
<div class="title">BLOCO II - IDENTIFICAÇÃO DOS PROPONENTES</div>
<table>
<tr class="bg-gray">{{#each proponents}}<td><strong>PROPONENTE ({{letter}})</strong></td>{{/each}}</tr>
<tr>{{#each proponents}}<td>{{name}}<br/>{{cnpj}}</td>{{/each}}</tr>
</table>
<div class="title">BLOCO III - PROPOSTAS</div>
<table>
<tr class="bg-gray">
<td>Item</td><td>Descrição</td><td>Unid</td><td>Qtde</td>
{{#each proponents}}<td>Prop ({{letter}})</td>{{/each}}
<td>M. Preço</td><td>Vencedor</td>
</tr>
{{#each items}}
<tr>
<td>{{number}}</td><td>{{description}}</td><td>{{unit}}</td><td>{{quantity}}</td>
{{#each prices}}<td{{#if is_best}} class="best"{{/if}}>{{value}}</td>{{/each}}
<td>{{best_price}}</td><td>Prop ({{best_letter}})</td>
</tr>
{{/each}}
</table>
<div class="title">BLOCO IV - APURAÇÃO DAS PROPOSTAS</div>
<table>
<tr class="bg-gray"><td><strong>VALOR TOTAL DAS PROPOSTAS</strong></td>
{{#each proponents}}<td>{{total}}</td>{{/each}}</tr>
<tr><td><strong>VALOR TOTAL COM DESCONTO ({{discount}})</strong></td><td>{{net_total}}</td><td></td><td></td></tr>
</table>
<p><strong>LOCAL E DATA:</strong> {{school.city}}, {{invoice_date}}</p>
<p><strong>{{school.director}}</strong> — PRESIDENTE DA UEx</p>
</body>
</html>"#;

const PURCHASE_ORDER_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8"/>
<title>Ordem de Compra</title>
<style>
body { font-family: 'Inter', sans-serif; font-size: 10px; padding: 10px; }
table { width: 100%; border-collapse: collapse; margin-bottom: -1px; }
th, td { border: 1.5px solid black; padding: 4px 8px; }
.bg-gray { background-color: #f3f3f3; }
.right { text-align: right; }
@media print { @page { size: A4; margin: 1cm; } }
</style>
</head>
<body>
<table><tr><td><strong>{{program}}</strong></td><td class="right"><strong>ORDEM DE COMPRA</strong></td></tr></table>
<table>
<tr><td class="bg-gray"><strong>UEX CONTRATANTE:</strong></td><td>{{school.name}}</td>
<td class="bg-gray"><strong>CNPJ:</strong></td><td>{{school.cnpj}}</td></tr>
<tr><td class="bg-gray"><strong>NOME DA ESCOLA:</strong></td><td>{{school.name}}</td>
<td class="bg-gray"><strong>SEEC:</strong></td><td>{{school.seec}}</td></tr>
</table>
<table>
<tr><td class="bg-gray"><strong>PROPONENTE VENCEDOR:</strong></td><td>{{winner_name}}</td>
<td class="bg-gray"><strong>CNPJ:</strong></td><td>{{winner_cnpj}}</td></tr>
</table>
<p>Autorizo o fornecimento do produto/material, conforme descrição na planilha abaixo, em razão do proponente
acima identificado ter apresentado uma proposta adequada e de menor preço, conforme previsto na RESOLUÇÃO
CD/FNDE Nº 09, DE 02 DE MARÇO DE 2011.</p>
<table>
<tr class="bg-gray"><td>ITEM</td><td>DESCRIÇÃO</td><td>UND.</td><td>QTD.</td><td>VALOR UNITÁRIO</td><td>VALOR TOTAL</td></tr>
{{#each items}}
<tr><td>{{number}}</td><td>{{description}}</td><td>{{unit}}</td><td>{{quantity}}</td>
<td class="right">{{unit_price}}</td><td class="right"><strong>{{total}}</strong></td></tr>
{{/each}}
<tr><td colspan="5" class="right bg-gray"><strong>TOTAL</strong></td><td class="right"><strong>{{net_total}}</strong></td></tr>
</table>
<table>
<tr><td class="bg-gray"><strong>NOME DO(A) RESPONSÁVEL</strong></td><td>{{school.director}}</td>
<td class="bg-gray"><strong>FUNÇÃO</strong></td><td>PRESIDENTE</td></tr>
<tr><td class="bg-gray"><strong>LOCAL E DATA</strong></td><td>{{school.city}}, {{order_date}}</td>
<td class="bg-gray"><strong>ASSINATURA</strong></td><td></td></tr>
</table>
</body>
</html>"#;

const RECEIPT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8"/>
<title>Recibo</title>
<style>
body { font-family: 'Inter', sans-serif; padding: 2cm; }
.center { text-align: center; }
.justified { text-align: justify; line-height: 1.8; }
.total { font-size: 24px; font-weight: bold; }
@media print { @page { size: A4; margin: 0; } }
</style>
</head>
<body>
<div class="center">
  <h1>{{supplier.name}}</h1>
  <p>CNPJ: {{supplier.cnpj}}<br/>{{supplier.address}} - {{supplier.city}}</p>
</div>
<h2>RECIBO</h2>
<p class="total">{{net_total}}</p>
<p class="justified">RECEBEMOS DO <strong>{{school.name}}</strong>, CNPJ <strong>{{school.cnpj}}</strong>,
SITUADO NA <strong>{{school.address}}</strong>, A IMPORTÂNCIA DE <strong>{{net_total}}
({{net_total_words}})</strong>, REFERENTE A COMPRA DE PRODUTOS CONFORME NOTA FISCAL DE Nº
<strong>{{invoice_number}}</strong>, DATADA DE <strong>{{invoice_date}}</strong>.</p>
<p class="justified">PAGO COM RECURSO <strong>{{program}}</strong>, AUTORIZAÇÃO Nº <strong>{{auth_number}}</strong>.</p>
<p>{{school.city}}, {{receipt_date}}</p>
<div class="center">
  <p>____________________________________<br/>ASSINATURA DO FORNECEDOR<br/>{{supplier.name}}</p>
</div>
</body>
</html>"#;

const QUOTE_SHEET_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8"/>
<title>Planilha de Pesquisa de Preços</title>
<style>
body { font-family: 'Inter', sans-serif; font-size: 9px; padding: 10px; }
table { width: 100%; border-collapse: collapse; margin-bottom: -1px; }
th, td { border: 1px solid black; padding: 3px 6px; }
.bg-gray { background-color: #f3f3f3; }
.right { text-align: right; }
@media print { @page { size: A4; margin: 1cm; } }
</style>
</head>
<body>
<table><tr class="bg-gray"><td><strong>PLANILHA DE PESQUISA DE PREÇOS - ORÇAMENTO</strong></td></tr></table>
<table>
<tr><td><strong>NOME DO FORNECEDOR:</strong> {{supplier_name}}</td>
<td class="bg-gray"><strong>CNPJ:</strong></td><td>{{supplier_cnpj}}</td></tr>
</table>
<table>
<tr><td><strong>NOME DO CLIENTE:</strong> {{school.name}}</td>
<td class="bg-gray"><strong>CNPJ:</strong></td><td>{{school.cnpj}}</td></tr>
<tr><td colspan="3"><strong>ENDEREÇO:</strong> {{school.address}}</td></tr>
</table>
<table>
<tr class="bg-gray"><td>ITEM</td><td>DESCRIÇÃO</td><td>UND.</td><td>QTD.</td><td>VALOR UNITÁRIO</td><td>VALOR TOTAL</td></tr>
{{#each items}}
<tr><td>{{number}}</td><td>{{description}}</td><td>{{unit}}</td><td>{{quantity}}</td>
<td class="right">{{unit_price}}</td><td class="right"><strong>{{total}}</strong></td></tr>
{{/each}}
<tr class="bg-gray"><td colspan="5"><strong>VALOR TOTAL</strong></td><td class="right"><strong>{{total}}</strong></td></tr>
</table>
<p><strong>DATA:</strong> {{research_date}}</p>
<p>Serão atendidas as seguintes condições:<br/>
Todos os itens da planilha deverão ser cotados;<br/>
Período de validade da proposta: 30 dias da cotação;<br/>
Prazo máximo de entrega/execução: 02 dias a partir da ordem de compra/serviço pela Unidade Executora;<br/>
Recebimento mediante apresentação de nota fiscal e certidões;<br/>
Pagamento após conferência e atesto da nota fiscal, mediante apresentação de recibo.</p>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use prestacao_models::{
        FinancialTransaction, LineItem, ProcurementProcess, Proposal, SchoolProfile, Supplier,
    };
    use prestacao_procurement_engine::assemble_dossier;
    use uuid::Uuid;

    fn dossier() -> ProcessDossier {
        let date = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();
        let mut transaction = FinancialTransaction::new("Gêneros alimentícios - PNAE", -435.0, date);
        transaction.supplier = Some(Supplier::registered(
            Uuid::new_v4(),
            "Distribuidora Alfa",
            Some("11222333000181".to_string()),
        ));
        transaction.invoice_number = Some("4711".to_string());

        let mut process = ProcurementProcess::new(transaction);
        let items = vec![
            LineItem::new("Arroz parboilizado tipo 1", 50.0, "kg", 5.5),
            LineItem::new("Feijão carioca", 20.0, "kg", 8.0),
        ];
        let mut school = SchoolProfile::named("Escola Municipal Santos Dumont");
        school.city = Some("Maceió".to_string());
        school.secretary = Some("Maria das Graças".to_string());
        process.school = Some(school);

        let mut beta = Proposal::competitor(
            Supplier::registered(Uuid::new_v4(), "Mercado Beta", None),
            &items,
        );
        for (line, price) in beta.lines.iter_mut().zip([5.9, 8.4]) {
            line.unit_price = price;
        }
        let mut gama = Proposal::competitor(
            Supplier::registered(Uuid::new_v4(), "Atacadão Gama", None),
            &items,
        );
        for (line, price) in gama.lines.iter_mut().zip([6.15, 8.2]) {
            line.unit_price = price;
        }
        process.proposals = vec![beta, gama];
        process.items = items;

        assemble_dossier(&process).unwrap()
    }

    #[test]
    fn test_minutes_carry_values_in_words() {
        let rendered = DocumentAssembler::new()
            .assemble(DocumentKind::MeetingMinutes, &dossier())
            .unwrap();

        assert_eq!(rendered.title, "Ata de Assembleia");
        assert!(rendered.html.contains("DISTRIBUIDORA ALFA"));
        assert!(rendered.html.contains("ESCOLA MUNICIPAL SANTOS DUMONT"));
        assert!(rendered
            .html
            .contains("quatrocentos e trinta e cinco reais"));
        assert!(rendered.html.contains("9 DE JUNHO DE 2025"));
        // Day 9 is odd: morning meeting.
        assert!(rendered.html.contains("Às 09:00 horas"));
    }

    #[test]
    fn test_consolidation_sheet_marks_best_prices() {
        let rendered = DocumentAssembler::new()
            .assemble(DocumentKind::ConsolidationSheet, &dossier())
            .unwrap();

        assert!(rendered.html.contains("PROPONENTE (A)"));
        assert!(rendered.html.contains("MERCADO BETA"));
        assert!(rendered.html.contains(r#"class="best""#));
        assert!(rendered.html.contains("R$ 5,50"));
    }

    #[test]
    fn test_purchase_order_totals() {
        let rendered = DocumentAssembler::new()
            .assemble(DocumentKind::PurchaseOrder, &dossier())
            .unwrap();

        assert!(rendered.html.contains("ORDEM DE COMPRA"));
        assert!(rendered.html.contains("R$ 435,00"));
        assert!(rendered.html.contains("ARROZ PARBOILIZADO TIPO 1"));
    }

    #[test]
    fn test_receipt_spells_out_the_amount() {
        let rendered = DocumentAssembler::new()
            .assemble(DocumentKind::Receipt, &dossier())
            .unwrap();

        assert!(rendered.html.contains("RECIBO"));
        assert!(rendered.html.contains("11.222.333/0001-81"));
        assert!(rendered
            .html
            .contains("QUATROCENTOS E TRINTA E CINCO REAIS"));
        assert!(rendered.html.contains("4711"));
    }

    #[test]
    fn test_quote_sheet_per_proponent() {
        let assembler = DocumentAssembler::new();
        let d = dossier();

        let winner_sheet = assembler
            .assemble(DocumentKind::QuoteSheet { proposal_index: 0 }, &d)
            .unwrap();
        assert!(winner_sheet.html.contains("DISTRIBUIDORA ALFA"));

        let beta_sheet = assembler
            .assemble(DocumentKind::QuoteSheet { proposal_index: 1 }, &d)
            .unwrap();
        assert!(beta_sheet.html.contains("MERCADO BETA"));
        assert!(beta_sheet.html.contains("R$ 5,90"));

        assert!(assembler
            .assemble(DocumentKind::QuoteSheet { proposal_index: 9 }, &d)
            .is_err());
    }
}
