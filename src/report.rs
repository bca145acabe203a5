// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// RELATÓRIO DE VIABILIDADE ECONÔMICA
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Pares rótulo/valor já formatados, agrupados em quatro seções fixas:
// - Parâmetros de Compra
// - Indicadores Zootécnicos
// - Custos Detalhados
// - Resultado Econômico
//
// A diagramação (texto, markdown, JSON) fica em `render`.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::confinamento::ConfinamentoRun;
use crate::error::{SimError, SimResult};
use crate::recria::{RecriaIndicators, RecriaParams};
use crate::types::{LinkStatus, Stage};
use crate::utils::{end_date, format_date, format_thousands};

/// Formato de saída do relatório.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Tabela em texto puro
    #[default]
    Text,
    /// Tabelas markdown
    Markdown,
    /// JSON estruturado
    Json,
}

impl ReportFormat {
    /// Converte string (case-insensitive), aceitando apelidos comuns
    pub fn parse(value: &str) -> SimResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(SimError::UnknownFormat(other.to_string())),
        }
    }

    /// Extensão de arquivo
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Markdown => "markdown",
            Self::Json => "json",
        };
        write!(f, "{}", name)
    }
}

/// Linha do relatório
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Rótulo
    pub label: String,
    /// Valor formatado
    pub value: String,
}

/// Seção do relatório
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    /// Título da seção
    pub title: String,
    /// Linhas
    pub rows: Vec<ReportRow>,
}

impl ReportSection {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            rows: Vec::new(),
        }
    }

    fn row(mut self, label: &str, value: impl Into<String>) -> Self {
        self.rows.push(ReportRow {
            label: label.to_string(),
            value: value.into(),
        });
        self
    }

    /// Procura o valor de uma linha pelo rótulo
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }
}

/// Relatório completo de uma etapa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// ID único do relatório
    pub id: Uuid,
    /// Etapa
    pub stage: Stage,
    /// Título
    pub title: String,
    /// Momento de geração
    pub generated_at: DateTime<Local>,
    /// Seções na ordem fixa
    pub sections: Vec<ReportSection>,
}

/// Títulos das quatro seções, na ordem
pub const SECTION_TITLES: [&str; 4] = [
    "Parâmetros de Compra",
    "Indicadores Zootécnicos",
    "Custos Detalhados",
    "Resultado Econômico",
];

fn money(value: f64) -> String {
    format_thousands(value, 2)
}

fn pct(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Monta o relatório da recria a pasto.
pub fn recria_report(
    params: &RecriaParams,
    indicators: &RecriaIndicators,
    start_date: NaiveDate,
) -> Report {
    let [purchase_title, zoo_title, costs_title, result_title] = SECTION_TITLES;

    let purchase = ReportSection::new(purchase_title)
        .row("Câmbio (₲/US$)", format_thousands(params.exchange_rate, 0))
        .row(
            "Preço bezerro (₲/kg PV)",
            format_thousands(params.buy_price_local_per_kg, 0),
        )
        .row(
            "Preço bezerro (US$/kg PV)",
            format!("{:.2}", indicators.buy_price_per_kg),
        )
        .row(
            "Preço de venda (US$/kg PV)",
            format!("{:.2}", params.sell_price_per_kg),
        )
        .row("Ágio (%)", pct(indicators.premium_pct));

    let zootechnical = ReportSection::new(zoo_title)
        .row("Data inicial", format_date(start_date))
        .row("Data final", format_date(end_date(start_date, params.days)))
        .row("Dias em pastejo", params.days.to_string())
        .row("Peso inicial (kg)", format!("{:.2}", params.initial_weight))
        .row("Peso final (kg)", format!("{:.2}", indicators.final_weight))
        .row("GPV (kg)", format!("{:.2}", indicators.weight_gain))
        .row("GMD (kg/dia)", format!("{:.2}", params.daily_gain));

    let costs = ReportSection::new(costs_title)
        .row("Custo do animal (US$)", money(indicators.purchase_cost))
        .row("Frete (US$)", format!("{:.2}", params.freight_per_head))
        .row("Comissão (US$)", format!("{:.2}", params.commission_per_head))
        .row(
            "Custo aluguel/mês (US$)",
            format!("{:.2}", params.monthly_rent_cost),
        )
        .row(
            "Custo nutrição/mês (US$)",
            format!("{:.2}", params.monthly_feed_cost),
        )
        .row(
            "Custo operações/mês (US$)",
            format!("{:.2}", params.monthly_operational_cost),
        )
        .row("Custo total período (US$)", money(indicators.period_cost))
        .row(
            "Juros sobre compra do animal (US$)",
            format!("{:.2}", indicators.interest),
        )
        .row("Custo total (US$)", money(indicators.total_cost));

    let result = ReportSection::new(result_title)
        .row("Receita (US$)", money(indicators.revenue))
        .row("Lucro líquido (US$)", money(indicators.profit))
        .row("Margem período (%)", pct(indicators.margin_pct))
        .row("Margem mensal (%)", pct(indicators.monthly_margin_pct))
        .row("ROI (%)", pct(indicators.roi_pct))
        .row("ROI mensal (%)", pct(indicators.monthly_roi_pct))
        .row("ROI sobre custo total (%)", pct(indicators.roi_total_cost_pct))
        .row(
            "ROI mensal sobre custo total (%)",
            pct(indicators.monthly_roi_total_cost_pct),
        );

    Report {
        id: Uuid::new_v4(),
        stage: Stage::Recria,
        title: "Relatório de Viabilidade Econômica – Recria a Pasto".to_string(),
        generated_at: Local::now(),
        sections: vec![purchase, zootechnical, costs, result],
    }
}

/// Monta o relatório do confinamento.
pub fn confinamento_report(run: &ConfinamentoRun) -> Report {
    let [purchase_title, zoo_title, costs_title, result_title] = SECTION_TITLES;
    let params = &run.params;
    let ind = &run.indicators;

    let origin = match run.link() {
        LinkStatus::Linked(_) => "Saída da recria",
        LinkStatus::Disconnected => "Padrão (sem recria)",
    };

    let purchase = ReportSection::new(purchase_title)
        .row("Origem dos padrões", origin)
        .row("Valor de compra ($/kg PV)", format!("{:.2}", params.buy_price_per_kg))
        .row(
            "Valor de venda ($/kg carcaça)",
            format!("{:.2}", params.sell_price_per_kg_carcass),
        )
        .row(
            "Rendimento inicial (%)",
            pct(crate::formulas::fraction_to_percent(params.initial_yield)),
        )
        .row(
            "Rendimento final (%)",
            pct(crate::formulas::fraction_to_percent(params.final_yield)),
        )
        .row(
            "Juros (% ao mês)",
            pct(crate::formulas::fraction_to_percent(params.monthly_interest_rate)),
        );

    let zootechnical = ReportSection::new(zoo_title)
        .row("Peso inicial (kg)", format!("{:.2}", params.initial_weight))
        .row("Peso final (kg)", format!("{:.2}", ind.final_weight))
        .row("Dias de trato", params.days.to_string())
        .row("Ganho de peso (kg)", format!("{:.2}", ind.weight_gain))
        .row("Ganho diário (kg/dia)", format!("{:.2}", params.daily_gain))
        .row("Carcaça final (kg)", format!("{:.2}", ind.final_carcass_weight))
        .row("Ganho de carcaça (kg)", format!("{:.2}", ind.carcass_gain))
        .row("Carcaça/dia (kg/dia)", format!("{:.2}", ind.daily_carcass_gain));

    let costs = ReportSection::new(costs_title)
        .row("Custo animal ($)", money(ind.purchase_cost))
        .row("Custo nutricional ($)", money(ind.feed_cost))
        .row("Serviços ($)", money(ind.operational_cost))
        .row("Custos extras ($)", money(ind.extra_costs))
        .row("Juros ($)", money(ind.interest))
        .row("Custo total ($)", money(ind.total_cost));

    let result = ReportSection::new(result_title)
        .row("Receita ($)", money(ind.revenue))
        .row("Lucro ($)", money(ind.profit))
        .row("Margem (%)", pct(ind.margin_pct))
        .row("ROI (%)", pct(ind.roi_pct))
        .row("ROI mensal (%)", pct(ind.monthly_roi_pct))
        .row("ROI custo total (%)", pct(ind.roi_total_cost_pct))
        .row("ROI mensal custo total (%)", pct(ind.monthly_roi_total_cost_pct));

    Report {
        id: Uuid::new_v4(),
        stage: Stage::Confinamento,
        title: "Relatório de Viabilidade Econômica – Confinamento".to_string(),
        generated_at: Local::now(),
        sections: vec![purchase, zootechnical, costs, result],
    }
}

impl Report {
    /// Procura uma seção pelo título
    pub fn section(&self, title: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Nome de arquivo padrão para exportação
    pub fn file_name(&self, format: ReportFormat) -> String {
        let base = match self.stage {
            Stage::Recria => "recria_pasto",
            Stage::Confinamento => "confinamento",
        };
        format!("{}.{}", base, format.extension())
    }

    /// Renderiza no formato pedido
    pub fn render(&self, format: ReportFormat) -> SimResult<String> {
        match format {
            ReportFormat::Text => Ok(self.to_text()),
            ReportFormat::Markdown => Ok(self.to_markdown()),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Tabelas em texto puro com colunas alinhadas
    pub fn to_text(&self) -> String {
        let label_width = self
            .sections
            .iter()
            .flat_map(|s| s.rows.iter())
            .map(|r| r.label.chars().count())
            .max()
            .unwrap_or(0);
        let rule = "━".repeat(label_width + 20);

        let mut out = String::new();
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!(" {}\n", self.title));
        out.push_str(&format!(
            " Gerado em {}\n",
            self.generated_at.format("%d/%m/%Y %H:%M")
        ));
        out.push_str(&rule);
        out.push('\n');

        for section in &self.sections {
            out.push('\n');
            out.push_str(&format!("{}\n", section.title));
            for row in &section.rows {
                let padding = label_width - row.label.chars().count();
                out.push_str(&format!(
                    "  {}{}  {:>16}\n",
                    row.label,
                    " ".repeat(padding),
                    row.value
                ));
            }
        }
        out
    }

    /// Tabelas markdown, uma por seção
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\n", self.title);
        out.push_str(&format!(
            "_Gerado em {}_\n",
            self.generated_at.format("%d/%m/%Y %H:%M")
        ));
        for section in &self.sections {
            out.push_str(&format!("\n## {}\n\n| Item | Valor |\n|---|---:|\n", section.title));
            for row in &section.rows {
                out.push_str(&format!("| {} | {} |\n", row.label, row.value));
            }
        }
        out
    }

    /// Grava o relatório em `dir` e retorna o caminho
    pub fn write_to(&self, dir: &Path, format: ReportFormat) -> SimResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name(format));
        std::fs::write(&path, self.render(format)?)?;
        log::debug!("📄 Relatório gravado em {:?}", path);
        Ok(path)
    }
}
