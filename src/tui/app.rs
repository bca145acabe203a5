//! Estado da aplicação TUI

use std::collections::VecDeque;
use std::path::PathBuf;

use chrono::NaiveDate;
use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::confinamento::ConfinamentoInput;
use crate::error::SimResult;
use crate::formulas::{fraction_to_percent, percent_to_fraction};
use crate::recria::RecriaParams;
use crate::report::{self, Report};
use crate::sensitivity::{
    ScenarioOverrides, SensitivityInput, BUY_PRICE_SLIDER, DAILY_GAIN_SLIDER, SELL_PRICE_SLIDER,
    SHOCK_SLIDER,
};
use crate::session::{Simulator, TurnResult};

/// Máximo de entradas mantidas no painel de logs
const MAX_LOGS: usize = 200;

/// Nível de severidade do log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// Informação geral
    Info,
    /// Operação bem sucedida
    Success,
    /// Aviso
    Warning,
    /// Erro
    Error,
}

impl LogLevel {
    /// Retorna o símbolo emoji do nível
    pub fn symbol(&self) -> &'static str {
        match self {
            LogLevel::Info => "ℹ️ ",
            LogLevel::Success => "✅",
            LogLevel::Warning => "⚠️ ",
            LogLevel::Error => "❌",
        }
    }
}

/// Entrada de log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Timestamp formatado
    pub timestamp: String,
    /// Nível do log
    pub level: LogLevel,
    /// Mensagem
    pub message: String,
}

impl LogEntry {
    /// Cria nova entrada de log
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        let now = chrono::Local::now();
        Self {
            timestamp: now.format("%H:%M:%S").to_string(),
            level,
            message: message.into(),
        }
    }

    /// Log de informação
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    /// Log de sucesso
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Success, message)
    }

    /// Log de aviso
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, message)
    }

    /// Log de erro
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }
}

/// Abas da interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Recria a pasto
    Recria,
    /// Confinamento
    Confinamento,
    /// Sensibilidade da recria
    Sensibilidade,
}

impl Tab {
    /// Todas as abas, na ordem de exibição
    pub const ALL: [Tab; 3] = [Tab::Recria, Tab::Confinamento, Tab::Sensibilidade];

    /// Título da aba
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Recria => "🌱 Recria a Pasto",
            Tab::Confinamento => "🏭 Confinamento",
            Tab::Sensibilidade => "📉 Sensibilidade",
        }
    }

    /// Posição da aba
    pub fn index(&self) -> usize {
        match self {
            Tab::Recria => 0,
            Tab::Confinamento => 1,
            Tab::Sensibilidade => 2,
        }
    }

    /// Próxima aba (circular)
    pub fn next(&self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Aba anterior (circular)
    pub fn previous(&self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Campos editáveis da aba
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Tab::Recria => &RECRIA_FIELDS,
            Tab::Confinamento => &CONFINAMENTO_FIELDS,
            Tab::Sensibilidade => &SENSITIVITY_FIELDS,
        }
    }
}

/// Descrição de um campo numérico do formulário
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Rótulo exibido
    pub label: &'static str,
    /// Passo de ajuste (na unidade exibida)
    pub step: f64,
    /// Mínimo permitido
    pub min: f64,
    /// Máximo permitido
    pub max: f64,
    /// Casas decimais na exibição
    pub decimals: usize,
}

const fn field(label: &'static str, step: f64, min: f64, max: f64, decimals: usize) -> FieldSpec {
    FieldSpec {
        label,
        step,
        min,
        max,
        decimals,
    }
}

const UNBOUNDED: f64 = f64::MAX;

/// Campos da recria (percentuais exibidos em %)
pub const RECRIA_FIELDS: [FieldSpec; 12] = [
    field("Peso inicial (kg)", 1.0, 0.0, UNBOUNDED, 2),
    field("Preço compra (₲/kg PV)", 100.0, 0.0, UNBOUNDED, 2),
    field("Câmbio (₲/US$)", 10.0, 0.0, UNBOUNDED, 2),
    field("Período (dias em pastejo)", 1.0, 1.0, UNBOUNDED, 0),
    field("Ganho médio diário (kg/dia)", 0.01, 0.0, UNBOUNDED, 2),
    field("Custo aluguel (US$/mês)", 0.1, 0.0, UNBOUNDED, 2),
    field("Custo nutrição (US$/mês)", 0.1, 0.0, UNBOUNDED, 2),
    field("Custo operações (US$/mês)", 0.1, 0.0, UNBOUNDED, 2),
    field("Frete (US$/cab)", 0.5, 0.0, UNBOUNDED, 2),
    field("Comissão (US$/cab)", 0.5, 0.0, UNBOUNDED, 2),
    field("Juros anual (%)", 0.1, 0.0, UNBOUNDED, 2),
    field("Preço venda (US$/kg PV)", 0.01, 0.0, UNBOUNDED, 2),
];

/// Campos do confinamento (percentuais exibidos em %)
pub const CONFINAMENTO_FIELDS: [FieldSpec; 11] = [
    field("Peso inicial (kg)", 1.0, 0.0, UNBOUNDED, 2),
    field("Ganho de peso/dia (kg)", 0.05, 0.0, UNBOUNDED, 2),
    field("Período de trato (dias)", 1.0, 1.0, UNBOUNDED, 0),
    field("Rendimento inicial (%)", 0.1, 0.0, 100.0, 2),
    field("Rendimento final (%)", 0.1, 0.0, 100.0, 2),
    field("Valor de compra ($/kg PV)", 0.01, 0.0, UNBOUNDED, 2),
    field("Valor de venda ($/kg carcaça)", 0.01, 0.0, UNBOUNDED, 2),
    field("Custo nutricional ($/dia)", 0.1, 0.0, UNBOUNDED, 2),
    field("Serviços operacionais ($/animal/dia)", 0.1, 0.0, UNBOUNDED, 2),
    field("Custos extras ($/animal)", 0.1, 0.0, UNBOUNDED, 2),
    field("Juros sobre custo do animal (% ao mês)", 0.05, 0.0, UNBOUNDED, 2),
];

/// Controles da análise de sensibilidade
pub const SENSITIVITY_FIELDS: [FieldSpec; 5] = [
    field(
        "Preço compra (₲/kg PV)",
        BUY_PRICE_SLIDER.step,
        BUY_PRICE_SLIDER.min,
        BUY_PRICE_SLIDER.max,
        0,
    ),
    field(
        "Preço venda (US$/kg PV)",
        SELL_PRICE_SLIDER.step,
        SELL_PRICE_SLIDER.min,
        SELL_PRICE_SLIDER.max,
        2,
    ),
    field(
        "GMD (kg/dia)",
        DAILY_GAIN_SLIDER.step,
        DAILY_GAIN_SLIDER.min,
        DAILY_GAIN_SLIDER.max,
        2,
    ),
    field(
        "Variação (%) no valor de compra",
        SHOCK_SLIDER.step,
        SHOCK_SLIDER.min,
        SHOCK_SLIDER.max,
        1,
    ),
    field(
        "Variação (%) no preço de venda",
        SHOCK_SLIDER.step,
        SHOCK_SLIDER.min,
        SHOCK_SLIDER.max,
        1,
    ),
];

/// Estado da aplicação
pub struct App {
    /// Aba atual
    pub tab: Tab,
    /// Índice do campo selecionado na aba atual
    pub selected: usize,
    /// Parâmetros da recria
    pub recria: RecriaParams,
    /// Entrada do confinamento (peso/preço `None` seguem a recria)
    pub confinamento: ConfinamentoInput,
    /// Entradas da sensibilidade
    pub sensitivity: SensitivityInput,
    /// Resultado do último turno
    pub last: Option<TurnResult>,
    /// Logs exibidos no painel
    pub logs: VecDeque<LogEntry>,
    /// Data inicial do período (relatórios)
    pub start_date: NaiveDate,
    /// Configuração carregada
    pub config: AppConfig,
    /// Se o usuário pediu para sair
    pub should_quit: bool,
    simulator: Simulator,
    was_linked: bool,
}

impl App {
    /// Cria app com parâmetros iniciais
    pub fn new(
        recria: RecriaParams,
        confinamento: ConfinamentoInput,
        config: AppConfig,
        start_date: NaiveDate,
    ) -> Self {
        let sensitivity = SensitivityInput {
            scenario: ScenarioOverrides::from_baseline(&recria),
            shock: config.shock,
        };
        let mut app = Self {
            tab: Tab::Recria,
            selected: 0,
            recria,
            confinamento,
            sensitivity,
            last: None,
            logs: VecDeque::new(),
            start_date,
            config,
            should_quit: false,
            simulator: Simulator::new(),
            was_linked: false,
        };
        app.log(LogEntry::info("Simulador iniciado"));
        app
    }

    /// Adiciona entrada ao painel de logs
    pub fn log(&mut self, entry: LogEntry) {
        if self.logs.len() >= MAX_LOGS {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);
    }

    /// Executa um turno completo (recria → confinamento → sensibilidade)
    pub fn refresh(&mut self) -> &TurnResult {
        let result =
            self.simulator
                .run_turn(&self.recria, &self.confinamento, &self.sensitivity);

        let linked = result.confinamento.link().is_linked();
        if linked != self.was_linked {
            let entry = if linked {
                LogEntry::success("Confinamento vinculado à saída da recria")
            } else {
                LogEntry::warning("Confinamento desconectado da recria")
            };
            self.log(entry);
            self.was_linked = linked;
        }

        self.last.insert(result)
    }

    /// Último resultado, calculando se ainda não houver
    pub fn result(&mut self) -> &TurnResult {
        let Self {
            simulator,
            recria,
            confinamento,
            sensitivity,
            last,
            ..
        } = self;
        last.get_or_insert_with(|| simulator.run_turn(recria, confinamento, sensitivity))
    }

    /// Número de turnos executados
    pub fn turns(&self) -> u64 {
        self.simulator.turns()
    }

    /// Especificação do campo selecionado
    pub fn selected_field(&self) -> FieldSpec {
        self.tab.fields()[self.selected]
    }

    /// Valor exibido de um campo da aba atual
    pub fn field_value(&self, index: usize) -> f64 {
        match self.tab {
            Tab::Recria => recria_value(&self.recria, index),
            Tab::Confinamento => self.confinamento_value(index),
            Tab::Sensibilidade => sensitivity_value(&self.sensitivity, index),
        }
    }

    /// Se o campo do confinamento segue o padrão vindo da recria
    pub fn is_linked_field(&self, index: usize) -> bool {
        self.tab == Tab::Confinamento
            && match index {
                0 => self.confinamento.initial_weight.is_none(),
                5 => self.confinamento.buy_price_per_kg.is_none(),
                _ => false,
            }
    }

    fn confinamento_value(&self, index: usize) -> f64 {
        let input = &self.confinamento;
        let defaults = self.simulator.confinamento().defaults();
        match index {
            0 => input.initial_weight.unwrap_or(defaults.initial_weight),
            1 => input.daily_gain,
            2 => f64::from(input.days),
            3 => fraction_to_percent(input.initial_yield),
            4 => fraction_to_percent(input.final_yield),
            5 => input.buy_price_per_kg.unwrap_or(defaults.buy_price_per_kg),
            6 => input.sell_price_per_kg_carcass,
            7 => input.daily_feed_cost,
            8 => input.daily_operational_cost_per_head,
            9 => input.extra_costs,
            _ => fraction_to_percent(input.monthly_interest_rate),
        }
    }

    fn set_field(&mut self, index: usize, value: f64) {
        match self.tab {
            Tab::Recria => set_recria_value(&mut self.recria, index, value),
            Tab::Confinamento => set_confinamento_value(&mut self.confinamento, index, value),
            Tab::Sensibilidade => set_sensitivity_value(&mut self.sensitivity, index, value),
        }
    }

    /// Ajusta o campo selecionado em `steps` passos, respeitando os limites
    pub fn adjust(&mut self, steps: i32) {
        let spec = self.selected_field();
        let current = self.field_value(self.selected);
        let next = (current + spec.step * f64::from(steps)).clamp(spec.min, spec.max);
        // Arredonda para o passo exibido, evitando acúmulo de erro de ponto flutuante
        let scale = 10f64.powi(spec.decimals.max(2) as i32);
        self.set_field(self.selected, (next * scale).round() / scale);
    }

    /// Campo seguinte
    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % self.tab.fields().len();
    }

    /// Campo anterior
    pub fn previous_field(&mut self) {
        let len = self.tab.fields().len();
        self.selected = (self.selected + len - 1) % len;
    }

    /// Troca de aba, voltando ao primeiro campo
    pub fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.selected = 0;
    }

    /// Restaura padrões da aba atual.
    ///
    /// Confinamento: peso e preço voltam a seguir a recria.
    /// Sensibilidade: cenário volta à linha de base.
    pub fn reset(&mut self) {
        match self.tab {
            Tab::Recria => {}
            Tab::Confinamento => {
                self.confinamento.initial_weight = None;
                self.confinamento.buy_price_per_kg = None;
                self.log(LogEntry::info("Peso inicial e preço de compra seguem a recria"));
            }
            Tab::Sensibilidade => {
                self.sensitivity.scenario = ScenarioOverrides::from_baseline(&self.recria);
                self.log(LogEntry::info("Cenário restaurado para a linha de base"));
            }
        }
    }

    /// Relatório da aba atual (sensibilidade usa o da recria)
    pub fn current_report(&mut self) -> Report {
        let start = self.start_date;
        let tab = self.tab;
        let result = self.result();
        match tab {
            Tab::Confinamento => report::confinamento_report(&result.confinamento),
            Tab::Recria | Tab::Sensibilidade => {
                report::recria_report(&result.recria_params, &result.recria, start)
            }
        }
    }

    /// Exporta o relatório da aba atual no formato configurado
    pub fn export_report(&mut self) -> SimResult<PathBuf> {
        let report = self.current_report();
        let outcome = report.write_to(&self.config.report_dir, self.config.report_format);
        match &outcome {
            Ok(path) => self.log(LogEntry::success(format!("Relatório exportado: {}", path.display()))),
            Err(e) => self.log(LogEntry::error(format!("Falha ao exportar relatório: {}", e))),
        }
        outcome
    }

    /// Trata uma tecla pressionada
    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.switch_tab(self.tab.next()),
            KeyCode::BackTab => self.switch_tab(self.tab.previous()),
            KeyCode::Up | KeyCode::Char('k') => self.previous_field(),
            KeyCode::Down | KeyCode::Char('j') => self.next_field(),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => self.adjust(1),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => self.adjust(-1),
            KeyCode::PageUp => self.adjust(10),
            KeyCode::PageDown => self.adjust(-10),
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('e') => {
                // Erro já registrado no painel de logs
                let _ = self.export_report();
            }
            _ => {}
        }
    }
}

fn recria_value(params: &RecriaParams, index: usize) -> f64 {
    match index {
        0 => params.initial_weight,
        1 => params.buy_price_local_per_kg,
        2 => params.exchange_rate,
        3 => f64::from(params.days),
        4 => params.daily_gain,
        5 => params.monthly_rent_cost,
        6 => params.monthly_feed_cost,
        7 => params.monthly_operational_cost,
        8 => params.freight_per_head,
        9 => params.commission_per_head,
        10 => fraction_to_percent(params.annual_interest_rate),
        _ => params.sell_price_per_kg,
    }
}

fn set_recria_value(params: &mut RecriaParams, index: usize, value: f64) {
    match index {
        0 => params.initial_weight = value,
        1 => params.buy_price_local_per_kg = value,
        2 => params.exchange_rate = value,
        3 => params.days = value.round().max(1.0) as u32,
        4 => params.daily_gain = value,
        5 => params.monthly_rent_cost = value,
        6 => params.monthly_feed_cost = value,
        7 => params.monthly_operational_cost = value,
        8 => params.freight_per_head = value,
        9 => params.commission_per_head = value,
        10 => params.annual_interest_rate = percent_to_fraction(value),
        _ => params.sell_price_per_kg = value,
    }
}

fn set_confinamento_value(input: &mut ConfinamentoInput, index: usize, value: f64) {
    match index {
        0 => input.initial_weight = Some(value),
        1 => input.daily_gain = value,
        2 => input.days = value.round().max(1.0) as u32,
        3 => input.initial_yield = percent_to_fraction(value),
        4 => input.final_yield = percent_to_fraction(value),
        5 => input.buy_price_per_kg = Some(value),
        6 => input.sell_price_per_kg_carcass = value,
        7 => input.daily_feed_cost = value,
        8 => input.daily_operational_cost_per_head = value,
        9 => input.extra_costs = value,
        _ => input.monthly_interest_rate = percent_to_fraction(value),
    }
}

fn sensitivity_value(input: &SensitivityInput, index: usize) -> f64 {
    match index {
        0 => input.scenario.buy_price_local_per_kg,
        1 => input.scenario.sell_price_per_kg,
        2 => input.scenario.daily_gain,
        3 => input.shock.purchase_pct(),
        _ => input.shock.sale_pct(),
    }
}

fn set_sensitivity_value(input: &mut SensitivityInput, index: usize, value: f64) {
    match index {
        0 => input.scenario.buy_price_local_per_kg = value,
        1 => input.scenario.sell_price_per_kg = value,
        2 => input.scenario.daily_gain = value,
        3 => input.shock.purchase = percent_to_fraction(value),
        _ => input.shock.sale = percent_to_fraction(value),
    }
}
