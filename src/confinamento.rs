// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ENGINE DO CONFINAMENTO
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Etapa 2. Peso inicial e preço de compra vêm da saída da recria quando ela
// existe; caso contrário usa padrões fixos e sinaliza modo desconectado.
// Custos são diários × dias (sem conversão mensal). Nunca escreve no handoff.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use serde::{Deserialize, Serialize};

use crate::error::{ensure_days, ensure_fraction, ensure_non_negative, SimResult};
use crate::formulas::{self, InterestBasis};
use crate::handoff::HandoffStore;
use crate::types::{percent, HandoffRecord, LinkStatus};

/// Peso inicial padrão sem saída da recria (kg)
pub const FALLBACK_INITIAL_WEIGHT: f64 = 350.0;

/// Preço de compra padrão sem saída da recria ($/kg PV)
pub const FALLBACK_BUY_PRICE_PER_KG: f64 = 11.30;

/// Padrões resolvidos no início de cada execução.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageDefaults {
    /// Peso inicial padrão (kg)
    pub initial_weight: f64,
    /// Preço de compra padrão ($/kg PV)
    pub buy_price_per_kg: f64,
    /// Origem dos padrões
    pub link: LinkStatus,
}

impl StageDefaults {
    /// Resolve padrões a partir do registro da recria (se houver)
    pub fn resolve(handoff: Option<HandoffRecord>) -> Self {
        match handoff {
            Some(record) => Self {
                initial_weight: record.final_weight,
                buy_price_per_kg: record.sell_price_per_kg,
                link: LinkStatus::Linked(record),
            },
            None => Self {
                initial_weight: FALLBACK_INITIAL_WEIGHT,
                buy_price_per_kg: FALLBACK_BUY_PRICE_PER_KG,
                link: LinkStatus::Disconnected,
            },
        }
    }
}

/// Entrada do confinamento como fornecida pelo usuário.
///
/// `initial_weight` e `buy_price_per_kg` em `None` seguem o padrão resolvido;
/// um valor explícito sempre prevalece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfinamentoInput {
    /// Peso inicial (kg); `None` = padrão
    pub initial_weight: Option<f64>,
    /// Ganho de peso por dia (kg)
    pub daily_gain: f64,
    /// Período de trato (dias)
    pub days: u32,
    /// Rendimento de carcaça inicial (fração)
    #[serde(rename = "initial_yield_pct", with = "percent")]
    pub initial_yield: f64,
    /// Rendimento de carcaça final (fração)
    #[serde(rename = "final_yield_pct", with = "percent")]
    pub final_yield: f64,
    /// Valor de compra ($/kg PV); `None` = padrão
    pub buy_price_per_kg: Option<f64>,
    /// Valor de venda ($/kg carcaça)
    pub sell_price_per_kg_carcass: f64,
    /// Custo nutricional ($/dia)
    pub daily_feed_cost: f64,
    /// Serviços operacionais ($/animal/dia)
    pub daily_operational_cost_per_head: f64,
    /// Custos extras ($/animal)
    pub extra_costs: f64,
    /// Juros sobre custo do animal (fração ao mês)
    #[serde(rename = "monthly_interest_rate_pct", with = "percent")]
    pub monthly_interest_rate: f64,
}

impl Default for ConfinamentoInput {
    fn default() -> Self {
        Self {
            initial_weight: None,
            daily_gain: 1.40,
            days: 110,
            initial_yield: 0.50,
            final_yield: 0.56,
            buy_price_per_kg: None,
            sell_price_per_kg_carcass: 21.40,
            daily_feed_cost: 14.50,
            daily_operational_cost_per_head: 1.0,
            extra_costs: 0.0,
            monthly_interest_rate: 0.005,
        }
    }
}

impl ConfinamentoInput {
    /// Valida o domínio da entrada
    pub fn validate(&self) -> SimResult<()> {
        if let Some(weight) = self.initial_weight {
            ensure_non_negative("initial_weight", weight)?;
        }
        if let Some(price) = self.buy_price_per_kg {
            ensure_non_negative("buy_price_per_kg", price)?;
        }
        ensure_non_negative("daily_gain", self.daily_gain)?;
        ensure_days("days", self.days)?;
        ensure_fraction("initial_yield", self.initial_yield)?;
        ensure_fraction("final_yield", self.final_yield)?;
        ensure_non_negative("sell_price_per_kg_carcass", self.sell_price_per_kg_carcass)?;
        ensure_non_negative("daily_feed_cost", self.daily_feed_cost)?;
        ensure_non_negative(
            "daily_operational_cost_per_head",
            self.daily_operational_cost_per_head,
        )?;
        ensure_non_negative("extra_costs", self.extra_costs)?;
        ensure_non_negative("monthly_interest_rate", self.monthly_interest_rate)?;
        Ok(())
    }

    /// Aplica os padrões e produz parâmetros completos
    pub fn resolve(&self, defaults: &StageDefaults) -> ConfinamentoParams {
        ConfinamentoParams {
            initial_weight: self.initial_weight.unwrap_or(defaults.initial_weight),
            daily_gain: self.daily_gain,
            days: self.days,
            initial_yield: self.initial_yield,
            final_yield: self.final_yield,
            buy_price_per_kg: self.buy_price_per_kg.unwrap_or(defaults.buy_price_per_kg),
            sell_price_per_kg_carcass: self.sell_price_per_kg_carcass,
            daily_feed_cost: self.daily_feed_cost,
            daily_operational_cost_per_head: self.daily_operational_cost_per_head,
            extra_costs: self.extra_costs,
            monthly_interest_rate: self.monthly_interest_rate,
        }
    }
}

/// Parâmetros completos do confinamento (após padrões).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfinamentoParams {
    /// Peso inicial (kg)
    pub initial_weight: f64,
    /// Ganho de peso por dia (kg)
    pub daily_gain: f64,
    /// Período de trato (dias)
    pub days: u32,
    /// Rendimento inicial (fração)
    #[serde(rename = "initial_yield_pct", with = "percent")]
    pub initial_yield: f64,
    /// Rendimento final (fração)
    #[serde(rename = "final_yield_pct", with = "percent")]
    pub final_yield: f64,
    /// Valor de compra ($/kg PV)
    pub buy_price_per_kg: f64,
    /// Valor de venda ($/kg carcaça)
    pub sell_price_per_kg_carcass: f64,
    /// Custo nutricional ($/dia)
    pub daily_feed_cost: f64,
    /// Serviços operacionais ($/animal/dia)
    pub daily_operational_cost_per_head: f64,
    /// Custos extras ($/animal)
    pub extra_costs: f64,
    /// Juros ao mês (fração)
    #[serde(rename = "monthly_interest_rate_pct", with = "percent")]
    pub monthly_interest_rate: f64,
}

impl ConfinamentoParams {
    /// Dias como `f64` para as fórmulas
    pub fn days_f64(&self) -> f64 {
        f64::from(self.days)
    }
}

/// Indicadores calculados do confinamento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfinamentoIndicators {
    /// Peso vivo final (kg)
    pub final_weight: f64,
    /// Carcaça final (kg)
    pub final_carcass_weight: f64,
    /// Ganho de peso vivo (kg)
    pub weight_gain: f64,
    /// Ganho de carcaça (kg)
    pub carcass_gain: f64,
    /// Ganho de carcaça por dia (kg/dia)
    pub daily_carcass_gain: f64,
    /// Custo do animal ($)
    pub purchase_cost: f64,
    /// Custo nutricional do período ($)
    pub feed_cost: f64,
    /// Serviços operacionais do período ($)
    pub operational_cost: f64,
    /// Custos extras ($)
    pub extra_costs: f64,
    /// Nutrição + serviços + extras ($)
    pub total_expenses: f64,
    /// Juros sobre a compra ($)
    pub interest: f64,
    /// Compra + despesas + juros ($)
    pub total_cost: f64,
    /// Receita de venda da carcaça ($)
    pub revenue: f64,
    /// Lucro ($)
    pub profit: f64,
    /// Margem sobre a receita (%)
    pub margin_pct: f64,
    /// Retorno sobre a compra (%)
    pub roi_pct: f64,
    /// Retorno mensal sobre a compra (%/mês)
    pub monthly_roi_pct: f64,
    /// Retorno sobre o custo total (%)
    pub roi_total_cost_pct: f64,
    /// Retorno mensal sobre o custo total (%/mês)
    pub monthly_roi_total_cost_pct: f64,
}

/// Calcula os indicadores do confinamento sem efeitos colaterais.
pub fn compute(params: &ConfinamentoParams) -> ConfinamentoIndicators {
    let days = params.days_f64();

    let final_weight = formulas::final_weight(params.initial_weight, params.daily_gain, days);
    let final_carcass_weight = final_weight * params.final_yield;
    let weight_gain = formulas::weight_gain(params.initial_weight, final_weight);

    // Base mista: carcaça final contra peso vivo inicial × rendimento inicial
    let carcass_gain = final_carcass_weight - params.initial_weight * params.initial_yield;
    let daily_carcass_gain = formulas::safe_div(carcass_gain, days);

    let purchase_cost = params.initial_weight * params.buy_price_per_kg;
    let feed_cost = formulas::daily_cost_total(days, params.daily_feed_cost);
    let operational_cost =
        formulas::daily_cost_total(days, params.daily_operational_cost_per_head);
    let total_expenses = feed_cost + operational_cost + params.extra_costs;

    let interest = formulas::interest_charge(
        purchase_cost,
        params.monthly_interest_rate,
        days,
        InterestBasis::MonthlyOver30,
    );
    let total_cost = purchase_cost + total_expenses + interest;

    let revenue = final_carcass_weight * params.sell_price_per_kg_carcass;
    let profit = formulas::profit(revenue, total_cost, 0.0);

    let roi_pct = formulas::roi_pct(profit, purchase_cost);
    let roi_total_cost_pct = formulas::roi_pct(profit, total_cost);

    ConfinamentoIndicators {
        final_weight,
        final_carcass_weight,
        weight_gain,
        carcass_gain,
        daily_carcass_gain,
        purchase_cost,
        feed_cost,
        operational_cost,
        extra_costs: params.extra_costs,
        total_expenses,
        interest,
        total_cost,
        revenue,
        profit,
        margin_pct: formulas::margin_pct(profit, revenue),
        roi_pct,
        monthly_roi_pct: formulas::feedlot_monthly_rate(roi_pct, days),
        roi_total_cost_pct,
        monthly_roi_total_cost_pct: formulas::feedlot_monthly_rate(roi_total_cost_pct, days),
    }
}

/// Resultado de uma execução do confinamento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfinamentoRun {
    /// Padrões resolvidos (inclui o status do vínculo)
    pub defaults: StageDefaults,
    /// Parâmetros efetivamente usados
    pub params: ConfinamentoParams,
    /// Indicadores calculados
    pub indicators: ConfinamentoIndicators,
}

impl ConfinamentoRun {
    /// Status do vínculo com a recria
    pub fn link(&self) -> LinkStatus {
        self.defaults.link
    }
}

/// Engine do confinamento: lê o handoff e calcula.
pub struct ConfinamentoEngine<'a> {
    handoff: &'a HandoffStore,
}

impl<'a> ConfinamentoEngine<'a> {
    /// Cria engine ligada a um slot de handoff (somente leitura)
    pub fn new(handoff: &'a HandoffStore) -> Self {
        Self { handoff }
    }

    /// Padrões atuais, sem calcular nada
    pub fn defaults(&self) -> StageDefaults {
        StageDefaults::resolve(self.handoff.get())
    }

    /// Executa o confinamento
    pub fn run(&self, input: &ConfinamentoInput) -> ConfinamentoRun {
        // Padrões resolvidos uma única vez, antes de qualquer cálculo
        let defaults = self.defaults();
        if !defaults.link.is_linked() {
            log::warn!("🏭 Confinamento desconectado: usando padrões fixos (350.0 kg, 11.30 $/kg)");
        }

        let params = input.resolve(&defaults);
        let indicators = compute(&params);

        log::debug!(
            "🏭 Confinamento: carcaça_final={:.2} kg, custo_total=${:.2}, lucro=${:.2}",
            indicators.final_carcass_weight,
            indicators.total_cost,
            indicators.profit
        );

        ConfinamentoRun {
            defaults,
            params,
            indicators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn reference_params() -> ConfinamentoParams {
        ConfinamentoInput::default().resolve(&StageDefaults::resolve(None))
    }

    #[test]
    fn test_defaults_disconnected() {
        let defaults = StageDefaults::resolve(None);
        assert_eq!(defaults.initial_weight, 350.0);
        assert_eq!(defaults.buy_price_per_kg, 11.30);
        assert_eq!(defaults.link, LinkStatus::Disconnected);
    }

    #[test]
    fn test_defaults_linked() {
        let record = HandoffRecord {
            final_weight: 353.85,
            sell_price_per_kg: 2.40,
        };
        let defaults = StageDefaults::resolve(Some(record));
        assert_eq!(defaults.initial_weight, 353.85);
        assert_eq!(defaults.buy_price_per_kg, 2.40);
        assert!(defaults.link.is_linked());
    }

    #[test]
    fn test_explicit_override_wins() {
        let input = ConfinamentoInput {
            initial_weight: Some(400.0),
            ..Default::default()
        };
        let params = input.resolve(&StageDefaults::resolve(None));
        assert_eq!(params.initial_weight, 400.0);
        assert_eq!(params.buy_price_per_kg, 11.30);
    }

    #[test]
    fn test_reference_feedlot() {
        let ind = compute(&reference_params());

        assert!(close(ind.final_weight, 504.0, 1e-9));
        assert!(close(ind.final_carcass_weight, 282.24, 1e-9));
        assert!(close(ind.purchase_cost, 3955.0, 1e-9));
        assert!(close(ind.feed_cost + ind.operational_cost, 1705.0, 1e-9));
        assert!(close(ind.interest, 72.508_333, 1e-5));
        assert!(close(ind.total_cost, 5732.508_333, 1e-5));
        assert!(close(ind.revenue, 6039.936, 1e-9));
        assert!(close(ind.profit, 307.427_667, 1e-5));
    }

    #[test]
    fn test_carcass_gain_mixed_basis() {
        let ind = compute(&reference_params());
        // 282.24 − 350 × 0.50
        assert!(close(ind.carcass_gain, 107.24, 1e-9));
        assert!(close(ind.daily_carcass_gain, 107.24 / 110.0, 1e-12));
        assert!(close(ind.weight_gain, 154.0, 1e-9));
    }

    #[test]
    fn test_feedlot_monthly_normalization() {
        let ind = compute(&reference_params());
        assert!(close(ind.monthly_roi_pct, ind.roi_pct / 110.0 * 30.0, 1e-9));
        assert!(close(
            ind.monthly_roi_total_cost_pct,
            ind.roi_total_cost_pct / 110.0 * 30.0,
            1e-9
        ));
    }

    #[test]
    fn test_zero_buy_price_is_neutral() {
        let mut params = reference_params();
        params.buy_price_per_kg = 0.0;
        let ind = compute(&params);
        assert_eq!(ind.purchase_cost, 0.0);
        assert_eq!(ind.interest, 0.0);
        assert_eq!(ind.roi_pct, 0.0);
        assert_eq!(ind.monthly_roi_pct, 0.0);
    }

    #[test]
    fn test_engine_never_writes_handoff() {
        let store = HandoffStore::new();
        let engine = ConfinamentoEngine::new(&store);
        let run = engine.run(&ConfinamentoInput::default());

        assert_eq!(run.link(), LinkStatus::Disconnected);
        assert!(store.get().is_none());
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_validate_yield_above_100() {
        let input = ConfinamentoInput {
            final_yield: 1.05,
            ..Default::default()
        };
        assert!(input.validate().is_err());
        assert!(ConfinamentoInput::default().validate().is_ok());
    }
}
