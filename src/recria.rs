// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ENGINE DA RECRIA A PASTO
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Etapa 1. Compra em guaranis (₲), custos mensais em US$, venda em US$/kg PV.
// Cada execução publica {peso_final, preco_venda_kg} no HandoffStore.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use serde::{Deserialize, Serialize};

use crate::error::{ensure_days, ensure_non_negative, SimResult};
use crate::formulas::{self, InterestBasis};
use crate::handoff::HandoffStore;
use crate::types::{percent, HandoffRecord};

/// Parâmetros de entrada da recria.
///
/// Percentuais ficam armazenados como fração; o arquivo JSON usa a chave
/// `annual_interest_rate_pct` com o valor em por cento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecriaParams {
    /// Peso inicial (kg)
    pub initial_weight: f64,
    /// Preço de compra (₲/kg PV)
    pub buy_price_local_per_kg: f64,
    /// Câmbio (₲/US$)
    pub exchange_rate: f64,
    /// Período em pastejo (dias)
    pub days: u32,
    /// Ganho médio diário (kg/dia)
    pub daily_gain: f64,
    /// Custo de aluguel (US$/mês)
    pub monthly_rent_cost: f64,
    /// Custo de nutrição (US$/mês)
    pub monthly_feed_cost: f64,
    /// Custo de operações (US$/mês)
    pub monthly_operational_cost: f64,
    /// Frete (US$/cab)
    pub freight_per_head: f64,
    /// Comissão (US$/cab)
    pub commission_per_head: f64,
    /// Juros anual (fração)
    #[serde(rename = "annual_interest_rate_pct", with = "percent")]
    pub annual_interest_rate: f64,
    /// Preço de venda (US$/kg PV)
    pub sell_price_per_kg: f64,
}

impl Default for RecriaParams {
    fn default() -> Self {
        Self {
            initial_weight: 175.0,
            buy_price_local_per_kg: 20_000.0,
            exchange_rate: 7_320.0,
            days: 365,
            daily_gain: 0.490,
            monthly_rent_cost: 5.40,
            monthly_feed_cost: 4.0,
            monthly_operational_cost: 3.44,
            freight_per_head: 8.0,
            commission_per_head: 4.0,
            annual_interest_rate: 0.085,
            sell_price_per_kg: 2.40,
        }
    }
}

impl RecriaParams {
    /// Valida o domínio dos parâmetros (quantidades >= 0, dias >= 1)
    pub fn validate(&self) -> SimResult<()> {
        ensure_non_negative("initial_weight", self.initial_weight)?;
        ensure_non_negative("buy_price_local_per_kg", self.buy_price_local_per_kg)?;
        ensure_non_negative("exchange_rate", self.exchange_rate)?;
        ensure_days("days", self.days)?;
        ensure_non_negative("daily_gain", self.daily_gain)?;
        ensure_non_negative("monthly_rent_cost", self.monthly_rent_cost)?;
        ensure_non_negative("monthly_feed_cost", self.monthly_feed_cost)?;
        ensure_non_negative("monthly_operational_cost", self.monthly_operational_cost)?;
        ensure_non_negative("freight_per_head", self.freight_per_head)?;
        ensure_non_negative("commission_per_head", self.commission_per_head)?;
        ensure_non_negative("annual_interest_rate", self.annual_interest_rate)?;
        ensure_non_negative("sell_price_per_kg", self.sell_price_per_kg)?;
        Ok(())
    }

    /// Dias como `f64` para as fórmulas
    pub fn days_f64(&self) -> f64 {
        f64::from(self.days)
    }

    /// Soma dos três custos mensais (US$/mês)
    pub fn monthly_cost(&self) -> f64 {
        self.monthly_rent_cost + self.monthly_feed_cost + self.monthly_operational_cost
    }
}

/// Indicadores calculados da recria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecriaIndicators {
    /// Custo do animal em US$
    pub purchase_cost: f64,
    /// Preço de compra em US$/kg PV
    pub buy_price_per_kg: f64,
    /// Ágio da compra sobre a venda (%)
    pub premium_pct: f64,
    /// Peso final (kg)
    pub final_weight: f64,
    /// Ganho de peso vivo no período (kg)
    pub weight_gain: f64,
    /// Meses médios de 30.5 dias
    pub months: f64,
    /// Custo mensal agregado (US$/mês)
    pub monthly_cost: f64,
    /// Custo total do período (US$)
    pub period_cost: f64,
    /// Compra + período + frete + comissão (US$)
    pub total_cost: f64,
    /// Receita de venda (US$)
    pub revenue: f64,
    /// Juros sobre a compra do animal (US$)
    pub interest: f64,
    /// Lucro líquido (US$)
    pub profit: f64,
    /// Margem sobre a receita no período (%)
    pub margin_pct: f64,
    /// Margem mensal (%)
    pub monthly_margin_pct: f64,
    /// Retorno sobre a compra (%)
    pub roi_pct: f64,
    /// Retorno mensal sobre a compra (%/mês)
    pub monthly_roi_pct: f64,
    /// Retorno sobre o custo total (%)
    pub roi_total_cost_pct: f64,
    /// Retorno mensal sobre o custo total (%/mês)
    pub monthly_roi_total_cost_pct: f64,
}

impl RecriaIndicators {
    /// Registro publicado para o confinamento
    pub fn handoff(&self, params: &RecriaParams) -> HandoffRecord {
        HandoffRecord {
            final_weight: self.final_weight,
            sell_price_per_kg: params.sell_price_per_kg,
        }
    }
}

/// Calcula os indicadores da recria sem efeitos colaterais.
pub fn compute(params: &RecriaParams) -> RecriaIndicators {
    let days = params.days_f64();

    let purchase_cost = formulas::currency_convert(
        params.initial_weight * params.buy_price_local_per_kg,
        params.exchange_rate,
    );
    let buy_price_per_kg =
        formulas::currency_convert(params.buy_price_local_per_kg, params.exchange_rate);
    let premium_pct = formulas::premium_pct(buy_price_per_kg, params.sell_price_per_kg);

    let final_weight = formulas::final_weight(params.initial_weight, params.daily_gain, days);
    let weight_gain = formulas::weight_gain(params.initial_weight, final_weight);

    let months = formulas::pasture_months(days);
    let monthly_cost = params.monthly_cost();
    let period_cost = formulas::monthly_cost_total(
        days,
        &[
            params.monthly_rent_cost,
            params.monthly_feed_cost,
            params.monthly_operational_cost,
        ],
    );

    let total_cost =
        purchase_cost + period_cost + params.freight_per_head + params.commission_per_head;
    let revenue = final_weight * params.sell_price_per_kg;

    // Juros incidem só sobre a compra do animal e ficam fora do custo total
    let interest = formulas::interest_charge(
        purchase_cost,
        params.annual_interest_rate,
        days,
        InterestBasis::AnnualOver365,
    );
    let profit = formulas::profit(revenue, total_cost, interest);

    let margin_pct = formulas::margin_pct(profit, revenue);
    let roi_pct = formulas::roi_pct(profit, purchase_cost);
    let roi_total_cost_pct = formulas::roi_pct(profit, total_cost);

    RecriaIndicators {
        purchase_cost,
        buy_price_per_kg,
        premium_pct,
        final_weight,
        weight_gain,
        months,
        monthly_cost,
        period_cost,
        total_cost,
        revenue,
        interest,
        profit,
        margin_pct,
        monthly_margin_pct: formulas::pasture_monthly_rate(margin_pct, days),
        roi_pct,
        monthly_roi_pct: formulas::pasture_monthly_rate(roi_pct, days),
        roi_total_cost_pct,
        monthly_roi_total_cost_pct: formulas::pasture_monthly_rate(roi_total_cost_pct, days),
    }
}

/// Engine da recria: calcula e publica a saída para o confinamento.
pub struct RecriaEngine<'a> {
    handoff: &'a HandoffStore,
}

impl<'a> RecriaEngine<'a> {
    /// Cria engine ligada a um slot de handoff
    pub fn new(handoff: &'a HandoffStore) -> Self {
        Self { handoff }
    }

    /// Executa a recria.
    ///
    /// A publicação no handoff acontece uma vez por chamada, sempre,
    /// mesmo que o chamador descarte os indicadores.
    pub fn run(&self, params: &RecriaParams) -> RecriaIndicators {
        let indicators = compute(params);
        self.handoff.publish(indicators.handoff(params));

        log::debug!(
            "🌱 Recria: peso_final={:.2} kg, custo_total=${:.2}, lucro=${:.2}, ROI={:.2}%",
            indicators.final_weight,
            indicators.total_cost,
            indicators.profit,
            indicators.roi_pct
        );

        indicators
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_default_params_are_valid() {
        assert!(RecriaParams::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_days() {
        let params = RecriaParams {
            days: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_compute_default_scenario() {
        let params = RecriaParams::default();
        let ind = compute(&params);

        // 175 × 20000 / 7320
        assert!(close(ind.purchase_cost, 478.142_076_502_732, 1e-6));
        assert!(close(ind.buy_price_per_kg, 2.732_240_437_158, 1e-9));
        assert!(close(ind.final_weight, 353.85, 1e-9));
        assert!(close(ind.weight_gain, 178.85, 1e-9));
        assert!(close(ind.monthly_cost, 12.84, 1e-9));
        assert!(close(ind.period_cost, 12.84 * 365.0 / 30.5, 1e-9));
        assert!(close(ind.revenue, 849.24, 1e-9));
        assert!(close(ind.interest, ind.purchase_cost * 0.085, 1e-9));

        let expected_total = ind.purchase_cost + ind.period_cost + 8.0 + 4.0;
        assert!(close(ind.total_cost, expected_total, 1e-9));
        assert!(close(
            ind.profit,
            ind.revenue - ind.total_cost - ind.interest,
            1e-9
        ));
    }

    #[test]
    fn test_compute_ratios() {
        let ind = compute(&RecriaParams::default());
        let months = 365.0 / 30.5;

        assert!(close(ind.months, months, 1e-12));
        assert!(close(ind.margin_pct, ind.profit / ind.revenue * 100.0, 1e-9));
        assert!(close(ind.monthly_margin_pct, ind.margin_pct / months, 1e-9));
        assert!(close(ind.roi_pct, ind.profit / ind.purchase_cost * 100.0, 1e-9));
        assert!(close(ind.monthly_roi_pct, ind.roi_pct / months, 1e-9));
        assert!(close(
            ind.roi_total_cost_pct,
            ind.profit / ind.total_cost * 100.0,
            1e-9
        ));
        assert!(close(
            ind.monthly_roi_total_cost_pct,
            ind.roi_total_cost_pct / months,
            1e-9
        ));
    }

    #[test]
    fn test_zero_exchange_rate_is_neutral() {
        let params = RecriaParams {
            exchange_rate: 0.0,
            ..Default::default()
        };
        let ind = compute(&params);

        assert_eq!(ind.purchase_cost, 0.0);
        assert_eq!(ind.buy_price_per_kg, 0.0);
        assert_eq!(ind.interest, 0.0);
        assert_eq!(ind.roi_pct, 0.0);
        assert_eq!(ind.monthly_roi_pct, 0.0);
    }

    #[test]
    fn test_zero_sell_price_is_neutral() {
        let params = RecriaParams {
            sell_price_per_kg: 0.0,
            ..Default::default()
        };
        let ind = compute(&params);

        assert_eq!(ind.revenue, 0.0);
        assert_eq!(ind.premium_pct, 0.0);
        assert_eq!(ind.margin_pct, 0.0);
        assert_eq!(ind.monthly_margin_pct, 0.0);
        assert!(ind.profit < 0.0);
    }

    #[test]
    fn test_run_publishes_handoff() {
        let store = HandoffStore::new();
        let engine = RecriaEngine::new(&store);
        let ind = engine.run(&RecriaParams::default());

        let record = store.get().expect("handoff publicado");
        assert_eq!(record.final_weight, ind.final_weight);
        assert_eq!(record.sell_price_per_kg, 2.40);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_params_json_uses_percent() {
        let params: RecriaParams =
            serde_json::from_str(r#"{"days": 180, "annual_interest_rate_pct": 12.0}"#).unwrap();

        assert_eq!(params.days, 180);
        assert!(close(params.annual_interest_rate, 0.12, 1e-12));
        // Campos ausentes ficam no padrão
        assert_eq!(params.initial_weight, 175.0);
    }
}
