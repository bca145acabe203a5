// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ANÁLISE DE SENSIBILIDADE E IMPACTO (RECRIA)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Três análises independentes, todas somente leitura sobre a linha de base:
// 1. Cenário: preço de compra, preço de venda e GMD alternativos
// 2. Impacto marginal de ±10 g/dia no GMD
// 3. Choques percentuais no valor de compra e no preço de venda
//
// Nada daqui é persistido nem volta para as engines.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use serde::{Deserialize, Serialize};

use crate::formulas::{self, InterestBasis};
use crate::recria::{RecriaIndicators, RecriaParams};

/// Incremento hipotético de GMD (kg/dia) = 10 g/dia
pub const GAIN_INCREMENT_KG_DAY: f64 = 0.01;

/// Faixa de um controle deslizante.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    /// Valor mínimo
    pub min: f64,
    /// Valor máximo
    pub max: f64,
    /// Passo
    pub step: f64,
}

impl SliderRange {
    /// Restringe um valor à faixa
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Move o valor `steps` passos, sem sair da faixa
    pub fn nudge(&self, value: f64, steps: i32) -> f64 {
        self.clamp(value + self.step * f64::from(steps))
    }
}

/// Faixa do preço de compra no cenário (₲/kg PV)
pub const BUY_PRICE_SLIDER: SliderRange = SliderRange {
    min: 15_000.0,
    max: 25_000.0,
    step: 100.0,
};

/// Faixa do preço de venda no cenário (US$/kg PV)
pub const SELL_PRICE_SLIDER: SliderRange = SliderRange {
    min: 1.5,
    max: 3.5,
    step: 0.01,
};

/// Faixa do GMD no cenário (kg/dia)
pub const DAILY_GAIN_SLIDER: SliderRange = SliderRange {
    min: 0.3,
    max: 1.5,
    step: 0.01,
};

/// Faixa dos choques percentuais (%)
pub const SHOCK_SLIDER: SliderRange = SliderRange {
    min: 0.0,
    max: 10.0,
    step: 0.1,
};

/// Choque padrão (%) para compra e venda
pub const DEFAULT_SHOCK_PCT: f64 = 2.0;

// ─────────────────────────────────────────────────────────────────────────────
// 1. CENÁRIO
// ─────────────────────────────────────────────────────────────────────────────

/// Valores substituídos no cenário.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOverrides {
    /// Preço de compra (₲/kg PV)
    pub buy_price_local_per_kg: f64,
    /// Preço de venda (US$/kg PV)
    pub sell_price_per_kg: f64,
    /// GMD (kg/dia)
    pub daily_gain: f64,
}

impl ScenarioOverrides {
    /// Começa nos valores da linha de base
    pub fn from_baseline(params: &RecriaParams) -> Self {
        Self {
            buy_price_local_per_kg: params.buy_price_local_per_kg,
            sell_price_per_kg: params.sell_price_per_kg,
            daily_gain: params.daily_gain,
        }
    }
}

/// Resultado do cenário (subconjunto de indicadores).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Valores usados
    pub overrides: ScenarioOverrides,
    /// Preço de compra convertido (US$/kg PV)
    pub buy_price_per_kg: f64,
    /// Custo do animal (US$)
    pub purchase_cost: f64,
    /// Peso final (kg)
    pub final_weight: f64,
    /// Receita (US$)
    pub revenue: f64,
    /// Custo total (US$)
    pub total_cost: f64,
    /// Juros (US$)
    pub interest: f64,
    /// Lucro líquido (US$)
    pub profit: f64,
}

/// Recalcula o lucro com os três valores substituídos.
///
/// Custo do período, frete, comissão e câmbio vêm da linha de base.
pub fn run_scenario(
    params: &RecriaParams,
    baseline: &RecriaIndicators,
    overrides: ScenarioOverrides,
) -> ScenarioResult {
    let days = params.days_f64();

    let purchase_cost = formulas::currency_convert(
        params.initial_weight * overrides.buy_price_local_per_kg,
        params.exchange_rate,
    );
    let final_weight = formulas::final_weight(params.initial_weight, overrides.daily_gain, days);
    let revenue = final_weight * overrides.sell_price_per_kg;
    let total_cost = purchase_cost
        + baseline.period_cost
        + params.freight_per_head
        + params.commission_per_head;
    let interest = formulas::interest_charge(
        purchase_cost,
        params.annual_interest_rate,
        days,
        InterestBasis::AnnualOver365,
    );

    ScenarioResult {
        overrides,
        buy_price_per_kg: formulas::currency_convert(
            overrides.buy_price_local_per_kg,
            params.exchange_rate,
        ),
        purchase_cost,
        final_weight,
        revenue,
        total_cost,
        interest,
        profit: formulas::profit(revenue, total_cost, interest),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// 2. IMPACTO DO GMD
// ─────────────────────────────────────────────────────────────────────────────

/// Impacto de ±10 g/dia no ganho de peso.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainImpact {
    /// Incremento considerado (kg/dia)
    pub increment_kg_day: f64,
    /// Período (dias)
    pub days: u32,
    /// Peso extra no período (kg)
    pub extra_weight: f64,
    /// Variação de lucro (US$), mesma magnitude para cima e para baixo
    pub profit_delta: f64,
}

impl GainImpact {
    /// Frase para o ganho de +10 g/dia
    pub fn upside_statement(&self) -> String {
        format!(
            "A cada +10 g/dia no ganho de peso, o lucro aumenta em ~ ${} no período de {} dias.",
            crate::utils::format_thousands(self.profit_delta, 2),
            self.days
        )
    }

    /// Frase para a perda de -10 g/dia
    pub fn downside_statement(&self) -> String {
        format!(
            "A cada -10 g/dia no ganho de peso, o lucro reduz em ~ ${} no período de {} dias.",
            crate::utils::format_thousands(self.profit_delta, 2),
            self.days
        )
    }
}

/// Calcula o impacto marginal de 0.01 kg/dia sobre o lucro.
pub fn gain_impact(params: &RecriaParams) -> GainImpact {
    let extra_weight = GAIN_INCREMENT_KG_DAY * params.days_f64();
    GainImpact {
        increment_kg_day: GAIN_INCREMENT_KG_DAY,
        days: params.days,
        extra_weight,
        profit_delta: extra_weight * params.sell_price_per_kg,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// 3. CHOQUES PERCENTUAIS
// ─────────────────────────────────────────────────────────────────────────────

/// Choques aplicados (frações: 0.02 = +2%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShockInput {
    /// Aumento no valor de compra do animal
    pub purchase: f64,
    /// Aumento no preço de venda
    pub sale: f64,
}

impl Default for ShockInput {
    fn default() -> Self {
        Self::from_pct(DEFAULT_SHOCK_PCT, DEFAULT_SHOCK_PCT)
    }
}

impl ShockInput {
    /// Cria a partir de percentuais (ex: 2.0 = 2%)
    pub fn from_pct(purchase_pct: f64, sale_pct: f64) -> Self {
        Self {
            purchase: formulas::percent_to_fraction(purchase_pct),
            sale: formulas::percent_to_fraction(sale_pct),
        }
    }

    /// Choque de compra em %
    pub fn purchase_pct(&self) -> f64 {
        formulas::fraction_to_percent(self.purchase)
    }

    /// Choque de venda em %
    pub fn sale_pct(&self) -> f64 {
        formulas::fraction_to_percent(self.sale)
    }
}

/// Efeito do aumento no valor de compra.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PurchaseShock {
    /// Choque aplicado (%)
    pub shock_pct: f64,
    /// Novo custo do animal (US$)
    pub new_purchase_cost: f64,
    /// Novos juros (US$)
    pub new_interest: f64,
    /// Novo custo total, juros incluídos (US$)
    pub new_total_cost: f64,
    /// Novo lucro (US$)
    pub new_profit: f64,
    /// Redução do lucro (US$)
    pub impact_abs: f64,
    /// Redução relativa ao lucro da linha de base (%)
    pub impact_pct: f64,
}

/// Efeito do aumento no preço de venda.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleShock {
    /// Choque aplicado (%)
    pub shock_pct: f64,
    /// Novo preço de venda (US$/kg PV)
    pub new_sell_price_per_kg: f64,
    /// Nova receita (US$)
    pub new_revenue: f64,
    /// Novo lucro com o custo total do choque de compra (US$)
    pub new_profit: f64,
    /// Aumento do lucro (US$)
    pub impact_abs: f64,
    /// Aumento relativo ao novo lucro do choque de compra (%)
    pub impact_pct: f64,
}

/// Relatório dos choques percentuais.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShockReport {
    /// Choque no valor de compra
    pub purchase: PurchaseShock,
    /// Choque no preço de venda
    pub sale: SaleShock,
}

impl ShockReport {
    /// Frase do choque de compra
    pub fn purchase_statement(&self) -> String {
        format!(
            "A cada +{:.1}% no valor de compra do animal, o lucro reduz em ~ ${} ({:.2}%).",
            self.purchase.shock_pct,
            crate::utils::format_thousands(self.purchase.impact_abs, 2),
            self.purchase.impact_pct
        )
    }

    /// Frase do choque de venda
    pub fn sale_statement(&self) -> String {
        format!(
            "A cada +{:.1}% no preço de venda, o lucro aumenta em ~ ${} ({:.2}%).",
            self.sale.shock_pct,
            crate::utils::format_thousands(self.sale.impact_abs, 2),
            self.sale.impact_pct
        )
    }
}

/// Aplica os dois choques e compara com o lucro da linha de base.
pub fn shock_impact(
    params: &RecriaParams,
    baseline: &RecriaIndicators,
    shock: ShockInput,
) -> ShockReport {
    let days = params.days_f64();

    let new_purchase_cost = baseline.purchase_cost * (1.0 + shock.purchase);
    let new_interest = formulas::interest_charge(
        new_purchase_cost,
        params.annual_interest_rate,
        days,
        InterestBasis::AnnualOver365,
    );
    let new_total_cost = new_purchase_cost
        + baseline.period_cost
        + params.freight_per_head
        + params.commission_per_head
        + new_interest;
    let new_profit = formulas::profit(baseline.revenue, new_total_cost, 0.0);

    let purchase_impact = baseline.profit - new_profit;
    let purchase = PurchaseShock {
        shock_pct: shock.purchase_pct(),
        new_purchase_cost,
        new_interest,
        new_total_cost,
        new_profit,
        impact_abs: purchase_impact,
        impact_pct: formulas::change_pct(purchase_impact, baseline.profit),
    };

    let new_sell_price_per_kg = params.sell_price_per_kg * (1.0 + shock.sale);
    let new_revenue = baseline.final_weight * new_sell_price_per_kg;
    let new_sale_profit = formulas::profit(new_revenue, new_total_cost, 0.0);

    let sale_impact = new_sale_profit - new_profit;
    let sale = SaleShock {
        shock_pct: shock.sale_pct(),
        new_sell_price_per_kg,
        new_revenue,
        new_profit: new_sale_profit,
        impact_abs: sale_impact,
        impact_pct: formulas::change_pct(sale_impact, new_profit),
    };

    ShockReport { purchase, sale }
}

// ─────────────────────────────────────────────────────────────────────────────
// AGREGADO
// ─────────────────────────────────────────────────────────────────────────────

/// Entradas das análises de sensibilidade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityInput {
    /// Valores do cenário
    pub scenario: ScenarioOverrides,
    /// Choques percentuais
    pub shock: ShockInput,
}

impl SensitivityInput {
    /// Cenário nos valores de base e choques padrão
    pub fn from_baseline(params: &RecriaParams) -> Self {
        Self {
            scenario: ScenarioOverrides::from_baseline(params),
            shock: ShockInput::default(),
        }
    }
}

/// Resultado das três análises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    /// Cenário
    pub scenario: ScenarioResult,
    /// Impacto de ±10 g/dia
    pub gain: GainImpact,
    /// Choques percentuais
    pub shocks: ShockReport,
}

/// Executa as três análises sobre a linha de base da recria.
pub fn analyze(
    params: &RecriaParams,
    baseline: &RecriaIndicators,
    input: &SensitivityInput,
) -> SensitivityReport {
    SensitivityReport {
        scenario: run_scenario(params, baseline, input.scenario),
        gain: gain_impact(params),
        shocks: shock_impact(params, baseline, input.shock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recria;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn baseline() -> (RecriaParams, RecriaIndicators) {
        let params = RecriaParams::default();
        let indicators = recria::compute(&params);
        (params, indicators)
    }

    #[test]
    fn test_scenario_at_baseline_matches_profit() {
        let (params, base) = baseline();
        let result = run_scenario(&params, &base, ScenarioOverrides::from_baseline(&params));

        assert!(close(result.profit, base.profit, 1e-9));
        assert!(close(result.total_cost, base.total_cost, 1e-9));
        assert!(close(result.interest, base.interest, 1e-9));
        assert!(close(result.buy_price_per_kg, base.buy_price_per_kg, 1e-12));
    }

    #[test]
    fn test_scenario_overrides_only_three_inputs() {
        let (params, base) = baseline();
        let overrides = ScenarioOverrides {
            buy_price_local_per_kg: 18_000.0,
            sell_price_per_kg: 2.80,
            daily_gain: 0.60,
        };
        let result = run_scenario(&params, &base, overrides);

        let purchase = 175.0 * 18_000.0 / 7_320.0;
        let final_weight = 175.0 + 0.60 * 365.0;
        assert!(close(result.purchase_cost, purchase, 1e-9));
        assert!(close(result.final_weight, final_weight, 1e-9));
        assert!(close(result.revenue, final_weight * 2.80, 1e-9));
        assert!(close(
            result.total_cost,
            purchase + base.period_cost + 8.0 + 4.0,
            1e-9
        ));
        assert!(close(result.interest, purchase * 0.085, 1e-9));
    }

    #[test]
    fn test_gain_impact_symmetric() {
        let (params, _) = baseline();
        let impact = gain_impact(&params);

        assert!(close(impact.extra_weight, 3.65, 1e-12));
        assert!(close(impact.profit_delta, 3.65 * 2.40, 1e-12));
        assert!(impact.upside_statement().contains("$8.76"));
        assert!(impact.downside_statement().contains("$8.76"));
        assert!(impact.upside_statement().contains("aumenta"));
        assert!(impact.downside_statement().contains("reduz"));
    }

    #[test]
    fn test_zero_shock_has_no_impact() {
        let (params, base) = baseline();
        let report = shock_impact(&params, &base, ShockInput::from_pct(0.0, 0.0));

        assert!(close(report.purchase.new_profit, base.profit, 1e-9));
        assert!(close(report.purchase.impact_abs, 0.0, 1e-9));
        assert!(close(report.sale.impact_abs, 0.0, 1e-9));
    }

    #[test]
    fn test_default_shock_chain() {
        let (params, base) = baseline();
        let report = shock_impact(&params, &base, ShockInput::default());

        let new_purchase = base.purchase_cost * 1.02;
        let new_interest = new_purchase * 0.085;
        let new_total = new_purchase + base.period_cost + 12.0 + new_interest;
        let new_profit = base.revenue - new_total;
        assert!(close(report.purchase.new_total_cost, new_total, 1e-9));
        assert!(close(report.purchase.impact_abs, base.profit - new_profit, 1e-9));
        assert!(close(
            report.purchase.impact_pct,
            (base.profit - new_profit) / base.profit * 100.0,
            1e-9
        ));

        let new_revenue = base.final_weight * 2.40 * 1.02;
        let sale_profit = new_revenue - new_total;
        assert!(close(report.sale.new_revenue, new_revenue, 1e-9));
        assert!(close(report.sale.impact_abs, sale_profit - new_profit, 1e-9));
        assert!(close(report.sale.shock_pct, 2.0, 1e-12));
        // Base do percentual de venda é o lucro já com choque de compra
        assert!(close(
            report.sale.impact_pct,
            (sale_profit - new_profit) / new_profit * 100.0,
            1e-9
        ));
    }

    fn zero_profit_baseline() -> (RecriaParams, RecriaIndicators) {
        let params = RecriaParams {
            initial_weight: 0.0,
            buy_price_local_per_kg: 0.0,
            exchange_rate: 0.0,
            days: 1,
            daily_gain: 0.0,
            monthly_rent_cost: 0.0,
            monthly_feed_cost: 0.0,
            monthly_operational_cost: 0.0,
            freight_per_head: 0.0,
            commission_per_head: 0.0,
            annual_interest_rate: 0.0,
            sell_price_per_kg: 0.0,
        };
        let indicators = recria::compute(&params);
        (params, indicators)
    }

    #[test]
    fn test_shock_guard_on_zero_profit() {
        let (params, base) = zero_profit_baseline();
        assert_eq!(base.profit, 0.0);

        let report = shock_impact(&params, &base, ShockInput::default());
        assert_eq!(report.purchase.new_profit, 0.0);
        assert_eq!(report.purchase.impact_pct, 0.0);
        assert_eq!(report.sale.new_profit, 0.0);
        assert_eq!(report.sale.impact_abs, 0.0);
        assert_eq!(report.sale.impact_pct, 0.0);
    }

    #[test]
    fn test_shock_statements() {
        let (params, base) = baseline();
        let report = shock_impact(&params, &base, ShockInput::default());
        assert!(report.purchase_statement().starts_with("A cada +2.0% no valor de compra"));
        assert!(report.sale_statement().starts_with("A cada +2.0% no preço de venda"));
    }

    #[test]
    fn test_slider_ranges() {
        assert_eq!(BUY_PRICE_SLIDER.clamp(30_000.0), 25_000.0);
        assert_eq!(DAILY_GAIN_SLIDER.clamp(0.1), 0.3);
        assert!(close(SELL_PRICE_SLIDER.nudge(2.40, 3), 2.43, 1e-12));
        assert_eq!(SHOCK_SLIDER.nudge(9.95, 1), 10.0);
    }
}
