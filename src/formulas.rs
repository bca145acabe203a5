// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BIBLIOTECA DE FÓRMULAS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Funções puras e totais usadas pelas duas etapas (recria e confinamento).
// Toda divisão passa por `safe_div`: denominador não positivo devolve 0.
//
// Atenção às convenções por etapa, que NÃO devem ser unificadas:
// - Recria: mês médio de 30.5 dias, juros anuais sobre 365 dias
// - Confinamento: custos diários × dias, juros mensais sobre 30 dias
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use serde::{Deserialize, Serialize};

/// Dias de um mês médio na recria a pasto.
pub const PASTURE_MONTH_DAYS: f64 = 30.5;

/// Dias de um mês comercial no confinamento.
pub const FEEDLOT_MONTH_DAYS: f64 = 30.0;

/// Dias do ano para juros anuais.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Divisão protegida: retorna 0 quando o denominador é `<= 0`.
///
/// Entradas degeneradas produzem saída neutra, nunca erro.
#[inline]
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Converte um valor percentual (ex: 8.5) em fração (0.085).
#[inline]
pub fn percent_to_fraction(pct: f64) -> f64 {
    pct / 100.0
}

/// Converte uma fração (0.085) em percentual (8.5).
#[inline]
pub fn fraction_to_percent(fraction: f64) -> f64 {
    fraction * 100.0
}

/// Peso final = peso inicial + GMD × dias.
pub fn final_weight(initial_weight: f64, daily_gain: f64, days: f64) -> f64 {
    initial_weight + daily_gain * days
}

/// Ganho de peso no período.
pub fn weight_gain(initial_weight: f64, final_weight: f64) -> f64 {
    final_weight - initial_weight
}

/// Converte moeda local (₲) para a moeda comum (US$).
pub fn currency_convert(local_amount: f64, exchange_rate: f64) -> f64 {
    safe_div(local_amount, exchange_rate)
}

/// Ágio (%) do preço de compra sobre o preço de venda.
pub fn premium_pct(buy_price_per_kg: f64, sell_price_per_kg: f64) -> f64 {
    safe_div(buy_price_per_kg - sell_price_per_kg, sell_price_per_kg) * 100.0
}

/// Número de meses médios (30.5 dias) de um período a pasto.
pub fn pasture_months(days: f64) -> f64 {
    days / PASTURE_MONTH_DAYS
}

/// Custo do período a partir de custos mensais (convenção de 30.5 dias).
pub fn monthly_cost_total(days: f64, monthly_components: &[f64]) -> f64 {
    let monthly: f64 = monthly_components.iter().sum();
    monthly * pasture_months(days)
}

/// Custo do período a partir de uma taxa diária (sem conversão mensal).
pub fn daily_cost_total(days: f64, daily_rate: f64) -> f64 {
    daily_rate * days
}

/// Base de cálculo dos juros simples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterestBasis {
    /// Taxa anual rateada por 365 dias (recria).
    AnnualOver365,
    /// Taxa mensal rateada por 30 dias (confinamento).
    MonthlyOver30,
}

impl InterestBasis {
    /// Dias que compõem um período da taxa.
    pub fn period_days(&self) -> f64 {
        match self {
            Self::AnnualOver365 => DAYS_PER_YEAR,
            Self::MonthlyOver30 => FEEDLOT_MONTH_DAYS,
        }
    }
}

/// Juros simples (lineares, sem capitalização): `principal × taxa × dias/base`.
pub fn interest_charge(principal: f64, rate: f64, days: f64, basis: InterestBasis) -> f64 {
    principal * rate * (days / basis.period_days())
}

/// Lucro = receita − custo total − dedução extra.
pub fn profit(revenue: f64, total_cost: f64, extra_deduction: f64) -> f64 {
    revenue - total_cost - extra_deduction
}

/// Margem (%) do lucro sobre a receita.
pub fn margin_pct(profit: f64, revenue: f64) -> f64 {
    safe_div(profit, revenue) * 100.0
}

/// Retorno (%) do lucro sobre uma base (compra ou custo total).
pub fn roi_pct(profit: f64, base: f64) -> f64 {
    safe_div(profit, base) * 100.0
}

/// Taxa mensal na recria: percentual dividido pelo número de meses de 30.5 dias.
pub fn pasture_monthly_rate(pct: f64, days: f64) -> f64 {
    safe_div(pct, pasture_months(days))
}

/// Taxa mensal no confinamento: `(pct / dias) × 30`.
pub fn feedlot_monthly_rate(pct: f64, days: f64) -> f64 {
    safe_div(pct, days) * FEEDLOT_MONTH_DAYS
}

/// Variação percentual contra uma base, nula quando a base é exatamente zero.
///
/// Diferente de [`safe_div`]: bases negativas (prejuízo) são válidas aqui.
pub fn change_pct(delta: f64, base: f64) -> f64 {
    if base != 0.0 {
        delta / base * 100.0
    } else {
        0.0
    }
}
