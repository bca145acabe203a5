// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ERROS DA CAMADA DE FRONTEIRA
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// As engines de cálculo nunca falham. Erros só aparecem ao carregar
// parâmetros (arquivo, env, CLI) e ao exportar relatórios.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use thiserror::Error;

/// Erros do simulador
#[derive(Debug, Error)]
pub enum SimError {
    /// Parâmetro fora do domínio declarado
    #[error("parâmetro inválido `{field}` = {value}: {reason}")]
    InvalidParameter {
        /// Nome do campo
        field: &'static str,
        /// Valor recebido
        value: f64,
        /// Motivo da rejeição
        reason: &'static str,
    },

    /// Formato de relatório desconhecido
    #[error("formato de relatório desconhecido: {0}")]
    UnknownFormat(String),

    /// Etapa desconhecida
    #[error("etapa desconhecida: {0}")]
    UnknownStage(String),

    /// Falha de I/O
    #[error("erro de I/O: {0}")]
    Io(#[from] std::io::Error),

    /// Falha de JSON
    #[error("erro de JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Resultado padrão do crate
pub type SimResult<T> = Result<T, SimError>;

/// Verifica quantidade física: finita e `>= 0`.
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> SimResult<()> {
    if !value.is_finite() {
        return Err(SimError::InvalidParameter {
            field,
            value,
            reason: "deve ser um número finito",
        });
    }
    if value < 0.0 {
        return Err(SimError::InvalidParameter {
            field,
            value,
            reason: "não pode ser negativo",
        });
    }
    Ok(())
}

/// Verifica contagem de dias (`>= 1`).
pub(crate) fn ensure_days(field: &'static str, days: u32) -> SimResult<()> {
    if days < 1 {
        return Err(SimError::InvalidParameter {
            field,
            value: f64::from(days),
            reason: "período deve ter pelo menos 1 dia",
        });
    }
    Ok(())
}

/// Verifica fração percentual (0 a 1).
pub(crate) fn ensure_fraction(field: &'static str, value: f64) -> SimResult<()> {
    ensure_non_negative(field, value)?;
    if value > 1.0 {
        return Err(SimError::InvalidParameter {
            field,
            value,
            reason: "rendimento não pode passar de 100%",
        });
    }
    Ok(())
}
