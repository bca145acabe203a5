// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TIPOS COMPARTILHADOS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use serde::{Deserialize, Serialize};
use std::fmt;

/// Etapas do sistema de produção
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Recria a pasto (etapa 1)
    Recria,
    /// Confinamento (etapa 2)
    Confinamento,
}

impl Stage {
    /// Nome legível para telas e relatórios
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Recria => "Recria a Pasto",
            Self::Confinamento => "Confinamento",
        }
    }

    /// Converte string (case-insensitive) em etapa
    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "recria" => Some(Self::Recria),
            "confinamento" | "conf" => Some(Self::Confinamento),
            _ => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Saída da recria que alimenta os padrões do confinamento.
///
/// Exatamente dois campos: peso vivo final e preço de venda por kg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandoffRecord {
    /// Peso vivo final da recria (kg)
    pub final_weight: f64,
    /// Preço de venda da recria (US$/kg PV)
    pub sell_price_per_kg: f64,
}

/// Situação do vínculo entre recria e confinamento em uma execução.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LinkStatus {
    /// Padrões vieram da saída da recria
    Linked(HandoffRecord),
    /// Sem saída da recria; padrões fixos em uso
    Disconnected,
}

impl LinkStatus {
    /// Verifica se o confinamento está vinculado à recria
    pub fn is_linked(&self) -> bool {
        matches!(self, Self::Linked(_))
    }

    /// Mensagem de aviso para a camada de apresentação
    pub fn advisory(&self) -> String {
        match self {
            Self::Linked(record) => format!(
                "Link automático: entrada do confinamento = saída da recria (Peso: {:.2} kg | Preço: {:.2} $/kg PV)",
                record.final_weight, record.sell_price_per_kg
            ),
            Self::Disconnected => {
                "Ainda não existe saída da Recria. Use a aba Recria primeiro.".to_string()
            }
        }
    }
}

/// (De)serialização de frações como percentuais.
///
/// Arquivos de parâmetros trazem `8.5` (por cento); internamente guardamos
/// `0.085`. A divisão por 100 acontece só aqui, na fronteira.
pub mod percent {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializa fração como percentual
    pub fn serialize<S: Serializer>(fraction: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(crate::formulas::fraction_to_percent(*fraction))
    }

    /// Lê percentual e devolve fração
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let pct = f64::deserialize(deserializer)?;
        Ok(crate::formulas::percent_to_fraction(pct))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_from_name() {
        assert_eq!(Stage::from_name("Recria"), Some(Stage::Recria));
        assert_eq!(Stage::from_name(" conf "), Some(Stage::Confinamento));
        assert_eq!(Stage::from_name("engorda"), None);
    }

    #[test]
    fn test_link_status_advisory() {
        let linked = LinkStatus::Linked(HandoffRecord {
            final_weight: 353.85,
            sell_price_per_kg: 2.40,
        });
        assert!(linked.is_linked());
        assert!(linked.advisory().contains("353.85 kg"));
        assert!(linked.advisory().contains("2.40 $/kg PV"));

        assert!(!LinkStatus::Disconnected.is_linked());
        assert!(LinkStatus::Disconnected.advisory().contains("Use a aba Recria"));
    }

    #[test]
    fn test_percent_serde_boundary() {
        #[derive(Serialize, Deserialize)]
        struct Rate {
            #[serde(with = "percent")]
            juros: f64,
        }

        let rate: Rate = serde_json::from_str(r#"{"juros": 8.5}"#).unwrap();
        assert!((rate.juros - 0.085).abs() < 1e-12);

        let json = serde_json::to_value(&rate).unwrap();
        assert!((json["juros"].as_f64().unwrap() - 8.5).abs() < 1e-9);
    }
}
