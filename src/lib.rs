//! # Simulador Pecuário - Recria a Pasto → Confinamento
//!
//! Este crate implementa um simulador econômico de duas etapas da pecuária de
//! corte, calculando indicadores zootécnicos e financeiros a partir de
//! parâmetros escalares.
//!
//! ## Etapas
//!
//! ### 1. Recria a pasto (`recria`)
//! Animal comprado em guaranis (₲/kg), convertido para dólares, engordado a
//! pasto com custos mensais. Ao final, publica peso final e preço de venda.
//!
//! ### 2. Confinamento (`confinamento`)
//! Lê a saída da recria (ou usa 350 kg / 11,30 $/kg quando desconectado) e
//! calcula a terminação com custos diários e venda por kg de carcaça.
//!
//! ### 3. Sensibilidade (`sensitivity`)
//! Cenários sobre a recria sem tocar na linha de base:
//! - Substituição de preço de compra, preço de venda e GMD
//! - Impacto de +0,01 kg/dia de GMD
//! - Choques percentuais nos preços de compra e venda
//!
//! ## Fluxo de um turno
//!
//! ```text
//! RecriaEngine ──publica──▶ HandoffStore ──lê──▶ ConfinamentoEngine
//!       │
//!       └──linha de base──▶ sensitivity::analyze
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use simulador_pecuario::prelude::*;
//!
//! let mut sim = Simulator::new();
//! let recria = RecriaParams::default();
//! let result = sim.run_turn(
//!     &recria,
//!     &ConfinamentoInput::default(),
//!     &SensitivityInput::from_baseline(&recria),
//! );
//!
//! assert!(result.confinamento.link().is_linked());
//! println!("Lucro recria: {:.2}", result.recria.profit);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Tipos fundamentais compartilhados pelas etapas.
///
/// - [`Stage`]: etapa produtiva
/// - [`HandoffRecord`]: saída da recria consumida pelo confinamento
/// - [`LinkStatus`]: vinculado ou desconectado
pub mod types;

/// Biblioteca de fórmulas zootécnicas e financeiras.
///
/// Funções puras; toda divisão passa por [`formulas::safe_div`].
pub mod formulas;

/// Slot único de passagem recria → confinamento.
pub mod handoff;

/// Erros de fronteira (arquivos, ambiente, validação de parâmetros).
pub mod error;

/// Etapa 1: recria a pasto.
pub mod recria;

/// Etapa 2: confinamento.
pub mod confinamento;

/// Análises de sensibilidade e impacto sobre a recria.
pub mod sensitivity;

/// Um turno completo de processamento.
pub mod session;

/// Relatórios de indicadores (texto, markdown, JSON).
pub mod report;

/// Configuração via variáveis de ambiente.
pub mod config;

/// Formatação de números e datas.
pub mod utils;

/// Interface de terminal (ratatui).
pub mod tui;

// Re-exports principais
pub use config::{load_app_config, AppConfig};
pub use confinamento::{ConfinamentoEngine, ConfinamentoIndicators, ConfinamentoInput};
pub use error::{SimError, SimResult};
pub use handoff::HandoffStore;
pub use recria::{RecriaEngine, RecriaIndicators, RecriaParams};
pub use report::{Report, ReportFormat};
pub use session::{Simulator, TurnResult};
pub use types::*;

/// Versão do crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude com os tipos mais usados
///
/// ```rust
/// use simulador_pecuario::prelude::*;
/// ```
pub mod prelude {
    pub use crate::confinamento::{
        ConfinamentoEngine, ConfinamentoIndicators, ConfinamentoInput, ConfinamentoParams,
        ConfinamentoRun, StageDefaults,
    };
    pub use crate::handoff::HandoffStore;
    pub use crate::recria::{RecriaEngine, RecriaIndicators, RecriaParams};
    pub use crate::sensitivity::{
        ScenarioOverrides, SensitivityInput, SensitivityReport, ShockInput,
    };
    pub use crate::session::{Simulator, TurnResult};
    pub use crate::types::*;
}
