// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SESSÃO DO SIMULADOR (UM TURNO DE PROCESSAMENTO)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Um turno = recria completa (com publicação no handoff) → confinamento lê
// → sensibilidade sobre a linha de base da recria. A ordem é fixa.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use serde::{Deserialize, Serialize};

use crate::confinamento::{ConfinamentoEngine, ConfinamentoInput, ConfinamentoRun};
use crate::handoff::HandoffStore;
use crate::recria::{RecriaEngine, RecriaIndicators, RecriaParams};
use crate::sensitivity::{self, SensitivityInput, SensitivityReport};

/// Resultado completo de um turno
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    /// Parâmetros da recria usados no turno
    pub recria_params: RecriaParams,
    /// Indicadores da recria
    pub recria: RecriaIndicators,
    /// Execução do confinamento
    pub confinamento: ConfinamentoRun,
    /// Análises de sensibilidade da recria
    pub sensitivity: SensitivityReport,
}

/// Dono do slot de handoff durante a vida do processo.
#[derive(Debug, Default)]
pub struct Simulator {
    handoff: HandoffStore,
    turns: u64,
}

impl Simulator {
    /// Cria simulador com handoff vazio (confinamento desconectado)
    pub fn new() -> Self {
        Self::default()
    }

    /// Acesso somente leitura ao slot de handoff
    pub fn handoff(&self) -> &HandoffStore {
        &self.handoff
    }

    /// Número de turnos executados
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Engine da recria ligada a este simulador
    pub fn recria(&self) -> RecriaEngine<'_> {
        RecriaEngine::new(&self.handoff)
    }

    /// Engine do confinamento ligada a este simulador
    pub fn confinamento(&self) -> ConfinamentoEngine<'_> {
        ConfinamentoEngine::new(&self.handoff)
    }

    /// Executa um turno completo.
    ///
    /// A recria termina (e publica) antes de o confinamento ler o handoff.
    pub fn run_turn(
        &mut self,
        recria_params: &RecriaParams,
        confinamento_input: &ConfinamentoInput,
        sensitivity_input: &SensitivityInput,
    ) -> TurnResult {
        let recria = self.recria().run(recria_params);
        let confinamento = self.confinamento().run(confinamento_input);
        let sensitivity = sensitivity::analyze(recria_params, &recria, sensitivity_input);

        self.turns += 1;
        log::debug!(
            "🔄 Turno {} concluído (handoff: {} escritas)",
            self.turns,
            self.handoff.writes()
        );

        TurnResult {
            recria_params: recria_params.clone(),
            recria,
            confinamento,
            sensitivity,
        }
    }
}
