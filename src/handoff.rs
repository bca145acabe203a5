// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ESTADO DE LIGAÇÃO ENTRE ETAPAS (HANDOFF)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Slot único, "último a escrever vence": a recria publica, o confinamento lê.
// Sem TTL. Ausência é um estado válido (modo desconectado).
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::types::HandoffRecord;

/// Nome fixo do slot compartilhado
pub const HANDOFF_KEY: &str = "recria_output";

/// Armazenamento tipado de um único [`HandoffRecord`].
///
/// Passado por referência às duas engines; nunca é um global implícito.
///
/// # Exemplo
///
/// ```rust
/// use simulador_pecuario::handoff::HandoffStore;
/// use simulador_pecuario::types::HandoffRecord;
///
/// let store = HandoffStore::new();
/// assert!(store.get().is_none());
///
/// store.publish(HandoffRecord { final_weight: 353.85, sell_price_per_kg: 2.40 });
/// assert_eq!(store.get().map(|r| r.final_weight), Some(353.85));
/// ```
#[derive(Debug, Default)]
pub struct HandoffStore {
    slot: RwLock<Option<HandoffRecord>>,
    writes: AtomicU64,
}

impl HandoffStore {
    /// Cria slot vazio
    pub fn new() -> Self {
        Self::default()
    }

    /// Nome do slot
    pub fn key(&self) -> &'static str {
        HANDOFF_KEY
    }

    /// Substitui incondicionalmente o registro atual
    pub fn publish(&self, record: HandoffRecord) {
        // Lock envenenado ainda guarda um Option válido: recupera e sobrescreve
        let mut slot = match self.slot.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = Some(record);
        self.writes.fetch_add(1, Ordering::Relaxed);

        log::debug!(
            "🔗 {} publicado: peso_final={:.2} kg, preco_venda={:.2}/kg",
            self.key(),
            record.final_weight,
            record.sell_price_per_kg
        );
    }

    /// Lê o registro atual, se existir
    pub fn get(&self) -> Option<HandoffRecord> {
        match self.slot.read() {
            Ok(slot) => *slot,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Número de publicações desde a criação do slot
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(weight: f64, price: f64) -> HandoffRecord {
        HandoffRecord {
            final_weight: weight,
            sell_price_per_kg: price,
        }
    }

    #[test]
    fn test_empty_store() {
        let store = HandoffStore::new();
        assert!(store.get().is_none());
        assert_eq!(store.writes(), 0);
        assert_eq!(store.key(), "recria_output");
    }

    #[test]
    fn test_last_write_wins() {
        let store = HandoffStore::new();
        store.publish(record(300.0, 2.0));
        store.publish(record(353.85, 2.40));

        assert_eq!(store.get(), Some(record(353.85, 2.40)));
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn test_republish_same_record() {
        let store = HandoffStore::new();
        store.publish(record(353.85, 2.40));
        let first = store.get();
        store.publish(record(353.85, 2.40));

        assert_eq!(store.get(), first);
        assert_eq!(store.writes(), 2);
    }
}
