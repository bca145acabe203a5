// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// INTERFACE DE TERMINAL
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Três abas (Recria a Pasto, Confinamento, Sensibilidade) sobre ratatui.
// Todo o estado de formulário vive em `App`; cada volta do loop recalcula
// o turno inteiro.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

mod app;
mod runner;
mod ui;

pub use app::{App, FieldSpec, LogEntry, LogLevel, Tab};
pub use runner::run_tui;
