// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CONFIGURAÇÃO DO SIMULADOR
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Configurações de relatório, choques padrão e arquivos de parâmetros.
// Todas as configurações podem ser definidas via .env
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::confinamento::ConfinamentoInput;
use crate::error::SimResult;
use crate::recria::RecriaParams;
use crate::report::ReportFormat;
use crate::sensitivity::{ShockInput, DEFAULT_SHOCK_PCT, SHOCK_SLIDER};

/// Configuração da aplicação.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Formato de exportação de relatórios
    pub report_format: ReportFormat,

    /// Diretório onde os relatórios são gravados.
    /// Padrão: diretório atual
    pub report_dir: PathBuf,

    /// Choques percentuais iniciais da análise de sensibilidade.
    /// Padrão: +2% compra, +2% venda
    pub shock: ShockInput,

    /// Arquivo JSON com parâmetros da recria (opcional)
    pub recria_params_path: Option<PathBuf>,

    /// Arquivo JSON com parâmetros do confinamento (opcional)
    pub confinamento_params_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            report_format: ReportFormat::default(),
            report_dir: PathBuf::from("."),
            shock: ShockInput::from_pct(DEFAULT_SHOCK_PCT, DEFAULT_SHOCK_PCT),
            recria_params_path: None,
            confinamento_params_path: None,
        }
    }
}

impl AppConfig {
    /// Cria configuração padrão.
    pub fn new() -> Self {
        Self::default()
    }

    /// Carrega os parâmetros da recria (arquivo configurado ou padrão)
    pub fn recria_params(&self) -> SimResult<RecriaParams> {
        match &self.recria_params_path {
            Some(path) => {
                let params: RecriaParams = load_params_file(path)?;
                params.validate()?;
                Ok(params)
            }
            None => Ok(RecriaParams::default()),
        }
    }

    /// Carrega a entrada do confinamento (arquivo configurado ou padrão)
    pub fn confinamento_input(&self) -> SimResult<ConfinamentoInput> {
        match &self.confinamento_params_path {
            Some(path) => {
                let input: ConfinamentoInput = load_params_file(path)?;
                input.validate()?;
                Ok(input)
            }
            None => Ok(ConfinamentoInput::default()),
        }
    }
}

/// Lê um percentual de choque do ambiente, restrito à faixa do slider.
fn shock_from_env(var: &str) -> Option<f64> {
    let raw = std::env::var(var).ok()?;
    match raw.trim().parse::<f64>() {
        Ok(pct) if pct.is_finite() => {
            let clamped = SHOCK_SLIDER.clamp(pct);
            log::info!("📦 {}={}", var, clamped);
            Some(clamped)
        }
        _ => {
            log::warn!("⚠️ {} inválido: {:?} (ignorado)", var, raw);
            None
        }
    }
}

/// Carrega configuração a partir das variáveis de ambiente.
///
/// Variáveis suportadas:
/// - `REPORT_FORMAT`: "text", "markdown" ou "json" (padrão: text)
/// - `REPORT_DIR`: diretório de saída dos relatórios (padrão: ".")
/// - `SHOCK_COMPRA_PCT`: choque no valor de compra em % (padrão: 2.0)
/// - `SHOCK_VENDA_PCT`: choque no preço de venda em % (padrão: 2.0)
/// - `RECRIA_PARAMS`: arquivo JSON de parâmetros da recria
/// - `CONFINAMENTO_PARAMS`: arquivo JSON de parâmetros do confinamento
///
/// # Exemplo
///
/// ```rust,ignore
/// // .env
/// REPORT_FORMAT=markdown
/// SHOCK_VENDA_PCT=5
///
/// // código
/// let config = load_app_config();
/// assert_eq!(config.report_format, ReportFormat::Markdown);
/// ```
pub fn load_app_config() -> AppConfig {
    let mut config = AppConfig::default();

    // REPORT_FORMAT: formato dos relatórios exportados
    if let Ok(format_str) = std::env::var("REPORT_FORMAT") {
        match ReportFormat::parse(&format_str) {
            Ok(format) => {
                config.report_format = format;
                log::info!("📦 REPORT_FORMAT={}", format);
            }
            Err(e) => log::warn!("⚠️ {} (usando {})", e, config.report_format),
        }
    }

    // REPORT_DIR: diretório de saída
    if let Ok(dir) = std::env::var("REPORT_DIR") {
        if !dir.trim().is_empty() {
            config.report_dir = PathBuf::from(dir.trim());
            log::info!("📦 REPORT_DIR={:?}", config.report_dir);
        }
    }

    // SHOCK_*: choques percentuais iniciais
    let purchase_pct = shock_from_env("SHOCK_COMPRA_PCT").unwrap_or(DEFAULT_SHOCK_PCT);
    let sale_pct = shock_from_env("SHOCK_VENDA_PCT").unwrap_or(DEFAULT_SHOCK_PCT);
    config.shock = ShockInput::from_pct(purchase_pct, sale_pct);

    // *_PARAMS: arquivos de parâmetros
    if let Ok(path) = std::env::var("RECRIA_PARAMS") {
        config.recria_params_path = Some(PathBuf::from(path));
        log::info!("📦 RECRIA_PARAMS={:?}", config.recria_params_path);
    }
    if let Ok(path) = std::env::var("CONFINAMENTO_PARAMS") {
        config.confinamento_params_path = Some(PathBuf::from(path));
        log::info!("📦 CONFINAMENTO_PARAMS={:?}", config.confinamento_params_path);
    }

    config
}

/// Lê um arquivo JSON de parâmetros.
///
/// Campos ausentes ficam com o valor padrão da etapa.
pub fn load_params_file<T: DeserializeOwned>(path: &Path) -> SimResult<T> {
    let content = std::fs::read_to_string(path)?;
    let params = serde_json::from_str(&content)?;
    log::info!("📂 Parâmetros carregados de {:?}", path);
    Ok(params)
}

/// Instala panic hook que devolve o terminal ao estado normal.
///
/// Sem isso, um panic com a TUI aberta deixa o terminal em raw mode
/// dentro da tela alternativa.
///
/// Este hook customizado:
/// 1. Sai da tela alternativa e desliga o raw mode
/// 2. Loga o panic com informações da thread
/// 3. Chama o hook original (mensagem padrão no stderr)
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );

        let thread = std::thread::current();
        let thread_name = thread.name().unwrap_or("unnamed");

        // Extrair localização do panic
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        // Extrair mensagem do panic
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic payload".to_string()
        };

        log::error!("[PANIC] Thread {} at {}: {}", thread_name, location, message);

        original_hook(panic_info);
    }));
}
