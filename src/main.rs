// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SIMULADOR PECUÁRIO CLI
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// CLI para execução das simulações de recria e confinamento.
//
// Uso:
//   simulador-cli                                   (parâmetros padrão)
//   simulador-cli --recria recria.json --json       (turno completo em JSON)
//   simulador-cli --report confinamento --format markdown --out relatorios/
//   simulador-cli --standalone                      (confinamento sem recria)
//   simulador-cli --tui                             (modo TUI interativo)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use anyhow::{bail, Context};
use simulador_pecuario::config::{install_panic_hook, load_app_config};
use simulador_pecuario::prelude::*;
use simulador_pecuario::report::{self, ReportFormat};
use simulador_pecuario::tui::{run_tui, App};
use simulador_pecuario::SimError;
use std::path::PathBuf;

/// Opções de linha de comando
#[derive(Debug, Default)]
struct CliOptions {
    recria_file: Option<PathBuf>,
    confinamento_file: Option<PathBuf>,
    json: bool,
    report: Option<Stage>,
    format: Option<ReportFormat>,
    out_dir: Option<PathBuf>,
    tui: bool,
    standalone: bool,
}

/// Tenta carregar o arquivo .env de múltiplos locais possíveis
fn load_dotenv() {
    let possible_paths = [PathBuf::from(".env"), PathBuf::from("../.env")];

    for path in &possible_paths {
        if path.exists() {
            match dotenvy::from_path(path) {
                Ok(_) => {
                    eprintln!(
                        "✓ Carregado .env de: {:?}",
                        path.canonicalize().unwrap_or(path.clone())
                    );
                    return;
                }
                Err(e) => {
                    eprintln!("⚠ Erro ao carregar {:?}: {}", path, e);
                }
            }
        }
    }

    // Sem .env: valores padrão e variáveis já exportadas
    let _ = dotenvy::dotenv();
}

fn print_usage(program: &str) {
    eprintln!("Simulador Pecuário CLI v{}", simulador_pecuario::VERSION);
    eprintln!();
    eprintln!("Uso: {} [opções]", program);
    eprintln!();
    eprintln!("Opções:");
    eprintln!("  --recria <arquivo>        Parâmetros da recria (JSON)");
    eprintln!("  --confinamento <arquivo>  Parâmetros do confinamento (JSON)");
    eprintln!("  --json                    Imprime o turno completo em JSON");
    eprintln!("  --report <etapa>          Exporta relatório (recria | confinamento)");
    eprintln!("  --format <formato>        text | markdown | json");
    eprintln!("  --out <diretório>         Diretório dos relatórios");
    eprintln!("  --standalone              Confinamento sem executar a recria");
    eprintln!("  --tui                     Modo TUI interativo");
    eprintln!("  --help                    Esta mensagem");
}

fn parse_args(args: &[String]) -> anyhow::Result<Option<CliOptions>> {
    let mut options = CliOptions::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--recria" => {
                let value = iter.next().context("--recria exige um arquivo")?;
                options.recria_file = Some(PathBuf::from(value));
            }
            "--confinamento" => {
                let value = iter.next().context("--confinamento exige um arquivo")?;
                options.confinamento_file = Some(PathBuf::from(value));
            }
            "--report" => {
                let value = iter.next().context("--report exige uma etapa")?;
                let stage = Stage::from_name(value)
                    .ok_or_else(|| SimError::UnknownStage(value.clone()))?;
                options.report = Some(stage);
            }
            "--format" => {
                let value = iter.next().context("--format exige um formato")?;
                options.format = Some(ReportFormat::parse(value)?);
            }
            "--out" => {
                let value = iter.next().context("--out exige um diretório")?;
                options.out_dir = Some(PathBuf::from(value));
            }
            "--json" => options.json = true,
            "--tui" => options.tui = true,
            "--standalone" => options.standalone = true,
            "--help" | "-h" => return Ok(None),
            other => bail!("Opção desconhecida: {}", other),
        }
    }

    Ok(Some(options))
}

fn main() -> anyhow::Result<()> {
    // Carregar .env PRIMEIRO, antes de qualquer coisa
    load_dotenv();

    // Inicializar logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let program = args
        .first()
        .map(String::as_str)
        .unwrap_or("simulador-cli");

    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage(program);
            return Ok(());
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!();
            print_usage(program);
            std::process::exit(1);
        }
    };

    // CLI sobrepõe .env
    let mut config = load_app_config();
    if let Some(path) = options.recria_file.clone() {
        config.recria_params_path = Some(path);
    }
    if let Some(path) = options.confinamento_file.clone() {
        config.confinamento_params_path = Some(path);
    }
    if let Some(format) = options.format {
        config.report_format = format;
    }
    if let Some(dir) = options.out_dir.clone() {
        config.report_dir = dir;
    }

    let recria_params = config
        .recria_params()
        .context("Falha ao carregar parâmetros da recria")?;
    let confinamento_input = config
        .confinamento_input()
        .context("Falha ao carregar parâmetros do confinamento")?;

    if options.tui {
        return run_tui_mode(recria_params, confinamento_input, config);
    }

    if options.standalone {
        return run_standalone(&confinamento_input, options.json);
    }

    let sensitivity_input = SensitivityInput {
        scenario: ScenarioOverrides::from_baseline(&recria_params),
        shock: config.shock,
    };

    let mut simulator = Simulator::new();
    let result = simulator.run_turn(&recria_params, &confinamento_input, &sensitivity_input);
    let start_date = chrono::Local::now().date_naive();

    if let Some(stage) = options.report {
        let report = match stage {
            Stage::Recria => report::recria_report(&result.recria_params, &result.recria, start_date),
            Stage::Confinamento => report::confinamento_report(&result.confinamento),
        };
        let path = report
            .write_to(&config.report_dir, config.report_format)
            .context("Falha ao exportar relatório")?;
        println!("📄 Relatório gravado em {}", path.display());
        return Ok(());
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_turn(&result, start_date);
    Ok(())
}

/// Modo TUI: interface interativa com as três abas
fn run_tui_mode(
    recria: RecriaParams,
    confinamento: ConfinamentoInput,
    config: simulador_pecuario::AppConfig,
) -> anyhow::Result<()> {
    install_panic_hook();

    let start_date = chrono::Local::now().date_naive();
    let app = App::new(recria, confinamento, config, start_date);
    let app = run_tui(app).context("Falha na interface de terminal")?;

    log::info!("👋 TUI encerrada após {} turnos", app.turns());
    Ok(())
}

/// Confinamento sem recria no processo: padrões fixos (modo desconectado)
fn run_standalone(input: &ConfinamentoInput, json: bool) -> anyhow::Result<()> {
    let handoff = HandoffStore::new();
    let run = ConfinamentoEngine::new(&handoff).run(input);

    if json {
        println!("{}", serde_json::to_string_pretty(&run)?);
        return Ok(());
    }

    println!("⚠️  {}", run.link().advisory());
    println!();
    println!("{}", report::confinamento_report(&run).to_text());
    Ok(())
}

fn print_turn(result: &TurnResult, start_date: chrono::NaiveDate) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(" SIMULADOR PECUÁRIO v{}", simulador_pecuario::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    let recria = report::recria_report(&result.recria_params, &result.recria, start_date);
    println!("{}", recria.to_text());

    println!("🔗 {}", result.confinamento.link().advisory());
    println!();
    let confinamento = report::confinamento_report(&result.confinamento);
    println!("{}", confinamento.to_text());

    let sensitivity = &result.sensitivity;
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(" SENSIBILIDADE (RECRIA)");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "Lucro com valores do cenário: ${}",
        simulador_pecuario::utils::format_thousands(sensitivity.scenario.profit, 2)
    );
    println!("{}", sensitivity.gain.upside_statement());
    println!("{}", sensitivity.gain.downside_statement());
    println!("{}", sensitivity.shocks.purchase_statement());
    println!("{}", sensitivity.shocks.sale_statement());
}
