//! Benchmarks dos simuladores.
//!
//! Testa performance de:
//! - Fórmulas isoladas
//! - Recria e confinamento completos
//! - Análise de sensibilidade
//! - Turno completo e renderização de relatórios
//!
//! Executar: `cargo bench --bench engine_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use simulador_pecuario::confinamento::{self, ConfinamentoInput, StageDefaults};
use simulador_pecuario::formulas::{self, InterestBasis};
use simulador_pecuario::recria::{self, RecriaParams};
use simulador_pecuario::report::{self, ReportFormat};
use simulador_pecuario::sensitivity::{self, SensitivityInput};
use simulador_pecuario::session::Simulator;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BENCHMARK: Fórmulas
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn bench_formulas(c: &mut Criterion) {
    let mut group = c.benchmark_group("formulas");

    group.bench_function("final_weight", |bencher| {
        bencher.iter(|| black_box(formulas::final_weight(black_box(175.0), 0.49, 365.0)))
    });

    group.bench_function("interest_charge_annual", |bencher| {
        bencher.iter(|| {
            black_box(formulas::interest_charge(
                black_box(478.14),
                0.085,
                365.0,
                InterestBasis::AnnualOver365,
            ))
        })
    });

    group.bench_function("safe_div_zero", |bencher| {
        bencher.iter(|| black_box(formulas::safe_div(black_box(100.0), black_box(0.0))))
    });

    group.finish();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BENCHMARK: Etapas
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");

    let recria_params = RecriaParams::default();
    group.bench_function("recria_compute", |bencher| {
        bencher.iter(|| black_box(recria::compute(black_box(&recria_params))))
    });

    let conf_params = ConfinamentoInput::default().resolve(&StageDefaults::resolve(None));
    group.bench_function("confinamento_compute", |bencher| {
        bencher.iter(|| black_box(confinamento::compute(black_box(&conf_params))))
    });

    let baseline = recria::compute(&recria_params);
    let input = SensitivityInput::from_baseline(&recria_params);
    group.bench_function("sensitivity_analyze", |bencher| {
        bencher.iter(|| black_box(sensitivity::analyze(&recria_params, &baseline, &input)))
    });

    group.finish();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BENCHMARK: Turno completo
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn bench_turn(c: &mut Criterion) {
    let mut group = c.benchmark_group("turn");

    let recria_params = RecriaParams::default();
    let conf_input = ConfinamentoInput::default();
    let input = SensitivityInput::from_baseline(&recria_params);

    for turns in [1u64, 10, 100] {
        group.throughput(Throughput::Elements(turns));
        group.bench_with_input(BenchmarkId::new("run_turn", turns), &turns, |bencher, &n| {
            bencher.iter(|| {
                let mut sim = Simulator::new();
                for _ in 0..n {
                    black_box(sim.run_turn(&recria_params, &conf_input, &input));
                }
            })
        });
    }

    group.finish();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BENCHMARK: Relatórios
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn bench_reports(c: &mut Criterion) {
    let mut group = c.benchmark_group("reports");

    let params = RecriaParams::default();
    let indicators = recria::compute(&params);
    let start = chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default();
    let report = report::recria_report(&params, &indicators, start);

    for format in [ReportFormat::Text, ReportFormat::Markdown, ReportFormat::Json] {
        group.bench_with_input(
            BenchmarkId::new("render", format.extension()),
            &format,
            |bencher, &format| bencher.iter(|| black_box(report.render(format))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_formulas,
    bench_stages,
    bench_turn,
    bench_reports,
);

criterion_main!(benches);
