//! Renderização da interface TUI

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use super::app::{App, LogLevel, Tab};
use crate::report::{self, Report, ReportSection};
use crate::session::TurnResult;
use crate::utils::{format_money, format_thousands, truncate};

/// Renderiza a interface completa
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Abas
            Constraint::Min(12),   // Conteúdo
            Constraint::Length(3), // Aviso de vínculo
            Constraint::Length(7), // Logs
            Constraint::Length(1), // Ajuda
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(chunks[1]);

    render_inputs(frame, app, body[0]);
    match app.last.as_ref() {
        Some(result) => match app.tab {
            Tab::Recria => {
                let report = report::recria_report(&result.recria_params, &result.recria, app.start_date);
                render_report(frame, &report, body[1]);
            }
            Tab::Confinamento => {
                let report = report::confinamento_report(&result.confinamento);
                render_report(frame, &report, body[1]);
            }
            Tab::Sensibilidade => render_sensitivity(frame, result, body[1]),
        },
        None => {
            let waiting = Paragraph::new("Calculando...")
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center);
            frame.render_widget(waiting, body[1]);
        }
    }

    render_advisory(frame, app, chunks[2]);
    render_logs(frame, app, chunks[3]);
    render_help(frame, chunks[4]);
}

// ═══════════════════════════════════════════════════════════════════════════════
// CABEÇALHO E FORMULÁRIO
// ═══════════════════════════════════════════════════════════════════════════════

fn render_tabs(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let titles: Vec<Line<'_>> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .block(
            Block::default()
                .title(format!(" 🐂 Simulador Pecuário v{} ", crate::VERSION))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn render_inputs(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items: Vec<ListItem<'_>> = app
        .tab
        .fields()
        .iter()
        .enumerate()
        .map(|(idx, spec)| {
            let value = format_thousands(app.field_value(idx), spec.decimals);
            let is_selected = idx == app.selected;
            let linked = app.is_linked_field(idx);

            let marker = if is_selected { " ▶ " } else { "   " };
            let value_style = if linked {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::raw(format!("{}: ", spec.label)),
                Span::styled(value, value_style.add_modifier(Modifier::BOLD)),
            ];
            if linked {
                spans.push(Span::styled(" 🔗", Style::default().fg(Color::Green)));
            }

            let item = ListItem::new(Line::from(spans));
            if is_selected {
                item.style(Style::default().bg(Color::DarkGray))
            } else {
                item
            }
        })
        .collect();

    let title = match app.tab {
        Tab::Sensibilidade => " 🎚️ Cenário ",
        _ => " ✏️ Parâmetros ",
    };
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(list, area);
}

// ═══════════════════════════════════════════════════════════════════════════════
// INDICADORES
// ═══════════════════════════════════════════════════════════════════════════════

/// Compra em cima, as três seções restantes lado a lado
fn render_report(frame: &mut Frame<'_>, report: &Report, area: Rect) {
    let purchase_height = report
        .sections
        .first()
        .map(|s| s.rows.len() as u16 + 2)
        .unwrap_or(3);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(purchase_height), Constraint::Min(5)])
        .split(area);

    if let Some(purchase) = report.sections.first() {
        render_section(frame, purchase, Color::Cyan, rows[0]);
    }

    let rest = &report.sections[report.sections.len().min(1)..];
    if rest.is_empty() {
        return;
    }
    let constraints: Vec<Constraint> = rest
        .iter()
        .map(|_| Constraint::Ratio(1, rest.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(rows[1]);

    let colors = [Color::Green, Color::Magenta, Color::Yellow];
    for (idx, section) in rest.iter().enumerate() {
        render_section(frame, section, colors[idx % colors.len()], columns[idx]);
    }
}

fn render_section(frame: &mut Frame<'_>, section: &ReportSection, color: Color, area: Rect) {
    let lines: Vec<Line<'_>> = section
        .rows
        .iter()
        .map(|row| {
            Line::from(vec![
                Span::styled(format!("{}: ", row.label), Style::default().fg(Color::Gray)),
                Span::styled(
                    row.value.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" {} ", section.title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_sensitivity(frame: &mut Frame<'_>, result: &TurnResult, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Cenário
            Constraint::Length(4), // GMD
            Constraint::Min(4),    // Choques
        ])
        .split(area);

    let report = &result.sensitivity;
    let scenario = &report.scenario;
    let baseline_profit = result.recria.profit;
    let delta = scenario.profit - baseline_profit;
    let delta_color = if delta >= 0.0 { Color::Green } else { Color::Red };

    let scenario_lines = vec![
        Line::from(format!(
            "Preço de compra: {} US$/kg PV",
            format_thousands(scenario.buy_price_per_kg, 2)
        )),
        Line::from(format!(
            "Peso final: {} kg",
            format_thousands(scenario.final_weight, 2)
        )),
        Line::from(format!(
            "Receita: {}  |  Custo total: {}",
            format_money(scenario.revenue),
            format_money(scenario.total_cost)
        )),
        Line::from(vec![
            Span::raw("Lucro simulado: "),
            Span::styled(
                format_money(scenario.profit),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("Diferença vs. linha de base: "),
            Span::styled(
                format_money(delta),
                Style::default().fg(delta_color).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    let scenario_widget = Paragraph::new(scenario_lines).block(
        Block::default()
            .title(" 🎚️ Lucro com valores do cenário ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(scenario_widget, chunks[0]);

    let gain = Paragraph::new(vec![
        Line::from(Span::styled(
            report.gain.upside_statement(),
            Style::default().fg(Color::Green),
        )),
        Line::from(Span::styled(
            report.gain.downside_statement(),
            Style::default().fg(Color::Red),
        )),
    ])
    .block(
        Block::default()
            .title(" 🌿 Impacto do GMD ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    )
    .wrap(Wrap { trim: true });
    frame.render_widget(gain, chunks[1]);

    let shocks = Paragraph::new(vec![
        Line::from(Span::styled(
            report.shocks.purchase_statement(),
            Style::default().fg(Color::Red),
        )),
        Line::from(Span::styled(
            report.shocks.sale_statement(),
            Style::default().fg(Color::Green),
        )),
    ])
    .block(
        Block::default()
            .title(" 📊 Choques de preço ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    )
    .wrap(Wrap { trim: true });
    frame.render_widget(shocks, chunks[2]);
}

// ═══════════════════════════════════════════════════════════════════════════════
// RODAPÉ
// ═══════════════════════════════════════════════════════════════════════════════

fn render_advisory(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let (text, color) = match app.last.as_ref().map(|r| r.confinamento.link()) {
        Some(link) if link.is_linked() => (link.advisory(), Color::Green),
        Some(link) => (link.advisory(), Color::Yellow),
        None => (String::new(), Color::DarkGray),
    };

    let advisory = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).title(" 🔗 Vínculo "));
    frame.render_widget(advisory, area);
}

fn render_logs(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem<'_>> = app
        .logs
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|entry| {
            let color = match entry.level {
                LogLevel::Info => Color::White,
                LogLevel::Success => Color::Green,
                LogLevel::Warning => Color::Yellow,
                LogLevel::Error => Color::Red,
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(format!("{} ", entry.level.symbol())),
                Span::styled(
                    truncate(&entry.message, area.width.saturating_sub(16) as usize),
                    Style::default().fg(color),
                ),
            ]))
        })
        .collect();

    let logs = List::new(items).block(
        Block::default()
            .title(format!(" 📋 Logs (turnos: {}) ", app.turns()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(logs, area);
}

fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let help = Paragraph::new(Line::from(vec![
        Span::styled(" Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" aba  "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" campo  "),
        Span::styled("←/→", Style::default().fg(Color::Yellow)),
        Span::raw(" ajustar  "),
        Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)),
        Span::raw(" ×10  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" restaurar  "),
        Span::styled("e", Style::default().fg(Color::Yellow)),
        Span::raw(" exportar  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" sair"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
