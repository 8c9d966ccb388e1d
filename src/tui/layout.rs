//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs};

use crate::format::{
    format_currency, format_currency_millions, format_date_opt, format_number,
    format_percentage, format_percentage_precise, truncate_text,
};
use crate::model::Windpark;
use crate::provider::LoadState;

use super::runtime::{App, DetailTab, Page};
use super::style;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    match app.page {
        Page::Overview => render_overview(frame, app),
        Page::NewProject => render_form(frame, app),
        Page::Detail { index, tab } => render_detail(frame, app, index, tab),
    }
}

fn render_overview(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(3), // KPI cards
            Constraint::Min(8),    // project table
            Constraint::Length(1), // notice / status line
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, "Übersicht", chunks[0]);
    render_kpi_cards(frame, app, chunks[1]);
    render_project_table(frame, app, chunks[2]);
    render_notice(frame, app, chunks[3]);
    render_footer(
        frame,
        " q Beenden │ ↑/↓ Auswahl │ Enter Details │ n Neues Projekt │ r Neu laden ",
        chunks[4],
    );
}

/// Title bar shared by all pages.
fn render_header(frame: &mut Frame, page_title: &str, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " WINDKALK ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(page_title, Style::default().add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Three KPI cards: running projects, mean profit, mean equity ratio.
fn render_kpi_cards(frame: &mut Frame, app: &App, area: Rect) {
    let kpis = app.kpis();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let entries = [
        ("Laufende Projekte", format_number(kpis.laufende_projekte as f64)),
        (
            "Ø Gewinn p.a.",
            format_currency(kpis.durchschnittlicher_gewinn),
        ),
        (
            "Ø EK-Quote",
            format_percentage(kpis.durchschnittliche_ek_quote),
        ),
    ];
    for (i, (title, value)) in entries.iter().enumerate() {
        let card = Paragraph::new(Line::from(Span::styled(
            value.clone(),
            Style::default()
                .fg(style::KPI_VALUE)
                .add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL),
        );
        frame.render_widget(card, cards[i]);
    }
}

/// Project table with a highlighted cursor row.
fn render_project_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(["Name", "Standort", "Status", "Anlagen", "Invest.", "RoI"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .collection
        .projects()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mut row = Row::new(vec![
                Cell::from(truncate_text(&p.name, 32)),
                Cell::from(truncate_text(&p.standort, 20)),
                Cell::from(Span::styled(
                    p.status.label(),
                    Style::default().fg(style::status_color(p.status)),
                )),
                Cell::from(format_number(f64::from(p.total_anlagen()))),
                Cell::from(format_currency_millions(p.investitionsvolumen)),
                Cell::from(format_percentage_precise(p.roi)),
            ]);
            if i == app.selected {
                row = row.style(Style::default().add_modifier(Modifier::REVERSED));
            }
            row
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Length(20),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(format!(
                " Projekte ({}) ",
                app.collection.projects().len()
            ))
            .borders(Borders::ALL),
    );
    frame.render_widget(table, area);
}

/// Fallback notice or last action status.
fn render_notice(frame: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(error) = app.collection.error() {
        Span::styled(
            format!(" {error} — Beispieldaten werden angezeigt"),
            Style::default().fg(style::NOTICE_FG),
        )
    } else if let Some(status) = &app.status_line {
        Span::raw(format!(" {status}"))
    } else if app.collection.state() == LoadState::Loading {
        Span::raw(" Lade Projekte...")
    } else {
        Span::raw("")
    };
    frame.render_widget(Paragraph::new(Line::from(text)), area);
}

fn render_footer(frame: &mut Frame, help: &str, area: Rect) {
    let footer = Line::from(Span::styled(help, Style::default().fg(style::FOOTER_FG)));
    frame.render_widget(Paragraph::new(footer), area);
}

/// New-project form: one line per slot, focus marker, inline errors.
fn render_form(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(8),    // fields
            Constraint::Length(1), // status line
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, "Neues Projekt", chunks[0]);

    let slots = app.form_slots();
    let mut lines: Vec<Line> = Vec::with_capacity(slots.len());
    for (i, slot) in slots.iter().enumerate() {
        let focused = i == app.focus;
        let marker = if focused { "▶ " } else { "  " };
        let value = if focused && slot.is_free_text() {
            format!("{}_", app.input)
        } else {
            app.slot_value(*slot)
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(style::FOCUS_FG)),
            Span::raw(format!("{:<28}", slot.label())),
            Span::styled(
                value,
                if focused {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                },
            ),
        ];
        if app.form.show_validation() {
            if let Some(message) = app.form.error(&slot.error_key()) {
                spans.push(Span::styled(
                    format!("  ✗ {message}"),
                    Style::default().fg(style::ERROR_FG),
                ));
            }
        }
        lines.push(Line::from(spans));
    }

    // keep the focused line visible in short terminals
    let visible = chunks[1].height.saturating_sub(2) as usize;
    let scroll = if visible > 0 && app.focus >= visible {
        (app.focus + 1 - visible) as u16
    } else {
        0
    };

    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .scroll((scroll, 0));
    frame.render_widget(body, chunks[1]);

    let status = app.status_line.as_deref().unwrap_or("");
    frame.render_widget(
        Paragraph::new(Line::from(Span::raw(format!(" {status}")))),
        chunks[2],
    );
    render_footer(
        frame,
        " Esc Zurück │ Tab Nächstes Feld │ ←/→ Auswahl │ ^A Anlage + │ ^D Anlage − │ ^S Speichern ",
        chunks[3],
    );
}

/// Read-only detail view with one tab row.
fn render_detail(frame: &mut Frame, app: &App, index: usize, tab: DetailTab) {
    let Some(project) = app.collection.projects().get(index) else {
        // selection went stale after a refresh
        render_overview(frame, app);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(3), // tab bar
            Constraint::Min(6),    // tab content
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, &project.name, chunks[0]);

    let titles: Vec<Line> = DetailTab::ALL
        .iter()
        .map(|t| Line::from(t.label()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(tab.index())
        .highlight_style(
            Style::default()
                .fg(style::KPI_VALUE)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(tabs, chunks[1]);

    let lines = detail_lines(project, tab);
    let body = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" {} ", tab.label()))
            .borders(Borders::ALL),
    );
    frame.render_widget(body, chunks[2]);

    render_footer(frame, " Esc Zurück │ ←/→ Tab wechseln ", chunks[3]);
}

fn kv(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:<24}"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ])
}

/// Content rows of a detail tab, derived from the project data.
fn detail_lines(p: &Windpark, tab: DetailTab) -> Vec<Line<'static>> {
    match tab {
        DetailTab::Windpark => {
            let mut lines = vec![
                kv("Standort", p.standort.clone()),
                kv("Status", p.status.label().to_string()),
                kv("Baubeginn", format_date_opt(p.baubeginn)),
                kv("Inbetriebnahme", format_date_opt(p.inbetriebnahme)),
                kv("Anlagen gesamt", format_number(f64::from(p.total_anlagen()))),
                Line::from(""),
            ];
            for a in &p.anlagen {
                lines.push(Line::from(format!(
                    "  {} × {} {}",
                    a.anzahl, a.hersteller, a.modell
                )));
            }
            lines
        }
        DetailTab::Gutachten => vec![
            kv("Gewinn p.a.", format_currency(p.gewinn_pro_annum)),
            kv(
                "Gewinn je Anlage p.a.",
                if p.total_anlagen() > 0 {
                    format_currency(p.gewinn_pro_annum / f64::from(p.total_anlagen()))
                } else {
                    "-".to_string()
                },
            ),
        ],
        DetailTab::Tarife => vec![
            kv("FK-Zins", format_percentage_precise(p.fk_zins)),
            kv("RoI", format_percentage_precise(p.roi)),
        ],
        DetailTab::Kosten => {
            let fk = p.investitionsvolumen * (1.0 - p.ek_quote / 100.0);
            vec![
                kv("Investitionsvolumen", format_currency_millions(p.investitionsvolumen)),
                kv("Fremdkapital", format_currency_millions(fk)),
                kv(
                    "Zinskosten p.a.",
                    format_currency(fk * p.fk_zins / 100.0),
                ),
            ]
        }
        DetailTab::GuV => {
            let fk = p.investitionsvolumen * (1.0 - p.ek_quote / 100.0);
            let zinsen = fk * p.fk_zins / 100.0;
            vec![
                kv("Gewinn p.a.", format_currency(p.gewinn_pro_annum)),
                kv("Zinsaufwand p.a.", format_currency(zinsen)),
                kv(
                    "Ergebnis nach Zinsen",
                    format_currency(p.gewinn_pro_annum - zinsen),
                ),
            ]
        }
        DetailTab::Investition => {
            let ek = p.investitionsvolumen * p.ek_quote / 100.0;
            let fk = p.investitionsvolumen - ek;
            vec![
                kv("Investitionsvolumen", format_currency_millions(p.investitionsvolumen)),
                kv("EK-Quote", format_percentage_precise(p.ek_quote)),
                kv("Eigenkapital", format_currency_millions(ek)),
                kv("Fremdkapital", format_currency_millions(fk)),
                kv("FK-Zins", format_percentage_precise(p.fk_zins)),
                kv("RoI", format_percentage_precise(p.roi)),
            ]
        }
    }
}
