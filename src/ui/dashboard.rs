//! Main dashboard rendering
//!
//! Draws the district selector with its search filter, the three summary
//! cards with their Hindi sentences, the six-month trend, and the top-5
//! ranking. All values come from the app state and the view model.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::TREND_MONTHS;
use crate::ui::widgets::TrendSparkline;
use crate::view::{format_indian, format_indian_f64, RANKING_STATE};

/// Renders the full dashboard view
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(10),   // body
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_body(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

/// Renders the title bar with the offline banner and fetch time
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        "MGNREGA District Dashboard",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if app.offline() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            " OFFLINE - purana data dikhaya ja raha hai ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
    }

    if let Some(ref dataset) = app.dataset {
        spans.push(Span::styled(
            format!("  data: {}", dataset.fetched_at.format("%Y-%m-%d %H:%M UTC")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

/// Renders the district selector and the summary panels
fn render_body(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(40)])
        .split(area);

    render_district_panel(frame, app, columns[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),  // summary cards
            Constraint::Length(5),  // trend
            Constraint::Min(7),     // top 5
        ])
        .split(columns[1]);

    render_summary(frame, app, rows[0]);
    render_trend(frame, app, rows[1]);
    render_top_five(frame, app, rows[2]);
}

/// Renders the searchable district list
///
/// Districts not matching the search query are hidden from the list but
/// stay in the underlying choices.
fn render_district_panel(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let search_style = if app.search_active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search = Paragraph::new(app.search_query.as_str()).block(
        Block::default()
            .title(" Khoj (/) ")
            .borders(Borders::ALL)
            .border_style(search_style),
    );
    frame.render_widget(search, rows[0]);

    let visible = app.visible_choices();
    let items: Vec<ListItem> = visible
        .iter()
        .map(|district| ListItem::new(district.to_string()))
        .collect();

    let mut state = ListState::default();
    state.select(
        app.selected
            .as_deref()
            .and_then(|s| visible.iter().position(|v| *v == s)),
    );

    let list = List::new(items)
        .block(Block::default().title(" District ").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, rows[1], &mut state);
}

/// Renders the three summary cards with their Hindi sentences
fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref vm) = app.view_model else {
        let empty = Paragraph::new("Koi district chuna nahi gaya hai.")
            .block(Block::default().title(" Saransh ").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    render_card(
        frame,
        cards[0],
        " Kaamgaar ",
        &format_indian(vm.total_workers),
        &vm.workers_sentence,
        Color::Green,
    );
    render_card(
        frame,
        cards[1],
        " Kharch ",
        &format!("₹{}", format_indian_f64(vm.total_funds)),
        &vm.funds_sentence,
        Color::Yellow,
    );
    render_card(
        frame,
        cards[2],
        " Naukriyan ",
        &format_indian(vm.jobs_created),
        &vm.jobs_sentence,
        Color::Cyan,
    );
}

/// Renders one summary card: a big number plus its sentence
fn render_card(frame: &mut Frame, area: Rect, title: &str, number: &str, sentence: &str, color: Color) {
    let lines = vec![
        Line::from(Span::styled(
            number.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            sentence.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ];
    let card = Paragraph::new(lines)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .wrap(ratatui::widgets::Wrap { trim: true });
    frame.render_widget(card, area);
}

/// Renders the six-month jobs trend with the sparkline widget
fn render_trend(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Naukri rujhan (6 mahine) ")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(ref vm) = app.view_model else {
        return;
    };
    if inner.height < 2 {
        return;
    }

    let spark_area = Rect::new(inner.x, inner.y, inner.width.min(TREND_MONTHS as u16), 1);
    frame.render_widget(TrendSparkline::new(&vm.trend), spark_area);

    let labels: Vec<String> = (0..TREND_MONTHS)
        .map(|i| format!("M-{}: {}", TREND_MONTHS - i, format_indian(vm.trend[i])))
        .collect();
    let label_line = Paragraph::new(labels.join("  "))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        label_line,
        Rect::new(inner.x, inner.y + 1, inner.width, 1),
    );
}

/// Renders the top-5 districts by jobs created within the ranking state
fn render_top_five(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Top 5 - {} ", RANKING_STATE);
    let block = Block::default().title(title).borders(Borders::ALL);

    let Some(ref vm) = app.view_model else {
        frame.render_widget(block, area);
        return;
    };

    let lines: Vec<Line> = vm
        .top_five
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            Line::from(vec![
                Span::styled(
                    format!("{}. ", i + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<16}", entry.district),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{} jobs", format_indian(entry.jobs_created))),
            ])
        })
        .collect();

    let list = Paragraph::new(lines).block(block);
    frame.render_widget(list, area);
}

/// Renders the footer: a pending notice, or the key hints
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let footer = if let Some(ref notice) = app.notice {
        Paragraph::new(notice.as_str()).style(Style::default().fg(Color::Yellow))
    } else {
        Paragraph::new("j/k: district  /: khoj  s: suno  r: refresh  ?: help  q: quit")
            .style(Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(footer, area);
}
