use crate::app::{App, InputMode, Screen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};
use scrapedesk_core::detail::{CompanyDetail, DetailState, company_detail};
use scrapedesk_core::list::{LIST_COLUMNS, ListStatus};

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠸", "⠴"];

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Scrape input
            Constraint::Min(5),    // Screen
            Constraint::Length(1), // Status
            Constraint::Length(1), // Hints
        ])
        .split(f.area());

    render_input(f, app, chunks[0]);
    match app.screen {
        Screen::List => render_list(f, app, chunks[1]),
        Screen::Detail(_) => render_detail(f, app, chunks[1]),
    }
    render_status(f, app, chunks[2]);
    render_hints(f, app, chunks[3]);

    if let Some(message) = app.alert.clone() {
        render_alert(f, &message);
    }
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let editing = app.mode == InputMode::Editing;
    let border_color = if editing { Color::Yellow } else { Color::DarkGray };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Enter domain name ")
        .border_style(Style::default().fg(border_color));

    let text = if app.input.is_empty() && !editing {
        Span::styled(
            "press / to type a URL, Enter to fetch & save details",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(app.input.clone(), Style::default().fg(Color::Yellow))
    };

    let inner = block.inner(area);
    let (offset, column) = input_viewport(app.input_cursor, inner.width as usize);
    let paragraph = Paragraph::new(Line::from(text))
        .block(block)
        .scroll((0, offset as u16));
    f.render_widget(paragraph, area);

    if editing && app.alert.is_none() {
        f.set_cursor_position((inner.x + column as u16, inner.y));
    }
}

/// Horizontal scroll offset and on-screen cursor column for a one-line input
/// `width` cells wide. The cursor always stays inside the box.
pub(crate) fn input_viewport(cursor: usize, width: usize) -> (usize, usize) {
    if width == 0 {
        return (0, 0);
    }
    let offset = cursor.saturating_sub(width - 1);
    (offset, cursor - offset)
}

fn render_list(f: &mut Frame, app: &mut App, area: Rect) {
    let title = format!(
        " Companies ({}) | {} selected ",
        app.list.len(),
        app.list.selected_count()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.list.is_empty() {
        let (message, color) = match app.list.status() {
            ListStatus::Loading => ("Loading...".to_string(), Color::DarkGray),
            ListStatus::Failed(e) => (format!("Error: {}", e), Color::Red),
            ListStatus::Ready => (
                "No companies yet. Press / to scrape a URL.".to_string(),
                Color::DarkGray,
            ),
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true });
        f.render_widget(empty, inner);
        return;
    }

    // One line for the header row
    let height = (inner.height as usize).saturating_sub(1).max(1);
    let total_items = app.list.len();

    // Keep the cursor row in view
    if app.cursor < app.scroll {
        app.scroll = app.cursor;
    } else if app.cursor >= app.scroll + height {
        app.scroll = app.cursor + 1 - height;
    }
    app.scroll = app.scroll.min(total_items.saturating_sub(height));
    let scroll_offset = app.scroll;

    let mut header_cells = vec![Cell::from(app.list.select_all_state().marker())];
    header_cells.extend(LIST_COLUMNS.iter().map(|c| Cell::from(*c)));
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .list
        .rows()
        .into_iter()
        .enumerate()
        .skip(scroll_offset)
        .take(height)
        .map(|(idx, row)| {
            let marker = if row.selected { "[x]" } else { "[ ]" };
            let mut cells = vec![Cell::from(marker)];
            cells.extend(row.cells().into_iter().map(Cell::from));

            let mut style = if row.selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            if idx == app.cursor {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }
            Row::new(cells).style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Percentage(18),
        Constraint::Length(15),
        Constraint::Percentage(25),
        Constraint::Percentage(18),
        Constraint::Length(14),
        Constraint::Percentage(20),
    ];

    let table = Table::new(rows, widths).header(header).column_spacing(1);
    f.render_widget(table, inner);

    if total_items > height {
        render_scrollbar(f, area, total_items, height, scroll_offset);
    }
}

fn render_scrollbar(
    f: &mut Frame,
    area: Rect,
    total_items: usize,
    visible_items: usize,
    scroll_offset: usize,
) {
    let scrollbar_height = area.height.saturating_sub(2) as usize;
    if scrollbar_height == 0 {
        return;
    }

    let thumb_size = ((visible_items as f32 / total_items as f32) * scrollbar_height as f32)
        .max(1.0)
        .floor() as usize;

    let scroll_ratio = scroll_offset as f32 / (total_items - visible_items) as f32;
    let thumb_position =
        (scroll_ratio * (scrollbar_height - thumb_size) as f32).floor() as usize;

    let scrollbar_x = area.x + area.width - 1;
    let scrollbar_start_y = area.y + 1;

    for i in 0..scrollbar_height {
        let in_thumb = i >= thumb_position && i < thumb_position + thumb_size;
        let (symbol, color) = if in_thumb {
            ("█", Color::Cyan)
        } else {
            ("│", Color::DarkGray)
        };

        f.render_widget(
            Paragraph::new(symbol).style(Style::default().fg(color)),
            Rect {
                x: scrollbar_x,
                y: scrollbar_start_y + i as u16,
                width: 1,
                height: 1,
            },
        );
    }
}

fn render_detail(f: &mut Frame, app: &App, area: Rect) {
    let Screen::Detail(ref view) = app.screen else {
        return;
    };

    let company = match &view.state {
        DetailState::Loaded(company) => company,
        other => {
            let color = if matches!(other, DetailState::Failed(_)) {
                Color::Red
            } else {
                Color::DarkGray
            };
            let message = Paragraph::new(other.message().unwrap_or_default())
                .style(Style::default().fg(color))
                .block(Block::default().borders(Borders::ALL).title(" Company "));
            f.render_widget(message, area);
            return;
        }
    };

    let detail = company_detail(company, app.config());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Breadcrumbs
            Constraint::Length(6), // Header
            Constraint::Min(5),    // Details + screenshot
        ])
        .split(area);

    render_breadcrumbs(f, &detail, chunks[0]);
    render_detail_header(f, &detail, chunks[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);

    render_detail_fields(f, &detail, columns[0]);
    render_assets(f, &detail, columns[1]);
}

fn render_breadcrumbs(f: &mut Frame, detail: &CompanyDetail, area: Rect) {
    let mut spans = Vec::new();
    for (i, crumb) in detail.breadcrumb.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" / ", Style::default().fg(Color::DarkGray)));
        }
        let style = if i + 1 == detail.breadcrumb.len() {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)
        };
        spans.push(Span::styled(crumb.clone(), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn label_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.to_string()),
    ])
}

fn render_detail_header(f: &mut Frame, detail: &CompanyDetail, area: Rect) {
    let mut text = vec![Line::from(Span::styled(
        detail.name.clone(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))];
    for field in &detail.summary {
        text.push(label_line(&field.label, &field.value));
    }

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_detail_fields(f: &mut Frame, detail: &CompanyDetail, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Company Details ")
        .border_style(Style::default().fg(Color::Cyan));

    let mut text = Vec::new();
    for field in &detail.fields {
        text.push(label_line(&field.label, &field.value));
        if let Some(ref link) = field.link
            && *link != field.value
        {
            text.push(Line::from(Span::styled(
                format!("  {}", link),
                Style::default().fg(Color::Blue),
            )));
        }
    }

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_assets(f: &mut Frame, detail: &CompanyDetail, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Screenshot of Webpage ")
        .border_style(Style::default().fg(Color::Magenta));

    let mut text = Vec::new();
    match detail.screenshot_url {
        Some(ref url) => text.push(Line::from(Span::styled(
            url.to_string(),
            Style::default().fg(Color::Blue),
        ))),
        None => text.push(Line::from(Span::styled(
            "No screenshot",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    if let Some(ref logo) = detail.logo_url {
        text.push(Line::from(""));
        text.push(label_line("Logo", logo.as_str()));
    }

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let color = if app.status.starts_with("Error") {
        Color::Red
    } else {
        Color::Gray
    };

    let mut spans = Vec::new();
    if app.is_busy() {
        let frame = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| (d.as_millis() / 100) as usize)
            .unwrap_or(0);
        spans.push(Span::styled(
            format!("{} ", SPINNER[frame % SPINNER.len()]),
            Style::default().fg(Color::Cyan),
        ));
    }
    spans.push(Span::styled(app.status.clone(), Style::default().fg(color)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn hint(key: &'static str, action: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Black).bg(Color::Gray)),
        Span::raw(action),
    ]
}

fn render_hints(f: &mut Frame, app: &App, area: Rect) {
    let pairs: Vec<(&'static str, &'static str)> = if app.mode == InputMode::Editing {
        vec![
            (" Enter ", " Fetch & Save  "),
            (" Esc ", " Stop editing  "),
        ]
    } else {
        match app.screen {
            Screen::List => vec![
                (" q ", " Quit  "),
                (" ↑/↓ ", " Move  "),
                (" Space ", " Select  "),
                (" a ", " All  "),
                (" d ", " Delete selected  "),
                (" e ", " Download CSV  "),
                (" / ", " Scrape URL  "),
                (" Enter ", " Details  "),
                (" r ", " Refresh"),
            ],
            Screen::Detail(_) => vec![
                (" q ", " Quit  "),
                (" Esc ", " Home  "),
                (" r ", " Reload  "),
                (" / ", " Scrape URL"),
            ],
        }
    };

    let spans: Vec<Span> = pairs
        .into_iter()
        .flat_map(|(key, action)| hint(key, action))
        .collect();

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::Black).fg(Color::Gray));
    f.render_widget(paragraph, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_alert(f: &mut Frame, message: &str) {
    let area = centered_rect(44, 5, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Alert ")
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(paragraph, area);
}
