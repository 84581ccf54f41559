//! UI rendering using ratatui

use livehub_core::scene::UNAVAILABLE_HINT;
use livehub_core::views::directory::SEARCH_PLACEHOLDER;
use livehub_core::views::schedule::SCHEDULE_EMPTY;
use livehub_core::{ProfileTab, SceneView, ScheduleTab, TabSet, TabbedPanel, ViewStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use super::app::{App, Mode, Pane};

/// Primary accent color
const ACCENT: Color = Color::Red;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for selected items
const HIGHLIGHT: Color = Color::Yellow;
const ERROR: Color = Color::LightRed;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Hero
            Constraint::Min(10),   // Body
            Constraint::Length(2), // Status bar and footer
        ])
        .split(frame.area());

    render_hero(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(body[1]);

    render_directory(frame, app, body[0]);
    render_profile(frame, app, right[0]);
    render_schedule(frame, app, right[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let (border, title_style) = if focused {
        (
            Style::default().fg(ACCENT),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )
    } else {
        (Style::default().fg(SECONDARY), Style::default().fg(SECONDARY))
    };
    Block::default()
        .title(title)
        .title_style(title_style)
        .borders(Borders::ALL)
        .border_style(border)
}

/// Loading / error / idle placeholder for a data-backed pane
fn status_text(status: ViewStatus<'_>, idle_hint: &str) -> Option<Text<'static>> {
    match status {
        ViewStatus::Ready => None,
        ViewStatus::Loading(text) => Some(Text::styled(text, Style::default().fg(DIM))),
        ViewStatus::Failed(message) => Some(Text::styled(
            message.to_string(),
            Style::default().fg(ERROR),
        )),
        ViewStatus::Idle => Some(Text::styled(idle_hint.to_string(), Style::default().fg(DIM))),
    }
}

fn scene_lines(scene: &SceneView) -> Vec<Line<'static>> {
    match scene {
        SceneView::Embedded { url } => vec![Line::from(vec![
            Span::styled("3D scene ", Style::default().fg(DIM)),
            Span::styled(url.clone(), Style::default().add_modifier(Modifier::UNDERLINED)),
        ])],
        SceneView::Unavailable { label } => vec![
            Line::from(label.clone()),
            Line::from(Span::styled(UNAVAILABLE_HINT, Style::default().fg(DIM))),
        ],
    }
}

fn tab_bar<T: TabSet>(panel: &TabbedPanel<T>) -> Tabs<'static> {
    Tabs::new(TabbedPanel::<T>::labels())
        .select(panel.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD))
}

/// Title, tagline and hero scene
fn render_hero(frame: &mut Frame, app: &App, area: Rect) {
    let hero = &app.dashboard.hero;
    let mut lines = vec![
        Line::from(Span::styled(
            hero.title,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(hero.tagline),
    ];
    lines.extend(scene_lines(&hero.scene));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(SECONDARY)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Search box plus the filtered driver list
fn render_directory(frame: &mut Frame, app: &App, area: Rect) {
    let directory = &app.dashboard.directory;
    let visible = directory.visible();
    let focused = app.focus == Pane::Directory;

    let title = if directory.filter().is_active() {
        format!(
            " Drivers :: '{}' ({}/{}) ",
            directory.filter().query(),
            visible.len(),
            directory.drivers().len()
        )
    } else {
        " Drivers ".to_string()
    };
    let block = pane_block(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let search = if app.mode == Mode::Search {
        Line::from(vec![
            Span::styled("/ ", Style::default().fg(HIGHLIGHT)),
            Span::raw(format!("{}|", directory.filter().query())),
        ])
    } else if directory.filter().is_active() {
        Line::from(vec![
            Span::styled("/ ", Style::default().fg(DIM)),
            Span::raw(directory.filter().query().to_string()),
        ])
    } else {
        Line::from(Span::styled(
            format!("/ {}", SEARCH_PLACEHOLDER),
            Style::default().fg(DIM),
        ))
    };
    frame.render_widget(Paragraph::new(search), parts[0]);

    if let Some(text) = status_text(directory.status(), "") {
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), parts[1]);
        return;
    }

    if visible.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No drivers match", Style::default().fg(DIM))),
            parts[1],
        );
        return;
    }

    let selected_id = app.dashboard.selected().map(|d| d.id.as_str());
    let items: Vec<ListItem> = visible
        .iter()
        .map(|driver| {
            let marker = if Some(driver.id.as_str()) == selected_id {
                "● "
            } else {
                "  "
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(ACCENT)),
                    Span::styled(
                        driver.display_name().to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", driver.number_badge().unwrap_or_default()),
                        Style::default().fg(ACCENT),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {} · {}", driver.display_team(), driver.display_country()),
                    Style::default().fg(DIM),
                )),
            ])
        })
        .collect();

    let list = List::new(items).highlight_style(if focused {
        Style::default().bg(Color::Rgb(50, 50, 50)).fg(HIGHLIGHT)
    } else {
        Style::default().bg(Color::Rgb(30, 30, 30))
    });
    let mut state = ListState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(list, parts[1], &mut state);
}

/// Selected driver: stats grid and 3D scene tabs
fn render_profile(frame: &mut Frame, app: &App, area: Rect) {
    let profile = &app.dashboard.profile;
    let focused = app.focus == Pane::Profile;

    let Some(driver) = profile.driver() else {
        let block = pane_block(" Profile ".to_string(), focused);
        let hint = Paragraph::new(Span::styled(
            "Select a driver to see their profile.",
            Style::default().fg(DIM),
        ))
        .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let block = pane_block(format!(" {} ", driver.display_name()), focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Detail status sits above the summary-backed stats instead of hiding them
    let status = match profile.status() {
        // Drivers without an id never fetch a detail
        ViewStatus::Idle => None,
        status => status_text(status, ""),
    };
    let status_rows = u16::from(status.is_some());
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),           // Subtitle
            Constraint::Length(status_rows), // Detail status
            Constraint::Length(4),           // Stats
            Constraint::Length(1),           // Tabs
            Constraint::Min(1),              // Scene
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(profile.subtitle(), Style::default().fg(DIM))),
        parts[0],
    );
    if let Some(text) = status {
        frame.render_widget(Paragraph::new(text), parts[1]);
    }

    let stats: Vec<Line> = profile
        .stats()
        .into_iter()
        .map(|stat| {
            Line::from(vec![
                Span::styled(format!("{:<12}", stat.label), Style::default().fg(DIM)),
                Span::styled(stat.value, Style::default().add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(stats), parts[2]);

    let tabs: &TabbedPanel<ProfileTab> = profile.tabs();
    frame.render_widget(tab_bar(tabs), parts[3]);
    frame.render_widget(
        Paragraph::new(scene_lines(&profile.scene())).wrap(Wrap { trim: true }),
        parts[4],
    );
}

/// Upcoming weekends or recent results, per the active tab
fn render_schedule(frame: &mut Frame, app: &App, area: Rect) {
    let schedule = &app.dashboard.schedule;
    let block = pane_block(" Schedule ".to_string(), app.focus == Pane::Schedule);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let tabs: &TabbedPanel<ScheduleTab> = schedule.tabs();
    frame.render_widget(tab_bar(tabs), parts[0]);

    if let Some(text) = status_text(schedule.status(), "") {
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), parts[1]);
        return;
    }

    if schedule.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(SCHEDULE_EMPTY, Style::default().fg(DIM))),
            parts[1],
        );
        return;
    }

    let items: Vec<ListItem> = schedule
        .cards()
        .into_iter()
        .map(|card| {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled(card.name, Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {}", card.round), Style::default().fg(ACCENT)),
                ]),
                Line::from(Span::styled(
                    format!("{} · {}", card.dates, card.location),
                    Style::default().fg(DIM),
                )),
            ];
            if let Some((winner, time)) = card.result {
                lines.push(Line::from(format!("Winner: {} · {}", winner, time)));
            }
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();
    frame.render_widget(List::new(items), parts[1]);
}

/// Mode with status message or key hints, then the API base and footer
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode = match app.mode {
        Mode::Normal => Span::styled(" NORMAL ", Style::default().bg(SECONDARY).fg(Color::White)),
        Mode::Search => Span::styled(" SEARCH ", Style::default().bg(HIGHLIGHT).fg(Color::Black)),
    };

    let message = match (&app.status_message, app.mode) {
        (Some(msg), _) => Span::raw(format!(" {}", msg)),
        (None, Mode::Search) => Span::styled(
            " type to filter · Enter keep · Esc clear",
            Style::default().fg(DIM),
        ),
        (None, Mode::Normal) => Span::styled(
            concat!(
                " Tab focus · j/k move · Enter select · / search",
                " · h/l tabs · x deselect · ^R reload · q quit"
            ),
            Style::default().fg(DIM),
        ),
    };

    let hero = &app.dashboard.hero;
    let footer = Line::from(Span::styled(
        format!(" {}  {}  {}", app.api_base, hero.footer(), hero.note),
        Style::default().fg(SECONDARY),
    ));

    frame.render_widget(
        Paragraph::new(vec![Line::from(vec![mode, message]), footer]),
        area,
    );
}
