use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs},
    Frame,
};

use super::state::{AppState, Category, InputMode, Tab, GRID_COLUMNS};
use crate::{Product, ProductPhase, SearchFilter};

/// Rows taken by one product card, borders included.
const CARD_HEIGHT: u16 = 5;

const SEARCH_PLACEHOLDER: &str = "Shops, Product, Services, etc";

/// Main render function: header, active tab, help line, status bar and
/// bottom navigation.
pub fn render(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Rayna")
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    match state.tab {
        Tab::Home => render_home(f, chunks[1], state),
        Tab::NearbyShops => render_nearby_shops(f, chunks[1], state),
        Tab::QrCode | Tab::Community | Tab::Profile => render_placeholder(f, chunks[1], state.tab),
    }

    let help = Paragraph::new(help_text(state))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);

    render_status_bar(f, chunks[3], state);
    render_navigation(f, chunks[4], state);
}

fn help_text(state: &AppState) -> &'static str {
    match (state.tab, state.mode) {
        (Tab::Home, InputMode::Search) => "Type to filter | Enter/Esc: Done",
        (Tab::Home, InputMode::Browse) => {
            "/: Search | Arrows: Move | c: Category | r: Reload | Esc: Clear | Tab: Next | q: Quit"
        }
        (Tab::NearbyShops, _) => "Up/Down: Select | Tab: Next | q: Quit",
        _ => "Tab: Next | 1-5: Jump | q: Quit",
    }
}

/// Render the home tab: search bar, categories, and the product grid.
fn render_home(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    render_search_bar(f, chunks[0], state);
    render_categories(f, chunks[1], state.category);

    let heading = Paragraph::new("Top Reviews")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(heading, chunks[2]);

    let snapshot = state.products.current();
    match snapshot.phase() {
        ProductPhase::Loading => {
            let loading = Paragraph::new("Loading products...")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(loading, chunks[3]);
        }
        ProductPhase::Failed(error) => {
            let failed = Paragraph::new(format!("Error: {error}"))
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(failed, chunks[3]);
        }
        ProductPhase::Ready(products) => render_product_grid(f, chunks[3], state, products),
    }
}

fn render_search_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let editing = state.mode == InputMode::Search;
    let border = if editing { Color::Yellow } else { Color::Gray };
    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let input = if state.search_query.is_empty() && !editing {
        Paragraph::new(SEARCH_PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(state.search_query.as_str()).style(Style::default().fg(Color::White))
    };
    f.render_widget(input.block(block), area);

    if editing {
        let inner_width = area.width.saturating_sub(2);
        let column = u16::try_from(state.search_cursor_column())
            .unwrap_or(u16::MAX)
            .min(inner_width.saturating_sub(1));
        let cursor_x = area.x + 1 + column;
        let cursor_y = area.y + 1;
        f.set_cursor_position((cursor_x, cursor_y));
    }
}

fn render_categories(f: &mut Frame, area: Rect, selected: Category) {
    let mut spans = Vec::new();
    for (i, category) in Category::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("     "));
        }
        let style = if *category == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        spans.push(Span::styled(format!(" {} ", category.label()), style));
    }

    let section = Paragraph::new(vec![
        Line::from(Span::styled(
            "Select the Category and Give Us Your Review!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(spans),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    f.render_widget(section, area);
}

/// Two-column grid of product cards, scrolled to keep the selection visible.
fn render_product_grid(f: &mut Frame, area: Rect, state: &AppState, products: &[Product]) {
    let filter = SearchFilter::new(&state.search_query);
    let visible: Vec<&Product> = filter.iter(products).collect();

    if visible.is_empty() {
        let message = if products.is_empty() {
            "No products available".to_string()
        } else {
            format!("No products match '{}'", state.search_query)
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    }

    let visible_rows = ((area.height / CARD_HEIGHT) as usize).max(1);
    let selected = state.selected_product.min(visible.len() - 1);
    let first_row = (selected / GRID_COLUMNS).saturating_sub(visible_rows - 1);

    for (offset, row) in visible
        .chunks(GRID_COLUMNS)
        .skip(first_row)
        .take(visible_rows)
        .enumerate()
    {
        let y = area.y + offset as u16 * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(area.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let row_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(row_area);

        for (column, product) in row.iter().enumerate() {
            let index = (first_row + offset) * GRID_COLUMNS + column;
            render_product_card(f, columns[column], product, index == selected);
        }
    }
}

fn render_product_card(f: &mut Frame, area: Rect, product: &Product, is_selected: bool) {
    let border = if is_selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(
            format!(" {} ", product.name),
            Style::default().add_modifier(Modifier::BOLD),
        ));

    let card = Paragraph::new(vec![
        Line::from(product.description.as_str()),
        Line::from(Span::styled(
            product.display_price(),
            Style::default().fg(Color::Green),
        )),
        Line::from(Span::styled(
            product.picture_url.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(block);
    f.render_widget(card, area);
}

/// Render the nearby shops table.
fn render_nearby_shops(f: &mut Frame, area: Rect, state: &AppState) {
    let rows: Vec<Row> = state
        .locations
        .iter()
        .enumerate()
        .map(|(i, l)| {
            let style = if i == state.selected_location {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(l.name.clone()),
                Cell::from(l.kind.clone()),
                Cell::from(l.address.clone()),
                Cell::from(format!("{:.4}, {:.4}", l.coordinates.0, l.coordinates.1)),
                Cell::from(l.description.clone()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(18),
            Constraint::Length(8),
            Constraint::Length(22),
            Constraint::Length(18),
            Constraint::Min(20),
        ],
    )
    .header(
        Row::new(vec!["Name", "Type", "Address", "Coordinates", "Description"])
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1),
    )
    .block(Block::default().borders(Borders::ALL).title(" Nearby Shops "));
    f.render_widget(table, area);
}

fn render_placeholder(f: &mut Frame, area: Rect, tab: Tab) {
    let placeholder = Paragraph::new(format!("{} is not available yet", tab.label()))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", tab.label())),
        );
    f.render_widget(placeholder, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let snapshot = state.products.current();
    let (status_text, style) = match snapshot.phase() {
        ProductPhase::Failed(error) => (format!(" Error: {error}"), Style::default().fg(Color::Red)),
        ProductPhase::Loading => (
            format!(" Loading from: {}", state.loader.source().describe()),
            Style::default().fg(Color::Yellow),
        ),
        ProductPhase::Ready(products) => (
            format!(
                " Products from: {} | {} of {} shown",
                state.loader.source().describe(),
                state.visible_products().len(),
                products.len()
            ),
            Style::default().fg(Color::Green),
        ),
    };

    let status = Paragraph::new(status_text)
        .style(style)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}

fn render_navigation(f: &mut Frame, area: Rect, state: &AppState) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.label())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|")
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(tabs, area);
}
