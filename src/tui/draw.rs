use crate::tui::app::App;
use crate::view::diagram::Diagram;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::Color::White;
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as Segment};
use ratatui::widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table};

pub fn draw_app(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(app.diagram().annotations.len() as u16 + 2),
        ])
        .split(frame.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    frame.render_widget(build_header(app), chunks[0]);
    frame.render_widget(build_canvas(app.diagram()), body[0]);
    frame.render_widget(build_edge_table(app), body[1]);
    frame.render_widget(build_annotations(app.diagram()), chunks[2]);
}

fn flow_color(flow: f64, max_flow: f64) -> Color {
    if flow <= 0.0 || max_flow <= 0.0 {
        Color::DarkGray
    } else if flow / max_flow < 0.5 {
        Color::Green
    } else if flow / max_flow < 1.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn build_header<'a>(app: &App) -> Block<'a> {
    Block::new()
        .title(Line::from(vec![
            Span::raw(" Trafficflow ").style(Style::default().bold().cyan()),
            Span::raw("|").style(Style::default().add_modifier(Modifier::DIM)),
            Span::raw(format!(" {} ", app.selected().label())).style(Style::default().bold()),
            Span::raw("(Tab to switch, q to quit) ").style(Style::default().add_modifier(Modifier::DIM)),
        ]))
        .title_alignment(Alignment::Center)
}

fn build_canvas(diagram: &Diagram) -> Canvas<'_, impl Fn(&mut ratatui::widgets::canvas::Context<'_>) + '_> {
    let max_flow = diagram.edges.iter().map(|e| e.flow).fold(0.0, f64::max);
    let (width, height) = (diagram.width(), diagram.height());

    Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(vec![
                    Span::from(format!(" {} ", diagram.title)).style(Style::default().bold()),
                ])),
        )
        .marker(Marker::Braille)
        .x_bounds([-0.5, width + 0.5])
        .y_bounds([-height - 0.5, height + 0.5])
        .paint(move |ctx| {
            for edge in &diagram.edges {
                let (from, to) = (&diagram.nodes[edge.from], &diagram.nodes[edge.to]);
                ctx.draw(&Segment {
                    x1: from.x,
                    y1: from.y,
                    x2: to.x,
                    y2: to.y,
                    color: flow_color(edge.flow, max_flow),
                });
            }
            ctx.layer();
            for edge in &diagram.edges {
                let (from, to) = (&diagram.nodes[edge.from], &diagram.nodes[edge.to]);
                ctx.print(
                    (from.x + to.x) / 2.0,
                    (from.y + to.y) / 2.0,
                    Span::from(edge.label.clone()).style(Style::default().add_modifier(Modifier::DIM)),
                );
            }
            for node in &diagram.nodes {
                let style = if node.endpoint {
                    Style::default().bold().green()
                } else {
                    Style::default().bold()
                };
                ctx.print(node.x, node.y, Span::from(node.label.clone()).style(style));
            }
        })
}

fn build_edge_table<'a>(app: &App) -> Table<'a> {
    let summary = app.analysis().summary(app.selected());
    let max_flow = summary.edges().iter().map(|e| e.flow()).fold(0.0, f64::max);

    Table::new(
        summary
            .edges()
            .iter()
            .map(|edge| {
                Row::new(vec![
                    Cell::from(format!("{} -> {}", edge.from(), edge.to())),
                    Cell::from(format!("{:>8.2}", edge.flow()))
                        .style(Style::default().fg(flow_color(edge.flow(), max_flow))),
                    Cell::from(format!("{:>8.2}", edge.cost_per_vehicle())),
                    Cell::from(format!("{:>10.2}", edge.total_cost())),
                ])
            })
            .collect::<Vec<_>>(),
        [
            Constraint::Min(10),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(11),
        ],
    )
    .header(
        Row::new([
            Cell::from("Edge"),
            Cell::from("    Flow"),
            Cell::from("Cost/veh"),
            Cell::from("     Total"),
        ])
        .style(Style::default().bg(Color::DarkGray).fg(White)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(vec![
                Span::from(" Edges ").style(Style::default().bold()),
            ]))
            .padding(Padding::horizontal(1)),
    )
}

fn build_annotations(diagram: &Diagram) -> Paragraph<'_> {
    Paragraph::new(
        diagram
            .annotations
            .iter()
            .map(|a| Line::from(a.as_str()))
            .collect::<Vec<_>>(),
    )
    .block(Block::default().borders(Borders::ALL).padding(Padding::horizontal(1)))
}
