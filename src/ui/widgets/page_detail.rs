use crate::console::ConsoleApp;
use crate::tracker::Page;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

pub fn draw_page_detail(frame: &mut Frame, area: Rect, app: &ConsoleApp) {
    let title = app
        .tracker
        .current_page()
        .map(|p| format!(" {} ", p.label))
        .unwrap_or_else(|| " Wizard ".to_string());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.primary_style())
        .title(title);

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(Span::styled(
        app.config.general.subtitle.as_str(),
        app.theme.muted_style(),
    ))];
    lines.push(Line::from(""));

    match app.tracker.current_page() {
        Some(page) => lines.extend(page_lines(app, page)),
        None => lines.push(Line::from(Span::styled("No page in view", app.theme.muted_style()))),
    }

    lines.push(Line::from(""));
    lines.extend(submit_lines(app));

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        Rect::new(
            inner.x + 1,
            inner.y,
            inner.width.saturating_sub(2),
            inner.height,
        ),
    );
}

fn page_lines<'a>(app: &'a ConsoleApp, page: &'a Page) -> Vec<Line<'a>> {
    let status = page.status();
    let flag = |name: &'static str, value: bool| {
        Line::from(vec![
            Span::styled(format!("  {name:<18}"), app.theme.muted_style()),
            Span::styled(if value { "yes" } else { "no" }, app.theme.style()),
        ])
    };

    vec![
        Line::from(vec![
            Span::styled("  Key               ", app.theme.muted_style()),
            Span::styled(page.key.as_str(), app.theme.secondary_style()),
        ]),
        Line::from(vec![
            Span::styled("  Status            ", app.theme.muted_style()),
            Span::styled(
                format!("{} {}", status.marker(), status.display_name()),
                app.theme.status_style(status).add_modifier(Modifier::BOLD),
            ),
        ]),
        flag("Required", page.required),
        flag("Done", page.done),
        flag("Dirty", page.dirty),
        flag("Blocked", page.blocked),
        flag("Visited", page.visited),
        flag("Clean on view", page.mark_clean_on_view),
        flag("Complete on view", page.mark_complete_on_view),
    ]
}

fn submit_lines(app: &ConsoleApp) -> Vec<Line<'_>> {
    let summary = app.tracker.summary();
    let mut lines = vec![Line::from(Span::styled(summary.to_string(), app.theme.style()))];

    if !app.can_show_submit() {
        let unseen = summary.rendered - summary.visited;
        lines.push(Line::from(Span::styled(
            format!("Visit {unseen} more page(s) to submit"),
            app.theme.muted_style(),
        )));
        return lines;
    }

    let button = if summary.complete {
        Span::styled(
            "[ Submit ]",
            app.theme.success_style().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
    } else {
        Span::styled("[ Submit ]", app.theme.muted_style())
    };
    lines.push(Line::from(vec![button, Span::styled("  Enter", app.theme.muted_style())]));
    lines
}
