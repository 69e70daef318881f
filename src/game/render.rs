//! NEXUS Idle rendering — core display, upgrade list, stats view, log.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions;
use super::catalog::{UpgradeKind, CATALOG};
use super::logic::format_number;
use super::state::NexusState;

/// Core art — 3 lines, rotating ring. Shared across all screen sizes.
const CORE_ART: &[&[&str]] = &[
    &["╭─◇─◇─╮ ", "◇ ◈◈◈ ◇ ", "╰─◇─◇─╯ "],
    &["╭─◆─◇─╮ ", "◇ ◈◈◈ ◆ ", "╰─◇─◆─╯ "],
    &["╭─◇─◆─╮ ", "◆ ◈◈◈ ◇ ", "╰─◆─◇─╯ "],
    &["╭─◆─◆─╮ ", "◆ ◈◈◈ ◆ ", "╰─◆─◆─╯ "],
];

/// Core art — "pressed" state right after a click.
const CORE_CLICK_ART: &[&[&str]] = &[
    &["╭◆◆◆◆◆╮ ", "◆◆ ◈ ◆◆ ", "╰◆◆◆◆◆╯ "],
    &[" ╭─◆─╮  ", " ─◆◈◆─  ", " ╰─◆─╯  "],
];

/// Spinner characters for the production indicator.
const SPINNER: &[char] = &['◐', '◓', '◑', '◒'];

pub fn render(state: &NexusState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    // Log panel on the right when wide enough
    let (main_area, log_area) = if !is_narrow_layout(area.width) {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h_chunks[0], Some(h_chunks[1]))
    } else {
        (area, None)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // core display
            Constraint::Length(2), // tab bar (one row per tab)
            Constraint::Min(5),    // content
            Constraint::Length(1), // help line
        ])
        .split(main_area);

    render_core_display(state, f, chunks[0], click_state);
    render_tab_bar(state, f, chunks[1], click_state);
    if state.show_stats {
        render_stats(state, f, chunks[2]);
    } else {
        render_upgrades(state, f, chunks[2], click_state);
    }
    render_help(f, chunks[3]);

    if let Some(log_area) = log_area {
        render_log(state, f, log_area);
    }
}

fn render_core_display(
    state: &NexusState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let credits_str = format_number(state.credits.floor());
    let cps = state.passive_income_rate();
    let spinner_idx = (state.anim_frame / 3) as usize % SPINNER.len();
    let spinner = if cps > 0.0 { SPINNER[spinner_idx] } else { ' ' };

    let core_color = if state.click_flash > 0 {
        Color::White
    } else {
        Color::Magenta
    };
    let border_color = if state.purchase_flash > 0 {
        Color::White
    } else {
        Color::Magenta
    };
    let title = if state.purchase_flash > 0 {
        " ✦ NEXUS CORE ✦ "
    } else {
        " NEXUS CORE "
    };

    let core_art = if state.click_flash > 0 {
        CORE_CLICK_ART[state.click_flash as usize % CORE_CLICK_ART.len()]
    } else {
        CORE_ART[(state.anim_frame / 5) as usize % CORE_ART.len()]
    };

    let click_power = state.click_power();
    let click_label = if click_power > 1.0 {
        format!("[C]+{}", format_number(click_power))
    } else {
        "[C] ENGAGE".to_string()
    };
    let click_style = if state.click_flash > 0 {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };

    let mut lines: Vec<Line> = Vec::new();

    // Row 0: art + credits
    lines.push(Line::from(vec![
        Span::styled(core_art[0], Style::default().fg(core_color)),
        Span::styled(
            format!(" ◈ {credits_str}"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ]));

    // Row 1: art + credits per second
    lines.push(Line::from(vec![
        Span::styled(core_art[1], Style::default().fg(core_color)),
        Span::styled(
            format!(" {} {}/sec", spinner, format_number(cps)),
            Style::default().fg(Color::White),
        ),
    ]));

    // Row 2: art + click button
    lines.push(Line::from(vec![
        Span::styled(core_art[2], Style::default().fg(core_color)),
        Span::styled(" ", Style::default()),
        Span::styled(&click_label, click_style),
    ]));

    // Row 3: lifetime stats
    lines.push(Line::from(vec![
        Span::styled(
            format!(" 👆{}", state.click_count),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("  累計 {}", format_number(state.total_earned)),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title),
    );
    f.render_widget(widget, area);

    render_particles(state, f, area);

    // The whole core display is one big click target
    let mut cs = click_state.borrow_mut();
    cs.add_click_target(area, actions::CLICK_CORE);
}

/// Floating "+N" particles rising from the bottom of the core display.
fn render_particles(state: &NexusState, f: &mut Frame, area: Rect) {
    let center_x = area.x + area.width / 2;
    let base_y = area.y + area.height;

    for particle in &state.particles {
        let progress = 1.0 - (particle.life as f32 / particle.max_life as f32);
        let rise = (progress * 4.0) as u16;
        let y = base_y.saturating_sub(2 + rise);
        let x = (center_x as i16 + particle.col_offset).max(area.x as i16) as u16;

        let color = if particle.life > particle.max_life * 2 / 3 {
            Color::White
        } else if particle.life > particle.max_life / 3 {
            Color::Cyan
        } else {
            Color::DarkGray
        };

        if y > area.y && y < area.y + area.height && x < area.x + area.width {
            let text_len = particle.text.chars().count() as u16;
            let available = area.x + area.width - x;
            let display_width = text_len.min(available);
            if display_width > 0 {
                let particle_area = Rect::new(x, y, display_width, 1);
                let widget = Paragraph::new(Span::styled(
                    &particle.text,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ));
                f.render_widget(widget, particle_area);
            }
        }
    }
}

/// One row per tab, row-wide click targets.
fn render_tab_bar(
    state: &NexusState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let tab_style = |active: bool, base_color: Color| -> Style {
        if active {
            Style::default()
                .fg(Color::Black)
                .bg(base_color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(base_color)
        }
    };

    let tabs: [(&str, Style, u16); 2] = [
        (
            " ▸ 強化 ",
            tab_style(!state.show_stats, Color::Magenta),
            actions::TAB_UPGRADES,
        ),
        (
            " ▸ 統計 ",
            tab_style(state.show_stats, Color::Cyan),
            actions::TAB_STATS,
        ),
    ];

    let mut cs = click_state.borrow_mut();
    for (i, (label, style, action_id)) in tabs.iter().enumerate() {
        let row_y = area.y + i as u16;
        if row_y >= area.y + area.height {
            break;
        }
        let row_area = Rect::new(area.x, row_y, area.width, 1);
        f.render_widget(Paragraph::new(Line::from(Span::styled(*label, *style))), row_area);
        cs.add_click_target(row_area, *action_id);
    }
}

fn render_upgrades(
    state: &NexusState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();

    for (idx, def) in CATALOG.iter().enumerate() {
        let owned = state.owned_count(def.id);
        let cost = state.price_of(def.id);
        let affordable = state.credits >= cost;
        let action_id = actions::BUY_UPGRADE_BASE + idx as u16;

        let key_style = if affordable {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let name_style = if affordable {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let cost_style = if affordable {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Red)
        };

        let key_label = format!(" [{}] ", idx + 1);
        cl.push_clickable(
            Line::from(vec![
                Span::styled(key_label, key_style),
                Span::styled(format!("{} {}", def.icon, def.name), name_style),
                Span::styled(
                    if owned > 0 {
                        format!(" ×{owned}")
                    } else {
                        String::new()
                    },
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(format!("  {}◈", format_number(cost)), cost_style),
            ]),
            action_id,
        );
        cl.push_clickable(
            Line::from(Span::styled(
                format!("      {}", def.description),
                Style::default().fg(Color::DarkGray),
            )),
            action_id,
        );
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" 強化 [1-7]で購入 ");

    cl.register_targets(area, &mut click_state.borrow_mut(), 1, 1);
    let widget = Paragraph::new(cl.into_lines()).block(block);
    f.render_widget(widget, area);
}

fn render_stats(state: &NexusState, f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!(" ◈ 所持クレジット: {}", format_number(state.credits)),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" ◈ 累計獲得: {}", format_number(state.total_earned)),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!(" 👆 クリック回数: {}", state.click_count),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!(" ⚡ クリック威力: {}", format_number(state.click_power())),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!(" ◐ 毎秒収益: {}/sec", format_number(state.passive_income_rate())),
            Style::default().fg(Color::White),
        )),
        {
            let secs = state.anim_frame / crate::time::TICKS_PER_SEC;
            Line::from(Span::styled(
                format!(" ⏱ セッション: {}分{}秒", secs / 60, secs % 60),
                Style::default().fg(Color::DarkGray),
            ))
        },
        Line::from(""),
        Line::from(Span::styled(
            " ── 所有アップグレード ──",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let mut any_owned = false;
    for def in CATALOG {
        let owned = state.owned_count(def.id);
        if owned == 0 {
            continue;
        }
        any_owned = true;
        let contribution = match def.kind {
            UpgradeKind::Passive => {
                format!("{}/sec", format_number(owned as f64 * def.base_value))
            }
            UpgradeKind::Click => {
                format!("クリック+{}", format_number(owned as f64 * def.base_value))
            }
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} {} ×{}", def.icon, def.name, owned),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("  ({contribution})"),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    if !any_owned {
        lines.push(Line::from(Span::styled(
            " (まだ何も所有していない)",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" 統計 "),
    );
    f.render_widget(widget, area);
}

fn render_log(state: &NexusState, f: &mut Frame, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible_height);

    let log_lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            if entry.is_important {
                Line::from(Span::styled(
                    &entry.text,
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(&entry.text, Style::default().fg(Color::Gray)))
            }
        })
        .collect();

    let widget = Paragraph::new(log_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" ログ "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let help_text = " [C]クリック  [1-7]購入  [S]統計切替";
    let widget = Paragraph::new(Line::from(Span::styled(
        help_text,
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(widget, area);
}
