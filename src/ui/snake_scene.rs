//! Snake board and panels.
//!
//! The board uses half-block pixel rendering: pairs of vertical cells are
//! packed into one terminal row with `▀` (fg = top cell, bg = bottom cell),
//! which keeps cells roughly square.

use super::game_common::{
    create_game_layout, render_info_panel_frame, render_overlay, render_status_bar,
};
use arcade_snake::session::Notice;
use arcade_snake::snake::{DeathCause, FoodKind, Phase, PowerUpKind, SnakeGame};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const BORDER_H: char = '\u{2500}'; // ─
const BORDER_V: char = '\u{2502}'; // │
const BORDER_TL: char = '\u{250C}'; // ┌
const BORDER_TR: char = '\u{2510}'; // ┐
const BORDER_BL: char = '\u{2514}'; // └
const BORDER_BR: char = '\u{2518}'; // ┘
const HALF_TOP: char = '\u{2580}'; // ▀
const FULL_BLOCK: char = '\u{2588}'; // █

const HEAD_COLOR: Color = Color::Rgb(100, 255, 100);
const SHIELD_HEAD_COLOR: Color = Color::Rgb(120, 200, 255);
const BODY_BRIGHT: (f64, f64, f64) = (50.0, 220.0, 50.0);
const BODY_DIM: (f64, f64, f64) = (20.0, 80.0, 20.0);
const SHIELD_BRIGHT: (f64, f64, f64) = (60.0, 160.0, 230.0);
const SHIELD_DIM: (f64, f64, f64) = (20.0, 50.0, 90.0);
const FUN_FACT_FOOD_COLOR: Color = Color::Rgb(255, 215, 0);
const SPEED_BOOST_COLOR: Color = Color::Rgb(255, 240, 60);
const SHIELD_COLOR: Color = Color::Rgb(80, 160, 255);
const EMPTY_BG: Color = Color::Rgb(12, 12, 18);
const FRAME_COLOR: Color = Color::Rgb(80, 80, 80);

/// Render the whole game screen.
pub fn render_snake_scene(
    frame: &mut Frame,
    area: Rect,
    game: &SnakeGame,
    high_score: u32,
    notice: Option<&Notice>,
) {
    let layout = create_game_layout(frame, area, " Snake ", Color::LightGreen, 12, 24);

    render_play_field(frame, layout.content, game);
    render_status_bar_content(frame, layout.status_bar, game, notice);
    render_info_panel(frame, layout.info_panel, game, high_score);

    match &game.phase {
        Phase::NotStarted => render_title_overlay(frame, layout.content, high_score),
        Phase::Paused => render_overlay(
            frame,
            layout.content,
            Color::Yellow,
            "PAUSED",
            &[],
            "[Space] Resume",
        ),
        Phase::FunFact(interlude) => {
            let hint = match interlude.countdown() {
                Some(n) => format!("Resuming in {}...", n),
                None => String::new(),
            };
            let body = [Line::from(Span::styled(
                interlude.fact.as_str(),
                Style::default().fg(Color::White),
            ))];
            render_overlay(
                frame,
                layout.content,
                FUN_FACT_FOOD_COLOR,
                "Fun Fact!",
                &body,
                &hint,
            );
        }
        Phase::GameOver => render_game_over(frame, layout.content, game, high_score),
        Phase::Running => {}
    }
}

fn gradient(from: (f64, f64, f64), to: (f64, f64, f64), t: f64) -> Color {
    let mix = |a: f64, b: f64| (a * (1.0 - t) + b * t) as u8;
    Color::Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Body colour for segment `index`, fading toward the tail.
fn body_color(index: usize, snake_len: usize, shielded: bool) -> Color {
    let t = index as f64 / (snake_len - 1).max(1) as f64;
    if shielded {
        gradient(SHIELD_BRIGHT, SHIELD_DIM, t)
    } else {
        gradient(BODY_BRIGHT, BODY_DIM, t)
    }
}

fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::SpeedBoost => SPEED_BOOST_COLOR,
        PowerUpKind::Shield => SHIELD_COLOR,
    }
}

/// Cell colours in board coordinates, `None` for empty.
fn pixel_grid(game: &SnakeGame) -> Vec<Vec<Option<Color>>> {
    let size = game.grid_size().max(0) as usize;
    let mut pixels: Vec<Vec<Option<Color>>> = vec![vec![None; size]; size];
    let mut paint = |x: i16, y: i16, color: Color| {
        if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
            if x < size && y < size {
                pixels[y][x] = Some(color);
            }
        }
    };

    if let Some(food) = game.food {
        let color = match food.kind {
            FoodKind::Regular => {
                let pulse =
                    ((game.tick_count % 20) as f64 / 20.0 * std::f64::consts::PI * 2.0).sin();
                Color::Rgb(255, (80.0 + pulse * 30.0) as u8, (40.0 + pulse * 20.0) as u8)
            }
            FoodKind::FunFact => FUN_FACT_FOOD_COLOR,
        };
        paint(food.position.x, food.position.y, color);
    }

    if let Some(power_up) = game.power_up {
        paint(
            power_up.position.x,
            power_up.position.y,
            power_up_color(power_up.kind),
        );
    }

    let shielded = game.is_effect_active(PowerUpKind::Shield);
    let snake_len = game.snake.len();
    for (i, seg) in game.snake.iter().enumerate() {
        let color = match (i, shielded) {
            (0, false) => HEAD_COLOR,
            (0, true) => SHIELD_HEAD_COLOR,
            _ => body_color(i, snake_len, shielded),
        };
        paint(seg.x, seg.y, color);
    }

    pixels
}

fn render_play_field(frame: &mut Frame, area: Rect, game: &SnakeGame) {
    if area.height < 3 || area.width < 5 {
        return;
    }

    let pixels = pixel_grid(game);
    let size = pixels.len();
    let content_rows = size.div_ceil(2);
    let render_w = ((size + 2) as u16).min(area.width);
    let inner_w = render_w as usize - 2;

    let x_off = area.x + (area.width.saturating_sub(render_w)) / 2;
    let y_off = area.y;
    let frame_style = Style::default().fg(FRAME_COLOR);

    // Top border carries the level name.
    {
        let label = format!(" {} ", game.level_name());
        let pad_before = inner_w.saturating_sub(label.len()) / 2;
        let pad_after = inner_w.saturating_sub(pad_before + label.len());
        let line = Line::from(vec![
            Span::styled(
                format!("{}{}", BORDER_TL, BORDER_H.to_string().repeat(pad_before)),
                frame_style,
            ),
            Span::styled(label, Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{}{}", BORDER_H.to_string().repeat(pad_after), BORDER_TR),
                frame_style,
            ),
        ]);
        frame.render_widget(Paragraph::new(line), Rect::new(x_off, y_off, render_w, 1));
    }

    let empty_row: Vec<Option<Color>> = vec![None; size];
    for term_row in 0..content_rows {
        let top_row = pixels.get(term_row * 2).unwrap_or(&empty_row);
        let bot_row = pixels.get(term_row * 2 + 1).unwrap_or(&empty_row);

        let mut spans: Vec<Span> = vec![Span::styled(BORDER_V.to_string(), frame_style)];

        // Batch runs of identical colour pairs into one span.
        let mut cur_fg = Color::Reset;
        let mut cur_bg = Color::Reset;
        let mut cur_text = String::new();
        for (&top_c, &bot_c) in top_row.iter().zip(bot_row.iter()) {
            let fg = top_c.unwrap_or(EMPTY_BG);
            let bg = bot_c.unwrap_or(EMPTY_BG);
            if (fg != cur_fg || bg != cur_bg) && !cur_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut cur_text),
                    Style::default().fg(cur_fg).bg(cur_bg),
                ));
            }
            cur_fg = fg;
            cur_bg = bg;
            cur_text.push(HALF_TOP);
        }
        if !cur_text.is_empty() {
            spans.push(Span::styled(cur_text, Style::default().fg(cur_fg).bg(cur_bg)));
        }
        spans.push(Span::styled(BORDER_V.to_string(), frame_style));

        let row_y = y_off + 1 + term_row as u16;
        if row_y < area.y + area.height {
            frame.render_widget(
                Paragraph::new(Line::from(spans)),
                Rect::new(x_off, row_y, render_w, 1),
            );
        }
    }

    let bot_y = y_off + 1 + content_rows as u16;
    if bot_y < area.y + area.height {
        let s = format!(
            "{}{}{}",
            BORDER_BL,
            BORDER_H.to_string().repeat(inner_w),
            BORDER_BR
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(s, frame_style))),
            Rect::new(x_off, bot_y, render_w, 1),
        );
    }
}

fn render_status_bar_content(
    frame: &mut Frame,
    area: Rect,
    game: &SnakeGame,
    notice: Option<&Notice>,
) {
    type Controls = &'static [(&'static str, &'static str)];
    const READY: Controls = &[("[Space]", "Start"), ("[Q]", "Quit")];
    const PLAYING: Controls = &[("[Arrows/WASD]", "Move"), ("[Space]", "Pause"), ("[R]", "Reset")];
    const PAUSED: Controls = &[("[Space]", "Resume"), ("[R]", "Reset"), ("[Q]", "Quit")];
    const INTERLUDE: Controls = &[("[R]", "Reset"), ("[Q]", "Quit")];
    const OVER: Controls = &[("[Enter]", "Play Again"), ("[Q]", "Quit")];

    let (text, color, controls) = match &game.phase {
        Phase::NotStarted => ("Ready", Color::LightGreen, READY),
        Phase::Running => ("Slither!", Color::Green, PLAYING),
        Phase::Paused => ("Paused", Color::Yellow, PAUSED),
        Phase::FunFact(_) => ("Fun fact!", FUN_FACT_FOOD_COLOR, INTERLUDE),
        Phase::GameOver => ("Game over", Color::Red, OVER),
    };

    match notice {
        Some(notice) if game.phase == Phase::Running => {
            render_status_bar(frame, area, &notice.text, Color::Cyan, controls)
        }
        _ => render_status_bar(frame, area, text, color, controls),
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &SnakeGame, high_score: u32) {
    let inner = render_info_panel_frame(frame, area);
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                game.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best:  ", label),
            Span::styled(high_score.to_string(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled("Level: ", label),
            Span::styled(game.level_name(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Length: ", label),
            Span::styled(game.snake.len().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", game.tick_interval_ms()), value),
        ]),
        Line::from(""),
    ];

    let active = game.effects.active_kinds();
    if !active.is_empty() {
        lines.push(Line::from(Span::styled(
            "Effects:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for kind in active {
            let secs = game.effects.remaining_ms(kind).unwrap_or(0).div_ceil(1000);
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {FULL_BLOCK} "),
                    Style::default().fg(power_up_color(kind)),
                ),
                Span::styled(format!("{} {}s", kind.name(), secs), value),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Legend:",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    let legend = [
        (HEAD_COLOR, "Head"),
        (Color::Rgb(255, 80, 40), "Food"),
        (FUN_FACT_FOOD_COLOR, "Fun fact"),
        (SPEED_BOOST_COLOR, "Speed Boost"),
        (SHIELD_COLOR, "Shield"),
    ];
    for (color, name) in legend {
        lines.push(Line::from(vec![
            Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(color)),
            Span::styled(name, label),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_title_overlay(frame: &mut Frame, area: Rect, high_score: u32) {
    let body = [
        Line::from("Eat food to grow. Avoid the walls and your tail."),
        Line::from(Span::styled(
            "Gold food reveals a fun fact.",
            Style::default().fg(FUN_FACT_FOOD_COLOR),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Best score: {}", high_score),
            Style::default().fg(Color::Yellow),
        )),
    ];
    render_overlay(
        frame,
        area,
        Color::LightGreen,
        "SNAKE",
        &body,
        "[Space] Start  [Q] Quit",
    );
}

fn render_game_over(frame: &mut Frame, area: Rect, game: &SnakeGame, high_score: u32) {
    let mut body = Vec::new();
    if let Some(cause) = game.death_cause {
        body.push(Line::from(Span::styled(
            death_message(cause),
            Style::default().fg(Color::Gray),
        )));
    }
    body.push(Line::from(Span::styled(
        format!("Final score: {}", game.score),
        Style::default().fg(Color::White),
    )));
    if game.score > 0 && game.score >= high_score {
        body.push(Line::from(Span::styled(
            "New best score!",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        body.push(Line::from(Span::styled(
            format!("Best: {}", high_score),
            Style::default().fg(Color::DarkGray),
        )));
    }

    render_overlay(
        frame,
        area,
        Color::Red,
        "GAME OVER",
        &body,
        "[Enter] Play Again  [Q] Quit",
    );
}

/// Message for how a game ended.
fn death_message(cause: DeathCause) -> &'static str {
    match cause {
        DeathCause::Wall => "You hit the wall.",
        DeathCause::SelfCollision => "You ran into yourself.",
    }
}
