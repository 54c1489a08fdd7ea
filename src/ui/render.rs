use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::braille::{BrailleCanvas, GLYPH_HEIGHT};
use crate::game::state::{
    BALL_RADIUS, FIELD_HEIGHT, FIELD_WIDTH, PADDLE_HEIGHT, PADDLE_WIDTH,
};
use crate::game::{GameState, Side};

const GUIDE_COLOR: Color = Color::Rgb(50, 50, 50);
const LEFT_COLOR: Color = Color::Red;
const RIGHT_COLOR: Color = Color::Blue;

// Bottom row holds the controls hint
const UI_FOOTER_ROWS: u16 = 1;

/// Presentation settings that are not part of the game state
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    pub background: Color,
    pub show_hint: bool,
    pub music_playing: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            background: Color::Rgb(0, 0, 0),
            show_hint: true,
            music_playing: false,
        }
    }
}

/// Maps field units onto canvas pixels
struct Scale {
    x: f32,
    y: f32,
}

impl Scale {
    fn px(&self, field_x: f32) -> usize {
        (field_x * self.x).max(0.0) as usize
    }

    fn py(&self, field_y: f32) -> usize {
        (field_y * self.y).max(0.0) as usize
    }
}

pub fn render(frame: &mut Frame, state: &GameState, view: &ViewOptions) {
    let area = frame.area();

    let bg = Block::default().style(Style::default().bg(view.background));
    frame.render_widget(bg, area);

    let field_area = Rect {
        height: area.height.saturating_sub(UI_FOOTER_ROWS),
        ..area
    };
    if field_area.width == 0 || field_area.height == 0 {
        return;
    }

    let mut canvas = BrailleCanvas::new(field_area.width as usize, field_area.height as usize);
    draw_field(&mut canvas, state);
    render_braille_canvas(frame, &canvas, field_area, view.background);

    if area.height > UI_FOOTER_ROWS {
        draw_footer(frame, area, view);
    }
}

/// Rasterise the whole play field: guides, paddles, ball and scores
pub fn draw_field(canvas: &mut BrailleCanvas, state: &GameState) {
    let scale = Scale {
        x: canvas.pixel_width() as f32 / FIELD_WIDTH,
        y: canvas.pixel_height() as f32 / FIELD_HEIGHT,
    };

    // Paddle planes and the centre line
    canvas.vertical_line(scale.px(PADDLE_WIDTH), GUIDE_COLOR);
    canvas.vertical_line(scale.px(FIELD_WIDTH / 2.0), Color::White);
    canvas.vertical_line(scale.px(FIELD_WIDTH - PADDLE_WIDTH), GUIDE_COLOR);

    let circle_radius = BALL_RADIUS * 2.5;
    canvas.stroke_ellipse(
        FIELD_WIDTH / 2.0 * scale.x,
        FIELD_HEIGHT / 2.0 * scale.y,
        circle_radius * scale.x,
        circle_radius * scale.y,
        Color::White,
    );

    draw_paddle(canvas, &scale, state, Side::Left);
    draw_paddle(canvas, &scale, state, Side::Right);

    canvas.fill_ellipse(
        state.ball.x * scale.x,
        state.ball.y * scale.y,
        BALL_RADIUS * scale.x,
        BALL_RADIUS * scale.y,
        Color::White,
    );

    draw_scores(canvas, &scale, state);
}

fn draw_paddle(canvas: &mut BrailleCanvas, scale: &Scale, state: &GameState, side: Side) {
    let (x, color) = match side {
        Side::Left => (0.0, LEFT_COLOR),
        Side::Right => (FIELD_WIDTH - PADDLE_WIDTH, RIGHT_COLOR),
    };
    let paddle = state.paddle(side);

    let left = scale.px(x);
    let top = scale.py(paddle.y);
    let width = (scale.px(x + PADDLE_WIDTH) - left).max(1);
    let height = (scale.py(paddle.y + PADDLE_HEIGHT) - top).max(1);

    canvas.fill_rect(left, top, width, height, color);
}

fn draw_scores(canvas: &mut BrailleCanvas, scale: &Scale, state: &GameState) {
    // Digits roughly a tenth of the field tall
    let glyph_scale = ((canvas.pixel_height() / 10) / GLYPH_HEIGHT).max(1);
    let y = scale.py(FIELD_HEIGHT * 0.08);

    canvas.draw_number(
        state.score(Side::Left),
        scale.px(FIELD_WIDTH * 0.25),
        y,
        glyph_scale,
        LEFT_COLOR,
    );
    canvas.draw_number(
        state.score(Side::Right),
        scale.px(FIELD_WIDTH * 0.75),
        y,
        glyph_scale,
        RIGHT_COLOR,
    );
}

fn render_braille_canvas(frame: &mut Frame, canvas: &BrailleCanvas, area: Rect, background: Color) {
    let lines: Vec<Line> = (0..canvas.height())
        .map(|y| {
            // Merge neighbouring cells of the same colour into one span
            let mut spans: Vec<Span> = Vec::new();
            let mut run = String::new();
            let mut run_color = canvas.cell_color(0, y);

            for x in 0..canvas.width() {
                let color = canvas.cell_color(x, y);
                if color != run_color && !run.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut run),
                        Style::default().fg(run_color),
                    ));
                }
                run_color = color;
                run.push(canvas.to_char(x, y));
            }
            if !run.is_empty() {
                spans.push(Span::styled(run, Style::default().fg(run_color)));
            }
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(background));
    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, view: &ViewOptions) {
    let mut text = String::new();
    if view.show_hint {
        text.push_str("W/S: Left  ↑/↓: Right  Esc: Quit");
    }
    if view.music_playing {
        if !text.is_empty() {
            text.push_str("  ");
        }
        text.push('♪');
    }

    let footer = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray).bg(view.background))
        .alignment(Alignment::Center);

    let footer_area = Rect {
        x: area.x,
        y: area.y + area.height - UI_FOOTER_ROWS,
        width: area.width,
        height: UI_FOOTER_ROWS,
    };

    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &GameState, view: &ViewOptions, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, state, view)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_render_draws_field_and_hint() {
        let state = GameState::new();
        let rows = draw(&state, &ViewOptions::default(), 80, 25);

        assert_eq!(rows.len(), 25);
        assert!(rows[24].contains("Esc: Quit"));
        assert!(!rows[24].contains('♪'));
        // Some braille dots are lit somewhere in the field
        assert!(rows[..24]
            .iter()
            .any(|row| row.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c))));
    }

    #[test]
    fn test_footer_shows_music_without_hint() {
        let state = GameState::new();
        let view = ViewOptions {
            show_hint: false,
            music_playing: true,
            ..Default::default()
        };
        let rows = draw(&state, &view, 40, 10);

        assert!(rows[9].contains('♪'));
        assert!(!rows[9].contains("Quit"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let state = GameState::new();
        draw(&state, &ViewOptions::default(), 1, 1);
        draw(&state, &ViewOptions::default(), 3, 2);
    }

    #[test]
    fn test_paddles_use_side_colors() {
        let state = GameState::new();
        let mut canvas = BrailleCanvas::new(64, 24);
        draw_field(&mut canvas, &state);

        // Paddles are vertically centred; row 12 crosses both
        assert_eq!(canvas.cell_color(0, 12), LEFT_COLOR);
        assert_eq!(canvas.cell_color(63, 12), RIGHT_COLOR);
    }

    #[test]
    fn test_ball_is_drawn_where_it_is() {
        let mut state = GameState::new();
        state.ball.x = 100.0;
        state.ball.y = 400.0;
        let mut canvas = BrailleCanvas::new(64, 24);
        draw_field(&mut canvas, &state);

        // 100/640 * 128 px = 20 px -> cell 10; 400/480 * 96 px = 80 px -> cell 20
        assert_eq!(canvas.to_char(10, 20), '⣿');
        assert_eq!(canvas.cell_color(10, 20), Color::White);
    }
}
