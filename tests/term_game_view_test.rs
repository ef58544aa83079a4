use blockfall::core::{BoardConfig, Game, Grid, ScriptedSource, ViewSnapshot};
use blockfall::term::{AnchorY, Frame, FrameBuffer, GameView, Viewport};

/// T first, then O, repeating
fn game() -> Game<ScriptedSource> {
    Game::with_rng(BoardConfig::default(), ScriptedSource::new(vec![5, 3])).unwrap()
}

fn render(grid: &Grid, view: &ViewSnapshot, paused: bool, vp: Viewport) -> FrameBuffer {
    render_with_bonus(grid, view, paused, None, vp)
}

fn render_with_bonus(
    grid: &Grid,
    view: &ViewSnapshot,
    paused: bool,
    bonus: Option<u32>,
    vp: Viewport,
) -> FrameBuffer {
    GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(
            Frame {
                grid,
                view,
                paused,
                bonus,
            },
            vp,
        )
}

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_around_visible_rows() {
    let game = game();
    // 10 cells * 2 columns + border = 22 wide; 23 visible rows + border = 25 tall
    let fb = render(&game.grid(), &game.view(), false, Viewport::new(22, 25));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 24).unwrap().ch, '└');
    assert_eq!(fb.get(21, 24).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut game = game();
    game.board_mut().grid_mut().set(0, 24, 1);
    let fb = render(&game.grid(), &game.view(), false, Viewport::new(22, 25));

    // Grid row 24 is the last visible row: screen row 1 + (24 - 2)
    let y = 23;
    assert_eq!(fb.get(1, y).unwrap().ch, '█');
    assert_eq!(fb.get(2, y).unwrap().ch, '█');
    assert_eq!(fb.get(3, y).unwrap().ch, '·');
}

#[test]
fn term_view_hides_the_buffer_rows() {
    let game = game();
    // The spawned T sits in rows 0-1, entirely hidden
    let fb = render(&game.grid(), &game.view(), false, Viewport::new(22, 25));
    for y in 1..24 {
        let row = fb.row_text(y);
        let blocks = row.chars().filter(|&c| c == '█').count();
        let ghosts = row.chars().filter(|&c| c == '░').count();
        assert_eq!(blocks, 0, "row {}", y);
        // The ghost is drawn in the bottom two rows only
        if y < 22 {
            assert_eq!(ghosts, 0, "row {}", y);
        }
    }
    // Ghost T at grid rows 23-24: one cell, then three cells
    assert_eq!(fb.row_text(22).chars().filter(|&c| c == '░').count(), 2);
    assert_eq!(fb.row_text(23).chars().filter(|&c| c == '░').count(), 6);
}

#[test]
fn term_view_draws_active_piece_once_visible() {
    let mut game = game();
    for _ in 0..3 {
        assert!(game.board_mut().move_down());
    }
    let fb = render(&game.grid(), &game.view(), false, Viewport::new(22, 25));
    // T at y = 3: top cell on grid row 3 (screen row 2), column 5
    assert_eq!(fb.get(1 + 5 * 2, 2).unwrap().ch, '█');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut game = game();
    game.hold();
    let fb = render(&game.grid(), &game.view(), false, Viewport::new(60, 30));
    let all = screen_text(&fb);
    assert!(all.contains("SCORE"));
    assert!(all.contains("LEVEL"));
    assert!(all.contains("LINES"));
    assert!(all.contains("HOLD"));
    assert!(all.contains("NEXT"));
}

#[test]
fn term_view_skips_panel_on_narrow_viewports() {
    let game = game();
    let fb = render(&game.grid(), &game.view(), false, Viewport::new(22, 25));
    assert!(!screen_text(&fb).contains("SCORE"));
}

#[test]
fn term_view_shows_overlays() {
    let mut game = game();
    let fb = render(&game.grid(), &game.view(), true, Viewport::new(40, 30));
    assert!(screen_text(&fb).contains("PAUSED"));

    game.board_mut().grid_mut().set(0, 2, 1);
    game.board_mut().lock_and_advance();
    let fb = render(&game.grid(), &game.view(), false, Viewport::new(40, 30));
    assert!(screen_text(&fb).contains("GAME OVER"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let game = game();
    let grid = game.grid();
    let view = game.view();
    let fb = GameView::default().render(
        Frame {
            grid: &grid,
            view: &view,
            paused: false,
            bonus: None,
        },
        Viewport::new(22, 35),
    );
    // start_y = (35 - 25) / 2 = 5
    assert_eq!(fb.get(0, 5).unwrap().ch, '┌');
}

#[test]
fn term_view_clips_a_grid_wider_than_the_terminal() {
    let game = game();
    let wide = Grid::new(40_000, 25).unwrap();
    let fb = render(&wide, &game.view(), false, Viewport::new(80, 24));
    assert_eq!(fb.width(), 80);
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    // The right edge of the border is off screen
    assert_eq!(fb.get(79, 0).unwrap().ch, '─');
}

#[test]
fn term_view_shows_clear_bonus_under_the_score() {
    let game = game();
    let grid = game.grid();
    let view = game.view();
    let fb = render_with_bonus(&grid, &view, false, Some(200), Viewport::new(60, 30));
    // Well centered at x = 19, panel two columns past its 22-wide border
    let text: String = (43..47).map(|x| fb.get(x, 2).unwrap().ch).collect();
    assert_eq!(text, "+200");

    let fb = render(&grid, &view, false, Viewport::new(60, 30));
    assert!(!screen_text(&fb).contains('+'));
}
