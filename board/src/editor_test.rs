use super::*;
use crate::model::DEFAULT_TEXT;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// --- Construction ---

#[test]
fn new_editor_has_default_transient_state() {
    let editor = Editor::new();
    assert_eq!(editor.tool, Tool::Select);
    assert_eq!(editor.gesture, Gesture::Idle);
    assert_eq!(editor.color, DEFAULT_LINE_COLOR);
    assert!(approx_eq(editor.brush_size, DEFAULT_STROKE_WIDTH));
    assert_eq!(editor.history.len(), 1);
    assert!(!editor.history.can_undo());
}

#[test]
fn with_board_seeds_history_from_that_board() {
    let mut board = BoardState::default();
    board.ball = pt(100.0, 100.0);
    let mut editor = Editor::with_board(board);

    editor.drag_player(0, pt(200.0, 200.0));
    assert!(editor.undo());
    assert!(approx_eq(editor.board.ball.x, 100.0));
}

// --- Formation and orientation ---

#[test]
fn select_formation_loads_at_current_orientation() {
    let mut editor = Editor::new();
    editor.set_orientation(Orientation::Vertical);
    editor.select_formation(Formation::F442);

    assert_eq!(editor.board.ui.selected_formation, Formation::F442);
    let seeds = Formation::F442
        .seed_positions(Orientation::Vertical)
        .unwrap();
    for (player, seed) in editor.board.players.iter().zip(&seeds) {
        assert!(approx_eq(player.x, seed.x));
        assert!(approx_eq(player.y, seed.y));
    }
    // Vertical seeds keep the keeper in front of the home goal in
    // logical space.
    assert!(approx_eq(editor.board.players[0].x, 850.0));
}

#[test]
fn select_formation_custom_is_noop() {
    let mut editor = Editor::new();
    editor.drag_player(0, pt(400.0, 100.0));
    editor.select_formation(Formation::Custom);
    assert!(approx_eq(editor.board.players[0].x, 400.0));
}

#[test]
fn set_orientation_keeps_logical_positions() {
    let mut editor = Editor::new();
    editor.drag_player(5, pt(333.0, 111.0));
    editor.set_orientation(Orientation::Vertical);

    let player = editor.board.players.iter().find(|p| p.id == 5).unwrap();
    assert!(approx_eq(player.x, 333.0));
    assert!(approx_eq(player.y, 111.0));
}

#[test]
fn set_orientation_reseeds_empty_opponents_when_shown() {
    let mut editor = Editor::new();
    editor.set_show_opponents(true);
    editor.board.opponents.clear();

    editor.set_orientation(Orientation::Vertical);
    assert_eq!(editor.board.opponents.len(), 11);
    // Opposing keeper defends the far goal in logical space.
    assert!(approx_eq(editor.board.opponents[0].x, 50.0));
}

#[test]
fn set_orientation_leaves_populated_opponents_alone() {
    let mut editor = Editor::new();
    editor.set_show_opponents(true);
    editor.drag_opponent(0, pt(400.0, 100.0));

    editor.set_orientation(Orientation::Vertical);
    assert_eq!(editor.board.opponents.len(), 11);
    assert!(approx_eq(editor.board.opponents[0].x, 400.0));
}

#[test]
fn set_orientation_skips_reseed_when_toggle_off() {
    let mut editor = Editor::new();
    editor.set_orientation(Orientation::Vertical);
    assert!(editor.board.opponents.is_empty());
}

// --- Drags ---

#[test]
fn drag_player_moves_and_commits() {
    let mut editor = Editor::new();
    editor.drag_player(3, pt(250.0, 300.0));

    let player = editor.board.players.iter().find(|p| p.id == 3).unwrap();
    assert!(approx_eq(player.x, 250.0));
    assert_eq!(editor.history.len(), 2);
    assert!(editor.history.can_undo());
}

#[test]
fn drag_player_unknown_id_is_noop() {
    let mut editor = Editor::new();
    editor.drag_player(99, pt(250.0, 300.0));
    assert_eq!(editor.history.len(), 1);
}

#[test]
fn drag_within_tolerance_keeps_catalog_formation() {
    let mut editor = Editor::new();
    let anchor = editor.board.players[0].initial_pos();
    editor.drag_player(0, pt(anchor.x + 3.0, anchor.y - 3.0));
    assert_eq!(editor.board.ui.selected_formation, Formation::F433);
}

#[test]
fn drag_beyond_tolerance_flips_to_custom() {
    let mut editor = Editor::new();
    let anchor = editor.board.players[0].initial_pos();
    editor.drag_player(0, pt(anchor.x + 10.0, anchor.y));
    assert_eq!(editor.board.ui.selected_formation, Formation::Custom);
}

#[test]
fn custom_flip_is_one_way_until_next_load() {
    let mut editor = Editor::new();
    let anchor = editor.board.players[0].initial_pos();
    editor.drag_player(0, pt(anchor.x + 10.0, anchor.y));
    editor.drag_player(0, anchor);
    assert_eq!(editor.board.ui.selected_formation, Formation::Custom);

    editor.select_formation(Formation::F433);
    assert_eq!(editor.board.ui.selected_formation, Formation::F433);
}

#[test]
fn drag_opponent_does_not_commit_or_flip() {
    let mut editor = Editor::new();
    editor.set_show_opponents(true);
    editor.drag_opponent(2, pt(500.0, 50.0));

    let opponent = editor.board.opponents.iter().find(|p| p.id == 2).unwrap();
    assert!(approx_eq(opponent.x, 500.0));
    assert_eq!(editor.history.len(), 1);
    assert_eq!(editor.board.ui.selected_formation, Formation::F433);
}

#[test]
fn drag_ball_does_not_commit() {
    let mut editor = Editor::new();
    editor.drag_ball(pt(700.0, 100.0));
    assert!(approx_eq(editor.board.ball.x, 700.0));
    assert_eq!(editor.history.len(), 1);
}

// --- Drawing gestures ---

#[test]
fn start_segment_annotation_seeds_both_endpoints() {
    let mut editor = Editor::new();
    editor.start_annotation(DrawMode::Arrow, pt(10.0, 20.0));

    assert_eq!(editor.gesture, Gesture::Drawing);
    let line = editor.board.lines.last().unwrap();
    assert_eq!(line.points.len(), 2);
    assert!(approx_eq(line.points[0].x, 10.0));
    assert!(approx_eq(line.points[1].x, 10.0));
}

#[test]
fn start_stroke_annotation_seeds_single_point() {
    let mut editor = Editor::new();
    editor.start_annotation(DrawMode::Freehand, pt(10.0, 20.0));
    assert_eq!(editor.board.lines.last().unwrap().points.len(), 1);
}

#[test]
fn start_annotation_while_drawing_is_noop() {
    let mut editor = Editor::new();
    editor.start_annotation(DrawMode::Line, pt(0.0, 0.0));
    editor.start_annotation(DrawMode::Line, pt(5.0, 5.0));
    assert_eq!(editor.board.lines.len(), 1);
}

#[test]
fn extend_segment_replaces_endpoint() {
    let mut editor = Editor::new();
    editor.start_annotation(DrawMode::Line, pt(0.0, 0.0));
    editor.extend_annotation(pt(50.0, 50.0));
    editor.extend_annotation(pt(80.0, 90.0));

    let line = editor.board.lines.last().unwrap();
    assert_eq!(line.points.len(), 2);
    assert!(approx_eq(line.points[1].x, 80.0));
    assert!(approx_eq(line.points[1].y, 90.0));
}

#[test]
fn extend_stroke_appends_points() {
    let mut editor = Editor::new();
    editor.start_annotation(DrawMode::Eraser, pt(0.0, 0.0));
    editor.extend_annotation(pt(1.0, 1.0));
    editor.extend_annotation(pt(2.0, 2.0));
    assert_eq!(editor.board.lines.last().unwrap().points.len(), 3);
}

#[test]
fn extend_when_idle_is_noop() {
    let mut editor = Editor::new();
    editor.extend_annotation(pt(1.0, 1.0));
    assert!(editor.board.lines.is_empty());
}

#[test]
fn commit_annotation_commits_once_and_idles() {
    let mut editor = Editor::new();
    editor.start_annotation(DrawMode::Arrow, pt(0.0, 0.0));
    editor.extend_annotation(pt(100.0, 100.0));
    editor.commit_annotation();

    assert_eq!(editor.gesture, Gesture::Idle);
    assert_eq!(editor.history.len(), 2);

    editor.commit_annotation();
    assert_eq!(editor.history.len(), 2);
}

#[test]
fn undo_after_arrow_commit_clears_the_line() {
    let mut editor = Editor::new();
    editor.start_annotation(DrawMode::Arrow, pt(100.0, 100.0));
    editor.extend_annotation(pt(200.0, 150.0));
    editor.commit_annotation();
    assert_eq!(editor.board.lines.len(), 1);

    assert!(editor.undo());
    assert!(editor.board.lines.is_empty());
}

#[test]
fn annotation_uses_current_color_and_brush() {
    let mut editor = Editor::new();
    editor.set_color("red");
    editor.set_brush_size(7.0);
    editor.start_annotation(DrawMode::Freehand, pt(0.0, 0.0));

    let line = editor.board.lines.last().unwrap();
    assert_eq!(line.color, "red");
    assert!(approx_eq(line.stroke_width, 7.0));
    assert_eq!(line.mode, DrawMode::Freehand);
}

#[test]
fn brush_size_is_clamped_to_slider_range() {
    let mut editor = Editor::new();
    editor.set_brush_size(0.0);
    assert!(approx_eq(editor.brush_size, MIN_STROKE_WIDTH));
    editor.set_brush_size(99.0);
    assert!(approx_eq(editor.brush_size, MAX_STROKE_WIDTH));
}

#[test]
fn delete_line_removes_by_index() {
    let mut editor = Editor::new();
    editor.start_annotation(DrawMode::Line, pt(0.0, 0.0));
    editor.commit_annotation();
    editor.start_annotation(DrawMode::Arrow, pt(5.0, 5.0));
    editor.commit_annotation();

    editor.delete_line(0);
    assert_eq!(editor.board.lines.len(), 1);
    assert_eq!(editor.board.lines[0].mode, DrawMode::Arrow);

    editor.delete_line(10);
    assert_eq!(editor.board.lines.len(), 1);
}

#[test]
fn clear_lines_drops_everything() {
    let mut editor = Editor::new();
    editor.start_annotation(DrawMode::Freehand, pt(0.0, 0.0));
    editor.commit_annotation();
    editor.clear_lines();
    assert!(editor.board.lines.is_empty());
}

// --- Text labels ---

#[test]
fn add_text_places_label_and_resets_tool() {
    let mut editor = Editor::new();
    editor.set_tool(Tool::Text);
    let id = editor.add_text(pt(120.0, 60.0));

    assert_eq!(editor.tool, Tool::Select);
    let label = editor.board.texts.iter().find(|t| t.id == id).unwrap();
    assert!(approx_eq(label.x, 120.0));
    assert!(approx_eq(label.y, 60.0));
    assert_eq!(label.text, DEFAULT_TEXT);
    assert!(label.editing);
}

#[test]
fn add_text_ids_stay_unique_under_rapid_placement() {
    let mut editor = Editor::new();
    let a = editor.add_text(pt(0.0, 0.0));
    let b = editor.add_text(pt(1.0, 1.0));
    let c = editor.add_text(pt(2.0, 2.0));
    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
}

#[test]
fn edit_text_updates_content_and_geometry() {
    let mut editor = Editor::new();
    let id = editor.add_text(pt(10.0, 10.0));
    editor.edit_text(
        &id,
        "press high",
        TextGeometry {
            x: Some(40.0),
            rotation: Some(15.0),
            ..TextGeometry::default()
        },
    );

    let label = editor.board.texts.iter().find(|t| t.id == id).unwrap();
    assert_eq!(label.text, "press high");
    assert!(approx_eq(label.x, 40.0));
    assert!(approx_eq(label.y, 10.0));
    assert!(approx_eq(label.rotation, 15.0));
    assert!(!label.editing);
}

#[test]
fn edit_text_unknown_id_is_noop() {
    let mut editor = Editor::new();
    editor.edit_text("nope", "text", TextGeometry::default());
    assert!(editor.board.texts.is_empty());
}

#[test]
fn delete_text_removes_by_id() {
    let mut editor = Editor::new();
    let id = editor.add_text(pt(0.0, 0.0));
    editor.delete_text(&id);
    assert!(editor.board.texts.is_empty());

    editor.delete_text("nope");
    assert!(editor.board.texts.is_empty());
}

// --- Bulk clear ---

#[test]
fn clear_all_sweeps_board_with_single_commit() {
    let mut editor = Editor::new();
    editor.set_show_opponents(true);
    editor.set_show_ball(true);
    editor.set_show_grid(true);
    editor.set_show_numbers(true);
    editor.set_color("red");
    editor.drag_player(0, pt(400.0, 100.0));
    editor.start_annotation(DrawMode::Arrow, pt(0.0, 0.0));
    editor.commit_annotation();
    editor.add_text(pt(50.0, 50.0));
    let before = editor.history.len();

    editor.clear_all();

    assert_eq!(editor.history.len(), before + 1);
    assert!(editor.board.lines.is_empty());
    assert!(editor.board.texts.is_empty());
    assert!(!editor.board.ui.show_ball);
    assert!(!editor.board.ui.show_grid);
    assert!(!editor.board.ui.show_numbers);
    assert!(!editor.board.ui.show_opponents);
    assert!(editor.board.opponents.is_empty());
    assert_eq!(editor.color, DEFAULT_LINE_COLOR);
    let player = &editor.board.players[0];
    assert!(approx_eq(player.x, player.initial_x));
    assert!(approx_eq(player.y, player.initial_y));
}

// --- Undo / redo ---

#[test]
fn undo_and_redo_walk_player_positions() {
    let mut editor = Editor::new();
    let anchor = editor.board.players[0].initial_pos();
    editor.drag_player(0, pt(400.0, 100.0));

    assert!(editor.undo());
    assert!(approx_eq(editor.board.players[0].x, anchor.x));
    assert!(editor.redo());
    assert!(approx_eq(editor.board.players[0].x, 400.0));
}

#[test]
fn undo_at_start_and_redo_at_tip_return_false() {
    let mut editor = Editor::new();
    assert!(!editor.undo());
    assert!(!editor.redo());
}

#[test]
fn undo_leaves_toggles_untouched() {
    let mut editor = Editor::new();
    editor.drag_player(0, pt(400.0, 100.0));
    editor.set_show_grid(true);

    assert!(editor.undo());
    assert!(editor.board.ui.show_grid);
}

#[test]
fn commit_after_undo_truncates_redo_branch() {
    let mut editor = Editor::new();
    editor.drag_player(0, pt(400.0, 100.0));
    editor.drag_player(0, pt(500.0, 100.0));
    assert!(editor.undo());

    editor.drag_player(1, pt(600.0, 200.0));
    assert!(!editor.redo());
}

// --- Tool mapping ---

#[test]
fn tools_map_to_draw_modes() {
    assert_eq!(Tool::Arrow.draw_mode(), Some(DrawMode::Arrow));
    assert_eq!(Tool::Line.draw_mode(), Some(DrawMode::Line));
    assert_eq!(Tool::Freehand.draw_mode(), Some(DrawMode::Freehand));
    assert_eq!(Tool::Eraser.draw_mode(), Some(DrawMode::Eraser));
    assert_eq!(Tool::Select.draw_mode(), None);
    assert_eq!(Tool::Text.draw_mode(), None);
}
