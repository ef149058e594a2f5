//! Legacy scene-graph snapshot codec.
//!
//! Boards saved before the named-section format persist a rendered canvas
//! tree: a `stageData` object whose layer list is positional (background,
//! optional grid, field markings, roster entities, drawings, texts) plus a
//! sibling `uiStates` object carrying the toggles. A grid layer is spliced
//! in at index 1 when `showGrid` was on, shifting every later layer index
//! by one. Node coordinates are display-space for the orientation the
//! board was saved in.
//!
//! [`encode`] reproduces that tree from logical board state, projecting
//! every coordinate through the base bounds of the current orientation.
//! [`decode`] walks it defensively and inverse-projects positions back to
//! logical space; a structurally broken tree or an empty roster falls back
//! to a default board instead of failing.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde_json::{Value, json};

use crate::model::{
    AnnotationLine, BoardState, DEFAULT_FONT_SIZE, DEFAULT_LINE_COLOR, DEFAULT_STROKE_WIDTH,
    DEFAULT_TEXT_WIDTH, DrawMode, OPPONENT_COLOR, PLAYER_COLOR, Player, TextLabel, UiStates,
};
use crate::pitch::{Bounds, Orientation, PITCH_CENTER, Point, Projection};

/// Fill of the pitch background rectangle.
const FIELD_FILL: &str = "#388e3c";

/// Stroke of grid lines in stored scenes.
const GRID_STROKE: &str = "rgba(255, 255, 255, 0.3)";
const GRID_STEP: f64 = 50.0;

const MARKING_STROKE: &str = "white";
const PLAYER_RADIUS: f64 = 15.0;
const BALL_SIZE: f64 = 20.0;
const BALL_OFFSET: f64 = 15.0;
const ARROW_POINTER: f64 = 10.0;
const STROKE_TENSION: f64 = 0.5;

/// Composite operation that marks an eraser stroke.
const ERASE_COMPOSITE: &str = "destination-out";

// --- Writer ---

/// Serialize a board into the legacy layered snapshot.
#[must_use]
pub fn encode(board: &BoardState) -> Value {
    let proj = Projection::base(board.ui.orientation);
    let mut layers = vec![background_layer(proj.bounds)];
    if board.ui.show_grid {
        layers.push(grid_layer(&proj));
    }
    layers.push(field_layer(&proj));
    layers.push(entity_layer(board, &proj));
    layers.push(drawing_layer(&board.lines, &proj));
    layers.push(text_layer(&board.texts, &proj));

    json!({
        "stageData": {
            "attrs": {
                "id": "container",
                "width": proj.bounds.width,
                "height": proj.bounds.height,
            },
            "className": "Stage",
            "children": layers,
        },
        "uiStates": board.ui,
    })
}

fn layer(children: Vec<Value>) -> Value {
    json!({ "attrs": {}, "className": "Layer", "children": children })
}

fn background_layer(bounds: Bounds) -> Value {
    layer(vec![json!({
        "attrs": {
            "width": bounds.width,
            "height": bounds.height,
            "fill": FIELD_FILL,
            "listening": false,
        },
        "className": "Rect",
    })])
}

/// One grid line every [`GRID_STEP`] units. Stored scenes run 18 lines
/// along one axis and 12 along the other and swap the counts with
/// orientation.
fn grid_layer(proj: &Projection) -> Value {
    let Bounds { width, height } = proj.bounds;
    let mut lines = Vec::with_capacity(30);
    match proj.orientation {
        Orientation::Horizontal => {
            for i in 0..18u32 {
                let at = GRID_STEP * f64::from(i);
                lines.push(grid_line([at, 0.0, at, height]));
            }
            for i in 0..12u32 {
                let at = GRID_STEP * f64::from(i);
                lines.push(grid_line([0.0, at, width, at]));
            }
        }
        Orientation::Vertical => {
            for i in 0..12u32 {
                let at = GRID_STEP * f64::from(i);
                lines.push(grid_line([0.0, at, width, at]));
            }
            for i in 0..18u32 {
                let at = GRID_STEP * f64::from(i);
                lines.push(grid_line([at, 0.0, at, height]));
            }
        }
    }
    layer(lines)
}

fn grid_line(points: [f64; 4]) -> Value {
    json!({
        "attrs": { "points": points, "stroke": GRID_STROKE, "strokeWidth": 1 },
        "className": "Line",
    })
}

/// Pitch markings. Spot and circle markings project through the
/// orientation; the axis-aligned boxes, the center line, and the penalty
/// arcs are authored per orientation.
fn field_layer(proj: &Projection) -> Value {
    let mut nodes = Vec::with_capacity(15);

    nodes.push(marking_line(match proj.orientation {
        Orientation::Horizontal => [450.0, 0.0, 450.0, 480.0],
        Orientation::Vertical => [0.0, 450.0, 480.0, 450.0],
    }));

    let center = proj.to_display(PITCH_CENTER);
    nodes.push(marking_circle(center, 80.0));
    nodes.push(json!({
        "attrs": {
            "x": center.x,
            "y": center.y,
            "radius": 5,
            "stroke": MARKING_STROKE,
            "strokeWidth": 2,
            "fill": MARKING_STROKE,
        },
        "className": "Circle",
    }));

    let boxes: [[f64; 4]; 4] = match proj.orientation {
        Orientation::Horizontal => [
            [0.0, 120.0, 120.0, 240.0],
            [780.0, 120.0, 120.0, 240.0],
            [0.0, 180.0, 50.0, 120.0],
            [850.0, 180.0, 50.0, 120.0],
        ],
        Orientation::Vertical => [
            [120.0, 0.0, 240.0, 120.0],
            [120.0, 780.0, 240.0, 120.0],
            [180.0, 0.0, 120.0, 50.0],
            [180.0, 850.0, 120.0, 50.0],
        ],
    };
    for [x, y, w, h] in boxes {
        nodes.push(json!({
            "attrs": {
                "x": x,
                "y": y,
                "width": w,
                "height": h,
                "stroke": MARKING_STROKE,
                "strokeWidth": 2,
            },
            "className": "Rect",
        }));
    }

    for spot in [Point::new(90.0, 235.0), Point::new(800.0, 235.0)] {
        let at = proj.to_display(spot);
        nodes.push(json!({
            "attrs": {
                "x": at.x,
                "y": at.y,
                "radius": 3,
                "stroke": MARKING_STROKE,
                "fill": MARKING_STROKE,
            },
            "className": "Circle",
        }));
    }

    let arcs: [(f64, f64, f64); 2] = match proj.orientation {
        Orientation::Horizontal => [(120.0, 240.0, -90.0), (780.0, 240.0, 90.0)],
        Orientation::Vertical => [(240.0, 120.0, 0.0), (240.0, 780.0, 180.0)],
    };
    for (x, y, rotation) in arcs {
        nodes.push(json!({
            "attrs": {
                "x": x,
                "y": y,
                "innerRadius": 0,
                "outerRadius": 50,
                "angle": 180,
                "rotation": rotation,
                "stroke": MARKING_STROKE,
                "strokeWidth": 2,
            },
            "className": "Arc",
        }));
    }

    for corner in [
        Point::new(2.0, 0.0),
        Point::new(4.0, 477.0),
        Point::new(898.0, 0.0),
        Point::new(900.0, 477.0),
    ] {
        nodes.push(marking_circle(proj.to_display(corner), 10.0));
    }

    layer(nodes)
}

fn marking_line(points: [f64; 4]) -> Value {
    json!({
        "attrs": { "points": points, "stroke": MARKING_STROKE, "strokeWidth": 2 },
        "className": "Line",
    })
}

fn marking_circle(at: Point, radius: f64) -> Value {
    json!({
        "attrs": {
            "x": at.x,
            "y": at.y,
            "radius": radius,
            "stroke": MARKING_STROKE,
            "strokeWidth": 2,
        },
        "className": "Circle",
    })
}

/// Player and opponent groups in roster order, then the ball image when
/// shown. An off toggle leaves the opponent roster empty, so only nodes
/// that were visible are written.
fn entity_layer(board: &BoardState, proj: &Projection) -> Value {
    let mut nodes = Vec::with_capacity(board.players.len() + board.opponents.len() + 1);
    for player in &board.players {
        nodes.push(roster_group(player, board.ui.show_numbers, proj));
    }
    for opponent in &board.opponents {
        nodes.push(roster_group(opponent, board.ui.show_numbers, proj));
    }
    if board.ui.show_ball {
        let at = proj.to_display(board.ball);
        nodes.push(json!({
            "attrs": {
                "x": at.x,
                "y": at.y,
                "width": BALL_SIZE,
                "height": BALL_SIZE,
                "offsetX": BALL_OFFSET,
                "offsetY": BALL_OFFSET,
                "draggable": true,
            },
            "className": "Image",
        }));
    }
    layer(nodes)
}

fn roster_group(player: &Player, show_number: bool, proj: &Projection) -> Value {
    let at = proj.to_display(player.pos());
    let mut children = vec![json!({
        "attrs": {
            "radius": PLAYER_RADIUS,
            "fill": player.color,
            "stroke": MARKING_STROKE,
            "strokeWidth": 2,
        },
        "className": "Circle",
    })];
    if show_number {
        if let Some(number) = player.number {
            let mut attrs = json!({
                "text": number.to_string(),
                "fontSize": 16,
                "fill": MARKING_STROKE,
                "x": -4,
                "y": -8,
                "align": "center",
                "verticalAlign": "middle",
            });
            // Two-digit numbers shift left to stay centered in the badge.
            if number >= 10 {
                attrs["offsetX"] = json!(4);
            }
            children.push(json!({ "attrs": attrs, "className": "Text" }));
        }
    }
    json!({
        "attrs": { "x": at.x, "y": at.y, "draggable": true },
        "className": "Group",
        "children": children,
    })
}

fn drawing_layer(lines: &[AnnotationLine], proj: &Projection) -> Value {
    layer(lines.iter().map(|line| annotation_node(line, proj)).collect())
}

fn annotation_node(line: &AnnotationLine, proj: &Projection) -> Value {
    let points = flatten(&proj.points_to_display(&line.points));
    match line.mode {
        DrawMode::Arrow => json!({
            "attrs": {
                "points": points,
                "stroke": line.color,
                "strokeWidth": line.stroke_width,
                "pointerLength": ARROW_POINTER,
                "pointerWidth": ARROW_POINTER,
                "draggable": true,
            },
            "className": "Arrow",
        }),
        DrawMode::Line => json!({
            "attrs": {
                "points": points,
                "stroke": line.color,
                "strokeWidth": line.stroke_width,
                "lineCap": "round",
                "lineJoin": "round",
                "draggable": true,
            },
            "className": "Line",
        }),
        DrawMode::Freehand => json!({
            "attrs": {
                "points": points,
                "stroke": line.color,
                "strokeWidth": line.stroke_width,
                "tension": STROKE_TENSION,
                "lineCap": "round",
                "lineJoin": "round",
            },
            "className": "Line",
        }),
        DrawMode::Eraser => json!({
            "attrs": {
                "points": points,
                "stroke": line.color,
                "strokeWidth": line.stroke_width,
                "tension": STROKE_TENSION,
                "lineCap": "round",
                "lineJoin": "round",
                "globalCompositeOperation": ERASE_COMPOSITE,
            },
            "className": "Line",
        }),
    }
}

fn text_layer(texts: &[TextLabel], proj: &Projection) -> Value {
    layer(
        texts
            .iter()
            .map(|label| {
                let at = proj.to_display(label.pos());
                json!({
                    "attrs": {
                        "id": label.id,
                        "x": at.x,
                        "y": at.y,
                        "text": label.text,
                        "fontSize": label.font_size,
                        "width": label.width,
                        "rotation": label.rotation,
                        "draggable": true,
                    },
                    "className": "Text",
                })
            })
            .collect(),
    )
}

// --- Reader ---

/// Deserialize a legacy snapshot, falling back to a default board when the
/// tree is malformed or holds no players.
#[must_use]
pub fn decode(value: &Value) -> BoardState {
    match read_board(value) {
        Some(board) => board,
        None => BoardState::default(),
    }
}

fn read_board(value: &Value) -> Option<BoardState> {
    let stage = value.get("stageData")?;
    let layers = stage.get("children")?.as_array()?;
    let ui = read_ui(value.get("uiStates"));
    let proj = Projection::base(ui.orientation);

    // The grid layer, when present, shifts the entity and drawing layers
    // up by one. Texts always sit in the last layer.
    let shift = usize::from(ui.show_grid);
    let entities = layer_children(layers, 2 + shift);
    let drawings = layer_children(layers, 3 + shift);
    let labels = layers.last().map_or(&[][..], node_children);

    let players = read_roster(entities, PLAYER_COLOR, &proj);
    if players.is_empty() {
        return None;
    }
    let mut opponents = read_roster(entities, OPPONENT_COLOR, &proj);
    if !ui.show_opponents {
        opponents.clear();
    }

    Some(BoardState {
        players,
        opponents,
        lines: read_lines(drawings, &proj),
        texts: read_labels(labels, &proj),
        ball: read_ball(entities, &proj),
        ui,
    })
}

fn read_ui(value: Option<&Value>) -> UiStates {
    match value {
        Some(v) => serde_json::from_value(v.clone()).unwrap_or_default(),
        None => UiStates::default(),
    }
}

/// Roster markers are groups whose badge circle carries the team fill.
fn read_roster(entities: &[Value], fill: &str, proj: &Projection) -> Vec<Player> {
    let groups = entities
        .iter()
        .filter(|node| class_name(node) == "Group" && badge_fill(node) == Some(fill));
    (0u32..)
        .zip(groups)
        .map(|(id, node)| Player::seeded(id, proj.to_logical(node_position(node)), fill))
        .collect()
}

fn read_ball(entities: &[Value], proj: &Projection) -> Point {
    entities
        .iter()
        .find(|node| class_name(node) == "Image")
        .map_or(PITCH_CENTER, |node| proj.to_logical(node_position(node)))
}

fn read_lines(drawings: &[Value], proj: &Projection) -> Vec<AnnotationLine> {
    drawings
        .iter()
        .filter_map(|node| {
            let mode = match class_name(node) {
                "Arrow" => DrawMode::Arrow,
                "Line" => line_mode(node),
                _ => return None,
            };
            let flat: Vec<f64> = node
                .get("attrs")?
                .get("points")?
                .as_array()?
                .iter()
                .filter_map(Value::as_f64)
                .collect();
            Some(AnnotationLine {
                points: proj.points_to_logical(&unflatten(&flat)),
                color: attr_str(node, "stroke").unwrap_or(DEFAULT_LINE_COLOR).to_string(),
                stroke_width: attr_f64(node, "strokeWidth", DEFAULT_STROKE_WIDTH),
                mode,
            })
        })
        .collect()
}

/// Stroke lines carry a tension attribute; erasers additionally punch
/// through via their composite operation. Plain segments carry neither.
fn line_mode(node: &Value) -> DrawMode {
    if attr_str(node, "globalCompositeOperation") == Some(ERASE_COMPOSITE) {
        DrawMode::Eraser
    } else if attr_f64(node, "tension", 0.0) > 0.0 {
        DrawMode::Freehand
    } else {
        DrawMode::Line
    }
}

fn read_labels(labels: &[Value], proj: &Projection) -> Vec<TextLabel> {
    (0u32..)
        .zip(labels.iter().filter(|node| class_name(node) == "Text"))
        .map(|(index, node)| {
            let pos = proj.to_logical(node_position(node));
            TextLabel {
                id: attr_str(node, "id").map_or_else(|| index.to_string(), str::to_string),
                x: pos.x,
                y: pos.y,
                text: attr_str(node, "text").unwrap_or_default().to_string(),
                font_size: attr_f64(node, "fontSize", DEFAULT_FONT_SIZE),
                width: attr_f64(node, "width", DEFAULT_TEXT_WIDTH),
                rotation: attr_f64(node, "rotation", 0.0),
                editing: false,
            }
        })
        .collect()
}

// --- Tree helpers ---

fn node_children(node: &Value) -> &[Value] {
    node.get("children")
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice)
}

fn layer_children(layers: &[Value], index: usize) -> &[Value] {
    layers.get(index).map_or(&[][..], node_children)
}

fn class_name(node: &Value) -> &str {
    node.get("className").and_then(Value::as_str).unwrap_or_default()
}

fn badge_fill(node: &Value) -> Option<&str> {
    node_children(node).first()?.get("attrs")?.get("fill")?.as_str()
}

fn attr_str<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
    node.get("attrs")?.get(key)?.as_str()
}

fn attr_f64(node: &Value, key: &str, default: f64) -> f64 {
    node.get("attrs")
        .and_then(|attrs| attrs.get(key))
        .and_then(Value::as_f64)
        .unwrap_or(default)
}

fn node_position(node: &Value) -> Point {
    Point::new(attr_f64(node, "x", 0.0), attr_f64(node, "y", 0.0))
}

fn flatten(points: &[Point]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

fn unflatten(flat: &[f64]) -> Vec<Point> {
    flat.chunks_exact(2).map(|pair| Point::new(pair[0], pair[1])).collect()
}
