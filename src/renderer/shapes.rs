//! Shape tessellation for 2D primitives
//!
//! Everything renders as flat-colored triangles: rects for bricks and
//! paddle, a triangle fan for each ball.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use super::vertex::colors;
use crate::consts::{BALL_RADIUS, BRICK_GRID_TOP, PADDLE_CENTER_Y, PADDLE_HEIGHT, PLAYFIELD_WIDTH};
use crate::sim::{GameState, Rect, Scene};

/// Convert an HSV hue (degrees, s=1, v fixed) to RGBA
///
/// Bricks are tinted by row the way the original colored them from the
/// brick's y coordinate.
fn hue_color(hue: f32) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let v = 0.85;
    let x = v * (1.0 - (h % 2.0 - 1.0).abs());

    let (r, g, b) = match h as u32 {
        0 => (v, x, 0.0),
        1 => (x, v, 0.0),
        2 => (0.0, v, x),
        3 => (0.0, x, v),
        4 => (x, 0.0, v),
        _ => (v, 0.0, x),
    };
    [r, g, b, 1.0]
}

/// Row tint for a brick at the given top-edge y
pub fn brick_color(brick_top: f32) -> [f32; 4] {
    hue_color(brick_top - 40.0)
}

/// Two triangles covering a rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    vec![
        Vertex::new(l, t, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(rt, b, color),
        Vertex::new(l, b, color),
    ]
}

/// A rectangle shrunk by `inset` on every side
///
/// Bricks draw inset by one pixel so the grid reads as separate tiles.
pub fn rect_inset(r: &Rect, inset: f32, color: [f32; 4]) -> Vec<Vertex> {
    let shrunk = Rect::new(
        r.x + inset,
        r.y + inset,
        (r.w - inset * 2.0).max(0.0),
        (r.h - inset * 2.0).max(0.0),
    );
    rect(&shrunk, color)
}

/// Triangle fan approximating a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    for i in 0..segments {
        let a = (i as f32 / segments as f32) * 2.0 * PI;
        let b = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * a.cos(),
            center.y + radius * a.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * b.cos(),
            center.y + radius * b.sin(),
            color,
        ));
    }
    vertices
}

/// Tessellate the full scene in playfield coordinates
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    // Live bricks, row-tinted
    for (_, brick) in state.bricks.live_bricks() {
        let color = brick_color(brick.rect.top());
        vertices.extend(rect_inset(&brick.rect, 1.0, color));
    }

    // Paddle
    vertices.extend(rect(&state.paddle.rect, colors::PADDLE));

    // Balls
    for ball in state.spawner.balls() {
        vertices.extend(circle(ball.pos, ball.radius, colors::BALL, 24));
    }

    // Ghost of the next bonus ball while its countdown runs
    if state.scene == Scene::InGame && state.spawner.spawn_pending() {
        let pos = Vec2::new(
            state.paddle.center().x,
            PADDLE_CENTER_Y - PADDLE_HEIGHT - BALL_RADIUS * 2.0,
        );
        vertices.extend(circle(pos, BALL_RADIUS, colors::BALL_PENDING, 24));
    }

    // Faint line marking the top of the brick area on the title screen
    if state.scene == Scene::Title {
        let marker = Rect::new(0.0, BRICK_GRID_TOP - 2.0, PLAYFIELD_WIDTH, 1.0);
        vertices.extend(rect(&marker, colors::WALL));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_tessellation_covers_corners() {
        let r = Rect::new(10.0, 20.0, 40.0, 20.0);
        let verts = rect(&r, [1.0; 4]);
        assert_eq!(verts.len(), 6);

        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert!(xs.contains(&10.0) && xs.contains(&50.0));
        assert!(ys.contains(&20.0) && ys.contains(&40.0));
    }

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::new(0.0, 0.0), 10.0, [1.0; 4], 24);
        assert_eq!(verts.len(), 24 * 3);
    }

    #[test]
    fn test_brick_rows_get_distinct_colors() {
        let a = brick_color(60.0);
        let b = brick_color(80.0);
        assert_ne!(a, b);
    }
}
