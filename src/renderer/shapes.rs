//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in screen space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, rgba};
use crate::sim::{DrawItem, DrawKind, Frame};

/// Inset of the platform highlight from the platform edge
const HIGHLIGHT_INSET: f32 = 3.0;
/// Segments used for the player and coins
const CIRCLE_SEGMENTS: u32 = 24;
/// Particles are tiny; fewer segments suffice
const PARTICLE_SEGMENTS: u32 = 8;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Upward-pointing spike filling the given box
pub fn spike(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(pos.x, pos.y + size.y, color),
        Vertex::new(pos.x + size.x / 2.0, pos.y, color),
        Vertex::new(pos.x + size.x, pos.y + size.y, color),
    ]
}

/// Vertices for a single draw item
pub fn item_vertices(item: &DrawItem) -> Vec<Vertex> {
    let center = item.pos + item.size / 2.0;
    match item.kind {
        DrawKind::Platform { highlight } => {
            let mut vertices = rect(item.pos, item.size, rgba(item.color, 255));
            let inset = Vec2::splat(HIGHLIGHT_INSET);
            let inner = (item.size - inset * 2.0).max(Vec2::ZERO);
            vertices.extend(rect(item.pos + inset, inner, rgba(highlight, 255)));
            vertices
        }
        DrawKind::Enemy => spike(item.pos, item.size, rgba(item.color, 255)),
        DrawKind::Player | DrawKind::Coin => circle(
            center,
            item.size.x / 2.0,
            rgba(item.color, 255),
            CIRCLE_SEGMENTS,
        ),
        DrawKind::Particle { alpha } => circle(
            center,
            item.size.x / 2.0,
            rgba(item.color, alpha),
            PARTICLE_SEGMENTS,
        ),
    }
}

/// Tessellate a whole frame, preserving draw order
pub fn frame_vertices(frame: &Frame) -> Vec<Vertex> {
    frame.items.iter().flat_map(item_vertices).collect()
}
