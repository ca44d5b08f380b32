//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements (0xRRGGBB, sRGB)
pub mod colors {
    pub const GRASS: u32 = 0x228B22;
    pub const ROAD: u32 = 0x555555;
    pub const LANE_LINE: u32 = 0xFFFFFF;
    pub const CENTER_DASH: u32 = 0xFFD700;
    pub const PLAYER: u32 = 0x32CD32;
    pub const PLAYER_EYE: u32 = 0x000000;
    pub const PLAYER_MOUTH: u32 = 0xFF69B4;
    pub const WINDSHIELD: u32 = 0x87CEEB;
    pub const WHEEL: u32 = 0x000000;
}

/// Convert an sRGB hex color to linear RGBA for an sRGB surface
pub fn rgba(hex: u32) -> [f32; 4] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xFF) as f32 / 255.0);
    [channel(16), channel(8), channel(0), 1.0]
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_extremes() {
        assert_eq!(rgba(0x000000), [0.0, 0.0, 0.0, 1.0]);
        let white = rgba(0xFFFFFF);
        for c in &white[..3] {
            assert!((c - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_rgba_channel_order() {
        let red = rgba(0xFF0000);
        assert!(red[0] > 0.99);
        assert_eq!(red[1], 0.0);
        assert_eq!(red[2], 0.0);

        // Mid grey is darker in linear space
        let grey = rgba(0x808080);
        assert!(grey[0] > 0.2 && grey[0] < 0.25);
    }
}
