//! Flat render data: per-star vertices and texture-class batches.

use crate::composer::Galaxy;
use crate::star::NUM_STAR_TEXTURES;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One point sprite as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct StarVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub size: f32,
}

impl StarVertex {
    pub fn new(position: Vec3, color: Vec3, size: f32) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
            size,
        }
    }
}

/// Stars sharing one sprite texture, as parallel arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureBatch {
    pub texture_index: u32,
    /// Indices into [`Galaxy::stars`].
    pub star_indices: Vec<usize>,
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
}

impl TextureBatch {
    pub fn len(&self) -> usize {
        self.star_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.star_indices.is_empty()
    }
}

impl Galaxy {
    /// Every star as a GPU vertex, in id order.
    pub fn vertices(&self) -> Vec<StarVertex> {
        self.stars
            .iter()
            .map(|s| StarVertex::new(s.position, s.color, s.size))
            .collect()
    }

    /// Stars grouped by texture class. Always returns one batch per texture, empty or not.
    pub fn texture_batches(&self) -> Vec<TextureBatch> {
        let mut batches: Vec<TextureBatch> = (0..NUM_STAR_TEXTURES)
            .map(|texture_index| TextureBatch {
                texture_index,
                ..Default::default()
            })
            .collect();

        for star in &self.stars {
            match batches.get_mut(star.texture_index as usize) {
                Some(batch) => {
                    batch.star_indices.push(star.index);
                    batch.positions.push(star.position);
                    batch.colors.push(star.color);
                }
                None => log::warn!("{} has unknown texture {}", star.id, star.texture_index),
            }
        }
        batches
    }
}
