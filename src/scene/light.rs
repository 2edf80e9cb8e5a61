use tracing::debug;

use super::{Axis, Channel, MAX_LIGHTS};
use crate::error::{Result, SceneError};

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: [f32; 3],
    /// Linear RGB in [0, 1].
    pub color: [f32; 3],
    /// Non-negative multiplier.
    pub intensity: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

impl Light {
    fn clamped(mut self) -> Self {
        for c in &mut self.color {
            *c = c.clamp(0.0, 1.0);
        }
        self.intensity = self.intensity.max(0.0);
        self
    }
}

/// Which scalar of a light an update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightField {
    Position(Axis),
    Color(Channel),
    Intensity,
}

/// Result of [`LightSet::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddLight {
    Added(usize),
    /// The set already holds [`MAX_LIGHTS`] lights; nothing changed.
    Rejected,
}

/// Read-only view of the flat light arrays, laid out exactly as uploaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSnapshot<'a> {
    pub positions: &'a [f32],
    pub colors: &'a [f32],
    pub intensities: &'a [f32],
    pub count: usize,
}

/// Bounded set of point lights mirrored into flat per-channel arrays.
///
/// The flat arrays are only written here: `add` appends a light's slots and
/// `update` rewrites one light's slot in place.
#[derive(Debug, Clone, Default)]
pub struct LightSet {
    lights: Vec<Light>,
    positions: Vec<f32>,
    colors: Vec<f32>,
    intensities: Vec<f32>,
}

impl LightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a light unless the set is full.
    pub fn add(&mut self, light: Light) -> AddLight {
        if self.lights.len() >= MAX_LIGHTS {
            debug!(count = self.lights.len(), "Light cap reached, add ignored");
            return AddLight::Rejected;
        }

        let light = light.clamped();
        let index = self.lights.len();
        self.lights.push(light);
        self.positions.extend_from_slice(&light.position);
        self.colors.extend_from_slice(&light.color);
        self.intensities.push(light.intensity);
        debug!(index, "Added light");
        AddLight::Added(index)
    }

    /// Set one scalar of light `index` and resynchronize its flat-array slot.
    pub fn update(&mut self, index: usize, field: LightField, value: f32) -> Result<()> {
        let light = self
            .lights
            .get_mut(index)
            .ok_or(SceneError::LightOutOfRange(index))?;

        match field {
            LightField::Position(axis) => {
                light.position[axis.index()] = value;
                self.positions[index * 3 + axis.index()] = value;
            }
            LightField::Color(channel) => {
                let value = value.clamp(0.0, 1.0);
                light.color[channel.index()] = value;
                self.colors[index * 3 + channel.index()] = value;
            }
            LightField::Intensity => {
                let value = value.max(0.0);
                light.intensity = value;
                self.intensities[index] = value;
            }
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Light> {
        self.lights.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter()
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lights.len() >= MAX_LIGHTS
    }

    pub fn snapshot(&self) -> LightSnapshot<'_> {
        LightSnapshot {
            positions: &self.positions,
            colors: &self.colors,
            intensities: &self.intensities,
            count: self.lights.len(),
        }
    }
}

/// Rebuild the flat arrays from scratch: (positions, colors, intensities).
pub fn flatten(lights: &[Light]) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
    let positions = lights.iter().flat_map(|l| l.position).collect();
    let colors = lights.iter().flat_map(|l| l.color).collect();
    let intensities = lights.iter().map(|l| l.intensity).collect();
    (positions, colors, intensities)
}
