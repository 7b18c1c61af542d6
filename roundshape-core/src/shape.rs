/// Editable shape model
///
/// [`Shape`] holds the inputs of one rendered shape. Every setter that
/// changes something records a [`ShapeEvent`]; the orchestrating layer calls
/// [`Shape::take_events`] once per batch of edits and recomputes only what
/// the events name. Repeated edits between two drains coalesce into a single
/// event of each kind.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use log::debug;
use nalgebra::Point2;

use crate::error::InvalidInputError;
use crate::geometry::{Anchor, CornerSpec, ShapeSpec, TessellationResult};
use crate::preset::{Preset, DEFAULT_SMOOTHNESS};
use crate::style::{normalize_angle, FillType, Style};
use crate::tessellate::tessellate;

/// Recompute request emitted by a setter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeEvent {
    /// Anchors, radii or smoothness changed: re-tessellate
    GeometryChanged,
    /// Fill settings changed
    FillChanged,
    /// Stroke settings changed
    StrokeChanged,
}

/// Which points a collider should follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColliderSource {
    #[default]
    Anchors,
    Vertices,
}

#[derive(Debug, Clone)]
pub struct Shape {
    anchors: Vec<Anchor>,
    radii: Vec<f32>,
    smoothness: Vec<u32>,
    style: Style,
    events: Vec<ShapeEvent>,
    cache: Option<(u64, TessellationResult)>,
}

impl Shape {
    /// Build a shape from a spec, normalizing it into a tessellatable state
    pub fn new(spec: ShapeSpec) -> Self {
        let mut shape = Self {
            radii: spec.radii(),
            smoothness: spec.smoothness(),
            anchors: spec.anchors,
            style: Style::default(),
            events: Vec::new(),
            cache: None,
        };
        shape.normalize();
        shape
    }

    pub fn from_preset(preset: &Preset) -> Self {
        Self::new(preset.build())
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn radii(&self) -> &[f32] {
        &self.radii
    }

    pub fn smoothness(&self) -> &[u32] {
        &self.smoothness
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn spec(&self) -> ShapeSpec {
        let corners = self
            .radii
            .iter()
            .zip(&self.smoothness)
            .map(|(&r, &s)| CornerSpec::new(r, s))
            .collect();
        ShapeSpec::new(self.anchors.clone(), corners)
    }

    /// Bring the per-anchor arrays into a state the tessellator accepts.
    ///
    /// Pads to 3 anchors with origin points, resizes radii and smoothness to
    /// the anchor count, clamps negative or NaN radii to 0 and replaces zero
    /// smoothness with the default. Returns true when anything changed.
    pub fn normalize(&mut self) -> bool {
        let mut changed = false;

        if self.anchors.len() < 3 {
            debug!("padding shape from {} to 3 anchors", self.anchors.len());
            self.anchors.resize(3, Point2::origin());
            changed = true;
        }
        let n = self.anchors.len();

        if self.radii.len() != n {
            self.radii.resize(n, 0.0);
            changed = true;
        }
        for r in self.radii.iter_mut() {
            if !(*r >= 0.0) {
                *r = 0.0;
                changed = true;
            }
        }

        if self.smoothness.len() != n {
            self.smoothness.resize(n, DEFAULT_SMOOTHNESS);
            changed = true;
        }
        for s in self.smoothness.iter_mut() {
            if *s == 0 {
                *s = DEFAULT_SMOOTHNESS;
                changed = true;
            }
        }

        if changed {
            debug!("normalized shape to {} anchors", n);
            self.emit(ShapeEvent::GeometryChanged);
        }
        changed
    }

    /// Replace anchors, keeping existing corners where indices still exist
    pub fn set_anchors(&mut self, anchors: Vec<Anchor>) {
        if anchors != self.anchors {
            self.anchors = anchors;
            self.emit(ShapeEvent::GeometryChanged);
            self.normalize();
        }
    }

    /// Move one anchor. Returns `None` when `index` is out of range.
    pub fn set_anchor(&mut self, index: usize, anchor: Anchor) -> Option<()> {
        let slot = self.anchors.get_mut(index)?;
        if *slot != anchor {
            *slot = anchor;
            self.emit(ShapeEvent::GeometryChanged);
        }
        Some(())
    }

    /// Set one corner radius (negative clamps to 0)
    pub fn set_radius(&mut self, index: usize, radius: f32) -> Option<()> {
        let radius = if radius >= 0.0 { radius } else { 0.0 };
        let slot = self.radii.get_mut(index)?;
        if *slot != radius {
            *slot = radius;
            self.emit(ShapeEvent::GeometryChanged);
        }
        Some(())
    }

    /// Set one corner smoothness. 0 falls back to the default, as in [`Shape::normalize`].
    pub fn set_smoothness(&mut self, index: usize, smoothness: u32) -> Option<()> {
        let smoothness = if smoothness == 0 { DEFAULT_SMOOTHNESS } else { smoothness };
        let slot = self.smoothness.get_mut(index)?;
        if *slot != smoothness {
            *slot = smoothness;
            self.emit(ShapeEvent::GeometryChanged);
        }
        Some(())
    }

    pub fn set_all_radii(&mut self, radius: f32) {
        for i in 0..self.radii.len() {
            self.set_radius(i, radius);
        }
    }

    pub fn set_all_smoothness(&mut self, smoothness: u32) {
        for i in 0..self.smoothness.len() {
            self.set_smoothness(i, smoothness);
        }
    }

    /// Replace the whole geometry, e.g. after a preset parameter changed
    pub fn apply_spec(&mut self, spec: ShapeSpec) {
        let radii = spec.radii();
        let smoothness = spec.smoothness();
        if spec.anchors != self.anchors || radii != self.radii || smoothness != self.smoothness {
            self.anchors = spec.anchors;
            self.radii = radii;
            self.smoothness = smoothness;
            self.emit(ShapeEvent::GeometryChanged);
            self.normalize();
        }
    }

    pub fn set_fill(&mut self, fill: bool) {
        if self.style.fill != fill {
            self.style.fill = fill;
            self.emit(ShapeEvent::FillChanged);
        }
    }

    pub fn set_fill_type(&mut self, fill_type: FillType) {
        if self.style.fill_type != fill_type {
            self.style.fill_type = fill_type;
            self.emit(ShapeEvent::FillChanged);
        }
    }

    pub fn set_fill_angle(&mut self, degrees: f32) {
        let degrees = normalize_angle(degrees);
        if self.style.fill_angle != degrees {
            self.style.fill_angle = degrees;
            self.emit(ShapeEvent::FillChanged);
        }
    }

    pub fn set_stroke(&mut self, stroke: bool) {
        if self.style.stroke != stroke {
            self.style.stroke = stroke;
            self.emit(ShapeEvent::StrokeChanged);
        }
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        let width = width.max(0.0);
        if self.style.stroke_width != width {
            self.style.stroke_width = width;
            self.emit(ShapeEvent::StrokeChanged);
        }
    }

    /// Drain pending recompute requests, each kind at most once
    pub fn take_events(&mut self) -> Vec<ShapeEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Tessellate the current geometry, reusing the last result when the
    /// inputs are unchanged
    pub fn tessellation(&mut self) -> Result<&TessellationResult, InvalidInputError> {
        let key = self.input_hash();
        let entry = match self.cache.take() {
            Some((cached, result)) if cached == key => (cached, result),
            _ => {
                let result = tessellate(&self.anchors, &self.radii, &self.smoothness)?;
                debug!(
                    "tessellated {} anchors into {} vertices",
                    self.anchors.len(),
                    result.vertices.len()
                );
                (key, result)
            }
        };
        Ok(&self.cache.insert(entry).1)
    }

    /// Points a collider-sync layer would copy
    pub fn collider_points(&mut self, source: ColliderSource) -> Result<Vec<Point2<f32>>, InvalidInputError> {
        match source {
            ColliderSource::Anchors => Ok(self.anchors.clone()),
            ColliderSource::Vertices => Ok(self.tessellation()?.outline()),
        }
    }

    fn emit(&mut self, event: ShapeEvent) {
        if !self.events.contains(&event) {
            self.events.push(event);
        }
    }

    fn input_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for a in &self.anchors {
            a.x.to_bits().hash(&mut hasher);
            a.y.to_bits().hash(&mut hasher);
        }
        for r in &self.radii {
            r.to_bits().hash(&mut hasher);
        }
        self.smoothness.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for Shape {
    fn default() -> Self {
        let mut shape = Self::from_preset(&Preset::default());
        shape.events.clear();
        shape
    }
}
