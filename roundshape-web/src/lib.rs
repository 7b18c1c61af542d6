/// roundshape Web - WASM bindings for rounded shape tessellation
///
/// Exposes the tessellator to JavaScript with flat arrays in and out, ready
/// to be copied into vertex and index buffers.

use nalgebra::Point2;
use roundshape_core::{Preset, TessellationResult};
use wasm_bindgen::prelude::*;

/// Arc vertices allowed per corner from JavaScript
pub const MAX_SMOOTHNESS: u32 = 1024;

/// Tessellated mesh handed to JavaScript
#[wasm_bindgen]
pub struct WebMesh {
    result: TessellationResult,
}

#[wasm_bindgen]
impl WebMesh {
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize {
        self.result.vertices.len()
    }

    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> usize {
        self.result.triangles.len()
    }

    pub fn vertices_x(&self) -> Vec<f32> {
        self.result.vertices.iter().map(|v| v.position.x).collect()
    }

    pub fn vertices_y(&self) -> Vec<f32> {
        self.result.vertices.iter().map(|v| v.position.y).collect()
    }

    pub fn u(&self) -> Vec<f32> {
        self.result.vertices.iter().map(|v| v.uv.x).collect()
    }

    pub fn v(&self) -> Vec<f32> {
        self.result.vertices.iter().map(|v| v.uv.y).collect()
    }

    /// Triangle list as a flat index buffer
    pub fn indices(&self) -> Vec<u32> {
        self.result.flat_indices()
    }
}

/// Tessellate from parallel arrays. Negative smoothness counts as 0 and
/// anything above [`MAX_SMOOTHNESS`] is clamped to it.
#[wasm_bindgen]
pub fn tessellate(
    anchors_x: &[f32],
    anchors_y: &[f32],
    radii: &[f32],
    smoothness: &[i32],
) -> Result<WebMesh, JsError> {
    if anchors_x.len() != anchors_y.len() {
        return Err(JsError::new(&format!(
            "anchor coordinate arrays differ in length: {} x values, {} y values",
            anchors_x.len(),
            anchors_y.len()
        )));
    }
    let anchors = points_from_xy(anchors_x, anchors_y);
    let smoothness = clamp_smoothness(smoothness);

    let result = roundshape_core::tessellate(&anchors, radii, &smoothness)?;
    log::debug!("tessellated {} anchors into {} vertices", anchors.len(), result.vertices.len());
    Ok(WebMesh { result })
}

/// Tessellate a preset given as `{ kind: "star", points: 5, ... }`
#[wasm_bindgen]
pub fn tessellate_preset(preset: JsValue) -> Result<WebMesh, JsError> {
    let preset: Preset = serde_wasm_bindgen::from_value(preset)?;
    let result = preset.build().tessellate()?;
    Ok(WebMesh { result })
}

fn clamp_smoothness(values: &[i32]) -> Vec<u32> {
    values
        .iter()
        .map(|&s| (s.max(0) as u32).min(MAX_SMOOTHNESS))
        .collect()
}

fn points_from_xy(xs: &[f32], ys: &[f32]) -> Vec<Point2<f32>> {
    xs.iter().zip(ys).map(|(&x, &y)| Point2::new(x, y)).collect()
}

cfg_if::cfg_if! {
    if #[cfg(feature = "console_error_panic_hook")] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
            announce();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            init_logger();
            announce();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {}

fn announce() {
    web_sys::console::debug_1(&JsValue::from_str(&format!(
        "roundshape-web {} loaded",
        env!("CARGO_PKG_VERSION")
    )));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_from_xy() {
        let points = points_from_xy(&[1.0, 2.0], &[3.0, 4.0]);
        assert_eq!(points, vec![Point2::new(1.0, 3.0), Point2::new(2.0, 4.0)]);
    }

    #[test]
    fn test_clamp_smoothness() {
        assert_eq!(clamp_smoothness(&[-3, 0, 8, i32::MAX]), vec![0, 0, 8, MAX_SMOOTHNESS]);
    }

    #[test]
    fn test_huge_smoothness_is_capped() {
        let mesh = tessellate(
            &[1.0, 1.0, -1.0, -1.0],
            &[-1.0, 1.0, 1.0, -1.0],
            &[0.5, 0.0, 0.0, 0.0],
            &[i32::MAX, 1, 1, 1],
        )
        .ok()
        .unwrap();
        assert_eq!(mesh.vertex_count(), MAX_SMOOTHNESS as usize + 3);
    }

    #[test]
    fn test_web_mesh_buffers() {
        let mesh = tessellate(
            &[1.0, 1.0, -1.0, -1.0],
            &[-1.0, 1.0, 1.0, -1.0],
            &[0.5, 0.0, 0.0, 0.0],
            &[4, 1, -3, 1],
        )
        .ok()
        .unwrap();
        assert_eq!(mesh.vertex_count(), 7);
        assert_eq!(mesh.triangle_count(), 5);
        assert_eq!(mesh.indices().len(), 15);
        assert_eq!(mesh.vertices_x().len(), mesh.u().len());
        assert_eq!(mesh.vertices_y().len(), mesh.v().len());
    }
}
