//! Face renderer
//!
//! Paints a laid-out face with the canvas primitives. Every call repaints
//! the whole face and caption; nothing is remembered between frames.

use heapless::String;
use studybuddy_core::config::FaceConfig;
use studybuddy_core::face::{Expression, FaceRenderState};

use crate::backend::{FaceCanvas, TextStyle};
use crate::color::rgb565;

/// Printed caption width, in characters
const CAPTION_WIDTH: usize = Expression::MAX_CAPTION_LEN;

/// Pad a caption with spaces so it overwrites any previous caption
fn padded_caption(text: &str) -> String<CAPTION_WIDTH> {
    let mut padded = String::new();
    for c in text.chars().chain(core::iter::repeat(' ')).take(CAPTION_WIDTH) {
        if padded.push(c).is_err() {
            break;
        }
    }
    padded
}

/// Paint one face
///
/// Order matters: face disc, eyes, mouth outlines, the mask that cuts the
/// mouth circle down to an arc, then the caption.
pub fn render<C: FaceCanvas>(canvas: &mut C, face: &FaceRenderState) -> Result<(), C::Error> {
    let face_color = rgb565(face.face_color);
    let outline_color = rgb565(face.outline_color);

    canvas.fill_circle(face.face, face_color)?;

    for eye in face.eyes {
        canvas.fill_circle(eye, outline_color)?;
    }

    for outline in face.mouth_outlines() {
        canvas.draw_circle(outline, outline_color)?;
    }

    canvas.fill_rect(face.mask, face_color)?;

    let caption = &face.caption;
    let style = TextStyle {
        color: rgb565(caption.color),
        background: Some(rgb565(caption.background)),
        size: caption.size,
    };
    canvas.draw_text(&padded_caption(caption.text), caption.position, style)
}

/// Face display
///
/// Owns the canvas and the face geometry, fixed at construction.
pub struct FaceDisplay<C> {
    canvas: C,
    geometry: FaceConfig,
}

impl<C: FaceCanvas> FaceDisplay<C> {
    /// Create a face display on `canvas`
    pub fn new(canvas: C, geometry: FaceConfig) -> Self {
        Self { canvas, geometry }
    }

    /// Repaint the face for `expression`
    pub fn draw(&mut self, expression: Expression) -> Result<(), C::Error> {
        let face = FaceRenderState::new(&self.geometry, expression);
        render(&mut self.canvas, &face)
    }

    /// Face geometry
    pub fn geometry(&self) -> &FaceConfig {
        &self.geometry
    }

    /// Access the canvas, e.g. to clear the screen at start-up
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// Give the canvas back
    pub fn release(self) -> C {
        self.canvas
    }
}
