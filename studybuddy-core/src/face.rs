//! Face expression and layout
//!
//! The dock shows one of two faces: a smile while the phone is docked and
//! a frown while it is out. Both faces share one layout derived from the
//! face centre and radius; they differ only in where the mouth sits, which
//! half of the mouth outline is masked off, and the caption.
//!
//! Layout for radius `r` centred on `(cx, cy)` (integer division):
//!
//! ```text
//! eyes   : (cx ± r/3, cy - r/4), radius r/10
//! mouth  : three outlines of radius r/2, r/2 - 1, r/2 - 2
//! smile  : mouth centre cy + r/3, mask covers the upper half
//! frown  : mouth centre cy + r/2, mask covers the lower half plus 4 px
//! ```

use crate::config::FaceConfig;

/// Pack 8-bit RGB into RGB565
pub const fn color565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// Face fill (warm yellow)
pub const FACE_COLOR: u16 = color565(255, 205, 0);

/// Eyes, mouth and caption
pub const OUTLINE_COLOR: u16 = 0x0000;

/// Concentric outlines drawn for the mouth
pub const MOUTH_STROKES: i32 = 3;

/// Extra width on each side of the mouth mask (px)
const MASK_MARGIN: i32 = 2;

/// Which face to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Expression {
    /// Phone docked: smile, "Phone In :)"
    Present,
    /// Phone out: frown, "Phone Out :("
    Absent,
}

impl Expression {
    /// Length of the longest caption, in characters
    ///
    /// Captions are padded to this width when printed so a shorter caption
    /// fully covers a longer one from the previous frame.
    pub const MAX_CAPTION_LEN: usize = 12;

    /// Select the face for a presence decision
    pub const fn from_presence(present: bool) -> Self {
        if present {
            Expression::Present
        } else {
            Expression::Absent
        }
    }

    /// Whether this face means the phone is docked
    pub const fn is_present(self) -> bool {
        matches!(self, Expression::Present)
    }

    /// Caption printed under the face
    pub const fn caption(self) -> &'static str {
        match self {
            Expression::Present => "Phone In :)",
            Expression::Absent => "Phone Out :(",
        }
    }

    /// Mouth shape for this face
    pub const fn mouth(self) -> MouthShape {
        match self {
            Expression::Present => MouthShape::Smile,
            Expression::Absent => MouthShape::Frown,
        }
    }
}

/// Mouth arc
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MouthShape {
    /// Lower arc, open smile
    Smile,
    /// Upper arc, closed frown
    Frown,
}

impl MouthShape {
    /// Distance of the mouth centre below the face centre
    pub const fn center_offset(self, radius: i32) -> i32 {
        match self {
            MouthShape::Smile => radius / 3,
            MouthShape::Frown => radius / 2,
        }
    }

    /// Rectangle painted in face colour over the unwanted half of the mouth
    ///
    /// The frown mask reaches past the face disc at its lower corners, so
    /// those pixels keep the face colour after switching back to a smile.
    pub const fn mask(self, center: Point, mouth_radius: i32) -> Rect {
        let x = center.x - mouth_radius - MASK_MARGIN;
        let width = (mouth_radius * 2 + MASK_MARGIN * 2) as u32;
        match self {
            MouthShape::Smile => Rect {
                x,
                y: center.y - mouth_radius,
                width,
                height: mouth_radius as u32,
            },
            MouthShape::Frown => Rect {
                x,
                y: center.y,
                width,
                height: (mouth_radius + 4) as u32,
            },
        }
    }
}

/// Pixel position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Circle given by centre and radius
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Circle {
    pub center: Point,
    pub radius: i32,
}

/// Axis-aligned rectangle, top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Caption text and where to print it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Caption {
    pub text: &'static str,
    /// Top-left of the first glyph
    pub position: Point,
    /// Text size multiplier
    pub size: u8,
    pub color: u16,
    /// Painted behind every glyph cell
    pub background: u16,
}

/// Everything needed to paint one face
///
/// Built fresh for every draw; holds no state between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceRenderState {
    pub expression: Expression,
    pub face_color: u16,
    pub outline_color: u16,
    /// Face disc
    pub face: Circle,
    /// Left and right eye discs
    pub eyes: [Circle; 2],
    /// Outermost mouth outline
    pub mouth: Circle,
    /// Number of concentric mouth outlines, each one pixel inside the last
    pub mouth_strokes: i32,
    /// Face-coloured mask that turns the mouth circle into an arc
    pub mask: Rect,
    pub caption: Caption,
}

impl FaceRenderState {
    /// Lay out `expression` for the configured face
    pub fn new(config: &FaceConfig, expression: Expression) -> Self {
        let r = config.radius;
        let center = Point::new(config.center_x, config.center_y);

        let eye_y = center.y - r / 4;
        let eye_dx = r / 3;
        let eye_r = r / 10;

        let shape = expression.mouth();
        let mouth_r = r / 2;
        let mouth_center = Point::new(center.x, center.y + shape.center_offset(r));

        Self {
            expression,
            face_color: FACE_COLOR,
            outline_color: OUTLINE_COLOR,
            face: Circle { center, radius: r },
            eyes: [
                Circle {
                    center: Point::new(center.x - eye_dx, eye_y),
                    radius: eye_r,
                },
                Circle {
                    center: Point::new(center.x + eye_dx, eye_y),
                    radius: eye_r,
                },
            ],
            mouth: Circle {
                center: mouth_center,
                radius: mouth_r,
            },
            mouth_strokes: MOUTH_STROKES,
            mask: shape.mask(mouth_center, mouth_r),
            caption: Caption {
                text: expression.caption(),
                position: Point::new(config.caption_x, config.caption_y),
                size: config.text_size,
                color: OUTLINE_COLOR,
                background: config.background_color,
            },
        }
    }

    /// The mouth outlines, outermost first
    pub fn mouth_outlines(&self) -> impl Iterator<Item = Circle> {
        let mouth = self.mouth;
        (0..self.mouth_strokes).map(move |t| Circle {
            center: mouth.center,
            radius: mouth.radius - t,
        })
    }
}
