//! Canvas trait
//!
//! Defines the drawing primitives the face renderer needs. Any RGB565
//! `embedded-graphics` draw target gets them for free.

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle as EgCircle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment,
};
use embedded_graphics::text::{Baseline, Text};

use studybuddy_core::face::{Circle, Point as FacePoint, Rect};

/// How to print a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub color: Rgb565,
    /// Colour painted behind each glyph cell; `None` leaves it untouched
    pub background: Option<Rgb565>,
    /// Size multiplier; each glyph pixel becomes a `size` x `size` block
    pub size: u8,
}

/// 5x8 glyphs on a 6x8 grid, the cell of classic GFX text
const GLYPH_FONT: MonoFont<'static> = MonoFont {
    character_spacing: 1,
    ..FONT_5X8
};

impl TextStyle {
    /// Pixel scale, never below 1
    pub fn scale(&self) -> u32 {
        self.size.max(1) as u32
    }

    /// Footprint of one character cell on screen
    pub fn cell_size(&self) -> Size {
        Size::new(
            GLYPH_FONT.character_size.width + GLYPH_FONT.character_spacing,
            GLYPH_FONT.character_size.height,
        ) * self.scale()
    }
}

/// Draw target that blows every pixel up to a `scale` x `scale` block
///
/// Coordinates are scaled around `origin`, so text anchored there keeps
/// its top-left corner.
struct Scaled<'a, D> {
    target: &'a mut D,
    origin: Point,
    scale: u32,
}

impl<D: DrawTarget> Scaled<'_, D> {
    fn block(&self, area: &Rectangle) -> Rectangle {
        let top_left = self.origin + (area.top_left - self.origin) * self.scale as i32;
        Rectangle::new(top_left, area.size * self.scale)
    }
}

impl<D: DrawTarget> Dimensions for Scaled<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        let bounds = self.target.bounding_box();
        Rectangle::new(
            self.origin + (bounds.top_left - self.origin) / self.scale as i32,
            bounds.size / self.scale,
        )
    }
}

impl<D: DrawTarget> DrawTarget for Scaled<'_, D> {
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let area = self.block(&Rectangle::new(point, Size::new(1, 1)));
            self.target.fill_solid(&area, color)?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = self.block(area);
        self.target.fill_solid(&area, color)
    }
}

/// Canvas trait
///
/// Provides the primitives a face is built from. Errors come straight from
/// the underlying display driver.
pub trait FaceCanvas {
    /// Driver error
    type Error;

    /// Fill a disc
    fn fill_circle(&mut self, circle: Circle, color: Rgb565) -> Result<(), Self::Error>;

    /// Draw a one pixel wide circle outline
    ///
    /// The outline covers the outermost pixels of the matching filled disc.
    fn draw_circle(&mut self, circle: Circle, color: Rgb565) -> Result<(), Self::Error>;

    /// Fill a rectangle
    fn fill_rect(&mut self, rect: Rect, color: Rgb565) -> Result<(), Self::Error>;

    /// Print text with its top-left corner at `position`
    fn draw_text(
        &mut self,
        text: &str,
        position: FacePoint,
        style: TextStyle,
    ) -> Result<(), Self::Error>;
}

/// Bounding box of a circle of radius `r`, `2r + 1` pixels across
fn bounding_circle(circle: Circle) -> EgCircle {
    let diameter = (circle.radius.max(0) * 2 + 1) as u32;
    EgCircle::with_center(to_point(circle.center), diameter)
}

fn to_point(p: FacePoint) -> Point {
    Point::new(p.x, p.y)
}

impl<D> FaceCanvas for D
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn fill_circle(&mut self, circle: Circle, color: Rgb565) -> Result<(), Self::Error> {
        let style = PrimitiveStyleBuilder::new().fill_color(color).build();
        bounding_circle(circle).into_styled(style).draw(self)
    }

    fn draw_circle(&mut self, circle: Circle, color: Rgb565) -> Result<(), Self::Error> {
        let style = PrimitiveStyleBuilder::new()
            .stroke_color(color)
            .stroke_width(1)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        bounding_circle(circle).into_styled(style).draw(self)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb565) -> Result<(), Self::Error> {
        let area = Rectangle::new(
            Point::new(rect.x, rect.y),
            Size::new(rect.width, rect.height),
        );
        self.fill_solid(&area, color)
    }

    fn draw_text(
        &mut self,
        text: &str,
        position: FacePoint,
        style: TextStyle,
    ) -> Result<(), Self::Error> {
        let mut builder = MonoTextStyleBuilder::new()
            .font(&GLYPH_FONT)
            .text_color(style.color);
        if let Some(background) = style.background {
            builder = builder.background_color(background);
        }
        let origin = to_point(position);
        let mut scaled = Scaled {
            target: self,
            origin,
            scale: style.scale(),
        };
        Text::with_baseline(text, origin, builder.build(), Baseline::Top)
            .draw(&mut scaled)
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    fn circle(x: i32, y: i32, radius: i32) -> Circle {
        Circle {
            center: FacePoint::new(x, y),
            radius,
        }
    }

    fn text_style(size: u8) -> TextStyle {
        TextStyle {
            color: Rgb565::BLACK,
            background: Some(Rgb565::WHITE),
            size,
        }
    }

    #[test]
    fn test_cell_size() {
        assert_eq!(text_style(0).cell_size(), Size::new(6, 8));
        assert_eq!(text_style(1).cell_size(), Size::new(6, 8));
        assert_eq!(text_style(2).cell_size(), Size::new(12, 16));
        assert_eq!(text_style(3).cell_size(), Size::new(18, 24));
    }

    #[test]
    fn test_fill_circle_extent() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display
            .fill_circle(circle(10, 10, 4), Rgb565::RED)
            .unwrap();
        assert_eq!(
            display.affected_area(),
            Rectangle::new(Point::new(6, 6), Size::new(9, 9))
        );
        assert_eq!(display.get_pixel(Point::new(10, 10)), Some(Rgb565::RED));
    }

    #[test]
    fn test_outline_matches_disc_edge() {
        let mut filled: MockDisplay<Rgb565> = MockDisplay::new();
        filled.fill_circle(circle(10, 10, 5), Rgb565::RED).unwrap();

        let mut outline: MockDisplay<Rgb565> = MockDisplay::new();
        outline.draw_circle(circle(10, 10, 5), Rgb565::RED).unwrap();

        assert_eq!(filled.affected_area(), outline.affected_area());
        // Hollow in the middle
        assert_eq!(outline.get_pixel(Point::new(10, 10)), None);
        assert_eq!(outline.get_pixel(Point::new(10, 5)), Some(Rgb565::RED));
    }

    #[test]
    fn test_fill_rect() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display
            .fill_rect(
                Rect {
                    x: 2,
                    y: 3,
                    width: 4,
                    height: 5,
                },
                Rgb565::BLUE,
            )
            .unwrap();
        assert_eq!(
            display.affected_area(),
            Rectangle::new(Point::new(2, 3), Size::new(4, 5))
        );
    }

    #[test]
    fn test_text_background_fills_cells() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display
            .draw_text("  ", FacePoint::new(0, 0), text_style(1))
            .unwrap();
        // Two blank glyphs and the column between them, fully painted
        assert_eq!(
            display.affected_area(),
            Rectangle::new(Point::zero(), Size::new(11, 8))
        );
        assert_eq!(display.get_pixel(Point::new(5, 7)), Some(Rgb565::WHITE));
        assert_eq!(display.get_pixel(Point::new(10, 7)), Some(Rgb565::WHITE));
    }

    #[test]
    fn test_double_size_text() {
        let mut small: MockDisplay<Rgb565> = MockDisplay::new();
        small
            .draw_text("A:", FacePoint::new(0, 0), text_style(1))
            .unwrap();

        let mut large: MockDisplay<Rgb565> = MockDisplay::new();
        large
            .draw_text("A:", FacePoint::new(3, 4), text_style(2))
            .unwrap();

        assert_eq!(
            large.affected_area(),
            Rectangle::new(Point::new(3, 4), Size::new(22, 16))
        );
        for y in 0..8 {
            for x in 0..11 {
                let expected = small.get_pixel(Point::new(x, y));
                for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                    let p = Point::new(3 + 2 * x + dx, 4 + 2 * y + dy);
                    assert_eq!(large.get_pixel(p), expected, "{:?}", p);
                }
            }
        }
    }
}
