use crate::error::Error;
use crate::types::{Color, Pos};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};
pub(crate) struct Painter {
    pub(crate) canvas: Pixmap,
    anti_alias: bool,
}
impl Painter {
    pub(crate) fn new(background: Color, anti_alias: bool, mut canvas: Pixmap) -> Self {
        canvas.fill(background.to_col(1.0));
        Self { canvas, anti_alias }
    }
    fn paint(&self, color: &Color, opacity: f32, anti_alias: bool) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color.to_col(opacity));
        paint.anti_alias = anti_alias;
        paint
    }
    pub(crate) fn line_segment(&mut self, p: [Pos; 2], width: f32, color: &Color) {
        let mut path = PathBuilder::new();
        path.move_to(p[0].x, p[0].y);
        path.line_to(p[1].x, p[1].y);
        let Some(path) = path.finish() else {
            return;
        };
        let stroke = Stroke {
            width,
            ..Default::default()
        };
        self.canvas.stroke_path(
            &path,
            &self.paint(color, 1.0, self.anti_alias),
            &stroke,
            Transform::identity(),
            None,
        );
    }
    pub(crate) fn circle_filled(&mut self, p: Pos, color: &Color, size: f32, opacity: f32) {
        let Some(path) = PathBuilder::from_circle(p.x, p.y, size * 0.5) else {
            return;
        };
        self.canvas.fill_path(
            &path,
            &self.paint(color, opacity, self.anti_alias),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
    ///quads are never anti aliased so neighbours meet without seams
    pub(crate) fn quad_filled(&mut self, p: [Pos; 4], color: &Color) {
        let mut path = PathBuilder::new();
        path.move_to(p[0].x, p[0].y);
        for p in &p[1..] {
            path.line_to(p.x, p.y);
        }
        path.close();
        let Some(path) = path.finish() else {
            return;
        };
        self.canvas.fill_path(
            &path,
            &self.paint(color, 1.0, false),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
    ///copies the canvas into a 0RGB window buffer
    pub(crate) fn save<T>(&self, buffer: &mut T)
    where
        T: std::ops::DerefMut<Target = [u32]>,
    {
        let pixels: &[[u8; 4]] = bytemuck::cast_slice(self.canvas.data());
        for (b, p) in buffer.iter_mut().zip(pixels) {
            *b = ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32;
        }
    }
    pub(crate) fn save_png(&self) -> Result<Vec<u8>, Error> {
        self.canvas
            .encode_png()
            .map_err(|e| Error::Png(e.to_string()))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn background_and_buffer() {
        let canvas = Pixmap::new(4, 2).unwrap();
        let painter = Painter::new(Color::new(1, 2, 3), true, canvas);
        let mut buffer = vec![0u32; 8];
        painter.save(&mut buffer);
        assert!(buffer.iter().all(|p| *p == 0x010203));
    }
    #[test]
    fn quad_covers_center() {
        let canvas = Pixmap::new(10, 10).unwrap();
        let mut painter = Painter::new(Color::splat(255), true, canvas);
        painter.quad_filled(
            [
                Pos::new(2.0, 2.0),
                Pos::new(8.0, 2.0),
                Pos::new(8.0, 8.0),
                Pos::new(2.0, 8.0),
            ],
            &Color::RED,
        );
        let p = painter.canvas.pixel(5, 5).unwrap();
        assert_eq!((p.red(), p.green(), p.blue()), (255, 0, 0));
        let p = painter.canvas.pixel(0, 0).unwrap();
        assert_eq!((p.red(), p.green(), p.blue()), (255, 255, 255));
    }
    #[test]
    fn png_signature() {
        let canvas = Pixmap::new(3, 3).unwrap();
        let painter = Painter::new(Color::splat(0), false, canvas);
        let png = painter.save_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
