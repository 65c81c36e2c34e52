mod error;
pub mod grid;
#[cfg(feature = "serde")]
mod save;
pub mod showcase;
pub mod types;
mod ui;
#[cfg(feature = "winit")]
mod window;
pub use crate::error::Error;
pub use crate::grid::{Mesh, cos_radial, grid, height_field, linspace, ones, outer};
use crate::types::*;
use crate::ui::Painter;
use log::{debug, trace};
#[cfg(feature = "serde")]
use log::warn;
#[cfg(feature = "rayon")]
use rayon::slice::ParallelSliceMut;
use std::f64::consts::{PI, TAU};
///markers and grid lines sit on their surface, this keeps them in front of the quads they touch
const ON_SURFACE_BIAS: f32 = 0.01;
///maps data coordinates into the cube [-1, 1]³
struct Bounds {
    center: Vec3,
    half: Vec3,
}
impl Bounds {
    fn new(data: &[Trace]) -> Self {
        let mut min = Vec3::splat(f64::INFINITY);
        let mut max = Vec3::splat(f64::NEG_INFINITY);
        for p in data.iter().flat_map(|t| t.points()) {
            if !p.is_finite() {
                continue;
            }
            min = Vec3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Vec3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }
        let axis = |a: f64, b: f64| {
            if a.is_finite() && b.is_finite() {
                let h = (b - a) * 0.5;
                ((a + b) * 0.5, if h > 0.0 { h } else { 1.0 })
            } else {
                (0.0, 1.0)
            }
        };
        let (cx, hx) = axis(min.x, max.x);
        let (cy, hy) = axis(min.y, max.y);
        let (cz, hz) = axis(min.z, max.z);
        Self {
            center: Vec3::new(cx, cy, cz),
            half: Vec3::new(hx, hy, hz),
        }
    }
    fn normalize(&self, p: Vec3) -> Vec3 {
        (p - self.center) / self.half
    }
}
impl Figure {
    ///creates a new figure owning the given traces, with a default layout
    pub fn new(data: Vec<Trace>) -> Self {
        debug!("new figure with {} traces", data.len());
        Self {
            data,
            ..Default::default()
        }
    }
    pub fn add_trace<T>(&mut self, trace: T)
    where
        T: Into<Trace>,
    {
        self.data.push(trace.into());
    }
    ///replaces the layout
    pub fn update_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }
    pub fn layout(&self) -> &Layout {
        &self.layout
    }
    pub fn traces(&self) -> &[Trace] {
        &self.data
    }
    ///restores the initial view
    pub fn reset_3d(&mut self) {
        self.angle = Vec2::splat(PI / 6.0);
        self.box_size = 3.0f64.sqrt();
        self.last_interact = None;
    }
    #[cfg(feature = "winit")]
    ///opens a window showing the figure and blocks until it is closed
    pub fn show(self) -> Result<(), Error> {
        window::show(self)
    }
    ///repaints a window buffer of width x height pixels
    pub fn update<T>(&mut self, width: u32, height: u32, buffer: &mut T) -> Result<(), Error>
    where
        T: std::ops::DerefMut<Target = [u32]>,
    {
        let canvas = match self.canvas.take() {
            Some(canvas) if (canvas.width(), canvas.height()) == (width, height) => canvas,
            _ => tiny_skia::Pixmap::new(width, height).ok_or(Error::Canvas(width, height))?,
        };
        let painter = self.get_img(width, height, canvas)?;
        painter.save(buffer);
        self.canvas = Some(painter.canvas);
        Ok(())
    }
    ///draws the figure onto a fresh width x height canvas
    pub fn render(&mut self, width: u32, height: u32) -> Result<tiny_skia::Pixmap, Error> {
        let canvas = tiny_skia::Pixmap::new(width, height).ok_or(Error::Canvas(width, height))?;
        Ok(self.get_img(width, height, canvas)?.canvas)
    }
    ///get png data at the layout size
    pub fn get_png(&mut self) -> Result<Vec<u8>, Error> {
        self.get_png_sized(self.layout.width, self.layout.height)
    }
    ///get png data
    pub fn get_png_sized(&mut self, width: u32, height: u32) -> Result<Vec<u8>, Error> {
        let canvas = tiny_skia::Pixmap::new(width, height).ok_or(Error::Canvas(width, height))?;
        self.get_img(width, height, canvas)?.save_png()
    }
    fn get_img(
        &mut self,
        width: u32,
        height: u32,
        canvas: tiny_skia::Pixmap,
    ) -> Result<Painter, Error> {
        self.set_screen(width, height)?;
        let mut painter = Painter::new(self.layout.background_color, self.anti_alias, canvas);
        self.update_inner(&mut painter);
        Ok(painter)
    }
    fn set_screen(&mut self, width: u32, height: u32) -> Result<(), Error> {
        let (offset, screen) = self.layout.plot_area(width, height)?;
        self.screen_offset = offset;
        self.screen = screen;
        self.delta = self.screen.x.min(self.screen.y) * 0.5;
        Ok(())
    }
    fn update_inner(&mut self, painter: &mut Painter) {
        (self.sin_phi, self.cos_phi) = self.angle.x.sin_cos();
        (self.sin_theta, self.cos_theta) = self.angle.y.sin_cos();
        let bounds = Bounds::new(&self.data);
        let mut buffer = self.plot(&bounds);
        self.write_axis_3d(&mut buffer);
        #[cfg(feature = "rayon")]
        buffer.par_sort_unstable_by(|a, b| a.0.total_cmp(&b.0));
        #[cfg(not(feature = "rayon"))]
        buffer.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));
        debug!(
            "painting {} primitives into {}x{}",
            buffer.len(),
            self.screen.x,
            self.screen.y
        );
        for (_, a, c) in buffer {
            match a {
                Draw::Line(a, b, width) => painter.line_segment([a, b], width, &c),
                Draw::Point(a, size, opacity) => painter.circle_filled(a, &c, size, opacity),
                Draw::Quad(p) => painter.quad_filled(p, &c),
            }
        }
    }
    ///screen position and depth of a point in the unit cube, larger depth is closer to the viewer
    fn vec3_to_pos_depth(&self, p: Vec3) -> (Pos, f32) {
        let x1 = p.x * self.cos_phi + p.y * self.sin_phi;
        let y1 = -p.x * self.sin_phi + p.y * self.cos_phi;
        let z2 = -p.z * self.cos_theta - y1 * self.sin_theta;
        let s = self.delta / self.box_size;
        let x = (x1 * s + self.screen_offset.x + self.screen.x * 0.5) as f32;
        let y = (z2 * s + self.screen_offset.y + self.screen.y * 0.5) as f32;
        (
            Pos::new(x, y),
            ((p.z * self.sin_theta - y1 * self.cos_theta) / (2.0 * 3.0f64.sqrt()) + 0.5) as f32,
        )
    }
    fn plot(&self, bounds: &Bounds) -> Vec<(f32, Draw, Color)> {
        let mut buffer = Vec::new();
        for trace in &self.data {
            match trace {
                Trace::Surface(surface) => self.plot_surface(surface, bounds, &mut buffer),
                Trace::Scatter3d(scatter) => self.plot_scatter(scatter, bounds, &mut buffer),
            }
        }
        buffer
    }
    fn plot_surface(
        &self,
        surface: &Surface,
        bounds: &Bounds,
        buffer: &mut Vec<(f32, Draw, Color)>,
    ) {
        let (rows, cols) = surface.z.shape();
        let project = |i: usize, j: usize| -> Option<(Pos, f32)> {
            let v = Vec3::new(
                surface.x.get(i, j)?,
                surface.y.get(i, j)?,
                surface.z.get(i, j)?,
            );
            if !v.is_finite() {
                return None;
            }
            Some(self.vec3_to_pos_depth(bounds.normalize(v)))
        };
        let points = (0..rows * cols)
            .map(|k| project(k / cols, k % cols))
            .collect::<Vec<Option<(Pos, f32)>>>();
        let skipped = points.iter().filter(|p| p.is_none()).count();
        if skipped != 0 {
            trace!("surface has {skipped} non finite points");
        }
        let (zmin, zmax) = surface.z.min_max().unwrap_or((0.0, 0.0));
        let range = zmax - zmin;
        for i in 0..rows.saturating_sub(1) {
            for j in 0..cols.saturating_sub(1) {
                let corners = [(i, j), (i, j + 1), (i + 1, j + 1), (i + 1, j)];
                let Some(quad) = corners
                    .iter()
                    .map(|(a, b)| points[a * cols + b])
                    .collect::<Option<Vec<(Pos, f32)>>>()
                else {
                    continue;
                };
                let depth = quad.iter().map(|q| q.1).sum::<f32>() * 0.25;
                let z = corners
                    .iter()
                    .filter_map(|(a, b)| surface.z.get(*a, *b))
                    .sum::<f64>()
                    * 0.25;
                let t = if range > 0.0 { (z - zmin) / range } else { 0.5 };
                buffer.push((
                    depth,
                    Draw::Quad([quad[0].0, quad[1].0, quad[2].0, quad[3].0]),
                    surface.colorscale.sample(t),
                ));
            }
        }
        if self.show_lines && surface.show_lines {
            let mut edge = |a: usize, b: usize| {
                if let (Some(a), Some(b)) = (points[a], points[b]) {
                    line(
                        buffer,
                        (a.1 + b.1) * 0.5 + ON_SURFACE_BIAS,
                        a.0,
                        b.0,
                        surface.line_color,
                        1.0,
                    );
                }
            };
            for i in 0..rows {
                for j in 0..cols {
                    let k = i * cols + j;
                    if j + 1 < cols {
                        edge(k, k + 1);
                    }
                    if i + 1 < rows {
                        edge(k, k + cols);
                    }
                }
            }
        }
    }
    fn plot_scatter(
        &self,
        scatter: &Scatter3d,
        bounds: &Bounds,
        buffer: &mut Vec<(f32, Draw, Color)>,
    ) {
        let mut last: Option<(Pos, f32)> = None;
        for ((x, y), z) in scatter.x.iter().zip(&scatter.y).zip(&scatter.z) {
            let v = Vec3::new(*x, *y, *z);
            if !v.is_finite() {
                trace!("skipping non finite scatter point {v:?}");
                last = None;
                continue;
            }
            let (pos, depth) = self.vec3_to_pos_depth(bounds.normalize(v));
            if scatter.mode.lines()
                && let Some((l, d)) = last
            {
                line(
                    buffer,
                    (depth + d) * 0.5 + ON_SURFACE_BIAS,
                    l,
                    pos,
                    scatter.marker.color,
                    scatter.line_width,
                );
            }
            if scatter.mode.markers() {
                point(
                    buffer,
                    depth + ON_SURFACE_BIAS,
                    pos,
                    scatter.marker.color,
                    scatter.marker.size,
                    scatter.marker.opacity,
                );
            }
            last = Some((pos, depth));
        }
    }
    fn write_axis_3d(&self, buffer: &mut Vec<(f32, Draw, Color)>) {
        if !self.show_box {
            return;
        }
        let s = 1.0;
        let vertices = [
            self.vec3_to_pos_depth(Vec3::new(-s, -s, -s)),
            self.vec3_to_pos_depth(Vec3::new(-s, -s, s)),
            self.vec3_to_pos_depth(Vec3::new(-s, s, -s)),
            self.vec3_to_pos_depth(Vec3::new(-s, s, s)),
            self.vec3_to_pos_depth(Vec3::new(s, -s, -s)),
            self.vec3_to_pos_depth(Vec3::new(s, -s, s)),
            self.vec3_to_pos_depth(Vec3::new(s, s, -s)),
            self.vec3_to_pos_depth(Vec3::new(s, s, s)),
        ];
        let edges = [
            (0, 1),
            (1, 3),
            (3, 2),
            (2, 0),
            (4, 5),
            (5, 7),
            (7, 6),
            (6, 4),
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ];
        let m = edges
            .iter()
            .map(|(i, j)| vertices[*i].1 + vertices[*j].1)
            .sum::<f32>()
            / edges.len() as f32;
        //edges behind the middle of the box go under everything, the rest over
        for (i, j) in edges {
            line(
                buffer,
                if vertices[i].1 + vertices[j].1 < m {
                    f32::NEG_INFINITY
                } else {
                    f32::INFINITY
                },
                vertices[i].0,
                vertices[j].0,
                self.axis_color,
                self.line_width,
            );
        }
    }
    ///process the current keys and pointer inputs, see Keybinds for more info,
    ///returns weather the figure needs to be redrawn
    pub fn keybinds(&mut self, i: &InputState) -> bool {
        let keybinds = self.keybinds;
        let mut redraw = false;
        if i.pointer == Some(false)
            && let (Some(interact), Some(last)) = (i.pointer_pos, self.last_interact)
        {
            let delta = interact - last;
            if delta != Vec2::splat(0.0) {
                self.angle.x = (self.angle.x - delta.x / 512.0).rem_euclid(TAU);
                self.angle.y = (self.angle.y + delta.y / 512.0).rem_euclid(TAU);
                redraw = true;
            }
        }
        self.last_interact = i.pointer_pos;
        if i.raw_scroll_delta != Vec2::splat(0.0) {
            self.angle.x = (self.angle.x - i.raw_scroll_delta.x / 512.0).rem_euclid(TAU);
            self.angle.y = (self.angle.y + i.raw_scroll_delta.y / 512.0).rem_euclid(TAU);
            redraw = true;
        }
        let b = PI / 64.0;
        if i.keys_pressed(keybinds.left) {
            self.angle.x = ((self.angle.x / b - 1.0).round() * b).rem_euclid(TAU);
            redraw = true;
        }
        if i.keys_pressed(keybinds.right) {
            self.angle.x = ((self.angle.x / b + 1.0).round() * b).rem_euclid(TAU);
            redraw = true;
        }
        if i.keys_pressed(keybinds.up) {
            self.angle.y = ((self.angle.y / b - 1.0).round() * b).rem_euclid(TAU);
            redraw = true;
        }
        if i.keys_pressed(keybinds.down) {
            self.angle.y = ((self.angle.y / b + 1.0).round() * b).rem_euclid(TAU);
            redraw = true;
        }
        let mut changed = false;
        if i.keys_pressed(keybinds.zoom_in) && self.box_size > 0.1 {
            self.box_size -= 0.1;
            changed = true
        }
        if i.keys_pressed(keybinds.zoom_out) {
            self.box_size += 0.1;
            changed = true
        }
        if changed {
            if (self.box_size - 1.0).abs() < 0.05 {
                self.box_size = 1.0
            }
            if (self.box_size - 2.0f64.sqrt()).abs() < 0.05 {
                self.box_size = 2.0f64.sqrt()
            }
            if (self.box_size - 3.0f64.sqrt()).abs() < 0.05 {
                self.box_size = 3.0f64.sqrt()
            }
            redraw = true;
        }
        if i.keys_pressed(keybinds.show_box) {
            self.show_box = !self.show_box;
            redraw = true;
        }
        if i.keys_pressed(keybinds.lines) {
            self.show_lines = !self.show_lines;
            redraw = true;
        }
        if i.keys_pressed(keybinds.anti_alias) {
            self.anti_alias = !self.anti_alias;
            redraw = true;
        }
        if i.keys_pressed(keybinds.reset) {
            self.reset_3d();
            redraw = true;
        }
        #[cfg(feature = "serde")]
        if i.keys_pressed(keybinds.save) && !self.save_path.is_empty() {
            if let Err(e) = self.save_file(&self.save_path) {
                warn!("could not save to {}: {e}", self.save_path);
            }
        }
        if redraw {
            trace!(
                "view angle {:.3} {:.3}, box {:.3}",
                self.angle.x, self.angle.y, self.box_size
            );
        }
        redraw
    }
}
fn line(
    buffer: &mut Vec<(f32, Draw, Color)>,
    depth: f32,
    start: Pos,
    end: Pos,
    color: Color,
    line_width: f32,
) {
    if start.is_finite() && end.is_finite() {
        buffer.push((depth, Draw::Line(start, end, line_width), color))
    }
}
fn point(
    buffer: &mut Vec<(f32, Draw, Color)>,
    depth: f32,
    point: Pos,
    color: Color,
    size: f32,
    opacity: f32,
) {
    if point.is_finite() {
        buffer.push((depth, Draw::Point(point, size, opacity), color))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn figure() -> Figure {
        let (x, y) = grid(-1.0, 1.0, 3);
        let z = height_field(&x, &y, |a, b| a + b).unwrap();
        let mut figure = Figure::new(vec![Surface::new(x, y, z).unwrap().into()]);
        figure.add_trace(Scatter3d::new(vec![0.0], vec![0.0], vec![0.0]).unwrap());
        figure.update_layout(Layout::new().width(200).height(200).margin(
            Margin::new().left(10).right(10).top(10).bottom(10),
        ));
        figure
    }
    #[test_log::test]
    fn primitive_counts() {
        let mut figure = figure();
        figure.set_screen(200, 200).unwrap();
        let bounds = Bounds::new(&figure.data);
        let buffer = figure.plot(&bounds);
        let quads = buffer
            .iter()
            .filter(|b| matches!(b.1, Draw::Quad(_)))
            .count();
        let points = buffer
            .iter()
            .filter(|b| matches!(b.1, Draw::Point(..)))
            .count();
        assert_eq!(quads, 4);
        assert_eq!(points, 1);
        let mut with_box = buffer.clone();
        figure.write_axis_3d(&mut with_box);
        assert_eq!(with_box.len(), buffer.len() + 12);
    }
    #[test_log::test]
    fn grid_lines_need_both_flags() {
        let mut figure = figure();
        figure.set_screen(200, 200).unwrap();
        let bounds = Bounds::new(&figure.data);
        let lines = |f: &Figure| {
            f.plot(&bounds)
                .iter()
                .filter(|b| matches!(b.1, Draw::Line(..)))
                .count()
        };
        assert_eq!(lines(&figure), 0);
        if let Trace::Surface(s) = &mut figure.data[0] {
            s.show_lines = true;
        }
        assert_eq!(lines(&figure), 12);
        figure.show_lines = false;
        assert_eq!(lines(&figure), 0);
    }
    #[test]
    fn center_projects_to_plot_center() {
        let mut figure = figure();
        figure.set_screen(200, 200).unwrap();
        (figure.sin_phi, figure.cos_phi) = figure.angle.x.sin_cos();
        (figure.sin_theta, figure.cos_theta) = figure.angle.y.sin_cos();
        let (pos, depth) = figure.vec3_to_pos_depth(Vec3::splat(0.0));
        assert_eq!(pos, Pos::new(100.0, 100.0));
        assert!((depth - 0.5).abs() < 1e-6);
    }
    #[test]
    fn closer_points_have_larger_depth() {
        let mut figure = figure();
        figure.set_screen(200, 200).unwrap();
        figure.angle = Vec2::new(0.0, PI / 6.0);
        (figure.sin_phi, figure.cos_phi) = figure.angle.x.sin_cos();
        (figure.sin_theta, figure.cos_theta) = figure.angle.y.sin_cos();
        let near = figure.vec3_to_pos_depth(Vec3::new(0.0, -1.0, 0.0)).1;
        let far = figure.vec3_to_pos_depth(Vec3::new(0.0, 1.0, 0.0)).1;
        let top = figure.vec3_to_pos_depth(Vec3::new(0.0, 0.0, 1.0));
        assert!(near > far);
        assert!(top.1 > 0.5);
        assert!(top.0.y < 100.0);
    }
    #[test]
    fn cube_fits_plot_area() {
        let mut figure = figure();
        figure.set_screen(200, 200).unwrap();
        for k in 0..16 {
            figure.angle = Vec2::new(k as f64 * 0.4, k as f64 * 0.3);
            (figure.sin_phi, figure.cos_phi) = figure.angle.x.sin_cos();
            (figure.sin_theta, figure.cos_theta) = figure.angle.y.sin_cos();
            for c in 0..8 {
                let s = |b: usize| if c & b == 0 { -1.0 } else { 1.0 };
                let (p, _) = figure.vec3_to_pos_depth(Vec3::new(s(1), s(2), s(4)));
                assert!(p.x >= 9.99 && p.x <= 190.01);
                assert!(p.y >= 9.99 && p.y <= 190.01);
            }
        }
    }
    #[test]
    fn degenerate_axis_maps_to_zero() {
        let flat = Scatter3d::new(vec![1.0, 3.0], vec![5.0, 5.0], vec![0.0, 0.0]).unwrap();
        let bounds = Bounds::new(&[Trace::from(flat)]);
        let p = bounds.normalize(Vec3::new(3.0, 5.0, 0.0));
        assert_eq!(p, Vec3::new(1.0, 0.0, 0.0));
    }
    #[test]
    fn drag_and_keys_rotate() {
        let mut figure = figure();
        let start = figure.angle;
        let mut i = InputState {
            pointer_pos: Some(Vec2::new(0.0, 0.0)),
            pointer: Some(true),
            ..Default::default()
        };
        assert!(!figure.keybinds(&i));
        i.reset();
        i.pointer_pos = Some(Vec2::new(-512.0, 0.0));
        assert!(figure.keybinds(&i));
        assert!((figure.angle.x - (start.x + 1.0)).abs() < 1e-12);
        assert_eq!(figure.angle.y, start.y);
        i.reset();
        i.pointer = None;
        i.keys_pressed.push(Key::ArrowRight);
        figure.angle.x = 0.0;
        assert!(figure.keybinds(&i));
        assert!((figure.angle.x - PI / 64.0).abs() < 1e-12);
        i.reset();
        i.keys_pressed.push(Key::ArrowLeft);
        figure.keybinds(&i);
        figure.keybinds(&i);
        assert!((figure.angle.x - (TAU - PI / 64.0)).abs() < 1e-12);
    }
    #[test]
    fn zoom_snaps_and_reset() {
        let mut figure = figure();
        let i = InputState {
            keys_pressed: vec![Key::Semicolon],
            ..Default::default()
        };
        for _ in 0..3 {
            figure.keybinds(&i);
        }
        assert!((figure.box_size - 2.0f64.sqrt()).abs() < 1e-12);
        let i = InputState {
            keys_pressed: vec![Key::U, Key::T],
            ..Default::default()
        };
        figure.angle = Vec2::splat(1.0);
        assert!(figure.keybinds(&i));
        assert!(!figure.show_box);
        assert_eq!(figure.angle, Vec2::splat(PI / 6.0));
        assert_eq!(figure.box_size, 3.0f64.sqrt());
        assert!(!figure.keybinds(&InputState::default()));
    }
}
