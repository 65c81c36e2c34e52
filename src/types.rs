use crate::error::Error;
use crate::grid::Mesh;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::{Add, Div, Mul, Sub};
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Copy, Default, PartialEq)]
pub enum Mode {
    ///only markers at each point
    #[default]
    Markers,
    ///markers connected by lines in order
    LinesMarkers,
    ///only lines connecting the points in order
    Lines,
}
impl Mode {
    pub(crate) fn markers(&self) -> bool {
        matches!(self, Self::Markers | Self::LinesMarkers)
    }
    pub(crate) fn lines(&self) -> bool {
        matches!(self, Self::Lines | Self::LinesMarkers)
    }
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct Marker {
    ///diameter in pixels
    pub size: f32,
    pub color: Color,
    ///0 is invisible, 1 is opaque
    pub opacity: f32,
}
impl Default for Marker {
    fn default() -> Self {
        Self {
            size: 6.0,
            color: Color::new(99, 110, 250),
            opacity: 1.0,
        }
    }
}
impl Marker {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}
///piecewise linear map from [0, 1] onto colors, stops sorted by position
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Colorscale(pub Vec<(f64, Color)>);
impl Default for Colorscale {
    fn default() -> Self {
        Self::plasma()
    }
}
impl Colorscale {
    pub fn plasma() -> Self {
        let stops = [
            0x0d0887, 0x46039f, 0x7201a8, 0x9c179e, 0xbd3786, 0xd8576b, 0xed7953, 0xfb9f3a,
            0xfdca26, 0xf0f921,
        ];
        let n = (stops.len() - 1) as f64;
        Self(
            stops
                .iter()
                .enumerate()
                .map(|(i, c)| (i as f64 / n, Color::from_hex(*c)))
                .collect(),
        )
    }
    ///color at t, t is clamped to [0, 1]
    pub fn sample(&self, t: f64) -> Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let Some(first) = self.0.first() else {
            return Color::splat(0);
        };
        if t <= first.0 {
            return first.1;
        }
        for w in self.0.windows(2) {
            let ((a, ca), (b, cb)) = (w[0], w[1]);
            if t <= b {
                let s = if b > a { (t - a) / (b - a) } else { 1.0 };
                return ca.lerp(cb, s);
            }
        }
        self.0[self.0.len() - 1].1
    }
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub(crate) x: Mesh,
    pub(crate) y: Mesh,
    pub(crate) z: Mesh,
    pub name: String,
    pub colorscale: Colorscale,
    ///draw grid lines over the filled surface
    pub show_lines: bool,
    pub line_color: Color,
}
impl Surface {
    ///x, y and z must share a shape
    pub fn new(x: Mesh, y: Mesh, z: Mesh) -> Result<Self, Error> {
        let surface = Self {
            x,
            y,
            z,
            name: String::new(),
            colorscale: Colorscale::default(),
            show_lines: false,
            line_color: Color::splat(0),
        };
        surface.check()?;
        Ok(surface)
    }
    pub(crate) fn check(&self) -> Result<(), Error> {
        if self.x.shape() != self.y.shape() {
            return Err(Error::Shape(self.x.shape(), self.y.shape()));
        }
        if self.x.shape() != self.z.shape() {
            return Err(Error::Shape(self.x.shape(), self.z.shape()));
        }
        Ok(())
    }
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
    pub fn colorscale(mut self, colorscale: Colorscale) -> Self {
        self.colorscale = colorscale;
        self
    }
    pub fn show_lines(mut self, show: bool) -> Self {
        self.show_lines = show;
        self
    }
    pub fn x(&self) -> &Mesh {
        &self.x
    }
    pub fn y(&self) -> &Mesh {
        &self.y
    }
    pub fn z(&self) -> &Mesh {
        &self.z
    }
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Scatter3d {
    pub(crate) x: Vec<f64>,
    pub(crate) y: Vec<f64>,
    pub(crate) z: Vec<f64>,
    pub name: String,
    pub mode: Mode,
    pub marker: Marker,
    pub line_width: f32,
}
impl Scatter3d {
    ///x, y and z must have the same length
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self, Error> {
        let scatter = Self {
            x,
            y,
            z,
            name: String::new(),
            mode: Mode::default(),
            marker: Marker::default(),
            line_width: 2.0,
        };
        scatter.check()?;
        Ok(scatter)
    }
    pub(crate) fn check(&self) -> Result<(), Error> {
        if self.x.len() != self.y.len() || self.x.len() != self.z.len() {
            return Err(Error::Length(self.x.len(), self.y.len(), self.z.len()));
        }
        Ok(())
    }
    ///places each (x, y) pair at height f(x, y)
    pub fn on_surface<F>(x: Vec<f64>, y: Vec<f64>, f: F) -> Result<Self, Error>
    where
        F: Fn(f64, f64) -> f64,
    {
        if x.len() != y.len() {
            return Err(Error::Pairs(x.len(), y.len()));
        }
        let z = x.iter().zip(y.iter()).map(|(a, b)| f(*a, *b)).collect();
        Self::new(x, y, z)
    }
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }
    pub fn len(&self) -> usize {
        self.x.len()
    }
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
    pub fn x(&self) -> &[f64] {
        &self.x
    }
    pub fn y(&self) -> &[f64] {
        &self.y
    }
    pub fn z(&self) -> &[f64] {
        &self.z
    }
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Trace {
    Surface(Surface),
    Scatter3d(Scatter3d),
}
impl Trace {
    pub fn name(&self) -> &str {
        match self {
            Trace::Surface(s) => &s.name,
            Trace::Scatter3d(s) => &s.name,
        }
    }
    ///shape and length agreement, rechecked after decoding a saved figure
    #[cfg(feature = "serde")]
    pub(crate) fn check(&self) -> Result<(), Error> {
        match self {
            Trace::Surface(s) => s.check(),
            Trace::Scatter3d(s) => s.check(),
        }
    }
    pub(crate) fn points(&self) -> Box<dyn Iterator<Item = Vec3> + '_> {
        match self {
            Trace::Surface(s) => Box::new(
                s.x.iter()
                    .zip(s.y.iter())
                    .zip(s.z.iter())
                    .map(|((x, y), z)| Vec3::new(*x, *y, *z)),
            ),
            Trace::Scatter3d(s) => Box::new(
                s.x.iter()
                    .zip(s.y.iter())
                    .zip(s.z.iter())
                    .map(|((x, y), z)| Vec3::new(*x, *y, *z)),
            ),
        }
    }
}
impl From<Surface> for Trace {
    fn from(value: Surface) -> Self {
        Trace::Surface(value)
    }
}
impl From<Scatter3d> for Trace {
    fn from(value: Scatter3d) -> Self {
        Trace::Scatter3d(value)
    }
}
///space in pixels between the canvas edge and the plot area
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
}
impl Default for Margin {
    fn default() -> Self {
        Self {
            l: 80,
            r: 80,
            b: 80,
            t: 100,
        }
    }
}
impl Margin {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn left(mut self, l: u32) -> Self {
        self.l = l;
        self
    }
    pub fn right(mut self, r: u32) -> Self {
        self.r = r;
        self
    }
    pub fn bottom(mut self, b: u32) -> Self {
        self.b = b;
        self
    }
    pub fn top(mut self, t: u32) -> Self {
        self.t = t;
        self
    }
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub title: String,
    ///if true the figure follows the window size, otherwise width and height are used
    pub autosize: bool,
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    pub background_color: Color,
}
impl Default for Layout {
    fn default() -> Self {
        Self {
            title: String::new(),
            autosize: true,
            width: 700,
            height: 450,
            margin: Margin::default(),
            background_color: Color::splat(255),
        }
    }
}
impl Layout {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }
    pub fn autosize(mut self, autosize: bool) -> Self {
        self.autosize = autosize;
        self
    }
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }
    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }
    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }
    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
    ///top left corner and size of the area inside the margins of a width x height canvas
    pub fn plot_area(&self, width: u32, height: u32) -> Result<(Vec2, Vec2), Error> {
        let m = &self.margin;
        if m.l as u64 + m.r as u64 >= width as u64 || m.t as u64 + m.b as u64 >= height as u64 {
            return Err(Error::Margin(width, height));
        }
        Ok((
            Vec2::new(m.l as f64, m.t as f64),
            Vec2::new((width - m.l - m.r) as f64, (height - m.t - m.b) as f64),
        ))
    }
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Figure {
    pub(crate) data: Vec<Trace>,
    pub(crate) layout: Layout,
    ///view angle, x rotates about the vertical axis and y tilts towards the viewer
    #[cfg_attr(feature = "serde", serde(default))]
    pub angle: Vec2,
    ///how large the box should be, √3 keeps the whole box on screen at any angle
    #[cfg_attr(feature = "serde", serde(default))]
    pub box_size: f64,
    ///weather the box edges should be displayed
    #[cfg_attr(feature = "serde", serde(default))]
    pub show_box: bool,
    ///weather surfaces that ask for grid lines get them
    #[cfg_attr(feature = "serde", serde(default))]
    pub show_lines: bool,
    ///weather lines and markers should be anti aliased or not
    #[cfg_attr(feature = "serde", serde(default))]
    pub anti_alias: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub axis_color: Color,
    ///width of box edges
    #[cfg_attr(feature = "serde", serde(default))]
    pub line_width: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub keybinds: Keybinds,
    #[cfg(feature = "serde")]
    /// which file will save the serialization data
    #[cfg_attr(feature = "serde", serde(default))]
    pub save_path: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) screen: Vec2,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) screen_offset: Vec2,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) delta: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) cos_phi: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) sin_phi: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) cos_theta: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) sin_theta: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) last_interact: Option<Vec2>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) canvas: Option<tiny_skia::Pixmap>,
}
impl Default for Figure {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            layout: Layout::default(),
            angle: Vec2::splat(PI / 6.0),
            box_size: 3.0f64.sqrt(),
            show_box: true,
            show_lines: true,
            anti_alias: true,
            axis_color: Color::splat(0),
            line_width: 2.0,
            keybinds: Keybinds::default(),
            #[cfg(feature = "serde")]
            save_path: String::new(),
            screen: Vec2::splat(0.0),
            screen_offset: Vec2::splat(0.0),
            delta: 0.0,
            cos_phi: 1.0,
            sin_phi: 0.0,
            cos_theta: 1.0,
            sin_theta: 0.0,
            last_interact: None,
            canvas: None,
        }
    }
}
#[derive(Copy, Clone, Debug)]
pub(crate) enum Draw {
    Line(Pos, Pos, f32),
    ///center, diameter, opacity
    Point(Pos, f32, f32),
    Quad([Pos; 4]),
}
#[derive(Copy, Debug, Clone, PartialEq)]
pub struct Keybinds {
    ///rotate left
    pub left: Option<Keys>,
    ///rotate right
    pub right: Option<Keys>,
    ///tilt up
    pub up: Option<Keys>,
    ///tilt down
    pub down: Option<Keys>,
    ///shrink the box
    pub zoom_in: Option<Keys>,
    ///grow the box
    pub zoom_out: Option<Keys>,
    ///toggle box edges
    pub show_box: Option<Keys>,
    ///toggle surface grid lines
    pub lines: Option<Keys>,
    ///toggle anti aliasing
    pub anti_alias: Option<Keys>,
    ///restore the initial view
    pub reset: Option<Keys>,
    ///write the figure to save_path
    #[cfg(feature = "serde")]
    pub save: Option<Keys>,
}
impl Default for Keybinds {
    fn default() -> Self {
        Self {
            left: Some(Keys::new(Key::ArrowLeft)),
            right: Some(Keys::new(Key::ArrowRight)),
            up: Some(Keys::new(Key::ArrowUp)),
            down: Some(Keys::new(Key::ArrowDown)),
            zoom_in: Some(Keys::new(Key::Semicolon)),
            zoom_out: Some(Keys::new(Key::Quote)),
            show_box: Some(Keys::new(Key::U)),
            lines: Some(Keys::new(Key::L)),
            anti_alias: Some(Keys::new(Key::R)),
            reset: Some(Keys::new(Key::T)),
            #[cfg(feature = "serde")]
            save: Some(Keys::new_with_modifier(Key::S, Modifiers::default().ctrl())),
        }
    }
}
pub struct InputState {
    ///which keys have been pressed this frame
    pub keys_pressed: Vec<Key>,
    ///which modifiers are pressed
    pub modifiers: Modifiers,
    ///how much scroll wheel has scrolled
    pub raw_scroll_delta: Vec2,
    ///where the pointer is currently
    pub pointer_pos: Option<Vec2>,
    ///some if pointer is down, true if this frame pointer was pressed
    pub pointer: Option<bool>,
}
impl Default for InputState {
    fn default() -> Self {
        Self {
            keys_pressed: Vec::new(),
            modifiers: Modifiers::default(),
            raw_scroll_delta: Vec2::splat(0.0),
            pointer_pos: None,
            pointer: None,
        }
    }
}
impl InputState {
    ///resets raw_scroll_delta, keys_pressed, pointer_just_down,
    ///expected to happen after keybinds()
    pub fn reset(&mut self) {
        self.raw_scroll_delta = Vec2::splat(0.0);
        self.keys_pressed = Vec::new();
        if self.pointer.is_some() {
            self.pointer = Some(false);
        }
    }
    pub(crate) fn keys_pressed(&self, keys: Option<Keys>) -> bool {
        if let Some(keys) = keys {
            keys.modifiers
                .map(|m| self.modifiers == m)
                .unwrap_or(self.modifiers.is_false())
                && self.keys_pressed.contains(&keys.key)
        } else {
            false
        }
    }
}
#[derive(Copy, Debug, Clone, PartialEq)]
pub struct Keys {
    ///None is equivalent to a set of false Modifiers
    modifiers: Option<Modifiers>,
    key: Key,
}
impl Keys {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: None,
        }
    }
    pub fn new_with_modifier(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers: Some(modifiers),
        }
    }
}
#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}
impl Modifiers {
    pub(crate) fn is_false(&self) -> bool {
        !self.alt && !self.ctrl && !self.shift
    }
    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }
    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }
    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }
}
#[cfg(feature = "winit")]
impl From<winit::keyboard::ModifiersState> for Modifiers {
    fn from(val: winit::keyboard::ModifiersState) -> Self {
        Modifiers {
            alt: val.alt_key(),
            ctrl: val.control_key(),
            shift: val.shift_key(),
        }
    }
}
#[derive(Copy, Debug, Clone, PartialEq)]
pub enum Key {
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    Escape,
    Semicolon,
    Quote,
    L,
    R,
    S,
    T,
    U,
    Undefined,
}
#[cfg(feature = "winit")]
impl From<winit::keyboard::Key> for Key {
    fn from(val: winit::keyboard::Key) -> Self {
        use winit::keyboard::NamedKey;
        match val {
            winit::keyboard::Key::Named(NamedKey::ArrowDown) => Key::ArrowDown,
            winit::keyboard::Key::Named(NamedKey::ArrowLeft) => Key::ArrowLeft,
            winit::keyboard::Key::Named(NamedKey::ArrowRight) => Key::ArrowRight,
            winit::keyboard::Key::Named(NamedKey::ArrowUp) => Key::ArrowUp,
            winit::keyboard::Key::Named(NamedKey::Escape) => Key::Escape,
            winit::keyboard::Key::Character(val) => {
                match val.to_string().to_ascii_lowercase().as_str() {
                    ";" => Key::Semicolon,
                    "'" => Key::Quote,
                    "l" => Key::L,
                    "r" => Key::R,
                    "s" => Key::S,
                    "t" => Key::T,
                    "u" => Key::U,
                    _ => Key::Undefined,
                }
            }
            _ => Key::Undefined,
        }
    }
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}
impl Color {
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
    pub const fn splat(c: u8) -> Self {
        Self { r: c, g: c, b: c }
    }
    ///0xRRGGBB
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }
    pub(crate) fn lerp(self, other: Color, t: f64) -> Color {
        let m = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::new(m(self.r, other.r), m(self.g, other.g), m(self.b, other.b))
    }
    pub(crate) fn to_col(self, opacity: f32) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, (opacity * 255.0).round() as u8)
    }
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}
impl Pos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}
impl Vec2 {
    pub fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
impl From<(f64, f64)> for Vec2 {
    fn from(value: (f64, f64)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}
impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Self) -> Self::Output {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl Vec3 {
    pub fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}
impl Div<Vec3> for Vec3 {
    type Output = Vec3;
    fn div(mut self, rhs: Vec3) -> Self::Output {
        self.x /= rhs.x;
        self.y /= rhs.y;
        self.z /= rhs.z;
        self
    }
}
impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Self::Output {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Self) -> Self::Output {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Self) -> Self::Output {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn scatter_lengths_must_agree() {
        assert!(matches!(
            Scatter3d::new(vec![0.0; 2], vec![0.0; 3], vec![0.0; 2]),
            Err(Error::Length(2, 3, 2))
        ));
        assert!(matches!(
            Scatter3d::on_surface(vec![0.0], vec![], |a, b| a + b),
            Err(Error::Pairs(1, 0))
        ));
    }
    #[test]
    fn surface_shapes_must_agree() {
        let a = Mesh::from_fn((2, 3), |_, _| 0.0);
        let b = a.transpose();
        assert!(Surface::new(a.clone(), a.clone(), b.clone()).is_err());
        assert!(Surface::new(a.clone(), b, a.clone()).is_err());
        assert!(Surface::new(a.clone(), a.clone(), a).is_ok());
    }
    #[test]
    fn colorscale_endpoints() {
        let c = Colorscale::plasma();
        assert_eq!(c.sample(0.0), Color::from_hex(0x0d0887));
        assert_eq!(c.sample(1.0), Color::from_hex(0xf0f921));
        assert_eq!(c.sample(-3.0), c.sample(0.0));
        assert_eq!(c.sample(f64::NAN), c.sample(0.0));
        let mid = Colorscale(vec![(0.0, Color::splat(0)), (1.0, Color::splat(200))]);
        assert_eq!(mid.sample(0.5), Color::splat(100));
    }
    #[test]
    fn marker_opacity_clamped() {
        assert_eq!(Marker::new().opacity(1.5).opacity, 1.0);
        assert_eq!(Marker::new().opacity(-1.0).opacity, 0.0);
    }
    #[test]
    fn plot_area_respects_margins() {
        let layout = Layout::new().margin(Margin::new().left(65).right(50).bottom(65).top(90));
        let (origin, size) = layout.plot_area(800, 800).unwrap();
        assert_eq!(origin, Vec2::new(65.0, 90.0));
        assert_eq!(size, Vec2::new(685.0, 645.0));
        assert!(matches!(
            layout.plot_area(100, 800),
            Err(Error::Margin(100, 800))
        ));
    }
    #[test]
    fn modifiers_must_match() {
        let mut i = InputState::default();
        i.keys_pressed.push(Key::S);
        let save = Some(Keys::new_with_modifier(Key::S, Modifiers::default().ctrl()));
        assert!(!i.keys_pressed(save));
        i.modifiers = Modifiers::default().ctrl();
        assert!(i.keys_pressed(save));
        assert!(!i.keys_pressed(Some(Keys::new(Key::S))));
    }
}
