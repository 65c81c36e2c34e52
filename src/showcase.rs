//! The cosine surface figure: a 30x30 sampling of cos(x² + y²) over [-2, 2]²
//! with four red markers placed on the surface.
use crate::error::Error;
use crate::grid::{cos_radial, grid, height_field};
use crate::types::*;
pub const TITLE: &str = "3D Surface with Scatter Points";
pub const START: f64 = -2.0;
pub const END: f64 = 2.0;
pub const RESOLUTION: usize = 30;
pub const SCATTER_X: [f64; 4] = [1.0, -1.0, 0.5, -0.5];
pub const SCATTER_Y: [f64; 4] = [1.0, -1.0, -0.5, 0.5];
pub fn surface() -> Result<Surface, Error> {
    let (x, y) = grid(START, END, RESOLUTION);
    let z = height_field(&x, &y, cos_radial)?;
    Surface::new(x, y, z)
}
pub fn points() -> Result<Scatter3d, Error> {
    Ok(
        Scatter3d::on_surface(SCATTER_X.to_vec(), SCATTER_Y.to_vec(), cos_radial)?
            .mode(Mode::Markers)
            .marker(Marker::new().size(5.0).color(Color::RED).opacity(0.8)),
    )
}
pub fn layout() -> Layout {
    Layout::new()
        .title(TITLE)
        .autosize(false)
        .width(800)
        .height(800)
        .margin(Margin::new().left(65).right(50).bottom(65).top(90))
}
///the full figure, ready to show
pub fn surface_with_points() -> Result<Figure, Error> {
    let mut figure = Figure::new(vec![surface()?.into()]);
    figure.add_trace(points()?);
    figure.update_layout(layout());
    Ok(figure)
}
