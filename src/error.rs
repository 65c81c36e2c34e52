use thiserror::Error;
#[derive(Debug, Error)]
pub enum Error {
    ///two arrays that must share a shape do not
    #[error("shape mismatch: {0:?} vs {1:?}")]
    Shape((usize, usize), (usize, usize)),
    ///row/column counts do not cover the supplied data
    #[error("cannot view {len} values as a {rows}x{cols} mesh")]
    FromShape {
        rows: usize,
        cols: usize,
        len: usize,
    },
    ///x, y and z of a scatter trace must have equal length
    #[error("coordinate lengths differ: x={0}, y={1}, z={2}")]
    Length(usize, usize, usize),
    ///x and y of a set of surface points must pair up
    #[error("cannot pair {0} x values with {1} y values")]
    Pairs(usize, usize),
    #[error("cannot allocate a {0}x{1} canvas")]
    Canvas(u32, u32),
    #[error("margins leave no plot area in a {0}x{1} canvas")]
    Margin(u32, u32),
    #[error("png encoding failed: {0}")]
    Png(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde")]
    #[error("cannot encode figure: {0}")]
    Encode(String),
    #[cfg(feature = "serde")]
    #[error("malformed save data: {0}")]
    Decode(String),
    #[cfg(feature = "winit")]
    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),
    #[cfg(feature = "winit")]
    #[error(transparent)]
    Os(#[from] winit::error::OsError),
    #[cfg(feature = "winit")]
    #[error("window surface: {0}")]
    Surface(String),
}
