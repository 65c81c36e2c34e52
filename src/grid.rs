use crate::error::Error;
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
///row major 2d array of samples
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMesh"))]
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Mesh {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}
///decoded mesh before its shape is checked
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawMesh {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}
#[cfg(feature = "serde")]
impl TryFrom<RawMesh> for Mesh {
    type Error = Error;
    fn try_from(raw: RawMesh) -> Result<Self, Error> {
        Mesh::from_shape_vec((raw.rows, raw.cols), raw.data)
    }
}
impl Mesh {
    ///views data as rows x cols, data.len() must equal rows * cols
    pub fn from_shape_vec((rows, cols): (usize, usize), data: Vec<f64>) -> Result<Self, Error> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(Error::FromShape {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }
    pub fn from_fn<F>((rows, cols): (usize, usize), f: F) -> Self
    where
        F: Fn(usize, usize) -> f64,
    {
        let data = (0..rows * cols).map(|k| f(k / cols, k % cols)).collect();
        Self { data, rows, cols }
    }
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        (i < self.rows && j < self.cols).then(|| self.data[i * self.cols + j])
    }
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        (i < self.rows).then(|| &self.data[i * self.cols..(i + 1) * self.cols])
    }
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }
    pub fn transpose(&self) -> Self {
        Self::from_fn((self.cols, self.rows), |i, j| self.data[j * self.cols + i])
    }
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        #[cfg(feature = "rayon")]
        let data = self.data.par_iter().map(|v| f(*v)).collect();
        #[cfg(not(feature = "rayon"))]
        let data = self.data.iter().map(|v| f(*v)).collect();
        Self {
            data,
            rows: self.rows,
            cols: self.cols,
        }
    }
    ///pointwise f(self[i][j], other[i][j])
    pub fn zip_map<F>(&self, other: &Mesh, f: F) -> Result<Self, Error>
    where
        F: Fn(f64, f64) -> f64 + Sync + Send,
    {
        if self.shape() != other.shape() {
            return Err(Error::Shape(self.shape(), other.shape()));
        }
        #[cfg(feature = "rayon")]
        let data = self
            .data
            .par_iter()
            .zip(other.data.par_iter())
            .map(|(a, b)| f(*a, *b))
            .collect();
        #[cfg(not(feature = "rayon"))]
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| f(*a, *b))
            .collect();
        Ok(Self {
            data,
            rows: self.rows,
            cols: self.cols,
        })
    }
    ///smallest and largest finite value, none if there are no finite values
    pub fn min_max(&self) -> Option<(f64, f64)> {
        min_max(self.data.iter().copied())
    }
}
pub(crate) fn min_max<I>(iter: I) -> Option<(f64, f64)>
where
    I: Iterator<Item = f64>,
{
    iter.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((a, b)) => Some((a.min(v), b.max(v))),
    })
}
///n evenly spaced samples from start to end, both included
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        end
                    } else {
                        start + i as f64 * delta
                    }
                })
                .collect()
        }
    }
}
pub fn ones(n: usize) -> Vec<f64> {
    vec![1.0; n]
}
///m[i][j] = a[i] * b[j]
pub fn outer(a: &[f64], b: &[f64]) -> Mesh {
    Mesh::from_fn((a.len(), b.len()), |i, j| a[i] * b[j])
}
///cartesian sampling of [start, end]² with n points per side,
///x varies down the rows and y along the columns
pub fn grid(start: f64, end: f64, n: usize) -> (Mesh, Mesh) {
    let x = outer(&linspace(start, end, n), &ones(n));
    let y = x.transpose();
    (x, y)
}
///evaluates f at every (x, y) pair of a grid
pub fn height_field<F>(x: &Mesh, y: &Mesh, f: F) -> Result<Mesh, Error>
where
    F: Fn(f64, f64) -> f64 + Sync + Send,
{
    x.zip_map(y, f)
}
pub fn cos_radial(x: f64, y: f64) -> f64 {
    (x * x + y * y).cos()
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn linspace_includes_endpoints() {
        let v = linspace(-2.0, 2.0, 30);
        assert_eq!(v.len(), 30);
        assert_eq!(v[0], -2.0);
        assert_eq!(v[29], 2.0);
        let step = 4.0 / 29.0;
        for w in v.windows(2) {
            assert!((w[1] - w[0] - step).abs() < 1e-12);
        }
    }
    #[test]
    fn linspace_degenerate() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 5.0, 1), vec![3.0]);
    }
    #[test]
    fn outer_product() {
        let m = outer(&[1.0, 2.0], &[3.0, 4.0, 5.0]);
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.row(1), Some(&[6.0, 8.0, 10.0][..]));
        assert_eq!(m.row(2), None);
    }
    #[test]
    fn grid_orientation() {
        let (x, y) = grid(-2.0, 2.0, 30);
        assert_eq!(x.shape(), (30, 30));
        assert_eq!(x.shape(), y.shape());
        let lin = linspace(-2.0, 2.0, 30);
        for i in 0..30 {
            for j in 0..30 {
                assert_eq!(x.get(i, j), Some(lin[i]));
                assert_eq!(y.get(i, j), Some(lin[j]));
            }
        }
    }
    #[test]
    fn height_matches_function() {
        let (x, y) = grid(-2.0, 2.0, 30);
        let z = height_field(&x, &y, cos_radial).unwrap();
        assert_eq!(z.shape(), (30, 30));
        for ((a, b), c) in x.iter().zip(y.iter()).zip(z.iter()) {
            assert!((c - (a * a + b * b).cos()).abs() < 1e-12);
        }
    }
    #[test]
    fn shape_errors() {
        assert!(Mesh::from_shape_vec((2, 2), vec![0.0; 3]).is_err());
        let a = Mesh::from_fn((2, 3), |_, _| 0.0);
        let b = a.transpose();
        assert!(matches!(
            height_field(&a, &b, cos_radial),
            Err(Error::Shape((2, 3), (3, 2)))
        ));
    }
    #[test]
    fn shape_overflow_is_an_error() {
        assert!(matches!(
            Mesh::from_shape_vec((usize::MAX, 2), vec![0.0; 2]),
            Err(Error::FromShape { .. })
        ));
    }
    #[cfg(feature = "serde")]
    #[test]
    fn decoding_checks_shape() {
        #[derive(Serialize)]
        struct Unchecked {
            data: Vec<f64>,
            rows: usize,
            cols: usize,
        }
        let bad = bitcode::serialize(&Unchecked {
            data: vec![0.0],
            rows: 2,
            cols: 2,
        })
        .unwrap();
        assert!(bitcode::deserialize::<Mesh>(&bad).is_err());
        let good = Mesh::from_fn((2, 3), |i, j| (i * 3 + j) as f64);
        let bytes = bitcode::serialize(&good).unwrap();
        assert_eq!(bitcode::deserialize::<Mesh>(&bytes).unwrap(), good);
    }
    #[test]
    fn min_max_skips_nan() {
        let m = Mesh::from_shape_vec((1, 4), vec![f64::NAN, -1.0, 3.0, f64::INFINITY]).unwrap();
        assert_eq!(m.min_max(), Some((-1.0, 3.0)));
        assert_eq!(Mesh::default().min_max(), None);
    }
}
