use crate::error::Error;
use crate::types::Figure;
use base64::Engine;
use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use log::debug;
use std::path::Path;
///largest decoded figure load_string will allocate for
const MAX_LEN: usize = 1 << 28;
impl Figure {
    ///serializes the figure and its view into a single line of text
    pub fn save_string(&self) -> Result<String, Error> {
        let seri = bitcode::serialize(self).map_err(|e| Error::Encode(e.to_string()))?;
        let l = seri.len();
        let comp = zstd::bulk::compress(&seri, 22)?;
        debug!("saving figure, {l} bytes raw, {} compressed", comp.len());
        let s = BASE64_URL_SAFE_NO_PAD.encode(&comp);
        let l = BASE64_URL_SAFE_NO_PAD.encode(l.to_string());
        Ok(format!("{l}@{s}"))
    }
    ///reverses save_string
    pub fn load_string(s: &str) -> Result<Self, Error> {
        let decode = |s: &str| {
            BASE64_URL_SAFE_NO_PAD
                .decode(s)
                .map_err(|e| Error::Decode(e.to_string()))
        };
        let (l, s) = s
            .trim()
            .split_once('@')
            .ok_or_else(|| Error::Decode("missing length".to_string()))?;
        let l = String::from_utf8(decode(l)?)
            .ok()
            .and_then(|l| l.parse::<usize>().ok())
            .ok_or_else(|| Error::Decode("bad length".to_string()))?;
        if l > MAX_LEN {
            return Err(Error::Decode(format!("length {l} exceeds {MAX_LEN}")));
        }
        let data = zstd::bulk::decompress(&decode(s)?, l)
            .map_err(|e| Error::Decode(e.to_string()))?;
        let figure: Self = bitcode::deserialize(&data).map_err(|e| Error::Decode(e.to_string()))?;
        for trace in &figure.data {
            trace.check().map_err(|e| Error::Decode(e.to_string()))?;
        }
        Ok(figure)
    }
    ///writes save_string to path, creating parent directories
    pub fn save_file<P>(&self, path: P) -> Result<(), Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?
        }
        std::fs::write(path, self.save_string()?)?;
        Ok(())
    }
    pub fn load_file<P>(path: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        Self::load_string(&std::fs::read_to_string(path)?)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Mesh;
    use crate::showcase::surface_with_points;
    use crate::types::*;
    #[test_log::test]
    fn round_trip_keeps_view_and_traces() {
        let mut figure = surface_with_points().unwrap();
        figure.angle = Vec2::new(1.0, 2.0);
        figure.show_box = false;
        let s = figure.save_string().unwrap();
        assert!(!s.contains('\n'));
        let loaded = Figure::load_string(&s).unwrap();
        assert_eq!(loaded.traces(), figure.traces());
        assert_eq!(loaded.layout(), figure.layout());
        assert_eq!(loaded.angle, Vec2::new(1.0, 2.0));
        assert!(!loaded.show_box);
    }
    #[test]
    fn malformed_input_is_an_error() {
        for s in ["", "abc", "@", "MTA@AAAA", "!!@!!"] {
            assert!(Figure::load_string(s).is_err(), "{s}");
        }
        let huge = BASE64_URL_SAFE_NO_PAD.encode(usize::MAX.to_string());
        let data = BASE64_URL_SAFE_NO_PAD.encode(zstd::bulk::compress(&[0; 16], 3).unwrap());
        assert!(matches!(
            Figure::load_string(&format!("{huge}@{data}")),
            Err(Error::Decode(_))
        ));
    }
    #[test]
    fn inconsistent_traces_do_not_load() {
        let mut figure = surface_with_points().unwrap();
        if let Trace::Surface(s) = &mut figure.data[0] {
            s.z = Mesh::from_shape_vec((1, 1), vec![0.0]).unwrap();
        }
        let s = figure.save_string().unwrap();
        assert!(matches!(Figure::load_string(&s), Err(Error::Decode(_))));
        let mut figure = surface_with_points().unwrap();
        if let Trace::Scatter3d(s) = &mut figure.data[1] {
            s.z.pop();
        }
        let s = figure.save_string().unwrap();
        assert!(matches!(Figure::load_string(&s), Err(Error::Decode(_))));
    }
    #[test]
    fn file_round_trip() {
        let dir = std::env::temp_dir().join(format!("surfplot-{}", std::process::id()));
        let path = dir.join("nested").join("figure.save");
        let figure = surface_with_points().unwrap();
        figure.save_file(&path).unwrap();
        let loaded = Figure::load_file(&path).unwrap();
        assert_eq!(loaded.traces().len(), 2);
        std::fs::remove_dir_all(dir).unwrap();
    }
}
