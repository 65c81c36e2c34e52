use std::io::Write;
fn main() -> Result<(), surfplot::Error> {
    env_logger::init();
    let mut figure = surfplot::showcase::surface_with_points()?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&figure.get_png()?)?;
    stdout.flush()?;
    Ok(())
}
