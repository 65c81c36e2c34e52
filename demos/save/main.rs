use surfplot::types::Figure;
///with no argument prints the saved figure, with a path opens the figure saved there
fn main() -> Result<(), surfplot::Error> {
    env_logger::init();
    let Some(path) = std::env::args().nth(1) else {
        println!("{}", surfplot::showcase::surface_with_points()?.save_string()?);
        return Ok(());
    };
    let mut figure = Figure::load_file(&path)?;
    figure.save_path = path;
    figure.show()
}
