fn main() -> Result<(), surfplot::Error> {
    env_logger::init();
    surfplot::showcase::surface_with_points()?.show()
}
