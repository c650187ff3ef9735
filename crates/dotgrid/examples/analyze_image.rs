use dotgrid::pipeline::{analyze_image, PipelineParams};
use image::ImageReader;

#[cfg(feature = "tracing")]
use dotgrid::core::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(false);
    #[cfg(not(feature = "tracing"))]
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: analyze_image <image_path>");
        return Ok(());
    };

    let img = ImageReader::open(path)?.decode()?.to_luma8();
    let analysis = analyze_image(&img, &PipelineParams::default());

    println!(
        "{} dots in {} rows, symmetry score {:.2}, class {}",
        analysis.dots.len(),
        analysis.grid.rows.len(),
        analysis.score,
        analysis.class
    );
    println!("{}", serde_json::to_string_pretty(&analysis.report)?);

    Ok(())
}
