use dotgrid::pipeline::analyze_grid;
use dotgrid::{Grid, SymmetryParams};
use log::LevelFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotgrid::core::init_with_level(LevelFilter::Info)?;

    for (rows, cols) in [(5, 5), (4, 6), (7, 3)] {
        let grid = Grid::regular(rows, cols, 50.0).centered(400.0, 400.0);
        let analysis = analyze_grid(&grid, &SymmetryParams::default());
        println!(
            "{rows}x{cols}: score {:.2}, class {}",
            analysis.score, analysis.class
        );
    }

    Ok(())
}
