//! Debug script to dump a heightmap and its face shading as text

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};

use terrain_viewer::heightmap::{height_histogram, heightmap_stats, HeightmapParams};
use terrain_viewer::shading::{default_light_dir, face_normal, light_intensity};

fn main() -> Result<(), Box<dyn Error>> {
    let seed = std::env::args()
        .nth(1)
        .map(|s| terrain_viewer::seeds::parse_seed(&s))
        .transpose()?
        .unwrap_or(42);

    let params = HeightmapParams::default();
    let heightmap = params.generate(seed)?;
    let light = default_light_dir();

    let mut file = BufWriter::new(File::create("heightmap_debug.txt")?);

    writeln!(file, "=== HEIGHTMAP ({}x{}) seed={} ===", params.width, params.height, seed)?;
    if let Some(stats) = heightmap_stats(&heightmap) {
        writeln!(file, "min={} max={} mean={:.2}", stats.min, stats.max, stats.mean)?;
    }
    writeln!(file)?;

    for row in heightmap.rows() {
        let line: Vec<String> = row.iter().map(|h| format!("{:>3}", h)).collect();
        writeln!(file, "{}", line.join(""))?;
    }

    // One digit per interior cell: intensity in tenths, '.' for unlit faces.
    writeln!(file)?;
    writeln!(file, "=== SHADING (intensity x10) ===")?;
    for y in 0..params.height.saturating_sub(1) {
        let mut line = String::new();
        for x in 0..params.width.saturating_sub(1) {
            let z = *heightmap.get(x, y);
            let z_right = *heightmap.get(x + 1, y);
            let z_down = *heightmap.get(x, y + 1);
            let intensity = light_intensity(face_normal(z, z_right, z_down), light);
            if intensity == 0.0 {
                line.push('.');
            } else {
                let tenths = ((intensity * 10.0) as u32).min(9);
                line.push(char::from_digit(tenths, 10).unwrap_or('?'));
            }
        }
        writeln!(file, "{}", line)?;
    }

    writeln!(file)?;
    writeln!(file, "=== HISTOGRAM ===")?;
    for (h, count) in height_histogram(&heightmap, params.max_elevation).iter().enumerate() {
        writeln!(file, "{:>3} | {}", h, "#".repeat(*count))?;
    }

    file.flush()?;
    println!("Wrote heightmap_debug.txt (seed {})", seed);
    Ok(())
}
