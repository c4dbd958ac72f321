use anyhow::{Context, Result, bail};
use std::env;
use weld_core::{ScratchArena, WeldConfig, expand, load_mesh, save_mesh, weld, weld_linear};

struct Options {
    input: String,
    output: String,
    linear: bool,
    tolerance: Option<f32>,
}

fn main() -> Result<()> {
    env_logger::init();

    let Some(options) = parse_args()? else {
        println!("Usage: weld-tool <input.bin> [output.bin] [--linear] [--tolerance <t>]");
        return Ok(());
    };

    println!("Loading {}...", options.input);
    let start_total = std::time::Instant::now();
    let mut arena = ScratchArena::default();

    let mesh = load_mesh(&options.input, &mut arena)
        .with_context(|| format!("Failed to load mesh file: {}", options.input))?;

    println!("Unpacking vertices...");
    let expanded = expand(&mesh, &mut arena).context("Failed to unpack vertices")?;

    println!("Welding {} vertices...", expanded.len());
    let weld_start = std::time::Instant::now();
    let welded = if options.linear {
        weld_linear(&expanded, options.tolerance, &mut arena)
    } else {
        weld(&expanded, &mut arena, &WeldConfig::default())
    }
    .context("Failed to weld vertices")?;
    println!("Welded in {:.2}s", weld_start.elapsed().as_secs_f32());

    println!("Writing {}...", options.output);
    save_mesh(&options.output, &welded)
        .with_context(|| format!("Failed to write mesh file: {}", options.output))?;

    println!("Done in {:.2}s. Stats:", start_total.elapsed().as_secs_f32());
    println!("\tOriginal vert count: {}", mesh.vertices.len());
    println!("\tOriginal index count: {}", mesh.indices.len());
    println!("\tNew vert count: {}", welded.vertices.len());
    println!("\tNew index count: {}", welded.indices.len());
    if let Some((min, max)) = welded.bounds() {
        println!("\tBounds min: {:?}", min);
        println!("\tBounds max: {:?}", max);
    }
    log::debug!("arena high-water mark: {} bytes", arena.used());

    Ok(())
}

/// Returns `None` when no input path was given, so main can print usage and
/// exit cleanly like the reference tool.
fn parse_args() -> Result<Option<Options>> {
    let mut input = None;
    let mut output = None;
    let mut linear = false;
    let mut tolerance = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--linear" => linear = true,
            "--tolerance" => {
                let value = args.next().context("--tolerance requires a value")?;
                tolerance = Some(
                    value
                        .parse::<f32>()
                        .with_context(|| format!("Invalid tolerance: {}", value))?,
                );
                // Tolerant matching only exists on the linear path; the hash
                // table keys on exact bit patterns.
                linear = true;
            }
            _ if input.is_none() => input = Some(arg),
            _ if output.is_none() => output = Some(arg),
            _ => bail!("Unexpected argument: {}", arg),
        }
    }

    Ok(input.map(|input| Options {
        input,
        output: output.unwrap_or_else(|| "test.bin".to_string()),
        linear,
        tolerance,
    }))
}
