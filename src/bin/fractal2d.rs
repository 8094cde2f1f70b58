extern crate clap;
extern crate env_logger;
extern crate fractal2d;
#[macro_use]
extern crate log;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use fractal2d::{
    Algorithm, BailoutAlgorithm, Canvas, Color, Coloring, Complex, ComplexPlane, Equation,
    FractalError, NewtonAlgorithm, Palette, RenderStrategy, Result, Viewport,
};
use std::fs;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn parse_colors(s: &str) -> Result<Vec<Color>> {
    s.split(',').map(Color::from_hex).collect()
}

fn validate_pair<T: FromStr>(
    s: &str,
    separator: char,
    err: &str,
) -> std::result::Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> std::result::Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

// JSON records cannot carry NaN or the infinities.
fn validate_finite_pair(s: &str, err: &str) -> std::result::Result<(), String> {
    match parse_pair::<f64>(s, ',') {
        Some((re, im)) if re.is_finite() && im.is_finite() => Ok(()),
        Some(_) => Err(format!("{} must be finite", err)),
        None => Err(format!("Could not parse {}", err)),
    }
}

fn validate_colors(s: &str) -> std::result::Result<(), String> {
    parse_colors(s).map(|_| ()).map_err(|e| e.to_string())
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const KEEP_RATIO: &str = "keep-ratio";
const EQUATION: &str = "equation";
const ALGORITHM: &str = "algorithm";
const ITERATIONS: &str = "iterations";
const RADIUS: &str = "radius";
const EPSILON: &str = "epsilon";
const JULIA: &str = "julia";
const COLORING: &str = "coloring";
const MAIN_COLOR: &str = "main-color";
const PALETTE: &str = "palette";
const STRATEGY: &str = "strategy";
const THREADS: &str = "threads";
const ZOOM: &str = "zoom";
const FACTOR: &str = "factor";
const LOAD: &str = "load";
const SAVE: &str = "save";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("fractal2d")
        .version("0.1.0")
        .about("Escape-time and Newton fractal renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output image; the format follows the extension"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.5,-1.5")
                .validator(|s| validate_finite_pair(&s, "left lower corner"))
                .help("Left lower corner of the complex window"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.0,1.5")
                .validator(|s| validate_finite_pair(&s, "right upper corner"))
                .help("Right upper corner of the complex window"),
        )
        .arg(
            Arg::with_name(KEEP_RATIO)
                .long(KEEP_RATIO)
                .short("k")
                .help("Grow the window so that pixels stay square"),
        )
        .arg(
            Arg::with_name(EQUATION)
                .long(EQUATION)
                .short("e")
                .takes_value(true)
                .default_value("mandelbrot")
                .possible_values(&[
                    "mandelbrot",
                    "cubic",
                    "quartic",
                    "tricorn",
                    "burning-ship",
                    "newton",
                ])
                .help("Equation to iterate"),
        )
        .arg(
            Arg::with_name(ALGORITHM)
                .long(ALGORITHM)
                .short("a")
                .takes_value(true)
                .possible_values(&["bailout", "newton"])
                .help("Iteration algorithm [default: newton for -e newton, else bailout]"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(|s| {
                    validate_range::<u32>(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Maximum number of iterations per point"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .long(RADIUS)
                .takes_value(true)
                .default_value("4")
                .validator(|s| {
                    validate_range::<f64>(
                        &s,
                        ::std::f64::MIN_POSITIVE,
                        ::std::f64::MAX,
                        "Could not parse escape radius",
                        "Escape radius must be positive",
                    )
                })
                .help("Squared escape radius of the bailout algorithm"),
        )
        .arg(
            Arg::with_name(EPSILON)
                .long(EPSILON)
                .takes_value(true)
                .default_value("1e-6")
                .validator(|s| {
                    validate_range::<f64>(
                        &s,
                        0.0,
                        ::std::f64::MAX,
                        "Could not parse convergence bound",
                        "Convergence bound must not be negative",
                    )
                })
                .help("Squared convergence bound of the Newton algorithm"),
        )
        .arg(
            Arg::with_name(JULIA)
                .long(JULIA)
                .short("j")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_finite_pair(&s, "Julia constant"))
                .help("Fixed constant c; renders the Julia set of c"),
        )
        .arg(
            Arg::with_name(COLORING)
                .long(COLORING)
                .short("c")
                .takes_value(true)
                .default_value("smooth")
                .possible_values(&Coloring::NAMES)
                .help("Coloring of the escaping points"),
        )
        .arg(
            Arg::with_name(MAIN_COLOR)
                .long(MAIN_COLOR)
                .takes_value(true)
                .default_value("#000000")
                .validator(|s| validate_colors(&s))
                .help("Color of the points inside the set"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .default_value("#000764,#206bcb,#edffff,#ffaa00,#000200")
                .validator(|s| validate_colors(&s))
                .help("Comma separated palette colors, evenly spaced"),
        )
        .arg(
            Arg::with_name(STRATEGY)
                .long(STRATEGY)
                .takes_value(true)
                .default_value("threaded")
                .possible_values(&["standard", "progressive", "threaded"])
                .help("Render strategy"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of worker threads for the threaded strategy"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .validator(|s| validate_pair::<usize>(&s, ',', "Could not parse zoom pixel"))
                .help("Pixel to zoom about before rendering"),
        )
        .arg(
            Arg::with_name(FACTOR)
                .long(FACTOR)
                .short("f")
                .takes_value(true)
                .default_value("2")
                .validator(|s| {
                    validate_range::<f64>(
                        &s,
                        ::std::f64::MIN_POSITIVE,
                        ::std::f64::MAX,
                        "Could not parse zoom factor",
                        "Zoom factor must be positive",
                    )
                })
                .help("Zoom factor"),
        )
        .arg(
            Arg::with_name(LOAD)
                .long(LOAD)
                .takes_value(true)
                .help("Restore a saved coloring, ignoring the equation and coloring options"),
        )
        .arg(
            Arg::with_name(SAVE)
                .long(SAVE)
                .takes_value(true)
                .help("Save the coloring for a later --load"),
        )
        .get_matches()
}

fn value<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .value_of(name)
        .ok_or_else(|| FractalError::Config(format!("missing --{}", name)))
}

fn number<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T> {
    let s = value(matches, name)?;
    T::from_str(s).map_err(|_| FractalError::Config(format!("bad --{} {:?}", name, s)))
}

fn complex(matches: &ArgMatches, name: &str) -> Result<Complex> {
    let s = value(matches, name)?;
    parse_complex(s).ok_or_else(|| FractalError::Config(format!("bad --{} {:?}", name, s)))
}

fn build_coloring(matches: &ArgMatches) -> Result<Coloring> {
    if let Some(path) = matches.value_of(LOAD) {
        info!("restoring coloring from {}", path);
        return Coloring::from_json(&fs::read_to_string(path)?);
    }

    let equation = value(matches, EQUATION)?;
    let equation = Equation::from_name(equation)
        .ok_or_else(|| FractalError::Config(format!("unknown equation {:?}", equation)))?;
    let max_iter = number(matches, ITERATIONS)?;
    let newton = match matches.value_of(ALGORITHM) {
        Some(name) => name == "newton",
        None => equation == Equation::Newton,
    };
    let algorithm: Algorithm = if newton {
        NewtonAlgorithm::new(equation, max_iter, number(matches, EPSILON)?).into()
    } else {
        let julia = match matches.value_of(JULIA) {
            Some(_) => Some(complex(matches, JULIA)?),
            None => None,
        };
        BailoutAlgorithm::new(equation, max_iter, number(matches, RADIUS)?, julia).into()
    };

    let main_color = Color::from_hex(value(matches, MAIN_COLOR)?)?;
    let palette = Palette::evenly_spaced(&parse_colors(value(matches, PALETTE)?)?)?;
    Coloring::build(value(matches, COLORING)?, algorithm, main_color, palette)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let (width, height): (usize, usize) = parse_pair(value(matches, SIZE)?, 'x')
        .ok_or_else(|| FractalError::Config("Error parsing image dimensions".to_string()))?;
    let plane =
        ComplexPlane::from_corners(complex(matches, LEFTLOWER)?, complex(matches, RIGHTUPPER)?);
    let mut viewport = Viewport::new(width, height, plane, matches.is_present(KEEP_RATIO))?;
    if let Some(pixel) = matches.value_of(ZOOM) {
        let (px, py) = parse_pair(pixel, ',')
            .ok_or_else(|| FractalError::Config(format!("bad --{} {:?}", ZOOM, pixel)))?;
        viewport.zoom(px, py, number(matches, FACTOR)?)?;
    }

    let coloring = build_coloring(matches)?;
    if let Some(path) = matches.value_of(SAVE) {
        fs::write(path, coloring.to_json()?)?;
    }

    let strategy = match value(matches, STRATEGY)? {
        "threaded" => RenderStrategy::Threaded {
            workers: number(matches, THREADS)?,
        },
        other => other.parse()?,
    };
    info!("rendering {:?}", viewport.visible_plane());
    let mut canvas = Canvas::new(width, height);
    strategy.refresh(&viewport, &coloring, &mut canvas)?;
    canvas.save(value(matches, OUTPUT)?)
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
