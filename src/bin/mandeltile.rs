extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mandeltile;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use mandeltile::errors::{Result, TileError};
use mandeltile::output::write_png;
use mandeltile::{Renderer, Schedule, TileRequest};
use num::Complex;
use std::path::Path;
use std::process::exit;
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

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> std::result::Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_number<T: FromStr>(s: &str, err: &str) -> std::result::Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
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

const OUTPUT: &str = "output";
const CENTER: &str = "center";
const SIZE: &str = "size";
const RESOLUTION: &str = "resolution";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";
const QUERY: &str = "query";
const VERBOSITY: &str = "verbosity";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandeltile")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot tile renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-1.3,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse tile corner"))
                .help("Lower left corner of the tile on the complex plane"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("2.6")
                .validator(|s| validate_number::<f64>(&s, "Could not parse tile size"))
                .help("Edge length of the tile on the complex plane"),
        )
        .arg(
            Arg::with_name(RESOLUTION)
                .required(false)
                .long(RESOLUTION)
                .short("r")
                .takes_value(true)
                .default_value("800")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        16_384,
                        "Could not parse resolution",
                        "Resolution must be between 1 and 16384",
                    )
                })
                .help("Edge length of the output image in pixels"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("2048")
                .validator(|s| {
                    validate_range(
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
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Use a fixed pool of worker threads instead of one thread per row"),
        )
        .arg(
            Arg::with_name(QUERY)
                .required(false)
                .long(QUERY)
                .short("q")
                .takes_value(true)
                .help("Take center, size and iterations from a query string: pr=RE&pi=IM&sz=SIZE&max=DEPTH"),
        )
        .arg(
            Arg::with_name(VERBOSITY)
                .required(false)
                .long(VERBOSITY)
                .short("v")
                .takes_value(true)
                .default_value("warn")
                .possible_values(&["error", "warn", "info", "debug", "trace"])
                .help("Log level"),
        )
        .get_matches()
}

// clap has already validated everything it hands us, but we go
// through the motions rather than unwrap.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T> {
    let raw = matches.value_of(name).unwrap_or("");
    T::from_str(raw).map_err(|_| TileError::invalid(name, raw).into())
}

fn request(matches: &ArgMatches) -> Result<TileRequest> {
    let resolution: usize = value(matches, RESOLUTION)?;
    if let Some(query) = matches.value_of(QUERY) {
        return Ok(TileRequest::from_query(query).with_resolution(resolution));
    }

    let raw = matches.value_of(CENTER).unwrap_or("");
    let center = parse_complex(raw).ok_or_else(|| TileError::invalid(CENTER, raw))?;
    Ok(TileRequest {
        center,
        size: value(matches, SIZE)?,
        max_iterations: value(matches, ITERATIONS)?,
        resolution,
    })
}

fn run() -> Result<()> {
    let matches = args();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(matches.value_of(VERBOSITY).unwrap_or("warn")),
    )
    .init();

    let request = request(&matches)?;
    let mut renderer = Renderer::new(request.max_iterations);
    if matches.is_present(THREADS) {
        renderer = renderer.with_schedule(Schedule::Pool(value(&matches, THREADS)?));
    }

    info!("rendering {:?} with {:?}", request, renderer.schedule());
    let image = renderer.render_tile(&request.tile());

    let output = matches.value_of(OUTPUT).unwrap_or("");
    write_png(&image, Path::new(output))?;
    info!("wrote {}", output);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Render failure: {}", e);
        for cause in e.iter_causes() {
            eprintln!("caused by: {}", cause);
        }
        exit(1);
    }
}
