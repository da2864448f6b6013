use clap::{App, AppSettings, Arg, ArgGroup};
use revcrc_lib::crc;
use revcrc_lib::model::{Model, ModelFlags};
use revcrc_lib::poly::Poly;
use revcrc_lib::preset;
use revcrc_lib::reverse::{search, Known, SearchReport};
use revcrc_lib::text;
use std::fs::File;
use std::io::{self, Read};
use std::process::exit;

const RECOMMENDED_SAMPLES: usize = 4;

fn die(msg: &str) -> ! {
    eprintln!("revcrc: {}", msg);
    exit(1);
}

fn warn(msg: &str) {
    eprintln!("revcrc: warning: {}", msg);
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Calc,
    RevCalc,
    Dump,
    List,
    Echo,
    Search,
}

/// Prints findings as they come and progress to stderr, suppressing the
/// first progress report.
struct Console;

impl SearchReport for Console {
    fn found(&mut self, model: &Model) {
        println!("{}", model);
    }

    fn progress(&mut self, factor: &Poly, flags: ModelFlags, seq: u64) {
        if seq == 0 {
            return;
        }
        let just = ModelFlags {
            right_just: true,
            ..Default::default()
        };
        eprintln!(
            "revcrc: searching: width={}  poly=0x{}  refin={}  refout={}",
            factor.len(),
            text::format_poly(factor, just, 4),
            flags.reflect_in,
            flags.reflect_out
        );
    }
}

fn main() {
    let matches = App::new("revcrc")
        .about("arbitrary-precision CRC calculator and algorithm finder")
        .setting(AppSettings::DisableVersion)
        .arg(Arg::with_name("calc").short("c").help("calculate CRCs"))
        .arg(Arg::with_name("revcalc").short("v").help("calculate reversed CRCs"))
        .arg(Arg::with_name("dump").short("d").help("dump algorithm parameters"))
        .arg(Arg::with_name("list").short("D").help("list preset algorithms"))
        .arg(Arg::with_name("echo").short("e").help("echo (and reformat) input"))
        .arg(Arg::with_name("search").short("s").help("search for algorithm"))
        .group(ArgGroup::with_name("mode").args(&["calc", "revcalc", "dump", "list", "echo", "search"]))
        .arg(Arg::with_name("width").short("w").value_name("WIDTH").takes_value(true).help("register size, in bits"))
        .arg(Arg::with_name("poly").short("p").value_name("POLY").takes_value(true).help("generator or search range start polynomial"))
        .arg(Arg::with_name("rpoly").short("P").value_name("RPOLY").takes_value(true).help("reversed generator polynomial (implies WIDTH)"))
        .arg(Arg::with_name("kpoly").short("k").value_name("KPOLY").takes_value(true).help("generator in Koopman notation (implies WIDTH)"))
        .arg(Arg::with_name("init").short("i").value_name("INIT").takes_value(true).help("initial register value"))
        .arg(Arg::with_name("xorout").short("x").value_name("XOROUT").takes_value(true).help("final register XOR value"))
        .arg(Arg::with_name("qpoly").short("q").value_name("QPOLY").takes_value(true).help("search range end polynomial"))
        .arg(Arg::with_name("model").short("m").value_name("MODEL").takes_value(true).help("preset CRC algorithm"))
        .arg(Arg::with_name("exhaustive").short("1").help("skip equivalent forms"))
        .arg(Arg::with_name("bigendian").short("b").help("big-endian CRC (RefIn and RefOut false)"))
        .arg(Arg::with_name("bigout").short("B").help("big-endian CRC output (RefOut false)"))
        .arg(Arg::with_name("littleendian").short("l").help("little-endian CRC"))
        .arg(Arg::with_name("littleout").short("L").help("little-endian CRC output"))
        .arg(Arg::with_name("rightjust").short("r").help("right-justified output"))
        .arg(Arg::with_name("leftjust").short("t").help("left-justified output"))
        .arg(Arg::with_name("bits").short("a").value_name("BITS").takes_value(true).help("bits per character (1 to 64)"))
        .arg(Arg::with_name("obits").short("A").value_name("OBITS").takes_value(true).help("bits per output character (1 to 64)"))
        .arg(Arg::with_name("infile").short("f").help("read files named in STRINGs"))
        .arg(Arg::with_name("nopreset").short("F").help("skip preset model check pass"))
        .arg(Arg::with_name("nobrute").short("G").help("skip brute force search pass"))
        .arg(Arg::with_name("noaugment").short("M").help("non-augmenting algorithm"))
        .arg(Arg::with_name("spaced").short("S").help("print spaces between characters"))
        .arg(Arg::with_name("revmodel").short("V").help("reverse algorithm only"))
        .arg(Arg::with_name("upper").short("X").help("print uppercase hexadecimal"))
        .arg(Arg::with_name("lowbyte").short("y").help("low bytes first in files"))
        .arg(Arg::with_name("raw").short("z").help("raw binary STRINGs"))
        .arg(Arg::with_name("strings").value_name("STRING").multiple(true))
        .get_matches();

    let mode = if matches.is_present("calc") {
        Mode::Calc
    } else if matches.is_present("revcalc") {
        Mode::RevCalc
    } else if matches.is_present("dump") {
        Mode::Dump
    } else if matches.is_present("list") {
        Mode::List
    } else if matches.is_present("echo") {
        Mode::Echo
    } else if matches.is_present("search") {
        Mode::Search
    } else {
        die("no mode switch specified. Use revcrc -h for help.");
    };

    let ibperhx;
    let obperhx;
    match matches.value_of("bits") {
        Some(v) => {
            let n = parse_bits(v, 'a');
            ibperhx = n;
            obperhx = matches.value_of("obits").map_or(n, |o| parse_bits(o, 'A'));
        }
        None => {
            ibperhx = 8;
            obperhx = matches.value_of("obits").map_or(8, |o| parse_bits(o, 'A'));
        }
    }

    let mut model = Model::default();
    let mut known = Known::default();
    let mut width: usize = 0;

    // a preset fixes everything; explicit parameters and switches then
    // override it and void the attribution
    if let Some(name) = matches.value_of("model") {
        if preset::count() == 0 {
            die("no preset models available");
        }
        match preset::by_name(name) {
            Some(m) => model = m,
            None => die(&format!(
                "preset model '{}' not found.  Use revcrc -D to list presets.",
                name
            )),
        }
        width = model.spoly.len();
        known = Known {
            poly: true,
            init: true,
            xorout: true,
            refin: true,
            refout: true,
            range_end: false,
        };
    }

    let mut modified = false;
    if matches.is_present("bigendian") {
        model.flags.reflect_in = false;
        model.flags.reflect_out = false;
        model.flags.right_just = true;
        known.refin = true;
        known.refout = true;
        modified = true;
    }
    if matches.is_present("bigout") {
        model.flags.reflect_out = false;
        model.flags.right_just = true;
        known.refout = true;
        modified = true;
    }
    if matches.is_present("littleendian") {
        model.flags.reflect_in = true;
        model.flags.reflect_out = true;
        model.flags.right_just = false;
        known.refin = true;
        known.refout = true;
        modified = true;
    }
    if matches.is_present("littleout") {
        model.flags.reflect_out = true;
        model.flags.right_just = false;
        known.refout = true;
        modified = true;
    }
    if matches.is_present("rightjust") {
        model.flags.right_just = true;
    }
    if matches.is_present("leftjust") {
        model.flags.right_just = false;
    }
    if matches.is_present("exhaustive") {
        model.flags.exhaustive = true;
    }
    if matches.is_present("noaugment") {
        model.flags.augment = false;
    }
    if matches.is_present("spaced") {
        model.flags.space = true;
    }
    if matches.is_present("upper") {
        model.flags.upper = true;
    }
    if matches.is_present("lowbyte") {
        model.flags.low_byte_first = true;
    }
    if matches.is_present("raw") {
        model.flags.raw_input = true;
    }

    if let Some(v) = matches.value_of("kpoly") {
        model.spoly = parse_param(v);
        model.spoly.kchop();
        width = model.spoly.len();
        known.poly = true;
        modified = true;
    }
    if let Some(v) = matches.value_of("rpoly") {
        model.spoly = parse_param(v);
        model.spoly.kchop();
        width = model.spoly.len();
        model.spoly.rcp();
        known.poly = true;
        modified = true;
    }
    if let Some(v) = matches.value_of("poly") {
        model.spoly = parse_param(v);
        known.poly = true;
        modified = true;
        if !model.spoly.is_empty() && !model.spoly.coeff(model.spoly.len() - 1) {
            warn(&format!("POLY has no +1 term; did you mean -P {}?", v));
        }
    }
    if let Some(v) = matches.value_of("init") {
        model.init = parse_param(v);
        known.init = true;
        modified = true;
    }
    if let Some(v) = matches.value_of("xorout") {
        model.xorout = parse_param(v);
        known.xorout = true;
        modified = true;
    }
    let mut qpoly = Poly::new(0);
    if let Some(v) = matches.value_of("qpoly") {
        qpoly = parse_param(v);
        // a non-zero end polynomial turns the poly into a range start; a
        // zero one searches to the end of the range
        if !qpoly.is_zero() {
            known.range_end = true;
            known.poly = false;
        }
    }
    if let Some(v) = matches.value_of("width") {
        width = v
            .parse()
            .unwrap_or_else(|_| die("argument to -w must be a number"));
    } else if width == 0 {
        width = model.spoly.len();
    }

    if modified {
        model.novel();
    }
    if matches.is_present("revmodel") {
        model.reverse();
    }

    // expand or trim parameters, right-aligned, to the current width
    model.spoly.right(width);
    model.init.right(width);
    model.xorout.right(width);
    qpoly.right(width);

    if mode != Mode::Search {
        model.canon();
    }

    let strings: Vec<&str> = matches
        .values_of("strings")
        .map(|v| v.collect())
        .unwrap_or_default();
    let infile = matches.is_present("infile");

    match mode {
        Mode::Calc | Mode::RevCalc => {
            if mode == Mode::RevCalc {
                // the whole argument is reflected, not just its characters,
                // so reciprocate and mirror rather than toggling reflections
                model.spoly.rcp();
                if !model.flags.reflect_out {
                    model.init.rev();
                    model.xorout.rev();
                }
                std::mem::swap(&mut model.init, &mut model.xorout);
            }
            // xorout applies after the refout stage, the engine before it
            if model.flags.reflect_out {
                model.xorout.rev();
            }
            for s in &strings {
                let mut apoly = read_arg(s, infile, model.flags, ibperhx);
                if mode == Mode::RevCalc {
                    apoly.rev();
                }
                let mut out = crc::crc(
                    &apoly,
                    &model.spoly,
                    &model.init,
                    &model.xorout,
                    model.flags.augment,
                );
                if mode == Mode::RevCalc {
                    out.rev();
                }
                println!("{}", text::format_poly(&out, model.flags, obperhx));
            }
        }
        Mode::Dump => {
            if !model.flags.augment {
                die("not a Williams model compliant algorithm");
            }
            model.set_checks();
            println!("{}", model);
        }
        Mode::List => {
            let mut n = preset::count();
            if n == 0 {
                die("no preset models available");
            }
            while n > 0 {
                n -= 1;
                println!("{}", preset::by_index(n).expect("catalog index"));
            }
        }
        Mode::Echo => {
            for s in &strings {
                let mut apoly = read_arg(s, infile, model.flags, ibperhx);
                apoly.sum(&model.init, 0);
                println!("{}", text::format_poly(&apoly, model.flags, obperhx));
            }
        }
        Mode::Search => {
            run_search(
                model,
                known,
                qpoly,
                width,
                &strings,
                infile,
                ibperhx,
                matches.is_present("nopreset"),
                matches.is_present("nobrute"),
            );
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_search(
    mut model: Model,
    known: Known,
    qpoly: Poly,
    width: usize,
    strings: &[&str],
    infile: bool,
    ibperhx: usize,
    skip_presets: bool,
    skip_brute: bool,
) {
    if !model.flags.augment {
        die("cannot search for non-Williams compliant models");
    }
    if width == 0 {
        die("must specify positive -k, -P or -w before -s");
    }

    let mut samples: Vec<Poly> = strings
        .iter()
        .map(|s| read_arg(s, infile, model.flags, ibperhx))
        .collect();
    if samples.is_empty() {
        warn("you have not given any samples");
    } else if samples.len() < RECOMMENDED_SAMPLES {
        warn(&format!(
            "you have only given {} sample{}",
            samples.len(),
            if samples.len() == 1 { "" } else { "s" }
        ));
        warn(&format!(
            "to reduce false positives, give {} or more samples",
            RECOMMENDED_SAMPLES
        ));
    }

    let mut found_any = false;

    // scan the catalog first; when the endianness is open, scan it both
    // ways with the samples reflected character-wise
    if !skip_presets {
        let mut pass = 0;
        loop {
            for idx in (0..preset::count()).rev() {
                let pset = preset::by_index(idx).expect("catalog index");
                if pset.spoly.len() != width
                    || pset.flags.reflect_in != model.flags.reflect_in
                    || pset.flags.reflect_out != model.flags.reflect_out
                {
                    continue;
                }
                if known.poly && model.spoly != pset.spoly {
                    continue;
                }
                if known.init && model.init != pset.init {
                    continue;
                }
                if known.xorout && model.xorout != pset.xorout {
                    continue;
                }
                let mut xo = pset.xorout.clone();
                if pset.flags.reflect_out {
                    xo.rev();
                }
                let solved = samples
                    .iter()
                    .all(|s| crc::crc(s, &pset.spoly, &pset.init, &xo, false).is_zero());
                if solved {
                    println!("{}", pset);
                    found_any = true;
                }
            }
            pass += 1;
            if known.refin || pass >= 2 {
                break;
            }
            model.flags.reflect_in = !model.flags.reflect_in;
            model.flags.reflect_out = !model.flags.reflect_out;
            for s in samples.iter_mut() {
                s.rev_chars(ibperhx);
            }
        }
        if pass == 2 {
            // restore the first-pass view for the brute force stage
            model.flags.reflect_in = !model.flags.reflect_in;
            model.flags.reflect_out = !model.flags.reflect_out;
            for s in samples.iter_mut() {
                s.rev_chars(ibperhx);
            }
        }
    }
    if found_any {
        exit(0);
    }
    if skip_brute && !known.poly {
        die("no models found");
    }
    if model.flags.reflect_in != model.flags.reflect_out {
        die("cannot search for crossed-endian models");
    }

    let mut pass = 0;
    loop {
        let results = search(&model, &qpoly, known, &samples, &mut Console);
        if !results.is_empty() {
            found_any = true;
        }
        pass += 1;
        if known.refin || pass >= 2 {
            break;
        }
        model.flags.reflect_in = !model.flags.reflect_in;
        model.flags.reflect_out = !model.flags.reflect_out;
        for s in samples.iter_mut() {
            s.rev_chars(ibperhx);
        }
    }
    if !found_any {
        die("no models found");
    }
}

fn parse_bits(v: &str, switch: char) -> usize {
    match v.parse::<usize>() {
        Ok(n) if (1..=64).contains(&n) => n,
        _ => die(&format!("argument to -{} must be between 1 and 64", switch)),
    }
}

/// Model parameters always parse as plain hex, four bits per character.
fn parse_param(v: &str) -> Poly {
    text::parse_poly(v, ModelFlags::default(), 4).unwrap_or_else(|e| die(&e.to_string()))
}

fn read_arg(s: &str, infile: bool, flags: ModelFlags, bits: usize) -> Poly {
    if !infile {
        return text::parse_poly(s, flags, bits).unwrap_or_else(|e| die(&e.to_string()));
    }
    let mut data = Vec::new();
    if s == "-" {
        io::stdin()
            .read_to_end(&mut data)
            .unwrap_or_else(|e| die(&format!("-: error reading standard input: {}", e)));
    } else {
        File::open(s)
            .unwrap_or_else(|_| die(&format!("{}: cannot open for reading", s)))
            .read_to_end(&mut data)
            .unwrap_or_else(|e| die(&format!("{}: error reading file: {}", s, e)));
    }
    text::read_poly(&mut data.as_slice(), flags, bits).expect("in-memory read")
}
