//! The search core: completes a partial Williams model from samples.
//!
//! A sample is the concatenation of a message and its CRC, already read in
//! the bit order under test. Depending on which of poly, init and xorout are
//! given, the search verifies, derives the missing parameters algebraically,
//! row-reduces for the initial value, or brute-forces generator candidates
//! against the GCD of sample differences.
//!
//! Every candidate model that checks out against all samples is reported
//! through the injected [`SearchReport`] in discovery order, which for the
//! polynomial search is the counter order of the trial iterator. All results
//! are also collected and returned.

use crate::crc::{crc, crc_with_quotient, rem};
use crate::model::{Model, ModelFlags};
use crate::poly::Poly;

/// Progress is reported every `SPIN_MASK + 1` trial polynomials.
pub const SPIN_MASK: u64 = 0x7f_ffff;

/// Which parameters of the guess are to be taken as given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Known {
    pub poly: bool,
    pub init: bool,
    pub xorout: bool,
    /// input reflection was pinned by the caller (drivers use this to decide
    /// whether to run a second pass with reflections toggled)
    pub refin: bool,
    /// output reflection was pinned by the caller
    pub refout: bool,
    /// stop the polynomial search at the range end
    pub range_end: bool,
}

/// Where the search reports findings and progress.
pub trait SearchReport {
    /// A complete, verified model.
    fn found(&mut self, model: &Model);
    /// The search is alive; `seq` increases from 0. By convention drivers
    /// suppress the first report.
    fn progress(&mut self, _factor: &Poly, _flags: ModelFlags, _seq: u64) {}
}

/// Swallows reports; the returned vector still carries all results.
pub struct Quiet;

impl SearchReport for Quiet {
    fn found(&mut self, _model: &Model) {}
}

/// Completes `guess` against `samples`, returning every consistent model.
///
/// `guess.spoly` is the generator when `known.poly` is set, otherwise the
/// start of the search range (its length is the width searched). `qpoly`
/// bounds the range from above when `known.range_end` is set. The guess must
/// not be crossed-endian.
pub fn search(
    guess: &Model,
    qpoly: &Poly,
    known: Known,
    samples: &[Poly],
    report: &mut dyn SearchReport,
) -> Vec<Model> {
    assert!(
        guess.flags.reflect_in == guess.flags.reflect_out,
        "cannot search for crossed-endian models"
    );
    let mut results = Vec::new();
    if known.poly {
        dispatch(guess, &guess.spoly, known, samples, report, &mut results);
        return results;
    }
    let width = guess.spoly.len();
    if width == 0 {
        return results;
    }

    // the poly is unknown: every candidate divides the GCD of differences
    let work = gcd_differences(&guess.init, known, samples);
    if work.len() < width + 1 {
        return results;
    }
    if work.len() == width + 1 {
        // the GCD is the right length for the generator, so it is the
        // generator; it comes normalized, chop it
        let mut gpoly = work;
        let l = gpoly.len();
        gpoly.shift(0, 1, l, 0);
        dispatch(guess, &gpoly, known, samples, report, &mut results);
        return results;
    }

    let mut factor = guess.spoly.clone();
    let mut qq = qpoly.clone();
    let mut have_q = known.range_end;
    let zero = Poly::new(0);

    // when the GCD is compact the cofactor is shorter than the generator;
    // enumerate cofactors instead
    let short = work.len() <= 2 * factor.len();
    if short {
        let clen = work.len() - factor.len() - 1;
        if have_q || !factor.is_zero() {
            // greatest generator reachable from the truncated range
            let mut bound = Poly::ones(clen);
            bound.right(factor.len());
            if bound < factor {
                return results;
            } else if have_q && bound < qq {
                // end polynomial past the rollover: run to wrap instead
                have_q = false;
            } else if have_q {
                qq.right(clen);
            }
        }
        factor.right(clen);
    }

    // clear the least significant term; the iterator steps through odd
    // polynomials only
    let fl = factor.len();
    factor.shift(0, 0, fl - 1, 1);
    let mut trials = TrialPolys {
        factor,
        end: if have_q { Some(qq) } else { None },
    };
    let mut spin: u64 = 0;
    let mut seq: u64 = 0;
    while let Some(factor) = trials.next() {
        if spin & SPIN_MASK == 0 {
            report.progress(&factor, guess.flags, seq);
            seq += 1;
        }
        spin = spin.wrapping_add(1);
        if short {
            if crc(&work, &factor, &zero, &zero, false).is_zero() {
                // the cofactor divides; the quotient is the generator
                let (_, mut gpoly) = crc_with_quotient(&work, &factor, &zero, &zero, false);
                let gl = gpoly.len();
                gpoly.shift(0, 1, gl - 1, 1);
                gpoly.incr(); // chop and ensure the +1 term
                dispatch(guess, &gpoly, known, samples, report, &mut results);
            }
        } else if crc(&work, &factor, &zero, &zero, false).is_zero() {
            dispatch(guess, &factor, known, samples, report, &mut results);
        }
    }
    results
}

/// Successive trial polynomials with the `+1` term set, in counter order,
/// bounded by an optional end polynomial and ending on wrap.
struct TrialPolys {
    factor: Poly,
    end: Option<Poly>,
}

impl Iterator for TrialPolys {
    type Item = Poly;

    fn next(&mut self) -> Option<Poly> {
        if !self.factor.incr() {
            return None;
        }
        if !self.factor.coeff(self.factor.len() - 1) {
            // even: step to the next odd value
            if !self.factor.incr() {
                return None;
            }
        }
        if let Some(end) = &self.end {
            if self.factor >= *end {
                return None;
            }
        }
        Some(self.factor.clone())
    }
}

/// GCD of the differences between pairs of samples. Equal-length pairs
/// difference by plain XOR; unequal-length pairs join in only when the init
/// is known, with `init` added at both aligned ends to cancel its
/// contribution.
fn gcd_differences(init: &Poly, known: Known, samples: &[Poly]) -> Poly {
    let mut gcd = Poly::new(0);
    let mut have = false;
    for (ai, a) in samples.iter().enumerate() {
        for b in samples.iter().skip(ai + 1) {
            let (alen, blen) = (a.len(), b.len());
            let mut work;
            if alen == blen {
                work = a.clone();
                work.sum(b, 0);
            } else if known.init && alen < blen {
                work = b.clone();
                work.sum(a, blen - alen);
                work.sum(init, 0);
                work.sum(init, blen - alen);
            } else if known.init {
                work = a.clone();
                work.sum(b, alen - blen);
                work.sum(init, 0);
                work.sum(init, alen - blen);
            } else {
                continue;
            }
            work.norm();
            if work.is_empty() {
                continue;
            }
            if !have {
                gcd = work;
                have = true;
                continue;
            }
            // Euclid; rem() wants the longer value first, so swap by hand
            loop {
                if gcd.len() < work.len() {
                    std::mem::swap(&mut gcd, &mut work);
                }
                let r = rem(&gcd, &work);
                gcd = work;
                work = r;
                work.norm();
                if work.is_empty() {
                    break;
                }
            }
        }
    }
    gcd
}

fn dispatch(
    guess: &Model,
    divisor: &Poly,
    known: Known,
    samples: &[Poly],
    report: &mut dyn SearchReport,
    results: &mut Vec<Model>,
) {
    if known.init && known.xorout {
        chkres(divisor, &guess.init, guess.flags, &guess.xorout, samples, report, results);
    } else if known.init {
        calout(divisor, &guess.init, guess.flags, samples, report, results);
    } else if known.xorout {
        calini(divisor, guess.flags, &guess.xorout, samples, report, results);
    } else {
        engini(divisor, guess.flags, samples, report, results);
    }
}

/// A row of the Init matrix. `Empty` and `One` stand for a free variable
/// pinned to zero or one respectively; `Data` rows carry coefficients plus
/// the augment bit.
enum Row {
    Empty,
    One,
    Data(Poly),
}

/// Searches for init values implied by the samples, given the generator.
///
/// Method from Ewing, "Reverse-Engineering a CRC Algorithm": the CRC
/// difference of the two shortest samples is a linear function of the init
/// bits; build that function's matrix column by column, row-reduce it over
/// GF(2) and enumerate the solution space.
fn engini(
    divisor: &Poly,
    flags: ModelFlags,
    samples: &[Poly],
    report: &mut dyn SearchReport,
    results: &mut Vec<Model>,
) {
    let dlen = divisor.len();
    if samples.is_empty() || dlen == 0 {
        return;
    }

    // the two shortest distinct sample lengths
    let (mut ai, mut bi) = (0usize, 0usize);
    let (mut alen, mut blen) = (samples[0].len(), samples[0].len());
    for (i, s) in samples.iter().enumerate().skip(1) {
        let il = s.len();
        if il < alen {
            bi = ai;
            blen = alen;
            ai = i;
            alen = il;
        } else if il > alen && (ai == bi || il < blen) {
            bi = i;
            blen = il;
        }
    }
    if ai == bi {
        // no two lengths differ: solve with an assumed XorOut of zero
        let xz = Poly::new(dlen);
        calini(divisor, flags, &xz, samples, report, results);
        return;
    }

    let one = {
        let mut p = Poly::new(1);
        p.incr();
        p
    };
    let zero = Poly::new(0);

    // potential contribution of the bottom bit of init to the difference
    let base = if blen < 2 * dlen {
        let mut apoly = Poly::new(dlen);
        apoly.sum(&one, 2 * dlen - 1 - blen);
        apoly.sum(&one, 2 * dlen - 1 - alen);
        apoly
    } else {
        let mut apoly = Poly::new(blen - dlen + 1);
        apoly.sum(&one, 0);
        apoly.sum(&one, blen - alen);
        crc(&apoly, divisor, &zero, &zero, false)
    };

    // actual contribution of init: the CRC difference of the two samples
    let amod = crc(&samples[ai], divisor, &zero, &zero, false);
    let bvec = crc(&samples[bi], divisor, &zero, &amod, false);

    // each column is the previous one advanced one bit position
    let one_bit = Poly::new(1);
    let mut cols = Vec::with_capacity(dlen);
    cols.push(base);
    for k in 1..dlen {
        let next = crc(&one_bit, divisor, &cols[k - 1], &zero, true);
        cols.push(next);
    }

    // transpose, augment with the contribution vector and reduce to row
    // echelon form; inconsistent rows are dropped here and the candidates
    // they would have rejected fall to verification instead
    let mut mat: Vec<Row> = (0..dlen).map(|_| Row::Empty).collect();
    for i in 0..dlen {
        let mut row = Poly::new(0);
        for j in 0..dlen {
            row.paste(&cols[dlen - 1 - j], i, j, j + 1, dlen + 1);
        }
        if !row.is_zero() {
            row.paste(&bvec, i, dlen, dlen + 1, dlen + 1);
        }
        let mut j = row.first();
        while j < dlen {
            if let Row::Data(r) = &mat[j] {
                row.sum(r, 0);
                j = row.first();
            } else {
                break;
            }
        }
        if j < dlen {
            mat[j] = Row::Data(row);
        }
    }

    // the augment sentinel: a lone unit in the augment column
    let mut bone = Poly::new(dlen + 1);
    bone.sum(&one, dlen);

    // iterate through all solutions by back-substitution, stepping the free
    // rows through zero and one like a binary counter; with the exhaustive
    // flag only the principal solution is taken
    loop {
        let mut carry = true;
        let mut sol = bone.clone();
        for i in 0..dlen {
            let j = dlen - 1 - i;
            let par = match &mat[j] {
                Row::Empty => false,
                Row::One => sol.parity(&bone),
                Row::Data(r) => sol.parity(r),
            };
            if par {
                sol.sum(&one, j);
            }
            if carry {
                if matches!(mat[j], Row::Empty) {
                    mat[j] = Row::One;
                    if !flags.exhaustive {
                        carry = false;
                    }
                } else if matches!(mat[j], Row::One) {
                    mat[j] = Row::Empty;
                }
            }
        }
        sol.resize(dlen); // trim the augment bit
        calout(divisor, &sol, flags, samples, report, results);
        if carry {
            break;
        }
    }
}

/// Derives XorOut for a known init, then verifies.
fn calout(
    divisor: &Poly,
    init: &Poly,
    flags: ModelFlags,
    samples: &[Poly],
    report: &mut dyn SearchReport,
    results: &mut Vec<Model>,
) {
    let shortest = match samples.iter().min_by_key(|s| s.len()) {
        Some(s) => s,
        None => return,
    };
    let zero = Poly::new(0);
    let mut xorout = crc(shortest, divisor, init, &zero, false);
    // the register precedes the RefOut stage; reflect once to obtain the
    // model's XorOut
    if flags.reflect_out {
        xorout.rev();
    }
    chkres(divisor, init, flags, &xorout, samples, report, results);
}

/// Derives Init for a known XorOut by running the reciprocal algorithm over
/// the reversed shortest sample, then verifies.
fn calini(
    divisor: &Poly,
    flags: ModelFlags,
    xorout: &Poly,
    samples: &[Poly],
    report: &mut dyn SearchReport,
    results: &mut Vec<Model>,
) {
    let shortest = match samples.iter().min_by_key(|s| s.len()) {
        Some(s) => s,
        None => return,
    };
    let mut rcpdiv = divisor.clone();
    rcpdiv.rcp();
    let mut rxor = xorout.clone();
    if !flags.reflect_out {
        rxor.rev();
    }
    let mut arg = shortest.clone();
    arg.rev();
    let zero = Poly::new(0);
    let mut init = crc(&arg, &rcpdiv, &rxor, &zero, false);
    init.rev();
    chkres(divisor, &init, flags, xorout, samples, report, results);
}

/// Verifies a complete parameter set against every sample and reports it.
fn chkres(
    divisor: &Poly,
    init: &Poly,
    flags: ModelFlags,
    xorout: &Poly,
    samples: &[Poly],
    report: &mut dyn SearchReport,
    results: &mut Vec<Model>,
) {
    let mut xo = xorout.clone();
    if flags.reflect_out {
        xo.rev();
    }
    for s in samples {
        if !crc(s, divisor, init, &xo, false).is_zero() {
            return;
        }
    }
    let mut m = Model {
        spoly: divisor.clone(),
        init: init.clone(),
        xorout: xorout.clone(),
        check: Poly::new(0),
        magic: Poly::new(0),
        flags,
        name: None,
    };
    m.set_checks();
    report.found(&m);
    results.push(m);
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;
    use rand::Rng;

    fn bytes(msg: &[u8]) -> Poly {
        let mut p = Poly::new(0);
        for &b in msg {
            p.push_int(b as u64, 8);
        }
        p
    }

    /// message ++ CRC, computed under the given parameters
    fn sample(msg: &[u8], width: usize, poly: u128, init: u128, xorout: u128) -> Poly {
        let g = Poly::from_int(poly, width);
        let i = Poly::from_int(init, width);
        let x = Poly::from_int(xorout, width);
        let mut s = bytes(msg);
        let c = crc(&bytes(msg), &g, &i, &x, true);
        let off = s.len();
        s.resize(off + width);
        s.sum(&c, off);
        s
    }

    /// P6: the model reproduces a zero register over every sample
    fn verifies(m: &Model, samples: &[Poly]) -> bool {
        let mut xo = m.xorout.clone();
        if m.flags.reflect_out {
            xo.rev();
        }
        samples
            .iter()
            .all(|s| crc(s, &m.spoly, &m.init, &xo, false).is_zero())
    }

    fn guess(width: usize) -> Model {
        Model {
            spoly: Poly::new(width),
            init: Poly::new(width),
            xorout: Poly::new(width),
            ..Default::default()
        }
    }

    #[test]
    fn poly_known_recovers_init_and_xorout() {
        // CRC-16/IBM-3740 samples
        let samples = vec![
            sample(b"123456789", 16, 0x1021, 0xFFFF, 0x0000),
            sample(b"abc", 16, 0x1021, 0xFFFF, 0x0000),
            sample(b"abcdef", 16, 0x1021, 0xFFFF, 0x0000),
        ];
        let mut g = guess(16);
        g.spoly = Poly::from_int(0x1021u16, 16);
        let known = Known {
            poly: true,
            ..Default::default()
        };
        let res = search(&g, &Poly::new(0), known, &samples, &mut Quiet);
        assert!(res.iter().all(|m| verifies(m, &samples)));
        assert!(res
            .iter()
            .any(|m| m.init.to_int() == 0xFFFF && m.xorout.to_int() == 0x0000));
    }

    #[test]
    fn full_search_finds_smbus() {
        // nothing known but the width; one equal-length pair feeds the GCD
        let params = (8usize, 0x07u128, 0x00u128, 0x00u128);
        let samples = vec![
            sample(&[0xB1], params.0, params.1, params.2, params.3),
            sample(&[0x31], params.0, params.1, params.2, params.3),
            sample(b"12", params.0, params.1, params.2, params.3),
            sample(b"123", params.0, params.1, params.2, params.3),
            sample(b"1234", params.0, params.1, params.2, params.3),
        ];
        let res = search(&guess(8), &Poly::new(0), Known::default(), &samples, &mut Quiet);
        assert!(res.iter().all(|m| verifies(m, &samples)));
        assert!(res.iter().any(|m| {
            m.spoly.to_int() == 0x07 && m.init.to_int() == 0x00 && m.xorout.to_int() == 0x00
        }));
    }

    #[test]
    fn long_differences_take_the_wide_path() {
        // ten-byte messages keep the GCD well past twice the width
        let p = (8usize, 0x07u128, 0x00u128, 0x00u128);
        let samples = vec![
            sample(&[0x80, 2, 3, 4, 5, 6, 7, 8, 9, 10], p.0, p.1, p.2, p.3),
            sample(&[0x00, 2, 3, 4, 5, 6, 7, 8, 9, 11], p.0, p.1, p.2, p.3),
            sample(b"123", p.0, p.1, p.2, p.3),
            sample(b"1234", p.0, p.1, p.2, p.3),
        ];
        let res = search(&guess(8), &Poly::new(0), Known::default(), &samples, &mut Quiet);
        assert!(res.iter().all(|m| verifies(m, &samples)));
        assert!(res.iter().any(|m| m.spoly.to_int() == 0x07));
    }

    #[test]
    fn range_prunes_candidates() {
        let p = (8usize, 0x07u128, 0x00u128, 0x00u128);
        let samples = vec![
            sample(&[0xB1], p.0, p.1, p.2, p.3),
            sample(&[0x31], p.0, p.1, p.2, p.3),
            sample(b"123", p.0, p.1, p.2, p.3),
            sample(b"1234", p.0, p.1, p.2, p.3),
        ];
        // the generator 0x07 lies below the range [0x10, 0x20)
        let mut g = guess(8);
        g.spoly = Poly::from_int(0x10u8, 8);
        let known = Known {
            range_end: true,
            ..Default::default()
        };
        let res = search(&g, &Poly::from_int(0x20u8, 8), known, &samples, &mut Quiet);
        assert!(res.iter().all(|m| {
            m.spoly >= Poly::from_int(0x10u8, 8) && m.spoly < Poly::from_int(0x20u8, 8)
        }));
        assert!(!res.iter().any(|m| m.spoly.to_int() == 0x07));
        // widening the range to cover 0x07 brings it back
        let mut g = guess(8);
        g.spoly = Poly::new(8);
        let res2 = search(&g, &Poly::from_int(0x20u8, 8), known, &samples, &mut Quiet);
        assert!(res2.iter().any(|m| m.spoly.to_int() == 0x07));
    }

    #[test]
    fn short_samples_use_the_compact_contribution() {
        // both shortest samples are under twice the width, including the
        // checksum of the empty message
        let samples = vec![
            sample(b"", 16, 0x1021, 0xFFFF, 0x0000),
            sample(b"a", 16, 0x1021, 0xFFFF, 0x0000),
            sample(b"ab", 16, 0x1021, 0xFFFF, 0x0000),
            sample(b"abc", 16, 0x1021, 0xFFFF, 0x0000),
        ];
        let mut g = guess(16);
        g.spoly = Poly::from_int(0x1021u16, 16);
        let known = Known {
            poly: true,
            ..Default::default()
        };
        let res = search(&g, &Poly::new(0), known, &samples, &mut Quiet);
        assert!(res.iter().all(|m| verifies(m, &samples)));
        assert!(res
            .iter()
            .any(|m| m.init.to_int() == 0xFFFF && m.xorout.to_int() == 0x0000));
    }

    #[test]
    fn xorout_known_derives_init() {
        let samples = vec![
            sample(b"123456789", 16, 0x1021, 0xB2AA, 0x0000),
            sample(b"abc", 16, 0x1021, 0xB2AA, 0x0000),
            sample(b"abcdef", 16, 0x1021, 0xB2AA, 0x0000),
        ];
        let mut g = guess(16);
        g.spoly = Poly::from_int(0x1021u16, 16);
        let known = Known {
            poly: true,
            xorout: true,
            ..Default::default()
        };
        let res = search(&g, &Poly::new(0), known, &samples, &mut Quiet);
        assert!(res.iter().any(|m| m.init.to_int() == 0xB2AA));
    }

    #[test]
    fn reflected_samples_reflected_flags() {
        // CRC-32/ISO-HDLC, samples read with per-byte reflection
        let width = 32;
        let g32 = Poly::from_int(0x04C11DB7u32, width);
        let init = Poly::from_int(0xFFFFFFFFu32, width);
        let xorout = Poly::from_int(0xFFFFFFFFu32, width);
        let mk = |msg: &[u8]| {
            let mut m = Poly::new(0);
            for &b in msg {
                m.push_int(b.reverse_bits() as u64, 8);
            }
            // the transmitted CRC is the register value xored with the
            // pre-reflection XorOut, exactly what a reflected sender appends
            let mut xo = xorout.clone();
            xo.rev();
            let c = crc(&m, &g32, &init, &xo, true);
            let off = m.len();
            m.resize(off + width);
            m.sum(&c, off);
            m
        };
        let samples = vec![mk(b"123456789"), mk(b"abc"), mk(b"abcdef"), mk(b"abcd")];
        let mut g = guess(width);
        g.spoly = g32.clone();
        g.flags.reflect_in = true;
        g.flags.reflect_out = true;
        let known = Known {
            poly: true,
            ..Default::default()
        };
        let res = search(&g, &Poly::new(0), known, &samples, &mut Quiet);
        assert!(res.iter().all(|m| verifies(m, &samples)));
        assert!(res
            .iter()
            .any(|m| m.init.to_int() == 0xFFFFFFFF && m.xorout.to_int() == 0xFFFFFFFF));
    }

    #[test]
    fn underdetermined_init_enumerates_each_solution_once() {
        // G = x^2 + 1 and sample lengths a multiple of its period leave the
        // whole init space free
        let width = 2;
        let g2 = Poly::from_int(0x1u8, width);
        let init = Poly::from_int(0x2u8, width);
        let zero2 = Poly::new(width);
        let mk = |msg: &[u8]| {
            let mut s = bytes(msg);
            let c = crc(&bytes(msg), &g2, &init, &zero2, true);
            let off = s.len();
            s.resize(off + width);
            s.sum(&c, off);
            s
        };
        let samples = vec![mk(&[0xAA]), mk(&[0xAA, 0xBB])];
        let mut g = guess(width);
        g.spoly = g2.clone();
        let known = Known {
            poly: true,
            ..Default::default()
        };
        let res = search(&g, &Poly::new(0), known, &samples, &mut Quiet);
        assert_eq!(res.len(), 4);
        let mut inits: Vec<u128> = res.iter().map(|m| m.init.to_int()).collect();
        inits.sort_unstable();
        inits.dedup();
        assert_eq!(inits.len(), 4);
        assert!(res.iter().all(|m| verifies(m, &samples)));
        // the exhaustive flag keeps only the principal solution
        g.flags.exhaustive = true;
        let res1 = search(&g, &Poly::new(0), known, &samples, &mut Quiet);
        assert_eq!(res1.len(), 1);
    }

    #[test]
    #[should_panic(expected = "crossed-endian")]
    fn crossed_endian_is_rejected() {
        let mut g = guess(8);
        g.flags.reflect_in = true;
        search(&g, &Poly::new(0), Known::default(), &[], &mut Quiet);
    }

    #[quickcheck]
    fn qc_search_with_poly_known_is_sound_and_complete(
        width: u8,
        poly: u16,
        init: u16,
        xorout: u16,
        body: Vec<u8>,
    ) -> TestResult {
        let width = (width as usize % 10) + 1;
        if body.len() < 3 {
            return TestResult::discard();
        }
        let mask = (1u128 << width) - 1;
        let poly = (poly as u128 | 1) & mask;
        let init = init as u128 & mask;
        let xorout = xorout as u128 & mask;
        let mut msgs: Vec<Vec<u8>> = Vec::new();
        for k in 2..=4usize {
            msgs.push(body.iter().cycle().take(k + body.len() % 3).cloned().collect());
        }
        msgs.push(body.clone());
        let samples: Vec<Poly> = msgs
            .iter()
            .map(|m| sample(m, width, poly, init, xorout))
            .collect();
        let mut g = guess(width);
        g.spoly = Poly::from_int(poly, width);
        let known = Known {
            poly: true,
            ..Default::default()
        };
        let res = search(&g, &Poly::new(0), known, &samples, &mut Quiet);
        let sound = res.iter().all(|m| verifies(m, &samples));
        let complete = res
            .iter()
            .any(|m| m.init.to_int() == init && m.xorout.to_int() == xorout);
        TestResult::from_bool(sound && complete)
    }

    #[test]
    fn random_width8_round_trips() {
        // random parameters, random files; the full search must rediscover
        // them
        let mut rng = rand::thread_rng();
        for _ in 0..8 {
            let poly = (rng.gen::<u8>() | 1) as u128;
            let init = rng.gen::<u8>() as u128;
            let xorout = rng.gen::<u8>() as u128;
            let mut msgs: Vec<Vec<u8>> = Vec::new();
            let equal_len: Vec<u8> = (0..5).map(|_| rng.gen()).collect();
            let mut other = equal_len.clone();
            other[0] ^= 0x80; // keep the difference full-degree
            msgs.push(equal_len);
            msgs.push(other);
            for k in 1..4usize {
                msgs.push((0..5 + k).map(|_| rng.gen()).collect());
            }
            let samples: Vec<Poly> = msgs
                .iter()
                .map(|m| sample(m, 8, poly, init, xorout))
                .collect();
            let res = search(&guess(8), &Poly::new(0), Known::default(), &samples, &mut Quiet);
            assert!(
                res.iter().any(|m| m.spoly.to_int() == poly
                    && m.init.to_int() == init
                    && m.xorout.to_int() == xorout),
                "missed poly={:#x} init={:#x} xorout={:#x}",
                poly,
                init,
                xorout
            );
            assert!(res.iter().all(|m| verifies(m, &samples)));
        }
    }
}
