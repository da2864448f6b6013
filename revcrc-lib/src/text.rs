//! Reading and writing polynomials as text and raw bytes.
//!
//! Arguments are streams of characters of a configurable bit width. Hex
//! strings carry `ceil(bits / 4)` digits per character, raw input (and file
//! input) `ceil(bits / 8)` bytes per character. Justification decides which
//! bits of a group belong to the character; input reflection reverses each
//! character before it enters the polynomial. On output, a reflected
//! algorithm renders its characters last-first, each reflected, so a
//! full-width CRC prints as the value the reflected algorithm reports.

use crate::model::ModelFlags;
use crate::poly::Poly;
use std::fmt;
use std::io::{self, Read};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// A character that is neither a hex digit nor whitespace.
    BadDigit(char),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BadDigit(c) => write!(f, "invalid character '{}' in hex argument", c),
        }
    }
}

impl std::error::Error for ParseError {}

fn low_mask(bits: usize) -> u64 {
    if bits >= 64 {
        !0
    } else {
        (1u64 << bits) - 1
    }
}

fn reflect(v: u64, bits: usize) -> u64 {
    v.reverse_bits() >> (64 - bits)
}

fn push_group(p: &mut Poly, value: u64, unit: usize, bits: usize, flags: ModelFlags) {
    let b = bits.min(unit);
    let mut c = if flags.right_just {
        value & low_mask(b)
    } else {
        value >> (unit - b)
    };
    if flags.reflect_in {
        c = reflect(c, b);
    }
    p.push_int(c, b);
}

/// Parses a polynomial from a string: hex digits grouped into characters of
/// `bits` bits, whitespace separating, or the raw bytes of the string when
/// the `raw_input` flag is set. A leading `0x` is accepted on hex input.
pub fn parse_poly(s: &str, flags: ModelFlags, bits: usize) -> Result<Poly, ParseError> {
    assert!((1..=64).contains(&bits), "bits per character out of range");
    if flags.raw_input {
        return Ok(bytes_to_poly(s.as_bytes(), flags, bits));
    }
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let nd = (bits + 3) / 4;
    let mut p = Poly::new(0);
    let mut group = 0u64;
    let mut have = 0usize;
    for c in s.chars() {
        if c.is_whitespace() {
            if have > 0 {
                push_group(&mut p, group, have * 4, bits, flags);
                group = 0;
                have = 0;
            }
            continue;
        }
        let d = c.to_digit(16).ok_or(ParseError::BadDigit(c))? as u64;
        group = group << 4 | d;
        have += 1;
        if have == nd {
            push_group(&mut p, group, have * 4, bits, flags);
            group = 0;
            have = 0;
        }
    }
    if have > 0 {
        push_group(&mut p, group, have * 4, bits, flags);
    }
    Ok(p)
}

fn bytes_to_poly(bytes: &[u8], flags: ModelFlags, bits: usize) -> Poly {
    let nb = (bits + 7) / 8;
    let mut p = Poly::new(0);
    for chunk in bytes.chunks(nb) {
        let mut v = 0u64;
        if flags.low_byte_first {
            for &b in chunk.iter().rev() {
                v = v << 8 | b as u64;
            }
        } else {
            for &b in chunk {
                v = v << 8 | b as u64;
            }
        }
        push_group(&mut p, v, chunk.len() * 8, bits, flags);
    }
    p
}

/// Reads a whole stream as a polynomial, grouping bytes into characters of
/// `bits` bits as [`parse_poly`] does for raw input.
pub fn read_poly<R: Read>(r: &mut R, flags: ModelFlags, bits: usize) -> io::Result<Poly> {
    assert!((1..=64).contains(&bits), "bits per character out of range");
    let mut buf = Vec::new();
    r.read_to_end(&mut buf)?;
    Ok(bytes_to_poly(&buf, flags, bits))
}

/// Formats a polynomial as hex characters of `bits` bits, the dual of
/// [`parse_poly`]. Under `reflect_out` the characters are rendered
/// last-first, each reflected.
pub fn format_poly(p: &Poly, flags: ModelFlags, bits: usize) -> String {
    assert!((1..=64).contains(&bits), "bits per character out of range");
    let mut q = p.clone();
    let r = q.len() % bits;
    if r != 0 {
        let target = q.len() + bits - r;
        if flags.right_just {
            q.right(target);
        } else {
            q.resize(target);
        }
    }
    let n = q.len() / bits;
    let nd = (bits + 3) / 4;
    let mut chars = Vec::with_capacity(n);
    for k in 0..n {
        let mut v = 0u64;
        for i in 0..bits {
            v = v << 1 | q.coeff(k * bits + i) as u64;
        }
        chars.push(v);
    }
    if flags.reflect_out {
        chars.reverse();
        for c in chars.iter_mut() {
            *c = reflect(*c, bits);
        }
    }
    let mut out = String::new();
    for (k, &c) in chars.iter().enumerate() {
        if flags.space && k > 0 {
            out.push(' ');
        }
        let shown = if flags.right_just { c } else { c << (nd * 4 - bits) };
        let digits = format!("{:0width$x}", shown, width = nd);
        if flags.upper {
            out.push_str(&digits.to_uppercase());
        } else {
            out.push_str(&digits);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> ModelFlags {
        ModelFlags::default()
    }

    #[test]
    fn parse_plain_hex() {
        let p = parse_poly("1021", flags(), 4).unwrap();
        assert_eq!(p.len(), 16);
        assert_eq!(p.to_int(), 0x1021);
        let p = parse_poly("0x1021", flags(), 4).unwrap();
        assert_eq!(p.to_int(), 0x1021);
        let p = parse_poly("313233", flags(), 8).unwrap();
        assert_eq!(p.len(), 24);
        assert_eq!(p.to_int(), 0x313233);
    }

    #[test]
    fn parse_rejects_junk() {
        assert_eq!(
            parse_poly("12g4", flags(), 8),
            Err(ParseError::BadDigit('g'))
        );
    }

    #[test]
    fn parse_reflects_characters() {
        let mut f = flags();
        f.reflect_in = true;
        let p = parse_poly("80", f, 8).unwrap();
        assert_eq!(p.to_int(), 0x01);
        let p = parse_poly("8001", f, 8).unwrap();
        assert_eq!(p.to_int(), 0x0180);
    }

    #[test]
    fn parse_justification() {
        // 7-bit characters in two hex digits
        let mut f = flags();
        let p = parse_poly("81", f, 7).unwrap(); // left-justified: top 7 of 0x81
        assert_eq!(p.to_int(), 0x40);
        f.right_just = true;
        let p = parse_poly("81", f, 7).unwrap(); // low 7 of 0x81
        assert_eq!(p.to_int(), 0x01);
    }

    #[test]
    fn parse_whitespace_separates() {
        let p = parse_poly("31 32", flags(), 8).unwrap();
        assert_eq!(p.to_int(), 0x3132);
        // a separator flushes a short group
        let p = parse_poly("3 32", flags(), 8).unwrap();
        assert_eq!(p.len(), 12);
        assert_eq!(p.to_int(), 0x332);
    }

    #[test]
    fn raw_input_takes_bytes() {
        let mut f = flags();
        f.raw_input = true;
        let p = parse_poly("12", f, 8).unwrap();
        assert_eq!(p.to_int(), 0x3132);
    }

    #[test]
    fn read_groups_bytes() {
        let data = [0x12u8, 0x34, 0x56, 0x78];
        let p = read_poly(&mut &data[..], flags(), 16).unwrap();
        assert_eq!(p.to_int(), 0x12345678);
        let mut f = flags();
        f.low_byte_first = true;
        let p = read_poly(&mut &data[..], f, 16).unwrap();
        assert_eq!(p.to_int(), 0x34127856);
    }

    #[test]
    fn format_is_parse_dual() {
        let p = parse_poly("29b1", flags(), 8).unwrap();
        assert_eq!(format_poly(&p, flags(), 8), "29b1");
        let mut f = flags();
        f.upper = true;
        f.space = true;
        assert_eq!(format_poly(&p, f, 8), "29 B1");
    }

    #[test]
    fn format_reflected_output() {
        // the reflected rendition of a full-width value is its mirror image
        let p = Poly::from_int(0x649C2FD3u32, 32); // rev32(0xCBF43926)
        let mut f = flags();
        f.reflect_out = true;
        assert_eq!(format_poly(&p, f, 8), "cbf43926");
    }

    #[test]
    fn format_pads_partial_characters() {
        let p = Poly::from_int(0x1Fu8, 5);
        let mut f = flags();
        f.right_just = true;
        assert_eq!(format_poly(&p, f, 8), "1f");
        // left-justified, the five bits sit at the top of the character
        assert_eq!(format_poly(&p, flags(), 8), "f8");
    }
}
