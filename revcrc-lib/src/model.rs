//! The Williams parametric CRC model: a generator in chopped form plus
//! initial register value, final XOR, reflection switches and the derived
//! check and residue values.

use crate::crc;
use crate::poly::Poly;
use crate::text;
use std::fmt;

/// Behaviour switches of a model and of the text layer reading and writing
/// its polynomials.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelFlags {
    /// reflect each input character before consumption
    pub reflect_in: bool,
    /// reflect the register before the final XOR
    pub reflect_out: bool,
    /// right-justify characters within their hex digits
    pub right_just: bool,
    /// print uppercase hexadecimal
    pub upper: bool,
    /// print spaces between output characters
    pub space: bool,
    /// low byte first within file characters
    pub low_byte_first: bool,
    /// arguments are raw binary, not hex
    pub raw_input: bool,
    /// augmenting (classical) algorithm: append width zero bits
    pub augment: bool,
    /// report only the principal solution of an underdetermined search
    pub exhaustive: bool,
}

impl Default for ModelFlags {
    fn default() -> ModelFlags {
        ModelFlags {
            reflect_in: false,
            reflect_out: false,
            right_just: false,
            upper: false,
            space: false,
            low_byte_first: false,
            raw_input: false,
            augment: true,
            exhaustive: false,
        }
    }
}

/// A Williams model. The generator is stored chopped (top `+1` term
/// omitted), so the width of the model is `spoly.len()`; `init` and
/// `xorout` are width-wide. `check` and `magic` are derived by
/// [`set_checks`]; `name` is set only for catalog hits.
///
/// [`set_checks`]: Model::set_checks
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Model {
    pub spoly: Poly,
    pub init: Poly,
    pub xorout: Poly,
    pub check: Poly,
    pub magic: Poly,
    pub flags: ModelFlags,
    pub name: Option<String>,
}

impl Model {
    /// Canonicalises the model: the generator is normalized (its length is
    /// then the width) and `init`/`xorout` are masked to the width. A model
    /// that normalizes to width zero loses its catalog attribution.
    pub fn canon(&mut self) {
        self.spoly.norm();
        let w = self.spoly.len();
        self.init.right(w);
        self.xorout.right(w);
        if w == 0 {
            self.name = None;
        }
    }

    /// Clears the catalog attribution.
    pub fn novel(&mut self) {
        self.name = None;
    }

    /// Computes the derived fields: `check`, the CRC of the ASCII string
    /// "123456789" under this model, and `magic`, the residue an error-free
    /// codeword leaves in the register before the final XOR.
    pub fn set_checks(&mut self) {
        self.check = self.check_value();
        self.magic = self.magic_value();
    }

    fn check_value(&self) -> Poly {
        let mut msg = Poly::new(0);
        for &b in b"123456789" {
            let c = if self.flags.reflect_in { b.reverse_bits() } else { b };
            msg.push_int(c as u64, 8);
        }
        let mut xo = self.xorout.clone();
        if self.flags.reflect_out {
            xo.rev();
        }
        let mut out = crc::crc(&msg, &self.spoly, &self.init, &xo, self.flags.augment);
        if self.flags.reflect_out {
            out.rev();
        }
        out
    }

    fn magic_value(&self) -> Poly {
        let w = self.spoly.len();
        let mut xo = self.xorout.clone();
        if self.flags.reflect_out {
            xo.rev();
        }
        let zero = Poly::new(w);
        let mut res = crc::crc(&xo, &self.spoly, &zero, &zero, self.flags.augment);
        if self.flags.reflect_out {
            res.rev();
        }
        res
    }

    /// Turns the model into the reverse algorithm of the same family: the
    /// one that checks the same codewords read in the opposite bit order.
    /// Involutive on canonical models with matching reflections, up to the
    /// catalog name, which a reversed model never keeps.
    pub fn reverse(&mut self) {
        self.spoly.rcp();
        std::mem::swap(&mut self.init, &mut self.xorout);
        if self.flags.reflect_out {
            self.init.rev();
        } else {
            self.xorout.rev();
        }
        self.flags.reflect_in = !self.flags.reflect_in;
        self.flags.reflect_out = !self.flags.reflect_out;
        self.novel();
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let just = ModelFlags {
            right_just: true,
            upper: self.flags.upper,
            ..Default::default()
        };
        let hex = |p: &Poly| text::format_poly(p, just, 4);
        write!(
            f,
            "width={}  poly=0x{}  init=0x{}  refin={}  refout={}  xorout=0x{}  check=0x{}  residue=0x{}  name=",
            self.spoly.len(),
            hex(&self.spoly),
            hex(&self.init),
            self.flags.reflect_in,
            self.flags.reflect_out,
            hex(&self.xorout),
            hex(&self.check),
            hex(&self.magic),
        )?;
        match &self.name {
            Some(n) => write!(f, "\"{}\"", n),
            None => write!(f, "(none)"),
        }
    }
}
