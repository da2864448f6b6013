//! The Williams-model CRC engine: polynomial division with an initialised
//! register, in augmenting and non-augmenting flavours.
//!
//! The engine consumes the message bit stream MSB-first. Input reflection is
//! applied upstream, when the message characters are read; output reflection
//! is applied downstream, by the caller. Only the register orientation lives
//! here, so the same division serves the forward engine, the reverse
//! engine's divisibility tests and the generic polynomial remainder.

use crate::poly::Poly;

/// CRC of `msg` under the chopped generator `divisor` (its `+1` term of
/// degree `divisor.len()` is implicit), with initial register `init` and
/// final XOR `xorout`, both of the generator's width.
///
/// With `augment` set, the classical algorithm: the register value is
/// `(init·x^L + msg·x^w) mod G`, `L` the message length. Without it, the
/// plain remainder `(init·x^(L-w) + msg) mod G`, the message padded right to
/// the width when shorter. `init` and `xorout` may be empty, standing for
/// zero.
pub fn crc(msg: &Poly, divisor: &Poly, init: &Poly, xorout: &Poly, augment: bool) -> Poly {
    divide(msg, divisor, init, xorout, augment, false).0
}

/// Like [`crc`], also returning the quotient of the division: the feedback
/// bit stream for the consumed message bits beyond the first `w`, of length
/// `max(L, w) - w`. The augment tail contributes no quotient bits.
pub fn crc_with_quotient(
    msg: &Poly,
    divisor: &Poly,
    init: &Poly,
    xorout: &Poly,
    augment: bool,
) -> (Poly, Poly) {
    let (r, q) = divide(msg, divisor, init, xorout, augment, true);
    (r, q.expect("quotient requested"))
}

/// Remainder of `dividend` by `divisor`, the divisor taken from its leading
/// set bit. The divisor must be nonzero; leading zero bits carry no weight.
pub fn rem(dividend: &Poly, divisor: &Poly) -> Poly {
    let f = divisor.first();
    assert!(f < divisor.len(), "remainder by the zero polynomial");
    let mut chopped = divisor.clone();
    let l = chopped.len();
    chopped.shift(0, f + 1, l, 0);
    let zero = Poly::new(0);
    crc(dividend, &chopped, &zero, &zero, false)
}

fn divide(
    msg: &Poly,
    divisor: &Poly,
    init: &Poly,
    xorout: &Poly,
    augment: bool,
    want_quotient: bool,
) -> (Poly, Option<Poly>) {
    let w = divisor.len();
    if w == 0 {
        return (Poly::new(0), want_quotient.then(|| Poly::new(0)));
    }
    let l = msg.len();
    let body = l.max(w);
    let total = if augment { l + w } else { body };

    // dividend bit i: the message (padded with zeros) with init folded into
    // the leading width bits
    let dbit = |i: usize| {
        let m = i < l && msg.coeff(i);
        let v = i < init.len() && init.coeff(i);
        m ^ v
    };

    let mut reg = Poly::new(w);
    for i in 0..w {
        if dbit(i) {
            reg.set_bit(i, true);
        }
    }
    let mut quot = want_quotient.then(|| Poly::new(body - w));
    let mut qi = 0;
    for i in w..total {
        let fed = reg.shl1(dbit(i));
        if fed {
            reg.xor_words(divisor);
        }
        if i < body {
            if let Some(q) = quot.as_mut() {
                q.set_bit(qi, fed);
                qi += 1;
            }
        }
    }
    reg.sum(xorout, 0);
    (reg, quot)
}
