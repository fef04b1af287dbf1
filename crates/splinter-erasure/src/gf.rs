//! GF(2^8) arithmetic with reducing polynomial `0x11d` and generator 2.
//!
//! Every table is built at compile time. Multiplication goes through a
//! full 256 x 256 product table, so `mul_slice*` is one lookup per byte.

/// x^8 + x^4 + x^3 + x^2 + 1
const POLYNOMIAL: u16 = 0x11d;

struct Tables {
    exp: [u8; 512],
    log: [u8; 256],
    mul: [[u8; 256]; 256],
}

impl Tables {
    const fn new() -> Self {
        let mut exp = [0u8; 512];
        let mut log = [0u8; 256];

        let mut x: u16 = 1;
        let mut i = 0;
        while i < 255 {
            exp[i] = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= POLYNOMIAL;
            }
            i += 1;
        }
        // Doubled so exp[log a + log b] needs no modulo.
        while i < 512 {
            exp[i] = exp[i - 255];
            i += 1;
        }

        let mut mul = [[0u8; 256]; 256];
        let mut a = 1;
        while a < 256 {
            let mut b = 1;
            while b < 256 {
                mul[a][b] = exp[log[a] as usize + log[b] as usize];
                b += 1;
            }
            a += 1;
        }

        Self { exp, log, mul }
    }
}

static TABLES: Tables = Tables::new();

/// `a * b`
#[inline]
pub fn mul(a: u8, b: u8) -> u8 {
    TABLES.mul[a as usize][b as usize]
}

/// Multiplicative inverse of `a`.
///
/// # Panics
///
/// Panics if `a == 0`.
#[inline]
pub fn inv(a: u8) -> u8 {
    assert!(a != 0, "zero has no inverse in GF(2^8)");
    TABLES.exp[255 - TABLES.log[a as usize] as usize]
}

/// `a / b`
///
/// # Panics
///
/// Panics if `b == 0`.
#[inline]
pub fn div(a: u8, b: u8) -> u8 {
    mul(a, inv(b))
}

/// `a^n`
pub fn pow(a: u8, n: usize) -> u8 {
    if n == 0 {
        return 1;
    }
    if a == 0 {
        return 0;
    }
    let log = TABLES.log[a as usize] as usize * n % 255;
    TABLES.exp[log]
}

/// `out[i] = c * input[i]`
pub fn mul_slice(c: u8, input: &[u8], out: &mut [u8]) {
    debug_assert_eq!(input.len(), out.len());
    match c {
        0 => out.fill(0),
        1 => out.copy_from_slice(input),
        _ => {
            let row = &TABLES.mul[c as usize];
            for (o, &i) in out.iter_mut().zip(input) {
                *o = row[i as usize];
            }
        }
    }
}

/// `out[i] ^= c * input[i]`
pub fn mul_slice_xor(c: u8, input: &[u8], out: &mut [u8]) {
    debug_assert_eq!(input.len(), out.len());
    match c {
        0 => {}
        1 => {
            for (o, &i) in out.iter_mut().zip(input) {
                *o ^= i;
            }
        }
        _ => {
            let row = &TABLES.mul[c as usize];
            for (o, &i) in out.iter_mut().zip(input) {
                *o ^= row[i as usize];
            }
        }
    }
}
