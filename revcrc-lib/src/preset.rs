//! The catalog of well-known Williams models, accessible by name or index.
//!
//! Entries carry the published parameters and check value; the residue and
//! a fresh check value are derived by the engine when an entry is
//! materialised, so a corrupt table constant cannot go unnoticed by the
//! test suite. Building with `--no-default-features` compiles the crate
//! without a catalog.

use crate::model::{Model, ModelFlags};
use crate::poly::Poly;

/// One catalogued algorithm. Constants are written the usual way: the
/// chopped generator, init and xorout right-aligned in `width` bits.
pub struct Preset {
    pub name: &'static str,
    pub width: usize,
    pub poly: u128,
    pub init: u128,
    pub refin: bool,
    pub refout: bool,
    pub xorout: u128,
    pub check: u128,
}

/// Sorted by name, ASCII order; `by_name` binary-searches it.
#[cfg(feature = "presets")]
static CATALOG: &[Preset] = &[
    Preset { name: "CRC-10/ATM", width: 10, poly: 0x233, init: 0x000, refin: false, refout: false, xorout: 0x000, check: 0x199 },
    Preset { name: "CRC-12/DECT", width: 12, poly: 0x80F, init: 0x000, refin: false, refout: false, xorout: 0x000, check: 0xF5B },
    Preset { name: "CRC-12/UMTS", width: 12, poly: 0x80F, init: 0x000, refin: false, refout: true, xorout: 0x000, check: 0xDAF },
    Preset { name: "CRC-14/DARC", width: 14, poly: 0x0805, init: 0x0000, refin: true, refout: true, xorout: 0x0000, check: 0x082D },
    Preset { name: "CRC-15/CAN", width: 15, poly: 0x4599, init: 0x0000, refin: false, refout: false, xorout: 0x0000, check: 0x059E },
    Preset { name: "CRC-15/MPT1327", width: 15, poly: 0x6815, init: 0x0000, refin: false, refout: false, xorout: 0x0001, check: 0x2566 },
    Preset { name: "CRC-16/ARC", width: 16, poly: 0x8005, init: 0x0000, refin: true, refout: true, xorout: 0x0000, check: 0xBB3D },
    Preset { name: "CRC-16/CDMA2000", width: 16, poly: 0xC867, init: 0xFFFF, refin: false, refout: false, xorout: 0x0000, check: 0x4C06 },
    Preset { name: "CRC-16/CMS", width: 16, poly: 0x8005, init: 0xFFFF, refin: false, refout: false, xorout: 0x0000, check: 0xAEE7 },
    Preset { name: "CRC-16/DECT-R", width: 16, poly: 0x0589, init: 0x0000, refin: false, refout: false, xorout: 0x0001, check: 0x007E },
    Preset { name: "CRC-16/DECT-X", width: 16, poly: 0x0589, init: 0x0000, refin: false, refout: false, xorout: 0x0000, check: 0x007F },
    Preset { name: "CRC-16/DNP", width: 16, poly: 0x3D65, init: 0x0000, refin: true, refout: true, xorout: 0xFFFF, check: 0xEA82 },
    Preset { name: "CRC-16/EN-13757", width: 16, poly: 0x3D65, init: 0x0000, refin: false, refout: false, xorout: 0xFFFF, check: 0xC2B7 },
    Preset { name: "CRC-16/GENIBUS", width: 16, poly: 0x1021, init: 0xFFFF, refin: false, refout: false, xorout: 0xFFFF, check: 0xD64E },
    Preset { name: "CRC-16/GSM", width: 16, poly: 0x1021, init: 0x0000, refin: false, refout: false, xorout: 0xFFFF, check: 0xCE3C },
    Preset { name: "CRC-16/IBM-3740", width: 16, poly: 0x1021, init: 0xFFFF, refin: false, refout: false, xorout: 0x0000, check: 0x29B1 },
    Preset { name: "CRC-16/IBM-SDLC", width: 16, poly: 0x1021, init: 0xFFFF, refin: true, refout: true, xorout: 0xFFFF, check: 0x906E },
    Preset { name: "CRC-16/ISO-IEC-14443-3-A", width: 16, poly: 0x1021, init: 0xC6C6, refin: true, refout: true, xorout: 0x0000, check: 0xBF05 },
    Preset { name: "CRC-16/KERMIT", width: 16, poly: 0x1021, init: 0x0000, refin: true, refout: true, xorout: 0x0000, check: 0x2189 },
    Preset { name: "CRC-16/LJ1200", width: 16, poly: 0x6F63, init: 0x0000, refin: false, refout: false, xorout: 0x0000, check: 0xBDF4 },
    Preset { name: "CRC-16/MAXIM-DOW", width: 16, poly: 0x8005, init: 0x0000, refin: true, refout: true, xorout: 0xFFFF, check: 0x44C2 },
    Preset { name: "CRC-16/MCRF4XX", width: 16, poly: 0x1021, init: 0xFFFF, refin: true, refout: true, xorout: 0x0000, check: 0x6F91 },
    Preset { name: "CRC-16/MODBUS", width: 16, poly: 0x8005, init: 0xFFFF, refin: true, refout: true, xorout: 0x0000, check: 0x4B37 },
    Preset { name: "CRC-16/PROFIBUS", width: 16, poly: 0x1DCF, init: 0xFFFF, refin: false, refout: false, xorout: 0xFFFF, check: 0xA819 },
    Preset { name: "CRC-16/SPI-FUJITSU", width: 16, poly: 0x1021, init: 0x1D0F, refin: false, refout: false, xorout: 0x0000, check: 0xE5CC },
    Preset { name: "CRC-16/T10-DIF", width: 16, poly: 0x8BB7, init: 0x0000, refin: false, refout: false, xorout: 0x0000, check: 0xD0DB },
    Preset { name: "CRC-16/UMTS", width: 16, poly: 0x8005, init: 0x0000, refin: false, refout: false, xorout: 0x0000, check: 0xFEE8 },
    Preset { name: "CRC-16/USB", width: 16, poly: 0x8005, init: 0xFFFF, refin: true, refout: true, xorout: 0xFFFF, check: 0xB4C8 },
    Preset { name: "CRC-16/XMODEM", width: 16, poly: 0x1021, init: 0x0000, refin: false, refout: false, xorout: 0x0000, check: 0x31C3 },
    Preset { name: "CRC-17/CAN-FD", width: 17, poly: 0x1685B, init: 0x00000, refin: false, refout: false, xorout: 0x00000, check: 0x04F03 },
    Preset { name: "CRC-24/BLE", width: 24, poly: 0x00065B, init: 0x555555, refin: true, refout: true, xorout: 0x000000, check: 0xC25A56 },
    Preset { name: "CRC-24/OPENPGP", width: 24, poly: 0x864CFB, init: 0xB704CE, refin: false, refout: false, xorout: 0x000000, check: 0x21CF02 },
    Preset { name: "CRC-3/GSM", width: 3, poly: 0x3, init: 0x0, refin: false, refout: false, xorout: 0x7, check: 0x4 },
    Preset { name: "CRC-3/ROHC", width: 3, poly: 0x3, init: 0x7, refin: true, refout: true, xorout: 0x0, check: 0x6 },
    Preset { name: "CRC-32/AIXM", width: 32, poly: 0x814141AB, init: 0x00000000, refin: false, refout: false, xorout: 0x00000000, check: 0x3010BF7F },
    Preset { name: "CRC-32/AUTOSAR", width: 32, poly: 0xF4ACFB13, init: 0xFFFFFFFF, refin: true, refout: true, xorout: 0xFFFFFFFF, check: 0x1697D06A },
    Preset { name: "CRC-32/BASE91-D", width: 32, poly: 0xA833982B, init: 0xFFFFFFFF, refin: true, refout: true, xorout: 0xFFFFFFFF, check: 0x87315576 },
    Preset { name: "CRC-32/BZIP2", width: 32, poly: 0x04C11DB7, init: 0xFFFFFFFF, refin: false, refout: false, xorout: 0xFFFFFFFF, check: 0xFC891918 },
    Preset { name: "CRC-32/CD-ROM-EDC", width: 32, poly: 0x8001801B, init: 0x00000000, refin: true, refout: true, xorout: 0x00000000, check: 0x6EC2EDC4 },
    Preset { name: "CRC-32/CKSUM", width: 32, poly: 0x04C11DB7, init: 0x00000000, refin: false, refout: false, xorout: 0xFFFFFFFF, check: 0x765E7680 },
    Preset { name: "CRC-32/ISCSI", width: 32, poly: 0x1EDC6F41, init: 0xFFFFFFFF, refin: true, refout: true, xorout: 0xFFFFFFFF, check: 0xE3069283 },
    Preset { name: "CRC-32/ISO-HDLC", width: 32, poly: 0x04C11DB7, init: 0xFFFFFFFF, refin: true, refout: true, xorout: 0xFFFFFFFF, check: 0xCBF43926 },
    Preset { name: "CRC-32/JAMCRC", width: 32, poly: 0x04C11DB7, init: 0xFFFFFFFF, refin: true, refout: true, xorout: 0x00000000, check: 0x340BC6D9 },
    Preset { name: "CRC-32/MPEG-2", width: 32, poly: 0x04C11DB7, init: 0xFFFFFFFF, refin: false, refout: false, xorout: 0x00000000, check: 0x0376E6E7 },
    Preset { name: "CRC-32/XFER", width: 32, poly: 0x000000AF, init: 0x00000000, refin: false, refout: false, xorout: 0x00000000, check: 0xBD0BE338 },
    Preset { name: "CRC-4/G-704", width: 4, poly: 0x3, init: 0x0, refin: true, refout: true, xorout: 0x0, check: 0x7 },
    Preset { name: "CRC-40/GSM", width: 40, poly: 0x0004820009, init: 0x0000000000, refin: false, refout: false, xorout: 0xFFFFFFFFFF, check: 0xD4164FC646 },
    Preset { name: "CRC-5/EPC-C1G2", width: 5, poly: 0x09, init: 0x09, refin: false, refout: false, xorout: 0x00, check: 0x00 },
    Preset { name: "CRC-5/G-704", width: 5, poly: 0x15, init: 0x00, refin: true, refout: true, xorout: 0x00, check: 0x07 },
    Preset { name: "CRC-5/USB", width: 5, poly: 0x05, init: 0x1F, refin: true, refout: true, xorout: 0x1F, check: 0x19 },
    Preset { name: "CRC-6/DARC", width: 6, poly: 0x19, init: 0x00, refin: true, refout: true, xorout: 0x00, check: 0x26 },
    Preset { name: "CRC-6/G-704", width: 6, poly: 0x03, init: 0x00, refin: true, refout: true, xorout: 0x00, check: 0x06 },
    Preset { name: "CRC-64/ECMA-182", width: 64, poly: 0x42F0E1EBA9EA3693, init: 0x0000000000000000, refin: false, refout: false, xorout: 0x0000000000000000, check: 0x6C40DF5F0B497347 },
    Preset { name: "CRC-64/GO-ISO", width: 64, poly: 0x000000000000001B, init: 0xFFFFFFFFFFFFFFFF, refin: true, refout: true, xorout: 0xFFFFFFFFFFFFFFFF, check: 0xB90956C775A41001 },
    Preset { name: "CRC-64/WE", width: 64, poly: 0x42F0E1EBA9EA3693, init: 0xFFFFFFFFFFFFFFFF, refin: false, refout: false, xorout: 0xFFFFFFFFFFFFFFFF, check: 0x62EC59E3F1A4F00A },
    Preset { name: "CRC-64/XZ", width: 64, poly: 0x42F0E1EBA9EA3693, init: 0xFFFFFFFFFFFFFFFF, refin: true, refout: true, xorout: 0xFFFFFFFFFFFFFFFF, check: 0x995DC9BBDF1939FA },
    Preset { name: "CRC-7/MMC", width: 7, poly: 0x09, init: 0x00, refin: false, refout: false, xorout: 0x00, check: 0x75 },
    Preset { name: "CRC-7/ROHC", width: 7, poly: 0x4F, init: 0x7F, refin: true, refout: true, xorout: 0x00, check: 0x53 },
    Preset { name: "CRC-8/AUTOSAR", width: 8, poly: 0x2F, init: 0xFF, refin: false, refout: false, xorout: 0xFF, check: 0xDF },
    Preset { name: "CRC-8/BLUETOOTH", width: 8, poly: 0xA7, init: 0x00, refin: true, refout: true, xorout: 0x00, check: 0x26 },
    Preset { name: "CRC-8/CDMA2000", width: 8, poly: 0x9B, init: 0xFF, refin: false, refout: false, xorout: 0x00, check: 0xDA },
    Preset { name: "CRC-8/DARC", width: 8, poly: 0x39, init: 0x00, refin: true, refout: true, xorout: 0x00, check: 0x15 },
    Preset { name: "CRC-8/I-432-1", width: 8, poly: 0x07, init: 0x00, refin: false, refout: false, xorout: 0x55, check: 0xA1 },
    Preset { name: "CRC-8/MAXIM-DOW", width: 8, poly: 0x31, init: 0x00, refin: true, refout: true, xorout: 0x00, check: 0xA1 },
    Preset { name: "CRC-8/NRSC-5", width: 8, poly: 0x31, init: 0xFF, refin: false, refout: false, xorout: 0x00, check: 0xF7 },
    Preset { name: "CRC-8/ROHC", width: 8, poly: 0x07, init: 0xFF, refin: true, refout: true, xorout: 0x00, check: 0xD0 },
    Preset { name: "CRC-8/SMBUS", width: 8, poly: 0x07, init: 0x00, refin: false, refout: false, xorout: 0x00, check: 0xF4 },
    Preset { name: "CRC-8/TECH-3250", width: 8, poly: 0x1D, init: 0xFF, refin: true, refout: true, xorout: 0x00, check: 0x97 },
    Preset { name: "CRC-82/DARC", width: 82, poly: 0x0308C0111011401440411, init: 0x0, refin: true, refout: true, xorout: 0x0, check: 0x09EA83F625023801FD612 },
];

#[cfg(not(feature = "presets"))]
static CATALOG: &[Preset] = &[];

/// Number of catalogued models; zero when built without the catalog.
pub fn count() -> usize {
    CATALOG.len()
}

/// Materialises the catalog entry at `index`.
pub fn by_index(index: usize) -> Option<Model> {
    CATALOG.get(index).map(materialize)
}

/// Looks a model up by name, case-insensitively.
pub fn by_name(name: &str) -> Option<Model> {
    let query = name.to_ascii_uppercase();
    CATALOG
        .binary_search_by(|p| p.name.cmp(query.as_str()))
        .ok()
        .and_then(by_index)
}

fn materialize(p: &Preset) -> Model {
    let mut m = Model {
        spoly: Poly::from_int(p.poly, p.width),
        init: Poly::from_int(p.init, p.width),
        xorout: Poly::from_int(p.xorout, p.width),
        check: Poly::from_int(p.check, p.width),
        magic: Poly::new(0),
        flags: ModelFlags {
            reflect_in: p.refin,
            reflect_out: p.refout,
            ..Default::default()
        },
        name: Some(p.name.to_string()),
    };
    m.set_checks();
    m
}
