//! Star and planet names.

use rand::prelude::*;

const PREFIXES: [&str; 10] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
];
const SUFFIXES: [&str; 8] = [
    "Centauri", "Reticuli", "Orionis", "Draconis", "Lyrae", "Cygnus", "Aquilae", "Pegasi",
];

/// Catalogue-style star name, e.g. "Gamma Lyrae 417".
pub fn random_star_name(rng: &mut dyn RngCore) -> String {
    let prefix = PREFIXES[rng.gen_range(0..PREFIXES.len())];
    let suffix = SUFFIXES[rng.gen_range(0..SUFFIXES.len())];
    let number = rng.gen_range(0..1000);
    format!("{} {} {}", prefix, suffix, number)
}

/// "Planet A", "Planet B", ... by orbit slot; numbered past Z.
pub fn planet_name(slot: usize) -> String {
    match u8::try_from(slot) {
        Ok(s) if s < 26 => format!("Planet {}", char::from(b'A' + s)),
        _ => format!("Planet {}", slot + 1),
    }
}
