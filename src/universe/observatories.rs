//! Solar systems hosting a Jove observatory.
//!
//! Not part of the SDE; the list is kept by hand, grouped by region id.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

pub static JOVE_OBSERVATORIES: &[(i64, &[&str])] = &[
    // Derelik
    (10000001, &["Hasateem", "Sayartchen"]),
    // The Forge
    (10000002, &["Oijanen", "Saisio"]),
    // Vale of the Silent
    (10000003, &["1W-0KS", "E-JCUS"]),
    // Domain
    (10000043, &["Hedion", "Ghesis"]),
    // Sinq Laison
    (10000032, &["Ardallabier", "Kamela"]),
    // Heimatar
    (10000030, &["Teonusude", "Aralgrund"]),
    // Cloud Ring
    (10000051, &["FR-RCH", "IP6V-X"]),
    // Great Wildlands
    (10000011, &["DX-DFJ", "WIO-OL"]),
];

static OBSERVATORY_SYSTEMS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    JOVE_OBSERVATORIES
        .iter()
        .flat_map(|(_, systems)| systems.iter().copied())
        .collect()
});

/// Whether the named system carries the observatory marker
pub fn has_jove_observatory(system_name: &str) -> bool {
    OBSERVATORY_SYSTEMS.contains(system_name)
}
