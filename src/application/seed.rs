//! Example species loaded at startup.

/// A species entry ready for insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSpecies {
    pub path: [&'static str; 5],
    pub common_name: &'static str,
    pub reference_link: &'static str,
}

pub const EXAMPLES: [SeedSpecies; 2] = [
    SeedSpecies {
        path: ["Chondrichthyes", "Lamniformes", "Lamnidae", "Carcharodon", "carcharias"],
        common_name: "Great White Shark",
        reference_link: "https://en.wikipedia.org/wiki/Great_white_shark",
    },
    SeedSpecies {
        path: ["Chondrichthyes", "Carcharhiniformes", "Carcharhinidae", "Galeocerdo", "cuvier"],
        common_name: "Tiger Shark",
        reference_link: "https://en.wikipedia.org/wiki/Tiger_shark",
    },
];
