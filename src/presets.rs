//! Built-in formula presets: named starting points, data only.

use crate::model::FormulaSet;

/// A named formula quadruple. Selecting a preset overwrites all four
/// formula slots at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub x: &'static str,
    pub r: &'static str,
    pub g: &'static str,
    pub b: &'static str,
}

impl Preset {
    pub fn formula_set(&self) -> FormulaSet {
        FormulaSet::new(self.x, self.r, self.g, self.b)
    }
}

/// The preset table. The leading "Custom" entry is the no-op placeholder a
/// selector UI shows while the user edits formulas by hand.
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "Custom",
        x: "",
        r: "",
        g: "",
        b: "",
    },
    Preset {
        name: "Tangent Flare",
        x: "abs((i ^ j) * tan(i ^ j))",
        r: "(i & j) * atan(x)",
        g: "(i | j) * cos(x)",
        b: "(i ^ j) * sin(x)",
    },
    Preset {
        name: "XOR Carpet",
        x: "i ^ j",
        r: "x",
        g: "x",
        b: "x",
    },
    Preset {
        name: "Sierpinski Brass",
        x: "i & j",
        r: "255 - x",
        g: "x * 2",
        b: "x / 2",
    },
    Preset {
        name: "Interference",
        x: "sin(i / 8) * cos(j / 8) * 255",
        r: "x",
        g: "abs(x)",
        b: "255 - abs(x)",
    },
    Preset {
        name: "Moire Wells",
        x: "(i * i + j * j) / 64",
        r: "x % 255",
        g: "sin(x / 10) * 255",
        b: "cos(x / 10) * 255",
    },
    Preset {
        name: "Plaid",
        x: "",
        r: "i % 32 * 8",
        g: "j % 32 * 8",
        b: "(i + j) % 64 * 4",
    },
    Preset {
        name: "Ripple Clock",
        x: "sin((i * i + j * j) / 900 + t / 10) * 128 + 128",
        r: "x",
        g: "x / 2",
        b: "255 - x",
    },
    Preset {
        name: "Diagonal Drift",
        x: "(i + j + t) % 255",
        r: "x",
        g: "(i + j) % 255",
        b: "(i ^ j) % 255",
    },
    Preset {
        name: "Checker Glow",
        x: "(i ^ j) & 32",
        r: "x * 7",
        g: "x * 5",
        b: "x * 3",
    },
    Preset {
        name: "Tangent Storm",
        x: "tan(i * j)",
        r: "x * 64",
        g: "abs(x) * 32",
        b: "atan(x) * 160",
    },
    Preset {
        name: "Polar Fan",
        x: "atan(j / (i + 1)) * 160",
        r: "x",
        g: "x * 2 % 255",
        b: "i ^ j",
    },
    Preset {
        name: "Bit Rain",
        x: "(i * j) ^ (i + j)",
        r: "x % 255",
        g: "x / 255",
        b: "x % 127",
    },
    Preset {
        name: "Cosine Grid",
        x: "",
        r: "cos(i / 4) * 255",
        g: "cos(j / 4) * 255",
        b: "cos((i + j) / 4) * 255",
    },
    Preset {
        name: "Spiral Dust",
        x: "(i - 320) * (i - 320) + (j - 320) * (j - 320)",
        r: "sin(x / 1000 + t / 20) * 255",
        g: "x % 255",
        b: "cos(x / 2000) * 255",
    },
    Preset {
        name: "And Lattice",
        x: "(i & j) + t",
        r: "x % 255",
        g: "(i & t) * 3",
        b: "(j & t) * 3",
    },
    Preset {
        name: "Hyper XOR",
        x: "(i * 3) ^ (j * 5)",
        r: "x % 255",
        g: "x / 2 % 255",
        b: "x * 2 % 255",
    },
    Preset {
        name: "Sine Veil",
        x: "sin(i * j / 4000) * 255",
        r: "abs(x)",
        g: "abs(x) / 2",
        b: "255 - abs(x) / 4",
    },
    Preset {
        name: "Modulo Fan",
        x: "(i * j) % (t + 13)",
        r: "x * 5",
        g: "x * 3",
        b: "x * 7",
    },
    Preset {
        name: "Bloom Field",
        x: "(i | j) * sin(t / 30)",
        r: "x % 255",
        g: "abs(x) % 255",
        b: "(i | j) % 255",
    },
    Preset {
        name: "Twin Peaks",
        x: "abs(i - j)",
        r: "255 - x % 255",
        g: "x % 255",
        b: "(i + j) % 255",
    },
];

/// Case-insensitive lookup by preset name.
pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_custom_plus_at_least_nineteen() {
        assert_eq!(PRESETS[0].name, "Custom");
        assert!(PRESETS.len() >= 20);
    }

    #[test]
    fn every_preset_compiles_strictly() {
        for preset in PRESETS {
            preset
                .formula_set()
                .compile()
                .unwrap_or_else(|err| panic!("preset '{}': {err}", preset.name));
        }
    }

    #[test]
    fn names_are_unique() {
        for (a, preset) in PRESETS.iter().enumerate() {
            for other in &PRESETS[a + 1..] {
                assert_ne!(preset.name, other.name);
            }
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find("xor carpet").unwrap().name, "XOR Carpet");
        assert!(find("does-not-exist").is_none());
    }
}
