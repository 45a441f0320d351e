use crate::{
    channel::ChannelOps,
    error::{RasterformError, RasterformResult},
    expr::Formula,
};

/// The four formula slots driving a render pass. An empty or
/// whitespace-only slot evaluates to 0; it is legal for all four to be
/// empty (the field is then a uniform post-processed zero).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FormulaSet {
    #[serde(default)]
    pub x: String,
    #[serde(default)]
    pub r: String,
    #[serde(default)]
    pub g: String,
    #[serde(default)]
    pub b: String,
}

impl FormulaSet {
    pub fn new(
        x: impl Into<String>,
        r: impl Into<String>,
        g: impl Into<String>,
        b: impl Into<String>,
    ) -> Self {
        Self {
            x: x.into(),
            r: r.into(),
            g: g.into(),
            b: b.into(),
        }
    }

    /// Strict compilation: the first malformed formula is an error,
    /// labelled with its slot. Used at configuration boundaries (CLI).
    pub fn compile(&self) -> RasterformResult<CompiledFormulaSet> {
        let slot = |name: &str, src: &str| {
            Formula::parse(src)
                .map_err(|err| RasterformError::formula(format!("{name} formula: {err}")))
        };
        Ok(CompiledFormulaSet {
            x: slot("x", &self.x)?,
            r: slot("r", &self.r)?,
            g: slot("g", &self.g)?,
            b: slot("b", &self.b)?,
        })
    }

    /// Lenient compilation: each malformed slot degrades to the constant 0
    /// independently (logged), so one bad formula never takes down the
    /// other channels.
    pub fn compile_lenient(&self) -> CompiledFormulaSet {
        CompiledFormulaSet {
            x: Formula::lenient(&self.x),
            r: Formula::lenient(&self.r),
            g: Formula::lenient(&self.g),
            b: Formula::lenient(&self.b),
        }
    }
}

/// The parsed counterpart of [`FormulaSet`], compiled once per
/// configuration change rather than once per pixel.
#[derive(Clone, Debug)]
pub struct CompiledFormulaSet {
    pub x: Formula,
    pub r: Formula,
    pub g: Formula,
    pub b: Formula,
}

/// Side length of the square drawing surfaces this engine targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FieldSize(u32);

impl FieldSize {
    pub const S256: FieldSize = FieldSize(256);
    pub const S512: FieldSize = FieldSize(512);
    pub const S640: FieldSize = FieldSize(640);

    pub fn new(side: u32) -> RasterformResult<Self> {
        match side {
            256 | 512 | 640 => Ok(Self(side)),
            other => Err(RasterformError::validation(format!(
                "unsupported field size {other} (expected 256, 512, or 640)"
            ))),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for FieldSize {
    fn default() -> Self {
        Self::S640
    }
}

impl TryFrom<u32> for FieldSize {
    type Error = RasterformError;

    fn try_from(side: u32) -> Result<Self, Self::Error> {
        Self::new(side)
    }
}

impl From<FieldSize> for u32 {
    fn from(size: FieldSize) -> Self {
        size.0
    }
}

/// Full engine configuration: the JSON boundary the UI collaborator (or
/// the CLI standing in for it) hands to the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderConfig {
    pub formulas: FormulaSet,
    #[serde(default)]
    pub ops: ChannelOps,
    #[serde(default)]
    pub size: FieldSize,
    #[serde(default)]
    pub animate: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelOp;

    #[test]
    fn strict_compile_names_the_bad_slot() {
        let set = FormulaSet::new("i + j", "((", "", "");
        let err = set.compile().unwrap_err();
        assert!(err.to_string().contains("r formula"));
    }

    #[test]
    fn lenient_compile_isolates_slots() {
        let set = FormulaSet::new("i + j", "((", "j", "");
        let compiled = set.compile_lenient();
        assert!(!compiled.x.is_trivial());
        assert!(compiled.r.is_trivial());
        assert!(!compiled.g.is_trivial());
        assert!(compiled.b.is_trivial());
    }

    #[test]
    fn field_size_is_validated() {
        assert!(FieldSize::new(256).is_ok());
        assert!(FieldSize::new(512).is_ok());
        assert!(FieldSize::new(640).is_ok());
        assert!(FieldSize::new(4).is_err());
        assert!(FieldSize::new(1024).is_err());
    }

    #[test]
    fn render_config_round_trips_as_json() {
        let cfg = RenderConfig {
            formulas: FormulaSet::new("(i + j) % 255", "x", "0", "0"),
            ops: ChannelOps::uniform(ChannelOp::Clamp),
            size: FieldSize::S256,
            animate: true,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: RenderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn render_config_defaults_from_minimal_json() {
        let cfg: RenderConfig = serde_json::from_str(r#"{"formulas":{"x":"i ^ j"}}"#).unwrap();
        assert_eq!(cfg.size, FieldSize::S640);
        assert_eq!(cfg.ops.r, ChannelOp::Wrap255);
        assert!(!cfg.animate);
        assert!(cfg.formulas.r.is_empty());
    }

    #[test]
    fn bad_size_in_json_is_rejected() {
        let res: Result<RenderConfig, _> =
            serde_json::from_str(r#"{"formulas":{},"size":300}"#);
        assert!(res.is_err());
    }
}
