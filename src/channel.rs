//! Per-channel post-processing of raw formula output.

/// The post-processing rule applied to a raw channel value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelOp {
    /// `value % 255` with signed-remainder semantics: a negative input stays
    /// negative (`-1 % 255 == -1`). Downstream surfaces must tolerate
    /// out-of-range values; see `PixelField::to_rgba8`.
    #[default]
    Wrap255,
    /// Clamp into `[0, 255]`.
    Clamp,
    /// Pass the raw value through unchanged.
    Identity,
}

impl ChannelOp {
    pub fn apply(self, value: i64) -> i64 {
        match self {
            Self::Wrap255 => value % 255,
            Self::Clamp => value.clamp(0, 255),
            Self::Identity => value,
        }
    }

    /// Maps a UI selector string onto an operation. Unrecognized selectors
    /// mean "no post-processing".
    pub fn from_selector(selector: &str) -> Self {
        match selector.trim() {
            "% 255" => Self::Wrap255,
            "[0,255]" => Self::Clamp,
            _ => Self::Identity,
        }
    }
}

/// The three independently selectable per-channel operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChannelOps {
    #[serde(default)]
    pub r: ChannelOp,
    #[serde(default)]
    pub g: ChannelOp,
    #[serde(default)]
    pub b: ChannelOp,
}

impl ChannelOps {
    pub fn uniform(op: ChannelOp) -> Self {
        Self { r: op, g: op, b: op }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_sign() {
        assert_eq!(ChannelOp::Wrap255.apply(-1), -1);
        assert_eq!(ChannelOp::Wrap255.apply(256), 1);
        assert_eq!(ChannelOp::Wrap255.apply(255), 0);
        assert_eq!(ChannelOp::Wrap255.apply(-256), -1);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(ChannelOp::Clamp.apply(-1), 0);
        assert_eq!(ChannelOp::Clamp.apply(300), 255);
        assert_eq!(ChannelOp::Clamp.apply(128), 128);
    }

    #[test]
    fn identity_is_identity() {
        for v in [-1000, -1, 0, 1, 255, 100_000] {
            assert_eq!(ChannelOp::Identity.apply(v), v);
        }
    }

    #[test]
    fn selector_strings_map() {
        assert_eq!(ChannelOp::from_selector("% 255"), ChannelOp::Wrap255);
        assert_eq!(ChannelOp::from_selector("[0,255]"), ChannelOp::Clamp);
        assert_eq!(ChannelOp::from_selector("none"), ChannelOp::Identity);
    }
}
