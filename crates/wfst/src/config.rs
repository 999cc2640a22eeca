// Per-operation options
//
// Each operation has a plain entry point that uses `Default::default()` and a
// `*_with_config` variant taking one of these structs.

use wfst_core::enums::Retention;

/// Options for [`connect`](crate::ops::connect::connect_with_config).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectConfig {
    /// Which states survive. Defaults to keeping every state that is
    /// accessible or coaccessible.
    pub retention: Retention,
}

impl ConnectConfig {
    /// Classical trim: keep only states on a start-to-final path.
    pub fn trim() -> Self {
        Self {
            retention: Retention::AccessibleAndCoaccessible,
        }
    }
}

/// Options for [`compose`](crate::ops::compose::compose_with_config).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComposeConfig {
    /// Run connect on the result before returning it. Off by default:
    /// the product may contain dead states.
    pub connect: bool,
    /// Retention used when `connect` is set.
    pub connect_config: ConnectConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ComposeConfig::default();
        assert!(!c.connect);
        assert_eq!(c.connect_config.retention, Retention::AccessibleOrCoaccessible);
        assert_eq!(
            ConnectConfig::trim().retention,
            Retention::AccessibleAndCoaccessible
        );
    }
}
