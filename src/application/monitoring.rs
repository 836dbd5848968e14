//! # Monitoring Toggle
//!
//! Tri-state flag that gates dispatch. `Unset` means nobody ever turned
//! monitoring on or off; it passes both the enable and the disable guard
//! and lets dispatch through.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitoringFlag {
    Enabled,
    Disabled,
    #[default]
    Unset,
}

impl MonitoringFlag {
    /// Reads the stored string form. Anything but `"true"`/`"false"` is `Unset`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("true") => Self::Enabled,
            Some("false") => Self::Disabled,
            _ => Self::Unset,
        }
    }

    pub fn as_stored(&self) -> Option<&'static str> {
        match self {
            Self::Enabled => Some("true"),
            Self::Disabled => Some("false"),
            Self::Unset => None,
        }
    }

    /// Enable is a no-op only when monitoring was explicitly enabled.
    pub fn is_already_enabled(&self) -> bool {
        *self == Self::Enabled
    }

    /// Disable is a no-op only when monitoring was explicitly disabled.
    pub fn is_already_disabled(&self) -> bool {
        *self == Self::Disabled
    }

    pub fn allows_dispatch(&self) -> bool {
        *self != Self::Disabled
    }
}
