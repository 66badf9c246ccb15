//! Interactive model view toggle
//!
//! The page shows either the embedded GeoGebra diagram or the native orbit
//! animation. The diagram is an opaque external document referenced by a
//! fixed URL.

use std::fmt;
use std::str::FromStr;

/// Fixed reference of the embedded interactive diagram
pub const DIAGRAM_URL: &str = "https://www.geogebra.org/material/iframe/id/xwhu5t5j/width/1200/height/600/border/888888/sfsb/true/smb/false/stb/false/stbh/false/ai/false/asb/false/sri/false/rc/false/ld/false/sdz/false/ctl/false";

/// Title of the embedded diagram frame
pub const DIAGRAM_TITLE: &str = "GeoGebra Solar System";

/// Which model the page displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// The embedded third-party diagram
    #[default]
    Diagram,
    /// The locally rendered orbit animation
    Simulation,
}

impl ViewMode {
    /// The other mode
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Diagram => ViewMode::Simulation,
            ViewMode::Simulation => ViewMode::Diagram,
        }
    }

    /// Status line shown under the model
    pub fn caption(self) -> &'static str {
        match self {
            ViewMode::Diagram => "Loading external GeoGebra resource...",
            ViewMode::Simulation => "Running native SVG animation engine.",
        }
    }

    /// Button label of the mode
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Diagram => "GeoGebra",
            ViewMode::Simulation => "Simulation",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "diagram" | "geogebra" => Ok(ViewMode::Diagram),
            "simulation" | "sim" => Ok(ViewMode::Simulation),
            other => Err(format!(
                "unknown view mode '{}' (expected 'diagram' or 'simulation')",
                other
            )),
        }
    }
}
