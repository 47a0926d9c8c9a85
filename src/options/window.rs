use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Window and presentation settings.
pub struct WindowOptions {
    /// Window title.
    pub title: String,
    /// Initial inner width in logical pixels.
    pub width: u32,
    /// Initial inner height in logical pixels.
    pub height: u32,
    /// Multisample count for the color and depth targets (1 disables MSAA).
    pub msaa_samples: u32,
    /// Background clear color (linear RGBA).
    pub clear_color: [f32; 4],
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "Tessellation sample".into(),
            width: 800,
            height: 600,
            msaa_samples: 4,
            clear_color: [0.5, 0.5, 0.5, 1.0],
        }
    }
}
