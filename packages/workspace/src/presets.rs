//! Style presets applied when ingesting generated structures.
//!
//! Each preset is a palette and font pair keyed by a short "vibe" name.
//! The prompt-to-preset selection happens in the external generator; the
//! core only consumes the chosen key.

/// A named visual preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylePreset {
    pub key: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    pub heading_font: &'static str,
    pub body_font: &'static str,
}

static PRESETS: &[StylePreset] = &[
    StylePreset {
        key: "dark",
        primary: "#6d28d9",
        secondary: "#4f46e5",
        accent: "#ec4899",
        background: "#18181b",
        text: "#f4f4f5",
        heading_font: "Orbitron",
        body_font: "Inter",
    },
    StylePreset {
        key: "light",
        primary: "#3b82f6",
        secondary: "#6b7280",
        accent: "#f59e0b",
        background: "#ffffff",
        text: "#1f2937",
        heading_font: "Montserrat",
        body_font: "Roboto",
    },
    StylePreset {
        key: "minimal",
        primary: "#000000",
        secondary: "#404040",
        accent: "#d4d4d4",
        background: "#ffffff",
        text: "#171717",
        heading_font: "Inter",
        body_font: "Inter",
    },
    StylePreset {
        key: "bold",
        primary: "#ef4444",
        secondary: "#f97316",
        accent: "#f59e0b",
        background: "#fef2f2",
        text: "#0f172a",
        heading_font: "Poppins",
        body_font: "Roboto",
    },
    StylePreset {
        key: "retro",
        primary: "#8b5cf6",
        secondary: "#ec4899",
        accent: "#f59e0b",
        background: "#fdf4ff",
        text: "#581c87",
        heading_font: "VT323",
        body_font: "Space Mono",
    },
    StylePreset {
        key: "techno",
        primary: "#10b981",
        secondary: "#3b82f6",
        accent: "#8b5cf6",
        background: "#0f172a",
        text: "#f8fafc",
        heading_font: "Chakra Petch",
        body_font: "Roboto Mono",
    },
];

/// Look up a preset by key.
pub fn style_preset(key: &str) -> Option<&'static StylePreset> {
    PRESETS.iter().find(|p| p.key == key)
}

/// All presets, in palette-picker order.
pub fn style_presets() -> &'static [StylePreset] {
    PRESETS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_presets_resolve() {
        for key in ["dark", "light", "minimal", "bold", "retro", "techno"] {
            assert!(style_preset(key).is_some(), "missing preset {key}");
        }
        assert!(style_preset("vaporwave").is_none());
    }
}
