//! Vibe catalog - the fixed set of message tones.
//!
//! A vibe is a named emotional tone ("playful", "apologetic", ...) paired with
//! the rewriting instruction handed to the language model. The catalog is pure
//! data, loaded once at process start; the `id` is the stable key used by the
//! API, the refiner, and the all-variants map. Display names are presentation
//! only and never keyed on.

use once_cell::sync::Lazy;
use serde::Serialize;

/// A single tone definition in the catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VibeDefinition {
    /// Stable identifier (lowercase, used as map key everywhere downstream).
    pub id: &'static str,
    /// Human-facing name shown in the vibe picker.
    pub display_name: &'static str,
    /// Instruction given to the model when rewriting in this tone.
    pub rewrite_instruction: &'static str,
}

/// The fixed, ordered vibe catalog.
///
/// Order matters: it is the order variants are produced and presented in.
/// Ids are unique; [`ids`] is exactly the key set of every all-vibes map.
static VIBE_CATALOG: Lazy<Vec<VibeDefinition>> = Lazy::new(|| {
    vec![
        VibeDefinition {
            id: "affectionate",
            display_name: "Affectionate",
            rewrite_instruction:
                "Rewrite this message to sound warm, loving, and affectionate while keeping its meaning",
        },
        VibeDefinition {
            id: "concerned",
            display_name: "Concerned",
            rewrite_instruction:
                "Rewrite this message to express gentle care and concern while keeping its meaning",
        },
        VibeDefinition {
            id: "apologetic",
            display_name: "Apologetic",
            rewrite_instruction:
                "Rewrite this message to sound sincerely apologetic and accountable while keeping its meaning",
        },
        VibeDefinition {
            id: "playful",
            display_name: "Playful",
            rewrite_instruction:
                "Rewrite this message to sound lighthearted and playful while keeping its meaning",
        },
        VibeDefinition {
            id: "excited",
            display_name: "Excited",
            rewrite_instruction:
                "Rewrite this message to sound enthusiastic and excited while keeping its meaning",
        },
        VibeDefinition {
            id: "flirty",
            display_name: "Flirty",
            rewrite_instruction:
                "Rewrite this message to sound charming and flirty while keeping its meaning",
        },
        VibeDefinition {
            id: "funny",
            display_name: "Funny",
            rewrite_instruction:
                "Rewrite this message to sound witty and funny while keeping its meaning",
        },
    ]
});

/// All vibes, in catalog order.
pub fn all() -> &'static [VibeDefinition] {
    &VIBE_CATALOG
}

/// Looks up a vibe by its stable id.
pub fn find(id: &str) -> Option<&'static VibeDefinition> {
    VIBE_CATALOG.iter().find(|v| v.id == id)
}

/// The full id set, in catalog order.
pub fn ids() -> Vec<&'static str> {
    VIBE_CATALOG.iter().map(|v| v.id).collect()
}
