use serde::{Deserialize, Serialize};
use serde_json::json;

/// One ingredient layer of a drink recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipePart {
    /// Display color of the layer (CSS color string).
    pub color: String,
    /// Ingredient name.
    pub name: String,
    /// Relative volume of the layer.
    pub parts: u32,
}

/// A drink on the menu. The recipe is an ordered list of layers,
/// bottom to top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<RecipePart>,
}

impl Drink {
    /// Short representation — recipe layers keep only color and volume.
    /// Served to unauthenticated menu viewers.
    pub fn short(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "title": self.title,
            "recipe": self.recipe.iter().map(|p| json!({
                "color": p.color,
                "parts": p.parts,
            })).collect::<Vec<_>>(),
        })
    }

    /// Long representation — the full recipe including ingredient names.
    /// Requires the `get:drinks-detail` permission to view.
    pub fn long(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "title": self.title,
            "recipe": self.recipe,
        })
    }
}
