//! The three life emphases
//!
//! Category order is fixed: it defines every vector and matrix index in the model.

use serde::{Deserialize, Serialize};

use crate::consts::CATEGORY_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    War,
    Love,
    Work,
}

impl Category {
    /// All categories in index order
    pub const ALL: [Category; CATEGORY_COUNT] = [Category::War, Category::Love, Category::Work];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::War => "war",
            Category::Love => "love",
            Category::Work => "work",
        }
    }

    /// Resolve an external category id. Unknown ids yield `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "war" => Some(Category::War),
            "love" => Some(Category::Love),
            "work" => Some(Category::Work),
            _ => None,
        }
    }

    /// Starting angle: the three orbs are spaced 120° apart
    pub fn base_rotation(self) -> f32 {
        self.index() as f32 * std::f32::consts::TAU / CATEGORY_COUNT as f32
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
