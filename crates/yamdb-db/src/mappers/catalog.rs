//! Category / genre model -> entity mappers

use yamdb_core::entities::{Category, Genre};

use crate::models::{CategoryModel, GenreModel};

impl From<CategoryModel> for Category {
    fn from(model: CategoryModel) -> Self {
        Category {
            id: model.id,
            name: model.name,
            slug: model.slug,
        }
    }
}

impl From<GenreModel> for Genre {
    fn from(model: GenreModel) -> Self {
        Genre {
            id: model.id,
            name: model.name,
            slug: model.slug,
        }
    }
}
