//! Title models -> entity mapper

use std::collections::HashMap;

use yamdb_core::entities::{Category, Genre, Title, TitleDetails};

use crate::models::{TitleGenreModel, TitleModel};

impl From<TitleModel> for TitleDetails {
    fn from(model: TitleModel) -> Self {
        let category = match (model.category_id, model.category_name, model.category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(Category { id, name, slug }),
            _ => None,
        };

        TitleDetails {
            title: Title {
                id: model.id,
                name: model.name,
                year: model.year,
                description: model.description,
                category_id: model.category_id,
            },
            category,
            genres: Vec::new(),
            rating: model.rating,
        }
    }
}

/// Attach genre rows to their titles, keeping the title order
pub fn assemble_titles(rows: Vec<TitleModel>, links: Vec<TitleGenreModel>) -> Vec<TitleDetails> {
    let mut genres: HashMap<i64, Vec<Genre>> = HashMap::new();
    for link in links {
        genres.entry(link.title_id).or_default().push(Genre {
            id: link.id,
            name: link.name,
            slug: link.slug,
        });
    }

    rows.into_iter()
        .map(|row| {
            let mut details = TitleDetails::from(row);
            details.genres = genres.remove(&details.title.id).unwrap_or_default();
            details
        })
        .collect()
}
