//! Title serializer dispatch
//!
//! List and retrieve render the nested read shape; writes validate the body
//! and render relations as slugs.

use yamdb_core::entities::TitleDetails;
use yamdb_core::validation::validate_year;

use crate::dto::requests::TitleWriteRequest;
use crate::dto::responses::{TitleReadResponse, TitleResponse, TitleWriteResponse};
use crate::services::{ServiceError, ServiceResult};

/// What is being done to a title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleAction {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Destroy,
}

/// Body check: the request plus the current calendar year
pub type TitleValidator = fn(&TitleWriteRequest, i32) -> ServiceResult<()>;

/// Validation and rendering used for one action
#[derive(Debug, Clone, Copy)]
pub struct TitleSerializer {
    /// Body check, `None` for actions without a body
    pub validate: Option<TitleValidator>,
    pub render: fn(&TitleDetails) -> TitleResponse,
}

pub fn serializer_for(action: TitleAction) -> TitleSerializer {
    match action {
        TitleAction::List | TitleAction::Retrieve | TitleAction::Destroy => TitleSerializer {
            validate: None,
            render: render_read,
        },
        TitleAction::Create | TitleAction::Update => TitleSerializer {
            validate: Some(validate_full),
            render: render_write,
        },
        TitleAction::PartialUpdate => TitleSerializer {
            validate: Some(validate_partial),
            render: render_write,
        },
    }
}

fn render_read(details: &TitleDetails) -> TitleResponse {
    TitleResponse::Read(TitleReadResponse::from(details))
}

fn render_write(details: &TitleDetails) -> TitleResponse {
    TitleResponse::Write(TitleWriteResponse::from(details))
}

fn validate_full(request: &TitleWriteRequest, current_year: i32) -> ServiceResult<()> {
    if request.name.is_none() {
        return Err(ServiceError::required("name"));
    }
    if request.year.is_none() {
        return Err(ServiceError::required("year"));
    }
    if request.genre.is_none() {
        return Err(ServiceError::required("genre"));
    }
    if request.category.is_none() {
        return Err(ServiceError::required("category"));
    }
    validate_partial(request, current_year)
}

fn validate_partial(request: &TitleWriteRequest, current_year: i32) -> ServiceResult<()> {
    if let Some(year) = request.year {
        validate_year(year, current_year)?;
    }
    Ok(())
}
