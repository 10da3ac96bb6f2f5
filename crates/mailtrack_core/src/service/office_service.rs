//! Post office use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points over post office records.
//! - Validate payload fields before persistence.
//!
//! # Invariants
//! - No transition logic lives here; offices are plain records.
//! - `update` replaces every mutable field; the id is preserved.

use crate::model::office::{NewPostOffice, OfficeId, PostOffice};
use crate::repo::office_repo::OfficeRepository;
use crate::service::{FieldError, ServiceError, ServiceResult};
use serde::Serialize;

const NAME_MIN_CHARS: usize = 3;
const NAME_MAX_CHARS: usize = 30;
const ADDRESS_MIN_CHARS: usize = 10;
const ADDRESS_MAX_CHARS: usize = 100;

/// Payload for creating a post office.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOfficeRequest {
    pub index: String,
    pub name: String,
    pub address: String,
}

impl CreateOfficeRequest {
    fn validate(&self) -> Vec<FieldError> {
        office_field_errors(&self.name, &self.address)
    }
}

/// Payload for updating a post office. All fields except id are replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOfficeRequest {
    pub id: Option<OfficeId>,
    pub index: String,
    pub name: String,
    pub address: String,
}

impl UpdateOfficeRequest {
    fn validate(&self) -> Vec<FieldError> {
        office_field_errors(&self.name, &self.address)
    }
}

/// Post office response projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfficeResponse {
    pub id: OfficeId,
    pub index: String,
    pub name: String,
    pub address: String,
}

/// Converts a persisted office into its response projection.
pub fn office_to_response(office: PostOffice) -> OfficeResponse {
    OfficeResponse {
        id: office.id,
        index: office.index,
        name: office.name,
        address: office.address,
    }
}

/// Use-case service for post office CRUD.
pub struct OfficeService<R: OfficeRepository> {
    repo: R,
}

impl<R: OfficeRepository> OfficeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns one post office by id.
    pub fn view(&self, id: Option<OfficeId>) -> ServiceResult<OfficeResponse> {
        let id = id.ok_or_else(|| ServiceError::invalid_argument("post office id is not valid"))?;
        let office = self
            .repo
            .get_office(id)?
            .ok_or_else(|| ServiceError::NotFound(format!("no such post office with id ({id})")))?;
        Ok(office_to_response(office))
    }

    /// Persists a new post office; the store assigns the id.
    pub fn create(&self, request: Option<&CreateOfficeRequest>) -> ServiceResult<OfficeResponse> {
        let request = request.ok_or_else(|| {
            ServiceError::invalid_argument("the passed value of post office is not valid")
        })?;
        reject_invalid_fields(request.validate())?;

        let id = self.repo.create_office(&NewPostOffice {
            index: request.index.clone(),
            name: request.name.clone(),
            address: request.address.clone(),
        })?;

        Ok(OfficeResponse {
            id,
            index: request.index.clone(),
            name: request.name.clone(),
            address: request.address.clone(),
        })
    }

    /// Overwrites all mutable fields of an existing post office.
    pub fn update(&self, request: Option<&UpdateOfficeRequest>) -> ServiceResult<OfficeResponse> {
        let request = request.ok_or_else(invalid_update_payload)?;
        let id = request.id.ok_or_else(invalid_update_payload)?;
        reject_invalid_fields(request.validate())?;

        let existing = self
            .repo
            .get_office(id)?
            .ok_or_else(|| ServiceError::NotFound(format!("no such post office with id ({id})")))?;

        let updated = PostOffice {
            id: existing.id,
            index: request.index.clone(),
            name: request.name.clone(),
            address: request.address.clone(),
        };
        self.repo.update_office(&updated)?;

        Ok(office_to_response(updated))
    }

    /// Deletes one post office; the store cascades to referencing items.
    pub fn delete(&self, id: Option<OfficeId>) -> ServiceResult<()> {
        let id = id.ok_or_else(|| {
            ServiceError::invalid_argument("the passed post office id is not valid")
        })?;
        if !self.repo.office_exists(id)? {
            return Err(ServiceError::NotFound(format!(
                "no such post office with id ({id})"
            )));
        }
        self.repo.delete_office(id)?;
        Ok(())
    }
}

fn invalid_update_payload() -> ServiceError {
    ServiceError::invalid_argument("the passed post office values or post office id is not valid")
}

fn reject_invalid_fields(field_errors: Vec<FieldError>) -> ServiceResult<()> {
    if field_errors.is_empty() {
        return Ok(());
    }
    Err(ServiceError::InvalidArgument {
        message: "post office fields are not valid".to_string(),
        field_errors,
    })
}

fn office_field_errors(name: &str, address: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let name_chars = name.chars().count();
    if name_chars < NAME_MIN_CHARS || name_chars > NAME_MAX_CHARS {
        errors.push(FieldError {
            field: "name",
            message: format!(
                "post office name length should be at least {NAME_MIN_CHARS} and at most {NAME_MAX_CHARS}"
            ),
        });
    }

    let address_chars = address.chars().count();
    if address_chars < ADDRESS_MIN_CHARS || address_chars > ADDRESS_MAX_CHARS {
        errors.push(FieldError {
            field: "address",
            message: format!(
                "post office address length should be at least {ADDRESS_MIN_CHARS} and at most {ADDRESS_MAX_CHARS}"
            ),
        });
    }

    errors
}
