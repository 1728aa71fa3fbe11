//! Response bodies shared by the entity handlers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned with every 404 from the entity endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotFoundBody {
    #[schema(example = 404)]
    pub status: u16,
    #[schema(example = "Book not found!")]
    pub message: String,
}
