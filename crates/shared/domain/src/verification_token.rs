//! Verification token aggregate and its transfer representation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::credential::{Credential, CredentialDto};

/// Verification token aggregate, issued for exactly one credential.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationToken {
    pub verification_token_id: Option<i32>,
    /// Opaque token value; generation happens outside this service
    pub token: Option<String>,
    pub expire_date: Option<NaiveDate>,
    /// Issuing credential's identity (foreign key)
    pub credential_id: Option<i32>,
    pub credential: Option<Box<Credential>>,
}

/// Verification token transfer object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VerificationTokenDto {
    pub verification_token_id: Option<i32>,
    pub token: Option<String>,
    pub expire_date: Option<NaiveDate>,
    /// Issuing credential (scalar fields only)
    #[serde(rename = "credential", skip_serializing_if = "Option::is_none")]
    pub credential_dto: Option<Box<CredentialDto>>,
}

