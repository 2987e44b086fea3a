//! JSON bodies returned by the endpoint

use convenio::AgreementRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `GET`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub endpoint: String,
}

/// Client details echoed after a render
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientSummary {
    /// Full name ("nombre apellidos", trimmed)
    pub nombre: String,
    /// Echoed as sent
    pub empresa: Value,
    /// Echoed as sent
    pub email: Value,
}

impl From<&AgreementRequest> for ClientSummary {
    fn from(request: &AgreementRequest) -> Self {
        Self {
            nombre: request.input.client.full_name(),
            empresa: request.empresa.clone(),
            email: request.email.clone(),
        }
    }
}

/// Body of a successful `POST`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub message: String,
    pub numero_convenio: Value,
    pub file_name: String,
    pub pdf_base64: String,
    pub cliente: ClientSummary,
    pub tarifas: Value,
    #[serde(rename = "añoVigencia")]
    pub ano_vigencia: Value,
}

impl GenerateResponse {
    pub const MESSAGE: &'static str = "Convenio generado exitosamente - Plantilla 2026";

    /// Build the response for a rendered request
    pub fn new(request: &AgreementRequest, pdf_base64: String) -> Self {
        Self {
            success: true,
            message: Self::MESSAGE.to_string(),
            numero_convenio: request.numero_convenio.clone(),
            file_name: request.file_name(),
            pdf_base64,
            cliente: ClientSummary::from(request),
            tarifas: request.tarifas.clone(),
            ano_vigencia: request.ano_vigencia.clone(),
        }
    }
}

/// Body of any failed request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}
