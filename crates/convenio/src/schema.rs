//! Agreement data model

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Company shown in the document when the client has none
pub const DEFAULT_COMPANY: &str = "Empresa";

/// Company placeholder used in generated file names
pub const DEFAULT_COMPANY_FILE_NAME: &str = "empresa";

/// Default nightly rates
pub const DEFAULT_KING_SIN: f64 = 800.0;
pub const DEFAULT_QUEEN_SIN: f64 = 1000.0;
pub const DEFAULT_KING_CON: f64 = 1040.0;
pub const DEFAULT_QUEEN_CON: f64 = 1480.0;

/// Client the agreement is addressed to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    /// Given name
    pub nombre: Option<String>,

    /// Surnames
    pub apellidos: Option<String>,

    /// Company name
    pub empresa: Option<String>,

    /// Contact email, never rendered
    pub email: Option<String>,
}

impl ClientInfo {
    /// "nombre apellidos" with surrounding whitespace removed
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.nombre.as_deref().unwrap_or_default(),
            self.apellidos.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }

    /// Company name, or "Empresa" when absent
    pub fn company_or_default(&self) -> &str {
        self.empresa.as_deref().unwrap_or(DEFAULT_COMPANY)
    }
}

fn default_king_sin() -> f64 {
    DEFAULT_KING_SIN
}

fn default_queen_sin() -> f64 {
    DEFAULT_QUEEN_SIN
}

fn default_king_con() -> f64 {
    DEFAULT_KING_CON
}

fn default_queen_con() -> f64 {
    DEFAULT_QUEEN_CON
}

/// Nightly rates offered under the agreement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RateTable {
    /// Single King room, no breakfast
    #[serde(rename = "kingSin")]
    #[serde(default = "default_king_sin")]
    pub king_sin: f64,

    /// Double Queen room, no breakfast
    #[serde(rename = "queenSin")]
    #[serde(default = "default_queen_sin")]
    pub queen_sin: f64,

    /// Single King room, buffet breakfast included
    #[serde(rename = "kingCon")]
    #[serde(default = "default_king_con")]
    pub king_con: f64,

    /// Double Queen room, buffet breakfast included
    #[serde(rename = "queenCon")]
    #[serde(default = "default_queen_con")]
    pub queen_con: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            king_sin: DEFAULT_KING_SIN,
            queen_sin: DEFAULT_QUEEN_SIN,
            king_con: DEFAULT_KING_CON,
            queen_con: DEFAULT_QUEEN_CON,
        }
    }
}

/// Everything the renderer needs to draw one agreement
#[derive(Debug, Clone, PartialEq)]
pub struct AgreementInput {
    /// Agreement identifier as shown to the client
    pub agreement_number: String,
    pub client: ClientInfo,
    /// Issue date
    pub date: NaiveDate,
    pub rates: RateTable,
    /// Year the rates are valid through; next year when absent
    pub validity_year: Option<String>,
}

impl AgreementInput {
    /// Validity year, defaulting to the current local year + 1
    pub fn validity_year_or_default(&self) -> String {
        match &self.validity_year {
            Some(year) => year.clone(),
            None => (Local::now().year() + 1).to_string(),
        }
    }
}

/// A validated request together with the raw values echoed in the response
#[derive(Debug, Clone, PartialEq)]
pub struct AgreementRequest {
    pub input: AgreementInput,

    /// `numeroConvenio` exactly as sent (string or number)
    pub numero_convenio: Value,

    /// `tarifas` exactly as sent; `null` when absent
    pub tarifas: Value,

    /// `añoVigencia` exactly as sent; `null` when absent
    pub ano_vigencia: Value,

    /// `cliente.empresa` exactly as sent; `null` when absent
    pub empresa: Value,

    /// `cliente.email` exactly as sent; `null` when absent
    pub email: Value,
}

impl AgreementRequest {
    /// Suggested download name: `Convenio_<numero>_<empresa>.pdf`
    ///
    /// Spaces in the company name become underscores.
    pub fn file_name(&self) -> String {
        let company = self
            .input
            .client
            .empresa
            .as_deref()
            .unwrap_or(DEFAULT_COMPANY_FILE_NAME)
            .replace(' ', "_");
        format!("Convenio_{}_{}.pdf", self.input.agreement_number, company)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn input(client: ClientInfo) -> AgreementInput {
        AgreementInput {
            agreement_number: "CV-001".to_string(),
            client,
            date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            rates: RateTable::default(),
            validity_year: None,
        }
    }

    #[test]
    fn test_full_name() {
        let client = ClientInfo {
            nombre: Some("Ana".to_string()),
            apellidos: Some("López Ruiz".to_string()),
            ..Default::default()
        };
        assert_eq!(client.full_name(), "Ana López Ruiz");
    }

    #[test]
    fn test_full_name_trims_missing_parts() {
        let only_name = ClientInfo {
            nombre: Some("Ana".to_string()),
            ..Default::default()
        };
        assert_eq!(only_name.full_name(), "Ana");

        let only_surname = ClientInfo {
            apellidos: Some("López".to_string()),
            ..Default::default()
        };
        assert_eq!(only_surname.full_name(), "López");

        assert_eq!(ClientInfo::default().full_name(), "");
    }

    #[test]
    fn test_company_or_default() {
        assert_eq!(ClientInfo::default().company_or_default(), "Empresa");
        let client = ClientInfo {
            empresa: Some("Acme".to_string()),
            ..Default::default()
        };
        assert_eq!(client.company_or_default(), "Acme");
    }

    #[test]
    fn test_rate_table_partial_defaults() {
        let rates: RateTable = serde_json::from_value(json!({ "kingSin": 950 })).unwrap();
        assert_eq!(rates.king_sin, 950.0);
        assert_eq!(rates.queen_sin, 1000.0);
        assert_eq!(rates.king_con, 1040.0);
        assert_eq!(rates.queen_con, 1480.0);
    }

    #[test]
    fn test_rate_table_serializes_wire_names() {
        let value = serde_json::to_value(RateTable::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "kingSin": 800.0,
                "queenSin": 1000.0,
                "kingCon": 1040.0,
                "queenCon": 1480.0
            })
        );
    }

    #[test]
    fn test_validity_year_default_is_next_year() {
        let expected = (Local::now().year() + 1).to_string();
        assert_eq!(input(ClientInfo::default()).validity_year_or_default(), expected);
    }

    #[test]
    fn test_validity_year_explicit() {
        let mut agreement = input(ClientInfo::default());
        agreement.validity_year = Some("2030".to_string());
        assert_eq!(agreement.validity_year_or_default(), "2030");
    }

    #[test]
    fn test_file_name() {
        let request = AgreementRequest {
            input: input(ClientInfo {
                empresa: Some("Grupo Industrial Norte".to_string()),
                ..Default::default()
            }),
            numero_convenio: json!("CV-001"),
            tarifas: Value::Null,
            ano_vigencia: Value::Null,
            empresa: json!("Grupo Industrial Norte"),
            email: Value::Null,
        };
        assert_eq!(
            request.file_name(),
            "Convenio_CV-001_Grupo_Industrial_Norte.pdf"
        );
    }

    #[test]
    fn test_file_name_without_company() {
        let request = AgreementRequest {
            input: input(ClientInfo::default()),
            numero_convenio: json!("CV-001"),
            tarifas: Value::Null,
            ano_vigencia: Value::Null,
            empresa: Value::Null,
            email: Value::Null,
        };
        assert_eq!(request.file_name(), "Convenio_CV-001_empresa.pdf");
    }
}
