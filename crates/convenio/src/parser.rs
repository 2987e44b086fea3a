//! Request JSON parsing and validation

use crate::schema::{AgreementInput, AgreementRequest, ClientInfo, RateTable};
use crate::{ConvenioError, Result};
use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// Parse a request body from raw bytes
///
/// Malformed JSON is reported as `ConvenioError::Json`.
pub fn parse_request_slice(body: &[u8]) -> Result<AgreementRequest> {
    let value: Value = serde_json::from_slice(body)?;
    parse_request(&value)
}

/// Parse a request body from a JSON string
pub fn parse_request_str(body: &str) -> Result<AgreementRequest> {
    let value: Value = serde_json::from_str(body)?;
    parse_request(&value)
}

/// Validate a request body and build the render input
///
/// `numeroConvenio`, `cliente` and `fecha` are required. A value that is
/// null, empty, `false` or zero counts as missing.
pub fn parse_request(data: &Value) -> Result<AgreementRequest> {
    let numero = field(data, "numeroConvenio");
    let cliente = field(data, "cliente");
    let fecha = field(data, "fecha");

    if is_missing(numero) || is_missing(cliente) || is_missing(fecha) {
        return Err(ConvenioError::MissingFields);
    }

    let client_fields = cliente.as_object().ok_or_else(|| {
        ConvenioError::InvalidField(format!("cliente: expected an object, got {cliente}"))
    })?;
    let client = parse_client(client_fields);

    let date_text = fecha
        .as_str()
        .ok_or_else(|| ConvenioError::InvalidDate(format!("expected a string, got {fecha}")))?;
    let date = es_text::parse_iso_date(date_text).map_err(|e| match e {
        es_text::EsTextError::InvalidDate(detail) => ConvenioError::InvalidDate(detail),
    })?;

    let tarifas = field(data, "tarifas");
    let rates = if tarifas.is_null() {
        RateTable::default()
    } else {
        serde_json::from_value(tarifas.clone())
            .map_err(|e| ConvenioError::InvalidField(format!("tarifas: {e}")))?
    };

    let ano_vigencia = field(data, "añoVigencia");
    let validity_year = match ano_vigencia {
        Value::Null => None,
        Value::String(_) | Value::Number(_) => Some(value_to_string(ano_vigencia)),
        other => {
            return Err(ConvenioError::InvalidField(format!(
                "añoVigencia: expected a string or number, got {other}"
            )))
        }
    };

    let agreement_number = match numero {
        Value::String(_) | Value::Number(_) => value_to_string(numero),
        other => {
            return Err(ConvenioError::InvalidField(format!(
                "numeroConvenio: expected a string or number, got {other}"
            )))
        }
    };

    Ok(AgreementRequest {
        input: AgreementInput {
            agreement_number,
            client,
            date,
            rates,
            validity_year,
        },
        numero_convenio: numero.clone(),
        tarifas: tarifas.clone(),
        ano_vigencia: ano_vigencia.clone(),
        empresa: client_fields.get("empresa").cloned().unwrap_or_default(),
        email: client_fields.get("email").cloned().unwrap_or_default(),
    })
}

/// Look up a top-level field; absent fields read as `null`
fn field<'a>(data: &'a Value, name: &str) -> &'a Value {
    data.get(name).unwrap_or(&NULL)
}

fn parse_client(obj: &Map<String, Value>) -> ClientInfo {
    ClientInfo {
        nombre: optional_text(obj, "nombre"),
        apellidos: optional_text(obj, "apellidos"),
        empresa: optional_text(obj, "empresa"),
        email: optional_text(obj, "email"),
    }
}

fn optional_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).filter(|v| !v.is_null()).map(value_to_string)
}

/// Check whether a JSON value counts as absent
pub fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !*b,
        Value::Number(n) => n.as_f64().unwrap_or(0.0) == 0.0,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Convert a JSON value to string for rendering
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "numeroConvenio": "CV-2026-014",
            "cliente": {
                "nombre": "Ana",
                "apellidos": "López",
                "empresa": "Grupo Norte",
                "email": "ana@example.com"
            },
            "fecha": "2026-03-15"
        })
    }

    #[test]
    fn test_parse_valid_request() {
        let request = parse_request(&valid_body()).unwrap();

        assert_eq!(request.input.agreement_number, "CV-2026-014");
        assert_eq!(request.input.client.full_name(), "Ana López");
        assert_eq!(
            request.input.date,
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
        );
        assert_eq!(request.input.rates, RateTable::default());
        assert_eq!(request.input.validity_year, None);
        assert_eq!(request.numero_convenio, json!("CV-2026-014"));
        assert_eq!(request.tarifas, Value::Null);
        assert_eq!(request.ano_vigencia, Value::Null);
    }

    #[test]
    fn test_parse_numeric_fields() {
        let mut body = valid_body();
        body["numeroConvenio"] = json!(42);
        body["añoVigencia"] = json!(2027);

        let request = parse_request(&body).unwrap();
        assert_eq!(request.input.agreement_number, "42");
        assert_eq!(request.input.validity_year.as_deref(), Some("2027"));
        assert_eq!(request.numero_convenio, json!(42));
        assert_eq!(request.ano_vigencia, json!(2027));
    }

    #[test]
    fn test_parse_partial_rates() {
        let mut body = valid_body();
        body["tarifas"] = json!({ "kingSin": 900, "queenCon": 1600.5 });

        let request = parse_request(&body).unwrap();
        assert_eq!(request.input.rates.king_sin, 900.0);
        assert_eq!(request.input.rates.queen_sin, 1000.0);
        assert_eq!(request.input.rates.king_con, 1040.0);
        assert_eq!(request.input.rates.queen_con, 1600.5);
        assert_eq!(request.tarifas, json!({ "kingSin": 900, "queenCon": 1600.5 }));
    }

    #[test]
    fn test_missing_required_fields() {
        for key in ["numeroConvenio", "cliente", "fecha"] {
            let mut body = valid_body();
            body.as_object_mut().unwrap().remove(key);
            let err = parse_request(&body).unwrap_err();
            assert!(matches!(err, ConvenioError::MissingFields), "{key}");
        }
    }

    #[test]
    fn test_falsy_values_count_as_missing() {
        let cases = [
            ("numeroConvenio", json!("")),
            ("numeroConvenio", json!(0)),
            ("numeroConvenio", json!(null)),
            ("cliente", json!({})),
            ("cliente", json!(false)),
            ("fecha", json!("")),
        ];
        for (key, value) in cases {
            let mut body = valid_body();
            body[key] = value.clone();
            let err = parse_request(&body).unwrap_err();
            assert!(
                matches!(err, ConvenioError::MissingFields),
                "{key} = {value}"
            );
        }
    }

    #[test]
    fn test_missing_fields_message() {
        let err = parse_request(&json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Faltan datos requeridos");
    }

    #[test]
    fn test_invalid_date() {
        let mut body = valid_body();
        body["fecha"] = json!("15/03/2026");
        assert!(matches!(
            parse_request(&body),
            Err(ConvenioError::InvalidDate(_))
        ));

        body["fecha"] = json!(20260315);
        assert!(matches!(
            parse_request(&body),
            Err(ConvenioError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_client_must_be_object() {
        let mut body = valid_body();
        body["cliente"] = json!("Ana López");
        assert!(matches!(
            parse_request(&body),
            Err(ConvenioError::InvalidField(_))
        ));
    }

    #[test]
    fn test_invalid_rates() {
        let mut body = valid_body();
        body["tarifas"] = json!({ "kingSin": "barato" });
        assert!(matches!(
            parse_request(&body),
            Err(ConvenioError::InvalidField(_))
        ));
    }

    #[test]
    fn test_client_null_fields_are_absent() {
        let mut body = valid_body();
        body["cliente"] = json!({ "nombre": "Ana", "empresa": null });

        let request = parse_request(&body).unwrap();
        assert_eq!(request.input.client.empresa, None);
        assert_eq!(request.input.client.company_or_default(), "Empresa");
    }

    #[test]
    fn test_client_contact_echoed_raw() {
        let mut body = valid_body();
        body["cliente"] = json!({ "nombre": "Ana", "empresa": 5 });

        let request = parse_request(&body).unwrap();
        assert_eq!(request.input.client.empresa.as_deref(), Some("5"));
        assert_eq!(request.empresa, json!(5));
        assert_eq!(request.email, Value::Null);
        assert_eq!(request.file_name(), "Convenio_CV-2026-014_5.pdf");
    }

    #[test]
    fn test_parse_request_str_malformed() {
        assert!(matches!(
            parse_request_str("{ not json"),
            Err(ConvenioError::Json(_))
        ));
    }

    #[test]
    fn test_parse_request_slice() {
        let body = serde_json::to_vec(&valid_body()).unwrap();
        let request = parse_request_slice(&body).unwrap();
        assert_eq!(request.file_name(), "Convenio_CV-2026-014_Grupo_Norte.pdf");
    }

    #[test]
    fn test_is_missing() {
        assert!(is_missing(&json!(null)));
        assert!(is_missing(&json!(false)));
        assert!(!is_missing(&json!(true)));
        assert!(is_missing(&json!(0)));
        assert!(!is_missing(&json!(1)));
        assert!(is_missing(&json!("")));
        assert!(!is_missing(&json!("hello")));
        assert!(is_missing(&json!([])));
        assert!(!is_missing(&json!([1])));
        assert!(is_missing(&json!({})));
        assert!(!is_missing(&json!({"key": "value"})));
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&json!("hello")), "hello");
        assert_eq!(value_to_string(&json!(42)), "42");
        assert_eq!(value_to_string(&json!(true)), "true");
        assert_eq!(value_to_string(&json!(null)), "");
    }
}
