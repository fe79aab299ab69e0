//! Shared query-parameter types for fiche listing endpoints.

use chrono::NaiveDate;
use serde::Deserialize;

use irs_core::error::CoreError;

/// `?criterio=` free-text search parameter.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub criterio: Option<String>,
}

/// `?fechaInicio=&fechaFin=` day-granularity range parameters.
///
/// Dates arrive as `yyyy-MM-dd` strings; both are required and the range must
/// not be inverted. Parsed here so every range endpoint rejects malformed
/// input the same way.
#[derive(Debug, Deserialize)]
pub struct DateRangeParams {
    #[serde(rename = "fechaInicio")]
    pub fecha_inicio: Option<String>,
    #[serde(rename = "fechaFin")]
    pub fecha_fin: Option<String>,
}

impl DateRangeParams {
    /// Validate and parse both bounds.
    pub fn parse(&self) -> Result<(NaiveDate, NaiveDate), CoreError> {
        let inicio = parse_required_date(self.fecha_inicio.as_deref(), "fechaInicio")?;
        let fin = parse_required_date(self.fecha_fin.as_deref(), "fechaFin")?;

        if fin < inicio {
            return Err(CoreError::Validation(
                "'fechaFin' no puede ser anterior a 'fechaInicio'".to_string(),
            ));
        }
        Ok((inicio, fin))
    }
}

fn parse_required_date(value: Option<&str>, name: &str) -> Result<NaiveDate, CoreError> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "El parámetro '{name}' es requerido. Use formato: yyyy-MM-dd"
            ))
        })?;

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!(
            "Formato de {name} inválido: '{raw}'. Use formato: yyyy-MM-dd"
        ))
    })
}
