//! Fiche entity model and the listing views derived from it.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use irs_core::ficha::FichaSnapshot;
use irs_core::types::{DbId, Timestamp};

/// Full row from the `ficha_informativa` table.
///
/// Classification fields (delegación, sector, prioridad, …) are denormalized
/// catalog labels stored as free text; they are a historical snapshot, not
/// foreign keys.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ficha {
    #[sqlx(rename = "id_ficha")]
    pub id: DbId,
    pub cedula: Option<i32>,
    pub delegacion: String,
    pub municipio: String,
    pub lugar: String,
    pub latitud: Option<String>,
    pub longitud: Option<String>,
    pub hora_suceso_inicio: Option<NaiveTime>,
    pub hora_suceso_fin: Option<NaiveTime>,
    pub fecha_suceso: Option<Timestamp>,
    pub sector: String,
    pub subsector: String,
    pub num_asistentes: Option<i32>,
    pub fecha_elaboracion: Option<Timestamp>,
    pub hora_elaboracion: Option<NaiveTime>,
    pub prioridad: String,
    pub condicion: String,
    pub informacion: String,
    pub asunto: String,
    pub hechos: String,
    pub acuerdos: String,
    pub id_informo: Option<DbId>,
    pub id_usuario: Option<DbId>,
    pub id_autorizo: Option<DbId>,
    pub fecha_recepcion: Option<Timestamp>,
    pub hora_recepcion: Option<NaiveTime>,
    pub id_estado_actual: Option<i32>,
    pub motivo_cancelacion: Option<String>,
    pub activo: i32,
    pub folio_interno: Option<String>,
    pub direccion: String,
    pub visto: i32,
    pub id_ficha_anterior: Option<DbId>,
    pub fecha_validacion: Option<Timestamp>,
}

/// Request body for creating or fully replacing a fiche.
///
/// Updates replace every column (the capture form always submits the whole
/// fiche), so create and update share one input shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FichaInput {
    pub cedula: Option<i32>,
    pub delegacion: String,
    pub municipio: String,
    pub lugar: String,
    pub latitud: Option<String>,
    pub longitud: Option<String>,
    pub hora_suceso_inicio: Option<NaiveTime>,
    pub hora_suceso_fin: Option<NaiveTime>,
    pub fecha_suceso: Option<Timestamp>,
    pub sector: String,
    pub subsector: String,
    pub num_asistentes: Option<i32>,
    pub fecha_elaboracion: Option<Timestamp>,
    pub hora_elaboracion: Option<NaiveTime>,
    pub prioridad: String,
    pub condicion: String,
    pub informacion: String,
    pub asunto: String,
    pub hechos: String,
    pub acuerdos: String,
    pub id_informo: Option<DbId>,
    pub id_usuario: Option<DbId>,
    pub id_autorizo: Option<DbId>,
    pub fecha_recepcion: Option<Timestamp>,
    pub hora_recepcion: Option<NaiveTime>,
    pub id_estado_actual: Option<i32>,
    pub motivo_cancelacion: Option<String>,
    pub activo: i32,
    pub folio_interno: Option<String>,
    pub direccion: String,
    pub visto: i32,
    pub id_ficha_anterior: Option<DbId>,
    pub fecha_validacion: Option<Timestamp>,
}

/// Row shape of the general, day, concluded, and range listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FichaListItem {
    pub id: DbId,
    pub fecha_elaboracion: String,
    pub folio: String,
    pub fecha_suceso: String,
    pub hora_suceso: String,
    /// Delegation label; the UI column is historically titled "Estado".
    pub estado: String,
    pub municipio: String,
    pub lugar: String,
    pub asunto: String,
    pub prioridad: String,
    pub sector: String,
    pub asistentes: i32,
    /// Condition label shown as the row's current state.
    pub estado_actual: String,
    pub latitud: Option<String>,
    pub longitud: Option<String>,
}

/// Row shape of the draft listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftListItem {
    pub id: DbId,
    pub fecha_elaboracion: String,
    pub fecha_suceso: String,
    pub hora_suceso: String,
    pub estado: String,
    pub prioridad: String,
    pub sector: String,
    pub asistentes: i32,
    pub estado_actual: String,
    pub borrador_usuario: String,
}

/// Compact row shape of the free-text search results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FichaSummary {
    pub id: DbId,
    pub delegacion: String,
    pub lugar: String,
    pub sector: String,
    pub fecha_suceso: Option<Timestamp>,
    pub prioridad: String,
    pub condicion: String,
    pub fecha_elaboracion: Option<Timestamp>,
}

fn fmt_fecha(fecha: Option<Timestamp>, fallback: &str) -> String {
    fecha
        .map(|f| f.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| fallback.to_string())
}

fn fmt_hora(hora: Option<NaiveTime>) -> Option<String> {
    hora.map(|h| h.format("%H:%M").to_string())
}

fn non_blank_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

impl Ficha {
    /// The classification view consumed by the classifier and the
    /// statistics aggregator.
    pub fn snapshot(&self) -> FichaSnapshot {
        FichaSnapshot {
            lifecycle: self.activo,
            state: self.id_estado_actual,
            cedula: self.cedula,
            condicion: self.condicion.clone(),
            delegacion: self.delegacion.clone(),
            elaborada_en: self.fecha_elaboracion,
        }
    }

    /// Display folio: the captured internal folio, or a synthesized
    /// `F-000123` when none was assigned.
    pub fn folio(&self) -> String {
        self.folio_interno
            .clone()
            .unwrap_or_else(|| format!("F-{:06}", self.id))
    }

    pub fn to_list_item(&self) -> FichaListItem {
        let inicio = fmt_hora(self.hora_suceso_inicio);
        let fin = fmt_hora(self.hora_suceso_fin);
        let hora_suceso = match (inicio, fin) {
            (Some(i), Some(f)) => format!("{i} - {f}"),
            (Some(i), None) => i,
            (None, Some(f)) => f,
            (None, None) => "N/A".to_string(),
        };

        FichaListItem {
            id: self.id,
            fecha_elaboracion: fmt_fecha(self.fecha_elaboracion, ""),
            folio: self.folio(),
            fecha_suceso: fmt_fecha(self.fecha_suceso, ""),
            hora_suceso,
            estado: self.delegacion.clone(),
            municipio: self.municipio.clone(),
            lugar: self.lugar.clone(),
            asunto: self.asunto.clone(),
            prioridad: self.prioridad.clone(),
            sector: self.sector.clone(),
            asistentes: self.num_asistentes.unwrap_or(0),
            estado_actual: self.condicion.clone(),
            latitud: self.latitud.clone(),
            longitud: self.longitud.clone(),
        }
    }

    pub fn to_draft_item(&self) -> DraftListItem {
        DraftListItem {
            id: self.id,
            fecha_elaboracion: fmt_fecha(self.fecha_elaboracion, "Sin fecha"),
            fecha_suceso: fmt_fecha(self.fecha_suceso, "Sin fecha"),
            // Drafts only show the end of the incident window.
            hora_suceso: fmt_hora(self.hora_suceso_fin).unwrap_or_else(|| "Sin hora".to_string()),
            estado: non_blank_or(&self.delegacion, "Sin delegación"),
            prioridad: non_blank_or(&self.prioridad, "Sin prioridad"),
            sector: non_blank_or(&self.sector, "Sin sector"),
            asistentes: self.num_asistentes.unwrap_or(0),
            estado_actual: non_blank_or(&self.condicion, "Sin condición"),
            borrador_usuario: self
                .id_usuario
                .map(|u| u.to_string())
                .unwrap_or_else(|| "Sin usuario".to_string()),
        }
    }

    pub fn to_summary(&self) -> FichaSummary {
        FichaSummary {
            id: self.id,
            delegacion: self.delegacion.clone(),
            lugar: self.lugar.clone(),
            sector: self.sector.clone(),
            fecha_suceso: self.fecha_suceso,
            prioridad: self.prioridad.clone(),
            condicion: self.condicion.clone(),
            fecha_elaboracion: self.fecha_elaboracion,
        }
    }
}
