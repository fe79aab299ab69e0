//! Statistics aggregator for the estadísticas dashboard.
//!
//! Computes one snapshot (summary counters, delegation breakdown, monthly
//! series, year-over-year trend) from the entire fiche set in memory. The
//! reference instant is always passed in explicitly; callers hand in
//! `Utc::now()` and tests hand in fixed clocks.
//!
//! Counting runs over whatever rows the store returns, with no status
//! filtering: the dashboard reports on everything ever captured, drafts
//! included, which matches the production numbers.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::ficha::FichaSnapshot;
use crate::types::Timestamp;

/// Chart labels for the monthly series, in the UI's locale.
pub const MONTH_LABELS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// Label substituted for a missing delegation.
pub const SIN_DELEGACION: &str = "Sin delegación";

/// Label of the synthetic bucket collapsing delegations past the top cut.
pub const OTROS: &str = "Otros";

/// Delegations shown individually before the rest collapse into [`OTROS`].
const TOP_DELEGACIONES: usize = 6;

/// Months covered by the year-over-year trend (January through June).
const MESES_TENDENCIA: u32 = 6;

/// Headline counters and growth figures.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resumen {
    pub total_fichas: i64,
    pub fichas_hoy: i64,
    pub fichas_semana: i64,
    pub fichas_mes: i64,
    pub promedio_mensual: f64,
    pub crecimiento_mensual: f64,
}

/// One labeled series (bar/line chart source).
#[derive(Debug, Clone, Serialize)]
pub struct Serie {
    pub labels: Vec<String>,
    pub data: Vec<i64>,
}

/// One dataset of the comparative trend chart.
#[derive(Debug, Clone, Serialize)]
pub struct TendenciaDataset {
    pub label: String,
    pub data: Vec<i64>,
}

/// Two-dataset comparison of the first trend months across two years.
#[derive(Debug, Clone, Serialize)]
pub struct Tendencia {
    pub labels: Vec<String>,
    pub datasets: Vec<TendenciaDataset>,
}

/// The full statistics snapshot returned by `GET /fichas/estadisticas`.
///
/// Wire names keep the SPA's JSON contract; `fichasPorEstado` is the
/// delegation breakdown (the UI historically labels delegations "Estado").
#[derive(Debug, Clone, Serialize)]
pub struct FichasEstadisticas {
    pub resumen: Resumen,
    #[serde(rename = "fichasPorEstado")]
    pub por_delegacion: Serie,
    #[serde(rename = "fichasPorMes")]
    pub por_mes: Serie,
    #[serde(rename = "tendenciaMensual")]
    pub tendencia: Tendencia,
}

/// Compute the snapshot for `fichas` as of `now`.
///
/// Never fails: an empty input yields all-zero counters and fully labeled,
/// zero-filled series.
pub fn compute(fichas: &[FichaSnapshot], now: Timestamp) -> FichasEstadisticas {
    FichasEstadisticas {
        resumen: resumen(fichas, now),
        por_delegacion: por_delegacion(fichas),
        por_mes: por_mes(fichas, now.date_naive().year()),
        tendencia: tendencia(fichas, now.date_naive().year()),
    }
}

fn resumen(fichas: &[FichaSnapshot], now: Timestamp) -> Resumen {
    let hoy = now.date_naive();
    let inicio_semana = hoy - Duration::days(i64::from(hoy.weekday().num_days_from_sunday()));

    let total_fichas = fichas.len() as i64;
    let fichas_hoy = count_by_date(fichas, |d| d == hoy);
    let fichas_semana = count_by_date(fichas, |d| d >= inicio_semana && d <= hoy);

    let (year, month) = (hoy.year(), hoy.month());
    let fichas_mes = count_in_month(fichas, year, month);

    let (prev_year, prev_month) = previous_month(year, month);
    let fichas_mes_anterior = count_in_month(fichas, prev_year, prev_month);

    let promedio_mensual = promedio(fichas_mes, days_in_month(year, month));
    let promedio_anterior = promedio(fichas_mes_anterior, days_in_month(prev_year, prev_month));

    Resumen {
        total_fichas,
        fichas_hoy,
        fichas_semana,
        fichas_mes,
        promedio_mensual,
        crecimiento_mensual: crecimiento(promedio_anterior, promedio_mensual),
    }
}

/// Daily average for a month, rounded to 2 decimals; 0 for an empty month.
fn promedio(count: i64, days: i64) -> f64 {
    if count == 0 {
        0.0
    } else {
        round2(count as f64 / days as f64)
    }
}

/// Month-over-month growth in percent.
///
/// A previous month with no activity is reported as +100% when the current
/// month has any, and 0% when both are empty, instead of dividing by zero.
fn crecimiento(anterior: f64, actual: f64) -> f64 {
    if anterior == 0.0 {
        if actual > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        round2((actual - anterior) / anterior * 100.0)
    }
}

fn por_delegacion(fichas: &[FichaSnapshot]) -> Serie {
    let mut grupos: HashMap<&str, i64> = HashMap::new();
    for f in fichas {
        let key = match f.delegacion.trim() {
            "" => SIN_DELEGACION,
            d => d,
        };
        *grupos.entry(key).or_insert(0) += 1;
    }

    // Descending by count; label as tie-break so output is deterministic.
    let mut ordenados: Vec<(&str, i64)> = grupos.into_iter().collect();
    ordenados.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut labels: Vec<String> = Vec::new();
    let mut data: Vec<i64> = Vec::new();
    for &(label, count) in ordenados.iter().take(TOP_DELEGACIONES) {
        labels.push(label.to_string());
        data.push(count);
    }

    if ordenados.len() > TOP_DELEGACIONES {
        let resto: i64 = ordenados[TOP_DELEGACIONES..].iter().map(|&(_, c)| c).sum();
        labels.push(OTROS.to_string());
        data.push(resto);
    }

    Serie { labels, data }
}

/// 12-point series of fiches elaborated per calendar month of `year`.
fn por_mes(fichas: &[FichaSnapshot], year: i32) -> Serie {
    let data = (1..=12).map(|m| count_in_month(fichas, year, m)).collect();
    Serie {
        labels: MONTH_LABELS.iter().map(|l| l.to_string()).collect(),
        data,
    }
}

/// January–June counts for `year - 1` and `year`, labeled with the literal
/// year numbers.
fn tendencia(fichas: &[FichaSnapshot], year: i32) -> Tendencia {
    let datasets = [year - 1, year]
        .iter()
        .map(|&y| TendenciaDataset {
            label: y.to_string(),
            data: (1..=MESES_TENDENCIA).map(|m| count_in_month(fichas, y, m)).collect(),
        })
        .collect();

    Tendencia {
        labels: MONTH_LABELS[..MESES_TENDENCIA as usize]
            .iter()
            .map(|l| l.to_string())
            .collect(),
        datasets,
    }
}

fn count_by_date(fichas: &[FichaSnapshot], pred: impl Fn(NaiveDate) -> bool) -> i64 {
    fichas
        .iter()
        .filter(|f| f.elaborada_en.is_some_and(|t| pred(t.date_naive())))
        .count() as i64
}

fn count_in_month(fichas: &[FichaSnapshot], year: i32, month: u32) -> i64 {
    count_by_date(fichas, |d| d.year() == year && d.month() == month)
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn days_in_month(year: i32, month: u32) -> i64 {
    let first = first_of_month(year, month);
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    (first_of_month(next_year, next_month) - first).num_days()
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("month 1..=12 always has a first day")
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
