//! Status codes and the classification view of a fiche.
//!
//! The `ficha_informativa` table carries two overlapping integer columns:
//! `activo` (lifecycle flag) and `id_estado_actual` (current-state code).
//! Each live value gets exactly one name here; the classifier and the
//! listing views only ever test set membership plus [`FichaState::Concluded`].

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Status code type matching the INTEGER columns in the database.
pub type StatusCode = i32;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i32)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the raw database code.
            pub const fn code(self) -> StatusCode {
                self as StatusCode
            }
        }

        impl From<$name> for StatusCode {
            fn from(value: $name) -> Self {
                value as StatusCode
            }
        }
    };
}

define_status_enum! {
    /// Lifecycle flag (`activo`). Codes 1, 4 and 5 never occur in live data.
    FichaLifecycle {
        /// Freshly inserted, not yet saved as anything.
        New = 0,
        /// Saved as a draft; excluded from every published view.
        Draft = 2,
        /// Validated by an explicit save action. Terminal.
        Validated = 3,
        /// Active follow-up of an earlier fiche (`id_ficha_anterior`).
        FollowUp = 6,
    }
}

define_status_enum! {
    /// Current-state code (`id_estado_actual`), layered on the lifecycle
    /// flag. `Concluded` doubles as an ordinary visible state in the general
    /// listings and as the state the concluded view requires.
    FichaState {
        Concluded = 2,
        Active = 3,
        Dispatched = 4,
        Transferred = 6,
        Closed = 7,
    }
}

/// State codes admitted by the published/today/range views.
pub const VISIBLE_STATES: [StatusCode; 5] = [
    FichaState::Concluded.code(),
    FichaState::Active.code(),
    FichaState::Dispatched.code(),
    FichaState::Transferred.code(),
    FichaState::Closed.code(),
];

/// Condition label the concluded view matches exactly (case-sensitive).
pub const CONDICION_CONCLUIDO: &str = "CONCLUIDO";

/// The slice of a fiche the classifier and the statistics aggregator need.
///
/// Built from a full row by `irs-db`; kept deliberately small so both
/// consumers stay pure and cheap to test.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FichaSnapshot {
    /// Lifecycle flag (`activo`).
    pub lifecycle: StatusCode,
    /// Current-state code (`id_estado_actual`), when set.
    pub state: Option<StatusCode>,
    /// Reporter document number; the concluded view requires a positive one.
    pub cedula: Option<i32>,
    /// Denormalized condition label (`condicion`).
    pub condicion: String,
    /// Denormalized delegation label (`delegacion`).
    pub delegacion: String,
    /// Creation timestamp (`fecha_elaboracion`), when set.
    pub elaborada_en: Option<Timestamp>,
}
