//! Parámetros de entrada de la API y handlers HTTP.

pub mod handlers;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::vinculos::matcher::PoliticaNombre;
use crate::vinculos::normalizar::parse_fecha;

/// Política de nombres usada por todos los call sites productivos del cruce
/// entre tablas: se compara el nombre de grupo, no el nombre completo, para
/// que las variantes de turno de un lanzamiento compuesto no queden sin
/// vincular. Los lookups por link directo no pasan por nombres.
pub const POLITICA_PRODUCCION: PoliticaNombre = PoliticaNombre::NombreGrupo;

/// Parámetros de los endpoints de tablero e informes.
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "anio": 2024,
///   "fecha_corte": "2024-12-31"
/// }
/// ```
///
/// # Campos:
/// - `anio`: año objetivo de las métricas anuales (default: año en curso)
/// - `fecha_corte`: día de la "foto" para el informe ejecutivo, en
///   `YYYY-MM-DD` o `DD/MM/YYYY` (default: hoy)
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ParamsInforme {
    #[serde(default)]
    pub anio: Option<i32>,
    #[serde(default)]
    pub fecha_corte: Option<String>,
}

impl ParamsInforme {
    /// Resuelve los defaults contra el reloj. Una fecha de corte que no
    /// parsea se trata como entrada inválida (None acá, 400 en el handler).
    pub fn resolver(&self, hoy: NaiveDate) -> Option<(i32, NaiveDate)> {
        let anio = self.anio.unwrap_or_else(|| hoy.year());
        let corte = match &self.fecha_corte {
            Some(texto) => parse_fecha(texto)?,
            None => hoy,
        };
        Some((anio, corte))
    }
}

/// Fecha "hoy" de los handlers. Separada para que los cómputos del núcleo
/// sigan recibiendo la fecha como parámetro puro.
pub fn hoy() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolver_defaults() {
        let hoy = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let params = ParamsInforme::default();
        assert_eq!(params.resolver(hoy), Some((2024, hoy)));

        let params = ParamsInforme {
            anio: Some(2023),
            fecha_corte: Some("31/12/2023".to_string()),
        };
        let corte = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(params.resolver(hoy), Some((2023, corte)));

        let params = ParamsInforme {
            anio: None,
            fecha_corte: Some("no es fecha".to_string()),
        };
        assert_eq!(params.resolver(hoy), None);
    }
}
