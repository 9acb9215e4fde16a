//! Reconciliación de convocatorias: una canónica por lanzamiento.
//!
//! El almacén acumula convocatorias duplicadas para el mismo
//! estudiante+lanzamiento (reinscripciones, correcciones manuales). Acá se
//! resuelve cada convocatoria a su lanzamiento y se queda una sola por
//! lanzamiento según la prioridad de estado.

use std::collections::HashMap;

use crate::models::{Convocatoria, Lanzamiento};
use crate::vinculos::matcher::{IndiceLanzamientos, Objetivo, PoliticaNombre, TOLERANCIA_DIAS};

/// Resultado de la reconciliación. `canonicas` mapea id de lanzamiento a la
/// convocatoria elegida; `sin_vincular` conserva las que no resolvieron a
/// ningún lanzamiento dentro de la tolerancia, para reporte/diagnóstico
/// (quedan fuera de toda vista derivada).
#[derive(Debug, Default)]
pub struct Reconciliacion {
    pub canonicas: HashMap<String, Convocatoria>,
    pub sin_vincular: Vec<Convocatoria>,
}

/// Agrupa las convocatorias por su lanzamiento resuelto y elige la canónica
/// de cada grupo plegando con la prioridad de estado. A igual prioridad
/// queda la primera encontrada (orden de entrada).
pub fn reconciliar(
    convocatorias: &[Convocatoria],
    lanzamientos: &[Lanzamiento],
    politica: PoliticaNombre,
) -> Reconciliacion {
    let indice = IndiceLanzamientos::new(lanzamientos);
    let mut resultado = Reconciliacion::default();

    for convocatoria in convocatorias {
        let objetivo = Objetivo {
            link: convocatoria.lanzamiento_link.as_deref(),
            nombre: convocatoria.lanzamiento_nombre.as_deref(),
            orientacion: None,
            fecha: convocatoria.lanzamiento_fecha,
        };
        let Some(lanzamiento) = indice.mejor_coincidencia(&objetivo, TOLERANCIA_DIAS, politica)
        else {
            resultado.sin_vincular.push(convocatoria.clone());
            continue;
        };

        match resultado.canonicas.get(&lanzamiento.id) {
            Some(actual) if actual.estado.prioridad() >= convocatoria.estado.prioridad() => {}
            _ => {
                resultado
                    .canonicas
                    .insert(lanzamiento.id.clone(), convocatoria.clone());
            }
        }
    }

    resultado
}
