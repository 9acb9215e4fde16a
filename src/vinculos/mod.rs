// Núcleo de vinculación: normalización, match difuso, reconciliación y
// derivación de estado por estudiante. Todo puro y sin I/O; el caller trae
// las colecciones ya cargadas.
pub mod matcher;
pub mod metricas;
pub mod normalizar;
pub mod practicas;
pub mod reconciliacion;
pub mod tareas;

pub use matcher::{mejor_coincidencia, IndiceLanzamientos, Objetivo, PoliticaNombre, TOLERANCIA_DIAS};
pub use metricas::{calcular_metricas, MetricasTablero};
pub use practicas::{lanzamientos_completados, resolver_vinculos_practicas};
pub use reconciliacion::{reconciliar, Reconciliacion};
pub use tareas::{derivar_tareas, TareaInforme};

use crate::models::{Convocatoria, Lanzamiento, Practica};

/// Pipeline completo para un estudiante: reconcilia sus convocatorias,
/// calcula los lanzamientos completados por sus prácticas y deriva la lista
/// de tareas de informe ordenada.
pub fn tareas_de_estudiante(
    legajo: &str,
    convocatorias: &[Convocatoria],
    practicas: &[Practica],
    lanzamientos: &[Lanzamiento],
    politica: PoliticaNombre,
) -> Vec<TareaInforme> {
    let propias: Vec<Convocatoria> = convocatorias
        .iter()
        .filter(|c| c.legajo == legajo)
        .cloned()
        .collect();
    let suyas: Vec<Practica> = practicas
        .iter()
        .filter(|p| p.legajos.iter().any(|l| l == legajo))
        .cloned()
        .collect();

    let reconciliacion = reconciliar(&propias, lanzamientos, politica);
    let completados = lanzamientos_completados(&suyas, lanzamientos, politica);
    derivar_tareas(
        &reconciliacion.canonicas,
        &completados,
        &suyas,
        lanzamientos,
        politica,
    )
}
