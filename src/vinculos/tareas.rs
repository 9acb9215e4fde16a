//! Derivación de la lista de tareas de informe de un estudiante.
//!
//! Dos fuentes: convocatorias canónicas con estado Seleccionado (la vía
//! normal) y prácticas terminales que nunca tuvieron convocatoria
//! Seleccionado (datos legados). Deduplicado por lanzamiento; la primera
//! fuente tiene precedencia.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Convocatoria, EstadoConvocatoria, Lanzamiento, Nota, Practica};
use crate::vinculos::matcher::PoliticaNombre;
use crate::vinculos::practicas::resolver_vinculos_practicas;

/// Tarea de entrega/corrección de informe visible para el estudiante.
#[derive(Debug, Clone, Serialize)]
pub struct TareaInforme {
    /// Ausente en tareas derivadas sólo de una práctica legada.
    pub convocatoria_id: Option<String>,
    pub practica_id: Option<String>,
    pub lanzamiento_id: String,
    pub lanzamiento_nombre: String,
    pub link_informe: String,
    /// Fecha de fin del lanzamiento. `None` = plazo desconocido, se lista
    /// al final de su grupo.
    pub fecha_limite: Option<NaiveDate>,
    pub informe_entregado: bool,
    pub nota: Option<Nota>,
    pub fecha_entrega: Option<NaiveDate>,
}

/// Deriva las tareas de informe a partir del estado ya reconciliado.
///
/// `canonicas` es el mapa lanzamiento→convocatoria canónica del
/// reconciliador; `completados` el conjunto de lanzamientos con práctica
/// terminal. El orden de salida es determinístico: pendientes antes que
/// entregadas y, dentro de cada grupo, plazo ascendente (sin plazo al
/// final); a igual clave se conserva el orden de emisión.
pub fn derivar_tareas(
    canonicas: &HashMap<String, Convocatoria>,
    completados: &HashSet<String>,
    practicas: &[Practica],
    lanzamientos: &[Lanzamiento],
    politica: PoliticaNombre,
) -> Vec<TareaInforme> {
    let vinculos = resolver_vinculos_practicas(practicas, lanzamientos, politica);
    let mut emitidos: HashSet<&str> = HashSet::new();
    let mut tareas: Vec<TareaInforme> = Vec::new();

    // Fuente 1: convocatorias canónicas Seleccionado con link de informe.
    // Se itera sobre los lanzamientos (no sobre el mapa) para que el orden
    // de emisión no dependa del orden interno del HashMap.
    for lanzamiento in lanzamientos {
        let Some(convocatoria) = canonicas.get(&lanzamiento.id) else {
            continue;
        };
        if convocatoria.estado != EstadoConvocatoria::Seleccionado {
            continue;
        }
        let Some(link) = link_no_vacio(lanzamiento) else {
            continue;
        };
        if !emitidos.insert(lanzamiento.id.as_str()) {
            continue;
        }

        // Nota de la mejor práctica que resuelva a este lanzamiento y
        // pertenezca al mismo legajo, si existe.
        let practica = practicas.iter().find(|p| {
            vinculos.get(&p.id).map(String::as_str) == Some(lanzamiento.id.as_str())
                && p.legajos.iter().any(|l| l == &convocatoria.legajo)
        });

        tareas.push(TareaInforme {
            convocatoria_id: Some(convocatoria.id.clone()),
            practica_id: practica.map(|p| p.id.clone()),
            lanzamiento_id: lanzamiento.id.clone(),
            lanzamiento_nombre: lanzamiento.nombre.clone(),
            link_informe: link.to_string(),
            fecha_limite: lanzamiento.fecha_fin,
            informe_entregado: convocatoria.informe_entregado,
            nota: practica.map(|p| p.nota.clone()),
            fecha_entrega: convocatoria.fecha_entrega,
        });
    }

    // Fuente 2: prácticas terminales sin convocatoria Seleccionado (legado).
    let indice: HashMap<&str, &Lanzamiento> =
        lanzamientos.iter().map(|l| (l.id.as_str(), l)).collect();
    for practica in practicas {
        if !practica.estado.es_terminal() {
            continue;
        }
        let Some(lanzamiento_id) = vinculos.get(&practica.id) else {
            continue;
        };
        if !completados.contains(lanzamiento_id) {
            continue;
        }
        let Some(lanzamiento) = indice.get(lanzamiento_id.as_str()) else {
            continue;
        };
        let Some(link) = link_no_vacio(lanzamiento) else {
            continue;
        };
        if !emitidos.insert(lanzamiento.id.as_str()) {
            continue;
        }

        tareas.push(TareaInforme {
            convocatoria_id: None,
            practica_id: Some(practica.id.clone()),
            lanzamiento_id: lanzamiento.id.clone(),
            lanzamiento_nombre: lanzamiento.nombre.clone(),
            link_informe: link.to_string(),
            fecha_limite: lanzamiento.fecha_fin,
            informe_entregado: practica.informe_entregado,
            nota: Some(practica.nota.clone()),
            fecha_entrega: None,
        });
    }

    tareas.sort_by(comparar_tareas);
    tareas
}

fn link_no_vacio(lanzamiento: &Lanzamiento) -> Option<&str> {
    lanzamiento
        .link_informe
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
}

fn comparar_tareas(a: &TareaInforme, b: &TareaInforme) -> Ordering {
    a.informe_entregado
        .cmp(&b.informe_entregado)
        .then_with(|| match (a.fecha_limite, b.fecha_limite) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}
