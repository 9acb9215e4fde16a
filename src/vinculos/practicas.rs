//! Vinculación de prácticas a lanzamientos y cálculo de completados.
//!
//! Las prácticas casi nunca traen link curado a mano, así que el match
//! difuso usa una clave más estricta que el de convocatorias: nombre de
//! institución + orientación (igualdad exacta normalizada) + fecha de
//! inicio.

use std::collections::{HashMap, HashSet};

use crate::models::{Lanzamiento, Practica};
use crate::vinculos::matcher::{IndiceLanzamientos, Objetivo, PoliticaNombre, TOLERANCIA_DIAS};

/// Resuelve cada práctica a su lanzamiento (link primero, después match
/// difuso). Devuelve id de práctica → id de lanzamiento; las prácticas que
/// no resuelven no aparecen en el mapa. No mira estados: cualquier práctica
/// vinculable cuenta (lo necesita la métrica de estudiantes sin práctica).
pub fn resolver_vinculos_practicas(
    practicas: &[Practica],
    lanzamientos: &[Lanzamiento],
    politica: PoliticaNombre,
) -> HashMap<String, String> {
    let indice = IndiceLanzamientos::new(lanzamientos);
    let mut vinculos = HashMap::new();

    for practica in practicas {
        let objetivo = Objetivo {
            link: practica.lanzamiento_link.as_deref(),
            nombre: practica.institucion_nombre.as_deref(),
            orientacion: practica.orientacion.as_deref(),
            fecha: practica.fecha_inicio,
        };
        if let Some(lanzamiento) = indice.mejor_coincidencia(&objetivo, TOLERANCIA_DIAS, politica)
        {
            vinculos.insert(practica.id.clone(), lanzamiento.id.clone());
        }
    }

    vinculos
}

/// Ids de lanzamientos "completados": los que tienen al menos una práctica
/// vinculada con estado terminal. Un lanzamiento sin prácticas, o sólo con
/// prácticas en curso, queda afuera.
pub fn lanzamientos_completados(
    practicas: &[Practica],
    lanzamientos: &[Lanzamiento],
    politica: PoliticaNombre,
) -> HashSet<String> {
    let vinculos = resolver_vinculos_practicas(practicas, lanzamientos, politica);
    let mut completados = HashSet::new();

    for practica in practicas {
        if !practica.estado.es_terminal() {
            continue;
        }
        if let Some(lanzamiento_id) = vinculos.get(&practica.id) {
            completados.insert(lanzamiento_id.clone());
        }
    }

    completados
}
