use std::cmp::Ordering;
use std::collections::HashMap;

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use strsim::jaro_winkler;

use crate::api_json::handlers::AlmacenCompartido;
use crate::datos::campos::{estudiante, institucion, tablas};
use crate::datos::io::campo_str;
use crate::vinculos::normalizar::normalizar_clave;

/// Umbral de similitud para el typeahead; por debajo no vale la pena
/// mostrar el resultado.
const UMBRAL_SIMILITUD: f64 = 0.6;
/// Página acotada por tabla: para un typeahead alcanzan pocos candidatos.
const MAX_PAGINA: usize = 200;

/// GET /buscar?q=&max=: búsqueda de estudiantes e instituciones por
/// similitud de nombre (Jaro-Winkler sobre claves normalizadas).
pub async fn busqueda_handler(
    almacen: web::Data<AlmacenCompartido>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let q = match query.get("q").map(|s| s.trim()) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => return HttpResponse::BadRequest().json(json!({"error": "q requerido"})),
    };
    let max = query
        .get("max")
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10);
    let clave_q = normalizar_clave(&q);

    let mut resultados: Vec<(f64, serde_json::Value)> = Vec::new();

    let estudiantes = match almacen.buscar_pagina(tablas::ESTUDIANTES, None, MAX_PAGINA) {
        Ok(r) => r,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("fallo buscando estudiantes: {}", e)}))
        }
    };
    for registro in &estudiantes {
        let Some(nombre) = campo_str(registro, estudiante::NOMBRE) else {
            continue;
        };
        let puntaje = jaro_winkler(&clave_q, &normalizar_clave(&nombre));
        if puntaje >= UMBRAL_SIMILITUD {
            resultados.push((
                puntaje,
                json!({
                    "tipo": "estudiante",
                    "id": registro.id,
                    "nombre": nombre,
                    "legajo": campo_str(registro, estudiante::LEGAJO),
                    "puntaje": puntaje,
                }),
            ));
        }
    }

    let instituciones = match almacen.buscar_pagina(tablas::INSTITUCIONES, None, MAX_PAGINA) {
        Ok(r) => r,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("fallo buscando instituciones: {}", e)}))
        }
    };
    for registro in &instituciones {
        let Some(nombre) = campo_str(registro, institucion::NOMBRE) else {
            continue;
        };
        let puntaje = jaro_winkler(&clave_q, &normalizar_clave(&nombre));
        if puntaje >= UMBRAL_SIMILITUD {
            resultados.push((
                puntaje,
                json!({
                    "tipo": "institucion",
                    "id": registro.id,
                    "nombre": nombre,
                    "puntaje": puntaje,
                }),
            ));
        }
    }

    resultados.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    let lista: Vec<serde_json::Value> =
        resultados.into_iter().take(max).map(|(_, v)| v).collect();

    HttpResponse::Ok().json(json!({"q": q, "resultados": lista}))
}
