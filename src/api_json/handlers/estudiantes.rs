use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::api_json::handlers::AlmacenCompartido;
use crate::api_json::POLITICA_PRODUCCION;
use crate::datos::cargar_colecciones;
use crate::vinculos::tareas_de_estudiante;

/// GET /estudiantes/{legajo}/tareas: lista de tareas de informe derivada
/// para un estudiante, más sus sanciones registradas.
pub async fn tareas_estudiante_handler(
    almacen: web::Data<AlmacenCompartido>,
    path: web::Path<String>,
) -> impl Responder {
    let legajo = path.into_inner();
    if legajo.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "legajo requerido"}));
    }

    let colecciones = match cargar_colecciones(almacen.get_ref().clone()).await {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("fallo cargando colecciones: {}", e)}))
        }
    };

    let Some(estudiante) = colecciones
        .estudiantes
        .iter()
        .find(|e| e.legajo == legajo)
    else {
        return HttpResponse::NotFound()
            .json(json!({"error": format!("legajo {} inexistente", legajo)}));
    };

    let tareas = tareas_de_estudiante(
        &legajo,
        &colecciones.convocatorias,
        &colecciones.practicas,
        &colecciones.lanzamientos,
        POLITICA_PRODUCCION,
    );
    let sanciones: Vec<_> = colecciones
        .sanciones
        .iter()
        .filter(|s| s.legajo == legajo)
        .collect();

    HttpResponse::Ok().json(json!({
        "legajo": legajo,
        "nombre": estudiante.nombre,
        "finalizado": estudiante.finalizado,
        "tareas": tareas,
        "sanciones": sanciones,
    }))
}
