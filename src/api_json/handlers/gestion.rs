use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::api_json::handlers::AlmacenCompartido;
use crate::datos::cargar_lanzamientos;
use crate::gestion::{
    actualizar_telefono, aplicar_sancion, archivar_no_relanzadas, SolicitudSancion,
};

/// POST /gestion/sanciones: crea la sanción y la vincula en los registros
/// del legajo. La respuesta informa cuántas de las escrituras laterales
/// salieron bien (la operación no es atómica).
pub async fn aplicar_sancion_handler(
    almacen: web::Data<AlmacenCompartido>,
    body: web::Json<SolicitudSancion>,
) -> impl Responder {
    let solicitud = body.into_inner();
    if solicitud.legajo.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "legajo requerido"}));
    }

    match aplicar_sancion(almacen.get_ref().as_ref(), &solicitud) {
        Ok(aplicacion) => HttpResponse::Ok().json(json!({
            "sancion_id": aplicacion.sancion_id,
            "vinculaciones_ok": aplicacion.lote.exitos,
            "vinculaciones_fallidas": aplicacion.lote.fallos,
        })),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("fallo aplicando sanción: {}", e)})),
    }
}

/// POST /gestion/archivar: archiva los lanzamientos "No relanzar" ya
/// terminados. Mejor-esfuerzo por lotes; responde el conteo.
pub async fn archivar_handler(almacen: web::Data<AlmacenCompartido>) -> impl Responder {
    let lanzamientos = match cargar_lanzamientos(almacen.get_ref().as_ref()) {
        Ok(l) => l,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("fallo cargando lanzamientos: {}", e)}))
        }
    };

    let hoy = crate::api_json::hoy();
    let resultado = archivar_no_relanzadas(almacen.get_ref().as_ref(), &lanzamientos, hoy);
    HttpResponse::Ok().json(json!({
        "archivados": resultado.exitos,
        "fallos": resultado.fallos,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CambioTelefono {
    pub telefono: String,
}

/// PUT /instituciones/{id}/telefono: actualiza el teléfono de contacto.
pub async fn telefono_handler(
    almacen: web::Data<AlmacenCompartido>,
    path: web::Path<String>,
    body: web::Json<CambioTelefono>,
) -> impl Responder {
    let institucion_id = path.into_inner();
    match actualizar_telefono(almacen.get_ref().as_ref(), &institucion_id, &body.telefono) {
        Ok(()) => HttpResponse::Ok().json(json!({"status": "ok"})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("fallo actualizando teléfono: {}", e)})),
    }
}
