use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::collections::HashMap;

use crate::api_json::handlers::AlmacenCompartido;
use crate::api_json::{ParamsInforme, POLITICA_PRODUCCION};
use crate::datos::cargar_colecciones;
use crate::informes::{generar_informe_ejecutivo, listar_informes, ultimo_informe};

/// POST /informes/ejecutivo: genera (y persiste) el informe ejecutivo del
/// año indicado, con la foto al día de corte.
pub async fn generar_ejecutivo_handler(
    almacen: web::Data<AlmacenCompartido>,
    body: web::Json<ParamsInforme>,
) -> impl Responder {
    let hoy = crate::api_json::hoy();
    let Some((anio, corte)) = body.resolver(hoy) else {
        return HttpResponse::BadRequest().json(json!({"error": "fecha_corte inválida"}));
    };

    let colecciones = match cargar_colecciones(almacen.get_ref().clone()).await {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("fallo cargando colecciones: {}", e)}))
        }
    };

    let informe = generar_informe_ejecutivo(&colecciones, anio, corte, POLITICA_PRODUCCION);
    HttpResponse::Ok().json(informe)
}

/// GET /informes?limite=: metadatos de los últimos informes guardados.
pub async fn listar_informes_handler(
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let limite = query
        .get("limite")
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(20);
    match listar_informes(limite) {
        Ok(filas) => {
            let lista: Vec<serde_json::Value> = filas
                .into_iter()
                .map(|(id, ts, tipo, params)| {
                    json!({"id": id, "ts": ts, "tipo": tipo, "params": params})
                })
                .collect();
            HttpResponse::Ok().json(json!({"informes": lista}))
        }
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("fallo listando informes: {}", e)})),
    }
}

/// GET /informes/ultimo?tipo=: último informe persistido de un tipo.
pub async fn ultimo_informe_handler(
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let tipo = query
        .get("tipo")
        .cloned()
        .unwrap_or_else(|| "ejecutivo".to_string());
    match ultimo_informe(&tipo) {
        Ok(Some(crudo)) => match serde_json::from_str::<serde_json::Value>(&crudo) {
            Ok(v) => HttpResponse::Ok().json(v),
            Err(_) => HttpResponse::Ok().body(crudo),
        },
        Ok(None) => HttpResponse::NotFound()
            .json(json!({"error": format!("sin informes de tipo {}", tipo)})),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("fallo leyendo informes: {}", e)})),
    }
}
