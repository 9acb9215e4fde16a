use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::api_json::handlers::AlmacenCompartido;
use crate::api_json::{ParamsInforme, POLITICA_PRODUCCION};
use crate::datos::cargar_colecciones;
use crate::vinculos::calcular_metricas;

/// GET /tablero: métricas de tarjetas del tablero en vivo.
///
/// Cargar y cruzar las cinco tablas completas es el endpoint pesado del
/// sistema, así que se limita la cantidad de cómputos simultáneos con un
/// semáforo dimensionado por núcleos.
pub async fn tablero_handler(
    almacen: web::Data<AlmacenCompartido>,
    query: web::Query<ParamsInforme>,
) -> impl Responder {
    static SEM_TABLERO: std::sync::OnceLock<std::sync::Arc<tokio::sync::Semaphore>> =
        std::sync::OnceLock::new();
    let sem = SEM_TABLERO
        .get_or_init(|| {
            std::sync::Arc::new(tokio::sync::Semaphore::new(std::cmp::max(
                1,
                num_cpus::get(),
            )))
        })
        .clone();
    let permiso = match sem.acquire_owned().await {
        Ok(p) => p,
        Err(_) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": "no se pudo adquirir el semáforo"}))
        }
    };

    let hoy = crate::api_json::hoy();
    let Some((anio, _corte)) = query.resolver(hoy) else {
        return HttpResponse::BadRequest().json(json!({"error": "fecha_corte inválida"}));
    };

    let colecciones = match cargar_colecciones(almacen.get_ref().clone()).await {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("fallo cargando colecciones: {}", e)}))
        }
    };

    let metricas = {
        let _permiso = permiso;
        calcular_metricas(
            &colecciones.estudiantes,
            &colecciones.instituciones,
            &colecciones.lanzamientos,
            &colecciones.practicas,
            anio,
            hoy,
            POLITICA_PRODUCCION,
        )
    };

    HttpResponse::Ok().json(metricas)
}
