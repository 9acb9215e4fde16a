use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde_json::json;

use crate::api_json::handlers::busqueda::busqueda_handler;
use crate::api_json::handlers::datafiles::{datafiles_list_handler, datafiles_upload_handler};
use crate::api_json::handlers::estudiantes::tareas_estudiante_handler;
use crate::api_json::handlers::gestion::{
    aplicar_sancion_handler, archivar_handler, telefono_handler,
};
use crate::api_json::handlers::informes::{
    generar_ejecutivo_handler, listar_informes_handler, ultimo_informe_handler,
};
use crate::api_json::handlers::tablero::tablero_handler;
use crate::api_json::handlers::AlmacenCompartido;
use crate::api_json::ParamsInforme;
use crate::gestion::SolicitudSancion;

pub async fn run_server(bind_addr: &str, almacen: AlmacenCompartido) -> std::io::Result<()> {
    // La DB de informes es opcional: si no se puede inicializar, el server
    // arranca igual y la persistencia de informes queda en mejor-esfuerzo.
    if let Err(e) = crate::informes::init_db() {
        eprintln!("⚠️ no se pudo inicializar la DB de informes: {}", e);
    }

    let data = web::Data::new(almacen);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .route("/tablero", web::get().to(tablero_handler))
            .route(
                "/estudiantes/{legajo}/tareas",
                web::get().to(tareas_estudiante_handler),
            )
            .route("/buscar", web::get().to(busqueda_handler))
            .route("/informes/ejecutivo", web::post().to(generar_ejecutivo_handler))
            .route("/informes/ultimo", web::get().to(ultimo_informe_handler))
            .route("/informes", web::get().to(listar_informes_handler))
            .route("/gestion/sanciones", web::post().to(aplicar_sancion_handler))
            .route("/gestion/archivar", web::post().to(archivar_handler))
            .route(
                "/instituciones/{id}/telefono",
                web::put().to(telefono_handler),
            )
            .route("/datafiles", web::get().to(datafiles_list_handler))
            .route("/datafiles/upload", web::post().to(datafiles_upload_handler))
            .route("/help", web::get().to(help_handler))
            .route("/", web::get().to(help_handler))
    })
    .bind(bind_addr)?
    .run()
    .await
}

async fn help_handler() -> impl Responder {
    let ejemplo_informe = ParamsInforme {
        anio: Some(2024),
        fecha_corte: Some("2024-12-31".to_string()),
    };
    let ejemplo_sancion = SolicitudSancion {
        legajo: "T1234".to_string(),
        lanzamiento_id: Some("recLanzamiento1".to_string()),
        tipo: "Informe fuera de plazo".to_string(),
        fecha: Some("2024-09-10".to_string()),
        notas: Some("Entrega 3 semanas tarde".to_string()),
        puntaje: 2,
    };

    let help = json!({
        "description": "API de gestión de PPS: tablero de métricas, tareas por estudiante, informes ejecutivos y operaciones de gestión.",
        "rutas": {
            "GET /tablero?anio=": "métricas de tarjetas del tablero",
            "GET /estudiantes/{legajo}/tareas": "tareas de informe derivadas para un legajo",
            "GET /buscar?q=&max=": "búsqueda difusa de estudiantes/instituciones",
            "POST /informes/ejecutivo": "genera y persiste el informe ejecutivo",
            "GET /informes?limite=": "metadatos de informes guardados",
            "GET /informes/ultimo?tipo=": "último informe persistido",
            "POST /gestion/sanciones": "aplica una sanción (no atómica, responde conteos)",
            "POST /gestion/archivar": "archiva lanzamientos 'No relanzar' terminados",
            "PUT /instituciones/{id}/telefono": "actualiza teléfono de contacto",
            "GET /datafiles": "lista snapshots de tablas",
            "POST /datafiles/upload": "sube snapshots JSON (multipart)",
        },
        "ejemplo_informe": ejemplo_informe,
        "ejemplo_sancion": ejemplo_sancion,
    });

    HttpResponse::Ok().json(help)
}
