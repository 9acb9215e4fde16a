use actix_multipart::Multipart;
use actix_web::{HttpResponse, Responder};
use futures_util::stream::StreamExt;
use serde_json::json;
use tokio::io::AsyncWriteExt;

use crate::datos::dir_datos;

/// GET /datafiles: lista los snapshots JSON de tablas disponibles.
pub async fn datafiles_list_handler() -> impl Responder {
    let dir = dir_datos();
    let mut tablas: Vec<String> = Vec::new();
    match std::fs::read_dir(&dir) {
        Ok(entradas) => {
            for entrada in entradas.flatten() {
                let nombre = entrada.file_name().to_string_lossy().to_string();
                if let Some(tabla) = nombre.strip_suffix(".json") {
                    tablas.push(tabla.to_string());
                }
            }
        }
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("no se pudo leer {:?}: {}", dir, e)}))
        }
    }
    tablas.sort();
    HttpResponse::Ok().json(json!({"dir": dir.to_string_lossy(), "tablas": tablas}))
}

/// POST /datafiles/upload: sube snapshots de tabla (multipart). Sólo se
/// aceptan archivos `.json`; el nombre del archivo es el nombre de la tabla.
pub async fn datafiles_upload_handler(mut payload: Multipart) -> impl Responder {
    let base = dir_datos();
    if let Err(e) = std::fs::create_dir_all(&base) {
        return HttpResponse::InternalServerError()
            .json(json!({"error": format!("no se pudo crear el directorio de datos: {}", e)}));
    }

    let mut guardados: Vec<String> = Vec::new();
    let mut rechazados: Vec<String> = Vec::new();
    while let Some(campo_res) = payload.next().await {
        match campo_res {
            Ok(mut campo) => {
                let nombre = campo
                    .content_disposition()
                    .get_filename()
                    .map(|s| s.to_string())
                    .unwrap_or_default();

                // Sólo snapshots JSON, sin rutas raras
                if nombre.is_empty() || nombre.contains("..") || !nombre.ends_with(".json") {
                    rechazados.push(nombre);
                    continue;
                }

                let ruta = base.join(&nombre);
                match tokio::fs::File::create(&ruta).await {
                    Ok(mut archivo) => {
                        let mut ok = true;
                        while let Some(trozo) = campo.next().await {
                            match trozo {
                                Ok(bytes) => {
                                    if let Err(e) = archivo.write_all(&bytes).await {
                                        eprintln!("⚠️ fallo escribiendo subida: {}", e);
                                        ok = false;
                                        break;
                                    }
                                }
                                Err(e) => {
                                    eprintln!("⚠️ error en el stream de subida: {}", e);
                                    ok = false;
                                    break;
                                }
                            }
                        }
                        if ok {
                            guardados.push(nombre);
                        } else {
                            rechazados.push(nombre);
                        }
                    }
                    Err(e) => {
                        eprintln!("⚠️ no se pudo crear el archivo subido: {}", e);
                        rechazados.push(nombre);
                    }
                }
            }
            Err(e) => {
                eprintln!("⚠️ error leyendo multipart: {}", e);
            }
        }
    }

    HttpResponse::Ok().json(json!({"guardados": guardados, "rechazados": rechazados}))
}
