// --- Gestión de PPS - Archivo principal ---

use std::sync::Arc;

use ppslink::api_json::handlers::AlmacenCompartido;
use ppslink::datos::{dir_datos, AlmacenJson};
use ppslink::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    println!("=== Gestión de PPS (API) ===");
    let bind = "127.0.0.1:8080";
    let dir = dir_datos();
    println!("Directorio de datos: {:?}", dir);
    let almacen: AlmacenCompartido = Arc::new(AlmacenJson::nuevo(dir));
    println!("Iniciando servidor en http://{}", bind);
    run_server(bind, almacen).await
}
