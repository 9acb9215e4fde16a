// Biblioteca raíz del crate `ppslink`.
// Reexporta los módulos principales; `run_server` orquesta el servicio HTTP
// completo sobre un almacén inyectado.
pub mod api_json;
pub mod datos;
pub mod gestion;
pub mod informes;
pub mod models;
pub mod server;
pub mod vinculos;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
