pub mod db;
pub mod ejecutivo;

pub use db::{guardar_informe, init_db, listar_informes, ultimo_informe};
pub use ejecutivo::generar_informe_ejecutivo;
