use std::sync::Arc;

use crate::datos::AlmacenTabular;

/// Almacén compartido entre handlers (inyectado como `web::Data`).
pub type AlmacenCompartido = Arc<dyn AlmacenTabular>;

pub mod busqueda;
pub mod datafiles;
pub mod estudiantes;
pub mod gestion;
pub mod informes;
pub mod tablero;
