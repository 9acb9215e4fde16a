//! Capa de datos: forma de registro del almacén externo, constantes de
//! esquema, contrato de acceso y lectores por tabla.
//!
//! Submódulos:
//! - `io`: forma `Registro` y helpers de coerción de campos
//! - `campos`: constantes de nombres de tabla/columna del esquema externo
//! - `tabla`: trait `AlmacenTabular` + implementaciones JSON y en memoria
//! - un lector por tabla (`estudiantes`, `instituciones`, ...)

pub mod campos;
pub mod convocatorias;
pub mod estudiantes;
pub mod instituciones;
pub mod io;
pub mod lanzamientos;
pub mod practicas;
pub mod sanciones;
pub mod tabla;

pub use convocatorias::{cargar_convocatorias, leer_convocatorias};
pub use estudiantes::{cargar_estudiantes, leer_estudiantes};
pub use instituciones::{cargar_instituciones, leer_instituciones};
pub use io::Registro;
pub use lanzamientos::{cargar_lanzamientos, leer_lanzamientos};
pub use practicas::{cargar_practicas, leer_practicas};
pub use sanciones::{cargar_sanciones, leer_sanciones};
pub use tabla::{AlmacenJson, AlmacenMemoria, AlmacenTabular, ResultadoLote, TAMANIO_LOTE};

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use crate::models::{Convocatoria, Estudiante, Institucion, Lanzamiento, Practica, Sancion};

/// Resuelve el directorio de snapshots de datos. Primero la variable de
/// entorno, después candidatos relativos al directorio de trabajo.
pub fn dir_datos() -> PathBuf {
    if let Ok(ruta) = std::env::var("PPSLINK_DATA_DIR") {
        let p = PathBuf::from(ruta);
        if p.exists() {
            eprintln!("✅ Usando PPSLINK_DATA_DIR: {:?}", p);
            return p;
        }
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let candidatos = vec![cwd.join("data"), cwd.join("ppslink/data")];
    for candidato in candidatos {
        if candidato.exists() {
            return candidato;
        }
    }

    PathBuf::from("data")
}

/// Las cinco colecciones con las que trabaja el núcleo de vinculación, ya
/// convertidas a modelos.
#[derive(Debug, Default, Clone)]
pub struct Colecciones {
    pub estudiantes: Vec<Estudiante>,
    pub instituciones: Vec<Institucion>,
    pub lanzamientos: Vec<Lanzamiento>,
    pub convocatorias: Vec<Convocatoria>,
    pub practicas: Vec<Practica>,
    pub sanciones: Vec<Sancion>,
}

/// Carga todas las tablas en paralelo (fan-out) y las junta en memoria
/// (fan-in). No hay requisito de orden entre tablas: el join ocurre después
/// de que llegan todos los resultados. Si una tabla falla, falla la carga
/// completa (el contrato del almacén es todo-o-error, nunca parciales).
pub async fn cargar_colecciones(
    almacen: Arc<dyn AlmacenTabular>,
) -> Result<Colecciones, Box<dyn Error>> {
    let a = almacen.clone();
    let estudiantes = tokio::task::spawn_blocking(move || {
        cargar_estudiantes(a.as_ref()).map_err(|e| e.to_string())
    });
    let a = almacen.clone();
    let instituciones = tokio::task::spawn_blocking(move || {
        cargar_instituciones(a.as_ref()).map_err(|e| e.to_string())
    });
    let a = almacen.clone();
    let lanzamientos = tokio::task::spawn_blocking(move || {
        cargar_lanzamientos(a.as_ref()).map_err(|e| e.to_string())
    });
    let a = almacen.clone();
    let convocatorias = tokio::task::spawn_blocking(move || {
        cargar_convocatorias(a.as_ref()).map_err(|e| e.to_string())
    });
    let a = almacen.clone();
    let practicas = tokio::task::spawn_blocking(move || {
        cargar_practicas(a.as_ref()).map_err(|e| e.to_string())
    });
    let a = almacen.clone();
    let sanciones = tokio::task::spawn_blocking(move || {
        cargar_sanciones(a.as_ref()).map_err(|e| e.to_string())
    });

    let (estudiantes, instituciones, lanzamientos, convocatorias, practicas, sanciones) = tokio::join!(
        estudiantes,
        instituciones,
        lanzamientos,
        convocatorias,
        practicas,
        sanciones
    );

    Ok(Colecciones {
        estudiantes: estudiantes??,
        instituciones: instituciones??,
        lanzamientos: lanzamientos??,
        convocatorias: convocatorias??,
        practicas: practicas??,
        sanciones: sanciones??,
    })
}
