//! Lectura de la tabla de Estudiantes.

use std::error::Error;

use crate::datos::campos::{estudiante as campo, tablas};
use crate::datos::io::{campo_bool, campo_fecha, campo_str, registro_valido, Registro};
use crate::datos::tabla::AlmacenTabular;
use crate::models::{parse_orientacion, Estudiante};

/// Convierte registros crudos en estudiantes. Un registro sin legajo no
/// identifica a nadie: se saltea con aviso en vez de abortar la carga.
pub fn leer_estudiantes(registros: &[Registro]) -> Vec<Estudiante> {
    let mut salida = Vec::new();
    for registro in registros {
        if !registro_valido(registro, &[campo::LEGAJO]) {
            eprintln!("⚠️ estudiante {} sin legajo, se saltea", registro.id);
            continue;
        }
        let Some(legajo) = campo_str(registro, campo::LEGAJO) else {
            eprintln!("⚠️ estudiante {} con legajo vacío, se saltea", registro.id);
            continue;
        };
        salida.push(Estudiante {
            id: registro.id.clone(),
            legajo,
            nombre: campo_str(registro, campo::NOMBRE).unwrap_or_default(),
            orientacion: campo_str(registro, campo::ORIENTACION)
                .and_then(|o| parse_orientacion(&o)),
            finalizado: campo_bool(registro, campo::FINALIZADO),
            fecha_creacion: campo_fecha(registro, campo::FECHA_CREACION),
            fecha_finalizacion: campo_fecha(registro, campo::FECHA_FINALIZACION),
        });
    }
    salida
}

pub fn cargar_estudiantes(almacen: &dyn AlmacenTabular) -> Result<Vec<Estudiante>, Box<dyn Error>> {
    let registros = almacen.buscar_todos(tablas::ESTUDIANTES, None)?;
    Ok(leer_estudiantes(&registros))
}
