//! Lectura de la tabla de Instituciones.

use std::error::Error;

use crate::datos::campos::{institucion as campo, tablas};
use crate::datos::io::{campo_bool, campo_str, registro_valido, Registro};
use crate::datos::tabla::AlmacenTabular;
use crate::models::Institucion;

pub fn leer_instituciones(registros: &[Registro]) -> Vec<Institucion> {
    let mut salida = Vec::new();
    for registro in registros {
        if !registro_valido(registro, &[campo::NOMBRE]) {
            eprintln!("⚠️ institución {} sin nombre, se saltea", registro.id);
            continue;
        }
        let Some(nombre) = campo_str(registro, campo::NOMBRE) else {
            eprintln!("⚠️ institución {} con nombre vacío, se saltea", registro.id);
            continue;
        };
        salida.push(Institucion {
            id: registro.id.clone(),
            nombre,
            telefono: campo_str(registro, campo::TELEFONO),
            convenio_nuevo: campo_bool(registro, campo::CONVENIO_NUEVO),
            direccion: campo_str(registro, campo::DIRECCION),
        });
    }
    salida
}

pub fn cargar_instituciones(
    almacen: &dyn AlmacenTabular,
) -> Result<Vec<Institucion>, Box<dyn Error>> {
    let registros = almacen.buscar_todos(tablas::INSTITUCIONES, None)?;
    Ok(leer_instituciones(&registros))
}
