//! Lectura de la tabla de Sanciones.

use std::error::Error;

use crate::datos::campos::{sancion as campo, tablas};
use crate::datos::io::{campo_f64, campo_fecha, campo_str, primer_link, registro_valido, Registro};
use crate::datos::tabla::AlmacenTabular;
use crate::models::{parse_tipo_sancion, Sancion, TipoSancion};

pub fn leer_sanciones(registros: &[Registro]) -> Vec<Sancion> {
    let mut salida = Vec::new();
    for registro in registros {
        if !registro_valido(registro, &[campo::LEGAJO]) {
            eprintln!("⚠️ sanción {} sin legajo, se saltea", registro.id);
            continue;
        }
        let Some(legajo) = campo_str(registro, campo::LEGAJO) else {
            eprintln!("⚠️ sanción {} con legajo vacío, se saltea", registro.id);
            continue;
        };
        salida.push(Sancion {
            id: registro.id.clone(),
            legajo,
            lanzamiento_link: primer_link(registro, campo::LANZAMIENTO),
            tipo: campo_str(registro, campo::TIPO)
                .map(|t| parse_tipo_sancion(&t))
                .unwrap_or(TipoSancion::Desconocido(String::new())),
            fecha: campo_fecha(registro, campo::FECHA),
            notas: campo_str(registro, campo::NOTAS),
            puntaje: campo_f64(registro, campo::PUNTAJE).unwrap_or(0.0) as i32,
        });
    }
    salida
}

pub fn cargar_sanciones(almacen: &dyn AlmacenTabular) -> Result<Vec<Sancion>, Box<dyn Error>> {
    let registros = almacen.buscar_todos(tablas::SANCIONES, None)?;
    Ok(leer_sanciones(&registros))
}
