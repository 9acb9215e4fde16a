//! Lectura de la tabla de Convocatorias (inscripciones).

use std::error::Error;

use crate::datos::campos::{convocatoria as campo, tablas};
use crate::datos::io::{
    campo_bool, campo_fecha, campo_str, primer_link, registro_valido, Registro,
};
use crate::datos::tabla::AlmacenTabular;
use crate::models::{parse_estado_convocatoria, Convocatoria, EstadoConvocatoria};

pub fn leer_convocatorias(registros: &[Registro]) -> Vec<Convocatoria> {
    let mut salida = Vec::new();
    for registro in registros {
        if !registro_valido(registro, &[campo::LEGAJO]) {
            eprintln!("⚠️ convocatoria {} sin legajo, se saltea", registro.id);
            continue;
        }
        let Some(legajo) = campo_str(registro, campo::LEGAJO) else {
            eprintln!("⚠️ convocatoria {} con legajo vacío, se saltea", registro.id);
            continue;
        };
        salida.push(Convocatoria {
            id: registro.id.clone(),
            lanzamiento_link: primer_link(registro, campo::LANZAMIENTO),
            lanzamiento_nombre: campo_str(registro, campo::LANZAMIENTO_NOMBRE),
            lanzamiento_fecha: campo_fecha(registro, campo::LANZAMIENTO_FECHA),
            legajo,
            estado: campo_str(registro, campo::ESTADO)
                .map(|e| parse_estado_convocatoria(&e))
                .unwrap_or(EstadoConvocatoria::Desconocido(String::new())),
            informe_entregado: campo_bool(registro, campo::INFORME_ENTREGADO),
            fecha_entrega: campo_fecha(registro, campo::FECHA_ENTREGA),
        });
    }
    salida
}

pub fn cargar_convocatorias(
    almacen: &dyn AlmacenTabular,
) -> Result<Vec<Convocatoria>, Box<dyn Error>> {
    let registros = almacen.buscar_todos(tablas::CONVOCATORIAS, None)?;
    Ok(leer_convocatorias(&registros))
}
