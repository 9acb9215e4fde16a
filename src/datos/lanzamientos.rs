//! Lectura de la tabla de Lanzamientos PPS.

use std::error::Error;

use crate::datos::campos::{lanzamiento as campo, tablas};
use crate::datos::io::{campo_fecha, campo_str, campo_u32, registro_valido, Registro};
use crate::datos::tabla::AlmacenTabular;
use crate::models::{parse_estado_gestion, EstadoGestion, Lanzamiento};

pub fn leer_lanzamientos(registros: &[Registro]) -> Vec<Lanzamiento> {
    let mut salida = Vec::new();
    for registro in registros {
        if !registro_valido(registro, &[campo::NOMBRE]) {
            eprintln!("⚠️ lanzamiento {} sin nombre, se saltea", registro.id);
            continue;
        }
        let Some(nombre) = campo_str(registro, campo::NOMBRE) else {
            eprintln!("⚠️ lanzamiento {} con nombre vacío, se saltea", registro.id);
            continue;
        };
        salida.push(Lanzamiento {
            id: registro.id.clone(),
            nombre,
            fecha_inicio: campo_fecha(registro, campo::FECHA_INICIO),
            fecha_fin: campo_fecha(registro, campo::FECHA_FIN),
            orientacion: campo_str(registro, campo::ORIENTACION),
            cupos: campo_u32(registro, campo::CUPOS),
            horas_acreditadas: campo_u32(registro, campo::HORAS),
            link_informe: campo_str(registro, campo::LINK_INFORME),
            estado_gestion: campo_str(registro, campo::ESTADO_GESTION)
                .map(|e| parse_estado_gestion(&e))
                .unwrap_or(EstadoGestion::Pendiente),
            notas_gestion: campo_str(registro, campo::NOTAS_GESTION),
            fecha_relanzamiento: campo_fecha(registro, campo::FECHA_RELANZAMIENTO),
        });
    }
    salida
}

pub fn cargar_lanzamientos(
    almacen: &dyn AlmacenTabular,
) -> Result<Vec<Lanzamiento>, Box<dyn Error>> {
    let registros = almacen.buscar_todos(tablas::LANZAMIENTOS, None)?;
    Ok(leer_lanzamientos(&registros))
}
