//! Lectura de la tabla de Prácticas.

use std::error::Error;

use crate::datos::campos::{practica as campo, tablas};
use crate::datos::io::{
    campo_bool, campo_fecha, campo_lista, campo_str, campo_u32, primer_link, registro_valido,
    Registro,
};
use crate::datos::tabla::AlmacenTabular;
use crate::models::{parse_estado_practica, parse_nota, EstadoPractica, Nota, Practica};

pub fn leer_practicas(registros: &[Registro]) -> Vec<Practica> {
    let mut salida = Vec::new();
    for registro in registros {
        if !registro_valido(registro, &[campo::LEGAJOS]) {
            eprintln!("⚠️ práctica {} sin legajos, se saltea", registro.id);
            continue;
        }
        let legajos = campo_lista(registro, campo::LEGAJOS);
        if legajos.is_empty() {
            eprintln!("⚠️ práctica {} con legajos vacíos, se saltea", registro.id);
            continue;
        }
        salida.push(Practica {
            id: registro.id.clone(),
            lanzamiento_link: primer_link(registro, campo::LANZAMIENTO),
            institucion_nombre: campo_str(registro, campo::INSTITUCION),
            orientacion: campo_str(registro, campo::ORIENTACION),
            fecha_inicio: campo_fecha(registro, campo::FECHA_INICIO),
            fecha_fin: campo_fecha(registro, campo::FECHA_FIN),
            legajos,
            horas: campo_u32(registro, campo::HORAS),
            estado: campo_str(registro, campo::ESTADO)
                .map(|e| parse_estado_practica(&e))
                .unwrap_or(EstadoPractica::Desconocido(String::new())),
            nota: campo_str(registro, campo::NOTA)
                .map(|n| parse_nota(&n))
                .unwrap_or(Nota::SinCalificar),
            informe_entregado: campo_bool(registro, campo::INFORME_ENTREGADO),
        });
    }
    salida
}

pub fn cargar_practicas(almacen: &dyn AlmacenTabular) -> Result<Vec<Practica>, Box<dyn Error>> {
    let registros = almacen.buscar_todos(tablas::PRACTICAS, None)?;
    Ok(leer_practicas(&registros))
}
