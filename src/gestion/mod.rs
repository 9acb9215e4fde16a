//! Operaciones de gestión con efectos sobre el almacén externo.
//!
//! Ninguna de estas operaciones es transaccional: son secuencias
//! mejor-esfuerzo. Si un paso falla, lo ya escrito queda escrito; el fallo
//! se loguea, se cuenta y se sigue. El resultado informa cuántas de las N
//! escrituras salieron bien para que la UI lo notifique.

use std::error::Error;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::datos::campos::{convocatoria, lanzamiento, practica, sancion, tablas};
use crate::datos::io::{campo_lista, campo_str};
use crate::datos::tabla::{AlmacenTabular, ResultadoLote};
use crate::models::{EstadoGestion, Lanzamiento};

/// Pedido de alta de sanción que llega de la UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolicitudSancion {
    pub legajo: String,
    pub lanzamiento_id: Option<String>,
    pub tipo: String,
    pub fecha: Option<String>,
    pub notas: Option<String>,
    pub puntaje: i32,
}

/// Resultado de aplicar una sanción: id del registro creado más el conteo
/// de las escrituras laterales.
#[derive(Debug)]
pub struct AplicacionSancion {
    pub sancion_id: String,
    pub lote: ResultadoLote,
}

/// Crea el registro de sanción y vincula la sanción en las convocatorias y
/// prácticas del legajo afectado (las del lanzamiento sancionado, si se
/// indicó uno; todas las del legajo si no). El alta de la sanción es la
/// única operación que aborta: las vinculaciones posteriores son
/// mejor-esfuerzo y no se deshacen.
pub fn aplicar_sancion(
    almacen: &dyn AlmacenTabular,
    solicitud: &SolicitudSancion,
) -> Result<AplicacionSancion, Box<dyn Error>> {
    let mut fields = Map::new();
    fields.insert(sancion::LEGAJO.to_string(), json!(solicitud.legajo));
    fields.insert(sancion::TIPO.to_string(), json!(solicitud.tipo));
    fields.insert(sancion::PUNTAJE.to_string(), json!(solicitud.puntaje));
    if let Some(ref lanzamiento_id) = solicitud.lanzamiento_id {
        fields.insert(sancion::LANZAMIENTO.to_string(), json!([lanzamiento_id]));
    }
    if let Some(ref fecha) = solicitud.fecha {
        fields.insert(sancion::FECHA.to_string(), json!(fecha));
    }
    if let Some(ref notas) = solicitud.notas {
        fields.insert(sancion::NOTAS.to_string(), json!(notas));
    }

    let creado = almacen.crear(tablas::SANCIONES, fields)?;
    let mut lote = ResultadoLote::default();

    vincular_sancion(
        almacen,
        tablas::CONVOCATORIAS,
        convocatoria::LEGAJO,
        convocatoria::LANZAMIENTO,
        convocatoria::SANCION,
        solicitud,
        &creado.id,
        &mut lote,
    );
    vincular_sancion(
        almacen,
        tablas::PRACTICAS,
        practica::LEGAJOS,
        practica::LANZAMIENTO,
        practica::SANCION,
        solicitud,
        &creado.id,
        &mut lote,
    );

    Ok(AplicacionSancion {
        sancion_id: creado.id,
        lote,
    })
}

#[allow(clippy::too_many_arguments)]
fn vincular_sancion(
    almacen: &dyn AlmacenTabular,
    tabla: &str,
    campo_legajo: &str,
    campo_lanzamiento: &str,
    campo_sancion: &str,
    solicitud: &SolicitudSancion,
    sancion_id: &str,
    lote: &mut ResultadoLote,
) {
    let registros = match almacen.buscar_todos(tabla, None) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("⚠️ no se pudieron leer {} para vincular sanción: {}", tabla, e);
            lote.fallos += 1;
            return;
        }
    };

    for registro in registros {
        let del_legajo = campo_str(&registro, campo_legajo)
            .map(|l| l == solicitud.legajo)
            .unwrap_or(false)
            || campo_lista(&registro, campo_legajo)
                .iter()
                .any(|l| l == &solicitud.legajo);
        if !del_legajo {
            continue;
        }
        if let Some(ref lanzamiento_id) = solicitud.lanzamiento_id {
            let vinculados = campo_lista(&registro, campo_lanzamiento);
            if !vinculados.iter().any(|v| v == lanzamiento_id) {
                continue;
            }
        }

        let mut cambio = Map::new();
        cambio.insert(campo_sancion.to_string(), json!([sancion_id]));
        match almacen.actualizar(tabla, &registro.id, cambio) {
            Ok(_) => lote.exitos += 1,
            Err(e) => {
                eprintln!("⚠️ fallo vinculando sanción en {} {}: {}", tabla, registro.id, e);
                lote.fallos += 1;
            }
        }
    }
}

/// Archiva los lanzamientos marcados "No relanzar" cuya fecha de fin ya
/// pasó. Lote mejor-esfuerzo en tandas de 10; devuelve el conteo para la
/// notificación de la UI.
pub fn archivar_no_relanzadas(
    almacen: &dyn AlmacenTabular,
    lanzamientos: &[Lanzamiento],
    hoy: NaiveDate,
) -> ResultadoLote {
    let cambios: Vec<(String, Map<String, Value>)> = lanzamientos
        .iter()
        .filter(|l| l.estado_gestion == EstadoGestion::NoRelanzar)
        .filter(|l| l.fecha_fin.map(|f| f < hoy).unwrap_or(false))
        .map(|l| {
            let mut fields = Map::new();
            fields.insert(lanzamiento::ESTADO_GESTION.to_string(), json!("Archivado"));
            (l.id.clone(), fields)
        })
        .collect();

    if cambios.is_empty() {
        return ResultadoLote::default();
    }
    almacen.actualizar_lote(tablas::LANZAMIENTOS, &cambios)
}

/// Actualiza el teléfono de contacto de una institución (el único campo de
/// instituciones que este sistema escribe).
pub fn actualizar_telefono(
    almacen: &dyn AlmacenTabular,
    institucion_id: &str,
    telefono: &str,
) -> Result<(), Box<dyn Error>> {
    let mut fields = Map::new();
    fields.insert(
        crate::datos::campos::institucion::TELEFONO.to_string(),
        json!(telefono),
    );
    almacen.actualizar(tablas::INSTITUCIONES, institucion_id, fields)?;
    Ok(())
}
