//! Generación del informe ejecutivo anual.

use chrono::NaiveDate;
use serde_json::json;

use crate::datos::Colecciones;
use crate::informes::guardar_informe;
use crate::vinculos::matcher::PoliticaNombre;
use crate::vinculos::metricas::{
    activos_en_fecha, aptos_acreditacion, cerca_de_completar, convenios_nuevos,
    estudiantes_sin_practica, lanzamientos_por_mes,
};
use crate::vinculos::practicas::resolver_vinculos_practicas;

/// Arma la foto ejecutiva del año: activos al día de corte, lanzamientos y
/// cupos por mes, convenios nuevos confirmados y los listados de cercanía a
/// completar / aptos para acreditar. El resultado se persiste como informe
/// (mejor-esfuerzo: si la DB de informes no está disponible, el informe
/// igual se devuelve).
pub fn generar_informe_ejecutivo(
    colecciones: &Colecciones,
    anio: i32,
    fecha_corte: NaiveDate,
    politica: PoliticaNombre,
) -> serde_json::Value {
    let vinculos = resolver_vinculos_practicas(
        &colecciones.practicas,
        &colecciones.lanzamientos,
        politica,
    );
    let activos = activos_en_fecha(&colecciones.estudiantes, fecha_corte);
    let sin_practica =
        estudiantes_sin_practica(&colecciones.estudiantes, &colecciones.practicas, &vinculos);
    let por_mes = lanzamientos_por_mes(&colecciones.lanzamientos, anio);
    let convenios = convenios_nuevos(&colecciones.instituciones, &colecciones.lanzamientos, anio);
    let cercanos = cerca_de_completar(&colecciones.estudiantes, &colecciones.practicas, fecha_corte);
    let aptos = aptos_acreditacion(&colecciones.estudiantes, &colecciones.practicas);

    let informe = json!({
        "anio": anio,
        "fecha_corte": fecha_corte.to_string(),
        "activos_al_corte": activos,
        "sin_practica": sin_practica,
        "lanzamientos_por_mes": por_mes,
        "convenios_nuevos": convenios,
        "cerca_de_completar": cercanos,
        "aptos_acreditacion": aptos,
    });

    let params = json!({"anio": anio, "fecha_corte": fecha_corte.to_string()});
    if let Err(e) = guardar_informe("ejecutivo", &params.to_string(), &informe.to_string()) {
        eprintln!("⚠️ no se pudo persistir el informe ejecutivo: {}", e);
    }

    informe
}
