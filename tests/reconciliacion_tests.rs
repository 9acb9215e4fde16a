use chrono::NaiveDate;

use ppslink::models::{Convocatoria, EstadoConvocatoria, EstadoGestion, Lanzamiento};
use ppslink::vinculos::matcher::PoliticaNombre;
use ppslink::vinculos::reconciliar;

fn fecha(s: &str) -> NaiveDate {
    ppslink::vinculos::normalizar::parse_fecha(s).expect("fecha de fixture válida")
}

fn lanzamiento(id: &str, nombre: &str, inicio: &str) -> Lanzamiento {
    Lanzamiento {
        id: id.to_string(),
        nombre: nombre.to_string(),
        fecha_inicio: Some(fecha(inicio)),
        fecha_fin: None,
        orientacion: None,
        cupos: 0,
        horas_acreditadas: 0,
        link_informe: None,
        estado_gestion: EstadoGestion::Pendiente,
        notas_gestion: None,
        fecha_relanzamiento: None,
    }
}

fn convocatoria(id: &str, link: Option<&str>, estado: EstadoConvocatoria) -> Convocatoria {
    Convocatoria {
        id: id.to_string(),
        lanzamiento_link: link.map(|s| s.to_string()),
        lanzamiento_nombre: None,
        lanzamiento_fecha: None,
        legajo: "T1".to_string(),
        estado,
        informe_entregado: false,
        fecha_entrega: None,
    }
}

#[test]
fn seleccionado_gana_sin_importar_el_orden() {
    let lanzamientos = vec![lanzamiento("L1", "Hospital X", "2024-03-01")];

    let en_un_orden = vec![
        convocatoria("E1", Some("L1"), EstadoConvocatoria::Inscripto),
        convocatoria("E2", Some("L1"), EstadoConvocatoria::Seleccionado),
    ];
    let resultado = reconciliar(&en_un_orden, &lanzamientos, PoliticaNombre::NombreGrupo);
    assert_eq!(resultado.canonicas["L1"].id, "E2");

    let en_el_otro = vec![
        convocatoria("E2", Some("L1"), EstadoConvocatoria::Seleccionado),
        convocatoria("E1", Some("L1"), EstadoConvocatoria::Inscripto),
    ];
    let resultado = reconciliar(&en_el_otro, &lanzamientos, PoliticaNombre::NombreGrupo);
    assert_eq!(resultado.canonicas["L1"].id, "E2");
}

#[test]
fn a_igual_prioridad_queda_la_primera() {
    let lanzamientos = vec![lanzamiento("L1", "Hospital X", "2024-03-01")];
    let convocatorias = vec![
        convocatoria("E1", Some("L1"), EstadoConvocatoria::Inscripto),
        convocatoria("E2", Some("L1"), EstadoConvocatoria::Inscripto),
    ];
    let resultado = reconciliar(&convocatorias, &lanzamientos, PoliticaNombre::NombreGrupo);
    assert_eq!(resultado.canonicas["L1"].id, "E1");
}

#[test]
fn el_estado_desconocido_pierde_contra_todos() {
    let lanzamientos = vec![lanzamiento("L1", "Hospital X", "2024-03-01")];
    let convocatorias = vec![
        convocatoria(
            "E1",
            Some("L1"),
            EstadoConvocatoria::Desconocido("en espera".into()),
        ),
        convocatoria("E2", Some("L1"), EstadoConvocatoria::NoSeleccionado),
    ];
    let resultado = reconciliar(&convocatorias, &lanzamientos, PoliticaNombre::NombreGrupo);
    assert_eq!(resultado.canonicas["L1"].id, "E2");
}

#[test]
fn resuelve_por_nombre_y_fecha_cuando_no_hay_link() {
    let lanzamientos = vec![
        lanzamiento("L1", "Hospital X - Turno Mañana", "2024-03-01"),
        lanzamiento("L2", "Clínica Z", "2024-03-01"),
    ];
    let mut sin_link = convocatoria("E1", None, EstadoConvocatoria::Seleccionado);
    sin_link.lanzamiento_nombre = Some("Hospital X".to_string());
    sin_link.lanzamiento_fecha = Some(fecha("2024-03-10"));

    let resultado = reconciliar(&[sin_link], &lanzamientos, PoliticaNombre::NombreGrupo);
    assert_eq!(resultado.canonicas["L1"].id, "E1");
    assert!(resultado.sin_vincular.is_empty());
}

#[test]
fn las_no_resueltas_quedan_en_sin_vincular() {
    let lanzamientos = vec![lanzamiento("L1", "Hospital X", "2024-03-01")];
    let mut lejana = convocatoria("E1", None, EstadoConvocatoria::Seleccionado);
    lejana.lanzamiento_nombre = Some("Hospital X".to_string());
    lejana.lanzamiento_fecha = Some(fecha("2024-09-01")); // fuera de tolerancia

    let resultado = reconciliar(&[lejana], &lanzamientos, PoliticaNombre::NombreGrupo);
    assert!(resultado.canonicas.is_empty());
    assert_eq!(resultado.sin_vincular.len(), 1);
    assert_eq!(resultado.sin_vincular[0].id, "E1");
}
