use chrono::NaiveDate;

use ppslink::models::{
    Convocatoria, EstadoConvocatoria, EstadoGestion, EstadoPractica, Lanzamiento, Nota, Practica,
};
use ppslink::vinculos::matcher::PoliticaNombre;
use ppslink::vinculos::{
    derivar_tareas, lanzamientos_completados, reconciliar, tareas_de_estudiante,
};

fn fecha(s: &str) -> NaiveDate {
    ppslink::vinculos::normalizar::parse_fecha(s).expect("fecha de fixture válida")
}

fn lanzamiento(id: &str, nombre: &str, inicio: &str, fin: Option<&str>, link: Option<&str>) -> Lanzamiento {
    Lanzamiento {
        id: id.to_string(),
        nombre: nombre.to_string(),
        fecha_inicio: Some(fecha(inicio)),
        fecha_fin: fin.map(fecha),
        orientacion: None,
        cupos: 0,
        horas_acreditadas: 0,
        link_informe: link.map(|s| s.to_string()),
        estado_gestion: EstadoGestion::Pendiente,
        notas_gestion: None,
        fecha_relanzamiento: None,
    }
}

fn convocatoria(id: &str, legajo: &str, link: &str, entregado: bool) -> Convocatoria {
    Convocatoria {
        id: id.to_string(),
        lanzamiento_link: Some(link.to_string()),
        lanzamiento_nombre: None,
        lanzamiento_fecha: None,
        legajo: legajo.to_string(),
        estado: EstadoConvocatoria::Seleccionado,
        informe_entregado: entregado,
        fecha_entrega: None,
    }
}

#[test]
fn escenario_punta_a_punta_una_tarea_pendiente() {
    // Un estudiante seleccionado en un lanzamiento con link de corrección y
    // sin prácticas: una sola tarea, pendiente, con el plazo del lanzamiento.
    let lanzamientos = vec![lanzamiento(
        "L1",
        "Hospital X - Tarde",
        "2024-03-01",
        Some("2024-07-01"),
        Some("http://x"),
    )];
    let convocatorias = vec![convocatoria("E1", "T1", "L1", false)];

    let tareas = tareas_de_estudiante(
        "T1",
        &convocatorias,
        &[],
        &lanzamientos,
        PoliticaNombre::NombreGrupo,
    );

    assert_eq!(tareas.len(), 1);
    let tarea = &tareas[0];
    assert_eq!(tarea.convocatoria_id.as_deref(), Some("E1"));
    assert!(!tarea.informe_entregado);
    assert_eq!(tarea.fecha_limite, Some(fecha("2024-07-01")));
    assert_eq!(tarea.link_informe, "http://x");
}

#[test]
fn sin_link_de_informe_no_hay_tarea() {
    let lanzamientos = vec![lanzamiento("L1", "Hospital X", "2024-03-01", None, None)];
    let convocatorias = vec![convocatoria("E1", "T1", "L1", false)];

    let tareas = tareas_de_estudiante(
        "T1",
        &convocatorias,
        &[],
        &lanzamientos,
        PoliticaNombre::NombreGrupo,
    );
    assert!(tareas.is_empty());
}

#[test]
fn orden_pendientes_primero_y_plazo_ascendente() {
    let lanzamientos = vec![
        lanzamiento("L1", "A", "2024-03-01", Some("2024-09-01"), Some("http://a")),
        lanzamiento("L2", "B", "2024-03-01", Some("2024-05-01"), Some("http://b")),
        lanzamiento("L3", "C", "2024-03-01", None, Some("http://c")),
        lanzamiento("L4", "D", "2024-03-01", Some("2024-04-01"), Some("http://d")),
    ];
    let convocatorias = vec![
        convocatoria("E1", "T1", "L1", false),
        convocatoria("E2", "T1", "L2", false),
        convocatoria("E3", "T1", "L3", false),
        convocatoria("E4", "T1", "L4", true), // ya entregada
    ];

    let tareas = tareas_de_estudiante(
        "T1",
        &convocatorias,
        &[],
        &lanzamientos,
        PoliticaNombre::NombreGrupo,
    );

    let ids: Vec<&str> = tareas.iter().map(|t| t.lanzamiento_id.as_str()).collect();
    // pendientes por plazo ascendente, sin plazo al final; la entregada cierra
    assert_eq!(ids, vec!["L2", "L1", "L3", "L4"]);
    let entregadas: Vec<bool> = tareas.iter().map(|t| t.informe_entregado).collect();
    assert_eq!(entregadas, vec![false, false, false, true]);
}

#[test]
fn practica_terminal_legada_genera_tarea_sin_convocatoria() {
    let lanzamientos = vec![lanzamiento(
        "L1",
        "Hospital X",
        "2024-03-01",
        Some("2024-07-01"),
        Some("http://x"),
    )];
    let practicas = vec![Practica {
        id: "P1".to_string(),
        lanzamiento_link: Some("L1".to_string()),
        institucion_nombre: None,
        orientacion: None,
        fecha_inicio: None,
        fecha_fin: None,
        legajos: vec!["T1".to_string()],
        horas: 120,
        estado: EstadoPractica::Finalizada,
        nota: Nota::EntregadoSinCorregir,
        informe_entregado: true,
    }];

    let tareas = tareas_de_estudiante(
        "T1",
        &[],
        &practicas,
        &lanzamientos,
        PoliticaNombre::NombreGrupo,
    );

    assert_eq!(tareas.len(), 1);
    let tarea = &tareas[0];
    assert_eq!(tarea.convocatoria_id, None);
    assert_eq!(tarea.practica_id.as_deref(), Some("P1"));
    assert!(tarea.informe_entregado);
    assert_eq!(tarea.nota, Some(Nota::EntregadoSinCorregir));
}

#[test]
fn la_convocatoria_tiene_precedencia_sobre_la_practica() {
    // Mismo lanzamiento alcanzado por las dos fuentes: se emite una sola
    // tarea, la de la convocatoria, pero con la nota de la práctica.
    let lanzamientos = vec![lanzamiento(
        "L1",
        "Hospital X",
        "2024-03-01",
        Some("2024-07-01"),
        Some("http://x"),
    )];
    let convocatorias = vec![convocatoria("E1", "T1", "L1", false)];
    let practicas = vec![Practica {
        id: "P1".to_string(),
        lanzamiento_link: Some("L1".to_string()),
        institucion_nombre: None,
        orientacion: None,
        fecha_inicio: None,
        fecha_fin: None,
        legajos: vec!["T1".to_string()],
        horas: 120,
        estado: EstadoPractica::PpsRealizada,
        nota: Nota::Numerica(8.0),
        informe_entregado: true,
    }];

    let reconciliacion = reconciliar(&convocatorias, &lanzamientos, PoliticaNombre::NombreGrupo);
    let completados =
        lanzamientos_completados(&practicas, &lanzamientos, PoliticaNombre::NombreGrupo);
    let tareas = derivar_tareas(
        &reconciliacion.canonicas,
        &completados,
        &practicas,
        &lanzamientos,
        PoliticaNombre::NombreGrupo,
    );

    assert_eq!(tareas.len(), 1);
    assert_eq!(tareas[0].convocatoria_id.as_deref(), Some("E1"));
    assert_eq!(tareas[0].practica_id.as_deref(), Some("P1"));
    assert_eq!(tareas[0].nota, Some(Nota::Numerica(8.0)));
    // el flag de entrega sale de la convocatoria, no de la práctica
    assert!(!tareas[0].informe_entregado);
}
