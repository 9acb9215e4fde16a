use chrono::NaiveDate;

use ppslink::models::{EstadoGestion, EstadoPractica, Estudiante, Institucion, Lanzamiento, Nota, Practica};
use ppslink::vinculos::matcher::PoliticaNombre;
use ppslink::vinculos::metricas::{
    activos_en_fecha, aptos_acreditacion, cerca_de_completar, convenios_nuevos,
    estudiantes_activos, estudiantes_con_practica_activa, estudiantes_sin_practica,
    lanzamientos_por_mes,
};
use ppslink::vinculos::resolver_vinculos_practicas;

fn fecha(s: &str) -> NaiveDate {
    ppslink::vinculos::normalizar::parse_fecha(s).expect("fecha de fixture válida")
}

fn estudiante(legajo: &str, finalizado: bool) -> Estudiante {
    Estudiante {
        id: format!("rec{}", legajo),
        legajo: legajo.to_string(),
        nombre: format!("Estudiante {}", legajo),
        orientacion: None,
        finalizado,
        fecha_creacion: Some(fecha("2022-03-01")),
        fecha_finalizacion: None,
    }
}

fn lanzamiento(id: &str, nombre: &str, inicio: &str, cupos: u32) -> Lanzamiento {
    Lanzamiento {
        id: id.to_string(),
        nombre: nombre.to_string(),
        fecha_inicio: Some(fecha(inicio)),
        fecha_fin: None,
        orientacion: None,
        cupos,
        horas_acreditadas: 0,
        link_informe: None,
        estado_gestion: EstadoGestion::Pendiente,
        notas_gestion: None,
        fecha_relanzamiento: None,
    }
}

fn practica(legajo: &str, orientacion: &str, horas: u32, inicio: &str, fin: Option<&str>) -> Practica {
    Practica {
        id: format!("P-{}-{}-{}", legajo, orientacion, horas),
        lanzamiento_link: None,
        institucion_nombre: None,
        orientacion: Some(orientacion.to_string()),
        fecha_inicio: Some(fecha(inicio)),
        fecha_fin: fin.map(fecha),
        legajos: vec![legajo.to_string()],
        horas,
        estado: EstadoPractica::EnCurso,
        nota: Nota::SinCalificar,
        informe_entregado: false,
    }
}

fn institucion(id: &str, nombre: &str, convenio_nuevo: bool) -> Institucion {
    Institucion {
        id: id.to_string(),
        nombre: nombre.to_string(),
        telefono: None,
        convenio_nuevo,
        direccion: None,
    }
}

#[test]
fn activos_en_vivo_ignora_fechas() {
    let estudiantes = vec![estudiante("T1", false), estudiante("T2", true)];
    let metrica = estudiantes_activos(&estudiantes);
    assert_eq!(metrica.valor, 1);
    assert!(metrica.lista[0].nombre.contains("T1"));
}

#[test]
fn activos_al_corte_exige_ventana_de_fechas() {
    let corte = fecha("2024-06-30");

    let mut creado_despues = estudiante("T1", false);
    creado_despues.fecha_creacion = Some(fecha("2024-09-01"));

    let mut finalizado_antes = estudiante("T2", true);
    finalizado_antes.fecha_finalizacion = Some(fecha("2024-01-15"));

    let mut finalizado_despues = estudiante("T3", true);
    finalizado_despues.fecha_finalizacion = Some(fecha("2024-12-01"));

    // finalizado sin fecha: no se puede establecer actividad al corte
    let finalizado_sin_fecha = estudiante("T4", true);

    let vigente = estudiante("T5", false);

    let estudiantes = vec![
        creado_despues,
        finalizado_antes,
        finalizado_despues,
        finalizado_sin_fecha,
        vigente,
    ];
    let metrica = activos_en_fecha(&estudiantes, corte);
    let nombres: Vec<&str> = metrica.lista.iter().map(|i| i.nombre.as_str()).collect();
    assert_eq!(metrica.valor, 2);
    assert!(nombres.iter().any(|n| n.contains("T3")));
    assert!(nombres.iter().any(|n| n.contains("T5")));
}

#[test]
fn sin_practica_cuenta_cualquier_vinculo_resuelto() {
    let lanzamientos = vec![lanzamiento("L1", "Hospital X", "2024-03-01", 5)];
    let estudiantes = vec![estudiante("T1", false), estudiante("T2", false)];

    // práctica en curso (no terminal) de T1, vinculable por institución+fecha
    let mut en_curso = practica("T1", "Clínica", 50, "2024-03-05", None);
    en_curso.institucion_nombre = Some("Hospital X".to_string());
    en_curso.orientacion = None;
    let practicas = vec![en_curso];

    let vinculos =
        resolver_vinculos_practicas(&practicas, &lanzamientos, PoliticaNombre::NombreGrupo);
    let metrica = estudiantes_sin_practica(&estudiantes, &practicas, &vinculos);
    assert_eq!(metrica.valor, 1);
    assert!(metrica.lista[0].nombre.contains("T2"));
}

#[test]
fn practica_activa_por_fin_futuro_o_inicio_pasado() {
    let hoy = fecha("2024-06-15");
    let estudiantes = vec![
        estudiante("T1", false),
        estudiante("T2", false),
        estudiante("T3", false),
    ];
    let practicas = vec![
        practica("T1", "Clínica", 50, "2024-03-01", Some("2024-12-01")), // fin futuro
        practica("T2", "Clínica", 50, "2024-03-01", Some("2024-05-01")), // ya terminó
        practica("T3", "Clínica", 50, "2024-06-01", None),               // abierta, ya empezó
    ];

    let metrica = estudiantes_con_practica_activa(&estudiantes, &practicas, hoy);
    let nombres: Vec<&str> = metrica.lista.iter().map(|i| i.nombre.as_str()).collect();
    assert_eq!(metrica.valor, 2);
    assert!(nombres.iter().any(|n| n.contains("T1")));
    assert!(nombres.iter().any(|n| n.contains("T3")));
}

#[test]
fn cercania_y_acreditacion() {
    let hoy = fecha("2024-06-15");
    let estudiantes = vec![
        estudiante("T1", false), // 240 hs, una orientación
        estudiante("T2", false), // 260 hs, tres orientaciones
        estudiante("T3", false), // 100 hs
    ];
    let practicas = vec![
        practica("T1", "Clínica", 240, "2023-03-01", Some("2023-12-01")),
        practica("T2", "Clínica", 100, "2023-03-01", Some("2023-07-01")),
        practica("T2", "Educacional", 80, "2023-08-01", Some("2023-12-01")),
        practica("T2", "Laboral", 80, "2024-03-01", Some("2024-12-01")),
        practica("T3", "Clínica", 100, "2024-03-01", Some("2024-12-01")),
    ];

    let cercanos = cerca_de_completar(&estudiantes, &practicas, hoy);
    let nombres: Vec<&str> = cercanos.lista.iter().map(|i| i.nombre.as_str()).collect();
    assert_eq!(cercanos.valor, 2);
    assert!(nombres.iter().any(|n| n.contains("T1")));
    assert!(nombres.iter().any(|n| n.contains("T2")));

    let aptos = aptos_acreditacion(&estudiantes, &practicas);
    assert_eq!(aptos.valor, 1);
    assert!(aptos.lista[0].nombre.contains("T2"));
    assert_eq!(aptos.lista[0].detalle.as_deref(), Some("260 horas"));
}

#[test]
fn variantes_del_mismo_grupo_suman_cupos_en_una_entrada() {
    let lanzamientos = vec![
        lanzamiento("L1", "Hospital X - Turno Mañana", "2024-03-04", 5),
        lanzamiento("L2", "Hospital X - Turno Tarde", "2024-03-18", 3),
        lanzamiento("L3", "Clínica Z", "2024-03-10", 4),
        lanzamiento("L4", "Hospital X - Turno Mañana", "2023-03-04", 9), // otro año
    ];

    let resumen = lanzamientos_por_mes(&lanzamientos, 2024);
    assert_eq!(resumen.len(), 1);
    let marzo = &resumen[0];
    assert_eq!(marzo.mes, 3);
    assert_eq!(marzo.total_cupos, 12);
    assert_eq!(marzo.grupos.len(), 2);

    let hospital = marzo
        .grupos
        .iter()
        .find(|g| g.grupo == "Hospital X")
        .expect("grupo Hospital X");
    assert_eq!(hospital.cupos, 8);
    assert_eq!(hospital.variantes, 2);
}

#[test]
fn convenio_nuevo_respeta_la_fecha_de_corte_fija() {
    let instituciones = vec![
        institucion("I1", "Hospital X", true),
        institucion("I2", "Clínica Z", true),
        institucion("I3", "Fundación W", false),
    ];
    let lanzamientos = vec![
        // Hospital X arranca antes del 1/8/2024: no cuenta aunque tenga la marca
        lanzamiento("L1", "Hospital X - Turno Mañana", "2024-07-15", 5),
        lanzamiento("L2", "Hospital X - Turno Tarde", "2024-09-01", 5),
        // Clínica Z arranca después del corte: cuenta
        lanzamiento("L3", "Clínica Z", "2024-09-10", 4),
        // Fundación W sin marca: no cuenta aunque la fecha dé
        lanzamiento("L4", "Fundación W", "2024-10-01", 4),
    ];

    let metrica = convenios_nuevos(&instituciones, &lanzamientos, 2024);
    assert_eq!(metrica.valor, 1);
    assert_eq!(metrica.lista[0].nombre, "Clínica Z");
}
