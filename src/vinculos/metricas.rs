//! Agregador de métricas de cohortes para tablero e informes ejecutivos.
//!
//! Todas las funciones son puras sobre colecciones ya cargadas: reciben
//! `hoy`/`anio` como parámetros y no escriben nada. Cada métrica de tarjeta
//! devuelve un par `{valor, lista}` con las entidades que la componen.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{Estudiante, Institucion, Lanzamiento, Practica};
use crate::vinculos::matcher::PoliticaNombre;
use crate::vinculos::normalizar::{nombre_grupo, normalizar_clave};
use crate::vinculos::practicas::resolver_vinculos_practicas;

/// Horas acumuladas a partir de las cuales un estudiante está "cerca de
/// completar" el recorrido.
pub const HORAS_CERCANIA: u32 = 230;
/// Horas totales exigidas para la acreditación.
pub const HORAS_ACREDITACION: u32 = 250;
/// Rotación mínima: orientaciones distintas requeridas entre prácticas.
pub const ROTACIONES_MINIMAS: usize = 3;

/// Fecha de corte para contar convenios nuevos confirmados. Regla de
/// negocio fija de los reportes: no se deriva del año objetivo.
pub fn fecha_corte_convenios() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, 1).expect("fecha fija valida")
}

#[derive(Debug, Clone, Serialize)]
pub struct InfoEntidad {
    pub id: String,
    pub nombre: String,
    pub detalle: Option<String>,
}

/// Par valor+lista de una tarjeta del tablero.
#[derive(Debug, Clone, Serialize)]
pub struct Metrica {
    pub valor: usize,
    pub lista: Vec<InfoEntidad>,
}

impl Metrica {
    fn desde(lista: Vec<InfoEntidad>) -> Metrica {
        Metrica {
            valor: lista.len(),
            lista,
        }
    }
}

fn info_estudiante(e: &Estudiante, detalle: Option<String>) -> InfoEntidad {
    InfoEntidad {
        id: e.id.clone(),
        nombre: format!("{} ({})", e.nombre, e.legajo),
        detalle,
    }
}

/// Estudiantes activos del tablero en vivo: `finalizado` falso, sin mirar
/// fechas. No unificar con `activos_en_fecha`: responden preguntas
/// distintas ("activo ahora" vs "estaba activo al día X").
pub fn estudiantes_activos(estudiantes: &[Estudiante]) -> Metrica {
    let lista = estudiantes
        .iter()
        .filter(|e| !e.finalizado)
        .map(|e| info_estudiante(e, None))
        .collect();
    Metrica::desde(lista)
}

/// Variante "foto al día": activo si fue creado en o antes del corte y, de
/// estar finalizado, su fecha de finalización es posterior o igual al
/// corte. Finalizado sin fecha de finalización queda excluido (no se puede
/// establecer actividad al corte).
pub fn activos_en_fecha(estudiantes: &[Estudiante], corte: NaiveDate) -> Metrica {
    let lista = estudiantes
        .iter()
        .filter(|e| {
            let creado_antes = match e.fecha_creacion {
                Some(f) => f <= corte,
                None => false,
            };
            if !creado_antes {
                return false;
            }
            if !e.finalizado {
                return true;
            }
            match e.fecha_finalizacion {
                Some(f) => f >= corte,
                None => false,
            }
        })
        .map(|e| info_estudiante(e, None))
        .collect();
    Metrica::desde(lista)
}

/// Suma de horas de práctica por legajo (todas las prácticas del legajo,
/// vinculables o no).
pub fn horas_por_legajo(practicas: &[Practica]) -> HashMap<String, u32> {
    let mut horas: HashMap<String, u32> = HashMap::new();
    for practica in practicas {
        for legajo in &practica.legajos {
            *horas.entry(legajo.clone()).or_default() += practica.horas;
        }
    }
    horas
}

/// Una práctica está activa si su fin es futuro, o si no tiene fin y su
/// inicio ya pasó (o es hoy).
pub fn practica_activa(practica: &Practica, hoy: NaiveDate) -> bool {
    match (practica.fecha_inicio, practica.fecha_fin) {
        (_, Some(fin)) => fin > hoy,
        (Some(inicio), None) => inicio <= hoy,
        (None, None) => false,
    }
}

fn tiene_practica_activa(legajo: &str, practicas: &[Practica], hoy: NaiveDate) -> bool {
    practicas
        .iter()
        .any(|p| p.legajos.iter().any(|l| l == legajo) && practica_activa(p, hoy))
}

/// Estudiantes activos sin ninguna práctica vinculada. Cuenta cualquier
/// práctica que haya resuelto a un lanzamiento, sin exigir estado terminal.
pub fn estudiantes_sin_practica(
    estudiantes: &[Estudiante],
    practicas: &[Practica],
    vinculos: &HashMap<String, String>,
) -> Metrica {
    let mut con_practica: HashSet<&str> = HashSet::new();
    for practica in practicas {
        if vinculos.contains_key(&practica.id) {
            for legajo in &practica.legajos {
                con_practica.insert(legajo.as_str());
            }
        }
    }
    let lista = estudiantes
        .iter()
        .filter(|e| !e.finalizado && !con_practica.contains(e.legajo.as_str()))
        .map(|e| info_estudiante(e, None))
        .collect();
    Metrica::desde(lista)
}

/// Estudiantes activos cursando una práctica en este momento.
pub fn estudiantes_con_practica_activa(
    estudiantes: &[Estudiante],
    practicas: &[Practica],
    hoy: NaiveDate,
) -> Metrica {
    let lista = estudiantes
        .iter()
        .filter(|e| !e.finalizado && tiene_practica_activa(&e.legajo, practicas, hoy))
        .map(|e| info_estudiante(e, None))
        .collect();
    Metrica::desde(lista)
}

/// Estudiantes cerca de completar: horas acumuladas ≥ 230, o ≥ 250 con una
/// práctica activa en curso.
pub fn cerca_de_completar(
    estudiantes: &[Estudiante],
    practicas: &[Practica],
    hoy: NaiveDate,
) -> Metrica {
    let horas = horas_por_legajo(practicas);
    let lista = estudiantes
        .iter()
        .filter(|e| {
            if e.finalizado {
                return false;
            }
            let total = horas.get(&e.legajo).copied().unwrap_or(0);
            total >= HORAS_CERCANIA
                || (total >= HORAS_ACREDITACION
                    && tiene_practica_activa(&e.legajo, practicas, hoy))
        })
        .map(|e| {
            let total = horas.get(&e.legajo).copied().unwrap_or(0);
            info_estudiante(e, Some(format!("{} horas", total)))
        })
        .collect();
    Metrica::desde(lista)
}

/// Estudiantes en condiciones de acreditar: ≥ 250 horas y al menos 3
/// orientaciones distintas (normalizadas) entre sus prácticas (requisito de
/// rotación).
pub fn aptos_acreditacion(estudiantes: &[Estudiante], practicas: &[Practica]) -> Metrica {
    let horas = horas_por_legajo(practicas);
    let lista = estudiantes
        .iter()
        .filter(|e| {
            if e.finalizado {
                return false;
            }
            if horas.get(&e.legajo).copied().unwrap_or(0) < HORAS_ACREDITACION {
                return false;
            }
            let rotaciones: HashSet<String> = practicas
                .iter()
                .filter(|p| p.legajos.iter().any(|l| l == &e.legajo))
                .filter_map(|p| p.orientacion.as_deref())
                .map(normalizar_clave)
                .filter(|o| !o.is_empty())
                .collect();
            rotaciones.len() >= ROTACIONES_MINIMAS
        })
        .map(|e| {
            let total = horas.get(&e.legajo).copied().unwrap_or(0);
            info_estudiante(e, Some(format!("{} horas", total)))
        })
        .collect();
    Metrica::desde(lista)
}

/// Grupo institucional dentro de un mes: las variantes horarias del mismo
/// grupo se colapsan en una sola entrada y los cupos se suman crudos.
#[derive(Debug, Clone, Serialize)]
pub struct GrupoMes {
    pub grupo: String,
    pub cupos: u32,
    pub variantes: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumenMes {
    pub mes: u32,
    pub grupos: Vec<GrupoMes>,
    pub total_cupos: u32,
}

/// Lanzamientos nuevos del año, agrupados por mes y por nombre de grupo
/// (no por nombre completo) para no contar dos veces las variantes de
/// turno de la misma institución-mes.
pub fn lanzamientos_por_mes(lanzamientos: &[Lanzamiento], anio: i32) -> Vec<ResumenMes> {
    let mut por_mes: BTreeMap<u32, Vec<GrupoMes>> = BTreeMap::new();

    for lanzamiento in lanzamientos {
        let Some(inicio) = lanzamiento.fecha_inicio else {
            continue;
        };
        if inicio.year() != anio {
            continue;
        }
        let grupo = nombre_grupo(&lanzamiento.nombre);
        let clave = normalizar_clave(&grupo);
        let grupos = por_mes.entry(inicio.month()).or_default();
        match grupos
            .iter_mut()
            .find(|g| normalizar_clave(&g.grupo) == clave)
        {
            Some(existente) => {
                existente.cupos += lanzamiento.cupos;
                existente.variantes += 1;
            }
            None => grupos.push(GrupoMes {
                grupo,
                cupos: lanzamiento.cupos,
                variantes: 1,
            }),
        }
    }

    por_mes
        .into_iter()
        .map(|(mes, grupos)| {
            let total_cupos = grupos.iter().map(|g| g.cupos).sum();
            ResumenMes {
                mes,
                grupos,
                total_cupos,
            }
        })
        .collect()
}

/// Convenios nuevos confirmados del año: instituciones marcadas
/// `convenio_nuevo` cuyo lanzamiento más temprano del año (matcheado por
/// prefijo de nombre normalizado) empieza en o después de la fecha de
/// corte fija (1 de agosto de 2024). La marca sola no alcanza.
pub fn convenios_nuevos(
    instituciones: &[Institucion],
    lanzamientos: &[Lanzamiento],
    anio: i32,
) -> Metrica {
    let corte = fecha_corte_convenios();
    let mut lista = Vec::new();

    for institucion in instituciones {
        if !institucion.convenio_nuevo {
            continue;
        }
        let clave = normalizar_clave(&institucion.nombre);
        if clave.is_empty() {
            continue;
        }
        let mas_temprano = lanzamientos
            .iter()
            .filter_map(|l| {
                let inicio = l.fecha_inicio?;
                if inicio.year() != anio {
                    return None;
                }
                if !normalizar_clave(&l.nombre).starts_with(&clave) {
                    return None;
                }
                Some(inicio)
            })
            .min();
        if let Some(inicio) = mas_temprano {
            if inicio >= corte {
                lista.push(InfoEntidad {
                    id: institucion.id.clone(),
                    nombre: institucion.nombre.clone(),
                    detalle: Some(format!("primer lanzamiento {}", inicio)),
                });
            }
        }
    }

    Metrica::desde(lista)
}

/// Conjunto completo de tarjetas del tablero.
#[derive(Debug, Clone, Serialize)]
pub struct MetricasTablero {
    pub activos: Metrica,
    pub sin_practica: Metrica,
    pub con_practica_activa: Metrica,
    pub cerca_de_completar: Metrica,
    pub aptos_acreditacion: Metrica,
    pub convenios_nuevos: Metrica,
    pub lanzamientos_por_mes: Vec<ResumenMes>,
}

pub fn calcular_metricas(
    estudiantes: &[Estudiante],
    instituciones: &[Institucion],
    lanzamientos: &[Lanzamiento],
    practicas: &[Practica],
    anio: i32,
    hoy: NaiveDate,
    politica: PoliticaNombre,
) -> MetricasTablero {
    let vinculos = resolver_vinculos_practicas(practicas, lanzamientos, politica);
    MetricasTablero {
        activos: estudiantes_activos(estudiantes),
        sin_practica: estudiantes_sin_practica(estudiantes, practicas, &vinculos),
        con_practica_activa: estudiantes_con_practica_activa(estudiantes, practicas, hoy),
        cerca_de_completar: cerca_de_completar(estudiantes, practicas, hoy),
        aptos_acreditacion: aptos_acreditacion(estudiantes, practicas),
        convenios_nuevos: convenios_nuevos(instituciones, lanzamientos, anio),
        lanzamientos_por_mes: lanzamientos_por_mes(lanzamientos, anio),
    }
}
