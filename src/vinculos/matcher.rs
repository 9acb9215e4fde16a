//! Resolución de referencias débiles contra Lanzamientos.
//!
//! El almacén externo mezcla joins explícitos (link por id) con copias
//! desnormalizadas de nombre/fecha. Este módulo centraliza la resolución en
//! dos etapas: lookup por link primero (gana siempre), después match difuso
//! por nombre normalizado + ventana de fechas. Ningún call site duplica la
//! lógica de desempate.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::Lanzamiento;
use crate::vinculos::normalizar::{dias_entre, nombre_grupo, normalizar_clave};

/// Tolerancia por defecto de la ventana de fechas, en días.
pub const TOLERANCIA_DIAS: i64 = 31;

/// Política de comparación de nombres para el match difuso.
///
/// Los lanzamientos con nombre compuesto ("Hospital X - Turno Mañana") no
/// coinciden textualmente con la copia desnormalizada que guardan
/// convocatorias y prácticas viejas. `NombreGrupo` compara sólo el prefijo
/// de grupo de ambos lados; `NombreCompleto` exige igualdad del nombre
/// entero. Los call sites productivos usan `NombreGrupo` para el cruce entre
/// tablas; los lookups exactos por link no pasan por nombres.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoliticaNombre {
    NombreCompleto,
    NombreGrupo,
}

impl PoliticaNombre {
    fn clave(&self, nombre: &str) -> String {
        match self {
            PoliticaNombre::NombreCompleto => normalizar_clave(nombre),
            PoliticaNombre::NombreGrupo => normalizar_clave(&nombre_grupo(nombre)),
        }
    }
}

/// Tupla objetivo de un match: lo que el registro fuente sabe del
/// lanzamiento al que cree pertenecer.
#[derive(Debug, Clone, Default)]
pub struct Objetivo<'a> {
    /// Link directo al id del lanzamiento, si el registro lo trae.
    pub link: Option<&'a str>,
    pub nombre: Option<&'a str>,
    /// Si está presente, la orientación del candidato debe coincidir
    /// (normalizada, igualdad exacta).
    pub orientacion: Option<&'a str>,
    pub fecha: Option<NaiveDate>,
}

/// Índice de lanzamientos para resolver muchos registros contra el mismo
/// pool de candidatos sin rearmar el lookup por id en cada llamada.
pub struct IndiceLanzamientos<'a> {
    por_id: HashMap<&'a str, &'a Lanzamiento>,
    lanzamientos: &'a [Lanzamiento],
}

impl<'a> IndiceLanzamientos<'a> {
    pub fn new(lanzamientos: &'a [Lanzamiento]) -> Self {
        let por_id = lanzamientos.iter().map(|l| (l.id.as_str(), l)).collect();
        IndiceLanzamientos {
            por_id,
            lanzamientos,
        }
    }

    pub fn por_id(&self, id: &str) -> Option<&'a Lanzamiento> {
        self.por_id.get(id).copied()
    }

    /// Devuelve el mejor candidato para el objetivo, o `None` si no hay
    /// ninguno dentro de la tolerancia. `None` significa "sin vincular",
    /// nunca es un error: el caller decide si descarta el registro o lo
    /// lista como diagnóstico.
    ///
    /// Orden de resolución:
    /// 1. Si el objetivo trae link y el id existe en el índice, ese
    ///    lanzamiento gana incondicionalmente (O(1), sin mirar fechas).
    /// 2. Si no, entre los candidatos cuyo nombre normalizado (según la
    ///    política) iguala al del objetivo (y cuya orientación coincide,
    ///    cuando el objetivo la trae) se queda el de menor distancia en
    ///    días. La cota superior es exclusiva: se acepta sólo una distancia
    ///    estrictamente menor que la mejor vigente, arrancando en la
    ///    tolerancia, así que a igual distancia gana el primero visto.
    pub fn mejor_coincidencia(
        &self,
        objetivo: &Objetivo<'_>,
        tolerancia_dias: i64,
        politica: PoliticaNombre,
    ) -> Option<&'a Lanzamiento> {
        if let Some(link) = objetivo.link {
            if let Some(l) = self.por_id(link) {
                return Some(l);
            }
        }

        let nombre = objetivo.nombre?;
        let fecha = objetivo.fecha?;
        let clave_objetivo = politica.clave(nombre);
        if clave_objetivo.is_empty() {
            return None;
        }
        let orientacion_objetivo = objetivo
            .orientacion
            .map(normalizar_clave)
            .filter(|o| !o.is_empty());

        let mut mejor_distancia = tolerancia_dias;
        let mut elegido: Option<&'a Lanzamiento> = None;

        for candidato in self.lanzamientos {
            if politica.clave(&candidato.nombre) != clave_objetivo {
                continue;
            }
            if let Some(ref orientacion) = orientacion_objetivo {
                let del_candidato = candidato
                    .orientacion
                    .as_deref()
                    .map(normalizar_clave)
                    .unwrap_or_default();
                if del_candidato != *orientacion {
                    continue;
                }
            }
            let Some(inicio) = candidato.fecha_inicio else {
                continue;
            };
            let distancia = dias_entre(inicio, fecha);
            if distancia < mejor_distancia {
                mejor_distancia = distancia;
                elegido = Some(candidato);
            }
        }

        elegido
    }
}

/// Conveniencia para resoluciones sueltas (arma el índice y resuelve una
/// sola vez). Para lotes usar `IndiceLanzamientos` directamente.
pub fn mejor_coincidencia<'a>(
    objetivo: &Objetivo<'_>,
    lanzamientos: &'a [Lanzamiento],
    tolerancia_dias: i64,
    politica: PoliticaNombre,
) -> Option<&'a Lanzamiento> {
    IndiceLanzamientos::new(lanzamientos).mejor_coincidencia(objetivo, tolerancia_dias, politica)
}
