// Estructuras de datos principales del sistema de PPS

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::vinculos::normalizar::normalizar_clave;

/// Estudiante del programa de prácticas. `legajo` es la clave de negocio
/// (única a nivel global); `id` es el identificador del registro en el
/// almacén externo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estudiante {
    pub id: String,
    pub legajo: String,
    pub nombre: String,
    pub orientacion: Option<Orientacion>,
    pub finalizado: bool,
    pub fecha_creacion: Option<NaiveDate>,
    pub fecha_finalizacion: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institucion {
    pub id: String,
    pub nombre: String,
    /// Teléfono de contacto. Es el único campo de instituciones que este
    /// sistema modifica (seguimiento de contacto).
    pub telefono: Option<String>,
    pub convenio_nuevo: bool,
    pub direccion: Option<String>,
}

/// Lanzamiento: una oferta concreta de PPS en una institución, con rango de
/// fechas y cupos. El nombre suele ser compuesto: `"<Grupo> - <Variante>"`
/// (p. ej. `"Hospital X - Turno Mañana"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lanzamiento {
    pub id: String,
    pub nombre: String,
    pub fecha_inicio: Option<NaiveDate>,
    /// Fin opcional: hay lanzamientos abiertos sin fecha de cierre.
    pub fecha_fin: Option<NaiveDate>,
    /// Orientación tal como viene del almacén (texto libre); se compara
    /// siempre normalizada.
    pub orientacion: Option<String>,
    pub cupos: u32,
    pub horas_acreditadas: u32,
    /// Link al documento de corrección/entrega de informes.
    pub link_informe: Option<String>,
    pub estado_gestion: EstadoGestion,
    pub notas_gestion: Option<String>,
    pub fecha_relanzamiento: Option<NaiveDate>,
}

/// Convocatoria: inscripción de un estudiante a un Lanzamiento. Además del
/// link directo (cuando existe) guarda copias desnormalizadas de nombre y
/// fecha del lanzamiento, que funcionan como referencia débil cuando el
/// link está ausente.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Convocatoria {
    pub id: String,
    pub lanzamiento_link: Option<String>,
    pub lanzamiento_nombre: Option<String>,
    pub lanzamiento_fecha: Option<NaiveDate>,
    pub legajo: String,
    pub estado: EstadoConvocatoria,
    pub informe_entregado: bool,
    pub fecha_entrega: Option<NaiveDate>,
}

/// Práctica: instancia realizada (o en curso) de un estudiante haciendo un
/// lanzamiento. Los registros históricos muchas veces no traen link directo,
/// sólo institución/orientación/fecha desnormalizadas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Practica {
    pub id: String,
    pub lanzamiento_link: Option<String>,
    pub institucion_nombre: Option<String>,
    pub orientacion: Option<String>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
    /// Legajos vinculados (el almacén externo permite links múltiples).
    pub legajos: Vec<String>,
    pub horas: u32,
    pub estado: EstadoPractica,
    pub nota: Nota,
    pub informe_entregado: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sancion {
    pub id: String,
    pub legajo: String,
    pub lanzamiento_link: Option<String>,
    pub tipo: TipoSancion,
    pub fecha: Option<NaiveDate>,
    pub notas: Option<String>,
    pub puntaje: i32,
}

/// Las cuatro orientaciones del programa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientacion {
    Clinica,
    Educacional,
    Laboral,
    Comunitaria,
}

pub fn parse_orientacion(raw: &str) -> Option<Orientacion> {
    match normalizar_clave(raw).as_str() {
        "clinica" => Some(Orientacion::Clinica),
        "educacional" => Some(Orientacion::Educacional),
        "laboral" => Some(Orientacion::Laboral),
        "comunitaria" => Some(Orientacion::Comunitaria),
        _ => None,
    }
}

/// Estado de inscripción de una Convocatoria. El almacén externo lo guarda
/// como texto libre; acá se cierra a un conjunto finito con `Desconocido`
/// como caso visible (nunca un fallthrough silencioso).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstadoConvocatoria {
    Seleccionado,
    Inscripto,
    NoSeleccionado,
    Desconocido(String),
}

impl EstadoConvocatoria {
    /// Prioridad para elegir la convocatoria canónica entre duplicados:
    /// Seleccionado(3) > Inscripto(2) > No Seleccionado(1) > desconocido(0).
    pub fn prioridad(&self) -> u8 {
        match self {
            EstadoConvocatoria::Seleccionado => 3,
            EstadoConvocatoria::Inscripto => 2,
            EstadoConvocatoria::NoSeleccionado => 1,
            EstadoConvocatoria::Desconocido(_) => 0,
        }
    }
}

pub fn parse_estado_convocatoria(raw: &str) -> EstadoConvocatoria {
    match normalizar_clave(raw).as_str() {
        "seleccionado" | "seleccionada" => EstadoConvocatoria::Seleccionado,
        "inscripto" | "inscripta" => EstadoConvocatoria::Inscripto,
        "no seleccionado" | "no seleccionada" => EstadoConvocatoria::NoSeleccionado,
        _ => EstadoConvocatoria::Desconocido(raw.trim().to_string()),
    }
}

/// Estado de una Práctica. Los cuatro primeros son estados terminales
/// (la práctica está cerrada a efectos de vinculación).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstadoPractica {
    Finalizada,
    PpsRealizada,
    ConvenioRealizado,
    Realizada,
    EnCurso,
    Desconocido(String),
}

impl EstadoPractica {
    pub fn es_terminal(&self) -> bool {
        matches!(
            self,
            EstadoPractica::Finalizada
                | EstadoPractica::PpsRealizada
                | EstadoPractica::ConvenioRealizado
                | EstadoPractica::Realizada
        )
    }
}

/// Parsea el estado de práctica. Igualdad normalizada primero; si no,
/// contención de substring para los valores terminales (el almacén permite
/// texto libre tipo "Finalizada (sin nota)"). El chequeo va del literal más
/// largo al más corto: "pps realizada" y "convenio realizado" antes que
/// "realizada".
pub fn parse_estado_practica(raw: &str) -> EstadoPractica {
    let clave = normalizar_clave(raw);
    match clave.as_str() {
        "finalizada" => return EstadoPractica::Finalizada,
        "pps realizada" => return EstadoPractica::PpsRealizada,
        "convenio realizado" => return EstadoPractica::ConvenioRealizado,
        "realizada" => return EstadoPractica::Realizada,
        "en curso" => return EstadoPractica::EnCurso,
        _ => {}
    }
    if clave.contains("convenio realizado") {
        EstadoPractica::ConvenioRealizado
    } else if clave.contains("pps realizada") {
        EstadoPractica::PpsRealizada
    } else if clave.contains("finalizada") {
        EstadoPractica::Finalizada
    } else if clave.contains("realizada") {
        EstadoPractica::Realizada
    } else if clave.contains("en curso") {
        EstadoPractica::EnCurso
    } else {
        EstadoPractica::Desconocido(raw.trim().to_string())
    }
}

/// Estado de gestión de un Lanzamiento (seguimiento de relanzamientos).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstadoGestion {
    Pendiente,
    EnConversacion,
    RelanzamientoConfirmado,
    NoRelanzar,
    Archivado,
    Desconocido(String),
}

pub fn parse_estado_gestion(raw: &str) -> EstadoGestion {
    match normalizar_clave(raw).as_str() {
        "" | "pendiente" => EstadoGestion::Pendiente,
        "en conversacion" | "en conversaciones" => EstadoGestion::EnConversacion,
        "relanzamiento confirmado" => EstadoGestion::RelanzamientoConfirmado,
        "no relanzar" | "no se relanza" => EstadoGestion::NoRelanzar,
        "archivado" | "archivada" => EstadoGestion::Archivado,
        _ => EstadoGestion::Desconocido(raw.trim().to_string()),
    }
}

/// Nota de una práctica. El almacén mezcla números-como-texto con varios
/// valores centinela. Sólo `Numerica`, `Desaprobado` y `NoEntregado` son
/// notas finales a efectos de reportes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Nota {
    Numerica(f64),
    SinCalificar,
    EntregadoSinCorregir,
    NoEntregado,
    Desaprobado,
    Desconocida(String),
}

impl Nota {
    pub fn es_final(&self) -> bool {
        matches!(
            self,
            Nota::Numerica(_) | Nota::Desaprobado | Nota::NoEntregado
        )
    }
}

pub fn parse_nota(raw: &str) -> Nota {
    let crudo = raw.trim();
    if crudo.is_empty() {
        return Nota::SinCalificar;
    }
    if let Ok(n) = crudo.replace(',', ".").parse::<f64>() {
        return Nota::Numerica(n);
    }
    match normalizar_clave(crudo).as_str() {
        "sin calificar" => Nota::SinCalificar,
        "entregado (sin corregir)" | "entregado sin corregir" => Nota::EntregadoSinCorregir,
        "no entregado" => Nota::NoEntregado,
        "desaprobado" | "desaprobada" => Nota::Desaprobado,
        _ => Nota::Desconocida(crudo.to_string()),
    }
}

/// Tipos de sanción contemplados por el reglamento.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoSancion {
    AusenciaInjustificada,
    AbandonoPractica,
    InformeFueraPlazo,
    IncumplimientoNormas,
    Desconocido(String),
}

pub fn parse_tipo_sancion(raw: &str) -> TipoSancion {
    match normalizar_clave(raw).as_str() {
        "ausencia injustificada" => TipoSancion::AusenciaInjustificada,
        "abandono de practica" | "abandono de pps" => TipoSancion::AbandonoPractica,
        "informe fuera de plazo" => TipoSancion::InformeFueraPlazo,
        "incumplimiento de normas" => TipoSancion::IncumplimientoNormas,
        _ => TipoSancion::Desconocido(raw.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prioridad_de_estados() {
        assert!(
            EstadoConvocatoria::Seleccionado.prioridad()
                > EstadoConvocatoria::Inscripto.prioridad()
        );
        assert!(
            EstadoConvocatoria::Inscripto.prioridad()
                > EstadoConvocatoria::NoSeleccionado.prioridad()
        );
        assert_eq!(EstadoConvocatoria::Desconocido("???".into()).prioridad(), 0);
    }

    #[test]
    fn parse_estado_convocatoria_insensible_a_mayusculas() {
        assert_eq!(
            parse_estado_convocatoria("SELECCIONADO"),
            EstadoConvocatoria::Seleccionado
        );
        assert_eq!(
            parse_estado_convocatoria("  inscripto "),
            EstadoConvocatoria::Inscripto
        );
        assert_eq!(
            parse_estado_convocatoria("No Seleccionado"),
            EstadoConvocatoria::NoSeleccionado
        );
    }

    #[test]
    fn estados_terminales_de_practica() {
        assert!(parse_estado_practica("PPS Realizada").es_terminal());
        assert!(parse_estado_practica("Convenio Realizado").es_terminal());
        assert!(parse_estado_practica("Finalizada (sin nota)").es_terminal());
        assert!(!parse_estado_practica("En Curso").es_terminal());
        let raro = parse_estado_practica("pausada");
        assert_eq!(raro, EstadoPractica::Desconocido("pausada".into()));
        assert!(!raro.es_terminal());
    }

    #[test]
    fn notas_finales_y_centinelas() {
        assert!(parse_nota("8").es_final());
        assert!(parse_nota("7,50").es_final());
        assert!(parse_nota("Desaprobado").es_final());
        assert!(parse_nota("No Entregado").es_final());
        assert!(!parse_nota("Sin calificar").es_final());
        assert!(!parse_nota("Entregado (sin corregir)").es_final());
        assert!(!parse_nota("").es_final());
    }
}
