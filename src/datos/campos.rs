//! Mapa de constantes del esquema externo.
//!
//! Las claves de `fields` son los nombres visibles de columna del almacén
//! tabular. Un renombre del lado externo es un cambio que rompe: se
//! actualiza la constante acá y nada más (ninguna lógica depende del texto).

pub mod tablas {
    pub const ESTUDIANTES: &str = "Estudiantes";
    pub const INSTITUCIONES: &str = "Instituciones";
    pub const LANZAMIENTOS: &str = "Lanzamientos PPS";
    pub const CONVOCATORIAS: &str = "Convocatorias";
    pub const PRACTICAS: &str = "Practicas";
    pub const SANCIONES: &str = "Sanciones";
}

pub mod estudiante {
    pub const LEGAJO: &str = "Legajo";
    pub const NOMBRE: &str = "Nombre";
    pub const ORIENTACION: &str = "Orientación Elegida";
    pub const FINALIZADO: &str = "Finalizó";
    pub const FECHA_CREACION: &str = "Fecha de Creación";
    pub const FECHA_FINALIZACION: &str = "Fecha de Finalización";
}

pub mod institucion {
    pub const NOMBRE: &str = "Nombre";
    pub const TELEFONO: &str = "Teléfono";
    pub const CONVENIO_NUEVO: &str = "Convenio Nuevo";
    pub const DIRECCION: &str = "Dirección";
}

pub mod lanzamiento {
    pub const NOMBRE: &str = "Nombre PPS";
    pub const FECHA_INICIO: &str = "Fecha de Inicio";
    pub const FECHA_FIN: &str = "Fecha de Finalización";
    pub const ORIENTACION: &str = "Orientación";
    pub const CUPOS: &str = "Cupos disponibles";
    pub const HORAS: &str = "Horas Acreditadas";
    pub const LINK_INFORME: &str = "Link Corrección de Informes";
    pub const ESTADO_GESTION: &str = "Estado de Gestión";
    pub const NOTAS_GESTION: &str = "Notas de Gestión";
    pub const FECHA_RELANZAMIENTO: &str = "Fecha de Relanzamiento";
}

pub mod convocatoria {
    pub const LANZAMIENTO: &str = "Lanzamiento Vinculado";
    pub const LANZAMIENTO_NOMBRE: &str = "Nombre PPS (lookup)";
    pub const LANZAMIENTO_FECHA: &str = "Fecha de Inicio (lookup)";
    pub const LEGAJO: &str = "Legajo";
    pub const ESTADO: &str = "Estado de Inscripción";
    pub const INFORME_ENTREGADO: &str = "Informe Entregado";
    pub const FECHA_ENTREGA: &str = "Fecha de Entrega de Informe";
    pub const SANCION: &str = "Sanción Vinculada";
}

pub mod practica {
    pub const LANZAMIENTO: &str = "Lanzamiento Vinculado";
    pub const INSTITUCION: &str = "Institución (lookup)";
    pub const ORIENTACION: &str = "Orientación (lookup)";
    pub const FECHA_INICIO: &str = "Fecha de Inicio";
    pub const FECHA_FIN: &str = "Fecha de Finalización";
    pub const LEGAJOS: &str = "Legajos";
    pub const HORAS: &str = "Horas Realizadas";
    pub const ESTADO: &str = "Estado de Práctica";
    pub const NOTA: &str = "Nota";
    pub const INFORME_ENTREGADO: &str = "Informe Entregado";
    pub const SANCION: &str = "Sanción Vinculada";
}

pub mod sancion {
    pub const LEGAJO: &str = "Legajo";
    pub const LANZAMIENTO: &str = "Lanzamiento Vinculado";
    pub const TIPO: &str = "Tipo de Sanción";
    pub const FECHA: &str = "Fecha";
    pub const NOTAS: &str = "Notas";
    pub const PUNTAJE: &str = "Puntaje";
}
