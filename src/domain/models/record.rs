use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::RecordId;

/// An image record as read back from the document store: the persisted
/// document plus the id the store assigned on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: RecordId,
    #[serde(flatten)]
    pub document: RecordDocument,
}

/// The persisted shape of a record. Field names on the wire match the
/// `tbl_face` collection schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDocument {
    #[serde(rename = "nombreImagen")]
    pub nombre_imagen: String,

    /// Download reference for the uploaded object. Populated by the save
    /// pipeline after the upload completes; never touched by updates.
    #[serde(rename = "imgUrl", default)]
    pub img_url: String,

    #[serde(rename = "fechaNacimiento")]
    pub fecha_nacimiento: String,

    #[serde(rename = "tlfEmergencia")]
    pub tlf_emergencia: String,

    pub cedula: String,
}

/// The caller-supplied metadata subset: everything except `img_url` and
/// `id`. This is both the input to `save` and the exact field set a
/// partial update may touch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFields {
    #[serde(rename = "nombreImagen")]
    pub nombre_imagen: String,

    #[serde(rename = "fechaNacimiento")]
    pub fecha_nacimiento: String,

    #[serde(rename = "tlfEmergencia")]
    pub tlf_emergencia: String,

    pub cedula: String,
}

impl RecordFields {
    /// Combine these fields with a download URL into a persistable document.
    pub fn into_document(self, img_url: String) -> RecordDocument {
        RecordDocument {
            nombre_imagen: self.nombre_imagen,
            img_url,
            fecha_nacimiento: self.fecha_nacimiento,
            tlf_emergencia: self.tlf_emergencia,
            cedula: self.cedula,
        }
    }
}

impl RecordDocument {
    /// Apply a partial update, leaving `img_url` untouched.
    pub fn apply(&mut self, fields: &RecordFields) {
        self.nombre_imagen = fields.nombre_imagen.clone();
        self.fecha_nacimiento = fields.fecha_nacimiento.clone();
        self.tlf_emergencia = fields.tlf_emergencia.clone();
        self.cedula = fields.cedula.clone();
    }
}

/// An in-memory file awaiting upload. Lives only for the duration of one
/// `save` call; the resulting download URL comes back through the save
/// result rather than being written into the handle.
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub data: Bytes,
    pub content_type: Option<String>,
}

impl PendingFile {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
